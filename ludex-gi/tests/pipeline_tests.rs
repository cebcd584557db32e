//! Requirement-parsing pipeline integration tests
//!
//! Exercises the full path a requirement HTML fragment takes: spec-block
//! parsing, field selection, candidate splitting, brand qualification, and
//! score resolution against a canned lookup.

use async_trait::async_trait;
use ludex_common::Result;
use std::collections::HashMap;

use ludex_gi::services::hardware::{qualify_brand, split_candidates, HardwareTable};
use ludex_gi::services::score_resolver::{resolve_scores, ScoreLookup};
use ludex_gi::services::spec_parser::parse_requirement_block;

const CPU_FIELD_KEYWORDS: &[&str] = &["cpu", "processor", "프로세서", "proc"];
const GPU_FIELD_KEYWORDS: &[&str] = &["graphic", "video", "gpu", "그래픽", "비디오"];

struct StubLookup {
    scores: HashMap<&'static str, f64>,
}

impl StubLookup {
    fn new(entries: &[(&'static str, f64)]) -> Self {
        Self {
            scores: entries.iter().copied().collect(),
        }
    }
}

#[async_trait]
impl ScoreLookup for StubLookup {
    async fn match_score(&self, _table: HardwareTable, input_text: &str) -> Result<Option<f64>> {
        Ok(self.scores.get(input_text).copied())
    }
}

#[tokio::test]
async fn minimum_requirement_block_resolves_end_to_end() {
    let html = "<li>Processor: Intel Core i3-4160 or AMD FX-6300</li>\
                <li>Graphics: NVIDIA GeForce GTX 660 2GB</li>";

    let specs = parse_requirement_block(html).expect("block should parse");

    // Field selection pulls the full compound value
    let cpu_text = specs.select(CPU_FIELD_KEYWORDS).unwrap();
    assert_eq!(cpu_text, "Intel Core i3-4160 or AMD FX-6300");
    let gpu_text = specs.select(GPU_FIELD_KEYWORDS).unwrap();
    assert_eq!(gpu_text, "NVIDIA GeForce GTX 660 2GB");

    // The compound requirement splits into two candidates, and the second
    // one picks up its vendor prefix for the catalog search
    let candidates = split_candidates(cpu_text);
    assert_eq!(candidates, vec!["Intel Core i3-4160", "AMD FX-6300"]);
    assert_eq!(
        qualify_brand("FX-6300", HardwareTable::Cpu),
        "AMD FX-6300"
    );

    let lookup = StubLookup::new(&[
        ("Intel Core i3-4160", 480.0),
        ("AMD FX-6300", 410.0),
        ("NVIDIA GeForce GTX 660 2GB", 350.0),
    ]);

    let cpu_scores = resolve_scores(&lookup, HardwareTable::Cpu, Some(cpu_text)).await;
    assert_eq!(cpu_scores.len(), 2);
    assert_eq!(cpu_scores.get("Intel Core i3-4160"), Some(&480.0));
    assert_eq!(cpu_scores.get("AMD FX-6300"), Some(&410.0));

    let gpu_scores = resolve_scores(&lookup, HardwareTable::Gpu, Some(gpu_text)).await;
    assert_eq!(gpu_scores.len(), 1);
    assert_eq!(gpu_scores.get("NVIDIA GeForce GTX 660 2GB"), Some(&350.0));
}

#[tokio::test]
async fn partially_resolvable_block_keeps_only_confident_matches() {
    let html = "<li>CPU: Intel Core i5-9400F / Pentium 4</li>";
    let specs = parse_requirement_block(html).unwrap();
    let cpu_text = specs.select(CPU_FIELD_KEYWORDS).unwrap();

    // "Pentium 4" resolves to zero, which counts as no confident match
    let lookup = StubLookup::new(&[("Intel Core i5-9400F", 850.0), ("Pentium 4", 0.0)]);

    let scores = resolve_scores(&lookup, HardwareTable::Cpu, Some(cpu_text)).await;

    assert_eq!(scores.len(), 1);
    assert_eq!(scores.get("Intel Core i5-9400F"), Some(&850.0));
}

#[tokio::test]
async fn localized_labels_flow_through_the_pipeline() {
    let html = "<li>프로세서: i5-9400F / Ryzen 5 3600</li>\
                <li>그래픽: GTX 1060</li>";

    let specs = parse_requirement_block(html).unwrap();

    let cpu_text = specs.select(CPU_FIELD_KEYWORDS).unwrap();
    assert_eq!(cpu_text, "i5-9400F / Ryzen 5 3600");

    // The lookup sees the brand-qualified names; the result map keeps the
    // original spellings from the requirement text
    let lookup = StubLookup::new(&[
        ("Intel Core i5-9400F", 850.0),
        ("AMD Ryzen 5 3600", 900.0),
        ("NVIDIA GeForce GTX 1060", 620.0),
    ]);

    let cpu_scores = resolve_scores(&lookup, HardwareTable::Cpu, Some(cpu_text)).await;
    assert_eq!(cpu_scores.get("i5-9400F"), Some(&850.0));
    assert_eq!(cpu_scores.get("Ryzen 5 3600"), Some(&900.0));

    let gpu_text = specs.select(GPU_FIELD_KEYWORDS).unwrap();
    let gpu_scores = resolve_scores(&lookup, HardwareTable::Gpu, Some(gpu_text)).await;
    assert_eq!(gpu_scores.get("GTX 1060"), Some(&620.0));
}

#[tokio::test]
async fn sniffed_unlabeled_block_still_resolves() {
    // No "Label:" shape at all; category sniffing has to kick in
    let html = "<li>Intel Core 2 Duo 2.4 GHz</li><li>GeForce 8800 GT</li>";
    let specs = parse_requirement_block(html).unwrap();

    assert_eq!(
        specs.select(CPU_FIELD_KEYWORDS),
        Some("Intel Core 2 Duo 2.4 GHz")
    );
    assert_eq!(specs.select(GPU_FIELD_KEYWORDS), Some("GeForce 8800 GT"));
}

#[tokio::test]
async fn unparseable_fragment_degrades_to_no_scores() {
    let lookup = StubLookup::new(&[("Intel Core i5-9400F", 850.0)]);

    // No list items: parser yields nothing, resolver gets no input, and
    // the pipeline produces an empty result instead of an error
    let specs = parse_requirement_block("<p>See the store page.</p>");
    assert!(specs.is_none());

    let cpu_text = specs.as_ref().and_then(|s| s.select(CPU_FIELD_KEYWORDS));
    let scores = resolve_scores(&lookup, HardwareTable::Cpu, cpu_text).await;
    assert!(scores.is_empty());
}
