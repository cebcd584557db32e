//! Hardware name normalization
//!
//! Raw requirement text names hardware loosely: trademark glyphs,
//! parenthetical asides, several alternatives joined by `/` or "or", and
//! model names with the vendor prefix missing. This module cleans one raw
//! field value, splits it into independent candidate hardware names, and
//! rewrites each candidate with the vendor brand the benchmark catalog
//! expects. All functions are pure.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which benchmark catalog a hardware name is resolved against.
///
/// The FX vendor correction is scoped to the CPU catalog: the bare "FX"
/// token also appears in GPU model lines, where prefixing "AMD" would
/// produce false matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HardwareTable {
    #[serde(rename = "cpu_tb")]
    Cpu,
    #[serde(rename = "gpu_tb")]
    Gpu,
}

impl HardwareTable {
    /// Catalog table name, also the wire value of the lookup collaborator.
    pub fn table_name(self) -> &'static str {
        match self {
            HardwareTable::Cpu => "cpu_tb",
            HardwareTable::Gpu => "gpu_tb",
        }
    }
}

impl fmt::Display for HardwareTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

static LITERAL_TM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\(tm\)").expect("static regex"));
static PARENTHETICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[(（].*?[)）]").expect("static regex"));
static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)[/|]| or ").expect("static regex"));
static INTEL_CORE_MODEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bi\d[-\s]").expect("static regex"));
static FX_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bfx\s").expect("static regex"));

/// Filler phrases removed before splitting, applied in this order.
static FILLER_PHRASES: Lazy<[Regex; 4]> = Lazy::new(|| {
    [
        Regex::new(r"(?i) and above").expect("static regex"),
        Regex::new(r"(?i) processor").expect("static regex"),
        Regex::new(r"(?i) graphics").expect("static regex"),
        Regex::new(r"(?i) video card").expect("static regex"),
    ]
});

/// Candidates shorter than this after trimming are discarded as split
/// garbage.
const MIN_CANDIDATE_LEN: usize = 2;

/// Strip trademark glyphs, parenthetical asides, and filler phrases.
fn clean_requirement_text(raw: &str) -> String {
    let without_glyphs: String = raw.chars().filter(|c| *c != '®' && *c != '™').collect();
    let without_tm = LITERAL_TM.replace_all(&without_glyphs, "");
    let without_parens = PARENTHETICAL.replace_all(&without_tm, "");

    let mut cleaned = without_parens.into_owned();
    for phrase in FILLER_PHRASES.iter() {
        cleaned = phrase.replace_all(&cleaned, "").into_owned();
    }
    cleaned.trim().to_string()
}

/// Split a raw requirement value into candidate hardware names.
///
/// The whole string is cleaned once, then broken on `/`, `|`, or the word
/// "or". Pieces are trimmed; pieces shorter than two characters are
/// dropped. Order follows the original left-to-right sequence and
/// duplicates are kept.
pub fn split_candidates(raw: &str) -> Vec<String> {
    let cleaned = clean_requirement_text(raw);
    SEPARATORS
        .split(&cleaned)
        .map(str::trim)
        .filter(|piece| piece.chars().count() >= MIN_CANDIDATE_LEN)
        .map(str::to_string)
        .collect()
}

/// Prepend the vendor brand a model name omits.
///
/// Rules are independent predicate/rewrite pairs, each keyed off the
/// original candidate text (case-insensitive), evaluated in sequence:
/// Ryzen → "AMD", bare Core-i models → "Intel Core", GTX/RTX → "NVIDIA
/// GeForce", RX/Radeon → "AMD", and — CPU catalog only — the legacy FX
/// desktop line → "AMD".
pub fn qualify_brand(candidate: &str, table: HardwareTable) -> String {
    let lower = candidate.to_lowercase();
    let mut search = candidate.to_string();

    if lower.contains("ryzen") && !lower.contains("amd") {
        search = format!("AMD {}", search);
    }
    if INTEL_CORE_MODEL.is_match(&lower) && !lower.contains("intel") {
        search = format!("Intel Core {}", search);
    }
    if (lower.contains("gtx") || lower.contains("rtx")) && !lower.contains("nvidia") {
        search = format!("NVIDIA GeForce {}", search);
    }
    if (lower.contains("rx ") || lower.contains("radeon")) && !lower.contains("amd") {
        search = format!("AMD {}", search);
    }
    if table == HardwareTable::Cpu
        && (lower.contains("fx-") || FX_TOKEN.is_match(&lower))
        && !lower.contains("amd")
    {
        search = format!("AMD {}", search);
    }

    search
}
