//! Requirement spec-block parsing
//!
//! Storefront system requirements arrive as loosely structured HTML list
//! fragments, usually one `<li>Label: value</li>` per hardware field, in a
//! mix of languages. This module flattens one fragment into an ordered
//! field-name → raw-text mapping and provides keyword-based field selection
//! over it. Parsing is heuristic best-effort: unrecognized lines are
//! dropped, never reported as errors.

use scraper::{Html, Selector};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Labels containing one of these stems are always accepted as field keys.
const STANDARD_KEYS: &[&str] = &[
    "processor", "cpu", "graphics", "video", "gpu", "memory", "ram", "os", "storage", "directx",
];

/// Labels shorter than this many characters are accepted even without a
/// recognized stem, so short non-English labels still come through.
const LOOSE_LABEL_MAX: usize = 20;

/// Content-sniffing hints for list items without a usable label, checked in
/// this order; the first matching category wins.
const GRAPHICS_HINTS: &[&str] = &[
    "geforce", "radeon", "gtx", "rtx", "rx ", "arc ", "graphics", "vga", "gpu",
];
const PROCESSOR_HINTS: &[&str] = &[
    "intel", "amd", "ryzen", "core", "i3", "i5", "i7", "i9", "cpu", "processor", "ghz",
];
const MEMORY_HINTS: &[&str] = &["ram", "memory", "gb"];
const OS_HINTS: &[&str] = &["windows", "os", "mac", "linux"];

/// Ordered mapping from normalized field key to raw requirement text.
///
/// Keys keep their insertion order so field selection sees fields in the
/// order the storefront listed them. Inserting an existing key overwrites
/// the value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecMap {
    entries: Vec<(String, String)>,
}

impl SpecMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key, overwriting the value when the key already exists.
    pub fn insert(&mut self, key: String, value: String) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Value of the first key (in insertion order) containing any of the
    /// given keywords. Keys are already lowercased; containment is
    /// case-sensitive.
    pub fn select(&self, keywords: &[&str]) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| keywords.iter().any(|word| key.contains(word)))
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Serialize for SpecMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SpecMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SpecMapVisitor;

        impl<'de> Visitor<'de> for SpecMapVisitor {
            type Value = SpecMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of spec fields")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<SpecMap, A::Error> {
                let mut specs = SpecMap::new();
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    specs.insert(key, value);
                }
                Ok(specs)
            }
        }

        deserializer.deserialize_map(SpecMapVisitor)
    }
}

/// Parse one requirement HTML fragment into a [`SpecMap`].
///
/// Per list item:
/// 1. Split the visible text on the first `:` and normalize the left part
///    as the label (lowercase, parens stripped, spaces to underscores).
///    Accept it when it contains a recognized hardware stem or is short.
/// 2. Without a usable label, sniff the whole line for category hints
///    (graphics, then processor, memory, os).
/// 3. Merge near-duplicate keys: anything containing `cpu`/`proc` becomes
///    `processor`, anything containing `gpu`/`graph`/`video` becomes
///    `graphics`.
///
/// Returns `None` when the fragment is empty or no entries were extracted.
pub fn parse_requirement_block(html: &str) -> Option<SpecMap> {
    if html.trim().is_empty() {
        return None;
    }

    let fragment = Html::parse_fragment(html);
    let item_selector = Selector::parse("li").expect("static selector");

    let mut specs = SpecMap::new();

    for item in fragment.select(&item_selector) {
        let text = item.text().collect::<String>();
        let text = text.trim();
        if text.is_empty() {
            continue;
        }

        let mut key = String::new();
        let mut value = String::new();

        if let Some((label, rest)) = text.split_once(':') {
            let candidate = normalize_label(label);
            let is_standard = STANDARD_KEYS.iter().any(|stem| candidate.contains(stem));
            if is_standard || candidate.chars().count() < LOOSE_LABEL_MAX {
                key = candidate;
                value = rest.trim().to_string();
            }
        }

        if key.is_empty() {
            if let Some((sniffed, text_value)) = sniff_category(text) {
                key = sniffed.to_string();
                value = text_value;
            }
        }

        if !key.is_empty() && !value.is_empty() {
            specs.insert(canonicalize_key(key), value);
        }
    }

    if specs.is_empty() {
        None
    } else {
        Some(specs)
    }
}

/// Lowercase the label, strip paren characters, underscore the spaces.
fn normalize_label(label: &str) -> String {
    label
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| *c != '(' && *c != ')')
        .map(|c| if c == ' ' { '_' } else { c })
        .collect()
}

/// Categorize an unlabeled line by its content, first match wins.
fn sniff_category(text: &str) -> Option<(&'static str, String)> {
    let lower = text.to_lowercase();
    let categories: [(&[&str], &'static str); 4] = [
        (GRAPHICS_HINTS, "graphics"),
        (PROCESSOR_HINTS, "processor"),
        (MEMORY_HINTS, "memory"),
        (OS_HINTS, "os"),
    ];
    for (hints, key) in categories {
        if hints.iter().any(|hint| lower.contains(hint)) {
            return Some((key, text.to_string()));
        }
    }
    None
}

/// Merge key spellings discovered across different list items.
fn canonicalize_key(key: String) -> String {
    if key.contains("cpu") || key.contains("proc") {
        return "processor".to_string();
    }
    if key.contains("gpu") || key.contains("graph") || key.contains("video") {
        return "graphics".to_string();
    }
    key
}
