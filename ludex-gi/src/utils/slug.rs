//! URL-safe slug derivation from game titles

use unicode_normalization::UnicodeNormalization;

/// Derive a URL-safe slug from a free-form title.
///
/// Accented letters are folded to their base form (NFKD decomposition with
/// combining marks dropped), everything outside `[a-z0-9._-]` collapses to
/// a single dash, and leading/trailing dashes and dots are trimmed. Titles
/// with no representable characters yield an empty string; callers fall
/// back to an app-id slug.
pub fn safe_slug(input: &str) -> String {
    let folded: String = input
        .nfkd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect();

    let mut slug = String::with_capacity(folded.len());
    let mut pending_dash = false;
    for c in folded.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '_' || c == '-' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    // Collapse runs of dashes introduced by the charset filter
    let mut collapsed = String::with_capacity(slug.len());
    let mut last_dash = false;
    for c in slug.chars() {
        if c == '-' {
            if !last_dash {
                collapsed.push(c);
            }
            last_dash = true;
        } else {
            last_dash = false;
            collapsed.push(c);
        }
    }

    collapsed
        .trim_matches(|c| c == '-' || c == '.')
        .to_string()
}
