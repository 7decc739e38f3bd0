//! Topic matching: does a pattern cover a concrete URI?

use crate::domain::uri::{Uri, PLUS, STAR};

fn cells_match(pattern: &[&str], topic: &[&str]) -> bool {
    pattern.len() == topic.len()
        && pattern
            .iter()
            .zip(topic)
            .all(|(p, t)| *p == PLUS || p == t)
}

/// Whether `pattern` covers the concrete URI `topic`.
///
/// `+` covers exactly one cell and `*` covers zero or more. Returns `false`
/// when either side is invalid or `topic` contains wildcards.
pub fn matches(pattern: &str, topic: &str) -> bool {
    let (Ok(pattern), Ok(topic)) = (Uri::parse(pattern), Uri::parse(topic)) else {
        return false;
    };
    if !topic.is_concrete() {
        return false;
    }
    matches_uri(&pattern, &topic)
}

/// [`matches`] over already-validated URIs.
pub fn matches_uri(pattern: &Uri, topic: &Uri) -> bool {
    let pcells = pattern.cells();
    let tcells = topic.cells();

    match pcells.iter().position(|c| *c == STAR) {
        None => cells_match(&pcells, &tcells),
        Some(star) => {
            let head = &pcells[..star];
            let tail = &pcells[star + 1..];
            if tcells.len() < head.len() + tail.len() {
                return false;
            }
            cells_match(head, &tcells[..head.len()])
                && cells_match(tail, &tcells[tcells.len() - tail.len()..])
        }
    }
}
