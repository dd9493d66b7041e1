//! Header normalization.

use std::collections::HashSet;

/// Trims whitespace and a leading byte-order mark.
pub fn normalize_header(value: &str) -> String {
    value.trim_start_matches('\u{feff}').trim().to_string()
}

/// Makes header names unique and non-empty.
///
/// Repeats get a numeric suffix (`A`, `A.1`, `A.2`); blank headers become
/// `Column N` with N the one-based position.
pub fn dedupe_headers(raw: &[String]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(raw.len());
    let mut headers = Vec::with_capacity(raw.len());
    for (idx, value) in raw.iter().enumerate() {
        let base = normalize_header(value);
        let base = if base.is_empty() {
            format!("Column {}", idx + 1)
        } else {
            base
        };
        let mut candidate = base.clone();
        let mut suffix = 1;
        while seen.contains(&candidate) {
            candidate = format!("{base}.{suffix}");
            suffix += 1;
        }
        seen.insert(candidate.clone());
        headers.push(candidate);
    }
    headers
}

/// True when every cell is empty or whitespace.
pub fn is_blank_record(cells: &[String]) -> bool {
    cells.iter().all(|cell| cell.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn trims_and_strips_bom() {
        assert_eq!(normalize_header("\u{feff} Email "), "Email");
    }

    #[test]
    fn disambiguates_repeats() {
        let headers = dedupe_headers(&owned(&["A", "B", "A", "A", "A.1"]));
        assert_eq!(headers, ["A", "B", "A.1", "A.2", "A.1.1"]);
    }

    #[test]
    fn names_blank_headers_by_position() {
        let headers = dedupe_headers(&owned(&["Name", " ", ""]));
        assert_eq!(headers, ["Name", "Column 2", "Column 3"]);
    }
}
