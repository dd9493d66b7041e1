//! Name normalization shared by the suggestion rules.

/// Lowercases and removes `_`, ` ` and `-`.
///
/// `"E-mail"`, `"e_mail"` and `"E Mail"` all normalize to `"email"`.
pub fn normalize_name(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '_' | ' ' | '-'))
        .collect()
}

/// Whitespace-delimited tokens of the lowercased column name.
pub fn column_tokens(column: &str) -> impl Iterator<Item = String> + '_ {
    column.split_whitespace().map(str::to_lowercase)
}

/// Length ratio `min/max` of two names, by character count.
pub fn length_ratio(a: &str, b: &str) -> f64 {
    let (a, b) = (a.chars().count(), b.chars().count());
    let longest = a.max(b);
    if longest == 0 {
        return 0.0;
    }
    a.min(b) as f64 / longest as f64
}
