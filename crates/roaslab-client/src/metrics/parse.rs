const PERCENT_MARKERS: [char; 2] = ['%', '％'];

/// Parses a money amount. Blank and unparseable text both yield `None`;
/// callers tell them apart from the raw text.
pub fn parse_money(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    parse_number(trimmed)
}

/// Parses a rate into a fraction.
///
/// A trailing percent marker always divides by 100. Without one, a bare
/// number `<= 1` is already a fraction and a bare number `> 1` is read as a
/// percentage, so `"10%"`, `"10"` and `"0.1"` all yield `0.1` while `"1"`
/// stays `1.0`.
pub fn parse_rate(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(stripped) = trimmed.strip_suffix(PERCENT_MARKERS) {
        let value = parse_number(stripped.trim_end())?;
        return Some(value / 100.0);
    }

    let value = parse_number(trimmed)?;
    if value > 1.0 {
        return Some(value / 100.0);
    }
    Some(value)
}

pub(crate) fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

fn parse_number(text: &str) -> Option<f64> {
    let cleaned = text
        .chars()
        .filter(|character| !is_grouping_separator(*character))
        .collect::<String>();
    if cleaned.is_empty() {
        return None;
    }

    let value = cleaned.parse::<f64>().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(value)
}

fn is_grouping_separator(character: char) -> bool {
    matches!(character, ',' | '_' | '\'') || character.is_whitespace()
}
