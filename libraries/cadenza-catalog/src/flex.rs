//! Normalization of polymorphic catalog JSON fields.
//!
//! Archive metadata fields (`title`, `creator`, `year`, `date`, `subject`)
//! arrive as a string, a number, an array of either, or are absent
//! entirely. The policy: take the first non-blank scalar; absent or empty
//! input yields an empty string, never an error.

use serde_json::Value;

/// Extract the first non-blank scalar from a polymorphic field.
pub fn first_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .map(first_scalar)
            .find(|s| !s.trim().is_empty())
            .unwrap_or_default(),
        Value::Null | Value::Object(_) => String::new(),
    }
}

/// Like [`first_scalar`], but substitutes `fallback` for blank values.
pub fn scalar_or(value: &Value, fallback: &str) -> String {
    let s = first_scalar(value);
    if s.trim().is_empty() {
        fallback.to_string()
    } else {
        s
    }
}

/// Resolve a release year from separate `year` and `date` fields.
///
/// Prefers the `year` field; otherwise takes the leading token of the
/// `date` field (split on space, dash, or `T`).
pub fn resolve_year(year: &Value, date: &Value) -> Option<String> {
    let y = first_scalar(year);
    if !y.trim().is_empty() {
        return Some(y);
    }

    let d = first_scalar(date);
    let token = d
        .split(|c| c == ' ' || c == '-' || c == 'T')
        .next()
        .unwrap_or("");
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// First genre tag from a polymorphic `subject` field.
pub fn first_genre(subject: &Value) -> Option<String> {
    let g = first_scalar(subject);
    if g.trim().is_empty() {
        None
    } else {
        Some(g)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_passes_through() {
        assert_eq!(first_scalar(&json!("Grateful Dead")), "Grateful Dead");
    }

    #[test]
    fn number_renders_as_text() {
        assert_eq!(first_scalar(&json!(1977)), "1977");
    }

    #[test]
    fn array_takes_first_non_blank() {
        assert_eq!(first_scalar(&json!(["", "  ", "rock", "jazz"])), "rock");
        assert_eq!(first_scalar(&json!([1968, "psych"])), "1968");
    }

    #[test]
    fn absent_and_empty_yield_empty_string() {
        assert_eq!(first_scalar(&Value::Null), "");
        assert_eq!(first_scalar(&json!([])), "");
        assert_eq!(first_scalar(&json!({"nested": true})), "");
    }

    #[test]
    fn blank_values_get_fallback() {
        assert_eq!(scalar_or(&Value::Null, "Unknown Artist"), "Unknown Artist");
        assert_eq!(scalar_or(&json!("  "), "Unknown Album"), "Unknown Album");
        assert_eq!(scalar_or(&json!("Miles Davis"), "Unknown Artist"), "Miles Davis");
    }

    #[test]
    fn year_prefers_year_field() {
        assert_eq!(
            resolve_year(&json!(1977), &json!("1977-05-08T00:00:00Z")),
            Some("1977".to_string())
        );
    }

    #[test]
    fn year_falls_back_to_date_prefix() {
        assert_eq!(
            resolve_year(&Value::Null, &json!("1977-05-08")),
            Some("1977".to_string())
        );
        assert_eq!(resolve_year(&Value::Null, &Value::Null), None);
    }

    #[test]
    fn genre_from_subject_array() {
        assert_eq!(first_genre(&json!(["rock", "live"])), Some("rock".to_string()));
        assert_eq!(first_genre(&json!("")), None);
    }
}
