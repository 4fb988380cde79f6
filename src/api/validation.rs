//! Normalization of loosely-typed request fields sent by the landing page.

use serde_json::Value;

/// Trims text fields and treats blank strings as absent.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Plan identifiers arrive as strings or numbers depending on the quoting widget.
pub fn plan_identifier(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => optional_text(Some(s.clone())),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Quote amounts arrive as numbers or numeric strings; anything else is dropped.
pub fn quote_amount(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// A path segment served by the landing page shell: one segment, no file
/// extension, and never the `api` namespace.
pub fn landing_slug(path: &str) -> Option<&str> {
    let slug = path.strip_prefix('/').unwrap_or(path);

    if slug.is_empty() || slug.contains('/') || slug.contains('.') || slug == "api" {
        return None;
    }

    Some(slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(Some("  Ana ".to_string())), Some("Ana".to_string()));
        assert_eq!(optional_text(Some("   ".to_string())), None);
        assert_eq!(optional_text(None), None);
    }

    #[test]
    fn test_plan_identifier() {
        assert_eq!(plan_identifier(Some(&json!("PLAN-A"))), Some("PLAN-A".to_string()));
        assert_eq!(plan_identifier(Some(&json!(42))), Some("42".to_string()));
        assert_eq!(plan_identifier(Some(&json!(null))), None);
        assert_eq!(plan_identifier(None), None);
    }

    #[test]
    fn test_quote_amount() {
        assert_eq!(quote_amount(Some(&json!(125_000))), Some(125_000.0));
        assert_eq!(quote_amount(Some(&json!("99.5"))), Some(99.5));
        assert_eq!(quote_amount(Some(&json!("mucho"))), None);
        assert_eq!(quote_amount(Some(&json!([1, 2]))), None);
    }

    #[test]
    fn test_landing_slug() {
        assert_eq!(landing_slug("/juan-perez"), Some("juan-perez"));
        assert_eq!(landing_slug("/api"), None);
        assert_eq!(landing_slug("/favicon.ico"), None);
        assert_eq!(landing_slug("/api/asesores"), None);
        assert_eq!(landing_slug("/"), None);
    }
}
