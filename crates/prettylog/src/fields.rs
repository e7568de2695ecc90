//! Type-directed rendering of field values to display strings.
//!
//! Type decisions are made once, at normalization time; the renderer only
//! ever sees the resulting strings. Strings keep surrounding quotes so that
//! `"42"` and `42` stay distinguishable in the output.

use serde_json::Value;

/// Render one decoded JSON value.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(f) => display_number(f),
            None => n.to_string(),
        },
        Value::String(s) => format!("{s:?}"),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Render one bare logfmt value with the same policy as JSON values, so
/// `count=3` and `name="bob"` come out identical across input formats.
pub fn display_scalar(value: &str) -> String {
    match value {
        "true" | "false" | "null" => value.to_string(),
        _ => match value.parse::<f64>() {
            Ok(f) => display_number(f),
            Err(_) => format!("{value:?}"),
        },
    }
}

/// Integer-valued numbers that are not too large render as plain integers;
/// everything else gets a compact decimal/exponential representation.
fn display_number(f: f64) -> String {
    if (f - f.round()).abs() < 1e-6 && f.abs() < 1e9 {
        return format!("{}", f.round() as i64);
    }
    format_compact(f)
}

/// Decimal for moderate magnitudes, exponential outside them.
fn format_compact(f: f64) -> String {
    if f != 0.0 {
        let exp = f.abs().log10().floor();
        if exp < -4.0 || exp >= 21.0 {
            return format!("{f:e}");
        }
    }
    format!("{f}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_near_integer_renders_as_integer() {
        assert_eq!(display_value(&json!(3)), "3");
        assert_eq!(display_value(&json!(3.0)), "3");
        assert_eq!(display_value(&json!(3.0000001)), "3");
        assert_eq!(display_value(&json!(-42.0)), "-42");
    }

    #[test]
    fn test_fractional_numbers_keep_their_fraction() {
        assert_eq!(display_value(&json!(2.5)), "2.5");
        assert_eq!(display_value(&json!(0.000123)), "0.000123");
    }

    #[test]
    fn test_large_magnitudes_never_round_to_integer() {
        // at or above 1e9 the integer rule no longer applies
        assert_eq!(display_value(&json!(1e9)), "1000000000");
        assert_eq!(display_value(&json!(1.5e22)), "1.5e22");
    }

    #[test]
    fn test_tiny_magnitudes_go_exponential() {
        assert_eq!(display_value(&json!(1.234e-5)), "1.234e-5");
        // inside the near-integer window, tiny values collapse to 0
        assert_eq!(display_value(&json!(1.23e-7)), "0");
    }

    #[test]
    fn test_strings_are_quoted_numbers_are_not() {
        assert_eq!(display_value(&json!("42")), "\"42\"");
        assert_eq!(display_value(&json!(42)), "42");
        assert_eq!(display_value(&json!("hello world")), "\"hello world\"");
    }

    #[test]
    fn test_other_values_stringify_generically() {
        assert_eq!(display_value(&json!(true)), "true");
        assert_eq!(display_value(&json!(null)), "null");
        assert_eq!(display_value(&json!([1, 2])), "[1,2]");
        assert_eq!(display_value(&json!({"a": 1})), "{\"a\":1}");
    }

    #[test]
    fn test_scalar_mirrors_json_policy() {
        assert_eq!(display_scalar("3"), "3");
        assert_eq!(display_scalar("3.14"), "3.14");
        assert_eq!(display_scalar("bob"), "\"bob\"");
        assert_eq!(display_scalar("true"), "true");
        assert_eq!(display_scalar("null"), "null");
    }
}
