//! Field-level diffs between two JSON snapshots of a record

use serde_json::Value;

/// Describe top-level field changes, e.g. `monthly_rent: 1850.0 -> 1900.0`
///
/// Returns `None` when nothing changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let changes: Vec<String> = match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes: Vec<String> = before_obj
                .iter()
                .filter_map(|(key, old)| match after_obj.get(key) {
                    Some(new) if new != old => Some(format!(
                        "{}: {} -> {}",
                        key,
                        format_value(old),
                        format_value(new)
                    )),
                    Some(_) => None,
                    None => Some(format!("{}: {} -> (removed)", key, format_value(old))),
                })
                .collect();

            changes.extend(
                after_obj
                    .iter()
                    .filter(|(key, _)| !before_obj.contains_key(*key))
                    .map(|(key, new)| format!("{}: (added) -> {}", key, format_value(new))),
            );
            changes
        }
        _ if before != after => vec![format!(
            "{} -> {}",
            format_value(before),
            format_value(after)
        )],
        _ => Vec::new(),
    };

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(s) if s.chars().count() > 50 => {
            let head: String = s.chars().take(47).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_changes() {
        let v = json!({"name": "Jane Doe"});
        assert_eq!(generate_diff(&v, &v), None);
    }

    #[test]
    fn test_changed_field() {
        let before = json!({"name": "Jane Doe", "phone_number": "5555551234"});
        let after = json!({"name": "Jane Smith", "phone_number": "5555551234"});
        assert_eq!(
            generate_diff(&before, &after).unwrap(),
            "name: \"Jane Doe\" -> \"Jane Smith\""
        );
    }

    #[test]
    fn test_optional_field_set_from_null() {
        let before = json!({"move_out_date": null});
        let after = json!({"move_out_date": "2024-06-30"});
        assert_eq!(
            generate_diff(&before, &after).unwrap(),
            "move_out_date: null -> \"2024-06-30\""
        );
    }

    #[test]
    fn test_added_and_removed() {
        let before = json!({"a": 1});
        let after = json!({"b": 2});
        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("a: 1 -> (removed)"));
        assert!(diff.contains("b: (added) -> 2"));
    }

    #[test]
    fn test_long_strings_truncated() {
        let long = "x".repeat(80);
        let diff = generate_diff(&json!({"descr": "short"}), &json!({"descr": long})).unwrap();
        assert!(diff.ends_with("...\""));
    }
}
