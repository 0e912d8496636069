use serde_json::Value;

/// Lenient accessors over loosely shaped CRM responses.
///
/// Absent keys, `null`s, non-string values and empty strings all read as
/// "missing" so callers can substitute their own placeholder.
pub trait JsonExt {
    fn str_field(&self, key: &str) -> Option<&str>;
    fn str_or(&self, key: &str, default: &str) -> String;
    fn records(&self) -> &[Value];
}

impl JsonExt for Value {
    fn str_field(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    fn str_or(&self, key: &str, default: &str) -> String {
        self.str_field(key).unwrap_or(default).to_owned()
    }

    fn records(&self) -> &[Value] {
        self.get("records")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
