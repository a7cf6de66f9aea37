//! Conversion of user data into rows of cell text.
//!
//! A table only ever stores strings. Anything that can be appended goes
//! through [`TableRow`] once, at the point it is appended.

use serde_json::Value;

/// Types that can be turned into one row of cell text.
///
/// # Example
///
/// ```rust
/// use standout_table::TableRow;
///
/// struct Task {
///     id: u32,
///     title: String,
///     done: bool,
/// }
///
/// impl TableRow for Task {
///     fn to_row(&self) -> Vec<String> {
///         vec![
///             self.id.to_string(),
///             self.title.clone(),
///             if self.done { "yes" } else { "no" }.to_string(),
///         ]
///     }
/// }
///
/// let task = Task { id: 7, title: "Ship it".into(), done: false };
/// assert_eq!(task.to_row(), vec!["7", "Ship it", "no"]);
/// ```
pub trait TableRow {
    /// Converts this value to a row of string values.
    fn to_row(&self) -> Vec<String>;
}

impl<S: AsRef<str>> TableRow for Vec<S> {
    fn to_row(&self) -> Vec<String> {
        self.as_slice().to_row()
    }
}

impl<S: AsRef<str>> TableRow for [S] {
    fn to_row(&self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_string()).collect()
    }
}

impl<S: AsRef<str>, const N: usize> TableRow for [S; N] {
    fn to_row(&self) -> Vec<String> {
        self.as_slice().to_row()
    }
}

impl<T: TableRow + ?Sized> TableRow for &T {
    fn to_row(&self) -> Vec<String> {
        (**self).to_row()
    }
}

/// Arrays become one cell per element and objects one cell per value, in
/// key order. Any other value is a single cell. Strings are taken without
/// quotes and `null` is an empty cell.
impl TableRow for Value {
    fn to_row(&self) -> Vec<String> {
        match self {
            Value::Array(items) => items.iter().map(cell_text).collect(),
            Value::Object(map) => map.values().map(cell_text).collect(),
            other => vec![cell_text(other)],
        }
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        v => v.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_collections() {
        assert_eq!(vec!["a", "b"].to_row(), vec!["a", "b"]);
        assert_eq!(["x".to_string()].to_row(), vec!["x"]);
        let slice: &[&str] = &["p", "q"];
        assert_eq!(slice.to_row(), vec!["p", "q"]);
    }

    #[test]
    fn json_array() {
        let row = json!(["Alice", 30, true, null, 1.5]).to_row();
        assert_eq!(row, vec!["Alice", "30", "true", "", "1.5"]);
    }

    #[test]
    fn json_object_values_in_key_order() {
        let row = json!({"b": "second", "a": "first"}).to_row();
        assert_eq!(row, vec!["first", "second"]);
    }

    #[test]
    fn json_scalar_is_one_cell() {
        assert_eq!(json!("solo").to_row(), vec!["solo"]);
    }

    #[test]
    fn nested_json_is_serialized() {
        let row = json!([{"k": 1}, [1, 2]]).to_row();
        assert_eq!(row, vec![r#"{"k":1}"#, "[1,2]"]);
    }
}
