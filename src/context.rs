//! The per-row input of an action column.

use indexmap::IndexMap;

/// A record displayed in a grid row.
///
/// The action column only ever reads from it: named attributes are looked up
/// when a button asks for them in its route (`attrs`), and the whole model may
/// be bound to a route parameter through the `"model"` sentinel.
pub trait RowModel {
    /// Looks up a named attribute, stringified for use in a URL.
    fn attribute(&self, name: &str) -> Option<String>;

    /// The value used when the model itself is bound to a route parameter.
    fn route_value(&self) -> String;
}

/// The key identifying a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKey {
    /// A single primary key value, substituted under the button's key param.
    Scalar(String),
    /// A multi-column key. Its entries are copied into the route verbatim
    /// and the button's key param is ignored.
    Composite(IndexMap<String, String>),
}

impl From<&str> for RowKey {
    fn from(value: &str) -> Self {
        RowKey::Scalar(value.to_string())
    }
}

impl From<String> for RowKey {
    fn from(value: String) -> Self {
        RowKey::Scalar(value)
    }
}

impl From<i64> for RowKey {
    fn from(value: i64) -> Self {
        RowKey::Scalar(value.to_string())
    }
}

impl From<IndexMap<String, String>> for RowKey {
    fn from(value: IndexMap<String, String>) -> Self {
        RowKey::Composite(value)
    }
}

impl std::fmt::Display for RowKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowKey::Scalar(key) => f.write_str(key),
            RowKey::Composite(map) => {
                let mut first = true;
                for (name, value) in map {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    write!(f, "{name}={value}")?;
                }
                Ok(())
            }
        }
    }
}

/// Everything the grid knows about the row currently being rendered.
pub struct RowContext<'a> {
    pub model: &'a dyn RowModel,
    pub key: RowKey,
    pub index: usize,
}

impl<'a> RowContext<'a> {
    pub fn new(
        model: &'a dyn RowModel,
        key: impl Into<RowKey>,
        index: usize,
    ) -> Self {
        Self {
            model,
            key: key.into(),
            index,
        }
    }
}

#[cfg(test)]
#[test]
fn test_composite_key_display() {
    let key = RowKey::from(IndexMap::from([
        ("id".to_string(), "7".to_string()),
        ("slug".to_string(), "x".to_string()),
    ]));
    assert_eq!(key.to_string(), "id=7,slug=x");
    assert_eq!(RowKey::from(42_i64).to_string(), "42");
}
