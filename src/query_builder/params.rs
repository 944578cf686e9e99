use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// Typed value supplied for one named filter
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FilterValue {
    /// Explicitly absent; every filter treats it as a no-op
    Null,
    Scalar(Value),
    List(Vec<Value>),
    /// Inclusive `(low, high)` bounds, either of which may be open
    Range(Option<Value>, Option<Value>),
    /// Result window as `(offset, limit)`
    Window {
        offset: Option<u64>,
        limit: Option<u64>,
    },
    /// Sort tokens, `-` prefix for descending
    Ordering(Vec<String>),
}

impl FilterValue {
    pub fn scalar(value: impl Into<Value>) -> Self {
        match value.into() {
            Value::Null => FilterValue::Null,
            value => FilterValue::Scalar(value),
        }
    }

    pub fn list<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        FilterValue::List(values.into_iter().map(Into::into).collect())
    }

    /// Range from two bounds; JSON `null` bounds are treated as open
    pub fn range(low: impl Into<Value>, high: impl Into<Value>) -> Self {
        let bound = |value: Value| (!value.is_null()).then_some(value);
        FilterValue::Range(bound(low.into()), bound(high.into()))
    }

    pub fn window(offset: u64, limit: u64) -> Self {
        FilterValue::Window {
            offset: Some(offset),
            limit: Some(limit),
        }
    }

    pub fn ordering<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterValue::Ordering(tokens.into_iter().map(Into::into).collect())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FilterValue::Null)
    }

    /// Short name of the variant, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            FilterValue::Null => "null",
            FilterValue::Scalar(_) => "scalar",
            FilterValue::List(_) => "list",
            FilterValue::Range(..) => "range",
            FilterValue::Window { .. } => "window",
            FilterValue::Ordering(_) => "ordering",
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Scalar(Value::String(value.to_string()))
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Scalar(Value::String(value))
    }
}

impl From<Uuid> for FilterValue {
    fn from(value: Uuid) -> Self {
        FilterValue::Scalar(Value::String(value.to_string()))
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Scalar(Value::from(value))
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        FilterValue::scalar(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Scalar(Value::Bool(value))
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FilterValue::Null, Into::into)
    }
}

/// Ordered mapping of filter name to value.
///
/// Insertion order is preserved and is the order in which a
/// [`FilterSet`](super::FilterSet) applies the bound fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterParams {
    entries: Vec<(String, FilterValue)>,
}

impl FilterParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name`; an existing entry keeps its position and takes the new value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FilterValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert only when `value` is present, mirroring exclude-none serialization
    pub fn with_some<V: Into<FilterValue>>(
        self,
        name: impl Into<String>,
        value: Option<V>,
    ) -> Self {
        match value {
            Some(value) => self.with(name, value),
            None => self,
        }
    }

    pub fn get(&self, name: &str) -> Option<&FilterValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, FilterValue)> for FilterParams {
    fn from_iter<I: IntoIterator<Item = (K, FilterValue)>>(iter: I) -> Self {
        let mut params = FilterParams::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insertion_order_is_preserved_and_reinsert_keeps_position() {
        let mut params = FilterParams::new()
            .with("name", "john")
            .with("status", "active")
            .with("age", FilterValue::range(18, 30));
        params.insert("name", "jane");

        let names: Vec<_> = params.names().collect();
        assert_eq!(names, vec!["name", "status", "age"]);
        assert_eq!(params.get("name"), Some(&FilterValue::from("jane")));
    }

    #[test]
    fn test_with_some_skips_none() {
        let params = FilterParams::new()
            .with_some("title", Some("Star"))
            .with_some("description", None::<String>);
        assert_eq!(params.len(), 1);
        assert!(!params.contains_key("description"));
    }

    #[test]
    fn test_null_bounds_become_open() {
        assert_eq!(
            FilterValue::range(Value::Null, 10),
            FilterValue::Range(None, Some(json!(10)))
        );
        assert_eq!(FilterValue::scalar(Value::Null), FilterValue::Null);
        assert_eq!(FilterValue::from(None::<String>), FilterValue::Null);
    }
}
