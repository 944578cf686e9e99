use super::{FilterField, FilterParams, FilterResult, QueryDocument};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

/// A named collection of [`FilterField`]s that turns a parameter mapping into a
/// [`QueryDocument`].
///
/// Fields are registered under the public filter name. A field built without an
/// explicit backend field name adopts the filter name at build time.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    fields: HashMap<String, Arc<dyn FilterField>>,
    /// Registration order
    names: Vec<String>,
    base_query: QueryDocument,
}

impl FilterSet {
    pub fn builder() -> FilterSetBuilder {
        FilterSetBuilder::default()
    }

    pub fn field(&self, name: &str) -> Option<&dyn FilterField> {
        self.fields.get(name).map(|field| field.as_ref())
    }

    pub fn filter_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build a query from `params`.
    ///
    /// Starts from a copy of the base query and applies each bound field in the
    /// iteration order of `params`. Keys with no registered field are ignored.
    pub fn filter_query(&self, params: &FilterParams) -> FilterResult<QueryDocument> {
        let mut query = self.base_query.clone();
        for (name, value) in params.iter() {
            match self.fields.get(name) {
                Some(field) => field.apply(&mut query, value, params)?,
                None => trace!(filter = name, "Ignoring parameter with no bound filter"),
            }
        }
        Ok(query)
    }
}

#[derive(Debug, Default)]
pub struct FilterSetBuilder {
    fields: Vec<(String, Box<dyn FilterField>)>,
    base_query: QueryDocument,
}

impl FilterSetBuilder {
    /// Register `field` under `name`; a later registration of the same name wins
    pub fn field(mut self, name: impl Into<String>, field: impl FilterField + 'static) -> Self {
        self.fields.push((name.into(), Box::new(field)));
        self
    }

    /// Query every `filter_query` call starts from
    pub fn with_base_query(mut self, base_query: QueryDocument) -> Self {
        self.base_query = base_query;
        self
    }

    pub fn build(self) -> FilterSet {
        let mut fields: HashMap<String, Arc<dyn FilterField>> = HashMap::new();
        let mut names = Vec::new();
        for (name, mut field) in self.fields {
            field.bind_default_field_name(&name);
            if fields.insert(name.clone(), Arc::from(field)).is_none() {
                names.push(name);
            }
        }

        FilterSet {
            fields,
            names,
            base_query: self.base_query,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query_builder::{
        Condition, Filter, FilterValue, InFilter, LimitOffsetFilter, OrderingFilter, RangeFilter,
        SearchFilter,
    };
    use serde_json::json;

    fn catalog_filters() -> FilterSet {
        FilterSet::builder()
            .field("name", Filter::unbound())
            .field("category", InFilter::new("category.keyword"))
            .field("price", RangeFilter::unbound())
            .field("q", SearchFilter::new("description"))
            .field("pagination", LimitOffsetFilter::new())
            .field("order", OrderingFilter::new([("price", "price"), ("name", "name.raw")]))
            .build()
    }

    #[test]
    fn test_unset_field_names_default_to_filter_name() {
        let filters = catalog_filters();
        assert_eq!(filters.field("name").and_then(|f| f.field_name()), Some("name"));
        assert_eq!(
            filters.field("category").and_then(|f| f.field_name()),
            Some("category.keyword")
        );
        assert_eq!(filters.len(), 6);
        assert_eq!(
            filters.filter_names().collect::<Vec<_>>(),
            vec!["name", "category", "price", "q", "pagination", "order"]
        );
    }

    #[test]
    fn test_filter_query_applies_fields_in_parameter_order() {
        let params = FilterParams::new()
            .with("price", FilterValue::range(10, 20))
            .with("name", "widget")
            .with("order", FilterValue::ordering(["-price"]))
            .with("pagination", FilterValue::window(0, 25));

        let query = catalog_filters().filter_query(&params).unwrap();

        assert_eq!(
            query.to_body(),
            json!({
                "query": {"bool": {"must": [
                    {"range": {"price": {"gte": 10, "lte": 20}}},
                    {"term": {"name": "widget"}}
                ]}},
                "sort": [{"price": {"order": "desc"}}],
                "size": 25
            })
        );
    }

    #[test]
    fn test_unknown_parameters_are_ignored() {
        let params = FilterParams::new().with("unknown", "x");
        let query = catalog_filters().filter_query(&params).unwrap();
        assert!(query.is_empty());
    }

    #[test]
    fn test_base_query_is_copied_not_mutated() {
        let mut base = QueryDocument::new();
        base.must(Condition::term("published", true));
        let filters = FilterSet::builder()
            .field("name", Filter::unbound())
            .with_base_query(base.clone())
            .build();

        let first = filters
            .filter_query(&FilterParams::new().with("name", "a"))
            .unwrap();
        let second = filters
            .filter_query(&FilterParams::new().with("name", "b"))
            .unwrap();

        assert_eq!(first.must_conditions().len(), 2);
        assert_eq!(second.must_conditions().len(), 2);
        assert_eq!(second.must_conditions()[1], Condition::term("name", "b"));
    }

    #[test]
    fn test_invalid_value_surfaces_filter_error() {
        let params = FilterParams::new().with("category", "not-a-list");
        assert!(catalog_filters().filter_query(&params).is_err());
    }
}
