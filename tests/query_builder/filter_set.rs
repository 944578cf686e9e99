use movies_core::models::{GenreFilter, PersonFilter};
use movies_core::query_builder::{
    Condition, Filter, FilterError, FilterParams, FilterSet, FilterValue, LimitOffsetFilter,
    OrderingFilter, QueryDocument, RangeFilter,
};
use movies_core::services::{genre_filter_set, person_filter_set};
use serde_json::json;
use uuid::Uuid;

#[test]
fn test_empty_params_compile_to_empty_document() {
    let query = genre_filter_set().filter_query(&FilterParams::new()).unwrap();
    assert!(query.is_empty());
    assert_eq!(query.to_body(), json!({}));
}

#[test]
fn test_genre_filter_by_ids_and_name() {
    let id = Uuid::new_v4();
    let params: FilterParams = GenreFilter {
        ids: Some(vec![id]),
        name: Some("drama".to_string()),
        order: Some(vec!["name".to_string()]),
        ..Default::default()
    }
    .into();

    let query = genre_filter_set().filter_query(&params).unwrap();

    assert_eq!(
        query.to_body(),
        json!({
            "query": {"bool": {"must": [
                {"terms": {"id": [id.to_string()]}},
                {"match": {"name": "drama"}}
            ]}},
            "sort": [{"name.raw": {"order": "asc"}}]
        })
    );
}

#[test]
fn test_unknown_sort_tokens_are_dropped() {
    let params: FilterParams = PersonFilter {
        order: Some(vec!["-rating".to_string(), "-name".to_string()]),
        ..Default::default()
    }
    .into();

    let query = person_filter_set().filter_query(&params).unwrap();

    assert_eq!(query.to_body(), json!({"sort": [{"name.raw": {"order": "desc"}}]}));
}

#[test]
fn test_zero_window_leaves_size_and_from_unset() {
    let params = FilterParams::new().with("pagination", FilterValue::window(0, 0));
    let query = person_filter_set().filter_query(&params).unwrap();

    assert_eq!(query.size(), None);
    assert_eq!(query.offset(), None);
}

#[test]
fn test_unbound_parameters_are_ignored() {
    let params = FilterParams::new()
        .with("unknown", "value")
        .with("name", "Lucas");

    let query = person_filter_set().filter_query(&params).unwrap();

    assert_eq!(query.must_conditions(), &[Condition::matches("name", "Lucas")]);
}

#[test]
fn test_wrong_value_shape_is_rejected() {
    let params = FilterParams::new().with("ids", "not-a-list");

    let err = genre_filter_set().filter_query(&params).unwrap_err();

    assert!(matches!(
        err,
        FilterError::UnsupportedValue {
            filter: "InFilter",
            ref field,
            kind: "scalar",
        } if field == "id"
    ));
}

#[test]
fn test_null_values_are_no_ops() {
    let params = FilterParams::new()
        .with("id", FilterValue::Null)
        .with("rating", FilterValue::range(json!(null), json!(null)));

    let filters = FilterSet::builder()
        .field("id", Filter::unbound())
        .field("rating", RangeFilter::new("imdb_rating"))
        .build();

    assert!(filters.filter_query(&params).unwrap().is_empty());
}

#[test]
fn test_base_query_is_copied_per_call() {
    let mut base = QueryDocument::new();
    base.must(Condition::term("kind", "movie"));

    let filters = FilterSet::builder()
        .field("genre", Filter::unbound())
        .field("pagination", LimitOffsetFilter::new())
        .field("order", OrderingFilter::new([("title", "title.raw")]))
        .with_base_query(base.clone())
        .build();

    let first = filters
        .filter_query(&FilterParams::new().with("genre", "drama"))
        .unwrap();
    let second = filters.filter_query(&FilterParams::new()).unwrap();

    assert_eq!(first.must_conditions().len(), 2);
    assert_eq!(second, base);
    assert_eq!(filters.len(), 3);
}
