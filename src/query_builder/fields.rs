//! Filter fields: atomic builders that each contribute one fragment to a
//! [`QueryDocument`].
//!
//! Every field treats [`FilterValue::Null`] as a no-op and rejects values of a shape it
//! cannot express with [`FilterError::UnsupportedValue`].

use super::{Condition, FilterParams, FilterValue, QueryDocument, SortClause, SortOrder};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("{filter} on '{field}' does not accept a {kind} value")]
    UnsupportedValue {
        filter: &'static str,
        field: String,
        kind: &'static str,
    },

    #[error("{filter} has no field name; register it in a FilterSet or name it explicitly")]
    UnboundField { filter: &'static str },
}

impl FilterError {
    pub fn unsupported(
        filter: &'static str,
        field: impl Into<String>,
        value: &FilterValue,
    ) -> Self {
        Self::UnsupportedValue {
            filter,
            field: field.into(),
            kind: value.kind(),
        }
    }
}

pub type FilterResult<T> = Result<T, FilterError>;

/// A query-fragment builder bound to one backend field
pub trait FilterField: fmt::Debug + Send + Sync {
    /// Contribute this filter's fragment for `value` to `query`.
    ///
    /// `params` is the complete parameter mapping, for filters whose behavior depends
    /// on sibling parameters.
    fn apply(
        &self,
        query: &mut QueryDocument,
        value: &FilterValue,
        params: &FilterParams,
    ) -> FilterResult<()>;

    /// Backend field this filter targets, once bound
    fn field_name(&self) -> Option<&str>;

    /// Adopt `name` as the backend field unless one was given explicitly
    fn bind_default_field_name(&mut self, name: &str);

    fn filter_type(&self) -> &'static str;
}

macro_rules! single_field_filter {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $name {
            field_name: Option<String>,
        }

        impl $name {
            pub fn new(field_name: impl Into<String>) -> Self {
                Self {
                    field_name: Some(field_name.into()),
                }
            }

            /// Field name is taken from the FilterSet registration
            pub fn unbound() -> Self {
                Self::default()
            }

            fn bound_field(&self) -> FilterResult<&str> {
                self.field_name.as_deref().ok_or(FilterError::UnboundField {
                    filter: stringify!($name),
                })
            }
        }
    };
}

macro_rules! impl_field_binding {
    ($name:ident) => {
        fn field_name(&self) -> Option<&str> {
            self.field_name.as_deref()
        }

        fn bind_default_field_name(&mut self, name: &str) {
            if self.field_name.is_none() {
                self.field_name = Some(name.to_string());
            }
        }

        fn filter_type(&self) -> &'static str {
            stringify!($name)
        }
    };
}

single_field_filter!(
    /// Equality: appends a `term` clause to `must`
    Filter
);

impl FilterField for Filter {
    fn apply(
        &self,
        query: &mut QueryDocument,
        value: &FilterValue,
        _: &FilterParams,
    ) -> FilterResult<()> {
        match value {
            FilterValue::Null => Ok(()),
            FilterValue::Scalar(value) => {
                query.must(Condition::term(self.bound_field()?, value.clone()));
                Ok(())
            }
            other => Err(FilterError::unsupported("Filter", self.bound_field()?, other)),
        }
    }

    impl_field_binding!(Filter);
}

single_field_filter!(
    /// Set membership: appends a `terms` clause to `must`
    InFilter
);

impl FilterField for InFilter {
    fn apply(
        &self,
        query: &mut QueryDocument,
        value: &FilterValue,
        _: &FilterParams,
    ) -> FilterResult<()> {
        match value {
            FilterValue::Null => Ok(()),
            FilterValue::List(values) => {
                query.must(Condition::terms(self.bound_field()?, values.clone()));
                Ok(())
            }
            other => Err(FilterError::unsupported("InFilter", self.bound_field()?, other)),
        }
    }

    impl_field_binding!(InFilter);
}

single_field_filter!(
    /// Exclusion: appends a `terms` clause to `must_not`
    NotInFilter
);

impl FilterField for NotInFilter {
    fn apply(
        &self,
        query: &mut QueryDocument,
        value: &FilterValue,
        _: &FilterParams,
    ) -> FilterResult<()> {
        match value {
            FilterValue::Null => Ok(()),
            FilterValue::List(values) => {
                query.must_not(Condition::terms(self.bound_field()?, values.clone()));
                Ok(())
            }
            other => Err(FilterError::unsupported("NotInFilter", self.bound_field()?, other)),
        }
    }

    impl_field_binding!(NotInFilter);
}

single_field_filter!(
    /// Inclusive range over the non-null bounds of a `(low, high)` pair
    RangeFilter
);

impl FilterField for RangeFilter {
    fn apply(
        &self,
        query: &mut QueryDocument,
        value: &FilterValue,
        _: &FilterParams,
    ) -> FilterResult<()> {
        match value {
            FilterValue::Null => Ok(()),
            FilterValue::Range(low, high) => {
                let field = self.bound_field()?;
                if let Some(condition) = Condition::range(field, low.clone(), high.clone()) {
                    query.must(condition);
                }
                Ok(())
            }
            other => Err(FilterError::unsupported("RangeFilter", self.bound_field()?, other)),
        }
    }

    impl_field_binding!(RangeFilter);
}

single_field_filter!(
    /// Full-text: appends a `match` clause to `must`
    SearchFilter
);

impl FilterField for SearchFilter {
    fn apply(
        &self,
        query: &mut QueryDocument,
        value: &FilterValue,
        _: &FilterParams,
    ) -> FilterResult<()> {
        match value {
            FilterValue::Null => Ok(()),
            FilterValue::Scalar(value) => {
                query.must(Condition::matches(self.bound_field()?, value.clone()));
                Ok(())
            }
            other => Err(FilterError::unsupported("SearchFilter", self.bound_field()?, other)),
        }
    }

    impl_field_binding!(SearchFilter);
}

/// Offset/limit pagination. Absent or zero parts are left unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LimitOffsetFilter {
    field_name: Option<String>,
}

impl LimitOffsetFilter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FilterField for LimitOffsetFilter {
    fn apply(
        &self,
        query: &mut QueryDocument,
        value: &FilterValue,
        _: &FilterParams,
    ) -> FilterResult<()> {
        match value {
            FilterValue::Null => Ok(()),
            FilterValue::Window { offset, limit } => {
                if let Some(limit) = limit.filter(|limit| *limit > 0) {
                    query.set_size(limit);
                }
                if let Some(offset) = offset.filter(|offset| *offset > 0) {
                    query.set_from(offset);
                }
                Ok(())
            }
            other => Err(FilterError::unsupported(
                "LimitOffsetFilter",
                self.field_name.as_deref().unwrap_or("pagination"),
                other,
            )),
        }
    }

    impl_field_binding!(LimitOffsetFilter);
}

/// Maps public sort tokens onto backend sort fields.
///
/// A token prefixed with `-` sorts descending. Tokens without a mapping are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderingFilter {
    fields: HashMap<String, String>,
}

impl OrderingFilter {
    /// `fields` maps each accepted token to the backend field it sorts by
    pub fn new<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(token, field)| (token.into(), field.into()))
                .collect(),
        }
    }

    pub fn sort_field(&self, token: &str) -> Option<&str> {
        self.fields.get(token).map(String::as_str)
    }

    fn resolve(&self, tokens: &[String]) -> Vec<SortClause> {
        tokens
            .iter()
            .filter_map(|token| {
                let (name, order) = match token.strip_prefix('-') {
                    Some(name) => (name, SortOrder::Desc),
                    None => (token.as_str(), SortOrder::Asc),
                };
                self.sort_field(name)
                    .map(|field| SortClause::new(field, order))
            })
            .collect()
    }
}

impl FilterField for OrderingFilter {
    fn apply(
        &self,
        query: &mut QueryDocument,
        value: &FilterValue,
        _: &FilterParams,
    ) -> FilterResult<()> {
        match value {
            FilterValue::Null => Ok(()),
            FilterValue::Ordering(tokens) => {
                for clause in self.resolve(tokens) {
                    query.sort_by(clause);
                }
                Ok(())
            }
            other => Err(FilterError::unsupported("OrderingFilter", "sort", other)),
        }
    }

    fn field_name(&self) -> Option<&str> {
        None
    }

    fn bind_default_field_name(&mut self, _: &str) {}

    fn filter_type(&self) -> &'static str {
        "OrderingFilter"
    }
}
