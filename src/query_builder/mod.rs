//! # Query Builder System
//!
//! Declarative translation of typed filter parameters into search backend queries.
//!
//! ## Key Components
//!
//! - [`conditions`] - Boolean clauses and sort clauses in the backend query DSL
//! - [`builder`] - [`QueryDocument`], the request accumulator filters write into
//! - [`params`] - [`FilterParams`], the ordered name to [`FilterValue`] mapping
//! - [`fields`] - The [`FilterField`] family: equality, membership, exclusion, range,
//!   full-text, ordering and offset/limit pagination
//! - [`filter_set`] - [`FilterSet`], a named collection of fields applied in parameter order
//!
//! ## Example Usage
//!
//! ```rust
//! use movies_core::query_builder::{FilterParams, FilterSet, FilterValue, InFilter, SearchFilter};
//!
//! let filters = FilterSet::builder()
//!     .field("ids", InFilter::new("id"))
//!     .field("title", SearchFilter::unbound())
//!     .build();
//!
//! let params = FilterParams::new()
//!     .with("title", "star")
//!     .with("ids", FilterValue::list(["a", "b"]));
//! let query = filters.filter_query(&params).unwrap();
//!
//! assert_eq!(query.must_conditions().len(), 2);
//! ```

pub mod builder;
pub mod conditions;
pub mod fields;
pub mod filter_set;
pub mod params;

pub use builder::QueryDocument;
pub use conditions::{Condition, SortClause, SortOrder};
pub use fields::{
    Filter, FilterError, FilterField, FilterResult, InFilter, LimitOffsetFilter, NotInFilter,
    OrderingFilter, RangeFilter, SearchFilter,
};
pub use filter_set::{FilterSet, FilterSetBuilder};
pub use params::{FilterParams, FilterValue};
