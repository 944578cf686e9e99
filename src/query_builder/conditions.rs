use serde_json::{json, Map, Value};
use std::fmt;

/// A single boolean-query clause in the search backend's query DSL
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Exact match: `{"term": {field: value}}`
    Term { field: String, value: Value },
    /// Set membership: `{"terms": {field: [values]}}`
    Terms { field: String, values: Vec<Value> },
    /// Inclusive range; at least one bound is present
    Range {
        field: String,
        gte: Option<Value>,
        lte: Option<Value>,
    },
    /// Analyzed full-text match: `{"match": {field: value}}`
    Match { field: String, value: Value },
    /// Pre-built clause passed through untouched
    Raw(Value),
}

impl Condition {
    pub fn term(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Condition::Term {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn terms(field: impl Into<String>, values: Vec<Value>) -> Self {
        Condition::Terms {
            field: field.into(),
            values,
        }
    }

    pub fn matches(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Condition::Match {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Range with only the bounds that are present; `None` when both are missing
    pub fn range(field: impl Into<String>, gte: Option<Value>, lte: Option<Value>) -> Option<Self> {
        if gte.is_none() && lte.is_none() {
            return None;
        }
        Some(Condition::Range {
            field: field.into(),
            gte,
            lte,
        })
    }

    /// Render the clause as backend JSON
    pub fn to_json(&self) -> Value {
        match self {
            Condition::Term { field, value } => json!({ "term": { field.as_str(): value } }),
            Condition::Terms { field, values } => json!({ "terms": { field.as_str(): values } }),
            Condition::Range { field, gte, lte } => {
                let mut bounds = Map::new();
                if let Some(gte) = gte {
                    bounds.insert("gte".to_string(), gte.clone());
                }
                if let Some(lte) = lte {
                    bounds.insert("lte".to_string(), lte.clone());
                }
                json!({ "range": { field.as_str(): bounds } })
            }
            Condition::Match { field, value } => json!({ "match": { field.as_str(): value } }),
            Condition::Raw(value) => value.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the sort list: `{field: {"order": "asc"|"desc"}}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortClause {
    pub field: String,
    pub order: SortOrder,
}

impl SortClause {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Desc)
    }

    pub fn to_json(&self) -> Value {
        json!({ self.field.as_str(): { "order": self.order.as_str() } })
    }
}
