use super::{Condition, SortClause};
use serde_json::{json, Map, Value};

/// Search request accumulator built up by successive filter applications.
///
/// Rendered by [`QueryDocument::to_body`] into the backend request body
/// `{"query": {"bool": {"must": [..], "must_not": [..]}}, "sort": [..], "size": n, "from": n}`
/// where every empty part is omitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryDocument {
    must: Vec<Condition>,
    must_not: Vec<Condition>,
    sort: Vec<SortClause>,
    size: Option<u64>,
    from: Option<u64>,
}

impl QueryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a clause every hit must satisfy
    pub fn must(&mut self, condition: Condition) -> &mut Self {
        self.must.push(condition);
        self
    }

    /// Append a clause no hit may satisfy
    pub fn must_not(&mut self, condition: Condition) -> &mut Self {
        self.must_not.push(condition);
        self
    }

    pub fn sort_by(&mut self, clause: SortClause) -> &mut Self {
        self.sort.push(clause);
        self
    }

    pub fn set_size(&mut self, size: u64) -> &mut Self {
        self.size = Some(size);
        self
    }

    pub fn set_from(&mut self, from: u64) -> &mut Self {
        self.from = Some(from);
        self
    }

    pub fn must_conditions(&self) -> &[Condition] {
        &self.must
    }

    pub fn must_not_conditions(&self) -> &[Condition] {
        &self.must_not
    }

    pub fn sort_clauses(&self) -> &[SortClause] {
        &self.sort
    }

    pub fn size(&self) -> Option<u64> {
        self.size
    }

    pub fn offset(&self) -> Option<u64> {
        self.from
    }

    /// Whether any boolean clause has been added
    pub fn has_query(&self) -> bool {
        !self.must.is_empty() || !self.must_not.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Render the backend request body
    pub fn to_body(&self) -> Value {
        let mut body = Map::new();

        if self.has_query() {
            let mut bool_query = Map::new();
            if !self.must.is_empty() {
                bool_query.insert(
                    "must".to_string(),
                    Value::Array(self.must.iter().map(Condition::to_json).collect()),
                );
            }
            if !self.must_not.is_empty() {
                bool_query.insert(
                    "must_not".to_string(),
                    Value::Array(self.must_not.iter().map(Condition::to_json).collect()),
                );
            }
            body.insert("query".to_string(), json!({ "bool": bool_query }));
        }
        if !self.sort.is_empty() {
            body.insert(
                "sort".to_string(),
                Value::Array(self.sort.iter().map(SortClause::to_json).collect()),
            );
        }
        if let Some(size) = self.size {
            body.insert("size".to_string(), json!(size));
        }
        if let Some(from) = self.from {
            body.insert("from".to_string(), json!(from));
        }

        Value::Object(body)
    }
}
