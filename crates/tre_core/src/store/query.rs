//! Filter queries over JSON documents.
//!
//! A `DocumentQuery` is a conjunction of field predicates. Its `Display`
//! form is the Cosmos-style SQL text (`SELECT * FROM c WHERE c.a = "x" AND ...`)
//! used in logs and asserted by callers; stores evaluate the structured
//! predicates instead of parsing that text.

use std::fmt::{Display, Formatter};

/// Comparison applied by one predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Ne,
}

impl FilterOp {
    /// Operator token shared by the rendered query and SQLite.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
        }
    }
}

/// Literal compared against a document field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Bool(bool),
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// One `c.<path> <op> <value>` clause. `path` is dot-separated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub path: String,
    pub op: FilterOp,
    pub value: FilterValue,
}

/// Conjunction of predicates, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentQuery {
    predicates: Vec<Predicate>,
}

impl DocumentQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `c.<path> = <value>`.
    pub fn eq(self, path: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.push(path.into(), FilterOp::Eq, value.into())
    }

    /// Adds `c.<path> != <value>`.
    pub fn ne(self, path: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.push(path.into(), FilterOp::Ne, value.into())
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    fn push(mut self, path: String, op: FilterOp, value: FilterValue) -> Self {
        self.predicates.push(Predicate { path, op, value });
        self
    }
}

impl Display for DocumentQuery {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "SELECT * FROM c")?;
        for (index, predicate) in self.predicates.iter().enumerate() {
            let keyword = if index == 0 { "WHERE" } else { "AND" };
            write!(
                f,
                " {keyword} c.{} {} ",
                predicate.path,
                predicate.op.as_str()
            )?;
            match &predicate.value {
                FilterValue::Text(text) => write!(f, "\"{}\"", escape_literal(text))?,
                FilterValue::Bool(flag) => write!(f, "{flag}")?,
            }
        }
        Ok(())
    }
}

fn escape_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::{DocumentQuery, FilterOp};

    #[test]
    fn renders_empty_query_without_where_clause() {
        assert_eq!(DocumentQuery::new().to_string(), "SELECT * FROM c");
    }

    #[test]
    fn renders_predicates_in_insertion_order() {
        let query = DocumentQuery::new()
            .eq("resourceType", "workspace")
            .ne("deployment.status", "deleted")
            .eq("current", true);

        assert_eq!(
            query.to_string(),
            "SELECT * FROM c WHERE c.resourceType = \"workspace\" AND c.deployment.status != \"deleted\" AND c.current = true"
        );
        assert_eq!(query.predicates().len(), 3);
        assert_eq!(query.predicates()[1].op, FilterOp::Ne);
    }

    #[test]
    fn escapes_quotes_in_text_literals() {
        let query = DocumentQuery::new().eq("id", "a\"b");
        assert_eq!(query.to_string(), "SELECT * FROM c WHERE c.id = \"a\\\"b\"");
    }
}
