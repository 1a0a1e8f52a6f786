//! Derive API documentation for the accepted query parameters from the field type registry.

use indexmap::IndexMap;
use serde::Serialize;

use super::fields::{FieldTypeMap, ScalarKind};
use super::operators::ComparisonOperator;

/// An example value for a query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Example {
    pub summary: String,
    pub value: String,
}

impl Example {
    fn new(summary: &str, value: &str) -> Example {
        Example {
            summary: summary.to_string(),
            value: value.to_string(),
        }
    }
}

/// The type of value a documented query parameter carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    Number,
    String,
    Date,
    Integer,
}

impl From<ScalarKind> for ParameterKind {
    fn from(kind: ScalarKind) -> Self {
        match kind {
            ScalarKind::Number => ParameterKind::Number,
            ScalarKind::String => ParameterKind::String,
            ScalarKind::Date => ParameterKind::Date,
        }
    }
}

/// Documentation of a single optional query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentationEntry {
    pub parameter: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ParameterKind,
    pub examples: IndexMap<String, Example>,
}

/// Something that collects documentation entries, e.g. an OpenAPI document under construction.
pub trait DocumentationTarget {
    fn register(&mut self, entry: DocumentationEntry);
}

impl DocumentationTarget for Vec<DocumentationEntry> {
    fn register(&mut self, entry: DocumentationEntry) {
        self.push(entry);
    }
}

/// The example catalog attached to every filter parameter, keyed by predicate name.
pub fn operator_examples() -> IndexMap<String, Example> {
    let mut examples = IndexMap::new();
    examples.insert("empty".to_string(), Example::new("No filter", ""));
    for operator in enum_iterator::all::<ComparisonOperator>() {
        examples.insert(
            operator.predicate_name().to_string(),
            Example::new(operator.summary(), &operator.example()),
        );
    }
    examples
}

/// Register a `filter.<path>` parameter for every scalar field, at every nesting depth.
pub fn document_filters(fields: &FieldTypeMap, target: &mut impl DocumentationTarget) {
    let examples = operator_examples();
    for (path, kind) in fields.leaf_paths() {
        target.register(DocumentationEntry {
            parameter: format!("filter.{path}"),
            description: format!("Filter by {path}"),
            kind: kind.into(),
            examples: examples.clone(),
        });
    }
}

/// Documentation for the filter parameters of an entity.
pub fn filter_documentation(fields: &FieldTypeMap) -> Vec<DocumentationEntry> {
    let mut entries = vec![];
    document_filters(fields, &mut entries);
    entries
}

fn standard_parameter(
    parameter: &str,
    description: &str,
    kind: ParameterKind,
    examples: &[(&str, &str, &str)],
) -> DocumentationEntry {
    DocumentationEntry {
        parameter: parameter.to_string(),
        description: description.to_string(),
        kind,
        examples: examples
            .iter()
            .map(|(name, summary, value)| (name.to_string(), Example::new(summary, value)))
            .collect(),
    }
}

/// Documentation for the parameters every endpoint accepts, independent of the entity.
pub fn standard_parameters() -> Vec<DocumentationEntry> {
    vec![
        standard_parameter(
            "select",
            "Comma-separated list of fields to select in the query.",
            ParameterKind::String,
            &[
                ("empty", "No fields selected", ""),
                ("selectedFields", "Selected fields", "videoCrn,createdAt"),
            ],
        ),
        standard_parameter(
            "include",
            "Comma-separated list of relations to include in the query.",
            ParameterKind::String,
            &[
                ("empty", "No relations included", ""),
                ("includedRelations", "Included relations", "progress,video"),
            ],
        ),
        standard_parameter(
            "orderBy",
            "Comma-separated list of fields and sort directions for ordering. Example: \"createdAt:desc,test:asc\".",
            ParameterKind::String,
            &[
                ("empty", "No order by", ""),
                ("orderBy", "Order by", "createdAt:desc"),
            ],
        ),
        standard_parameter(
            "distinct",
            "Fields to apply distinct on. Removes duplicate records.",
            ParameterKind::String,
            &[
                ("empty", "No distinct on", ""),
                ("distinct", "Distinct on", "videoCrn,userId"),
            ],
        ),
        standard_parameter(
            "take",
            "Number of records to take (limit the result set)",
            ParameterKind::Integer,
            &[("example", "Page size", "10")],
        ),
        standard_parameter(
            "skip",
            "Number of records to skip (for pagination)",
            ParameterKind::Integer,
            &[("example", "Offset", "0")],
        ),
        standard_parameter(
            "cursor",
            "Cursor-based pagination. Specify the starting point for fetching records.",
            ParameterKind::String,
            &[("empty", "No cursor", ""), ("cursor", "Cursor", "{\"id\": 10}")],
        ),
    ]
}
