//! The field type registry: which fields of an entity may be filtered on, and how their
//! values should be interpreted.

use indexmap::IndexMap;

use enum_iterator::Sequence;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The separator between the segments of a field path, e.g. `profile.address.city`.
pub const PATH_SEPARATOR: char = '.';

/// The scalar kinds a filter value can be coerced to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Sequence,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    Number,
    String,
    Date,
}

impl ScalarKind {
    pub fn name(self) -> &'static str {
        match self {
            ScalarKind::Number => "number",
            ScalarKind::String => "string",
            ScalarKind::Date => "date",
        }
    }
}

impl std::fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The declared type of a single field: either a scalar, or a nested entity with fields of
/// its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum FieldType {
    Scalar(ScalarKind),
    Entity(FieldTypeMap),
}

/// Mapping from a field name to its declared type, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct FieldTypeMap(pub IndexMap<String, FieldType>);

/// Entities implement this to declare their field types once, statically.
pub trait DescribeFields {
    fn field_types() -> FieldTypeMap;
}

/// A field name that cannot be addressed by a field path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid field name at '{path}': {reason}")]
pub struct InvalidFieldName {
    pub path: String,
    pub reason: &'static str,
}

/// Walk a dotted field path through the (possibly nested) field types.
///
/// Returns `None` as soon as any segment is absent, or when the path tries to step into a
/// scalar field.
pub fn get_field_type<'a>(path: &str, fields: &'a FieldTypeMap) -> Option<&'a FieldType> {
    let mut segments = path.split(PATH_SEPARATOR);
    let first = segments.next()?;
    segments.try_fold(fields.0.get(first)?, |current, segment| match current {
        FieldType::Entity(nested) => nested.0.get(segment),
        FieldType::Scalar(_) => None,
    })
}

impl FieldTypeMap {
    pub fn empty() -> Self {
        FieldTypeMap(IndexMap::new())
    }

    pub fn builder() -> FieldTypeMapBuilder {
        FieldTypeMapBuilder::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lookup a dotted field path. See [`get_field_type`].
    pub fn lookup(&self, path: &str) -> Option<&FieldType> {
        get_field_type(path, self)
    }

    /// Lookup a dotted field path, only accepting scalar fields.
    pub fn lookup_scalar(&self, path: &str) -> Option<ScalarKind> {
        match self.lookup(path)? {
            FieldType::Scalar(kind) => Some(*kind),
            FieldType::Entity(_) => None,
        }
    }

    /// Every scalar field reachable from this map, as a dotted path and its kind.
    /// Depth first, in declaration order.
    pub fn leaf_paths(&self) -> Vec<(String, ScalarKind)> {
        let mut leaves = vec![];
        collect_leaves(self, None, &mut leaves);
        leaves
    }

    /// Check that every field name can be addressed by a dotted path.
    pub fn validate(&self) -> Result<(), InvalidFieldName> {
        validate_names(self, None)
    }
}

fn join_path(parent: Option<&str>, name: &str) -> String {
    match parent {
        None => name.to_string(),
        Some(parent) => format!("{parent}{PATH_SEPARATOR}{name}"),
    }
}

fn collect_leaves(
    fields: &FieldTypeMap,
    parent: Option<&str>,
    leaves: &mut Vec<(String, ScalarKind)>,
) {
    for (name, field_type) in &fields.0 {
        let path = join_path(parent, name);
        match field_type {
            FieldType::Scalar(kind) => leaves.push((path, *kind)),
            FieldType::Entity(nested) => collect_leaves(nested, Some(&path), leaves),
        }
    }
}

fn validate_names(fields: &FieldTypeMap, parent: Option<&str>) -> Result<(), InvalidFieldName> {
    for (name, field_type) in &fields.0 {
        let path = join_path(parent, name);
        if name.is_empty() {
            return Err(InvalidFieldName {
                path,
                reason: "field names must not be empty",
            });
        }
        if name.contains(PATH_SEPARATOR) {
            return Err(InvalidFieldName {
                path,
                reason: "field names must not contain '.'",
            });
        }
        if let FieldType::Entity(nested) = field_type {
            validate_names(nested, Some(&path))?;
        }
    }
    Ok(())
}

/// Declare the field types of an entity.
///
/// ```
/// use query_engine_metadata::metadata::{FieldTypeMap, ScalarKind};
///
/// let fields = FieldTypeMap::builder()
///     .number("age")
///     .string("name")
///     .nested("profile", |profile| profile.string("bio").date("updatedAt"))
///     .build();
///
/// assert_eq!(fields.lookup_scalar("profile.updatedAt"), Some(ScalarKind::Date));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldTypeMapBuilder {
    fields: IndexMap<String, FieldType>,
}

impl FieldTypeMapBuilder {
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, kind: ScalarKind) -> Self {
        self.fields.insert(name.into(), FieldType::Scalar(kind));
        self
    }

    #[must_use]
    pub fn number(self, name: impl Into<String>) -> Self {
        self.field(name, ScalarKind::Number)
    }

    #[must_use]
    pub fn string(self, name: impl Into<String>) -> Self {
        self.field(name, ScalarKind::String)
    }

    #[must_use]
    pub fn date(self, name: impl Into<String>) -> Self {
        self.field(name, ScalarKind::Date)
    }

    /// Declare a nested entity inline.
    #[must_use]
    pub fn nested(
        self,
        name: impl Into<String>,
        build: impl FnOnce(FieldTypeMapBuilder) -> FieldTypeMapBuilder,
    ) -> Self {
        self.entity(name, build(FieldTypeMapBuilder::default()).build())
    }

    /// Declare a nested entity whose fields were described elsewhere,
    /// e.g. by its own [`DescribeFields`] implementation.
    #[must_use]
    pub fn entity(mut self, name: impl Into<String>, fields: FieldTypeMap) -> Self {
        self.fields.insert(name.into(), FieldType::Entity(fields));
        self
    }

    pub fn build(self) -> FieldTypeMap {
        FieldTypeMap(self.fields)
    }
}
