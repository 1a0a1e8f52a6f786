//! Metadata information regarding the queryable entities and the operators we accept.

pub mod documentation;
pub mod fields;
pub mod operators;

// re-export without modules
pub use fields::*;
pub use operators::*;

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Metadata information.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct Metadata {
    #[serde(default)]
    pub entities: EntitiesInfo,
}

impl Metadata {
    pub fn empty() -> Self {
        Metadata {
            entities: EntitiesInfo::empty(),
        }
    }
}

/// Mapping from an entity name to the types of its fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct EntitiesInfo(pub BTreeMap<String, FieldTypeMap>);

impl EntitiesInfo {
    pub fn empty() -> Self {
        EntitiesInfo(BTreeMap::new())
    }

    /// Lookup the field types of an entity.
    pub fn lookup(&self, entity: &str) -> Option<&FieldTypeMap> {
        self.0.get(entity)
    }
}
