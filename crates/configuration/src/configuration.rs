//! Configuration for the connector.

use query_engine_metadata::metadata;

use crate::policy::Policy;

/// The 'Configuration' type collects all the information necessary to translate queries at
/// runtime.
///
/// Values of this type are produced from a 'ParsedConfiguration' using
/// 'make_runtime_configuration', so the translation logic never has to deal with the
/// serialized format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub metadata: metadata::Metadata,
    pub policy: Policy,
}

impl Configuration {
    pub fn empty() -> Self {
        Configuration {
            metadata: metadata::Metadata::empty(),
            policy: Policy::empty(),
        }
    }

    /// The field types of an entity.
    pub fn fields(&self, entity: &str) -> Option<&metadata::FieldTypeMap> {
        self.metadata.entities.lookup(entity)
    }
}
