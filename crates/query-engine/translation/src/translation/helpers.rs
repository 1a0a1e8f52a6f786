//! Helpers for processing the query parameters.

use query_engine_metadata::metadata::FieldTypeMap;
use query_params_configuration::Policy;

use super::error::{Error, FieldAccess};
use super::validation::ShapeValidator;

/// Static information a translation runs against.
pub struct Env<'a> {
    /// The field types of the queried entity.
    pub fields: &'a FieldTypeMap,
    /// The effective policy, i.e. the default merged with any endpoint policy.
    pub policy: &'a Policy,
    pub validator: &'a dyn ShapeValidator,
}

impl<'a> Env<'a> {
    pub fn new(
        fields: &'a FieldTypeMap,
        policy: &'a Policy,
        validator: &'a dyn ShapeValidator,
    ) -> Env<'a> {
        Env {
            fields,
            policy,
            validator,
        }
    }

    /// Fail if the field path touches a sensitive field.
    pub fn check_not_sensitive(&self, path: &str, access: FieldAccess) -> Result<(), Error> {
        if self.policy.is_sensitive(path) {
            Err(Error::SensitiveField {
                field: path.to_string(),
                access,
            })
        } else {
            Ok(())
        }
    }
}
