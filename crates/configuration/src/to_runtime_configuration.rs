//! Convert a parsed configuration into the runtime configuration.

use query_engine_metadata::metadata;

use crate::configuration::Configuration;
use crate::error::MakeRuntimeConfigurationError;
use crate::version1::ParsedConfiguration;

/// Check the parsed configuration and produce the runtime configuration from it.
pub fn make_runtime_configuration(
    parsed_config: ParsedConfiguration,
) -> Result<Configuration, MakeRuntimeConfigurationError> {
    for (entity, fields) in &parsed_config.entities.0 {
        fields
            .validate()
            .map_err(|source| MakeRuntimeConfigurationError::InvalidEntity {
                entity: entity.clone(),
                source,
            })?;
    }

    Ok(Configuration {
        metadata: metadata::Metadata {
            entities: parsed_config.entities,
        },
        policy: parsed_config.policy,
    })
}
