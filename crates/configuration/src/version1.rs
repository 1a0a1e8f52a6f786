//! The first version of the configuration file format.

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::fs;

use query_engine_metadata::metadata::{EntitiesInfo, FieldTypeMap};

use crate::error::{ParseConfigurationError, WriteParsedConfigurationError};
use crate::policy::Policy;

pub const CONFIGURATION_FILENAME: &str = "configuration.json";
pub const CONFIGURATION_JSONSCHEMA_FILENAME: &str = "schema.json";

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize, Serialize, JsonSchema)]
pub enum Version {
    #[serde(rename = "1")]
    #[default]
    This,
}

/// The configuration as it is stored on disk: the security policy, and the field types of
/// every entity that can be queried.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct ParsedConfiguration {
    /// Which version of the configuration format are we using
    pub version: Version,
    /// The default policy applied to every entity
    #[serde(default)]
    pub policy: Policy,
    /// Field types per entity
    #[serde(default)]
    pub entities: EntitiesInfo,
}

impl ParsedConfiguration {
    pub fn empty() -> Self {
        ParsedConfiguration {
            version: Version::This,
            policy: Policy::empty(),
            entities: EntitiesInfo::empty(),
        }
    }

    pub fn initial() -> Self {
        ParsedConfiguration::empty()
    }

    #[must_use]
    pub fn with_entity(mut self, name: impl Into<String>, fields: FieldTypeMap) -> Self {
        self.entities.0.insert(name.into(), fields);
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }
}

/// Parse the configuration format from a directory.
pub async fn parse_configuration(
    configuration_dir: impl AsRef<Path>,
) -> Result<ParsedConfiguration, ParseConfigurationError> {
    let configuration_file = configuration_dir.as_ref().join(CONFIGURATION_FILENAME);

    let configuration_file_contents =
        fs::read_to_string(&configuration_file)
            .await
            .map_err(|err| {
                ParseConfigurationError::IoErrorButStringified(format!(
                    "{}: {}",
                    &configuration_file.display(),
                    err
                ))
            })?;

    let value: serde_json::Value = serde_json::from_str(&configuration_file_contents).map_err(
        |error| ParseConfigurationError::ParseError {
            file_path: configuration_file.clone(),
            line: error.line(),
            column: error.column(),
            message: error.to_string(),
        },
    )?;

    match value.get("version") {
        Some(serde_json::Value::String(version)) if version == "1" => {}
        Some(other) => {
            return Err(ParseConfigurationError::UnsupportedVersion(
                other.to_string(),
            ))
        }
        None => {
            return Err(ParseConfigurationError::UnsupportedVersion(
                "missing".to_string(),
            ))
        }
    }

    // re-parse from the text so that errors point at a line and column
    let parsed_config: ParsedConfiguration = serde_json::from_str(&configuration_file_contents)
        .map_err(|error| ParseConfigurationError::ParseError {
            file_path: configuration_file.clone(),
            line: error.line(),
            column: error.column(),
            message: error.to_string(),
        })?;

    tracing::debug!(
        entities = parsed_config.entities.0.len(),
        path = %configuration_file.display(),
        "parsed configuration"
    );

    Ok(parsed_config)
}

/// Write the parsed configuration into a directory on disk, along with its JSON schema.
pub async fn write_parsed_configuration(
    parsed_config: ParsedConfiguration,
    out_dir: impl AsRef<Path>,
) -> Result<(), WriteParsedConfigurationError> {
    let configuration_file = out_dir.as_ref().to_owned().join(CONFIGURATION_FILENAME);
    fs::create_dir_all(out_dir.as_ref()).await?;

    // create the configuration file
    fs::write(
        configuration_file,
        serde_json::to_string_pretty(&parsed_config)
            .map_err(|e| WriteParsedConfigurationError::IoError(e.into()))?
            + "\n",
    )
    .await?;

    // create the jsonschema file
    let configuration_jsonschema_file_path = out_dir
        .as_ref()
        .to_owned()
        .join(CONFIGURATION_JSONSCHEMA_FILENAME);

    let output = schemars::schema_for!(ParsedConfiguration);
    fs::write(
        &configuration_jsonschema_file_path,
        serde_json::to_string_pretty(&output)
            .map_err(|e| WriteParsedConfigurationError::IoError(e.into()))?
            + "\n",
    )
    .await?;

    Ok(())
}
