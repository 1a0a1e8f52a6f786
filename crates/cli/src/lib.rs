//! The commands of the query-params CLI.
//!
//! Every command works on a configuration directory holding `configuration.json`.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use clap::Subcommand;
use serde::Serialize;

use query_engine_metadata::metadata::documentation::{
    filter_documentation, standard_parameters, DocumentationEntry,
};
use query_engine_metadata::metadata::FieldTypeMap;
use query_engine_translation::translation::params::{QueryParams, RequestContext};
use query_engine_translation::translation::query::QueryTranslator;
use query_params_configuration::version1::CONFIGURATION_FILENAME;
use query_params_configuration::{
    install_default_policy, make_runtime_configuration, parse_configuration,
    write_parsed_configuration, Configuration, ParsedConfiguration,
};

/// The various contextless commands that can be run.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Write an empty configuration and its JSON schema.
    Initialize,
    /// Translate a query string into a query descriptor, printed as JSON.
    Translate {
        /// The entity to translate the query against.
        #[arg(long)]
        entity: String,
        /// A request-scoped value, e.g. `userId=42`. May be repeated.
        #[arg(long = "context-value", value_parser = parse_context_value)]
        context_values: Vec<(String, serde_json::Value)>,
        /// The query string, e.g. `filter.age=%24gt%3A5&take=10`.
        query: String,
    },
    /// Print the documentation of the query parameters an entity accepts, as JSON.
    Docs {
        #[arg(long)]
        entity: String,
    },
}

/// The documentation printed by [`Command::Docs`].
#[derive(Debug, Serialize)]
struct Documentation {
    filters: Vec<DocumentationEntry>,
    parameters: Vec<DocumentationEntry>,
}

/// Run a command in the given configuration directory, writing its output to `out`.
pub async fn run(
    command: Command,
    context_path: &Path,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Command::Initialize => initialize(context_path, out).await,
        Command::Translate {
            entity,
            context_values,
            query,
        } => translate(context_path, &entity, context_values, &query, out).await,
        Command::Docs { entity } => docs(context_path, &entity, out).await,
    }
}

async fn initialize(context_path: &Path, out: &mut impl Write) -> anyhow::Result<()> {
    let configuration_file = context_path.join(CONFIGURATION_FILENAME);
    if tokio::fs::try_exists(&configuration_file).await? {
        anyhow::bail!(
            "a configuration already exists at {}",
            configuration_file.display()
        );
    }
    write_parsed_configuration(ParsedConfiguration::initial(), context_path).await?;
    writeln!(out, "Wrote {}", configuration_file.display())?;
    Ok(())
}

async fn translate(
    context_path: &Path,
    entity: &str,
    context_values: Vec<(String, serde_json::Value)>,
    query: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let configuration = read_configuration(context_path).await?;
    let fields = entity_fields(&configuration, entity)?;

    // the translator reads the process default policy
    install_default_policy(configuration.policy.clone());
    let translator = QueryTranslator::new(fields.clone());

    let context = context_values.into_iter().collect::<RequestContext>();
    let descriptor = translator.translate(&QueryParams::parse(query), &context)?;

    serde_json::to_writer_pretty(&mut *out, &descriptor)?;
    writeln!(out)?;
    Ok(())
}

async fn docs(context_path: &Path, entity: &str, out: &mut impl Write) -> anyhow::Result<()> {
    let configuration = read_configuration(context_path).await?;
    let fields = entity_fields(&configuration, entity)?;

    let documentation = Documentation {
        filters: filter_documentation(fields),
        parameters: standard_parameters(),
    };
    serde_json::to_writer_pretty(&mut *out, &documentation)?;
    writeln!(out)?;
    Ok(())
}

async fn read_configuration(context_path: &Path) -> anyhow::Result<Configuration> {
    let parsed = parse_configuration(context_path).await?;
    tracing::debug!(path = %context_path.display(), "read configuration");
    Ok(make_runtime_configuration(parsed)?)
}

fn entity_fields<'a>(
    configuration: &'a Configuration,
    entity: &str,
) -> anyhow::Result<&'a FieldTypeMap> {
    configuration
        .fields(entity)
        .with_context(|| format!("unknown entity: {entity}"))
}

/// Parse a `name=value` pair. The value is a JSON literal if it parses as one, and a string
/// otherwise.
fn parse_context_value(raw: &str) -> Result<(String, serde_json::Value), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got {raw}"))?;
    if name.is_empty() {
        return Err(format!("missing name in {raw}"));
    }
    let value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
    Ok((name.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_values_are_json_or_strings() {
        assert_eq!(
            parse_context_value("userId=42"),
            Ok(("userId".to_string(), serde_json::json!(42)))
        );
        assert_eq!(
            parse_context_value("userId=u-1"),
            Ok(("userId".to_string(), serde_json::json!("u-1")))
        );
        assert_eq!(
            parse_context_value("tenant="),
            Ok(("tenant".to_string(), serde_json::json!("")))
        );
        assert!(parse_context_value("userId").is_err());
        assert!(parse_context_value("=1").is_err());
    }
}
