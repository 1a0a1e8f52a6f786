use std::fs;
use std::path::PathBuf;

use query_engine_translation::translation::params::{QueryParams, RequestContext};
use query_engine_translation::translation::query::QueryTranslator;
use tests_common::deployment::helpers::{get_path_from_project_root, STATIC_CONFIGURATION_PATH};

/// Translate the query string of a golden file test against the static configuration, and
/// return the translated query along with the expected one.
pub async fn test_translation(
    testname: &str,
) -> anyhow::Result<(serde_json::Value, serde_json::Value)> {
    tests_common::deployment::helpers::init_logging();
    let directory = PathBuf::from("tests/goldenfiles").join(testname);

    let parsed_configuration = query_params_configuration::parse_configuration(
        get_path_from_project_root(STATIC_CONFIGURATION_PATH),
    )
    .await?;
    let configuration =
        query_params_configuration::make_runtime_configuration(parsed_configuration)?;

    let entity = fs::read_to_string(directory.join("entity.txt"))
        .map_or_else(|_| "user".to_string(), |entity| entity.trim().to_string());
    let fields = configuration
        .fields(&entity)
        .ok_or_else(|| anyhow::anyhow!("unknown entity {entity}"))?
        .clone();

    let request = fs::read_to_string(directory.join("request.txt"))?;
    let params = QueryParams::parse(request.trim());

    let context = match fs::read_to_string(directory.join("context.json")) {
        Ok(contents) => serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(
            &contents,
        )?
        .into_iter()
        .collect::<RequestContext>(),
        Err(_) => RequestContext::new(),
    };

    let translator = QueryTranslator::new(fields).with_policy(configuration.policy);
    let query = translator.translate(&params, &context)?;

    let expected = serde_json::from_str(&fs::read_to_string(directory.join("expected.json"))?)?;

    Ok((serde_json::to_value(query)?, expected))
}
