use chrono::{TimeZone, Utc};
use similar_asserts::assert_eq;

use query_engine_translation::translation::params::{QueryParams, RequestContext};
use query_params::{create_state, Connector, Error, ErrorResponse};
use query_params_configuration::{make_runtime_configuration, Policy};
use tests_common::data_source::{FailingDataSource, Failure, InMemoryDataSource};
use tests_common::fixtures::{user_configuration, users, USER_ENTITY};

async fn connector() -> Connector {
    tests_common::deployment::helpers::init_logging();
    let configuration = make_runtime_configuration(user_configuration()).unwrap();
    let mut registry = prometheus::Registry::new();
    let state = create_state(&mut registry).await.unwrap();
    Connector::new(configuration, state)
}

#[tokio::test]
async fn query_returns_the_requested_page() {
    let connector = connector().await;
    let source = InMemoryDataSource::new(users(25, "u-1"));
    let context = RequestContext::new().with("userId", "u-1");

    let page = connector
        .query(
            &source,
            USER_ENTITY,
            &QueryParams::parse("filter.age=%24gt%3A20&take=10&skip=20"),
            &context,
            None,
        )
        .await
        .unwrap();

    assert_eq!(
        page.data.iter().map(|user| user.id).collect::<Vec<_>>(),
        vec![21, 22, 23, 24, 25]
    );
    assert_eq!(page.total_count, 25);
    assert_eq!(page.current_page, 3);
    assert!(!page.is_first_page);
    assert!(page.is_last_page);

    assert_eq!(
        source.count_calls(),
        vec![serde_json::json!({"where": {"age": {"gt": 20}, "userId": "u-1"}})]
    );
    assert_eq!(connector.state().metrics.query_total.get(), 1);
}

#[tokio::test]
async fn translate_applies_the_endpoint_policy() {
    let connector = connector().await;
    let endpoint_policy = Policy::empty().with_sensitive_fields(["email"]);
    let params = QueryParams::parse("select=id,email");

    assert!(connector
        .translate(USER_ENTITY, &params, &RequestContext::new(), None)
        .is_ok());
    let err = connector
        .translate(
            USER_ENTITY,
            &params,
            &RequestContext::new(),
            Some(&endpoint_policy),
        )
        .unwrap_err();
    assert_eq!(err.kind(), "SensitiveField");
    assert_eq!(err.to_string(), "Selecting sensitive field email is not allowed.");
}

#[tokio::test]
async fn unknown_entities_are_rejected() {
    let connector = connector().await;
    let err = connector
        .translate("order", &QueryParams::new(), &RequestContext::new(), None)
        .unwrap_err();
    assert!(matches!(err, Error::UnknownEntity(ref entity) if entity == "order"));
}

#[tokio::test]
async fn data_source_failures_are_reported() {
    let connector = connector().await;
    let err = connector
        .query(
            &FailingDataSource {
                failure: Failure::Count,
            },
            USER_ENTITY,
            &QueryParams::new(),
            &RequestContext::new(),
            None,
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "QueryExecution");
    assert_eq!(
        err.to_string(),
        "Query execution failed: data source unavailable: count timed out"
    );
    assert_eq!(connector.state().metrics.query_failures_total.get(), 1);
}

#[tokio::test]
async fn errors_render_as_bad_requests() {
    let connector = connector().await;
    let err = connector
        .translate(
            USER_ENTITY,
            &QueryParams::parse("debug=1&filter.age=%24gt%3A1"),
            &RequestContext::new(),
            None,
        )
        .unwrap_err();

    let response = ErrorResponse::from_error(&err, "/users?debug=1");
    assert_eq!(response.status_code, 400);
    assert_eq!(response.message, "Forbidden keys found in query: debug");
    assert_eq!(response.path, "/users?debug=1");
    assert!(chrono::DateTime::parse_from_rfc3339(&response.timestamp).is_ok());
    assert!(response.timestamp.ends_with('Z'));
}

#[tokio::test]
async fn sensitive_field_errors_render_with_a_fixed_timestamp() {
    let connector = connector().await;
    let err = connector
        .translate(
            USER_ENTITY,
            &QueryParams::parse("orderBy=password:asc"),
            &RequestContext::new(),
            None,
        )
        .unwrap_err();

    let timestamp = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
    insta::assert_json_snapshot!(
        ErrorResponse::at(&err, "/users?orderBy=password:asc", timestamp),
        @r###"
    {
      "statusCode": 400,
      "message": "Sorting by sensitive field password is not allowed.",
      "timestamp": "2024-03-01T09:30:00.000Z",
      "path": "/users?orderBy=password:asc"
    }
    "###
    );
}

#[tokio::test]
async fn invalid_windows_are_rejected_before_fetching() {
    let connector = connector().await;
    let source = InMemoryDataSource::new(users(3, "u-1"));
    let err = connector
        .query(
            &source,
            USER_ENTITY,
            &QueryParams::parse("take=0"),
            &RequestContext::new(),
            None,
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "InvalidWindow");
    assert!(source.find_many_calls().is_empty());
}
