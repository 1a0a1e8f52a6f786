use similar_asserts::assert_eq;

use query_engine_descriptor::descriptor::ast::{Condition, ParsedQuery, Value};
use query_engine_descriptor::descriptor::helpers::nest;
use query_engine_execution::error::Error;
use query_engine_execution::metrics::Metrics;
use query_engine_execution::paginate;
use tests_common::data_source::{Failure, FailingDataSource, InMemoryDataSource};

fn metrics() -> Metrics {
    Metrics::initialize(&mut prometheus::Registry::new()).unwrap()
}

fn numbers(count: i64) -> InMemoryDataSource<i64> {
    InMemoryDataSource::new((1..=count).collect())
}

#[tokio::test]
async fn last_page_of_twenty_five() {
    let source = numbers(25);
    let query = ParsedQuery {
        take: Some(10),
        skip: Some(20),
        ..ParsedQuery::default()
    };

    let page = paginate(&source, &metrics(), query).await.unwrap();

    assert_eq!(page.data, vec![21, 22, 23, 24, 25]);
    assert_eq!(page.total_count, 25);
    assert_eq!(page.current_page, 3);
    assert!(!page.is_first_page);
    assert!(page.is_last_page);
}

#[tokio::test]
async fn first_page_uses_default_window() {
    let source = numbers(25);
    let metrics = metrics();

    let page = paginate(&source, &metrics, ParsedQuery::default())
        .await
        .unwrap();

    assert_eq!(page.data, (1..=10).collect::<Vec<_>>());
    assert_eq!(page.current_page, 1);
    assert!(page.is_first_page);
    assert!(!page.is_last_page);
    assert_eq!(metrics.query_total.get(), 1);
    assert_eq!(metrics.records_fetched_total.get(), 10);
}

#[tokio::test]
async fn find_many_gets_the_window_and_count_only_the_filter() {
    let source = numbers(3);
    let query = ParsedQuery {
        where_: Some(nest("userId", Condition::Equals(Value::from("u1")))),
        distinct: Some(vec!["name".to_string()]),
        skip: Some(0),
        ..ParsedQuery::default()
    };

    paginate(&source, &metrics(), query).await.unwrap();

    assert_eq!(
        source.find_many_calls(),
        vec![serde_json::json!({
            "where": {"userId": "u1"},
            "distinct": ["name"],
            "take": 10,
            "skip": 0
        })]
    );
    assert_eq!(
        source.count_calls(),
        vec![serde_json::json!({"where": {"userId": "u1"}})]
    );
}

#[tokio::test]
async fn page_serializes_in_camel_case() {
    let page = paginate(&numbers(1), &metrics(), ParsedQuery::default())
        .await
        .unwrap();
    assert_eq!(
        serde_json::to_value(page).unwrap(),
        serde_json::json!({
            "data": [1],
            "totalCount": 1,
            "currentPage": 1,
            "isFirstPage": true,
            "isLastPage": true
        })
    );
}

#[tokio::test]
async fn data_source_failures_are_wrapped() {
    for failure in [Failure::FindMany, Failure::Count] {
        let metrics = metrics();
        let result = paginate(
            &FailingDataSource { failure },
            &metrics,
            ParsedQuery::default(),
        )
        .await;

        let Err(Error::QueryExecution(source)) = result else {
            panic!("expected a query execution error, got {result:?}");
        };
        assert!(source.to_string().contains("timed out"));
        assert_eq!(metrics.query_failures_total.get(), 1);
        assert_eq!(metrics.query_total.get(), 0);
    }
}

#[tokio::test]
async fn invalid_windows_never_reach_the_data_source() {
    let source = numbers(3);
    let query = ParsedQuery {
        take: Some(0),
        ..ParsedQuery::default()
    };

    let result = paginate(&source, &metrics(), query).await;

    assert!(matches!(result, Err(Error::InvalidWindow { take: 0, skip: 0 })));
    assert!(source.find_many_calls().is_empty());
    assert!(source.count_calls().is_empty());
}
