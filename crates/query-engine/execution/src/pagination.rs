//! Fetch a page of records and the total count, and derive the page metadata.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info_span, Instrument};

use query_engine_descriptor::descriptor::ast::{CountQuery, ParsedQuery};

use crate::error::Error;
use crate::metrics::Metrics;

pub const DEFAULT_TAKE: i64 = 10;
pub const DEFAULT_SKIP: i64 = 0;

/// The data-access layer a paginated query runs against.
#[async_trait]
pub trait DataSource: Send + Sync {
    type Record: Send;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch the records matching the query, honoring its window.
    async fn find_many(&self, query: &ParsedQuery) -> Result<Vec<Self::Record>, Self::Error>;

    /// Count every record matching the filter, ignoring any window.
    async fn count(&self, query: &CountQuery) -> Result<u64, Self::Error>;
}

/// A page of records with its position in the full result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total_count: u64,
    pub current_page: u64,
    pub is_first_page: bool,
    pub is_last_page: bool,
}

/// A validated pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub take: u64,
    pub skip: u64,
}

impl Window {
    /// The window of a query, falling back to the defaults for absent values.
    pub fn of(query: &ParsedQuery) -> Result<Window, Error> {
        let take = query.take.unwrap_or(DEFAULT_TAKE);
        let skip = query.skip.unwrap_or(DEFAULT_SKIP);
        let invalid = || Error::InvalidWindow { take, skip };
        if take <= 0 {
            return Err(invalid());
        }
        Ok(Window {
            take: u64::try_from(take).map_err(|_| invalid())?,
            skip: u64::try_from(skip).map_err(|_| invalid())?,
        })
    }

    pub fn current_page(self) -> u64 {
        self.skip / self.take + 1
    }

    pub fn is_first_page(self) -> bool {
        self.skip == 0
    }

    pub fn is_last_page(self, total_count: u64) -> bool {
        self.skip.saturating_add(self.take) >= total_count
    }
}

/// Run the query and the matching count concurrently and assemble a page.
pub async fn paginate<S: DataSource>(
    source: &S,
    metrics: &Metrics,
    query: ParsedQuery,
) -> Result<Page<S::Record>, Error> {
    let window = Window::of(&query)?;
    let count_query = query.count_query();
    let find_query = ParsedQuery {
        take: query.take.or(Some(DEFAULT_TAKE)),
        skip: query.skip.or(Some(DEFAULT_SKIP)),
        ..query
    };

    let result = async {
        tokio::try_join!(
            async {
                source
                    .find_many(&find_query)
                    .await
                    .map_err(Error::query_execution)
            },
            async { source.count(&count_query).await.map_err(Error::query_execution) },
        )
    }
    .instrument(info_span!(
        "Fetch page",
        take = window.take,
        skip = window.skip
    ))
    .await;

    let (data, total_count) = match result {
        Ok(fetched) => fetched,
        Err(err) => {
            metrics.record_failure();
            return Err(err);
        }
    };
    metrics.record_success(data.len());

    Ok(Page {
        data,
        total_count,
        current_page: window.current_page(),
        is_first_page: window.is_first_page(),
        is_last_page: window.is_last_page(total_count),
    })
}
