//! Resource-level Mavenlink API.

use std::num::NonZeroUsize;

use crate::client::MavenlinkClient;
use crate::error::Result;
use crate::pagination::{load_all_items, load_all_items_buffered, Page, PER_PAGE};
use crate::processor::{process_result, process_result_with_relation, Entity, RawResponse};
use crate::traits::{Resource, Transport};

/// Mavenlink API facade.
///
/// Wraps a [`Transport`] and exposes one accessor per resource. Single-page
/// accessors return a normalized [`Page`]; the `get_all_*` variants load
/// every page and return the concatenated entities.
///
/// # Example
///
/// ```no_run
/// use mavenlink::MavenlinkApi;
///
/// # async fn example() -> mavenlink::Result<()> {
/// let api = MavenlinkApi::new("your-access-token")?;
///
/// let tasks = api.get_all_tasks().await?;
/// for task in &tasks {
///     println!("{} ({} assignees)", task["title"], task["assignees"].as_array().map_or(0, Vec::len));
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MavenlinkApi<T = MavenlinkClient> {
    transport: T,
    max_concurrency: Option<NonZeroUsize>,
}

impl MavenlinkApi<MavenlinkClient> {
    /// Create an API over HTTP using the given access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(token: &str) -> Result<Self> {
        Ok(Self::with_transport(MavenlinkClient::new(token)?))
    }

    /// Create an API from environment variables.
    ///
    /// See [`MavenlinkClient::from_env`].
    ///
    /// # Errors
    ///
    /// Returns an error if `MAVENLINK_ACCESS_TOKEN` is not set.
    pub fn from_env() -> Result<Self> {
        Ok(Self::with_transport(MavenlinkClient::from_env()?))
    }
}

impl<T: Transport> MavenlinkApi<T> {
    /// Create an API over any transport.
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            max_concurrency: None,
        }
    }

    /// Keep at most `limit` page requests in flight when loading a whole
    /// resource. Without a limit every remaining page is requested at once.
    #[must_use]
    pub fn with_max_concurrency(mut self, limit: NonZeroUsize) -> Self {
        self.max_concurrency = Some(limit);
        self
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch and normalize one page of resource `R`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response has an
    /// unexpected shape.
    #[tracing::instrument(skip(self, filter), fields(endpoint = R::ENDPOINT))]
    pub async fn page<R: Resource>(&self, filter: &R::Filter, page: u32) -> Result<Page<Entity>> {
        let mut query = vec![("per_page", PER_PAGE.to_string()), ("page", page.to_string())];
        query.extend(R::query(filter));

        let body = self.transport.get(R::ENDPOINT, &query).await?;
        let raw = RawResponse::from_value(body)?;

        match R::relation() {
            Some(relation) => process_result_with_relation(&raw, R::COLLECTION, &relation),
            None => process_result(&raw, R::COLLECTION),
        }
    }

    /// Fetch every page of resource `R`.
    ///
    /// # Errors
    ///
    /// Fails if any page fails.
    pub async fn all<R: Resource>(&self, filter: &R::Filter) -> Result<Vec<Entity>> {
        let loader = move |page| self.page::<R>(filter, page);
        match self.max_concurrency {
            Some(limit) => load_all_items_buffered(loader, limit).await,
            None => load_all_items(loader).await,
        }
    }
}
