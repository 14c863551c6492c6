//! Resource trait binding a collection to its endpoint.

use crate::processor::Relation;
use crate::traits::Query;

/// A paginated Mavenlink collection.
///
/// Implementors are marker types. Each one fixes the endpoint, the extra
/// query parameters, the dictionary its entities live in and, optionally,
/// a relation to resolve. [`crate::MavenlinkApi::page`] and
/// [`crate::MavenlinkApi::all`] work with any implementor.
///
/// # Example
///
/// ```ignore
/// use mavenlink::{MavenlinkApi, Projects};
///
/// let api = MavenlinkApi::new("token")?;
/// let first = api.page::<Projects>(&(), 1).await?;
/// let everything = api.all::<Projects>(&()).await?;
/// ```
pub trait Resource {
    /// Endpoint path relative to the API root (e.g., `workspaces.json`).
    const ENDPOINT: &'static str;

    /// Name of the response dictionary holding the entities.
    const COLLECTION: &'static str;

    /// Caller-supplied filter, such as a project id.
    type Filter: ?Sized + Sync;

    /// Query parameters beyond `per_page` and `page`.
    fn query(filter: &Self::Filter) -> Query;

    /// Relation to resolve while normalizing, if any.
    fn relation() -> Option<Relation> {
        None
    }
}
