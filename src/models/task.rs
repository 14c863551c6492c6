//! Tasks, called stories by the Mavenlink API.

use crate::api::MavenlinkApi;
use crate::error::Result;
use crate::pagination::Page;
use crate::processor::{Entity, Relation};
use crate::traits::{Query, Resource, Transport};

/// Top-level tasks (`stories.json`) with their assignees embedded.
///
/// Each task's `assignee_ids` is replaced by an `assignees` list holding
/// the matching user records.
#[derive(Debug, Clone, Copy)]
pub struct Tasks;

impl Resource for Tasks {
    const ENDPOINT: &'static str = "stories.json";
    const COLLECTION: &'static str = "stories";
    type Filter = ();

    fn query(_: &()) -> Query {
        vec![
            ("parents_only", "true".to_string()),
            ("include", "assignees".to_string()),
        ]
    }

    fn relation() -> Option<Relation> {
        Some(Relation::new("assignee_ids", "users").rename_to("assignees"))
    }
}

impl<T: Transport> MavenlinkApi<T> {
    /// Get one page of parent tasks, assignees resolved.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or an assignee is missing
    /// from the response.
    pub async fn get_tasks(&self, page: u32) -> Result<Page<Entity>> {
        self.page::<Tasks>(&(), page).await
    }

    /// Get every parent task, assignees resolved.
    ///
    /// # Errors
    ///
    /// Returns an error if any page fails.
    pub async fn get_all_tasks(&self) -> Result<Vec<Entity>> {
        self.all::<Tasks>(&()).await
    }
}
