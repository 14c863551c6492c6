//! Comments, called posts by the Mavenlink API.

use crate::api::MavenlinkApi;
use crate::error::Result;
use crate::pagination::Page;
use crate::processor::Entity;
use crate::traits::{Query, Resource, Transport};

/// Top-level comments across all projects (`posts.json`).
#[derive(Debug, Clone, Copy)]
pub struct Comments;

impl Resource for Comments {
    const ENDPOINT: &'static str = "posts.json";
    const COLLECTION: &'static str = "posts";
    type Filter = ();

    fn query(_: &()) -> Query {
        vec![("parents_only", "true".to_string())]
    }
}

/// Top-level comments of one project, filtered by workspace id.
#[derive(Debug, Clone, Copy)]
pub struct ProjectComments;

impl Resource for ProjectComments {
    const ENDPOINT: &'static str = "posts.json";
    const COLLECTION: &'static str = "posts";
    type Filter = str;

    fn query(project_id: &str) -> Query {
        vec![
            ("parents_only", "true".to_string()),
            ("workspace_id", project_id.to_string()),
        ]
    }
}

impl<T: Transport> MavenlinkApi<T> {
    /// Get one page of parent comments.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    pub async fn get_comments(&self, page: u32) -> Result<Page<Entity>> {
        self.page::<Comments>(&(), page).await
    }

    /// Get every parent comment.
    ///
    /// # Errors
    ///
    /// Returns an error if any page fails.
    pub async fn get_all_comments(&self) -> Result<Vec<Entity>> {
        self.all::<Comments>(&()).await
    }

    /// Get one page of parent comments belonging to `project_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    pub async fn get_comments_for_project(&self, page: u32, project_id: &str) -> Result<Page<Entity>> {
        self.page::<ProjectComments>(project_id, page).await
    }

    /// Get every parent comment belonging to `project_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if any page fails.
    pub async fn get_all_comments_for_project(&self, project_id: &str) -> Result<Vec<Entity>> {
        self.all::<ProjectComments>(project_id).await
    }
}
