//! Custom field values attached to projects.

use crate::api::MavenlinkApi;
use crate::error::Result;
use crate::pagination::Page;
use crate::processor::Entity;
use crate::traits::{Query, Resource, Transport};

/// Custom field values whose subject is a workspace
/// (`custom_field_values.json`). Used to look up external ids such as a
/// Salesforce id stored on a project.
#[derive(Debug, Clone, Copy)]
pub struct ProjectCustomFields;

impl Resource for ProjectCustomFields {
    const ENDPOINT: &'static str = "custom_field_values.json";
    const COLLECTION: &'static str = "custom_field_values";
    type Filter = ();

    fn query(_: &()) -> Query {
        vec![("subject_type", "Workspace".to_string())]
    }
}

impl<T: Transport> MavenlinkApi<T> {
    /// Get one page of project custom field values.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    pub async fn get_projects_custom_fields(&self, page: u32) -> Result<Page<Entity>> {
        self.page::<ProjectCustomFields>(&(), page).await
    }

    /// Get every project custom field value.
    ///
    /// # Errors
    ///
    /// Returns an error if any page fails.
    pub async fn get_all_projects_custom_fields(&self) -> Result<Vec<Entity>> {
        self.all::<ProjectCustomFields>(&()).await
    }
}
