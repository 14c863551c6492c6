//! Projects, called workspaces by the Mavenlink API.

use crate::api::MavenlinkApi;
use crate::error::Result;
use crate::pagination::Page;
use crate::processor::Entity;
use crate::traits::{Query, Resource, Transport};

/// Projects (`workspaces.json`).
#[derive(Debug, Clone, Copy)]
pub struct Projects;

impl Resource for Projects {
    const ENDPOINT: &'static str = "workspaces.json";
    const COLLECTION: &'static str = "workspaces";
    type Filter = ();

    fn query(_: &()) -> Query {
        Vec::new()
    }
}

impl<T: Transport> MavenlinkApi<T> {
    /// Get one page of projects.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    pub async fn get_projects(&self, page: u32) -> Result<Page<Entity>> {
        self.page::<Projects>(&(), page).await
    }

    /// Get every project.
    ///
    /// # Errors
    ///
    /// Returns an error if any page fails.
    pub async fn get_all_projects(&self) -> Result<Vec<Entity>> {
        self.all::<Projects>(&()).await
    }
}
