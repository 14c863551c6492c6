//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Mavenlink API server.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

/// Shared state for the mock server.
///
/// Records are stored as JSON objects in insertion order, which is the
/// order the server reports them in `results`.
#[derive(Debug, Default)]
pub struct MockState {
    /// Workspaces (projects).
    pub workspaces: Vec<Value>,

    /// Stories (tasks). Subtasks carry a `parent_id`.
    pub stories: Vec<Value>,

    /// Users, served alongside stories when assignees are included.
    pub users: Vec<Value>,

    /// Custom field values for any subject type.
    pub custom_field_values: Vec<Value>,

    /// Posts (comments). Replies carry a `parent_id`.
    pub posts: Vec<Value>,

    /// Optional authentication token. If set, requests must include this token.
    pub required_token: Option<String>,

    /// Page numbers that answer with an API error on every endpoint.
    pub failing_pages: HashSet<u32>,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a workspace.
    pub fn with_workspace(mut self, workspace: Value) -> Self {
        self.workspaces.push(workspace);
        self
    }

    /// Add a story.
    pub fn with_story(mut self, story: Value) -> Self {
        self.stories.push(story);
        self
    }

    /// Add a user.
    pub fn with_user(mut self, user: Value) -> Self {
        self.users.push(user);
        self
    }

    /// Add a custom field value.
    pub fn with_custom_field_value(mut self, value: Value) -> Self {
        self.custom_field_values.push(value);
        self
    }

    /// Add a post.
    pub fn with_post(mut self, post: Value) -> Self {
        self.posts.push(post);
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// Make `page` fail on every endpoint.
    pub fn with_failing_page(mut self, page: u32) -> Self {
        self.failing_pages.insert(page);
        self
    }

    /// Get a user by id.
    pub fn get_user(&self, id: &str) -> Option<&Value> {
        self.users.iter().find(|u| id_of(u) == Some(id))
    }

    /// List stories, optionally only those without a parent.
    pub fn list_stories(&self, parents_only: bool) -> Vec<&Value> {
        self.stories
            .iter()
            .filter(|s| !parents_only || is_parent(s))
            .collect()
    }

    /// List custom field values, optionally filtered by subject type.
    pub fn list_custom_field_values(&self, subject_type: Option<&str>) -> Vec<&Value> {
        self.custom_field_values
            .iter()
            .filter(|v| {
                subject_type
                    .map(|t| v.get("subject_type").and_then(Value::as_str) == Some(t))
                    .unwrap_or(true)
            })
            .collect()
    }

    /// List posts, optionally only parents and only those of one workspace.
    pub fn list_posts(&self, parents_only: bool, workspace_id: Option<&str>) -> Vec<&Value> {
        self.posts
            .iter()
            .filter(|p| !parents_only || is_parent(p))
            .filter(|p| {
                workspace_id
                    .map(|w| p.get("workspace_id").and_then(Value::as_str) == Some(w))
                    .unwrap_or(true)
            })
            .collect()
    }
}

/// The string id of a record.
pub(crate) fn id_of(record: &Value) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

fn is_parent(record: &Value) -> bool {
    record.get("parent_id").map_or(true, Value::is_null)
}
