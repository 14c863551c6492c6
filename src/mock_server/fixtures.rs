//! Test data fixtures for the mock server.
//!
//! Provides factory functions for Mavenlink-shaped records.

use serde_json::{json, Value};

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // Workspace Fixtures
    // =========================================================================

    /// Create a workspace (project).
    pub fn workspace(id: &str, title: &str) -> Value {
        json!({
            "id": id,
            "title": title,
            "archived": false,
            "budgeted": true,
        })
    }

    /// Create `count` workspaces with ids `1..=count`.
    pub fn many_workspaces(count: usize) -> Vec<Value> {
        (1..=count)
            .map(|n| Self::workspace(&n.to_string(), &format!("Workspace {n}")))
            .collect()
    }

    // =========================================================================
    // Story Fixtures
    // =========================================================================

    /// Create a top-level story assigned to `assignee_ids`.
    pub fn story(id: &str, workspace_id: &str, title: &str, assignee_ids: &[&str]) -> Value {
        json!({
            "id": id,
            "workspace_id": workspace_id,
            "title": title,
            "story_type": "task",
            "parent_id": null,
            "assignee_ids": assignee_ids,
        })
    }

    /// Create a subtask of `parent_id`.
    pub fn subtask(id: &str, workspace_id: &str, parent_id: &str, title: &str) -> Value {
        json!({
            "id": id,
            "workspace_id": workspace_id,
            "title": title,
            "story_type": "task",
            "parent_id": parent_id,
            "assignee_ids": [],
        })
    }

    // =========================================================================
    // User Fixtures
    // =========================================================================

    /// Create a user.
    pub fn user(id: &str, full_name: &str) -> Value {
        json!({
            "id": id,
            "full_name": full_name,
            "email_address": format!("{}@example.com", full_name.to_lowercase().replace(' ', ".")),
        })
    }

    // =========================================================================
    // Custom Field Fixtures
    // =========================================================================

    /// Create a custom field value on a workspace.
    pub fn workspace_custom_field(id: &str, workspace_id: &str, name: &str, value: &str) -> Value {
        json!({
            "id": id,
            "subject_type": "Workspace",
            "subject_id": workspace_id,
            "custom_field_name": name,
            "display_value": value,
        })
    }

    /// Create a custom field value on a story.
    pub fn story_custom_field(id: &str, story_id: &str, name: &str, value: &str) -> Value {
        json!({
            "id": id,
            "subject_type": "Story",
            "subject_id": story_id,
            "custom_field_name": name,
            "display_value": value,
        })
    }

    // =========================================================================
    // Post Fixtures
    // =========================================================================

    /// Create a top-level post in a workspace.
    pub fn post(id: &str, workspace_id: &str, message: &str) -> Value {
        json!({
            "id": id,
            "workspace_id": workspace_id,
            "message": message,
            "parent_id": null,
        })
    }

    /// Create a reply to `parent_id`.
    pub fn reply(id: &str, workspace_id: &str, parent_id: &str, message: &str) -> Value {
        json!({
            "id": id,
            "workspace_id": workspace_id,
            "message": message,
            "parent_id": parent_id,
        })
    }

    // =========================================================================
    // Scenario Builders
    // =========================================================================

    /// Create a default set of test data for common scenarios.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario::new()
    }
}

/// A complete test scenario with related entities.
pub struct DefaultScenario {
    pub workspaces: Vec<Value>,
    pub users: Vec<Value>,
    pub stories: Vec<Value>,
    pub custom_field_values: Vec<Value>,
    pub posts: Vec<Value>,
}

impl DefaultScenario {
    fn new() -> Self {
        let workspaces = vec![
            Fixtures::workspace("100", "Website Relaunch"),
            Fixtures::workspace("200", "Mobile App"),
        ];

        let users = vec![
            Fixtures::user("u1", "Ada Lovelace"),
            Fixtures::user("u2", "Grace Hopper"),
        ];

        let stories = vec![
            Fixtures::story("s1", "100", "Design homepage", &["u1", "u2"]),
            Fixtures::story("s2", "100", "Write copy", &[]),
            Fixtures::subtask("s3", "100", "s1", "Pick fonts"),
            Fixtures::story("s4", "200", "Release build", &["u2"]),
        ];

        let custom_field_values = vec![
            Fixtures::workspace_custom_field("c1", "100", "sfid", "0061a000001"),
            Fixtures::workspace_custom_field("c2", "200", "sfid", "0061a000002"),
            Fixtures::story_custom_field("c3", "s1", "estimate", "3"),
        ];

        let posts = vec![
            Fixtures::post("p1", "100", "Kickoff notes"),
            Fixtures::reply("p2", "100", "p1", "Thanks!"),
            Fixtures::post("p3", "200", "Store listing drafted"),
            Fixtures::post("p4", "100", "Homepage mockups attached"),
        ];

        Self {
            workspaces,
            users,
            stories,
            custom_field_values,
            posts,
        }
    }
}
