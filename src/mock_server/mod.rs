//! Mock Mavenlink API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the
//! Mavenlink API for integration and end-to-end testing. Unlike wiremock,
//! which mocks at the HTTP level per-test, this server paginates, filters
//! and side-loads real records, so multi-page workflows can be exercised
//! end to end.
//!
//! # Example
//!
//! ```ignore
//! use mavenlink::mock_server::MockServer;
//! use mavenlink::{MavenlinkApi, MavenlinkClient};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = MavenlinkClient::with_base_url("test-token", server.url()).unwrap();
//!     let api = MavenlinkApi::with_transport(client);
//!
//!     // Server comes with default fixtures
//!     let tasks = api.get_all_tasks().await.unwrap();
//!     assert_eq!(tasks[0]["title"], "Design homepage");
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::Fixtures;
pub use server::MockServer;
pub use state::MockState;
