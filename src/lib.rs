//! Mavenlink API client library.
//!
//! A Rust library for reading paginated collections from the Mavenlink
//! REST API. Mavenlink returns each page as an ordered list of result ids
//! plus dictionaries of entities keyed by id; this crate flattens those
//! into ordered vectors and embeds related records where asked.
//!
//! # Quick Start
//!
//! ```no_run
//! use mavenlink::MavenlinkApi;
//!
//! #[tokio::main]
//! async fn main() -> mavenlink::Result<()> {
//!     // Create the API from environment variables
//!     let api = MavenlinkApi::from_env()?;
//!
//!     // One page of projects, with totals for the whole collection
//!     let page = api.get_projects(1).await?;
//!     println!("{} projects on {} pages", page.meta.total_items, page.meta.total_pages);
//!
//!     // Every task, with assignees embedded
//!     let tasks = api.get_all_tasks().await?;
//!     println!("Found {} tasks", tasks.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`MavenlinkClient`] performs authenticated GET requests. It implements
//!   [`Transport`], which can be swapped for a test double.
//! - [`processor`] normalizes raw responses ([`process_result`],
//!   [`process_result_with_relation`]).
//! - [`load_all_items`] fetches page 1, then every remaining page
//!   concurrently, and concatenates them in page order.
//! - Each collection is a [`Resource`] with a fixed endpoint and query;
//!   [`MavenlinkApi`] exposes `get_*` and `get_all_*` accessors for them.
//!
//! # Configuration
//!
//! [`MavenlinkApi::new`] takes the access token directly. `from_env` reads:
//!
//! - `MAVENLINK_ACCESS_TOKEN` (required) - OAuth access token
//! - `MAVENLINK_API_URL` (optional) - Base URL (defaults to `https://api.mavenlink.com/api/v1`)

mod api;
mod client;
mod error;
mod models;
mod pagination;
pub mod processor;
mod traits;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use api::MavenlinkApi;
pub use client::MavenlinkClient;
pub use error::{MavenlinkError, Result, ShapeError};
pub use pagination::{load_all_items, load_all_items_buffered, Page, PageMeta, PER_PAGE};
pub use processor::{
    process_result, process_result_with_relation, Entity, RawResponse, Relation, ResultRef,
    SingleIdLookup,
};

// Re-export traits
pub use traits::{Query, Resource, Transport};

// Re-export resources
pub use models::{Comments, ProjectComments, ProjectCustomFields, Projects, Tasks};
