//! Trait definitions for Mavenlink operations.
//!
//! [`Transport`] is the seam between resource logic and HTTP;
//! [`Resource`] describes one paginated collection.

mod resource;
mod transport;

pub use resource::Resource;
pub use transport::{Query, Transport};
