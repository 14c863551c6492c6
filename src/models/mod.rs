//! Mavenlink resources and their accessors.

mod comment;
mod custom_field;
mod project;
mod task;

pub use comment::*;
pub use custom_field::*;
pub use project::*;
pub use task::*;
