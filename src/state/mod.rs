//! Application state
//!
//! [`Store`] holds the immutable snapshot and the view rendered from it.
//! [`Dashboard`] owns the store and the fetch tasks that feed it.

mod dashboard;
mod store;

pub use dashboard::{Dashboard, FetchEvent};
pub use store::{Patch, Snapshot, Store};
