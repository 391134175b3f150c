//! Domain models.
//!
//! These are the persisted entities of the station plus the transient visit
//! plan. Enumerations shared with the API (frequency, priority, categories)
//! come from the `shared` crate.

pub mod cash;
pub mod expense;
pub mod maintenance;
pub mod notification;
pub mod pricing;
pub mod quality;
pub mod sale;
pub mod visit;

use uuid::Uuid;

/// Generate a record id in format: "<prefix>::<uuid>"
///
/// Ids are generated client-side so a retried insert carries the same id.
pub fn generate_id(prefix: &str) -> String {
    format!("{}::{}", prefix, Uuid::new_v4().simple())
}
