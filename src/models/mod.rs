//! Record types for the three remote tables.
//!
//! Each record kind comes in two shapes:
//! - an insert payload ([`NewResource`], [`NewObservation`], [`NewTakeaway`])
//!   that never carries server-assigned fields and omits absent optionals
//! - a stored row ([`Resource`], [`Observation`], [`Takeaway`]) as returned
//!   by the service, with `id` and timestamp populated
//!
//! [`TakeawayWithRelations`] is a takeaway with its referenced observations
//! and resources resolved.

mod observation;
mod resource;
mod takeaway;
mod wire;

pub use observation::{NewObservation, Observation};
pub use resource::{NewResource, ParseResourceTypeError, Resource, ResourceType};
pub use takeaway::{NewTakeaway, Takeaway, TakeawayWithRelations};

/// Table holding learning resources.
pub const RESOURCES_TABLE: &str = "learning_resources";
/// Table holding observations.
pub const OBSERVATIONS_TABLE: &str = "observations";
/// Table holding takeaways.
pub const TAKEAWAYS_TABLE: &str = "takeaways";
