//! Learning System
//!
//! Typed access to a learning-notes database hosted behind a PostgREST
//! (Supabase) endpoint.
//!
//! # Features
//!
//! - Three record kinds: learning resources, observations and takeaways
//! - Create, list, filter and single-row lookup per kind
//! - Resolution of a takeaway's referenced observations and resources
//! - Mockable remote boundary ([`traits::RemoteStoreTrait`])
//!
//! Every operation is a direct request to the remote service; nothing is
//! cached and nothing is retried.
//!
//! # Quick Start
//!
//! ```bash
//! SUPABASE_URL=https://<project>.supabase.co SUPABASE_ANON_KEY=xxx ./learning-demo
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐     ┌──────────────────┐     ┌────────────────┐
//! │ LearningSystemClient │────▶│ Resources /      │────▶│ PostgrestClient│──▶ /rest/v1/{table}
//! │       (facade)       │     │ Observations /   │     │ (RemoteStore)  │
//! └──────────────────────┘     │ Takeaways APIs   │     └────────────────┘
//!                              └──────────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod postgrest;
pub mod traits;

#[cfg(test)]
mod test_utils;

pub use client::LearningSystemClient;
pub use config::Config;
pub use error::{AppError, ConfigError, RemoteError};
pub use models::{
    NewObservation, NewResource, NewTakeaway, Observation, Resource, ResourceType, Takeaway,
    TakeawayWithRelations,
};
pub use postgrest::{PostgrestClient, Query};
