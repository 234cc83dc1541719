//! Typed access to the hosted backend: GoTrue auth and PostgREST tables.
//!
//! The server only talks to the [`Store`] trait; [`SupabaseStore`] is the
//! real backend and [`MemoryStore`] keeps everything in process.

pub use auth::{AuthUser, Session, SignedUp};
pub use client::SupabaseClient;
pub use error::{BaasError, Result};
pub use memory::MemoryStore;
pub use query::Query;
pub use store::{ProfileUpdate, Registered, Store, SupabaseStore};

mod auth;
mod client;
mod error;
mod memory;
mod query;
mod store;
pub mod tables;
