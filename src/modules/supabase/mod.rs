//! Hosted backend client
//!
//! A single [`SupabaseClient`] is built at startup from the endpoint URL and
//! the public API key and shared by every repository and the storage adapter.

mod client;
mod postgrest;

pub use client::SupabaseClient;
pub use postgrest::{PostgrestQuery, PostgrestTable};
