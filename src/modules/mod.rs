//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the hosted-backend client (PostgREST + Storage) and the
//! S3-compatible image store.

pub mod storage;
pub mod supabase;
