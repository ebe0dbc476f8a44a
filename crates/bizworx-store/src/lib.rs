//! `bizworx-store` — SQLite-backed job/business store.
//!
//! # Overview
//!
//! Businesses and their jobs are persisted to SQLite. Each business is an
//! independent scheduling domain: jobs never cross businesses, and every
//! query here is scoped to a single `business_id`.
//!
//! Timestamps are UTC and stored as RFC 3339 text, so lexicographic
//! comparison in SQL matches chronological ordering.

pub mod db;
pub mod error;
pub mod store;
pub mod types;

pub use error::{Result, StoreError};
pub use store::JobStore;
pub use types::{Business, Job, JobPatch, JobStatus};
