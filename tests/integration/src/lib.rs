//! Integration test support for the murmur API.
//!
//! Tests spin up the real Axum application in-process against a live
//! PostgreSQL and Redis, so they are gated on `DATABASE_URL`/`REDIS_URL`
//! being set and silently skip otherwise.

pub mod fixtures;
pub mod helpers;

pub use helpers::{assert_json, assert_status, check_test_env, TestServer};
