//! Test suite for roomcast
//!
//! This module organizes all integration tests. Tests that need a live
//! PostgreSQL database are `#[ignore]`d; run them with
//! `DATABASE_URL=... cargo test -- --ignored`.

pub mod common;
pub mod integration;
