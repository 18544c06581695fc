//! HTTP API tests

pub mod auth_test;
pub mod chat_test;
