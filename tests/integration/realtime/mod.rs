//! Relay socket tests over a real listener

pub mod relay_test;
