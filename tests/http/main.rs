//! HTTP transport integration tests.
//!
//! Starts an axum server over an in-memory store and exercises it with reqwest.

#![cfg(feature = "http")]

mod support;
