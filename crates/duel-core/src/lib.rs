//! Core types and trait definitions for the duel pairwise ranker.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The storage backend and the web layer both depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod bootstrap;
pub mod engine;
pub mod error;
pub mod item;
pub mod snapshot;
pub mod store;

pub use engine::{RankingEngine, RoundState, StartupReport};
pub use error::{Error, Result};
