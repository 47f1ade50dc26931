//! HTTP API server for Treeline.
//!
//! Exposes the seed loader and the fetch orchestrator over HTTP.
//!
//! # Modules
//!
//! - [`state`]: shared handler state
//! - [`handlers`]: request handlers
//! - [`router`]: route table and middleware
//! - [`server`]: listener and graceful shutdown

#![doc = include_str!("../README.md")]

pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

pub use router::router;
pub use server::{serve, serve_on};
pub use state::ApiState;
