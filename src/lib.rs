//! Herochat is a line-oriented terminal client for a remote LLM inference
//! endpoint with a tagged, append-only conversation log.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core::history`] owns the durable record store: load, append, rewrite.
//! - [`core::context`] rebuilds the tag-scoped message list replayed with
//!   each multi-turn request.
//! - [`core::stream`] decodes the incremental SSE-style response into one
//!   final text, tolerating malformed frames.
//! - [`core::client`] composes context into a request and drives the stream.
//! - [`core::navigator`] is the cursor state machine behind `navigate`.
//! - [`api`] defines the wire payloads; [`cli`] parses arguments and routes
//!   into the commands.
//!
//! The binary entrypoint (`src/main.rs`) routes through [`crate::cli::main`].

pub mod api;
pub mod cli;
pub mod core;
pub mod utils;
