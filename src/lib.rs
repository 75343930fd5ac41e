//! # Tasklens
//!
//! A small self-hosted task triage service.
//!
//! This library provides:
//! - An HTTP API for submitting batches of free-form task descriptions
//! - A single chat-completion round trip that returns a summary,
//!   topical tags, and a 1-5 priority score per task
//! - CSV/JSON export of the processed results
//!
//! ## Task Flow
//! 1. Receive a batch of raw tasks via the API (at most 20)
//! 2. Send one chat completion enumerating the whole batch
//! 3. Parse the returned JSON array and map results onto the inputs
//!    by positional index
//! 4. Return the enriched tasks, or a structured failure - a batch
//!    either fully succeeds or fully fails
//!
//! ## Modules
//! - `api`: HTTP server and route handlers
//! - `processor`: the request/response cycle against the model
//! - `llm`: chat-completion client abstraction
//! - `session`: in-memory task list and results for the session
//! - `export`: CSV/JSON export formatting

pub mod api;
pub mod config;
pub mod export;
pub mod llm;
pub mod processor;
pub mod samples;
pub mod session;

pub use config::Config;
