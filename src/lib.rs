//! Todo service: a REST API for todos and their ordered steps.
//!
//! The interesting part is the consistency layer in front of the store:
//! name and description rules, a cap of ten steps per todo, and checks that
//! updated steps belong to the todo they are addressed through.
//!
//! # Architecture
//!
//! - [`todo`]: domain, validation, repository port, adapters and service
//! - [`http`]: axum router and JSON boundary
//! - [`config`]: command-line configuration for the server binary
//! - [`telemetry`]: tracing subscriber set-up

pub mod config;
pub mod http;
pub mod telemetry;
pub mod todo;
