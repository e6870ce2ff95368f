//! Todo and step management.
//!
//! This module owns the todo aggregate and its nested steps: validating
//! names and descriptions, enforcing the per-todo step limit, and checking
//! that referenced todos and steps exist before mutating them. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Pure validation rules in [`validation`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod validation;

#[cfg(test)]
mod tests;
