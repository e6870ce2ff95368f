//! Validation rules for todo and step mutations.
//!
//! Rules are pure functions with no access to storage. The service layer
//! resolves whatever state a rule needs (such as the current step count)
//! and passes it in.

mod rules;

pub use rules::{
    DESCRIPTION_LENGTH_LIMIT, MAX_NAME_LENGTH, MAX_STEPS_PER_TODO, ensure_capacity,
    validate_name_and_description, validate_steps,
};
