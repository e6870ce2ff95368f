//! Individual validation rule implementations.
//!
//! Each rule returns `Ok(())` on success or the first [`ValidationError`]
//! it detects.

use crate::todo::domain::{NewStep, ValidationError};

/// Longest accepted name, in characters.
pub const MAX_NAME_LENGTH: usize = 100;

/// Descriptions must be strictly shorter than this many characters.
pub const DESCRIPTION_LENGTH_LIMIT: usize = 3000;

/// Largest number of steps a single todo may hold.
pub const MAX_STEPS_PER_TODO: usize = 10;

/// Validates a todo or step name together with its description.
///
/// Checks run in order: blank name, name length, name characters, then
/// description length.
///
/// # Errors
///
/// Returns [`ValidationError::BlankName`] for an empty or whitespace-only
/// name, [`ValidationError::NameTooLong`] when it exceeds
/// [`MAX_NAME_LENGTH`], [`ValidationError::InvalidNameCharacters`] when it
/// contains anything outside `[a-zA-Z0-9 ]`, and
/// [`ValidationError::DescriptionTooLong`] when the description has
/// [`DESCRIPTION_LENGTH_LIMIT`] or more characters.
pub fn validate_name_and_description(name: &str, description: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::BlankName);
    }

    let name_length = name.chars().count();
    if name_length > MAX_NAME_LENGTH {
        return Err(ValidationError::NameTooLong {
            length: name_length,
            max: MAX_NAME_LENGTH,
        });
    }

    let is_valid = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == ' ');
    if !is_valid {
        return Err(ValidationError::InvalidNameCharacters(name.to_owned()));
    }

    let description_length = description.chars().count();
    if description_length >= DESCRIPTION_LENGTH_LIMIT {
        return Err(ValidationError::DescriptionTooLong {
            length: description_length,
            limit: DESCRIPTION_LENGTH_LIMIT,
        });
    }

    Ok(())
}

/// Validates every step of a batch.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidStep`] wrapping the rejection of the
/// first invalid step.
pub fn validate_steps(steps: &[NewStep]) -> Result<(), ValidationError> {
    for (index, step) in steps.iter().enumerate() {
        validate_name_and_description(step.name(), step.description()).map_err(|reason| {
            ValidationError::InvalidStep {
                index,
                reason: Box::new(reason),
            }
        })?;
    }
    Ok(())
}

/// Checks that `incoming` more steps fit next to `existing` ones.
///
/// # Errors
///
/// Returns [`ValidationError::TooManySteps`] when the sum exceeds
/// [`MAX_STEPS_PER_TODO`].
pub fn ensure_capacity(existing: usize, incoming: usize) -> Result<(), ValidationError> {
    if existing.saturating_add(incoming) > MAX_STEPS_PER_TODO {
        return Err(ValidationError::TooManySteps {
            existing,
            incoming,
            max: MAX_STEPS_PER_TODO,
        });
    }
    Ok(())
}
