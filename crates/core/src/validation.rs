//! Input validation utilities.
//!
//! This module contains the range checks applied to intake fields before the pipeline runs.
//! Failures here are client-side input errors; the pipeline is never invoked for them.

use crate::constants::MAX_SYMPTOMS_TEXT_CHARS;
use crate::intake::Vitals;
use crate::{CoreError, CoreResult};

/// Validates the length of the free-text symptom description.
///
/// # Errors
///
/// Returns a `CoreError::InvalidInput` if the text is longer than `MAX_SYMPTOMS_TEXT_CHARS`.
pub fn validate_symptoms_text_len(text: &str) -> CoreResult<()> {
    let chars = text.chars().count();
    if chars > MAX_SYMPTOMS_TEXT_CHARS {
        return Err(CoreError::InvalidInput(format!(
            "symptoms_text must be at most {MAX_SYMPTOMS_TEXT_CHARS} characters, got {chars}"
        )));
    }
    Ok(())
}

/// Validates an optional symptom duration.
///
/// # Errors
///
/// Returns a `CoreError::InvalidInput` if the duration is negative or not finite.
pub fn validate_duration_hours(duration_hours: Option<f64>) -> CoreResult<()> {
    match duration_hours {
        Some(hours) if !hours.is_finite() || hours < 0.0 => Err(CoreError::InvalidInput(
            format!("duration_hours must be a non-negative number, got {hours}"),
        )),
        _ => Ok(()),
    }
}

/// Validates measured vitals.
///
/// Only present readings are checked; absent readings are always valid.
///
/// # Errors
///
/// Returns a `CoreError::InvalidInput` if:
/// - `temp_c` is negative or not finite,
/// - `spo2` exceeds 100.
pub fn validate_vitals(vitals: &Vitals) -> CoreResult<()> {
    if let Some(temp_c) = vitals.temp_c {
        if !temp_c.is_finite() || temp_c < 0.0 {
            return Err(CoreError::InvalidInput(format!(
                "vitals.temp_c must be a non-negative number, got {temp_c}"
            )));
        }
    }

    if let Some(spo2) = vitals.spo2 {
        if spo2 > 100 {
            return Err(CoreError::InvalidInput(format!(
                "vitals.spo2 must be between 0 and 100, got {spo2}"
            )));
        }
    }

    Ok(())
}
