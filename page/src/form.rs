//! Pre-submit checks for the analyze form.

use std::time::Duration;

use thiserror::Error;

/// Minimum trimmed length of the job description, inclusive.
pub const MIN_DESCRIPTION_CHARS: usize = 50;

/// Pause between showing the loading modal and the native submission.
pub const SUBMIT_DELAY: Duration = Duration::from_millis(500);

/// A failed check. The display text is the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a resume file.")]
    MissingResume,

    #[error("Please enter a job description.")]
    MissingDescription,

    #[error("Job description seems too short. Please provide a more detailed description.")]
    DescriptionTooShort,
}

/// Run the checks in order and stop at the first failure.
///
/// Length is counted in characters, not bytes.
pub fn validate(has_resume: bool, job_description: &str) -> Result<(), ValidationError> {
    if !has_resume {
        return Err(ValidationError::MissingResume);
    }

    let description = job_description.trim();
    if description.is_empty() {
        return Err(ValidationError::MissingDescription);
    }

    if description.chars().count() < MIN_DESCRIPTION_CHARS {
        return Err(ValidationError::DescriptionTooShort);
    }

    Ok(())
}
