use chrono::NaiveDateTime;
use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors};

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum WindowError {
    #[error("start date must come before end date")]
    StartNotBeforeEnd,
    #[error("end date must be in the future")]
    EndNotInFuture,
}

/// Checks the availability window of a menu. Only enforced when both bounds
/// are present.
pub fn validate_window(
    start_date: Option<NaiveDateTime>,
    end_date: Option<NaiveDateTime>,
    now: NaiveDateTime,
) -> Result<(), WindowError> {
    let (Some(start_date), Some(end_date)) = (start_date, end_date) else {
        return Ok(());
    };

    if start_date >= end_date {
        return Err(WindowError::StartNotBeforeEnd);
    }

    if end_date <= now {
        return Err(WindowError::EndNotInFuture);
    }

    Ok(())
}

impl From<WindowError> for ValidationErrors {
    fn from(err: WindowError) -> Self {
        let mut errors = ValidationErrors::new();
        let (field, code) = match err {
            WindowError::StartNotBeforeEnd => ("start_date", "INVALID_START_DATE"),
            WindowError::EndNotInFuture => ("end_date", "INVALID_END_DATE"),
        };
        errors.add(
            field,
            ValidationError::new(code).with_message(Cow::from(err.to_string())),
        );
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn open_windows_are_accepted() {
        let now = Utc::now().naive_utc();

        assert_eq!(validate_window(None, None, now), Ok(()));
        assert_eq!(validate_window(Some(now - Duration::days(3)), None, now), Ok(()));
        assert_eq!(validate_window(None, Some(now - Duration::days(3)), now), Ok(()));
    }

    #[test]
    fn accepts_a_window_ending_in_the_future() {
        let now = Utc::now().naive_utc();

        assert_eq!(
            validate_window(Some(now - Duration::days(1)), Some(now + Duration::days(1)), now),
            Ok(())
        );
    }

    #[test]
    fn rejects_inverted_windows() {
        let now = Utc::now().naive_utc();

        assert_eq!(
            validate_window(Some(now + Duration::days(2)), Some(now + Duration::days(1)), now),
            Err(WindowError::StartNotBeforeEnd)
        );
    }

    #[test]
    fn rejects_windows_that_already_ended() {
        let now = Utc::now().naive_utc();

        assert_eq!(
            validate_window(Some(now - Duration::days(2)), Some(now - Duration::days(1)), now),
            Err(WindowError::EndNotInFuture)
        );
    }

    #[test]
    fn window_errors_name_the_offending_field() {
        let errors = ValidationErrors::from(WindowError::EndNotInFuture);

        assert!(errors.field_errors().contains_key("end_date"));
    }
}
