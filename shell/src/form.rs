//! Task form validation
//!
//! The store accepts whatever it is given; this is where user input gets
//! trimmed and checked before it reaches the store.

use chrono::{DateTime, NaiveDate, Utc};
use taskpad_core::task::{CreateTaskRequest, TaskPatch, TaskPriority};
use thiserror::Error;

pub const TITLE_MIN_LEN: usize = 3;
pub const TITLE_MAX_LEN: usize = 100;
pub const DESCRIPTION_MAX_LEN: usize = 500;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormError {
    #[error("Title is required")]
    TitleRequired,

    #[error("Title must be at least {} characters", TITLE_MIN_LEN)]
    TitleTooShort,

    #[error("Title must be at most {} characters", TITLE_MAX_LEN)]
    TitleTooLong,

    #[error("Description must be at most {} characters", DESCRIPTION_MAX_LEN)]
    DescriptionTooLong,

    #[error("Invalid due date '{0}' (expected YYYY-MM-DD or RFC 3339)")]
    InvalidDueDate(String),

    #[error("Invalid priority '{0}' (expected low, medium or high)")]
    InvalidPriority(String),
}

/// Raw field values as entered by the user
#[derive(Debug, Clone, Default)]
pub struct TaskForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
}

impl TaskForm {
    /// Validate for creation; the title is mandatory
    pub fn into_create_request(self) -> Result<CreateTaskRequest, FormError> {
        let title = validate_title(self.title.as_deref().unwrap_or_default())?;
        let mut request = CreateTaskRequest::new(title);

        if let Some(description) = self.description.as_deref() {
            let description = validate_description(description)?;
            if !description.is_empty() {
                request = request.with_description(description);
            }
        }

        if let Some(priority) = self.priority.as_deref() {
            request = request.with_priority(parse_priority(priority)?);
        }

        if let Some(raw) = self.due_date.as_deref() {
            if let Some(due) = parse_due_date(raw)? {
                request = request.with_due_date(due);
            }
        }

        Ok(request)
    }

    /// Validate for editing; only provided fields end up in the patch
    pub fn into_patch(self) -> Result<TaskPatch, FormError> {
        let mut patch = TaskPatch::new();

        if let Some(title) = self.title.as_deref() {
            patch = patch.title(validate_title(title)?);
        }
        if let Some(description) = self.description.as_deref() {
            patch = patch.description(validate_description(description)?);
        }
        if let Some(priority) = self.priority.as_deref() {
            patch = patch.priority(parse_priority(priority)?);
        }
        if let Some(raw) = self.due_date.as_deref() {
            patch = patch.due_date(parse_due_date(raw)?);
        }

        Ok(patch)
    }
}

fn validate_title(raw: &str) -> Result<String, FormError> {
    let title = raw.trim();
    let len = title.chars().count();
    if len == 0 {
        return Err(FormError::TitleRequired);
    }
    if len < TITLE_MIN_LEN {
        return Err(FormError::TitleTooShort);
    }
    if len > TITLE_MAX_LEN {
        return Err(FormError::TitleTooLong);
    }
    Ok(title.to_string())
}

fn validate_description(raw: &str) -> Result<String, FormError> {
    let description = raw.trim();
    if description.chars().count() > DESCRIPTION_MAX_LEN {
        return Err(FormError::DescriptionTooLong);
    }
    Ok(description.to_string())
}

fn parse_priority(raw: &str) -> Result<TaskPriority, FormError> {
    raw.parse()
        .map_err(|_| FormError::InvalidPriority(raw.to_string()))
}

/// `none` or an empty value means "no due date"
fn parse_due_date(raw: &str) -> Result<Option<DateTime<Utc>>, FormError> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("none") {
        return Ok(None);
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(Some(midnight.and_utc()));
        }
    }

    DateTime::parse_from_rfc3339(raw)
        .map(|dt| Some(dt.with_timezone(&Utc)))
        .map_err(|_| FormError::InvalidDueDate(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn form(title: &str) -> TaskForm {
        TaskForm {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_trims_title() {
        let request = form("  Buy milk  ").into_create_request().unwrap();
        assert_eq!(request.title, "Buy milk");
        assert!(request.description.is_none());
        assert!(request.priority.is_none());
        assert!(request.due_date.is_none());
    }

    #[test]
    fn test_title_rules() {
        assert_eq!(
            TaskForm::default().into_create_request().unwrap_err(),
            FormError::TitleRequired
        );
        assert_eq!(
            form("   ").into_create_request().unwrap_err(),
            FormError::TitleRequired
        );
        assert_eq!(
            form("ab").into_create_request().unwrap_err(),
            FormError::TitleTooShort
        );
        assert_eq!(
            form(&"x".repeat(TITLE_MAX_LEN + 1))
                .into_create_request()
                .unwrap_err(),
            FormError::TitleTooLong
        );
        assert!(form(&"x".repeat(TITLE_MAX_LEN)).into_create_request().is_ok());
    }

    #[test]
    fn test_description_rules() {
        let mut long = form("Task");
        long.description = Some("d".repeat(DESCRIPTION_MAX_LEN + 1));
        assert_eq!(
            long.into_create_request().unwrap_err(),
            FormError::DescriptionTooLong
        );

        let mut blank = form("Task");
        blank.description = Some("   ".to_string());
        assert!(blank.into_create_request().unwrap().description.is_none());
    }

    #[test]
    fn test_priority_and_due_date() {
        let mut input = form("Ship release");
        input.priority = Some("High".to_string());
        input.due_date = Some("2026-10-20".to_string());

        let request = input.into_create_request().unwrap();
        assert_eq!(request.priority, Some(TaskPriority::High));
        assert_eq!(
            request.due_date,
            Some(Utc.with_ymd_and_hms(2026, 10, 20, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_rfc3339_due_date() {
        let mut input = form("Ship release");
        input.due_date = Some("2026-10-20T15:30:00+02:00".to_string());
        let request = input.into_create_request().unwrap();
        assert_eq!(
            request.due_date,
            Some(Utc.with_ymd_and_hms(2026, 10, 20, 13, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_invalid_values() {
        let mut bad_priority = form("Task");
        bad_priority.priority = Some("urgent".to_string());
        assert_eq!(
            bad_priority.into_create_request().unwrap_err(),
            FormError::InvalidPriority("urgent".to_string())
        );

        let mut bad_due = form("Task");
        bad_due.due_date = Some("next week".to_string());
        assert_eq!(
            bad_due.into_create_request().unwrap_err(),
            FormError::InvalidDueDate("next week".to_string())
        );
    }

    #[test]
    fn test_patch_only_has_given_fields() {
        let patch = TaskForm {
            priority: Some("low".to_string()),
            ..Default::default()
        }
        .into_patch()
        .unwrap();

        assert_eq!(patch, TaskPatch::new().priority(TaskPriority::Low));
        assert!(TaskForm::default().into_patch().unwrap().is_empty());
    }

    #[test]
    fn test_patch_clears_due_date() {
        let patch = TaskForm {
            due_date: Some("none".to_string()),
            ..Default::default()
        }
        .into_patch()
        .unwrap();
        assert_eq!(patch.due_date, Some(None));
    }

    #[test]
    fn test_patch_validates_title() {
        let err = TaskForm {
            title: Some("  a ".to_string()),
            ..Default::default()
        }
        .into_patch()
        .unwrap_err();
        assert_eq!(err, FormError::TitleTooShort);
    }
}
