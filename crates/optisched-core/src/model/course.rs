use serde::{Deserialize, Serialize};

use crate::duration::round2;
use crate::error::Error;
use crate::model::color;

/// Maximum declared course duration, in decimal hours.
pub const MAX_DURATION_HOURS: f64 = 6.0;

/// Maximum section capacity (students).
pub const MAX_CAPACITY: u32 = 100;

/// The course-level fields of an edit session, before submission.
///
/// A draft is freely editable; [`CourseDraft::validate`] reports every
/// field problem at once so the whole form can be annotated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseDraft {
    pub code: String,
    pub title: String,
    pub major: String,
    pub color: String,

    /// Declared total duration in decimal hours.
    pub duration: f64,
    pub capacity: u32,
}

impl CourseDraft {
    #[must_use]
    pub fn new(code: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            major: String::new(),
            color: "blue".to_string(),
            duration: 1.0,
            capacity: 30,
        }
    }

    #[must_use]
    pub fn with_major(mut self, major: impl Into<String>) -> Self {
        self.major = major.into();
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = round2(duration);
        self
    }

    #[must_use]
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Validate every field, returning all problems rather than the first.
    pub fn validate(&self) -> Vec<Error> {
        let mut errors = Vec::new();

        let code = self.code.trim();
        if code.is_empty() {
            errors.push(Error::Validation {
                field: "code",
                message: "course code is required".to_string(),
            });
        } else if code.len() > 10 {
            errors.push(Error::Validation {
                field: "code",
                message: "course code must be at most 10 characters".to_string(),
            });
        } else if !code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '-')
        {
            errors.push(Error::Validation {
                field: "code",
                message: "course code may only contain letters, digits, spaces, and hyphens"
                    .to_string(),
            });
        }

        let title = self.title.trim();
        if title.is_empty() {
            errors.push(Error::Validation {
                field: "title",
                message: "course title is required".to_string(),
            });
        } else if title.len() > 100 {
            errors.push(Error::Validation {
                field: "title",
                message: "course title must be at most 100 characters".to_string(),
            });
        }

        if self.major.trim().is_empty() {
            errors.push(Error::Validation {
                field: "major",
                message: "a major is required".to_string(),
            });
        }

        if !color::is_valid(&self.color) {
            errors.push(Error::Validation {
                field: "color",
                message: format!("unknown color: {}", self.color),
            });
        }

        if self.duration <= 0.0 {
            errors.push(Error::Validation {
                field: "duration",
                message: "duration must be greater than zero".to_string(),
            });
        } else if self.duration > MAX_DURATION_HOURS {
            errors.push(Error::Validation {
                field: "duration",
                message: format!("duration must be at most {MAX_DURATION_HOURS} hours"),
            });
        }

        if self.capacity > MAX_CAPACITY {
            errors.push(Error::Validation {
                field: "capacity",
                message: format!("capacity must be at most {MAX_CAPACITY}"),
            });
        }

        errors
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}
