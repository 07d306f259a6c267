/// Habit entity and related functionality
///
/// This module defines the Habit struct that represents a habit template the
/// user tracks, along with its validation rules.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::domain::{DomainError, HabitId, TargetFrequency};

/// Color assigned when the caller doesn't pick one
pub const DEFAULT_COLOR: &str = "#3B82F6";

/// Icon assigned when the caller doesn't pick one
pub const DEFAULT_ICON: &str = "🎯";

/// A habit represents something the user wants to do regularly
///
/// The id and creation time never change. Display fields can be edited, and
/// every edit refreshes `updated_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    /// Unique identifier for this habit
    pub id: HabitId,
    /// Display name (e.g., "Morning Run", "Read for 30min")
    pub name: String,
    /// Optional detailed description
    pub description: Option<String>,
    /// Hex color tag, `#RRGGBB`
    pub color: String,
    /// Icon tag (usually a single emoji)
    pub icon: String,
    /// How often this habit should be performed
    pub target_frequency: TargetFrequency,
    /// Units to complete per period
    pub target_count: u32,
    /// When this habit was created
    pub created_at: DateTime<Utc>,
    /// When this habit was last edited
    pub updated_at: DateTime<Utc>,
}

impl Habit {
    /// Create a new habit with validation
    ///
    /// Assigns a fresh id and stamps both timestamps with the current time.
    pub fn new(
        name: String,
        description: Option<String>,
        color: String,
        icon: String,
        target_frequency: TargetFrequency,
        target_count: u32,
    ) -> Result<Self, DomainError> {
        Self::validate_name(&name)?;
        Self::validate_description(&description)?;
        Self::validate_color(&color)?;
        Self::validate_icon(&icon)?;
        Self::validate_target_count(target_count)?;

        let now = Utc::now();
        Ok(Self {
            id: HabitId::new(),
            name: name.trim().to_string(),
            description,
            color,
            icon,
            target_frequency,
            target_count,
            created_at: now,
            updated_at: now,
        })
    }

    /// Create a habit from existing data (used when loading from database)
    ///
    /// This constructor assumes data is already validated.
    #[allow(clippy::too_many_arguments)]
    pub fn from_existing(
        id: HabitId,
        name: String,
        description: Option<String>,
        color: String,
        icon: String,
        target_frequency: TargetFrequency,
        target_count: u32,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            color,
            icon,
            target_frequency,
            target_count,
            created_at,
            updated_at,
        }
    }

    /// Update the habit's display fields with validation
    ///
    /// `None` leaves a field unchanged; `description: Some(None)` clears it.
    /// Nothing is applied unless every new value is valid. `updated_at` is
    /// refreshed even when no field changes.
    pub fn update(
        &mut self,
        name: Option<String>,
        description: Option<Option<String>>,
        color: Option<String>,
        icon: Option<String>,
        target_frequency: Option<TargetFrequency>,
        target_count: Option<u32>,
    ) -> Result<(), DomainError> {
        if let Some(ref new_name) = name {
            Self::validate_name(new_name)?;
        }
        if let Some(ref new_desc) = description {
            Self::validate_description(new_desc)?;
        }
        if let Some(ref new_color) = color {
            Self::validate_color(new_color)?;
        }
        if let Some(ref new_icon) = icon {
            Self::validate_icon(new_icon)?;
        }
        if let Some(new_count) = target_count {
            Self::validate_target_count(new_count)?;
        }

        if let Some(new_name) = name {
            self.name = new_name.trim().to_string();
        }
        if let Some(new_description) = description {
            self.description = new_description;
        }
        if let Some(new_color) = color {
            self.color = new_color;
        }
        if let Some(new_icon) = icon {
            self.icon = new_icon;
        }
        if let Some(new_frequency) = target_frequency {
            self.target_frequency = new_frequency;
        }
        if let Some(new_count) = target_count {
            self.target_count = new_count;
        }
        self.updated_at = Utc::now().max(self.updated_at);

        Ok(())
    }

    /// Display string for the target, e.g. "2x weekly"
    pub fn target_display(&self) -> String {
        format!("{}x {}", self.target_count, self.target_frequency)
    }

    // Validation helper methods

    fn validate_name(name: &str) -> Result<(), DomainError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be empty".to_string()
            ));
        }

        if trimmed.chars().count() > 100 {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be longer than 100 characters".to_string()
            ));
        }

        Ok(())
    }

    fn validate_description(description: &Option<String>) -> Result<(), DomainError> {
        if let Some(desc) = description {
            if desc.chars().count() > 500 {
                return Err(DomainError::Validation {
                    message: "Description cannot be longer than 500 characters".to_string()
                });
            }
        }
        Ok(())
    }

    /// Colors are `#RRGGBB` hex strings
    fn validate_color(color: &str) -> Result<(), DomainError> {
        let valid = color.len() == 7
            && color.starts_with('#')
            && color[1..].chars().all(|c| c.is_ascii_hexdigit());

        if !valid {
            return Err(DomainError::InvalidValue {
                message: format!("Color must look like #RRGGBB, got '{}'", color)
            });
        }
        Ok(())
    }

    fn validate_icon(icon: &str) -> Result<(), DomainError> {
        let trimmed = icon.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidValue {
                message: "Icon cannot be empty".to_string()
            });
        }
        if trimmed.chars().count() > 16 {
            return Err(DomainError::InvalidValue {
                message: "Icon cannot be longer than 16 characters".to_string()
            });
        }
        Ok(())
    }

    fn validate_target_count(target_count: u32) -> Result<(), DomainError> {
        if target_count == 0 {
            return Err(DomainError::InvalidValue {
                message: "Target count must be greater than 0".to_string()
            });
        }
        if target_count > 1000 {
            return Err(DomainError::InvalidValue {
                message: "Target count cannot exceed 1000".to_string()
            });
        }
        Ok(())
    }
}
