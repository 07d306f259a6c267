/// Core types and enums used throughout the domain layer
///
/// This module defines the identifier newtypes and the TargetFrequency enum
/// that are used by Habit, CompletionRecord, and the storage layer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// Unique identifier for a habit
///
/// This is a wrapper around UUID to provide type safety - you can't accidentally
/// pass a habit ID where a record ID is expected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HabitId(pub Uuid);

impl HabitId {
    /// Generate a new random habit ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a habit ID from a string (useful for database loading)
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s.trim())?))
    }
}

impl Default for HabitId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique identifier for a completion record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub Uuid);

impl RecordId {
    /// Generate a new random record ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a record ID from a string
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s.trim())?))
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// How often a habit is meant to be performed
///
/// Statistics are always computed per calendar day; the frequency is carried
/// for display and for clients that want to interpret `target_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetFrequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Annually,
}

impl TargetFrequency {
    /// All supported frequencies, in display order
    pub const ALL: [TargetFrequency; 5] = [
        TargetFrequency::Daily,
        TargetFrequency::Weekly,
        TargetFrequency::Monthly,
        TargetFrequency::Quarterly,
        TargetFrequency::Annually,
    ];

    /// Stable lower-case name, also used as the database value
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetFrequency::Daily => "daily",
            TargetFrequency::Weekly => "weekly",
            TargetFrequency::Monthly => "monthly",
            TargetFrequency::Quarterly => "quarterly",
            TargetFrequency::Annually => "annually",
        }
    }
}

impl fmt::Display for TargetFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetFrequency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|freq| freq.as_str() == wanted)
            .ok_or_else(|| {
                DomainError::InvalidFrequency(format!(
                    "'{}'. Valid options: daily, weekly, monthly, quarterly, annually",
                    s
                ))
            })
    }
}
