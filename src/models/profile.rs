use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RationError, Result};

/// Biological sex as used by the basal metabolic rate formula.
///
/// Anything other than "male" or "female" parses to `Unspecified`, which the
/// target calculator handles with the female branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sex {
    Male,
    Female,
    Unspecified,
}

impl From<String> for Sex {
    fn from(value: String) -> Self {
        value.as_str().into()
    }
}

impl From<&str> for Sex {
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "male" | "m" => Sex::Male,
            "female" | "f" => Sex::Female,
            _ => Sex::Unspecified,
        }
    }
}

impl From<Sex> for String {
    fn from(sex: Sex) -> Self {
        sex.to_string()
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Sex::Male => "male",
            Sex::Female => "female",
            Sex::Unspecified => "unspecified",
        };
        f.write_str(label)
    }
}

/// Weight goal. Unknown labels fall back to `Maintain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Goal {
    Lose,
    #[default]
    Maintain,
    Gain,
}

impl From<String> for Goal {
    fn from(value: String) -> Self {
        value.as_str().into()
    }
}

impl From<&str> for Goal {
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "lose" | "lose weight" => Goal::Lose,
            "gain" | "gain weight" => Goal::Gain,
            _ => Goal::Maintain,
        }
    }
}

impl From<Goal> for String {
    fn from(goal: Goal) -> Self {
        goal.to_string()
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Goal::Lose => "lose",
            Goal::Maintain => "maintain",
            Goal::Gain => "gain",
        };
        f.write_str(label)
    }
}

/// Physiological and dietary profile of a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,

    #[serde(default)]
    pub name: String,

    pub sex: Sex,

    pub age: u32,

    pub weight_kg: f64,

    pub height_cm: f64,

    #[serde(default)]
    pub goal: Goal,

    pub budget_per_week: f64,

    #[serde(default)]
    pub is_vegan: bool,

    #[serde(default)]
    pub restrictions: BTreeSet<String>,
}

impl UserProfile {
    /// Check the numeric ranges the target calculator relies on.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(RationError::InvalidInput("profile id is empty".to_string()));
        }
        if !(self.weight_kg > 0.0) {
            return Err(RationError::InvalidInput(format!(
                "weight must be positive, got {}",
                self.weight_kg
            )));
        }
        if !(self.height_cm > 0.0) {
            return Err(RationError::InvalidInput(format!(
                "height must be positive, got {}",
                self.height_cm
            )));
        }
        if !(self.budget_per_week >= 0.0) {
            return Err(RationError::InvalidInput(format!(
                "weekly budget must be non-negative, got {}",
                self.budget_per_week
            )));
        }
        Ok(())
    }
}
