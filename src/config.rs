use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RationError, Result};
use crate::models::{Goal, Macro};
use crate::planner::constants::*;

/// Weights of the two externally computed ranking signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub similarity_weight: f64,
    pub popularity_weight: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            similarity_weight: SIMILARITY_WEIGHT,
            popularity_weight: POPULARITY_WEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalMultipliers {
    pub lose: f64,
    pub maintain: f64,
    pub gain: f64,
}

impl Default for GoalMultipliers {
    fn default() -> Self {
        Self {
            lose: GOAL_LOSE_MULT,
            maintain: GOAL_MAINTAIN_MULT,
            gain: GOAL_GAIN_MULT,
        }
    }
}

impl GoalMultipliers {
    pub fn for_goal(&self, goal: Goal) -> f64 {
        match goal {
            Goal::Lose => self.lose,
            Goal::Maintain => self.maintain,
            Goal::Gain => self.gain,
        }
    }
}

/// Calorie share per macro. Shares must sum to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacroSplit {
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

impl Default for MacroSplit {
    fn default() -> Self {
        Self {
            protein: PROTEIN_CALORIE_SHARE,
            fat: FAT_CALORIE_SHARE,
            carbs: CARBS_CALORIE_SHARE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub activity_factor: f64,
    pub goal_multipliers: GoalMultipliers,
    pub macro_split: MacroSplit,
    pub kcal_per_g_protein: f64,
    pub kcal_per_g_fat: f64,
    pub kcal_per_g_carbs: f64,
    pub days_per_week: f64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            activity_factor: ACTIVITY_FACTOR,
            goal_multipliers: GoalMultipliers::default(),
            macro_split: MacroSplit::default(),
            kcal_per_g_protein: KCAL_PER_G_PROTEIN,
            kcal_per_g_fat: KCAL_PER_G_FAT,
            kcal_per_g_carbs: KCAL_PER_G_CARBS,
            days_per_week: DAYS_PER_WEEK,
        }
    }
}

/// Food categories a macro is drawn from.
///
/// `main_ratio` of the group's target goes to `main`, the rest to `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroGroup {
    pub nutrient: Macro,
    pub main: Vec<String>,
    #[serde(default)]
    pub extra: Vec<String>,
    pub main_ratio: f64,
}

impl MacroGroup {
    fn from_labels(nutrient: Macro, main: &[&str], extra: &[&str], main_ratio: f64) -> Self {
        Self {
            nutrient,
            main: main.iter().map(|s| s.to_string()).collect(),
            extra: extra.iter().map(|s| s.to_string()).collect(),
            main_ratio,
        }
    }

    /// Every category label the group draws from.
    pub fn categories(&self) -> impl Iterator<Item = &String> {
        self.main.iter().chain(self.extra.iter())
    }
}

/// Default groups, processed in order: protein, carbs, fat.
pub fn default_groups() -> Vec<MacroGroup> {
    vec![
        MacroGroup::from_labels(
            Macro::Protein,
            PROTEIN_MAIN_CATEGORIES,
            PROTEIN_EXTRA_CATEGORIES,
            MAIN_CATEGORY_SHARE,
        ),
        MacroGroup::from_labels(
            Macro::Carbs,
            CARBS_MAIN_CATEGORIES,
            CARBS_EXTRA_CATEGORIES,
            MAIN_CATEGORY_SHARE,
        ),
        MacroGroup::from_labels(Macro::Fat, FAT_MAIN_CATEGORIES, &[], 1.0),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationConfig {
    pub min_macro_content: f64,
    pub serving_step: u32,
    pub min_serving: u32,
    pub max_serving: u32,
    pub budget_slack: f64,
    pub calorie_slack: f64,
    pub groups: Vec<MacroGroup>,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            min_macro_content: MIN_MACRO_CONTENT,
            serving_step: SERVING_STEP_G,
            min_serving: MIN_SERVING_G,
            max_serving: MAX_SERVING_G,
            budget_slack: BUDGET_SLACK,
            calorie_slack: CALORIE_SLACK,
            groups: default_groups(),
        }
    }
}

/// All tunable planner policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub scoring: ScoringConfig,
    pub targets: TargetConfig,
    pub allocation: AllocationConfig,
    pub candidate_limit: usize,
    pub recommend_limit: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            targets: TargetConfig::default(),
            allocation: AllocationConfig::default(),
            candidate_limit: CANDIDATE_LIMIT,
            recommend_limit: RECOMMEND_LIMIT,
        }
    }
}

impl PlannerConfig {
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(RationError::InvalidConfig(msg));

        if self.scoring.similarity_weight < 0.0 || self.scoring.popularity_weight < 0.0 {
            return invalid("score weights must be non-negative".to_string());
        }

        let split = &self.targets.macro_split;
        let share_sum = split.protein + split.fat + split.carbs;
        if (share_sum - 1.0).abs() > 1e-6 {
            return invalid(format!("macro split must sum to 1, got {share_sum}"));
        }
        if self.targets.days_per_week <= 0.0 {
            return invalid("days_per_week must be positive".to_string());
        }

        let alloc = &self.allocation;
        if alloc.serving_step == 0 {
            return invalid("serving_step must be positive".to_string());
        }
        if alloc.min_serving > alloc.max_serving {
            return invalid(format!(
                "min_serving {} exceeds max_serving {}",
                alloc.min_serving, alloc.max_serving
            ));
        }
        if alloc.budget_slack < 1.0 || alloc.calorie_slack < 1.0 {
            return invalid("slack factors must be at least 1".to_string());
        }
        if alloc.groups.is_empty() {
            return invalid("at least one allocation group is required".to_string());
        }
        for group in &alloc.groups {
            if !(0.0..=1.0).contains(&group.main_ratio) {
                return invalid(format!(
                    "main_ratio for {} must be within [0, 1], got {}",
                    group.nutrient, group.main_ratio
                ));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = RationError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(RationError::InvalidConfig(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Compact,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub planner: PlannerConfig,
    pub logging: LoggingConfig,
}

pub const DEFAULT_CONFIG_FILE: &str = "ration.toml";

impl AppConfig {
    /// Load config: file (if any), then `RATION_*` environment overrides.
    ///
    /// A missing file is only an error when `required` is set.
    pub fn load(path: &Path, required: bool) -> Result<Self> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path)?;
            Self::from_toml(&content)?
        } else if required {
            return Err(RationError::InvalidConfig(format!(
                "config file not found: {}",
                path.display()
            )));
        } else {
            Self::default()
        };

        config.apply_env_overrides()?;
        config.planner.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(value) = read_env("RATION_LOG_LEVEL") {
            self.logging.level = value;
        }
        if let Some(value) = read_env("RATION_LOG_FORMAT") {
            self.logging.format = value.parse()?;
        }
        if let Some(value) = read_env("RATION_CANDIDATE_LIMIT") {
            self.planner.candidate_limit = value.parse().map_err(|_| {
                RationError::InvalidConfig(format!(
                    "invalid RATION_CANDIDATE_LIMIT `{value}`"
                ))
            })?;
        }
        Ok(())
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
