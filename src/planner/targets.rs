use serde::Serialize;

use crate::config::TargetConfig;
use crate::models::{Nutrients, Sex, UserProfile};

/// Basal metabolic rate (Mifflin-St Jeor), kcal/day.
///
/// Only `Sex::Male` takes the male constant; everything else uses the
/// female branch.
pub fn basal_metabolic_rate(profile: &UserProfile) -> f64 {
    let base = 10.0 * profile.weight_kg + 6.25 * profile.height_cm - 5.0 * profile.age as f64;
    match profile.sex {
        Sex::Male => base + 5.0,
        Sex::Female | Sex::Unspecified => base - 161.0,
    }
}

/// Calorie, macro and budget targets for some span of the day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionTargets {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub budget: f64,
}

impl NutritionTargets {
    /// Daily targets derived from the profile.
    pub fn daily(profile: &UserProfile, config: &TargetConfig) -> Self {
        let bmr = basal_metabolic_rate(profile);
        let goal_mult = config.goal_multipliers.for_goal(profile.goal);
        let calories = bmr * config.activity_factor * goal_mult;

        let split = &config.macro_split;
        Self {
            calories,
            protein: calories * split.protein / config.kcal_per_g_protein,
            fat: calories * split.fat / config.kcal_per_g_fat,
            carbs: calories * split.carbs / config.kcal_per_g_carbs,
            budget: profile.budget_per_week / config.days_per_week,
        }
    }

    /// Equal share of these targets for one of `meals` meals.
    pub fn per_meal(&self, meals: usize) -> Self {
        let n = meals.max(1) as f64;
        Self {
            calories: self.calories / n,
            protein: self.protein / n,
            fat: self.fat / n,
            carbs: self.carbs / n,
            budget: self.budget / n,
        }
    }

    /// Targets as an initial "remaining" balance for the allocator.
    pub fn as_remaining(&self) -> Nutrients {
        Nutrients {
            price: self.budget,
            calories: self.calories,
            protein: self.protein,
            fat: self.fat,
            carbs: self.carbs,
        }
    }
}
