#[macro_use]
extern crate assert_float_eq;

use std::collections::BTreeSet;

use daily_ration_rs::config::TargetConfig;
use daily_ration_rs::models::{Goal, Sex, UserProfile};
use daily_ration_rs::planner::{ACTIVITY_FACTOR, NutritionTargets, basal_metabolic_rate};

fn make_profile(sex: Sex, goal: Goal, budget: f64) -> UserProfile {
    UserProfile {
        id: "u1".to_string(),
        name: "Test".to_string(),
        sex,
        age: 30,
        weight_kg: 80.0,
        height_cm: 180.0,
        goal,
        budget_per_week: budget,
        is_vegan: false,
        restrictions: BTreeSet::new(),
    }
}

#[test]
fn test_male_maintain_targets() {
    let profile = make_profile(Sex::Male, Goal::Maintain, 700.0);
    let daily = NutritionTargets::daily(&profile, &TargetConfig::default());

    // 10*80 + 6.25*180 - 5*30 + 5
    assert_float_absolute_eq!(basal_metabolic_rate(&profile), 1780.0, 1e-9);
    assert_float_absolute_eq!(daily.calories, 1780.0 * ACTIVITY_FACTOR, 1e-9);
    assert_float_absolute_eq!(daily.calories, 2447.5, 1e-9);
    assert_float_absolute_eq!(daily.protein, 2447.5 * 0.3 / 4.0, 1e-9);
    assert_float_absolute_eq!(daily.fat, 2447.5 * 0.3 / 9.0, 1e-9);
    assert_float_absolute_eq!(daily.carbs, 2447.5 * 0.4 / 4.0, 1e-9);
    assert_float_absolute_eq!(daily.budget, 100.0, 1e-9);
}

#[test]
fn test_unknown_goal_label_means_maintain() {
    let json = r#"{"id": "u9", "sex": "female", "age": 30, "weightKg": 80,
                   "heightCm": 180, "goal": "recomposition", "budgetPerWeek": 350}"#;
    let profile: UserProfile = serde_json::from_str(json).unwrap();
    let maintain = make_profile(Sex::Female, Goal::Maintain, 350.0);

    let config = TargetConfig::default();
    assert_eq!(
        NutritionTargets::daily(&profile, &config),
        NutritionTargets::daily(&maintain, &config)
    );
}

#[test]
fn test_unrecognised_sex_uses_female_formula() {
    let json = r#"{"id": "u3", "sex": "nonbinary", "age": 30, "weightKg": 80,
                   "heightCm": 180, "budgetPerWeek": 0}"#;
    let profile: UserProfile = serde_json::from_str(json).unwrap();
    assert_eq!(profile.sex, Sex::Unspecified);
    assert_float_absolute_eq!(basal_metabolic_rate(&profile), 1614.0, 1e-9);
}

#[test]
fn test_per_meal_is_equal_thirds() {
    let daily = NutritionTargets::daily(
        &make_profile(Sex::Female, Goal::Lose, 420.0),
        &TargetConfig::default(),
    );
    let meal = daily.per_meal(3);

    assert_float_absolute_eq!(meal.calories * 3.0, daily.calories, 1e-9);
    assert_float_absolute_eq!(meal.fat * 3.0, daily.fat, 1e-9);
    assert_float_absolute_eq!(meal.budget, 20.0, 1e-9);
}

#[test]
fn test_custom_activity_factor() {
    let profile = make_profile(Sex::Male, Goal::Gain, 700.0);
    let config = TargetConfig {
        activity_factor: 1.55,
        ..Default::default()
    };
    let daily = NutritionTargets::daily(&profile, &config);
    assert_float_absolute_eq!(daily.calories, 1780.0 * 1.55 * 1.15, 1e-9);
}
