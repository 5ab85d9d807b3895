use tracing::info;

use crate::config::{PlannerConfig, ScoringConfig};
use crate::models::{Candidate, DailyPlan, MealSlot, UserProfile};
use crate::planner::allocator::{UsedProducts, allocate_meal};
use crate::planner::eligibility::filter_eligible;
use crate::planner::ranking::{RankedCandidate, rank_candidates};
use crate::planner::targets::NutritionTargets;

/// Top-`limit` eligible candidates for the user, best first.
pub fn recommend<'a>(
    profile: &UserProfile,
    candidates: &'a [Candidate],
    limit: usize,
    scoring: &ScoringConfig,
) -> Vec<RankedCandidate<'a>> {
    let eligible = filter_eligible(candidates, profile);
    rank_candidates(eligible, scoring, Some(limit))
}

/// Build a three-meal plan for one day.
///
/// Pure and deterministic for a given input. An empty or fully ineligible
/// catalog yields three empty meals with zero totals.
pub fn plan_day(profile: &UserProfile, candidates: &[Candidate], config: &PlannerConfig) -> DailyPlan {
    let ranked = recommend(profile, candidates, config.candidate_limit, &config.scoring);

    let daily = NutritionTargets::daily(profile, &config.targets);
    let per_meal = daily.per_meal(MealSlot::ALL.len());

    let mut used = UsedProducts::new();
    let [breakfast, lunch, dinner] = MealSlot::ALL
        .map(|slot| allocate_meal(slot, &ranked, &per_meal, &mut used, &config.allocation));

    let plan = DailyPlan::from_meals(breakfast, lunch, dinner);

    info!(
        user = %profile.id,
        ranked = ranked.len(),
        items = plan.items().count(),
        calories = plan.totals.calories,
        price = plan.totals.price,
        "daily plan built"
    );

    plan
}
