use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use tracing::debug;

use crate::config::{AllocationConfig, MacroGroup};
use crate::models::{Candidate, Macro, Meal, MealSlot, Nutrients, PlanItem};
use crate::planner::ranking::RankedCandidate;
use crate::planner::targets::NutritionTargets;

/// Product ids already placed somewhere in the current plan.
pub type UsedProducts = HashSet<String>;

/// Why a candidate could not be served for a given portion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Infeasible {
    /// Rounded serving falls outside the plausible range.
    ServingOutOfRange { grams: f64 },
    /// Serving costs more than the slack-adjusted remaining budget.
    OverBudget { cost: f64, limit: f64 },
    /// Serving carries more than the slack-adjusted remaining calories.
    OverCalories { calories: f64, limit: f64 },
}

impl fmt::Display for Infeasible {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Infeasible::ServingOutOfRange { grams } => write!(f, "serving {grams:.0} g out of range"),
            Infeasible::OverBudget { cost, limit } => write!(f, "cost {cost:.2} > {limit:.2}"),
            Infeasible::OverCalories { calories, limit } => {
                write!(f, "{calories:.0} kcal > {limit:.0}")
            }
        }
    }
}

/// Grams needed to supply `portion` grams of a macro, rounded up to the
/// serving step. No bounds applied.
fn rounded_serving(portion: f64, macro_per_100g: f64, config: &AllocationConfig) -> f64 {
    let step = config.serving_step as f64;
    (portion / (macro_per_100g / 100.0) / step).ceil() * step
}

fn within_serving_bounds(grams: f64, config: &AllocationConfig) -> bool {
    grams.is_finite() && grams >= config.min_serving as f64 && grams <= config.max_serving as f64
}

/// Grams needed to supply `portion` grams of a macro, rounded up to the
/// serving step.
///
/// Returns `None` when the result falls outside `[min_serving, max_serving]`.
pub fn serving_grams(portion: f64, macro_per_100g: f64, config: &AllocationConfig) -> Option<u32> {
    let grams = rounded_serving(portion, macro_per_100g, config);
    within_serving_bounds(grams, config).then_some(grams as u32)
}

/// Gate a candidate against the meal's remaining budget and calories.
///
/// On success returns the serving size in grams.
pub fn check_feasibility(
    candidate: &Candidate,
    nutrient: Macro,
    portion: f64,
    remaining: &Nutrients,
    config: &AllocationConfig,
) -> Result<u32, Infeasible> {
    let rounded = rounded_serving(portion, candidate.macro_value(nutrient), config);
    if !within_serving_bounds(rounded, config) {
        return Err(Infeasible::ServingOutOfRange { grams: rounded });
    }
    let grams = rounded as u32;

    let serving = candidate.contribution(grams);

    let budget_limit = remaining.price * config.budget_slack;
    if serving.price > budget_limit {
        return Err(Infeasible::OverBudget {
            cost: serving.price,
            limit: budget_limit,
        });
    }

    let calorie_limit = remaining.calories * config.calorie_slack;
    if serving.calories > calorie_limit {
        return Err(Infeasible::OverCalories {
            calories: serving.calories,
            limit: calorie_limit,
        });
    }

    Ok(grams)
}

/// Unused candidates in `categories` that carry the macro, richest first.
///
/// The input keeps its global rank; the stable sort means products with equal
/// macro content stay in rank order.
pub fn macro_sources<'a>(
    ranked: &[RankedCandidate<'a>],
    categories: &[String],
    nutrient: Macro,
    used: &UsedProducts,
    min_macro_content: f64,
) -> Vec<&'a Candidate> {
    let mut sources: Vec<&'a Candidate> = ranked
        .iter()
        .map(|r| r.candidate)
        .filter(|c| {
            categories.iter().any(|cat| *cat == c.category)
                && c.macro_value(nutrient) > min_macro_content
                && !used.contains(&c.id)
        })
        .collect();

    sources.sort_by(|a, b| {
        b.macro_value(nutrient)
            .partial_cmp(&a.macro_value(nutrient))
            .unwrap_or(Ordering::Equal)
    });

    sources
}

/// Place at most one product from `categories` covering `portion` grams of
/// the group's macro. Returns whether something was added.
fn fill_portion(
    meal: &mut Meal,
    remaining: &mut Nutrients,
    ranked: &[RankedCandidate<'_>],
    categories: &[String],
    nutrient: Macro,
    portion: f64,
    used: &mut UsedProducts,
    config: &AllocationConfig,
) -> bool {
    if categories.is_empty() {
        return false;
    }

    let sources = macro_sources(ranked, categories, nutrient, used, config.min_macro_content);

    for candidate in sources {
        match check_feasibility(candidate, nutrient, portion, remaining, config) {
            Ok(grams) => {
                let item = PlanItem::new(candidate.clone(), grams);
                *remaining -= item.contribution();
                used.insert(candidate.id.clone());

                debug!(
                    meal = %meal.slot,
                    %nutrient,
                    product = %candidate.id,
                    grams,
                    "selected"
                );
                meal.items.push(item);
                return true;
            }
            Err(reason) => {
                debug!(
                    meal = %meal.slot,
                    %nutrient,
                    product = %candidate.id,
                    %reason,
                    "rejected"
                );
            }
        }
    }

    false
}

fn fill_group(
    meal: &mut Meal,
    remaining: &mut Nutrients,
    ranked: &[RankedCandidate<'_>],
    group: &MacroGroup,
    used: &mut UsedProducts,
    config: &AllocationConfig,
) {
    // Split what is left of this macro when the group starts.
    let target = remaining.get(group.nutrient);
    let main_portion = target * group.main_ratio;
    let extra_portion = target * (1.0 - group.main_ratio);

    for (categories, portion) in [(&group.main, main_portion), (&group.extra, extra_portion)] {
        fill_portion(
            meal,
            remaining,
            ranked,
            categories,
            group.nutrient,
            portion,
            used,
            config,
        );
    }
}

/// Greedily fill one meal from the ranked candidate list.
///
/// Groups run in configured order. Each accepted item is charged against
/// budget, calories and all three macros. Products land in `used` so later
/// meals skip them. Unsatisfiable targets simply leave the meal sparse.
pub fn allocate_meal(
    slot: MealSlot,
    ranked: &[RankedCandidate<'_>],
    targets: &NutritionTargets,
    used: &mut UsedProducts,
    config: &AllocationConfig,
) -> Meal {
    let mut meal = Meal::empty(slot);
    let mut remaining = targets.as_remaining();

    for group in &config.groups {
        fill_group(&mut meal, &mut remaining, ranked, group, used, config);
    }

    meal.remaining = remaining;
    debug!(
        meal = %meal.slot,
        items = %meal.ingredient_summary(),
        "meal allocated"
    );
    meal
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn food(id: &str, category: &str, price: f64, cal: f64, p: f64, f: f64, c: f64) -> Candidate {
        Candidate {
            id: id.to_string(),
            name: id.to_string(),
            description: None,
            category: category.to_string(),
            price,
            calories: cal,
            protein: p,
            fat: f,
            carbs: c,
            is_vegan: false,
            restrictions: BTreeSet::new(),
            similarity: Some(0.5),
            popularity: Some(0.5),
        }
    }

    fn rank(foods: &[Candidate]) -> Vec<RankedCandidate<'_>> {
        foods
            .iter()
            .map(|candidate| RankedCandidate {
                candidate,
                score: 0.5,
            })
            .collect()
    }

    fn targets(protein: f64) -> NutritionTargets {
        NutritionTargets {
            calories: 867.4,
            protein,
            fat: 28.9,
            carbs: 86.7,
            budget: 100.0 / 3.0,
        }
    }

    #[test]
    fn test_serving_grams_rounds_up_to_step() {
        let config = AllocationConfig::default();
        assert_eq!(serving_grams(52.04, 20.0, &config), Some(270));
        assert_eq!(serving_grams(20.0, 20.0, &config), Some(100));
        assert_eq!(serving_grams(20.01, 20.0, &config), Some(110));
    }

    #[test]
    fn test_serving_grams_bounds() {
        let config = AllocationConfig::default();
        // 1 g of a 90% source rounds to 10 g, the minimum.
        assert_eq!(serving_grams(1.0, 90.0, &config), Some(10));
        // Needs 1000 g.
        assert_eq!(serving_grams(10.0, 1.0, &config), None);
        // Nothing left to cover.
        assert_eq!(serving_grams(0.0, 20.0, &config), None);
        assert_eq!(serving_grams(-5.0, 20.0, &config), None);
    }

    #[test]
    fn test_feasibility_budget_and_calories() {
        let config = AllocationConfig::default();
        let remaining = targets(65.05).as_remaining();

        let pricey = food("caviar", "Fish and seafood", 40.0, 250.0, 25.0, 15.0, 0.0);
        assert!(matches!(
            check_feasibility(&pricey, Macro::Protein, 52.04, &remaining, &config),
            Err(Infeasible::OverBudget { .. })
        ));

        let fatty = food("lard", "Meat and sausages", 1.0, 900.0, 5.0, 99.0, 0.0);
        assert!(matches!(
            check_feasibility(&fatty, Macro::Protein, 20.0, &remaining, &config),
            Err(Infeasible::OverCalories { .. })
        ));
    }

    #[test]
    fn test_single_protein_source_scenario() {
        let foods = vec![food("beef", "Meat and sausages", 5.0, 250.0, 20.0, 0.0, 0.0)];
        let ranked = rank(&foods);
        let mut used = UsedProducts::new();
        let config = AllocationConfig::default();

        let meal = allocate_meal(MealSlot::Breakfast, &ranked, &targets(65.05), &mut used, &config);

        assert_eq!(meal.items.len(), 1);
        assert_eq!(meal.items[0].grams, 270);
        assert!(used.contains("beef"));
        assert!((meal.remaining.price - (100.0 / 3.0 - 13.5)).abs() < 1e-9);
        assert!((meal.remaining.calories - (867.4 - 675.0)).abs() < 1e-9);
        assert!((meal.remaining.protein - (65.05 - 54.0)).abs() < 1e-9);
    }

    #[test]
    fn test_richest_source_wins_over_rank() {
        // "lean" is ranked second but has more protein per 100 g.
        let foods = vec![
            food("sausage", "Meat and sausages", 1.0, 300.0, 12.0, 25.0, 2.0),
            food("lean", "Meat and sausages", 1.0, 120.0, 24.0, 2.0, 0.0),
        ];
        let ranked = rank(&foods);
        let sources = macro_sources(
            &ranked,
            &["Meat and sausages".to_string()],
            Macro::Protein,
            &UsedProducts::new(),
            0.1,
        );
        let ids: Vec<&str> = sources.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["lean", "sausage"]);
    }

    #[test]
    fn test_used_products_are_skipped() {
        let foods = vec![
            food("chicken", "Meat and sausages", 1.0, 120.0, 24.0, 2.0, 0.0),
            food("tuna", "Fish and seafood", 1.0, 110.0, 22.0, 1.0, 0.0),
        ];
        let ranked = rank(&foods);
        let mut used = UsedProducts::new();
        used.insert("chicken".to_string());

        let meal = allocate_meal(
            MealSlot::Lunch,
            &ranked,
            &targets(40.0),
            &mut used,
            &AllocationConfig::default(),
        );
        assert_eq!(meal.items.len(), 1);
        assert_eq!(meal.items[0].product.id, "tuna");
    }

    #[test]
    fn test_at_most_one_item_per_pass() {
        let foods = vec![
            food("m1", "Meat and sausages", 1.0, 120.0, 24.0, 2.0, 0.0),
            food("m2", "Meat and sausages", 1.0, 120.0, 23.0, 2.0, 0.0),
            food("d1", "Dairy products", 1.0, 100.0, 10.0, 3.0, 4.0),
            food("d2", "Eggs", 1.0, 150.0, 12.0, 10.0, 1.0),
            food("b1", "Bread and pastries", 0.5, 250.0, 8.0, 3.0, 50.0),
            food("v1", "Vegetables", 0.5, 40.0, 1.5, 0.2, 8.0),
            food("o1", "Oils", 1.0, 880.0, 0.0, 99.0, 0.0),
            food("n1", "Nuts", 2.0, 600.0, 20.0, 50.0, 15.0),
        ];
        let ranked = rank(&foods);
        let mut used = UsedProducts::new();
        let meal = allocate_meal(
            MealSlot::Dinner,
            &ranked,
            &targets(65.0),
            &mut used,
            &AllocationConfig::default(),
        );

        assert!(meal.items.len() <= 5);
        let meat = meal
            .items
            .iter()
            .filter(|i| i.product.category == "Meat and sausages")
            .count();
        assert!(meat <= 1);
        for item in &meal.items {
            assert!(item.grams >= 10 && item.grams <= 500);
            assert_eq!(item.grams % 10, 0);
        }
    }

    #[test]
    fn test_empty_candidates_give_empty_meal() {
        let mut used = UsedProducts::new();
        let meal = allocate_meal(
            MealSlot::Breakfast,
            &[],
            &targets(60.0),
            &mut used,
            &AllocationConfig::default(),
        );
        assert!(meal.is_empty());
        assert!(used.is_empty());
    }

    #[test]
    fn test_out_of_range_serving_reports_rounded_grams() {
        let config = AllocationConfig::default();
        let remaining = targets(65.05).as_remaining();
        let broth = food("broth", "Meat and sausages", 0.1, 5.0, 1.0, 0.0, 0.0);

        assert_eq!(
            check_feasibility(&broth, Macro::Protein, 10.0, &remaining, &config),
            Err(Infeasible::ServingOutOfRange { grams: 1000.0 })
        );
    }

    #[test]
    fn test_protein_pick_shrinks_later_groups() {
        let foods = vec![
            food("meat", "Meat and sausages", 1.0, 100.0, 20.0, 10.0, 30.0),
            food("milk", "Dairy products", 1.0, 60.0, 3.0, 0.0, 0.0),
            food("bread", "Bread and pastries", 1.0, 250.0, 0.0, 0.0, 50.0),
        ];
        let ranked = rank(&foods);
        let mut used = UsedProducts::new();
        let config = AllocationConfig::default();
        let targets = NutritionTargets {
            calories: 1000.0,
            protein: 50.0,
            fat: 30.0,
            carbs: 100.0,
            budget: 20.0,
        };

        let meal = allocate_meal(MealSlot::Lunch, &ranked, &targets, &mut used, &config);
        let grams: Vec<(&str, u32)> = meal
            .items
            .iter()
            .map(|i| (i.product.id.as_str(), i.grams))
            .collect();

        // 200 g of meat brings 60 g carbs and 20 g fat along with the protein,
        // so the carbs group starts from 40 g instead of 100 g. Its main share
        // of 32 g needs 64 g of bread, rounded up to 70 g.
        assert_eq!(grams, vec![("meat", 200), ("milk", 340), ("bread", 70)]);
        assert!((meal.remaining.carbs - (100.0 - 60.0 - 35.0)).abs() < 1e-9);
        assert!((meal.remaining.fat - (30.0 - 20.0)).abs() < 1e-9);
        assert!((meal.remaining.protein - (50.0 - 40.0 - 10.2)).abs() < 1e-9);
    }
}
