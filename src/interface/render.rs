use crate::models::{DailyPlan, Meal, UserProfile};
use crate::planner::{NutritionTargets, RankedCandidate};

/// Display a daily plan meal by meal, then the totals.
pub fn display_plan(plan: &DailyPlan, daily: &NutritionTargets) {
    if plan.is_empty() {
        println!("No meal plan generated (no eligible products fit the targets).");
        return;
    }

    println!();
    println!("=== Daily Ration ===");

    let max_name_len = plan
        .items()
        .map(|i| i.product.display_name().len())
        .max()
        .unwrap_or(10);

    for meal in plan.meals() {
        display_meal(meal, max_name_len);
    }

    let t = &plan.totals;
    println!("--- Summary ---");
    println!("Total items: {}", plan.items().count());
    println!(
        "Calories: {:>7.0} / {:.0} kcal",
        t.calories, daily.calories
    );
    println!("Protein:  {:>7.1} / {:.1} g", t.protein, daily.protein);
    println!("Fat:      {:>7.1} / {:.1} g", t.fat, daily.fat);
    println!("Carbs:    {:>7.1} / {:.1} g", t.carbs, daily.carbs);
    println!("Price:    {:>7.2} / {:.2}", t.price, daily.budget);
    println!();
}

fn display_meal(meal: &Meal, width: usize) {
    println!();
    println!("{}:", meal.slot);

    if meal.is_empty() {
        println!("  (nothing fits)");
        return;
    }

    for item in &meal.items {
        let n = item.contribution();
        println!(
            "  {:<width$} {:>4} g | {:>4.0} kcal P:{:>5.1} F:{:>5.1} C:{:>5.1} | {:>6.2}  [{}]",
            item.product.display_name(),
            item.grams,
            n.calories,
            n.protein,
            n.fat,
            n.carbs,
            n.price,
            item.product.category,
            width = width
        );
    }
    println!();
}

/// Display a ranked recommendation list.
pub fn display_ranking(ranked: &[RankedCandidate<'_>], title: &str) {
    if ranked.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} items) ===", title, ranked.len());
    println!();

    let max_name_len = ranked
        .iter()
        .map(|r| r.candidate.display_name().len())
        .max()
        .unwrap_or(10);

    for (i, r) in ranked.iter().enumerate() {
        println!(
            "{:>3}. {:<width$}  score {:.3}  [{}]",
            i + 1,
            r.candidate.display_name(),
            r.score,
            r.candidate.category,
            width = max_name_len
        );
    }

    println!();
}

/// Display daily and per-meal targets for a profile.
pub fn display_targets(profile: &UserProfile, bmr: f64, daily: &NutritionTargets, meal: &NutritionTargets) {
    println!();
    println!(
        "=== Targets for {} ({}, {} y, {} kg, {} cm, goal: {}) ===",
        if profile.name.is_empty() { &profile.id } else { &profile.name },
        profile.sex,
        profile.age,
        profile.weight_kg,
        profile.height_cm,
        profile.goal
    );
    println!("BMR: {:.1} kcal", bmr);
    println!();
    println!("{:<10} {:>10} {:>10}", "", "Daily", "Per meal");
    println!("{:<10} {:>10.1} {:>10.1}", "Calories", daily.calories, meal.calories);
    println!("{:<10} {:>10.1} {:>10.1}", "Protein", daily.protein, meal.protein);
    println!("{:<10} {:>10.1} {:>10.1}", "Fat", daily.fat, meal.fat);
    println!("{:<10} {:>10.1} {:>10.1}", "Carbs", daily.carbs, meal.carbs);
    println!("{:<10} {:>10.2} {:>10.2}", "Budget", daily.budget, meal.budget);
    println!();
}
