// ─────────────────────────────────────────────────────────────────────────────
// Score fusion
// ─────────────────────────────────────────────────────────────────────────────

/// Weight of the embedding similarity signal in the fused score.
pub const SIMILARITY_WEIGHT: f64 = 0.8;

/// Weight of the popularity signal in the fused score.
pub const POPULARITY_WEIGHT: f64 = 0.2;

/// Ranked candidates handed to the allocator per planning request.
pub const CANDIDATE_LIMIT: usize = 100;

/// Default length of a plain recommendation list.
pub const RECOMMEND_LIMIT: usize = 10;

// ─────────────────────────────────────────────────────────────────────────────
// Energy and macro targets
// ─────────────────────────────────────────────────────────────────────────────

/// Activity multiplier applied to BMR ("lightly active").
pub const ACTIVITY_FACTOR: f64 = 1.375;

/// Calorie multipliers per goal.
pub const GOAL_LOSE_MULT: f64 = 0.85;
pub const GOAL_MAINTAIN_MULT: f64 = 1.0;
pub const GOAL_GAIN_MULT: f64 = 1.15;

/// Share of daily calories from each macronutrient.
pub const PROTEIN_CALORIE_SHARE: f64 = 0.30;
pub const FAT_CALORIE_SHARE: f64 = 0.30;
pub const CARBS_CALORIE_SHARE: f64 = 0.40;

/// Atwater energy factors (kcal per gram).
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;
pub const KCAL_PER_G_CARBS: f64 = 4.0;

/// Days the weekly budget is spread over.
pub const DAYS_PER_WEEK: f64 = 7.0;

// ─────────────────────────────────────────────────────────────────────────────
// Meal allocation
// ─────────────────────────────────────────────────────────────────────────────

/// Macro content per 100 g a product needs to count as a source.
pub const MIN_MACRO_CONTENT: f64 = 0.1;

/// Servings are rounded up to this many grams.
pub const SERVING_STEP_G: u32 = 10;

/// Smallest and largest plausible serving.
pub const MIN_SERVING_G: u32 = 10;
pub const MAX_SERVING_G: u32 = 500;

/// A single item may cost up to this multiple of the remaining meal budget.
pub const BUDGET_SLACK: f64 = 1.5;

/// A single item may carry up to this multiple of the remaining meal calories.
pub const CALORIE_SLACK: f64 = 1.2;

/// Share of a macro group's target assigned to its main categories.
pub const MAIN_CATEGORY_SHARE: f64 = 0.8;

pub const PROTEIN_MAIN_CATEGORIES: &[&str] = &["Meat and sausages", "Fish and seafood"];
pub const PROTEIN_EXTRA_CATEGORIES: &[&str] = &["Dairy products", "Eggs"];
pub const CARBS_MAIN_CATEGORIES: &[&str] = &["Bread and pastries", "Cereals and pasta"];
pub const CARBS_EXTRA_CATEGORIES: &[&str] = &["Vegetables"];
pub const FAT_MAIN_CATEGORIES: &[&str] = &["Oils", "Nuts"];
