pub mod aggregate;
pub mod allocator;
pub mod constants;
pub mod eligibility;
pub mod engine;
pub mod ranking;
pub mod targets;

pub use aggregate::plan_totals;
pub use allocator::{
    Infeasible, UsedProducts, allocate_meal, check_feasibility, macro_sources, serving_grams,
};
pub use constants::*;
pub use eligibility::{filter_eligible, is_eligible};
pub use engine::{plan_day, recommend};
pub use ranking::{RankedCandidate, fused_score, rank_candidates};
pub use targets::{NutritionTargets, basal_metabolic_rate};
