pub mod candidate;
pub mod plan;
pub mod profile;

pub use candidate::{Candidate, Macro, Nutrients};
pub use plan::{CartLine, DailyPlan, Meal, MealSlot, PlanItem};
pub use profile::{Goal, Sex, UserProfile};
