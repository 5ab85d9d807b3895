pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod interface;
pub mod models;
pub mod planner;

pub use config::{AppConfig, PlannerConfig};
pub use error::{RationError, Result};
pub use models::{Candidate, DailyPlan, Meal, MealSlot, PlanItem, UserProfile};
pub use planner::{plan_day, recommend};
