use crate::models::{DailyPlan, Meal, Nutrients};

/// Sum price and nutrients over every item, in meal then item order.
pub fn plan_totals<'a, I>(meals: I) -> Nutrients
where
    I: IntoIterator<Item = &'a Meal>,
{
    let mut totals = Nutrients::default();
    for meal in meals {
        for item in &meal.items {
            totals += item.contribution();
        }
    }
    totals
}

impl DailyPlan {
    /// Assemble a plan and compute its totals.
    pub fn from_meals(breakfast: Meal, lunch: Meal, dinner: Meal) -> Self {
        let totals = plan_totals([&breakfast, &lunch, &dinner]);
        Self {
            breakfast,
            lunch,
            dinner,
            totals,
        }
    }
}
