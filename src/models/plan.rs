use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{Candidate, Nutrients};

/// The three meals of a day, in allocation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    pub const ALL: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Lunch => "Lunch",
            MealSlot::Dinner => "Dinner",
        };
        f.write_str(label)
    }
}

/// A product placed in a meal with its serving size in grams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanItem {
    pub product: Candidate,
    pub grams: u32,
}

impl PlanItem {
    pub fn new(product: Candidate, grams: u32) -> Self {
        Self { product, grams }
    }

    /// Price and nutrients of this serving.
    pub fn contribution(&self) -> Nutrients {
        self.product.contribution(self.grams)
    }
}

/// One meal of the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub slot: MealSlot,

    pub items: Vec<PlanItem>,

    /// Targets left unfilled when allocation stopped.
    #[serde(skip)]
    pub remaining: Nutrients,
}

impl Meal {
    pub fn empty(slot: MealSlot) -> Self {
        Self {
            slot,
            items: Vec::new(),
            remaining: Nutrients::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Ingredient line such as "Oats (80 g), Milk (200 g)".
    pub fn ingredient_summary(&self) -> String {
        self.items
            .iter()
            .map(|item| format!("{} ({} g)", item.product.display_name(), item.grams))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A product id and quantity ready to be placed in a shopping cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: String,
    pub quantity: u32,
}

/// A full day of meals plus plan-level totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPlan {
    pub breakfast: Meal,
    pub lunch: Meal,
    pub dinner: Meal,
    pub totals: Nutrients,
}

impl DailyPlan {
    /// Meals in Breakfast, Lunch, Dinner order.
    pub fn meals(&self) -> [&Meal; 3] {
        [&self.breakfast, &self.lunch, &self.dinner]
    }

    /// All items across the three meals in meal order.
    pub fn items(&self) -> impl Iterator<Item = &PlanItem> {
        self.meals().into_iter().flat_map(|meal| meal.items.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.meals().iter().all(|meal| meal.is_empty())
    }

    /// Cart lines for every item with a positive quantity.
    pub fn cart_lines(&self) -> Vec<CartLine> {
        self.items()
            .filter(|item| item.grams > 0)
            .map(|item| CartLine {
                product_id: item.product.id.clone(),
                quantity: item.grams,
            })
            .collect()
    }
}
