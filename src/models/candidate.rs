use std::collections::BTreeSet;
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// A product the recommender may offer.
///
/// Price and nutrients are per 100 g. Similarity and popularity arrive
/// precomputed and may be missing when the upstream scoring skipped a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub category: String,

    pub price: f64,

    pub calories: f64,

    pub protein: f64,

    pub fat: f64,

    pub carbs: f64,

    #[serde(default)]
    pub is_vegan: bool,

    #[serde(default)]
    pub restrictions: BTreeSet<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity: Option<f64>,
}

/// The three macronutrients the allocator balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Macro {
    Protein,
    Carbs,
    Fat,
}

impl fmt::Display for Macro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Macro::Protein => "protein",
            Macro::Carbs => "carbs",
            Macro::Fat => "fat",
        };
        f.write_str(label)
    }
}

/// Price and nutrient amounts for a concrete quantity of food.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nutrients {
    pub price: f64,
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

impl Nutrients {
    /// Amount of a single macronutrient.
    pub fn get(&self, nutrient: Macro) -> f64 {
        match nutrient {
            Macro::Protein => self.protein,
            Macro::Carbs => self.carbs,
            Macro::Fat => self.fat,
        }
    }

    /// Scale every field by the same factor.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            price: self.price * factor,
            calories: self.calories * factor,
            protein: self.protein * factor,
            fat: self.fat * factor,
            carbs: self.carbs * factor,
        }
    }
}

impl Add for Nutrients {
    type Output = Nutrients;

    fn add(self, rhs: Self) -> Self {
        Self {
            price: self.price + rhs.price,
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            fat: self.fat + rhs.fat,
            carbs: self.carbs + rhs.carbs,
        }
    }
}

impl AddAssign for Nutrients {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Nutrients {
    type Output = Nutrients;

    fn sub(self, rhs: Self) -> Self {
        Self {
            price: self.price - rhs.price,
            calories: self.calories - rhs.calories,
            protein: self.protein - rhs.protein,
            fat: self.fat - rhs.fat,
            carbs: self.carbs - rhs.carbs,
        }
    }
}

impl SubAssign for Nutrients {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Candidate {
    /// Macro content per 100 g.
    #[inline]
    pub fn macro_value(&self, nutrient: Macro) -> f64 {
        match nutrient {
            Macro::Protein => self.protein,
            Macro::Carbs => self.carbs,
            Macro::Fat => self.fat,
        }
    }

    /// Price and nutrients per 100 g.
    pub fn per_100g(&self) -> Nutrients {
        Nutrients {
            price: self.price,
            calories: self.calories,
            protein: self.protein,
            fat: self.fat,
            carbs: self.carbs,
        }
    }

    /// Price and nutrients for `grams` of this product.
    pub fn contribution(&self, grams: u32) -> Nutrients {
        self.per_100g().scaled(grams as f64 / 100.0)
    }

    /// Whether the candidate shares any restriction tag with `tags`.
    pub fn conflicts_with(&self, tags: &BTreeSet<String>) -> bool {
        !self.restrictions.is_disjoint(tags)
    }

    /// Basic validation: non-negative price and nutrients.
    pub fn is_valid(&self) -> bool {
        !self.id.is_empty()
            && self.price >= 0.0
            && self.calories >= 0.0
            && self.protein >= 0.0
            && self.fat >= 0.0
            && self.carbs >= 0.0
    }

    /// Name if present, otherwise the id.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}
