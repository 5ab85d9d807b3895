use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::MacroGroup;
use crate::models::{Candidate, Macro};

/// Restriction tags sprinkled over generated products.
pub const SYNTH_RESTRICTION_TAGS: &[&str] = &["gluten", "lactose", "nuts", "soy"];

/// Chance a generated product carries a restriction tag.
const RESTRICTION_PROBABILITY: f64 = 0.2;

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// (protein, fat, carbs) per 100 g for a product rich in `nutrient`.
fn macro_profile(rng: &mut impl Rng, nutrient: Macro) -> (f64, f64, f64) {
    match nutrient {
        Macro::Protein => (
            rng.gen_range(10.0..=30.0),
            rng.gen_range(1.0..=20.0),
            rng.gen_range(0.0..=5.0),
        ),
        Macro::Carbs => (
            rng.gen_range(2.0..=12.0),
            rng.gen_range(0.5..=5.0),
            rng.gen_range(10.0..=75.0),
        ),
        Macro::Fat => (
            rng.gen_range(0.0..=25.0),
            rng.gen_range(40.0..=99.0),
            rng.gen_range(0.0..=20.0),
        ),
    }
}

/// Generate `count` products spread round-robin over the groups' categories.
///
/// The same seed always yields the same catalog.
pub fn synthesize_catalog(count: usize, seed: u64, groups: &[MacroGroup]) -> Vec<Candidate> {
    let mut rng = StdRng::seed_from_u64(seed);

    let categories: Vec<(Macro, &String)> = groups
        .iter()
        .flat_map(|g| g.categories().map(move |c| (g.nutrient, c)))
        .collect();

    if categories.is_empty() {
        return Vec::new();
    }

    (0..count)
        .map(|i| {
            let (nutrient, category) = categories[i % categories.len()];
            let (protein, fat, carbs) = macro_profile(&mut rng, nutrient);
            let protein = round_to(protein, 1);
            let fat = round_to(fat, 1);
            let carbs = round_to(carbs, 1);

            let restrictions = if rng.gen_bool(RESTRICTION_PROBABILITY) {
                let tag = SYNTH_RESTRICTION_TAGS[rng.gen_range(0..SYNTH_RESTRICTION_TAGS.len())];
                std::iter::once(tag.to_string()).collect()
            } else {
                Default::default()
            };

            Candidate {
                id: format!("p{:04}", i + 1),
                name: format!("{} #{}", category, i / categories.len() + 1),
                description: None,
                category: category.clone(),
                price: round_to(rng.gen_range(0.3..=6.0), 2),
                calories: round_to(protein * 4.0 + fat * 9.0 + carbs * 4.0, 1),
                protein,
                fat,
                carbs,
                is_vegan: nutrient != Macro::Protein || rng.gen_bool(0.1),
                restrictions,
                similarity: Some(round_to(rng.gen_range(0.0..=1.0), 3)),
                popularity: Some(round_to(rng.gen_range(0.0..=1.0), 3)),
            }
        })
        .collect()
}
