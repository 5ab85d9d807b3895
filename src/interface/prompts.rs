use std::collections::BTreeSet;
use std::str::FromStr;

use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::error::{RationError, Result};
use crate::models::{Goal, Sex, UserProfile};

/// Minimum Jaro-Winkler similarity for a tag suggestion.
const TAG_MATCH_THRESHOLD: f64 = 0.7;

fn prompt_number<T: FromStr>(prompt: &str, default: &str) -> Result<T> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;

    input
        .trim()
        .parse()
        .map_err(|_| RationError::InvalidInput(format!("Invalid number: {}", input)))
}

fn prompt_text(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input = Input::<String>::new().with_prompt(prompt);
    if let Some(default) = default {
        input = input.default(default.to_string());
    }
    Ok(input.interact_text()?.trim().to_string())
}

/// Prompt for biological sex.
pub fn prompt_sex(default: Sex) -> Result<Sex> {
    let options = ["male", "female"];
    let selection = Select::new()
        .with_prompt("Sex")
        .items(&options)
        .default(usize::from(default == Sex::Female))
        .interact()?;
    Ok(Sex::from(options[selection]))
}

/// Prompt for weight goal.
pub fn prompt_goal(default: Goal) -> Result<Goal> {
    let options = ["lose weight", "maintain", "gain weight"];
    let preselected = match default {
        Goal::Lose => 0,
        Goal::Maintain => 1,
        Goal::Gain => 2,
    };
    let selection = Select::new()
        .with_prompt("Goal")
        .items(&options)
        .default(preselected)
        .interact()?;
    Ok(Goal::from(options[selection]))
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Known tags ordered by similarity to `input`, best first.
pub fn suggest_tags<'a>(input: &str, known_tags: &'a BTreeSet<String>) -> Vec<&'a String> {
    let needle = input.to_lowercase();
    let mut scored: Vec<(&String, f64)> = known_tags
        .iter()
        .map(|t| (t, jaro_winkler(&t.to_lowercase(), &needle)))
        .filter(|(_, score)| *score > TAG_MATCH_THRESHOLD)
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.into_iter().map(|(t, _)| t).collect()
}

/// Prompt for restriction tags, fuzzy-matching against tags seen in the catalog.
///
/// `current` tags are kept; new ones are added to them.
pub fn prompt_restrictions(
    known_tags: &BTreeSet<String>,
    current: BTreeSet<String>,
) -> Result<BTreeSet<String>> {
    let mut restrictions = current;
    if !restrictions.is_empty() {
        let listed: Vec<&str> = restrictions.iter().map(String::as_str).collect();
        println!("Current restrictions: {}", listed.join(", "));
    }

    loop {
        let input: String = Input::new()
            .with_prompt("Enter a restriction (or press Enter to finish)")
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim();
        if input.is_empty() {
            break;
        }

        // Exact match first (case-insensitive)
        if let Some(tag) = known_tags.iter().find(|t| t.eq_ignore_ascii_case(input)) {
            restrictions.insert(tag.clone());
            println!("Added: {}", tag);
            continue;
        }

        let candidates = suggest_tags(input, known_tags);

        if candidates.is_empty() {
            // Not in the catalog yet; keep it as typed.
            restrictions.insert(input.to_string());
            println!("Added: {}", input);
            continue;
        }

        let mut options: Vec<String> = candidates.iter().take(5).map(|t| t.to_string()).collect();
        options.push(format!("Keep '{}' as typed", input));

        let selection = Select::new()
            .with_prompt("Did you mean?")
            .items(&options)
            .default(0)
            .interact()?;

        let chosen = if selection + 1 == options.len() {
            input.to_string()
        } else {
            options[selection].clone()
        };
        println!("Added: {}", chosen);
        restrictions.insert(chosen);
    }

    Ok(restrictions)
}

/// Starting values for the profile prompts.
///
/// An existing profile with the same id supplies its own values; otherwise
/// the usual adult defaults are used.
pub fn profile_template(id: &str, existing: Option<&UserProfile>) -> UserProfile {
    match existing {
        Some(profile) => UserProfile {
            id: id.to_string(),
            ..profile.clone()
        },
        None => UserProfile {
            id: id.to_string(),
            name: String::new(),
            sex: Sex::Male,
            age: 30,
            weight_kg: 70.0,
            height_cm: 175.0,
            goal: Goal::Maintain,
            budget_per_week: 700.0,
            is_vegan: false,
            restrictions: BTreeSet::new(),
        },
    }
}

/// Collect a full profile interactively.
///
/// When the entered id matches one of `profiles`, its fields are offered as
/// defaults.
pub fn prompt_profile(
    profiles: &[UserProfile],
    known_tags: &BTreeSet<String>,
) -> Result<UserProfile> {
    let id = prompt_text("User id", None)?;
    let existing = profiles.iter().find(|p| p.id == id);
    if existing.is_some() {
        println!("Editing existing profile '{}'", id);
    }
    let template = profile_template(&id, existing);

    let name = prompt_text("Name", Some(template.name.as_str()).filter(|n| !n.is_empty()))?;
    let age: u32 = prompt_number("Age (years)", &template.age.to_string())?;
    let sex = prompt_sex(template.sex)?;
    let weight_kg: f64 = prompt_number("Weight (kg)", &template.weight_kg.to_string())?;
    let height_cm: f64 = prompt_number("Height (cm)", &template.height_cm.to_string())?;
    let goal = prompt_goal(template.goal)?;
    let budget_per_week: f64 =
        prompt_number("Weekly food budget", &template.budget_per_week.to_string())?;
    let is_vegan = prompt_yes_no("Vegan?", template.is_vegan)?;
    let restrictions = prompt_restrictions(known_tags, template.restrictions)?;

    let profile = UserProfile {
        id,
        name,
        sex,
        age,
        weight_kg,
        height_cm,
        goal,
        budget_per_week,
        is_vegan,
        restrictions,
    };
    profile.validate()?;
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_suggest_tags_orders_by_similarity() {
        let known = tags(&["lactose", "gluten", "nuts"]);
        let suggestions = suggest_tags("lactos", &known);
        assert_eq!(suggestions.first().map(|s| s.as_str()), Some("lactose"));
    }

    #[test]
    fn test_suggest_tags_filters_unrelated() {
        let known = tags(&["lactose", "gluten"]);
        assert!(suggest_tags("shellfish", &known).is_empty());
    }

    #[test]
    fn test_profile_template_defaults_for_new_user() {
        let template = profile_template("u7", None);
        assert_eq!(template.id, "u7");
        assert_eq!(template.age, 30);
        assert_eq!(template.goal, Goal::Maintain);
        assert!(template.restrictions.is_empty());
        assert!(template.validate().is_ok());
    }

    #[test]
    fn test_profile_template_reuses_existing_values() {
        let existing: UserProfile = serde_json::from_str(
            r#"{"id": "u1", "name": "Ann", "sex": "female", "age": 41, "weightKg": 62,
                "heightCm": 168, "goal": "gain weight", "budgetPerWeek": 910,
                "isVegan": true, "restrictions": ["nuts"]}"#,
        )
        .unwrap();

        let template = profile_template("u1", Some(&existing));
        assert_eq!(template, existing);
        assert_eq!(template.sex, Sex::Female);
        assert_eq!(template.goal, Goal::Gain);
        assert!(template.restrictions.contains("nuts"));
    }
}
