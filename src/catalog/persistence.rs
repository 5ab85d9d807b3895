use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{RationError, Result};
use crate::models::{Candidate, CartLine, DailyPlan, UserProfile};

/// Flat CSV row for a candidate. Restriction tags are `;`-separated.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CandidateRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
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
    pub restrictions: String,
    pub similarity: Option<f64>,
    pub popularity: Option<f64>,
}

impl From<CandidateRecord> for Candidate {
    fn from(r: CandidateRecord) -> Self {
        Candidate {
            id: r.id,
            name: r.name,
            description: r.description.filter(|d| !d.is_empty()),
            category: r.category,
            price: r.price,
            calories: r.calories,
            protein: r.protein,
            fat: r.fat,
            carbs: r.carbs,
            is_vegan: r.is_vegan,
            restrictions: r
                .restrictions
                .split(';')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
            similarity: r.similarity,
            popularity: r.popularity,
        }
    }
}

impl From<&Candidate> for CandidateRecord {
    fn from(c: &Candidate) -> Self {
        CandidateRecord {
            id: c.id.clone(),
            name: c.name.clone(),
            description: c.description.clone(),
            category: c.category.clone(),
            price: c.price,
            calories: c.calories,
            protein: c.protein,
            fat: c.fat,
            carbs: c.carbs,
            is_vegan: c.is_vegan,
            restrictions: c
                .restrictions
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(";"),
            similarity: c.similarity,
            popularity: c.popularity,
        }
    }
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
}

/// Reject duplicate ids and drop rows with negative price or nutrients.
fn validate_catalog(candidates: Vec<Candidate>) -> Result<Vec<Candidate>> {
    let mut seen = HashSet::new();
    let mut valid = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        if !seen.insert(candidate.id.clone()) {
            return Err(RationError::DuplicateProduct(candidate.id));
        }
        if candidate.is_valid() {
            valid.push(candidate);
        } else {
            warn!(product = %candidate.id, "skipping candidate with invalid values");
        }
    }

    Ok(valid)
}

/// Load a candidate catalog from JSON (array) or CSV, by file extension.
///
/// File order is kept; it is the order ties are ranked in.
pub fn load_candidates<P: AsRef<Path>>(path: P) -> Result<Vec<Candidate>> {
    let path = path.as_ref();

    let candidates: Vec<Candidate> = if is_csv(path) {
        let mut reader = csv::Reader::from_path(path)?;
        let mut rows: Vec<Candidate> = Vec::new();
        for record in reader.deserialize::<CandidateRecord>() {
            rows.push(record?.into());
        }
        rows
    } else {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)?
    };

    validate_catalog(candidates)
}

/// Save a catalog as JSON or CSV, by file extension.
pub fn save_candidates<P: AsRef<Path>>(path: P, candidates: &[Candidate]) -> Result<()> {
    let path = path.as_ref();

    if is_csv(path) {
        let mut writer = csv::Writer::from_path(path)?;
        for candidate in candidates {
            writer.serialize(CandidateRecord::from(candidate))?;
        }
        writer.flush()?;
    } else {
        let json = serde_json::to_string_pretty(candidates)?;
        fs::write(path, json)?;
    }
    Ok(())
}

/// Load user profiles from a JSON array. A missing file is an empty list.
pub fn load_profiles<P: AsRef<Path>>(path: P) -> Result<Vec<UserProfile>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Save profiles as a JSON array.
pub fn save_profiles<P: AsRef<Path>>(path: P, profiles: &[UserProfile]) -> Result<()> {
    let json = serde_json::to_string_pretty(profiles)?;
    fs::write(path, json)?;
    Ok(())
}

/// Find and validate a profile by id.
pub fn find_profile(profiles: &[UserProfile], user_id: &str) -> Result<UserProfile> {
    let profile = profiles
        .iter()
        .find(|p| p.id == user_id)
        .ok_or_else(|| RationError::ProfileNotFound(user_id.to_string()))?;
    profile.validate()?;
    Ok(profile.clone())
}

/// Insert a profile, replacing any existing profile with the same id.
pub fn upsert_profile(profiles: &mut Vec<UserProfile>, profile: UserProfile) {
    match profiles.iter_mut().find(|p| p.id == profile.id) {
        Some(existing) => *existing = profile,
        None => profiles.push(profile),
    }
}

pub fn save_plan<P: AsRef<Path>>(path: P, plan: &DailyPlan) -> Result<()> {
    let json = serde_json::to_string_pretty(plan)?;
    fs::write(path, json)?;
    Ok(())
}

/// Write cart lines as `productId,quantity` CSV.
pub fn write_cart_csv<P: AsRef<Path>>(path: P, lines: &[CartLine]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for line in lines {
        writer.serialize(line)?;
    }
    writer.flush()?;
    Ok(())
}
