use crate::models::{Candidate, UserProfile};

/// Whether a user may be offered this candidate at all.
///
/// Hard constraints only: no shared restriction tag, and vegan users only see
/// vegan products.
#[inline]
pub fn is_eligible(candidate: &Candidate, profile: &UserProfile) -> bool {
    !candidate.conflicts_with(&profile.restrictions) && (!profile.is_vegan || candidate.is_vegan)
}

/// Keep the eligible candidates, preserving input order.
pub fn filter_eligible<'a, I>(candidates: I, profile: &UserProfile) -> Vec<&'a Candidate>
where
    I: IntoIterator<Item = &'a Candidate>,
{
    candidates
        .into_iter()
        .filter(|c| is_eligible(c, profile))
        .collect()
}
