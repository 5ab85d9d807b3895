mod persistence;
mod synth;

pub use persistence::{
    find_profile, load_candidates, load_profiles, save_candidates, save_plan, save_profiles,
    upsert_profile, write_cart_csv,
};
pub use synth::{SYNTH_RESTRICTION_TAGS, synthesize_catalog};
