pub mod prompts;
pub mod render;

pub use prompts::{
    profile_template, prompt_profile, prompt_restrictions, prompt_yes_no, suggest_tags,
};
pub use render::{display_plan, display_ranking, display_targets};
