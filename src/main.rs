use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use daily_ration_rs::catalog::{
    find_profile, load_candidates, load_profiles, save_candidates, save_plan, save_profiles,
    synthesize_catalog, upsert_profile, write_cart_csv,
};
use daily_ration_rs::cli::{Cli, Command, ProfileArgs};
use daily_ration_rs::config::{AppConfig, DEFAULT_CONFIG_FILE, LogFormat, LoggingConfig};
use daily_ration_rs::error::Result;
use daily_ration_rs::interface::{
    display_plan, display_ranking, display_targets, prompt_profile, prompt_yes_no,
};
use daily_ration_rs::models::{MealSlot, UserProfile};
use daily_ration_rs::planner::{NutritionTargets, basal_metabolic_rate, plan_day, recommend};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_new(&logging.level).unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match logging.format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Only an explicitly named config file has to exist.
    let required = cli.config != PathBuf::from(DEFAULT_CONFIG_FILE);
    let mut config = AppConfig::load(&cli.config, required)?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    init_logging(&config.logging);

    match cli.command {
        Command::Plan {
            profile,
            catalog,
            json,
            out,
            cart,
        } => cmd_plan(
            &config,
            &profile,
            &catalog,
            json,
            out.as_deref(),
            cart.as_deref(),
        ),
        Command::Recommend {
            profile,
            catalog,
            limit,
        } => cmd_recommend(&config, &profile, &catalog, limit),
        Command::Targets { profile } => cmd_targets(&config, &profile),
        Command::Profile { profiles, catalog } => cmd_profile(&profiles, catalog.as_deref()),
        Command::Synth { count, seed, out } => cmd_synth(&config, count, seed, &out),
    }
}

fn load_user(args: &ProfileArgs) -> Result<UserProfile> {
    let profiles = load_profiles(&args.profiles)?;
    find_profile(&profiles, &args.user)
}

/// Generate a daily plan for a user.
fn cmd_plan(
    config: &AppConfig,
    args: &ProfileArgs,
    catalog: &Path,
    json: bool,
    out: Option<&Path>,
    cart: Option<&Path>,
) -> Result<()> {
    let profile = load_user(args)?;
    let candidates = load_candidates(catalog)?;

    if !json {
        println!("Loaded {} products", candidates.len());
    }

    let plan = plan_day(&profile, &candidates, &config.planner);

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        let daily = NutritionTargets::daily(&profile, &config.planner.targets);
        display_plan(&plan, &daily);
    }

    if let Some(path) = out {
        save_plan(path, &plan)?;
        eprintln!("Plan saved to {}", path.display());
    }

    if let Some(path) = cart {
        let lines = plan.cart_lines();
        write_cart_csv(path, &lines)?;
        eprintln!("Wrote {} cart lines to {}", lines.len(), path.display());
    }

    Ok(())
}

/// Print the top-N recommendation list.
fn cmd_recommend(
    config: &AppConfig,
    args: &ProfileArgs,
    catalog: &Path,
    limit: Option<usize>,
) -> Result<()> {
    let profile = load_user(args)?;
    let candidates = load_candidates(catalog)?;

    let limit = limit.unwrap_or(config.planner.recommend_limit);
    let ranked = recommend(&profile, &candidates, limit, &config.planner.scoring);

    display_ranking(&ranked, "Recommended products");
    Ok(())
}

/// Show nutrition targets.
fn cmd_targets(config: &AppConfig, args: &ProfileArgs) -> Result<()> {
    let profile = load_user(args)?;

    let daily = NutritionTargets::daily(&profile, &config.planner.targets);
    let meal = daily.per_meal(MealSlot::ALL.len());
    display_targets(&profile, basal_metabolic_rate(&profile), &daily, &meal);
    Ok(())
}

/// Create or update a profile interactively.
fn cmd_profile(profiles_path: &Path, catalog: Option<&Path>) -> Result<()> {
    let mut profiles = load_profiles(profiles_path)?;

    let known_tags: BTreeSet<String> = match catalog {
        Some(path) => load_candidates(path)?
            .into_iter()
            .flat_map(|c| c.restrictions)
            .collect(),
        None => profiles
            .iter()
            .flat_map(|p| p.restrictions.iter().cloned())
            .collect(),
    };

    let profile = prompt_profile(&profiles, &known_tags)?;

    if profiles.iter().any(|p| p.id == profile.id) {
        let replace = prompt_yes_no(&format!("Save changes to profile '{}'?", profile.id), true)?;
        if !replace {
            println!("Profile not saved.");
            return Ok(());
        }
    }

    let id = profile.id.clone();
    upsert_profile(&mut profiles, profile);
    save_profiles(profiles_path, &profiles)?;
    println!("Profile '{}' saved to {}", id, profiles_path.display());
    Ok(())
}

/// Write a synthetic catalog.
fn cmd_synth(config: &AppConfig, count: usize, seed: u64, out: &Path) -> Result<()> {
    let catalog = synthesize_catalog(count, seed, &config.planner.allocation.groups);
    save_candidates(out, &catalog)?;
    println!("Wrote {} products to {}", catalog.len(), out.display());
    Ok(())
}
