//! Headless arena driver.
//!
//! Loads content, spawns the roster and runs a scripted skirmish at a fixed
//! step, then prints every character snapshot as JSON on stdout. Logs go to
//! stderr and honour `RUST_LOG`.
//!
//! ```bash
//! ARENA_TICKS=1200 RUST_LOG=arena_core=debug cargo run -p arena-headless
//! ```

mod config;
mod skirmish;

use std::sync::Arc;

use anyhow::Result;
use arena_content::ContentFactory;
use arena_core::{Battle, CastCounter, CastCounters};
use strum::IntoEnumIterator;

use crate::config::HeadlessConfig;

/// Flat damage of one auto-attack swing.
const AUTO_ATTACK_DAMAGE: f32 = 4.0;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let config = HeadlessConfig::from_env();
    let factory = match &config.content_dir {
        Some(dir) => ContentFactory::new(dir),
        None => ContentFactory::bundled(),
    };
    tracing::info!("Loading content from {}", factory.data_dir().display());

    let rules = factory.load_rules()?;
    let skills = factory.load_skills()?;
    let characters = factory.load_characters(&skills)?;
    tracing::info!(
        skills = skills.len(),
        characters = characters.len(),
        "content loaded"
    );

    let telemetry = Arc::new(CastCounters::new());
    let mut battle = Battle::new(rules).with_telemetry(telemetry.clone());
    for character in characters {
        battle.spawn(character)?;
    }

    let dt = config.tick_seconds();
    for tick in 0..config.ticks {
        let intents = skirmish::plan(&battle, dt);
        let events = battle.step(dt, &intents);
        skirmish::resolve(&mut battle, &events, AUTO_ATTACK_DAMAGE);

        let standing = skirmish::standing_teams(&battle);
        if standing.len() <= 1 {
            tracing::info!(tick, elapsed = battle.elapsed(), ?standing, "skirmish decided");
            break;
        }
    }

    for counter in CastCounter::iter() {
        tracing::info!(counter = %counter, value = telemetry.get(counter), "cast telemetry");
    }

    println!("{}", serde_json::to_string_pretty(&battle.snapshots())?);
    Ok(())
}

fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
