#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line host loop for Gridwalk.
//!
//! Loads a TOML walk script, stands up the simulated client, and drives the
//! traversal system tick by tick the way a live automation loop would. The
//! `area` subcommand answers geometry queries about the script's area
//! without running a walk.

mod script;

use anyhow::Context;
use clap::{Parser, Subcommand};
use gridwalk_core::{AgentClient, ScreenPoint};
use gridwalk_sim::SimClient;
use gridwalk_system_traversal::{TilePath, TraversalOptions};
use gridwalk_system_viewport::tile_under_point;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Scripted tile-grid walking against the simulated client.
#[derive(Debug, Parser)]
#[command(name = "gridwalk", version, about)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Walks the scripted path until arrival or the tick budget runs out.
    Walk {
        /// Path to the TOML walk script.
        #[arg(long)]
        script: PathBuf,
        /// Seed for the waypoint jitter.
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Jitter bounds as `X,Y` tiles applied to every waypoint.
        #[arg(long, value_parser = parse_jitter)]
        jitter: Option<(i32, i32)>,
        /// Give up after this many simulation ticks.
        #[arg(long, default_value_t = 600)]
        max_ticks: u32,
        /// Enable run opportunistically when energy is abundant.
        #[arg(long)]
        handle_run: bool,
        /// Space out walk commands while a long walk is in flight.
        #[arg(long)]
        space_actions: bool,
    },
    /// Reports geometry queries for the script's area.
    Area {
        /// Path to the TOML walk script.
        #[arg(long)]
        script: PathBuf,
    },
}

fn parse_jitter(value: &str) -> Result<(i32, i32), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{value}'"))?;
    let x = x.trim().parse().map_err(|_| format!("invalid jitter x '{x}'"))?;
    let y = y.trim().parse().map_err(|_| format!("invalid jitter y '{y}'"))?;
    Ok((x, y))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match Cli::parse().command {
        CliCommand::Walk {
            script,
            seed,
            jitter,
            max_ticks,
            handle_run,
            space_actions,
        } => run_walk(&script, seed, jitter, max_ticks, handle_run, space_actions),
        CliCommand::Area { script } => report_area(&script),
    }
}

fn run_walk(
    script_path: &std::path::Path,
    seed: u64,
    jitter: Option<(i32, i32)>,
    max_ticks: u32,
    handle_run: bool,
    space_actions: bool,
) -> anyhow::Result<()> {
    let script = script::load(script_path)?;
    let mut sim = SimClient::new(script.region_base_tile(), script.start_tile());
    let mut path = TilePath::new(script.waypoint_tiles());

    if let Some((max_x, max_y)) = jitter {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        path.randomize(&mut rng, max_x, max_y);
        debug!(seed, max_x, max_y, "jittered the scripted path");
    }

    let options = TraversalOptions {
        handle_run,
        space_actions,
    };

    if path.get_next(&sim).is_none() {
        anyhow::bail!("no scripted waypoint lies inside the loaded scene");
    }

    let mut ticks = 0;
    let arrived = loop {
        let in_progress = path.traverse(&mut sim, options);
        sim.tick();
        if !in_progress && !sim.is_moving() {
            break true;
        }
        ticks += 1;
        if ticks >= max_ticks {
            break false;
        }
    };

    let position = sim.position();
    println!(
        "agent at ({}, {}) plane {} after {ticks} ticks",
        position.x(),
        position.y(),
        position.plane()
    );
    println!(
        "issued {} walk commands, paused {} ms, energy {}",
        sim.issued_walk_commands(),
        sim.paused_total().as_millis(),
        sim.energy()
    );

    let viewport_center = ScreenPoint::new(sim.viewport().x / 2.0, sim.viewport().y / 2.0);
    match tile_under_point(&sim, sim.region_base(), viewport_center) {
        Some(tile) => println!(
            "tile under the viewport center: ({}, {})",
            tile.x(),
            tile.y()
        ),
        None => println!("no tile under the viewport center"),
    }

    if !arrived {
        anyhow::bail!("gave up after {max_ticks} ticks without reaching the path end");
    }
    Ok(())
}

fn report_area(script_path: &std::path::Path) -> anyhow::Result<()> {
    let script = script::load(script_path)?;
    let area = script
        .area()
        .context("walk script has no [area] table")?;
    let bounds = area.bounds().context("area has no vertices")?;
    let tiles = area.tiles();

    println!(
        "area on plane {} with {} vertices",
        area.plane(),
        area.vertices().len()
    );
    println!(
        "bounds: x {} y {} width {} height {}",
        bounds.x(),
        bounds.y(),
        bounds.width(),
        bounds.height()
    );
    println!("contains {} tiles", tiles.len());

    if let Some(center) = area.central_tile() {
        println!("central tile: ({}, {})", center.x(), center.y());
    }

    let start = script.start_tile();
    match area.nearest_tile(start) {
        Some(nearest) => println!(
            "nearest tile to the start: ({}, {})",
            nearest.x(),
            nearest.y()
        ),
        None => println!("area contains no tiles"),
    }
    println!(
        "start tile is {} the area",
        if area.contains_any(script.plane(), &[start]) {
            "inside"
        } else {
            "outside"
        }
    );
    Ok(())
}
