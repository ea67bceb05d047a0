#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic simulated client for Gridwalk.
//!
//! [`SimClient`] implements both collaborator contracts against a small
//! in-memory world: a top-down camera that follows the agent, tick-driven
//! movement toward the pending walk destination, and a run energy model.
//! The control loop (CLI or tests) advances it explicitly with
//! [`SimClient::tick`]; nothing moves between ticks, so every run with the
//! same inputs replays identically.

use std::time::Duration;

use glam::Vec2;
use gridwalk_core::{AgentClient, ScreenPoint, ScreenProjector, SubtilePoint, Tile, SCENE_SIZE};

const DEFAULT_VIEWPORT: Vec2 = Vec2::new(520.0, 340.0);
const DEFAULT_PIXELS_PER_TILE: f32 = 25.0;
const MAX_ENERGY: u8 = 100;

/// Simulated game client owning the agent and the loaded scene.
#[derive(Clone, Debug)]
pub struct SimClient {
    region_base: Tile,
    position: Tile,
    destination: Option<Tile>,
    run_enabled: bool,
    energy: u8,
    paused: Duration,
    walk_commands: u32,
    viewport: Vec2,
    pixels_per_tile: f32,
}

impl SimClient {
    /// Creates a client with the scene anchored at `region_base` and the
    /// agent standing on `start` with full energy.
    #[must_use]
    pub fn new(region_base: Tile, start: Tile) -> Self {
        Self {
            region_base,
            position: start,
            destination: None,
            run_enabled: false,
            energy: MAX_ENERGY,
            paused: Duration::ZERO,
            walk_commands: 0,
            viewport: DEFAULT_VIEWPORT,
            pixels_per_tile: DEFAULT_PIXELS_PER_TILE,
        }
    }

    /// Replaces the viewport dimensions, in pixels.
    #[must_use]
    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Vec2::new(width, height);
        self
    }

    /// Advances the simulation by one tick.
    ///
    /// The agent steps one tile per axis toward the pending destination, or
    /// two while run is enabled and energy remains. Running drains energy;
    /// walking slowly restores it. Arrival clears the destination.
    pub fn tick(&mut self) {
        let Some(destination) = self.destination else {
            self.energy = (self.energy + 1).min(MAX_ENERGY);
            return;
        };

        let steps = if self.run_enabled && self.energy > 0 {
            2
        } else {
            1
        };
        for _ in 0..steps {
            if self.position == destination {
                break;
            }
            let dx = (destination.x() - self.position.x()).signum();
            let dy = (destination.y() - self.position.y()).signum();
            self.position = self.position.offset(dx, dy);
            if self.run_enabled {
                self.energy = self.energy.saturating_sub(1);
            } else {
                self.energy = (self.energy + 1).min(MAX_ENERGY);
            }
        }

        if self.position == destination {
            self.destination = None;
        }
    }

    /// South-west origin tile of the loaded scene.
    #[must_use]
    pub const fn region_base(&self) -> Tile {
        self.region_base
    }

    /// Viewport dimensions in pixels.
    #[must_use]
    pub const fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Number of walk commands accepted so far.
    #[must_use]
    pub const fn issued_walk_commands(&self) -> u32 {
        self.walk_commands
    }

    /// Total pause time requested by callers.
    #[must_use]
    pub const fn paused_total(&self) -> Duration {
        self.paused
    }

    /// Teleports the agent, discarding any pending destination.
    pub fn force_position(&mut self, position: Tile) {
        self.position = position;
        self.destination = None;
    }

    /// Overrides the agent's run energy.
    pub fn set_energy(&mut self, energy: u8) {
        self.energy = energy.min(MAX_ENERGY);
    }

    fn world_point(&self, tile: Tile, subtile: SubtilePoint) -> Vec2 {
        Vec2::new(tile.x() as f32 + subtile.x, tile.y() as f32 + subtile.y)
    }
}

impl ScreenProjector for SimClient {
    fn project(&self, tile: Tile, subtile: SubtilePoint, height: i32) -> Option<ScreenPoint> {
        if tile.plane() != self.position.plane() {
            return None;
        }
        let camera = self.world_point(self.position, SubtilePoint::CENTER);
        let relative = (self.world_point(tile, subtile) - camera) * self.pixels_per_tile;
        // Screen y grows downward while world y grows northward.
        let point = ScreenPoint::new(
            self.viewport.x / 2.0 + relative.x,
            self.viewport.y / 2.0 - relative.y - height as f32 * self.pixels_per_tile,
        );
        self.is_on_screen(point).then_some(point)
    }

    fn is_on_screen(&self, point: ScreenPoint) -> bool {
        (0.0..=self.viewport.x).contains(&point.x) && (0.0..=self.viewport.y).contains(&point.y)
    }
}

impl AgentClient for SimClient {
    fn position(&self) -> Tile {
        self.position
    }

    fn is_moving(&self) -> bool {
        self.destination.is_some_and(|tile| tile != self.position)
    }

    fn walk_destination(&self) -> Option<Tile> {
        self.destination
    }

    fn is_tile_loaded(&self, tile: Tile) -> bool {
        tile.plane() == self.region_base.plane()
            && (0..SCENE_SIZE).contains(&(tile.x() - self.region_base.x()))
            && (0..SCENE_SIZE).contains(&(tile.y() - self.region_base.y()))
    }

    fn walk_to(&mut self, tile: Tile, _subtile: SubtilePoint) -> bool {
        if !self.is_tile_loaded(tile) {
            return false;
        }
        self.destination = Some(tile);
        self.walk_commands += 1;
        true
    }

    fn is_run_enabled(&self) -> bool {
        self.run_enabled
    }

    fn energy(&self) -> u8 {
        self.energy
    }

    fn set_run_enabled(&mut self, enabled: bool) {
        self.run_enabled = enabled;
    }

    fn pause(&mut self, duration: Duration) {
        self.paused += duration;
    }
}
