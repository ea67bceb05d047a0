#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Gridwalk automation engine.
//!
//! This crate defines the value types that describe positions on the world
//! tile grid and on the screen, together with the collaborator contracts the
//! pure systems consume. Systems never talk to a live client directly: they
//! receive a [`ScreenProjector`] to map world tiles into screen space and an
//! [`AgentClient`] to observe and steer the virtual agent. Every "not
//! visible" or "no destination" outcome is an [`Option::None`] sentinel,
//! never a fault.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Side length, in tiles, of the square scene kept loaded around the agent.
pub const SCENE_SIZE: i32 = 104;

/// Location of a single world tile expressed as grid coordinates and plane.
///
/// Tiles are immutable; offset operations produce new values. Equality is
/// component-wise including the plane, while [`Tile::distance_to`] measures
/// Euclidean distance over the x/y axes only. Plane values outside the
/// game's 0..=3 convention are accepted and left to callers to police.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tile {
    x: i32,
    y: i32,
    plane: i32,
}

impl Tile {
    /// Creates a new tile at the provided grid coordinates and plane.
    #[must_use]
    pub const fn new(x: i32, y: i32, plane: i32) -> Self {
        Self { x, y, plane }
    }

    /// Creates a new ground-plane tile at the provided grid coordinates.
    #[must_use]
    pub const fn on_ground(x: i32, y: i32) -> Self {
        Self { x, y, plane: 0 }
    }

    /// West-east coordinate of the tile.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// South-north coordinate of the tile.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Vertical level the tile sits on.
    #[must_use]
    pub const fn plane(&self) -> i32 {
        self.plane
    }

    /// Returns a new tile displaced by the provided deltas on the same plane.
    #[must_use]
    pub const fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            plane: self.plane,
        }
    }

    /// Returns the same grid position relocated onto the provided plane.
    #[must_use]
    pub const fn with_plane(&self, plane: i32) -> Self {
        Self {
            x: self.x,
            y: self.y,
            plane,
        }
    }

    /// Euclidean distance to another tile over the x/y axes.
    ///
    /// The plane is ignored; callers that need exact co-location must check
    /// plane equality themselves.
    #[must_use]
    pub fn distance_to(&self, other: Tile) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        dx.hypot(dy)
    }
}

/// Position on the screen expressed in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    /// Horizontal pixel coordinate, growing rightward.
    pub x: f32,
    /// Vertical pixel coordinate, growing downward.
    pub y: f32,
}

impl ScreenPoint {
    /// Creates a new screen point from pixel coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean pixel distance to another screen point.
    #[must_use]
    pub fn distance_to(&self, other: ScreenPoint) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Position within a single tile, each axis ranging over `0.0..=1.0`.
///
/// `(0, 0)` is the tile's south-west corner; [`SubtilePoint::CENTER`] is the
/// conventional aim point for projection and walk commands.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubtilePoint {
    /// Fraction of the tile crossed along the x axis.
    pub x: f32,
    /// Fraction of the tile crossed along the y axis.
    pub y: f32,
}

impl SubtilePoint {
    /// Center of a tile.
    pub const CENTER: SubtilePoint = SubtilePoint::new(0.5, 0.5);

    /// Creates a new sub-tile point from axis fractions.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Projects world tiles into screen space.
///
/// Implemented by the host client; consumed by the viewport search and any
/// caller that needs to aim at a tile. A tile that is off the current
/// viewport, occluded, or on another plane projects to `None`.
pub trait ScreenProjector {
    /// Projects a point inside `tile` at the provided height above the
    /// ground to screen space, or `None` when it is not visible.
    fn project(&self, tile: Tile, subtile: SubtilePoint, height: i32) -> Option<ScreenPoint>;

    /// Reports whether the provided screen point lies inside the viewport.
    fn is_on_screen(&self, point: ScreenPoint) -> bool;
}

/// Observes and steers the virtual agent through the host client.
///
/// Every operation is a thin pass-through to the client; failures surface as
/// `false` or `None` and retry policy belongs to the caller's control loop.
pub trait AgentClient {
    /// Tile the agent currently occupies.
    fn position(&self) -> Tile;

    /// Whether the agent is currently in motion.
    fn is_moving(&self) -> bool;

    /// Destination of the walk currently in flight, if any.
    fn walk_destination(&self) -> Option<Tile>;

    /// Whether the tile is inside the currently loaded scene.
    fn is_tile_loaded(&self, tile: Tile) -> bool;

    /// Issues a walk command toward the given point inside `tile`.
    ///
    /// Returns whether the client accepted the command.
    fn walk_to(&mut self, tile: Tile, subtile: SubtilePoint) -> bool;

    /// Whether run mode is currently enabled.
    fn is_run_enabled(&self) -> bool;

    /// Current run energy in the range `0..=100`.
    fn energy(&self) -> u8;

    /// Enables or disables run mode.
    fn set_run_enabled(&mut self, enabled: bool);

    /// Pauses the control flow for a fixed, bounded duration.
    ///
    /// Used only to pace client interaction; never load-bearing for
    /// correctness.
    fn pause(&mut self, duration: Duration);
}
