#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Stateful multi-waypoint path traversal.
//!
//! A [`TilePath`] owns two parallel waypoint sequences: `original`, fixed at
//! construction, and `working`, which jitter rewrites in place. Traversal is
//! driven by an external control loop calling [`TilePath::traverse`] once per
//! tick; the path itself never schedules work and reports every outcome as a
//! plain boolean, leaving retry policy to the caller.

use std::time::Duration;

use gridwalk_core::{AgentClient, SubtilePoint, Tile};
use rand::Rng;
use tracing::debug;

/// Distance to the final waypoint at which traversal counts as arrived.
const ARRIVAL_DISTANCE: f64 = 1.0;

/// Run is only toggled on while energy exceeds this percentage.
const RUN_ENERGY_THRESHOLD: u8 = 50;

/// Fixed pacing pause issued after toggling run on.
const RUN_TOGGLE_PAUSE: Duration = Duration::from_millis(600);

/// Walk commands are spaced out while the pending destination is farther
/// than this many tiles from the agent.
const SPACING_MIN_DESTINATION_DISTANCE: f64 = 5.0;

/// Walk commands are spaced out while the next waypoint stays within this
/// many tiles of the pending destination.
const SPACING_MAX_NEXT_DISTANCE: f64 = 7.0;

/// Optional behaviors a caller may enable for a traversal tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TraversalOptions {
    /// Opportunistically enable run when energy is abundant.
    pub handle_run: bool,
    /// Suppress redundant walk commands while a long walk is in flight.
    pub space_actions: bool,
}

/// An ordered, mutable sequence of waypoint tiles with traversal state.
///
/// Index 0 is the start and the last index is the end. The working sequence
/// always has the same length as the original one; jitter rewrites it from
/// the original each time, so repeated jitters never compound drift.
#[derive(Clone, Debug)]
pub struct TilePath {
    original: Vec<Tile>,
    working: Vec<Tile>,
    near_end: bool,
}

impl TilePath {
    /// Creates a path from an ordered waypoint list.
    #[must_use]
    pub fn new(waypoints: Vec<Tile>) -> Self {
        Self {
            working: waypoints.clone(),
            original: waypoints,
            near_end: false,
        }
    }

    /// First waypoint of the path.
    #[must_use]
    pub fn start(&self) -> Option<Tile> {
        self.working.first().copied()
    }

    /// Final waypoint of the path.
    #[must_use]
    pub fn end(&self) -> Option<Tile> {
        self.working.last().copied()
    }

    /// Current working waypoints, jitter included.
    #[must_use]
    pub fn waypoints(&self) -> &[Tile] {
        &self.working
    }

    /// Canonical waypoints the path was created with.
    #[must_use]
    pub fn original_waypoints(&self) -> &[Tile] {
        &self.original
    }

    /// Number of waypoints in the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.working.len()
    }

    /// Whether the path holds no waypoints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.working.is_empty()
    }

    /// Farthest waypoint that currently sits inside the loaded scene.
    ///
    /// Scans the working sequence from the end backward and returns the
    /// first waypoint the client can map right now. Preferring the farthest
    /// reachable waypoint deliberately skips intermediates that have already
    /// been passed, collapsing multi-hop paths into fewer traversal calls.
    #[must_use]
    pub fn get_next<C: AgentClient>(&self, client: &C) -> Option<Tile> {
        self.working
            .iter()
            .rev()
            .copied()
            .find(|waypoint| client.is_tile_loaded(*waypoint))
    }

    /// Whether the path can still be traversed.
    ///
    /// True when the path has waypoints, a next waypoint is resolvable, and
    /// the agent does not already stand on the end waypoint.
    #[must_use]
    pub fn is_valid<C: AgentClient>(&self, client: &C) -> bool {
        let Some(end) = self.end() else {
            return false;
        };
        self.get_next(client).is_some() && client.position() != end
    }

    /// Advances the traversal by one decision.
    ///
    /// Returns `true` while the caller should keep calling (a walk was
    /// issued or is still in flight) and `false` once the path is exhausted,
    /// unresolvable, or the final approach conditions hold.
    pub fn traverse<C: AgentClient>(&mut self, client: &mut C, options: TraversalOptions) -> bool {
        let Some(next) = self.get_next(client) else {
            debug!("no waypoint inside the loaded scene; path exhausted");
            return false;
        };

        if Some(next) == self.end() {
            let remaining = client.position().distance_to(next);
            let arrived = remaining <= ARRIVAL_DISTANCE
                || (self.near_end && client.is_moving())
                || client.walk_destination() == Some(next);
            if arrived {
                debug!(remaining, "final approach complete");
                return false;
            }
            self.near_end = true;
        } else {
            self.near_end = false;
        }

        if options.handle_run && !client.is_run_enabled() && client.energy() > RUN_ENERGY_THRESHOLD
        {
            debug!(energy = client.energy(), "enabling run");
            client.set_run_enabled(true);
            client.pause(RUN_TOGGLE_PAUSE);
        }

        if options.space_actions {
            if let Some(destination) = client.walk_destination() {
                if client.is_moving()
                    && client.position().distance_to(destination) > SPACING_MIN_DESTINATION_DISTANCE
                    && next.distance_to(destination) <= SPACING_MAX_NEXT_DISTANCE
                {
                    debug!("walk already in flight; spacing out the next command");
                    return true;
                }
            }
        }

        client.walk_to(next, SubtilePoint::CENTER)
    }

    /// Rewrites every working waypoint with fresh jitter.
    ///
    /// Each waypoint is recomputed from its original counterpart with an
    /// independent offset drawn from `[-max_x, max_x]` and `[-max_y, max_y]`,
    /// so repeated calls never drift beyond those bounds.
    pub fn randomize(&mut self, rng: &mut impl Rng, max_x: i32, max_y: i32) {
        let max_x = max_x.abs();
        let max_y = max_y.abs();
        for (slot, origin) in self.working.iter_mut().zip(&self.original) {
            let dx = rng.gen_range(-max_x..=max_x);
            let dy = rng.gen_range(-max_y..=max_y);
            *slot = origin.offset(dx, dy);
        }
    }

    /// Reverses the path end-for-end so it can be used to retrace steps.
    ///
    /// Both the original and working sequences flip, start and end swap, and
    /// any tracked final approach is discarded.
    pub fn reverse(&mut self) {
        self.original.reverse();
        self.working.reverse();
        self.near_end = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn straight_path() -> TilePath {
        TilePath::new(vec![
            Tile::on_ground(0, 0),
            Tile::on_ground(5, 0),
            Tile::on_ground(10, 0),
        ])
    }

    #[test]
    fn randomize_never_drifts_beyond_the_bounds() {
        let mut path = straight_path();
        let mut rng = ChaCha8Rng::seed_from_u64(99);

        for _ in 0..50 {
            path.randomize(&mut rng, 2, 3);
            assert_eq!(path.len(), path.original_waypoints().len());
            for (jittered, origin) in path.waypoints().iter().zip(path.original_waypoints()) {
                assert!((jittered.x() - origin.x()).abs() <= 2);
                assert!((jittered.y() - origin.y()).abs() <= 3);
                assert_eq!(jittered.plane(), origin.plane());
            }
        }
    }

    #[test]
    fn randomize_with_zero_bounds_restores_the_original() {
        let mut path = straight_path();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        path.randomize(&mut rng, 4, 4);
        path.randomize(&mut rng, 0, 0);
        assert_eq!(path.waypoints(), path.original_waypoints());
    }

    #[test]
    fn reverse_twice_is_identity() {
        let mut path = straight_path();
        let before = path.waypoints().to_vec();

        path.reverse();
        assert_eq!(path.start(), Some(Tile::on_ground(10, 0)));
        assert_eq!(path.end(), Some(Tile::on_ground(0, 0)));

        path.reverse();
        assert_eq!(path.waypoints(), before.as_slice());
        assert_eq!(path.original_waypoints(), before.as_slice());
    }

    #[test]
    fn empty_path_has_no_endpoints() {
        let path = TilePath::new(Vec::new());
        assert!(path.is_empty());
        assert_eq!(path.start(), None);
        assert_eq!(path.end(), None);
    }
}
