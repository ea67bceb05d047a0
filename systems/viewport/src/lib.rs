#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Nearest-visible-tile search over the loaded scene.
//!
//! Pure system that maps a screen point (typically the cursor) back onto the
//! world grid by scanning the scene and projecting every tile through the
//! host's [`ScreenProjector`]. The system never computes projection itself;
//! tiles the projector reports as not visible are simply excluded.

use gridwalk_core::{ScreenPoint, ScreenProjector, SubtilePoint, Tile, SCENE_SIZE};
use tracing::trace;

/// Finds the on-screen tile whose projection is closest to `point`.
///
/// Scans the `SCENE_SIZE` by `SCENE_SIZE` tile grid anchored at
/// `region_base` (the south-west origin of the loaded scene, carrying the
/// plane to search) in x-major order, projecting each tile center at ground
/// height. The first visible tile seeds the running minimum and only a
/// strictly closer projection replaces it, so ties keep the earliest tile in
/// scan order.
///
/// Returns `None` when `point` is outside the viewport or when no scanned
/// tile projects on-screen.
#[must_use]
pub fn tile_under_point<P: ScreenProjector>(
    projector: &P,
    region_base: Tile,
    point: ScreenPoint,
) -> Option<Tile> {
    if !projector.is_on_screen(point) {
        trace!(x = point.x, y = point.y, "query point off viewport");
        return None;
    }

    let mut closest: Option<(Tile, f32)> = None;
    for x in 0..SCENE_SIZE {
        for y in 0..SCENE_SIZE {
            let tile = region_base.offset(x, y);
            let Some(projected) = projector.project(tile, SubtilePoint::CENTER, 0) else {
                continue;
            };
            let distance = projected.distance_to(point);
            match closest {
                Some((_, best)) if distance >= best => {}
                _ => closest = Some((tile, distance)),
            }
        }
    }

    if let Some((tile, distance)) = closest {
        trace!(
            tile_x = tile.x(),
            tile_y = tile.y(),
            distance,
            "nearest visible tile resolved"
        );
        Some(tile)
    } else {
        trace!("no tile in the scene projects on-screen");
        None
    }
}

/// Whether tile `a` is strictly closer to `reference` than tile `b`.
#[must_use]
pub fn is_closer(reference: Tile, a: Tile, b: Tile) -> bool {
    reference.distance_to(a) < reference.distance_to(b)
}
