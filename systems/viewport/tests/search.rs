use gridwalk_core::{ScreenPoint, ScreenProjector, SubtilePoint, Tile};
use gridwalk_system_viewport::{is_closer, tile_under_point};

const PIXELS_PER_TILE: f32 = 10.0;
const VIEWPORT: f32 = 100.0;

/// Flat orthographic projector: tile (dx, dy) from the region base maps to
/// `(dx + sub.x, dy + sub.y) * PIXELS_PER_TILE`, clipped to the viewport.
struct GridProjector {
    base: Tile,
}

impl ScreenProjector for GridProjector {
    fn project(&self, tile: Tile, subtile: SubtilePoint, _height: i32) -> Option<ScreenPoint> {
        let dx = (tile.x() - self.base.x()) as f32 + subtile.x;
        let dy = (tile.y() - self.base.y()) as f32 + subtile.y;
        let point = ScreenPoint::new(dx * PIXELS_PER_TILE, dy * PIXELS_PER_TILE);
        self.is_on_screen(point).then_some(point)
    }

    fn is_on_screen(&self, point: ScreenPoint) -> bool {
        (0.0..=VIEWPORT).contains(&point.x) && (0.0..=VIEWPORT).contains(&point.y)
    }
}

/// Projector whose whole scene is invisible while the viewport itself exists.
struct BlindProjector;

impl ScreenProjector for BlindProjector {
    fn project(&self, _tile: Tile, _subtile: SubtilePoint, _height: i32) -> Option<ScreenPoint> {
        None
    }

    fn is_on_screen(&self, _point: ScreenPoint) -> bool {
        true
    }
}

#[test]
fn finds_the_tile_whose_projection_is_nearest() {
    let base = Tile::on_ground(3200, 3400);
    let projector = GridProjector { base };

    // Tile (2, 3) from the base projects its center to (25, 35).
    let found = tile_under_point(&projector, base, ScreenPoint::new(26.0, 34.0));
    assert_eq!(found, Some(base.offset(2, 3)));
}

#[test]
fn exact_center_hit_resolves_to_that_tile() {
    let base = Tile::on_ground(0, 0);
    let projector = GridProjector { base };

    let found = tile_under_point(&projector, base, ScreenPoint::new(45.0, 15.0));
    assert_eq!(found, Some(base.offset(4, 1)));
}

#[test]
fn ties_keep_the_first_tile_in_scan_order() {
    let base = Tile::on_ground(0, 0);
    let projector = GridProjector { base };

    // (30, 35) is equidistant from the centers of tiles (2, 3) and (3, 3);
    // the x-major scan reaches (2, 3) first.
    let found = tile_under_point(&projector, base, ScreenPoint::new(30.0, 35.0));
    assert_eq!(found, Some(base.offset(2, 3)));
}

#[test]
fn off_viewport_query_point_finds_nothing() {
    let base = Tile::on_ground(0, 0);
    let projector = GridProjector { base };

    assert_eq!(
        tile_under_point(&projector, base, ScreenPoint::new(150.0, 40.0)),
        None
    );
    assert_eq!(
        tile_under_point(&projector, base, ScreenPoint::new(40.0, -1.0)),
        None
    );
}

#[test]
fn scene_with_no_visible_tiles_finds_nothing() {
    let base = Tile::on_ground(0, 0);
    assert_eq!(
        tile_under_point(&BlindProjector, base, ScreenPoint::new(10.0, 10.0)),
        None
    );
}

#[test]
fn is_closer_compares_strictly() {
    let reference = Tile::on_ground(0, 0);
    assert!(is_closer(reference, Tile::on_ground(1, 0), Tile::on_ground(2, 0)));
    assert!(!is_closer(reference, Tile::on_ground(2, 0), Tile::on_ground(1, 0)));
    assert!(!is_closer(reference, Tile::on_ground(1, 0), Tile::on_ground(0, 1)));
}
