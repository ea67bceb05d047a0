#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Polygon areas over the world tile grid.
//!
//! An [`Area`] encloses an ordered ring of tile vertices on a single plane
//! and answers membership and enumeration queries with exact integer
//! arithmetic. Degenerate polygons (fewer than three vertices, collinear or
//! self-intersecting rings) yield empty results rather than errors; callers
//! must supply valid simple polygons when they need meaningful answers.

use gridwalk_core::Tile;
use rand::seq::SliceRandom;
use rand::Rng;

/// How a point lying exactly on a polygon edge or vertex is classified.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoundaryRule {
    /// Boundary points count as inside the polygon.
    Inclusive,
    /// Boundary points count as outside the polygon.
    Exclusive,
}

/// Ray-casting point-in-polygon test with an explicit boundary rule.
///
/// Casts a horizontal ray rightward from `(x, y)` and counts crossings with
/// the closed ring described by `vertices` (implicit edge from the last
/// vertex back to the first). Edge straddling uses the half-open
/// "strictly greater than" convention on both endpoints so a vertex lying
/// exactly on the ray is never counted twice. Points on an edge or vertex
/// are resolved by `rule` before any crossing is counted. All comparisons
/// are exact over 64-bit integers.
///
/// Rings with fewer than three vertices contain nothing.
#[must_use]
pub fn point_in_polygon(vertices: &[Tile], x: i32, y: i32, rule: BoundaryRule) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let px = i64::from(x);
    let py = i64::from(y);
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let xi = i64::from(vertices[i].x());
        let yi = i64::from(vertices[i].y());
        let xj = i64::from(vertices[j].x());
        let yj = i64::from(vertices[j].y());
        j = i;

        if on_segment(px, py, xi, yi, xj, yj) {
            return rule == BoundaryRule::Inclusive;
        }

        if (yi > py) != (yj > py) {
            // The edge straddles the ray; the crossing lies left of the
            // point iff px < xi + (xj - xi) * (py - yi) / (yj - yi).
            // Cross-multiplied to stay in integers, flipping for the sign
            // of the denominator.
            let dy = yj - yi;
            let lhs = (px - xi) * dy;
            let rhs = (xj - xi) * (py - yi);
            let crossed = if dy > 0 { lhs < rhs } else { lhs > rhs };
            if crossed {
                inside = !inside;
            }
        }
    }
    inside
}

fn on_segment(px: i64, py: i64, xi: i64, yi: i64, xj: i64, yj: i64) -> bool {
    let cross = (xj - xi) * (py - yi) - (yj - yi) * (px - xi);
    cross == 0
        && px >= xi.min(xj)
        && px <= xi.max(xj)
        && py >= yi.min(yj)
        && py <= yi.max(yj)
}

/// Axis-aligned bounding box of an [`Area`], expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AreaBounds {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl AreaBounds {
    /// Westernmost vertex coordinate.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Southernmost vertex coordinate.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Distance between the westernmost and easternmost vertices.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Distance between the southernmost and northernmost vertices.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }
}

/// A simple polygon made of world tiles on a single plane.
///
/// Immutable after construction, so shared references may be queried
/// concurrently. Tile membership follows [`BoundaryRule::Inclusive`]: tiles
/// on any edge or vertex of the ring belong to the area.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Area {
    vertices: Vec<Tile>,
    plane: i32,
}

impl Area {
    /// Creates an area from an ordered polygon ring of vertex tiles.
    ///
    /// Vertex order defines the edges; the ring is closed implicitly from
    /// the last vertex back to the first. Every vertex is relocated onto
    /// `plane` so the area invariant holds regardless of the planes the
    /// input tiles carried.
    #[must_use]
    pub fn from_polygon(vertices: Vec<Tile>, plane: i32) -> Self {
        let vertices = vertices
            .into_iter()
            .map(|vertex| vertex.with_plane(plane))
            .collect();
        Self { vertices, plane }
    }

    /// Creates a rectangular area spanning both corner tiles inclusively.
    ///
    /// `sw` must be the south-west corner and `ne` the north-east corner.
    #[must_use]
    pub fn from_corners(sw: Tile, ne: Tile, plane: i32) -> Self {
        Self::from_polygon(
            vec![
                Tile::new(sw.x(), sw.y(), plane),
                Tile::new(ne.x(), sw.y(), plane),
                Tile::new(ne.x(), ne.y(), plane),
                Tile::new(sw.x(), ne.y(), plane),
            ],
            plane,
        )
    }

    /// Creates the axis-aligned bounding square around `center` whose sides
    /// sit `radius` tiles away, on the center tile's plane.
    #[must_use]
    pub fn from_center(center: Tile, radius: i32) -> Self {
        let plane = center.plane();
        Self::from_polygon(
            vec![
                center.offset(-radius, radius),
                center.offset(radius, radius),
                center.offset(radius, -radius),
                center.offset(-radius, -radius),
            ],
            plane,
        )
    }

    /// Plane the area sits on.
    #[must_use]
    pub const fn plane(&self) -> i32 {
        self.plane
    }

    /// Vertex ring the area was built from.
    #[must_use]
    pub fn vertices(&self) -> &[Tile] {
        &self.vertices
    }

    /// Whether the grid position lies inside the area, boundary inclusive.
    ///
    /// The plane is not consulted; use [`Area::contains_any`] when plane
    /// exactness matters.
    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        point_in_polygon(&self.vertices, x, y, BoundaryRule::Inclusive)
    }

    /// Whether the tile's grid position lies inside the area.
    #[must_use]
    pub fn contains_tile(&self, tile: Tile) -> bool {
        self.contains(tile.x(), tile.y())
    }

    /// Whether at least one of `tiles` is an exact member of the area.
    ///
    /// Membership here is an exact-match search against the enumerated tile
    /// set, including the plane gate: the provided `plane` must equal the
    /// area's plane for any tile to match.
    #[must_use]
    pub fn contains_any(&self, plane: i32, tiles: &[Tile]) -> bool {
        if plane != self.plane {
            return false;
        }
        let members = self.tiles();
        tiles
            .iter()
            .any(|tile| members.iter().any(|member| member == tile))
    }

    /// Axis-aligned bounding box over the vertex ring.
    #[must_use]
    pub fn bounds(&self) -> Option<AreaBounds> {
        let first = self.vertices.first()?;
        let mut min_x = first.x();
        let mut max_x = first.x();
        let mut min_y = first.y();
        let mut max_y = first.y();
        for vertex in &self.vertices[1..] {
            min_x = min_x.min(vertex.x());
            max_x = max_x.max(vertex.x());
            min_y = min_y.min(vertex.y());
            max_y = max_y.max(vertex.y());
        }
        Some(AreaBounds {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        })
    }

    /// Every tile the area contains, x ascending then y ascending.
    ///
    /// Scans the full bounding box, so cost is proportional to its surface;
    /// areas are expected to stay within viewport-sized extents.
    #[must_use]
    pub fn tiles(&self) -> Vec<Tile> {
        let Some(bounds) = self.bounds() else {
            return Vec::new();
        };
        let mut tiles = Vec::new();
        for x in bounds.x()..=bounds.x() + bounds.width() {
            for y in bounds.y()..=bounds.y() + bounds.height() {
                if self.contains(x, y) {
                    tiles.push(Tile::new(x, y, self.plane));
                }
            }
        }
        tiles
    }

    /// Central tile of the area: the vertex mean rounded to nearest.
    ///
    /// `None` when the area has no vertices.
    #[must_use]
    pub fn central_tile(&self) -> Option<Tile> {
        if self.vertices.is_empty() {
            return None;
        }
        let count = self.vertices.len() as f64;
        let total_x: i64 = self.vertices.iter().map(|vertex| i64::from(vertex.x())).sum();
        let total_y: i64 = self.vertices.iter().map(|vertex| i64::from(vertex.y())).sum();
        let x = (total_x as f64 / count).round() as i32;
        let y = (total_y as f64 / count).round() as i32;
        Some(Tile::new(x, y, self.plane))
    }

    /// Member tile nearest to `base` by Euclidean distance.
    ///
    /// Ties keep the first tile in enumeration order (x ascending, then y
    /// ascending). `None` when the area contains no tiles.
    #[must_use]
    pub fn nearest_tile(&self, base: Tile) -> Option<Tile> {
        let mut nearest: Option<(Tile, f64)> = None;
        for tile in self.tiles() {
            let distance = tile.distance_to(base);
            match nearest {
                Some((_, best)) if distance >= best => {}
                _ => nearest = Some((tile, distance)),
            }
        }
        nearest.map(|(tile, _)| tile)
    }

    /// Uniformly random member tile, or `None` when the area is empty.
    #[must_use]
    pub fn random_tile(&self, rng: &mut impl Rng) -> Option<Tile> {
        self.tiles().choose(rng).copied()
    }
}
