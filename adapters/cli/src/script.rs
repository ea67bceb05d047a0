use std::{fs, path::Path};

use gridwalk_core::{Tile, SCENE_SIZE};
use gridwalk_geometry::Area;
use serde::Deserialize;
use thiserror::Error;

/// A walk scenario loaded from a TOML script.
///
/// Coordinates in the script are `[x, y]` pairs on the script's plane; the
/// optional `region_base` pins the loaded scene, otherwise the scene is
/// centered on the start tile.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct WalkScript {
    #[serde(default)]
    plane: i32,
    start: [i32; 2],
    waypoints: Vec<[i32; 2]>,
    region_base: Option<[i32; 2]>,
    area: Option<AreaSpec>,
}

/// Area description embedded in a walk script.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(crate) enum AreaSpec {
    /// Arbitrary polygon ring.
    Polygon {
        /// Ordered vertex ring of the polygon.
        vertices: Vec<[i32; 2]>,
    },
    /// Axis-aligned rectangle spanning two corner tiles inclusively.
    Corners {
        /// South-west corner tile.
        sw: [i32; 2],
        /// North-east corner tile.
        ne: [i32; 2],
    },
    /// Axis-aligned square around a center tile.
    Center {
        /// Center tile of the square.
        center: [i32; 2],
        /// Distance from the center to each side.
        radius: i32,
    },
}

impl WalkScript {
    /// Plane every script coordinate sits on.
    pub(crate) fn plane(&self) -> i32 {
        self.plane
    }

    /// Tile the agent starts from.
    pub(crate) fn start_tile(&self) -> Tile {
        tile(self.start, self.plane)
    }

    /// Ordered waypoint tiles of the scripted path.
    pub(crate) fn waypoint_tiles(&self) -> Vec<Tile> {
        self.waypoints
            .iter()
            .map(|pair| tile(*pair, self.plane))
            .collect()
    }

    /// South-west origin of the loaded scene.
    ///
    /// Defaults to centering the scene on the start tile.
    pub(crate) fn region_base_tile(&self) -> Tile {
        match self.region_base {
            Some(pair) => tile(pair, self.plane),
            None => self.start_tile().offset(-(SCENE_SIZE / 2), -(SCENE_SIZE / 2)),
        }
    }

    /// Area described by the script, if any.
    pub(crate) fn area(&self) -> Option<Area> {
        let plane = self.plane;
        self.area.as_ref().map(|spec| match spec {
            AreaSpec::Polygon { vertices } => Area::from_polygon(
                vertices.iter().map(|pair| tile(*pair, plane)).collect(),
                plane,
            ),
            AreaSpec::Corners { sw, ne } => {
                Area::from_corners(tile(*sw, plane), tile(*ne, plane), plane)
            }
            AreaSpec::Center { center, radius } => {
                Area::from_center(tile(*center, plane), *radius)
            }
        })
    }
}

fn tile(pair: [i32; 2], plane: i32) -> Tile {
    Tile::new(pair[0], pair[1], plane)
}

/// Errors that can occur while loading a walk script.
#[derive(Debug, Error)]
pub(crate) enum ScriptError {
    /// The script file could not be read.
    #[error("could not read walk script '{path}': {source}")]
    Read {
        /// Path of the script file.
        path: String,
        /// Underlying filesystem error.
        source: std::io::Error,
    },
    /// The script file was not valid TOML for a walk scenario.
    #[error("could not parse walk script '{path}': {source}")]
    Parse {
        /// Path of the script file.
        path: String,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
    /// The script described a path with no waypoints.
    #[error("walk script '{path}' lists no waypoints")]
    EmptyPath {
        /// Path of the script file.
        path: String,
    },
}

/// Loads and validates a walk script from disk.
pub(crate) fn load(path: &Path) -> Result<WalkScript, ScriptError> {
    let label = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|source| ScriptError::Read {
        path: label.clone(),
        source,
    })?;
    parse(&label, &contents)
}

fn parse(label: &str, contents: &str) -> Result<WalkScript, ScriptError> {
    let script: WalkScript = toml::from_str(contents).map_err(|source| ScriptError::Parse {
        path: label.to_owned(),
        source,
    })?;
    if script.waypoints.is_empty() {
        return Err(ScriptError::EmptyPath {
            path: label.to_owned(),
        });
    }
    Ok(script)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_SCRIPT: &str = r#"
plane = 1
start = [3200, 3400]
waypoints = [[3200, 3400], [3220, 3400], [3230, 3412]]
region_base = [3180, 3380]

[area]
kind = "corners"
sw = [3225, 3405]
ne = [3235, 3415]
"#;

    #[test]
    fn parses_a_full_script() {
        let script = parse("test.toml", FULL_SCRIPT).expect("script parses");
        assert_eq!(script.plane(), 1);
        assert_eq!(script.start_tile(), Tile::new(3200, 3400, 1));
        assert_eq!(script.waypoint_tiles().len(), 3);
        assert_eq!(script.region_base_tile(), Tile::new(3180, 3380, 1));

        let area = script.area().expect("script carries an area");
        assert_eq!(area.plane(), 1);
        assert!(area.contains(3230, 3410));
    }

    #[test]
    fn defaults_plane_and_region_base() {
        let script = parse(
            "test.toml",
            "start = [100, 200]\nwaypoints = [[110, 200]]\n",
        )
        .expect("minimal script parses");
        assert_eq!(script.plane(), 0);
        assert_eq!(
            script.region_base_tile(),
            Tile::on_ground(100 - 52, 200 - 52)
        );
        assert!(script.area().is_none());
    }

    #[test]
    fn parses_polygon_and_center_areas() {
        let polygon = parse(
            "test.toml",
            r#"
start = [0, 0]
waypoints = [[5, 5]]

[area]
kind = "polygon"
vertices = [[0, 0], [0, 10], [10, 10], [10, 0]]
"#,
        )
        .expect("polygon script parses");
        assert_eq!(polygon.area().expect("area").tiles().len(), 121);

        let center = parse(
            "test.toml",
            r#"
start = [0, 0]
waypoints = [[5, 5]]

[area]
kind = "center"
center = [5, 5]
radius = 1
"#,
        )
        .expect("center script parses");
        assert_eq!(center.area().expect("area").tiles().len(), 9);
    }

    #[test]
    fn rejects_scripts_without_waypoints() {
        let error = parse("test.toml", "start = [0, 0]\nwaypoints = []\n")
            .expect_err("empty path must be rejected");
        assert!(matches!(error, ScriptError::EmptyPath { .. }));
    }

    #[test]
    fn rejects_malformed_toml() {
        let error = parse("test.toml", "start = ").expect_err("malformed TOML must fail");
        assert!(matches!(error, ScriptError::Parse { .. }));
    }
}
