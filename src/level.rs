//! Static level layout
//!
//! World size, walls, doors and buy stations are session-scoped data handed
//! to the simulation at start. Only door open flags change afterwards, and
//! those live in the simulation's own [`Geometry`], not here.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{BUY_STATION_SIZE, PLAYER_SIZE};
use crate::sim::geometry::{Bounds, Door, Geometry, Rect};
use crate::sim::state::{BuyStation, StationKind};

/// Door as described by a level file (always starts closed)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoorDef {
    pub id: u32,
    pub rect: Rect,
    pub cost: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("failed to read level file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse level: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("world dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: f32, height: f32 },

    #[error("{kind} #{index} has a degenerate rectangle")]
    DegenerateRect { kind: &'static str, index: usize },

    #[error("duplicate door id {0}")]
    DuplicateDoorId(u32),

    #[error("player start ({x}, {y}) is outside the world or inside geometry")]
    BlockedStart { x: f32, y: f32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelLayout {
    pub width: f32,
    pub height: f32,
    pub player_start: Vec2,
    pub walls: Vec<Rect>,
    pub doors: Vec<DoorDef>,
    pub stations: Vec<BuyStation>,
}

impl Default for LevelLayout {
    fn default() -> Self {
        const W: f32 = 3000.0;
        const H: f32 = 2000.0;

        let walls = vec![
            // Outer walls
            Rect::new(0.0, 0.0, W, 20.0),
            Rect::new(0.0, H - 20.0, W, 20.0),
            Rect::new(0.0, 0.0, 20.0, H),
            Rect::new(W - 20.0, 0.0, 20.0, H),
            // Left vertical divider
            Rect::new(700.0, 20.0, 30.0, 450.0),
            Rect::new(700.0, 750.0, 30.0, 1230.0),
            // Middle vertical divider
            Rect::new(1500.0, 20.0, 30.0, 550.0),
            Rect::new(1500.0, 900.0, 30.0, 1080.0),
            // Horizontal dividers
            Rect::new(730.0, 600.0, 470.0, 30.0),
            Rect::new(1530.0, 600.0, 470.0, 30.0),
            Rect::new(730.0, 1300.0, 470.0, 30.0),
            Rect::new(1530.0, 1300.0, 470.0, 30.0),
            // Cover
            Rect::new(200.0, 400.0, 250.0, 30.0),
            Rect::new(300.0, 900.0, 30.0, 250.0),
            Rect::new(900.0, 300.0, 30.0, 200.0),
            Rect::new(1100.0, 1100.0, 200.0, 30.0),
            Rect::new(1700.0, 300.0, 250.0, 30.0),
            Rect::new(2200.0, 800.0, 30.0, 300.0),
            Rect::new(2000.0, 1500.0, 300.0, 30.0),
            Rect::new(400.0, 1600.0, 200.0, 30.0),
        ];

        let doors = vec![
            DoorDef { id: 0, rect: Rect::new(700.0, 490.0, 30.0, 240.0), cost: 100 },
            DoorDef { id: 1, rect: Rect::new(1220.0, 600.0, 260.0, 30.0), cost: 150 },
            DoorDef { id: 2, rect: Rect::new(1500.0, 590.0, 30.0, 290.0), cost: 200 },
            DoorDef { id: 3, rect: Rect::new(1220.0, 1300.0, 260.0, 30.0), cost: 150 },
        ];

        let station = |x: f32, y: f32, kind: StationKind, cost: u32| BuyStation {
            pos: Vec2::new(x, y),
            kind,
            cost,
            radius: BUY_STATION_SIZE,
        };
        let stations = vec![
            station(250.0, H / 2.0, StationKind::Ammo, 50),
            station(800.0, 300.0, StationKind::Health, 75),
            station(1800.0, 1400.0, StationKind::Ammo, 50),
            station(2600.0, 800.0, StationKind::Health, 75),
        ];

        Self {
            width: W,
            height: H,
            player_start: Vec2::new(200.0, H / 2.0),
            walls,
            doors,
            stations,
        }
    }
}

impl LevelLayout {
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let level: LevelLayout = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    pub fn from_path(path: &Path) -> Result<Self, LevelError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }

    /// Fresh geometry with every door closed
    pub fn build_geometry(&self) -> Geometry {
        Geometry::new(
            self.walls.clone(),
            self.doors
                .iter()
                .map(|d| Door::new(d.id, d.rect, d.cost))
                .collect(),
        )
    }

    pub fn validate(&self) -> Result<(), LevelError> {
        if !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0) {
            return Err(LevelError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        if let Some(index) = self.walls.iter().position(|w| !w.is_valid()) {
            return Err(LevelError::DegenerateRect { kind: "wall", index });
        }
        if let Some(index) = self.doors.iter().position(|d| !d.rect.is_valid()) {
            return Err(LevelError::DegenerateRect { kind: "door", index });
        }

        let mut ids: Vec<u32> = self.doors.iter().map(|d| d.id).collect();
        ids.sort_unstable();
        if let Some(pair) = ids.windows(2).find(|w| w[0] == w[1]) {
            return Err(LevelError::DuplicateDoorId(pair[0]));
        }

        let start = self.player_start;
        let clamped = self.bounds().clamp(start, PLAYER_SIZE);
        if clamped != start || self.build_geometry().is_blocked(start, PLAYER_SIZE) {
            return Err(LevelError::BlockedStart {
                x: start.x,
                y: start.y,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_is_valid() {
        let level = LevelLayout::default();
        assert!(level.validate().is_ok());
        assert_eq!(level.doors.len(), 4);
        assert_eq!(level.stations.len(), 4);
        assert!(level.build_geometry().doors.iter().all(|d| !d.is_open()));
    }

    #[test]
    fn test_small_layout_from_json() {
        let json = r#"{
            "width": 400, "height": 300,
            "player_start": [50, 50],
            "walls": [{ "x": 100, "y": 0, "width": 20, "height": 300 }],
            "doors": [{ "id": 4, "rect": { "x": 100, "y": 100, "width": 20, "height": 50 }, "cost": 10 }],
            "stations": [{ "pos": [60, 200], "kind": "health", "cost": 5, "radius": 40 }]
        }"#;
        let level = LevelLayout::from_json(json).unwrap();
        assert_eq!(level.bounds(), Bounds::new(400.0, 300.0));
        assert_eq!(level.stations[0].kind, StationKind::Health);
        let geo = level.build_geometry();
        assert_eq!(geo.door(4).map(|d| d.cost), Some(10));
    }

    #[test]
    fn test_rejects_duplicate_door_ids() {
        let mut level = LevelLayout::default();
        level.doors[1].id = level.doors[0].id;
        assert!(matches!(level.validate(), Err(LevelError::DuplicateDoorId(0))));
    }

    #[test]
    fn test_rejects_start_inside_wall() {
        let mut level = LevelLayout::default();
        level.player_start = Vec2::new(715.0, 100.0);
        assert!(matches!(level.validate(), Err(LevelError::BlockedStart { .. })));
    }

    #[test]
    fn test_rejects_degenerate_wall() {
        let mut level = LevelLayout::default();
        level.walls.push(Rect::new(10.0, 10.0, 0.0, 5.0));
        assert!(matches!(
            level.validate(),
            Err(LevelError::DegenerateRect { kind: "wall", .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = LevelLayout::from_path(Path::new("/nonexistent/level.json")).unwrap_err();
        assert!(matches!(err, LevelError::Io(_)));
    }
}
