//! Hover and loop heuristics for the headless world.
//!
//! Hosts ship their own formulas; these approximate them closely enough for
//! the agent to keep clear of the ground and fly recognisable loops.
use std::f32::consts::TAU;

use glam::{IVec2, Vec2};
use helper_core::{FlightAdvice, FlightOracle, WorldOracle};

use super::TileWorld;

impl TileWorld {
    /// First row below `origin` (within `depth` tiles) that a hovering flier
    /// should keep clear of.
    fn surface_below(&self, origin: IVec2, depth: i32) -> Option<i32> {
        (1..=depth.max(0)).find(|&dy| {
            self.tile(origin + IVec2::new(0, dy))
                .is_some_and(|tile| tile.is_hover_surface())
        })
    }
}

impl FlightOracle for TileWorld {
    fn bird_flight(&self, down_scan: i32, up_range: i32, origin: IVec2) -> FlightAdvice {
        let go_up = self.surface_below(origin, up_range).is_some();
        let go_down = !go_up && self.surface_below(origin, down_scan).is_none();
        FlightAdvice { go_down, go_up }
    }

    fn circle_offset(&self, elapsed: f32, rotation: f32, height: f32) -> Vec2 {
        let angle = elapsed * TAU;
        Vec2::from_angle(rotation).rotate(Vec2::new(angle.sin() * height, angle.cos() * height * 0.5))
    }
}
