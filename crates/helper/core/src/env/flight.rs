use glam::{IVec2, Vec2};

/// Movement heuristics the host already ships for its own flying critters.
///
/// Their formulas belong to the host; the core only relies on the contracts
/// documented per method.
pub trait FlightOracle: Send + Sync {
    /// Hover advice for a bird-like flier whose center is at tile `origin`.
    ///
    /// Scans `down_scan` tiles below `origin`: no ground or liquid there means
    /// the flier should sink. Ground within `up_range` tiles means it should
    /// climb. Both may be false; they are never both true.
    fn bird_flight(&self, down_scan: i32, up_range: i32, origin: IVec2) -> FlightAdvice;

    /// Offset along a looping flight path after `elapsed` loops (fractional),
    /// tilted by `rotation` radians and `height` world units tall.
    ///
    /// Callers derive velocity from the difference of two nearby samples.
    fn circle_offset(&self, elapsed: f32, rotation: f32, height: f32) -> Vec2;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FlightAdvice {
    pub go_down: bool,
    pub go_up: bool,
}
