use crate::state::EntityKind;

/// Helper tunables and fixed behavior constants.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HelperConfig {
    /// Host kind id assigned to the helper creature.
    pub helper_kind: EntityKind,
    /// Ticks of engaged behavior before the agent gives up and leaves.
    pub despawn_ticks: u32,
    /// Distance at which a waiting agent notices a player and flees.
    pub detection_range: f32,
    /// Horizontal half-extent of the target search window, in tiles.
    pub search_radius_x: i32,
    /// Vertical half-extent of the target search window, in tiles.
    pub search_radius_y: i32,
    /// Player distance beyond which a leading agent stops and waits.
    pub nudge_range: f32,
    /// Distance within which a player counts as near a helper.
    pub near_helper_range: f32,
    pub base_spawn_chance: f32,
    pub anniversary_spawn_chance: f32,
    /// Spawn chance added per point of luck above the neutral roll.
    pub luck_spawn_step: f32,
}

impl HelperConfig {
    // ===== compile-time constants =====
    /// Upper bound of effects a single agent tick can emit.
    pub const MAX_EFFECTS_PER_TICK: usize = 8;
    /// Interpolation factor for smoothed steering toward a desired velocity.
    pub const STEERING_LERP: f32 = 0.07;
    /// Stuck timer value above which hover advice is ignored.
    pub const STUCK_THRESHOLD: u32 = 300;
    /// Ticks spent decelerating before circling starts.
    pub const SETTLE_TICKS: u32 = 15;
    /// CatchAttention hands over to LeadToTarget at this timer value.
    pub const ATTENTION_TICKS: u32 = 210;
    /// FoundTarget vanishes once the timer exceeds this value.
    pub const CELEBRATION_TICKS: u32 = 200;
    /// Idle-despawn countdown requested while flying off.
    pub const DESPAWN_COUNTDOWN: u32 = 10;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_HELPER_KIND: EntityKind = EntityKind(700);
    pub const DEFAULT_DESPAWN_TICKS: u32 = 18_000;
    pub const DEFAULT_DETECTION_RANGE: f32 = 250.0;
    pub const DEFAULT_SEARCH_RADIUS_X: i32 = 75;
    pub const DEFAULT_SEARCH_RADIUS_Y: i32 = 50;
    pub const DEFAULT_NUDGE_RANGE: f32 = 300.0;
    pub const DEFAULT_NEAR_HELPER_RANGE: f32 = 1920.0;
    pub const DEFAULT_BASE_SPAWN_CHANCE: f32 = 0.0125;
    pub const DEFAULT_ANNIVERSARY_SPAWN_CHANCE: f32 = 0.05;
    pub const DEFAULT_LUCK_SPAWN_STEP: f32 = 0.005;

    pub fn new() -> Self {
        Self {
            helper_kind: Self::DEFAULT_HELPER_KIND,
            despawn_ticks: Self::DEFAULT_DESPAWN_TICKS,
            detection_range: Self::DEFAULT_DETECTION_RANGE,
            search_radius_x: Self::DEFAULT_SEARCH_RADIUS_X,
            search_radius_y: Self::DEFAULT_SEARCH_RADIUS_Y,
            nudge_range: Self::DEFAULT_NUDGE_RANGE,
            near_helper_range: Self::DEFAULT_NEAR_HELPER_RANGE,
            base_spawn_chance: Self::DEFAULT_BASE_SPAWN_CHANCE,
            anniversary_spawn_chance: Self::DEFAULT_ANNIVERSARY_SPAWN_CHANCE,
            luck_spawn_step: Self::DEFAULT_LUCK_SPAWN_STEP,
        }
    }

    pub fn with_helper_kind(helper_kind: EntityKind) -> Self {
        Self {
            helper_kind,
            ..Self::new()
        }
    }
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self::new()
    }
}
