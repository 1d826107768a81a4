//! Per-instance agent record.
//!
//! [`Agent`] owns everything the state machine persists across ticks. The
//! behavioral fields (`state`, timers, target) are private so that every
//! state change goes through [`Agent::enter`], which upholds the timer and
//! target invariants. Host-owned body fields stay public because the host's
//! physics integration mutates them between ticks.

use bitflags::bitflags;
use glam::Vec2;

use crate::state::error::StateError;
use crate::state::types::common::{EntityId, EntityKind, Facing, PlayerIndex};
use crate::state::types::geometry::{Rect, to_tile};

/// The eight behavioral states of the helper agent.
///
/// Persisted as its `u8` discriminant; never reorder variants.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
    strum::FromRepr,
)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "u8", try_from = "u8")
)]
pub enum AgentState {
    /// Hovers around its spawn anchor until a player comes close.
    #[default]
    WaitForPlayer = 0,
    /// Wanders, hovering over ground and liquid. Never finds targets.
    RunAway = 1,
    /// Flies to the tracked player to start a search.
    ChasePlayer = 2,
    /// Found a target; circles in place to get the player's attention.
    CatchAttention = 3,
    /// Leads the tracked player to the target.
    LeadToTarget = 4,
    /// Reached the target; celebrates, then vanishes.
    FoundTarget = 5,
    /// Nothing found yet; stays close to the tracked player.
    HoverAroundPlayer = 6,
    /// Flies off-screen and is removed by the host.
    Despawn = 7,
}

impl AgentState {
    /// Any state other than waiting or wandering counts as helpful.
    #[inline]
    pub const fn is_helpful(self) -> bool {
        !matches!(self, Self::WaitForPlayer | Self::RunAway)
    }

    /// States in which the target position is meaningful.
    #[inline]
    pub const fn holds_target(self) -> bool {
        matches!(
            self,
            Self::CatchAttention | Self::LeadToTarget | Self::FoundTarget
        )
    }
}

impl From<AgentState> for u8 {
    fn from(state: AgentState) -> Self {
        state as u8
    }
}

impl TryFrom<u8> for AgentState {
    type Error = StateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_repr(value).ok_or(StateError::UnknownState(value))
    }
}

bitflags! {
    /// Collision results reported by the host's physics step.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CollisionFlags: u8 {
        /// Horizontal movement was blocked last step.
        const X = 1 << 0;
        /// Vertical movement was blocked last step.
        const Y = 1 << 1;
    }
}

bitflags! {
    /// Host-facing switches the state machine flips every tick.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct AgentFlags: u8 {
        /// The host should resolve tile collisions for this body.
        const TILE_COLLIDE = 1 << 0;
        const LAVA_IMMUNE  = 1 << 1;
        /// Ignores damage from players, hostiles and projectiles.
        const IMMUNE       = 1 << 2;
        /// Full state must be re-sent to remote participants.
        const NET_DIRTY    = 1 << 3;
    }
}

/// Physical body shared with the host's physics integration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Body {
    /// Top-left corner in world units.
    pub position: Vec2,
    pub velocity: Vec2,
    /// Velocity before the host's last collision response.
    pub old_velocity: Vec2,
    pub width: f32,
    pub height: f32,
    pub collision: CollisionFlags,
    pub active: bool,
}

impl Body {
    pub const HELPER_WIDTH: f32 = 18.0;
    pub const HELPER_HEIGHT: f32 = 20.0;

    /// A helper-sized body whose center sits at `center`.
    pub fn helper_at(center: Vec2) -> Self {
        let size = Vec2::new(Self::HELPER_WIDTH, Self::HELPER_HEIGHT);
        Self {
            position: center - size / 2.0,
            velocity: Vec2::ZERO,
            old_velocity: Vec2::ZERO,
            width: size.x,
            height: size.y,
            collision: CollisionFlags::empty(),
            active: true,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.position + self.size() / 2.0
    }

    /// Bottom-center point ("feet").
    #[inline]
    pub fn bottom(&self) -> Vec2 {
        Vec2::new(self.position.x + self.width / 2.0, self.position.y + self.height)
    }

    pub fn hitbox(&self) -> Rect {
        Rect::from_body(self.position, self.width, self.height)
    }
}

/// Behavioral fields persisted across saves and synced to remote participants.
///
/// This is the structured form; [`crate::state::SyncSlots`] is the packed
/// form used only at the host boundary.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentRecord {
    pub state: AgentState,
    pub target_position: Option<Vec2>,
    /// Hover anchor remembered while waiting for a player.
    pub anchor: Option<Vec2>,
    pub general_timer: u32,
    pub despawn_timer: u32,
    pub initialized: bool,
}

impl AgentRecord {
    /// Checks that the target position is present exactly in target states.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::MissingTarget`] or [`StateError::UnexpectedTarget`].
    pub fn validate(&self) -> Result<(), StateError> {
        match (self.state.holds_target(), self.target_position.is_some()) {
            (true, false) => Err(StateError::MissingTarget(self.state)),
            (false, true) => Err(StateError::UnexpectedTarget(self.state)),
            _ => Ok(()),
        }
    }
}

/// One live helper creature.
#[derive(Clone, Debug, PartialEq)]
pub struct Agent {
    pub id: EntityId,
    pub kind: EntityKind,
    pub body: Body,
    /// Movement direction; drives steering in RunAway and Despawn.
    pub direction: Facing,
    /// Direction the sprite is drawn facing (mirrored sheet).
    pub sprite_direction: Facing,
    pub target_player: Option<PlayerIndex>,
    pub flags: AgentFlags,
    /// Host idle-despawn countdown requested by the Despawn state.
    pub despawn_countdown: Option<u32>,

    state: AgentState,
    target_position: Option<Vec2>,
    anchor: Option<Vec2>,
    general_timer: u32,
    despawn_timer: u32,
    initialized: bool,
}

impl Agent {
    pub fn new(id: EntityId, kind: EntityKind, body: Body) -> Self {
        Self {
            id,
            kind,
            body,
            direction: Facing::Right,
            sprite_direction: Facing::Left,
            target_player: None,
            flags: AgentFlags::TILE_COLLIDE,
            despawn_countdown: None,
            state: AgentState::WaitForPlayer,
            target_position: None,
            anchor: None,
            general_timer: 0,
            despawn_timer: 0,
            initialized: false,
        }
    }

    #[inline]
    pub fn state(&self) -> AgentState {
        self.state
    }

    #[inline]
    pub fn target_position(&self) -> Option<Vec2> {
        self.target_position
    }

    #[inline]
    pub fn anchor(&self) -> Option<Vec2> {
        self.anchor
    }

    #[inline]
    pub fn general_timer(&self) -> u32 {
        self.general_timer
    }

    #[inline]
    pub fn despawn_timer(&self) -> u32 {
        self.despawn_timer
    }

    #[inline]
    pub fn initialized(&self) -> bool {
        self.initialized
    }

    #[inline]
    pub fn is_helpful(&self) -> bool {
        self.state.is_helpful()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.body.active
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.body.center()
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.flags.contains(AgentFlags::NET_DIRTY)
    }

    /// Clears and returns the sync flag. Called by the host's sync layer.
    pub fn take_dirty(&mut self) -> bool {
        let dirty = self.is_dirty();
        self.flags.remove(AgentFlags::NET_DIRTY);
        dirty
    }

    pub fn mark_dirty(&mut self) {
        self.flags.insert(AgentFlags::NET_DIRTY);
    }

    /// Snapshot of the persisted behavioral fields.
    pub fn record(&self) -> AgentRecord {
        AgentRecord {
            state: self.state,
            target_position: self.target_position,
            anchor: self.anchor,
            general_timer: self.general_timer,
            despawn_timer: self.despawn_timer,
            initialized: self.initialized,
        }
    }

    /// Replaces the behavioral fields with a saved or synced record.
    ///
    /// # Errors
    ///
    /// Fails without modifying the agent when the record breaks the target
    /// invariant.
    pub fn restore(&mut self, record: AgentRecord) -> Result<(), StateError> {
        record.validate()?;
        self.state = record.state;
        self.target_position = record.target_position;
        self.anchor = record.anchor;
        self.general_timer = record.general_timer;
        self.despawn_timer = record.despawn_timer;
        self.initialized = record.initialized;
        Ok(())
    }

    /// Switches state, resetting the general timer and marking the agent dirty.
    ///
    /// Leaving the target states drops the target position; entering
    /// FoundTarget clears the despawn timer.
    pub fn enter(&mut self, next: AgentState) {
        self.state = next;
        self.general_timer = 0;
        if !next.holds_target() {
            self.target_position = None;
        }
        if next == AgentState::FoundTarget {
            self.despawn_timer = 0;
        }
        self.mark_dirty();
    }

    /// Enters CatchAttention with the discovered target.
    pub fn enter_with_target(&mut self, target: Vec2) {
        self.target_position = Some(target);
        self.enter(AgentState::CatchAttention);
    }

    pub(crate) fn set_general_timer(&mut self, value: u32) {
        self.general_timer = value;
    }

    pub(crate) fn advance_general_timer(&mut self) -> u32 {
        self.general_timer += 1;
        self.general_timer
    }

    /// Stuck-in-tile bookkeeping: climbs by 2 (capped at 400) while the
    /// center tile is solid, otherwise decays by 1 toward 0.
    pub(crate) fn update_stuck_timer(&mut self, embedded: bool) {
        self.general_timer = if embedded {
            (self.general_timer + 2).min(400)
        } else {
            self.general_timer.saturating_sub(1)
        };
    }

    pub(crate) fn advance_despawn_timer(&mut self) -> u32 {
        self.despawn_timer += 1;
        self.despawn_timer
    }

    pub(crate) fn reset_despawn_timer(&mut self) {
        self.despawn_timer = 0;
    }

    pub(crate) fn set_anchor(&mut self, anchor: Vec2) {
        self.anchor = Some(anchor);
    }

    pub(crate) fn mark_initialized(&mut self) {
        self.initialized = true;
    }

    pub(crate) fn center_tile(&self) -> glam::IVec2 {
        to_tile(self.center())
    }
}
