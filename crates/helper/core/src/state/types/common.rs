use std::fmt;

/// Host slot of a world entity (index into the host's entity table).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Host type id of a world entity ("what kind of creature is this").
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityKind(pub u16);

impl EntityKind {
    /// Merchant that waits bound in the caverns until rescued.
    pub const SKELETON_MERCHANT: Self = Self(453);
    /// Disguised nymph; counts as a "friendly lost" character.
    pub const LOST_GIRL: Self = Self(195);
    pub const FAIRY_PINK: Self = Self(583);
    pub const FAIRY_GREEN: Self = Self(584);
    pub const FAIRY_BLUE: Self = Self(585);

    /// The three built-in fairies that flutter with each other natively.
    pub const BUILT_IN_FAIRIES: [Self; 3] = [Self::FAIRY_PINK, Self::FAIRY_GREEN, Self::FAIRY_BLUE];
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "kind:{}", self.0)
    }
}

/// Index into the host's player collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerIndex(pub u16);

impl PlayerIndex {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Discrete simulation step (60 per second).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Self = Self(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Horizontal facing sign.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// `true` maps to [`Facing::Right`], `false` to [`Facing::Left`].
    #[inline]
    pub const fn from_bool(positive: bool) -> Self {
        if positive { Self::Right } else { Self::Left }
    }

    /// Facing that points away from `threat_x` as seen from `own_x`.
    ///
    /// A threat directly above (equal x) counts as being on the left.
    #[inline]
    pub fn away_from(threat_x: f32, own_x: f32) -> Self {
        Self::from_bool(threat_x <= own_x)
    }

    #[inline]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    #[inline]
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Returns `1.0` when `positive` holds and `-1.0` otherwise.
#[inline]
pub(crate) const fn signum_of(positive: bool) -> f32 {
    if positive { 1.0 } else { -1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn away_from_treats_equal_x_as_left() {
        assert_eq!(Facing::away_from(10.0, 10.0), Facing::Right);
        assert_eq!(Facing::away_from(5.0, 10.0), Facing::Right);
        assert_eq!(Facing::away_from(15.0, 10.0), Facing::Left);
    }

    #[test]
    fn flipped_is_an_involution() {
        assert_eq!(Facing::Left.flipped().flipped(), Facing::Left);
        assert_eq!(Facing::Right.flipped().sign(), -1.0);
    }
}
