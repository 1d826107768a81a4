//! In-memory oracles backing a headless simulation.
//!
//! These implement the `helper-core` oracle traits over plain collections so
//! a [`Simulation`](crate::Simulation) can build a [`HelperEnv`] every tick.
//! Terrain is static; creatures and players are rewritten by the simulation
//! between ticks.
mod entities;
mod flight;
mod map;
mod players;

use helper_core::{Env, HelperEnv, PcgRng};

pub use entities::EntityTable;
pub use map::TileWorld;
pub use players::{PlayerScript, PlayerTable};

/// Borrowed view of every oracle the engine needs for one tick.
pub struct OracleSet<'a> {
    pub world: &'a TileWorld,
    pub entities: &'a EntityTable,
    pub players: &'a PlayerTable,
    pub rng: &'a PcgRng,
}

impl<'a> OracleSet<'a> {
    /// Converts the set into the engine's dynamic environment.
    ///
    /// The tile world answers both terrain and flight queries.
    pub fn as_helper_env(&self) -> HelperEnv<'a> {
        Env::with_all(self.world, self.entities, self.players, self.world, self.rng).as_helper_env()
    }
}
