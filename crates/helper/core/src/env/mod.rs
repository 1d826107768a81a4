//! Traits describing the host world the agent lives in.
//!
//! Oracles expose tile queries, the entity table, the player list, the host's
//! flight heuristics and a seeded random source. The [`Env`] aggregate bundles
//! them so the state machine can reach everything it needs without coupling
//! to a concrete host.
mod entities;
mod error;
mod flight;
mod players;
mod rng;
mod world;

pub use entities::{EntityOracle, EntityView, MovementStyle};
pub use error::OracleError;
pub use flight::{FlightAdvice, FlightOracle};
pub use players::{PlayerOracle, PlayerView};
pub use rng::{PcgRng, RngOracle, RollContext, compute_seed};
pub use world::{TileView, WorldDimensions, WorldOracle};

/// Aggregates the read-only oracles consulted during an agent tick.
pub struct Env<'a, W, E, P, F, R>
where
    W: WorldOracle + ?Sized,
    E: EntityOracle + ?Sized,
    P: PlayerOracle + ?Sized,
    F: FlightOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    world: Option<&'a W>,
    entities: Option<&'a E>,
    players: Option<&'a P>,
    flight: Option<&'a F>,
    rng: Option<&'a R>,
}

impl<W, E, P, F, R> Clone for Env<'_, W, E, P, F, R>
where
    W: WorldOracle + ?Sized,
    E: EntityOracle + ?Sized,
    P: PlayerOracle + ?Sized,
    F: FlightOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<W, E, P, F, R> Copy for Env<'_, W, E, P, F, R>
where
    W: WorldOracle + ?Sized,
    E: EntityOracle + ?Sized,
    P: PlayerOracle + ?Sized,
    F: FlightOracle + ?Sized,
    R: RngOracle + ?Sized,
{
}

pub type HelperEnv<'a> = Env<
    'a,
    dyn WorldOracle + 'a,
    dyn EntityOracle + 'a,
    dyn PlayerOracle + 'a,
    dyn FlightOracle + 'a,
    dyn RngOracle + 'a,
>;

impl<'a, W, E, P, F, R> Env<'a, W, E, P, F, R>
where
    W: WorldOracle + ?Sized,
    E: EntityOracle + ?Sized,
    P: PlayerOracle + ?Sized,
    F: FlightOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(
        world: Option<&'a W>,
        entities: Option<&'a E>,
        players: Option<&'a P>,
        flight: Option<&'a F>,
        rng: Option<&'a R>,
    ) -> Self {
        Self {
            world,
            entities,
            players,
            flight,
            rng,
        }
    }

    pub fn with_all(
        world: &'a W,
        entities: &'a E,
        players: &'a P,
        flight: &'a F,
        rng: &'a R,
    ) -> Self {
        Self::new(
            Some(world),
            Some(entities),
            Some(players),
            Some(flight),
            Some(rng),
        )
    }

    pub fn empty() -> Self {
        Self {
            world: None,
            entities: None,
            players: None,
            flight: None,
            rng: None,
        }
    }

    /// Returns the WorldOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::WorldNotAvailable` if no world oracle was provided.
    pub fn world(&self) -> Result<&'a W, OracleError> {
        self.world.ok_or(OracleError::WorldNotAvailable)
    }

    /// Returns the EntityOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::EntitiesNotAvailable` if no entity oracle was provided.
    pub fn entities(&self) -> Result<&'a E, OracleError> {
        self.entities.ok_or(OracleError::EntitiesNotAvailable)
    }

    /// Returns the PlayerOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::PlayersNotAvailable` if no player oracle was provided.
    pub fn players(&self) -> Result<&'a P, OracleError> {
        self.players.ok_or(OracleError::PlayersNotAvailable)
    }

    /// Returns the FlightOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::FlightNotAvailable` if no flight oracle was provided.
    pub fn flight(&self) -> Result<&'a F, OracleError> {
        self.flight.ok_or(OracleError::FlightNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::RngNotAvailable` if no rng oracle was provided.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }
}

impl<'a, W, E, P, F, R> Env<'a, W, E, P, F, R>
where
    W: WorldOracle + 'a,
    E: EntityOracle + 'a,
    P: PlayerOracle + 'a,
    F: FlightOracle + 'a,
    R: RngOracle + 'a,
{
    /// Converts this environment into a trait-object based `HelperEnv`.
    pub fn as_helper_env(&self) -> HelperEnv<'a> {
        let world: Option<&'a dyn WorldOracle> = self.world.map(|world| world as _);
        let entities: Option<&'a dyn EntityOracle> = self.entities.map(|entities| entities as _);
        let players: Option<&'a dyn PlayerOracle> = self.players.map(|players| players as _);
        let flight: Option<&'a dyn FlightOracle> = self.flight.map(|flight| flight as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|rng| rng as _);
        Env::new(world, entities, players, flight, rng)
    }
}
