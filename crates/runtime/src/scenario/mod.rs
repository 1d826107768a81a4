//! Scenario system for world setup.
//!
//! Scenarios say which terrain to use and where players, creatures and
//! helpers start. The same map can host several scenarios, and scenarios can
//! be shipped as RON files next to the rest of the content.

use std::path::Path;

use glam::Vec2;
use helper_content::ContentFactory;
use helper_core::{EntityId, EntityKind, EntityView, MovementStyle, PlayerView, TileView};
use serde::{Deserialize, Serialize};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::oracle::{PlayerScript, TileWorld};
use crate::simulation::Simulation;

/// Names accepted by [`Scenario::preset`].
pub const PRESETS: [&str; 3] = ["idle", "flee", "rescue"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerPlacement {
    pub center: Vec2,
    #[serde(default)]
    pub script: PlayerScript,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreaturePlacement {
    pub kind: u16,
    pub movement: MovementStyle,
    pub center: Vec2,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HelperPlacement {
    pub center: Vec2,
    /// Start chasing the closest player instead of waiting.
    #[serde(default)]
    pub lock_on_spawn: bool,
    /// Host idle-despawn countdown already running at spawn.
    #[serde(default)]
    pub idle_countdown: Option<u32>,
}

/// World setup for one simulation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    /// Map under the content directory's `maps/`; an open world otherwise.
    #[serde(default)]
    pub map: Option<String>,
    /// Size of the open world, in tiles.
    #[serde(default = "default_dimensions")]
    pub dimensions: (i32, i32),
    /// Solid row spanning the open world.
    #[serde(default)]
    pub ground_row: Option<i32>,
    #[serde(default)]
    pub players: Vec<PlayerPlacement>,
    #[serde(default)]
    pub creatures: Vec<CreaturePlacement>,
    #[serde(default)]
    pub helpers: Vec<HelperPlacement>,
}

fn default_dimensions() -> (i32, i32) {
    (400, 300)
}

impl Scenario {
    /// Loads a scenario from a RON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RuntimeError::InvalidScenario(format!("failed to read {}: {}", path.display(), e))
        })?;
        ron::from_str(&content)
            .map_err(|e| RuntimeError::InvalidScenario(format!("failed to parse scenario RON: {}", e)))
    }

    /// Built-in scenarios.
    ///
    /// - `idle`: one helper waiting in an empty cavern
    /// - `flee`: a player walks up to a waiting helper
    /// - `rescue`: a helper locked onto a player leads them to a bound merchant
    pub fn preset(name: &str) -> Result<Self> {
        let helper_center = Vec2::new(3200.0, 3000.0);
        let base = Self {
            name: name.to_owned(),
            map: None,
            dimensions: default_dimensions(),
            ground_row: Some(200),
            players: Vec::new(),
            creatures: Vec::new(),
            helpers: vec![HelperPlacement {
                center: helper_center,
                lock_on_spawn: false,
                idle_countdown: None,
            }],
        };

        let scenario = match name {
            "idle" => base,
            "flee" => Self {
                players: vec![PlayerPlacement {
                    center: helper_center + Vec2::new(-600.0, 0.0),
                    script: PlayerScript {
                        velocity: Vec2::new(3.0, 0.0),
                        ..PlayerScript::default()
                    },
                }],
                ..base
            },
            "rescue" => Self {
                players: vec![PlayerPlacement {
                    center: helper_center + Vec2::new(60.0, 0.0),
                    script: PlayerScript::default(),
                }],
                creatures: vec![CreaturePlacement {
                    kind: EntityKind::SKELETON_MERCHANT.0,
                    movement: MovementStyle::FaceClosestPlayer,
                    center: helper_center + Vec2::new(480.0, 120.0),
                }],
                helpers: vec![HelperPlacement {
                    center: helper_center,
                    lock_on_spawn: true,
                    idle_countdown: None,
                }],
                ..base
            },
            other => return Err(RuntimeError::UnknownScenario(other.to_owned())),
        };
        Ok(scenario)
    }

    /// Terrain for this scenario, loading the named map through `content`.
    pub fn world(&self, content: Option<&ContentFactory>) -> Result<TileWorld> {
        if let Some(map) = &self.map {
            let factory = content.ok_or_else(|| {
                RuntimeError::InvalidScenario(format!("map '{map}' needs a content directory"))
            })?;
            return Ok(TileWorld::from(factory.load_map(map)?));
        }

        let (tiles_x, tiles_y) = self.dimensions;
        let mut world = TileWorld::open(tiles_x, tiles_y);
        if let Some(row) = self.ground_row {
            world.fill(0, row, tiles_x, 1, TileView::SOLID);
        }
        Ok(world)
    }

    /// Builds a ready-to-step simulation.
    pub fn build(&self, config: RuntimeConfig, content: Option<&ContentFactory>) -> Result<Simulation> {
        let world = self.world(content)?;
        let mut sim = Simulation::new(config, world);

        if let Some(factory) = content {
            sim.apply_tracking(&factory.load_tracking()?);
        }

        for player in &self.players {
            sim.add_player(PlayerView::alive_at(player.center), player.script);
        }

        for creature in &self.creatures {
            let view = EntityView::new(
                EntityId::default(),
                EntityKind(creature.kind),
                creature.movement,
                Vec2::ZERO,
            );
            let size = Vec2::new(view.width, view.height);
            sim.add_creature(EntityView {
                position: creature.center - size / 2.0,
                ..view
            });
        }

        for helper in &self.helpers {
            let id = if helper.lock_on_spawn {
                sim.spawn_locked_helper(helper.center)?
            } else {
                sim.spawn_helper(helper.center)
            };
            if let Some(countdown) = helper.idle_countdown
                && let Some(agent) = sim.agent_mut(id)
            {
                agent.despawn_countdown = Some(countdown);
            }
        }

        tracing::info!(
            target: "runtime::sim",
            scenario = %self.name,
            players = self.players.len(),
            creatures = self.creatures.len(),
            helpers = self.helpers.len(),
            "Scenario built"
        );
        Ok(sim)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn every_preset_builds() {
        for name in PRESETS {
            let sim = Scenario::preset(name)
                .unwrap()
                .build(RuntimeConfig::default(), None)
                .unwrap();
            assert_eq!(sim.agents().len(), 1);
        }
        assert!(matches!(Scenario::preset("nope"), Err(RuntimeError::UnknownScenario(_))));
    }

    #[test]
    fn ron_scenario_round_trips_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"(
                name: "cavern",
                helpers: [(center: (800.0, 800.0), idle_countdown: Some(5))],
                creatures: [(kind: 453, movement: FaceClosestPlayer, center: (900.0, 820.0))],
            )"#
        )
        .unwrap();

        let scenario = Scenario::load(file.path()).unwrap();
        assert_eq!(scenario.dimensions, (400, 300));
        assert!(scenario.players.is_empty());

        let sim = scenario.build(RuntimeConfig::default(), None).unwrap();
        assert_eq!(sim.creatures()[0].center(), Vec2::new(900.0, 820.0));
        assert_eq!(sim.agents()[0].despawn_countdown, Some(5));
    }

    #[test]
    fn named_map_requires_content() {
        let scenario = Scenario {
            map: Some("caverns".to_owned()),
            ..Scenario::preset("idle").unwrap()
        };
        assert!(matches!(
            scenario.build(RuntimeConfig::default(), None),
            Err(RuntimeError::InvalidScenario(_))
        ));
    }
}
