//! Scripted players.
use glam::Vec2;
use helper_core::{PlayerOracle, PlayerView, Tick};
use serde::{Deserialize, Serialize};

/// Movement and fate of one scripted player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerScript {
    /// Distance walked every tick.
    pub velocity: Vec2,
    /// The player dies at this tick and stays dead.
    pub dies_at: Option<u64>,
    /// The player disconnects at this tick.
    pub leaves_at: Option<u64>,
}

#[derive(Clone, Debug, Default)]
pub struct PlayerTable {
    players: Vec<PlayerView>,
    scripts: Vec<PlayerScript>,
}

impl PlayerTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn join(&mut self, player: PlayerView, script: PlayerScript) {
        self.players.push(player);
        self.scripts.push(script);
    }

    pub fn player_mut(&mut self, index: usize) -> Option<&mut PlayerView> {
        self.players.get_mut(index)
    }

    /// Applies every script for the tick that is about to run.
    pub fn advance(&mut self, tick: Tick) {
        for (player, script) in self.players.iter_mut().zip(&self.scripts) {
            if !player.active {
                continue;
            }
            if script.leaves_at.is_some_and(|at| tick.0 >= at) {
                player.active = false;
                continue;
            }
            if script.dies_at.is_some_and(|at| tick.0 >= at) {
                player.dead = true;
            }
            if !player.dead {
                player.center += script.velocity;
            }
        }
    }
}

impl PlayerOracle for PlayerTable {
    fn players(&self) -> &[PlayerView] {
        &self.players
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripts_walk_kill_and_disconnect() {
        let mut table = PlayerTable::new();
        let walker = PlayerScript {
            velocity: Vec2::new(2.0, 0.0),
            dies_at: Some(2),
            ..PlayerScript::default()
        };
        table.join(PlayerView::alive_at(Vec2::ZERO), walker);
        table.join(
            PlayerView::alive_at(Vec2::ZERO),
            PlayerScript {
                leaves_at: Some(1),
                ..PlayerScript::default()
            },
        );

        for tick in 0..4 {
            table.advance(Tick::new(tick));
        }

        let players = table.players();
        assert_eq!(players[0].center, Vec2::new(4.0, 0.0));
        assert!(players[0].dead);
        assert!(!players[1].active);
    }
}
