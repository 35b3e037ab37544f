/// Kong: throws barrels on a level-dependent timer until the player gets
/// close, then flees up the board for good.

use rand::Rng;
use tracing::info;

use super::TickContext;
use crate::entities::{ActorKind, Kong, BOARD_HEIGHT, KONG_CLIMB_INTERVAL, KONG_FLEE_DISTANCE_SQ};

/// Ticks between barrels on `level`: 200 − 50×level, never below 50.
pub fn barrel_interval(level: u32) -> u32 {
    200u32.saturating_sub(level.saturating_mul(50)).max(50)
}

impl<R: Rng> TickContext<'_, R> {
    pub(super) fn update_kong(&mut self, idx: usize, mut kong: Kong) {
        self.run_kong(idx, &mut kong);
        self.store(idx, ActorKind::Kong(kong));
    }

    fn run_kong(&mut self, idx: usize, kong: &mut Kong) {
        kong.ticks_elapsed += 1;
        let pos = self.world.actors[idx].pos;
        let facing = self.world.actors[idx].facing;

        if !kong.fleeing && pos.distance_sq(self.world.player.pos) <= KONG_FLEE_DISTANCE_SQ {
            kong.fleeing = true;
            info!(x = pos.x, y = pos.y, "kong flees");
        }

        if !kong.fleeing && kong.ticks_elapsed >= barrel_interval(self.session.level) {
            kong.ticks_elapsed = 0;
            let _ = self.spawn_barrel(pos.ahead(facing), facing);
        }

        if kong.countdown % KONG_CLIMB_INTERVAL == 0 {
            kong.countdown = 0;
            if kong.fleeing {
                if pos.y + 1 >= BOARD_HEIGHT {
                    // Off the top of the board: the level is won.
                    self.raise_win();
                    self.world.actors[idx].alive = false;
                } else {
                    self.move_actor(idx, pos.above());
                }
            }
        }
        kong.countdown += 1;
    }
}
