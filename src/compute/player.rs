/// Player state machine: multi-tick jump, freeze, gravity, then one command.

use rand::Rng;

use super::TickContext;
use crate::entities::{Command, Facing, Sound, FREEZE_TICKS, JUMP_FINAL_STEP};

impl<R: Rng> TickContext<'_, R> {
    pub(super) fn update_player(&mut self, input: Option<Command>) {
        if !self.world.player.alive {
            return;
        }
        let here = self.world.player.pos;

        // A jump in progress owns the tick unless the player caught a ladder.
        if !self.world.can_climb(here) {
            match self.world.player.jump_sequence {
                0 => {}
                JUMP_FINAL_STEP => {
                    let above = here.above();
                    if !self.world.is_blocked(above) {
                        self.world.player.pos = above;
                    }
                    self.world.player.jump_sequence = 0;
                    return;
                }
                _ => {
                    let ahead = here.ahead(self.world.player.facing);
                    if !self.world.is_blocked(ahead) {
                        self.world.player.pos = ahead;
                    }
                    self.world.player.jump_sequence += 1;
                    return;
                }
            }
        }
        self.world.player.jump_sequence = 0;

        if self.world.player.freeze_timer > 0 {
            self.world.player.freeze_timer -= 1;
            return;
        }

        if self.world.free_fall(here) {
            self.world.player.pos = here.below();
            return;
        }

        let Some(command) = input else {
            return;
        };
        match command {
            Command::Left => self.walk(Facing::Left),
            Command::Right => self.walk(Facing::Right),
            Command::Up => {
                let above = here.above();
                if self.world.can_climb(here) && !self.world.is_blocked(above) {
                    self.world.player.pos = above;
                }
            }
            Command::Down => {
                let below = here.below();
                if !self.world.is_blocked(below) {
                    self.world.player.pos = below;
                }
            }
            Command::Jump => {
                self.play(Sound::Jump);
                let above = here.above();
                if !self.world.is_blocked(above) {
                    self.world.player.pos = above;
                    self.world.player.jump_sequence = 1;
                }
            }
            Command::Action => {
                // Emitting does not spend a charge.
                if self.world.player.burps > 0 {
                    let facing = self.world.player.facing;
                    self.play(Sound::Burp);
                    let _ = self.spawn_burp(here.ahead(facing), facing);
                }
            }
        }
    }

    /// First press turns the player around; further presses walk.
    fn walk(&mut self, towards: Facing) {
        if self.world.player.facing != towards {
            self.world.player.facing = towards;
            return;
        }
        let next = self.world.player.pos.ahead(towards);
        if !self.world.is_blocked(next) {
            self.world.player.pos = next;
        }
    }

    pub(super) fn freeze_player(&mut self) {
        let player = &mut self.world.player;
        player.freeze_timer = player.freeze_timer.saturating_add(FREEZE_TICKS);
    }
}
