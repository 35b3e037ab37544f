/// Enemy AI: a shared attack / idle / special-move cycle with per-variant
/// behaviour plugged into each phase.

use rand::Rng;
use tracing::trace;

use super::TickContext;
use crate::entities::{
    ActorKind, ClimbState, Enemy, EnemyVariant, ENEMY_SPECIAL_INTERVAL, FREEZE_TICKS,
};

impl<R: Rng> TickContext<'_, R> {
    pub(super) fn update_enemy(&mut self, idx: usize, mut enemy: Enemy) {
        self.run_enemy(idx, &mut enemy);
        self.store(idx, ActorKind::Enemy(enemy));
    }

    fn run_enemy(&mut self, idx: usize, enemy: &mut Enemy) {
        if self.enemy_attack(idx, enemy) {
            return;
        }
        self.enemy_idle(idx, enemy);

        if enemy.countdown % ENEMY_SPECIAL_INTERVAL == 0 {
            enemy.countdown = 0;
            self.special_move(idx, enemy);
            if self.enemy_attack(idx, enemy) {
                return;
            }
        }
        enemy.countdown += 1;
    }

    /// Resolve contact with the player. Returns `true` when the contact
    /// consumed this phase.
    fn enemy_attack(&mut self, idx: usize, enemy: &mut Enemy) -> bool {
        let pos = self.world.actors[idx].pos;
        if !self.world.player.is_at(pos) {
            return false;
        }
        match &mut enemy.variant {
            EnemyVariant::Koopa { freeze_cooldown } => {
                if *freeze_cooldown > 0 {
                    return false;
                }
                *freeze_cooldown = FREEZE_TICKS;
                trace!(x = pos.x, y = pos.y, "koopa froze the player");
                self.freeze_player();
                true
            }
            EnemyVariant::Fireball { .. } | EnemyVariant::Barrel { .. } => {
                self.kill_player();
                true
            }
        }
    }

    /// Behaviour that runs every tick.
    fn enemy_idle(&mut self, idx: usize, enemy: &mut Enemy) {
        match &mut enemy.variant {
            EnemyVariant::Fireball { .. } => {}
            EnemyVariant::Koopa { freeze_cooldown } => {
                *freeze_cooldown = freeze_cooldown.saturating_sub(1);
            }
            EnemyVariant::Barrel { fallen } => {
                let below = self.world.actors[idx].pos.below();
                if !self.world.is_blocked(below) {
                    self.move_actor(idx, below);
                    *fallen = true;
                } else if *fallen {
                    *fallen = false;
                    self.reverse_actor(idx);
                }
            }
        }
    }

    fn special_move(&mut self, idx: usize, enemy: &mut Enemy) {
        match &mut enemy.variant {
            EnemyVariant::Fireball { climb } => self.fireball_move(idx, climb),
            EnemyVariant::Koopa { .. } => self.patrol(idx),
            EnemyVariant::Barrel { .. } => self.roll(idx),
        }
    }

    /// Walk ahead, turning around at walls and ledges.
    fn patrol(&mut self, idx: usize) {
        let actor = &self.world.actors[idx];
        let next = actor.pos.ahead(actor.facing);
        if self.world.is_blocked(next) || self.world.free_fall(next) {
            self.reverse_actor(idx);
        } else {
            self.move_actor(idx, next);
        }
    }

    /// Roll ahead, turning around at walls only; ledges are left to gravity.
    fn roll(&mut self, idx: usize) {
        let actor = &self.world.actors[idx];
        let next = actor.pos.ahead(actor.facing);
        if self.world.is_blocked(next) {
            self.reverse_actor(idx);
        } else {
            self.move_actor(idx, next);
        }
    }

    /// Keep climbing in the current direction, or start a climb with a
    /// one-in-three chance where a ladder allows it; otherwise patrol.
    fn fireball_move(&mut self, idx: usize, climb: &mut ClimbState) {
        let here = self.world.actors[idx].pos;
        let above = here.above();
        let below = here.below();

        if *climb != ClimbState::Down
            && self.world.can_climb(here)
            && !self.world.is_blocked(above)
            && (*climb == ClimbState::Up || self.roll_climb())
        {
            *climb = ClimbState::Up;
            self.move_actor(idx, above);
            return;
        }
        if *climb != ClimbState::Up
            && self.world.can_climb(below)
            && (*climb == ClimbState::Down || self.roll_climb())
        {
            *climb = ClimbState::Down;
            self.move_actor(idx, below);
            return;
        }

        if *climb != ClimbState::None {
            let next = here.towards(*climb);
            if self.world.is_blocked(next) || !self.world.can_climb(here) {
                *climb = ClimbState::None;
            }
        }
        self.patrol(idx);
    }

    fn roll_climb(&mut self) -> bool {
        self.rng.gen_range(1..=3) == 1
    }
}
