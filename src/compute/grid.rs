/// Grid queries over the live actor set.
///
/// Read queries only consider live actors. Cells outside the board count
/// as blocked, so nothing walks, falls or climbs off the edge.

use rand::Rng;
use tracing::debug;

use super::{TickContext, World};
use crate::entities::{Actor, ActorId, Position, Sound, ENEMY_KILL_SCORE};

impl World {
    /// Live actors occupying `pos`.
    pub fn actors_at(&self, pos: Position) -> impl Iterator<Item = &Actor> + '_ {
        self.actors.iter().filter(move |a| a.alive && a.is_at(pos))
    }

    pub fn is_blocked(&self, pos: Position) -> bool {
        !pos.in_bounds() || self.actors_at(pos).any(Actor::is_obstacle)
    }

    pub fn can_climb(&self, pos: Position) -> bool {
        self.actors_at(pos).any(Actor::can_climb)
    }

    /// Whether something standing at `pos` is unsupported and must drop.
    pub fn free_fall(&self, pos: Position) -> bool {
        let below = pos.below();
        !self.is_blocked(below) && !self.can_climb(pos) && !self.can_climb(below)
    }
}

impl<R: Rng> TickContext<'_, R> {
    /// Fire at `pos`: the player dies if standing there, and so does every
    /// flammable actor.
    pub fn burn_at(&mut self, pos: Position) {
        if self.world.player.is_at(pos) {
            self.kill_player();
        }
        for idx in 0..self.world.actors.len() {
            let actor = &self.world.actors[idx];
            if actor.alive && actor.is_at(pos) && !actor.fireproof() {
                self.kill_index(idx);
            }
        }
    }

    /// Projectile hit at `pos`: every enemy there dies, and each kill has a
    /// one-in-three chance of leaving its goodie behind.
    pub fn attack_at(&mut self, pos: Position) {
        // Goodies dropped here are appended past `live` and never scanned.
        let live = self.world.actors.len();
        for idx in 0..live {
            let actor = &self.world.actors[idx];
            if !(actor.alive && actor.is_at(pos) && actor.is_enemy()) {
                continue;
            }
            let drop = actor.drop_goodie();
            let last_pos = actor.pos;
            self.kill_index(idx);

            let lucky = self.rng.gen_range(1..=3) == 1;
            if let (true, Some(kind)) = (lucky, drop) {
                let _ = self.drop_goodie(kind, last_pos);
            }
        }
    }

    /// Mark the actor with `id` dead. Unknown ids are ignored.
    pub fn kill_actor(&mut self, id: ActorId) {
        if let Some(idx) = self.world.actors.iter().position(|a| a.id == id) {
            self.kill_index(idx);
        }
    }

    /// Enemies award score and a death sound once.
    fn kill_index(&mut self, idx: usize) {
        let actor = &mut self.world.actors[idx];
        if !actor.alive {
            return;
        }
        actor.alive = false;
        if actor.is_enemy() {
            debug!(id = ?actor.id, kind = actor.label(), "enemy defeated");
            self.session.add_score(ENEMY_KILL_SCORE);
            self.play(Sound::EnemyDie);
        }
    }

    pub fn kill_player(&mut self) {
        if !self.world.player.alive {
            return;
        }
        self.world.player.alive = false;
        debug!(x = self.world.player.pos.x, y = self.world.player.pos.y, "player killed");
        self.play(Sound::PlayerDie);
    }
}
