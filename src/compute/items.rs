/// Bonfires, goodies and burps.

use rand::Rng;

use super::TickContext;
use crate::entities::{ActorKind, Burp, GoodieKind, Sound, GARLIC_BURPS};

impl<R: Rng> TickContext<'_, R> {
    pub(super) fn update_bonfire(&mut self, idx: usize) {
        let pos = self.world.actors[idx].pos;
        self.burn_at(pos);
    }

    pub(super) fn update_goodie(&mut self, idx: usize, kind: GoodieKind) {
        let pos = self.world.actors[idx].pos;
        if !self.world.player.is_at(pos) {
            return;
        }
        self.session.add_score(kind.score_worth());
        match kind {
            GoodieKind::ExtraLife => self.session.lives += 1,
            GoodieKind::Garlic => {
                let player = &mut self.world.player;
                player.burps = player.burps.saturating_add(GARLIC_BURPS);
            }
        }
        self.play(Sound::GotGoodie);
        self.world.actors[idx].alive = false;
    }

    /// A burp attacks its own cell while it has life left, then fades on
    /// the tick its life runs out.
    pub(super) fn update_burp(&mut self, idx: usize, mut burp: Burp) {
        burp.life = burp.life.saturating_sub(1);
        self.store(idx, ActorKind::Burp(burp));
        if burp.life == 0 {
            self.world.actors[idx].alive = false;
            return;
        }
        let pos = self.world.actors[idx].pos;
        self.attack_at(pos);
    }
}
