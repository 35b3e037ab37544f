/// Per-tick board simulation.
///
/// The `World` exclusively owns the player and every other live actor.
/// During a step it lends itself, together with the driver's `Session`
/// and an injected RNG, to a `TickContext`; every actor update runs
/// against that handle, so actors never hold a reference to the world.
///
/// Spawns are appended to the live set immediately. An actor created
/// mid-tick (a barrel from Kong, a burp from the player, a dropped goodie)
/// therefore gets its own update later in the same tick.

mod enemy;
mod grid;
mod items;
mod kong;
mod player;

pub use kong::barrel_interval;

use rand::Rng;
use tracing::{debug, info, trace};

use crate::entities::{
    Actor, ActorId, ActorKind, Command, Facing, GoodieKind, Player, Position, Sound,
    TickOutcome, LEVEL_FINISH_SCORE,
};
use crate::level::{Cell, LevelMap};
use crate::session::Session;

// ── World ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct World {
    actors: Vec<Actor>,
    player: Player,
    win: bool,
    next_id: u32,
    sounds: Vec<Sound>,
    status: String,
}

impl World {
    /// An empty board holding only the player.
    pub fn new(player: Player) -> Self {
        Self {
            actors: Vec::new(),
            player,
            win: false,
            next_id: 1,
            sounds: Vec::new(),
            status: String::new(),
        }
    }

    /// Populate a board from a loaded level. Enemies pick a random initial
    /// facing from `rng`.
    pub fn from_level(map: &LevelMap, rng: &mut impl Rng) -> Self {
        let mut world = World::new(Player::new(map.player_start()));
        for (pos, cell) in map.cells() {
            let actor = match cell {
                Cell::Empty | Cell::Player => continue,
                Cell::KongLeft => Actor::kong(pos, Facing::Left),
                Cell::KongRight => Actor::kong(pos, Facing::Right),
                Cell::Floor => Actor::floor(pos),
                Cell::Ladder => Actor::ladder(pos),
                Cell::Bonfire => Actor::bonfire(pos),
                Cell::Fireball => Actor::fireball(pos, random_facing(rng)),
                Cell::Koopa => Actor::koopa(pos, random_facing(rng)),
                Cell::ExtraLife => Actor::goodie(GoodieKind::ExtraLife, pos),
                Cell::Garlic => Actor::goodie(GoodieKind::Garlic, pos),
            };
            let _ = world.spawn(actor);
        }
        debug!(actors = world.actors.len(), "world populated");
        world
    }

    /// Add an actor to the live set, assigning it a fresh identity.
    pub fn spawn(&mut self, mut actor: Actor) -> ActorId {
        let id = ActorId(self.next_id);
        self.next_id += 1;
        actor.id = id;
        trace!(?id, kind = actor.label(), x = actor.pos.x, y = actor.pos.y, "spawned");
        self.actors.push(actor);
        id
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == id)
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Status text refreshed at the start of the last step.
    pub fn status_text(&self) -> &str {
        &self.status
    }

    pub fn win_pending(&self) -> bool {
        self.win
    }

    /// Sound requests accumulated since the last drain.
    pub fn drain_sounds(&mut self) -> Vec<Sound> {
        std::mem::take(&mut self.sounds)
    }

    /// Borrow the world for out-of-step interaction queries (burn, attack).
    pub fn context<'a, R: Rng>(
        &'a mut self,
        session: &'a mut Session,
        rng: &'a mut R,
    ) -> TickContext<'a, R> {
        TickContext {
            world: self,
            session,
            rng,
        }
    }

    // ── Tick loop ────────────────────────────────────────────────────────────

    /// Advance the board by exactly one tick.
    pub fn step<R: Rng>(
        &mut self,
        session: &mut Session,
        input: Option<Command>,
        rng: &mut R,
    ) -> TickOutcome {
        self.status = session.status_line(self.player.burps);

        {
            let mut ctx = self.context(session, rng);
            ctx.update_player(input);

            // Index loop: actors spawned this tick are visited too.
            let mut idx = 0;
            while idx < ctx.world.actors.len() {
                ctx.update_actor(idx);
                idx += 1;
            }
        }

        let reaped = self.reap();
        if reaped > 0 {
            trace!(reaped, "reaped dead actors");
        }

        if !self.player.alive {
            info!("player died");
            return TickOutcome::LifeLost;
        }
        if self.win {
            self.win = false;
            session.add_score(LEVEL_FINISH_SCORE);
            self.sounds.push(Sound::FinishedLevel);
            info!(score = session.score, "level complete");
            return TickOutcome::LevelComplete;
        }
        TickOutcome::Continue
    }

    fn reap(&mut self) -> usize {
        let before = self.actors.len();
        self.actors.retain(|a| a.alive);
        before - self.actors.len()
    }
}

fn random_facing(rng: &mut impl Rng) -> Facing {
    if rng.gen_bool(0.5) {
        Facing::Left
    } else {
        Facing::Right
    }
}

// ── Tick context ─────────────────────────────────────────────────────────────

/// Handle through which actors query and mutate the board during a tick.
pub struct TickContext<'a, R: Rng> {
    world: &'a mut World,
    session: &'a mut Session,
    rng: &'a mut R,
}

impl<R: Rng> TickContext<'_, R> {
    fn update_actor(&mut self, idx: usize) {
        let actor = &self.world.actors[idx];
        if !actor.alive {
            return;
        }
        let kind = actor.kind;
        match kind {
            ActorKind::Floor | ActorKind::Ladder => {}
            ActorKind::Bonfire => self.update_bonfire(idx),
            ActorKind::Goodie(kind) => self.update_goodie(idx, kind),
            ActorKind::Enemy(enemy) => self.update_enemy(idx, enemy),
            ActorKind::Kong(kong) => self.update_kong(idx, kong),
            ActorKind::Burp(burp) => self.update_burp(idx, burp),
        }
    }

    /// Write back variant state after an update. Position, facing and the
    /// alive flag are edited in place and left alone here.
    fn store(&mut self, idx: usize, kind: ActorKind) {
        self.world.actors[idx].kind = kind;
    }

    fn move_actor(&mut self, idx: usize, to: Position) {
        self.world.actors[idx].pos = to;
    }

    fn reverse_actor(&mut self, idx: usize) {
        let actor = &mut self.world.actors[idx];
        actor.facing = actor.facing.reversed();
    }

    fn play(&mut self, sound: Sound) {
        self.world.sounds.push(sound);
    }

    fn raise_win(&mut self) {
        if !self.world.win {
            info!("kong escaped, win raised");
        }
        self.world.win = true;
    }

    // ── Spawner ──────────────────────────────────────────────────────────────

    fn spawn_in_bounds(&mut self, actor: Actor) -> Option<ActorId> {
        if !actor.pos.in_bounds() {
            trace!(kind = actor.label(), x = actor.pos.x, y = actor.pos.y, "spawn off board dropped");
            return None;
        }
        Some(self.world.spawn(actor))
    }

    fn spawn_barrel(&mut self, at: Position, facing: Facing) -> Option<ActorId> {
        self.spawn_in_bounds(Actor::barrel(at, facing))
    }

    fn spawn_burp(&mut self, at: Position, facing: Facing) -> Option<ActorId> {
        self.spawn_in_bounds(Actor::burp(at, facing))
    }

    fn drop_goodie(&mut self, kind: GoodieKind, at: Position) -> Option<ActorId> {
        debug!(?kind, x = at.x, y = at.y, "goodie dropped");
        self.spawn_in_bounds(Actor::goodie(kind, at))
    }
}
