use wonkey_kong::compute::World;
use wonkey_kong::entities::*;
use wonkey_kong::session::Session;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn at(x: i32, y: i32) -> Position {
    Position::new(x, y)
}

fn with_bottom_floor(player: Position) -> World {
    let mut w = World::new(Player::new(player));
    for x in 0..BOARD_WIDTH {
        w.spawn(Actor::floor(at(x, 0)));
    }
    w
}

fn run(w: &mut World, s: &mut Session, rng: &mut StdRng, ticks: usize) {
    for _ in 0..ticks {
        w.step(s, None, rng);
    }
}

fn enemy(w: &World, id: ActorId) -> (Actor, Enemy) {
    let actor = w.actor(id).unwrap().clone();
    match actor.kind {
        ActorKind::Enemy(enemy) => (actor, enemy),
        other => panic!("not an enemy: {:?}", other),
    }
}

// ── contact ───────────────────────────────────────────────────────────────────

#[test]
fn fireball_contact_kills_the_player() {
    let mut w = with_bottom_floor(at(5, 1));
    w.spawn(Actor::fireball(at(5, 1), Facing::Left));
    let mut s = Session::default();
    assert_eq!(w.step(&mut s, None, &mut seeded_rng()), TickOutcome::LifeLost);
    assert!(!w.player().alive);
    assert_eq!(w.drain_sounds(), vec![Sound::PlayerDie]);
}

#[test]
fn koopa_contact_freezes_instead_of_killing() {
    let mut w = with_bottom_floor(at(5, 1));
    // Walls on both sides keep the koopa on the player's cell.
    w.spawn(Actor::floor(at(4, 1)));
    w.spawn(Actor::floor(at(6, 1)));
    let koopa = w.spawn(Actor::koopa(at(5, 1), Facing::Left));
    let mut s = Session::default();
    let mut rng = seeded_rng();

    assert_eq!(w.step(&mut s, None, &mut rng), TickOutcome::Continue);
    assert!(w.player().alive);
    assert_eq!(w.player().freeze_timer, FREEZE_TICKS);
    let (_, k) = enemy(&w, koopa);
    assert_eq!(k.variant, EnemyVariant::Koopa { freeze_cooldown: FREEZE_TICKS });

    // Re-contact during the cooldown changes nothing beyond the countdowns.
    assert_eq!(w.step(&mut s, None, &mut rng), TickOutcome::Continue);
    assert_eq!(w.player().freeze_timer, FREEZE_TICKS - 1);
    let (actor, k) = enemy(&w, koopa);
    assert_eq!(actor.pos, at(5, 1));
    assert_eq!(k.variant, EnemyVariant::Koopa { freeze_cooldown: FREEZE_TICKS - 1 });
}

#[test]
fn koopa_can_freeze_again_after_cooldown() {
    let mut w = with_bottom_floor(at(5, 1));
    w.spawn(Actor::floor(at(4, 1)));
    w.spawn(Actor::floor(at(6, 1)));
    w.spawn(Actor::koopa(at(5, 1), Facing::Left));
    let mut s = Session::default();
    let mut rng = seeded_rng();

    run(&mut w, &mut s, &mut rng, 1 + FREEZE_TICKS as usize);
    // Cooldown and freeze both ran out on the same tick; the koopa strikes
    // again on the next one.
    assert_eq!(w.player().freeze_timer, 0);
    w.step(&mut s, None, &mut rng);
    assert_eq!(w.player().freeze_timer, FREEZE_TICKS);
    assert!(w.player().alive);
}

// ── patrols ──────────────────────────────────────────────────────────────────

#[test]
fn special_move_runs_on_first_tick_then_every_tenth() {
    let mut w = with_bottom_floor(at(19, 1));
    let koopa = w.spawn(Actor::koopa(at(5, 1), Facing::Left));
    let mut s = Session::default();
    let mut rng = seeded_rng();

    run(&mut w, &mut s, &mut rng, 1);
    assert_eq!(enemy(&w, koopa).0.pos, at(4, 1));
    run(&mut w, &mut s, &mut rng, 9);
    assert_eq!(enemy(&w, koopa).0.pos, at(4, 1));
    run(&mut w, &mut s, &mut rng, 1);
    assert_eq!(enemy(&w, koopa).0.pos, at(3, 1));
}

#[test]
fn patrol_turns_around_at_a_ledge() {
    let mut w = World::new(Player::new(at(19, 19)));
    w.spawn(Actor::floor(at(4, 0)));
    w.spawn(Actor::floor(at(5, 0)));
    let fireball = w.spawn(Actor::fireball(at(5, 1), Facing::Right));
    let mut s = Session::default();
    let mut rng = seeded_rng();

    run(&mut w, &mut s, &mut rng, 1);
    let (actor, _) = enemy(&w, fireball);
    assert_eq!(actor.pos, at(5, 1));
    assert_eq!(actor.facing, Facing::Left);

    run(&mut w, &mut s, &mut rng, 10);
    assert_eq!(enemy(&w, fireball).0.pos, at(4, 1));
}

#[test]
fn patrol_turns_around_at_a_wall() {
    let mut w = with_bottom_floor(at(19, 1));
    w.spawn(Actor::floor(at(4, 1)));
    let koopa = w.spawn(Actor::koopa(at(5, 1), Facing::Left));
    let mut s = Session::default();
    run(&mut w, &mut s, &mut seeded_rng(), 1);
    let (actor, _) = enemy(&w, koopa);
    assert_eq!(actor.pos, at(5, 1));
    assert_eq!(actor.facing, Facing::Right);
}

// ── fireball climbing ────────────────────────────────────────────────────────

#[test]
fn climbing_fireball_keeps_climbing_until_the_ladder_ends() {
    let mut w = with_bottom_floor(at(15, 1));
    for y in 1..=3 {
        w.spawn(Actor::ladder(at(5, y)));
    }
    let climbing = Enemy::new(EnemyVariant::Fireball {
        climb: ClimbState::Up,
    });
    let fireball = w.spawn(Actor::new(ActorKind::Enemy(climbing), at(5, 1), Facing::Left));
    let mut s = Session::default();
    let mut rng = seeded_rng();

    run(&mut w, &mut s, &mut rng, 1);
    let (actor, e) = enemy(&w, fireball);
    assert_eq!(actor.pos, at(5, 2));
    assert_eq!(e.variant, EnemyVariant::Fireball { climb: ClimbState::Up });

    run(&mut w, &mut s, &mut rng, 20);
    assert_eq!(enemy(&w, fireball).0.pos, at(5, 4));

    // Off the ladder top the climb state clears and the fireball patrols.
    run(&mut w, &mut s, &mut rng, 10);
    let (_, e) = enemy(&w, fireball);
    assert_eq!(e.variant, EnemyVariant::Fireball { climb: ClimbState::None });
}

#[test]
fn descending_fireball_stops_at_the_floor() {
    let mut w = with_bottom_floor(at(15, 1));
    for y in 1..=2 {
        w.spawn(Actor::ladder(at(5, y)));
    }
    let descending = Enemy::new(EnemyVariant::Fireball {
        climb: ClimbState::Down,
    });
    let fireball = w.spawn(Actor::new(ActorKind::Enemy(descending), at(5, 3), Facing::Left));
    let mut s = Session::default();
    let mut rng = seeded_rng();

    run(&mut w, &mut s, &mut rng, 1);
    assert_eq!(enemy(&w, fireball).0.pos, at(5, 2));
    run(&mut w, &mut s, &mut rng, 10);
    assert_eq!(enemy(&w, fireball).0.pos, at(5, 1));
    run(&mut w, &mut s, &mut rng, 10);
    let (actor, e) = enemy(&w, fireball);
    assert_eq!(e.variant, EnemyVariant::Fireball { climb: ClimbState::None });
    assert_eq!(actor.pos.y, 1);
}

// ── barrels ──────────────────────────────────────────────────────────────────

#[test]
fn barrel_falls_one_cell_per_tick_and_reverses_on_landing() {
    let mut w = with_bottom_floor(at(19, 1));
    let barrel = w.spawn(Actor::barrel(at(5, 5), Facing::Right));
    let mut s = Session::default();
    let mut rng = seeded_rng();

    // First tick: drop a row, then the first special move rolls it right.
    run(&mut w, &mut s, &mut rng, 1);
    assert_eq!(enemy(&w, barrel).0.pos, at(6, 4));

    run(&mut w, &mut s, &mut rng, 3);
    let (actor, e) = enemy(&w, barrel);
    assert_eq!(actor.pos, at(6, 1));
    assert_eq!(actor.facing, Facing::Right);
    assert_eq!(e.variant, EnemyVariant::Barrel { fallen: true });

    run(&mut w, &mut s, &mut rng, 1);
    let (actor, e) = enemy(&w, barrel);
    assert_eq!(actor.pos, at(6, 1));
    assert_eq!(actor.facing, Facing::Left);
    assert_eq!(e.variant, EnemyVariant::Barrel { fallen: false });
}

#[test]
fn bonfire_burns_barrels_but_not_fireballs() {
    let mut w = with_bottom_floor(at(19, 1));
    w.spawn(Actor::bonfire(at(5, 1)));
    let barrel = w.spawn(Actor::barrel(at(5, 1), Facing::Right));
    let fireball = w.spawn(Actor::fireball(at(5, 1), Facing::Right));
    let mut s = Session::default();

    w.step(&mut s, None, &mut seeded_rng());

    assert!(w.actor(barrel).is_none());
    assert!(w.actor(fireball).is_some());
    assert_eq!(s.score, ENEMY_KILL_SCORE);
    assert_eq!(w.drain_sounds(), vec![Sound::EnemyDie]);
}

#[test]
fn dead_enemy_is_inert_and_reaped() {
    let mut w = with_bottom_floor(at(5, 1));
    let fireball = w.spawn(Actor::fireball(at(5, 1), Facing::Left));
    let mut s = Session::default();
    let mut rng = seeded_rng();
    w.context(&mut s, &mut rng).kill_actor(fireball);
    let _ = w.drain_sounds();

    // Sharing the player's cell, but dead: no attack.
    assert_eq!(w.step(&mut s, None, &mut rng), TickOutcome::Continue);
    assert!(w.player().alive);
    assert!(w.actor(fireball).is_none());
    assert!(w.drain_sounds().is_empty());
}
