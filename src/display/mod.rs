/// Rendering layer. All terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// board.  No game logic is performed; this module only translates state
/// into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use wonkey_kong::compute::World;
use wonkey_kong::entities::{
    Actor, ActorKind, EnemyVariant, GoodieKind, Player, Sound, BOARD_HEIGHT, BOARD_WIDTH,
};
use wonkey_kong::session::Session;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_STATUS: Color = Color::Yellow;
const C_FLOOR: Color = Color::Red;
const C_LADDER: Color = Color::DarkYellow;
const C_BONFIRE: Color = Color::DarkRed;
const C_PLAYER: Color = Color::White;
const C_PLAYER_FROZEN: Color = Color::Blue;
const C_KONG: Color = Color::Yellow;
const C_FIREBALL: Color = Color::Red;
const C_KOOPA: Color = Color::Green;
const C_BARREL: Color = Color::DarkYellow;
const C_BURP: Color = Color::Cyan;
const C_EXTRA_LIFE: Color = Color::Magenta;
const C_GARLIC: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

/// Each board cell is two terminal columns wide so the board looks square.
const CELL_COLUMNS: u16 = 2;
/// Terminal row of the top border; the status line sits above it.
const BOARD_TOP: u16 = 1;

/// Full-screen message drawn over the board when play stops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overlay {
    GameOver,
    Victory,
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    world: &World,
    session: &Session,
    caption: Option<Sound>,
    overlay: Option<Overlay>,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_status(out, world, session)?;
    draw_border(out)?;

    // Terrain first so movers are drawn over ladders and fires.
    for actor in world.actors().iter().filter(|a| is_terrain(a)) {
        draw_actor(out, actor)?;
    }
    for actor in world.actors().iter().filter(|a| !is_terrain(a)) {
        draw_actor(out, actor)?;
    }
    draw_player(out, world.player())?;

    draw_caption(out, caption)?;
    draw_controls_hint(out)?;

    if let Some(overlay) = overlay {
        draw_overlay(out, overlay, session)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, hint_row() + 1))?;
    out.flush()?;
    Ok(())
}

// ── Layout helpers ────────────────────────────────────────────────────────────

fn board_columns() -> u16 {
    BOARD_WIDTH as u16 * CELL_COLUMNS
}

fn bottom_border_row() -> u16 {
    BOARD_TOP + BOARD_HEIGHT as u16 + 1
}

fn caption_row() -> u16 {
    bottom_border_row() + 1
}

fn hint_row() -> u16 {
    caption_row() + 1
}

/// Terminal cursor for a board cell (board `y` grows upward).
fn cell_origin(x: i32, y: i32) -> Option<(u16, u16)> {
    if !(0..BOARD_WIDTH).contains(&x) || !(0..BOARD_HEIGHT).contains(&y) {
        return None;
    }
    let column = 1 + x as u16 * CELL_COLUMNS;
    let row = BOARD_TOP + 1 + (BOARD_HEIGHT - 1 - y) as u16;
    Some((column, row))
}

fn is_terrain(actor: &Actor) -> bool {
    matches!(
        actor.kind,
        ActorKind::Floor | ActorKind::Ladder | ActorKind::Bonfire
    )
}

// ── Status line and border ───────────────────────────────────────────────────

fn draw_status<W: Write>(out: &mut W, world: &World, session: &Session) -> std::io::Result<()> {
    // The world refreshes its text at the start of every step; before the
    // first step fall back to the session.
    let status = match world.status_text() {
        "" => session.status_line(world.player().burps),
        text => text.to_string(),
    };
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_STATUS))?;
    out.queue(Print(status))?;
    Ok(())
}

fn draw_border<W: Write>(out: &mut W) -> std::io::Result<()> {
    let w = board_columns() as usize;
    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, BOARD_TOP))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w))))?;

    out.queue(cursor::MoveTo(0, bottom_border_row()))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w))))?;

    for row in BOARD_TOP + 1..bottom_border_row() {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(board_columns() + 1, row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── Actors ───────────────────────────────────────────────────────────────────

fn sprite(actor: &Actor) -> (&'static str, Color) {
    match actor.kind {
        ActorKind::Floor => ("▀▀", C_FLOOR),
        ActorKind::Ladder => ("╟╢", C_LADDER),
        ActorKind::Bonfire => ("^^", C_BONFIRE),
        ActorKind::Goodie(GoodieKind::ExtraLife) => ("♥ ", C_EXTRA_LIFE),
        ActorKind::Goodie(GoodieKind::Garlic) => ("ɡ ", C_GARLIC),
        ActorKind::Enemy(enemy) => match enemy.variant {
            EnemyVariant::Fireball { .. } => ("✶ ", C_FIREBALL),
            EnemyVariant::Koopa { .. } => ("Ҝ ", C_KOOPA),
            EnemyVariant::Barrel { .. } => ("◍ ", C_BARREL),
        },
        ActorKind::Kong(_) => ("Ω ", C_KONG),
        ActorKind::Burp(_) => ("≈ ", C_BURP),
    }
}

fn draw_actor<W: Write>(out: &mut W, actor: &Actor) -> std::io::Result<()> {
    let Some((column, row)) = cell_origin(actor.pos.x, actor.pos.y) else {
        return Ok(());
    };
    let (glyph, color) = sprite(actor);
    out.queue(cursor::MoveTo(column, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

fn draw_player<W: Write>(out: &mut W, player: &Player) -> std::io::Result<()> {
    let Some((column, row)) = cell_origin(player.pos.x, player.pos.y) else {
        return Ok(());
    };
    let color = if player.is_frozen() {
        C_PLAYER_FROZEN
    } else {
        C_PLAYER
    };
    out.queue(cursor::MoveTo(column, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(if player.alive { "☺ " } else { "✝ " }))?;
    Ok(())
}

// ── Caption and controls hint ────────────────────────────────────────────────

fn caption_text(sound: Sound) -> &'static str {
    match sound {
        Sound::Jump => "boing!",
        Sound::Burp => "BUUURP!",
        Sound::GotGoodie => "yum!",
        Sound::EnemyDie => "splat!",
        Sound::PlayerDie => "ouch...",
        Sound::FinishedLevel => "Kong got away, level finished!",
    }
}

fn draw_caption<W: Write>(out: &mut W, caption: Option<Sound>) -> std::io::Result<()> {
    let Some(sound) = caption else {
        return Ok(());
    };
    out.queue(cursor::MoveTo(1, caption_row()))?;
    out.queue(style::SetForegroundColor(C_STATUS))?;
    out.queue(Print(caption_text(sound)))?;
    Ok(())
}

fn draw_controls_hint<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, hint_row()))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("←↑→↓ / WASD : Move   SPACE : Jump   TAB / X : Burp   Q : Quit"))?;
    Ok(())
}

// ── End-of-game overlay ──────────────────────────────────────────────────────

fn draw_overlay<W: Write>(out: &mut W, overlay: Overlay, session: &Session) -> std::io::Result<()> {
    let (banner, color) = match overlay {
        Overlay::GameOver => ("║    GAME  OVER      ║", Color::Red),
        Overlay::Victory => ("║  KONG  DEFEATED!   ║", Color::Green),
    };
    let lines: [(&str, Color); 3] = [
        ("╔════════════════════╗", color),
        (banner, color),
        ("╚════════════════════╝", color),
    ];
    let score_line = format!("Final Score: {:>7}", session.score);
    let hint = "Press any key";

    let cx = board_columns() / 2 + 1;
    let start_row = BOARD_TOP + BOARD_HEIGHT as u16 / 2 - 2;

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    let score_row = start_row + lines.len() as u16;
    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score_line))?;

    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row + 1))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}
