//! Rendering layer: all terminal output lives here.
//!
//! The playfield is scaled onto whatever the terminal offers.  Nothing here
//! changes the game state; it only turns a `GameState` into terminal
//! commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use glam::Vec2;
use kokaton_musou::constants::{HEIGHT, WIDTH};
use kokaton_musou::entities::{
    Beam, Bomb, Direction, Enemy, EnemyKind, GameState, GameStatus, PlayerMode,
};
use kokaton_musou::geometry::Rect;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_BORDER_GRAVITY: Color = Color::Magenta;
const C_BORDER_EMP: Color = Color::Yellow;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_TIMER: Color = Color::Cyan;
const C_PLAYER: Color = Color::White;
const C_BEAM: Color = Color::Cyan;
const C_SHIELD: Color = Color::Blue;
const C_JAMMED: Color = Color::DarkGrey;
const C_BOMB_INACTIVE: Color = Color::DarkGrey;
const C_EXPLOSION: [Color; 2] = [Color::Yellow, Color::Red];
const C_HINT: Color = Color::DarkGrey;

const BOMB_PALETTE: [Color; 6] = [
    Color::Red,
    Color::Green,
    Color::Blue,
    Color::Yellow,
    Color::Magenta,
    Color::Cyan,
];

/// The player's face.  Picked by the caller from the tick's events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mood {
    Neutral,
    Cheering,
    Defeated,
}

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps playfield coordinates onto terminal cells.  Row 0 is the HUD, row 1
/// and row `rows - 2` are the border, the last row holds the controls hint.
#[derive(Clone, Copy, Debug)]
struct Viewport {
    cols: u16,
    rows: u16,
}

impl Viewport {
    fn new(cols: u16, rows: u16) -> Self {
        Viewport {
            cols: cols.max(8),
            rows: rows.max(8),
        }
    }

    fn inner_cols(&self) -> u16 {
        self.cols - 2
    }

    fn inner_rows(&self) -> u16 {
        self.rows - 4
    }

    fn cell(&self, at: Vec2) -> (u16, u16) {
        let fx = (at.x / WIDTH).clamp(0.0, 1.0);
        let fy = (at.y / HEIGHT).clamp(0.0, 1.0);
        let col = (fx * f32::from(self.inner_cols() - 1)).round() as u16;
        let row = (fy * f32::from(self.inner_rows() - 1)).round() as u16;
        (1 + col, 2 + row)
    }

    /// Every cell covered by `rect`, at least one.
    fn cells(&self, rect: &Rect) -> Vec<(u16, u16)> {
        let (left, top) = self.cell(Vec2::new(rect.left(), rect.top()));
        let (right, bottom) = self.cell(Vec2::new(rect.right(), rect.bottom()));
        (top..=bottom)
            .flat_map(|row| (left..=right).map(move |col| (col, row)))
            .collect()
    }

    /// Column that centers `text` around `col` without leaving the field.
    fn centered(&self, col: u16, text: &str) -> u16 {
        let half = text.chars().count() as u16 / 2;
        col.saturating_sub(half)
            .clamp(1, self.cols.saturating_sub(text.chars().count() as u16 + 1).max(1))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState, mood: Mood) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let view = Viewport::new(cols, rows);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, &view, state)?;
    draw_hud(out, &view, state)?;

    for explosion in state.explosions.values() {
        let (col, row) = view.cell(explosion.center);
        let frame = explosion.frame();
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(C_EXPLOSION[frame]))?;
        out.queue(Print(if frame == 0 { "✶" } else { "✷" }))?;
    }
    for enemy in state.enemies.values() {
        draw_enemy(out, &view, enemy)?;
    }
    for bomb in state.bombs.values() {
        draw_bomb(out, &view, bomb)?;
    }
    for beam in state.beams.values() {
        draw_beam(out, &view, beam)?;
    }
    if let Some(shield) = &state.shield {
        out.queue(style::SetForegroundColor(C_SHIELD))?;
        for (col, row) in view.cells(&shield.rect) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print("█"))?;
        }
    }

    draw_player(out, &view, state, mood)?;
    draw_controls_hint(out, &view)?;

    if state.status == GameStatus::GameOver {
        draw_game_over(out, &view, state)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport, state: &GameState) -> std::io::Result<()> {
    let color = if !state.emp_pulses.is_empty() {
        C_BORDER_EMP
    } else if !state.gravity_fields.is_empty() {
        C_BORDER_GRAVITY
    } else {
        C_BORDER
    };
    let bar = "─".repeat(usize::from(view.inner_cols()));
    let bottom = view.rows - 2;

    out.queue(style::SetForegroundColor(color))?;
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{bar}┐")))?;
    out.queue(cursor::MoveTo(0, bottom))?;
    out.queue(Print(format!("└{bar}┘")))?;

    for row in 2..bottom {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols - 1, row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, view: &Viewport, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", state.score.value())))?;

    // Running timers, right-aligned
    let mut timers = Vec::new();
    if state.player.mode == PlayerMode::Hyper {
        timers.push(format!("HYPER {:>3}", state.player.hyper_remaining.max(0)));
    }
    if let Some(shield) = &state.shield {
        timers.push(format!("SHIELD {:>3}", shield.lifetime.remaining().max(0)));
    }
    if let Some(field) = state.gravity_fields.values().next() {
        timers.push(format!("GRAVITY {:>3}", field.lifetime.remaining().max(0)));
    }
    let right = timers.join("  ");
    if !right.is_empty() {
        let col = view.cols.saturating_sub(right.chars().count() as u16 + 1);
        out.queue(cursor::MoveTo(col, 0))?;
        out.queue(style::SetForegroundColor(C_HUD_TIMER))?;
        out.queue(Print(&right))?;
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn facing_arrow(facing: Direction) -> &'static str {
    match facing {
        Direction::East => "→",
        Direction::NorthEast => "↗",
        Direction::North => "↑",
        Direction::NorthWest => "↖",
        Direction::West => "←",
        Direction::SouthWest => "↙",
        Direction::South => "↓",
        Direction::SouthEast => "↘",
    }
}

fn draw_player<W: Write>(
    out: &mut W,
    view: &Viewport,
    state: &GameState,
    mood: Mood,
) -> std::io::Result<()> {
    // Sprite: face with the facing arrow on the side it points to
    //   (·v·)→
    let player = &state.player;
    let face = match mood {
        Mood::Neutral => "(·v·)",
        Mood::Cheering => "(^v^)",
        Mood::Defeated => "(×_×)",
    };
    let arrow = facing_arrow(player.facing);
    let sprite = if player.facing.delta().x < 0 {
        format!("{arrow}{face}")
    } else {
        format!("{face}{arrow}")
    };

    // Hyper mode flickers between two colours
    let color = match player.mode {
        PlayerMode::Normal => C_PLAYER,
        PlayerMode::Hyper if state.tick / 5 % 2 == 0 => Color::Magenta,
        PlayerMode::Hyper => Color::Yellow,
    };

    let (col, row) = view.cell(player.rect.center);
    out.queue(cursor::MoveTo(view.centered(col, &sprite), row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(sprite))?;
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, view: &Viewport, enemy: &Enemy) -> std::io::Result<()> {
    let (sprite, color) = if enemy.jammed {
        ("?#?", C_JAMMED)
    } else {
        match enemy.kind {
            EnemyKind::Spacecraft => ("«▼»", Color::Green),
            EnemyKind::Octopus => ("(◎)", Color::Red),
            EnemyKind::Crab => ("/Ж\\", Color::Yellow),
        }
    };
    let (col, row) = view.cell(enemy.rect.center);
    out.queue(cursor::MoveTo(view.centered(col, sprite), row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(sprite))?;
    Ok(())
}

fn draw_bomb<W: Write>(out: &mut W, view: &Viewport, bomb: &Bomb) -> std::io::Result<()> {
    let color = if bomb.is_active() {
        BOMB_PALETTE[usize::from(bomb.palette) % BOMB_PALETTE.len()]
    } else {
        C_BOMB_INACTIVE
    };
    // big bombs read as filled circles
    let glyph = if bomb.rect.width() >= 60.0 { "●" } else { "•" };
    let (col, row) = view.cell(bomb.rect.center);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

fn draw_beam<W: Write>(out: &mut W, view: &Viewport, beam: &Beam) -> std::io::Result<()> {
    // Snap the angle to the nearest eighth turn
    let octant = (beam.angle.rem_euclid(180.0) / 45.0).round() as u8 % 4;
    let glyph = match octant {
        0 => "─",
        1 => "/",
        2 => "│",
        _ => "\\",
    };
    let (col, row) = view.cell(beam.rect.center);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_BEAM))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows - 1))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "Arrows/WASD move  SPACE fire  Z fan  H hyper(100)  ENTER gravity(200)  E emp(20)  X shield(50)  Q quit",
    ))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, view: &Viewport, state: &GameState) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>6}", state.score.value());
    let lines: [(&str, Color); 4] = [
        ("╔════════════════════╗", Color::Red),
        ("║     GAME  OVER     ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
        (score_line.as_str(), Color::Yellow),
    ];

    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        out.queue(cursor::MoveTo(view.centered(cx, msg), start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}
