//! Rendering layer. All terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! session; no game logic is performed. The 720x480 logical field is scaled
//! to whatever cell grid the terminal offers, with row 0 reserved for the
//! HUD and the last row for the controls hint.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use space_shooter::entities::{Rect, FIELD_HEIGHT, FIELD_WIDTH};
use space_shooter::session::Session;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD: Color = Color::Yellow;
const C_SHIP: Color = Color::White;
const C_BULLET: Color = Color::Cyan;
const C_ENEMY: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;
const C_GAME_OVER: Color = Color::Red;

// ── Field-to-terminal scaling ─────────────────────────────────────────────────

/// Maps logical field pixels onto the terminal cell grid. The play area
/// spans rows 1..rows-1 (HUD above, hint below).
struct Scale {
    cols: u16,
    rows: u16,
}

impl Scale {
    fn new(cols: u16, rows: u16) -> Self {
        Scale {
            cols: cols.max(20),
            rows: rows.max(10),
        }
    }

    fn play_rows(&self) -> u16 {
        self.rows - 2
    }

    fn col(&self, x: i32) -> i32 {
        x * self.cols as i32 / FIELD_WIDTH
    }

    fn row(&self, y: i32) -> i32 {
        1 + y * self.play_rows() as i32 / FIELD_HEIGHT
    }

    /// A logical rect as (col, row, cell width, cell height), at least one
    /// cell each so small entities stay visible.
    fn cell_rect(&self, r: &Rect) -> (i32, i32, i32, i32) {
        let c = self.col(r.x);
        let row = self.row(r.y);
        let w = (self.col(r.right()) - c).max(1);
        let h = (self.row(r.bottom()) - row).max(1);
        (c, row, w, h)
    }
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete frame of an active session.
pub fn render<W: Write>(
    out: &mut W,
    session: &Session,
    player_name: &str,
    starting_high: u32,
) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let scale = Scale::new(cols, rows);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_hud(out, &scale, session, player_name, starting_high)?;

    for enemy in &session.enemies {
        draw_block(out, &scale, &enemy.rect, C_ENEMY, '▒')?;
    }
    for bullet in &session.bullets {
        draw_block(out, &scale, &bullet.rect, C_BULLET, '|')?;
    }
    draw_block(out, &scale, &session.ship, C_SHIP, '█')?;

    draw_controls_hint(out, &scale)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, scale.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

/// Render the terminal summary screen shown after game over.
pub fn render_summary<W: Write>(
    out: &mut W,
    player_name: &str,
    score: u32,
    high_score: u32,
) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let cx = cols / 2;
    let cy = rows / 2;

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let title = "G A M E   O V E R";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(3),
    ))?;
    out.queue(style::SetForegroundColor(C_GAME_OVER))?;
    out.queue(Print(title))?;

    let lines = [
        format!("Player: {}", player_name),
        format!("Score: {}", score),
        format!("High Score: {}", high_score),
    ];
    out.queue(style::SetForegroundColor(Color::White))?;
    for (i, line) in lines.iter().enumerate() {
        out.queue(cursor::MoveTo(
            cx.saturating_sub(line.chars().count() as u16 / 2),
            cy.saturating_sub(1) + i as u16,
        ))?;
        out.queue(Print(line))?;
    }

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    scale: &Scale,
    session: &Session,
    player_name: &str,
    starting_high: u32,
) -> std::io::Result<()> {
    let live_high = starting_high.max(session.score);

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!(
        "Player: {}   Score:{:>6}",
        player_name, session.score
    )))?;

    let high_str = format!("High:{:>6}", live_high);
    out.queue(cursor::MoveTo(
        scale.cols.saturating_sub(high_str.chars().count() as u16 + 1),
        0,
    ))?;
    out.queue(Print(high_str))?;

    // Thin rule separating the HUD from the play area
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(Print("─".repeat(scale.cols as usize)))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Fill a logical rect's scaled cells with `ch`, clipped to the play area.
fn draw_block<W: Write>(
    out: &mut W,
    scale: &Scale,
    rect: &Rect,
    color: Color,
    ch: char,
) -> std::io::Result<()> {
    let (c, r, w, h) = scale.cell_rect(rect);
    out.queue(style::SetForegroundColor(color))?;
    for row in r..r + h {
        if row < 1 || row > scale.play_rows() as i32 {
            continue;
        }
        for col in c..c + w {
            if col < 0 || col >= scale.cols as i32 {
                continue;
            }
            out.queue(cursor::MoveTo(col as u16, row as u16))?;
            out.queue(Print(ch))?;
        }
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, scale: &Scale) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, scale.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}
