//! HUD pieces: health bar, text overlay entries and the victory screen.
use raylib::prelude::*;

use crate::render::framebuffer::Framebuffer;

/// A line of text for the window layer; the framebuffer has no font.
#[derive(Clone, Debug, PartialEq)]
pub struct HudText {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub size: i32,
    pub color: Color,
}

impl HudText {
    pub fn new(text: impl Into<String>, x: i32, y: i32, size: i32, color: Color) -> Self {
        Self { text: text.into(), x, y, size, color }
    }

    pub fn fps(fps: u32, x: i32, y: i32) -> Self {
        Self::new(format!("{fps} FPS"), x, y, 20, Color::LIME)
    }

    pub fn draw<D: RaylibDraw>(&self, d: &mut D) {
        d.draw_text(&self.text, self.x, self.y, self.size, self.color);
    }
}

/// Fill color by remaining fraction: green above 60%, yellow above 30%, red below.
pub fn health_color(fraction: f32) -> Color {
    if fraction > 0.6 {
        Color::GREEN
    } else if fraction > 0.3 {
        Color::YELLOW
    } else {
        Color::RED
    }
}

/// Gray trough, 2px black border, then the fill on top.
/// Returns the "HP: x/y" caption placed under the bar.
pub fn draw_health_bar(
    fb: &mut Framebuffer,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    health: f32,
    max_health: f32,
) -> HudText {
    fb.fill_rect(x, y, width, height, Color::GRAY);
    fb.rect_outline(x, y, width, height, 2, Color::BLACK);

    let fraction = if max_health > 0.0 { (health / max_health).max(0.0) } else { 0.0 };
    let fill = (width as f32 * fraction) as i32;
    fb.fill_rect(x, y, fill, height, health_color(fraction));

    HudText::new(
        format!("HP: {:.0}/{:.0}", health, max_health),
        x,
        y + height + 5,
        16,
        Color::BLACK,
    )
}

const VICTORY_SHADE: Color = Color::new(20, 50, 20, 200);

/// Green wash over the last frame plus the results text.
pub fn victory_overlay(
    fb: &mut Framebuffer,
    frames: u64,
    total_coins: u32,
    health: f32,
    max_health: f32,
) -> Vec<HudText> {
    let (w, h) = (fb.width as i32, fb.height as i32);
    fb.fill_rect(0, 0, w, h, VICTORY_SHADE);
    let x = w / 2 - 200;
    vec![
        HudText::new("VICTORY!", x, 150, 70, Color::GOLD),
        HudText::new(format!("You collected all {total_coins} coins!"), x, 230, 32, Color::WHITE),
        HudText::new(format!("Completion time: {frames} frames"), x, 270, 24, Color::LIGHTGRAY),
        HudText::new(format!("Health remaining: {:.0}/{:.0}", health, max_health), x, 300, 24, Color::LIGHTGRAY),
        HudText::new("Press ENTER to play again", x, 480, 28, Color::YELLOW),
    ]
}
