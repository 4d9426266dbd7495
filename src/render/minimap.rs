//! Corner minimap for the first-person view.
use raylib::prelude::*;

use crate::core::map::GameMap;
use crate::render::framebuffer::Framebuffer;

const PANEL: Color = Color::new(20, 20, 20, 200);
const DOT_RADIUS: f32 = 3.0;
const HEADING_LEN: f32 = 10.0;

#[inline]
fn scaled(r: Rectangle, x: i32, y: i32, scale: f32) -> Rectangle {
    Rectangle::new(
        x as f32 + r.x * scale,
        y as f32 + r.y * scale,
        r.width * scale,
        r.height * scale,
    )
}

/// Draws a `size`-pixel square at `(x, y)` showing walls, exits and the
/// player's position and heading. World coordinates are scaled by
/// `size / world_width`.
pub fn draw_minimap(
    fb: &mut Framebuffer,
    map: &GameMap,
    player_pos: Vector2,
    player_angle: f32,
    x: i32,
    y: i32,
    size: i32,
    world_width: f32,
) {
    fb.fill_rect(x, y, size, size, PANEL);
    fb.rect_outline(x, y, size, size, 1, Color::WHITE);

    let scale = size as f32 / world_width;

    for wall in map.walls() {
        let r = scaled(*wall, x, y, scale);
        fb.fill_rect_f(r, Color::GRAY);
        fb.rect_outline_f(r, 1, Color::DARKGRAY);
    }
    for exit in map.exits() {
        let r = scaled(exit.rect, x, y, scale);
        fb.fill_rect_f(r, Color::GREEN);
        fb.rect_outline_f(r, 1, Color::DARKGREEN);
    }

    let px = x as f32 + player_pos.x * scale;
    let py = y as f32 + player_pos.y * scale;
    fb.fill_circle(px as i32, py as i32, DOT_RADIUS, Color::BLUE);
    let ex = px + player_angle.cos() * HEADING_LEN;
    let ey = py + player_angle.sin() * HEADING_LEN;
    fb.line(px as i32, py as i32, ex as i32, ey as i32, Color::YELLOW);
}
