//! Top-down view of the current room.
use raylib::prelude::*;

use crate::core::enemy::Obstacle;
use crate::core::map::{GameMap, PLAYER_RADIUS, WORLD_WIDTH};
use crate::core::player::Player;
use crate::core::world::{World, COIN_RADIUS};
use crate::render::framebuffer::Framebuffer;
use crate::render::hud::{draw_health_bar, HudText};

fn draw_room(fb: &mut Framebuffer, map: &GameMap, hud: &mut Vec<HudText>) {
    fb.set_background_color(map.background());
    fb.clear();
    for wall in map.walls() {
        fb.fill_rect_f(*wall, Color::DARKGRAY);
        fb.rect_outline_f(*wall, 2, Color::BLACK);
    }
    for exit in map.exits() {
        fb.fill_rect_f(exit.rect, Color::GREEN);
        fb.rect_outline_f(exit.rect, 3, Color::DARKGREEN);
        let cx = (exit.rect.x + exit.rect.width / 2.0) as i32;
        let cy = (exit.rect.y + exit.rect.height / 2.0) as i32;
        hud.push(HudText::new(">", cx - 5, cy - 10, 20, Color::WHITE));
    }
}

fn draw_coin(fb: &mut Framebuffer, at: Vector2) {
    let (x, y) = (at.x as i32, at.y as i32);
    fb.fill_circle(x, y, COIN_RADIUS, Color::GOLD);
    fb.fill_circle(x, y, COIN_RADIUS - 2.0, Color::YELLOW);
    fb.circle_outline(x, y, COIN_RADIUS, Color::ORANGE);
}

fn draw_obstacle(fb: &mut Framebuffer, o: &Obstacle) {
    let (x, y) = (o.position.x as i32, o.position.y as i32);
    fb.fill_circle(x, y, o.radius, o.color);
    fb.fill_circle(x, y, o.radius - 2.0, Color::MAROON);
    fb.circle_outline(x, y, o.radius, Color::BLACK);
    // white cross
    let k = (o.radius * 0.6) as i32;
    fb.thick_line(x - k, y - k, x + k, y + k, 3, Color::WHITE);
    fb.thick_line(x - k, y + k, x + k, y - k, 3, Color::WHITE);
}

/// Half-transparent on alternating 5-frame beats while invincible.
pub fn player_alpha(player: &Player) -> u8 {
    let t = player.invincibility_timer();
    if t > 0 && (t / 5) % 2 == 0 { 128 } else { 255 }
}

fn draw_player(fb: &mut Framebuffer, player: &Player) {
    let a = player_alpha(player);
    let (x, y) = (player.pos.x as i32, player.pos.y as i32);
    let outer = Color { a, ..Color::BLUE };
    let inner = Color { a, ..Color::DARKBLUE };
    fb.fill_circle(x, y, PLAYER_RADIUS, outer);
    fb.fill_circle(x, y, PLAYER_RADIUS - 2.0, inner);
}

/// Draws the current room from above. Returns the text overlay.
pub fn render_2d(fb: &mut Framebuffer, world: &World, fps: u32) -> Vec<HudText> {
    let map = world.current_map();
    let mut hud = Vec::new();
    draw_room(fb, map, &mut hud);

    for coin in map.coins().iter().filter(|c| !c.collected) {
        draw_coin(fb, coin.position);
    }
    for o in map.obstacles() {
        draw_obstacle(fb, o);
    }

    let p = &world.player;
    let bar_x = WORLD_WIDTH as i32 - 220;
    hud.push(draw_health_bar(fb, bar_x, 20, 200, 20, p.health(), p.max_health()));
    hud.push(HudText::new("WASD to move", 10, 10, 20, Color::BLACK));
    hud.push(HudText::new(format!("Map: {}", world.current_map_id()), 10, 35, 20, Color::BLACK));
    hud.push(HudText::new(format!("Coins: {}", world.coins_collected()), 10, 60, 20, Color::GOLD));
    hud.push(HudText::new(
        format!("Position: ({:.0}, {:.0})", p.pos.x, p.pos.y),
        10,
        85,
        20,
        Color::BLACK,
    ));
    hud.push(HudText::fps(fps, 10, 110));

    draw_player(fb, p);
    hud
}
