//! First-person compositor: backdrop, wall columns, billboards, HUD, minimap.
use raylib::prelude::*;

use crate::config::{GameConfig, RaycastConfig};
use crate::core::map::{Coin, GameMap};
use crate::core::world::World;
use crate::render::framebuffer::Framebuffer;
use crate::render::hud::{draw_health_bar, HudText};
use crate::render::minimap::draw_minimap;
use crate::render::raycaster::cast_ray;
use crate::render::sprites::{coin_billboards, draw_billboards, enemy_billboards};

const CEIL_TOP: Color = Color::new(80, 80, 100, 255);
const CEIL_HORIZON: Color = Color::new(120, 120, 140, 255);
const FLOOR_HORIZON: Color = Color::new(60, 60, 60, 255);
const FLOOR_NEAR: Color = Color::new(30, 30, 30, 255);

const CONTROLS: &str = "WASD to move, Mouse to look, Q/E to turn";

/// Read-only snapshot of everything one first-person frame needs.
pub struct Scene<'a> {
    pub map: &'a GameMap,
    pub player_pos: Vector2,
    pub player_angle: f32,
    pub health: f32,
    pub max_health: f32,
    pub map_id: usize,
    pub coins_collected: u32,
    pub enemy_positions: Vec<Vector2>,
    pub enemy_colors: Vec<Color>,
    pub coins: &'a [Coin],
    pub fps: u32,
}

impl<'a> Scene<'a> {
    pub fn capture(world: &'a World, fps: u32) -> Self {
        let map = world.current_map();
        let (enemy_positions, enemy_colors) = world.enemy_snapshot();
        Self {
            map,
            player_pos: world.player.pos,
            player_angle: world.player.a,
            health: world.player.health(),
            max_health: world.player.max_health(),
            map_id: world.current_map_id(),
            coins_collected: world.coins_collected(),
            enemy_positions,
            enemy_colors,
            coins: map.coins(),
            fps,
        }
    }
}

/// One wall column, recorded during the cast pass and drawn afterwards.
#[derive(Copy, Clone, Debug)]
struct WallStrip {
    x: i32,
    top: i32,
    bottom: i32,
    color: Color,
}

#[inline]
fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    let f = |x: u8, y: u8| -> u8 { (x as f32 + (y as f32 - x as f32) * t) as u8 };
    Color::new(f(a.r, b.r), f(a.g, b.g), f(a.b, b.b), 255)
}

/// Ceiling above the horizon, floor below, each a linear ramp.
fn backdrop_color(y: u32, height: u32) -> Color {
    let half = height / 2;
    let span = height as f32 / 2.0;
    if y < half {
        lerp_color(CEIL_TOP, CEIL_HORIZON, y as f32 / span)
    } else {
        lerp_color(FLOOR_HORIZON, FLOOR_NEAR, (y - half) as f32 / span)
    }
}

fn paint_backdrop(fb: &mut Framebuffer) {
    let (w, h) = (fb.width, fb.height);
    for y in 0..h {
        fb.set_current_color(backdrop_color(y, h));
        for x in 0..w {
            fb.set_pixel(x, y);
        }
    }
}

/// Ray angle for screen column `x`.
#[inline]
pub fn column_angle(player_angle: f32, x: u32, config: &RaycastConfig) -> f32 {
    let fov = config.fov_radians();
    player_angle - fov / 2.0 + x as f32 * (fov / config.screen_width as f32)
}

fn cast_columns(scene: &Scene, config: &RaycastConfig) -> Vec<WallStrip> {
    let h = config.screen_height as i32;
    let mut strips = Vec::with_capacity(config.screen_width as usize);
    for x in 0..config.screen_width {
        let angle = column_angle(scene.player_angle, x, config);
        let ray = cast_ray(scene.player_pos, angle, scene.map.walls(), config);
        if !ray.hit {
            continue;
        }
        let half = (ray.wall_height / 2.0) as i32;
        strips.push(WallStrip {
            x: x as i32,
            top: (h / 2 - half).max(0),
            bottom: (h / 2 + half).min(h),
            color: ray.color,
        });
    }
    strips
}

/// Draws one first-person frame into `fb` and returns the text overlay for
/// the window layer. Reads `scene` only.
pub fn render_3d(fb: &mut Framebuffer, scene: &Scene, config: &GameConfig) -> Vec<HudText> {
    let rc = &config.raycast;
    paint_backdrop(fb);

    let strips = cast_columns(scene, rc);
    for s in &strips {
        fb.vline(s.x, s.top, s.bottom, s.color);
    }

    let walls = scene.map.walls();
    let enemies = enemy_billboards(
        scene.player_pos,
        scene.player_angle,
        walls,
        &scene.enemy_positions,
        &scene.enemy_colors,
        rc,
    );
    draw_billboards(fb, &enemies);
    let coins = coin_billboards(scene.player_pos, scene.player_angle, walls, scene.coins, rc);
    draw_billboards(fb, &coins);

    let w = rc.screen_width as i32;
    let h = rc.screen_height as i32;
    let mut hud = vec![draw_health_bar(fb, w - 220, 20, 200, 20, scene.health, scene.max_health)];
    hud.push(HudText::new(format!("Map: {}", scene.map_id), 10, 10, 20, Color::WHITE));
    hud.push(HudText::new(format!("Coins: {}", scene.coins_collected), 10, 35, 20, Color::GOLD));
    hud.push(HudText::new(CONTROLS, 10, 60, 18, Color::WHITE));
    hud.push(HudText::fps(scene.fps, 10, 85));

    let mm = &config.minimap;
    draw_minimap(
        fb,
        scene.map,
        scene.player_pos,
        scene.player_angle,
        w - mm.size - mm.margin,
        h - mm.size - mm.margin,
        mm.size,
        mm.world_width,
    );
    hud
}
