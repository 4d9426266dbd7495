//! Billboard sprites (enemies and coins) for the first-person view.
//!
//! Exposes:
//! - `enemy_billboards` / `coin_billboards`: visibility + projection, sorted farthest first
//! - `draw_billboards`: paint a sorted list (painter's algorithm)
//!
use raylib::prelude::*;

use crate::config::RaycastConfig;
use crate::core::map::{Coin, Wall};
use crate::render::framebuffer::Framebuffer;
use crate::render::raycaster::{find_visible, VisibleEntity};

/// Size and brightness rules for one kind of billboard.
#[derive(Copy, Clone, Debug)]
pub struct BillboardStyle {
    /// World size fed to the inverse-distance projection
    pub world_size: f32,
    pub min_size: f32,
    pub max_size: f32,
    /// Brightness never drops below this
    pub min_shade: f32,
}

pub const ENEMY_STYLE: BillboardStyle = BillboardStyle { world_size: 50.0, min_size: 5.0, max_size: 100.0, min_shade: 0.3 };
pub const COIN_STYLE: BillboardStyle = BillboardStyle { world_size: 30.0, min_size: 3.0, max_size: 60.0, min_shade: 0.4 };

const COIN_GOLD: Color = Color::new(255, 215, 0, 255);
const COIN_SHINE: Color = Color::new(255, 255, 100, 255);

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Billboard {
    /// Index of the entity in the caller's list
    pub index: usize,
    pub distance: f32,
    pub bearing: f32,
    pub screen_x: f32,
    pub screen_y: f32,
    /// On-screen diameter in pixels
    pub size: f32,
    pub fill: Color,
    pub outline: Color,
    /// Inner disc of radius `size / 3`, coins only
    pub highlight: Option<Color>,
}

impl BillboardStyle {
    #[inline]
    pub fn size_at(&self, distance: f32) -> f32 {
        (self.world_size / distance * 200.0).clamp(self.min_size, self.max_size)
    }

    #[inline]
    pub fn shade_at(&self, distance: f32) -> f32 {
        (1.0 / (1.0 + distance * 0.005)).clamp(self.min_shade, 1.0)
    }
}

#[inline]
fn scale_color(c: Color, k: f32) -> Color {
    let mul = |v: u8| -> u8 { (v as f32 * k) as u8 };
    Color::new(mul(c.r), mul(c.g), mul(c.b), 255)
}

/// Screen position of an entity at `bearing` radians off the view axis.
#[inline]
pub fn screen_x_for(bearing: f32, config: &RaycastConfig) -> f32 {
    let half_w = config.screen_width as f32 / 2.0;
    half_w + (bearing / (config.fov_radians() / 2.0)) * half_w
}

/// Stable sort, farthest first; equal distances keep their input order.
pub fn sort_back_to_front(sprites: &mut [Billboard]) {
    sprites.sort_by(|a, b| b.distance.total_cmp(&a.distance));
}

/// `(screen_x, screen_y, size, shade)` for a visible entity.
fn place(v: &VisibleEntity, style: &BillboardStyle, config: &RaycastConfig) -> (f32, f32, f32, f32) {
    let size = style.size_at(v.distance);
    let shade = style.shade_at(v.distance);
    (screen_x_for(v.bearing, config), config.screen_height as f32 / 2.0, size, shade)
}

pub fn enemy_billboards(
    origin: Vector2,
    view_angle: f32,
    walls: &[Wall],
    positions: &[Vector2],
    colors: &[Color],
    config: &RaycastConfig,
) -> Vec<Billboard> {
    let visible = find_visible(origin, view_angle, walls, config.max_distance, positions, config);
    let mut out: Vec<Billboard> = visible
        .iter()
        .map(|v| {
            let (screen_x, screen_y, size, shade) = place(v, &ENEMY_STYLE, config);
            let base = colors.get(v.index).copied().unwrap_or(Color::RED);
            let fill = scale_color(base, shade);
            Billboard {
                index: v.index,
                distance: v.distance,
                bearing: v.bearing,
                screen_x,
                screen_y,
                size,
                fill,
                outline: Color::new(fill.r / 2, fill.g / 2, fill.b / 2, 255),
                highlight: None,
            }
        })
        .collect();
    sort_back_to_front(&mut out);
    out
}

/// Only uncollected coins take part; `index` refers to the full `coins` slice.
pub fn coin_billboards(
    origin: Vector2,
    view_angle: f32,
    walls: &[Wall],
    coins: &[Coin],
    config: &RaycastConfig,
) -> Vec<Billboard> {
    let (indices, positions): (Vec<usize>, Vec<Vector2>) = coins
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.collected)
        .map(|(i, c)| (i, c.position))
        .unzip();
    let visible = find_visible(origin, view_angle, walls, config.max_distance, &positions, config);
    let mut out: Vec<Billboard> = visible
        .iter()
        .map(|v| {
            let index = indices[v.index];
            let (screen_x, screen_y, size, shade) = place(v, &COIN_STYLE, config);
            let fill = scale_color(COIN_GOLD, shade);
            Billboard {
                index,
                distance: v.distance,
                bearing: v.bearing,
                screen_x,
                screen_y,
                size,
                fill,
                outline: scale_color(fill, 0.7),
                highlight: Some(scale_color(COIN_SHINE, shade)),
            }
        })
        .collect();
    sort_back_to_front(&mut out);
    out
}

/// Draws in slice order; pass a list from `sort_back_to_front`.
pub fn draw_billboards(fb: &mut Framebuffer, sprites: &[Billboard]) {
    for s in sprites {
        let (cx, cy) = (s.screen_x as i32, s.screen_y as i32);
        fb.fill_circle(cx, cy, s.size / 2.0, s.fill);
        fb.circle_outline(cx, cy, s.size / 2.0, s.outline);
        if let Some(h) = s.highlight {
            fb.fill_circle(cx, cy, s.size / 3.0, h);
        }
    }
}
