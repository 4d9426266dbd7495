//! Ray casting against axis-aligned wall rectangles.
//!
//! Exposes:
//! - `cast_ray`: nearest wall hit along one ray (slab method)
//! - `shade`: distance/side shading of a wall color
//! - `find_visible`: FOV + occlusion test for point entities
//!
//! Everything here is a pure function of its arguments.
use std::f32::consts::{PI, TAU};

use raylib::prelude::*;

use crate::config::RaycastConfig;
use crate::core::map::Wall;

/// Hits closer than this are treated as self-intersection.
pub const MIN_HIT_DISTANCE: f32 = 0.1;
/// Screen-space multiplier of the inverse-distance wall projection.
pub const PROJECTION_SCALE: f32 = 200.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WallSide {
    North,
    South,
    East,
    West,
    Unknown,
}

impl WallSide {
    /// Flat light factor per face.
    #[inline]
    pub fn shade_factor(self) -> f32 {
        match self {
            WallSide::North => 0.9,
            WallSide::South => 1.0,
            WallSide::East | WallSide::West => 0.85,
            WallSide::Unknown => 1.0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RaycastResult {
    pub distance: f32,
    pub perp_distance: f32,
    pub wall_height: f32,
    pub color: Color,
    pub hit: bool,
    pub hit_point: Vector2,
    pub wall_index: Option<usize>,
    pub side: WallSide,
}

impl RaycastResult {
    fn miss(config: &RaycastConfig) -> Self {
        Self {
            distance: config.max_distance,
            perp_distance: config.max_distance,
            wall_height: 0.0,
            color: config.wall_color(),
            hit: false,
            hit_point: Vector2::new(0.0, 0.0),
            wall_index: None,
            side: WallSide::Unknown,
        }
    }
}

/// Clips `[t_min, t_max]` against one axis slab. `None` means the ray misses it.
#[inline]
fn clip_slab(
    origin: f32,
    dir: f32,
    lo: f32,
    hi: f32,
    t_min: f32,
    t_max: f32,
) -> Option<(f32, f32)> {
    if dir != 0.0 {
        let t1 = (lo - origin) / dir;
        let t2 = (hi - origin) / dir;
        let t_near = t1.min(t2);
        let t_far = t1.max(t2);
        if t_near > t_max || t_far < t_min {
            return None;
        }
        Some((t_min.max(t_near), t_max.min(t_far)))
    } else if origin < lo || origin > hi {
        None
    } else {
        Some((t_min, t_max))
    }
}

/// Which face of `wall` the point lies on; ties resolve left, right, top, bottom.
fn hit_side(p: Vector2, wall: &Wall) -> WallSide {
    let to_left = (p.x - wall.x).abs();
    let to_right = (p.x - (wall.x + wall.width)).abs();
    let to_top = (p.y - wall.y).abs();
    let to_bottom = (p.y - (wall.y + wall.height)).abs();
    let min_edge = to_left.min(to_right).min(to_top.min(to_bottom));
    if min_edge == to_left {
        WallSide::West
    } else if min_edge == to_right {
        WallSide::East
    } else if min_edge == to_top {
        WallSide::North
    } else {
        WallSide::South
    }
}

/// Casts one ray from `origin` along `angle` (0 = +x, clockwise in screen
/// space) and returns the nearest wall hit within `config.max_distance`.
pub fn cast_ray(origin: Vector2, angle: f32, walls: &[Wall], config: &RaycastConfig) -> RaycastResult {
    let mut result = RaycastResult::miss(config);
    let max_dist = config.max_distance;

    let dx = angle.cos();
    let dy = angle.sin();
    // parametric direction: t in [0,1] covers the whole cast length
    let sx = dx * max_dist;
    let sy = dy * max_dist;

    let mut min_dist = max_dist;
    for (i, wall) in walls.iter().enumerate() {
        let Some((t_min, t_max)) = clip_slab(origin.x, sx, wall.x, wall.x + wall.width, 0.0, 1.0) else {
            continue;
        };
        let Some((t_min, t_max)) = clip_slab(origin.y, sy, wall.y, wall.y + wall.height, t_min, t_max) else {
            continue;
        };
        if !(t_min <= t_max && t_min >= 0.0 && t_min < 1.0) {
            continue;
        }

        let point = Vector2::new(
            origin.x + dx * t_min * max_dist,
            origin.y + dy * t_min * max_dist,
        );
        let ix = point.x - origin.x;
        let iy = point.y - origin.y;
        let dist = (ix * ix + iy * iy).sqrt();

        if dist < min_dist && dist > MIN_HIT_DISTANCE {
            min_dist = dist;
            result.hit = true;
            result.hit_point = point;
            result.wall_index = Some(i);
            result.side = hit_side(point, wall);
        }
    }

    if result.hit {
        result.distance = min_dist;
        // fisheye correction against the ray's own heading
        let perp = min_dist * (angle - dy.atan2(dx)).cos();
        result.perp_distance = if perp < MIN_HIT_DISTANCE { MIN_HIT_DISTANCE } else { perp };
        result.color = shade(config.wall_color(), result.perp_distance, result.side);
        result.wall_height = ((config.wall_height / result.perp_distance) * PROJECTION_SCALE)
            .min(config.screen_height as f32);
    }
    result
}

/// Brightness from distance alone, in `[0.15, 1.0]`.
#[inline]
pub fn distance_shade(distance: f32) -> f32 {
    (1.0 / (1.0 + distance * 0.008)).clamp(0.15, 1.0)
}

/// Darkens `base` by distance and wall face. Channels truncate; alpha is kept.
pub fn shade(base: Color, distance: f32, side: WallSide) -> Color {
    let total = distance_shade(distance) * side.shade_factor();
    Color::new(
        (base.r as f32 * total) as u8,
        (base.g as f32 * total) as u8,
        (base.b as f32 * total) as u8,
        base.a,
    )
}

/// Wraps an angle into `(-PI, PI]`. Non-finite input comes back unchanged.
#[inline]
pub fn normalize_angle(a: f32) -> f32 {
    if !a.is_finite() {
        return a;
    }
    let mut a = a % TAU;
    if a > PI {
        a -= TAU;
    } else if a <= -PI {
        a += TAU;
    }
    a
}

pub fn world_to_grid(pos: Vector2, cell_size: f32) -> Vector2 {
    Vector2::new((pos.x / cell_size).floor(), (pos.y / cell_size).floor())
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VisibleEntity {
    /// Index into the slice passed to `find_visible`
    pub index: usize,
    pub distance: f32,
    /// Signed angle from the view direction, in `(-PI, PI]`
    pub bearing: f32,
}

/// Entities inside the field of view with no wall between them and `origin`,
/// in input order.
pub fn find_visible(
    origin: Vector2,
    view_angle: f32,
    walls: &[Wall],
    max_distance: f32,
    entities: &[Vector2],
    config: &RaycastConfig,
) -> Vec<VisibleEntity> {
    let fov_half = config.fov_radians() / 2.0;
    let mut visible = Vec::new();

    for (index, pos) in entities.iter().enumerate() {
        let vx = pos.x - origin.x;
        let vy = pos.y - origin.y;
        let dist = (vx * vx + vy * vy).sqrt();
        if dist > max_distance || dist < MIN_HIT_DISTANCE {
            continue;
        }

        let entity_angle = vy.atan2(vx);
        let bearing = normalize_angle(entity_angle - view_angle);
        if !(bearing.abs() <= fov_half) {
            continue;
        }

        let ray = cast_ray(origin, entity_angle, walls, config);
        if !ray.hit || ray.distance > dist {
            visible.push(VisibleEntity { index, distance: dist, bearing });
        }
    }
    visible
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn wall(x: f32, y: f32, w: f32, h: f32) -> Wall {
        Rectangle::new(x, y, w, h)
    }

    fn origin() -> Vector2 {
        Vector2::new(0.0, 0.0)
    }

    #[test]
    fn test_scenario_single_wall_ahead() {
        let cfg = RaycastConfig::default();
        let walls = [wall(100.0, -10.0, 20.0, 20.0)];
        let r = cast_ray(origin(), 0.0, &walls, &cfg);
        assert!(r.hit);
        assert!((r.distance - 100.0).abs() < EPS);
        assert_eq!(r.side, WallSide::West);
        assert_eq!(r.wall_index, Some(0));
        assert!((r.hit_point.x - 100.0).abs() < EPS);
    }

    #[test]
    fn test_empty_map_misses() {
        let cfg = RaycastConfig::default();
        for angle in [0.0_f32, 1.0, -2.5, 7.0, 100.0] {
            let r = cast_ray(origin(), angle, &[], &cfg);
            assert!(!r.hit);
            assert_eq!(r.distance, cfg.max_distance);
            assert_eq!(r.side, WallSide::Unknown);
            assert_eq!(r.wall_index, None);
        }
    }

    #[test]
    fn test_wall_beyond_cast_length_misses() {
        let cfg = RaycastConfig::default();
        let walls = [wall(1500.0, -10.0, 20.0, 20.0), wall(-50.0, 30.0, 10.0, 10.0)];
        let r = cast_ray(origin(), 0.0, &walls, &cfg);
        assert!(!r.hit);
    }

    #[test]
    fn test_nearest_of_two_walls_wins() {
        let cfg = RaycastConfig::default();
        let walls = [wall(150.0, -10.0, 20.0, 20.0), wall(50.0, -10.0, 20.0, 20.0)];
        let r = cast_ray(origin(), 0.0, &walls, &cfg);
        assert!(r.hit);
        assert_eq!(r.wall_index, Some(1));
        assert!((r.distance - 50.0).abs() < EPS);
    }

    #[test]
    fn test_equal_distance_keeps_first_wall() {
        let cfg = RaycastConfig::default();
        let walls = [wall(80.0, -10.0, 20.0, 10.0), wall(80.0, 0.0, 20.0, 10.0)];
        let r = cast_ray(origin(), 0.0, &walls, &cfg);
        assert_eq!(r.wall_index, Some(0));
    }

    #[test]
    fn test_axis_parallel_gap_is_exact() {
        let cfg = RaycastConfig::default();
        let o = Vector2::new(10.0, 25.0);
        let walls = [wall(47.5, 20.0, 5.0, 30.0)];
        let r = cast_ray(o, 0.0, &walls, &cfg);
        assert!(r.hit);
        assert!((r.distance - 37.5).abs() < EPS);
    }

    #[test]
    fn test_axis_parallel_outside_slab_misses() {
        let cfg = RaycastConfig::default();
        let walls = [wall(100.0, 5.0, 20.0, 20.0)];
        let r = cast_ray(origin(), 0.0, &walls, &cfg);
        assert!(!r.hit);
    }

    #[test]
    fn test_sides_by_direction() {
        let cfg = RaycastConfig::default();
        let walls = [wall(-10.0, -10.0, 20.0, 20.0)];
        // looking at the box from each side
        let cases = [
            (Vector2::new(-100.0, 0.0), 0.0, WallSide::West),
            (Vector2::new(100.0, 0.0), PI, WallSide::East),
            (Vector2::new(0.0, -100.0), PI / 2.0, WallSide::North),
            (Vector2::new(0.0, 100.0), -PI / 2.0, WallSide::South),
        ];
        for (o, a, side) in cases {
            let r = cast_ray(o, a, &walls, &cfg);
            assert!(r.hit, "ray from {:?}", o);
            assert_eq!(r.side, side, "ray from {:?}", o);
            assert!((r.distance - 90.0).abs() < EPS);
        }
    }

    #[test]
    fn test_origin_inside_wall_is_ignored() {
        let cfg = RaycastConfig::default();
        let walls = [wall(-10.0, -10.0, 20.0, 20.0), wall(200.0, -10.0, 20.0, 20.0)];
        let r = cast_ray(origin(), 0.0, &walls, &cfg);
        assert_eq!(r.wall_index, Some(1));
    }

    #[test]
    fn test_nearest_hit_over_many_walls() {
        let cfg = RaycastConfig::default();
        let walls: Vec<Wall> = (0..10)
            .map(|i| wall(600.0 - 50.0 * i as f32, 300.0 + 13.0 * i as f32, 20.0, 20.0))
            .collect();
        let o = Vector2::new(5.0, 5.0);
        for step in 0..64 {
            let angle = step as f32 * TAU / 64.0;
            let r = cast_ray(o, angle, &walls, &cfg);
            let Some(idx) = r.wall_index else { continue };
            for (j, w) in walls.iter().enumerate() {
                let single = cast_ray(o, angle, std::slice::from_ref(w), &cfg);
                if single.hit {
                    assert!(single.distance >= r.distance, "wall {} nearer than {}", j, idx);
                }
            }
        }
    }

    #[test]
    fn test_perp_distance_floor_and_height_clamp() {
        let cfg = RaycastConfig::default();
        let walls = [wall(0.15, -5.0, 10.0, 10.0)];
        let r = cast_ray(origin(), 0.0, &walls, &cfg);
        assert!(r.hit);
        assert!(r.perp_distance >= MIN_HIT_DISTANCE);
        assert_eq!(r.wall_height, cfg.screen_height as f32);

        let far = [wall(500.0, -5.0, 10.0, 10.0)];
        let r = cast_ray(origin(), 0.0, &far, &cfg);
        assert!((r.wall_height - (200.0 / r.perp_distance) * 200.0).abs() < 1e-3);
    }

    #[test]
    fn test_distance_shade_monotone_with_floor() {
        let mut prev = distance_shade(0.0);
        assert_eq!(prev, 1.0);
        for i in 1..2000 {
            let s = distance_shade(i as f32);
            assert!(s <= prev);
            assert!(s >= 0.15);
            prev = s;
        }
        assert_eq!(distance_shade(10_000.0), 0.15);
    }

    #[test]
    fn test_shade_truncates_and_keeps_alpha() {
        let base = Color::new(80, 80, 80, 77);
        // distance 0 -> full brightness, west face 0.85 -> 68.0
        let c = shade(base, 0.0, WallSide::West);
        assert_eq!(c, Color::new(68, 68, 68, 77));
        // distance 100 -> 1/1.8 = 0.5555.., south -> 44.44 -> 44
        let c = shade(base, 100.0, WallSide::South);
        assert_eq!(c.r, 44);
        let c = shade(Color::new(255, 255, 255, 255), 0.0, WallSide::North);
        assert_eq!(c.r, 229);
    }

    #[test]
    fn test_normalize_angle_range() {
        for a in [0.0_f32, PI, -PI, 3.0 * PI, -3.0 * PI, 7.5, -7.5, 1000.0, -1000.0] {
            let n = normalize_angle(a);
            assert!(n > -PI - 1e-4 && n <= PI + 1e-4, "{} -> {}", a, n);
            assert!(((a - n) / TAU - ((a - n) / TAU).round()).abs() < 1e-3);
        }
        assert!(normalize_angle(f32::NAN).is_nan());
    }

    #[test]
    fn test_world_to_grid_floors() {
        let g = world_to_grid(Vector2::new(130.0, -5.0), 64.0);
        assert_eq!((g.x, g.y), (2.0, -1.0));
    }

    #[test]
    fn test_fov_edge_inclusion() {
        let cfg = RaycastConfig::default();
        let half = cfg.fov_radians() / 2.0;
        let eps = 0.01;
        let at = |a: f32| Vector2::new(200.0 * a.cos(), 200.0 * a.sin());
        for view in [0.0_f32, 1.2, -2.9] {
            let inside = [at(view + half - eps), at(view - half + eps)];
            let outside = [at(view + half + eps), at(view - half - eps)];
            assert_eq!(find_visible(origin(), view, &[], 1000.0, &inside, &cfg).len(), 2);
            assert!(find_visible(origin(), view, &[], 1000.0, &outside, &cfg).is_empty());
        }
    }

    #[test]
    fn test_too_close_entity_never_visible() {
        let cfg = RaycastConfig::default();
        let coins = [Vector2::new(0.05, 0.0), Vector2::new(0.0, 0.05), Vector2::new(-0.03, -0.03)];
        for view in [0.0_f32, PI / 2.0, PI, -PI / 2.0] {
            assert!(find_visible(origin(), view, &[], 1000.0, &coins, &cfg).is_empty());
        }
    }

    #[test]
    fn test_occluded_and_far_entities_dropped() {
        let cfg = RaycastConfig::default();
        let walls = [wall(50.0, -10.0, 10.0, 20.0)];
        let entities = [
            Vector2::new(100.0, 0.0), // behind the wall
            Vector2::new(30.0, 0.0),  // in front of it
            Vector2::new(0.0, -40.0), // outside the FOV
            Vector2::new(900.0, 300.0), // beyond max_distance below
        ];
        let vis = find_visible(origin(), 0.0, &walls, 500.0, &entities, &cfg);
        assert_eq!(vis.len(), 1);
        assert_eq!(vis[0].index, 1);
        assert!((vis[0].distance - 30.0).abs() < EPS);
        assert!(vis[0].bearing.abs() < EPS);
    }

    #[test]
    fn test_visible_preserves_input_order() {
        let cfg = RaycastConfig::default();
        let entities = [
            Vector2::new(300.0, 10.0),
            Vector2::new(100.0, -20.0),
            Vector2::new(200.0, 0.0),
        ];
        let vis = find_visible(origin(), 0.0, &[], 1000.0, &entities, &cfg);
        let order: Vec<usize> = vis.iter().map(|v| v.index).collect();
        assert_eq!(order, vec![0, 1, 2]);
        assert!(vis[1].bearing < 0.0);
    }

    #[test]
    fn test_nan_angle_does_not_panic() {
        let cfg = RaycastConfig::default();
        let walls = [wall(100.0, -10.0, 20.0, 20.0)];
        let r = cast_ray(origin(), f32::NAN, &walls, &cfg);
        assert!(!r.hit);
        let vis = find_visible(origin(), f32::NAN, &walls, 1000.0, &[Vector2::new(10.0, 0.0)], &cfg);
        assert!(vis.is_empty());
    }
}
