//! Player pose, movement and health.
use std::f32::consts::FRAC_PI_2;

use raylib::prelude::*;

use crate::core::map::{circle_rect_collision, Exit, GameMap, Wall, PLAYER_RADIUS, WORLD_HEIGHT, WORLD_WIDTH};
use crate::render::raycaster::normalize_angle;

pub const PLAYER_SPEED: f32 = 5.0;
pub const MAX_HEALTH: f32 = 100.0;
pub const DAMAGE_PER_HIT: f32 = 10.0;
pub const INVINCIBILITY_FRAMES: u32 = 60;

/// Movement intent for one frame. `forward` is W/S, `right` is D/A, `turn`
/// is radians of yaw (first-person only).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MoveInput {
    pub forward: f32,
    pub right: f32,
    pub turn: f32,
}

pub struct Player {
    pub pos: Vector2,
    pub a: f32, // view angle, 0 = +x, clockwise
    pub speed: f32,
    health: f32,
    max_health: f32,
    invincibility_timer: u32,
}

impl Player {
    pub fn new(pos: Vector2) -> Self {
        Self {
            pos,
            a: 0.0,
            speed: PLAYER_SPEED,
            health: MAX_HEALTH,
            max_health: MAX_HEALTH,
            invincibility_timer: 0,
        }
    }

    pub fn reset(&mut self, pos: Vector2) {
        *self = Self::new(pos);
    }

    #[inline] pub fn health(&self) -> f32 { self.health }
    #[inline] pub fn max_health(&self) -> f32 { self.max_health }
    #[inline] pub fn is_alive(&self) -> bool { self.health > 0.0 }
    #[inline] pub fn is_invincible(&self) -> bool { self.invincibility_timer > 0 }
    #[inline] pub fn invincibility_timer(&self) -> u32 { self.invincibility_timer }

    pub fn set_health(&mut self, health: f32) {
        self.health = health.clamp(0.0, self.max_health);
    }

    /// Ignored while invincible; otherwise starts a fresh invincibility window.
    pub fn apply_damage(&mut self, damage: f32) {
        if self.is_invincible() {
            return;
        }
        self.health = (self.health - damage).max(0.0);
        self.invincibility_timer = INVINCIBILITY_FRAMES;
    }

    /// Per-frame timers.
    pub fn tick(&mut self) {
        self.invincibility_timer = self.invincibility_timer.saturating_sub(1);
    }

    pub fn hits_wall(&self, at: Vector2, walls: &[Wall]) -> bool {
        walls.iter().any(|w| circle_rect_collision(at, PLAYER_RADIUS, w))
    }

    /// Screen-axis movement for the top-down view: W is up, D is right.
    /// The view angle follows the heading so the first-person view matches.
    pub fn move_top_down(&mut self, input: MoveInput, walls: &[Wall]) {
        let (dx, dy) = (input.right, -input.forward);
        if dx != 0.0 || dy != 0.0 {
            self.a = dy.atan2(dx);
        }
        self.step(dx, dy, walls);
    }

    /// View-relative movement: W/S along the view angle, A/D strafe.
    pub fn move_first_person(&mut self, input: MoveInput, walls: &[Wall]) {
        self.a = normalize_angle(self.a + input.turn);
        let (c, s) = (self.a.cos(), self.a.sin());
        let (rc, rs) = ((self.a + FRAC_PI_2).cos(), (self.a + FRAC_PI_2).sin());
        let dx = c * input.forward + rc * input.right;
        let dy = s * input.forward + rs * input.right;
        self.step(dx, dy, walls);
    }

    /// Normalizes `(dx, dy)` to `speed`, moves unless blocked, then clamps.
    fn step(&mut self, dx: f32, dy: f32, walls: &[Wall]) {
        let len = (dx * dx + dy * dy).sqrt();
        if len > 0.0 {
            let next = Vector2::new(
                self.pos.x + dx / len * self.speed,
                self.pos.y + dy / len * self.speed,
            );
            if !self.hits_wall(next, walls) {
                self.pos = next;
            }
        }
        self.pos.x = self.pos.x.clamp(PLAYER_RADIUS, WORLD_WIDTH - PLAYER_RADIUS);
        self.pos.y = self.pos.y.clamp(PLAYER_RADIUS, WORLD_HEIGHT - PLAYER_RADIUS);
    }

    /// First exit the player circle overlaps.
    pub fn exit_hit<'m>(&self, map: &'m GameMap) -> Option<&'m Exit> {
        map.exits().iter().find(|e| circle_rect_collision(self.pos, PLAYER_RADIUS, &e.rect))
    }
}
