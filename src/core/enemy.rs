//! Patrolling obstacles (the enemies of the coin collector).
use rand::Rng;
use raylib::prelude::*;

use crate::core::map::{Wall, WORLD_HEIGHT, WORLD_WIDTH};

pub const OBSTACLE_RADIUS: f32 = 20.0;
pub const OBSTACLE_SPEED: f32 = 2.0;
/// Frames between random heading changes.
pub const DIRECTION_CHANGE_FRAMES: u32 = 120;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub position: Vector2,
    pub velocity: Vector2,
    pub radius: f32,
    pub direction_timer: u32,
    pub color: Color,
}

#[inline]
fn rects_overlap(a: &Rectangle, b: &Rectangle) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

impl Obstacle {
    pub fn new(position: Vector2, velocity: Vector2, direction_timer: u32, color: Color) -> Self {
        Self { position, velocity, radius: OBSTACLE_RADIUS, direction_timer, color }
    }

    /// Square bounding box at `at`, used for wall checks.
    fn bounds_at(&self, at: Vector2) -> Rectangle {
        Rectangle::new(at.x - self.radius, at.y - self.radius, self.radius * 2.0, self.radius * 2.0)
    }

    pub fn hits_wall(&self, at: Vector2, walls: &[Wall]) -> bool {
        let b = self.bounds_at(at);
        walls.iter().any(|w| rects_overlap(&b, w))
    }

    /// One frame of patrol: maybe pick a new heading, move or bounce off a
    /// wall, then stay inside the world.
    pub fn update<R: Rng + ?Sized>(&mut self, walls: &[Wall], rng: &mut R) {
        self.direction_timer += 1;
        if self.direction_timer >= DIRECTION_CHANGE_FRAMES {
            let angle = (rng.gen_range(0..=360) as f32).to_radians();
            self.velocity = Vector2::new(angle.cos() * OBSTACLE_SPEED, angle.sin() * OBSTACLE_SPEED);
            self.direction_timer = 0;
        }

        let next = Vector2::new(self.position.x + self.velocity.x, self.position.y + self.velocity.y);
        if self.hits_wall(next, walls) {
            self.velocity = Vector2::new(-self.velocity.x, -self.velocity.y);
        } else {
            self.position = next;
        }

        let r = self.radius;
        if self.position.x < r {
            self.position.x = r;
            self.velocity.x = -self.velocity.x;
        }
        if self.position.x > WORLD_WIDTH - r {
            self.position.x = WORLD_WIDTH - r;
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y < r {
            self.position.y = r;
            self.velocity.y = -self.velocity.y;
        }
        if self.position.y > WORLD_HEIGHT - r {
            self.position.y = WORLD_HEIGHT - r;
            self.velocity.y = -self.velocity.y;
        }
    }

    pub fn touches_player(&self, player_pos: Vector2, player_radius: f32) -> bool {
        let dx = player_pos.x - self.position.x;
        let dy = player_pos.y - self.position.y;
        (dx * dx + dy * dy).sqrt() < player_radius + self.radius
    }
}
