//! Rooms: walls, exits, entrances, coins and obstacle spawns.
use raylib::prelude::*;

use crate::core::enemy::{Obstacle, OBSTACLE_RADIUS, OBSTACLE_SPEED};

pub const WORLD_WIDTH: f32 = 800.0;
pub const WORLD_HEIGHT: f32 = 600.0;
pub const NUM_MAPS: usize = 4;
pub const EXIT_SIZE: f32 = 60.0;
pub const PLAYER_RADIUS: f32 = 25.0;

/// Walls are plain axis-aligned rectangles in world coordinates.
pub type Wall = Rectangle;

#[derive(Copy, Clone, Debug)]
pub struct Exit {
    pub rect: Rectangle,
    pub target_map: usize,
    pub target_entrance: usize,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Coin {
    pub position: Vector2,
    pub collected: bool,
}

impl Coin {
    fn at(x: f32, y: f32) -> Self {
        Self { position: Vector2::new(x, y), collected: false }
    }
}

pub struct GameMap {
    id: usize,
    walls: Vec<Wall>,
    exits: Vec<Exit>,
    entrances: Vec<Vector2>,
    coins: Vec<Coin>,
    obstacles: Vec<Obstacle>,
    background: Color,
}

/// Closest-point test; touching edges do not count.
pub fn circle_rect_collision(center: Vector2, radius: f32, rect: &Rectangle) -> bool {
    let cx = center.x.min(rect.x + rect.width).max(rect.x);
    let cy = center.y.min(rect.y + rect.height).max(rect.y);
    let dx = center.x - cx;
    let dy = center.y - cy;
    dx * dx + dy * dy < radius * radius
}

fn exit(x: f32, y: f32, target_map: usize, target_entrance: usize) -> Exit {
    Exit {
        rect: Rectangle::new(x, y, EXIT_SIZE, EXIT_SIZE),
        target_map,
        target_entrance,
    }
}

// exit anchors shared by every room
const EXIT_EAST_X: f32 = WORLD_WIDTH - EXIT_SIZE - 20.0;
const EXIT_WEST_X: f32 = 20.0;
const EXIT_MID_X: f32 = WORLD_WIDTH / 2.0 - EXIT_SIZE / 2.0;
const EXIT_MID_Y: f32 = WORLD_HEIGHT / 2.0 - EXIT_SIZE / 2.0;
const EXIT_SOUTH_Y: f32 = WORLD_HEIGHT - EXIT_SIZE - 20.0;
const EXIT_NORTH_Y: f32 = 20.0;

impl GameMap {
    /// Builds room `id` (0..NUM_MAPS). Unknown ids give an empty room.
    pub fn new(id: usize) -> Self {
        let s = OBSTACLE_SPEED;
        let (ox, oy) = match id {
            0 => (0.0, 0.0),
            1 => (400.0, 0.0),
            2 => (0.0, 350.0),
            _ => (400.0, 350.0),
        };
        // every room repeats the same wall motif, shifted into its own quadrant
        let motif = |ox: f32, oy: f32| -> Vec<Wall> {
            vec![
                Rectangle::new(50.0 + ox, 50.0 + oy, 150.0, 20.0),
                Rectangle::new(250.0 + ox, 50.0 + oy, 150.0, 20.0),
                Rectangle::new(50.0 + ox, 50.0 + oy, 20.0, 150.0),
                Rectangle::new(50.0 + ox, 250.0 + oy, 20.0, 150.0),
                Rectangle::new(200.0 + ox, 200.0 + oy, 100.0, 20.0),
                Rectangle::new(200.0 + ox, 200.0 + oy, 20.0, 100.0),
            ]
        };
        let center = Vector2::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT / 2.0);

        let (background, walls, exits, entrances, coins, obstacles) = match id {
            0 => (
                Color::new(240, 240, 255, 255),
                motif(ox, oy),
                vec![exit(EXIT_EAST_X, EXIT_MID_Y, 1, 0), exit(EXIT_MID_X, EXIT_SOUTH_Y, 2, 0)],
                vec![center, Vector2::new(50.0, WORLD_HEIGHT / 2.0), Vector2::new(WORLD_WIDTH / 2.0, 50.0)],
                vec![Coin::at(150.0, 150.0), Coin::at(350.0, 200.0), Coin::at(150.0, 350.0)],
                vec![
                    Obstacle::new(Vector2::new(300.0, 250.0), Vector2::new(s, s), 0, Color::RED),
                    Obstacle::new(Vector2::new(200.0, 300.0), Vector2::new(-s, s), 60, Color::RED),
                ],
            ),
            1 => (
                Color::new(255, 240, 240, 255),
                motif(ox, oy),
                vec![exit(EXIT_WEST_X, EXIT_MID_Y, 0, 1), exit(EXIT_MID_X, EXIT_SOUTH_Y, 3, 0)],
                vec![center, Vector2::new(WORLD_WIDTH - 50.0, WORLD_HEIGHT / 2.0), Vector2::new(WORLD_WIDTH / 2.0, 50.0)],
                vec![Coin::at(550.0, 150.0), Coin::at(750.0, 200.0), Coin::at(550.0, 350.0)],
                vec![
                    Obstacle::new(Vector2::new(600.0, 250.0), Vector2::new(s, -s), 30, Color::RED),
                    Obstacle::new(Vector2::new(700.0, 300.0), Vector2::new(-s, s), 90, Color::RED),
                ],
            ),
            2 => (
                Color::new(240, 255, 240, 255),
                motif(ox, oy),
                vec![exit(EXIT_MID_X, EXIT_NORTH_Y, 0, 2), exit(EXIT_EAST_X, EXIT_MID_Y, 3, 1)],
                vec![center, Vector2::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT - 50.0), Vector2::new(50.0, WORLD_HEIGHT / 2.0)],
                vec![Coin::at(150.0, 500.0), Coin::at(350.0, 450.0), Coin::at(150.0, 350.0)],
                vec![
                    Obstacle::new(Vector2::new(300.0, 500.0), Vector2::new(s, s), 45, Color::RED),
                    Obstacle::new(Vector2::new(200.0, 450.0), Vector2::new(-s, s), 120, Color::RED),
                ],
            ),
            3 => (
                Color::new(255, 255, 240, 255),
                motif(ox, oy),
                vec![exit(EXIT_MID_X, EXIT_NORTH_Y, 1, 2), exit(EXIT_WEST_X, EXIT_MID_Y, 2, 2)],
                vec![center, Vector2::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT - 50.0), Vector2::new(WORLD_WIDTH - 50.0, WORLD_HEIGHT / 2.0)],
                vec![Coin::at(550.0, 500.0), Coin::at(750.0, 450.0), Coin::at(550.0, 350.0)],
                vec![
                    Obstacle::new(Vector2::new(600.0, 500.0), Vector2::new(s, -s), 75, Color::RED),
                    Obstacle::new(Vector2::new(700.0, 450.0), Vector2::new(-s, -s), 15, Color::RED),
                ],
            ),
            _ => (Color::RAYWHITE, vec![], vec![], vec![], vec![], vec![]),
        };

        let mut map = Self { id, walls, exits, entrances, coins, obstacles, background };

        for i in 0..map.entrances.len() {
            let desired = map.entrances[i];
            let pos = map.find_valid_spawn_position(desired, PLAYER_RADIUS);
            if pos.x != desired.x || pos.y != desired.y {
                tracing::debug!(map = id, entrance = i, x = pos.x, y = pos.y, "adjusted entrance");
            }
            map.entrances[i] = pos;
        }
        for i in 0..map.obstacles.len() {
            let desired = map.obstacles[i].position;
            map.obstacles[i].position = map.find_valid_spawn_position(desired, OBSTACLE_RADIUS);
        }
        map
    }

    /// Bare room with only `walls`, for renderer tests.
    #[cfg(test)]
    pub(crate) fn from_walls(walls: Vec<Wall>) -> Self {
        Self {
            id: NUM_MAPS,
            walls,
            exits: vec![],
            entrances: vec![],
            coins: vec![],
            obstacles: vec![],
            background: Color::RAYWHITE,
        }
    }

    /// All rooms, indexed by id.
    pub fn all() -> Vec<GameMap> {
        (0..NUM_MAPS).map(GameMap::new).collect()
    }

    pub fn is_valid_spawn_position(&self, position: Vector2, radius: f32) -> bool {
        if position.x < radius
            || position.x > WORLD_WIDTH - radius
            || position.y < radius
            || position.y > WORLD_HEIGHT - radius
        {
            return false;
        }
        !self.walls.iter().any(|w| circle_rect_collision(position, radius, w))
    }

    /// `desired` if free, else the first free point on growing rings around
    /// it, else the world center.
    pub fn find_valid_spawn_position(&self, desired: Vector2, radius: f32) -> Vector2 {
        if self.is_valid_spawn_position(desired, radius) {
            return desired;
        }
        let mut search_radius = radius * 2.0;
        for _ in 0..50 {
            for step in 0..8 {
                let angle = (step as f32 * 45.0).to_radians();
                let test = Vector2::new(
                    desired.x + angle.cos() * search_radius,
                    desired.y + angle.sin() * search_radius,
                );
                if self.is_valid_spawn_position(test, radius) {
                    return test;
                }
            }
            search_radius += radius;
        }
        Vector2::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT / 2.0)
    }

    #[inline] pub fn id(&self) -> usize { self.id }
    #[inline] pub fn walls(&self) -> &[Wall] { &self.walls }
    #[inline] pub fn exits(&self) -> &[Exit] { &self.exits }
    #[inline] pub fn entrances(&self) -> &[Vector2] { &self.entrances }
    #[inline] pub fn coins(&self) -> &[Coin] { &self.coins }
    #[inline] pub fn coins_mut(&mut self) -> &mut [Coin] { &mut self.coins }
    #[inline] pub fn obstacles(&self) -> &[Obstacle] { &self.obstacles }
    #[inline] pub fn background(&self) -> Color { self.background }

    /// Obstacles and walls borrowed together so obstacles can move against walls.
    pub fn obstacles_and_walls_mut(&mut self) -> (&mut [Obstacle], &[Wall]) {
        (&mut self.obstacles, &self.walls)
    }

    /// Spawn point for entrance `index`, falling back to entrance 0, then the world center.
    pub fn entrance_or_default(&self, index: usize) -> Vector2 {
        self.entrances
            .get(index)
            .or_else(|| self.entrances.first())
            .copied()
            .unwrap_or(Vector2::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT / 2.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_rect_collision() {
        let r = Rectangle::new(100.0, 100.0, 50.0, 20.0);
        assert!(circle_rect_collision(Vector2::new(125.0, 110.0), 1.0, &r));
        assert!(circle_rect_collision(Vector2::new(90.0, 110.0), 11.0, &r));
        // exactly touching is not a collision
        assert!(!circle_rect_collision(Vector2::new(90.0, 110.0), 10.0, &r));
        assert!(!circle_rect_collision(Vector2::new(0.0, 0.0), 25.0, &r));
    }

    #[test]
    fn test_rooms_have_layouts() {
        for map in GameMap::all() {
            assert_eq!(map.walls().len(), 6);
            assert_eq!(map.exits().len(), 2);
            assert_eq!(map.entrances().len(), 3);
            assert_eq!(map.coins().len(), 3);
            assert_eq!(map.obstacles().len(), 2);
            assert!(map.walls().len() <= 20);
        }
        assert!(GameMap::new(9).walls().is_empty());
    }

    #[test]
    fn test_exits_point_at_real_rooms() {
        for map in GameMap::all() {
            for e in map.exits() {
                assert!(e.target_map < NUM_MAPS);
                assert_ne!(e.target_map, map.id());
                assert!(e.target_entrance < GameMap::new(e.target_map).entrances().len());
            }
        }
    }

    #[test]
    fn test_entrances_are_valid_spawns() {
        for map in GameMap::all() {
            for &e in map.entrances() {
                assert!(map.is_valid_spawn_position(e, PLAYER_RADIUS), "map {} entrance {:?}", map.id(), e);
            }
        }
    }

    #[test]
    fn test_spawn_search_moves_off_walls() {
        let map = GameMap::new(0);
        let inside = Vector2::new(60.0, 100.0);
        assert!(!map.is_valid_spawn_position(inside, PLAYER_RADIUS));
        let found = map.find_valid_spawn_position(inside, PLAYER_RADIUS);
        assert!(map.is_valid_spawn_position(found, PLAYER_RADIUS));
    }

    #[test]
    fn test_spawn_outside_world_is_invalid() {
        let map = GameMap::new(0);
        assert!(!map.is_valid_spawn_position(Vector2::new(10.0, 300.0), PLAYER_RADIUS));
        assert!(!map.is_valid_spawn_position(Vector2::new(400.0, 590.0), PLAYER_RADIUS));
    }

    #[test]
    fn test_entrance_fallbacks() {
        let map = GameMap::new(0);
        assert_eq!(map.entrance_or_default(7), map.entrances()[0]);
        let empty = GameMap::new(42);
        let p = empty.entrance_or_default(0);
        assert_eq!((p.x, p.y), (400.0, 300.0));
    }
}
