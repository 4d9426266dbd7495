//! Core game types and logic (rooms, player, obstacles, world step, input).
//!
//! Re-exports:
//! - `map`: Room layouts, collision and spawn search
//! - `player`: Player pose, movement and health
//! - `enemy`: Patrolling obstacles
//! - `world`: Rooms + player + score, stepped once per frame
//! - `process_events`: Input polling

pub mod map;
pub mod player;
pub mod enemy;
pub mod world;
pub mod process_events;
