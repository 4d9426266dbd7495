//! Game world: rooms, player, score and the per-frame step.
use rand::Rng;
use raylib::prelude::*;

use crate::core::map::{GameMap, PLAYER_RADIUS};
use crate::core::player::{MoveInput, Player, DAMAGE_PER_HIT};

pub const COIN_RADIUS: f32 = 15.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ViewMode {
    TopDown,
    FirstPerson,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::TopDown => ViewMode::FirstPerson,
            ViewMode::FirstPerson => ViewMode::TopDown,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Playing,
    /// Every coin collected; holds the completion time in frames.
    Won { frames: u64 },
}

/// What happened during one `step`, for sound/HUD hooks and tests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepEvents {
    pub entered_map: Option<usize>,
    pub damaged: bool,
    pub died: bool,
    pub coins_picked: u32,
    pub won: bool,
}

pub struct World {
    maps: Vec<GameMap>,
    current: usize,
    pub player: Player,
    pub view: ViewMode,
    coins_collected: u32,
    frame_count: u64,
    start_frame: u64,
    phase: Phase,
}

impl World {
    pub fn new(view: ViewMode) -> Self {
        let maps = GameMap::all();
        let start = maps[0].entrance_or_default(0);
        Self {
            maps,
            current: 0,
            player: Player::new(start),
            view,
            coins_collected: 0,
            frame_count: 0,
            start_frame: 0,
            phase: Phase::Playing,
        }
    }

    /// Fresh rooms, full health, back at the first entrance. Keeps the view mode.
    pub fn reset(&mut self) {
        self.maps = GameMap::all();
        self.current = 0;
        let start = self.maps[0].entrance_or_default(0);
        self.player.reset(start);
        self.coins_collected = 0;
        self.start_frame = self.frame_count;
        self.phase = Phase::Playing;
    }

    #[inline] pub fn current_map(&self) -> &GameMap { &self.maps[self.current] }
    #[inline] pub fn current_map_id(&self) -> usize { self.current }
    #[inline] pub fn coins_collected(&self) -> u32 { self.coins_collected }
    #[inline] pub fn frame_count(&self) -> u64 { self.frame_count }
    #[inline] pub fn phase(&self) -> Phase { self.phase }

    pub fn total_coins(&self) -> u32 {
        self.maps.iter().map(|m| m.coins().len() as u32).sum()
    }

    pub fn all_coins_collected(&self) -> bool {
        self.maps.iter().all(|m| m.coins().iter().all(|c| c.collected))
    }

    pub fn toggle_view(&mut self) {
        self.view = self.view.toggled();
        tracing::info!(view = ?self.view, "view mode changed");
    }

    /// Moves the player into `map` at `entrance`.
    pub fn enter_map(&mut self, map: usize, entrance: usize) {
        let Some(target) = self.maps.get(map) else {
            tracing::warn!(map, "exit points at a missing room");
            return;
        };
        self.player.pos = target.entrance_or_default(entrance);
        self.current = map;
        tracing::info!(map, entrance, "entered room");
    }

    /// Advances one frame. Does nothing once the game is won.
    pub fn step<R: Rng + ?Sized>(&mut self, input: MoveInput, rng: &mut R) -> StepEvents {
        let mut events = StepEvents::default();
        self.frame_count += 1;
        if self.phase != Phase::Playing {
            return events;
        }

        self.player.tick();

        let map = &mut self.maps[self.current];
        let (obstacles, walls) = map.obstacles_and_walls_mut();
        for o in obstacles.iter_mut() {
            o.update(walls, rng);
        }

        let walls = self.maps[self.current].walls();
        match self.view {
            ViewMode::TopDown => self.player.move_top_down(input, walls),
            ViewMode::FirstPerson => self.player.move_first_person(input, walls),
        }

        if let Some(exit) = self.player.exit_hit(&self.maps[self.current]).copied() {
            self.enter_map(exit.target_map, exit.target_entrance);
            events.entered_map = Some(exit.target_map);
        }

        let pos = self.player.pos;
        let touching = self.maps[self.current]
            .obstacles()
            .iter()
            .any(|o| o.touches_player(pos, PLAYER_RADIUS));
        if touching && !self.player.is_invincible() {
            self.player.apply_damage(DAMAGE_PER_HIT);
            events.damaged = true;
            tracing::info!(health = self.player.health(), max = self.player.max_health(), "hit");
            if !self.player.is_alive() {
                tracing::info!("player died, resetting");
                events.died = true;
                self.reset();
                return events;
            }
        }

        let pos = self.player.pos;
        for coin in self.maps[self.current].coins_mut().iter_mut().filter(|c| !c.collected) {
            let dx = pos.x - coin.position.x;
            let dy = pos.y - coin.position.y;
            if (dx * dx + dy * dy).sqrt() < PLAYER_RADIUS + COIN_RADIUS {
                coin.collected = true;
                events.coins_picked += 1;
            }
        }
        if events.coins_picked > 0 {
            self.coins_collected += events.coins_picked;
            tracing::info!(collected = self.coins_collected, total = self.total_coins(), "coin collected");
            if self.all_coins_collected() {
                let frames = self.frame_count - self.start_frame;
                self.phase = Phase::Won { frames };
                events.won = true;
                tracing::info!(frames, "all coins collected");
            }
        }
        events
    }

    /// Enemy positions and colors of the current room, for the billboard pass.
    pub fn enemy_snapshot(&self) -> (Vec<Vector2>, Vec<Color>) {
        self.current_map()
            .obstacles()
            .iter()
            .map(|o| (o.position, o.color))
            .unzip()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn still() -> MoveInput {
        MoveInput::default()
    }

    #[test]
    fn test_new_world() {
        let w = World::new(ViewMode::TopDown);
        assert_eq!(w.current_map_id(), 0);
        assert_eq!(w.total_coins(), 12);
        assert_eq!(w.phase(), Phase::Playing);
        assert!(!w.all_coins_collected());
    }

    #[test]
    fn test_coin_pickup_counts_once() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut w = World::new(ViewMode::TopDown);
        w.player.pos = w.current_map().coins()[0].position;
        let ev = w.step(still(), &mut rng);
        assert_eq!(ev.coins_picked, 1);
        assert_eq!(w.coins_collected(), 1);
        let ev = w.step(still(), &mut rng);
        assert_eq!(ev.coins_picked, 0);
        assert_eq!(w.coins_collected(), 1);
    }

    #[test]
    fn test_exit_moves_to_target_room() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut w = World::new(ViewMode::TopDown);
        let e = w.current_map().exits()[0];
        w.player.pos = Vector2::new(e.rect.x + 30.0, e.rect.y + 30.0);
        let ev = w.step(still(), &mut rng);
        assert_eq!(ev.entered_map, Some(e.target_map));
        assert_eq!(w.current_map_id(), e.target_map);
        let expected = w.current_map().entrances()[e.target_entrance];
        assert_eq!((w.player.pos.x, w.player.pos.y), (expected.x, expected.y));
    }

    #[test]
    fn test_death_resets_world() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut w = World::new(ViewMode::FirstPerson);
        w.player.set_health(DAMAGE_PER_HIT);
        w.maps[0].coins_mut()[0].collected = true;
        w.coins_collected = 1;
        // park the player on an obstacle's next position
        let o = w.current_map().obstacles()[0];
        w.player.pos = Vector2::new(o.position.x + o.velocity.x, o.position.y + o.velocity.y);
        let ev = w.step(still(), &mut rng);
        assert!(ev.damaged);
        assert!(ev.died);
        assert_eq!(w.player.health(), w.player.max_health());
        assert_eq!(w.coins_collected(), 0);
        assert!(!w.current_map().coins()[0].collected);
        assert_eq!(w.view, ViewMode::FirstPerson);
    }

    #[test]
    fn test_win_after_last_coin() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut w = World::new(ViewMode::TopDown);
        for m in w.maps.iter_mut() {
            for c in m.coins_mut() {
                c.collected = true;
            }
        }
        w.maps[0].coins_mut()[2].collected = false;
        w.coins_collected = 11;
        w.player.pos = w.current_map().coins()[2].position;
        let ev = w.step(still(), &mut rng);
        assert!(ev.won);
        assert_eq!(w.phase(), Phase::Won { frames: 1 });

        let frame = w.frame_count();
        let ev = w.step(MoveInput { forward: 1.0, ..Default::default() }, &mut rng);
        assert_eq!(ev, StepEvents::default());
        assert_eq!(w.frame_count(), frame + 1);
    }

    #[test]
    fn test_toggle_view() {
        let mut w = World::new(ViewMode::TopDown);
        w.toggle_view();
        assert_eq!(w.view, ViewMode::FirstPerson);
        w.toggle_view();
        assert_eq!(w.view, ViewMode::TopDown);
    }

    #[test]
    fn test_enemy_snapshot_matches_room() {
        let w = World::new(ViewMode::TopDown);
        let (pos, colors) = w.enemy_snapshot();
        assert_eq!(pos.len(), w.current_map().obstacles().len());
        assert_eq!(colors.len(), pos.len());
    }
}
