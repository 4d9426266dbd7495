// main.rs
#![allow(dead_code)]
mod config;
mod core;
mod render;

use anyhow::{anyhow, Context};
use raylib::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::GameConfig;
use crate::core::process_events::{read_move_input, view_toggle_pressed};
use crate::core::world::{Phase, ViewMode, World};
use crate::render::framebuffer::Framebuffer;
use crate::render::hud::victory_overlay;
use crate::render::render2d::render_2d;
use crate::render::render3d::{render_3d, Scene};

const DEFAULT_CONFIG: &str = "config.json";

/// Mouse look needs a captured cursor; the top-down view gives it back.
fn sync_cursor(rl: &mut RaylibHandle, view: ViewMode) {
    match view {
        ViewMode::FirstPerson => rl.disable_cursor(),
        ViewMode::TopDown => rl.enable_cursor(),
    }
}

fn restart_pressed(rl: &RaylibHandle) -> bool {
    rl.is_key_pressed(KeyboardKey::KEY_ENTER) || rl.is_key_pressed(KeyboardKey::KEY_SPACE)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let cfg = GameConfig::load(&config_path)
        .with_context(|| format!("loading config from {config_path}"))?;

    let (w, h) = (cfg.raycast.screen_width, cfg.raycast.screen_height);
    let (mut rl, thread) = raylib::init()
        .size(w as i32, h as i32)
        .title(&cfg.window.title)
        .build();
    rl.set_target_fps(cfg.window.target_fps);

    let mut framebuffer = Framebuffer::new(w, h);
    let blank = Image::gen_image_color(w as i32, h as i32, Color::BLACK);
    let mut screen = rl
        .load_texture_from_image(&thread, &blank)
        .map_err(|e| anyhow!("creating screen texture: {e}"))?;

    let start_view = if cfg.window.start_in_first_person {
        ViewMode::FirstPerson
    } else {
        ViewMode::TopDown
    };
    let mut world = World::new(start_view);
    sync_cursor(&mut rl, world.view);
    let mut rng = rand::thread_rng();
    tracing::info!(width = w, height = h, view = ?world.view, coins = world.total_coins(), "game started");

    while !rl.window_should_close() {
        if view_toggle_pressed(&rl) {
            world.toggle_view();
            sync_cursor(&mut rl, world.view);
        }
        if matches!(world.phase(), Phase::Won { .. }) && restart_pressed(&rl) {
            tracing::info!("restarting");
            world.reset();
        }

        let input = read_move_input(&rl, world.view, &cfg.window);
        world.step(input, &mut rng);

        let fps = rl.get_fps() as u32;
        let mut hud = match world.view {
            ViewMode::TopDown => render_2d(&mut framebuffer, &world, fps),
            ViewMode::FirstPerson => render_3d(&mut framebuffer, &Scene::capture(&world, fps), &cfg),
        };
        if let Phase::Won { frames } = world.phase() {
            let p = &world.player;
            hud.extend(victory_overlay(
                &mut framebuffer,
                frames,
                world.total_coins(),
                p.health(),
                p.max_health(),
            ));
        }
        framebuffer.upload_to_texture(&mut screen);

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        d.draw_texture(&screen, 0, 0, Color::WHITE);
        for text in &hud {
            text.draw(&mut d);
        }
    }
    Ok(())
}
