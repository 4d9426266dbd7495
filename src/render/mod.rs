//! Rendering: CPU framebuffer, raycaster and both views.
//!
//! Re-exports:
//! - `framebuffer`: CPU framebuffer and drawing primitives
//! - `raycaster`: Ray/wall intersection, shading and visibility queries
//! - `sprites`: Billboards (enemies and coins) and back-to-front sorting
//! - `minimap`: Corner map for the first-person view
//! - `hud`: Health bar, overlay text, victory screen
//! - `render3d`: First-person compositor
//! - `render2d`: Top-down view

pub mod framebuffer;
pub mod raycaster;
pub mod sprites;
pub mod minimap;
pub mod hud;
pub mod render3d;
pub mod render2d;
