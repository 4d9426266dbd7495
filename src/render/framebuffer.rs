//! CPU framebuffer and the drawing primitives the renderers use.
use raylib::prelude::*;
use raylib::core::texture::RaylibTexture2D;

pub struct Framebuffer {
    pub color_buffer: Vec<Color>,
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
    pub current_color: Color,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        let bg = Color::BLACK;
        Self {
            color_buffer: vec![bg; size],
            width,
            height,
            background_color: bg,
            current_color: Color::WHITE,
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.color_buffer.fill(self.background_color);
    }

    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32) {
        if x < self.width && y < self.height {
            self.color_buffer[(y * self.width + x) as usize] = self.current_color;
        }
    }

    #[inline]
    pub fn set_pixel_color(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            self.color_buffer[(y * self.width + x) as usize] = color;
        }
    }

    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        if x < self.width && y < self.height {
            return self.color_buffer[(y * self.width + x) as usize];
        }
        self.background_color
    }

    #[inline] pub fn set_current_color(&mut self, c: Color) { self.current_color = c; }
    #[inline] pub fn set_background_color(&mut self, c: Color) { self.background_color = c; }

    /// Writes `color` at signed coordinates, blending when it is translucent.
    /// Out-of-bounds pixels are dropped.
    #[inline]
    pub fn plot(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = (y as u32 * self.width + x as u32) as usize;
        self.color_buffer[idx] = if color.a == 255 {
            color
        } else {
            blend(self.color_buffer[idx], color)
        };
    }

    /// Vertical span covering rows `y0..y1` (end exclusive).
    pub fn vline(&mut self, x: i32, y0: i32, y1: i32, color: Color) {
        let y0 = y0.max(0);
        let y1 = y1.min(self.height as i32);
        for y in y0..y1 {
            self.plot(x, y, color);
        }
    }

    /// Horizontal span covering columns `x0..x1` (end exclusive).
    pub fn hline(&mut self, x0: i32, x1: i32, y: i32, color: Color) {
        let x0 = x0.max(0);
        let x1 = x1.min(self.width as i32);
        for x in x0..x1 {
            self.plot(x, y, color);
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        for yy in y..y + h {
            self.hline(x, x + w, yy, color);
        }
    }

    /// Border drawn inward from the rectangle edge, `thickness` pixels wide.
    pub fn rect_outline(&mut self, x: i32, y: i32, w: i32, h: i32, thickness: i32, color: Color) {
        let t = thickness.max(1).min(w.max(0)).min(h.max(0));
        if t == 0 {
            return;
        }
        self.fill_rect(x, y, w, t, color);
        self.fill_rect(x, y + h - t, w, t, color);
        self.fill_rect(x, y + t, t, h - 2 * t, color);
        self.fill_rect(x + w - t, y + t, t, h - 2 * t, color);
    }

    /// Same rectangle in world floats, truncated to pixels the way raylib does.
    pub fn fill_rect_f(&mut self, r: Rectangle, color: Color) {
        self.fill_rect(r.x as i32, r.y as i32, r.width as i32, r.height as i32, color);
    }

    pub fn rect_outline_f(&mut self, r: Rectangle, thickness: i32, color: Color) {
        self.rect_outline(r.x as i32, r.y as i32, r.width as i32, r.height as i32, thickness, color);
    }

    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        let r = radius.ceil() as i32;
        let r2 = radius * radius;
        for dy in -r..=r {
            for dx in -r..=r {
                if (dx * dx + dy * dy) as f32 <= r2 {
                    self.plot(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// One-pixel ring on the circle's edge.
    pub fn circle_outline(&mut self, cx: i32, cy: i32, radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        let r = radius.ceil() as i32;
        let outer = radius * radius;
        let inner = (radius - 1.0).max(0.0).powi(2);
        for dy in -r..=r {
            for dx in -r..=r {
                let d2 = (dx * dx + dy * dy) as f32;
                if d2 <= outer && d2 > inner {
                    self.plot(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Bresenham line, both endpoints included.
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);
        loop {
            self.plot(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Thick line made of parallel Bresenham passes.
    pub fn thick_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, thickness: i32, color: Color) {
        let half = thickness / 2;
        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        for o in -half..=(thickness - 1 - half) {
            if steep {
                self.line(x0 + o, y0, x1 + o, y1, color);
            } else {
                self.line(x0, y0 + o, x1, y1 + o, color);
            }
        }
    }

    /// Uploads the pixels into a persistent texture.
    pub fn upload_to_texture(&self, tex: &mut Texture2D) {
        // &[Color] -> &[u8] (RGBA8) without copying
        let byte_len = self.color_buffer.len() * std::mem::size_of::<Color>();
        let bytes: &[u8] = unsafe {
            std::slice::from_raw_parts(self.color_buffer.as_ptr() as *const u8, byte_len)
        };
        let _ = tex.update_texture(bytes);
    }
}

#[inline]
fn blend(dst: Color, src: Color) -> Color {
    let a = src.a as u32;
    let mix = |s: u8, d: u8| -> u8 { ((s as u32 * a + d as u32 * (255 - a)) / 255) as u8 };
    Color::new(mix(src.r, dst.r), mix(src.g, dst.g), mix(src.b, dst.b), 255)
}
