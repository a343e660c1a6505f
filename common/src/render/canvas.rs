use image::{Rgba, RgbaImage};

/// Software raster over an opaque RGBA image. All drawing alpha-blends onto
/// what is already there and clips to the image bounds.
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(size: u32) -> Self {
        Self {
            image: RgbaImage::new(size, size),
        }
    }

    pub fn size(&self) -> u32 {
        self.image.width()
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn fill(&mut self, color: Rgba<u8>) {
        for pixel in self.image.pixels_mut() {
            *pixel = color;
        }
    }

    /// Copies `image` to the canvas origin, ignoring anything that overhangs.
    pub fn draw_image(&mut self, image: &RgbaImage) {
        let width = image.width().min(self.image.width());
        let height = image.height().min(self.image.height());
        for y in 0..height {
            for x in 0..width {
                let src = *image.get_pixel(x, y);
                self.blend_pixel(x as i64, y as i64, src);
            }
        }
    }

    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Rgba<u8>) {
        if x < 0 || y < 0 || x >= self.image.width() as i64 || y >= self.image.height() as i64 {
            return;
        }
        let alpha = color.0[3] as u32;
        if alpha == 0 {
            return;
        }
        let dst = self.image.get_pixel_mut(x as u32, y as u32);
        if alpha == 255 {
            *dst = Rgba([color.0[0], color.0[1], color.0[2], 255]);
            return;
        }
        for i in 0..3 {
            let blended = (color.0[i] as u32 * alpha + dst.0[i] as u32 * (255 - alpha) + 127) / 255;
            dst.0[i] = blended as u8;
        }
        dst.0[3] = 255;
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba<u8>) {
        let (x0, y0) = (x.round() as i64, y.round() as i64);
        let (x1, y1) = ((x + w).round() as i64, (y + h).round() as i64);
        for py in y0.max(0)..y1 {
            for px in x0.max(0)..x1 {
                self.blend_pixel(px, py, color);
            }
        }
    }

    pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, width: f32, color: Rgba<u8>) {
        self.fill_rect(x, y, w, width, color);
        self.fill_rect(x, y + h - width, w, width, color);
        self.fill_rect(x, y + width, width, h - 2.0 * width, color);
        self.fill_rect(x + w - width, y + width, width, h - 2.0 * width, color);
    }

    pub fn fill_rounded_rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32, color: Rgba<u8>) {
        let radius = radius.min(w / 2.0).min(h / 2.0).max(0.0);
        let (x0, y0) = (x.floor() as i64, y.floor() as i64);
        let (x1, y1) = ((x + w).ceil() as i64, (y + h).ceil() as i64);

        for py in y0..y1 {
            for px in x0..x1 {
                let cx = px as f32 + 0.5;
                let cy = py as f32 + 0.5;
                if cx < x || cx > x + w || cy < y || cy > y + h {
                    continue;
                }
                // Distance from the nearest corner centre, only inside corner boxes.
                let nx = cx.clamp(x + radius, x + w - radius);
                let ny = cy.clamp(y + radius, y + h - radius);
                let (dx, dy) = (cx - nx, cy - ny);
                if dx * dx + dy * dy <= radius * radius {
                    self.blend_pixel(px, py, color);
                }
            }
        }
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba<u8>) {
        self.for_each_in_radius(cx, cy, radius, |canvas, px, py, distance| {
            if distance <= radius {
                canvas.blend_pixel(px, py, color);
            }
        });
    }

    pub fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32, width: f32, color: Rgba<u8>) {
        let half = width / 2.0;
        self.for_each_in_radius(cx, cy, radius + half, |canvas, px, py, distance| {
            if (distance - radius).abs() <= half {
                canvas.blend_pixel(px, py, color);
            }
        });
    }

    /// Soft halo fading out over `spread` pixels beyond `radius`.
    pub fn glow(&mut self, cx: f32, cy: f32, radius: f32, spread: f32, color: Rgba<u8>) {
        if spread <= 0.0 {
            return;
        }
        let base_alpha = color.0[3] as f32;
        self.for_each_in_radius(cx, cy, radius + spread, |canvas, px, py, distance| {
            if distance <= radius {
                return;
            }
            let falloff = 1.0 - (distance - radius) / spread;
            let alpha = (base_alpha * falloff * falloff * 0.6).round().clamp(0.0, 255.0) as u8;
            let [r, g, b, _] = color.0;
            canvas.blend_pixel(px, py, Rgba([r, g, b, alpha]));
        });
    }

    fn for_each_in_radius(
        &mut self,
        cx: f32,
        cy: f32,
        radius: f32,
        mut visit: impl FnMut(&mut Self, i64, i64, f32),
    ) {
        let (x0, x1) = ((cx - radius).floor() as i64, (cx + radius).ceil() as i64);
        let (y0, y1) = ((cy - radius).floor() as i64, (cy + radius).ceil() as i64);
        for py in y0..=y1 {
            for px in x0..=x1 {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                let distance = (dx * dx + dy * dy).sqrt();
                if distance <= radius {
                    visit(self, px, py, distance);
                }
            }
        }
    }
}
