use super::config::SpriteEdge;
use chip8_base::Pixel;

pub const WIDTH: usize = 64;
pub const HEIGHT: usize = 32;

/// 64x32 monochrome screen, one byte (0 or 1) per pixel, row-major.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    pixels: [u8; WIDTH * HEIGHT],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        FrameBuffer {
            pixels: [0; WIDTH * HEIGHT],
        }
    }
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.pixels[x + y * WIDTH]
    }

    /// XOR an 8-pixel-wide sprite onto the screen with its top-left corner at
    /// (x, y), which must already be on screen. Returns true if any lit pixel
    /// was switched off.
    pub fn draw_sprite(&mut self, x: usize, y: usize, rows: &[u8], edge: SpriteEdge) -> bool {
        let mut collision = false;
        for (i, row) in rows.iter().enumerate() {
            let mut pix_y = y + i;
            if pix_y >= HEIGHT {
                match edge {
                    SpriteEdge::Clip => break,
                    SpriteEdge::Wrap => pix_y %= HEIGHT,
                }
            }
            for j in 0..8 {
                if (row >> (7 - j)) & 0x1 == 0 {
                    continue;
                }
                let mut pix_x = x + j;
                if pix_x >= WIDTH {
                    match edge {
                        SpriteEdge::Clip => break,
                        SpriteEdge::Wrap => pix_x %= WIDTH,
                    }
                }
                let pixel = &mut self.pixels[pix_x + pix_y * WIDTH];
                if *pixel == 1 {
                    collision = true;
                }
                *pixel ^= 1;
            }
        }
        collision
    }

    /// Convert to the grid the window frontend draws.
    pub fn to_display(&self) -> chip8_base::Display {
        let mut display = [[Pixel::default(); WIDTH]; HEIGHT];
        for (row, line) in display.iter_mut().zip(self.pixels.chunks(WIDTH)) {
            for (pix, &value) in row.iter_mut().zip(line) {
                *pix = Pixel::try_from(value).unwrap_or_default();
            }
        }
        display
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_blank() {
        let fb = FrameBuffer::new();
        assert!(fb.pixels().iter().all(|&p| p == 0));
        assert_eq!(fb.pixels().len(), 2048);
    }

    #[test]
    fn sprite_bits_map_to_columns() {
        let mut fb = FrameBuffer::new();
        assert!(!fb.draw_sprite(10, 5, &[0b1010_0001], SpriteEdge::Clip));
        assert_eq!(fb.get(10, 5), 1);
        assert_eq!(fb.get(11, 5), 0);
        assert_eq!(fb.get(12, 5), 1);
        assert_eq!(fb.get(17, 5), 1);
        assert_eq!(fb.pixels()[10 + 5 * WIDTH], 1);
    }

    #[test]
    fn redraw_erases_and_collides() {
        let mut fb = FrameBuffer::new();
        assert!(!fb.draw_sprite(0, 0, &[0xFF, 0xFF], SpriteEdge::Clip));
        assert!(fb.draw_sprite(0, 0, &[0xFF, 0xFF], SpriteEdge::Clip));
        assert!(fb.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn clip_drops_offscreen_pixels() {
        let mut fb = FrameBuffer::new();
        fb.draw_sprite(60, 30, &[0xFF, 0xFF, 0xFF], SpriteEdge::Clip);
        let lit = fb.pixels().iter().filter(|&&p| p == 1).count();
        assert_eq!(lit, 4 * 2);
        assert_eq!(fb.get(63, 31), 1);
        assert_eq!(fb.get(0, 0), 0);
    }

    #[test]
    fn wrap_moves_pixels_to_opposite_edge() {
        let mut fb = FrameBuffer::new();
        fb.draw_sprite(62, 31, &[0b1110_0000, 0b1000_0000], SpriteEdge::Wrap);
        assert_eq!(fb.get(62, 31), 1);
        assert_eq!(fb.get(63, 31), 1);
        assert_eq!(fb.get(0, 31), 1);
        assert_eq!(fb.get(62, 0), 1);
    }

    #[test]
    fn clear_blanks_everything() {
        let mut fb = FrameBuffer::new();
        fb.draw_sprite(3, 3, &[0xFF], SpriteEdge::Clip);
        fb.clear();
        assert!(fb.pixels().iter().all(|&p| p == 0));
    }
}
