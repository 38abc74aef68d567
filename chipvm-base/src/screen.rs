use std::fmt::{Debug, Write};

/// The monochrome framebuffer.
///
/// Every pixel is stored as a whole `u32` that is either [`Screen::PIXEL_ON`]
/// or [`Screen::PIXEL_OFF`], so sprite composition is a plain XOR with
/// [`Screen::PIXEL_ON`] and a presenter can upload the buffer as is.
#[derive(PartialEq, Eq, Clone)]
pub struct Screen {
    pixels: [u32; Self::WIDTH * Self::HEIGHT],
}

impl Screen {
    /// Screen width in pixels.
    pub const WIDTH: usize = 64;
    /// Screen height in pixels.
    pub const HEIGHT: usize = 32;
    /// Length of one row of pixels in bytes.
    pub const PITCH: usize = Self::WIDTH * std::mem::size_of::<u32>();

    pub const PIXEL_ON: u32 = 0xFFFF_FFFF;
    pub const PIXEL_OFF: u32 = 0x0000_0000;

    /// The pixels in row-major order.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Whether the pixel at (`x`, `y`) is set.
    ///
    /// Panics if the position is offscreen.
    pub fn is_pixel_on(&self, x: usize, y: usize) -> bool {
        assert!(x < Self::WIDTH && y < Self::HEIGHT, "pixel ({}, {}) is offscreen", x, y);
        self.pixels[x + y * Self::WIDTH] == Self::PIXEL_ON
    }

    /// Iterate over rows of pixels, each given as `true` for a set pixel.
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = bool> + '_> + '_ {
        self.pixels
            .chunks_exact(Self::WIDTH)
            .map(|row| row.iter().map(|&pixel| pixel == Self::PIXEL_ON))
    }

    /// XOR the sprite rows in `sprite` onto the screen, with the most significant
    /// bit of a row being its leftmost pixel.
    ///
    /// The position wraps around the screen dimensions once.
    /// Parts of the sprite that then extend past the right or bottom edge are clipped.
    ///
    /// Returns `true` if a set pixel has been unset, `false` otherwise.
    pub fn draw_sprite(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let x = x as usize % Self::WIDTH;
        let y = y as usize % Self::HEIGHT;
        let mut set_pixel_unset = false;

        for (row, sprite_byte) in sprite.iter().copied().enumerate() {
            let pixel_y = y + row;
            if pixel_y >= Self::HEIGHT {
                break;
            }

            for column in 0..8 {
                let pixel_x = x + column;
                if pixel_x >= Self::WIDTH {
                    break;
                }
                if sprite_byte & (0x80 >> column) == 0 {
                    continue;
                }

                let pixel = &mut self.pixels[pixel_x + pixel_y * Self::WIDTH];
                set_pixel_unset |= *pixel == Self::PIXEL_ON;
                *pixel ^= Self::PIXEL_ON;
            }
        }

        set_pixel_unset
    }

    pub fn clear(&mut self) {
        self.pixels.fill(Self::PIXEL_OFF);
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self {
            pixels: [Self::PIXEL_OFF; Self::WIDTH * Self::HEIGHT],
        }
    }
}

impl Debug for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            writeln!(f, "Screen(")?;
            for row in self.rows() {
                for pixel_on in row {
                    f.write_char(if pixel_on { '#' } else { '_' })?;
                }
                f.write_char('\n')?;
            }
            write!(f, ")")
        } else {
            let lit_pixels = self.pixels.iter().filter(|&&p| p == Self::PIXEL_ON).count();
            f.debug_struct("Screen")
                .field("lit_pixels", &lit_pixels)
                .finish()
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn lit_positions(screen: &Screen) -> Vec<(usize, usize)> {
        (0..Screen::HEIGHT)
            .flat_map(|y| (0..Screen::WIDTH).map(move |x| (x, y)))
            .filter(|&(x, y)| screen.is_pixel_on(x, y))
            .collect()
    }

    #[test]
    fn draw_sets_msb_first() {
        let mut screen = Screen::default();

        assert!(!screen.draw_sprite(2, 1, &[0b1000_0001]));
        assert_eq!(lit_positions(&screen), [(2, 1), (9, 1)]);
    }

    #[test]
    fn draw_twice_restores_and_collides() {
        let mut screen = Screen::default();
        let sprite = [0xF0, 0x90, 0xF0];

        assert!(!screen.draw_sprite(10, 10, &sprite));
        assert!(screen.draw_sprite(10, 10, &sprite));
        assert_eq!(screen, Screen::default());
    }

    #[test]
    fn position_wraps_once() {
        let mut screen = Screen::default();
        screen.draw_sprite(64 + 3, 32 + 4, &[0x80]);

        assert_eq!(lit_positions(&screen), [(3, 4)]);
    }

    #[test]
    fn right_edge_is_clipped() {
        let mut screen = Screen::default();
        screen.draw_sprite(60, 0, &[0xFF]);

        assert_eq!(lit_positions(&screen), [(60, 0), (61, 0), (62, 0), (63, 0)]);
    }

    #[test]
    fn bottom_edge_is_clipped() {
        let mut screen = Screen::default();
        screen.draw_sprite(0, 30, &[0x80, 0x80, 0x80, 0x80]);

        assert_eq!(lit_positions(&screen), [(0, 30), (0, 31)]);
    }

    #[test]
    fn clear_unsets_everything() {
        let mut screen = Screen::default();
        screen.draw_sprite(0, 0, &[0xFF; 15]);
        screen.clear();

        assert!(screen.pixels().iter().all(|&p| p == Screen::PIXEL_OFF));
    }

    #[test]
    fn alternate_debug_renders_rows() {
        let mut screen = Screen::default();
        screen.draw_sprite(0, 0, &[0xC0]);
        let rendered = format!("{:#?}", screen);
        let first_row = rendered.lines().nth(1).unwrap();

        assert!(first_row.starts_with("##_"));
        assert_eq!(first_row.len(), Screen::WIDTH);
        assert_eq!(rendered.lines().count(), Screen::HEIGHT + 2);
    }
}
