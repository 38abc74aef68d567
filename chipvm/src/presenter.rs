use pixels::{Pixels, PixelsBuilder, SurfaceTexture, TextureError};
use winit::window::Window;

use chipvm_base::screen::Screen;

/// RGBA color for the pixel on-state
const COLOR_PIXEL_ON: [u8; 4] = [0xFF, 0xFF, 0xFF, 0xFF];
/// RGBA color for the pixel off-state
const COLOR_PIXEL_OFF: [u8; 4] = [0x00, 0x00, 0x00, 0xFF];

/// Scales the framebuffer up to the window and draws it.
pub struct Presenter {
    pixels: Pixels,
}

impl Presenter {
    pub fn new(window: &Window) -> Result<Self, pixels::Error> {
        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, window);
        // Presentation happens after every cycle, waiting for vsync would throttle the machine.
        let pixels = PixelsBuilder::new(
            Screen::WIDTH as u32,
            Screen::HEIGHT as u32,
            surface_texture,
        )
        .enable_vsync(false)
        .build()?;

        Ok(Self { pixels })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), TextureError> {
        self.pixels.resize_surface(width, height)
    }

    /// Draw `framebuffer`, rows of [`Screen::WIDTH`] pixels that start every `pitch` bytes.
    pub fn present(&mut self, framebuffer: &[u32], pitch: usize) -> Result<(), pixels::Error> {
        let row_stride = pitch / std::mem::size_of::<u32>();

        self.pixels
            .frame_mut()
            .chunks_exact_mut(4 * Screen::WIDTH)
            .zip(framebuffer.chunks(row_stride))
            .for_each(|(frame_row, screen_row)| {
                frame_row
                    .chunks_exact_mut(4)
                    .zip(screen_row.iter().take(Screen::WIDTH))
                    .for_each(|(frame_pixel, &screen_pixel)| {
                        frame_pixel.copy_from_slice(if screen_pixel == Screen::PIXEL_ON {
                            &COLOR_PIXEL_ON
                        } else {
                            &COLOR_PIXEL_OFF
                        });
                    })
            });

        self.pixels.render()
    }
}
