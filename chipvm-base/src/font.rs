//! The built-in hexadecimal digit glyphs.

macro_rules! pixel_to_bit {
    (#) => {
        1
    };
    (,) => {
        0
    };
}

macro_rules! sprite_4x5_font {
    (
        $(
            $(
                ($pixel0:tt $pixel1:tt $pixel2:tt $pixel3:tt)
            )*
            ------
        )*
    ) => {
        [
            $(
                $(
                    // Shift pixels into high nibble / left half of the sprite.
                    (pixel_to_bit!($pixel0) << 7
                        | pixel_to_bit!($pixel1) << 6
                        | pixel_to_bit!($pixel2) << 5
                        | pixel_to_bit!($pixel3) << 4),
                )*
            )*
        ]
    };
}

/// Rows per glyph. Every row is one sprite byte.
pub const GLYPH_HEIGHT: usize = 5;

/// Length of the glyph table in bytes.
pub const FONT_LEN: usize = GLYPH_HEIGHT * (0xF + 1);

/// Address of the first glyph byte in machine memory.
pub const FONT_BASE_ADDRESS: u16 = 0x050;

/// Address of the glyph for the hex digit `digit`.
///
/// Larger values yield addresses past the end of the font.
pub const fn glyph_address(digit: u8) -> u16 {
    FONT_BASE_ADDRESS + digit as u16 * GLYPH_HEIGHT as u16
}

/// A 4x5 sprite font of the hexadecimal digits.
///
/// Since a sprite is always one byte wide,
/// the low nibble is 0 for all of these glyphs.
pub const FONT: [u8; FONT_LEN] = sprite_4x5_font![
    (####)
    (#,,#)
    (#,,#)
    (#,,#)
    (####)
    ------
    (,,#,)
    (,##,)
    (,,#,)
    (,,#,)
    (,###)
    ------
    (####)
    (,,,#)
    (####)
    (#,,,)
    (####)
    ------
    (####)
    (,,,#)
    (####)
    (,,,#)
    (####)
    ------
    (#,,#)
    (#,,#)
    (####)
    (,,,#)
    (,,,#)
    ------
    (####)
    (#,,,)
    (####)
    (,,,#)
    (####)
    ------
    (####)
    (#,,,)
    (####)
    (#,,#)
    (####)
    ------
    (####)
    (,,,#)
    (,,#,)
    (,#,,)
    (,#,,)
    ------
    (####)
    (#,,#)
    (####)
    (#,,#)
    (####)
    ------
    (####)
    (#,,#)
    (####)
    (,,,#)
    (####)
    ------
    (####)
    (#,,#)
    (####)
    (#,,#)
    (#,,#)
    ------
    (###,)
    (#,,#)
    (###,)
    (#,,#)
    (###,)
    ------
    (####)
    (#,,,)
    (#,,,)
    (#,,,)
    (####)
    ------
    (###,)
    (#,,#)
    (#,,#)
    (#,,#)
    (###,)
    ------
    (####)
    (#,,,)
    (####)
    (#,,,)
    (####)
    ------
    (####)
    (#,,,)
    (####)
    (#,,,)
    (#,,,)
    ------
];
