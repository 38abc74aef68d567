use num_enum::{IntoPrimitive, TryFromPrimitive};
use static_assertions::const_assert_eq;

/// A key of the 16-key hexadecimal keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum Key {
    K0,
    K1,
    K2,
    K3,
    K4,
    K5,
    K6,
    K7,
    K8,
    K9,
    KA,
    KB,
    KC,
    KD,
    KE,
    KF,
}

impl Key {
    /// Number of keys on the keypad.
    pub const COUNT: usize = Self::KF as usize + 1;
}

const_assert_eq!(Key::COUNT, 16);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    NotPressed,
}

impl KeyState {
    pub fn is_pressed(self) -> bool {
        self == Self::Pressed
    }
}

impl Default for KeyState {
    fn default() -> Self {
        Self::NotPressed
    }
}
