//! Joypad buttons exposed to scripts through `lutro.input.joypad(name)`.

use crate::core::error::DomainError;

/// Digital joypad buttons, in libretro device id order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoypadButton {
    B,
    Y,
    Select,
    Start,
    Up,
    Down,
    Left,
    Right,
    A,
    X,
    L,
    R,
    L2,
    R2,
    L3,
    R3,
}

impl JoypadButton {
    pub const ALL: [JoypadButton; 16] = [
        Self::B,
        Self::Y,
        Self::Select,
        Self::Start,
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::A,
        Self::X,
        Self::L,
        Self::R,
        Self::L2,
        Self::R2,
        Self::L3,
        Self::R3,
    ];

    /// Name used in Lua (`lutro.input.joypad("start")`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::B => "b",
            Self::Y => "y",
            Self::Select => "select",
            Self::Start => "start",
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::A => "a",
            Self::X => "x",
            Self::L => "l",
            Self::R => "r",
            Self::L2 => "l2",
            Self::R2 => "r2",
            Self::L3 => "l3",
            Self::R3 => "r3",
        }
    }
}

impl std::str::FromStr for JoypadButton {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|button| button.as_str() == lower)
            .ok_or_else(|| DomainError::UnknownButton(s.to_string()))
    }
}

impl std::fmt::Display for JoypadButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
