//! Opaque paint values. The core never rasterizes these; it hands them to a
//! [`Canvas`](crate::ui::Canvas) together with the bounds produced by layout.

use crate::ui::{PrimaryVisualState, SecondaryVisualState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn to_rgba_u8(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Parses `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
    pub fn hex(raw: &str) -> Option<Self> {
        let bytes = raw.as_bytes();
        if bytes.first() != Some(&b'#') || !bytes[1..].iter().all(u8::is_ascii_hexdigit) {
            return None;
        }
        let digits = &bytes[1..];
        match digits.len() {
            3 | 4 => {
                let channel = |i: usize| hex_digit(digits[i]) * 17;
                let a = if digits.len() == 4 { channel(3) } else { 255 };
                Some(Self::rgba(channel(0), channel(1), channel(2), a))
            }
            6 | 8 => {
                let channel = |i: usize| hex_digit(digits[i]) * 16 + hex_digit(digits[i + 1]);
                let a = if digits.len() == 8 { channel(6) } else { 255 };
                Some(Self::rgba(channel(0), channel(2), channel(4), a))
            }
            _ => None,
        }
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub fn is_transparent(self) -> bool {
        self.a == 0
    }
}

fn hex_digit(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => 0,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FillBrush {
    Solid(Color),
    /// Top-to-bottom gradient.
    Gradient(Color, Color),
}

impl From<Color> for FillBrush {
    fn from(color: Color) -> Self {
        FillBrush::Solid(color)
    }
}

/// Background brushes keyed by visual state: an underlay per primary state and
/// an overlay per secondary state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VisualStateBrush {
    pub normal: Option<FillBrush>,
    pub disabled: Option<FillBrush>,
    pub selected: Option<FillBrush>,
    pub hovered: Option<FillBrush>,
    pub pressed: Option<FillBrush>,
}

impl VisualStateBrush {
    pub fn solid(normal: Color) -> Self {
        Self {
            normal: Some(FillBrush::Solid(normal)),
            ..Self::default()
        }
    }

    pub fn underlay(&self, state: PrimaryVisualState) -> Option<&FillBrush> {
        match state {
            PrimaryVisualState::Normal => self.normal.as_ref(),
            PrimaryVisualState::Disabled => self.disabled.as_ref().or(self.normal.as_ref()),
            PrimaryVisualState::Selected => self.selected.as_ref().or(self.normal.as_ref()),
        }
    }

    pub fn overlay(&self, state: SecondaryVisualState) -> Option<&FillBrush> {
        match state {
            SecondaryVisualState::None => None,
            SecondaryVisualState::Hovered => self.hovered.as_ref(),
            SecondaryVisualState::Pressed => self.pressed.as_ref().or(self.hovered.as_ref()),
        }
    }
}
