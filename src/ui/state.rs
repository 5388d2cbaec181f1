use std::time::Duration;

use crate::style::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrimaryVisualState {
    #[default]
    Normal,
    Disabled,
    Selected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SecondaryVisualState {
    #[default]
    None,
    Hovered,
    Pressed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VisualState {
    pub primary: PrimaryVisualState,
    pub secondary: SecondaryVisualState,
}

impl VisualState {
    pub const fn new(primary: PrimaryVisualState, secondary: SecondaryVisualState) -> Self {
        Self { primary, secondary }
    }

    /// Disabled wins over selected; pressed wins over hovered. A modal window
    /// suppresses every secondary state.
    pub fn resolve(
        is_enabled: bool,
        is_selected: bool,
        is_pressed: bool,
        is_hovered: bool,
        has_modal: bool,
    ) -> Self {
        let primary = if !is_enabled {
            PrimaryVisualState::Disabled
        } else if is_selected {
            PrimaryVisualState::Selected
        } else {
            PrimaryVisualState::Normal
        };
        let secondary = if has_modal {
            SecondaryVisualState::None
        } else if is_pressed {
            SecondaryVisualState::Pressed
        } else if is_hovered {
            SecondaryVisualState::Hovered
        } else {
            SecondaryVisualState::None
        };
        Self::new(primary, secondary)
    }
}

/// Render-only scale applied around the center of the layout bounds while the
/// element is pressed or hovered. Layout is unaffected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConditionalScale {
    pub pressed: f32,
    pub hovered: f32,
}

impl ConditionalScale {
    pub fn new(pressed: f32, hovered: f32) -> Self {
        Self { pressed, hovered }
    }

    pub fn scale_for(&self, state: VisualState) -> Option<f32> {
        match state.secondary {
            SecondaryVisualState::Pressed => Some(self.pressed),
            SecondaryVisualState::Hovered => Some(self.hovered),
            SecondaryVisualState::None => None,
        }
    }
}

/// Inherited state handed down one level per update call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpdateArgs {
    pub total_elapsed: Duration,
    pub frame_elapsed: Duration,
    pub is_enabled: bool,
    pub is_selected: bool,
    pub is_hit_test_visible: bool,
    pub offset: Point,
}

impl UpdateArgs {
    pub fn new(total_elapsed: Duration, frame_elapsed: Duration) -> Self {
        Self {
            total_elapsed,
            frame_elapsed,
            is_enabled: true,
            is_selected: false,
            is_hit_test_visible: true,
            offset: Point::ZERO,
        }
    }

    pub fn with_offset(self, offset: Point) -> Self {
        Self { offset, ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawArgs {
    pub opacity: f32,
    pub offset: Point,
    pub visual_state: VisualState,
}

impl Default for DrawArgs {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            offset: Point::ZERO,
            visual_state: VisualState::default(),
        }
    }
}

impl DrawArgs {
    pub fn with_offset(self, offset: Point) -> Self {
        Self { offset, ..self }
    }
}
