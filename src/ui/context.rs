use std::sync::Arc;

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use crate::style::{Color, FillBrush, Point, VisualStateBrush};
use crate::view::ElementKind;

static DEFAULT_THEME: Lazy<Arc<Theme>> = Lazy::new(|| Arc::new(Theme::light()));

/// Default paint values, consulted once when an element is created.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub foreground: Color,
    pub border: Color,
    pub accent: Color,
    backgrounds: FxHashMap<ElementKind, VisualStateBrush>,
}

impl Theme {
    pub fn light() -> Self {
        let hover = Some(FillBrush::Solid(Color::rgba(255, 255, 255, 48)));
        let pressed = Some(FillBrush::Solid(Color::rgba(0, 0, 0, 48)));
        let disabled = Some(FillBrush::Solid(Color::rgb(0xd4, 0xd4, 0xd4)));

        let mut backgrounds = FxHashMap::default();
        backgrounds.insert(
            ElementKind::Window,
            VisualStateBrush::solid(Color::rgb(0xf3, 0xf3, 0xf3)),
        );
        backgrounds.insert(
            ElementKind::RadioButton,
            VisualStateBrush {
                hovered: hover.clone(),
                pressed: pressed.clone(),
                ..VisualStateBrush::default()
            },
        );
        backgrounds.insert(
            ElementKind::TabControl,
            VisualStateBrush::solid(Color::WHITE),
        );
        backgrounds.insert(
            ElementKind::TabHeader,
            VisualStateBrush {
                normal: Some(FillBrush::Solid(Color::rgb(0xe5, 0xe5, 0xe5))),
                selected: Some(FillBrush::Solid(Color::WHITE)),
                disabled,
                hovered: hover,
                pressed,
            },
        );

        Self {
            foreground: Color::rgb(0x1f, 0x1f, 0x1f),
            border: Color::rgb(0x8a, 0x8a, 0x8a),
            accent: Color::rgb(0x25, 0x63, 0xeb),
            backgrounds,
        }
    }

    pub fn background_for(&self, kind: &ElementKind) -> VisualStateBrush {
        self.backgrounds.get(kind).cloned().unwrap_or_default()
    }

    pub fn set_background(&mut self, kind: ElementKind, brush: VisualStateBrush) {
        self.backgrounds.insert(kind, brush);
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

pub fn default_theme() -> Arc<Theme> {
    DEFAULT_THEME.clone()
}

/// Pointer and modality state, written by the host between frames and read
/// during update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputTracker {
    pub pointer: Option<Point>,
    pub primary_pressed: bool,
    pub has_modal_window: bool,
}

impl InputTracker {
    pub fn move_pointer(&mut self, position: Point) {
        self.pointer = Some(position);
    }

    pub fn leave(&mut self) {
        self.pointer = None;
        self.primary_pressed = false;
    }

    pub fn set_primary_pressed(&mut self, pressed: bool) {
        self.primary_pressed = pressed;
    }
}

#[derive(Debug, Clone)]
pub struct UiContext {
    theme: Arc<Theme>,
    pub input: InputTracker,
}

impl Default for UiContext {
    fn default() -> Self {
        Self::new(default_theme())
    }
}

impl UiContext {
    pub fn new(theme: Arc<Theme>) -> Self {
        Self {
            theme,
            input: InputTracker::default(),
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: Arc<Theme>) {
        self.theme = theme;
    }
}

#[derive(Debug, Clone)]
pub struct TreeConfig {
    pub measurement_caching: bool,
    pub record_layout_events: bool,
    pub context: UiContext,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            measurement_caching: true,
            record_layout_events: false,
            context: UiContext::default(),
        }
    }
}

impl TreeConfig {
    pub fn with_measurement_caching(mut self, enabled: bool) -> Self {
        self.measurement_caching = enabled;
        self
    }

    pub fn with_layout_events(mut self, enabled: bool) -> Self {
        self.record_layout_events = enabled;
        self
    }

    pub fn with_theme(mut self, theme: Arc<Theme>) -> Self {
        self.context.set_theme(theme);
        self
    }
}
