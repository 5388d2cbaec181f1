use std::any::Any;

use crate::ElementId;
use crate::style::{Rect, Size, Thickness};
use crate::ui::{Canvas, DrawArgs, UpdateArgs};

use super::ElementTree;

/// Intrinsic footprint of an element, excluding margin, padding and content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelfMeasurement {
    pub size: Thickness,
    /// Part of `size` that overlaps content instead of displacing it.
    pub shared: Thickness,
}

impl SelfMeasurement {
    pub const ZERO: SelfMeasurement = SelfMeasurement {
        size: Thickness::ZERO,
        shared: Thickness::ZERO,
    };

    pub fn new(size: Thickness, shared: Thickness) -> Self {
        Self { size, shared }
    }
}

pub trait SelfMeasurable {
    fn measure_self(&self, _available: Size) -> SelfMeasurement {
        SelfMeasurement::ZERO
    }

    /// Whether self-only measurements of this widget may be served from cache.
    fn can_cache_self_measurement(&self) -> bool {
        true
    }
}

pub trait ContentMeasurable {
    /// Measures the content children against `available`.
    fn measure_content(
        &self,
        _tree: &mut ElementTree,
        _children: &[ElementId],
        _available: Size,
    ) -> Thickness {
        Thickness::ZERO
    }
}

pub trait ContentArrangeable {
    /// Lays the content children out inside the aligned content bounds.
    fn arrange_content(&self, _tree: &mut ElementTree, _children: &[ElementId], _bounds: Rect) {}
}

pub trait Widget: SelfMeasurable + ContentMeasurable + ContentArrangeable + Any {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn hosts_content(&self) -> bool {
        false
    }

    fn update_self(&mut self, _args: &UpdateArgs) {}

    /// Region the background brush fills, in untranslated coordinates.
    fn background_bounds(&self, _tree: &ElementTree, layout_bounds: Rect) -> Rect {
        layout_bounds
    }

    fn draw_self(&self, _canvas: &mut dyn Canvas, _layout_bounds: Rect, _args: &DrawArgs) {}

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Element with no footprint of its own. As a container it stacks every
/// child on top of the others, each getting the full content bounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct Panel {
    hosts_content: bool,
}

impl Panel {
    pub fn leaf() -> Self {
        Self {
            hosts_content: false,
        }
    }

    pub fn container() -> Self {
        Self {
            hosts_content: true,
        }
    }
}

impl SelfMeasurable for Panel {}

impl ContentMeasurable for Panel {
    fn measure_content(&self, tree: &mut ElementTree, children: &[ElementId], available: Size) -> Thickness {
        let mut size = Size::ZERO;
        for &child in children {
            let measured = tree.update_measurement(child, available).full_size.size();
            size.width = size.width.max(measured.width);
            size.height = size.height.max(measured.height);
        }
        Thickness::from_size(size)
    }
}

impl ContentArrangeable for Panel {
    fn arrange_content(&self, tree: &mut ElementTree, children: &[ElementId], bounds: Rect) {
        for &child in children {
            tree.update_layout(child, bounds);
        }
    }
}

impl Widget for Panel {
    fn hosts_content(&self) -> bool {
        self.hosts_content
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
