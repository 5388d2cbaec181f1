use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;

use crate::ElementId;
use crate::style::{Rect, Thickness};

bitflags! {
    /// Sides of the owner's remaining bounds that a component takes space from.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Sides: u8 {
        const LEFT = 1 << 0;
        const TOP = 1 << 1;
        const RIGHT = 1 << 2;
        const BOTTOM = 1 << 3;
        const HORIZONTAL = Self::LEFT.bits() | Self::RIGHT.bits();
        const VERTICAL = Self::TOP.bits() | Self::BOTTOM.bits();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UpdateOrder {
    #[default]
    BeforeContents,
    AfterContents,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DrawOrder {
    BeforeBackground,
    BeforeSelf,
    BeforeContents,
    #[default]
    AfterContents,
}

/// Maps (available bounds, requested size) to the rectangle a component gets.
pub type ArrangeFn = Arc<dyn Fn(Rect, Thickness) -> Rect>;

/// A built-in sub-element of an owner. It takes part in the owner's measure and
/// arrange passes but is not user content.
#[derive(Clone)]
pub struct ComponentSlot {
    pub(crate) element: ElementId,
    pub(crate) consumes: Sides,
    pub(crate) width_shared: bool,
    pub(crate) height_shared: bool,
    pub(crate) uses_owner_padding: bool,
    pub(crate) update_order: UpdateOrder,
    pub(crate) draw_order: DrawOrder,
    arrange: ArrangeFn,
}

impl fmt::Debug for ComponentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentSlot")
            .field("element", &self.element)
            .field("consumes", &self.consumes)
            .field("width_shared", &self.width_shared)
            .field("height_shared", &self.height_shared)
            .field("uses_owner_padding", &self.uses_owner_padding)
            .field("update_order", &self.update_order)
            .field("draw_order", &self.draw_order)
            .finish_non_exhaustive()
    }
}

impl ComponentSlot {
    pub fn new(element: ElementId) -> Self {
        Self {
            element,
            consumes: Sides::all(),
            width_shared: false,
            height_shared: false,
            uses_owner_padding: false,
            update_order: UpdateOrder::BeforeContents,
            draw_order: DrawOrder::AfterContents,
            arrange: Arc::new(|bounds, _| bounds),
        }
    }

    /// A component drawn over its owner that takes no layout space.
    pub fn overlay(element: ElementId) -> Self {
        Self::new(element).consumes(Sides::empty())
    }

    pub fn consumes(mut self, sides: Sides) -> Self {
        self.consumes = sides;
        self
    }

    pub fn share_width(mut self, shared: bool) -> Self {
        self.width_shared = shared;
        self
    }

    pub fn share_height(mut self, shared: bool) -> Self {
        self.height_shared = shared;
        self
    }

    pub fn uses_owner_padding(mut self, uses: bool) -> Self {
        self.uses_owner_padding = uses;
        self
    }

    pub fn update_order(mut self, order: UpdateOrder) -> Self {
        self.update_order = order;
        self
    }

    pub fn draw_order(mut self, order: DrawOrder) -> Self {
        self.draw_order = order;
        self
    }

    pub fn arrange_with(mut self, arrange: impl Fn(Rect, Thickness) -> Rect + 'static) -> Self {
        self.arrange = Arc::new(arrange);
        self
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn consumes_any_space(&self) -> bool {
        !self.consumes.is_empty()
    }

    pub fn arrange(&self, bounds: Rect, requested: Thickness) -> Rect {
        (self.arrange)(bounds, requested)
    }

    /// Space the placed rectangle takes from `available`. Per axis: nothing if
    /// neither side consumes; the whole span up to the far edge of the placement
    /// if one side consumes or the placement hugs one edge (ties go to left/top);
    /// the requested per-side split if both sides consume and the placement
    /// fills the axis.
    pub fn consumed_space(&self, available: Rect, placed: Rect, requested: Thickness) -> Thickness {
        let (left, right) = consumed_axis(
            self.consumes.contains(Sides::LEFT),
            self.consumes.contains(Sides::RIGHT),
            (available.left(), available.right()),
            (placed.left(), placed.right()),
            (requested.left, requested.right),
        );
        let (top, bottom) = consumed_axis(
            self.consumes.contains(Sides::TOP),
            self.consumes.contains(Sides::BOTTOM),
            (available.top(), available.bottom()),
            (placed.top(), placed.bottom()),
            (requested.top, requested.bottom),
        );
        Thickness::new(left, top, right, bottom)
    }

    /// Space taken when the component is given exactly its requested size.
    pub fn consumed_by_request(&self, requested: Thickness) -> Thickness {
        if !self.consumes_any_space() {
            return Thickness::ZERO;
        }
        let probe = Rect::from_size(requested.size().zero_or_greater());
        let placed = self.arrange(probe, requested);
        self.consumed_space(probe, placed, requested)
    }

    /// Splits a consumed thickness into the shared part and the displacing part.
    pub fn split_shared(&self, consumed: Thickness) -> (Thickness, Thickness) {
        let mut shared = Thickness::ZERO;
        let mut exclusive = consumed;
        if self.width_shared {
            shared.left = consumed.left;
            shared.right = consumed.right;
            exclusive.left = 0;
            exclusive.right = 0;
        }
        if self.height_shared {
            shared.top = consumed.top;
            shared.bottom = consumed.bottom;
            exclusive.top = 0;
            exclusive.bottom = 0;
        }
        (shared, exclusive)
    }
}

fn consumed_axis(
    consumes_start: bool,
    consumes_end: bool,
    (available_start, available_end): (i32, i32),
    (placed_start, placed_end): (i32, i32),
    (requested_start, requested_end): (i32, i32),
) -> (i32, i32) {
    let extent = (available_end - available_start).max(0);
    let from_start = (placed_end - available_start).clamp(0, extent);
    let from_end = (available_end - placed_start).clamp(0, extent);
    match (consumes_start, consumes_end) {
        (false, false) => (0, 0),
        (true, false) => (from_start, 0),
        (false, true) => (0, from_end),
        (true, true) => {
            let gap_start = placed_start - available_start;
            let gap_end = available_end - placed_end;
            if gap_start <= 0 && gap_end <= 0 {
                let start = requested_start.clamp(0, extent);
                (start, requested_end.clamp(0, extent - start))
            } else if gap_start <= gap_end {
                (from_start, 0)
            } else {
                (0, from_end)
            }
        }
    }
}
