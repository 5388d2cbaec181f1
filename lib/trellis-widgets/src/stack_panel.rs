use std::any::Any;

use trellis::style::{Orientation, Rect, Size, Thickness, Visibility};
use trellis::view::{ContentArrangeable, ContentMeasurable, ElementKind, SelfMeasurable, Widget};
use trellis::{ElementId, ElementTree, LayoutError, LayoutResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct StackPanelProps {
    pub orientation: Orientation,
    pub spacing: i32,
}

impl StackPanelProps {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            spacing: 0,
        }
    }

    pub fn spacing(mut self, spacing: i32) -> Self {
        self.spacing = spacing;
        self
    }
}

pub fn build_stack_panel(
    tree: &mut ElementTree,
    window: ElementId,
    props: StackPanelProps,
) -> LayoutResult<ElementId> {
    check_spacing(props.spacing)?;
    tree.create(
        window,
        ElementKind::StackPanel,
        StackPanel {
            orientation: props.orientation,
            spacing: props.spacing,
        },
    )
}

fn check_spacing(spacing: i32) -> LayoutResult<()> {
    if spacing < 0 {
        return Err(LayoutError::NegativeSize {
            property: "spacing",
            value: spacing,
        });
    }
    Ok(())
}

/// Lines children up along one axis, `spacing` apart. Collapsed children
/// take no slot and no spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackPanel {
    orientation: Orientation,
    spacing: i32,
}

impl StackPanel {
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn spacing(&self) -> i32 {
        self.spacing
    }

    pub fn set_orientation(tree: &mut ElementTree, id: ElementId, orientation: Orientation) -> LayoutResult<()> {
        if tree.widget::<StackPanel>(id).is_some_and(|panel| panel.orientation == orientation) {
            return Ok(());
        }
        tree.modify_widget::<StackPanel, _>(id, |panel| panel.orientation = orientation)
    }

    pub fn set_spacing(tree: &mut ElementTree, id: ElementId, spacing: i32) -> LayoutResult<()> {
        check_spacing(spacing)?;
        if tree.widget::<StackPanel>(id).is_some_and(|panel| panel.spacing == spacing) {
            return Ok(());
        }
        tree.modify_widget::<StackPanel, _>(id, |panel| panel.spacing = spacing)
    }

    fn along(&self, size: Size) -> i32 {
        match self.orientation {
            Orientation::Horizontal => size.width,
            Orientation::Vertical => size.height,
        }
    }

    fn across(&self, size: Size) -> i32 {
        match self.orientation {
            Orientation::Horizontal => size.height,
            Orientation::Vertical => size.width,
        }
    }

    fn oriented(&self, along: i32, across: i32) -> Size {
        match self.orientation {
            Orientation::Horizontal => Size::new(along, across),
            Orientation::Vertical => Size::new(across, along),
        }
    }
}

fn is_collapsed(tree: &ElementTree, id: ElementId) -> bool {
    tree.core(id)
        .is_none_or(|core| core.visibility() == Visibility::Collapsed)
}

impl SelfMeasurable for StackPanel {}

impl ContentMeasurable for StackPanel {
    fn measure_content(&self, tree: &mut ElementTree, children: &[ElementId], available: Size) -> Thickness {
        let mut along = 0;
        let mut across = 0;
        let mut placed = 0;
        for &child in children {
            if is_collapsed(tree, child) {
                continue;
            }
            if placed > 0 {
                along += self.spacing;
            }
            let remaining = self.oriented(
                (self.along(available) - along).max(0),
                self.across(available),
            );
            let measured = tree.update_measurement(child, remaining).full_size.size();
            along += self.along(measured);
            across = across.max(self.across(measured));
            placed += 1;
        }
        Thickness::from_size(self.oriented(along, across))
    }
}

impl ContentArrangeable for StackPanel {
    fn arrange_content(&self, tree: &mut ElementTree, children: &[ElementId], bounds: Rect) {
        let mut offset = 0;
        let mut placed = 0;
        for &child in children {
            if is_collapsed(tree, child) || bounds.is_empty() {
                tree.update_layout(child, Rect::EMPTY);
                continue;
            }
            if placed > 0 {
                offset += self.spacing;
            }
            let remaining = self.oriented(
                (self.along(bounds.size()) - offset).max(0),
                self.across(bounds.size()),
            );
            let extent = self.along(tree.update_measurement(child, remaining).full_size.size());
            let slot = match self.orientation {
                Orientation::Horizontal => {
                    Rect::new(bounds.x + offset, bounds.y, extent, bounds.height)
                }
                Orientation::Vertical => Rect::new(bounds.x, bounds.y + offset, bounds.width, extent),
            };
            tree.update_layout(child, slot);
            offset += extent;
            placed += 1;
        }
    }
}

impl Widget for StackPanel {
    fn hosts_content(&self) -> bool {
        true
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
