use std::any::Any;

use smol_str::SmolStr;
use tracing::debug;

use trellis::style::{
    Color, FillBrush, HorizontalAlignment, Rect, Size, Thickness, VerticalAlignment,
    apply_alignment,
};
use trellis::ui::{Canvas, DrawArgs};
use trellis::view::{
    ComponentSlot, ContentArrangeable, ContentMeasurable, ElementKind, Panel, SelfMeasurable,
    Sides, TraversalOptions, Widget,
};
use trellis::{ElementId, ElementTree, LayoutError, LayoutResult};

use crate::border::check_border_thickness;

pub const DEFAULT_BUBBLE_SIZE: i32 = 16;
pub const DEFAULT_BUBBLE_SPACING: i32 = 5;

pub struct RadioButtonProps {
    /// Buttons of the same window sharing a group name are mutually exclusive.
    pub group: SmolStr,
    pub checked: bool,
    pub bubble_size: i32,
    /// Empty width between the bubble and the content.
    pub spacing: i32,
}

impl RadioButtonProps {
    pub fn new(group: impl Into<SmolStr>) -> Self {
        Self {
            group: group.into(),
            checked: false,
            bubble_size: DEFAULT_BUBBLE_SIZE,
            spacing: DEFAULT_BUBBLE_SPACING,
        }
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }
}

/// Creates a radio button whose bubble sits left of the content, vertically
/// centered. The bubble's height overlaps the content instead of adding to it.
pub fn build_radio_button(
    tree: &mut ElementTree,
    window: ElementId,
    props: RadioButtonProps,
) -> LayoutResult<ElementId> {
    if props.bubble_size < 0 {
        return Err(LayoutError::NegativeSize {
            property: "bubble size",
            value: props.bubble_size,
        });
    }
    let theme = tree.context().theme();
    let bubble_widget = RadioBubble {
        checked: props.checked,
        border: FillBrush::Solid(theme.border),
        border_thickness: 1,
        fill: FillBrush::Solid(Color::WHITE),
        checked_fill: FillBrush::Solid(theme.accent),
    };
    check_border_thickness(
        Thickness::uniform(bubble_widget.border_thickness),
        Size::new(props.bubble_size, props.bubble_size),
    )?;

    let bubble = tree.create(window, ElementKind::RadioButtonBubble, bubble_widget)?;
    let button = tree.create(
        window,
        ElementKind::RadioButton,
        RadioButton {
            group: props.group,
            bubble,
        },
    )?;
    tree.initialize(button, |tree| {
        tree.set_preferred_width(bubble, Some(props.bubble_size))?;
        tree.set_preferred_height(bubble, Some(props.bubble_size))?;
        tree.set_margin(bubble, Thickness::new(0, 0, props.spacing, 0))?;
        tree.add_component(
            button,
            ComponentSlot::new(bubble)
                .consumes(Sides::LEFT | Sides::TOP)
                .share_height(true)
                .arrange_with(|bounds, requested| {
                    apply_alignment(
                        bounds,
                        HorizontalAlignment::Left,
                        VerticalAlignment::Center,
                        requested.size(),
                    )
                }),
        )
    })?;
    Ok(button)
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadioButton {
    group: SmolStr,
    bubble: ElementId,
}

impl RadioButton {
    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn bubble(&self) -> ElementId {
        self.bubble
    }

    pub fn is_checked(tree: &ElementTree, id: ElementId) -> bool {
        tree.widget::<RadioButton>(id)
            .and_then(|button| tree.widget::<RadioBubble>(button.bubble))
            .is_some_and(|bubble| bubble.checked)
    }

    /// Checks `id` and unchecks every other attached button of its group in
    /// the same window. Unchecking directly is only allowed when `allow_none`.
    pub fn set_checked(
        tree: &mut ElementTree,
        id: ElementId,
        checked: bool,
        allow_none: bool,
    ) -> LayoutResult<()> {
        let group = tree
            .widget::<RadioButton>(id)
            .ok_or(LayoutError::WidgetTypeMismatch(id))?
            .group
            .clone();
        if !checked {
            if allow_none {
                set_bubble_checked(tree, id, false);
            }
            return Ok(());
        }

        let window = tree.window_of(id).ok_or(LayoutError::UnknownElement(id))?;
        for other in group_members(tree, window, &group) {
            if other != id {
                set_bubble_checked(tree, other, false);
            }
        }
        set_bubble_checked(tree, id, true);
        debug!(?id, group = %group, "radio button checked");
        Ok(())
    }

    /// The checked button of `group` among the window's attached elements.
    pub fn checked_in_group(tree: &ElementTree, window: ElementId, group: &str) -> Option<ElementId> {
        group_members(tree, window, group)
            .into_iter()
            .find(|&member| RadioButton::is_checked(tree, member))
    }
}

fn group_members(tree: &ElementTree, window: ElementId, group: &str) -> Vec<ElementId> {
    tree.elements(window, TraversalOptions::everything(), |tree, candidate| {
        tree.widget::<RadioButton>(candidate)
            .is_some_and(|button| button.group == group)
    })
}

fn set_bubble_checked(tree: &mut ElementTree, id: ElementId, checked: bool) {
    let Some(bubble) = tree.widget::<RadioButton>(id).map(RadioButton::bubble) else {
        return;
    };
    if let Some(widget) = tree.widget_mut::<RadioBubble>(bubble) {
        widget.checked = checked;
    }
}

impl SelfMeasurable for RadioButton {}

impl ContentMeasurable for RadioButton {
    fn measure_content(&self, tree: &mut ElementTree, children: &[ElementId], available: Size) -> Thickness {
        Panel::container().measure_content(tree, children, available)
    }
}

impl ContentArrangeable for RadioButton {
    fn arrange_content(&self, tree: &mut ElementTree, children: &[ElementId], bounds: Rect) {
        Panel::container().arrange_content(tree, children, bounds);
    }
}

impl Widget for RadioButton {
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

/// The checkable part of a radio button.
#[derive(Debug, Clone, PartialEq)]
pub struct RadioBubble {
    checked: bool,
    border: FillBrush,
    border_thickness: i32,
    fill: FillBrush,
    checked_fill: FillBrush,
}

impl RadioBubble {
    pub fn is_checked(&self) -> bool {
        self.checked
    }
}

impl SelfMeasurable for RadioBubble {}

impl ContentMeasurable for RadioBubble {}

impl ContentArrangeable for RadioBubble {}

impl Widget for RadioBubble {
    fn draw_self(&self, canvas: &mut dyn Canvas, layout_bounds: Rect, args: &DrawArgs) {
        canvas.fill(layout_bounds, &self.fill, args.opacity);
        canvas.stroke(
            layout_bounds,
            Thickness::uniform(self.border_thickness),
            &self.border,
            args.opacity,
        );
        if self.checked {
            let dot = layout_bounds.compressed(Thickness::uniform(4)).or_empty();
            if !dot.is_empty() {
                canvas.fill(dot, &self.checked_fill, args.opacity);
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
