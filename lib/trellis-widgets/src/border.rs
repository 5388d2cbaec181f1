use std::any::Any;

use trellis::style::{FillBrush, Rect, Size, Thickness};
use trellis::ui::{Canvas, DrawArgs};
use trellis::view::{
    ContentArrangeable, ContentMeasurable, ElementKind, Panel, SelfMeasurable, SelfMeasurement,
    Widget,
};
use trellis::{ElementId, ElementTree, LayoutError, LayoutResult};

pub struct BorderProps {
    pub thickness: Thickness,
    /// Falls back to the theme's border color.
    pub brush: Option<FillBrush>,
}

impl BorderProps {
    pub fn new(thickness: Thickness) -> Self {
        Self {
            thickness,
            brush: None,
        }
    }
}

pub fn build_border(
    tree: &mut ElementTree,
    window: ElementId,
    props: BorderProps,
) -> LayoutResult<ElementId> {
    build_border_as(tree, window, ElementKind::Border, props)
}

pub(crate) fn build_border_as(
    tree: &mut ElementTree,
    window: ElementId,
    kind: ElementKind,
    props: BorderProps,
) -> LayoutResult<ElementId> {
    check_border_thickness(props.thickness, Size::MAX)?;
    let brush = props
        .brush
        .unwrap_or_else(|| FillBrush::Solid(tree.context().theme().border));
    tree.create(
        window,
        kind,
        Border {
            thickness: props.thickness,
            brush,
        },
    )
}

/// Single-content host that strokes a frame around its content. The frame
/// thickness is part of the element's own footprint.
#[derive(Debug, Clone, PartialEq)]
pub struct Border {
    thickness: Thickness,
    brush: FillBrush,
}

impl Border {
    pub fn thickness(&self) -> Thickness {
        self.thickness
    }

    pub fn brush(&self) -> &FillBrush {
        &self.brush
    }

    /// Rejects sides wider than half of the element's preferred size.
    pub fn set_thickness(tree: &mut ElementTree, id: ElementId, thickness: Thickness) -> LayoutResult<()> {
        let core = tree.core(id).ok_or(LayoutError::UnknownElement(id))?;
        let enclosing = Size::new(
            core.preferred_width().unwrap_or(i32::MAX),
            core.preferred_height().unwrap_or(i32::MAX),
        );
        check_border_thickness(thickness, enclosing)?;
        if tree.widget::<Border>(id).is_some_and(|border| border.thickness == thickness) {
            return Ok(());
        }
        tree.modify_widget::<Border, _>(id, |border| border.thickness = thickness)
    }

    pub fn set_brush(tree: &mut ElementTree, id: ElementId, brush: FillBrush) -> LayoutResult<()> {
        let border = tree
            .widget_mut::<Border>(id)
            .ok_or(LayoutError::WidgetTypeMismatch(id))?;
        border.brush = brush;
        Ok(())
    }
}

pub(crate) fn check_border_thickness(thickness: Thickness, enclosing: Size) -> LayoutResult<()> {
    if thickness.has_negative_side() {
        let value = thickness
            .left
            .min(thickness.top)
            .min(thickness.right)
            .min(thickness.bottom);
        return Err(LayoutError::NegativeSize {
            property: "border thickness",
            value,
        });
    }
    let widest = thickness.left.max(thickness.right);
    let tallest = thickness.top.max(thickness.bottom);
    if widest.saturating_mul(2) > enclosing.width || tallest.saturating_mul(2) > enclosing.height {
        return Err(LayoutError::BorderTooThick {
            thickness: widest.max(tallest),
            enclosing,
        });
    }
    Ok(())
}

impl SelfMeasurable for Border {
    fn measure_self(&self, _available: Size) -> SelfMeasurement {
        SelfMeasurement::new(self.thickness, Thickness::ZERO)
    }
}

impl ContentMeasurable for Border {
    fn measure_content(&self, tree: &mut ElementTree, children: &[ElementId], available: Size) -> Thickness {
        Panel::container().measure_content(tree, children, available)
    }
}

impl ContentArrangeable for Border {
    fn arrange_content(&self, tree: &mut ElementTree, children: &[ElementId], bounds: Rect) {
        Panel::container().arrange_content(tree, children, bounds);
    }
}

impl Widget for Border {
    fn hosts_content(&self) -> bool {
        true
    }

    fn draw_self(&self, canvas: &mut dyn Canvas, layout_bounds: Rect, args: &DrawArgs) {
        if !self.thickness.is_zero() {
            canvas.stroke(layout_bounds, self.thickness, &self.brush, args.opacity);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use trellis::style::{Color, FillBrush, Rect, Size, Thickness};
    use trellis::ui::{DrawArgs, DrawCommand, RecordingCanvas};
    use trellis::view::{ElementKind, Panel};
    use trellis::{ElementTree, LayoutError};

    use super::{Border, BorderProps, build_border};

    #[test]
    fn thickness_is_part_of_the_footprint() {
        let mut tree = ElementTree::default();
        let window = tree.create_window();
        let border = build_border(&mut tree, window, BorderProps::new(Thickness::uniform(2)))
            .expect("border");
        let child = tree.create(window, ElementKind::Panel, Panel::leaf()).expect("child");
        tree.attach_child(window, border).expect("attach");
        tree.attach_child(border, child).expect("attach child");

        tree.update_layout(window, Rect::new(0, 0, 50, 30));
        let content = tree.core(child).expect("child").layout_bounds();
        assert_eq!(content, Rect::new(2, 2, 46, 26));
    }

    #[test]
    fn too_thick_border_is_rejected_and_kept() {
        let mut tree = ElementTree::default();
        let window = tree.create_window();
        let border = build_border(&mut tree, window, BorderProps::new(Thickness::uniform(1)))
            .expect("border");
        tree.set_preferred_width(border, Some(10)).expect("width");

        let result = Border::set_thickness(&mut tree, border, Thickness::new(6, 0, 0, 0));
        assert_eq!(
            result,
            Err(LayoutError::BorderTooThick {
                thickness: 6,
                enclosing: Size::new(10, i32::MAX),
            })
        );
        let negative = Border::set_thickness(&mut tree, border, Thickness::new(0, -1, 0, 0));
        assert!(matches!(negative, Err(LayoutError::NegativeSize { value: -1, .. })));
        assert_eq!(
            tree.widget::<Border>(border).expect("widget").thickness(),
            Thickness::uniform(1)
        );

        Border::set_thickness(&mut tree, border, Thickness::uniform(5)).expect("fits");
        assert!(!tree.is_layout_valid(border));
    }

    #[test]
    fn draws_a_stroke_over_the_layout_bounds() {
        let mut tree = ElementTree::default();
        let window = tree.create_window();
        let brush = FillBrush::Solid(Color::rgb(9, 9, 9));
        let border = build_border(
            &mut tree,
            window,
            BorderProps {
                thickness: Thickness::uniform(1),
                brush: Some(brush.clone()),
            },
        )
        .expect("border");
        tree.attach_child(window, border).expect("attach");
        tree.update_layout(window, Rect::new(0, 0, 20, 10));

        let mut canvas = RecordingCanvas::new();
        tree.draw(window, &mut canvas, DrawArgs::default());
        assert!(canvas.commands().contains(&DrawCommand::Stroke {
            rect: Rect::new(0, 0, 20, 10),
            thickness: Thickness::uniform(1),
            brush,
            opacity: 1.0,
        }));
    }
}
