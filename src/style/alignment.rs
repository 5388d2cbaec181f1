use super::geometry::{Rect, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorizontalAlignment {
    Left,
    Center,
    Right,
    #[default]
    Stretch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerticalAlignment {
    Top,
    Center,
    Bottom,
    #[default]
    Stretch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Visible,
    /// Occupies layout space but is not drawn.
    Hidden,
    /// Consumes no layout space.
    Collapsed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    Horizontal,
    #[default]
    Vertical,
}

/// Places `size` inside `bounds`. A stretched axis takes the full extent of
/// `bounds` and ignores the matching component of `size`.
pub fn apply_alignment(
    bounds: Rect,
    horizontal: HorizontalAlignment,
    vertical: VerticalAlignment,
    size: Size,
) -> Rect {
    let x = match horizontal {
        HorizontalAlignment::Left | HorizontalAlignment::Stretch => bounds.left(),
        HorizontalAlignment::Center => bounds.left() + (bounds.width - size.width) / 2,
        HorizontalAlignment::Right => bounds.right() - size.width,
    };
    let y = match vertical {
        VerticalAlignment::Top | VerticalAlignment::Stretch => bounds.top(),
        VerticalAlignment::Center => bounds.top() + (bounds.height - size.height) / 2,
        VerticalAlignment::Bottom => bounds.bottom() - size.height,
    };
    let width = if horizontal == HorizontalAlignment::Stretch {
        bounds.width
    } else {
        size.width
    };
    let height = if vertical == VerticalAlignment::Stretch {
        bounds.height
    } else {
        size.height
    };
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::{HorizontalAlignment as H, VerticalAlignment as V, apply_alignment};
    use crate::style::{Rect, Size};

    const HS: [H; 4] = [H::Left, H::Center, H::Right, H::Stretch];
    const VS: [V; 4] = [V::Top, V::Center, V::Bottom, V::Stretch];

    #[test]
    fn aligned_rect_stays_inside_bounds() {
        let bounds = Rect::new(7, -3, 101, 57);
        for size in [Size::new(0, 0), Size::new(13, 9), Size::new(100, 57), Size::new(101, 1)] {
            for h in HS {
                for v in VS {
                    let placed = apply_alignment(bounds, h, v, size);
                    assert!(bounds.contains_rect(placed), "{h:?}/{v:?} {size:?} -> {placed:?}");
                }
            }
        }
    }

    #[test]
    fn stretch_ignores_requested_extent() {
        let bounds = Rect::new(10, 20, 80, 40);
        let placed = apply_alignment(bounds, H::Stretch, V::Stretch, Size::new(5, 5));
        assert_eq!(placed, bounds);

        let placed = apply_alignment(bounds, H::Stretch, V::Bottom, Size::new(5, 5));
        assert_eq!(placed, Rect::new(10, 55, 80, 5));
    }

    #[test]
    fn center_truncates_toward_start() {
        let placed = apply_alignment(Rect::new(0, 0, 11, 11), H::Center, V::Center, Size::new(4, 4));
        assert_eq!(placed, Rect::new(3, 3, 4, 4));
    }

    #[test]
    fn end_alignment_hugs_far_edge() {
        let placed = apply_alignment(Rect::new(0, 0, 100, 50), H::Right, V::Top, Size::new(30, 10));
        assert_eq!(placed, Rect::new(70, 0, 30, 10));
    }
}
