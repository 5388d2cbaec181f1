mod component_slot;
mod core;
mod element;
mod layout;
mod measurement;
mod traversal;
mod widget;

pub use component_slot::*;
pub use core::*;
pub use element::*;
pub use measurement::*;
pub use traversal::*;
pub use widget::*;

use crate::style::Point;

/// Top-most element under `point`, searching the subtree rooted at `root`.
/// Later children sit above earlier ones, content above components, and
/// everything above its owner.
pub fn hit_test(tree: &ElementTree, root: ElementId, point: Point) -> Option<ElementId> {
    fn find(tree: &ElementTree, id: ElementId, point: Point) -> Option<ElementId> {
        let core = tree.core(id)?;
        if !tree.is_hit_test_visible(id) || !core.actual_layout_bounds().contains_point(point) {
            return None;
        }

        for &child in tree.children(id).iter().rev() {
            if let Some(found) = find(tree, child, point) {
                return Some(found);
            }
        }
        for slot in tree.components(id).iter().rev() {
            if let Some(found) = find(tree, slot.element(), point) {
                return Some(found);
            }
        }

        Some(id)
    }

    find(tree, root, point)
}

#[cfg(test)]
mod tests {
    use super::{ComponentSlot, ElementKind, ElementTree, Panel, hit_test};
    use crate::style::{Point, Rect, Size, Thickness, Visibility};

    #[test]
    fn later_children_win_and_misses_return_none() {
        let mut tree = ElementTree::default();
        let window = tree.create_window();
        let below = tree.create(window, ElementKind::Panel, Panel::leaf()).expect("below");
        let above = tree.create(window, ElementKind::Panel, Panel::leaf()).expect("above");
        tree.attach_child(window, below).expect("attach");
        tree.attach_child(window, above).expect("attach");
        tree.set_margin(above, Thickness::new(50, 0, 0, 0)).expect("margin");
        tree.update_measurement(window, Size::new(100, 100));
        tree.update_layout(window, Rect::new(0, 0, 100, 100));

        assert_eq!(hit_test(&tree, window, Point::new(10, 10)), Some(below));
        assert_eq!(hit_test(&tree, window, Point::new(60, 10)), Some(above));
        assert_eq!(hit_test(&tree, window, Point::new(150, 10)), None);
    }

    #[test]
    fn invisible_subtrees_are_skipped() {
        let mut tree = ElementTree::default();
        let window = tree.create_window();
        let child = tree.create(window, ElementKind::Panel, Panel::leaf()).expect("child");
        let part = tree.create(window, ElementKind::Panel, Panel::leaf()).expect("part");
        tree.attach_child(window, child).expect("attach");
        tree.add_component(window, ComponentSlot::overlay(part)).expect("component");
        tree.update_measurement(window, Size::new(40, 40));
        tree.update_layout(window, Rect::new(0, 0, 40, 40));

        let point = Point::new(5, 5);
        assert_eq!(hit_test(&tree, window, point), Some(child));

        tree.set_hit_test_visible(child, false).expect("hit test");
        assert_eq!(hit_test(&tree, window, point), Some(part));

        tree.set_visibility(part, Visibility::Hidden).expect("hidden");
        assert_eq!(hit_test(&tree, window, point), Some(window));

        tree.set_can_handle_inputs_while_hidden(part, true).expect("opt in");
        assert_eq!(hit_test(&tree, window, point), Some(part));
    }
}
