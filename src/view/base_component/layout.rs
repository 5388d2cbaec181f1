use tracing::trace;

use super::{ElementId, ElementMeasurement, ElementTree, LayoutBounds, Measurement, SelfMeasurement};
use crate::style::{
    HorizontalAlignment, Rect, Size, Thickness, VerticalAlignment, Visibility, apply_alignment,
};

impl ElementTree {
    fn is_collapsed(&self, id: ElementId) -> bool {
        self.core(id)
            .is_none_or(|core| core.visibility() == Visibility::Collapsed)
    }

    /// Space consumed before content: margin, padding, the widget's own
    /// footprint and every component, in registration order.
    pub fn measure_self(&mut self, id: ElementId, available: Size) -> SelfMeasurement {
        if self.is_collapsed(id) {
            return SelfMeasurement::ZERO;
        }
        let Some(node) = self.nodes.get(id) else {
            return SelfMeasurement::ZERO;
        };
        let margin = node.core.margin_size();
        let padding = node.core.padding_size();
        let mut remaining = available.subtract(margin, 0, 0);

        let intrinsic = self
            .widget_ref(id)
            .map_or(SelfMeasurement::ZERO, |widget| widget.measure_self(remaining));
        let SelfMeasurement {
            size: mut total,
            mut shared,
        } = node.core.baseline(intrinsic);
        remaining = remaining.subtract(intrinsic.size.size(), 0, 0);

        let slots = node.components.clone();
        for slot in slots {
            let slot_available = if slot.uses_owner_padding {
                remaining.subtract(padding, 0, 0)
            } else {
                remaining
            };
            let requested = self.update_measurement(slot.element, slot_available).full_size;
            let consumed = slot.consumed_by_request(requested);
            let (slot_shared, _) = slot.split_shared(consumed);
            shared = shared.add(slot_shared);
            total = total.add(consumed);
            remaining = remaining.subtract(consumed.size(), 0, 0);
        }

        if total.width() <= 0 && total.height() <= 0 {
            total = Thickness::ZERO;
        }
        SelfMeasurement::new(total, shared)
    }

    fn cached_self_measurement(&mut self, id: ElementId, available: Size) -> SelfMeasurement {
        let cacheable = self.config().measurement_caching
            && self
                .widget_ref(id)
                .is_some_and(|widget| widget.can_cache_self_measurement());
        if cacheable {
            if let Some(entry) = self
                .core(id)
                .and_then(|core| core.self_measurements.find(available))
            {
                trace!(?id, ?available, "self measurement cache hit");
                return SelfMeasurement::new(entry.requested, entry.shared);
            }
        }

        let measured = self.measure_self(id, available);
        if let Some(node) = self.nodes.get_mut(id) {
            node.core.self_measurements.insert(ElementMeasurement {
                available,
                requested: measured.size,
                shared: measured.shared,
                content: Thickness::ZERO,
            });
        }
        measured
    }

    fn cached_measurement(&self, id: ElementId, available: Size) -> Option<Measurement> {
        if !self.config().measurement_caching
            || !self
                .widget_ref(id)
                .is_some_and(|widget| widget.can_cache_self_measurement())
        {
            return None;
        }
        let core = self.core(id)?;
        let self_entry = core.self_measurements.find(available)?;
        let full_entry = core.full_measurements.find(available)?;
        Some(Measurement {
            self_size: self_entry.requested,
            full_size: full_entry.requested,
            shared_size: self_entry.shared,
            content_size: full_entry.content,
        })
    }

    /// Full measurement of `id` (self plus content) against `available`,
    /// served from cache when a reusable entry exists.
    pub fn update_measurement(&mut self, id: ElementId, available: Size) -> Measurement {
        if self.is_collapsed(id) {
            return Measurement::ZERO;
        }
        let available = available.zero_or_greater();
        if let Some(cached) = self.cached_measurement(id, available) {
            trace!(?id, ?available, "measurement cache hit");
            return cached;
        }

        let SelfMeasurement {
            size: self_size,
            shared: shared_size,
        } = self.cached_self_measurement(id, available);
        let exclusive = self_size.subtract(shared_size);
        let remaining = available.subtract(exclusive.size(), 0, 0);

        let hosts_content = self
            .widget_ref(id)
            .is_some_and(|widget| widget.hosts_content());
        let content_size = if hosts_content {
            let children = self.children(id).to_vec();
            self.with_widget(id, |tree, widget| {
                widget.measure_content(tree, &children, remaining)
            })
            .unwrap_or(Thickness::ZERO)
        } else {
            Thickness::ZERO
        };

        let Some(node) = self.nodes.get_mut(id) else {
            return Measurement::ZERO;
        };
        let full_size = node
            .core
            .constrain(exclusive.add(shared_size.max(content_size)), available);
        node.core.full_measurements.insert(ElementMeasurement {
            available,
            requested: full_size,
            shared: shared_size,
            content: content_size,
        });
        trace!(?id, ?available, ?full_size, "measured");

        Measurement {
            self_size,
            full_size,
            shared_size,
            content_size,
        }
    }

    /// Arranges `id` inside `bounds` and recurses into components and content.
    pub fn update_layout(&mut self, id: ElementId, bounds: Rect) {
        if !self.contains(id) {
            return;
        }
        if bounds.is_empty() || self.is_collapsed(id) {
            self.collapse(id);
            return;
        }

        let measurement = self.update_measurement(id, bounds.size());
        let Some(core) = self.core(id) else {
            return;
        };
        let horizontal = core.horizontal_alignment();
        let vertical = core.vertical_alignment();
        let content_horizontal = core.horizontal_content_alignment();
        let content_vertical = core.vertical_content_alignment();
        let margin = core.margin();
        let padding = core.padding();
        let consumed = Size::new(
            if horizontal == HorizontalAlignment::Stretch {
                bounds.width
            } else {
                bounds.width.min(measurement.full_size.width())
            },
            if vertical == VerticalAlignment::Stretch {
                bounds.height
            } else {
                bounds.height.min(measurement.full_size.height())
            },
        );
        if consumed.is_empty() {
            self.collapse_with(
                id,
                LayoutBounds {
                    allocated: bounds,
                    ..LayoutBounds::EMPTY
                },
            );
            return;
        }

        let render = apply_alignment(bounds, horizontal, vertical, consumed);
        let layout = render.compressed(margin);
        if layout.is_empty() {
            self.collapse_with(
                id,
                LayoutBounds {
                    allocated: bounds,
                    render,
                    ..LayoutBounds::EMPTY
                },
            );
            return;
        }
        let mut remaining = layout;
        for slot in self.components(id).to_vec() {
            let slot_bounds = if slot.uses_owner_padding {
                remaining.compressed(padding)
            } else {
                remaining
            };
            let requested = self
                .update_measurement(slot.element, slot_bounds.size())
                .full_size;
            let placed = slot.arrange(slot_bounds, requested);
            self.update_layout(slot.element, placed);

            let consumed = if slot.consumes_any_space() {
                slot.consumed_space(slot_bounds, placed, requested)
            } else {
                Thickness::ZERO
            };
            let (_, exclusive) = slot.split_shared(consumed);
            remaining = Rect::from_edges(
                remaining.left() + exclusive.left,
                remaining.top() + exclusive.top,
                remaining.right() - exclusive.right,
                remaining.bottom() - exclusive.bottom,
            );
        }

        let stretched_content = stretched_content_bounds(
            render,
            measurement.self_size.subtract(measurement.shared_size),
        );
        let content_size = Size::new(
            if content_horizontal == HorizontalAlignment::Stretch {
                stretched_content.width
            } else {
                stretched_content.width.min(measurement.content_size.width())
            },
            if content_vertical == VerticalAlignment::Stretch {
                stretched_content.height
            } else {
                stretched_content.height.min(measurement.content_size.height())
            },
        );
        let aligned_content = if content_size.is_empty() {
            Rect::EMPTY
        } else {
            apply_alignment(
                stretched_content,
                content_horizontal,
                content_vertical,
                content_size,
            )
        };

        self.set_bounds(
            id,
            LayoutBounds {
                allocated: bounds,
                render,
                layout,
                stretched_content,
                aligned_content,
            },
        );
        trace!(?id, ?render, ?aligned_content, "arranged");
        self.arrange_content(id, aligned_content);
    }

    fn arrange_content(&mut self, id: ElementId, bounds: Rect) {
        if !self
            .widget_ref(id)
            .is_some_and(|widget| widget.hosts_content())
        {
            return;
        }
        let children = self.children(id).to_vec();
        self.with_widget(id, |tree, widget| {
            widget.arrange_content(tree, &children, bounds)
        });
    }

    fn collapse(&mut self, id: ElementId) {
        self.collapse_with(id, LayoutBounds::EMPTY);
    }

    /// Stores degenerate bounds for `id` and empties its whole subtree.
    fn collapse_with(&mut self, id: ElementId, bounds: LayoutBounds) {
        self.set_bounds(id, bounds);
        for slot in self.components(id).to_vec() {
            self.update_layout(slot.element, Rect::EMPTY);
        }
        self.arrange_content(id, Rect::EMPTY);
    }
}

/// Insets `render` by the exclusive self footprint, never past the opposite edge.
fn stretched_content_bounds(render: Rect, exclusive: Thickness) -> Rect {
    let left = render.right().min(render.left() + exclusive.left);
    let top = render.bottom().min(render.top() + exclusive.top);
    let right = render.left().max(render.right() - exclusive.right);
    let bottom = render.top().max(render.bottom() - exclusive.bottom);
    Rect::new(left, top, (right - left).max(0), (bottom - top).max(0)).or_empty()
}
