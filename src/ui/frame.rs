use tracing::trace;

use super::{Canvas, DrawArgs, UpdateArgs, VisualState};
use crate::style::Visibility;
use crate::view::{DrawOrder, ElementId, ElementTree, UpdateOrder};

impl ElementTree {
    /// Per-frame update of `id` and its subtree: visual state, input
    /// eligibility, then components and content in slot order, then the
    /// widget itself.
    pub fn update(&mut self, id: ElementId, args: UpdateArgs) {
        let parent_can_receive = self
            .parent(id)
            .and_then(|parent| self.core(parent))
            .is_none_or(|core| core.can_receive_mouse_input);
        let input = self.context().input;
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        let core = &mut node.core;

        let args = UpdateArgs {
            is_enabled: args.is_enabled && core.is_enabled,
            is_selected: args.is_selected || core.is_selected,
            is_hit_test_visible: args.is_hit_test_visible && core.is_hit_test_visible,
            ..args
        };
        core.bounds_offset = args.offset;

        let hidden_with_input = core.visibility() == Visibility::Hidden && core.can_handle_inputs_while_hidden;
        let base_can_receive = (core.visibility() == Visibility::Visible || hidden_with_input)
            && args.is_enabled
            && args.is_hit_test_visible
            && (!core.recent_draw_was_clipped || hidden_with_input);
        core.can_receive_mouse_input = base_can_receive && parent_can_receive;

        core.is_hovered = core.can_receive_mouse_input
            && input
                .pointer
                .is_some_and(|pointer| core.actual_layout_bounds().contains_point(pointer));
        let is_pressed = core.is_hovered && input.primary_pressed;
        core.visual_state = VisualState::resolve(
            args.is_enabled,
            args.is_selected,
            is_pressed,
            core.is_hovered,
            input.has_modal_window,
        );

        let components = node.components.clone();
        for slot in components.iter().filter(|slot| slot.update_order == UpdateOrder::BeforeContents) {
            self.update(slot.element, args);
        }
        for child in self.children(id).to_vec() {
            self.update(child, args);
        }
        for slot in components.iter().filter(|slot| slot.update_order == UpdateOrder::AfterContents) {
            self.update(slot.element, args);
        }
        self.with_widget(id, |_, widget| widget.update_self(&args));
    }

    /// Draws `id` and its subtree. Elements that are not visible, have no
    /// layout area, or fall outside the active clip are skipped and flagged
    /// as clipped for the next update.
    pub fn draw(&mut self, id: ElementId, canvas: &mut dyn Canvas, args: DrawArgs) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        let core = &mut node.core;
        core.recent_draw_was_clipped = false;
        let args = DrawArgs {
            opacity: args.opacity * core.opacity(),
            visual_state: core.visual_state,
            ..args
        };
        if core.visibility() != Visibility::Visible || core.bounds.layout.is_empty() {
            core.recent_draw_was_clipped = true;
            return;
        }

        let untranslated = core.bounds.layout;
        let layout = untranslated.translated(args.offset);
        let mut target = layout;
        let scale = core
            .render_scale
            .and_then(|scale| scale.scale_for(core.visual_state));
        if let Some(scale) = scale {
            canvas.push_scale(layout.center(), scale);
            target = target.scaled(scale);
        }

        let clip_to_bounds = core.clip_to_bounds;
        let outside_clip = clip_to_bounds && canvas.clip().is_some_and(|clip| !clip.intersects(target));
        if outside_clip {
            core.recent_draw_was_clipped = true;
            trace!(?id, ?target, "draw skipped outside clip");
        } else {
            let background = core.background.clone();
            let components = node.components.clone();
            let background_region = self
                .widget_ref(id)
                .map_or(untranslated, |widget| widget.background_bounds(self, untranslated))
                .translated(args.offset);
            let draw_components = |tree: &mut Self, canvas: &mut dyn Canvas, order: DrawOrder| {
                for slot in components.iter().filter(|slot| slot.draw_order == order) {
                    tree.draw(slot.element, canvas, args);
                }
            };

            if clip_to_bounds {
                canvas.push_clip(target);
            }
            draw_components(self, canvas, DrawOrder::BeforeBackground);
            if let Some(brush) = background.underlay(args.visual_state.primary) {
                canvas.fill(background_region, brush, args.opacity);
            }
            if let Some(brush) = background.overlay(args.visual_state.secondary) {
                canvas.fill(background_region, brush, args.opacity);
            }
            draw_components(self, canvas, DrawOrder::BeforeSelf);
            if let Some(widget) = self.widget_ref(id) {
                widget.draw_self(canvas, layout, &args);
            }
            draw_components(self, canvas, DrawOrder::BeforeContents);
            for child in self.children(id).to_vec() {
                self.draw(child, canvas, args);
            }
            draw_components(self, canvas, DrawOrder::AfterContents);
            if clip_to_bounds {
                canvas.pop_clip();
            }
        }

        if scale.is_some() {
            canvas.pop_scale();
        }
    }
}
