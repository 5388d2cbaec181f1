use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::{SlotMap, new_key_type};
use smol_str::SmolStr;
use tracing::{debug, warn};

use super::{ComponentSlot, ElementCore, ElementKind, LayoutBounds, Panel, Widget};
use crate::error::{LayoutError, LayoutResult};
use crate::style::{
    HorizontalAlignment, Point, Rect, Thickness, VerticalAlignment, Visibility, VisualStateBrush,
};
use crate::ui::{ConditionalScale, TreeConfig, UiContext};

new_key_type! {
    pub struct ElementId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutEvent {
    Invalidated {
        element: ElementId,
        source: ElementId,
    },
    Arranged {
        element: ElementId,
    },
    BoundsChanged {
        element: ElementId,
        previous: Rect,
        current: Rect,
    },
}

pub(crate) struct Node {
    pub(crate) core: ElementCore,
    widget: Option<Box<dyn Widget>>,
    pub(crate) components: Vec<ComponentSlot>,
    pub(crate) children: Vec<ElementId>,
    /// Content parent or component owner.
    pub(crate) parent: Option<ElementId>,
    pub(crate) component_owner: Option<ElementId>,
    pub(crate) window: ElementId,
}

/// Owns every element of every window. Elements refer to each other by id;
/// each element sits in exactly one parent's child list or component list.
pub struct ElementTree {
    pub(crate) nodes: SlotMap<ElementId, Node>,
    names: FxHashMap<(ElementId, SmolStr), ElementId>,
    config: TreeConfig,
    events: Vec<LayoutEvent>,
    defer_depth: usize,
    deferred: Vec<ElementId>,
}

impl Default for ElementTree {
    fn default() -> Self {
        Self::new(TreeConfig::default())
    }
}

impl ElementTree {
    pub fn new(config: TreeConfig) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            names: FxHashMap::default(),
            config,
            events: Vec::new(),
            defer_depth: 0,
            deferred: Vec::new(),
        }
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn context(&self) -> &UiContext {
        &self.config.context
    }

    pub fn context_mut(&mut self) -> &mut UiContext {
        &mut self.config.context
    }

    pub fn set_measurement_caching(&mut self, enabled: bool) {
        self.config.measurement_caching = enabled;
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn create_window(&mut self) -> ElementId {
        let background = self.config.context.theme().background_for(&ElementKind::Window);
        let id = self.nodes.insert_with_key(|id| Node {
            core: ElementCore::new(ElementKind::Window, background),
            widget: Some(Box::new(Panel::container())),
            components: Vec::new(),
            children: Vec::new(),
            parent: None,
            component_owner: None,
            window: id,
        });
        debug!(?id, "created window");
        id
    }

    /// Creates a detached element that belongs to `window` for its lifetime.
    pub fn create(
        &mut self,
        window: ElementId,
        kind: ElementKind,
        widget: impl Widget,
    ) -> LayoutResult<ElementId> {
        let owning_window = self.node(window)?.window;
        if owning_window != window {
            return Err(LayoutError::ForeignWindow {
                parent: window,
                child: owning_window,
            });
        }
        let background = self.config.context.theme().background_for(&kind);
        Ok(self.nodes.insert(Node {
            core: ElementCore::new(kind, background),
            widget: Some(Box::new(widget)),
            components: Vec::new(),
            children: Vec::new(),
            parent: None,
            component_owner: None,
            window,
        }))
    }

    pub(crate) fn node(&self, id: ElementId) -> LayoutResult<&Node> {
        self.nodes.get(id).ok_or(LayoutError::UnknownElement(id))
    }

    pub(crate) fn node_mut(&mut self, id: ElementId) -> LayoutResult<&mut Node> {
        self.nodes.get_mut(id).ok_or(LayoutError::UnknownElement(id))
    }

    pub fn core(&self, id: ElementId) -> Option<&ElementCore> {
        self.nodes.get(id).map(|node| &node.core)
    }

    pub fn widget<T: Widget>(&self, id: ElementId) -> Option<&T> {
        self.nodes
            .get(id)?
            .widget
            .as_deref()?
            .as_any()
            .downcast_ref::<T>()
    }

    /// Mutable access for state that does not affect layout.
    pub fn widget_mut<T: Widget>(&mut self, id: ElementId) -> Option<&mut T> {
        self.nodes
            .get_mut(id)?
            .widget
            .as_deref_mut()?
            .as_any_mut()
            .downcast_mut::<T>()
    }

    /// Mutates a widget and invalidates its layout.
    pub fn modify_widget<T: Widget, R>(
        &mut self,
        id: ElementId,
        f: impl FnOnce(&mut T) -> R,
    ) -> LayoutResult<R> {
        let widget = self
            .widget_mut::<T>(id)
            .ok_or(LayoutError::WidgetTypeMismatch(id))?;
        let result = f(widget);
        self.layout_changed(id);
        Ok(result)
    }

    pub(crate) fn widget_ref(&self, id: ElementId) -> Option<&dyn Widget> {
        self.nodes.get(id)?.widget.as_deref()
    }

    /// Runs `f` with the widget temporarily taken out of the tree so it can
    /// call back into the tree for its children.
    pub(crate) fn with_widget<R>(
        &mut self,
        id: ElementId,
        f: impl FnOnce(&mut Self, &mut dyn Widget) -> R,
    ) -> Option<R> {
        let node = self.nodes.get_mut(id)?;
        let Some(mut widget) = node.widget.take() else {
            warn!(?id, "re-entrant widget access ignored");
            return None;
        };
        let result = f(self, widget.as_mut());
        if let Some(node) = self.nodes.get_mut(id) {
            node.widget = Some(widget);
        }
        Some(result)
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.nodes
            .get(id)
            .map_or(&[][..], |node| node.children.as_slice())
    }

    pub fn components(&self, id: ElementId) -> &[ComponentSlot] {
        self.nodes
            .get(id)
            .map_or(&[][..], |node| node.components.as_slice())
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.nodes.get(id)?.parent
    }

    /// The owner of `id` if it is a component element.
    pub fn component_parent(&self, id: ElementId) -> Option<ElementId> {
        self.nodes.get(id)?.component_owner
    }

    pub fn is_component(&self, id: ElementId) -> bool {
        self.component_parent(id).is_some()
    }

    pub fn window_of(&self, id: ElementId) -> Option<ElementId> {
        self.nodes.get(id).map(|node| node.window)
    }

    pub fn is_ancestor(&self, ancestor: ElementId, id: ElementId) -> bool {
        let mut current = self.parent(id);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.parent(parent);
        }
        false
    }

    fn check_attachable(&self, parent: ElementId, child: ElementId) -> LayoutResult<()> {
        let parent_node = self.node(parent)?;
        let child_node = self.node(child)?;
        if child_node.parent.is_some() {
            return Err(LayoutError::AlreadyParented { child });
        }
        if child == parent || self.is_ancestor(child, parent) || child_node.window == child {
            return Err(LayoutError::Cycle { parent, child });
        }
        if parent_node.window != child_node.window {
            return Err(LayoutError::ForeignWindow { parent, child });
        }
        Ok(())
    }

    pub fn attach_child(&mut self, parent: ElementId, child: ElementId) -> LayoutResult<()> {
        let index = self.children(parent).len();
        self.insert_child(parent, index, child)
    }

    /// Inserts `child` at `index` (clamped to the child count).
    pub fn insert_child(
        &mut self,
        parent: ElementId,
        index: usize,
        child: ElementId,
    ) -> LayoutResult<()> {
        self.check_attachable(parent, child)?;
        if !self.widget_ref(parent).is_some_and(|widget| widget.hosts_content()) {
            return Err(LayoutError::ContentNotSupported(parent));
        }
        let node = self.node_mut(parent)?;
        let index = index.min(node.children.len());
        node.children.insert(index, child);
        self.node_mut(child)?.parent = Some(parent);
        self.layout_changed(parent);
        Ok(())
    }

    pub fn detach_child(&mut self, parent: ElementId, child: ElementId) -> LayoutResult<()> {
        let node = self.node_mut(parent)?;
        let Some(index) = node.children.iter().position(|&id| id == child) else {
            return Err(LayoutError::NotAChild { parent, child });
        };
        node.children.remove(index);
        let child_node = self.node_mut(child)?;
        child_node.parent = None;
        child_node.core.invalidate();
        self.layout_changed(parent);
        Ok(())
    }

    /// Registers a built-in sub-element of `owner`. Components are fixed once
    /// the owner has been arranged.
    pub fn add_component(&mut self, owner: ElementId, slot: ComponentSlot) -> LayoutResult<()> {
        let element = slot.element;
        self.check_attachable(owner, element)?;
        if self.node(owner)?.core.has_been_arranged {
            return Err(LayoutError::ComponentAfterLayout(owner));
        }
        let node = self.node_mut(element)?;
        node.parent = Some(owner);
        node.component_owner = Some(owner);
        self.node_mut(owner)?.components.push(slot);
        self.layout_changed(owner);
        Ok(())
    }

    /// Destroys `id` and everything it owns, detaching it first if needed.
    pub fn remove(&mut self, id: ElementId) -> LayoutResult<()> {
        let node = self.node(id)?;
        let owner = node.component_owner;
        if let Some(parent) = node.parent {
            match owner {
                Some(owner) => {
                    self.node_mut(owner)?
                        .components
                        .retain(|slot| slot.element != id);
                    self.layout_changed(owner);
                }
                None => self.detach_child(parent, id)?,
            }
        }

        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            let Some(node) = self.nodes.remove(current) else {
                continue;
            };
            if let Some(name) = node.core.name {
                self.names.remove(&(node.window, name));
            }
            pending.extend(node.children);
            pending.extend(node.components.iter().map(ComponentSlot::element));
        }
        self.deferred.retain(|deferred| self.nodes.contains_key(*deferred));
        Ok(())
    }

    pub fn set_name(&mut self, id: ElementId, name: Option<&str>) -> LayoutResult<()> {
        let node = self.node(id)?;
        let window = node.window;
        let name = name.map(SmolStr::new);
        if node.core.name == name {
            return Ok(());
        }
        if let Some(name) = &name {
            if self.names.contains_key(&(window, name.clone())) {
                return Err(LayoutError::DuplicateName(name.clone()));
            }
        }
        let node = self.node_mut(id)?;
        let previous = std::mem::replace(&mut node.core.name, name.clone());
        if let Some(previous) = previous {
            self.names.remove(&(window, previous));
        }
        if let Some(name) = name {
            self.names.insert((window, name), id);
        }
        Ok(())
    }

    pub fn find_by_name(&self, window: ElementId, name: &str) -> Option<ElementId> {
        self.names.get(&(window, SmolStr::new(name))).copied()
    }

    fn apply(
        &mut self,
        id: ElementId,
        f: impl FnOnce(&mut ElementCore) -> LayoutResult<bool>,
    ) -> LayoutResult<()> {
        let affects_layout = f(&mut self.node_mut(id)?.core)?;
        if affects_layout {
            self.layout_changed(id);
        }
        Ok(())
    }

    pub fn set_margin(&mut self, id: ElementId, margin: Thickness) -> LayoutResult<()> {
        self.apply(id, |core| core.set_margin(margin))
    }

    pub fn set_padding(&mut self, id: ElementId, padding: Thickness) -> LayoutResult<()> {
        self.apply(id, |core| core.set_padding(padding))
    }

    pub fn set_horizontal_alignment(
        &mut self,
        id: ElementId,
        alignment: HorizontalAlignment,
    ) -> LayoutResult<()> {
        self.apply(id, |core| Ok(core.set_horizontal_alignment(alignment)))
    }

    pub fn set_vertical_alignment(
        &mut self,
        id: ElementId,
        alignment: VerticalAlignment,
    ) -> LayoutResult<()> {
        self.apply(id, |core| Ok(core.set_vertical_alignment(alignment)))
    }

    pub fn set_horizontal_content_alignment(
        &mut self,
        id: ElementId,
        alignment: HorizontalAlignment,
    ) -> LayoutResult<()> {
        self.apply(id, |core| Ok(core.set_horizontal_content_alignment(alignment)))
    }

    pub fn set_vertical_content_alignment(
        &mut self,
        id: ElementId,
        alignment: VerticalAlignment,
    ) -> LayoutResult<()> {
        self.apply(id, |core| Ok(core.set_vertical_content_alignment(alignment)))
    }

    pub fn set_min_width(&mut self, id: ElementId, value: Option<i32>) -> LayoutResult<()> {
        self.apply(id, |core| core.set_min_width(value))
    }

    pub fn set_min_height(&mut self, id: ElementId, value: Option<i32>) -> LayoutResult<()> {
        self.apply(id, |core| core.set_min_height(value))
    }

    pub fn set_max_width(&mut self, id: ElementId, value: Option<i32>) -> LayoutResult<()> {
        self.apply(id, |core| core.set_max_width(value))
    }

    pub fn set_max_height(&mut self, id: ElementId, value: Option<i32>) -> LayoutResult<()> {
        self.apply(id, |core| core.set_max_height(value))
    }

    pub fn set_preferred_width(&mut self, id: ElementId, value: Option<i32>) -> LayoutResult<()> {
        self.apply(id, |core| core.set_preferred_width(value))
    }

    pub fn set_preferred_height(&mut self, id: ElementId, value: Option<i32>) -> LayoutResult<()> {
        self.apply(id, |core| core.set_preferred_height(value))
    }

    pub fn set_visibility(&mut self, id: ElementId, visibility: Visibility) -> LayoutResult<()> {
        self.apply(id, |core| Ok(core.set_visibility(visibility)))
    }

    pub fn set_opacity(&mut self, id: ElementId, opacity: f32) -> LayoutResult<()> {
        self.apply(id, |core| core.set_opacity(opacity))
    }

    pub fn set_enabled(&mut self, id: ElementId, enabled: bool) -> LayoutResult<()> {
        self.node_mut(id)?.core.is_enabled = enabled;
        Ok(())
    }

    pub fn set_selected(&mut self, id: ElementId, selected: bool) -> LayoutResult<()> {
        self.node_mut(id)?.core.is_selected = selected;
        Ok(())
    }

    pub fn set_hit_test_visible(&mut self, id: ElementId, visible: bool) -> LayoutResult<()> {
        self.node_mut(id)?.core.is_hit_test_visible = visible;
        Ok(())
    }

    pub fn set_can_handle_inputs_while_hidden(
        &mut self,
        id: ElementId,
        value: bool,
    ) -> LayoutResult<()> {
        self.node_mut(id)?.core.can_handle_inputs_while_hidden = value;
        Ok(())
    }

    pub fn set_clip_to_bounds(&mut self, id: ElementId, clip: bool) -> LayoutResult<()> {
        self.node_mut(id)?.core.clip_to_bounds = clip;
        Ok(())
    }

    pub fn set_can_consume_space_in_single_dimension(
        &mut self,
        id: ElementId,
        value: bool,
    ) -> LayoutResult<()> {
        self.apply(id, |core| Ok(core.set_can_consume_space_in_single_dimension(value)))
    }

    pub fn set_background(&mut self, id: ElementId, background: VisualStateBrush) -> LayoutResult<()> {
        self.node_mut(id)?.core.set_background(background);
        Ok(())
    }

    pub fn set_render_scale(
        &mut self,
        id: ElementId,
        scale: Option<ConditionalScale>,
    ) -> LayoutResult<()> {
        self.node_mut(id)?.core.set_render_scale(scale);
        Ok(())
    }

    fn ancestors_or_self(&self, id: ElementId) -> impl Iterator<Item = &ElementCore> + '_ {
        std::iter::successors(Some(id), move |&current| self.parent(current))
            .filter_map(move |current| self.core(current))
    }

    pub fn derived_is_enabled(&self, id: ElementId) -> bool {
        self.contains(id) && self.ancestors_or_self(id).all(|core| core.is_enabled)
    }

    pub fn derived_is_selected(&self, id: ElementId) -> bool {
        self.ancestors_or_self(id).any(|core| core.is_selected)
    }

    pub fn derived_is_hit_test_visible(&self, id: ElementId) -> bool {
        self.contains(id) && self.ancestors_or_self(id).all(|core| core.is_hit_test_visible)
    }

    /// Hit-test visible, and either visible or hidden but opted in to input.
    pub fn is_hit_test_visible(&self, id: ElementId) -> bool {
        self.core(id).is_some_and(|core| {
            core.is_hit_test_visible
                && match core.visibility() {
                    Visibility::Visible => true,
                    Visibility::Hidden => core.can_handle_inputs_while_hidden,
                    Visibility::Collapsed => false,
                }
        })
    }

    pub fn is_layout_valid(&self, id: ElementId) -> bool {
        self.core(id).is_some_and(ElementCore::is_layout_valid)
    }

    /// Marks `source` dirty and propagates to every ancestor. Inside an
    /// [`initialize`](Self::initialize) scope only `source` is marked and the
    /// walk is deferred to the end of the scope.
    pub fn layout_changed(&mut self, source: ElementId) {
        if self.defer_depth > 0 {
            if let Some(node) = self.nodes.get_mut(source) {
                node.core.invalidate();
                self.deferred.push(source);
            }
            return;
        }
        self.propagate_invalidation(&[source], source);
    }

    fn propagate_invalidation(&mut self, sources: &[ElementId], reported_source: ElementId) {
        let mut visited = FxHashSet::default();
        for &source in sources {
            let mut current = Some(source);
            while let Some(id) = current {
                if !visited.insert(id) {
                    break;
                }
                let Some(node) = self.nodes.get_mut(id) else {
                    break;
                };
                node.core.invalidate();
                current = node.parent;
                if self.config.record_layout_events {
                    self.events.push(LayoutEvent::Invalidated {
                        element: id,
                        source: reported_source,
                    });
                }
            }
        }
        debug!(source = ?reported_source, invalidated = visited.len(), "layout invalidated");
    }

    /// Runs `build` with invalidation deferred. One propagation runs when the
    /// outermost scope ends, and only if something was invalidated.
    pub fn initialize<R>(&mut self, id: ElementId, build: impl FnOnce(&mut Self) -> R) -> R {
        self.defer_depth += 1;
        let result = build(self);
        self.defer_depth -= 1;
        if self.defer_depth == 0 && !self.deferred.is_empty() {
            let mut sources = std::mem::take(&mut self.deferred);
            sources.push(id);
            debug!(?id, deferred = sources.len() - 1, "flushing deferred invalidation");
            self.propagate_invalidation(&sources, id);
        }
        result
    }

    pub fn is_deferring_invalidation(&self) -> bool {
        self.defer_depth > 0
    }

    pub(crate) fn push_event(&mut self, event: LayoutEvent) {
        if self.config.record_layout_events {
            self.events.push(event);
        }
    }

    pub fn drain_layout_events(&mut self) -> Vec<LayoutEvent> {
        std::mem::take(&mut self.events)
    }

    /// Shifts every derived bound in the subtree rooted at `id` without
    /// re-measuring. Used when a window moves.
    pub fn translate_layout(&mut self, id: ElementId, offset: Point) {
        if offset == Point::ZERO {
            return;
        }
        let subtree: Vec<ElementId> = self
            .traverse(id, super::TraversalOptions::everything())
            .collect();
        for element in subtree {
            let Some(node) = self.nodes.get_mut(element) else {
                continue;
            };
            let previous = node.core.bounds.layout;
            node.core.bounds = node.core.bounds.translated(offset);
            let current = node.core.bounds.layout;
            if previous != current {
                self.push_event(LayoutEvent::BoundsChanged {
                    element,
                    previous,
                    current,
                });
            }
        }
    }

    pub(crate) fn set_bounds(&mut self, id: ElementId, bounds: LayoutBounds) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        let previous = node.core.bounds.layout;
        node.core.bounds = bounds;
        node.core.is_layout_valid = true;
        node.core.has_been_arranged = true;
        self.push_event(LayoutEvent::Arranged { element: id });
        if previous != bounds.layout {
            self.push_event(LayoutEvent::BoundsChanged {
                element: id,
                previous,
                current: bounds.layout,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ElementTree, LayoutEvent};
    use crate::error::LayoutError;
    use crate::style::{Point, Rect, Thickness, Visibility};
    use crate::ui::TreeConfig;
    use crate::view::{ComponentSlot, ElementKind, Panel};

    fn tree() -> ElementTree {
        ElementTree::new(TreeConfig::default().with_layout_events(true))
    }

    fn invalidated(events: &[LayoutEvent]) -> Vec<super::ElementId> {
        events
            .iter()
            .filter_map(|event| match event {
                LayoutEvent::Invalidated { element, .. } => Some(*element),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn margin_change_invalidates_every_ancestor() {
        let mut tree = tree();
        let window = tree.create_window();
        let middle = tree.create(window, ElementKind::Panel, Panel::container()).expect("middle");
        let leaf = tree.create(window, ElementKind::Panel, Panel::leaf()).expect("leaf");
        tree.attach_child(window, middle).expect("attach middle");
        tree.attach_child(middle, leaf).expect("attach leaf");
        tree.update_layout(window, Rect::new(0, 0, 100, 100));
        assert!(tree.is_layout_valid(leaf) && tree.is_layout_valid(window));
        tree.drain_layout_events();

        tree.set_margin(leaf, Thickness::uniform(3)).expect("margin");
        assert!(!tree.is_layout_valid(leaf));
        assert!(!tree.is_layout_valid(middle));
        assert!(!tree.is_layout_valid(window));
        assert_eq!(invalidated(&tree.drain_layout_events()), vec![leaf, middle, window]);

        tree.set_margin(leaf, Thickness::uniform(3)).expect("same margin");
        assert!(invalidated(&tree.drain_layout_events()).is_empty());
    }

    #[test]
    fn bulk_initialization_propagates_once() {
        let mut tree = tree();
        let window = tree.create_window();
        let panel = tree.create(window, ElementKind::Panel, Panel::container()).expect("panel");
        tree.attach_child(window, panel).expect("attach");
        tree.drain_layout_events();

        tree.initialize(panel, |tree| {
            for i in 0..5 {
                let child = tree.create(window, ElementKind::Panel, Panel::leaf()).expect("child");
                tree.set_margin(child, Thickness::uniform(i)).expect("margin");
                tree.attach_child(panel, child).expect("attach child");
            }
            tree.initialize(panel, |tree| {
                tree.set_padding(panel, Thickness::uniform(2)).expect("padding");
            });
            assert!(tree.drain_layout_events().is_empty());
        });

        let events = tree.drain_layout_events();
        let window_hits = invalidated(&events).iter().filter(|&&id| id == window).count();
        assert_eq!(window_hits, 1);
        assert!(events.iter().all(|event| matches!(
            event,
            LayoutEvent::Invalidated { source, .. } if *source == panel
        )));
        assert!(!tree.is_layout_valid(window));
    }

    #[test]
    fn empty_initialization_scope_fires_nothing() {
        let mut tree = tree();
        let window = tree.create_window();
        tree.drain_layout_events();
        tree.initialize(window, |_| {});
        assert!(tree.drain_layout_events().is_empty());
    }

    #[test]
    fn attach_rejects_cycles_and_second_parents() {
        let mut tree = tree();
        let window = tree.create_window();
        let a = tree.create(window, ElementKind::Panel, Panel::container()).expect("a");
        let b = tree.create(window, ElementKind::Panel, Panel::container()).expect("b");
        tree.attach_child(window, a).expect("attach a");
        tree.attach_child(a, b).expect("attach b");

        assert_eq!(
            tree.attach_child(window, b),
            Err(LayoutError::AlreadyParented { child: b })
        );
        tree.detach_child(window, a).expect("detach a");
        assert_eq!(tree.attach_child(b, a), Err(LayoutError::Cycle { parent: b, child: a }));
        assert!(tree.children(b).is_empty());
    }

    #[test]
    fn leaf_widgets_do_not_host_content() {
        let mut tree = tree();
        let window = tree.create_window();
        let leaf = tree.create(window, ElementKind::Panel, Panel::leaf()).expect("leaf");
        let other = tree.create(window, ElementKind::Panel, Panel::leaf()).expect("other");
        assert_eq!(
            tree.attach_child(leaf, other),
            Err(LayoutError::ContentNotSupported(leaf))
        );
        assert_eq!(tree.parent(other), None);
    }

    #[test]
    fn elements_cannot_cross_windows() {
        let mut tree = tree();
        let first = tree.create_window();
        let second = tree.create_window();
        let child = tree.create(second, ElementKind::Panel, Panel::leaf()).expect("child");
        assert!(matches!(
            tree.attach_child(first, child),
            Err(LayoutError::ForeignWindow { .. })
        ));
        assert!(matches!(
            tree.attach_child(first, second),
            Err(LayoutError::Cycle { .. })
        ));
    }

    #[test]
    fn names_are_unique_per_window() {
        let mut tree = tree();
        let first = tree.create_window();
        let second = tree.create_window();
        let a = tree.create(first, ElementKind::Panel, Panel::leaf()).expect("a");
        let b = tree.create(first, ElementKind::Panel, Panel::leaf()).expect("b");
        let c = tree.create(second, ElementKind::Panel, Panel::leaf()).expect("c");

        tree.set_name(a, Some("ok")).expect("name a");
        assert_eq!(
            tree.set_name(b, Some("ok")),
            Err(LayoutError::DuplicateName("ok".into()))
        );
        tree.set_name(c, Some("ok")).expect("other window");
        assert_eq!(tree.find_by_name(first, "ok"), Some(a));
        assert_eq!(tree.find_by_name(second, "ok"), Some(c));

        tree.set_name(a, None).expect("clear");
        tree.set_name(b, Some("ok")).expect("reuse");
        assert_eq!(tree.find_by_name(first, "ok"), Some(b));
    }

    #[test]
    fn components_are_fixed_after_first_arrange() {
        let mut tree = tree();
        let window = tree.create_window();
        let owner = tree.create(window, ElementKind::Panel, Panel::leaf()).expect("owner");
        let early = tree.create(window, ElementKind::Panel, Panel::leaf()).expect("early");
        let late = tree.create(window, ElementKind::Panel, Panel::leaf()).expect("late");
        tree.add_component(owner, ComponentSlot::new(early)).expect("early component");
        assert_eq!(tree.component_parent(early), Some(owner));
        assert_eq!(tree.parent(early), Some(owner));
        assert!(tree.children(owner).is_empty());

        tree.update_layout(owner, Rect::new(0, 0, 10, 10));
        assert_eq!(
            tree.add_component(owner, ComponentSlot::new(late)),
            Err(LayoutError::ComponentAfterLayout(owner))
        );
    }

    #[test]
    fn remove_drops_subtree_and_names() {
        let mut tree = tree();
        let window = tree.create_window();
        let panel = tree.create(window, ElementKind::Panel, Panel::container()).expect("panel");
        let leaf = tree.create(window, ElementKind::Panel, Panel::leaf()).expect("leaf");
        let part = tree.create(window, ElementKind::Panel, Panel::leaf()).expect("part");
        tree.attach_child(window, panel).expect("attach");
        tree.attach_child(panel, leaf).expect("attach leaf");
        tree.add_component(panel, ComponentSlot::overlay(part)).expect("component");
        tree.set_name(leaf, Some("leaf")).expect("name");

        tree.remove(panel).expect("remove");
        assert!(!tree.contains(panel) && !tree.contains(leaf) && !tree.contains(part));
        assert!(tree.children(window).is_empty());
        assert_eq!(tree.find_by_name(window, "leaf"), None);
        assert!(matches!(tree.remove(panel), Err(LayoutError::UnknownElement(_))));
    }

    #[test]
    fn derived_flags_follow_ancestors() {
        let mut tree = tree();
        let window = tree.create_window();
        let child = tree.create(window, ElementKind::Panel, Panel::leaf()).expect("child");
        tree.attach_child(window, child).expect("attach");

        tree.set_enabled(window, false).expect("disable");
        tree.set_selected(window, true).expect("select");
        assert!(!tree.derived_is_enabled(child));
        assert!(tree.derived_is_selected(child));

        tree.set_visibility(child, Visibility::Hidden).expect("hide");
        assert!(!tree.is_hit_test_visible(child));
        tree.set_can_handle_inputs_while_hidden(child, true).expect("opt in");
        assert!(tree.is_hit_test_visible(child));
    }

    #[test]
    fn invalid_setter_leaves_tree_untouched() {
        let mut tree = tree();
        let window = tree.create_window();
        tree.update_layout(window, Rect::new(0, 0, 10, 10));
        tree.drain_layout_events();
        assert!(tree.set_preferred_height(window, Some(-4)).is_err());
        assert!(tree.set_opacity(window, f32::NAN).is_err());
        assert!(tree.is_layout_valid(window));
        assert!(tree.drain_layout_events().is_empty());
    }

    #[test]
    fn translate_layout_shifts_subtree() {
        let mut tree = tree();
        let window = tree.create_window();
        let child = tree.create(window, ElementKind::Panel, Panel::leaf()).expect("child");
        tree.attach_child(window, child).expect("attach");
        tree.set_margin(child, Thickness::uniform(5)).expect("margin");
        tree.update_layout(window, Rect::new(0, 0, 50, 50));
        let before = tree.core(child).map(|core| core.layout_bounds());
        tree.drain_layout_events();

        tree.translate_layout(window, Point::new(10, -4));
        let after = tree.core(child).map(|core| core.layout_bounds());
        assert_eq!(before, Some(Rect::new(5, 5, 40, 40)));
        assert_eq!(after, Some(Rect::new(15, 1, 40, 40)));
        assert!(tree.is_layout_valid(child));
        assert_eq!(tree.drain_layout_events().len(), 2);
    }
}
