use std::any::Any;

use tracing::debug;

use trellis::style::{
    HorizontalAlignment, Orientation, Rect, Size, Thickness, VerticalAlignment, apply_alignment,
};
use trellis::view::{
    ComponentSlot, ContentArrangeable, ContentMeasurable, DrawOrder, ElementKind, Panel,
    SelfMeasurable, Sides, UpdateOrder, Widget,
};
use trellis::{ElementId, ElementTree, LayoutError, LayoutResult};

use crate::border::{BorderProps, build_border, build_border_as};
use crate::stack_panel::{StackPanelProps, build_stack_panel};

const SELECTED_HEADER_PADDING: Thickness = Thickness::new(8, 5, 8, 5);
const UNSELECTED_HEADER_PADDING: Thickness = Thickness::new(8, 3, 8, 3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TabStripPlacement {
    Left,
    #[default]
    Top,
}

/// Per-placement settings of the header strip.
struct StripLayout {
    orientation: Orientation,
    strip_vertical_alignment: VerticalAlignment,
    header_thickness: Thickness,
    consumes: Sides,
    width_shared: bool,
    height_shared: bool,
    arrange: (HorizontalAlignment, VerticalAlignment),
}

impl StripLayout {
    fn for_placement(placement: TabStripPlacement) -> Self {
        match placement {
            TabStripPlacement::Left => Self {
                orientation: Orientation::Vertical,
                strip_vertical_alignment: VerticalAlignment::Top,
                header_thickness: Thickness::new(1, 1, 0, 1),
                consumes: Sides::all(),
                width_shared: false,
                height_shared: true,
                arrange: (HorizontalAlignment::Left, VerticalAlignment::Stretch),
            },
            TabStripPlacement::Top => Self {
                orientation: Orientation::Horizontal,
                strip_vertical_alignment: VerticalAlignment::Bottom,
                header_thickness: Thickness::new(1, 1, 1, 0),
                consumes: Sides::LEFT | Sides::TOP,
                width_shared: true,
                height_shared: false,
                arrange: (HorizontalAlignment::Stretch, VerticalAlignment::Top),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TabControlProps {
    pub placement: TabStripPlacement,
}

/// Creates a tab control. The header strip is a component whose extent along
/// the strip overlaps the content; a one-pixel frame component wraps the
/// content area.
pub fn build_tab_control(
    tree: &mut ElementTree,
    window: ElementId,
    props: TabControlProps,
) -> LayoutResult<ElementId> {
    let strip = StripLayout::for_placement(props.placement);
    let headers = build_stack_panel(tree, window, StackPanelProps::new(strip.orientation))?;
    let frame = build_border(tree, window, BorderProps::new(Thickness::uniform(1)))?;
    let control = tree.create(
        window,
        ElementKind::TabControl,
        TabControl {
            placement: props.placement,
            headers,
            frame,
            tabs: Vec::new(),
            selected: None,
        },
    )?;

    let (horizontal, vertical) = strip.arrange;
    tree.initialize(control, |tree| {
        tree.set_vertical_alignment(headers, strip.strip_vertical_alignment)?;
        tree.set_horizontal_content_alignment(headers, HorizontalAlignment::Left)?;
        tree.add_component(
            control,
            ComponentSlot::new(headers)
                .consumes(strip.consumes)
                .share_width(strip.width_shared)
                .share_height(strip.height_shared)
                .update_order(UpdateOrder::BeforeContents)
                .draw_order(DrawOrder::AfterContents)
                .arrange_with(move |bounds, requested| {
                    apply_alignment(bounds, horizontal, vertical, requested.size())
                }),
        )?;
        tree.add_component(control, ComponentSlot::new(frame))?;
        tree.set_padding(control, Thickness::uniform(12))
    })?;
    Ok(control)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tab {
    /// Header wrapper inside the header strip; owns the header content.
    pub header: ElementId,
    pub content: ElementId,
}

/// Shows the content of the selected tab as its only content child.
#[derive(Debug, Clone, PartialEq)]
pub struct TabControl {
    placement: TabStripPlacement,
    headers: ElementId,
    frame: ElementId,
    tabs: Vec<Tab>,
    selected: Option<usize>,
}

fn tab_control(tree: &ElementTree, control: ElementId) -> LayoutResult<&TabControl> {
    tree.widget::<TabControl>(control)
        .ok_or(LayoutError::WidgetTypeMismatch(control))
}

fn tab_control_mut(tree: &mut ElementTree, control: ElementId) -> LayoutResult<&mut TabControl> {
    tree.widget_mut::<TabControl>(control)
        .ok_or(LayoutError::WidgetTypeMismatch(control))
}

/// Content must exist, be unparented and live in the control's window before
/// anything is changed. Returns that window.
fn check_free_content(
    tree: &ElementTree,
    control: ElementId,
    content: ElementId,
) -> LayoutResult<ElementId> {
    let window = tree.window_of(control).ok_or(LayoutError::UnknownElement(control))?;
    if !tree.contains(content) {
        return Err(LayoutError::UnknownElement(content));
    }
    if tree.parent(content).is_some() {
        return Err(LayoutError::AlreadyParented { child: content });
    }
    if tree.window_of(content) != Some(window) {
        return Err(LayoutError::ForeignWindow {
            parent: control,
            child: content,
        });
    }
    Ok(window)
}

/// Hands `header_content` back unparented and destroys a header that never
/// made it into the strip.
fn discard_header(tree: &mut ElementTree, header: ElementId, header_content: ElementId) -> LayoutResult<()> {
    if tree.parent(header_content) == Some(header) {
        tree.detach_child(header, header_content)?;
    }
    tree.remove(header)
}

impl TabControl {
    pub fn placement(&self) -> TabStripPlacement {
        self.placement
    }

    pub fn headers_panel(&self) -> ElementId {
        self.headers
    }

    pub fn frame(&self) -> ElementId {
        self.frame
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_tab(&self) -> Option<Tab> {
        self.selected.and_then(|index| self.tabs.get(index).copied())
    }

    /// Appends a tab and returns its index. The first tab added is selected.
    pub fn add_tab(
        tree: &mut ElementTree,
        control: ElementId,
        header_content: ElementId,
        content: ElementId,
    ) -> LayoutResult<usize> {
        let (placement, headers) = {
            let widget = tab_control(tree, control)?;
            (widget.placement, widget.headers)
        };
        let window = check_free_content(tree, control, content)?;

        let strip = StripLayout::for_placement(placement);
        let header = build_border_as(
            tree,
            window,
            ElementKind::TabHeader,
            BorderProps::new(strip.header_thickness),
        )?;
        let attached = tree.initialize(header, |tree| {
            tree.set_padding(header, UNSELECTED_HEADER_PADDING)?;
            tree.set_vertical_alignment(header, VerticalAlignment::Bottom)?;
            tree.attach_child(header, header_content)?;
            tree.attach_child(headers, header)
        });
        if let Err(err) = attached {
            discard_header(tree, header, header_content)?;
            return Err(err);
        }

        let widget = tab_control_mut(tree, control)?;
        widget.tabs.push(Tab { header, content });
        let index = widget.tabs.len() - 1;
        let select_first = widget.selected.is_none();
        if select_first {
            TabControl::select_tab(tree, control, index)?;
        }
        Ok(index)
    }

    /// Makes `index` the visible tab. Returns false if it is out of range or
    /// already selected.
    pub fn select_tab(tree: &mut ElementTree, control: ElementId, index: usize) -> LayoutResult<bool> {
        let (previous, next) = {
            let widget = tab_control(tree, control)?;
            match widget.tabs.get(index) {
                Some(&next) if widget.selected != Some(index) => (widget.selected_tab(), next),
                _ => return Ok(false),
            }
        };
        check_free_content(tree, control, next.content)?;
        if !tree.contains(next.header) {
            return Err(LayoutError::UnknownElement(next.header));
        }

        tree.initialize(control, |tree| {
            if let Some(previous) = previous {
                tree.detach_child(control, previous.content)?;
                tree.set_selected(previous.header, false)?;
                tree.set_padding(previous.header, UNSELECTED_HEADER_PADDING)?;
            }
            tree.attach_child(control, next.content)?;
            tree.set_selected(next.header, true)?;
            tree.set_padding(next.header, SELECTED_HEADER_PADDING)
        })?;
        tab_control_mut(tree, control)?.selected = Some(index);
        debug!(?control, index, "tab selected");
        Ok(true)
    }

    /// Moves the selection off `index` to its right or left neighbor,
    /// wrapping around. Does nothing unless `index` is selected and another
    /// tab exists.
    pub fn deselect_tab(
        tree: &mut ElementTree,
        control: ElementId,
        index: usize,
        focus_right: bool,
    ) -> LayoutResult<bool> {
        let count = {
            let widget = tab_control(tree, control)?;
            if widget.selected != Some(index) || widget.tabs.len() <= 1 {
                return Ok(false);
            }
            widget.tabs.len()
        };
        let neighbor = if focus_right {
            (index + 1) % count
        } else {
            (index + count - 1) % count
        };
        TabControl::select_tab(tree, control, neighbor)
    }

    /// Removes a tab, destroying its header. The content is detached and
    /// returned to the caller. Removing the selected tab selects its left
    /// neighbor.
    pub fn remove_tab(
        tree: &mut ElementTree,
        control: ElementId,
        index: usize,
    ) -> LayoutResult<Option<ElementId>> {
        let (tab, was_selected) = {
            let widget = tab_control(tree, control)?;
            match widget.tabs.get(index) {
                Some(&tab) => (tab, widget.selected == Some(index)),
                None => return Ok(None),
            }
        };

        if was_selected {
            tree.detach_child(control, tab.content)?;
        }
        tree.remove(tab.header)?;

        let widget = tab_control_mut(tree, control)?;
        widget.tabs.remove(index);
        widget.selected = match widget.selected {
            Some(selected) if selected == index => None,
            Some(selected) if selected > index => Some(selected - 1),
            other => other,
        };
        let remaining = widget.tabs.len();
        if was_selected && remaining > 0 {
            TabControl::select_tab(tree, control, index.saturating_sub(1))?;
        }
        Ok(Some(tab.content))
    }
}

impl SelfMeasurable for TabControl {}

impl ContentMeasurable for TabControl {
    fn measure_content(&self, tree: &mut ElementTree, children: &[ElementId], available: Size) -> Thickness {
        Panel::container().measure_content(tree, children, available)
    }
}

impl ContentArrangeable for TabControl {
    fn arrange_content(&self, tree: &mut ElementTree, children: &[ElementId], bounds: Rect) {
        Panel::container().arrange_content(tree, children, bounds);
    }
}

impl Widget for TabControl {
    fn hosts_content(&self) -> bool {
        true
    }

    /// The header strip stays transparent; only the framed content area is filled.
    fn background_bounds(&self, tree: &ElementTree, layout_bounds: Rect) -> Rect {
        tree.core(self.frame)
            .map(|frame| frame.layout_bounds())
            .filter(|frame| !frame.is_empty())
            .unwrap_or(layout_bounds)
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
    use trellis::style::{Color, FillBrush, Rect, VisualStateBrush};
    use trellis::ui::{DrawArgs, DrawCommand, PrimaryVisualState, RecordingCanvas};
    use trellis::view::{ElementKind, Panel};
    use trellis::{ElementId, ElementTree, LayoutError};

    use super::{TabControl, TabControlProps, TabStripPlacement, build_tab_control};
    use crate::{TextBlockProps, build_text_block};

    struct Fixture {
        tree: ElementTree,
        control: ElementId,
        contents: Vec<ElementId>,
    }

    fn fixture(placement: TabStripPlacement, labels: &[&str]) -> Fixture {
        let mut tree = ElementTree::default();
        let window = tree.create_window();
        let control = build_tab_control(&mut tree, window, TabControlProps { placement })
            .expect("tab control");
        tree.attach_child(window, control).expect("attach");
        let mut contents = Vec::new();
        for label in labels {
            let header = build_text_block(&mut tree, window, TextBlockProps::new(*label)).expect("header");
            let content = tree.create(window, ElementKind::Panel, Panel::leaf()).expect("content");
            tree.set_preferred_width(content, Some(100)).expect("width");
            tree.set_preferred_height(content, Some(50)).expect("height");
            TabControl::add_tab(&mut tree, control, header, content).expect("tab");
            contents.push(content);
        }
        Fixture {
            tree,
            control,
            contents,
        }
    }

    fn layout(tree: &ElementTree, id: ElementId) -> Rect {
        tree.core(id).expect("core").layout_bounds()
    }

    #[test]
    fn top_strip_shares_width_and_pushes_content_down() {
        let Fixture {
            mut tree,
            control,
            contents,
        } = fixture(TabStripPlacement::Top, &["One", "Two"]);
        let widget = tree.widget::<TabControl>(control).expect("widget").clone();

        let measured = tree.update_measurement(control, trellis::style::Size::new(300, 200));
        assert_eq!(measured.full_size.size(), trellis::style::Size::new(126, 103));

        tree.update_layout(control, Rect::new(0, 0, 300, 200));
        assert_eq!(layout(&tree, widget.headers_panel()), Rect::new(0, 0, 300, 27));
        assert_eq!(layout(&tree, widget.tabs()[1].header), Rect::new(39, 4, 39, 23));
        assert_eq!(layout(&tree, widget.frame()), Rect::new(0, 27, 300, 173));
        assert_eq!(layout(&tree, contents[0]), Rect::new(13, 40, 274, 147));
    }

    #[test]
    fn left_strip_shares_height_and_pushes_content_right() {
        let Fixture {
            mut tree,
            control,
            contents,
        } = fixture(TabStripPlacement::Left, &["One", "Two"]);
        let headers = tree.widget::<TabControl>(control).expect("widget").headers_panel();

        tree.update_layout(control, Rect::new(0, 0, 300, 200));
        assert_eq!(layout(&tree, headers), Rect::new(0, 0, 38, 52));
        assert_eq!(layout(&tree, contents[0]), Rect::new(51, 13, 236, 174));
    }

    #[test]
    fn selection_swaps_the_content_child() {
        let Fixture {
            mut tree,
            control,
            contents,
        } = fixture(TabStripPlacement::Top, &["a", "b", "c"]);
        assert_eq!(tree.children(control), &[contents[0]]);

        assert!(TabControl::select_tab(&mut tree, control, 2).expect("select"));
        assert!(!TabControl::select_tab(&mut tree, control, 2).expect("same"));
        assert!(!TabControl::select_tab(&mut tree, control, 9).expect("out of range"));
        assert_eq!(tree.children(control), &[contents[2]]);

        let widget = tree.widget::<TabControl>(control).expect("widget").clone();
        assert!(tree.core(widget.tabs()[2].header).expect("header").is_selected());
        assert!(!tree.core(widget.tabs()[0].header).expect("header").is_selected());

        assert!(TabControl::deselect_tab(&mut tree, control, 2, true).expect("wrap"));
        assert_eq!(
            tree.widget::<TabControl>(control).expect("widget").selected_index(),
            Some(0)
        );
    }

    #[test]
    fn removing_the_selected_tab_selects_its_left_neighbor() {
        let Fixture {
            mut tree,
            control,
            contents,
        } = fixture(TabStripPlacement::Top, &["a", "b", "c"]);
        TabControl::select_tab(&mut tree, control, 1).expect("select");
        let header = tree.widget::<TabControl>(control).expect("widget").tabs()[1].header;

        let removed = TabControl::remove_tab(&mut tree, control, 1).expect("remove");
        assert_eq!(removed, Some(contents[1]));
        assert_eq!(tree.parent(contents[1]), None);
        assert!(!tree.contains(header));
        assert_eq!(tree.children(control), &[contents[0]]);
        assert_eq!(
            tree.widget::<TabControl>(control).expect("widget").tabs().len(),
            2
        );
        assert_eq!(TabControl::remove_tab(&mut tree, control, 5).expect("missing"), None);
    }

    #[test]
    fn selecting_a_parented_content_changes_nothing() {
        let Fixture {
            mut tree,
            control,
            contents,
        } = fixture(TabStripPlacement::Top, &["a", "b"]);
        let window = tree.window_of(control).expect("window");
        let elsewhere = tree.create(window, ElementKind::Panel, Panel::container()).expect("panel");
        tree.attach_child(elsewhere, contents[1]).expect("steal");

        assert_eq!(
            TabControl::select_tab(&mut tree, control, 1),
            Err(LayoutError::AlreadyParented { child: contents[1] })
        );
        let widget = tree.widget::<TabControl>(control).expect("widget").clone();
        assert_eq!(widget.selected_index(), Some(0));
        assert_eq!(tree.children(control), &[contents[0]]);
        assert!(tree.core(widget.tabs()[0].header).expect("header").is_selected());

        tree.detach_child(elsewhere, contents[1]).expect("return");
        assert!(TabControl::select_tab(&mut tree, control, 1).expect("select"));
        assert_eq!(TabControl::remove_tab(&mut tree, control, 0).expect("remove"), Some(contents[0]));
    }

    #[test]
    fn failed_add_releases_the_header_content() {
        let Fixture {
            mut tree,
            control,
            contents,
        } = fixture(TabStripPlacement::Top, &["a"]);
        let window = tree.window_of(control).expect("window");
        let headers = tree.widget::<TabControl>(control).expect("widget").headers_panel();
        tree.remove(headers).expect("remove strip");

        let label = tree.create(window, ElementKind::Panel, Panel::leaf()).expect("label");
        let content = tree.create(window, ElementKind::Panel, Panel::leaf()).expect("content");
        let before = tree.len();
        assert_eq!(
            TabControl::add_tab(&mut tree, control, label, content),
            Err(LayoutError::UnknownElement(headers))
        );
        assert_eq!(tree.len(), before);
        assert_eq!(tree.parent(label), None);
        assert_eq!(tree.parent(content), None);
        assert_eq!(
            tree.widget::<TabControl>(control).expect("widget").tabs().len(),
            1
        );
        assert_eq!(tree.children(control), &[contents[0]]);
    }

    #[test]
    fn background_fills_only_the_content_area() {
        let Fixture {
            mut tree, control, ..
        } = fixture(TabStripPlacement::Top, &["One", "Two"]);
        let brush = FillBrush::Solid(Color::rgb(1, 2, 3));
        tree.set_background(control, VisualStateBrush::solid(Color::rgb(1, 2, 3)))
            .expect("background");
        tree.update_layout(control, Rect::new(0, 0, 300, 200));

        let mut canvas = RecordingCanvas::new();
        tree.draw(control, &mut canvas, DrawArgs::default());
        let filled: Vec<Rect> = canvas
            .commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Fill { rect, brush: fill, .. } if *fill == brush => Some(*rect),
                _ => None,
            })
            .collect();
        assert_eq!(filled, vec![Rect::new(0, 27, 300, 173)]);
    }

    #[test]
    fn selected_header_draws_in_selected_state() {
        let Fixture {
            mut tree, control, ..
        } = fixture(TabStripPlacement::Top, &["a", "b"]);
        let widget = tree.widget::<TabControl>(control).expect("widget").clone();
        let window = tree.window_of(control).expect("window");
        tree.update_layout(window, Rect::new(0, 0, 200, 100));
        tree.update(window, trellis::ui::UpdateArgs::new(Default::default(), Default::default()));

        let state = |id| tree.core(id).expect("core").visual_state().primary;
        assert_eq!(state(widget.tabs()[0].header), PrimaryVisualState::Selected);
        assert_eq!(state(widget.tabs()[1].header), PrimaryVisualState::Normal);
    }
}
