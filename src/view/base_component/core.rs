use smol_str::SmolStr;

use super::{MeasurementCache, SelfMeasurement};
use crate::error::{LayoutError, LayoutResult};
use crate::style::{
    HorizontalAlignment, Point, Rect, Size, Thickness, VerticalAlignment, Visibility,
    VisualStateBrush,
};
use crate::ui::{ConditionalScale, VisualState};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Window,
    Panel,
    Border,
    StackPanel,
    TextBlock,
    RadioButton,
    RadioButtonBubble,
    TabControl,
    TabHeader,
    Custom(SmolStr),
}

/// Bounds produced by the most recent arrange pass, outermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutBounds {
    pub allocated: Rect,
    pub render: Rect,
    pub layout: Rect,
    pub stretched_content: Rect,
    pub aligned_content: Rect,
}

impl LayoutBounds {
    pub const EMPTY: LayoutBounds = LayoutBounds {
        allocated: Rect::EMPTY,
        render: Rect::EMPTY,
        layout: Rect::EMPTY,
        stretched_content: Rect::EMPTY,
        aligned_content: Rect::EMPTY,
    };

    pub fn translated(self, offset: Point) -> Self {
        Self {
            allocated: self.allocated.translated(offset),
            render: self.render.translated(offset),
            layout: self.layout.translated(offset),
            stretched_content: self.stretched_content.translated(offset),
            aligned_content: self.aligned_content.translated(offset),
        }
    }
}

/// Per-element state shared by every widget. Setters report whether the
/// change affects layout; the tree turns that into an invalidation.
#[derive(Debug, Clone)]
pub struct ElementCore {
    pub(crate) kind: ElementKind,
    pub(crate) name: Option<SmolStr>,

    margin: Thickness,
    padding: Thickness,
    horizontal_alignment: HorizontalAlignment,
    vertical_alignment: VerticalAlignment,
    horizontal_content_alignment: HorizontalAlignment,
    vertical_content_alignment: VerticalAlignment,
    min_width: Option<i32>,
    min_height: Option<i32>,
    max_width: Option<i32>,
    max_height: Option<i32>,
    preferred_width: Option<i32>,
    preferred_height: Option<i32>,
    visibility: Visibility,
    opacity: f32,

    pub(crate) is_enabled: bool,
    pub(crate) is_selected: bool,
    pub(crate) is_hit_test_visible: bool,
    pub(crate) can_handle_inputs_while_hidden: bool,
    pub(crate) clip_to_bounds: bool,
    can_consume_space_in_single_dimension: bool,
    pub(crate) background: VisualStateBrush,
    pub(crate) render_scale: Option<ConditionalScale>,

    pub(crate) visual_state: VisualState,
    pub(crate) bounds_offset: Point,
    pub(crate) recent_draw_was_clipped: bool,
    pub(crate) can_receive_mouse_input: bool,
    pub(crate) is_hovered: bool,

    pub(crate) bounds: LayoutBounds,
    pub(crate) is_layout_valid: bool,
    pub(crate) has_been_arranged: bool,
    pub(crate) self_measurements: MeasurementCache,
    pub(crate) full_measurements: MeasurementCache,
}

impl ElementCore {
    pub fn new(kind: ElementKind, background: VisualStateBrush) -> Self {
        Self {
            kind,
            name: None,
            margin: Thickness::ZERO,
            padding: Thickness::ZERO,
            horizontal_alignment: HorizontalAlignment::Stretch,
            vertical_alignment: VerticalAlignment::Stretch,
            horizontal_content_alignment: HorizontalAlignment::Stretch,
            vertical_content_alignment: VerticalAlignment::Stretch,
            min_width: None,
            min_height: None,
            max_width: None,
            max_height: None,
            preferred_width: None,
            preferred_height: None,
            visibility: Visibility::Visible,
            opacity: 1.0,
            is_enabled: true,
            is_selected: false,
            is_hit_test_visible: true,
            can_handle_inputs_while_hidden: false,
            clip_to_bounds: false,
            can_consume_space_in_single_dimension: false,
            background,
            render_scale: None,
            visual_state: VisualState::default(),
            bounds_offset: Point::ZERO,
            recent_draw_was_clipped: false,
            can_receive_mouse_input: false,
            is_hovered: false,
            bounds: LayoutBounds::EMPTY,
            is_layout_valid: false,
            has_been_arranged: false,
            self_measurements: MeasurementCache::new(),
            full_measurements: MeasurementCache::new(),
        }
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn margin(&self) -> Thickness {
        self.margin
    }

    pub fn padding(&self) -> Thickness {
        self.padding
    }

    pub fn horizontal_alignment(&self) -> HorizontalAlignment {
        self.horizontal_alignment
    }

    pub fn vertical_alignment(&self) -> VerticalAlignment {
        self.vertical_alignment
    }

    pub fn horizontal_content_alignment(&self) -> HorizontalAlignment {
        self.horizontal_content_alignment
    }

    pub fn vertical_content_alignment(&self) -> VerticalAlignment {
        self.vertical_content_alignment
    }

    pub fn min_width(&self) -> Option<i32> {
        self.min_width
    }

    pub fn min_height(&self) -> Option<i32> {
        self.min_height
    }

    pub fn max_width(&self) -> Option<i32> {
        self.max_width
    }

    pub fn max_height(&self) -> Option<i32> {
        self.max_height
    }

    pub fn preferred_width(&self) -> Option<i32> {
        self.preferred_width
    }

    pub fn preferred_height(&self) -> Option<i32> {
        self.preferred_height
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn is_enabled(&self) -> bool {
        self.is_enabled
    }

    pub fn is_selected(&self) -> bool {
        self.is_selected
    }

    pub fn can_handle_inputs_while_hidden(&self) -> bool {
        self.can_handle_inputs_while_hidden
    }

    pub fn clip_to_bounds(&self) -> bool {
        self.clip_to_bounds
    }

    pub fn can_consume_space_in_single_dimension(&self) -> bool {
        self.can_consume_space_in_single_dimension
    }

    pub fn background(&self) -> &VisualStateBrush {
        &self.background
    }

    pub fn render_scale(&self) -> Option<ConditionalScale> {
        self.render_scale
    }

    pub fn visual_state(&self) -> VisualState {
        self.visual_state
    }

    pub fn bounds_offset(&self) -> Point {
        self.bounds_offset
    }

    pub fn recent_draw_was_clipped(&self) -> bool {
        self.recent_draw_was_clipped
    }

    pub fn can_receive_mouse_input(&self) -> bool {
        self.can_receive_mouse_input
    }

    pub fn is_hovered(&self) -> bool {
        self.is_hovered
    }

    pub fn bounds(&self) -> &LayoutBounds {
        &self.bounds
    }

    pub fn allocated_bounds(&self) -> Rect {
        self.bounds.allocated
    }

    pub fn render_bounds(&self) -> Rect {
        self.bounds.render
    }

    pub fn layout_bounds(&self) -> Rect {
        self.bounds.layout
    }

    /// Layout bounds shifted by the offset recorded on the last update.
    pub fn actual_layout_bounds(&self) -> Rect {
        self.bounds.layout.translated(self.bounds_offset)
    }

    pub fn stretched_content_bounds(&self) -> Rect {
        self.bounds.stretched_content
    }

    pub fn aligned_content_bounds(&self) -> Rect {
        self.bounds.aligned_content
    }

    pub fn is_layout_valid(&self) -> bool {
        self.is_layout_valid
    }

    pub fn margin_size(&self) -> Size {
        self.margin.size()
    }

    pub fn padding_size(&self) -> Size {
        self.padding.size()
    }

    /// Min width/height with margin included. Unset dimensions are zero.
    pub fn min_size_including_margin(&self) -> Size {
        Size::new(
            self.min_width.unwrap_or(0).saturating_add(self.margin.width()),
            self.min_height.unwrap_or(0).saturating_add(self.margin.height()),
        )
    }

    /// Max width/height with margin included. Unset dimensions are unbounded.
    pub fn max_size_including_margin(&self) -> Size {
        Size::new(
            self.max_width
                .map_or(i32::MAX, |w| w.saturating_add(self.margin.width())),
            self.max_height
                .map_or(i32::MAX, |h| h.saturating_add(self.margin.height())),
        )
    }

    pub(crate) fn invalidate(&mut self) {
        self.is_layout_valid = false;
        self.self_measurements.clear();
        self.full_measurements.clear();
    }

    pub fn set_margin(&mut self, margin: Thickness) -> LayoutResult<bool> {
        check_thickness("margin", margin)?;
        Ok(replace(&mut self.margin, margin))
    }

    pub fn set_padding(&mut self, padding: Thickness) -> LayoutResult<bool> {
        check_thickness("padding", padding)?;
        Ok(replace(&mut self.padding, padding))
    }

    pub fn set_horizontal_alignment(&mut self, alignment: HorizontalAlignment) -> bool {
        replace(&mut self.horizontal_alignment, alignment)
    }

    pub fn set_vertical_alignment(&mut self, alignment: VerticalAlignment) -> bool {
        replace(&mut self.vertical_alignment, alignment)
    }

    pub fn set_horizontal_content_alignment(&mut self, alignment: HorizontalAlignment) -> bool {
        replace(&mut self.horizontal_content_alignment, alignment)
    }

    pub fn set_vertical_content_alignment(&mut self, alignment: VerticalAlignment) -> bool {
        replace(&mut self.vertical_content_alignment, alignment)
    }

    pub fn set_min_width(&mut self, value: Option<i32>) -> LayoutResult<bool> {
        check_range("min_width", value, self.max_width, true)?;
        Ok(replace(&mut self.min_width, value))
    }

    pub fn set_min_height(&mut self, value: Option<i32>) -> LayoutResult<bool> {
        check_range("min_height", value, self.max_height, true)?;
        Ok(replace(&mut self.min_height, value))
    }

    pub fn set_max_width(&mut self, value: Option<i32>) -> LayoutResult<bool> {
        check_range("max_width", value, self.min_width, false)?;
        Ok(replace(&mut self.max_width, value))
    }

    pub fn set_max_height(&mut self, value: Option<i32>) -> LayoutResult<bool> {
        check_range("max_height", value, self.min_height, false)?;
        Ok(replace(&mut self.max_height, value))
    }

    pub fn set_preferred_width(&mut self, value: Option<i32>) -> LayoutResult<bool> {
        check_non_negative("preferred_width", value)?;
        Ok(replace(&mut self.preferred_width, value))
    }

    pub fn set_preferred_height(&mut self, value: Option<i32>) -> LayoutResult<bool> {
        check_non_negative("preferred_height", value)?;
        Ok(replace(&mut self.preferred_height, value))
    }

    /// Only transitions into or out of `Collapsed` change layout.
    pub fn set_visibility(&mut self, visibility: Visibility) -> bool {
        let previous = self.visibility;
        self.visibility = visibility;
        previous != visibility
            && (previous == Visibility::Collapsed || visibility == Visibility::Collapsed)
    }

    pub fn set_opacity(&mut self, opacity: f32) -> LayoutResult<bool> {
        if !opacity.is_finite() {
            return Err(LayoutError::InvalidOpacity(opacity));
        }
        self.opacity = opacity;
        Ok(false)
    }

    pub fn set_can_consume_space_in_single_dimension(&mut self, value: bool) -> bool {
        replace(&mut self.can_consume_space_in_single_dimension, value)
    }

    pub fn set_background(&mut self, background: VisualStateBrush) {
        self.background = background;
    }

    pub fn set_render_scale(&mut self, scale: Option<ConditionalScale>) {
        self.render_scale = scale;
    }

    /// Applies margin, padding and min/max/preferred constraints to a raw
    /// measurement. Used by the full measurement pass.
    pub(crate) fn constrain(&self, full: Thickness, available: Size) -> Thickness {
        let mut full = full;
        if let Some(width) = self.preferred_width {
            let width = width.saturating_add(self.margin.width()).max(0);
            full = full.clamp(Size::new(width, 0), Size::new(width, i32::MAX));
        }
        if let Some(height) = self.preferred_height {
            let height = height.saturating_add(self.margin.height()).max(0);
            full = full.clamp(Size::new(0, height), Size::new(i32::MAX, height));
        }
        let min = self.min_size_including_margin();
        let max = self.max_size_including_margin();
        full = full.clamp(min, max);
        full = full.clamp(Size::ZERO, available.zero_or_greater());

        if (full.width() <= 0 || full.height() <= 0) && !self.can_consume_space_in_single_dimension {
            return Thickness::ZERO;
        }
        full
    }

    /// Baseline self measurement: margin plus padding plus the widget's own
    /// footprint. Components are added by the tree.
    pub(crate) fn baseline(&self, intrinsic: SelfMeasurement) -> SelfMeasurement {
        SelfMeasurement::new(self.margin.add(self.padding).add(intrinsic.size), intrinsic.shared)
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

fn check_thickness(property: &'static str, value: Thickness) -> LayoutResult<()> {
    let smallest = value.left.min(value.top).min(value.right).min(value.bottom);
    if smallest < 0 {
        return Err(LayoutError::NegativeSize {
            property,
            value: smallest,
        });
    }
    Ok(())
}

fn check_non_negative(property: &'static str, value: Option<i32>) -> LayoutResult<()> {
    match value {
        Some(value) if value < 0 => Err(LayoutError::NegativeSize { property, value }),
        _ => Ok(()),
    }
}

fn check_range(
    property: &'static str,
    value: Option<i32>,
    other: Option<i32>,
    value_is_min: bool,
) -> LayoutResult<()> {
    check_non_negative(property, value)?;
    if let (Some(value), Some(other)) = (value, other) {
        let (min, max) = if value_is_min { (value, other) } else { (other, value) };
        if min > max {
            return Err(LayoutError::MinExceedsMax { property, min, max });
        }
    }
    Ok(())
}
