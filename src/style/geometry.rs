use glam::IVec2;

pub type Point = IVec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const ZERO: Size = Size::new(0, 0);
    pub const MAX: Size = Size::new(i32::MAX, i32::MAX);

    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn zero_or_greater(self) -> Self {
        Self::new(self.width.max(0), self.height.max(0))
    }

    /// Subtracts `other`, never going below `min_width`/`min_height`.
    pub fn subtract(self, other: Size, min_width: i32, min_height: i32) -> Self {
        Self::new(
            (self.width.saturating_sub(other.width)).max(min_width),
            (self.height.saturating_sub(other.height)).max(min_height),
        )
    }

    pub fn fits_within(self, other: Size) -> bool {
        self.width <= other.width && self.height <= other.height
    }

    pub fn contains(self, other: Size) -> bool {
        other.fits_within(self)
    }

    pub fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const EMPTY: Rect = Rect::new(0, 0, 0, 0);

    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    pub fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    pub fn left(self) -> i32 {
        self.x
    }

    pub fn top(self) -> i32 {
        self.y
    }

    pub fn right(self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(self) -> i32 {
        self.y + self.height
    }

    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn center(self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    pub fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Collapses anything with a non-positive extent to [`Rect::EMPTY`].
    pub fn or_empty(self) -> Self {
        if self.is_empty() { Rect::EMPTY } else { self }
    }

    pub fn translated(self, offset: Point) -> Self {
        if self == Rect::EMPTY {
            return self;
        }
        Self::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }

    pub fn contains_point(self, point: Point) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    pub fn contains_rect(self, other: Rect) -> bool {
        other.left() >= self.left()
            && other.top() >= self.top()
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    pub fn intersects(self, other: Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && other.left() < self.right()
            && self.left() < other.right()
            && other.top() < self.bottom()
            && self.top() < other.bottom()
    }

    /// Insets every side by the matching side of `thickness`.
    pub fn compressed(self, thickness: Thickness) -> Self {
        Self::new(
            self.x + thickness.left,
            self.y + thickness.top,
            self.width - thickness.width(),
            self.height - thickness.height(),
        )
    }

    /// Scales around the center, rounding outward.
    pub fn scaled(self, scale: f32) -> Self {
        let center_x = self.x as f32 + self.width as f32 * 0.5;
        let center_y = self.y as f32 + self.height as f32 * 0.5;
        let half_w = self.width as f32 * scale * 0.5;
        let half_h = self.height as f32 * scale * 0.5;
        let left = (center_x - half_w).floor() as i32;
        let top = (center_y - half_h).floor() as i32;
        let right = (center_x + half_w).ceil() as i32;
        let bottom = (center_y + half_h).ceil() as i32;
        Self::from_edges(left, top, right, bottom)
    }
}

/// Four-sided inset. Also used for measured sizes, where the horizontal extent is
/// `left + right` and the vertical extent is `top + bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Thickness {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Thickness {
    pub const ZERO: Thickness = Thickness::new(0, 0, 0, 0);

    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    pub const fn symmetric(horizontal: i32, vertical: i32) -> Self {
        Self::new(horizontal, vertical, horizontal, vertical)
    }

    /// A measurement that puts the whole extent on the left/top sides.
    pub const fn from_size(size: Size) -> Self {
        Self::new(size.width, size.height, 0, 0)
    }

    pub fn width(self) -> i32 {
        self.left + self.right
    }

    pub fn height(self) -> i32 {
        self.top + self.bottom
    }

    pub fn size(self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub fn is_zero(self) -> bool {
        self == Thickness::ZERO
    }

    pub fn has_negative_side(self) -> bool {
        self.left < 0 || self.top < 0 || self.right < 0 || self.bottom < 0
    }

    pub fn add(self, other: Thickness) -> Self {
        Self::new(
            self.left + other.left,
            self.top + other.top,
            self.right + other.right,
            self.bottom + other.bottom,
        )
    }

    pub fn subtract(self, other: Thickness) -> Self {
        Self::new(
            self.left - other.left,
            self.top - other.top,
            self.right - other.right,
            self.bottom - other.bottom,
        )
    }

    pub fn max(self, other: Thickness) -> Self {
        Self::new(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }

    /// Clamps the horizontal and vertical extents into `[min, max]`.
    ///
    /// Growth is added to the right/bottom side. Shrinking takes from the
    /// right/bottom side first, then from the left/top side.
    pub fn clamp(self, min: Size, max: Size) -> Self {
        let (left, right) = clamp_axis(self.left, self.right, min.width, max.width);
        let (top, bottom) = clamp_axis(self.top, self.bottom, min.height, max.height);
        Self::new(left, top, right, bottom)
    }
}

fn clamp_axis(start: i32, end: i32, min: i32, max: i32) -> (i32, i32) {
    let extent = start.saturating_add(end);
    let target = if max < min {
        max
    } else {
        extent.clamp(min, max)
    };
    if target == extent {
        return (start, end);
    }
    if target > extent {
        return (start, end + (target - extent));
    }
    let excess = extent - target;
    let from_end = excess.min(end.max(0));
    (start - (excess - from_end), end - from_end)
}
