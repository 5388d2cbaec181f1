use crate::style::{FillBrush, Point, Rect, Thickness};

/// Drawing surface handed to the draw pass. Brushes are opaque here; the
/// host decides how a fill or stroke turns into pixels.
pub trait Canvas {
    fn fill(&mut self, rect: Rect, brush: &FillBrush, opacity: f32);
    fn stroke(&mut self, rect: Rect, thickness: Thickness, brush: &FillBrush, opacity: f32);
    /// Draws one line of text with its top-left corner at `origin`.
    fn text(&mut self, origin: Point, text: &str, brush: &FillBrush, opacity: f32);

    /// The current clip rectangle, if clipping is active.
    fn clip(&self) -> Option<Rect>;
    /// Pushes `rect` intersected with the active clip.
    fn push_clip(&mut self, rect: Rect);
    fn pop_clip(&mut self);

    /// Scales subsequent draws by `scale` around `origin`.
    fn push_scale(&mut self, origin: Point, scale: f32);
    fn pop_scale(&mut self);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill {
        rect: Rect,
        brush: FillBrush,
        opacity: f32,
    },
    Stroke {
        rect: Rect,
        thickness: Thickness,
        brush: FillBrush,
        opacity: f32,
    },
    Text {
        origin: Point,
        text: String,
        brush: FillBrush,
        opacity: f32,
    },
    PushClip(Rect),
    PopClip,
    PushScale(f32),
    PopScale,
}

/// Canvas that records every call, with an optional root clip.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
    clips: Vec<Rect>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clip(clip: Rect) -> Self {
        Self {
            commands: Vec::new(),
            clips: vec![clip],
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn filled_rects(&self) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Fill { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<(Point, &str)> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { origin, text, .. } => Some((*origin, text.as_str())),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn fill(&mut self, rect: Rect, brush: &FillBrush, opacity: f32) {
        self.commands.push(DrawCommand::Fill {
            rect,
            brush: brush.clone(),
            opacity,
        });
    }

    fn stroke(&mut self, rect: Rect, thickness: Thickness, brush: &FillBrush, opacity: f32) {
        self.commands.push(DrawCommand::Stroke {
            rect,
            thickness,
            brush: brush.clone(),
            opacity,
        });
    }

    fn text(&mut self, origin: Point, text: &str, brush: &FillBrush, opacity: f32) {
        self.commands.push(DrawCommand::Text {
            origin,
            text: text.to_owned(),
            brush: brush.clone(),
            opacity,
        });
    }

    fn clip(&self) -> Option<Rect> {
        self.clips.last().copied()
    }

    fn push_clip(&mut self, rect: Rect) {
        let clipped = match self.clip() {
            Some(current) => intersect(current, rect),
            None => rect,
        };
        self.clips.push(clipped);
        self.commands.push(DrawCommand::PushClip(clipped));
    }

    fn pop_clip(&mut self) {
        self.clips.pop();
        self.commands.push(DrawCommand::PopClip);
    }

    fn push_scale(&mut self, _origin: Point, scale: f32) {
        self.commands.push(DrawCommand::PushScale(scale));
    }

    fn pop_scale(&mut self) {
        self.commands.push(DrawCommand::PopScale);
    }
}

fn intersect(a: Rect, b: Rect) -> Rect {
    let left = a.left().max(b.left());
    let top = a.top().max(b.top());
    let right = a.right().min(b.right());
    let bottom = a.bottom().min(b.bottom());
    Rect::from_edges(left, top, right.max(left), bottom.max(top))
}

#[cfg(test)]
mod tests {
    use super::{Canvas, DrawCommand, RecordingCanvas};
    use crate::style::{Color, FillBrush, Rect};

    #[test]
    fn nested_clips_intersect() {
        let mut canvas = RecordingCanvas::with_clip(Rect::new(0, 0, 100, 100));
        canvas.push_clip(Rect::new(50, 50, 100, 100));
        assert_eq!(canvas.clip(), Some(Rect::new(50, 50, 50, 50)));
        canvas.pop_clip();
        assert_eq!(canvas.clip(), Some(Rect::new(0, 0, 100, 100)));
    }

    #[test]
    fn records_fills_in_order() {
        let mut canvas = RecordingCanvas::new();
        let brush = FillBrush::Solid(Color::BLACK);
        canvas.fill(Rect::new(0, 0, 1, 1), &brush, 1.0);
        canvas.fill(Rect::new(1, 1, 1, 1), &brush, 0.5);
        assert_eq!(canvas.filled_rects(), vec![Rect::new(0, 0, 1, 1), Rect::new(1, 1, 1, 1)]);
        assert!(matches!(canvas.commands()[1], DrawCommand::Fill { opacity, .. } if opacity == 0.5));
    }
}
