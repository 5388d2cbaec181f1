use std::any::Any;

use trellis::style::{FillBrush, Point, Rect, Size, Thickness};
use trellis::ui::{Canvas, DrawArgs};
use trellis::view::{
    ContentArrangeable, ContentMeasurable, ElementKind, SelfMeasurable, SelfMeasurement, Widget,
};
use trellis::{ElementId, ElementTree, LayoutError, LayoutResult};

/// Fixed-pitch glyph box used to size text without a font engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonospaceMetrics {
    pub char_width: i32,
    pub line_height: i32,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self {
            char_width: 7,
            line_height: 16,
        }
    }
}

pub struct TextBlockProps {
    pub text: String,
    pub wrap: bool,
    pub metrics: MonospaceMetrics,
    /// Falls back to the theme's foreground color.
    pub foreground: Option<FillBrush>,
}

impl TextBlockProps {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            wrap: false,
            metrics: MonospaceMetrics::default(),
            foreground: None,
        }
    }

    pub fn wrapping(mut self) -> Self {
        self.wrap = true;
        self
    }
}

pub fn build_text_block(
    tree: &mut ElementTree,
    window: ElementId,
    props: TextBlockProps,
) -> LayoutResult<ElementId> {
    for (property, value) in [
        ("char width", props.metrics.char_width),
        ("line height", props.metrics.line_height),
    ] {
        if value <= 0 {
            return Err(LayoutError::NegativeSize { property, value });
        }
    }
    let foreground = props
        .foreground
        .unwrap_or_else(|| FillBrush::Solid(tree.context().theme().foreground));
    tree.create(
        window,
        ElementKind::TextBlock,
        TextBlock {
            text: props.text,
            wrap: props.wrap,
            metrics: props.metrics,
            foreground,
        },
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    text: String,
    wrap: bool,
    metrics: MonospaceMetrics,
    foreground: FillBrush,
}

impl TextBlock {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(tree: &mut ElementTree, id: ElementId, text: impl Into<String>) -> LayoutResult<()> {
        let text = text.into();
        if tree.widget::<TextBlock>(id).is_some_and(|block| block.text == text) {
            return Ok(());
        }
        tree.modify_widget::<TextBlock, _>(id, |block| block.text = text)
    }

    pub fn set_wrap(tree: &mut ElementTree, id: ElementId, wrap: bool) -> LayoutResult<()> {
        if tree.widget::<TextBlock>(id).is_some_and(|block| block.wrap == wrap) {
            return Ok(());
        }
        tree.modify_widget::<TextBlock, _>(id, |block| block.wrap = wrap)
    }

    pub fn set_foreground(tree: &mut ElementTree, id: ElementId, brush: FillBrush) -> LayoutResult<()> {
        let block = tree
            .widget_mut::<TextBlock>(id)
            .ok_or(LayoutError::WidgetTypeMismatch(id))?;
        block.foreground = brush;
        Ok(())
    }

    /// Lines as they would be laid out in `width` pixels.
    pub fn lines(&self, width: i32) -> Vec<&str> {
        let max_chars = self
            .wrap
            .then(|| (width / self.metrics.char_width).max(1) as usize);
        wrap_lines(&self.text, max_chars)
    }
}

/// Splits on newlines, then greedily on whitespace so that no line exceeds
/// `max_chars`. Words longer than a line are split mid-word.
fn wrap_lines(text: &str, max_chars: Option<usize>) -> Vec<&str> {
    let mut lines = Vec::new();
    for raw in text.split('\n') {
        let Some(max_chars) = max_chars else {
            lines.push(raw);
            continue;
        };
        let mut rest = raw;
        loop {
            let Some((cut, next)) = rest.char_indices().nth(max_chars) else {
                lines.push(rest);
                break;
            };
            let head = &rest[..cut];
            if next.is_whitespace() {
                lines.push(head.trim_end());
                rest = rest[cut..].trim_start();
            } else if let Some(space) = head.rfind(char::is_whitespace).filter(|&space| space > 0) {
                lines.push(head[..space].trim_end());
                rest = rest[space..].trim_start();
            } else {
                lines.push(head);
                rest = &rest[cut..];
            }
            if rest.is_empty() {
                break;
            }
        }
    }
    lines
}

impl SelfMeasurable for TextBlock {
    fn measure_self(&self, available: Size) -> SelfMeasurement {
        if self.text.is_empty() {
            return SelfMeasurement::ZERO;
        }
        let lines = self.lines(available.width);
        let widest = lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        let size = Size::new(
            widest as i32 * self.metrics.char_width,
            lines.len() as i32 * self.metrics.line_height,
        );
        SelfMeasurement::new(Thickness::from_size(size), Thickness::ZERO)
    }
}

impl ContentMeasurable for TextBlock {}

impl ContentArrangeable for TextBlock {}

impl Widget for TextBlock {
    fn draw_self(&self, canvas: &mut dyn Canvas, layout_bounds: Rect, args: &DrawArgs) {
        for (row, line) in self.lines(layout_bounds.width).into_iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let origin = Point::new(
                layout_bounds.x,
                layout_bounds.y + row as i32 * self.metrics.line_height,
            );
            canvas.text(origin, line, &self.foreground, args.opacity);
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
    use trellis::style::{Point, Rect, Size};
    use trellis::ui::{DrawArgs, RecordingCanvas};
    use trellis::{ElementTree, LayoutError};

    use super::{MonospaceMetrics, TextBlock, TextBlockProps, build_text_block, wrap_lines};

    #[test]
    fn wraps_on_whitespace_and_splits_long_words() {
        assert_eq!(
            wrap_lines("hello wide world", Some(7)),
            vec!["hello", "wide", "world"]
        );
        assert_eq!(wrap_lines("abcdefgh", Some(3)), vec!["abc", "def", "gh"]);
        assert_eq!(wrap_lines("ab\ncdef", None), vec!["ab", "cdef"]);
    }

    #[test]
    fn measures_the_wrapped_footprint() {
        let mut tree = ElementTree::default();
        let window = tree.create_window();
        let text = build_text_block(&mut tree, window, TextBlockProps::new("hello wide world").wrapping())
            .expect("text");
        let measured = tree.update_measurement(text, Size::new(50, 100));
        assert_eq!(measured.full_size.size(), Size::new(35, 48));

        let wide = tree.update_measurement(text, Size::new(500, 100));
        assert_eq!(wide.full_size.size(), Size::new(112, 16));
    }

    #[test]
    fn text_changes_invalidate() {
        let mut tree = ElementTree::default();
        let window = tree.create_window();
        let text = build_text_block(&mut tree, window, TextBlockProps::new("ab")).expect("text");
        tree.update_layout(text, Rect::new(0, 0, 100, 20));
        assert!(tree.is_layout_valid(text));

        TextBlock::set_text(&mut tree, text, "ab").expect("same text");
        assert!(tree.is_layout_valid(text));
        TextBlock::set_text(&mut tree, text, "abc").expect("text");
        assert!(!tree.is_layout_valid(text));
        assert_eq!(
            tree.update_measurement(text, Size::new(100, 20)).full_size.size(),
            Size::new(21, 16)
        );
    }

    #[test]
    fn draws_one_text_run_per_line() {
        let mut tree = ElementTree::default();
        let window = tree.create_window();
        let text = build_text_block(&mut tree, window, TextBlockProps::new("hello wide world").wrapping())
            .expect("text");
        tree.update_layout(text, Rect::new(10, 0, 50, 100));

        let mut canvas = RecordingCanvas::new();
        tree.draw(text, &mut canvas, DrawArgs::default());
        assert_eq!(
            canvas.texts(),
            vec![
                (Point::new(10, 0), "hello"),
                (Point::new(10, 16), "wide"),
                (Point::new(10, 32), "world"),
            ]
        );
    }

    #[test]
    fn rejects_degenerate_metrics() {
        let mut tree = ElementTree::default();
        let window = tree.create_window();
        let mut props = TextBlockProps::new("x");
        props.metrics = MonospaceMetrics {
            char_width: 0,
            line_height: 16,
        };
        assert!(matches!(
            build_text_block(&mut tree, window, props),
            Err(LayoutError::NegativeSize { property: "char width", .. })
        ));
    }
}
