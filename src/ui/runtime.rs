use std::time::Duration;

use tracing::{debug, warn};

use super::{Canvas, DrawArgs, UpdateArgs};
use crate::error::{LayoutError, LayoutResult};
use crate::style::{Point, Rect};
use crate::view::{ElementId, ElementTree};

/// What a single [`FrameDriver::frame`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    pub arranged: bool,
    pub frame_elapsed: Duration,
}

/// Drives one root window: arrange when needed, then update, then draw.
#[derive(Debug, Clone)]
pub struct FrameDriver {
    root: ElementId,
    viewport: Rect,
    arranged_viewport: Option<Rect>,
    total_elapsed: Duration,
    stats: FrameStats,
}

impl FrameDriver {
    pub fn new(root: ElementId, viewport: Rect) -> Self {
        Self {
            root,
            viewport,
            arranged_viewport: None,
            total_elapsed: Duration::ZERO,
            stats: FrameStats::default(),
        }
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Resizes or moves the viewport. The next frame re-arranges the root.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    /// Moves the window to `position` by shifting the arranged bounds of the
    /// whole subtree. Nothing is re-measured.
    pub fn move_to(&mut self, tree: &mut ElementTree, position: Point) {
        let offset = position - Point::new(self.viewport.x, self.viewport.y);
        if offset == Point::ZERO {
            return;
        }
        self.viewport = self.viewport.translated(offset);
        if let Some(arranged) = self.arranged_viewport {
            tree.translate_layout(self.root, offset);
            self.arranged_viewport = Some(arranged.translated(offset));
        }
        debug!(root = ?self.root, ?offset, "window moved");
    }

    /// Arranges the root if its layout is dirty or the viewport changed since
    /// the last arrange. Returns whether an arrange pass ran.
    pub fn layout(&mut self, tree: &mut ElementTree) -> LayoutResult<bool> {
        if !tree.contains(self.root) {
            return Err(LayoutError::UnknownElement(self.root));
        }
        if tree.is_layout_valid(self.root) && self.arranged_viewport == Some(self.viewport) {
            return Ok(false);
        }
        tree.update_layout(self.root, self.viewport);
        self.arranged_viewport = Some(self.viewport);
        debug!(root = ?self.root, viewport = ?self.viewport, "arranged");
        Ok(true)
    }

    /// Runs a full frame. `total_elapsed` is expected to grow monotonically;
    /// a value that goes backwards yields a zero frame time.
    pub fn frame(
        &mut self,
        tree: &mut ElementTree,
        canvas: &mut dyn Canvas,
        total_elapsed: Duration,
    ) -> LayoutResult<FrameReport> {
        let arranged = self.layout(tree)?;

        let frame_elapsed = total_elapsed
            .checked_sub(self.total_elapsed)
            .unwrap_or_else(|| {
                warn!(
                    previous = ?self.total_elapsed,
                    current = ?total_elapsed,
                    "frame time went backwards"
                );
                Duration::ZERO
            });
        self.total_elapsed = self.total_elapsed.max(total_elapsed);

        tree.update(self.root, UpdateArgs::new(self.total_elapsed, frame_elapsed));
        tree.draw(self.root, canvas, DrawArgs::default());
        self.stats.record_frame(self.total_elapsed, frame_elapsed);

        Ok(FrameReport {
            arranged,
            frame_elapsed,
        })
    }
}

/// Rolling frame-time summary, logged about once per second of frame time.
#[derive(Debug, Clone, Copy, Default)]
struct FrameStats {
    last_report_at: Duration,
    frames: u32,
    total_frame_time: Duration,
}

impl FrameStats {
    fn record_frame(&mut self, now: Duration, frame_time: Duration) {
        self.frames += 1;
        self.total_frame_time += frame_time;

        let elapsed = now.saturating_sub(self.last_report_at);
        if elapsed < Duration::from_secs(1) {
            return;
        }

        let secs = elapsed.as_secs_f64().max(f64::EPSILON);
        let fps = f64::from(self.frames) / secs;
        let avg_ms = self.total_frame_time.as_secs_f64() * 1000.0 / f64::from(self.frames);
        debug!(fps, avg_ms, frames = self.frames, "frame stats");

        self.last_report_at = now;
        self.frames = 0;
        self.total_frame_time = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::FrameDriver;
    use crate::error::LayoutError;
    use crate::style::{Point, Rect, Thickness};
    use crate::ui::RecordingCanvas;
    use crate::view::{ElementKind, ElementTree, Panel};

    /// Set `RUST_LOG=trellis=trace` to see frame and layout logs.
    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    #[test]
    fn arranges_only_when_dirty_or_resized() {
        init_tracing();
        let mut tree = ElementTree::default();
        let window = tree.create_window();
        let mut driver = FrameDriver::new(window, Rect::new(0, 0, 100, 50));
        let mut canvas = RecordingCanvas::new();

        let first = driver
            .frame(&mut tree, &mut canvas, Duration::from_millis(16))
            .expect("frame");
        assert!(first.arranged);
        let second = driver
            .frame(&mut tree, &mut canvas, Duration::from_millis(32))
            .expect("frame");
        assert!(!second.arranged);
        assert_eq!(second.frame_elapsed, Duration::from_millis(16));

        tree.set_padding(window, Thickness::uniform(2)).expect("padding");
        assert!(driver.layout(&mut tree).expect("layout"));

        driver.set_viewport(Rect::new(0, 0, 200, 50));
        assert!(driver.layout(&mut tree).expect("layout"));
        assert_eq!(
            tree.core(window).expect("core").layout_bounds(),
            Rect::new(0, 0, 200, 50)
        );
    }

    #[test]
    fn backwards_time_yields_zero_frame_time() {
        init_tracing();
        let mut tree = ElementTree::default();
        let window = tree.create_window();
        let mut driver = FrameDriver::new(window, Rect::new(0, 0, 10, 10));
        let mut canvas = RecordingCanvas::new();
        driver
            .frame(&mut tree, &mut canvas, Duration::from_millis(50))
            .expect("frame");
        let report = driver
            .frame(&mut tree, &mut canvas, Duration::from_millis(20))
            .expect("frame");
        assert_eq!(report.frame_elapsed, Duration::ZERO);
    }

    #[test]
    fn moving_translates_without_rearranging() {
        let mut tree = ElementTree::default();
        let window = tree.create_window();
        let child = tree
            .create(window, ElementKind::Panel, Panel::leaf())
            .expect("child");
        tree.attach_child(window, child).expect("attach");
        tree.set_margin(child, Thickness::uniform(5)).expect("margin");
        let mut driver = FrameDriver::new(window, Rect::new(0, 0, 40, 40));
        driver.layout(&mut tree).expect("layout");

        driver.move_to(&mut tree, Point::new(100, 10));
        assert_eq!(driver.viewport(), Rect::new(100, 10, 40, 40));
        assert_eq!(
            tree.core(child).expect("core").layout_bounds(),
            Rect::new(105, 15, 30, 30)
        );
        assert!(!driver.layout(&mut tree).expect("layout"));
    }

    #[test]
    fn removed_root_is_reported() {
        let mut tree = ElementTree::default();
        let window = tree.create_window();
        let mut driver = FrameDriver::new(window, Rect::new(0, 0, 10, 10));
        tree.remove(window).expect("remove");
        assert_eq!(
            driver.layout(&mut tree),
            Err(LayoutError::UnknownElement(window))
        );
    }
}
