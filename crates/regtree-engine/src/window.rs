//! Virtual window computation and scroll coalescing.
//!
//! Above the virtualization threshold only a window of rows around the
//! viewport is rendered; two spacers stand in for everything before and
//! after it so scrollbar geometry stays truthful without off-screen rows.
//!
//! Scroll events arrive far faster than re-rendering is worthwhile, so they
//! run through [`ScrollCoalescer`]: latest-wins, at most one pending
//! offset, drained once per animation frame by the host.

use crate::config::ViewConfig;

/// How the current row count is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Every visible row is materialized as nested markup.
    Full,
    /// Only the window around the viewport is materialized as flat rows.
    Virtual,
}

/// Pick the render mode for a flattened row count.
#[must_use]
pub fn mode_for(total_rows: usize, config: &ViewConfig) -> RenderMode {
    if total_rows > config.virtualization_threshold {
        RenderMode::Virtual
    } else {
        RenderMode::Full
    }
}

/// A contiguous slice of flat rows plus the spacer geometry around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Window {
    /// First rendered row index (inclusive).
    pub start: usize,
    /// One past the last rendered row index.
    pub end: usize,
    /// Pixel height standing in for rows before `start`.
    pub spacer_top: u32,
    /// Pixel height standing in for rows after `end`.
    pub spacer_bottom: u32,
}

impl Window {
    /// Compute the window for the given scroll offset and viewport height.
    ///
    /// The window covers the rows intersecting the viewport plus the
    /// configured overscan on both ends, clamped to the row list.
    #[must_use]
    pub fn compute(
        scroll_top: u32,
        viewport_height: u32,
        total_rows: usize,
        config: &ViewConfig,
    ) -> Self {
        if total_rows == 0 {
            return Self::default();
        }

        let row_height = config.row_height.max(1);
        let first_visible = (scroll_top / row_height) as usize;
        let visible_rows = viewport_height.div_ceil(row_height) as usize + 1;

        let start = first_visible.saturating_sub(config.overscan).min(total_rows);
        let end = (first_visible + visible_rows + config.overscan).min(total_rows);

        Self {
            start,
            end,
            spacer_top: start as u32 * row_height,
            spacer_bottom: (total_rows - end) as u32 * row_height,
        }
    }

    /// Number of rows the window materializes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether moving from `self` to `next` justifies a re-render.
    ///
    /// Small shifts are absorbed by the overscan margin; only a move past
    /// the slack threshold on either edge re-renders.
    #[must_use]
    pub fn differs_beyond_slack(&self, next: &Window, slack: usize) -> bool {
        self.start.abs_diff(next.start) > slack || self.end.abs_diff(next.end) > slack
    }
}

/// Latest-wins scroll debouncer.
///
/// Mirrors animation-frame scheduling: `push` records the newest offset,
/// replacing any not-yet-drained one (cancel-and-reschedule), and the host
/// drains with `take` when its frame fires. At most one offset is ever
/// pending.
#[derive(Debug, Clone, Default)]
pub struct ScrollCoalescer {
    pending: Option<u32>,
}

impl ScrollCoalescer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a scroll offset; returns `true` when it replaced a pending one.
    pub fn push(&mut self, scroll_top: u32) -> bool {
        let replaced = self.pending.is_some();
        self.pending = Some(scroll_top);
        replaced
    }

    /// Drain the pending offset, if any.
    pub fn take(&mut self) -> Option<u32> {
        self.pending.take()
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}
