//! Section nesting tracker.

use crate::error::RenderError;
use crate::segments;
use crate::sink::Sink;

/// Current section nesting depth of one report render.
///
/// Starts at 0. [`open`](Self::open) and [`close`](Self::close) emit the section
/// structure and keep it balanced.
#[derive(Debug, Default)]
pub struct SectionDepth {
    depth: u32,
}

impl SectionDepth {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current depth; 0 outside any section.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Open a titled section one level deeper than the current one.
    pub fn open(&mut self, sink: &mut dyn Sink, name: &str, anchor: &str) {
        self.depth += 1;
        let level = self.depth;
        sink.section_start(level);
        sink.anchor(anchor);
        sink.section_title_start(level);
        segments::text(sink, name);
        sink.section_title_end(level);
    }

    /// Close the innermost open section.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnbalancedSection`] if no section is open. Nothing
    /// is emitted in that case.
    pub fn close(&mut self, sink: &mut dyn Sink) -> Result<(), RenderError> {
        if self.depth == 0 {
            return Err(RenderError::UnbalancedSection);
        }
        sink.section_end(self.depth);
        self.depth -= 1;
        Ok(())
    }
}
