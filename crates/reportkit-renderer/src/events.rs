//! Event-recording sink.

use crate::sink::{Justify, Sink};

/// A single sink event, as recorded by [`EventLog`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "event", rename_all = "snake_case")
)]
pub enum SinkEvent {
    HeadStart,
    HeadEnd,
    TitleStart,
    TitleEnd,
    BodyStart,
    BodyEnd,
    SectionStart { level: u32 },
    SectionEnd { level: u32 },
    SectionTitleStart { level: u32 },
    SectionTitleEnd { level: u32 },
    Anchor { name: String },
    TableStart,
    TableEnd,
    TableRowsStart { justification: Vec<Justify>, grid: bool },
    TableRowsEnd,
    TableRowStart,
    TableRowEnd,
    TableHeaderCellStart,
    TableHeaderCellEnd,
    TableCellStart,
    TableCellEnd,
    TableCaptionStart,
    TableCaptionEnd,
    ParagraphStart,
    ParagraphEnd,
    LinkStart { href: String },
    LinkEnd,
    VerbatimStart { boxed: bool },
    VerbatimEnd,
    Text { text: String },
    RawText { text: String },
    Flush,
    Close,
}

/// Sink that records every event in order.
///
/// Useful for inspecting exactly what a report emits, and as a machine-readable
/// output format when serialized.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<SinkEvent>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far.
    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    /// Consume the log and return the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<SinkEvent> {
        self.events
    }

    fn push(&mut self, event: SinkEvent) {
        self.events.push(event);
    }
}

impl Sink for EventLog {
    fn head_start(&mut self) {
        self.push(SinkEvent::HeadStart);
    }

    fn head_end(&mut self) {
        self.push(SinkEvent::HeadEnd);
    }

    fn title_start(&mut self) {
        self.push(SinkEvent::TitleStart);
    }

    fn title_end(&mut self) {
        self.push(SinkEvent::TitleEnd);
    }

    fn body_start(&mut self) {
        self.push(SinkEvent::BodyStart);
    }

    fn body_end(&mut self) {
        self.push(SinkEvent::BodyEnd);
    }

    fn section_start(&mut self, level: u32) {
        self.push(SinkEvent::SectionStart { level });
    }

    fn section_end(&mut self, level: u32) {
        self.push(SinkEvent::SectionEnd { level });
    }

    fn section_title_start(&mut self, level: u32) {
        self.push(SinkEvent::SectionTitleStart { level });
    }

    fn section_title_end(&mut self, level: u32) {
        self.push(SinkEvent::SectionTitleEnd { level });
    }

    fn anchor(&mut self, name: &str) {
        self.push(SinkEvent::Anchor {
            name: name.to_owned(),
        });
    }

    fn table_start(&mut self) {
        self.push(SinkEvent::TableStart);
    }

    fn table_end(&mut self) {
        self.push(SinkEvent::TableEnd);
    }

    fn table_rows_start(&mut self, justification: &[Justify], grid: bool) {
        self.push(SinkEvent::TableRowsStart {
            justification: justification.to_vec(),
            grid,
        });
    }

    fn table_rows_end(&mut self) {
        self.push(SinkEvent::TableRowsEnd);
    }

    fn table_row_start(&mut self) {
        self.push(SinkEvent::TableRowStart);
    }

    fn table_row_end(&mut self) {
        self.push(SinkEvent::TableRowEnd);
    }

    fn table_header_cell_start(&mut self) {
        self.push(SinkEvent::TableHeaderCellStart);
    }

    fn table_header_cell_end(&mut self) {
        self.push(SinkEvent::TableHeaderCellEnd);
    }

    fn table_cell_start(&mut self) {
        self.push(SinkEvent::TableCellStart);
    }

    fn table_cell_end(&mut self) {
        self.push(SinkEvent::TableCellEnd);
    }

    fn table_caption_start(&mut self) {
        self.push(SinkEvent::TableCaptionStart);
    }

    fn table_caption_end(&mut self) {
        self.push(SinkEvent::TableCaptionEnd);
    }

    fn paragraph_start(&mut self) {
        self.push(SinkEvent::ParagraphStart);
    }

    fn paragraph_end(&mut self) {
        self.push(SinkEvent::ParagraphEnd);
    }

    fn link_start(&mut self, href: &str) {
        self.push(SinkEvent::LinkStart {
            href: href.to_owned(),
        });
    }

    fn link_end(&mut self) {
        self.push(SinkEvent::LinkEnd);
    }

    fn verbatim_start(&mut self, boxed: bool) {
        self.push(SinkEvent::VerbatimStart { boxed });
    }

    fn verbatim_end(&mut self) {
        self.push(SinkEvent::VerbatimEnd);
    }

    fn text(&mut self, text: &str) {
        self.push(SinkEvent::Text {
            text: text.to_owned(),
        });
    }

    fn raw_text(&mut self, text: &str) {
        self.push(SinkEvent::RawText {
            text: text.to_owned(),
        });
    }

    fn flush(&mut self) {
        self.push(SinkEvent::Flush);
    }

    fn close(&mut self) {
        self.push(SinkEvent::Close);
    }
}
