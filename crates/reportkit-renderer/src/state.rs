//! Shared helpers for sinks: table tracking, escaping and anchor encoding.

use crate::sink::Justify;

/// State for tracking table cell alignment.
#[derive(Default)]
pub(crate) struct TableState {
    /// Column justifications for the current table.
    justification: Vec<Justify>,
    /// Current column index in the table row.
    cell_index: usize,
}

impl TableState {
    /// Start a new row block with column justifications.
    pub(crate) fn start(&mut self, justification: &[Justify]) {
        self.justification = justification.to_vec();
        self.cell_index = 0;
    }

    /// Start a new table row.
    pub(crate) fn start_row(&mut self) {
        self.cell_index = 0;
    }

    /// Move to the next cell.
    pub(crate) fn next_cell(&mut self) {
        self.cell_index += 1;
    }

    /// Get the alignment style for the current cell.
    ///
    /// Columns beyond the configured list reuse the last justification.
    pub(crate) fn current_alignment_style(&self) -> &'static str {
        let justify = self
            .justification
            .get(self.cell_index)
            .or_else(|| self.justification.last());
        match justify {
            Some(Justify::Center) => r#" style="text-align:center""#,
            Some(Justify::Right) => r#" style="text-align:right""#,
            Some(Justify::Left) => r#" style="text-align:left""#,
            None => "",
        }
    }
}

/// Encode an anchor name as an HTML id.
///
/// Keeps ASCII letters, digits, `-`, `_`, `.` and `:`; every run of other
/// characters becomes a single `_`. Runs at either end are dropped rather than
/// replaced, so `"  What's New? "` becomes `What_s_New`. Distinct names can
/// still share an id (`"A B"` and `"A_B"` both give `A_B`).
#[must_use]
pub fn encode_anchor(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut pending_sep = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':') {
            if pending_sep {
                result.push('_');
                pending_sep = false;
            }
            result.push(c);
        } else if !result.is_empty() {
            pending_sep = true;
        }
    }

    result
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
