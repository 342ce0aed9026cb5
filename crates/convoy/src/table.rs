use std::io::Write;

use unicode_width::UnicodeWidthStr;

use convoy_protocol::Container;

use crate::color;

const HEADERS: [&str; 9] = [
    "handle", "worker", "pipeline", "job", "build #", "build id", "type", "name", "attempt",
];

/// Shown for an absent pipeline, job, build name or build id.
const NONE: &str = "none";
/// Shown for an absent attempt.
const NOT_APPLICABLE: &str = "n/a";

struct Cell {
    text: String,
    placeholder: bool,
}

impl Cell {
    fn value(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            placeholder: false,
        }
    }

    fn or_placeholder(value: Option<String>, placeholder: &str) -> Self {
        match value {
            Some(text) => Self::value(text),
            None => Self {
                text: placeholder.to_string(),
                placeholder: true,
            },
        }
    }
}

fn row_cells(container: &Container) -> [Cell; 9] {
    [
        Cell::value(container.id.as_str()),
        Cell::value(container.worker_name.as_str()),
        Cell::or_placeholder(container.pipeline_name.clone(), NONE),
        Cell::or_placeholder(container.job_name.clone(), NONE),
        Cell::or_placeholder(container.build_name.clone(), NONE),
        Cell::or_placeholder(container.build_id.map(|id| id.to_string()), NONE),
        Cell::value(container.container_type.to_string()),
        Cell::value(container.display_name().unwrap_or("")),
        Cell::or_placeholder(container.attempt.clone(), NOT_APPLICABLE),
    ]
}

/// Order rows for the human table: ascending by handle. The sort is
/// stable, so rows with equal handles keep their listing order.
pub fn sort_rows(containers: &mut [Container]) {
    containers.sort_by(|a, b| a.id.cmp(&b.id));
}

pub struct ContainerTableFormatter {
    widths: [usize; 9],
}

impl ContainerTableFormatter {
    pub fn new(containers: &[Container]) -> Self {
        // Minimum widths = header label lengths
        let mut widths = HEADERS.map(display_width);
        for container in containers {
            for (width, cell) in widths.iter_mut().zip(row_cells(container).iter()) {
                *width = (*width).max(display_width(&cell.text));
            }
        }
        Self { widths }
    }

    /// Write the bordered table, rows in the order given.
    pub fn write_table<W: Write>(
        &self,
        containers: &[Container],
        out: &mut W,
    ) -> std::io::Result<()> {
        writeln!(out, "{}", self.border('┌', '┬', '┐'))?;
        writeln!(out, "{}", self.header_row())?;
        writeln!(out, "{}", self.border('├', '┼', '┤'))?;
        for container in containers {
            writeln!(out, "{}", self.row(container))?;
        }
        writeln!(out, "{}", self.border('└', '┴', '┘'))?;
        Ok(())
    }

    fn header_row(&self) -> String {
        let cells: Vec<String> = HEADERS
            .iter()
            .zip(self.widths)
            .map(|(label, width)| color::bold(&pad(label, width)))
            .collect();
        self.join(&cells)
    }

    fn row(&self, container: &Container) -> String {
        let cells: Vec<String> = row_cells(container)
            .iter()
            .zip(self.widths)
            .enumerate()
            .map(|(column, (cell, width))| {
                let padded = pad(&cell.text, width);
                if cell.placeholder {
                    color::muted(&padded)
                } else if column == 0 {
                    color::accent(&padded)
                } else {
                    padded
                }
            })
            .collect();
        self.join(&cells)
    }

    fn join(&self, cells: &[String]) -> String {
        let sep = color::muted("│");
        let mut line = sep.clone();
        for cell in cells {
            line.push(' ');
            line.push_str(cell);
            line.push(' ');
            line.push_str(&sep);
        }
        line
    }

    fn border(&self, left: char, mid: char, right: char) -> String {
        let segments: Vec<String> = self.widths.iter().map(|w| "─".repeat(w + 2)).collect();
        color::muted(&format!(
            "{}{}{}",
            left,
            segments.join(mid.to_string().as_str()),
            right
        ))
    }
}

/// Compute the terminal display width of a string.
///
/// Wide characters (CJK, emoji) count as 2 columns.
pub(crate) fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Pad a string to a minimum display width without truncating.
pub(crate) fn pad(s: &str, min_width: usize) -> String {
    let width = display_width(s);
    if width >= min_width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(min_width - width))
    }
}
