use std::error::Error;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Row, Table};

use crate::models::{Record, COLUMN_TITLES};

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// A fixed-height popup of `height` rows, horizontally centered.
pub(crate) fn centered_strip(percent_x: u16, height: u16, area: Rect) -> Rect {
    let column = centered_rect(percent_x, 100, area);
    let height = height.min(column.height);
    Rect {
        x: column.x,
        y: column.y + (column.height - height) / 2,
        width: column.width,
        height,
    }
}

/// Flatten an error and its sources into one status-bar line.
pub(crate) fn surface_error(err: &(dyn Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Table widget with the four record columns.
pub(crate) fn records_table(records: &[Record]) -> Table<'static> {
    let header = Row::new(COLUMN_TITLES).style(Style::default().add_modifier(Modifier::BOLD));
    let rows = records.iter().map(|record| Row::new(record.cells()));

    Table::new(
        rows,
        [
            Constraint::Percentage(28),
            Constraint::Percentage(24),
            Constraint::Percentage(24),
            Constraint::Percentage(24),
        ],
    )
    .header(header)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;

    #[test]
    fn surface_error_includes_sources() {
        let err = StoreError::Write {
            path: "people.parquet".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(surface_error(&err), "failed to write people.parquet: denied");
    }

    #[test]
    fn strip_is_centered_and_clamped() {
        let area = Rect::new(0, 0, 100, 10);
        let strip = centered_strip(50, 3, area);
        assert_eq!(strip.height, 3);
        assert_eq!(strip.y, 3);
        assert_eq!(centered_strip(50, 40, area).height, 10);
    }
}
