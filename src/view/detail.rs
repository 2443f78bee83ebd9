//! Detail panel view model: column headers plus one formatted record per row
//! of the selected duplicate group.

use tracing::debug;

use crate::format::{CellFormatter, CellValue, DisplayCell, is_shown, width_for};
use crate::model::{DuplicateGroup, Table};

/// Pixels per terminal column when mapping display widths to text.
pub const PX_PER_COL: u16 = 10;

/// Converts a pixel width to terminal columns (at least one).
pub fn px_to_cols(px: u16) -> u16 {
    (px / PX_PER_COL).max(1)
}

/// Header of a shown column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHeader {
    pub key: String,
    pub name: String,
    /// Width in pixels.
    pub width: u16,
}

/// One row of the duplicate group, formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordView {
    /// Position in the group.
    pub index: usize,
    pub row_id: String,
    pub row_name: String,
    pub cells: Vec<DisplayCell>,
}

/// Formatted content of the detail panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailView {
    pub column_headers: Vec<ColumnHeader>,
    pub records: Vec<RecordView>,
}

impl DetailView {
    /// Formats every row of `group` found in `table`. Row ids missing from the
    /// table are skipped.
    pub fn build(table: &Table, group: &DuplicateGroup, formatter: &CellFormatter<'_>) -> Self {
        let column_headers = table
            .columns
            .iter()
            .filter(|c| is_shown(c))
            .map(|c| ColumnHeader {
                key: c.key.clone(),
                name: c.name.clone(),
                width: width_for(c),
            })
            .collect();

        let mut records = Vec::with_capacity(group.rows.len());
        for row_id in &group.rows {
            let Some(row) = table.row(row_id) else {
                debug!(row_id = %row_id, "row of duplicate group not in table, skipped");
                continue;
            };
            records.push(RecordView {
                index: records.len(),
                row_id: row_id.clone(),
                row_name: row.name().to_string(),
                cells: formatter.format_row(&table.columns, row),
            });
        }

        Self {
            column_headers,
            records,
        }
    }

    /// Total width of all shown columns in pixels.
    pub fn total_width(&self) -> u32 {
        self.column_headers.iter().map(|h| h.width as u32).sum()
    }

    /// Image thumbnails of a record as `(column name, thumbnail url)`, in
    /// column order.
    pub fn thumbnails<'a>(&'a self, record: &'a RecordView) -> Vec<(&'a str, &'a str)> {
        record
            .cells
            .iter()
            .filter_map(|cell| match &cell.value {
                CellValue::Image { thumbnail_url, .. } if !thumbnail_url.is_empty() => {
                    let name = self
                        .column_headers
                        .iter()
                        .find(|h| h.key == cell.column_key)
                        .map_or(cell.column_key.as_str(), |h| h.name.as_str());
                    Some((name, thumbnail_url.as_str()))
                }
                _ => None,
            })
            .collect()
    }

    /// Plain-text table: a header line plus one line per record, each cell
    /// padded or cut to its column width. Image thumbnails follow their
    /// record on indented lines.
    pub fn to_text(&self, name_width: usize) -> String {
        let mut out = String::new();
        out.push_str(&fit("", name_width));
        for header in &self.column_headers {
            out.push_str(&fit(&header.name, px_to_cols(header.width) as usize));
        }
        out.truncate(out.trim_end().len());
        out.push('\n');

        for record in &self.records {
            let mut line = fit(&record.row_name, name_width);
            for cell in &record.cells {
                line.push_str(&fit(
                    &cell.value.plain_text(),
                    px_to_cols(cell.width) as usize,
                ));
            }
            out.push_str(line.trim_end());
            out.push('\n');
            for (column, url) in self.thumbnails(record) {
                out.push_str(&format!("  {}: {}\n", column, url));
            }
        }
        out
    }
}

/// Pads or truncates `s` to exactly `width` chars, keeping one trailing blank
/// as column separator. Truncation is marked with `…`.
pub fn fit(s: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let room = width - 1;
    let len = s.chars().count();
    let mut out: String = if len > room {
        let mut cut: String = s.chars().take(room.saturating_sub(1)).collect();
        if room > 0 {
            cut.push('…');
        }
        cut
    } else {
        s.to_string()
    };
    let used = out.chars().count();
    out.extend(std::iter::repeat_n(' ', width - used));
    out
}
