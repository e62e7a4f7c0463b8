//! Plain text tables for transaction lists and report series.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableColumn {
    pub header: &'static str,
    pub max_width: Option<usize>,
    pub alignment: Alignment,
}

impl TableColumn {
    pub fn left(header: &'static str) -> Self {
        Self {
            header,
            max_width: None,
            alignment: Alignment::Left,
        }
    }

    pub fn right(header: &'static str) -> Self {
        Self {
            header,
            max_width: None,
            alignment: Alignment::Right,
        }
    }

    /// Longer cells are cut and end in `…`.
    pub fn max(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }
}

pub struct Table {
    columns: Vec<TableColumn>,
    rows: Vec<Vec<String>>,
    padding: usize,
}

impl Table {
    pub fn new(columns: Vec<TableColumn>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            padding: 1,
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let widest = self
                    .rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| visible_width(cell))
                    .fold(visible_width(column.header), usize::max);
                column.max_width.map_or(widest, |max| widest.min(max))
            })
            .collect()
    }

    fn render_row<S: AsRef<str>>(&self, cells: &[S], widths: &[usize]) -> String {
        let rendered: Vec<String> = self
            .columns
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(idx, (column, &width))| {
                let text: &str = cells.get(idx).map(|cell| cell.as_ref()).unwrap_or("");
                render_cell(text, width, column.alignment, self.padding)
            })
            .collect();
        rendered.join(" ").trim_end().to_string()
    }

    /// Header, a rule, then one line per row.
    pub fn render(&self) -> String {
        let widths = self.widths();
        let headers: Vec<&str> = self.columns.iter().map(|column| column.header).collect();
        let mut lines = vec![
            self.render_row(&headers, &widths),
            horizontal_rule(&widths, self.padding),
        ];
        lines.extend(self.rows.iter().map(|row| self.render_row(row, &widths)));
        lines.join("\n")
    }
}

/// Terminal cells taken by `text`. ANSI escapes take none and emoji take two.
pub fn visible_width(text: &str) -> usize {
    segments(text).iter().map(|(_, width)| width).sum()
}

fn truncate(text: &str, width: usize) -> String {
    if visible_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut kept = String::new();
    let mut used = 0;
    for (piece, cells) in segments(text) {
        if used + cells > width - 1 {
            break;
        }
        kept.push_str(piece);
        used += cells;
    }
    kept.push('…');
    kept
}

/// Splits `text` into escape sequences and grapheme clusters, each paired
/// with the cells it occupies.
fn segments(text: &str) -> Vec<(&str, usize)> {
    let mut pieces = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        match rest.find('\u{1b}') {
            Some(0) => {
                let len = escape_len(rest);
                pieces.push((&rest[..len], 0));
                rest = &rest[len..];
            }
            next => {
                let end = next.unwrap_or(rest.len());
                pieces.extend(
                    rest[..end]
                        .graphemes(true)
                        .map(|grapheme| (grapheme, grapheme_width(grapheme))),
                );
                rest = &rest[end..];
            }
        }
    }
    pieces
}

/// Length in bytes of the escape at the start of `text`.
fn escape_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    if bytes.get(1) != Some(&b'[') {
        return 1;
    }
    bytes[2..]
        .iter()
        .position(|byte| (0x40..=0x7e).contains(byte))
        .map_or(bytes.len(), |pos| pos + 3)
}

/// A variation selector 16 asks for emoji presentation, which terminals draw
/// two cells wide.
fn grapheme_width(grapheme: &str) -> usize {
    if grapheme.contains('\u{fe0f}') {
        2
    } else {
        grapheme.width()
    }
}

fn render_cell(text: &str, width: usize, alignment: Alignment, padding: usize) -> String {
    let fitted = truncate(text, width);
    let gap = width.saturating_sub(visible_width(&fitted));
    let pad = " ".repeat(padding);
    match alignment {
        Alignment::Left => format!("{pad}{fitted}{}{pad}", " ".repeat(gap)),
        Alignment::Right => format!("{pad}{}{fitted}{pad}", " ".repeat(gap)),
    }
}

fn horizontal_rule(widths: &[usize], padding: usize) -> String {
    let total: usize = widths.iter().map(|width| width + padding * 2).sum::<usize>()
        + widths.len().saturating_sub(1);
    "-".repeat(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_aligned_columns() {
        let mut table = Table::new(vec![
            TableColumn::left("Month"),
            TableColumn::right("Income"),
        ]);
        table.push_row(vec!["Jan 2024".into(), "$10.00".into()]);
        table.push_row(vec!["Feb 2024".into(), "$1,200.00".into()]);

        insta::assert_snapshot!(table.render(), @r###"
         Month         Income
        ----------------------
         Jan 2024      $10.00
         Feb 2024   $1,200.00
        "###);
    }

    #[test]
    fn long_cells_are_truncated() {
        let mut table = Table::new(vec![TableColumn::left("Note").max(5)]);
        table.push_row(vec!["Weekly groceries".into()]);
        assert!(table.render().ends_with(" Week…"));
    }

    #[test]
    fn width_skips_escapes_and_counts_emoji_as_two_cells() {
        assert_eq!(visible_width("\u{1b}[32mok\u{1b}[0m"), 2);
        assert_eq!(visible_width("🛍️ Shop"), 7);
        assert_eq!(visible_width("🍔 Food"), 7);
        assert_eq!(visible_width("Food"), 4);
    }

    #[test]
    fn emoji_labels_line_up_with_plain_cells() {
        let mut table = Table::new(vec![
            TableColumn::left("Category"),
            TableColumn::right("Amount"),
        ]);
        table.push_row(vec!["🍔 Food".into(), "$5.00".into()]);
        table.push_row(vec!["Pet care".into(), "$7.00".into()]);
        let rendered = table.render();
        let widths: Vec<usize> = rendered.lines().map(visible_width).collect();
        assert_eq!(widths[0], widths[2]);
        assert_eq!(widths[2], widths[3]);
    }

    #[test]
    fn truncation_counts_cells_not_chars() {
        assert_eq!(truncate("🍔 Food court", 5), "🍔 F…");
        assert_eq!(truncate("\u{1b}[1mBold text\u{1b}[0m", 5), "\u{1b}[1mBold…");
        assert_eq!(truncate("short", 5), "short");
    }
}
