// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! PDF report of the saved records.
//!
//! The report has a title, the job address and date/time lines, and one
//! table row per record under a fixed six-column header. Rows that do not
//! fit on the current page move to a new page with the header repeated.

use crate::error::ExportError;
use crate::models::record::Record;
use printpdf::path::PaintMode;
use printpdf::*;
use std::path::Path;

/// A4 dimensions in mm
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;

const MARGIN_MM: f32 = 14.0;

/// Baselines measured from the top edge
const TITLE_TOP_MM: f32 = 22.0;
const ADDRESS_TOP_MM: f32 = 32.0;
const DATE_TOP_MM: f32 = 38.0;
const TABLE_TOP_MM: f32 = 44.0;

/// Font sizes in points
const TITLE_FONT_SIZE: f32 = 18.0;
const HEADER_FONT_SIZE: f32 = 12.0;
const TABLE_FONT_SIZE: f32 = 9.0;

const LINE_HEIGHT_MM: f32 = 4.2;
const CELL_PADDING_MM: f32 = 1.8;

/// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH_EM: f32 = 0.52;
const MM_PER_PT: f32 = 0.3528;

pub const TITLE: &str = "Flooring Installation Notes";

pub const COLUMNS: [&str; 6] = [
    "Area / Floor",
    "Sub Area",
    "Sub-Sub Area",
    "Dimensions",
    "Total SF",
    "Notes",
];

/// Column widths in mm, filling the space between the margins.
const COLUMN_WIDTHS_MM: [f32; 6] = [26.0, 24.0, 26.0, 52.0, 18.0, 36.0];

const DEFAULT_FILE_NAME: &str = "flooring_installation_notes.pdf";

fn purple() -> Color {
    Color::Rgb(Rgb::new(128.0 / 255.0, 0.0, 128.0 / 255.0, None))
}

fn lavender() -> Color {
    Color::Rgb(Rgb::new(230.0 / 255.0, 230.0 / 255.0, 250.0 / 255.0, None))
}

fn white() -> Color {
    Color::Rgb(Rgb::new(1.0, 1.0, 1.0, None))
}

fn body_text() -> Color {
    Color::Rgb(Rgb::new(0.16, 0.16, 0.16, None))
}

/// Table body cells, one row per record in list order.
pub fn table_rows(records: &[Record]) -> Vec<[String; 6]> {
    records
        .iter()
        .map(|record| {
            [
                record.area.clone(),
                record.sub_area.clone(),
                record.sub_sub_area.clone(),
                record.dimensions_summary(),
                record.total_display(),
                record.notes.clone(),
            ]
        })
        .collect()
}

/// Suggested file name for a job's report.
///
/// Whitespace runs become a single underscore and path separators are
/// dropped. An empty address gives the plain default name.
pub fn file_name(job_address: &str) -> String {
    let mut slug = String::new();
    let mut in_space = false;
    for c in job_address.trim().chars() {
        if c.is_whitespace() {
            if !in_space {
                slug.push('_');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if !matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') {
            slug.push(c);
        }
    }

    if slug.is_empty() {
        DEFAULT_FILE_NAME.to_string()
    } else {
        format!("flooring_installation_notes_{slug}.pdf")
    }
}

/// Break `text` into lines of at most `max_chars` characters, on word
/// boundaries where possible. Always returns at least one line.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            // Hard-split words that can never fit.
            while word.len() > max_chars {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let rest = word.split_off(max_chars);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            let word: String = word.into_iter().collect();
            if word.is_empty() {
                continue;
            }

            let needed = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };
            if needed > max_chars && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn chars_per_line(column_width: f32) -> usize {
    let glyph_mm = TABLE_FONT_SIZE * MM_PER_PT * AVG_GLYPH_EM;
    ((column_width - 2.0 * CELL_PADDING_MM) / glyph_mm).floor().max(1.0) as usize
}

/// Windows-1252 characters outside Latin-1. Together with printable
/// Latin-1 these are all the builtin fonts can encode.
const WIN_ANSI_EXTRAS: [char; 27] = [
    '\u{20AC}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}', '\u{02C6}', '\u{2030}',
    '\u{0160}', '\u{2039}', '\u{0152}', '\u{017D}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}',
    '\u{2013}', '\u{2014}', '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{017E}', '\u{0178}',
];

fn is_printable(c: char) -> bool {
    c.is_ascii_whitespace()
        || (' '..='~').contains(&c)
        || ('\u{A0}'..='\u{FF}').contains(&c)
        || WIN_ANSI_EXTRAS.contains(&c)
}

fn check_printable(field: &str, text: &str) -> Result<(), ExportError> {
    match text.chars().find(|c| !is_printable(*c)) {
        Some(character) => Err(ExportError::UnsupportedCharacter {
            field: field.to_string(),
            character,
        }),
        None => Ok(()),
    }
}

/// Render the report to PDF bytes.
///
/// Text the builtin Helvetica cannot encode is rejected up front rather
/// than written as garbage.
pub fn render(job_address: &str, date_time: &str, records: &[Record]) -> Result<Vec<u8>, ExportError> {
    check_printable("Job address", job_address)?;
    check_printable("Date/time", date_time)?;
    let rows = table_rows(records);
    for (index, row) in rows.iter().enumerate() {
        for (column, text) in COLUMNS.iter().zip(row) {
            check_printable(&format!("Entry {} {}", index + 1, column), text)?;
        }
    }

    let (doc, page1, layer1) = PdfDocument::new(TITLE, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");

    let font_regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Font(e.to_string()))?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ExportError::Font(e.to_string()))?;

    let mut layer = doc.get_page(page1).get_layer(layer1);

    layer.set_fill_color(purple());
    layer.use_text(TITLE, TITLE_FONT_SIZE, Mm(MARGIN_MM), Mm(PAGE_HEIGHT_MM - TITLE_TOP_MM), &font_bold);
    layer.use_text(
        format!("Job Address / Name: {job_address}"),
        HEADER_FONT_SIZE,
        Mm(MARGIN_MM),
        Mm(PAGE_HEIGHT_MM - ADDRESS_TOP_MM),
        &font_regular,
    );
    layer.use_text(
        format!("Date / Time: {date_time}"),
        HEADER_FONT_SIZE,
        Mm(MARGIN_MM),
        Mm(PAGE_HEIGHT_MM - DATE_TOP_MM),
        &font_regular,
    );

    let layout = layout_table(&rows);
    for (index, segments) in layout.pages.iter().enumerate() {
        if index > 0 {
            let (page, page_layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            layer = doc.get_page(page).get_layer(page_layer);
        }
        for segment in segments {
            draw_segment(&layer, segment, &font_regular, &font_bold);
        }
    }

    let bytes = doc
        .save_to_bytes()
        .map_err(|e| ExportError::Render(e.to_string()))?;

    log::info!(
        "Rendered report with {} rows on {} pages ({} bytes)",
        records.len(),
        layout.pages.len(),
        bytes.len()
    );
    Ok(bytes)
}

/// Render the report and write it to `path`.
pub fn export_to_file(path: &Path, job_address: &str, date_time: &str, records: &[Record]) -> Result<(), ExportError> {
    let bytes = render(job_address, date_time, records)?;
    std::fs::write(path, bytes)?;
    log::info!("Exported report to {}", path.display());
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowStyle {
    Header,
    Plain,
    Alternate,
}

fn wrap_row(row: &[String; 6]) -> Vec<Vec<String>> {
    row.iter()
        .zip(COLUMN_WIDTHS_MM)
        .map(|(text, width)| wrap_text(text, chars_per_line(width)))
        .collect()
}

fn line_count(cells: &[Vec<String>]) -> usize {
    cells.iter().map(Vec::len).max().unwrap_or(0).max(1)
}

fn row_height(cells: &[Vec<String>]) -> f32 {
    line_count(cells) as f32 * LINE_HEIGHT_MM + 2.0 * CELL_PADDING_MM
}

/// Lines of text a row starting at `top` can hold above the bottom margin.
fn lines_below(top: f32) -> usize {
    let room = (top - MARGIN_MM - 2.0 * CELL_PADDING_MM) / LINE_HEIGHT_MM;
    (room + 1e-3).floor().max(0.0) as usize
}

/// A row, or the part of a row placed on one page.
#[derive(Debug, Clone)]
struct Segment {
    style: RowStyle,
    cells: Vec<Vec<String>>,
    /// Top edge, measured from the bottom of the page.
    top: f32,
}

impl Segment {
    fn height(&self) -> f32 {
        row_height(&self.cells)
    }

    fn baseline(&self, line: usize) -> f32 {
        self.top - CELL_PADDING_MM - LINE_HEIGHT_MM + 1.0 - line as f32 * LINE_HEIGHT_MM
    }
}

/// Table rows assigned to pages. Every page starts with the header row.
struct Layout {
    pages: Vec<Vec<Segment>>,
    header: Vec<Vec<String>>,
    /// Top edge of the next segment on the last page.
    y: f32,
}

impl Layout {
    fn new() -> Self {
        let header = wrap_row(&COLUMNS.map(str::to_string));
        let mut layout = Self {
            pages: vec![Vec::new()],
            header: header.clone(),
            y: PAGE_HEIGHT_MM - TABLE_TOP_MM,
        };
        layout.place(header, RowStyle::Header);
        layout
    }

    fn place(&mut self, cells: Vec<Vec<String>>, style: RowStyle) {
        let segment = Segment {
            style,
            cells,
            top: self.y,
        };
        self.y -= segment.height();
        if let Some(page) = self.pages.last_mut() {
            page.push(segment);
        }
    }

    fn new_page(&mut self) {
        self.pages.push(Vec::new());
        self.y = PAGE_HEIGHT_MM - MARGIN_MM;
        self.place(self.header.clone(), RowStyle::Header);
    }

    /// Nothing but the header on the current page.
    fn page_is_fresh(&self) -> bool {
        self.pages.last().map_or(true, |page| page.len() <= 1)
    }

    fn fresh_page_lines(&self) -> usize {
        lines_below(PAGE_HEIGHT_MM - MARGIN_MM - row_height(&self.header))
    }

    /// Place a row, moving it to a new page when it does not fit here. A row
    /// taller than a whole page fills the current page and continues on the
    /// following ones.
    fn add_row(&mut self, mut cells: Vec<Vec<String>>, style: RowStyle) {
        loop {
            let needed = line_count(&cells);
            let left = lines_below(self.y);
            if needed <= left {
                self.place(cells, style);
                return;
            }
            if !self.page_is_fresh() && (left == 0 || needed <= self.fresh_page_lines()) {
                self.new_page();
                continue;
            }

            let take = left.max(1);
            let rest: Vec<Vec<String>> = cells
                .iter_mut()
                .map(|cell| if cell.len() > take { cell.split_off(take) } else { Vec::new() })
                .collect();
            self.place(cells, style);
            self.new_page();
            cells = rest;
        }
    }
}

fn layout_table(rows: &[[String; 6]]) -> Layout {
    let mut layout = Layout::new();
    for (index, row) in rows.iter().enumerate() {
        let style = if index % 2 == 1 { RowStyle::Alternate } else { RowStyle::Plain };
        layout.add_row(wrap_row(row), style);
    }
    layout
}

fn draw_segment(layer: &PdfLayerReference, segment: &Segment, font_regular: &IndirectFontRef, font_bold: &IndirectFontRef) {
    let bottom = segment.top - segment.height();
    let right = PAGE_WIDTH_MM - MARGIN_MM;

    let (background, text_color, font) = match segment.style {
        RowStyle::Header => (Some(purple()), white(), font_bold),
        RowStyle::Alternate => (Some(lavender()), body_text(), font_regular),
        RowStyle::Plain => (None, body_text(), font_regular),
    };

    if let Some(fill) = background {
        layer.set_fill_color(fill);
        let rect = Rect::new(Mm(MARGIN_MM), Mm(bottom), Mm(right), Mm(segment.top)).with_mode(PaintMode::Fill);
        layer.add_rect(rect);
    }

    layer.set_fill_color(text_color);
    let mut x = MARGIN_MM;
    for (lines, width) in segment.cells.iter().zip(COLUMN_WIDTHS_MM) {
        for (line_index, line) in lines.iter().enumerate() {
            if !line.is_empty() {
                layer.use_text(
                    line.as_str(),
                    TABLE_FONT_SIZE,
                    Mm(x + CELL_PADDING_MM),
                    Mm(segment.baseline(line_index)),
                    font,
                );
            }
        }
        x += width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::dimension::Dimension;

    fn record(area: &str, notes: &str) -> Record {
        Record {
            area: area.to_string(),
            sub_area: "Kitchen".to_string(),
            sub_sub_area: "Pantry".to_string(),
            dimensions: vec![
                Dimension::feet_inches(10.0, 6.0, 5.0, 0.0),
                Dimension::feet_inches(4.0, 0.0, 3.0, 0.0),
            ],
            total_sq_feet: 64.5,
            notes: notes.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_table_rows_match_columns() {
        let rows = table_rows(&[record("Main", "glue down"), record("Upstairs", "")]);
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            [
                "Main".to_string(),
                "Kitchen".to_string(),
                "Pantry".to_string(),
                "10' 6\" x 5' 0\", 4' 0\" x 3' 0\"".to_string(),
                "64.50".to_string(),
                "glue down".to_string(),
            ]
        );
        assert_eq!(rows[1][0], "Upstairs");
    }

    #[test]
    fn test_column_layout() {
        assert_eq!(COLUMNS.len(), COLUMN_WIDTHS_MM.len());
        let total: f32 = COLUMN_WIDTHS_MM.iter().sum();
        assert!((total - (PAGE_WIDTH_MM - 2.0 * MARGIN_MM)).abs() < 0.01);
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("12  Oak St"), "flooring_installation_notes_12_Oak_St.pdf");
        assert_eq!(file_name("Unit 4/B"), "flooring_installation_notes_Unit_4B.pdf");
        assert_eq!(file_name(""), "flooring_installation_notes.pdf");
        assert_eq!(file_name("   "), "flooring_installation_notes.pdf");
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("", 10), vec![String::new()]);
        assert_eq!(wrap_text("short", 10), vec!["short"]);
        assert_eq!(wrap_text("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_text("a\nb", 10), vec!["a", "b"]);
    }

    #[test]
    fn test_render_produces_pdf() {
        let bytes = render("12 Oak St", "10/18/2026, 9:00:00 AM", &[record("Main", "x"), record("Up", "y")]).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_many_rows_spans_pages() {
        let long_notes = "remove old carpet and tack strip ".repeat(8);
        let records: Vec<Record> = (0..60).map(|i| record(&format!("Room {i}"), &long_notes)).collect();
        let bytes = render("", "", &records).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(file_name("12 Oak St"));
        export_to_file(&path, "12 Oak St", "now", &[record("Main", "")]).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_tall_row_continues_on_following_pages() {
        let notes = "remove old carpet and tack strip ".repeat(150);
        let rows = table_rows(&[record("Main", &notes)]);
        let expected = wrap_text(&notes, chars_per_line(COLUMN_WIDTHS_MM[5]));
        assert!(expected.len() > lines_below(PAGE_HEIGHT_MM - MARGIN_MM));

        let layout = layout_table(&rows);
        assert!(layout.pages.len() > 2);

        let mut placed = Vec::new();
        for page in &layout.pages {
            assert_eq!(page[0].style, RowStyle::Header);
            for segment in page.iter().filter(|s| s.style != RowStyle::Header) {
                assert!(segment.top - segment.height() >= MARGIN_MM - 0.01);
                for (line, text) in segment.cells[5].iter().enumerate() {
                    let baseline = segment.baseline(line);
                    assert!(baseline >= MARGIN_MM, "line {text:?} at {baseline}mm");
                    assert!(baseline <= PAGE_HEIGHT_MM - MARGIN_MM);
                    placed.push(text.clone());
                }
            }
        }
        assert_eq!(placed, expected);

        let bytes = render("12 Oak St", "now", &[record("Main", &notes)]).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_rows_that_fit_a_page_are_not_split() {
        let notes = "remove old carpet and tack strip ".repeat(8);
        let records: Vec<Record> = (0..60).map(|i| record(&format!("Room {i}"), &notes)).collect();
        let layout = layout_table(&table_rows(&records));

        let body: Vec<&Segment> = layout
            .pages
            .iter()
            .flatten()
            .filter(|s| s.style != RowStyle::Header)
            .collect();
        assert_eq!(body.len(), 60);
        assert!(layout.pages.len() > 1);
        for segment in body {
            assert!(segment.top - segment.height() >= MARGIN_MM - 0.01);
        }
    }

    #[test]
    fn test_unencodable_text_is_rejected() {
        let err = render("東京 office", "now", &[]).unwrap_err();
        assert!(matches!(err, ExportError::UnsupportedCharacter { character: '東', .. }));

        let err = render("", "", &[record("Main", "grout ✓")]).unwrap_err();
        match err {
            ExportError::UnsupportedCharacter { field, character } => {
                assert_eq!(character, '✓');
                assert_eq!(field, "Entry 1 Notes");
            }
            other => panic!("unexpected error: {other}"),
        }

        // Latin-1 and the Windows-1252 extras are fine.
        let bytes = render("Café Ñandú", "now", &[record("Main", "10\u{2019} \u{2013} 12\u{2019}, 5 €")]).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
