//! Lengths are millimetres from the upper-left corner of the printable area,
//! y growing downwards. Rows shrink uniformly so the grid never spills onto a
//! second page.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::assignees::FALLBACK_NAME;

pub const PAGE_WIDTH_MM: f64 = 297.0;
pub const PAGE_HEIGHT_MM: f64 = 210.0;
pub const MARGIN_X_MM: f64 = 10.5;
pub const MARGIN_Y_MM: f64 = 17.5;

pub const TITLE_HEIGHT_MM: f64 = 19.5;
pub const HEADER_HEIGHT_MM: f64 = 10.5;
pub const ROW_HEIGHT_MM: f64 = 16.0;

/// Sparse weeks still get this many rows so the grid keeps its shape.
pub const MIN_ROWS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageArea {
    pub width: f64,
    pub height: f64,
}

impl PageArea {
    /// Printable area of a landscape A4 sheet.
    pub fn a4_landscape() -> Self {
        Self {
            width: PAGE_WIDTH_MM - 2.0 * MARGIN_X_MM,
            height: PAGE_HEIGHT_MM - 2.0 * MARGIN_Y_MM,
        }
    }
}

/// One schedule entry as the export sees it. Entries of a date must arrive
/// in display order; the layout does not sort them.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportEntry {
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub assignee: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Slot { time: String, assignee: String },
    Empty,
}

#[derive(Clone, Debug)]
pub struct Column {
    pub date: NaiveDate,
    pub label: String,
    pub x: f64,
    pub width: f64,
    pub cells: Vec<Cell>,
}

#[derive(Clone, Debug)]
pub struct GridLayout {
    pub width: f64,
    pub table_top: f64,
    pub header_height: f64,
    pub row_height: f64,
    pub row_count: usize,
    pub columns: Vec<Column>,
}

impl GridLayout {
    pub fn header_bottom(&self) -> f64 {
        self.table_top + self.header_height
    }

    pub fn row_top(&self, row: usize) -> f64 {
        self.header_bottom() + row as f64 * self.row_height
    }

    pub fn bottom(&self) -> f64 {
        self.row_top(self.row_count)
    }

    pub fn cell(&self, column: usize, row: usize) -> Option<&Cell> {
        self.columns.get(column).and_then(|c| c.cells.get(row))
    }
}

/// Short weekday plus day/month, e.g. `Wed 3/12`.
pub fn day_label(date: NaiveDate) -> String {
    date.format("%a %-d/%-m").to_string()
}

pub fn layout_week(
    dates: &[NaiveDate],
    entries: &[ExportEntry],
    default_name: Option<&str>,
    area: PageArea,
) -> GridLayout {
    let mut by_date: HashMap<NaiveDate, Vec<&ExportEntry>> = HashMap::new();
    for entry in entries {
        by_date.entry(entry.date).or_default().push(entry);
    }

    let row_count = dates
        .iter()
        .map(|date| by_date.get(date).map_or(0, Vec::len))
        .max()
        .unwrap_or(0)
        .max(MIN_ROWS);

    let table_top = TITLE_HEIGHT_MM;
    let available = (area.height - table_top - HEADER_HEIGHT_MM).max(0.0);
    let row_height = ROW_HEIGHT_MM.min(available / row_count as f64);

    let fallback = default_name.unwrap_or(FALLBACK_NAME);
    let column_width = area.width / dates.len().max(1) as f64;
    let columns = dates
        .iter()
        .enumerate()
        .map(|(i, &date)| {
            let bucket = by_date.get(&date).map(Vec::as_slice).unwrap_or(&[]);
            let cells = (0..row_count)
                .map(|row| match bucket.get(row) {
                    Some(entry) => Cell::Slot {
                        time: format!("{}-{}", entry.start_time, entry.end_time),
                        assignee: entry.assignee.as_deref().unwrap_or(fallback).to_string(),
                    },
                    None => Cell::Empty,
                })
                .collect();
            Column {
                date,
                label: day_label(date),
                x: column_width * i as f64,
                width: column_width,
                cells,
            }
        })
        .collect();

    GridLayout {
        width: area.width,
        table_top,
        header_height: HEADER_HEIGHT_MM,
        row_height,
        row_count,
        columns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn week() -> Vec<NaiveDate> {
        ymd(2025, 12, 1).iter_days().take(7).collect()
    }

    fn entry(date: NaiveDate, start: &str, end: &str, assignee: Option<&str>) -> ExportEntry {
        ExportEntry {
            date,
            start_time: start.to_string(),
            end_time: end.to_string(),
            assignee: assignee.map(str::to_string),
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn one_column_per_day_sharing_the_width() {
        let area = PageArea::a4_landscape();
        let layout = layout_week(&week(), &[], None, area);

        assert_eq!(layout.columns.len(), 7);
        for (i, column) in layout.columns.iter().enumerate() {
            assert!(approx(column.width, area.width / 7.0));
            assert!(approx(column.x, area.width / 7.0 * i as f64));
        }
        assert_eq!(layout.columns[0].label, "Mon 1/12");
        assert_eq!(layout.columns[6].label, "Sun 7/12");
    }

    #[test]
    fn sparse_weeks_keep_four_rows() {
        let days = week();
        let entries = vec![entry(days[2], "17:00", "20:00", None)];
        let layout = layout_week(&days, &entries, None, PageArea::a4_landscape());

        assert_eq!(layout.row_count, MIN_ROWS);
        assert!(approx(layout.row_height, ROW_HEIGHT_MM));
        assert!(layout.columns.iter().all(|c| c.cells.len() == MIN_ROWS));
    }

    #[test]
    fn row_count_follows_busiest_day() {
        let days = week();
        let saturday = days[5];
        let entries: Vec<ExportEntry> = ["12:00", "14:00", "16:00", "18:00", "20:00", "22:00"]
            .iter()
            .map(|start| entry(saturday, start, "02:30", None))
            .collect();
        let layout = layout_week(&days, &entries, None, PageArea::a4_landscape());

        assert_eq!(layout.row_count, 6);
        assert_eq!(layout.cell(0, 0), Some(&Cell::Empty));
        assert_eq!(
            layout.cell(5, 5),
            Some(&Cell::Slot {
                time: "22:00-02:30".to_string(),
                assignee: "TBA".to_string()
            })
        );
    }

    #[test]
    fn cells_keep_input_order_and_name_fallbacks() {
        let days = week();
        let entries = vec![
            entry(days[0], "17:00", "20:00", Some("DJ Kool")),
            entry(days[0], "20:00", "22:00", None),
        ];

        let layout = layout_week(&days, &entries, Some("Resident"), PageArea::a4_landscape());
        assert_eq!(
            layout.cell(0, 0),
            Some(&Cell::Slot {
                time: "17:00-20:00".to_string(),
                assignee: "DJ Kool".to_string()
            })
        );
        assert_eq!(
            layout.cell(0, 1),
            Some(&Cell::Slot {
                time: "20:00-22:00".to_string(),
                assignee: "Resident".to_string()
            })
        );

        let layout = layout_week(&days, &entries, None, PageArea::a4_landscape());
        match layout.cell(0, 1) {
            Some(Cell::Slot { assignee, .. }) => assert_eq!(assignee, "TBA"),
            other => panic!("unexpected cell {:?}", other),
        }
    }

    #[test]
    fn entries_outside_the_columns_are_ignored() {
        let days = week();
        let entries = vec![entry(ymd(2025, 12, 8), "17:00", "20:00", None)];
        let layout = layout_week(&days, &entries, None, PageArea::a4_landscape());

        assert!(layout
            .columns
            .iter()
            .all(|c| c.cells.iter().all(|cell| *cell == Cell::Empty)));
    }

    #[test]
    fn crowded_grid_shrinks_to_fit_the_page() {
        let days = week();
        let entries: Vec<ExportEntry> = (0..20)
            .map(|i| entry(days[3], &format!("{:02}:00", i), "23:59", None))
            .collect();
        let area = PageArea::a4_landscape();
        let layout = layout_week(&days, &entries, None, area);

        assert_eq!(layout.row_count, 20);
        assert!(layout.row_height < ROW_HEIGHT_MM);
        assert!(layout.bottom() <= area.height + 1e-9);
    }
}
