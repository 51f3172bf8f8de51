use std::path::Path;

use anyhow::Context as _;
use genpdf::{
    error::Error as PdfError,
    fonts::{self, FontCache, FontData, FontFamily},
    render,
    style::{Color, Style},
    Context, Document, Element, Margins, Mm, Position, RenderResult, Size, SimplePageDecorator,
};

use super::layout::{Cell, GridLayout, MARGIN_X_MM, MARGIN_Y_MM, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};

const TITLE_COLOR: Color = Color::Rgb(0xd0, 0x23, 0x2a);
const MUTED_COLOR: Color = Color::Rgb(0x66, 0x66, 0x66);
const HEADER_FILL: Color = Color::Rgb(0x88, 0x88, 0x88);
const HEADER_TEXT: Color = Color::Rgb(0xff, 0xff, 0xff);
const TIME_COLOR: Color = Color::Rgb(0x88, 0x88, 0x88);
const NAME_COLOR: Color = Color::Rgb(0x22, 0x22, 0x22);
const PLACEHOLDER_COLOR: Color = Color::Rgb(0xcc, 0xcc, 0xcc);
const GRID_COLOR: Color = Color::Rgb(0xcc, 0xcc, 0xcc);

// Stroke pitch for filled bands. A default PDF stroke is 1pt (about 0.35mm) wide.
const FILL_PITCH_MM: f64 = 0.25;

/// Loads `{name}-Regular.ttf` and its siblings from `dir`. The fonts are
/// embedded, so names are not limited to Windows-1252.
pub fn load_font_family<P: AsRef<Path>>(dir: P, name: &str) -> anyhow::Result<FontFamily<FontData>> {
    fonts::from_files(dir.as_ref(), name, None).with_context(|| {
        format!(
            "Failed to load font family {} from {}",
            name,
            dir.as_ref().display()
        )
    })
}

struct WeekGrid {
    layout: GridLayout,
    title: String,
    subtitle: String,
}

fn print_centered(
    area: &render::Area<'_>,
    fonts: &FontCache,
    text: &str,
    style: Style,
    x: f64,
    y: f64,
    width: f64,
) -> Result<(), PdfError> {
    let free = Mm::from(width) - style.str_width(fonts, text);
    let offset = (free / 2.0).max(Mm::from(0.0));
    area.print_str(fonts, Position::new(Mm::from(x) + offset, y), style, text)?;
    Ok(())
}

fn line(area: &render::Area<'_>, from: (f64, f64), to: (f64, f64), color: Color) {
    area.draw_line(
        vec![Position::new(from.0, from.1), Position::new(to.0, to.1)],
        Style::new().with_color(color),
    );
}

fn fill_band(area: &render::Area<'_>, top: f64, height: f64, width: f64, color: Color) {
    let mut y = top + FILL_PITCH_MM / 2.0;
    while y < top + height {
        line(area, (0.0, y), (width, y), color);
        y += FILL_PITCH_MM;
    }
}

impl Element for WeekGrid {
    fn render(
        &mut self,
        context: &Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, PdfError> {
        let fonts = &context.font_cache;
        let layout = &self.layout;
        let width = layout.width;

        print_centered(
            &area,
            fonts,
            &self.title,
            Style::new().with_font_size(18).with_color(TITLE_COLOR),
            0.0,
            0.0,
            width,
        )?;
        print_centered(
            &area,
            fonts,
            &self.subtitle,
            Style::new().with_font_size(10).with_color(MUTED_COLOR),
            0.0,
            9.0,
            width,
        )?;

        fill_band(&area, layout.table_top, layout.header_height, width, HEADER_FILL);

        let label_y = layout.table_top + layout.header_height * 0.3;
        for column in &layout.columns {
            print_centered(
                &area,
                fonts,
                &column.label,
                Style::new().bold().with_font_size(9).with_color(HEADER_TEXT),
                column.x,
                label_y,
                column.width,
            )?;

            for (row, cell) in column.cells.iter().enumerate() {
                let top = layout.row_top(row);
                match cell {
                    Cell::Slot { time, assignee } => {
                        print_centered(
                            &area,
                            fonts,
                            time,
                            Style::new().with_font_size(8).with_color(TIME_COLOR),
                            column.x,
                            top + layout.row_height * 0.15,
                            column.width,
                        )?;
                        print_centered(
                            &area,
                            fonts,
                            assignee,
                            Style::new().with_font_size(10).with_color(NAME_COLOR),
                            column.x,
                            top + layout.row_height * 0.45,
                            column.width,
                        )?;
                    }
                    Cell::Empty => {
                        print_centered(
                            &area,
                            fonts,
                            "-",
                            Style::new().with_font_size(10).with_color(PLACEHOLDER_COLOR),
                            column.x,
                            top + layout.row_height * 0.3,
                            column.width,
                        )?;
                    }
                }
            }
        }

        let bottom = layout.bottom();
        for column in &layout.columns {
            line(&area, (column.x, layout.table_top), (column.x, bottom), GRID_COLOR);
        }
        line(&area, (width, layout.table_top), (width, bottom), GRID_COLOR);
        line(&area, (0.0, layout.table_top), (width, layout.table_top), GRID_COLOR);
        for row in 0..=layout.row_count {
            let y = layout.row_top(row);
            line(&area, (0.0, y), (width, y), GRID_COLOR);
        }

        Ok(RenderResult {
            size: Size::new(width, bottom),
            has_more: false,
        })
    }
}

pub fn render_pdf(
    layout: GridLayout,
    title: String,
    subtitle: String,
    fonts: FontFamily<FontData>,
) -> anyhow::Result<Vec<u8>> {
    let mut doc = Document::new(fonts);
    doc.set_title(title.clone());
    doc.set_minimal_conformance();
    doc.set_paper_size(Size::new(PAGE_WIDTH_MM, PAGE_HEIGHT_MM));

    let mut decorator = SimplePageDecorator::new();
    decorator.set_margins(Margins::trbl(MARGIN_Y_MM, MARGIN_X_MM, MARGIN_Y_MM, MARGIN_X_MM));
    doc.set_page_decorator(decorator);

    doc.push(WeekGrid {
        layout,
        title,
        subtitle,
    });

    let mut bytes = Vec::new();
    doc.render(&mut bytes).context("Failed to render PDF")?;
    Ok(bytes)
}
