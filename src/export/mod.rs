pub mod layout;
pub mod render;

use actix_web::{get, http::header, web, HttpResponse, Responder};
use chrono::{Datelike, NaiveDate};
use genpdf::fonts::{FontData, FontFamily};
use log::warn;
use serde::Deserialize;

use self::layout::{layout_week, ExportEntry, PageArea};
use crate::{
    database::{run_blocking, with_conn},
    error::{error_kind, error_status, ScheduleError},
    protocol::SimpleResponse,
    schedule::{
        populate::default_assignee,
        queries::{list_entries, EntryFilter},
        Bowl,
    },
    utils::{date_range, parse_date_str, require},
    DbPool,
};

/// Shared by every export request. `fonts` is `None` when the font files
/// could not be loaded at startup; exports then fail with a configuration error.
pub struct ExportState {
    pub fonts: Option<FontFamily<FontData>>,
    pub venue_name: String,
}

#[derive(Deserialize)]
pub struct ExportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(export_pdf);
}

pub fn week_title(venue_name: &str, bowl: Bowl) -> String {
    format!(
        "{} ROTA - {} BOWL",
        venue_name.to_uppercase(),
        bowl.as_str().to_uppercase()
    )
}

pub fn week_subtitle(start_date: NaiveDate, end_date: NaiveDate) -> String {
    format!(
        "Week: {}/{} - {}/{}/{}",
        start_date.day(),
        start_date.month(),
        end_date.day(),
        end_date.month(),
        end_date.year()
    )
}

/// Lays out and renders one bowl's grid. `entries` must already be in
/// display order per date.
pub fn render_week(
    bowl: &str,
    entries: &[ExportEntry],
    default_name: Option<&str>,
    start_date: NaiveDate,
    end_date: NaiveDate,
    venue_name: &str,
    fonts: FontFamily<FontData>,
) -> anyhow::Result<Vec<u8>> {
    let bowl: Bowl = bowl.parse()?;
    let dates = date_range(start_date, end_date)?;
    let layout = layout_week(&dates, entries, default_name, PageArea::a4_landscape());
    render::render_pdf(
        layout,
        week_title(venue_name, bowl),
        week_subtitle(start_date, end_date),
        fonts,
    )
}

#[get("/{bowl}")]
async fn export_pdf(
    pool: web::Data<DbPool>,
    state: web::Data<ExportState>,
    bowl: web::Path<String>,
    query: web::Query<ExportQuery>,
) -> impl Responder {
    match export_pdf_impl(pool, state, bowl.into_inner(), query.into_inner()).await {
        Ok((filename, bytes)) => HttpResponse::Ok()
            .content_type("application/pdf")
            .header(
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            )
            .body(bytes),
        Err(err) => {
            warn!("export failed ({}): {:#}", error_kind(&err), err);
            HttpResponse::build(error_status(&err)).json(SimpleResponse::err(&err))
        }
    }
}

async fn export_pdf_impl(
    pool: web::Data<DbPool>,
    state: web::Data<ExportState>,
    bowl: String,
    query: ExportQuery,
) -> anyhow::Result<(String, Vec<u8>)> {
    let bowl: Bowl = bowl.parse()?;
    let start_date = parse_date_str(require(query.start_date, "start_date")?, "start_date")?;
    let end_date = parse_date_str(require(query.end_date, "end_date")?, "end_date")?;
    date_range(start_date, end_date)?;

    let fonts = match &state.fonts {
        Some(fonts) => fonts.clone(),
        None => {
            return Err(ScheduleError::Configuration(
                "PDF fonts are not available on this server".to_string(),
            )
            .into())
        }
    };

    let (entries, default_name) = with_conn(&pool, move |conn| {
        let filter = EntryFilter {
            range: Some((start_date, end_date)),
            bowl: Some(bowl),
            ..Default::default()
        };
        let entries: Vec<ExportEntry> = list_entries(conn, &filter)?
            .into_iter()
            .map(|entry| ExportEntry {
                date: entry.date,
                start_time: entry.start_time,
                end_time: entry.end_time,
                assignee: entry.assignee_name,
            })
            .collect();
        let default_name = default_assignee(conn)?.map(|assignee| assignee.name);
        Ok((entries, default_name))
    })
    .await?;

    let venue_name = state.venue_name.clone();
    let bytes = run_blocking(move || {
        render_week(
            bowl.as_str(),
            &entries,
            default_name.as_deref(),
            start_date,
            end_date,
            &venue_name,
            fonts,
        )
    })
    .await?;

    let filename = format!("rota-{}-bowl-{}.pdf", bowl, start_date);
    Ok((filename, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn titles() {
        assert_eq!(week_title("Rowans", Bowl::Upper), "ROWANS ROTA - UPPER BOWL");
        assert_eq!(
            week_subtitle(ymd(2025, 12, 1), ymd(2025, 12, 7)),
            "Week: 1/12 - 7/12/2025"
        );
    }

    #[test]
    fn renders_a_single_page_pdf_when_fonts_are_present() {
        let fonts = match render::load_font_family("./fonts", "LiberationSans") {
            Ok(fonts) => fonts,
            // Font files are deployment assets; without them only the layout is testable.
            Err(_) => return,
        };
        let entries = vec![ExportEntry {
            date: ymd(2025, 12, 3),
            start_time: "17:00".to_string(),
            end_time: "20:00".to_string(),
            assignee: Some("DJ Kool".to_string()),
        }];

        let bytes = render_week(
            "lower",
            &entries,
            Some("TBA"),
            ymd(2025, 12, 1),
            ymd(2025, 12, 7),
            "Rowans",
            fonts,
        )
        .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn renders_names_outside_windows_1252() {
        let fonts = match render::load_font_family("./fonts", "LiberationSans") {
            Ok(fonts) => fonts,
            Err(_) => return,
        };
        let entries = vec![ExportEntry {
            date: ymd(2025, 12, 5),
            start_time: "21:00".to_string(),
            end_time: "00:00".to_string(),
            assignee: Some("DJ Łukasz".to_string()),
        }];

        let bytes = render_week(
            "lower",
            &entries,
            Some("Dvořák Night"),
            ymd(2025, 12, 1),
            ymd(2025, 12, 7),
            "Kraków",
            fonts,
        )
        .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn render_rejects_unknown_bowl() {
        let fonts = match render::load_font_family("./fonts", "LiberationSans") {
            Ok(fonts) => fonts,
            Err(_) => return,
        };
        let err = render_week(
            "garden",
            &[],
            None,
            ymd(2025, 12, 1),
            ymd(2025, 12, 7),
            "Rowans",
            fonts,
        )
        .unwrap_err();
        assert_eq!(error_kind(&err), "validation");
    }
}
