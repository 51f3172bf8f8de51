#[macro_export]
macro_rules! post_funcs {
    ( $( ( $func_name:ident, $url:expr, $request:ty, $response:ty ) ),+ $(,)? ) => {
        $(
            paste::paste! {
                #[post($url)]
                async fn $func_name(
                    pool: web::Data<DbPool>,
                    info: web::Json<$request>
                ) -> impl Responder {
                    match [<$func_name _impl>](pool, info).await {
                        Ok(response) => HttpResponse::Ok().json(response),
                        Err(err) => {
                            log::warn!(
                                "{} failed ({}): {:#}",
                                $url,
                                $crate::error::error_kind(&err),
                                err
                            );
                            HttpResponse::build($crate::error::error_status(&err))
                                .json(<$response>::err(&err))
                        }
                    }
                }
            }
        )+
    };
}

use anyhow::bail;
use blake2::{Blake2b, Digest};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rand::Rng;
use serde::{Deserialize, Deserializer};

use crate::error::ScheduleError;

/// Longest date range accepted by population and export.
pub const MAX_RANGE_DAYS: i64 = 366;

/// Start times before this belong to the previous calendar day's session.
pub const SESSION_ROLLOVER: &str = "06:00";

pub fn require<S: AsRef<str>>(value: Option<S>, field: &str) -> anyhow::Result<String> {
    match value {
        Some(v) if !v.as_ref().trim().is_empty() => Ok(v.as_ref().trim().to_string()),
        _ => bail!(ScheduleError::validation(format!("{} is required", field))),
    }
}

/// Trimmed text, with blank input treated as absent.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Change of a nullable text column: absent keeps it, blank clears it.
pub fn text_change(value: Option<String>) -> Option<Option<String>> {
    value.map(|v| non_blank(Some(v)))
}

/// `deserialize_with` target for nullable fields where a missing key means
/// "leave as is" and an explicit `null` means "clear". Pair with `#[serde(default)]`.
pub fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

pub fn parse_date_str<S: AsRef<str>>(s: S, field: &str) -> anyhow::Result<NaiveDate> {
    match NaiveDate::parse_from_str(s.as_ref(), "%Y-%m-%d") {
        Ok(date) => Ok(date),
        Err(_) => bail!(ScheduleError::validation(format!(
            "{} must be a YYYY-MM-DD date, got {:?}",
            field,
            s.as_ref()
        ))),
    }
}

/// Validates a wall-clock `HH:MM` string and returns it zero-padded.
pub fn parse_slot_time<S: AsRef<str>>(s: S, field: &str) -> anyhow::Result<String> {
    match NaiveTime::parse_from_str(s.as_ref(), "%H:%M") {
        Ok(time) => Ok(time.format("%H:%M").to_string()),
        Err(_) => bail!(ScheduleError::validation(format!(
            "{} must be an HH:MM time, got {:?}",
            field,
            s.as_ref()
        ))),
    }
}

/// Every calendar day of `[start, end]`, both bounds included.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> anyhow::Result<Vec<NaiveDate>> {
    if end < start {
        bail!(ScheduleError::validation(format!(
            "end_date {} is before start_date {}",
            end, start
        )));
    }
    let span = end.signed_duration_since(start).num_days() + 1;
    if span > MAX_RANGE_DAYS {
        bail!(ScheduleError::validation(format!(
            "date range spans {} days, at most {} allowed",
            span, MAX_RANGE_DAYS
        )));
    }
    Ok(start.iter_days().take(span as usize).collect())
}

/// Sort key placing after-midnight start times at the end of the session.
pub fn session_order(start_time: &str) -> (bool, &str) {
    (start_time < SESSION_ROLLOVER, start_time)
}

pub fn format_time_str(time: &NaiveDateTime) -> String {
    const TIME_FMT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    format!("{}+00:00", time.format(TIME_FMT))
}

pub fn get_str_pattern<S: AsRef<str>>(s: S) -> String {
    format!("%{}%", s.as_ref())
}

pub fn get_str_pattern_opt<S: AsRef<str>>(s: Option<S>) -> String {
    match s {
        Some(s) => get_str_pattern(s),
        None => "%".to_string(),
    }
}

pub fn hash_password(password: &str) -> String {
    format!("{:x}", Blake2b::digest(password.as_bytes()))
}

pub fn generate_login_token(uid: i32) -> String {
    let nonce: u64 = rand::thread_rng().gen();
    let now = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let seed = format!("{}:{}:{}", uid, now, nonce);
    format!("{:x}", Blake2b::digest(seed.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::error_kind;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn date_range_is_inclusive() {
        let days = date_range(ymd(2025, 12, 1), ymd(2025, 12, 7)).unwrap();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], ymd(2025, 12, 1));
        assert_eq!(days[6], ymd(2025, 12, 7));

        let single = date_range(ymd(2025, 3, 30), ymd(2025, 3, 30)).unwrap();
        assert_eq!(single, vec![ymd(2025, 3, 30)]);
    }

    #[test]
    fn date_range_crosses_dst_and_month_ends() {
        // Europe switches to summer time on 2025-03-30; calendar days are unaffected.
        let days = date_range(ymd(2025, 3, 28), ymd(2025, 4, 2)).unwrap();
        let labels: Vec<String> = days.iter().map(|d| d.to_string()).collect();
        assert_eq!(
            labels,
            [
                "2025-03-28",
                "2025-03-29",
                "2025-03-30",
                "2025-03-31",
                "2025-04-01",
                "2025-04-02"
            ]
        );
    }

    #[test]
    fn date_range_rejects_reversed_and_oversized() {
        let err = date_range(ymd(2025, 12, 7), ymd(2025, 12, 1)).unwrap_err();
        assert_eq!(error_kind(&err), "validation");
        let err = date_range(ymd(2024, 1, 1), ymd(2025, 6, 1)).unwrap_err();
        assert_eq!(error_kind(&err), "validation");
    }

    #[test]
    fn require_rejects_missing_and_blank() {
        assert_eq!(require(Some(" upper "), "bowl").unwrap(), "upper");
        assert!(require(None::<String>, "bowl").is_err());
        let err = require(Some("   "), "bowl").unwrap_err();
        assert_eq!(err.to_string(), "bowl is required");
    }

    #[test]
    fn blank_text_clears_nullable_columns() {
        assert_eq!(non_blank(Some("  ".to_string())), None);
        assert_eq!(non_blank(Some(" x ".to_string())), Some("x".to_string()));
        assert_eq!(text_change(None), None);
        assert_eq!(text_change(Some("".to_string())), Some(None));
        assert_eq!(
            text_change(Some("@dj".to_string())),
            Some(Some("@dj".to_string()))
        );
    }

    #[test]
    fn absent_and_null_fields_are_told_apart() {
        #[derive(Deserialize)]
        struct Edit {
            #[serde(default, deserialize_with = "present")]
            assignee_id: Option<Option<i32>>,
        }

        let parse = |body: &str| serde_json::from_str::<Edit>(body).unwrap().assignee_id;
        assert_eq!(parse("{}"), None);
        assert_eq!(parse(r#"{"assignee_id": null}"#), Some(None));
        assert_eq!(parse(r#"{"assignee_id": 3}"#), Some(Some(3)));
    }

    #[test]
    fn slot_times_are_normalised() {
        assert_eq!(parse_slot_time("17:00", "start_time").unwrap(), "17:00");
        assert_eq!(parse_slot_time("00:30", "start_time").unwrap(), "00:30");
        assert!(parse_slot_time("25:00", "start_time").is_err());
        assert!(parse_slot_time("evening", "start_time").is_err());
    }

    #[test]
    fn session_order_puts_after_midnight_last() {
        let mut times = vec!["00:30", "22:30", "18:00", "02:30", "12:00"];
        times.sort_by(|a, b| session_order(a).cmp(&session_order(b)));
        assert_eq!(times, ["12:00", "18:00", "22:30", "00:30", "02:30"]);
    }

    #[test]
    fn login_tokens_differ() {
        assert_ne!(generate_login_token(1), generate_login_token(1));
        assert_eq!(hash_password("pw"), hash_password("pw"));
    }
}
