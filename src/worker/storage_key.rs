use chrono::{DateTime, Datelike, Local, TimeZone};

/// `{year}/{month}/{day}/{file_name}` with month and day left unpadded.
///
/// Calendar fields are taken in `now`'s own time zone.
pub fn build_key<Tz: TimeZone>(now: &DateTime<Tz>, file_name: &str) -> String {
    format!("{}/{}/{}/{}", now.year(), now.month(), now.day(), file_name)
}

/// [`build_key`] for the current moment in the process's local time zone.
pub fn build_key_now(file_name: &str) -> String {
    build_key(&Local::now(), file_name)
}
