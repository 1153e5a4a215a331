// Death line parser
// Classifies a single action-log line as a death event or not

use chrono::{DateTime, Duration, Local, LocalResult, NaiveDateTime, Offset, TimeZone};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::entities::DeathEvent;

pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static DEATH_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^([0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}): ACTION\[Server\]: ([^ ]+) dies at \((-?[0-9]+),(-?[0-9]+),(-?[0-9]+)\)\. Bones placed$",
    )
    .expect("death line pattern compiles")
});

/// Parses `line`, stamping `discovered_at` with the current time.
pub fn parse_death_line(line: &str) -> Option<DeathEvent> {
    parse_death_line_at(line, Local::now())
}

/// Parses `line` with an explicit discovery time. Anything that does not match
/// the full grammar, including lines that almost match, yields `None`.
pub fn parse_death_line_at(line: &str, discovered_at: DateTime<Local>) -> Option<DeathEvent> {
    let caps = DEATH_LINE.captures(line)?;

    let timestamp = parse_log_timestamp(&caps[1])?;
    let x = caps[3].parse::<i64>().ok()?;
    let y = caps[4].parse::<i64>().ok()?;
    let z = caps[5].parse::<i64>().ok()?;

    Some(DeathEvent {
        timestamp,
        player: caps[2].to_string(),
        x,
        y,
        z,
        raw_line: line.to_string(),
        discovered_at,
    })
}

/// Interprets a log timestamp as local wall-clock time.
pub fn parse_log_timestamp(raw: &str) -> Option<DateTime<Local>> {
    let naive = NaiveDateTime::parse_from_str(raw, LOG_TIMESTAMP_FORMAT).ok()?;
    resolve_wall_clock(&Local, &naive)
}

/// Maps a wall-clock reading in `tz` to an instant. Ambiguous readings (DST
/// fold) take the earlier instant. Readings inside a DST gap are taken with
/// the offset in force before the jump, so 02:30 on a spring-forward night
/// lands on 03:30.
pub fn resolve_wall_clock<Tz: TimeZone>(tz: &Tz, naive: &NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(naive) {
        LocalResult::Single(instant) => Some(instant),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => {
            let day_before = naive.checked_sub_signed(Duration::days(1))?;
            let offset = tz.from_local_datetime(&day_before).earliest()?.offset().fix();
            let utc = naive
                .checked_sub_signed(Duration::seconds(i64::from(offset.local_minus_utc())))?;
            Some(tz.from_utc_datetime(&utc))
        }
    }
}
