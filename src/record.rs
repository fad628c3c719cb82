//! Assembly of a complete log line: stamp, level tag and message.

use std::fmt::Write as _;
use std::panic::Location;

use once_cell::sync::Lazy;
use time::{OffsetDateTime, UtcOffset};

use crate::{Flags, Level};

// On Unix the local offset can only be queried while the process has a single
// thread. It is resolved when the first logger is built and falls back to UTC
// if other threads already exist by then.
static LOCAL_OFFSET: Lazy<UtcOffset> =
    Lazy::new(|| UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC));

/// Resolve the local offset now, ahead of the first record.
pub(crate) fn init_local_offset() {
    Lazy::force(&LOCAL_OFFSET);
}

/// Current wall-clock time in the local offset (UTC if it cannot be determined).
pub(crate) fn now() -> OffsetDateTime {
    OffsetDateTime::now_utc().to_offset(*LOCAL_OFFSET)
}

/// Render one newline-terminated record.
pub(crate) fn render(
    flags: Flags,
    level: Level,
    message: &str,
    location: &Location<'_>,
    at: OffsetDateTime,
) -> String {
    let mut line = String::with_capacity(message.len() + 48);
    write_stamp(&mut line, flags, location, at);
    line.push_str(level.tag());
    line.push(' ');
    line.push_str(message);
    if !line.ends_with('\n') {
        line.push('\n');
    }
    line
}

fn write_stamp(out: &mut String, flags: Flags, location: &Location<'_>, at: OffsetDateTime) {
    if flags.contains(Flags::DATE) {
        let _ = write!(
            out,
            "{:04}/{:02}/{:02} ",
            at.year(),
            u8::from(at.month()),
            at.day()
        );
    }
    if flags.intersects(Flags::TIME | Flags::MICROSECONDS) {
        let _ = write!(out, "{:02}:{:02}:{:02}", at.hour(), at.minute(), at.second());
        if flags.contains(Flags::MICROSECONDS) {
            let _ = write!(out, ".{:06}", at.microsecond());
        }
        out.push(' ');
    }
    if flags.intersects(Flags::SHORT_FILE | Flags::LONG_FILE) {
        let file = location.file();
        let file = if flags.contains(Flags::SHORT_FILE) {
            file.rsplit(['/', '\\']).next().unwrap_or(file)
        } else {
            file
        };
        let _ = write!(out, "{}:{}: ", file, location.line());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn at() -> OffsetDateTime {
        datetime!(2026-01-23 01:23:23.123456 UTC)
    }

    #[test]
    fn test_offset_resolved_when_logger_is_built() {
        let _logger = crate::Logger::new(std::io::sink());
        assert!(Lazy::get(&LOCAL_OFFSET).is_some());
        assert_eq!(now().offset(), *LOCAL_OFFSET);
    }

    #[test]
    fn test_render_std_with_microseconds() {
        let line = render(
            Flags::STD | Flags::MICROSECONDS,
            Level::Info,
            "hello",
            Location::caller(),
            at(),
        );
        assert_eq!(line, "2026/01/23 01:23:23.123456 [INFO ] hello\n");
    }

    #[test]
    fn test_render_without_stamp() {
        let line = render(Flags::NONE, Level::Warn, "careful", Location::caller(), at());
        assert_eq!(line, "[WARN ] careful\n");
    }

    #[test]
    fn test_render_keeps_existing_newline() {
        let line = render(Flags::NONE, Level::Error, "done\n", Location::caller(), at());
        assert_eq!(line, "[ERROR] done\n");
    }

    #[test]
    fn test_microseconds_imply_time() {
        let line = render(Flags::MICROSECONDS, Level::Debug, "x", Location::caller(), at());
        assert_eq!(line, "01:23:23.123456 [DEBUG] x\n");
    }

    #[test]
    fn test_short_file_overrides_long_file() {
        let here = Location::caller();
        let line = render(
            Flags::LONG_FILE | Flags::SHORT_FILE,
            Level::Info,
            "x",
            here,
            at(),
        );
        assert_eq!(line, format!("record.rs:{}: [INFO ] x\n", here.line()));

        let line = render(Flags::LONG_FILE, Level::Info, "x", here, at());
        assert!(line.starts_with(here.file()));
    }

    #[test]
    fn test_now_is_recent() {
        let delta = OffsetDateTime::now_utc() - now();
        assert!(delta.whole_seconds().abs() < 5);
    }
}
