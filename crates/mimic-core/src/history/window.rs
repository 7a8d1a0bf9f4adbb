//! Bounded view of a chat log for prompt context.
//!
//! The log is cut three ways, in this order:
//! 1. **Size**: only the trailing `max_bytes` of the trimmed text survive. The
//!    cut is byte-based and may land mid-line (the first kept line can be a
//!    fragment of an older entry). A cut inside a multi-byte character skips
//!    ahead to the next character boundary.
//! 2. **Recency**: lines starting with `[DD/MM/YY` are dropped when that date
//!    is older than `today - max_age_months` calendar months. Lines without a
//!    stamp are continuation content of a multi-line message and are kept.
//!    Both the cutoff and the stamps roll over instead of clamping: 31 May
//!    minus three months is 3 March, and a `31/02` stamp reads as 3 March.
//! 3. **Count**: only the trailing `max_lines` lines survive.

use std::sync::LazyLock;

use chrono::{Datelike, Days, Local, Months, NaiveDate};
use regex::Regex;

use mimic_types::chat::SenderIdentity;
use mimic_types::config::WindowConfig;
use mimic_types::error::LogError;

use super::store::ChatLogStore;

static DATE_STAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(\d{2})/(\d{2})/(\d{2})").expect("date stamp pattern is valid")
});

/// Read `identity`'s log and return its windowed history.
///
/// Returns an empty string when no log exists. Uses the local calendar date
/// as "today".
pub async fn window<S: ChatLogStore>(
    store: &S,
    identity: &SenderIdentity,
    limits: &WindowConfig,
) -> Result<String, LogError> {
    let Some(text) = store.read(identity).await? else {
        return Ok(String::new());
    };
    Ok(window_text(&text, Local::now().date_naive(), limits))
}

/// Apply the size, recency and count bounds to raw log text.
pub fn window_text(text: &str, today: NaiveDate, limits: &WindowConfig) -> String {
    let bounded = tail_bytes(text.trim(), limits.max_bytes);
    let cutoff = months_before(today, limits.max_age_months);

    let recent: Vec<&str> = bounded
        .split('\n')
        .filter(|line| is_recent(line, cutoff))
        .collect();

    let start = recent.len().saturating_sub(limits.max_lines);
    recent[start..].join("\n")
}

/// Trailing `max` bytes of `text`, moved forward to a char boundary if needed.
fn tail_bytes(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut start = text.len() - max;
    while !text.is_char_boundary(start) {
        start += 1;
    }
    &text[start..]
}

fn is_recent(line: &str, cutoff: Option<NaiveDate>) -> bool {
    let Some(caps) = DATE_STAMP.captures(line) else {
        return true;
    };
    match stamp_date(&caps[1], &caps[2], &caps[3]) {
        // No representable cutoff means nothing is old enough to drop.
        Some(date) => cutoff.is_none_or(|c| date >= c),
        // Day or month out of range (e.g. 32/01, 15/13).
        None => false,
    }
}

fn stamp_date(day: &str, month: &str, year: &str) -> Option<NaiveDate> {
    let day: u32 = day.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let year: i32 = year.parse().ok()?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    rolled_date(NaiveDate::from_ymd_opt(2000 + year, month, 1)?, day)
}

/// `today` moved back `months` calendar months, keeping the day of month and
/// rolling into the following month when that day does not exist.
fn months_before(today: NaiveDate, months: u32) -> Option<NaiveDate> {
    let first = today.with_day(1)?.checked_sub_months(Months::new(months))?;
    rolled_date(first, today.day())
}

/// Day `day` of the month starting at `first`, overflowing past month end.
fn rolled_date(first: NaiveDate, day: u32) -> Option<NaiveDate> {
    first.checked_add_days(Days::new(u64::from(day) - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::store::MemoryChatLogStore;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn unbounded_lines() -> WindowConfig {
        WindowConfig {
            max_lines: usize::MAX,
            ..WindowConfig::default()
        }
    }

    fn dated(date: NaiveDate, body: &str) -> String {
        format!("[{}, 4:00:00 pm] User: {body}", date.format("%d/%m/%y"))
    }

    #[test]
    fn test_empty_log_windows_to_empty() {
        assert_eq!(window_text("", today(), &WindowConfig::default()), "");
        assert_eq!(window_text("  \n\n ", today(), &WindowConfig::default()), "");
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        let out = window_text("\n\n  hello\nworld \n\n", today(), &WindowConfig::default());
        assert_eq!(out, "hello\nworld");
    }

    #[test]
    fn test_size_bound_keeps_trailing_bytes_of_large_log() {
        // 3072 lines of 100 bytes = 300 KiB
        let mut text = String::from("MARKER-AT-START\n");
        for i in 0..3072 {
            text.push_str(&format!("{i:0>99}\n"));
        }
        let trimmed = text.trim();
        let out = window_text(&text, today(), &unbounded_lines());

        assert_eq!(out.len(), 204_800);
        assert_eq!(out, &trimmed[trimmed.len() - 204_800..]);
        assert!(!out.contains("MARKER-AT-START"));
    }

    #[test]
    fn test_size_bound_cut_may_start_mid_line() {
        // Byte cut, not line cut: the first surviving line is a fragment.
        let limits = WindowConfig {
            max_bytes: 8,
            ..WindowConfig::default()
        };
        let out = window_text("abcdefgh\nijkl", today(), &limits);
        assert_eq!(out, "fgh\nijkl");
    }

    #[test]
    fn test_size_bound_skips_partial_multibyte_char() {
        let limits = WindowConfig {
            max_bytes: 5,
            ..WindowConfig::default()
        };
        // "ééé" is 6 bytes; a 5-byte tail would start inside the first 'é'.
        let out = window_text("ééé", today(), &limits);
        assert_eq!(out, "éé");
    }

    #[test]
    fn test_recency_three_months_and_a_day_is_dropped() {
        let old = today() - Months::new(3) - chrono::Days::new(1);
        let recent = today() - Months::new(2);
        let text = format!("{}\n{}", dated(old, "old"), dated(recent, "recent"));

        let out = window_text(&text, today(), &WindowConfig::default());
        assert!(!out.contains("old"));
        assert!(out.contains("recent"));
    }

    #[test]
    fn test_recency_cutoff_day_itself_is_kept() {
        let cutoff = today() - Months::new(3);
        let text = dated(cutoff, "boundary");
        let out = window_text(&text, today(), &WindowConfig::default());
        assert!(out.contains("boundary"));
    }

    #[test]
    fn test_recency_undated_continuation_after_old_line_is_kept() {
        let old = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let text = format!(
            "{}\nsecond line of the old message\n{}",
            dated(old, "old"),
            dated(today(), "new")
        );
        let out = window_text(&text, today(), &WindowConfig::default());
        let lines: Vec<&str> = out.split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "second line of the old message");
        assert!(lines[1].ends_with("User: new"));
    }

    #[test]
    fn test_recency_cutoff_rolls_over_short_months() {
        // 31 May minus three months is "31 Feb", which rolls to 3 Mar.
        let today = NaiveDate::from_ymd_opt(2026, 5, 31).unwrap();
        let text = [
            "[28/02/26, 1:00:00 pm] User: feb-end",
            "[01/03/26, 1:00:00 pm] User: mar-1",
            "[02/03/26, 1:00:00 pm] User: mar-2",
            "[03/03/26, 1:00:00 pm] User: mar-3",
        ]
        .join("\n");

        let out = window_text(&text, today, &WindowConfig::default());
        assert_eq!(out, "[03/03/26, 1:00:00 pm] User: mar-3");
    }

    #[test]
    fn test_months_before_matches_plain_subtraction_mid_month() {
        assert_eq!(months_before(today(), 3), Some(today() - Months::new(3)));
        assert_eq!(
            months_before(NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(), 1),
            NaiveDate::from_ymd_opt(2026, 3, 3)
        );
    }

    #[test]
    fn test_stamp_must_start_the_line() {
        let out = window_text(
            "quoted: [01/01/20, 1:00:00 pm] User: ancient",
            today(),
            &WindowConfig::default(),
        );
        assert!(out.contains("ancient"));
    }

    #[test]
    fn test_overflowing_day_rolls_into_next_month() {
        // 31/02/26 reads as 3 Mar 2026, inside the window from 1 Jan.
        let today = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
        let text = "[31/02/26, 1:00:00 pm] User: rolled-over";
        let out = window_text(text, today, &WindowConfig::default());
        assert_eq!(out, text);
    }

    #[test]
    fn test_out_of_range_day_or_month_is_dropped() {
        let text = [
            "[32/01/26, 1:00:00 pm] User: day-32",
            "[00/03/26, 1:00:00 pm] User: day-0",
            "[15/13/26, 1:00:00 pm] User: month-13",
            "kept",
        ]
        .join("\n");
        let out = window_text(&text, today(), &WindowConfig::default());
        assert_eq!(out, "kept");
    }

    #[test]
    fn test_count_bound_keeps_last_400_in_order() {
        let text: Vec<String> = (0..500).map(|i| format!("msg {i}")).collect();
        let out = window_text(&text.join("\n"), today(), &WindowConfig::default());
        let lines: Vec<&str> = out.split('\n').collect();

        assert_eq!(lines.len(), 400);
        assert_eq!(lines[0], "msg 100");
        assert_eq!(lines[399], "msg 499");
    }

    #[test]
    fn test_count_bound_applies_after_recency_filter() {
        let old = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut lines = Vec::new();
        for i in 0..5 {
            lines.push(dated(today(), &format!("new {i}")));
            lines.push(dated(old, &format!("old {i}")));
        }
        let limits = WindowConfig {
            max_lines: 3,
            ..WindowConfig::default()
        };
        let out = window_text(&lines.join("\n"), today(), &limits);
        let kept: Vec<&str> = out.split('\n').collect();
        assert_eq!(kept.len(), 3);
        assert!(kept[0].ends_with("new 2"));
        assert!(kept[2].ends_with("new 4"));
    }

    #[tokio::test]
    async fn test_window_missing_log_is_empty() {
        let store = MemoryChatLogStore::new();
        let out = window(&store, &"nobody".into(), &WindowConfig::default())
            .await
            .unwrap();
        assert_eq!(out, "");
    }

    #[tokio::test]
    async fn test_window_reads_freshly_appended_lines() {
        let store = MemoryChatLogStore::new();
        let id = SenderIdentity::from("A");
        store.append(&id, "User", "hi").await.unwrap();

        let out = window(&store, &id, &WindowConfig::default()).await.unwrap();
        assert!(out.starts_with('['));
        assert!(out.ends_with("] User: hi"));
        assert_eq!(out.lines().count(), 1);
    }

    #[tokio::test]
    async fn test_window_drops_stale_lines_from_existing_log() {
        let store = MemoryChatLogStore::new();
        let id = SenderIdentity::from("A");
        store.insert_raw(
            &id,
            "[01/01/20, 9:00:00 am] User: long ago\n[01/01/20, 9:00:05 am] Persona: yes\n",
        );
        store.append(&id, "User", "hi again").await.unwrap();

        let out = window(&store, &id, &WindowConfig::default()).await.unwrap();
        assert_eq!(out.lines().count(), 1);
        assert!(out.ends_with("] User: hi again"));
    }
}
