//! Text and date facts derived from upstream post content.

use std::{fmt, str::FromStr};

use time::{Date, format_description::FormatItem, macros::format_description};

pub const WORDS_PER_MINUTE: usize = 200;
pub const DESCRIPTION_CHAR_LIMIT: usize = 160;

pub const HUMAN_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[month repr:long] [day padding:none], [year]");

const INDONESIAN_MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Language used for long calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateLocale {
    #[default]
    Indonesian,
    English,
}

impl DateLocale {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Indonesian => "id",
            Self::English => "en",
        }
    }
}

impl fmt::Display for DateLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateLocale {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "id" | "id-id" => Ok(Self::Indonesian),
            "en" | "en-us" | "en-gb" => Ok(Self::English),
            other => Err(format!("unsupported date locale `{other}` (expected `id` or `en`)")),
        }
    }
}

/// Long calendar date, e.g. `19 Oktober 2026` or `October 19, 2026`.
pub fn format_long_date(date: Date, locale: DateLocale) -> String {
    match locale {
        DateLocale::Indonesian => {
            let month = INDONESIAN_MONTHS[usize::from(u8::from(date.month())) - 1];
            format!("{} {} {}", date.day(), month, date.year())
        }
        DateLocale::English => date
            .format(HUMAN_DATE_FORMAT)
            .unwrap_or_else(|_| date.to_string()),
    }
}

/// Remove everything that looks like a markup tag (`<` up to the next `>`).
///
/// An unterminated `<` is kept as text.
pub fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        match rest[open..].find('>') {
            Some(close) => rest = &rest[open + close + 1..],
            None => {
                rest = &rest[open..];
                break;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Minutes needed to read `html` at a fixed words-per-minute pace, rounded up.
pub fn reading_minutes(html: &str) -> u32 {
    let words = strip_tags(html).split_whitespace().count();
    u32::try_from(words.div_ceil(WORDS_PER_MINUTE)).unwrap_or(u32::MAX)
}

pub fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn strip_tags_removes_markup_and_keeps_text() {
        assert_eq!(
            strip_tags("<p>Hello <strong>world</strong></p>"),
            "Hello world"
        );
        assert_eq!(strip_tags("a < b"), "a < b");
        assert_eq!(strip_tags("<br/>line<br>"), "line");
    }

    #[test]
    fn reading_time_rounds_up_per_two_hundred_words() {
        assert_eq!(reading_minutes(""), 0);
        assert_eq!(reading_minutes("<p>one</p>"), 1);

        let exactly = "word ".repeat(200);
        assert_eq!(reading_minutes(&exactly), 1);

        let over = format!("<p>{}</p>", "word ".repeat(201));
        assert_eq!(reading_minutes(&over), 2);
    }

    #[test]
    fn long_dates_follow_locale() {
        let day = date!(2026 - 10 - 19);
        assert_eq!(
            format_long_date(day, DateLocale::Indonesian),
            "19 Oktober 2026"
        );
        assert_eq!(format_long_date(day, DateLocale::English), "October 19, 2026");
        assert_eq!(
            format_long_date(date!(2025 - 03 - 01), DateLocale::Indonesian),
            "1 Maret 2025"
        );
    }

    #[test]
    fn locale_parsing_accepts_region_tags() {
        assert_eq!("id-ID".parse::<DateLocale>(), Ok(DateLocale::Indonesian));
        assert_eq!("EN".parse::<DateLocale>(), Ok(DateLocale::English));
        assert!("fr".parse::<DateLocale>().is_err());
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }
}
