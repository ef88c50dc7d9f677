//! Format string classification, formatting and parsing.
//!
//! Formats use date-fns style tokens such as `yyyy-MM-dd HH:mm:ss`. A token is
//! a run of one repeated ASCII letter. Text wrapped in single quotes is a
//! literal and never counts as a token; `''` is an escaped quote.
//!
//! Classification is total: letters the calendar does not understand are
//! ignored instead of reported.

use std::{borrow::Cow, fmt::Write as _};

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::{
    date::try_page_date,
    error::{CalendarError, Result},
    locale::CalendarLocale,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token<'a> {
    Field { symbol: char, width: usize },
    Literal(Cow<'a, str>),
}

fn tokenize(format: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut chars = format.char_indices().peekable();
    while let Some((start, ch)) = chars.next() {
        if ch == '\'' {
            if chars.next_if(|&(_, next)| next == '\'').is_some() {
                tokens.push(Token::Literal(Cow::Borrowed("'")));
                continue;
            }
            let mut text = String::new();
            while let Some((_, next)) = chars.next() {
                if next != '\'' {
                    text.push(next);
                } else if chars.next_if(|&(_, c)| c == '\'').is_some() {
                    text.push('\'');
                } else {
                    break;
                }
            }
            tokens.push(Token::Literal(Cow::Owned(text)));
        } else if ch.is_ascii_alphabetic() {
            let mut width = 1;
            while chars.next_if(|&(_, next)| next == ch).is_some() {
                width += 1;
            }
            tokens.push(Token::Field { symbol: ch, width });
        } else {
            let mut end = start + ch.len_utf8();
            while let Some((idx, next)) =
                chars.next_if(|&(_, next)| next != '\'' && !next.is_ascii_alphabetic())
            {
                end = idx + next.len_utf8();
            }
            tokens.push(Token::Literal(Cow::Borrowed(&format[start..end])));
        }
    }
    tokens
}

#[derive(Debug, Clone, Copy, Default)]
struct Symbols {
    year: bool,
    month: bool,
    day: bool,
    hour: bool,
    minute: bool,
    second: bool,
    meridian: bool,
}

impl Symbols {
    fn scan(format: &str) -> Self {
        let mut symbols = Self::default();
        for token in tokenize(format) {
            let Token::Field { symbol, .. } = token else {
                continue;
            };
            match symbol {
                'y' | 'Y' => symbols.year = true,
                'M' => symbols.month = true,
                'd' | 'D' => symbols.day = true,
                'H' | 'h' => symbols.hour = true,
                'm' => symbols.minute = true,
                's' => symbols.second = true,
                'a' | 'A' => symbols.meridian = true,
                _ => {}
            }
        }
        symbols
    }
}

/// Which calendar units a format string encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormatCapabilities {
    /// A day can be picked: the format has a year and a day token.
    pub has_date: bool,
    /// A time can be picked: the format has an hour, minute or second token.
    pub has_time: bool,
    /// A month can be picked: the format has a year and a month token.
    pub has_month: bool,
}

impl FormatCapabilities {
    /// Classifies a format string.
    pub fn from_format(format: &str) -> Self {
        let symbols = Symbols::scan(format);
        Self {
            has_date: symbols.year && symbols.day,
            has_time: symbols.hour || symbols.minute || symbols.second,
            has_month: symbols.year && symbols.month,
        }
    }

    /// The format encodes a time and nothing else.
    pub fn only_time(&self) -> bool {
        self.has_time && !self.has_date && !self.has_month
    }

    /// The format encodes a month and nothing else.
    pub fn only_month(&self) -> bool {
        self.has_month && !self.has_date && !self.has_time
    }

    /// The format encodes no unit at all.
    pub fn is_empty(&self) -> bool {
        !(self.has_date || self.has_time || self.has_month)
    }
}

/// Returns true when the format encodes a selectable day.
pub fn has_date(format: &str) -> bool {
    FormatCapabilities::from_format(format).has_date
}

/// Returns true when the format encodes a time of day.
pub fn has_time(format: &str) -> bool {
    FormatCapabilities::from_format(format).has_time
}

/// Returns true when the format encodes a selectable month.
pub fn has_month(format: &str) -> bool {
    FormatCapabilities::from_format(format).has_month
}

/// Returns true when the format contains an AM/PM marker.
pub fn has_meridian(format: &str) -> bool {
    Symbols::scan(format).meridian
}

/// Time units shown by the time panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeColumns {
    /// Hours column.
    pub hours: bool,
    /// Minutes column.
    pub minutes: bool,
    /// Seconds column.
    pub seconds: bool,
}

impl TimeColumns {
    /// Reads the time columns a format asks for.
    pub fn from_format(format: &str) -> Self {
        let symbols = Symbols::scan(format);
        Self {
            hours: symbols.hour,
            minutes: symbols.minute,
            seconds: symbols.second,
        }
    }

    /// No time column is shown.
    pub fn is_empty(&self) -> bool {
        !(self.hours || self.minutes || self.seconds)
    }
}

/// Builds the header's time pattern, e.g. `HH:mm:ss` or `hh:mm`.
pub fn time_format(columns: TimeColumns, show_meridian: bool) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(3);
    if columns.hours {
        parts.push(if show_meridian { "hh" } else { "HH" });
    }
    if columns.minutes {
        parts.push("mm");
    }
    if columns.seconds {
        parts.push("ss");
    }
    parts.join(":")
}

/// Renders `date` with a format string.
///
/// Unknown letters are copied through unchanged.
pub fn format_date(date: NaiveDateTime, format: &str, locale: &CalendarLocale) -> String {
    let mut out = String::with_capacity(format.len() + 8);
    for token in tokenize(format) {
        match token {
            Token::Literal(text) => out.push_str(&text),
            Token::Field { symbol, width } => write_field(&mut out, symbol, width, date, locale),
        }
    }
    out
}

fn write_field(
    out: &mut String,
    symbol: char,
    width: usize,
    date: NaiveDateTime,
    locale: &CalendarLocale,
) {
    match symbol {
        'y' | 'Y' if width == 2 => push_padded(out, i64::from(date.year().rem_euclid(100)), 2),
        'y' | 'Y' => push_padded(out, i64::from(date.year()), width),
        'M' if width >= 4 => out.push_str(locale.month_name(date.month())),
        'M' if width == 3 => out.push_str(locale.month_short_name(date.month())),
        'M' => push_padded(out, i64::from(date.month()), width),
        'd' | 'D' => push_padded(out, i64::from(date.day()), width.min(2)),
        'H' => push_padded(out, i64::from(date.hour()), width.min(2)),
        'h' => push_padded(out, i64::from(hour_for_display(date.hour())), width.min(2)),
        'm' => push_padded(out, i64::from(date.minute()), width.min(2)),
        's' => push_padded(out, i64::from(date.second()), width.min(2)),
        'a' | 'A' => out.push_str(locale.meridian(date.hour())),
        'E' => {
            let weekday = date.weekday().num_days_from_sunday() as usize;
            out.push_str(&locale.weekdays[weekday]);
        }
        other => out.extend(std::iter::repeat_n(other, width)),
    }
}

fn push_padded(out: &mut String, value: i64, width: usize) {
    let _ = write!(out, "{value:0width$}");
}

/// Twelve-hour clock value for a 24-hour hour.
pub(crate) fn hour_for_display(hour: u32) -> u32 {
    let hour = hour % 12;
    if hour == 0 { 12 } else { hour }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumericField {
    ShortYear,
    Year,
    Month,
    Day,
    Hour,
    Hour12,
    Minute,
    Second,
}

impl NumericField {
    fn from_token(symbol: char, width: usize) -> Option<Self> {
        let field = match symbol {
            'y' | 'Y' if width == 2 => Self::ShortYear,
            'y' | 'Y' => Self::Year,
            'M' if width <= 2 => Self::Month,
            'd' | 'D' => Self::Day,
            'H' => Self::Hour,
            'h' => Self::Hour12,
            'm' => Self::Minute,
            's' => Self::Second,
            _ => return None,
        };
        Some(field)
    }

    fn digits(self, width: usize) -> (usize, usize) {
        let max = match self {
            Self::Year => width.max(4),
            _ => 2,
        };
        let min = if width >= 2 { width.min(max) } else { 1 };
        (min, max)
    }
}

fn take_number(input: &str, min: usize, max: usize) -> Option<(u32, &str)> {
    let len = input
        .bytes()
        .take(max)
        .take_while(u8::is_ascii_digit)
        .count();
    if len < min {
        return None;
    }
    let (digits, rest) = input.split_at(len);
    digits.parse().ok().map(|value| (value, rest))
}

fn take_meridian(input: &str) -> Option<(bool, &str)> {
    let marker = input.get(..2)?;
    let is_pm = if marker.eq_ignore_ascii_case("pm") {
        true
    } else if marker.eq_ignore_ascii_case("am") {
        false
    } else {
        return None;
    };
    Some((is_pm, &input[2..]))
}

/// Parses `input` against a numeric format.
///
/// Units the format does not mention are taken from `base`, so a time-only
/// format keeps the base day. Text month names are not accepted.
pub fn parse_date(input: &str, format: &str, base: NaiveDateTime) -> Result<NaiveDateTime> {
    let fail = |reason: &'static str| CalendarError::Parse {
        input: input.to_string(),
        format: format.to_string(),
        reason,
    };

    let mut year = base.year();
    let (mut month, mut day) = (base.month(), base.day());
    let (mut hour, mut minute, mut second) = (base.hour(), base.minute(), base.second());
    let mut twelve_hour = false;
    let mut is_pm = base.hour() >= 12;
    let mut rest = input;

    for token in tokenize(format) {
        match token {
            Token::Literal(text) => {
                rest = rest
                    .strip_prefix(text.as_ref())
                    .ok_or_else(|| fail("literal text does not match"))?;
            }
            Token::Field {
                symbol: 'a' | 'A', ..
            } => {
                let (pm, tail) = take_meridian(rest).ok_or_else(|| fail("expected AM or PM"))?;
                is_pm = pm;
                rest = tail;
            }
            Token::Field { symbol, width } => {
                let field =
                    NumericField::from_token(symbol, width).ok_or_else(|| fail("unsupported token"))?;
                let (min, max) = field.digits(width);
                let (value, tail) =
                    take_number(rest, min, max).ok_or_else(|| fail("expected digits"))?;
                rest = tail;
                match field {
                    NumericField::ShortYear => year = 2000 + value as i32,
                    NumericField::Year => year = value as i32,
                    NumericField::Month => month = value,
                    NumericField::Day => day = value,
                    NumericField::Hour => hour = value,
                    NumericField::Hour12 => {
                        hour = value;
                        twelve_hour = true;
                    }
                    NumericField::Minute => minute = value,
                    NumericField::Second => second = value,
                }
            }
        }
    }

    if !rest.is_empty() {
        return Err(fail("unexpected trailing text"));
    }

    if twelve_hour {
        if !(1..=12).contains(&hour) {
            return Err(CalendarError::InvalidTime {
                hour,
                minute,
                second,
            });
        }
        hour %= 12;
        if is_pm {
            hour += 12;
        }
    }

    try_page_date(year, month, day, hour, minute, second)
}
