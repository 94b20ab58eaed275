//! Localized date display.

use crate::i18n::Translator;
use chrono::{Datelike, NaiveDate};

const MONTHS: [&str; 12] = [
    "month-january",
    "month-february",
    "month-march",
    "month-april",
    "month-may",
    "month-june",
    "month-july",
    "month-august",
    "month-september",
    "month-october",
    "month-november",
    "month-december",
];

/// Format as `<Month> <day>, <year>` with the month name translated.
pub fn format_date(translator: &Translator, date: NaiveDate) -> String {
    let month = translator.t(MONTHS[date.month0() as usize]);
    format!("{} {}, {}", month, date.day(), date.year())
}
