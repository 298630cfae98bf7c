//! Common utilities for document generation.
//!
//! Shared helpers for currency and date formatting, placeholders, filename
//! sanitizing and the block groups both documents have in common. Every
//! formatter here is total: malformed input falls back to a display string
//! instead of an error.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use std::borrow::Cow;

use super::blocks::Block;
use super::record::InputRecord;

/// Blank line printed in place of a missing short field (NIF, phone, ...).
pub const PLACEHOLDER: &str = "____________";
/// Blank line printed in place of a missing name or address.
pub const PLACEHOLDER_LONG: &str = "______________________________";
/// Blank line printed in place of a missing date.
pub const PLACEHOLDER_DATE: &str = "__/__/____";

/// Returned by [`format_currency`] when the amount cannot be read.
pub const CURRENCY_FALLBACK: &str = "0,00";

const MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

lazy_static! {
    static ref ISO_DATE: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid ISO date pattern");
}

/// Format an amount European style: `.` groups thousands, `,` separates
/// two decimals (e.g. "1.234,56").
///
/// Strings are cleaned down to digits, `.` and `,`. When a comma is present
/// it is the decimal separator and dots are read as thousands separators.
/// Missing and non-numeric values count as zero; unparseable, negative or
/// non-finite amounts return [`CURRENCY_FALLBACK`].
pub fn format_currency(value: Option<&Value>) -> String {
    match parse_amount(value) {
        Some(amount) => group_amount(amount),
        None => CURRENCY_FALLBACK.to_string(),
    }
}

/// [`format_currency`] with the euro sign after the amount ("1.234,56 €").
/// This is the placement used by every document.
pub fn format_euro(value: Option<&Value>) -> String {
    format!("{} €", format_currency(value))
}

fn parse_amount(value: Option<&Value>) -> Option<f64> {
    let amount = match value {
        Some(Value::String(raw)) => parse_amount_str(raw)?,
        Some(Value::Number(number)) => number.as_f64()?,
        _ => 0.0,
    };

    if !amount.is_finite() || amount < 0.0 {
        return None;
    }

    // -0.0 passes the sign check but would print as "-0,00"
    Some(if amount == 0.0 { 0.0 } else { amount })
}

fn parse_amount_str(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();

    if cleaned.is_empty() {
        return Some(0.0);
    }

    let normalized = if cleaned.contains(',') {
        cleaned.replace('.', "").replace(',', ".")
    } else {
        cleaned
    };

    normalized.parse::<f64>().ok()
}

fn group_amount(amount: f64) -> String {
    let fixed = format!("{amount:.2}");
    let (integer, decimals) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    format!("{grouped},{decimals}")
}

/// How a `YYYY-MM-DD` value is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// `DD/MM/YYYY`
    Numeric,
    /// `11 de setembro de 2025`
    Extended,
}

/// A date rendering policy: the style plus what an empty value prints as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFormat {
    pub style: DateStyle,
    pub when_empty: &'static str,
}

impl DateFormat {
    /// Numeric dates; empty input stays empty so the caller can choose a placeholder.
    pub const SHORT: DateFormat = DateFormat {
        style: DateStyle::Numeric,
        when_empty: "",
    };

    /// Long Portuguese dates; empty input prints "N/A".
    pub const LONG: DateFormat = DateFormat {
        style: DateStyle::Extended,
        when_empty: "N/A",
    };
}

/// Reformat a `YYYY-MM-DD` value. Anything else, including impossible
/// calendar dates, is passed through unchanged.
pub fn format_date(value: Option<&Value>, format: DateFormat) -> String {
    let raw: Cow<'_, str> = match value {
        None | Some(Value::Null) => return format.when_empty.to_string(),
        Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
        Some(other) => Cow::Owned(other.to_string()),
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return format.when_empty.to_string();
    }

    if !ISO_DATE.is_match(trimmed) {
        return raw.into_owned();
    }

    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => match format.style {
            DateStyle::Numeric => format_date_short(date),
            DateStyle::Extended => format_date_long(date),
        },
        Err(_) => raw.into_owned(),
    }
}

/// Format a date as `DD/MM/YYYY`.
pub fn format_date_short(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Format a date in Portuguese long form (e.g. "11 de setembro de 2025").
pub fn format_date_long(date: NaiveDate) -> String {
    let month = MONTHS[(date.month0() as usize).min(MONTHS.len() - 1)];
    format!("{} de {} de {}", date.day(), month, date.year())
}

/// Sanitize a string for use in filenames.
///
/// Portuguese diacritics are folded to their base letter first, so
/// "João Conceição" becomes "joao-conceicao".
pub fn sanitize_filename(name: &str, fallback: &str) -> String {
    let mut result = String::new();
    let mut last_dash = false;

    for ch in name.trim().chars().map(fold_diacritic) {
        if ch.is_ascii_alphanumeric() {
            result.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if (ch.is_whitespace() || ch == '-' || ch == '_') && !last_dash && !result.is_empty()
        {
            result.push('-');
            last_dash = true;
        }
    }

    let result = result.trim_matches('-');
    if result.is_empty() {
        return fallback.to_string();
    }

    result.to_string()
}

/// Heading plus the identification lines of a party. Field keys are
/// `nome`, `nif`, `morada`, `telefone` and `email` followed by `suffix`
/// (e.g. "Vendedor").
///
/// The citizen card number is read from `card_key` and only printed when
/// filled, since companies have none.
pub fn party_blocks(record: &InputRecord, heading: &str, suffix: &str, card_key: &str) -> Vec<Block> {
    let field = |prefix: &str, placeholder: &str| {
        record.text_or(&format!("{prefix}{suffix}"), placeholder)
    };

    let mut lines = vec![
        ("Nome", field("nome", PLACEHOLDER_LONG)),
        ("NIF", field("nif", PLACEHOLDER)),
    ];
    if record.is_filled(card_key) {
        lines.push(("Cartão de Cidadão n.º", record.get_or(card_key, "")));
    }
    lines.extend([
        ("Morada", field("morada", PLACEHOLDER_LONG)),
        ("Telefone", field("telefone", PLACEHOLDER)),
        ("Email", field("email", PLACEHOLDER)),
    ]);

    vec![Block::section(heading), Block::labelled_lines(&lines)]
}

/// Numeric date at `key`, or [`PLACEHOLDER_DATE`] when blank.
pub fn short_date_or_placeholder(record: &InputRecord, key: &str) -> String {
    let formatted = format_date(record.field(key), DateFormat::SHORT);
    if formatted.trim().is_empty() {
        PLACEHOLDER_DATE.to_string()
    } else {
        formatted
    }
}

/// `OBSERVAÇÕES:` heading and text, only when `observacoes` is filled.
pub fn observation_blocks(record: &InputRecord) -> Vec<Block> {
    if !record.is_filled("observacoes") {
        return Vec::new();
    }

    vec![
        Block::section("OBSERVAÇÕES:"),
        Block::body(record.get_or("observacoes", "")),
    ]
}

/// Place and date line followed by the two signature lines.
///
/// The date is `dataAssinatura` when filled, otherwise the day of `now`.
pub fn closing_blocks(record: &InputRecord, now: NaiveDateTime, left: &str, right: &str) -> Vec<Block> {
    let date = if record.is_filled("dataAssinatura") {
        format_date(record.field("dataAssinatura"), DateFormat::SHORT)
    } else {
        format_date_short(now.date())
    };
    let place = record.text_or("localAssinatura", PLACEHOLDER);

    vec![
        Block::Spacer(20.0),
        Block::centered(format!("Data: {date}, Local: {place}")),
        Block::Spacer(40.0),
        Block::signatures(left, right),
    ]
}

fn fold_diacritic(ch: char) -> char {
    match ch {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'ç' => 'c',
        'Ç' => 'C',
        other => other,
    }
}
