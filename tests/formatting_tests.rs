use contrato_server::generators::common::{
    format_currency, format_date, format_euro, DateFormat, CURRENCY_FALLBACK,
};
use regex::Regex;
use serde_json::{json, Value};

fn amount_pattern() -> Regex {
    Regex::new(r"^\d{1,3}(\.\d{3})*,\d{2}$").unwrap()
}

#[test]
fn test_format_currency_is_total() {
    let pattern = amount_pattern();
    let inputs = vec![
        None,
        Some(Value::Null),
        Some(json!("")),
        Some(json!("abc")),
        Some(json!("1234,56")),
        Some(json!("1.234,56")),
        Some(json!("12.500")),
        Some(json!("€ 99,9")),
        Some(json!("1,2,3")),
        Some(json!("..")),
        Some(json!(0)),
        Some(json!(-15)),
        Some(json!(1e20)),
        Some(json!(0.004)),
        Some(json!(true)),
        Some(json!([1, 2])),
        Some(json!({ "valor": 1 })),
    ];

    for input in inputs {
        let formatted = format_currency(input.as_ref());
        assert!(
            pattern.is_match(&formatted),
            "{input:?} formatted as {formatted:?}"
        );
    }
}

#[test]
fn test_format_currency_examples() {
    assert_eq!(format_currency(Some(&json!("1234,56"))), "1.234,56");
    assert_eq!(format_currency(Some(&json!("abc"))), CURRENCY_FALLBACK);
    assert_eq!(format_currency(None), CURRENCY_FALLBACK);
}

#[test]
fn test_format_euro_places_symbol_after_amount() {
    assert_eq!(format_euro(Some(&json!(1234.56))), "1.234,56 €");
    assert_eq!(format_euro(Some(&json!("abc"))), "0,00 €");
}

#[test]
fn test_format_date_both_policies() {
    let date = json!("2025-09-11");
    assert_eq!(format_date(Some(&date), DateFormat::SHORT), "11/09/2025");
    assert_eq!(
        format_date(Some(&date), DateFormat::LONG),
        "11 de setembro de 2025"
    );

    let empty = json!("");
    assert_eq!(format_date(Some(&empty), DateFormat::SHORT), "");
    assert_eq!(format_date(Some(&empty), DateFormat::LONG), "N/A");
}

#[test]
fn test_format_date_passes_unknown_shapes_through() {
    for raw in ["11-09-2025", "2025/09/11", "2025-9-11", "setembro"] {
        assert_eq!(format_date(Some(&json!(raw)), DateFormat::SHORT), raw);
    }
    assert_eq!(format_date(Some(&json!(20250911)), DateFormat::SHORT), "20250911");
}
