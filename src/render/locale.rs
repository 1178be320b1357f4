//! @ai:module:intent Spanish wording for dates, counts and numbers in the report
//! @ai:module:layer domain
//! @ai:module:public_api long_date, evaluation_count, format_value
//! @ai:module:stateless true

use chrono::{Datelike, NaiveDate};

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// @ai:intent Long form date, e.g. "18 de octubre de 2026"
/// @ai:effects pure
pub fn long_date(date: NaiveDate) -> String {
    format!(
        "{} de {} de {}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

/// @ai:intent "1 evaluación" / "N evaluaciones"
/// @ai:effects pure
pub fn evaluation_count(count: usize) -> String {
    if count == 1 {
        "1 evaluación".to_string()
    } else {
        format!("{} evaluaciones", count)
    }
}

/// @ai:intent Number without trailing zeros, at most two decimals
/// @ai:effects pure
pub fn format_value(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;

    if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        format!("{:.2}", rounded).trim_end_matches('0').to_string()
    }
}
