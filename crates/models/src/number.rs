/// Parses a number typed into a form field.
///
/// Accepts anything that reads as a finite decimal number (`"30"`, `" 2.0 "`, `"1e2"`),
/// returning `None` for empty, non-numeric, infinite or NaN input.
pub(crate) fn parse_finite(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

/// Parses a finite number that is also a whole `i32`
pub(crate) fn parse_whole(raw: &str) -> Option<i32> {
    let value = parse_finite(raw)?;
    let in_range = value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX);

    (value.fract() == 0.0 && in_range).then_some(value as i32)
}

/// Treats a missing or blank field as absent
pub(crate) fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}
