use super::CellValue;

/// Format a number for display.
///
/// With no precision, uses the shortest representation that round-trips.
pub fn format_number(n: f64, precision: Option<usize>) -> String {
    if n.is_nan() {
        "#NAN!".to_string()
    } else if n.is_infinite() {
        "#INF!".to_string()
    } else if let Some(digits) = precision {
        format!("{:.*}", digits, n)
    } else {
        n.to_string()
    }
}

/// Format a cell value for display, writing `error_marker` for evaluation errors.
pub fn format_value(value: &CellValue, precision: Option<usize>, error_marker: &str) -> String {
    match value {
        CellValue::Text(s) => s.clone(),
        CellValue::Number(n) => format_number(*n, precision),
        CellValue::Error(_) => error_marker.to_string(),
    }
}
