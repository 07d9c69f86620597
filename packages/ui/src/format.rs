//! Small display and input helpers shared by the widgets.

/// Parse a latitude or longitude typed by the user. Accepts a comma as the
/// decimal separator. Empty input is `None`.
pub fn parse_coordinate(input: &str) -> Option<f64> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    input.replace(',', ".").parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Render a backend timestamp (`2024-05-01T10:00:00.123456`) as `2024-05-01 10:00`.
pub fn format_timestamp(raw: &str) -> String {
    match raw.split_once('T') {
        Some((date, time)) => {
            let minutes: String = time.chars().take(5).collect();
            format!("{date} {minutes}")
        }
        None => raw.to_string(),
    }
}
