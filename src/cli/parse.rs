use gradecheck_core::config::MatchMode;
use gradecheck_core::format::OutputFormat;

/// Parse output format from string
pub fn parse_format(s: &str) -> std::result::Result<OutputFormat, String> {
    s.parse::<OutputFormat>().map_err(|e| e.to_string())
}

/// Parse keyword match mode from string
pub fn parse_match_mode(s: &str) -> std::result::Result<MatchMode, String> {
    s.parse::<MatchMode>().map_err(|e| e.to_string())
}

/// Parse a threshold in `0.0..=1.0`
pub fn parse_threshold(s: &str) -> std::result::Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{} is outside 0.0..=1.0", value))
    }
}
