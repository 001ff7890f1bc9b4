use super::SampleValue;

/// Shortest decimal that round-trips, never in exponent notation.
pub fn format_value(value: SampleValue) -> String {
    if value.is_nan() {
        String::from("NaN")
    } else if value == f64::INFINITY {
        String::from("+Inf")
    } else if value == f64::NEG_INFINITY {
        String::from("-Inf")
    } else {
        value.to_string()
    }
}

/// Parses a sample value as written by Prometheus and its exporters.
pub fn parse_value(s: &str) -> Option<SampleValue> {
    match s {
        "+Inf" | "Inf" => Some(f64::INFINITY),
        "-Inf" => Some(f64::NEG_INFINITY),
        "NaN" => Some(f64::NAN),
        _ => s.parse::<f64>().ok(),
    }
}
