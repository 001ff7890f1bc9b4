use nom::{
    bytes::complete::is_not,
    character::complete::{char as nom_char, digit1, one_of, space0, space1},
    combinator::{opt, recognize},
    sequence::{pair, preceded},
};

use super::common::{label_identifier, maybe_padded, metric_identifier, separated_list};
use super::result::{IResult, ParseError, Span};
use super::string::string_literal;
use crate::error::{Error, Result};
use crate::model::{parse_value, Labels, MetricName, Sample, SampleValue, METRIC_NAME_LABEL};

// # HELP http_requests_total The total number of HTTP requests.
// # TYPE http_requests_total counter
// http_requests_total{method="post",code="200"} 1027 1395066363000
// http_requests_total{method="post",code="400"}    3 1395066363000
//
// Every sample line becomes one Sample, histogram and summary series
// included (`_bucket`, `_sum`, `_count`, quantiles). Timestamps are dropped.
pub fn parse_exposition(text: &str) -> Result<Vec<Sample>> {
    let mut samples = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let sample = parse_sample_line(line).map_err(|e| {
            Error::from(format!(
                "exposition parse error at line {}, column {}: {}",
                line_no + 1,
                e.column(),
                e.message()
            ))
        })?;

        samples.push(sample);
    }

    Ok(samples)
}

fn parse_sample_line(line: &str) -> std::result::Result<Sample, ParseError<'_>> {
    let (rest, (name, pairs, value)) = sample_line(Span::new(line))?;

    if !rest.fragment().trim().is_empty() {
        return Err(ParseError::partial("sample line", "end of line", rest));
    }

    let mut labels = Labels::new();
    for (label, label_value) in pairs {
        if label == METRIC_NAME_LABEL {
            return Err(ParseError::new(
                format!("label name '{}' is reserved", label),
                rest,
            ));
        }
        if labels.contains_key(&label) {
            return Err(ParseError::new(
                format!("duplicate label name '{}'", label),
                rest,
            ));
        }
        labels.insert(label, label_value);
    }

    Ok(Sample::with_name(name, labels, value))
}

fn sample_line(input: Span) -> IResult<(MetricName, Vec<(String, String)>, SampleValue)> {
    let (rest, name) = preceded(space0, metric_identifier)(input)?;

    let (rest, pairs) = opt(preceded(
        space0,
        separated_list('{', '}', ',', label_pair, "label set", "label"),
    ))(rest)?;

    let (rest, value) = preceded(space1, sample_value)(rest)?;

    // Optional timestamp in milliseconds, validated and discarded.
    let (rest, _) = opt(preceded(space1, recognize(pair(opt(one_of("+-")), digit1))))(rest)?;

    Ok((rest, (name, pairs.unwrap_or_default(), value)))
}

fn label_pair(input: Span) -> IResult<(String, String)> {
    let (rest, label) = label_identifier(input)?;
    let (rest, _) = maybe_padded(nom_char('='))(rest)?;
    let (rest, value) = string_literal(rest)?;
    Ok((rest, (label, value)))
}

fn sample_value(input: Span) -> IResult<SampleValue> {
    let (rest, token) = is_not(" \t")(input)?;
    match parse_value(token.fragment()) {
        Some(value) => Ok((rest, value)),
        None => Err(nom::Err::Failure(ParseError::new(
            format!("invalid sample value '{}'", token.fragment()),
            token,
        ))),
    }
}
