use nom::{
    branch::alt,
    bytes::complete::is_not,
    character::complete::{char, one_of},
    combinator::map,
    multi::many0,
    sequence::{delimited, preceded},
};

use super::result::{IResult, Span};

/// Double-quoted label value. Exposition format only knows three escapes:
/// `\\`, `\"` and `\n`.
pub fn string_literal(input: Span) -> IResult<String> {
    let (rest, chunks) = delimited(
        char('"'),
        many0(alt((
            map(is_not("\\\""), |s: Span| String::from(*s.fragment())),
            map(preceded(char('\\'), one_of("\\\"n")), |c: char| match c {
                'n' => String::from("\n"),
                c => c.to_string(),
            }),
        ))),
        char('"'),
    )(input)?;
    Ok((rest, chunks.concat()))
}

#[cfg(test)]
mod tests {
    use super::super::result::ParseError;
    use super::*;

    #[test]
    fn test_string_literal() -> std::result::Result<(), ParseError<'static>> {
        #[rustfmt::skip]
        let tests = [
            (r#""""#, ""),
            (r#""node""#, "node"),
            (r#""a b=c""#, "a b=c"),
            (r#""say \"hi\"""#, "say \"hi\""),
            (r#""C:\\tmp""#, "C:\\tmp"),
            (r#""line\nbreak""#, "line\nbreak"),
        ];

        for (input, expected) in &tests {
            let (rest, actual) = string_literal(Span::new(input))?;
            assert_eq!(actual, *expected, "while parsing {}", input);
            assert_eq!(*rest.fragment(), "");
        }
        Ok(())
    }

    #[test]
    fn test_string_literal_invalid() {
        #[rustfmt::skip]
        let tests = [
            r#""unterminated"#,
            r#"no quotes"#,
            r#""bad \t escape""#,
        ];

        for input in &tests {
            if let Ok(res) = string_literal(Span::new(input)) {
                panic!("expected error but found {:?} while testing '{}'", res, input);
            }
        }
    }
}
