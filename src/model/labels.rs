use std::collections::BTreeMap;
use std::fmt::Write;

pub type LabelName = String;

pub type LabelValue = String;

/// Label set of a single sample. Iteration is ordered by label name.
pub type Labels = BTreeMap<LabelName, LabelValue>;

pub const METRIC_NAME_LABEL: &str = "__name__";

pub trait LabelsTrait {
    fn name(&self) -> Option<&LabelValue>;

    /// All labels except the reserved metric name one.
    fn tags(&self) -> Vec<(&LabelName, &LabelValue)>;

    /// Prometheus metric string form, e.g. `up{instance="a:9100", job="node"}`.
    fn render(&self) -> String;
}

impl LabelsTrait for Labels {
    fn name(&self) -> Option<&LabelValue> {
        self.get(METRIC_NAME_LABEL)
    }

    fn tags(&self) -> Vec<(&LabelName, &LabelValue)> {
        self.iter()
            .filter(|(label, _)| label.as_str() != METRIC_NAME_LABEL)
            .collect()
    }

    fn render(&self) -> String {
        let name = self.name();

        let mut pairs = self
            .tags()
            .into_iter()
            .map(|(label, value)| format!("{}={}", label, quote(value)))
            .collect::<Vec<_>>();

        if pairs.is_empty() {
            return match name {
                Some(name) => name.clone(),
                None => String::from("{}"),
            };
        }

        // Sort the rendered pairs, not the names: "a1=..." goes before "a=...".
        pairs.sort();

        format!(
            "{}{{{}}}",
            name.map(String::as_str).unwrap_or(""),
            pairs.join(", ")
        )
    }
}

fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{7}' => out.push_str("\\a"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{b}' => out.push_str("\\v"),
            c if is_printable(c) => out.push(c),
            c if (c as u32) < 0x80 => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c if (c as u32) < 0x10000 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => {
                let _ = write!(out, "\\U{:08x}", c as u32);
            }
        }
    }
    out.push('"');
    out
}

// Controls, format characters and every separator except the ASCII space
// are escaped.
fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    if c.is_control() || c.is_whitespace() {
        return false;
    }
    !matches!(
        c,
        '\u{ad}'
            | '\u{600}'..='\u{605}'
            | '\u{61c}'
            | '\u{6dd}'
            | '\u{70f}'
            | '\u{180e}'
            | '\u{200b}'..='\u{200f}'
            | '\u{202a}'..='\u{202e}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{206f}'
            | '\u{e000}'..='\u{f8ff}'
            | '\u{feff}'
            | '\u{fff9}'..='\u{fffb}'
    )
}
