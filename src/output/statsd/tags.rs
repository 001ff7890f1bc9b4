use std::fmt;

use crate::error::{Error, Result};
use crate::model::{LabelsTrait, Sample};

/// DogStatsD `key:value` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    key: String,
    value: String,
}

impl Tag {
    pub fn new<K, V>(key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.key, self.value)
    }
}

/// Splits the `--global-tags` flag value (`foo:bar,baz:qux`) into entries.
pub fn split_global_tags(flag: &str) -> Vec<String> {
    let flag = flag.trim();
    if flag.is_empty() {
        return vec![];
    }
    flag.split(',').map(String::from).collect()
}

/// Parses `key:value` entries. The key ends at the first colon, so
/// `env:staging:east` is `env` = `staging:east`. Blank entries are skipped.
pub fn parse_global_tags<S: AsRef<str>>(entries: &[S]) -> Result<Vec<Tag>> {
    let mut tags = Vec::with_capacity(entries.len());

    for entry in entries {
        let entry = entry.as_ref();
        if entry.trim().is_empty() {
            continue;
        }

        match entry.split_once(':') {
            Some((key, value)) => tags.push(Tag::new(key.trim(), value.trim())),
            None => {
                return Err(Error::config(&format!(
                    "global tag '{}' is not in key:value form",
                    entry
                )))
            }
        }
    }

    Ok(tags)
}

/// Global tags first, then every non-name label of the sample. Nothing is
/// deduplicated.
pub fn merge_tags(global: &[Tag], sample: &Sample) -> Vec<Tag> {
    let mut tags = global.to_vec();
    tags.extend(
        sample
            .labels()
            .tags()
            .into_iter()
            .map(|(label, value)| Tag::new(label.as_str(), value.as_str())),
    );
    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::Labels;

    #[test]
    fn test_parse_global_tags() -> Result<()> {
        #[rustfmt::skip]
        let tests: Vec<(&str, Vec<Tag>)> = vec![
            ("", vec![]),
            ("  ", vec![]),
            ("foo:bar", vec![Tag::new("foo", "bar")]),
            (" foo : bar ,baz:qux", vec![Tag::new("foo", "bar"), Tag::new("baz", "qux")]),
            ("env:staging:east", vec![Tag::new("env", "staging:east")]),
            ("a:1,,b:2,", vec![Tag::new("a", "1"), Tag::new("b", "2")]),
            ("empty:", vec![Tag::new("empty", "")]),
        ];

        for (flag, expected) in &tests {
            assert_eq!(parse_global_tags(&split_global_tags(flag))?, *expected, "flag {:?}", flag);
        }
        Ok(())
    }

    #[test]
    fn test_parse_global_tags_invalid() {
        match parse_global_tags(&["ok:1", "novalue"]) {
            Ok(tags) => panic!("expected error, got {:?}", tags),
            Err(err) => assert_eq!(err.kind(), ErrorKind::Configuration),
        }
    }

    #[test]
    fn test_merge_tags() {
        let labels = [("__name__", "cpu"), ("host", "a"), ("env", "dev")]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<Labels>();
        let sample = Sample::new(labels, 1.0);

        let global = vec![Tag::new("env", "prod"), Tag::new("dc", "eu")];

        assert_eq!(
            merge_tags(&global, &sample)
                .iter()
                .map(Tag::to_string)
                .collect::<Vec<_>>(),
            vec!["env:prod", "dc:eu", "env:dev", "host:a"]
        );
        assert_eq!(merge_tags(&[], &Sample::new(Labels::new(), 1.0)), vec![]);
    }
}
