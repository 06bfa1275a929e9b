//! Filter syntaxes turning a raw `--filter` argument into a [`CompiledFilter`].

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::compiled::CompiledFilter;
use crate::error::FilterError;

lazy_static! {
    // name#4, name#4-8
    static ref DATA_SET_INDEX: Regex = Regex::new(r"^(.*?)#(\d+)(?:-(\d+))?$").unwrap();
    // name@key, name@key.*
    static ref DATA_SET_NAME: Regex = Regex::new(r"^(.*?)@(.+)$").unwrap();
}

/// Capability shared by every filter syntax
pub trait PrepareFilter {
    fn prepare(&self, raw: &str) -> Result<CompiledFilter, FilterError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterSyntax {
    /// Delimited regex (`/body/flags`) or a case-insensitive regex with
    /// `#N`, `#N-M` and `@key` data set shorthands.
    ///
    /// Patterns use the `regex` crate dialect: lookaround and backreferences
    /// are not available, and a literal relying on them falls back to the
    /// shorthand reading, which then matches nothing. Delimited literals must
    /// start at the first character and only take the `i m s x U u D` flags.
    #[default]
    Pattern,
    /// Literal text found anywhere in the full name, case-insensitive
    Substring,
    /// Literal `Type::name`, optionally followed by a data set shorthand
    #[serde(alias = "exact")]
    ExactName,
}

impl FilterSyntax {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterSyntax::Pattern => "pattern",
            FilterSyntax::Substring => "substring",
            FilterSyntax::ExactName => "exact_name",
        }
    }
}

impl fmt::Display for FilterSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterSyntax {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pattern" | "regex" => Ok(FilterSyntax::Pattern),
            "substring" | "text" => Ok(FilterSyntax::Substring),
            "exact" | "exact_name" | "exact-name" => Ok(FilterSyntax::ExactName),
            _ => Err(FilterError::UnknownSyntax(s.to_string())),
        }
    }
}

impl PrepareFilter for FilterSyntax {
    fn prepare(&self, raw: &str) -> Result<CompiledFilter, FilterError> {
        if raw.is_empty() {
            return Err(FilterError::EmptyFilter);
        }

        let compiled = match self {
            FilterSyntax::Pattern => prepare_pattern(raw),
            FilterSyntax::Substring => CompiledFilter::new(format!("(?i){}", regex::escape(raw))),
            FilterSyntax::ExactName => prepare_exact_name(raw),
        }?;

        tracing::debug!(
            syntax = %self,
            filter = %raw,
            pattern = %compiled.pattern(),
            "Prepared name filter"
        );
        Ok(compiled)
    }
}

/// Data set shorthand trailing a filter
#[derive(Debug, PartialEq, Eq)]
enum DataSetSuffix<'a> {
    None,
    Index(&'a str),
    Range(i64, i64),
    Named(&'a str),
}

fn split_data_set_suffix(raw: &str) -> (&str, DataSetSuffix<'_>) {
    if let Some(caps) = DATA_SET_INDEX.captures(raw) {
        let name = caps.get(1).map_or("", |m| m.as_str());
        let first = caps.get(2).map_or("", |m| m.as_str());

        // An empty or inverted range selects only its first index
        let range = caps
            .get(3)
            .map(|last| last.as_str())
            .filter(|last| digits_less_than(first, last))
            .map(|last| (saturating_index(first), saturating_index(last)));

        return match range {
            Some((minimum, maximum)) => (name, DataSetSuffix::Range(minimum, maximum)),
            None => (name, DataSetSuffix::Index(first)),
        };
    }

    if let Some(caps) = DATA_SET_NAME.captures(raw) {
        let name = caps.get(1).map_or("", |m| m.as_str());
        let key = caps.get(2).map_or("", |m| m.as_str());
        return (name, DataSetSuffix::Named(key));
    }

    (raw, DataSetSuffix::None)
}

/// Numeric `a < b` for two runs of ASCII digits of any length
fn digits_less_than(a: &str, b: &str) -> bool {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    (a.len(), a) < (b.len(), b)
}

/// Index bound from a run of ASCII digits, saturating at `i64::MAX`
fn saturating_index(digits: &str) -> i64 {
    digits.parse().unwrap_or(i64::MAX)
}

fn prepare_pattern(raw: &str) -> Result<CompiledFilter, FilterError> {
    if let Some(pattern) = delimited_regex(raw) {
        return CompiledFilter::new(pattern);
    }

    // Regex metacharacters in the name part are kept on purpose
    let (name, suffix) = split_data_set_suffix(raw);
    match suffix {
        DataSetSuffix::None => CompiledFilter::new(format!("(?i){}", raw)),
        DataSetSuffix::Index(index) => {
            CompiledFilter::new(format!("(?i){}.*with data set #{}$", name, index))
        }
        DataSetSuffix::Range(minimum, maximum) => CompiledFilter::with_data_set_range(
            format!(r"(?i){}.*with data set #(\d+)$", name),
            minimum,
            maximum,
        ),
        DataSetSuffix::Named(key) => {
            CompiledFilter::new(format!("(?i){}.*with data set \"{}\"$", name, key))
        }
    }
}

fn prepare_exact_name(raw: &str) -> Result<CompiledFilter, FilterError> {
    let (name, suffix) = split_data_set_suffix(raw);
    let name = regex::escape(name);

    match suffix {
        DataSetSuffix::None => {
            CompiledFilter::new(format!(r#"^{}(?: with data set (?:#\d+|".*"))?$"#, name))
        }
        DataSetSuffix::Index(index) => {
            CompiledFilter::new(format!("^{} with data set #{}$", name, index))
        }
        DataSetSuffix::Range(minimum, maximum) => CompiledFilter::with_data_set_range(
            format!(r"^{} with data set #(\d+)$", name),
            minimum,
            maximum,
        ),
        DataSetSuffix::Named(key) => CompiledFilter::new(format!(
            "^{} with data set \"{}\"$",
            name,
            regex::escape(key)
        )),
    }
}

/// Translate a delimited regex literal such as `/foo.*bar/i` into a pattern
/// with inline flags. Returns `None` when `raw` is not a valid literal.
fn delimited_regex(raw: &str) -> Option<String> {
    let open = raw.chars().next()?;
    if !open.is_ascii_punctuation() || open == '\\' {
        return None;
    }
    let close = match open {
        '(' => ')',
        '[' => ']',
        '{' => '}',
        '<' => '>',
        other => other,
    };

    let rest = &raw[open.len_utf8()..];
    let end = rest.rfind(close)?;
    let body = &rest[..end];
    if body.is_empty() {
        return None;
    }

    let mut flags = String::new();
    for flag in rest[end + close.len_utf8()..].chars() {
        match flag {
            'i' | 'm' | 's' | 'x' | 'U' => {
                if !flags.contains(flag) {
                    flags.push(flag);
                }
            }
            // utf-8 mode and dollar-end-only are the engine's defaults
            'u' | 'D' => {}
            _ => return None,
        }
    }

    let pattern = if flags.is_empty() {
        body.to_string()
    } else {
        format!("(?{}){}", flags, body)
    };

    Regex::new(&pattern).ok().map(|_| pattern)
}
