use std::fmt::{self, Display, Write};
use std::iter::FromIterator;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Value of a single option. Literals are emitted verbatim (numbers, `true`,
/// identifiers); strings are quoted and escaped.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum OptionValue {
  Literal(String),
  String(String),
}

impl OptionValue {
  pub fn literal(val: impl Into<String>) -> Self {
    Self::Literal(val.into())
  }

  pub fn string(val: impl Into<String>) -> Self {
    Self::String(val.into())
  }
}

impl Display for OptionValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Literal(x) => write!(f, "{}", x),
      Self::String(x) => write_quoted(f, x),
    }
  }
}

/// Writes `s` as a double-quoted literal. Non-printable characters are
/// escaped as `\xHH` below 0x80 and `\uHHHH` above.
fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
  f.write_char('"')?;
  for c in s.chars() {
    match c {
      '"' => f.write_str("\\\"")?,
      '\\' => f.write_str("\\\\")?,
      '\u{07}' => f.write_str("\\a")?,
      '\u{08}' => f.write_str("\\b")?,
      '\u{0c}' => f.write_str("\\f")?,
      '\n' => f.write_str("\\n")?,
      '\r' => f.write_str("\\r")?,
      '\t' => f.write_str("\\t")?,
      '\u{0b}' => f.write_str("\\v")?,
      c if c.is_control() && (c as u32) < 0x80 => write!(f, "\\x{:02x}", c as u32)?,
      c if c.is_control() => write!(f, "\\u{:04x}", c as u32)?,
      c => f.write_char(c)?,
    }
  }
  f.write_char('"')
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct OptionEntry {
  pub name: String,
  pub value: OptionValue,
}

impl Display for OptionEntry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} = {}", self.name, self.value)
  }
}

/// Options attached to a package, message, field, enum, enum value or rpc.
///
/// Insertion order is kept for inspection, but rendering must go through
/// [`Options::sorted`], which orders entries by name.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options(IndexMap<String, OptionValue>);

impl Options {
  pub fn new() -> Self {
    Self::default()
  }

  /// Sets an option, replacing and returning any previous value.
  pub fn insert(&mut self, name: impl Into<String>, value: OptionValue) -> Option<OptionValue> {
    self.0.insert(name.into(), value)
  }

  pub fn get(&self, name: &str) -> Option<&OptionValue> {
    self.0.get(name)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
    self.0.iter().map(|(k, v)| (k.as_str(), v))
  }

  pub fn sorted(&self) -> Vec<OptionEntry> {
    let mut entries = self
      .0
      .iter()
      .map(|(name, value)| OptionEntry {
        name: name.clone(),
        value: value.clone(),
      })
      .collect::<Vec<_>>();
    // `sort_by` is stable.
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
  }
}

impl<K: Into<String>> FromIterator<(K, OptionValue)> for Options {
  fn from_iter<T: IntoIterator<Item = (K, OptionValue)>>(iter: T) -> Self {
    Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
  }
}

impl<K: Into<String>> Extend<(K, OptionValue)> for Options {
  fn extend<T: IntoIterator<Item = (K, OptionValue)>>(&mut self, iter: T) {
    self.0.extend(iter.into_iter().map(|(k, v)| (k.into(), v)));
  }
}
