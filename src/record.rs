use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// A single option value. Serialized without a tag so that `config.json`
/// stays a flat object of plain JSON scalars and string arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
  Bool(bool),
  Int(i64),
  Float(f64),
  Str(String),
  List(Vec<String>),
}

impl Value {
  pub fn kind(&self) -> &'static str {
    match self {
      Value::Bool(_) => "a flag",
      Value::Int(_) => "an integer",
      Value::Float(_) => "a float",
      Value::Str(_) => "a string",
      Value::List(_) => "a list",
    }
  }
}

impl fmt::Display for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Value::Bool(v) => write!(f, "{v}"),
      Value::Int(v) => write!(f, "{v}"),
      Value::Float(v) => write!(f, "{v}"),
      Value::Str(v) => f.write_str(v),
      Value::List(v) => write!(f, "[{}]", v.join(", ")),
    }
  }
}

impl From<bool> for Value {
  fn from(v: bool) -> Self {
    Value::Bool(v)
  }
}

impl From<i64> for Value {
  fn from(v: i64) -> Self {
    Value::Int(v)
  }
}

impl From<f64> for Value {
  fn from(v: f64) -> Self {
    Value::Float(v)
  }
}

impl From<String> for Value {
  fn from(v: String) -> Self {
    Value::Str(v)
  }
}

impl From<&str> for Value {
  fn from(v: &str) -> Self {
    Value::Str(v.to_owned())
  }
}

impl From<Vec<String>> for Value {
  fn from(v: Vec<String>) -> Self {
    Value::List(v)
  }
}

/// The parsed configuration of one tool invocation.
///
/// Which fields exist depends on the command that produced the record, so
/// lookups go through typed accessors that fail with
/// [`ConfigError::MissingField`] instead of falling back to a default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config {
  fields: BTreeMap<String, Value>,
}

impl Config {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn get(&self, name: &str) -> Option<&Value> {
    self.fields.get(name)
  }

  pub fn contains(&self, name: &str) -> bool {
    self.fields.contains_key(name)
  }

  pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
    self.fields.insert(name.into(), value.into())
  }

  pub fn remove(&mut self, name: &str) -> Option<Value> {
    self.fields.remove(name)
  }

  pub fn len(&self) -> usize {
    self.fields.len()
  }

  pub fn is_empty(&self) -> bool {
    self.fields.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
    self.fields.iter().map(|(k, v)| (k.as_str(), v))
  }

  fn field(&self, name: &str) -> Result<&Value> {
    self
      .fields
      .get(name)
      .ok_or_else(|| ConfigError::MissingField(name.to_owned()))
  }

  fn wrong_type(name: &str, expected: &'static str, found: &Value) -> ConfigError {
    ConfigError::WrongType {
      name: name.to_owned(),
      expected,
      found: found.kind(),
    }
  }

  pub fn str(&self, name: &str) -> Result<&str> {
    match self.field(name)? {
      Value::Str(v) => Ok(v),
      other => Err(Self::wrong_type(name, "a string", other)),
    }
  }

  pub fn int(&self, name: &str) -> Result<i64> {
    match self.field(name)? {
      Value::Int(v) => Ok(*v),
      other => Err(Self::wrong_type(name, "an integer", other)),
    }
  }

  /// Integers are accepted too, a hand-edited `config.json` may say `1` for `1.0`.
  pub fn float(&self, name: &str) -> Result<f64> {
    match self.field(name)? {
      Value::Float(v) => Ok(*v),
      Value::Int(v) => Ok(*v as f64),
      other => Err(Self::wrong_type(name, "a float", other)),
    }
  }

  pub fn flag(&self, name: &str) -> Result<bool> {
    match self.field(name)? {
      Value::Bool(v) => Ok(*v),
      other => Err(Self::wrong_type(name, "a flag", other)),
    }
  }

  pub fn list(&self, name: &str) -> Result<&[String]> {
    match self.field(name)? {
      Value::List(v) => Ok(v),
      other => Err(Self::wrong_type(name, "a list", other)),
    }
  }

  pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(self)
  }
}

impl<'a> IntoIterator for &'a Config {
  type Item = (&'a String, &'a Value);
  type IntoIter = std::collections::btree_map::Iter<'a, String, Value>;

  fn into_iter(self) -> Self::IntoIter {
    self.fields.iter()
  }
}
