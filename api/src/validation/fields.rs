//! Lenient field reader
//!
//! Every input source is first collected into a JSON object. Records are
//! then built one field at a time: a field that is missing or has the wrong
//! type records a `FieldError` and falls back to its default, so the rest of
//! the record is still read and validated.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::extractors::{Validatable, ValidationBuilder};

const FIELD_REQUIRED: &str = "field required";

pub struct FieldReader<'a> {
    fields: &'a Map<String, Value>,
    prefix: String,
    builder: &'a mut ValidationBuilder,
}

impl<'a> FieldReader<'a> {
    pub fn new(fields: &'a Map<String, Value>, builder: &'a mut ValidationBuilder) -> Self {
        Self {
            fields,
            prefix: String::new(),
            builder,
        }
    }

    fn path(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.prefix, name)
        }
    }

    /// The value under `name`; JSON `null` counts as absent
    fn present(&self, name: &str) -> Option<&'a Value> {
        let fields: &'a Map<String, Value> = self.fields;
        fields.get(name).filter(|v| !v.is_null())
    }

    fn fail(&mut self, name: &str, message: impl Into<String>) {
        let path = self.path(name);
        self.builder.add_error(path, message);
    }

    fn string(&mut self, name: &str, value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            _ => {
                self.fail(name, "must be a string");
                None
            }
        }
    }

    fn int(&mut self, name: &str, value: &Value) -> Option<i64> {
        let parsed = match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        if parsed.is_none() {
            self.fail(name, "must be an integer");
        }
        parsed
    }

    fn bool(&mut self, name: &str, value: &Value) -> Option<bool> {
        let parsed = match value {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Some(true),
                "false" | "0" | "no" | "off" => Some(false),
                _ => None,
            },
            _ => None,
        };
        if parsed.is_none() {
            self.fail(name, "must be a boolean");
        }
        parsed
    }

    pub fn required_string(&mut self, name: &str) -> String {
        match self.present(name) {
            Some(value) => self.string(name, value).unwrap_or_default(),
            None => {
                self.fail(name, FIELD_REQUIRED);
                String::new()
            }
        }
    }

    pub fn optional_string(&mut self, name: &str) -> Option<String> {
        self.present(name).and_then(|value| self.string(name, value))
    }

    pub fn required_int(&mut self, name: &str) -> i64 {
        match self.present(name) {
            Some(value) => self.int(name, value).unwrap_or_default(),
            None => {
                self.fail(name, FIELD_REQUIRED);
                0
            }
        }
    }

    pub fn optional_int(&mut self, name: &str) -> Option<i64> {
        self.present(name).and_then(|value| self.int(name, value))
    }

    pub fn optional_bool(&mut self, name: &str) -> Option<bool> {
        self.present(name).and_then(|value| self.bool(name, value))
    }

    /// Read a closed-set string value; `allowed` names the members in the
    /// error message.
    pub fn optional_enum<E>(&mut self, name: &str, allowed: &[E]) -> Option<E>
    where
        E: DeserializeOwned + std::fmt::Display,
    {
        let value = self.present(name)?;
        match serde_json::from_value::<E>(value.clone()) {
            Ok(member) => Some(member),
            Err(_) => {
                let names: Vec<String> = allowed.iter().map(ToString::to_string).collect();
                self.fail(name, format!("must be one of: {}", names.join(", ")));
                None
            }
        }
    }

    /// Read a nested record; its fields are reported as `name.field`
    pub fn record<T: Validatable>(&mut self, name: &str) -> T {
        match self.present(name) {
            Some(Value::Object(map)) => {
                let mut nested = FieldReader {
                    fields: map,
                    prefix: self.path(name),
                    builder: &mut *self.builder,
                };
                T::from_fields(&mut nested)
            }
            Some(_) => {
                self.fail(name, "must be an object");
                T::default()
            }
            None => {
                self.fail(name, FIELD_REQUIRED);
                T::default()
            }
        }
    }
}

/// Collect `key=value` pairs (form, query or path) into a JSON object.
/// A repeated key keeps its last value.
pub fn pairs_to_fields(pairs: Vec<(String, String)>) -> Map<String, Value> {
    pairs
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect()
}
