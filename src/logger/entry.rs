//! Log entries and their structured fields.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::logger::Level;
use crate::stack::{Stack, StackFrame};

/// Field key holding the innermost application frame.
pub const CALLER_KEY: &str = "caller";

/// Field key holding the filtered call stack.
pub const STACK_KEY: &str = "stack";

/// Structured field mapping, ordered by key.
pub type Fields = BTreeMap<String, Value>;

/// A structured field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Str(String),
    I64(i64),
    U64(u64),
    F64(f64),
    Bool(bool),
    Frame(StackFrame),
    Stack(Stack),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::I64(n) => write!(f, "{}", n),
            Value::U64(n) => write!(f, "{}", n),
            Value::F64(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Frame(frame) => write!(f, "{}", frame),
            Value::Stack(stack) => write!(f, "{}", stack),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::I64(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::I64(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::U64(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::U64(n.into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::F64(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<StackFrame> for Value {
    fn from(frame: StackFrame) -> Self {
        Value::Frame(frame)
    }
}

impl From<Stack> for Value {
    fn from(stack: Stack) -> Self {
        Value::Stack(stack)
    }
}

/// A single log record on its way through the hooks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub level: Level,
    pub message: String,
    pub fields: Fields,
}

impl Entry {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            fields: Fields::new(),
        }
    }

    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.fields = fields;
        self
    }

    /// The `caller` frame, if a hook attached one.
    pub fn caller(&self) -> Option<&StackFrame> {
        match self.fields.get(CALLER_KEY) {
            Some(Value::Frame(frame)) => Some(frame),
            _ => None,
        }
    }

    /// The `stack` field, if a hook attached one.
    pub fn stack(&self) -> Option<&Stack> {
        match self.fields.get(STACK_KEY) {
            Some(Value::Stack(stack)) => Some(stack),
            _ => None,
        }
    }

    /// Fields rendered as a JSON object.
    pub fn fields_json(&self) -> String {
        serde_json::to_string(&self.fields).unwrap_or_else(|_| "{}".to_string())
    }
}
