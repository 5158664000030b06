use std::collections::BTreeMap;

/// Result of a successful parse
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    /// Ordered results of a sequence or repetition
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    /// Success without a semantic value; never stored inside a `List` by the
    /// sequencing combinators
    Suppressed,
}

impl Value {
    /// Collects sub-results the way sequences and repetitions do: suppressed
    /// markers are dropped, and nothing left over means `Suppressed`.
    pub fn collect(values: impl IntoIterator<Item = Value>) -> Value {
        let items: Vec<Value> = values.into_iter().filter(|v| !v.is_suppressed()).collect();
        if items.is_empty() {
            Value::Suppressed
        } else {
            Value::List(items)
        }
    }

    pub fn is_suppressed(&self) -> bool {
        matches!(self, Value::Suppressed)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn into_list(self) -> Option<Vec<Value>> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
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

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Str(c.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}
