//! Dynamic values and their coercions.

use thiserror::Error;

use super::Diagnostics;

/// A loosely typed input value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Bytes(Vec<u8>),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Null,
}

/// Errors from strict coercion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoerceError {
    #[error("value is null")]
    Null,

    #[error("cannot convert {from} to {to}")]
    Unsupported {
        from: &'static str,
        to: &'static str,
    },

    #[error("cannot parse '{input}' as {to}")]
    Parse { input: String, to: &'static str },

    #[error("{value} is out of range for {to}")]
    OutOfRange { value: String, to: &'static str },

    #[error("bytes are not valid UTF-8")]
    InvalidUtf8,
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Null => "null",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    // ---- strict ----

    /// Render as text. Floats use six decimals (`3.140000`).
    pub fn try_to_string(&self) -> Result<String, CoerceError> {
        match self {
            Value::Str(s) => Ok(s.clone()),
            Value::Bytes(b) => String::from_utf8(b.clone()).map_err(|_| CoerceError::InvalidUtf8),
            Value::Int(i) => Ok(i.to_string()),
            Value::UInt(u) => Ok(u.to_string()),
            Value::Float(f) => Ok(format!("{:.6}", f)),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Null => Err(CoerceError::Null),
        }
    }

    pub fn try_to_bytes(&self) -> Result<Vec<u8>, CoerceError> {
        match self {
            Value::Bytes(b) => Ok(b.clone()),
            other => other.try_to_string().map(String::into_bytes),
        }
    }

    pub fn try_to_i64(&self) -> Result<i64, CoerceError> {
        self.integer("i64")
    }

    pub fn try_to_i32(&self) -> Result<i32, CoerceError> {
        self.integer("i32")
    }

    pub fn try_to_u32(&self) -> Result<u32, CoerceError> {
        self.integer("u32")
    }

    pub fn try_to_u64(&self) -> Result<u64, CoerceError> {
        self.integer("u64")
    }

    pub fn try_to_f64(&self) -> Result<f64, CoerceError> {
        match self {
            Value::Int(i) => Ok(*i as f64),
            Value::UInt(u) => Ok(*u as f64),
            Value::Float(f) => Ok(*f),
            Value::Str(s) => parse_float(s, "f64"),
            Value::Bytes(b) => parse_float(utf8(b)?, "f64"),
            Value::Bool(_) => Err(self.unsupported("f64")),
            Value::Null => Err(CoerceError::Null),
        }
    }

    pub fn try_to_f32(&self) -> Result<f32, CoerceError> {
        let wide = self.try_to_f64().map_err(|e| retarget(e, "f32"))?;
        if wide.is_finite() && wide.abs() > f32::MAX as f64 {
            return Err(CoerceError::OutOfRange {
                value: wide.to_string(),
                to: "f32",
            });
        }
        Ok(wide as f32)
    }

    // ---- lossy ----

    /// Text form, empty on failure. Invalid UTF-8 is replaced, not rejected.
    pub fn to_string(&self, diag: &dyn Diagnostics) -> String {
        if let Value::Bytes(b) = self {
            return String::from_utf8_lossy(b).into_owned();
        }
        lossy(self.try_to_string(), "string", diag)
    }

    pub fn to_bytes(&self, diag: &dyn Diagnostics) -> Vec<u8> {
        lossy(self.try_to_bytes(), "bytes", diag)
    }

    pub fn to_i64(&self, diag: &dyn Diagnostics) -> i64 {
        lossy(self.try_to_i64(), "i64", diag)
    }

    pub fn to_i32(&self, diag: &dyn Diagnostics) -> i32 {
        lossy(self.try_to_i32(), "i32", diag)
    }

    pub fn to_u32(&self, diag: &dyn Diagnostics) -> u32 {
        lossy(self.try_to_u32(), "u32", diag)
    }

    pub fn to_u64(&self, diag: &dyn Diagnostics) -> u64 {
        lossy(self.try_to_u64(), "u64", diag)
    }

    pub fn to_f64(&self, diag: &dyn Diagnostics) -> f64 {
        lossy(self.try_to_f64(), "f64", diag)
    }

    pub fn to_f32(&self, diag: &dyn Diagnostics) -> f32 {
        lossy(self.try_to_f32(), "f32", diag)
    }

    fn integer<T: TryFrom<i128>>(&self, to: &'static str) -> Result<T, CoerceError> {
        let wide: i128 = match self {
            Value::Int(i) => i128::from(*i),
            Value::UInt(u) => i128::from(*u),
            Value::Float(f) => truncate(*f, to)?,
            Value::Str(s) => parse_integral(s, to)?,
            Value::Bytes(b) => parse_integral(utf8(b)?, to)?,
            Value::Bool(_) => return Err(self.unsupported(to)),
            Value::Null => return Err(CoerceError::Null),
        };
        T::try_from(wide).map_err(|_| CoerceError::OutOfRange {
            value: wide.to_string(),
            to,
        })
    }

    fn unsupported(&self, to: &'static str) -> CoerceError {
        CoerceError::Unsupported {
            from: self.type_name(),
            to,
        }
    }
}

fn lossy<T: Default>(result: Result<T, CoerceError>, to: &'static str, diag: &dyn Diagnostics) -> T {
    result.unwrap_or_else(|err| {
        diag.coercion_failed(to, &err);
        T::default()
    })
}

fn retarget(err: CoerceError, to: &'static str) -> CoerceError {
    match err {
        CoerceError::Unsupported { from, .. } => CoerceError::Unsupported { from, to },
        CoerceError::Parse { input, .. } => CoerceError::Parse { input, to },
        other => other,
    }
}

fn utf8(bytes: &[u8]) -> Result<&str, CoerceError> {
    std::str::from_utf8(bytes).map_err(|_| CoerceError::InvalidUtf8)
}

fn parse_float(s: &str, to: &'static str) -> Result<f64, CoerceError> {
    s.parse::<f64>().map_err(|_| CoerceError::Parse {
        input: s.to_string(),
        to,
    })
}

/// Integer text parses exactly; anything else goes through `f64` and is
/// truncated toward zero (`"3.9"` → 3).
fn parse_integral(s: &str, to: &'static str) -> Result<i128, CoerceError> {
    match s.parse::<i128>() {
        Ok(v) => Ok(v),
        Err(_) => truncate(parse_float(s, to)?, to),
    }
}

fn truncate(f: f64, to: &'static str) -> Result<i128, CoerceError> {
    if !f.is_finite() {
        return Err(CoerceError::OutOfRange {
            value: f.to_string(),
            to,
        });
    }
    Ok(f.trunc() as i128)
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Str(v.clone())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

macro_rules! value_from_int {
    ($variant:ident, $wide:ty, $($t:ty),+) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(v as $wide)
                }
            }
        )+
    };
}

value_from_int!(Int, i64, i8, i16, i32, i64, isize);
value_from_int!(UInt, u64, u8, u16, u32, u64, usize);

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
