//! Tagged values: a closed set of primitive kinds behind one type.
//!
//! A [`TaggedValue`] holds exactly one of eight kinds. The kind is fixed at
//! construction and decides both how the value is rendered ([`TaggedValue::repr`])
//! and how it orders against other values ([`TaggedValue::compare`]).
//!
//! # Cross-kind ordering
//!
//! - Numeric kinds (integer, unsigned, float32, float64) compare against each
//!   other after promotion to `f64`.
//! - Characters compare against characters and strings (see [`TaggedValue::compare`]
//!   for the asymmetric tie rule).
//! - Strings compare lexicographically, pointers by address, `None` only equals `None`.
//! - Every other pairing is [`Comparison::Different`], which callers treat as
//!   "no order defined", never as an error.
//!
//! # Example
//! ```
//! use threes_core::{Comparison, TaggedValue};
//!
//! let three = TaggedValue::integer(3);
//! assert_eq!(three.compare(&TaggedValue::float64(3.0)), Comparison::Equal);
//! assert_eq!(three.compare(&TaggedValue::string("3")), Comparison::Different);
//! assert_eq!(TaggedValue::float32(1.5).repr(), "1.500000");
//! ```

use crate::error::{Result, ThreesError};
use crate::traversal::print_repr;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::cmp::Ordering;
use std::fmt;
use std::io;

/// The active variant of a [`TaggedValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Integer,
    Unsigned,
    Float32,
    Float64,
    String,
    Character,
    Pointer,
    None,
}

impl Kind {
    /// True for the four kinds that order against each other numerically.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Kind::Integer | Kind::Unsigned | Kind::Float32 | Kind::Float64
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Kind::Integer => "Integer",
            Kind::Unsigned => "Unsigned",
            Kind::Float32 => "Float32",
            Kind::Float64 => "Float64",
            Kind::String => "String",
            Kind::Character => "Character",
            Kind::Pointer => "Pointer",
            Kind::None => "None",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Four-way result of [`TaggedValue::compare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    Less,
    Equal,
    Greater,
    /// No ordering is defined between the two values.
    Different,
}

impl Comparison {
    /// The outcome seen from the other operand (`Less` ↔ `Greater`).
    pub fn reverse(self) -> Self {
        match self {
            Comparison::Less => Comparison::Greater,
            Comparison::Greater => Comparison::Less,
            other => other,
        }
    }

    /// `None` for [`Comparison::Different`].
    pub fn to_ordering(self) -> Option<Ordering> {
        match self {
            Comparison::Less => Some(Ordering::Less),
            Comparison::Equal => Some(Ordering::Equal),
            Comparison::Greater => Some(Ordering::Greater),
            Comparison::Different => None,
        }
    }

    pub fn is_different(self) -> bool {
        self == Comparison::Different
    }
}

impl From<Ordering> for Comparison {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Comparison::Less,
            Ordering::Equal => Comparison::Equal,
            Ordering::Greater => Comparison::Greater,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Comparison::Less => "LESS",
            Comparison::Equal => "EQUAL",
            Comparison::Greater => "GREATER",
            Comparison::Different => "DIFFERENT",
        };
        f.write_str(name)
    }
}

/// A type-erased value of one of the eight [`Kind`]s.
///
/// Equality (`==`) is structural: same kind and same payload. Use
/// [`TaggedValue::compare`] for the cross-kind ordering.
///
/// Strings are owned copies. Pointers are bare addresses that are never
/// dereferenced; keeping the pointee alive is the caller's business.
#[derive(Debug, Clone, PartialEq)]
pub enum TaggedValue {
    Integer(i32),
    Unsigned(u32),
    Float32(f32),
    Float64(f64),
    String(String),
    Character(char),
    Pointer(*const ()),
    None,
}

impl TaggedValue {
    pub fn integer(value: i32) -> Self {
        TaggedValue::Integer(value)
    }

    pub fn unsigned(value: u32) -> Self {
        TaggedValue::Unsigned(value)
    }

    pub fn float32(value: f32) -> Self {
        TaggedValue::Float32(value)
    }

    pub fn float64(value: f64) -> Self {
        TaggedValue::Float64(value)
    }

    pub fn string(value: impl Into<String>) -> Self {
        TaggedValue::String(value.into())
    }

    pub fn character(value: char) -> Self {
        TaggedValue::Character(value)
    }

    /// Wrap an address. The pointee is never read.
    pub fn pointer<T>(value: *const T) -> Self {
        TaggedValue::Pointer(value.cast())
    }

    pub fn none() -> Self {
        TaggedValue::None
    }

    pub fn kind(&self) -> Kind {
        match self {
            TaggedValue::Integer(_) => Kind::Integer,
            TaggedValue::Unsigned(_) => Kind::Unsigned,
            TaggedValue::Float32(_) => Kind::Float32,
            TaggedValue::Float64(_) => Kind::Float64,
            TaggedValue::String(_) => Kind::String,
            TaggedValue::Character(_) => Kind::Character,
            TaggedValue::Pointer(_) => Kind::Pointer,
            TaggedValue::None => Kind::None,
        }
    }

    /// True for a float holding NaN, the one value that does not order
    /// against itself.
    pub fn is_nan(&self) -> bool {
        match self {
            TaggedValue::Float32(v) => v.is_nan(),
            TaggedValue::Float64(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Numeric payload promoted to double precision.
    fn as_f64(&self) -> Option<f64> {
        match self {
            TaggedValue::Integer(v) => Some(f64::from(*v)),
            TaggedValue::Unsigned(v) => Some(f64::from(*v)),
            TaggedValue::Float32(v) => Some(f64::from(*v)),
            TaggedValue::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// Short textual form: decimal numbers, six-digit fixed floats, quoted
    /// strings and characters, `&{0x..}` for pointers and `NONE`.
    pub fn repr(&self) -> String {
        self.to_string()
    }

    /// Write [`repr`](Self::repr) to stdout without a trailing newline.
    pub fn display(&self) -> io::Result<()> {
        print_repr(&self.repr())
    }

    /// Compare `self` against `other`, dispatching on `self`'s kind.
    ///
    /// Character/string pairs follow an asymmetric rule:
    ///
    /// - character vs string: an empty string ranks below every character
    ///   except `'\0'` (Equal); otherwise only the string's first character
    ///   is looked at, so `'a'` vs `"abc"` is Equal.
    /// - string vs character: an empty string is Less (Equal against `'\0'`);
    ///   a one-character string compares its character; a longer string that
    ///   shares the first character is Greater.
    ///
    /// A NaN operand makes every numeric relation false, giving `Different`.
    pub fn compare(&self, other: &TaggedValue) -> Comparison {
        if let (Some(a), Some(b)) = (self.as_f64(), other.as_f64()) {
            return compare_f64(a, b);
        }

        match (self, other) {
            (TaggedValue::Character(a), TaggedValue::Character(b)) => a.cmp(b).into(),
            (TaggedValue::Character(c), TaggedValue::String(s)) => compare_char_with_str(*c, s),
            (TaggedValue::String(s), TaggedValue::Character(c)) => compare_str_with_char(s, *c),
            (TaggedValue::String(a), TaggedValue::String(b)) => a.as_str().cmp(b.as_str()).into(),
            (TaggedValue::Pointer(a), TaggedValue::Pointer(b)) => a.addr().cmp(&b.addr()).into(),
            (TaggedValue::None, TaggedValue::None) => Comparison::Equal,
            _ => Comparison::Different,
        }
    }

    /// Build a value from JSON.
    ///
    /// Plain scalars map by shape: `null` → None, integers → Integer (or
    /// Unsigned past `i32::MAX`), other numbers → Float64, strings → String.
    /// A single-key object selects the kind explicitly, e.g.
    /// `{"character": "x"}`, `{"float32": 1.5}` or `{"pointer": 4096}`.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(TaggedValue::None),
            Value::Number(n) => number_by_shape(n),
            Value::String(s) => Ok(TaggedValue::String(s.clone())),
            Value::Object(map) if map.len() == 1 => {
                let (kind, payload) = map
                    .iter()
                    .next()
                    .ok_or_else(|| unsupported(value))?;
                explicit_kind(kind, payload)
            }
            other => Err(unsupported(other)),
        }
    }
}

/// Parse a JSON document into tagged values: an array yields one value per
/// element, any other document yields a single value.
pub fn values_from_json(json: &str) -> Result<Vec<TaggedValue>> {
    let value: Value = serde_json::from_str(json)?;
    match &value {
        Value::Array(items) => items.iter().map(TaggedValue::from_json).collect(),
        single => Ok(vec![TaggedValue::from_json(single)?]),
    }
}

fn compare_f64(a: f64, b: f64) -> Comparison {
    if a < b {
        Comparison::Less
    } else if a > b {
        Comparison::Greater
    } else if a == b {
        Comparison::Equal
    } else {
        Comparison::Different
    }
}

fn compare_char_with_str(c: char, s: &str) -> Comparison {
    match s.chars().next() {
        Some(first) => c.cmp(&first).into(),
        None if c == '\0' => Comparison::Equal,
        None => Comparison::Greater,
    }
}

fn compare_str_with_char(s: &str, c: char) -> Comparison {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (None, _) if c == '\0' => Comparison::Equal,
        (None, _) => Comparison::Less,
        (Some(first), None) => first.cmp(&c).into(),
        (Some(first), Some(_)) => match first.cmp(&c) {
            Ordering::Equal => Comparison::Greater,
            unequal => unequal.into(),
        },
    }
}

fn number_by_shape(n: &Number) -> Result<TaggedValue> {
    if let Some(i) = n.as_i64() {
        if let Ok(v) = i32::try_from(i) {
            return Ok(TaggedValue::Integer(v));
        }
        if let Ok(v) = u32::try_from(i) {
            return Ok(TaggedValue::Unsigned(v));
        }
    }
    n.as_f64()
        .map(TaggedValue::Float64)
        .ok_or_else(|| ThreesError::UnsupportedJson(n.to_string()))
}

fn explicit_kind(kind: &str, payload: &Value) -> Result<TaggedValue> {
    let value = match kind {
        "integer" => payload
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .map(TaggedValue::Integer),
        "unsigned" => payload
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .map(TaggedValue::Unsigned),
        "float32" => payload.as_f64().map(|v| TaggedValue::Float32(v as f32)),
        "float64" => payload.as_f64().map(TaggedValue::Float64),
        "string" => payload.as_str().map(TaggedValue::from),
        "character" => payload.as_str().and_then(single_char).map(TaggedValue::Character),
        "pointer" => payload
            .as_u64()
            .and_then(|v| usize::try_from(v).ok())
            .map(|addr| TaggedValue::Pointer(std::ptr::without_provenance(addr))),
        "none" if payload.is_null() => Some(TaggedValue::None),
        _ => None,
    };
    value.ok_or_else(|| ThreesError::UnsupportedJson(format!("{{\"{kind}\": {payload}}}")))
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn unsupported(value: &Value) -> ThreesError {
    ThreesError::UnsupportedJson(value.to_string())
}

/// Six-digit fixed notation; NaN and infinities print as `nan` and `inf`
/// with their sign.
fn write_fixed(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    let sign = if v.is_sign_negative() { "-" } else { "" };
    if v.is_nan() {
        write!(f, "{sign}nan")
    } else if v.is_infinite() {
        write!(f, "{sign}inf")
    } else {
        write!(f, "{v:.6}")
    }
}

impl fmt::Display for TaggedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaggedValue::Integer(v) => write!(f, "{v}"),
            TaggedValue::Unsigned(v) => write!(f, "{v}"),
            TaggedValue::Float32(v) => write_fixed(f, f64::from(*v)),
            TaggedValue::Float64(v) => write_fixed(f, *v),
            TaggedValue::String(s) => write!(f, "'{s}'"),
            TaggedValue::Character(c) => write!(f, "'{c}'"),
            TaggedValue::Pointer(p) => write!(f, "&{{{:p}}}", *p),
            TaggedValue::None => f.write_str("NONE"),
        }
    }
}

impl From<i32> for TaggedValue {
    fn from(value: i32) -> Self {
        TaggedValue::Integer(value)
    }
}

impl From<u32> for TaggedValue {
    fn from(value: u32) -> Self {
        TaggedValue::Unsigned(value)
    }
}

impl From<f32> for TaggedValue {
    fn from(value: f32) -> Self {
        TaggedValue::Float32(value)
    }
}

impl From<f64> for TaggedValue {
    fn from(value: f64) -> Self {
        TaggedValue::Float64(value)
    }
}

impl From<char> for TaggedValue {
    fn from(value: char) -> Self {
        TaggedValue::Character(value)
    }
}

impl From<&str> for TaggedValue {
    fn from(value: &str) -> Self {
        TaggedValue::String(value.to_string())
    }
}

impl From<String> for TaggedValue {
    fn from(value: String) -> Self {
        TaggedValue::String(value)
    }
}
