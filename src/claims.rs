//! Typed claim values and claim maps
//!
//! A token carries two JSON objects (header and payload) whose members are
//! claims: named, typed values. [`Claim`] wraps one JSON value behind a
//! closed set of type tags with checked accessors; [`ClaimMap`] is the
//! name-to-claim mapping used for both header and payload. Dates are not a
//! distinct tag — they are integers holding seconds since the Unix epoch,
//! interpreted as dates only by the accessor used.

use crate::error::{Error, Result};
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Registered claim names as defined in RFC 7519 Section 4.1 and
/// RFC 7515 Section 4.1.
pub mod names {
    /// Issuer (`iss`)
    pub const ISSUER: &str = "iss";
    /// Subject (`sub`)
    pub const SUBJECT: &str = "sub";
    /// Audience (`aud`)
    pub const AUDIENCE: &str = "aud";
    /// Expiration time (`exp`), seconds since the Unix epoch
    pub const EXPIRATION: &str = "exp";
    /// Not-before time (`nbf`), seconds since the Unix epoch
    pub const NOT_BEFORE: &str = "nbf";
    /// Issued-at time (`iat`), seconds since the Unix epoch
    pub const ISSUED_AT: &str = "iat";
    /// Token identifier (`jti`)
    pub const TOKEN_ID: &str = "jti";
    /// Algorithm (`alg`), header only
    pub const ALGORITHM: &str = "alg";
    /// Token type (`typ`), header only
    pub const TOKEN_TYPE: &str = "typ";
    /// Content type (`cty`), header only
    pub const CONTENT_TYPE: &str = "cty";
    /// Key identifier (`kid`), header only
    pub const KEY_ID: &str = "kid";
}

/// The type tag of a [`Claim`].
///
/// Exactly one tag applies to any claim value, fixed at construction.
/// `Integer` and `Number` are distinct tags: an integer claim is never a
/// number and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimType {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Array,
    Object,
}

impl fmt::Display for ClaimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClaimType::Null => "null",
            ClaimType::Boolean => "boolean",
            ClaimType::Integer => "integer",
            ClaimType::Number => "number",
            ClaimType::String => "string",
            ClaimType::Array => "array",
            ClaimType::Object => "object",
        };
        f.write_str(name)
    }
}

fn value_type(value: &Value) -> ClaimType {
    match value {
        Value::Null => ClaimType::Null,
        Value::Bool(_) => ClaimType::Boolean,
        // Integers beyond the i64 range fall back to the number tag.
        Value::Number(n) if n.is_i64() => ClaimType::Integer,
        Value::Number(_) => ClaimType::Number,
        Value::String(_) => ClaimType::String,
        Value::Array(_) => ClaimType::Array,
        Value::Object(_) => ClaimType::Object,
    }
}

/// A single typed claim value.
///
/// Construct from the concrete source types ([`From<&str>`], [`From<String>`],
/// [`Claim::from_date`], [`Claim::from_set`]) or from any
/// [`serde_json::Value`]. The tag is immutable after construction; every
/// accessor checks it and fails with [`Error::TypeMismatch`] when the
/// requested interpretation does not match.
#[derive(Debug, Clone, PartialEq)]
pub struct Claim {
    value: Value,
}

impl Claim {
    /// Create an integer claim holding a date as seconds since the epoch.
    pub fn from_date(seconds: i64) -> Self {
        Claim {
            value: Value::from(seconds),
        }
    }

    /// Create an array claim from unique strings, sorted and deduplicated.
    pub fn from_set<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        Claim {
            value: Value::Array(set.into_iter().map(Value::String).collect()),
        }
    }

    /// The type tag carried by this claim.
    pub fn claim_type(&self) -> ClaimType {
        value_type(&self.value)
    }

    /// Borrow the underlying JSON value.
    pub fn as_value(&self) -> &Value {
        &self.value
    }

    /// Consume the claim, returning the underlying JSON value.
    pub fn into_value(self) -> Value {
        self.value
    }

    /// The claim as a string.
    pub fn as_string(&self) -> Result<&str> {
        self.value
            .as_str()
            .ok_or_else(|| self.mismatch(ClaimType::String))
    }

    /// The claim as a 64-bit signed integer.
    pub fn as_int(&self) -> Result<i64> {
        self.value
            .as_i64()
            .ok_or_else(|| self.mismatch(ClaimType::Integer))
    }

    /// The claim as a date, i.e. an integer reinterpreted as seconds since
    /// the Unix epoch. Sub-second precision cannot be represented; do not
    /// store fractional timestamps in claims meant for date comparison.
    pub fn as_date(&self) -> Result<i64> {
        self.as_int()
    }

    /// The claim as a floating-point number. Integer-tagged claims are not
    /// numbers and are rejected.
    pub fn as_number(&self) -> Result<f64> {
        match (self.claim_type(), self.value.as_f64()) {
            (ClaimType::Number, Some(n)) => Ok(n),
            _ => Err(self.mismatch(ClaimType::Number)),
        }
    }

    /// The claim as a boolean.
    pub fn as_bool(&self) -> Result<bool> {
        self.value
            .as_bool()
            .ok_or_else(|| self.mismatch(ClaimType::Boolean))
    }

    /// The claim as an array of JSON values.
    pub fn as_array(&self) -> Result<&[Value]> {
        self.value
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| self.mismatch(ClaimType::Array))
    }

    /// The claim as a set of unique strings. Requires the array tag and
    /// string elements; duplicate entries collapse into one.
    pub fn as_set(&self) -> Result<BTreeSet<String>> {
        let array = self.as_array()?;
        let mut set = BTreeSet::new();
        for element in array {
            match element.as_str() {
                Some(s) => {
                    set.insert(s.to_string());
                }
                None => {
                    return Err(Error::TypeMismatch {
                        expected: ClaimType::String,
                        actual: value_type(element),
                    })
                }
            }
        }
        Ok(set)
    }

    fn mismatch(&self, expected: ClaimType) -> Error {
        Error::TypeMismatch {
            expected,
            actual: self.claim_type(),
        }
    }
}

impl From<&str> for Claim {
    fn from(value: &str) -> Self {
        Claim {
            value: Value::String(value.to_string()),
        }
    }
}

impl From<String> for Claim {
    fn from(value: String) -> Self {
        Claim {
            value: Value::String(value),
        }
    }
}

impl From<Value> for Claim {
    fn from(value: Value) -> Self {
        Claim { value }
    }
}

impl From<i64> for Claim {
    fn from(value: i64) -> Self {
        Claim {
            value: Value::from(value),
        }
    }
}

impl From<f64> for Claim {
    fn from(value: f64) -> Self {
        Claim {
            value: Value::from(value),
        }
    }
}

impl From<bool> for Claim {
    fn from(value: bool) -> Self {
        Claim {
            value: Value::Bool(value),
        }
    }
}

/// A mapping from claim name to [`Claim`], used for both the header and the
/// payload of a token.
///
/// Keys are unique and insertion order is irrelevant for lookup. The member
/// order of the serialized JSON object is unspecified and need not be
/// reproducible between runs: signatures are always checked against the
/// exact bytes produced at signing time, never against a re-serialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimMap {
    claims: HashMap<String, Claim>,
}

impl ClaimMap {
    /// Create an empty claim map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a claim map from JSON text, which must be a JSON object.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| Error::FormatInvalidJson(e.to_string()))?;
        match value {
            Value::Object(members) => Ok(Self {
                claims: members
                    .into_iter()
                    .map(|(name, value)| (name, Claim::from(value)))
                    .collect(),
            }),
            other => Err(Error::FormatInvalidJson(format!(
                "expected a JSON object, found {}",
                value_type(&other)
            ))),
        }
    }

    /// Serialize the map to compact JSON text.
    pub fn to_json(&self) -> String {
        let members: serde_json::Map<String, Value> = self
            .claims
            .iter()
            .map(|(name, claim)| (name.clone(), claim.value.clone()))
            .collect();
        Value::Object(members).to_string()
    }

    /// Look up a claim by name.
    pub fn get(&self, name: &str) -> Result<&Claim> {
        self.claims
            .get(name)
            .ok_or_else(|| Error::ClaimNotFound(name.to_string()))
    }

    /// Whether a claim with this name is present.
    pub fn has(&self, name: &str) -> bool {
        self.claims.contains_key(name)
    }

    /// Insert a claim, overwriting any prior value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, claim: Claim) {
        self.claims.insert(name.into(), claim);
    }

    /// Iterate over all `(name, claim)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Claim)> {
        self.claims.iter()
    }

    /// Number of claims in the map.
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    /// Whether the map holds no claims.
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}
