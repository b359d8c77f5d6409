//! Identifiers whose kind is only known at runtime.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::base36;
use crate::error::IdError;
use crate::id::{cmp_payloads, hash_canonical, split_canonical, Id};
use crate::kind::IdKind;
use crate::registry::{KindHandle, Registry, SEPARATOR};
use crate::source::{timestamp_ms, ValueSource};

/// An identifier of some registered kind, typically produced by
/// [`parse_any`].
///
/// Unlike [`Id`], two `AnyId`s may belong to different kinds. They are then
/// never equal and have no ordering; see [`AnyId::try_cmp`].
#[derive(Clone)]
pub struct AnyId {
    kind: KindHandle,
    payload: String,
    value: u128,
}

impl AnyId {
    pub(crate) fn from_parts(kind: KindHandle, payload: String, value: u128) -> Self {
        Self {
            kind,
            payload,
            value,
        }
    }

    /// Mints a fresh ID of `kind` from `source`.
    pub fn generate(kind: &KindHandle, source: &dyn ValueSource) -> Self {
        let value = source.next(kind.ordered());
        Self::from_parts(kind.clone(), base36::encode(value), value)
    }

    /// Parses `text`, which must carry `kind`'s prefix.
    pub fn parse_as(text: &str, kind: &KindHandle) -> Result<Self, IdError> {
        let (payload, value) = split_canonical(text, kind)?;
        Ok(Self::from_parts(kind.clone(), payload.to_string(), value))
    }

    /// Parses `text` against the global registry.
    pub fn parse(text: &str) -> Result<Self, IdError> {
        Registry::global().parse_any(text)
    }

    /// The registered kind this ID belongs to.
    pub fn kind(&self) -> &KindHandle {
        &self.kind
    }

    /// The prefix for this ID.
    pub fn prefix(&self) -> &str {
        self.kind.prefix()
    }

    /// The base-36 payload after the separator.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// The decoded 128-bit value.
    pub fn value(&self) -> u128 {
        self.value
    }

    /// Creation time in Unix milliseconds, for ordered kinds.
    pub fn timestamp_ms(&self) -> Option<u64> {
        self.kind.ordered().then(|| timestamp_ms(self.value))
    }

    /// Returns true if this ID belongs to `K`.
    pub fn is<K: IdKind>(&self) -> bool {
        K::handle().is_ok_and(|kind| *kind == self.kind)
    }

    /// Converts into a statically typed ID of kind `K`.
    pub fn downcast<K: IdKind>(self) -> Result<Id<K>, IdError> {
        let kind = K::handle()?;
        if *kind != self.kind {
            return Err(IdError::PrefixMismatch {
                input: self.to_string(),
                expected: kind.expected_prefix(),
                actual: Some(self.kind.expected_prefix()),
            });
        }
        Id::parse(&self.to_string())
    }

    /// Orders two IDs of the same kind.
    ///
    /// IDs of different kinds have no defined order.
    pub fn try_cmp(&self, other: &AnyId) -> Result<Ordering, IdError> {
        if self.kind != other.kind {
            return Err(IdError::KindMismatch {
                left: self.prefix().to_string(),
                right: other.prefix().to_string(),
            });
        }
        Ok(cmp_payloads(&self.payload, &other.payload))
    }
}

/// Parses `text` as whichever globally registered kind owns its prefix.
pub fn parse_any(text: &str) -> Result<AnyId, IdError> {
    AnyId::parse(text)
}

impl PartialEq for AnyId {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.payload == other.payload
    }
}

impl Eq for AnyId {}

impl<K: IdKind> PartialEq<Id<K>> for AnyId {
    fn eq(&self, other: &Id<K>) -> bool {
        other == self
    }
}

impl PartialOrd for AnyId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

impl Hash for AnyId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_canonical(self.kind.prefix(), &self.payload, state);
    }
}

impl fmt::Display for AnyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.kind.prefix(), SEPARATOR, self.payload)
    }
}

impl fmt::Debug for AnyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnyId(\"{self}\")")
    }
}

impl FromStr for AnyId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<K: IdKind> From<Id<K>> for AnyId {
    fn from(id: Id<K>) -> Self {
        id.into_any()
    }
}

impl serde::Serialize for AnyId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for AnyId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
