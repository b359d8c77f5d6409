//! Statically typed identifiers.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;

use crate::any::AnyId;
use crate::base36;
use crate::error::IdError;
use crate::kind::IdKind;
use crate::registry::{KindHandle, SEPARATOR};
use crate::source::{default_source, timestamp_ms, ValueSource};

/// Splits `text` into a validated payload and its value, checking that it
/// starts with `kind`'s prefix and the separator.
pub(crate) fn split_canonical<'a>(
    text: &'a str,
    kind: &KindHandle,
) -> Result<(&'a str, u128), IdError> {
    if text.is_empty() {
        return Err(IdError::Empty);
    }

    let payload = text
        .strip_prefix(kind.prefix())
        .and_then(|rest| rest.strip_prefix(SEPARATOR))
        .ok_or_else(|| IdError::PrefixMismatch {
            input: text.to_string(),
            expected: kind.expected_prefix(),
            actual: text
                .split_once(SEPARATOR)
                .map(|(found, _)| format!("{found}{SEPARATOR}")),
        })?;

    if payload.is_empty() {
        return Err(IdError::EmptyPayload {
            input: text.to_string(),
        });
    }

    let value = base36::decode(payload).map_err(|source| IdError::InvalidPayload {
        input: text.to_string(),
        source,
    })?;

    Ok((payload, value))
}

/// Hashes the canonical `prefix_payload` bytes.
pub(crate) fn hash_canonical<H: Hasher>(prefix: &str, payload: &str, state: &mut H) {
    state.write(prefix.as_bytes());
    state.write(&[SEPARATOR as u8]);
    state.write(payload.as_bytes());
    state.write_u8(0xff);
}

/// Orders payloads by decoded value, then bytes.
///
/// Leading zeros are ignored when comparing values, so `007` sorts before
/// `8` and `z` before `10`. For payloads of equal length this is plain
/// lexicographic order. Payloads with the same value but different zero
/// padding (`007`, `7`) fall back to byte order, keeping `Ord` consistent
/// with payload equality.
pub(crate) fn cmp_payloads(a: &str, b: &str) -> Ordering {
    let (ta, tb) = (a.trim_start_matches('0'), b.trim_start_matches('0'));
    ta.len()
        .cmp(&tb.len())
        .then_with(|| ta.cmp(tb))
        .then_with(|| a.cmp(b))
}

/// An identifier of kind `K`, rendered as `{K::PREFIX}_{base36}`.
///
/// IDs of different kinds are different types, so they can never be
/// compared or mixed up by accident.
pub struct Id<K: IdKind> {
    kind: &'static KindHandle,
    payload: String,
    value: u128,
    _kind: PhantomData<fn() -> K>,
}

impl<K: IdKind> Id<K> {
    /// The prefix for this ID type.
    pub const PREFIX: &'static str = K::PREFIX;

    /// Creates a new ID from the default source.
    ///
    /// Fails only if `K` could not be declared.
    pub fn new() -> Result<Self, IdError> {
        Self::new_with(default_source())
    }

    /// Creates a new ID from `source`.
    pub fn new_with(source: &dyn ValueSource) -> Result<Self, IdError> {
        let kind = K::handle()?;
        Ok(Self::from_parts(kind, source.next(K::ORDERED)))
    }

    /// Creates an ID wrapping a known value.
    pub fn from_value(value: u128) -> Result<Self, IdError> {
        Ok(Self::from_parts(K::handle()?, value))
    }

    fn from_parts(kind: &'static KindHandle, value: u128) -> Self {
        Self {
            kind,
            payload: base36::encode(value),
            value,
            _kind: PhantomData,
        }
    }

    /// Parses an ID from its canonical string.
    ///
    /// The payload is kept verbatim; nothing is regenerated.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        let kind = K::handle()?;
        let (payload, value) = split_canonical(s, kind)?;
        Ok(Self {
            kind,
            payload: payload.to_string(),
            value,
            _kind: PhantomData,
        })
    }

    /// The registered handle of `K`.
    pub fn kind(&self) -> &'static KindHandle {
        self.kind
    }

    /// The prefix for this ID.
    pub fn prefix(&self) -> &'static str {
        K::PREFIX
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
        K::ORDERED.then(|| timestamp_ms(self.value))
    }

    /// Converts into a dynamically typed ID.
    pub fn into_any(self) -> AnyId {
        AnyId::from_parts(self.kind.clone(), self.payload, self.value)
    }

    /// Copies into a dynamically typed ID.
    pub fn to_any(&self) -> AnyId {
        AnyId::from_parts(self.kind.clone(), self.payload.clone(), self.value)
    }
}

impl<K: IdKind> Clone for Id<K> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            payload: self.payload.clone(),
            value: self.value,
            _kind: PhantomData,
        }
    }
}

impl<K: IdKind> PartialEq for Id<K> {
    fn eq(&self, other: &Self) -> bool {
        self.payload == other.payload
    }
}

impl<K: IdKind> Eq for Id<K> {}

impl<K: IdKind> PartialEq<AnyId> for Id<K> {
    fn eq(&self, other: &AnyId) -> bool {
        self.kind == other.kind() && self.payload == other.payload()
    }
}

impl<K: IdKind> PartialOrd for Id<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: IdKind> Ord for Id<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_payloads(&self.payload, &other.payload)
    }
}

impl<K: IdKind> Hash for Id<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_canonical(K::PREFIX, &self.payload, state);
    }
}

impl<K: IdKind> fmt::Display for Id<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", K::PREFIX, SEPARATOR, self.payload)
    }
}

impl<K: IdKind> fmt::Debug for Id<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id(\"{self}\")")
    }
}

impl<K: IdKind> FromStr for Id<K> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<K: IdKind> AsRef<str> for Id<K> {
    fn as_ref(&self) -> &str {
        &self.payload
    }
}

impl<K: IdKind> TryFrom<AnyId> for Id<K> {
    type Error = IdError;

    fn try_from(id: AnyId) -> Result<Self, Self::Error> {
        id.downcast()
    }
}

impl<K: IdKind> serde::Serialize for Id<K> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de, K: IdKind> serde::Deserialize<'de> for Id<K> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::define_kind;
    use std::collections::HashSet;
    use std::time::Duration;

    define_kind!(Account, "tacct");
    define_kind!(Session, "tses");
    define_kind!(Meeting, "tmeet", ordered = false);

    type AccountId = Id<Account>;
    type SessionId = Id<Session>;
    type MeetingId = Id<Meeting>;

    #[test]
    fn test_account_id_roundtrip() {
        let id = AccountId::new().unwrap();
        let s = id.to_string();
        let parsed: AccountId = s.parse().unwrap();
        assert_eq!(id, parsed);
        assert_eq!(id.value(), parsed.value());
    }

    #[test]
    fn test_account_id_prefix() {
        let id = AccountId::new().unwrap();
        let s = id.to_string();
        assert!(s.starts_with("tacct_"));
        assert!(s["tacct_".len()..]
            .bytes()
            .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase()));
        assert_eq!(AccountId::PREFIX, "tacct");
        assert_eq!(id.prefix(), "tacct");
    }

    #[test]
    fn test_parse_wrong_prefix() {
        let err = AccountId::parse("tses_abc").unwrap_err();
        assert!(err.is_format());
        assert_eq!(
            err,
            IdError::PrefixMismatch {
                input: "tses_abc".to_string(),
                expected: "tacct_".to_string(),
                actual: Some("tses_".to_string()),
            }
        );
        assert!(err.to_string().contains("'tacct_'"));
    }

    #[test]
    fn test_parse_longer_prefix_rejected() {
        // Starts with "tacct" but not "tacct_".
        let err = AccountId::parse("tacctx_abc").unwrap_err();
        assert!(matches!(
            err,
            IdError::PrefixMismatch { actual: Some(ref p), .. } if p == "tacctx_"
        ));
    }

    #[test]
    fn test_parse_missing_separator() {
        let err = AccountId::parse("tacctabc").unwrap_err();
        assert!(matches!(
            err,
            IdError::PrefixMismatch { actual: None, .. }
        ));
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(AccountId::parse(""), Err(IdError::Empty));
    }

    #[test]
    fn test_parse_empty_payload() {
        assert!(matches!(
            AccountId::parse("tacct_"),
            Err(IdError::EmptyPayload { .. })
        ));
    }

    #[test]
    fn test_parse_invalid_payload() {
        let err = AccountId::parse("tacct_ABC").unwrap_err();
        assert!(err.is_format());
        assert!(matches!(err, IdError::InvalidPayload { .. }));

        // Only the first separator splits; the rest is payload.
        assert!(matches!(
            AccountId::parse("tacct_ab_c"),
            Err(IdError::InvalidPayload { .. })
        ));
    }

    #[test]
    fn test_parse_keeps_payload_verbatim() {
        let id = AccountId::parse("tacct_007").unwrap();
        assert_eq!(id.payload(), "007");
        assert_eq!(id.value(), 7);
        assert_eq!(id.to_string(), "tacct_007");
        assert_ne!(id, AccountId::from_value(7).unwrap());
    }

    #[test]
    fn test_distinct_ids_differ() {
        let a = AccountId::new().unwrap();
        let b = AccountId::new().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_ordered_ids_sort_by_creation() {
        let a = AccountId::new().unwrap();
        std::thread::sleep(Duration::from_millis(2));
        let b = AccountId::new().unwrap();
        assert_eq!(a.payload().len(), b.payload().len());
        assert!(a < b);
        assert!(b >= a);
    }

    #[test]
    fn test_ordering_across_payload_lengths() {
        let short = AccountId::from_value(35).unwrap(); // "z"
        let long = AccountId::from_value(36).unwrap(); // "10"
        assert!(short.payload() > long.payload());
        assert!(short < long);
    }

    #[test]
    fn test_ordering_with_leading_zeros() {
        let padded = AccountId::parse("tacct_007").unwrap();
        let eight = AccountId::parse("tacct_8").unwrap();
        assert!(padded < eight);

        let seven = AccountId::from_value(7).unwrap();
        assert_ne!(padded, seven);
        assert_ne!(padded.cmp(&seven), Ordering::Equal);
        assert!(padded < seven);

        let big = AccountId::parse("tacct_0010").unwrap();
        assert!(AccountId::parse("tacct_z").unwrap() < big);
        assert!(big < AccountId::parse("tacct_11").unwrap());
    }

    #[test]
    fn test_cmp_payloads_matches_value_order() {
        let mut payloads = vec!["10", "0", "z", "007", "8", "00", "7", "0z"];
        payloads.sort_by(|a, b| cmp_payloads(a, b));
        assert_eq!(payloads, ["0", "00", "007", "7", "8", "0z", "z", "10"]);
    }

    #[test]
    fn test_timestamp_for_ordered_kind_only() {
        let acct = AccountId::new().unwrap();
        assert!(acct.timestamp_ms().is_some_and(|ts| ts > 0));

        let meeting = MeetingId::new().unwrap();
        assert_eq!(meeting.timestamp_ms(), None);
        assert!(meeting.to_string().starts_with("tmeet_"));
    }

    #[test]
    fn test_equal_ids_hash_equal() {
        use std::collections::hash_map::DefaultHasher;

        fn hash_of<T: Hash>(value: &T) -> u64 {
            let mut h = DefaultHasher::new();
            value.hash(&mut h);
            h.finish()
        }

        let id = AccountId::new().unwrap();
        let parsed = AccountId::parse(&id.to_string()).unwrap();
        assert_eq!(hash_of(&id), hash_of(&parsed));
        assert_eq!(hash_of(&id), hash_of(&id.to_any()));
    }

    #[test]
    fn test_usable_as_hash_key() {
        let id = SessionId::new().unwrap();
        let mut set = HashSet::new();
        set.insert(id.clone());
        assert!(set.contains(&SessionId::parse(&id.to_string()).unwrap()));
    }

    #[test]
    fn test_cross_kind_equality_is_false() {
        let acct = AccountId::from_value(42).unwrap();
        let ses = SessionId::from_value(42).unwrap();
        assert_eq!(acct.payload(), ses.payload());
        assert!(acct != ses.to_any());
        assert!(acct == acct.to_any());
    }

    #[test]
    fn test_try_from_any() {
        let ses = SessionId::new().unwrap();
        assert!(AccountId::try_from(ses.to_any()).is_err());
        assert_eq!(SessionId::try_from(ses.to_any()).unwrap(), ses);
    }

    #[test]
    fn test_debug_format() {
        let id = AccountId::parse("tacct_abc").unwrap();
        assert_eq!(format!("{id:?}"), "Id(\"tacct_abc\")");
    }

    #[test]
    fn test_new_with_injected_source() {
        struct Fixed;
        impl ValueSource for Fixed {
            fn ordered(&self) -> u128 {
                36
            }
            fn random(&self) -> u128 {
                35
            }
        }

        assert_eq!(AccountId::new_with(&Fixed).unwrap().payload(), "10");
        assert_eq!(MeetingId::new_with(&Fixed).unwrap().payload(), "z");
    }

    #[test]
    fn test_json_roundtrip() {
        let id = AccountId::new().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
        let parsed: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_json_rejects_wrong_kind() {
        let json = format!("\"{}\"", SessionId::new().unwrap());
        assert!(serde_json::from_str::<AccountId>(&json).is_err());
    }
}
