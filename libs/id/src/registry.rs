//! The identifier kind registry.
//!
//! Maps each declared prefix to exactly one kind. Entries are only ever
//! added, never removed or reassigned, so `prefix -> kind` stays a bijection
//! for the lifetime of the registry.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use tracing::debug;

use crate::any::AnyId;
use crate::error::IdError;
use crate::source::default_source;

/// Separator between prefix and payload in the canonical form.
pub const SEPARATOR: char = '_';

#[derive(Debug)]
struct KindInfo {
    prefix: Box<str>,
    ordered: bool,
}

/// Handle to one registered identifier kind.
///
/// Handles are equal only when they come from the same registration.
#[derive(Clone)]
pub struct KindHandle(Arc<KindInfo>);

impl KindHandle {
    /// The prefix this kind owns.
    pub fn prefix(&self) -> &str {
        &self.0.prefix
    }

    /// Whether fresh IDs of this kind come from a time-ordered source.
    pub fn ordered(&self) -> bool {
        self.0.ordered
    }

    /// The prefix followed by the separator, e.g. `acct_`.
    pub fn expected_prefix(&self) -> String {
        format!("{}{}", self.0.prefix, SEPARATOR)
    }
}

impl PartialEq for KindHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for KindHandle {}

impl Hash for KindHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.prefix.hash(state);
    }
}

impl fmt::Debug for KindHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KindHandle")
            .field("prefix", &self.0.prefix)
            .field("ordered", &self.0.ordered)
            .finish()
    }
}

impl fmt::Display for KindHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.prefix)
    }
}

/// Checks that `prefix` is a non-empty run of `[a-z0-9]`.
pub fn validate_prefix(prefix: &str) -> Result<(), IdError> {
    if prefix.is_empty() {
        return Err(IdError::EmptyPrefix);
    }
    if prefix.contains(SEPARATOR) {
        return Err(IdError::PrefixContainsSeparator {
            prefix: prefix.to_string(),
        });
    }
    if let Some(ch) = prefix
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit()))
    {
        return Err(IdError::InvalidPrefix {
            prefix: prefix.to_string(),
            ch,
        });
    }
    Ok(())
}

/// Table of declared identifier kinds, keyed by prefix.
#[derive(Debug, Default)]
pub struct Registry {
    kinds: RwLock<HashMap<Box<str>, KindHandle>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry used by statically declared kinds.
    pub fn global() -> &'static Registry {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(Registry::new)
    }

    /// Registers a new kind.
    ///
    /// Fails if the prefix is malformed or already owned by another kind.
    /// The check and the insert happen under one write lock, so of two
    /// concurrent registrations of the same prefix exactly one succeeds.
    pub fn register(&self, prefix: &str, ordered: bool) -> Result<KindHandle, IdError> {
        validate_prefix(prefix)?;

        // Poisoning cannot leave a half-inserted entry; keep using the table.
        let mut kinds = self.kinds.write().unwrap_or_else(PoisonError::into_inner);
        if kinds.contains_key(prefix) {
            return Err(IdError::DuplicatePrefix {
                prefix: prefix.to_string(),
            });
        }

        let handle = KindHandle(Arc::new(KindInfo {
            prefix: prefix.into(),
            ordered,
        }));
        kinds.insert(prefix.into(), handle.clone());
        drop(kinds);

        debug!(prefix, ordered, "Registered identifier kind");
        Ok(handle)
    }

    /// Looks up the kind that owns `prefix`.
    pub fn lookup_by_prefix(&self, prefix: &str) -> Option<KindHandle> {
        self.kinds
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(prefix)
            .cloned()
    }

    /// Finds the kind whose prefix, followed by the separator, starts `text`.
    ///
    /// Prefixes never contain the separator, so the candidate is always the
    /// text before the first `_`.
    pub fn resolve_by_full_id(&self, text: &str) -> Result<KindHandle, IdError> {
        text.split_once(SEPARATOR)
            .and_then(|(prefix, _)| self.lookup_by_prefix(prefix))
            .ok_or_else(|| IdError::UnknownPrefix {
                input: text.to_string(),
            })
    }

    /// Parses `text` as whichever registered kind owns its prefix.
    pub fn parse_any(&self, text: &str) -> Result<AnyId, IdError> {
        if text.is_empty() {
            return Err(IdError::Empty);
        }
        let kind = self.resolve_by_full_id(text)?;
        AnyId::parse_as(text, &kind)
    }

    /// Mints a fresh ID for the kind registered under `prefix`.
    pub fn generate(&self, prefix: &str) -> Result<AnyId, IdError> {
        let kind = self
            .lookup_by_prefix(prefix)
            .ok_or_else(|| IdError::UnboundKind {
                prefix: prefix.to_string(),
            })?;
        Ok(AnyId::generate(&kind, default_source()))
    }

    /// Returns true if `prefix` is registered.
    pub fn contains(&self, prefix: &str) -> bool {
        self.kinds
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(prefix)
    }

    /// All registered kinds, sorted by prefix.
    pub fn kinds(&self) -> Vec<KindHandle> {
        let mut kinds: Vec<KindHandle> = self
            .kinds
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        kinds.sort_by(|a, b| a.prefix().cmp(b.prefix()));
        kinds
    }

    /// Number of registered kinds.
    pub fn len(&self) -> usize {
        self.kinds
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if no kind has been registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
