//! # kindid
//!
//! Typed, prefixed, time-sortable identifiers.
//!
//! ## Design Principles
//!
//! - Every identifier belongs to exactly one kind, and every kind owns
//!   exactly one prefix for the lifetime of the process
//! - IDs of different kinds are different types and never compare equal
//! - All IDs have a canonical string representation with strict parsing
//! - IDs support roundtrip serialization (parse → format → parse)
//!
//! ## ID Format
//!
//! All IDs use a prefixed format: `{prefix}_{base36}`
//!
//! Examples:
//! - `acct_3h1p4st4l6hh54rjtj9rqn4x`
//! - `ses_3h1p4st4lhbjvccg8mvmkxkd`
//!
//! The payload is a 128-bit value written in base 36 (`[0-9a-z]`). Ordered
//! kinds draw it from UUIDv7, so IDs sort by creation time; unordered kinds
//! draw it from UUIDv4.
//!
//! ## Declaring kinds
//!
//! ```
//! use kindid::{define_kind, Id, IdKind};
//!
//! define_kind!(pub Account, "acct");
//! define_kind!(pub Session, "ses");
//!
//! pub type AccountId = Id<Account>;
//! pub type SessionId = Id<Session>;
//!
//! Account::declare().unwrap();
//! Session::declare().unwrap();
//!
//! let id = AccountId::new().unwrap();
//! let parsed: AccountId = id.to_string().parse().unwrap();
//! assert_eq!(id, parsed);
//! assert!(SessionId::parse(&id.to_string()).is_err());
//! ```

mod any;
pub mod base36;
mod error;
mod id;
mod kind;
mod registry;
mod source;

pub use any::{parse_any, AnyId};
pub use error::{DecodeError, ErrorKind, IdError};
pub use id::Id;
pub use kind::IdKind;
pub use registry::{validate_prefix, KindHandle, Registry, SEPARATOR};
pub use source::{default_source, timestamp_ms, UlidSource, UuidSource, ValueSource};
