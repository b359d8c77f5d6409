//! Identifier kinds known to idctl.

use kindid::{declare_all, define_kind, IdError};

define_kind!(pub Account, "acct");
define_kind!(pub Session, "ses");
define_kind!(pub Meeting, "meet", ordered = false);

/// Register every built-in kind in the global registry.
pub fn declare() -> Result<(), IdError> {
    declare_all!(Account, Session, Meeting)
}
