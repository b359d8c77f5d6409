//! Statically declared identifier kinds.

use std::sync::OnceLock;

use crate::error::IdError;
use crate::registry::{KindHandle, Registry};

/// A compile-time identifier kind, bound to one prefix.
///
/// Implement this with [`define_kind!`](crate::define_kind) rather than by
/// hand. The kind is registered in [`Registry::global`] the first time it is
/// used (or when [`declare`](IdKind::declare) is called at startup), and the
/// outcome is cached: a kind whose prefix collides with an earlier
/// registration stays unusable, and the earlier kind is unaffected.
pub trait IdKind: 'static {
    /// Prefix placed before the separator.
    const PREFIX: &'static str;

    /// Whether fresh IDs come from a time-ordered source.
    const ORDERED: bool = true;

    /// Storage for the cached registration outcome.
    fn declaration() -> &'static OnceLock<Result<KindHandle, IdError>>;

    /// Returns the registered handle, registering on first use.
    fn handle() -> Result<&'static KindHandle, IdError> {
        Self::declaration()
            .get_or_init(|| Registry::global().register(Self::PREFIX, Self::ORDERED))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Registers the kind eagerly, returning the declaration error if any.
    fn declare() -> Result<KindHandle, IdError> {
        Self::handle().cloned()
    }
}

/// Declares a marker type implementing [`IdKind`].
///
/// # Example
///
/// ```
/// use kindid::{define_kind, Id};
///
/// define_kind!(Account, "acct");
/// define_kind!(Meeting, "meet", ordered = false);
///
/// type AccountId = Id<Account>;
/// type MeetingId = Id<Meeting>;
///
/// let id = AccountId::new().unwrap();
/// assert!(id.to_string().starts_with("acct_"));
/// ```
#[macro_export]
macro_rules! define_kind {
    ($(#[$meta:meta])* $vis:vis $name:ident, $prefix:literal) => {
        $crate::define_kind!($(#[$meta])* $vis $name, $prefix, ordered = true);
    };
    ($(#[$meta:meta])* $vis:vis $name:ident, $prefix:literal, ordered = $ordered:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {}

        impl $crate::IdKind for $name {
            const PREFIX: &'static str = $prefix;
            const ORDERED: bool = $ordered;

            fn declaration(
            ) -> &'static ::std::sync::OnceLock<::std::result::Result<$crate::KindHandle, $crate::IdError>>
            {
                static DECLARATION: ::std::sync::OnceLock<
                    ::std::result::Result<$crate::KindHandle, $crate::IdError>,
                > = ::std::sync::OnceLock::new();
                &DECLARATION
            }
        }
    };
}

/// Declares several kinds in order, stopping at the first failure.
///
/// ```
/// use kindid::{declare_all, define_kind};
///
/// define_kind!(Order, "ord");
/// define_kind!(Invoice, "inv");
///
/// declare_all!(Order, Invoice).unwrap();
/// ```
#[macro_export]
macro_rules! declare_all {
    ($($kind:ty),+ $(,)?) => {
        (|| -> ::std::result::Result<(), $crate::IdError> {
            $( <$kind as $crate::IdKind>::declare()?; )+
            Ok(())
        })()
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    define_kind!(Widget, "kwidget");
    define_kind!(Gadget, "kgadget", ordered = false);
    define_kind!(WidgetClash, "kwidget");
    define_kind!(BadPrefix, "k_bad");

    #[test]
    fn test_declare_registers_globally() {
        let handle = Widget::declare().unwrap();
        assert_eq!(handle.prefix(), "kwidget");
        assert!(handle.ordered());
        assert_eq!(
            Registry::global().lookup_by_prefix("kwidget"),
            Some(handle)
        );
    }

    #[test]
    fn test_handle_is_cached() {
        let a = Gadget::handle().unwrap();
        let b = Gadget::handle().unwrap();
        assert!(std::ptr::eq(a, b));
        assert!(!a.ordered());
    }

    #[test]
    fn test_colliding_kind_stays_failed() {
        Widget::declare().unwrap();

        let err = WidgetClash::declare().unwrap_err();
        assert!(err.is_configuration());
        assert!(matches!(err, IdError::DuplicatePrefix { .. }));

        // Cached: the second attempt reports the same failure.
        assert_eq!(WidgetClash::declare().unwrap_err(), err);
        // The first kind is still the owner.
        assert!(Widget::declare().is_ok());
    }

    #[test]
    fn test_malformed_prefix_rejected() {
        assert!(matches!(
            BadPrefix::declare(),
            Err(IdError::PrefixContainsSeparator { .. })
        ));
        assert!(!Registry::global().contains("k_bad"));
    }

    #[test]
    fn test_declare_all_stops_at_first_error() {
        assert!(declare_all!(Widget, Gadget).is_ok());
        assert!(declare_all!(Widget, BadPrefix, Gadget).is_err());
    }
}
