//! Closed sets of named protocol constants.
//!
//! Every set is a plain Rust enum carrying its wire value as discriminant,
//! plus a static table of its variants used for reverse lookup.

/// A closed set of `(value, name)` pairs.
///
/// Equality, ordering and hashing follow the numeric value; `Display` yields
/// the name.
pub trait Enumeration: Copy + Eq + Ord + 'static {
    /// Name of the set, used in error messages.
    const SET: &'static str;
    /// Every member of the set, in ascending value order.
    const VARIANTS: &'static [Self];

    fn value(self) -> u8;

    fn name(self) -> &'static str;

    /// Reverse lookup by wire value. Unknown values yield `None`, never a
    /// fallback member.
    fn lookup_by_value(value: u8) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|v| v.value() == value)
    }

    fn lookup_by_name(name: &str) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|v| v.name() == name)
    }
}

/// Declares a `#[repr(u8)]` enum and implements [`Enumeration`], `Display`,
/// `TryFrom<u8>` and `From<Self> for u8` for it.
///
/// Variants must be listed in ascending value order so the derived `Ord`
/// matches the numeric ordering.
macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident in $set:literal {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $value:literal => $label:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant = $value,
            )+
        }

        impl $crate::registry::Enumeration for $name {
            const SET: &'static str = $set;
            const VARIANTS: &'static [Self] = &[$(Self::$variant,)+];

            fn value(self) -> u8 {
                self as u8
            }

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::registry::Enumeration::name(*self))
            }
        }

        impl ::std::convert::TryFrom<u8> for $name {
            type Error = $crate::error::ProtoError;

            fn try_from(value: u8) -> ::std::result::Result<Self, Self::Error> {
                <Self as $crate::registry::Enumeration>::lookup_by_value(value).ok_or(
                    $crate::error::ProtoError::UnrecognizedEnumValue { set: $set, value },
                )
            }
        }

        impl ::std::convert::From<$name> for u8 {
            fn from(value: $name) -> u8 {
                value as u8
            }
        }
    };
}
