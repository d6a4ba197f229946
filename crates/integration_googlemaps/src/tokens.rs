//! Closed token vocabularies
//!
//! Every enum that travels over the wire as a string is declared once with
//! [`token_enum!`]. The declaration is the lookup table: the macro derives
//! the `variant -> token` and `token -> variant` directions from the same
//! list, so a variant without a token cannot compile. Unknown tokens decode
//! to a [`TokenError`] rather than a catch-all variant.

use thiserror::Error;

/// A remote string that is not part of a closed vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized {kind} token \"{token}\"")]
pub struct TokenError {
    /// Name of the enum that rejected the token
    pub kind: &'static str,
    /// The offending token
    pub token: String,
}

macro_rules! token_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $token:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Every variant paired with its remote token, in declaration order
            pub const TABLE: &'static [(Self, &'static str)] = &[
                $( (Self::$variant, $token), )+
            ];

            /// The exact token the remote API uses for this value
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $token, )+
                }
            }

            /// Look up a variant by its remote token
            pub fn from_token(token: &str) -> Result<Self, $crate::tokens::TokenError> {
                Self::TABLE
                    .iter()
                    .find(|(_, candidate)| *candidate == token)
                    .map(|(variant, _)| *variant)
                    .ok_or_else(|| $crate::tokens::TokenError {
                        kind: stringify!($name),
                        token: token.to_string(),
                    })
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::tokens::TokenError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_token(s)
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(
                deserializer: D,
            ) -> Result<Self, D::Error> {
                let token =
                    <::std::string::String as ::serde::Deserialize>::deserialize(deserializer)?;
                Self::from_token(&token).map_err(::serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use token_enum;
