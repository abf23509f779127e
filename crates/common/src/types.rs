use serde::{Deserialize, Serialize};

/// Declares a surrogate-key newtype over the `SERIAL` integer column of a table.
///
/// Wrapping the raw integer prevents a package id from being bound where a
/// customer id is expected.
macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Creates the identifier from its database value.
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Returns the underlying database value.
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

row_id!(
    /// Identifier of a row in `customers`.
    CustomerId
);
row_id!(
    /// Identifier of a row in `packages`.
    PackageId
);
row_id!(
    /// Identifier of a row in `agencies`.
    AgencyId
);
row_id!(
    /// Identifier of a row in `agents`.
    AgentId
);
row_id!(
    /// Internal identifier of a row in `bookings`.
    BookingId
);

/// Public booking confirmation code, e.g. `"K3X9QZ"`.
///
/// Distinct from [`BookingId`]: this is the value shown to the customer and is
/// unique across all bookings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingNo(String);

impl BookingNo {
    /// Number of characters in a generated code.
    pub const LENGTH: usize = 6;

    /// Characters a generated code is drawn from.
    pub const ALPHABET: &'static [u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    /// Wraps an existing code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the code has the generated shape: six characters from
    /// [`BookingNo::ALPHABET`].
    pub fn is_well_formed(&self) -> bool {
        self.0.len() == Self::LENGTH && self.0.bytes().all(|b| Self::ALPHABET.contains(&b))
    }
}

impl std::fmt::Display for BookingNo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BookingNo {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
