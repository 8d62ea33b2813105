//! Identifiers for ranks and items
//!
//! Both identifiers wrap a UUIDv7. They are opaque to callers: the only
//! guarantees are uniqueness within their collection and a stable string form.

use std::fmt;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u128);

        impl $name {
            /// Generate a new UUIDv7-based identifier
            pub fn new() -> Self {
                Self(uuid::Uuid::now_v7().as_u128())
            }

            /// Create an identifier from a raw u128 value
            ///
            /// This is primarily for storage layer deserialization.
            pub fn from_value(value: u128) -> Self {
                Self(value)
            }

            /// Parse an identifier from its hyphenated UUID string
            pub fn from_string(s: &str) -> Result<Self, String> {
                uuid::Uuid::parse_str(s)
                    .map(|u| Self(u.as_u128()))
                    .map_err(|e| format!("Invalid {} string: {}", stringify!($name), e))
            }

            /// Get the raw u128 value
            pub fn value(&self) -> u128 {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", uuid::Uuid::from_u128(self.0))
            }
        }
    };
}

uuid_id!(
    /// Unique identifier of a rank within the store
    ///
    /// # Examples
    ///
    /// ```
    /// use rankem_domain::RankId;
    ///
    /// let id = RankId::new();
    /// let parsed = RankId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    RankId
);

uuid_id!(
    /// Unique identifier of an item within its rank
    ItemId
);

/// Generate an identifier that does not collide with any in `existing`
///
/// UUIDv7 collisions are practically impossible, but uniqueness inside a
/// collection is an invariant of the model, so it is checked rather than assumed.
pub fn fresh_id<T, F>(mut generate: F, existing: impl Fn(&T) -> bool) -> T
where
    F: FnMut() -> T,
{
    loop {
        let candidate = generate();
        if !existing(&candidate) {
            return candidate;
        }
    }
}
