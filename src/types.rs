use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

/// Identifier as it appears on the wire.
///
/// The service renders most ids as strings but some nested references
/// (`show_id` on a review) as integers.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Number(i64),
}

impl From<WireId> for String {
    fn from(id: WireId) -> Self {
        match id {
            WireId::Text(s) => s,
            WireId::Number(n) => n.to_string(),
        }
    }
}

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into)]
        #[serde(from = "WireId", into = "String")]
        pub struct $name(pub String);

        impl $name {
            /// Raw identifier.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }

        impl From<WireId> for $name {
            fn from(id: WireId) -> Self {
                Self(id.into())
            }
        }
    };
}

opaque_id! {
    /// Server-assigned account identifier.
    UserId
}

opaque_id! {
    /// Server-assigned show identifier, used to scope review requests.
    ShowId
}

opaque_id! {
    /// Server-assigned review identifier.
    ReviewId
}
