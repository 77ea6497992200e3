//! Opaque integer identifiers assigned by the persistence layer.
//!
//! The engine never interprets identifier values; they exist to reference
//! rows across ports. Each identifier gets its own newtype so a member id
//! can never be passed where a place id is expected.

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw identifier assigned by the store.
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Raw integer value of the identifier.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }
    };
}

define_id!(
    /// Identifier of a group.
    GroupId
);
define_id!(
    /// Identifier of a group member.
    MemberId
);
define_id!(
    /// Identifier of a place a group may eat at.
    PlaceId
);
define_id!(
    /// Identifier of a lunchbreak row.
    LunchbreakId
);
define_id!(
    /// Identifier of a participant row.
    ParticipantId
);
define_id!(
    /// Identifier of a comment row.
    CommentId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_transparently() {
        let encoded = serde_json::to_value(GroupId::new(7)).expect("id serialises");
        assert_eq!(encoded, serde_json::json!(7));
    }

    #[test]
    fn ids_display_their_raw_value() {
        assert_eq!(MemberId::new(42).to_string(), "42");
    }
}
