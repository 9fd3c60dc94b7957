use std::fmt;

use uuid::Uuid;

/// Prefix reserved for comments that only exist locally, before the remote confirmed them
pub const TRANSIENT_PREFIX: &str = "tmp-";

/// An identifier as sent by the remote, which is free to use numbers or strings
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Signed(i64),
    Unsigned(u64),
    Text(String),
}

impl From<RawId> for String {
    fn from(id: RawId) -> String {
        match id {
            RawId::Signed(n) => n.to_string(),
            RawId::Unsigned(n) => n.to_string(),
            RawId::Text(s) => s,
        }
    }
}

macro_rules! string_id {
    ( $(#[$meta:meta])* $name:ident ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Debug,
            Default,
            Eq,
            Hash,
            Ord,
            PartialEq,
            PartialOrd,
            serde::Deserialize,
            serde::Serialize,
        )]
        #[serde(from = "RawId", into = "String")]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<RawId> for $name {
            fn from(id: RawId) -> $name {
                $name(String::from(id))
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> $name {
                $name(String::from(id))
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> $name {
                $name(id.to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of a comment or a reply, compared in its canonical string form
    CommentId
);
string_id!(UserId);
string_id!(
    /// Identifier of the content item (post, artwork...) a thread hangs off
    ContentId
);

impl CommentId {
    /// Generates a fresh id for a comment that was not acknowledged by the remote yet
    pub fn transient() -> CommentId {
        CommentId(format!("{TRANSIENT_PREFIX}{}", Uuid::new_v4()))
    }

    pub fn is_transient(&self) -> bool {
        self.0.starts_with(TRANSIENT_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_and_strings_compare_equal() {
        let from_num: CommentId = serde_json::from_str("42").unwrap();
        let from_str: CommentId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(from_num, from_str);
        assert_eq!(from_num, CommentId::from(42));

        let negative: UserId = serde_json::from_str("-7").unwrap();
        assert_eq!(negative.as_str(), "-7");
    }

    #[test]
    fn ids_serialize_as_strings() {
        let id: ContentId = serde_json::from_str("1234").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"1234\"");
    }

    #[test]
    fn transient_ids() {
        let a = CommentId::transient();
        let b = CommentId::transient();
        assert!(a.is_transient());
        assert!(b.is_transient());
        assert_ne!(a, b);
        assert!(!CommentId::from("c1").is_transient());
        assert!(!CommentId::from(3).is_transient());
    }
}
