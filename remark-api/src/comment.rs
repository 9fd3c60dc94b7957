use crate::{CommentId, ContentId, Time, UserId};

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Author {
    pub id: UserId,
    pub name: String,

    /// Reference to the avatar image, if the user has one
    #[serde(default)]
    pub avatar: Option<String>,
}

/// A comment record as returned by the remote
///
/// The remote does not bound the nesting, so `replies` may go arbitrarily deep.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawComment {
    pub id: CommentId,
    pub content_id: ContentId,
    pub author: Author,
    pub text: String,
    pub created_at: Time,
    pub updated_at: Time,
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default)]
    pub is_liked: bool,
    #[serde(default)]
    pub replies_count: u64,
    #[serde(default)]
    pub replies: Vec<RawComment>,
}

/// The content item owning a thread, with its top-level comments
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Content {
    pub id: ContentId,
    pub comments: Vec<RawComment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_id_conventions() {
        let raw: RawComment = serde_json::from_str(
            r#"{
                "id": 12,
                "contentId": "post-1",
                "author": { "id": 3, "name": "alice" },
                "text": "hello",
                "createdAt": "2022-11-20T10:00:00Z",
                "updatedAt": "2022-11-20T10:00:00Z",
                "likesCount": 2,
                "repliesCount": 1,
                "replies": [{
                    "id": "13",
                    "contentId": "post-1",
                    "author": { "id": "4", "name": "bob", "avatar": "bob.png" },
                    "text": "hi",
                    "createdAt": "2022-11-20T10:01:00Z",
                    "updatedAt": "2022-11-20T10:01:00Z"
                }]
            }"#,
        )
        .unwrap();
        assert_eq!(raw.id, CommentId::from("12"));
        assert_eq!(raw.author.id, UserId::from(3));
        assert!(!raw.is_liked);
        assert_eq!(raw.replies[0].id, CommentId::from(13));
        assert_eq!(raw.replies[0].author.avatar.as_deref(), Some("bob.png"));
        assert_eq!(raw.replies[0].replies_count, 0);
        assert!(raw.replies[0].replies.is_empty());
    }
}
