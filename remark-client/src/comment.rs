use chrono::Utc;

use crate::api::{Author, CommentId, ContentId, RawComment, Time};

/// Number of nesting levels actually held in memory: a comment, then its replies
pub const MAX_DEPTH: usize = 2;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Comment {
    pub id: CommentId,
    pub content_id: ContentId,
    pub author: Author,
    pub text: String,
    pub created_at: Time,
    pub updated_at: Time,
    pub likes_count: u64,

    /// Whether the current viewer likes this comment
    pub is_liked: bool,

    /// Server-side number of replies, which can be larger than `replies.len()` until they
    /// get loaded
    pub replies_count: u64,

    /// Replies in chronological order, always empty past `MAX_DEPTH`
    pub replies: im::Vector<Comment>,
}

impl Comment {
    /// Normalizes a top-level comment record
    pub fn from_raw(raw: RawComment) -> Comment {
        Comment::from_raw_at(raw, 1)
    }

    fn from_raw_at(raw: RawComment, depth: usize) -> Comment {
        let replies = match depth < MAX_DEPTH {
            true => raw
                .replies
                .into_iter()
                .map(|r| Comment::from_raw_at(r, depth + 1))
                .collect(),
            false => {
                if !raw.replies.is_empty() {
                    tracing::trace!(
                        comment = %raw.id,
                        dropped = raw.replies.len(),
                        "truncating replies past max depth"
                    );
                }
                im::Vector::new()
            }
        };
        Comment {
            id: raw.id,
            content_id: raw.content_id,
            author: raw.author,
            text: raw.text,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
            likes_count: raw.likes_count,
            is_liked: raw.is_liked,
            replies_count: raw.replies_count,
            replies,
        }
    }

    /// Builds the local stand-in for a comment the remote was not told about yet
    pub fn transient(content_id: ContentId, author: Author, text: String) -> Comment {
        let now = Utc::now();
        Comment {
            id: CommentId::transient(),
            content_id,
            author,
            text,
            created_at: now,
            updated_at: now,
            likes_count: 0,
            is_liked: false,
            replies_count: 0,
            replies: im::Vector::new(),
        }
    }

    pub fn is_transient(&self) -> bool {
        self.id.is_transient()
    }

    /// Whether toggling the like moves `likes_count`, which is not the case when unliking a
    /// comment whose count is already zero
    pub fn like_moves_count(&self) -> bool {
        !self.is_liked || self.likes_count > 0
    }

    pub(crate) fn toggle_like(&mut self) {
        self.is_liked = !self.is_liked;
        match self.is_liked {
            true => self.likes_count += 1,
            false => self.likes_count = self.likes_count.saturating_sub(1),
        }
    }

    /// Undoes `toggle_like`, given what `like_moves_count` said before it
    pub(crate) fn revert_like(&mut self, moved_count: bool) {
        match moved_count {
            true => self.toggle_like(),
            false => self.is_liked = !self.is_liked,
        }
    }
}

/// Normalizes a freshly fetched batch of replies, which sit at the last materialized level
pub fn normalize_replies(raw: Vec<RawComment>) -> im::Vector<Comment> {
    raw.into_iter()
        .map(|r| Comment::from_raw_at(r, MAX_DEPTH))
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::api::UserId;

    pub fn author(id: &str) -> Author {
        Author {
            id: UserId::from(id),
            name: format!("user {id}"),
            avatar: None,
        }
    }

    pub fn raw(id: &str, replies: Vec<RawComment>) -> RawComment {
        let date = "2022-11-20T10:00:00Z".parse().unwrap();
        RawComment {
            id: CommentId::from(id),
            content_id: ContentId::from("post"),
            author: author("u0"),
            text: format!("comment {id}"),
            created_at: date,
            updated_at: date,
            likes_count: 0,
            is_liked: false,
            replies_count: replies.len() as u64,
            replies,
        }
    }

    #[test]
    fn hydration_keeps_two_levels() {
        let c = Comment::from_raw(raw(
            "1",
            vec![raw("2", vec![raw("3", vec![raw("4", vec![])])])],
        ));
        assert_eq!(c.replies.len(), 1);
        let reply = &c.replies[0];
        assert_eq!(reply.id, CommentId::from("2"));
        assert_eq!(reply.replies_count, 1);
        assert!(reply.replies.is_empty());
    }

    #[test]
    fn loaded_replies_drop_their_children() {
        let replies = normalize_replies(vec![
            raw("2", vec![raw("3", vec![])]),
            raw("5", vec![]),
        ]);
        assert_eq!(replies.len(), 2);
        assert!(replies.iter().all(|r| r.replies.is_empty()));
        assert_eq!(replies[0].replies_count, 1);
    }

    #[test]
    fn transient_comments_start_empty() {
        let c = Comment::transient(ContentId::from("post"), author("u1"), String::from("hey"));
        assert!(c.is_transient());
        assert_eq!(c.likes_count, 0);
        assert_eq!(c.replies_count, 0);
        assert!(!c.is_liked);
        assert_eq!(c.created_at, c.updated_at);
    }

    #[test]
    fn like_toggle_is_self_inverse() {
        let mut c = Comment::from_raw(raw("1", vec![]));
        c.likes_count = 5;
        let before = c.clone();
        c.toggle_like();
        assert!(c.is_liked);
        assert_eq!(c.likes_count, 6);
        c.toggle_like();
        assert_eq!(c, before);
    }

    #[test]
    fn unliking_at_zero_reverts_exactly() {
        let mut c = Comment::from_raw(raw("1", vec![]));
        c.is_liked = true;
        let before = c.clone();
        let moved = c.like_moves_count();
        assert!(!moved);
        c.toggle_like();
        assert!(!c.is_liked);
        assert_eq!(c.likes_count, 0);
        c.revert_like(moved);
        assert_eq!(c, before);
    }
}
