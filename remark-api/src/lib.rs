use chrono::Utc;

pub use uuid::Uuid;
pub type Time = chrono::DateTime<Utc>;

mod comment;
pub use comment::{Author, Content, RawComment};

mod error;
pub use error::Error;

mod id;
pub use id::{CommentId, ContentId, RawId, UserId, TRANSIENT_PREFIX};

mod remote;
pub use remote::{LikeToggle, NewComment, Remote, RepliesQuery};

pub fn validate_string(s: &str) -> Result<(), Error> {
    if s.contains('\0') {
        return Err(Error::NullByteInString(String::from(s)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_bytes_are_refused() {
        assert_eq!(validate_string("hello"), Ok(()));
        assert_eq!(
            validate_string("hel\0lo"),
            Err(Error::NullByteInString(String::from("hel\0lo")))
        );
    }

    #[test]
    fn new_comment_wire_format() {
        let c = NewComment {
            content_id: ContentId::from("post-1"),
            author_id: UserId::from(7),
            text: String::from("ok"),
            reply_to_comment_id: Some(CommentId::from(3)),
        };
        assert_eq!(
            serde_json::to_value(&c).unwrap(),
            serde_json::json!({
                "contentId": "post-1",
                "authorId": "7",
                "text": "ok",
                "replyToCommentId": "3",
            })
        );
        assert_eq!(c.validate(), Ok(()));
    }
}
