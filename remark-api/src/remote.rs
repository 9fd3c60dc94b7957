use std::rc::Rc;

use async_trait::async_trait;

use crate::{CommentId, ContentId, Error, RawComment, UserId};

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub content_id: ContentId,
    pub author_id: UserId,
    pub text: String,

    /// Set when this comment is a reply
    #[serde(default)]
    pub reply_to_comment_id: Option<CommentId>,
}

impl NewComment {
    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_string(&self.text)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeToggle {
    pub comment_id: CommentId,
    pub user_id: UserId,

    /// The state the like should be in once the call succeeded
    pub liked: bool,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepliesQuery {
    pub comment_id: CommentId,

    /// Viewer on behalf of whom `is_liked` gets computed
    #[serde(default)]
    pub user_id: Option<UserId>,
}

/// The remote collaborator owning the authoritative thread
///
/// Futures are not required to be `Send`: everything runs on the browser's single thread.
#[async_trait(?Send)]
pub trait Remote {
    /// Note that no identifier is returned for the new comment
    async fn create_comment(&self, c: NewComment) -> Result<(), Error>;
    async fn toggle_comment_like(&self, t: LikeToggle) -> Result<(), Error>;
    async fn get_comment_replies(&self, q: RepliesQuery) -> Result<Vec<RawComment>, Error>;
}

#[async_trait(?Send)]
impl<R: Remote + ?Sized> Remote for Rc<R> {
    async fn create_comment(&self, c: NewComment) -> Result<(), Error> {
        (**self).create_comment(c).await
    }

    async fn toggle_comment_like(&self, t: LikeToggle) -> Result<(), Error> {
        (**self).toggle_comment_like(t).await
    }

    async fn get_comment_replies(&self, q: RepliesQuery) -> Result<Vec<RawComment>, Error> {
        (**self).get_comment_replies(q).await
    }
}
