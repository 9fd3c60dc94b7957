use crate::{
    api::{Author, CommentId, LikeToggle, NewComment, Remote},
    Comment, CommentTree, Thread, Timer,
};

/// Reasons for refusing a mutation before anything gets touched
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("no authenticated user to act as")]
    MissingActor,

    #[error("comment text is empty")]
    EmptyText,
}

/// How an optimistic mutation ended
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// The remote accepted the change
    Confirmed,

    /// The remote refused the change, which was undone locally
    RolledBack,

    /// The target is not in the tree (or only exists locally), so nothing happened
    Ignored,
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct MutationId(pub(crate) u64);

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MutationKind {
    CreateComment {
        transient_id: CommentId,
    },
    CreateReply {
        parent_id: CommentId,
        transient_id: CommentId,
    },
    ToggleLike {
        comment_id: CommentId,
        parent_id: Option<CommentId>,
        liked: bool,
    },
}

/// A mutation applied locally whose remote call has not resolved yet
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PendingMutation {
    pub id: MutationId,
    pub kind: MutationKind,
}

fn validate_actor(actor: Option<&Author>) -> Result<&Author, ValidationError> {
    actor.ok_or(ValidationError::MissingActor)
}

fn validate_text(text: &str) -> Result<(), ValidationError> {
    match text.trim().is_empty() {
        true => Err(ValidationError::EmptyText),
        false => Ok(()),
    }
}

impl<R: Remote, T: Timer> Thread<R, T> {
    /// Ends the pending `mutation`, applying `f` to the tree unless it got re-hydrated since
    fn finish<F>(&self, generation: u64, mutation: MutationId, f: F)
    where
        F: FnOnce(&CommentTree) -> CommentTree,
    {
        self.write(|st| {
            st.pending.remove(&mutation);
            if st.generation == generation {
                st.tree = f(&st.tree);
            } else {
                tracing::debug!(?mutation, "thread got re-hydrated, not touching the new tree");
            }
        })
    }

    /// Posts a top-level comment, displaying it right away
    ///
    /// The displayed comment is only a stand-in: the remote does not tell us the real id, so
    /// on success it gets dropped after `transient_ttl`, and on failure immediately.
    pub async fn add_comment(
        &self,
        text: &str,
        actor: Option<&Author>,
    ) -> Result<Outcome, ValidationError> {
        let author = validate_actor(actor)?;
        validate_text(text)?;

        let (generation, mutation, transient_id, content_id) = self.write(|st| {
            let comment = Comment::transient(st.content_id.clone(), author.clone(), text.to_string());
            let transient_id = comment.id.clone();
            st.tree = st.tree.with_new_top_level_comment(comment);
            let mutation = st.begin(MutationKind::CreateComment {
                transient_id: transient_id.clone(),
            });
            (st.generation, mutation, transient_id, st.content_id.clone())
        });
        tracing::debug!(comment = %transient_id, "optimistically added comment");

        let res = self
            .remote
            .create_comment(NewComment {
                content_id,
                author_id: author.id.clone(),
                text: text.to_string(),
                reply_to_comment_id: None,
            })
            .await;

        if let Err(err) = res {
            tracing::warn!(comment = %transient_id, %err, "comment creation failed, rolling back");
            self.finish(generation, mutation, |tree| tree.without_comment(&transient_id));
            return Ok(Outcome::RolledBack);
        }

        self.finish(generation, mutation, CommentTree::clone);
        self.timer.sleep(self.config.transient_ttl()).await;
        self.write(|st| {
            if st.generation == generation {
                st.tree = st.tree.without_comment(&transient_id);
            }
        });
        tracing::debug!(comment = %transient_id, "settled added comment");
        Ok(Outcome::Confirmed)
    }

    /// Replies to the top-level comment `parent_id`, displaying the reply right away
    ///
    /// The parent's reply count is bumped along with it, and restored if the remote refuses.
    pub async fn add_reply(
        &self,
        parent_id: &CommentId,
        text: &str,
        actor: Option<&Author>,
    ) -> Result<Outcome, ValidationError> {
        let author = validate_actor(actor)?;
        validate_text(text)?;

        let known = self.read(|st| matches!(st.tree.get(parent_id), Some(p) if !p.is_transient()));
        if !known {
            tracing::debug!(parent = %parent_id, "ignoring reply to a comment not in the tree");
            return Ok(Outcome::Ignored);
        }

        let (generation, mutation, transient_id, content_id) = self.write(|st| {
            let reply = Comment::transient(st.content_id.clone(), author.clone(), text.to_string());
            let transient_id = reply.id.clone();
            st.tree = st.tree.with_new_reply(parent_id, reply);
            let mutation = st.begin(MutationKind::CreateReply {
                parent_id: parent_id.clone(),
                transient_id: transient_id.clone(),
            });
            (st.generation, mutation, transient_id, st.content_id.clone())
        });
        tracing::debug!(parent = %parent_id, reply = %transient_id, "optimistically added reply");

        let res = self
            .remote
            .create_comment(NewComment {
                content_id,
                author_id: author.id.clone(),
                text: text.to_string(),
                reply_to_comment_id: Some(parent_id.clone()),
            })
            .await;

        if let Err(err) = res {
            tracing::warn!(parent = %parent_id, reply = %transient_id, %err, "reply creation failed, rolling back");
            self.finish(generation, mutation, |tree| {
                tree.without_reply(parent_id, &transient_id)
            });
            return Ok(Outcome::RolledBack);
        }

        self.finish(generation, mutation, CommentTree::clone);
        self.timer.sleep(self.config.transient_ttl()).await;
        self.write(|st| {
            if st.generation == generation {
                st.tree = st.tree.without_settled_reply(parent_id, &transient_id);
                // The authoritative reply can only come from a new fetch
                st.loads.loaded.remove(parent_id);
            }
        });
        tracing::debug!(parent = %parent_id, reply = %transient_id, "settled added reply");
        Ok(Outcome::Confirmed)
    }

    /// Flips the like of the viewer on a comment, or on a reply when `parent_id` is set
    ///
    /// The intended state is computed from the current one before touching anything. On
    /// failure the toggle is undone, leaving the count alone if it could not move.
    pub async fn toggle_like(
        &self,
        comment_id: &CommentId,
        parent_id: Option<&CommentId>,
        actor: Option<&Author>,
    ) -> Result<Outcome, ValidationError> {
        let author = validate_actor(actor)?;

        let target = self.read(|st| match st.tree.target(comment_id, parent_id) {
            Some(c) if !c.is_transient() => Some((!c.is_liked, c.like_moves_count())),
            _ => None,
        });
        let (liked, moved_count) = match target {
            Some(target) => target,
            None => {
                tracing::debug!(comment = %comment_id, "ignoring like of a comment not in the tree");
                return Ok(Outcome::Ignored);
            }
        };

        let (generation, mutation) = self.write(|st| {
            st.tree = st.tree.with_toggled_like(comment_id, parent_id);
            let mutation = st.begin(MutationKind::ToggleLike {
                comment_id: comment_id.clone(),
                parent_id: parent_id.cloned(),
                liked,
            });
            (st.generation, mutation)
        });
        tracing::debug!(comment = %comment_id, liked, "optimistically toggled like");

        let res = self
            .remote
            .toggle_comment_like(LikeToggle {
                comment_id: comment_id.clone(),
                user_id: author.id.clone(),
                liked,
            })
            .await;

        match res {
            Ok(()) => {
                self.finish(generation, mutation, CommentTree::clone);
                Ok(Outcome::Confirmed)
            }
            Err(err) => {
                tracing::warn!(comment = %comment_id, %err, "like toggle failed, rolling back");
                self.finish(generation, mutation, |tree| {
                    tree.with_reverted_like(comment_id, parent_id, moved_count)
                });
                Ok(Outcome::RolledBack)
            }
        }
    }
}
