use std::collections::HashSet;

use crate::{
    api::{CommentId, Error, Remote, RepliesQuery, UserId},
    comment::normalize_replies,
    thread::ThreadState,
    Comment, CommentTree, Thread,
};

/// Which comments have their replies in flight or already fetched
#[derive(Debug, Default)]
pub(crate) struct Loads {
    pub(crate) in_flight: HashSet<CommentId>,
    pub(crate) loaded: HashSet<CommentId>,
}

impl ThreadState {
    /// Whether revealing the replies of `id` requires asking the remote for them
    ///
    /// Transient replies do not count as loaded ones: they only exist locally.
    pub(crate) fn needs_fetch(&self, id: &CommentId) -> bool {
        match self.tree.get(id) {
            None => false,
            Some(c) => c.replies_count > 0 && !self.loads.loaded.contains(id),
        }
    }
}

impl Loads {
    /// Loads state right after hydration, where pre-loaded replies count as fetched
    pub(crate) fn hydrated(tree: &CommentTree) -> Loads {
        Loads {
            in_flight: HashSet::new(),
            loaded: tree
                .iter()
                .filter(|c| c.replies.iter().any(|r| !r.is_transient()))
                .map(|c| c.id.clone())
                .collect(),
        }
    }
}

enum Start {
    Ready(im::Vector<Comment>),
    Fetch { generation: u64 },
}

impl<R: Remote, T> Thread<R, T> {
    /// Fetches the replies of the top-level comment `id`, unless they are already there
    ///
    /// Only one fetch per comment is ever in flight. Errors are logged and returned without
    /// marking the comment as loaded, so that a later call retries.
    pub async fn load_replies(
        &self,
        id: &CommentId,
        viewer: Option<&UserId>,
    ) -> Result<im::Vector<Comment>, Error> {
        let start = self.write(|st| {
            let replies = match st.tree.get(id) {
                Some(c) => c.replies.clone(),
                None => return Err(Error::NotFound(id.clone())),
            };
            if st.loads.in_flight.contains(id) || !st.needs_fetch(id) {
                return Ok(Start::Ready(replies));
            }
            st.loads.in_flight.insert(id.clone());
            Ok(Start::Fetch {
                generation: st.generation,
            })
        })?;
        let generation = match start {
            Start::Ready(replies) => {
                tracing::trace!(comment = %id, "replies need no fetch");
                return Ok(replies);
            }
            Start::Fetch { generation } => generation,
        };

        tracing::debug!(comment = %id, "fetching replies");
        let res = self
            .remote
            .get_comment_replies(RepliesQuery {
                comment_id: id.clone(),
                user_id: viewer.cloned(),
            })
            .await;

        self.write(|st| {
            if st.generation != generation {
                tracing::debug!(comment = %id, "thread got re-hydrated while loading replies");
                return res.map(normalize_replies);
            }
            st.loads.in_flight.remove(id);
            match res {
                Err(err) => {
                    tracing::warn!(comment = %id, %err, "failed loading replies");
                    Err(err)
                }
                Ok(raw) => {
                    let replies = normalize_replies(raw);
                    tracing::debug!(comment = %id, num_replies = replies.len(), "loaded replies");
                    st.tree = st.tree.with_loaded_replies(id, replies.clone());
                    st.loads.loaded.insert(id.clone());
                    Ok(replies)
                }
            }
        })
    }

    pub fn replies_loaded(&self, id: &CommentId) -> bool {
        self.read(|st| st.loads.loaded.contains(id))
    }
}
