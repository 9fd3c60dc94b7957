use std::collections::{HashMap, HashSet};

use crate::{
    api::{CommentId, Remote, UserId},
    thread::ThreadState,
    Comment, Thread,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RepliesState {
    Collapsed,
    Loading,
    Expanded,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ReplyVisibility {
    pub state: RepliesState,

    /// How many of the loaded replies are revealed
    pub visible: usize,
}

#[derive(Debug, Default)]
pub(crate) struct Expansion {
    expanded: HashSet<CommentId>,
    visible: HashMap<CommentId, usize>,
}

impl ThreadState {
    pub(crate) fn replies_state(&self, id: &CommentId) -> RepliesState {
        if self.expansion.expanded.contains(id) {
            RepliesState::Expanded
        } else if self.loads.in_flight.contains(id) {
            RepliesState::Loading
        } else {
            RepliesState::Collapsed
        }
    }

    fn visible_replies_count(&self, id: &CommentId, page_size: usize) -> usize {
        self.expansion.visible.get(id).copied().unwrap_or(page_size)
    }
}

enum Next {
    Done(RepliesState),
    Load { generation: u64 },
}

impl<R: Remote, T> Thread<R, T> {
    /// Collapses expanded replies, or reveals them, fetching them first if need be
    ///
    /// The comment is only marked expanded once its replies are there: if loading fails it
    /// stays collapsed, and toggling again retries. Toggling while loading does nothing.
    pub async fn toggle_replies(&self, id: &CommentId, viewer: Option<&UserId>) -> RepliesState {
        let next = self.write(|st| match st.replies_state(id) {
            RepliesState::Expanded => {
                st.expansion.expanded.remove(id);
                tracing::debug!(comment = %id, "collapsed replies");
                Next::Done(RepliesState::Collapsed)
            }
            RepliesState::Loading => {
                tracing::trace!(comment = %id, "replies are already loading");
                Next::Done(RepliesState::Loading)
            }
            RepliesState::Collapsed if st.tree.get(id).is_none() => {
                tracing::trace!(comment = %id, "not expanding replies of unknown comment");
                Next::Done(RepliesState::Collapsed)
            }
            RepliesState::Collapsed if st.needs_fetch(id) => Next::Load {
                generation: st.generation,
            },
            RepliesState::Collapsed => {
                st.expansion.expanded.insert(id.clone());
                tracing::debug!(comment = %id, "expanded replies");
                Next::Done(RepliesState::Expanded)
            }
        });
        let generation = match next {
            Next::Done(state) => return state,
            Next::Load { generation } => generation,
        };

        let res = self.load_replies(id, viewer).await;

        self.write(|st| {
            if st.generation != generation {
                return st.replies_state(id);
            }
            match res {
                Ok(_) => {
                    st.expansion.expanded.insert(id.clone());
                    tracing::debug!(comment = %id, "expanded replies");
                    RepliesState::Expanded
                }
                Err(_) => RepliesState::Collapsed,
            }
        })
    }

    /// Hides the replies of `id`, doing nothing if they already are
    pub fn collapse_replies(&self, id: &CommentId) {
        if self.read(|st| st.expansion.expanded.contains(id)) {
            self.write(|st| st.expansion.expanded.remove(id));
        }
    }

    /// Reveals one more page of the already-loaded replies of `id`
    ///
    /// Nothing gets fetched: going past the loaded batch is a pagination concern.
    pub fn show_more_replies(&self, id: &CommentId) -> usize {
        let page_size = self.config.page_size();
        let known = self.read(|st| st.tree.get(id).is_some());
        if !known {
            tracing::trace!(comment = %id, "not showing more replies of unknown comment");
            return page_size;
        }
        self.write(|st| {
            let visible = st.visible_replies_count(id, page_size).saturating_add(page_size);
            st.expansion.visible.insert(id.clone(), visible);
            visible
        })
    }

    pub fn reply_visibility(&self, id: &CommentId) -> ReplyVisibility {
        let page_size = self.config.page_size();
        self.read(|st| ReplyVisibility {
            state: st.replies_state(id),
            visible: st.visible_replies_count(id, page_size),
        })
    }

    /// The replies of `id` to display, empty unless expanded
    pub fn visible_replies(&self, id: &CommentId) -> im::Vector<Comment> {
        let page_size = self.config.page_size();
        self.read(|st| match (st.replies_state(id), st.tree.get(id)) {
            (RepliesState::Expanded, Some(c)) => {
                let visible = st.visible_replies_count(id, page_size);
                c.replies.take(visible.min(c.replies.len()))
            }
            _ => im::Vector::new(),
        })
    }

    /// How many loaded replies of `id` are still hidden behind "show more"
    pub fn hidden_replies_count(&self, id: &CommentId) -> usize {
        let page_size = self.config.page_size();
        self.read(|st| match st.tree.get(id) {
            None => 0,
            Some(c) => c
                .replies
                .len()
                .saturating_sub(st.visible_replies_count(id, page_size)),
        })
    }
}
