use crate::{
    api::{CommentId, RawComment},
    Comment,
};

/// The top-level comments of a thread, in display order
///
/// Every operation returns a new tree and leaves `self` untouched. Sharing is cheap thanks to
/// the persistent vectors, so callers can freely keep snapshots around.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CommentTree {
    comments: im::Vector<Comment>,
}

impl CommentTree {
    pub fn new() -> CommentTree {
        CommentTree::default()
    }

    pub fn from_raw(raw: Vec<RawComment>) -> CommentTree {
        CommentTree {
            comments: raw.into_iter().map(Comment::from_raw).collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Comment> {
        self.comments.iter()
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    /// Looks up a top-level comment
    pub fn get(&self, id: &CommentId) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == *id)
    }

    pub fn get_reply(&self, parent_id: &CommentId, id: &CommentId) -> Option<&Comment> {
        self.get(parent_id)?.replies.iter().find(|r| r.id == *id)
    }

    /// Resolves either a top-level comment, or a reply when `parent_id` is set
    pub fn target(&self, id: &CommentId, parent_id: Option<&CommentId>) -> Option<&Comment> {
        match parent_id {
            None => self.get(id),
            Some(parent_id) => self.get_reply(parent_id, id),
        }
    }

    /// Looks up a comment at any materialized depth
    pub fn find(&self, id: &CommentId) -> Option<&Comment> {
        for c in self.comments.iter() {
            if c.id == *id {
                return Some(c);
            }
            if let Some(r) = c.replies.iter().find(|r| r.id == *id) {
                return Some(r);
            }
        }
        None
    }

    /// Applies `f` to a copy of the top-level comment `id`
    ///
    /// `f` returns whether it changed anything; if it did not, or if `id` is not in the tree,
    /// the result is equal to `self`.
    fn with_comment<F>(&self, id: &CommentId, f: F) -> CommentTree
    where
        F: FnOnce(&mut Comment) -> bool,
    {
        let idx = match self.comments.iter().position(|c| c.id == *id) {
            Some(idx) => idx,
            None => {
                tracing::trace!(comment = %id, "comment is not in the tree, leaving it as-is");
                return self.clone();
            }
        };
        let mut comments = self.comments.clone();
        let changed = match comments.get_mut(idx) {
            Some(c) => f(c),
            None => false,
        };
        match changed {
            true => CommentTree { comments },
            false => self.clone(),
        }
    }

    pub fn with_new_top_level_comment(&self, comment: Comment) -> CommentTree {
        let mut comments = self.comments.clone();
        comments.push_back(comment);
        CommentTree { comments }
    }

    pub fn with_new_reply(&self, parent_id: &CommentId, reply: Comment) -> CommentTree {
        self.with_comment(parent_id, move |parent| {
            parent.replies.push_back(reply);
            parent.replies_count += 1;
            true
        })
    }

    pub fn without_comment(&self, id: &CommentId) -> CommentTree {
        match self.comments.iter().position(|c| c.id == *id) {
            None => self.clone(),
            Some(idx) => {
                let mut comments = self.comments.clone();
                comments.remove(idx);
                CommentTree { comments }
            }
        }
    }

    /// Inverse of `with_new_reply`
    pub fn without_reply(&self, parent_id: &CommentId, reply_id: &CommentId) -> CommentTree {
        self.with_comment(parent_id, |parent| {
            match parent.replies.iter().position(|r| r.id == *reply_id) {
                None => false,
                Some(idx) => {
                    parent.replies.remove(idx);
                    parent.replies_count = parent.replies_count.saturating_sub(1);
                    true
                }
            }
        })
    }

    /// Drops a reply the remote acknowledged, whose count is now server-side
    pub fn without_settled_reply(&self, parent_id: &CommentId, reply_id: &CommentId) -> CommentTree {
        self.with_comment(parent_id, |parent| {
            match parent.replies.iter().position(|r| r.id == *reply_id) {
                None => false,
                Some(idx) => {
                    parent.replies.remove(idx);
                    true
                }
            }
        })
    }

    pub fn with_toggled_like(&self, id: &CommentId, parent_id: Option<&CommentId>) -> CommentTree {
        match parent_id {
            None => self.with_comment(id, |c| {
                c.toggle_like();
                true
            }),
            Some(parent_id) => self.with_comment(parent_id, |parent| {
                match parent.replies.iter_mut().find(|r| r.id == *id) {
                    None => false,
                    Some(reply) => {
                        reply.toggle_like();
                        true
                    }
                }
            }),
        }
    }

    /// Undoes `with_toggled_like`, see `Comment::revert_like`
    pub fn with_reverted_like(
        &self,
        id: &CommentId,
        parent_id: Option<&CommentId>,
        moved_count: bool,
    ) -> CommentTree {
        match parent_id {
            None => self.with_comment(id, |c| {
                c.revert_like(moved_count);
                true
            }),
            Some(parent_id) => self.with_comment(parent_id, |parent| {
                match parent.replies.iter_mut().find(|r| r.id == *id) {
                    None => false,
                    Some(reply) => {
                        reply.revert_like(moved_count);
                        true
                    }
                }
            }),
        }
    }

    /// Replaces the persisted replies of `parent_id` with a freshly fetched batch
    ///
    /// Transient replies are not known to the remote yet, so they are kept after the batch.
    pub fn with_loaded_replies(
        &self,
        parent_id: &CommentId,
        replies: im::Vector<Comment>,
    ) -> CommentTree {
        self.with_comment(parent_id, move |parent| {
            let mut merged = replies;
            merged.extend(parent.replies.iter().filter(|r| r.is_transient()).cloned());
            parent.replies = merged;
            true
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::ContentId,
        comment::tests::{author, raw},
    };

    fn tree() -> CommentTree {
        let mut c1 = raw("c1", vec![raw("r1", vec![])]);
        c1.likes_count = 5;
        c1.replies_count = 3;
        CommentTree::from_raw(vec![c1, raw("c2", vec![])])
    }

    fn transient(text: &str) -> Comment {
        Comment::transient(ContentId::from("post"), author("u1"), String::from(text))
    }

    #[test]
    fn lookups() {
        let t = tree();
        assert_eq!(t.len(), 2);
        assert!(t.get(&CommentId::from("c1")).is_some());
        assert!(t.get(&CommentId::from("r1")).is_none());
        assert!(t.find(&CommentId::from("r1")).is_some());
        assert!(t
            .get_reply(&CommentId::from("c1"), &CommentId::from("r1"))
            .is_some());
        assert!(t
            .target(&CommentId::from("r1"), Some(&CommentId::from("c2")))
            .is_none());
    }

    #[test]
    fn new_comment_is_appended_and_removable() {
        let t = tree();
        let c = transient("hi");
        let id = c.id.clone();
        let added = t.with_new_top_level_comment(c);
        assert_eq!(added.len(), 3);
        assert_eq!(added.iter().last().map(|c| &c.id), Some(&id));
        assert_eq!(t.len(), 2, "input tree must be left untouched");
        assert_eq!(added.without_comment(&id), t);
    }

    #[test]
    fn reply_round_trip_restores_count() {
        let t = tree();
        let parent = CommentId::from("c1");
        let r = transient("ok");
        let id = r.id.clone();
        let added = t.with_new_reply(&parent, r);
        let p = added.get(&parent).unwrap();
        assert_eq!(p.replies_count, 4);
        assert_eq!(p.replies.len(), 2);
        assert_eq!(added.without_reply(&parent, &id), t);
    }

    #[test]
    fn settled_reply_keeps_count() {
        let t = tree();
        let parent = CommentId::from("c1");
        let r = transient("ok");
        let id = r.id.clone();
        let settled = t.with_new_reply(&parent, r).without_settled_reply(&parent, &id);
        let p = settled.get(&parent).unwrap();
        assert_eq!(p.replies_count, 4);
        assert_eq!(p.replies.len(), 1);
    }

    #[test]
    fn unknown_parent_is_a_noop() {
        let t = tree();
        let missing = CommentId::from("nope");
        assert_eq!(t.with_new_reply(&missing, transient("ok")), t);
        assert_eq!(t.without_reply(&missing, &CommentId::from("r1")), t);
        assert_eq!(
            t.without_reply(&CommentId::from("c1"), &CommentId::from("nope")),
            t
        );
        assert_eq!(t.with_toggled_like(&missing, None), t);
        assert_eq!(t.without_comment(&missing), t);
    }

    #[test]
    fn like_toggles_on_both_levels() {
        let t = tree();
        let c1 = CommentId::from("c1");
        let r1 = CommentId::from("r1");

        let liked = t.with_toggled_like(&c1, None);
        assert!(liked.get(&c1).unwrap().is_liked);
        assert_eq!(liked.get(&c1).unwrap().likes_count, 6);
        assert_eq!(liked.with_toggled_like(&c1, None), t);

        let liked = t.with_toggled_like(&r1, Some(&c1));
        assert!(liked.get_reply(&c1, &r1).unwrap().is_liked);
        assert!(!liked.get(&c1).unwrap().is_liked);
        assert_eq!(liked.with_toggled_like(&r1, Some(&c1)), t);
    }

    #[test]
    fn loaded_replies_keep_transient_ones() {
        let parent = CommentId::from("c2");
        let r = transient("pending");
        let id = r.id.clone();
        let t = tree().with_new_reply(&parent, r);
        let loaded = t.with_loaded_replies(
            &parent,
            crate::comment::normalize_replies(vec![raw("r2", vec![]), raw("r3", vec![])]),
        );
        let ids = loaded
            .get(&parent)
            .unwrap()
            .replies
            .iter()
            .map(|r| r.id.clone())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![CommentId::from("r2"), CommentId::from("r3"), id]);
    }
}
