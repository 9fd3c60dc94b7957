use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use crate::{
    api::{ContentId, RawComment},
    coordinator::{MutationId, MutationKind, PendingMutation},
    expansion::Expansion,
    loader::Loads,
    CommentTree, ThreadConfig,
};

/// Everything a thread knows, mutated only through `Thread::write`
#[derive(Debug, Default)]
pub(crate) struct ThreadState {
    pub(crate) content_id: ContentId,
    pub(crate) tree: CommentTree,
    pub(crate) expansion: Expansion,
    pub(crate) loads: Loads,
    pub(crate) pending: BTreeMap<MutationId, MutationKind>,
    next_mutation: u64,

    /// Bumped on each hydration, so that late compensations can tell their target is gone
    pub(crate) generation: u64,
}

impl ThreadState {
    pub(crate) fn begin(&mut self, kind: MutationKind) -> MutationId {
        let id = MutationId(self.next_mutation);
        self.next_mutation += 1;
        self.pending.insert(id, kind);
        id
    }
}

/// The comment thread of one content item, along with its reply visibility
///
/// Clones share the same state: this is the handle presentation code keeps around and
/// moves into its futures.
pub struct Thread<R, T> {
    pub(crate) state: Rc<RefCell<ThreadState>>,
    pub(crate) remote: Rc<R>,
    pub(crate) timer: Rc<T>,
    pub(crate) config: Rc<ThreadConfig>,
    listener: Rc<RefCell<Option<Rc<dyn Fn()>>>>,
}

impl<R, T> Clone for Thread<R, T> {
    fn clone(&self) -> Self {
        Thread {
            state: self.state.clone(),
            remote: self.remote.clone(),
            timer: self.timer.clone(),
            config: self.config.clone(),
            listener: self.listener.clone(),
        }
    }
}

impl<R, T> Thread<R, T> {
    pub fn new(remote: R, timer: T, config: ThreadConfig) -> Thread<R, T> {
        Thread {
            state: Rc::new(RefCell::new(ThreadState::default())),
            remote: Rc::new(remote),
            timer: Rc::new(timer),
            config: Rc::new(config),
            listener: Rc::new(RefCell::new(None)),
        }
    }

    /// Replaces the thread with the authoritative comments of `content_id`
    ///
    /// Expansion state and the loaded-replies set are reset. Mutations still in flight keep
    /// being tracked, but their confirmation or rollback will not touch the new tree.
    pub fn hydrate(&self, content_id: ContentId, comments: Vec<RawComment>) {
        let num_comments = comments.len();
        self.write(|st| {
            st.content_id = content_id;
            st.tree = CommentTree::from_raw(comments);
            st.expansion = Expansion::default();
            st.loads = Loads::hydrated(&st.tree);
            st.generation += 1;
            tracing::debug!(
                content = %st.content_id,
                num_comments,
                generation = st.generation,
                "hydrated thread"
            );
        })
    }

    /// Registers the callback run after every state change
    pub fn set_listener(&self, f: impl Fn() + 'static) {
        *self.listener.borrow_mut() = Some(Rc::new(f));
    }

    pub fn config(&self) -> &ThreadConfig {
        &self.config
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn content_id(&self) -> ContentId {
        self.state.borrow().content_id.clone()
    }

    /// Snapshot of the current comments
    pub fn comments(&self) -> CommentTree {
        self.state.borrow().tree.clone()
    }

    pub fn pending_mutations(&self) -> Vec<PendingMutation> {
        self.state
            .borrow()
            .pending
            .iter()
            .map(|(id, kind)| PendingMutation {
                id: *id,
                kind: kind.clone(),
            })
            .collect()
    }

    pub(crate) fn read<F, Ret>(&self, f: F) -> Ret
    where
        F: FnOnce(&ThreadState) -> Ret,
    {
        f(&*self.state.borrow())
    }

    /// The single write path: the listener only runs once the borrow is released
    pub(crate) fn write<F, Ret>(&self, f: F) -> Ret
    where
        F: FnOnce(&mut ThreadState) -> Ret,
    {
        let ret = f(&mut *self.state.borrow_mut());
        self.notify();
        ret
    }

    fn notify(&self) {
        let listener = self.listener.borrow().clone();
        if let Some(listener) = listener {
            listener();
        }
    }
}
