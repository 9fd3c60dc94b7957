use std::{
    cell::RefCell,
    collections::{BTreeMap, HashMap, HashSet, VecDeque},
    time::Duration,
};

use async_trait::async_trait;
use futures::channel::oneshot;
use remark_client::{
    api::{
        Author, CommentId, Content, ContentId, Error, LikeToggle, NewComment, RawComment, Remote,
        RepliesQuery, UserId,
    },
    Timer,
};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CallKind {
    CreateComment,
    ToggleLike,
    GetReplies,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Call {
    CreateComment(NewComment),
    ToggleLike(LikeToggle),
    GetReplies(RepliesQuery),
}

impl Call {
    pub fn kind(&self) -> CallKind {
        match self {
            Call::CreateComment(_) => CallKind::CreateComment,
            Call::ToggleLike(_) => CallKind::ToggleLike,
            Call::GetReplies(_) => CallKind::GetReplies,
        }
    }
}

/// Holds back a call until released (or dropped)
#[derive(Debug)]
pub struct Gate(oneshot::Sender<()>);

impl Gate {
    pub fn release(self) {
        let _ = self.0.send(());
    }
}

/// In-memory stand-in for the remote, with hooks to make calls fail or resolve late
pub struct MockServer(RefCell<Db>);

#[derive(Default)]
struct Db {
    users: HashMap<UserId, Author>,
    contents: BTreeMap<ContentId, Vec<RawComment>>,
    likes: HashSet<(CommentId, UserId)>,
    next_id: u64,
    offline: bool,
    calls: Vec<Call>,
    failures: HashMap<CallKind, VecDeque<Error>>,
    holds: HashMap<CallKind, VecDeque<oneshot::Receiver<()>>>,
}

fn find_mut<'a>(comments: &'a mut [RawComment], id: &CommentId) -> Option<&'a mut RawComment> {
    for c in comments.iter_mut() {
        if c.id == *id {
            return Some(c);
        }
        if let Some(res) = find_mut(&mut c.replies, id) {
            return Some(res);
        }
    }
    None
}

impl Db {
    fn find_mut(&mut self, id: &CommentId) -> Option<&mut RawComment> {
        self.contents
            .values_mut()
            .find_map(|comments| find_mut(comments, id))
    }

    fn with_viewer(&self, mut c: RawComment, viewer: Option<&UserId>) -> RawComment {
        c.is_liked = viewer.map_or(false, |v| self.likes.contains(&(c.id.clone(), v.clone())));
        c.replies = c
            .replies
            .into_iter()
            .map(|r| self.with_viewer(r, viewer))
            .collect();
        c
    }

    fn create_comment(&mut self, c: NewComment) -> Result<(), Error> {
        c.validate()?;
        self.next_id += 1;
        let now = chrono::Utc::now();
        let author = self.users.get(&c.author_id).cloned().unwrap_or_else(|| Author {
            id: c.author_id.clone(),
            name: c.author_id.to_string(),
            avatar: None,
        });
        let comment = RawComment {
            id: CommentId::from(self.next_id),
            content_id: c.content_id.clone(),
            author,
            text: c.text,
            created_at: now,
            updated_at: now,
            likes_count: 0,
            is_liked: false,
            replies_count: 0,
            replies: Vec::new(),
        };
        match c.reply_to_comment_id {
            None => self.contents.entry(c.content_id).or_default().push(comment),
            Some(parent_id) => {
                let parent = self
                    .find_mut(&parent_id)
                    .ok_or_else(|| Error::NotFound(parent_id.clone()))?;
                parent.replies.push(comment);
                parent.replies_count += 1;
            }
        }
        Ok(())
    }

    fn toggle_like(&mut self, t: LikeToggle) -> Result<(), Error> {
        if self.find_mut(&t.comment_id).is_none() {
            return Err(Error::NotFound(t.comment_id));
        }
        let key = (t.comment_id.clone(), t.user_id);
        let changed = match t.liked {
            true => self.likes.insert(key),
            false => self.likes.remove(&key),
        };
        if changed {
            if let Some(c) = self.find_mut(&t.comment_id) {
                match t.liked {
                    true => c.likes_count += 1,
                    false => c.likes_count = c.likes_count.saturating_sub(1),
                }
            }
        }
        Ok(())
    }

    fn get_replies(&mut self, q: RepliesQuery) -> Result<Vec<RawComment>, Error> {
        let replies = self
            .find_mut(&q.comment_id)
            .ok_or_else(|| Error::NotFound(q.comment_id.clone()))?
            .replies
            .clone();
        Ok(replies
            .into_iter()
            .map(|r| self.with_viewer(r, q.user_id.as_ref()))
            .collect())
    }
}

impl MockServer {
    pub fn new() -> MockServer {
        MockServer(RefCell::new(Db::default()))
    }

    pub fn add_user(&self, author: Author) {
        self.0.borrow_mut().users.insert(author.id.clone(), author);
    }

    /// Stores the comments of a content item, which may be nested arbitrarily deep
    pub fn seed(&self, content_id: ContentId, comments: Vec<RawComment>) {
        self.0.borrow_mut().contents.insert(content_id, comments);
    }

    /// The content item as the rest of the application would hydrate the thread with
    pub fn content(&self, content_id: &ContentId, viewer: Option<&UserId>) -> Content {
        let db = self.0.borrow();
        let comments = db.contents.get(content_id).cloned().unwrap_or_default();
        Content {
            id: content_id.clone(),
            comments: comments
                .into_iter()
                .map(|c| db.with_viewer(c, viewer))
                .collect(),
        }
    }

    /// Makes the next call of `kind` fail with `err`, failures stacking up in order
    pub fn fail_next(&self, kind: CallKind, err: Error) {
        self.0
            .borrow_mut()
            .failures
            .entry(kind)
            .or_default()
            .push_back(err);
    }

    /// While offline, every call fails with a network error
    pub fn set_offline(&self, offline: bool) {
        self.0.borrow_mut().offline = offline;
    }

    /// Makes the next call of `kind` wait until the returned gate is released
    pub fn hold_next(&self, kind: CallKind) -> Gate {
        let (sender, receiver) = oneshot::channel();
        self.0
            .borrow_mut()
            .holds
            .entry(kind)
            .or_default()
            .push_back(receiver);
        Gate(sender)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().calls.clone()
    }

    pub fn num_calls(&self, kind: CallKind) -> usize {
        self.0
            .borrow()
            .calls
            .iter()
            .filter(|c| c.kind() == kind)
            .count()
    }

    async fn handle<Ret, F>(&self, call: Call, f: F) -> Result<Ret, Error>
    where
        F: FnOnce(&mut Db) -> Result<Ret, Error>,
    {
        let kind = call.kind();
        tracing::debug!(?call, "mock server received call");
        let hold = {
            let mut db = self.0.borrow_mut();
            db.calls.push(call);
            db.holds.get_mut(&kind).and_then(|h| h.pop_front())
        };
        if let Some(hold) = hold {
            // a dropped gate releases the call too
            let _ = hold.await;
        }
        let mut db = self.0.borrow_mut();
        if db.offline {
            return Err(Error::Network(String::from("mock server is offline")));
        }
        if let Some(err) = db.failures.get_mut(&kind).and_then(|f| f.pop_front()) {
            tracing::debug!(?kind, %err, "mock server failing call");
            return Err(err);
        }
        f(&mut *db)
    }
}

impl Default for MockServer {
    fn default() -> MockServer {
        MockServer::new()
    }
}

#[async_trait(?Send)]
impl Remote for MockServer {
    async fn create_comment(&self, c: NewComment) -> Result<(), Error> {
        self.handle(Call::CreateComment(c.clone()), |db| db.create_comment(c))
            .await
    }

    async fn toggle_comment_like(&self, t: LikeToggle) -> Result<(), Error> {
        self.handle(Call::ToggleLike(t.clone()), |db| db.toggle_like(t))
            .await
    }

    async fn get_comment_replies(&self, q: RepliesQuery) -> Result<Vec<RawComment>, Error> {
        self.handle(Call::GetReplies(q.clone()), |db| db.get_replies(q))
            .await
    }
}

/// Timer that does not wait, unless told to hold the next sleep
#[derive(Default)]
pub struct MockTimer(RefCell<TimerState>);

#[derive(Default)]
struct TimerState {
    slept: Vec<Duration>,
    holds: VecDeque<oneshot::Receiver<()>>,
}

impl MockTimer {
    pub fn new() -> MockTimer {
        MockTimer::default()
    }

    pub fn hold_next(&self) -> Gate {
        let (sender, receiver) = oneshot::channel();
        self.0.borrow_mut().holds.push_back(receiver);
        Gate(sender)
    }

    /// Durations of all the sleeps requested so far
    pub fn slept(&self) -> Vec<Duration> {
        self.0.borrow().slept.clone()
    }
}

#[async_trait(?Send)]
impl Timer for MockTimer {
    async fn sleep(&self, d: Duration) {
        let hold = {
            let mut state = self.0.borrow_mut();
            state.slept.push(d);
            state.holds.pop_front()
        };
        if let Some(hold) = hold {
            let _ = hold.await;
        }
    }
}
