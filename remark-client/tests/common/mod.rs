#![allow(dead_code)]

use std::{cell::Cell, rc::Rc};

use remark_client::{
    api::{Author, CommentId, ContentId, RawComment, UserId},
    Thread, ThreadConfig,
};
use remark_mock_server::{MockServer, MockTimer};

pub type TestThread = Thread<MockServer, MockTimer>;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn post() -> ContentId {
    ContentId::from("post")
}

pub fn id(id: &str) -> CommentId {
    CommentId::from(id)
}

pub fn author(id: &str) -> Author {
    Author {
        id: UserId::from(id),
        name: format!("user {id}"),
        avatar: None,
    }
}

pub fn raw(id: &str, likes_count: u64, replies: Vec<RawComment>) -> RawComment {
    let date = "2022-11-20T10:00:00Z".parse().unwrap();
    RawComment {
        id: CommentId::from(id),
        content_id: post(),
        author: author("u0"),
        text: format!("comment {id}"),
        created_at: date,
        updated_at: date,
        likes_count,
        is_liked: false,
        replies_count: replies.len() as u64,
        replies,
    }
}

/// The comments as a content listing returns them, before any reply got loaded
pub fn shallow(comments: Vec<RawComment>) -> Vec<RawComment> {
    comments
        .into_iter()
        .map(|c| RawComment {
            replies: Vec::new(),
            ..c
        })
        .collect()
}

/// `C1` has three replies, the first of which is replied to in turn, `C2` has none
pub fn seed() -> Vec<RawComment> {
    vec![
        raw(
            "C1",
            5,
            vec![
                raw("R1", 0, vec![raw("G1", 0, vec![])]),
                raw("R2", 1, vec![]),
                raw("R3", 0, vec![]),
            ],
        ),
        raw("C2", 0, vec![]),
    ]
}

pub fn setup_with(config: ThreadConfig) -> TestThread {
    init_tracing();
    let server = MockServer::new();
    server.add_user(author("U1"));
    server.seed(post(), seed());
    let thread = Thread::new(server, MockTimer::new(), config);
    thread.hydrate(post(), shallow(seed()));
    thread
}

pub fn setup() -> TestThread {
    setup_with(ThreadConfig::default())
}

/// Counts how many times the thread notified its listener
pub fn count_notifications(thread: &TestThread) -> Rc<Cell<usize>> {
    let count = Rc::new(Cell::new(0));
    let c = count.clone();
    thread.set_listener(move || c.set(c.get() + 1));
    count
}
