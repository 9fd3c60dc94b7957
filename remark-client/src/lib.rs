mod comment;
pub use comment::{normalize_replies, Comment, MAX_DEPTH};

mod config;
pub use config::{ThreadConfig, DEFAULT_REPLIES_PAGE_SIZE, DEFAULT_TRANSIENT_TTL_MS};

mod coordinator;
pub use coordinator::{MutationId, MutationKind, Outcome, PendingMutation, ValidationError};

mod expansion;
pub use expansion::{RepliesState, ReplyVisibility};

mod loader;

mod thread;
pub use thread::Thread;

mod timer;
pub use timer::Timer;

mod tree;
pub use tree::CommentTree;

pub mod api {
    pub use remark_api::*;
}
