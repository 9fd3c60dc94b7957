mod common;

use std::panic::AssertUnwindSafe;

use common::*;
use remark_client::{api::CommentId, CommentTree, Outcome, RepliesState, ValidationError};

macro_rules! do_tokio_test {
    ( $name:ident, $typ:ty, $fn:expr ) => {
        #[test]
        fn $name() {
            let runtime = AssertUnwindSafe(
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .expect("failed initializing tokio runtime"),
            );
            bolero::check!()
                .with_type::<$typ>()
                .cloned()
                .for_each(move |v| {
                    let () = runtime.block_on($fn(v));
                })
        }
    };
}

#[derive(Clone, Debug, bolero::generator::TypeGenerator)]
enum FuzzOp {
    AddComment {
        #[generator(bolero::generator::gen_with::<String>().len(0..20usize))]
        text: String,
        fail: bool,
    },
    AddReply {
        parent: u8,
        #[generator(bolero::generator::gen_with::<String>().len(0..20usize))]
        text: String,
        fail: bool,
    },
    ToggleLike {
        comment: u8,
        reply: Option<u8>,
        fail: bool,
    },
    ToggleReplies {
        comment: u8,
        fail: bool,
    },
    ShowMore {
        comment: u8,
    },
}

fn pick(tree: &CommentTree, idx: u8) -> CommentId {
    match tree.len() {
        0 => id("missing"),
        len => tree.iter().nth(idx as usize % len).unwrap().id.clone(),
    }
}

fn pick_reply(tree: &CommentTree, parent: &CommentId, idx: u8) -> CommentId {
    match tree.get(parent).map(|c| c.replies.len()) {
        None | Some(0) => id("missing"),
        Some(len) => tree.get(parent).unwrap().replies[idx as usize % len].id.clone(),
    }
}

fn check_shape(tree: &CommentTree) {
    for c in tree.iter() {
        assert!(!c.is_transient(), "transient comment outlived its mutation: {c:?}");
        for r in c.replies.iter() {
            assert!(r.replies.is_empty(), "reply {r:?} holds replies");
        }
    }
}

do_tokio_test!(
    fuzz_mutations_roll_back_exactly,
    Vec<FuzzOp>,
    |ops: Vec<FuzzOp>| async move {
        let thread = setup();
        let u1 = author("U1");
        for op in ops {
            let before = thread.comments();
            let fail = match &op {
                FuzzOp::AddComment { fail, .. }
                | FuzzOp::AddReply { fail, .. }
                | FuzzOp::ToggleLike { fail, .. }
                | FuzzOp::ToggleReplies { fail, .. } => *fail,
                FuzzOp::ShowMore { .. } => false,
            };
            thread.remote().set_offline(fail);
            let outcome = match op {
                FuzzOp::AddComment { text, .. } => Some(thread.add_comment(&text, Some(&u1)).await),
                FuzzOp::AddReply { parent, text, .. } => {
                    let parent = pick(&before, parent);
                    Some(thread.add_reply(&parent, &text, Some(&u1)).await)
                }
                FuzzOp::ToggleLike { comment, reply, .. } => {
                    let comment = pick(&before, comment);
                    let res = match reply {
                        None => thread.toggle_like(&comment, None, Some(&u1)).await,
                        Some(reply) => {
                            let reply = pick_reply(&before, &comment, reply);
                            thread.toggle_like(&reply, Some(&comment), Some(&u1)).await
                        }
                    };
                    Some(res)
                }
                FuzzOp::ToggleReplies { comment, .. } => {
                    let comment = pick(&before, comment);
                    let state = thread.toggle_replies(&comment, Some(&u1.id)).await;
                    assert_ne!(state, RepliesState::Loading);
                    if fail && state == RepliesState::Collapsed {
                        assert_eq!(thread.comments(), before);
                    }
                    None
                }
                FuzzOp::ShowMore { comment } => {
                    let comment = pick(&before, comment);
                    thread.show_more_replies(&comment);
                    assert_eq!(thread.comments(), before);
                    None
                }
            };
            match outcome {
                None | Some(Ok(Outcome::Confirmed)) => (),
                Some(Ok(Outcome::RolledBack)) => assert_eq!(thread.comments(), before),
                Some(Ok(Outcome::Ignored)) | Some(Err(ValidationError::EmptyText)) => {
                    assert_eq!(thread.comments(), before)
                }
                Some(Err(ValidationError::MissingActor)) => unreachable!(),
            }
            if fail {
                assert!(!matches!(outcome, Some(Ok(Outcome::Confirmed))));
            }
            assert!(thread.pending_mutations().is_empty());
            check_shape(&thread.comments());
        }
    }
);
