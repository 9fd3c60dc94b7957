use remark_client::{
    api::{CommentId, Time},
    Comment, ReplyVisibility,
};
use yew::prelude::*;

use crate::{ui, util};

/// The reply part of a top-level comment
#[derive(Clone, PartialEq)]
pub struct RepliesView {
    pub visibility: ReplyVisibility,
    pub shown: im::Vector<Comment>,
    pub hidden: usize,
}

#[derive(Clone, PartialEq, Properties)]
pub struct CommentRowProps {
    pub comment: Comment,
    pub parent: Option<CommentId>,
    pub replies: Option<RepliesView>,
    pub now: Time,
    pub on_like: Callback<(CommentId, Option<CommentId>)>,
    pub on_reply: Callback<(CommentId, String)>,
    pub on_toggle_replies: Callback<CommentId>,
    pub on_show_more: Callback<CommentId>,
}

#[function_component(CommentRow)]
pub fn comment_row(p: &CommentRowProps) -> Html {
    let replying = use_state(|| false);
    let c = &p.comment;
    let on_like = {
        let target = (c.id.clone(), p.parent.clone());
        p.on_like.reform(move |()| target.clone())
    };
    let avatar = match &c.author.avatar {
        Some(url) => html! { <img class="avatar rounded-circle me-2" src={ url.clone() } alt="" /> },
        None => html! { <div class="avatar bi-person-circle me-2"></div> },
    };

    html! {
        <li class={ classes!("comment", "list-group-item", c.is_transient().then(|| "transient")) }>
            <div class="d-flex align-items-start">
                { avatar }
                <div class="flex-fill">
                    <div class="comment-header">
                        <strong>{ &c.author.name }</strong>
                        <small class="text-muted ms-2" title={ c.created_at.to_rfc3339() }>
                            { util::format_relative(c.created_at, p.now) }
                        </small>
                    </div>
                    <div class="comment-text">{ &c.text }</div>
                    <div class="comment-actions d-flex align-items-center">
                        <ui::LikeButton
                            liked={ c.is_liked }
                            count={ c.likes_count }
                            disabled={ c.is_transient() }
                            on_click={ on_like }
                        />
                        if p.parent.is_none() && !c.is_transient() {
                            <button
                                type="button"
                                class="btn btn-sm btn-link"
                                onclick={ let replying = replying.clone(); Callback::from(move |_| replying.set(!*replying)) }
                            >
                                { "Reply" }
                            </button>
                        }
                        if let Some(replies) = &p.replies {
                            <ui::ReplyToggle
                                replies_count={ c.replies_count }
                                state={ replies.visibility.state }
                                on_click={ let id = c.id.clone(); p.on_toggle_replies.reform(move |()| id.clone()) }
                            />
                        }
                    </div>
                    if *replying {
                        <ui::CommentForm
                            placeholder="Write a reply"
                            on_submit={
                                let id = c.id.clone();
                                let replying = replying.clone();
                                p.on_reply.reform(move |text| {
                                    replying.set(false);
                                    (id.clone(), text)
                                })
                            }
                        />
                    }
                    if let Some(replies) = &p.replies {
                        { replies_list(p, replies) }
                    }
                </div>
            </div>
        </li>
    }
}

fn replies_list(p: &CommentRowProps, replies: &RepliesView) -> Html {
    if replies.shown.is_empty() {
        return html! {};
    }
    html! {
        <>
            <ul class="replies list-group list-group-flush ms-4">
                { for replies.shown.iter().map(|r| html! {
                    <CommentRow
                        key={ r.id.to_string() }
                        comment={ r.clone() }
                        parent={ Some(p.comment.id.clone()) }
                        replies={ None::<RepliesView> }
                        now={ p.now }
                        on_like={ p.on_like.clone() }
                        on_reply={ p.on_reply.clone() }
                        on_toggle_replies={ p.on_toggle_replies.clone() }
                        on_show_more={ p.on_show_more.clone() }
                    />
                }) }
            </ul>
            if replies.hidden > 0 {
                <button
                    type="button"
                    class="btn btn-sm btn-link ms-4"
                    onclick={ let id = p.comment.id.clone(); p.on_show_more.reform(move |_| id.clone()) }
                >
                    { format!("Show more replies ({} hidden)", replies.hidden) }
                </button>
            }
        </>
    }
}
