use remark_client::{
    api::{Author, CommentId, Content},
    Outcome, Thread, ThreadConfig, ValidationError,
};
use yew::prelude::*;

use crate::{
    api::{self, HttpRemote, WasmTimer},
    ui::{self, RepliesView},
    LoginInfo,
};

pub type WebThread = Thread<HttpRemote, WasmTimer>;

#[derive(Clone, PartialEq, Properties)]
pub struct ThreadViewProps {
    pub login: LoginInfo,
    pub config: ThreadConfig,
    pub on_logout: Callback<()>,
}

pub enum ThreadViewMsg {
    Refresh,
    Logout,
    Reload,

    ReceivedContent(Content),
    LoadFailed(String),

    AddComment(String),
    AddReply(CommentId, String),
    ToggleLike(CommentId, Option<CommentId>),
    ToggleReplies(CommentId),
    ShowMore(CommentId),
    MutationDone(Result<Outcome, ValidationError>),
}

pub struct ThreadView {
    thread: WebThread,
    viewer: Author,
    loaded: bool,
    load_error: Option<String>,
    notice: Option<&'static str>,
}

impl ThreadView {
    fn fetch_content(&self, ctx: &Context<Self>) {
        let login = ctx.props().login.clone();
        ctx.link().send_future(async move {
            match api::fetch_content(&login.host, &login.content, &login.user).await {
                Ok(content) => ThreadViewMsg::ReceivedContent(content),
                Err(err) => {
                    tracing::error!(?err, "failed fetching content");
                    ThreadViewMsg::LoadFailed(format!("{err:#}"))
                }
            }
        });
    }
}

impl Component for ThreadView {
    type Message = ThreadViewMsg;
    type Properties = ThreadViewProps;

    fn create(ctx: &Context<Self>) -> Self {
        let login = &ctx.props().login;
        let thread = Thread::new(
            HttpRemote::new(login.host.clone()),
            WasmTimer,
            ctx.props().config.clone(),
        );
        let link = ctx.link().clone();
        thread.set_listener(move || link.send_message(ThreadViewMsg::Refresh));
        let this = ThreadView {
            thread,
            viewer: login.author(),
            loaded: false,
            load_error: None,
            notice: None,
        };
        this.fetch_content(ctx);
        this
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            ThreadViewMsg::Refresh => (),
            ThreadViewMsg::Logout => ctx.props().on_logout.emit(()),
            ThreadViewMsg::Reload => {
                self.load_error = None;
                self.fetch_content(ctx);
            }
            ThreadViewMsg::ReceivedContent(content) => {
                self.thread.hydrate(content.id, content.comments);
                self.loaded = true;
                self.load_error = None;
            }
            ThreadViewMsg::LoadFailed(err) => self.load_error = Some(err),
            ThreadViewMsg::AddComment(text) => {
                let (thread, viewer) = (self.thread.clone(), self.viewer.clone());
                ctx.link().send_future(async move {
                    ThreadViewMsg::MutationDone(thread.add_comment(&text, Some(&viewer)).await)
                });
            }
            ThreadViewMsg::AddReply(parent, text) => {
                let (thread, viewer) = (self.thread.clone(), self.viewer.clone());
                ctx.link().send_future(async move {
                    ThreadViewMsg::MutationDone(
                        thread.add_reply(&parent, &text, Some(&viewer)).await,
                    )
                });
            }
            ThreadViewMsg::ToggleLike(id, parent) => {
                let (thread, viewer) = (self.thread.clone(), self.viewer.clone());
                ctx.link().send_future(async move {
                    ThreadViewMsg::MutationDone(
                        thread.toggle_like(&id, parent.as_ref(), Some(&viewer)).await,
                    )
                });
            }
            ThreadViewMsg::ToggleReplies(id) => {
                let (thread, viewer) = (self.thread.clone(), self.viewer.id.clone());
                ctx.link().send_future(async move {
                    let state = thread.toggle_replies(&id, Some(&viewer)).await;
                    tracing::debug!(comment = %id, ?state, "toggled replies");
                    ThreadViewMsg::Refresh
                });
            }
            ThreadViewMsg::ShowMore(id) => {
                self.thread.show_more_replies(&id);
            }
            ThreadViewMsg::MutationDone(res) => {
                self.notice = match res {
                    Ok(Outcome::Confirmed) | Ok(Outcome::Ignored) => None,
                    Ok(Outcome::RolledBack) => Some("Your change could not be saved"),
                    Err(ValidationError::EmptyText) => Some("Comments cannot be empty"),
                    Err(ValidationError::MissingActor) => Some("Please log in first"),
                };
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let now = chrono::Utc::now();
        let link = ctx.link();
        let on_like = link.callback(|(id, parent)| ThreadViewMsg::ToggleLike(id, parent));
        let on_reply = link.callback(|(id, text)| ThreadViewMsg::AddReply(id, text));
        let on_toggle_replies = link.callback(ThreadViewMsg::ToggleReplies);
        let on_show_more = link.callback(ThreadViewMsg::ShowMore);
        let comments = self.thread.comments();

        html! {
            <div class="container thread-view">
                <div class="d-flex align-items-center justify-content-between">
                    <h2>{ format!("Comments ({})", comments.len()) }</h2>
                    <div class="d-flex align-items-center">
                        <ui::MutationSpinner pending={ self.thread.pending_mutations() } />
                        <span class="ms-3">{ &self.viewer.name }</span>
                        <button
                            type="button"
                            class="btn btn-sm btn-outline-secondary ms-2"
                            onclick={ link.callback(|_| ThreadViewMsg::Logout) }
                        >
                            { "Logout" }
                        </button>
                    </div>
                </div>
                if let Some(err) = &self.load_error {
                    <div class="alert alert-danger d-flex align-items-center">
                        <div class="flex-fill">{ err }</div>
                        <button
                            type="button"
                            class="btn btn-sm btn-outline-danger"
                            onclick={ link.callback(|_| ThreadViewMsg::Reload) }
                        >
                            { "Retry" }
                        </button>
                    </div>
                }
                if let Some(notice) = self.notice {
                    <div class="alert alert-warning">{ notice }</div>
                }
                if !self.loaded && self.load_error.is_none() {
                    <div class="spinner-border m-4" role="status"></div>
                }
                <ui::CommentForm
                    placeholder="Write a comment"
                    on_submit={ link.callback(ThreadViewMsg::AddComment) }
                />
                <ul class="comments list-group">
                    { for comments.iter().map(|c| html! {
                        <ui::CommentRow
                            key={ c.id.to_string() }
                            comment={ c.clone() }
                            parent={ None::<CommentId> }
                            replies={ Some(RepliesView {
                                visibility: self.thread.reply_visibility(&c.id),
                                shown: self.thread.visible_replies(&c.id),
                                hidden: self.thread.hidden_replies_count(&c.id),
                            }) }
                            { now }
                            on_like={ on_like.clone() }
                            on_reply={ on_reply.clone() }
                            on_toggle_replies={ on_toggle_replies.clone() }
                            on_show_more={ on_show_more.clone() }
                        />
                    }) }
                </ul>
            </div>
        }
    }
}
