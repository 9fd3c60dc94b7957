use remark_client::api::{ContentId, UserId};
use yew::prelude::*;

use crate::LoginInfo;

#[derive(Clone, PartialEq, Properties)]
pub struct LoginProps {
    pub info: Option<LoginInfo>,
    pub on_submit: Callback<LoginInfo>,
}

pub struct Login {
    host: String,
    user: String,
    name: String,
    content: String,
}

pub enum LoginMsg {
    HostChanged(String),
    UserChanged(String),
    NameChanged(String),
    ContentChanged(String),
    SubmitClicked,
}

impl Component for Login {
    type Message = LoginMsg;
    type Properties = LoginProps;

    fn create(ctx: &Context<Self>) -> Self {
        match &ctx.props().info {
            Some(i) => Login {
                host: i.host.clone(),
                user: i.user.to_string(),
                name: i.name.clone(),
                content: i.content.to_string(),
            },
            None => Login {
                host: String::new(),
                user: String::new(),
                name: String::new(),
                content: String::new(),
            },
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            LoginMsg::HostChanged(h) => self.host = h,
            LoginMsg::UserChanged(u) => self.user = u,
            LoginMsg::NameChanged(n) => self.name = n,
            LoginMsg::ContentChanged(c) => self.content = c,
            LoginMsg::SubmitClicked => {
                if self.user.trim().is_empty() || self.content.trim().is_empty() {
                    return false;
                }
                let name = match self.name.trim().is_empty() {
                    true => self.user.clone(),
                    false => self.name.clone(),
                };
                ctx.props().on_submit.emit(LoginInfo {
                    host: self.host.trim_end_matches('/').to_string(),
                    user: UserId::from(self.user.trim()),
                    name,
                    content: ContentId::from(self.content.trim()),
                });
                return false;
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        macro_rules! callback_for {
            ($msg:ident) => {
                ctx.link().callback(|e: web_sys::Event| {
                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                    LoginMsg::$msg(input.value())
                })
            };
        }
        html! {<>
            <div class="text-center my-4">
                <h1>{ "Comments" }</h1>
            </div>
            <form class="login-form">
                <div class="input-group mb-3">
                    <label class="input-group-text col-xl-1" for="host">{ "Host" }</label>
                    <input
                        type="url"
                        class="form-control form-control-lg"
                        id="host"
                        placeholder="https://example.org"
                        value={self.host.clone()}
                        onchange={callback_for!(HostChanged)}
                    />
                </div>
                <div class="input-group mb-3">
                    <label class="input-group-text col-xl-1" for="user">{ "User id" }</label>
                    <input
                        type="text"
                        class="form-control form-control-lg"
                        id="user"
                        placeholder="42"
                        value={self.user.clone()}
                        onchange={callback_for!(UserChanged)}
                    />
                </div>
                <div class="input-group mb-3">
                    <label class="input-group-text col-xl-1" for="name">{ "Name" }</label>
                    <input
                        type="text"
                        class="form-control form-control-lg"
                        id="name"
                        placeholder="Jane Doe"
                        value={self.name.clone()}
                        onchange={callback_for!(NameChanged)}
                    />
                </div>
                <div class="input-group mb-3">
                    <label class="input-group-text col-xl-1" for="content">{ "Content" }</label>
                    <input
                        type="text"
                        class="form-control form-control-lg"
                        id="content"
                        placeholder="post id"
                        value={self.content.clone()}
                        onchange={callback_for!(ContentChanged)}
                    />
                </div>
                <button
                    type="button"
                    class="btn btn-primary"
                    onclick={ctx.link().callback(|_| LoginMsg::SubmitClicked)}
                >
                    { "Open thread" }
                </button>
            </form>
        </>}
    }
}
