use gloo_storage::{LocalStorage, Storage};
use remark_client::{
    api::{Author, ContentId, UserId},
    ThreadConfig,
};
use yew::prelude::*;

mod api;
mod ui;
mod util;

const KEY_LOGIN: &str = "login";
const KEY_THREAD_CONFIG: &str = "thread-config";

lazy_static::lazy_static! {
    static ref CLIENT: reqwest::Client = reqwest::Client::new();
}

fn main() {
    tracing_wasm::set_as_global_default();
    yew::Renderer::<App>::new().render();
}

/// Who is commenting, and on what
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct LoginInfo {
    pub host: String,
    pub user: UserId,
    pub name: String,
    pub content: ContentId,
}

impl LoginInfo {
    pub fn author(&self) -> Author {
        Author {
            id: self.user.clone(),
            name: self.name.clone(),
            avatar: None,
        }
    }
}

/// The thread settings, which can be overridden by hand in the browser's local storage
fn load_config() -> ThreadConfig {
    match LocalStorage::get(KEY_THREAD_CONFIG) {
        Ok(config) => config,
        Err(gloo_storage::errors::StorageError::KeyNotFound(_)) => ThreadConfig::default(),
        Err(err) => {
            tracing::warn!(?err, "ignoring invalid thread config from local storage");
            ThreadConfig::default()
        }
    }
}

enum AppMsg {
    Login(LoginInfo),
    Logout,
}

struct App {
    login: Option<LoginInfo>,
    logout: Option<LoginInfo>, // prefills the login form
    config: ThreadConfig,
}

impl Component for App {
    type Message = AppMsg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        App {
            login: LocalStorage::get(KEY_LOGIN).ok(),
            logout: None,
            config: load_config(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            AppMsg::Login(login) => {
                if let Err(err) = LocalStorage::set(KEY_LOGIN, &login) {
                    tracing::error!(?err, "failed saving login info to local storage");
                }
                self.login = Some(login);
            }
            AppMsg::Logout => {
                LocalStorage::delete(KEY_LOGIN);
                self.logout = self.login.take();
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        match &self.login {
            None => html! {
                <div class="container">
                    <ui::Login
                        info={ self.logout.clone() }
                        on_submit={ ctx.link().callback(AppMsg::Login) }
                    />
                </div>
            },
            Some(login) => html! {
                <ui::ThreadView
                    login={ login.clone() }
                    config={ self.config.clone() }
                    on_logout={ ctx.link().callback(|_| AppMsg::Logout) }
                />
            },
        }
    }
}
