use remark_client::RepliesState;
use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct ReplyToggleProps {
    pub replies_count: u64,
    pub state: RepliesState,
    pub on_click: Callback<()>,
}

#[function_component(ReplyToggle)]
pub fn reply_toggle(p: &ReplyToggleProps) -> Html {
    if p.replies_count == 0 {
        return html! {};
    }
    let label = match (p.state, p.replies_count) {
        (RepliesState::Expanded, _) => String::from("Hide replies"),
        (_, 1) => String::from("Show 1 reply"),
        (_, n) => format!("Show {n} replies"),
    };
    let loading = p.state == RepliesState::Loading;
    html! {
        <button
            type="button"
            class="btn btn-sm btn-link"
            disabled={ loading }
            onclick={ p.on_click.reform(|_| ()) }
        >
            if loading {
                <span class="spinner-border spinner-border-sm me-1" role="status" aria-hidden="true"></span>
            }
            { label }
        </button>
    }
}
