use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct LikeButtonProps {
    pub liked: bool,
    pub count: u64,
    pub disabled: bool,
    pub on_click: Callback<()>,
}

#[function_component(LikeButton)]
pub fn like_button(p: &LikeButtonProps) -> Html {
    let icon = match p.liked {
        true => "bi-heart-fill",
        false => "bi-heart",
    };
    html! {
        <button
            type="button"
            class={ classes!("btn", "btn-sm", "btn-link", "bi-btn", icon) }
            title={ if p.liked { "Unlike" } else { "Like" } }
            aria-pressed={ if p.liked { "true" } else { "false" } }
            disabled={ p.disabled }
            onclick={ p.on_click.reform(|_| ()) }
        >
            { format!(" {}", p.count) }
        </button>
    }
}
