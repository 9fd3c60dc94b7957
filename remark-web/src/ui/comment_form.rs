use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct CommentFormProps {
    pub placeholder: AttrValue,
    pub on_submit: Callback<String>,
}

/// Text area posting its content on Ctrl+Enter or through its button, then clearing itself
#[function_component(CommentForm)]
pub fn comment_form(p: &CommentFormProps) -> Html {
    let text_ref = use_node_ref();
    let submit = {
        let text_ref = text_ref.clone();
        let on_submit = p.on_submit.clone();
        Callback::from(move |()| {
            let Some(elt) = text_ref.cast::<web_sys::HtmlTextAreaElement>() else {
                tracing::error!("comment form is not bound to a text area");
                return;
            };
            let text = elt.value();
            if text.trim().is_empty() {
                return;
            }
            on_submit.emit(text);
            elt.set_value("");
        })
    };
    html! {
        <div class="comment-form d-flex align-items-end my-2">
            <textarea
                ref={ text_ref }
                class="form-control"
                rows="2"
                placeholder={ p.placeholder.clone() }
                aria-label={ p.placeholder.clone() }
                onkeydown={
                    let submit = submit.clone();
                    Callback::from(move |e: web_sys::KeyboardEvent| {
                        if e.key() == "Enter" && e.ctrl_key() {
                            e.prevent_default();
                            submit.emit(());
                        }
                    })
                }
            />
            <button
                type="button"
                class="btn btn-primary ms-2"
                onclick={ submit.reform(|_| ()) }
            >
                { "Send" }
            </button>
        </div>
    }
}
