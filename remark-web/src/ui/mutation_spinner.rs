use remark_client::{MutationKind, PendingMutation};
use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct MutationSpinnerProps {
    pub pending: Vec<PendingMutation>,
}

fn describe(m: &PendingMutation) -> String {
    match &m.kind {
        MutationKind::CreateComment { .. } => String::from("Posting comment"),
        MutationKind::CreateReply { parent_id, .. } => format!("Replying to {parent_id}"),
        MutationKind::ToggleLike {
            comment_id,
            liked: true,
            ..
        } => format!("Liking {comment_id}"),
        MutationKind::ToggleLike {
            comment_id,
            liked: false,
            ..
        } => format!("Unliking {comment_id}"),
    }
}

#[function_component(MutationSpinner)]
pub fn mutation_spinner(p: &MutationSpinnerProps) -> Html {
    html! {
        <div class="dropdown">
            <button
                class={ classes!(
                    "mutations-pending-spinner",
                    p.pending.is_empty().then(|| "no-mutations"),
                    "btn", "btn-secondary", "btn-circle", "mt-3"
                ) }
                type="button"
                data-bs-toggle="dropdown"
            >
                <span class="spinner-border spinner-border-sm" role="status" aria-hidden="true"></span>
                <span class="visually-hidden">{ "Submitting changes..." }</span>
            </button>
            <ul class={ classes!(
                "mutations-pending-list",
                p.pending.is_empty().then(|| "no-mutations"),
                "dropdown-menu", "dropdown-menu-dark"
            ) }>
                { for p.pending.iter().map(|m| html! {
                    <li>{ describe(m) }</li>
                }) }
            </ul>
        </div>
    }
}
