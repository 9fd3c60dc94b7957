mod comment_form;
pub use comment_form::CommentForm;

mod comment_row;
pub use comment_row::{CommentRow, RepliesView};

mod like_button;
pub use like_button::LikeButton;

mod login;
pub use login::Login;

mod mutation_spinner;
pub use mutation_spinner::MutationSpinner;

mod reply_toggle;
pub use reply_toggle::ReplyToggle;

mod thread_view;
pub use thread_view::ThreadView;
