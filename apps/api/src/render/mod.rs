// Content rendering: selection → view model (`view`) → HTML fragments (`markup`).
// The role selector options come from `selector`; ordering rules live in `natural`.

pub mod handlers;
pub mod markup;
pub mod natural;
pub mod selector;
pub mod view;

pub use markup::{Fragments, Markup};
pub use selector::{default_selection, role_options, RoleOption};
pub use view::{build_view, RenderError, RoleView, Selection};
