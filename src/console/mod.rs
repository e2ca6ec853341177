pub mod feedback;
pub mod form;
pub mod panel;
pub mod runtime;
pub mod shell;
pub mod view;

pub use feedback::{AUTO_DISMISS, Feedback, Severity};
pub use form::{Field, FormState};
pub use panel::Panel;
pub use runtime::{Console, Event};
pub use shell::{Route, Shell};
