use tracing::{debug, info};
use uuid::Uuid;

use crate::api::{Operation, Outcome, UserApi, UserRecord};
use crate::console::feedback::{Feedback, Severity, Ticket};
use crate::console::form::{Field, FormState};

pub const ALL_FIELDS_REQUIRED: &str = "All fields are required";
pub const USERNAME_REQUIRED: &str = "Username is required";
pub const READ_SUCCEEDED: &str = "User fetched successfully";

/// A single call against the user resource, built from a validated form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create(UserRecord),
    Read { username: String },
    Update { username: String, new_password: String },
    Delete { username: String },
}

impl Call {
    pub async fn execute(self, api: &dyn UserApi) -> Completion {
        match self {
            Call::Create(record) => Completion::Message(api.create_user(&record).await),
            Call::Read { username } => Completion::Record(api.get_user(&username).await),
            Call::Update {
                username,
                new_password,
            } => Completion::Message(api.update_user(&username, &new_password).await),
            Call::Delete { username } => Completion::Message(api.delete_user(&username).await),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub id: Uuid,
    pub call: Call,
}

/// What came back from a [`Call`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Message(Outcome<String>),
    Record(Outcome<UserRecord>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Editing,
    /// A request is in flight; further submits are rejected until it resolves.
    Submitting(Uuid),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelMessage {
    Input(Field, String),
    Submit,
    Resolved {
        request_id: Uuid,
        completion: Completion,
    },
    Dismiss,
    Expired(Ticket),
}

/// Work the panel asks its host to carry out after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Send(Request),
    StartTimer(Ticket),
    CancelTimer,
    /// The current timer fired; its handle can be dropped.
    ReleaseTimer,
}

#[derive(Debug, Clone)]
pub struct Panel {
    operation: Operation,
    form: FormState,
    feedback: Feedback,
    fetched: Option<UserRecord>,
    phase: Phase,
}

impl Panel {
    pub fn new(operation: Operation) -> Self {
        let fields: &[Field] = match operation {
            Operation::Create => &[Field::Username, Field::Password],
            Operation::Read | Operation::Delete => &[Field::Username],
            Operation::Update => &[Field::Username, Field::NewPassword],
        };

        Self {
            operation,
            form: FormState::new(fields),
            feedback: Feedback::default(),
            fetched: None,
            phase: Phase::Editing,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    /// Last record the Read panel fetched. Always `None` on other panels.
    pub fn fetched(&self) -> Option<&UserRecord> {
        self.fetched.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn update(&mut self, message: PanelMessage) -> Effect {
        match message {
            PanelMessage::Input(field, value) => {
                if !self.form.set(field, value) {
                    debug!(operation = %self.operation, field = field.key(), "input for a field this panel lacks");
                }
                Effect::None
            }
            PanelMessage::Submit => self.submit(),
            PanelMessage::Resolved {
                request_id,
                completion,
            } => self.resolve(request_id, completion),
            PanelMessage::Dismiss => {
                self.feedback.dismiss();
                Effect::CancelTimer
            }
            PanelMessage::Expired(ticket) => {
                if self.feedback.expire(ticket) {
                    Effect::ReleaseTimer
                } else {
                    Effect::None
                }
            }
        }
    }

    fn submit(&mut self) -> Effect {
        let call = match self.validate() {
            Ok(call) => call,
            Err(message) => {
                return Effect::StartTimer(self.feedback.show(message, Severity::Error));
            }
        };

        if let Phase::Submitting(request_id) = self.phase {
            debug!(operation = %self.operation, %request_id, "submit ignored while a request is in flight");
            return Effect::None;
        }

        let id = Uuid::new_v4();
        info!(operation = %self.operation, request_id = %id, "submitting");
        self.phase = Phase::Submitting(id);
        Effect::Send(Request { id, call })
    }

    fn validate(&self) -> Result<Call, &'static str> {
        let username = self.form.value(Field::Username);
        match self.operation {
            Operation::Create => {
                let password = self.form.value(Field::Password);
                if username.is_empty() || password.is_empty() {
                    return Err(ALL_FIELDS_REQUIRED);
                }
                Ok(Call::Create(UserRecord::new(username, password)))
            }
            Operation::Read => {
                if username.is_empty() {
                    return Err(USERNAME_REQUIRED);
                }
                Ok(Call::Read {
                    username: username.to_string(),
                })
            }
            Operation::Update => {
                let new_password = self.form.value(Field::NewPassword);
                if username.is_empty() || new_password.is_empty() {
                    return Err(ALL_FIELDS_REQUIRED);
                }
                Ok(Call::Update {
                    username: username.to_string(),
                    new_password: new_password.to_string(),
                })
            }
            Operation::Delete => {
                if username.is_empty() {
                    return Err(USERNAME_REQUIRED);
                }
                Ok(Call::Delete {
                    username: username.to_string(),
                })
            }
        }
    }

    fn resolve(&mut self, request_id: Uuid, completion: Completion) -> Effect {
        if self.phase != Phase::Submitting(request_id) {
            debug!(operation = %self.operation, %request_id, "dropping result of an unknown request");
            return Effect::None;
        }
        self.phase = Phase::Editing;

        let ticket = match completion {
            Completion::Message(Ok(message)) => self.feedback.show(message, Severity::Success),
            Completion::Message(Err(failure)) => self.feedback.show(failure.message, Severity::Error),
            Completion::Record(Ok(record)) => {
                self.fetched = Some(record);
                self.feedback.show(READ_SUCCEEDED, Severity::Success)
            }
            Completion::Record(Err(failure)) => {
                self.fetched = None;
                self.feedback.show(failure.message, Severity::Error)
            }
        };
        Effect::StartTimer(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Failure;

    fn input(panel: &mut Panel, field: Field, value: &str) {
        assert_eq!(
            panel.update(PanelMessage::Input(field, value.to_string())),
            Effect::None
        );
    }

    fn submit(panel: &mut Panel) -> Request {
        match panel.update(PanelMessage::Submit) {
            Effect::Send(request) => request,
            other => panic!("expected a request, got {other:?}"),
        }
    }

    fn resolve(panel: &mut Panel, request: &Request, completion: Completion) -> Effect {
        panel.update(PanelMessage::Resolved {
            request_id: request.id,
            completion,
        })
    }

    #[test]
    fn test_validation_messages() {
        let cases = [
            (Operation::Create, ALL_FIELDS_REQUIRED),
            (Operation::Read, USERNAME_REQUIRED),
            (Operation::Update, ALL_FIELDS_REQUIRED),
            (Operation::Delete, USERNAME_REQUIRED),
        ];

        for (operation, expected) in cases {
            let mut panel = Panel::new(operation);
            let effect = panel.update(PanelMessage::Submit);
            assert!(matches!(effect, Effect::StartTimer(_)), "{operation}: {effect:?}");
            assert_eq!(panel.feedback().message(), expected);
            assert_eq!(panel.feedback().severity(), Severity::Error);
            assert!(panel.feedback().is_visible());
            assert_eq!(panel.phase(), Phase::Editing);
        }
    }

    #[test]
    fn test_partial_forms_are_rejected() {
        let mut panel = Panel::new(Operation::Create);
        input(&mut panel, Field::Username, "alice");
        assert!(matches!(panel.update(PanelMessage::Submit), Effect::StartTimer(_)));
        assert_eq!(panel.feedback().message(), ALL_FIELDS_REQUIRED);

        let mut panel = Panel::new(Operation::Update);
        input(&mut panel, Field::NewPassword, "pw");
        assert!(matches!(panel.update(PanelMessage::Submit), Effect::StartTimer(_)));
        assert_eq!(panel.feedback().message(), ALL_FIELDS_REQUIRED);
    }

    #[test]
    fn test_submit_builds_call() {
        let mut panel = Panel::new(Operation::Update);
        input(&mut panel, Field::Username, "alice");
        input(&mut panel, Field::NewPassword, "second");

        let request = submit(&mut panel);
        assert_eq!(
            request.call,
            Call::Update {
                username: "alice".to_string(),
                new_password: "second".to_string(),
            }
        );
        assert_eq!(panel.phase(), Phase::Submitting(request.id));
    }

    #[test]
    fn test_second_submit_rejected_while_in_flight() {
        let mut panel = Panel::new(Operation::Delete);
        input(&mut panel, Field::Username, "alice");
        let request = submit(&mut panel);

        assert_eq!(panel.update(PanelMessage::Submit), Effect::None);

        resolve(&mut panel, &request, Completion::Message(Ok("gone".to_string())));
        assert_eq!(panel.phase(), Phase::Editing);
        assert!(matches!(panel.update(PanelMessage::Submit), Effect::Send(_)));
    }

    #[test]
    fn test_validation_still_reported_while_in_flight() {
        let mut panel = Panel::new(Operation::Create);
        input(&mut panel, Field::Username, "alice");
        input(&mut panel, Field::Password, "pw");
        let request = submit(&mut panel);

        input(&mut panel, Field::Password, "");
        assert!(matches!(panel.update(PanelMessage::Submit), Effect::StartTimer(_)));
        assert_eq!(panel.feedback().message(), ALL_FIELDS_REQUIRED);
        assert_eq!(panel.feedback().severity(), Severity::Error);
        assert_eq!(panel.phase(), Phase::Submitting(request.id));

        resolve(&mut panel, &request, Completion::Message(Ok("created".to_string())));
        assert_eq!(panel.feedback().message(), "created");
    }

    #[test]
    fn test_success_and_failure_feedback() {
        let mut panel = Panel::new(Operation::Create);
        input(&mut panel, Field::Username, "alice");
        input(&mut panel, Field::Password, "pw");

        let request = submit(&mut panel);
        let effect = resolve(
            &mut panel,
            &request,
            Completion::Message(Ok("User created successfully".to_string())),
        );
        assert!(matches!(effect, Effect::StartTimer(_)));
        assert_eq!(panel.feedback().message(), "User created successfully");
        assert_eq!(panel.feedback().severity(), Severity::Success);

        let request = submit(&mut panel);
        resolve(
            &mut panel,
            &request,
            Completion::Message(Err(Failure::new("Error creating user"))),
        );
        assert_eq!(panel.feedback().message(), "Error creating user");
        assert_eq!(panel.feedback().severity(), Severity::Error);
    }

    #[test]
    fn test_read_replaces_then_clears_fetched() {
        let mut panel = Panel::new(Operation::Read);
        input(&mut panel, Field::Username, "alice");

        let request = submit(&mut panel);
        let record = UserRecord::new("alice", "pw");
        resolve(&mut panel, &request, Completion::Record(Ok(record.clone())));
        assert_eq!(panel.fetched(), Some(&record));
        assert_eq!(panel.feedback().message(), READ_SUCCEEDED);

        let request = submit(&mut panel);
        resolve(
            &mut panel,
            &request,
            Completion::Record(Err(Failure::new("Error fetching user"))),
        );
        assert_eq!(panel.fetched(), None);
        assert_eq!(panel.feedback().message(), "Error fetching user");
    }

    #[test]
    fn test_unknown_result_is_dropped() {
        let mut panel = Panel::new(Operation::Delete);
        let effect = panel.update(PanelMessage::Resolved {
            request_id: Uuid::new_v4(),
            completion: Completion::Message(Ok("stale".to_string())),
        });
        assert_eq!(effect, Effect::None);
        assert!(!panel.feedback().is_visible());
    }

    #[test]
    fn test_dismiss_and_expire() {
        let mut panel = Panel::new(Operation::Read);
        let Effect::StartTimer(ticket) = panel.update(PanelMessage::Submit) else {
            panic!("validation should arm the timer");
        };

        assert_eq!(panel.update(PanelMessage::Dismiss), Effect::CancelTimer);
        assert!(!panel.feedback().is_visible());

        let Effect::StartTimer(ticket_2) = panel.update(PanelMessage::Submit) else {
            panic!("validation should arm the timer");
        };
        assert_eq!(panel.update(PanelMessage::Expired(ticket)), Effect::None);
        assert!(panel.feedback().is_visible());
        assert_eq!(
            panel.update(PanelMessage::Expired(ticket_2)),
            Effect::ReleaseTimer
        );
        assert!(!panel.feedback().is_visible());
    }
}
