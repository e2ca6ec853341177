use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

use crate::api::UserApi;
use crate::console::feedback::{AUTO_DISMISS, Ticket};
use crate::console::form::Field;
use crate::console::panel::{Completion, Effect, PanelMessage, Request};
use crate::console::shell::Shell;

const EVENT_BUFFER: usize = 64;

/// Everything the console reacts to: user input from the front end, plus
/// completions and timer callbacks posted back by its own tasks.
#[derive(Debug)]
pub enum Event {
    /// Navigation by path, as typed by the user. Unknown paths are ignored.
    NavigatePath(String),
    Input(Field, String),
    Submit,
    Dismiss,
    Completed {
        mount: Uuid,
        request_id: Uuid,
        completion: Completion,
    },
    Expired {
        mount: Uuid,
        ticket: Ticket,
    },
}

/// Single-task event loop owning the shell.
///
/// Requests and auto-dismiss timers run as separate tasks and report back
/// through the event channel, so the loop never waits on the network. Both
/// are tied to the current mount: navigating away aborts them, and anything
/// tagged with an older mount is discarded.
pub struct Console {
    shell: Shell,
    api: Arc<dyn UserApi>,
    receiver: mpsc::Receiver<Event>,
    // Weak so the loop ends once every front-end sender is gone.
    sender: mpsc::WeakSender<Event>,
    in_flight: Option<JoinHandle<()>>,
    timer: Option<JoinHandle<()>>,
}

impl Console {
    pub fn new(api: Arc<dyn UserApi>) -> (Self, mpsc::Sender<Event>) {
        let (sender, receiver) = mpsc::channel(EVENT_BUFFER);
        let console = Self {
            shell: Shell::new(),
            api,
            receiver,
            sender: sender.downgrade(),
            in_flight: None,
            timer: None,
        };
        (console, sender)
    }

    /// Processes events until all senders are dropped, calling `on_change`
    /// once up front and after every event.
    pub async fn run<F>(mut self, mut on_change: F)
    where
        F: FnMut(&Shell),
    {
        on_change(&self.shell);
        while self.step().await {
            on_change(&self.shell);
        }
        self.cancel_tasks();
        debug!("console loop ended");
    }

    /// Waits for and handles one event. `false` once the channel is closed.
    pub async fn step(&mut self) -> bool {
        match self.receiver.recv().await {
            Some(event) => {
                self.handle(event);
                true
            }
            None => false,
        }
    }

    pub fn handle(&mut self, event: Event) {
        let message = match event {
            Event::NavigatePath(path) => {
                if self.shell.navigate_to_path(&path) {
                    self.cancel_tasks();
                }
                return;
            }
            Event::Input(field, value) => PanelMessage::Input(field, value),
            Event::Submit => PanelMessage::Submit,
            Event::Dismiss => PanelMessage::Dismiss,
            Event::Completed {
                mount,
                request_id,
                completion,
            } => {
                if mount != self.shell.mount_id() {
                    debug!(%mount, %request_id, "result arrived after its panel was unmounted");
                    return;
                }
                self.in_flight = None;
                PanelMessage::Resolved {
                    request_id,
                    completion,
                }
            }
            Event::Expired { mount, ticket } => {
                if mount != self.shell.mount_id() {
                    return;
                }
                PanelMessage::Expired(ticket)
            }
        };

        let effect = self.shell.panel_mut().update(message);
        self.apply(effect);
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::Send(request) => self.dispatch(request),
            Effect::StartTimer(ticket) => self.arm_timer(ticket),
            Effect::CancelTimer => {
                if let Some(timer) = self.timer.take() {
                    timer.abort();
                }
            }
            Effect::ReleaseTimer => self.timer = None,
        }
    }

    fn dispatch(&mut self, request: Request) {
        let Some(sender) = self.sender.upgrade() else {
            return;
        };
        let api = Arc::clone(&self.api);
        let mount = self.shell.mount_id();
        let Request { id, call } = request;

        self.in_flight = Some(tokio::spawn(async move {
            let completion = call.execute(api.as_ref()).await;
            let _ = sender
                .send(Event::Completed {
                    mount,
                    request_id: id,
                    completion,
                })
                .await;
        }));
    }

    fn arm_timer(&mut self, ticket: Ticket) {
        if let Some(previous) = self.timer.take() {
            previous.abort();
        }
        let Some(sender) = self.sender.upgrade() else {
            return;
        };
        let mount = self.shell.mount_id();
        // Counted from now, not from when the task first gets polled.
        let deadline = Instant::now() + AUTO_DISMISS;

        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let _ = sender.send(Event::Expired { mount, ticket }).await;
        }));
    }

    fn cancel_tasks(&mut self) {
        if let Some(request) = self.in_flight.take() {
            debug!("aborting in-flight request");
            request.abort();
        }
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}
