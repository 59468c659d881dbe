//! Application state and core logic

use crate::platform::is_submit_chord;
use crate::state::{persist, ActiveInput, AppState, Form, SubmitWorkflow, View};
use crate::store::{AppointmentStore, StoreError};
use anyhow::Result;
use chrono::{Local, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::oneshot::{self, error::TryRecvError};

/// Result of one persistence call, delivered back to the event loop
type SubmitResult = Result<String, StoreError>;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Submit state machine for the open modal
    pub workflow: SubmitWorkflow,
    /// Document store appointments are written to
    store: Arc<dyn AppointmentStore>,
    /// Receiver for the in-flight write, if any
    pending: Option<oneshot::Receiver<SubmitResult>>,
    /// When the in-flight write started (drives the spinner)
    pub submit_started: Option<Instant>,
    /// Transient status bar message
    pub status_message: Option<String>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(store: Arc<dyn AppointmentStore>) -> Self {
        Self {
            state: AppState::default(),
            workflow: SubmitWorkflow::default(),
            store,
            pending: None,
            submit_started: None,
            status_message: None,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Whether something on screen is animating or about to change
    pub fn is_animating(&self) -> bool {
        self.workflow.is_submitting() || !self.state.notifications.is_empty()
    }

    /// Per-frame housekeeping: settle finished writes and expire toasts
    pub fn tick(&mut self) {
        self.poll_submission();
        self.state.notifications.expire(Instant::now());
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Clear any status messages on key press
        self.status_message = None;

        match self.state.current_view {
            View::Landing => self.handle_landing_key(key),
            View::Booking => self.handle_booking_key(key),
        }
        Ok(())
    }

    /// Handle keys on the landing screen
    fn handle_landing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('b') | KeyCode::Enter => self.state.open_booking(),
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            _ => {}
        }
    }

    /// Handle keys in the appointment modal
    fn handle_booking_key(&mut self, key: KeyEvent) {
        let submitting = self.workflow.is_submitting();
        let active = self.state.form.active_input();

        match key.code {
            KeyCode::Esc if submitting => {
                self.status_message = Some("Booking in progress, please wait".to_string());
            }
            KeyCode::Esc => self.state.close_booking(),
            KeyCode::Char('s') if is_submit_chord(key.modifiers) => self.submit(),
            KeyCode::Tab => self.state.form.next_field(),
            KeyCode::BackTab => self.state.form.prev_field(),
            // Fields are locked while a booking is in flight
            _ if submitting => {}
            KeyCode::Enter => match active {
                ActiveInput::SubmitButton => self.submit(),
                ActiveInput::Multiline => self.state.form.notes.push_char('\n'),
                _ => self.state.form.next_field(),
            },
            KeyCode::Up | KeyCode::Down | KeyCode::PageUp | KeyCode::PageDown => {
                self.handle_step_key(key.code);
            }
            KeyCode::Char(' ') if active == ActiveInput::Time => self.state.form.time.next_slot(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(field) = self.state.form.get_active_field_mut() {
                    field.push_char(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = self.state.form.get_active_field_mut() {
                    field.pop_char();
                }
            }
            KeyCode::Delete => {
                if let Some(field) = self.state.form.get_active_field_mut() {
                    field.clear();
                }
            }
            _ => {}
        }
    }

    /// Arrow and page keys adjust the date and time pickers
    fn handle_step_key(&mut self, code: KeyCode) {
        let form = &mut self.state.form;
        let today = Local::now().date_naive();

        match (form.active_input(), code) {
            (ActiveInput::Date, KeyCode::Up) => form.date.step_days(1, today),
            (ActiveInput::Date, KeyCode::Down) => form.date.step_days(-1, today),
            (ActiveInput::Date, KeyCode::PageUp) => form.date.step_months(1, today),
            (ActiveInput::Date, KeyCode::PageDown) => form.date.step_months(-1, today),
            (ActiveInput::Time, KeyCode::Down) => form.time.next_slot(),
            (ActiveInput::Time, KeyCode::Up) => form.time.prev_slot(),
            (_, KeyCode::Down) => form.next_field(),
            (_, KeyCode::Up) => form.prev_field(),
            _ => {}
        }
    }

    /// Validate the form and start writing it in the background
    fn submit(&mut self) {
        let draft = self.state.form.draft();
        let Some(record) =
            self.workflow
                .try_begin(&draft, Utc::now(), &mut self.state.notifications)
        else {
            return;
        };

        let (tx, rx) = oneshot::channel();
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            let result = persist(store.as_ref(), &record).await;
            // The receiver is only gone when the app is shutting down
            let _ = tx.send(result);
        });

        self.pending = Some(rx);
        self.submit_started = Some(Instant::now());
    }

    /// Settle the in-flight write once its result has arrived
    fn poll_submission(&mut self) {
        let Some(rx) = self.pending.as_mut() else {
            return;
        };

        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            // The task ended without reporting (it panicked)
            Err(TryRecvError::Closed) => Err(StoreError::Interrupted),
        };

        self.pending = None;
        self.submit_started = None;

        let mut close = false;
        self.workflow
            .settle(result, &mut self.state.notifications, || close = true);
        if close {
            self.state.close_booking();
        }
    }
}
