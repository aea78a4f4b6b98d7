use medprofile_core::{Navigator, StorageError, StorageReply, StorageRequest};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::components::{Component, EventResult, StatusBar, TitleBar};
use crate::event::AppKeyEvent;
use crate::modals::{handle_modal_key, render_modal};
use crate::platform::StorageWorker;
use crate::screens::{ProfileScreen, Screen};
use crate::state::AppState;

#[cfg(feature = "native")]
use std::time::Duration;

#[cfg(feature = "native")]
use crossterm::event::{self, Event, KeyEventKind};
#[cfg(feature = "native")]
use ratatui::DefaultTerminal;

/// How long the native loop waits for input before polling the worker again.
#[cfg(feature = "native")]
const TICK: Duration = Duration::from_millis(50);

pub struct App<W: StorageWorker> {
    pub state: AppState,
    worker: W,
    title_bar: TitleBar,
    profile_screen: ProfileScreen,
    status_bar: StatusBar,
}

impl<W: StorageWorker> App<W> {
    pub fn new(state: AppState, worker: W) -> Self {
        let profile_screen = ProfileScreen::new();
        tracing::info!(
            screen = profile_screen.title(),
            user = %state.user_id,
            key = state.profile.key(),
            "Opening screen"
        );
        Self {
            state,
            worker,
            title_bar: TitleBar::new(),
            profile_screen,
            status_bar: StatusBar::new(),
        }
    }

    /// Hand queued storage work to the worker and apply whatever it has
    /// finished since the last tick.
    pub fn tick(&mut self) {
        if let Some(request) = self.state.pending_storage.take() {
            self.dispatch(request);
        }
        self.process_worker_replies();
    }

    fn dispatch(&mut self, request: StorageRequest) {
        tracing::debug!(key = request.key(), "Dispatching storage request");
        let failed = match &request {
            StorageRequest::Get { .. } => StorageReply::Got(Err(worker_gone())),
            StorageRequest::Set { .. } => StorageReply::Stored(Err(worker_gone())),
        };
        if !self.worker.send(request) {
            tracing::error!("Storage worker is not accepting requests");
            self.state.apply_reply(failed);
        }
    }

    fn process_worker_replies(&mut self) {
        while let Some(reply) = self.worker.try_recv() {
            self.state.apply_reply(reply);
        }
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Title bar
                Constraint::Min(0),    // Profile
                Constraint::Length(2), // Status bar
            ])
            .split(frame.area());

        self.title_bar.render(frame, chunks[0], &self.state);
        self.profile_screen.render(frame, chunks[1], &self.state);
        self.status_bar.render(frame, chunks[2], &self.state);

        render_modal(frame, &self.state);
    }

    pub fn handle_key(&mut self, key: AppKeyEvent) {
        // The screen is gone once left
        if self.should_exit() {
            return;
        }

        // Alerts capture every key until dismissed
        if self.state.modal.is_open() {
            handle_modal_key(&key, &mut self.state);
            return;
        }

        if key.is_interrupt() {
            self.state.go_back();
            return;
        }

        if self.profile_screen.handle_key(key, &mut self.state) == EventResult::Exit {
            self.state.go_back();
        }
    }

    pub fn should_exit(&self) -> bool {
        self.state.exit
    }

    pub fn shutdown(&self) {
        if self.state.profile.is_busy() {
            tracing::warn!(mode = ?self.state.mode(), "Exiting with storage request in flight");
        }
        self.worker.shutdown();
    }
}

#[cfg(feature = "native")]
impl<W: StorageWorker> App<W> {
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        while !self.should_exit() {
            self.tick();
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_events()?;
        }

        self.shutdown();
        Ok(())
    }

    fn handle_events(&mut self) -> std::io::Result<()> {
        if !event::poll(TICK)? {
            return Ok(());
        }
        match event::read()? {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.handle_key(key_event.into())
            }
            _ => {}
        };
        Ok(())
    }
}

fn worker_gone() -> StorageError {
    StorageError::NotAvailable("storage worker stopped".to_string())
}

#[cfg(all(test, feature = "native"))]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    use medprofile_core::{KeyValueStore, MemoryStore, Mode, profile_key};

    use crate::event::KeyCode;
    use crate::state::ModalState;

    /// Runs requests immediately but only hands replies back on `try_recv`.
    #[derive(Default)]
    struct InlineWorker {
        store: MemoryStore,
        replies: RefCell<VecDeque<StorageReply>>,
        closed: Cell<bool>,
    }

    impl StorageWorker for InlineWorker {
        fn send(&self, request: StorageRequest) -> bool {
            if self.closed.get() {
                return false;
            }
            let reply = request.execute(&self.store);
            self.replies.borrow_mut().push_back(reply);
            true
        }

        fn try_recv(&self) -> Option<StorageReply> {
            self.replies.borrow_mut().pop_front()
        }

        fn shutdown(&self) {
            self.closed.set(true);
        }
    }

    fn app_with(worker: InlineWorker) -> App<InlineWorker> {
        let mut app = App::new(AppState::new("tester"), worker);
        app.tick();
        app
    }

    fn press(app: &mut App<InlineWorker>, code: KeyCode) {
        app.handle_key(AppKeyEvent::new(code));
    }

    fn type_text(app: &mut App<InlineWorker>, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_first_tick_loads_saved_profile() {
        let worker = InlineWorker {
            store: MemoryStore::new().with_entry(
                &profile_key("tester"),
                r#"{"fullName":"Grace Hopper","bloodType":"AB+"}"#,
            ),
            ..Default::default()
        };
        let app = app_with(worker);

        assert_eq!(app.state.mode(), Mode::Viewing);
        assert_eq!(app.state.profile.record().full_name, "Grace Hopper");
        assert_eq!(app.state.profile.record().blood_type, "AB+");
        assert!(!app.state.modal.is_open());
    }

    #[test]
    fn test_edit_save_round_trip() {
        let mut app = app_with(InlineWorker::default());

        press(&mut app, KeyCode::Char('e'));
        type_text(&mut app, "Grace");
        app.handle_key(AppKeyEvent::new(KeyCode::Char('s')).with_ctrl());
        assert_eq!(app.state.mode(), Mode::Saving);

        app.tick();
        assert_eq!(app.state.mode(), Mode::Viewing);
        let ModalState::Message(modal) = &app.state.modal else {
            panic!("expected success alert");
        };
        assert_eq!(modal.title, "Success");

        let stored = app.worker.store.get(&profile_key("tester")).unwrap().unwrap();
        assert!(stored.contains(r#""fullName":"Grace""#));

        // The alert swallows the next key
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_exit());
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_exit());
    }

    #[test]
    fn test_stopped_worker_surfaces_save_failure() {
        let mut app = app_with(InlineWorker::default());
        press(&mut app, KeyCode::Char('e'));
        type_text(&mut app, "Grace");

        app.worker.shutdown();
        press(&mut app, KeyCode::F(10));
        app.tick();

        assert_eq!(app.state.mode(), Mode::Editing);
        assert_eq!(app.state.profile.displayed().full_name, "Grace");
        assert!(matches!(app.state.modal, ModalState::Message(ref m) if m.is_error));
    }

    #[test]
    fn test_stopped_worker_surfaces_load_failure() {
        let worker = InlineWorker::default();
        worker.shutdown();
        let app = app_with(worker);

        assert_eq!(app.state.mode(), Mode::Viewing);
        assert!(matches!(app.state.modal, ModalState::Message(ref m) if m.is_error));
    }

    #[test]
    fn test_interrupt_leaves_from_edit_mode() {
        let mut app = app_with(InlineWorker::default());
        press(&mut app, KeyCode::Char('e'));
        type_text(&mut app, "q");
        assert!(!app.should_exit());

        app.handle_key(AppKeyEvent::new(KeyCode::Char('c')).with_ctrl());
        assert!(app.should_exit());
    }

    #[test]
    fn test_keys_after_leaving_are_dropped() {
        let mut app = app_with(InlineWorker::default());
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_exit());
        app.shutdown();

        press(&mut app, KeyCode::Char('e'));
        type_text(&mut app, "Late");
        app.handle_key(AppKeyEvent::new(KeyCode::Char('s')).with_ctrl());
        app.tick();

        assert_eq!(app.state.mode(), Mode::Viewing);
        assert!(app.state.pending_storage.is_none());
        assert!(!app.state.modal.is_open());
        assert!(app.worker.store.is_empty());
    }
}
