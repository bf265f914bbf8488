//! Application state and core logic

use crate::config::FolioConfig;
use crate::contact::{
    ContactController, SimulatedBackend, SubmissionBackend, SubmissionReceipt, SubmitError,
};
use crate::effects::{parallax, resolve_anchor, RevealTracker, ScrollIndicator, SmoothScroll};
use crate::platform;
use crate::state::{AppState, ContactPanel, PageState, View};
use crate::ui::{contact_form, NAV_BAR_HEIGHT, PAGE_CHROME_WIDTH, STATUS_BAR_HEIGHT};
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::oneshot;

/// Content width used until the first resize
const DEFAULT_WIDTH: u16 = 80;

type SubmitResult = Result<SubmissionReceipt, SubmitError>;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Contact form controller, projecting onto the panel the UI draws
    pub contact: ContactController<ContactPanel>,
    /// Where validated messages are sent
    backend: Arc<dyn SubmissionBackend>,
    /// Result of the in-flight submission, if any
    pending_submit: Option<oneshot::Receiver<SubmitResult>>,
    /// One-shot section reveals
    pub reveal: RevealTracker,
    /// Fade of the "scroll" hint under the hero
    pub indicator: ScrollIndicator,
    /// Anchor scroll in progress
    smooth_scroll: Option<SmoothScroll>,
    /// Set by any scroll movement, consumed by the next tick
    scrolled: bool,
    config: FolioConfig,
    /// Whether the app should quit
    quit: bool,
    /// Terminal size (height, width)
    pub terminal_size: Option<(u16, u16)>,
}

impl App {
    /// Create an app that submits through the simulated backend
    pub fn new(config: FolioConfig) -> Self {
        let backend = Arc::new(SimulatedBackend::new(config.submit_delay()));
        Self::with_backend(config, backend)
    }

    pub fn with_backend(config: FolioConfig, backend: Arc<dyn SubmissionBackend>) -> Self {
        let sections = config.sections();
        let page = PageState::layout(config.owner(), config.tagline(), &sections, DEFAULT_WIDTH);
        let reveal = RevealTracker::new(
            sections.len(),
            config.reveal_threshold(),
            config.reveal_stagger(),
        );
        let indicator =
            ScrollIndicator::new(config.indicator_throttle(), config.indicator_hide_after());

        Self {
            state: AppState::new(page),
            contact: ContactController::new(ContactPanel::default()),
            backend,
            pending_submit: None,
            reveal,
            indicator,
            smooth_scroll: None,
            scrolled: false,
            config,
            quit: false,
            terminal_size: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Whether the next frames need fast polling
    pub fn is_animating(&self, now: Instant) -> bool {
        self.smooth_scroll.is_some()
            || self.pending_submit.is_some()
            || self.indicator.is_pending()
            || self.reveal.is_animating(now)
    }

    /// Offset of the anchor scroll in progress, if any
    #[cfg(test)]
    pub fn scroll_target(&self) -> Option<u16> {
        self.smooth_scroll.as_ref().map(SmoothScroll::target)
    }

    pub fn parallax_offsets(&self, count: usize) -> Vec<f32> {
        parallax::shape_offsets(
            f32::from(self.state.page.scroll),
            count,
            self.config.parallax_speed(),
        )
    }

    /// Re-lay out the page for a new terminal size
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.terminal_size == Some((height, width)) {
            return;
        }
        self.terminal_size = Some((height, width));

        let content_width = width.saturating_sub(PAGE_CHROME_WIDTH);
        let scroll = self.state.page.scroll;
        let mut page = PageState::layout(
            self.config.owner(),
            self.config.tagline(),
            &self.config.sections(),
            content_width,
        );
        page.viewport_height = height.saturating_sub(NAV_BAR_HEIGHT + STATUS_BAR_HEIGHT);
        page.scroll_to(scroll);
        self.state.page = page;
    }

    /// Advance time-driven state: submission results, anchor scrolling,
    /// the indicator throttle and section reveals.
    pub fn tick(&mut self, now: Instant) {
        self.poll_submission();

        if let Some(scroll) = &self.smooth_scroll {
            let position = scroll.position(now);
            let done = scroll.is_done(now);
            if self.state.page.scroll_to(position) {
                self.scrolled = true;
            }
            if done {
                self.smooth_scroll = None;
            }
        }

        if std::mem::take(&mut self.scrolled) {
            self.indicator.on_scroll(now);
        }
        self.indicator.tick(now, self.state.page.scroll);

        if self.state.page.viewport_height > 0 {
            let ratios = self.state.page.visible_ratios();
            self.reveal.update(&ratios, now);
        }
    }

    fn scroll_page(&mut self, delta: i32) {
        self.smooth_scroll = None;
        if self.state.page.scroll_by(delta) {
            self.scrolled = true;
        }
    }

    /// Smooth-scroll to the section a `#id` link names; unknown ids are ignored
    pub fn follow_link(&mut self, href: &str) {
        let Some(top) = resolve_anchor(href, self.state.page.anchor_targets()) else {
            tracing::debug!("No section for link {href}");
            return;
        };
        let target = top.min(self.state.page.max_scroll());
        self.smooth_scroll = Some(SmoothScroll::new(
            self.state.page.scroll,
            target,
            Instant::now(),
        ));
    }

    fn follow_selected_link(&mut self) {
        let href = self
            .state
            .page
            .sections
            .get(self.state.selected_link)
            .map(|s| format!("#{}", s.id));
        if let Some(href) = href {
            self.follow_link(&href);
        }
    }

    fn open_contact(&mut self) {
        self.state.current_view = View::Contact;
        self.state.status_message = None;
    }

    fn close_contact(&mut self) {
        // leaving the form takes focus away from the active field
        if let Some(field) = self.contact.active_field() {
            self.contact.on_blur(field);
        }
        self.state.current_view = View::Page;
    }

    /// Validate and, if everything passes, hand the message to the backend
    /// on a background task.
    fn submit_contact(&mut self) {
        let Some(message) = self.contact.begin_submit() else {
            return;
        };

        let backend = Arc::clone(&self.backend);
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let result = backend.submit(&message).await;
            // receiver is gone only when the app is shutting down
            let _ = tx.send(result);
        });

        self.pending_submit = Some(rx);
        self.state.status_message = Some("Sending message...".to_string());
    }

    /// Apply the result of the in-flight submission once it arrives
    pub fn poll_submission(&mut self) {
        let Some(rx) = self.pending_submit.as_mut() else {
            return;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(oneshot::error::TryRecvError::Empty) => return,
            Err(oneshot::error::TryRecvError::Closed) => Err(SubmitError::Interrupted),
        };

        self.pending_submit = None;
        let message = if result.is_ok() {
            "Message sent"
        } else {
            "Message not sent"
        };
        self.contact.finish_submit(result);
        self.state.status_message = Some(message.to_string());
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) {
        // The failure alert is modal over whichever view is showing
        if self.contact.state().is_failed() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.contact.acknowledge_alert();
            }
            return;
        }
        match self.state.current_view {
            View::Page => self.handle_page_key(key),
            View::Contact => self.handle_contact_key(key),
        }
    }

    fn handle_page_key(&mut self, key: KeyEvent) {
        let page_step = i32::from(self.state.page.viewport_height.max(1));
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.scroll_page(1),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_page(-1),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_page(page_step),
            KeyCode::PageUp => self.scroll_page(-page_step),
            KeyCode::Home | KeyCode::Char('g') => self.scroll_page(-i32::from(u16::MAX)),
            KeyCode::End | KeyCode::Char('G') => self.scroll_page(i32::from(u16::MAX)),
            KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => self.state.next_link(),
            KeyCode::Left | KeyCode::BackTab | KeyCode::Char('h') => self.state.prev_link(),
            KeyCode::Enter => self.follow_selected_link(),
            KeyCode::Char(c @ '1'..='9') => {
                let idx = c.to_digit(10).map(|d| d as usize - 1).unwrap_or(0);
                if idx < self.state.page.sections.len() {
                    self.state.selected_link = idx;
                    self.follow_selected_link();
                }
            }
            KeyCode::Char('c') => self.open_contact(),
            _ => {}
        }
    }

    fn handle_contact_key(&mut self, key: KeyEvent) {
        if self.contact.state().is_succeeded() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.close_contact();
            }
            return;
        }

        let on_button = self.contact.is_submit_focused();
        let shortcut = platform::is_shortcut(key.modifiers);
        match key.code {
            KeyCode::Esc => self.close_contact(),
            KeyCode::Tab => self.contact.focus_next(),
            KeyCode::BackTab => self.contact.focus_prev(),
            KeyCode::Char('s') if shortcut => self.submit_contact(),
            KeyCode::Enter if on_button => self.submit_contact(),
            KeyCode::Enter => {
                // Enter in a single-line input submits, like a browser form
                if self.contact.active_field().is_some_and(|f| f.is_multiline()) {
                    self.contact.newline();
                } else {
                    self.submit_contact();
                }
            }
            KeyCode::Char(c) if !on_button && !shortcut => self.contact.type_char(c),
            KeyCode::Backspace if !on_button => self.contact.backspace(),
            _ => {}
        }
    }

    /// Handle mouse input
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.contact.state().is_failed() {
            return;
        }
        match self.state.current_view {
            View::Page => self.handle_page_mouse(mouse),
            View::Contact => self.handle_contact_mouse(mouse),
        }
    }

    fn handle_page_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll_page(1),
            MouseEventKind::ScrollUp => self.scroll_page(-1),
            MouseEventKind::Down(MouseButton::Left) if mouse.row < NAV_BAR_HEIGHT => {
                let clicked = self
                    .state
                    .page
                    .nav_links()
                    .iter()
                    .position(|link| link.contains_column(mouse.column));
                if let Some(idx) = clicked {
                    self.state.selected_link = idx;
                    self.follow_selected_link();
                }
            }
            _ => {}
        }
    }

    fn handle_contact_mouse(&mut self, mouse: MouseEvent) {
        if self.contact.state().is_succeeded() {
            return;
        }
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            if let Some(index) = contact_form::focus_index_at(mouse.column, mouse.row) {
                self.contact.focus(index);
                if self.contact.is_submit_focused() {
                    self.submit_contact();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::{FieldName, MockSubmissionBackend, SUBMIT_FAILED_ALERT};
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};
    use std::time::Duration;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn app() -> App {
        let mut app = App::new(FolioConfig::default());
        app.resize(80, 24);
        app
    }

    fn app_with(backend: MockSubmissionBackend) -> App {
        let mut app = App::with_backend(FolioConfig::default(), Arc::new(backend));
        app.resize(80, 24);
        app
    }

    fn fill_valid_form(app: &mut App) {
        app.handle_key(key(KeyCode::Char('c')));
        type_str(app, "Jo");
        app.handle_key(key(KeyCode::Tab));
        type_str(app, "a@b.com");
        app.handle_key(key(KeyCode::Tab));
        type_str(app, "This is long enough.");
    }

    mod page {
        use super::*;

        #[test]
        fn test_starts_on_page() {
            let app = app();
            assert_eq!(app.state.current_view, View::Page);
            assert!(!app.should_quit());
        }

        #[test]
        fn test_q_quits() {
            let mut app = app();
            app.handle_key(key(KeyCode::Char('q')));
            assert!(app.should_quit());
        }

        #[test]
        fn test_resize_sets_viewport() {
            let app = app();
            assert_eq!(app.state.page.viewport_height, 22);
            assert_eq!(app.terminal_size, Some((24, 80)));
        }

        #[test]
        fn test_arrow_keys_scroll() {
            let mut app = app();
            app.handle_key(key(KeyCode::Down));
            app.handle_key(key(KeyCode::Down));
            assert_eq!(app.state.page.scroll, 2);
            app.handle_key(key(KeyCode::Up));
            assert_eq!(app.state.page.scroll, 1);
        }

        #[test]
        fn test_digit_starts_smooth_scroll_to_section() {
            let mut app = app();
            app.handle_key(key(KeyCode::Char('2')));
            let expected = app.state.page.sections[1]
                .top
                .min(app.state.page.max_scroll());
            assert_eq!(app.scroll_target(), Some(expected));
            assert_eq!(app.state.selected_link, 1);
        }

        #[test]
        fn test_digit_without_section_is_ignored() {
            let mut app = app();
            app.handle_key(key(KeyCode::Char('9')));
            assert_eq!(app.scroll_target(), None);
            assert_eq!(app.state.selected_link, 0);
        }

        #[test]
        fn test_unknown_anchor_does_nothing() {
            let mut app = app();
            app.follow_link("#blog");
            assert_eq!(app.scroll_target(), None);
        }

        #[test]
        fn test_manual_scroll_cancels_smooth_scroll() {
            let mut app = app();
            app.follow_link("#contact");
            app.handle_key(key(KeyCode::Down));
            assert_eq!(app.scroll_target(), None);
        }

        #[test]
        fn test_smooth_scroll_arrives_and_hides_indicator() {
            let mut app = app();
            app.follow_link("#contact");
            let target = app.scroll_target().unwrap();
            assert!(target > 3);

            let start = Instant::now();
            app.tick(start + Duration::from_secs(1));
            assert_eq!(app.state.page.scroll, target);
            assert_eq!(app.scroll_target(), None);
            assert!(app.indicator.is_visible());

            app.tick(start + Duration::from_millis(1200));
            assert!(!app.indicator.is_visible());
        }

        #[test]
        fn test_nav_click_follows_link() {
            let mut app = app();
            let link = app.state.page.nav_links()[2].clone();
            app.handle_mouse(click(link.x + 1, 0));
            assert_eq!(app.state.selected_link, 2);
            assert!(app.scroll_target().is_some());
        }

        #[test]
        fn test_visible_sections_reveal_on_tick() {
            let mut app = app();
            let now = Instant::now();
            app.tick(now);
            assert!(!app.reveal.is_observed(0));
            assert!(app.is_animating(now));
            assert_eq!(app.reveal.progress(0, now + Duration::from_secs(2)), 1.0);
        }

        #[test]
        fn test_parallax_follows_scroll() {
            let mut app = app();
            assert!(app.parallax_offsets(2).iter().all(|o| *o == 0.0));
            app.handle_key(key(KeyCode::PageDown));
            let offsets = app.parallax_offsets(2);
            assert!(offsets[1] > offsets[0]);
        }
    }

    mod contact {
        use super::*;

        #[test]
        fn test_c_opens_form_and_esc_blurs_and_closes() {
            let mut app = app();
            app.handle_key(key(KeyCode::Char('c')));
            assert_eq!(app.state.current_view, View::Contact);
            app.handle_key(key(KeyCode::Esc));
            assert_eq!(app.state.current_view, View::Page);
            assert_eq!(
                app.contact.view().error(FieldName::Name),
                Some("Name is required")
            );
        }

        #[test]
        fn test_typing_does_not_flag_untouched_field() {
            let mut app = app();
            app.handle_key(key(KeyCode::Char('c')));
            type_str(&mut app, "J");
            assert!(!app.contact.view().has_error(FieldName::Name));
        }

        #[test]
        fn test_enter_in_single_line_field_submits() {
            let mut app = app();
            app.handle_key(key(KeyCode::Char('c')));
            type_str(&mut app, "Jo");
            app.handle_key(key(KeyCode::Enter));
            assert!(app.contact.state().is_idle());
            assert!(app.contact.view().has_error(FieldName::Email));
            assert!(app.contact.view().has_error(FieldName::Message));
            assert!(!app.contact.view().has_error(FieldName::Name));
        }

        #[test]
        fn test_enter_in_message_adds_newline() {
            let mut app = app();
            app.handle_key(key(KeyCode::Char('c')));
            app.handle_key(key(KeyCode::Tab));
            app.handle_key(key(KeyCode::Tab));
            type_str(&mut app, "hi");
            app.handle_key(key(KeyCode::Enter));
            assert_eq!(app.contact.value(FieldName::Message), "hi\n");
        }

        #[test]
        fn test_invalid_submit_shows_all_errors() {
            let mut app = app();
            app.handle_key(key(KeyCode::Char('c')));
            app.handle_key(ctrl('s'));
            assert!(app.contact.state().is_idle());
            for field in FieldName::ALL {
                assert!(app.contact.view().has_error(field));
            }
            assert!(!app.is_animating(Instant::now() + Duration::from_secs(10)));
        }

        #[test]
        fn test_ctrl_s_is_not_typed() {
            let mut app = app();
            app.handle_key(key(KeyCode::Char('c')));
            app.handle_key(ctrl('s'));
            assert_eq!(app.contact.value(FieldName::Name), "");
        }

        #[tokio::test(start_paused = true)]
        async fn test_submit_sends_then_succeeds() {
            let mut app = app();
            fill_valid_form(&mut app);
            app.handle_key(ctrl('s'));
            assert!(app.contact.state().is_submitting());
            assert!(app.contact.view().is_loading());

            // second submit while in flight is ignored
            app.handle_key(ctrl('s'));
            assert!(app.contact.state().is_submitting());

            tokio::time::sleep(Duration::from_millis(1600)).await;
            tokio::task::yield_now().await;
            app.poll_submission();

            assert!(app.contact.state().is_succeeded());
            assert!(app.contact.view().shows_success());
            assert_eq!(app.state.status_message.as_deref(), Some("Message sent"));

            app.handle_key(key(KeyCode::Enter));
            assert_eq!(app.state.current_view, View::Page);
        }

        #[tokio::test(start_paused = true)]
        async fn test_result_not_applied_before_delay() {
            let mut app = app();
            fill_valid_form(&mut app);
            app.handle_key(ctrl('s'));
            tokio::time::sleep(Duration::from_millis(500)).await;
            app.poll_submission();
            assert!(app.contact.state().is_submitting());
        }

        #[tokio::test]
        async fn test_failure_blocks_until_acknowledged() {
            let mut backend = MockSubmissionBackend::new();
            backend
                .expect_submit()
                .times(1)
                .returning(|_| Err(SubmitError::Unavailable("offline".to_string())));
            let mut app = app_with(backend);
            fill_valid_form(&mut app);
            app.handle_key(ctrl('s'));

            for _ in 0..10 {
                tokio::task::yield_now().await;
                app.poll_submission();
                if !app.contact.state().is_submitting() {
                    break;
                }
            }

            assert!(app.contact.state().is_failed());
            assert_eq!(app.contact.view().alert(), Some(SUBMIT_FAILED_ALERT));
            assert!(!app.contact.view().is_loading());

            // the alert swallows other keys
            type_str(&mut app, "xyz");
            assert_eq!(app.contact.value(FieldName::Message), "This is long enough.");

            app.handle_key(key(KeyCode::Enter));
            assert!(app.contact.state().is_idle());
            assert!(app.contact.view().alert().is_none());
            assert_eq!(app.state.current_view, View::Contact);
        }

        #[tokio::test(start_paused = true)]
        async fn test_dropped_result_counts_as_failure() {
            let mut app = app();
            fill_valid_form(&mut app);
            app.handle_key(ctrl('s'));

            let (tx, rx) = oneshot::channel();
            drop(tx);
            app.pending_submit = Some(rx);
            app.poll_submission();

            assert!(app.contact.state().is_failed());
            assert_eq!(app.state.status_message.as_deref(), Some("Message not sent"));
        }

        #[test]
        fn test_click_focuses_field() {
            let mut app = app();
            app.handle_key(key(KeyCode::Char('c')));
            let email_row = NAV_BAR_HEIGHT + 1 + 4;
            app.handle_mouse(click(10, email_row));
            assert_eq!(app.contact.active_field(), Some(FieldName::Email));
            assert!(app.contact.view().has_error(FieldName::Name));
        }

        #[test]
        fn test_click_beside_button_does_not_submit() {
            let mut app = app();
            fill_valid_form(&mut app);
            let button_row = NAV_BAR_HEIGHT + 1 + 16 + 1;
            app.handle_mouse(click(60, button_row));
            assert!(app.contact.state().is_idle());
            assert!(!app.contact.is_submit_focused());
        }

        #[tokio::test]
        async fn test_alert_over_page_blocks_page_input() {
            let mut backend = MockSubmissionBackend::new();
            backend
                .expect_submit()
                .times(1)
                .returning(|_| Err(SubmitError::Unavailable("offline".to_string())));
            let mut app = app_with(backend);
            fill_valid_form(&mut app);
            app.handle_key(ctrl('s'));
            // leave the form while the message is still in flight
            app.handle_key(key(KeyCode::Esc));
            assert_eq!(app.state.current_view, View::Page);

            for _ in 0..10 {
                tokio::task::yield_now().await;
                app.poll_submission();
                if app.contact.state().is_failed() {
                    break;
                }
            }
            assert!(app.contact.state().is_failed());

            app.handle_key(key(KeyCode::Down));
            app.handle_key(key(KeyCode::Char('2')));
            app.handle_key(key(KeyCode::Char('c')));
            app.handle_key(key(KeyCode::Char('q')));
            app.handle_mouse(MouseEvent {
                kind: MouseEventKind::ScrollDown,
                column: 5,
                row: 5,
                modifiers: KeyModifiers::NONE,
            });
            assert_eq!(app.state.page.scroll, 0);
            assert_eq!(app.scroll_target(), None);
            assert_eq!(app.state.current_view, View::Page);
            assert!(!app.should_quit());
            assert_eq!(app.contact.view().alert(), Some(SUBMIT_FAILED_ALERT));

            // Enter dismisses instead of following the selected link
            app.handle_key(key(KeyCode::Enter));
            assert!(app.contact.state().is_idle());
            assert!(app.contact.view().alert().is_none());
            assert_eq!(app.scroll_target(), None);

            app.handle_key(key(KeyCode::Down));
            assert_eq!(app.state.page.scroll, 1);
        }
    }
}
