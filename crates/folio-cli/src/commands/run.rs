use std::io::{self, Stdout};
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use folio_core::AppConfig;
use folio_tui::{
    app::{App, Mode},
    event::{AppEvent, EventHandler, RefreshResult},
    input::{handle_key_event, handle_mouse_event, Action},
    keymap::Keymap,
    load_theme,
    widgets::{PopupWidget, ScrollViewWidget, StatusBarWidget},
};

pub async fn run(config: Arc<AppConfig>) -> Result<()> {
    // Create keymap from config
    let keymap = Keymap::from_config(&config.keymap);

    // Load theme from config
    let theme = load_theme(&config.ui.theme);

    // Create app state before touching the terminal so errors print normally
    let mut app = App::new(config.clone(), theme)?;
    info!(tabs = app.sync.tab_count(), "starting profile screen");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("Folio"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app, &keymap).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    keymap: &Keymap,
) -> Result<()> {
    // Create event handler with animation FPS support
    let event_handler = EventHandler::with_animation_fps(
        app.config.ui.tick_rate_ms,
        app.config.ui.scroll.animation_fps,
    );

    // Create channel for async refresh results
    let (refresh_tx, mut refresh_rx) = mpsc::unbounded_channel::<RefreshResult>();

    // Track if we need high frame rate for animations
    // This is checked at the END of each iteration to determine NEXT iteration's tick rate
    let mut needs_fast_update = false;

    // Main loop
    loop {
        // Process any completed refresh operations (non-blocking)
        while let Ok(result) = refresh_rx.try_recv() {
            app.finish_refresh(result);
        }

        // Advance indicator, pager and scroll animations
        app.update();

        // Draw UI
        terminal.draw(|frame| {
            let size = frame.area();
            app.measure(size);

            // Main layout: content + status bar
            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(size);

            ScrollViewWidget::render(frame, main_layout[0], app);
            StatusBarWidget::render(frame, main_layout[1], app);

            if app.mode == Mode::Help {
                PopupWidget::render_help(frame, &app.config.keymap, &app.theme);
            }
        })?;

        // Handle events (use faster tick rate during animations)
        let event = if needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app, keymap);
                    handle_action(app, action, &refresh_tx);
                }
                AppEvent::Mouse(mouse) => {
                    let action = handle_mouse_event(mouse, app);
                    handle_action(app, action, &refresh_tx);
                }
                AppEvent::Resize(width, height) => {
                    // Measured again on the next draw
                    debug!(width, height, "terminal resized");
                }
                AppEvent::Tick => {
                    // Tick spinner animation for loading indicator
                    app.tick_spinner();
                }
            }
        }

        // Update fast update flag for next iteration
        needs_fast_update = app.needs_fast_update();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_action(app: &mut App, action: Action, refresh_tx: &mpsc::UnboundedSender<RefreshResult>) {
    // Any action other than the first 'g' ends a pending sequence
    if action != Action::PendingG {
        app.clear_pending_key();
    }

    match action {
        Action::Quit => app.should_quit = true,
        Action::NextTab => app.next_tab(),
        Action::PrevTab => app.prev_tab(),
        Action::SelectTab(index) => app.select_tab(index),
        Action::SwipeNext => app.swipe(1),
        Action::SwipePrev => app.swipe(-1),
        Action::BeginDrag(column) => app.begin_drag(column),
        Action::DragTo(column) => app.drag_to(column),
        Action::EndDrag => app.end_drag(),
        Action::ScrollDown => app.scroll_down(),
        Action::ScrollUp => {
            // Scrolling up at the very top pulls to refresh
            if app.scroll_up() {
                spawn_refresh(app, refresh_tx);
            }
        }
        Action::ScrollHalfPageDown => app.scroll_half_page_down(),
        Action::ScrollHalfPageUp => app.scroll_half_page_up(),
        Action::ScrollPageDown => app.scroll_page_down(),
        Action::ScrollPageUp => app.scroll_page_up(),
        Action::JumpToTop => app.jump_to_top(),
        Action::JumpToBottom => app.jump_to_bottom(),
        Action::PendingG => app.pending_key = Some('g'),
        Action::HighlightsLeft => app.highlights_left(),
        Action::HighlightsRight => app.highlights_right(),
        Action::Refresh => spawn_refresh(app, refresh_tx),
        Action::ToggleHelp => app.toggle_help(),
        Action::ExitMode => app.exit_mode(),
        Action::None => {}
    }
}

/// Spawn refresh as background task; the result comes back over the channel
fn spawn_refresh(app: &mut App, refresh_tx: &mpsc::UnboundedSender<RefreshResult>) {
    let Some(future) = app.start_refresh() else {
        // A refresh is already running; the spinner is already showing
        debug!("refresh requested while one is running");
        return;
    };

    let tx = refresh_tx.clone();
    tokio::spawn(async move {
        let outcome = future.await;
        let _ = tx.send(RefreshResult::from_outcome(outcome));
    });
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use folio_tui::Theme;
    use ratatui::layout::Rect;

    use super::*;

    fn app() -> App {
        let mut app = App::new(Arc::new(AppConfig::default()), Theme::default()).unwrap();
        app.measure(Rect::new(0, 0, 60, 31));
        app
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_refresh_is_silent() {
        let mut app = app();
        let (tx, mut rx) = mpsc::unbounded_channel();

        handle_action(&mut app, Action::Refresh, &tx);
        handle_action(&mut app, Action::Refresh, &tx);
        assert!(app.is_refreshing());
        assert_eq!(app.status_message, None);

        // Paused clock skips the refresh delay
        let result = rx.recv().await.unwrap();
        app.finish_refresh(result);
        assert!(!app.is_refreshing());
        assert_eq!(app.status_message, None);
        assert!(app.last_refreshed.is_some());

        // Only one refresh was spawned
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pull_spawns_refresh() {
        let mut app = app();
        let (tx, mut rx) = mpsc::unbounded_channel();

        for _ in 0..app.config.refresh.pull_threshold {
            handle_action(&mut app, Action::ScrollUp, &tx);
        }
        assert!(app.is_refreshing());

        app.finish_refresh(rx.recv().await.unwrap());
        assert!(!app.is_refreshing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_interaction_continues_during_refresh() {
        let mut app = app();
        let (tx, mut rx) = mpsc::unbounded_channel();
        handle_action(&mut app, Action::Refresh, &tx);

        handle_action(&mut app, Action::SelectTab(2), &tx);
        assert_eq!(app.active_index(), 2);
        let now = Instant::now();
        app.update_at(now + Duration::from_secs(1));

        handle_action(&mut app, Action::SwipePrev, &tx);
        handle_action(&mut app, Action::ScrollPageDown, &tx);
        app.update_at(now + Duration::from_secs(2));
        app.update_at(now + Duration::from_secs(3));
        assert_eq!(app.active_index(), 1);
        assert!(app.scroller.scroll() > 0);
        assert!(app.is_refreshing());

        app.finish_refresh(rx.recv().await.unwrap());
        assert!(!app.is_refreshing());
        assert_eq!(app.active_index(), 1);
    }

    #[test]
    fn test_pending_g_sequence() {
        let mut app = app();
        let (tx, _rx) = mpsc::unbounded_channel();
        handle_action(&mut app, Action::PendingG, &tx);
        assert_eq!(app.pending_key, Some('g'));
        handle_action(&mut app, Action::JumpToTop, &tx);
        assert_eq!(app.pending_key, None);
        handle_action(&mut app, Action::Quit, &tx);
        assert!(app.should_quit);
    }
}
