use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction as LayoutDirection, Layout},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use cinerow_core::carousel::Direction;
use cinerow_core::{catalog, AppConfig, CatalogSource};
use cinerow_tui::{
    app::{poster_size, resolve_layout, App, Mode},
    event::{AppEvent, EventHandler, ImageLoadResult, PageLoadResult},
    images::{http_client, spawn_poster_load, PosterCache, PosterRequest},
    input::{handle_key_event, handle_mouse_event, Action},
    keymap::Keymap,
    load_theme,
    widgets::{PageWidget, PopupWidget, StatusBarWidget},
};

pub async fn run(config: Arc<AppConfig>) -> Result<()> {
    // Create keymap from config
    let keymap = Keymap::from_config(&config.keymap);

    let source = catalog::from_config(&config)?;
    let client = http_client()?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("Cinerow"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let theme = load_theme(&config.ui.theme);
    let mut app = App::new(config.clone(), theme);
    app.layout = resolve_layout(config.ui.layout, true);
    app.posters = PosterCache::new(poster_size(&config), Some(config.poster_cache_dir()));

    let result = event_loop(&mut terminal, &mut app, &keymap, source, &client).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Some(title) = &app.now_playing {
        info!("Last played: {}", title);
    }
    result
}

async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    keymap: &Keymap,
    source: Arc<dyn CatalogSource>,
    client: &reqwest::Client,
) -> Result<()> {
    let event_handler = EventHandler::with_animation_fps(
        app.config.ui.tick_rate_ms,
        app.config.ui.scroll.animation_fps,
    );

    // Channels for async page and poster results
    let (page_tx, mut page_rx) = mpsc::unbounded_channel::<PageLoadResult>();
    let (img_tx, mut img_rx) = mpsc::unbounded_channel::<ImageLoadResult>();

    resize_to_terminal(terminal, app)?;
    let generation = app.begin_reload();
    spawn_page_load(source.clone(), generation, page_tx.clone());

    if app.config.ui.image_preview {
        request_placeholder(app, client, &img_tx);
    }

    // Checked at the end of each iteration to pick the next poll rate
    let mut needs_fast_update = false;

    loop {
        // Process a finished page fetch (non-blocking)
        while let Ok(load) = page_rx.try_recv() {
            if app.finish_load(load, Instant::now()) {
                // The hero changes how many rows fit
                resize_to_terminal(terminal, app)?;
            }
        }

        // Process any completed poster loads (non-blocking)
        while let Ok(result) = img_rx.try_recv() {
            handle_image_result(app, result);
        }

        request_posters(app, client, &img_tx);

        let now = Instant::now();
        app.tick(now);
        terminal.draw(|frame| draw(frame, app, now))?;

        // Handle events (faster polling while something animates)
        let event = if needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app, keymap);
                    handle_action(app, action, &source, &page_tx);
                }
                AppEvent::Mouse(mouse) => {
                    let action = handle_mouse_event(mouse, app);
                    handle_action(app, action, &source, &page_tx);
                }
                AppEvent::Resize(width, height) => {
                    app.resize(width, height.saturating_sub(1));
                }
                AppEvent::Tick => {
                    app.tick_spinner();
                }
            }
        }

        needs_fast_update = app.tick(Instant::now());

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame, app: &mut App, now: Instant) {
    // Main layout: page + status bar
    let main_layout = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.area());

    PageWidget::render(frame, main_layout[0], app, now);
    StatusBarWidget::render(frame, main_layout[1], app);

    if app.mode == Mode::Help {
        PopupWidget::render_help(frame, &app.config.keymap, &app.theme);
    }
}

fn resize_to_terminal<B: Backend>(terminal: &Terminal<B>, app: &mut App) -> Result<()> {
    let size = terminal.size()?;
    // Last line belongs to the status bar
    app.resize(size.width, size.height.saturating_sub(1));
    Ok(())
}

/// Fetch the page on a tokio task, tagged with its load generation
fn spawn_page_load(
    source: Arc<dyn CatalogSource>,
    generation: u64,
    tx: mpsc::UnboundedSender<PageLoadResult>,
) {
    info!(
        "Fetching page from the {} catalog (generation {})",
        source.name(),
        generation
    );
    tokio::spawn(async move {
        let result = source.fetch_page().await;
        // Receiver is gone once the UI has exited
        let _ = tx.send(PageLoadResult { generation, result });
    });
}

/// Start loads for posters the mounted rows are about to show
fn request_posters(
    app: &mut App,
    client: &reqwest::Client,
    tx: &mpsc::UnboundedSender<ImageLoadResult>,
) {
    for ticket in app.poster_requests() {
        match app.posters.request(ticket.clone()) {
            PosterRequest::Cached(outcome) => {
                app.apply_poster(&ticket, outcome);
            }
            PosterRequest::Spawn => spawn_poster_load(
                client.clone(),
                ticket.url,
                app.posters.size(),
                app.posters.disk().cloned(),
                tx.clone(),
            ),
            PosterRequest::Pending => {}
        }
    }
}

/// Failed posters fall back to this image
fn request_placeholder(
    app: &mut App,
    client: &reqwest::Client,
    tx: &mpsc::UnboundedSender<ImageLoadResult>,
) {
    let url = app.placeholder_url().to_string();
    if url.is_empty() {
        return;
    }
    if app.posters.request_url(&url) == PosterRequest::Spawn {
        spawn_poster_load(
            client.clone(),
            url,
            app.posters.size(),
            app.posters.disk().cloned(),
            tx.clone(),
        );
    }
}

/// Handle completed poster load result
fn handle_image_result(app: &mut App, result: ImageLoadResult) {
    for (ticket, outcome) in app.posters.complete(result) {
        if !app.apply_poster(&ticket, outcome) {
            debug!(
                "Dropped stale poster for {}/{} (epoch {})",
                ticket.row_id, ticket.item_id, ticket.epoch
            );
        }
    }
}

fn handle_action(
    app: &mut App,
    action: Action,
    source: &Arc<dyn CatalogSource>,
    page_tx: &mpsc::UnboundedSender<PageLoadResult>,
) {
    // Clear pending key on any action except PendingG
    if action != Action::PendingG {
        app.clear_pending_key();
    }

    // Keyboard navigation dismisses the last status message
    if matches!(
        action,
        Action::CardLeft
            | Action::CardRight
            | Action::RowUp
            | Action::RowDown
            | Action::ScrollLeft
            | Action::ScrollRight
            | Action::FirstRow
            | Action::LastRow
    ) {
        app.clear_status();
    }

    let now = Instant::now();
    match action {
        Action::Quit => {
            app.should_quit = true;
        }
        Action::CardLeft => app.move_card(Direction::Left, now),
        Action::CardRight => app.move_card(Direction::Right, now),
        Action::RowUp => app.move_row(-1, now),
        Action::RowDown => app.move_row(1, now),
        Action::ScrollLeft => {
            app.scroll_focused(Direction::Left, now);
        }
        Action::ScrollRight => {
            app.scroll_focused(Direction::Right, now);
        }
        Action::FirstRow => app.first_row(now),
        Action::LastRow => app.last_row(now),
        Action::PendingG => {
            app.pending_key = Some('g');
        }
        Action::Select => {
            app.select_focused();
        }
        Action::Reload => {
            let generation = app.begin_reload();
            app.set_status("Reloading...");
            spawn_page_load(source.clone(), generation, page_tx.clone());
        }
        Action::Refresh => {
            let generation = app.begin_refresh();
            app.set_status("Refreshing...");
            spawn_page_load(source.clone(), generation, page_tx.clone());
        }
        Action::ToggleLayout => app.toggle_layout(),
        Action::Help => {
            app.mode = Mode::Help;
        }
        Action::ExitMode => {
            app.mode = Mode::Normal;
        }
        Action::Hover(target) => app.hover(target.as_ref()),
        Action::Click(target) => {
            app.click(&target, now);
        }
        Action::Wheel(target, direction) => {
            app.wheel(&target, direction, now);
        }
        Action::None => {}
    }
}
