use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{info, warn};

use novapage_core::form::Submission;
use novapage_core::{FormTransport, HttpTransport, Millis, PageConfig};
use novapage_tui::{
    event::{AppEvent, EventHandler, SubmitOutcome},
    input::{handle_key_event, handle_mouse_event},
    load_theme, ui, App, Manifest, Theme,
};

pub async fn run(config: PageConfig, manifest_path: &Path) -> Result<()> {
    let built = Manifest::load(manifest_path)?.build()?;
    info!(manifest = %manifest_path.display(), title = %built.title, "Opening preview");

    let transport = Arc::new(HttpTransport::new(&config.form)?);
    let theme = load_theme(&config.ui.theme);
    let events = EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.smooth_scroll.animation_fps);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle(&built.title))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let mut app = App::new(built, config, size.width, size.height, &mut rand::rng());

    let result = run_app(&mut terminal, &mut app, &events, transport, &theme).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: &EventHandler,
    transport: Arc<HttpTransport>,
    theme: &Theme,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<SubmitOutcome>();
    let started = Instant::now();

    loop {
        // Drain finished submissions
        while let Ok(SubmitOutcome(result)) = rx.try_recv() {
            app.finish_submission(result);
        }

        app.tick(started.elapsed().as_millis() as Millis);
        terminal.draw(|frame| ui::draw(frame, app, theme))?;

        let event = if app.needs_fast_update() {
            events.next_animation()?
        } else {
            events.next()?
        };

        let submission = match event {
            Some(AppEvent::Key(key)) => {
                let action = handle_key_event(key, app);
                app.handle_action(action)
            }
            Some(AppEvent::Mouse(mouse)) => handle_mouse_event(mouse, app),
            Some(AppEvent::Resize(width, height)) => {
                app.resize(width, height);
                None
            }
            Some(AppEvent::Tick) | None => None,
        };

        if let Some(submission) = submission {
            spawn_submission(Arc::clone(&transport), submission, tx.clone());
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Send the form off the UI thread; the outcome comes back over `tx`
fn spawn_submission(
    transport: Arc<HttpTransport>,
    submission: Submission,
    tx: mpsc::UnboundedSender<SubmitOutcome>,
) {
    info!(endpoint = %submission.endpoint, "Submitting contact form");
    tokio::spawn(async move {
        let result = transport.post(&submission.endpoint, &submission.fields).await;
        if let Err(e) = &result {
            warn!(error = %e, "Form request failed");
        }
        let _ = tx.send(SubmitOutcome(result));
    });
}
