use fleetdash::adapters::ReqwestHttpClient;
use fleetdash::app::App;
use fleetdash::cli::Args;
use fleetdash::config::DashConfig;
use fleetdash::headless::run_once;
use fleetdash::logging::{default_log_path, init_logging, LogTarget};
use fleetdash::terminal::{setup_panic_hook, TerminalManager};
use fleetdash::traits::HttpClient;
use fleetdash::ui;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use ratatui::Terminal;
use std::io;
use std::sync::Arc;

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let config = args.apply(DashConfig::load(args.config.as_deref())?)?;
    config.validate()?;

    let log_target = if args.once {
        LogTarget::Stderr
    } else {
        LogTarget::File(config.log_file.clone().unwrap_or_else(default_log_path))
    };
    init_logging(&log_target)?;

    let client = match config.http_timeout {
        Some(timeout) => ReqwestHttpClient::with_timeout(timeout)?,
        None => ReqwestHttpClient::new(),
    };
    let client: Arc<dyn HttpClient> = Arc::new(client);

    let runtime = tokio::runtime::Runtime::new()?;

    if args.once {
        let mut stdout = io::stdout().lock();
        let summary = runtime.block_on(run_once(&config, client.as_ref(), &mut stdout))?;
        if !summary.is_success() {
            return Err(eyre!(
                "{} of {} screens failed to fetch",
                summary.failures.len(),
                config.screens.len()
            ));
        }
        return Ok(());
    }

    setup_panic_hook();

    runtime.block_on(async {
        let mut app = App::start(&config, client)?;
        let mut manager = TerminalManager::new()?;

        let result = run_app(manager.terminal(), &mut app).await;

        app.shutdown();
        manager.restore()?;
        result
    })
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();
    let mut poll_rx = app
        .take_poll_events()
        .ok_or_else(|| eyre!("poll event receiver already taken"))?;

    loop {
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, app))?;
            app.needs_redraw = false;
        }
        if app.should_quit {
            return Ok(());
        }

        tokio::select! {
            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(Event::Key(key))) => app.handle_key(key),
                    Some(Ok(Event::Resize(_, _))) => app.needs_redraw = true,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::error!(error = %e, "Terminal event stream failed");
                        return Err(e.into());
                    }
                    None => return Ok(()),
                }
            }

            Some(event) = poll_rx.recv() => {
                app.handle_poll_event(event);
            }
        }
    }
}
