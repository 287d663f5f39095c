//! src/main.rs
//! linkdeck: terminal link directory, plus the nginx proxy config generator.

use std::{
    io::{self, Stdout},
    panic::PanicHookInfo,
    path::{Path, PathBuf},
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{Event as TerminalEvent, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Frame, Terminal, backend::CrosstermBackend};
use tokio::{
    signal,
    sync::{Notify, mpsc},
};
use tracing::{debug, error, info, warn};

use linkdeck_core::{
    Logger,
    config::Config,
    controller::{
        action_dispatcher::{ActionDispatcher, DispatcherStats},
        actions::Action,
        event_loop::{EventLoop, MetricsSnap, TaskResult},
        keymap::map_key,
        navigator::BrowserNavigator,
    },
    model::{app_state::AppState, ui_state::GridMetrics},
    proxy::ProxySpec,
    tasks::load_task::LinkSource,
    view::ui::UIRenderer,
};

type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

const TICK_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Parser)]
#[command(
    name = "linkdeck",
    version,
    about = "Browse, filter and open a directory of links from a JSON link list"
)]
struct Cli {
    /// Link list path or http(s) URL; overrides `source` from the config file
    source: Option<String>,

    /// Config file to use instead of the platform default
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Generate an nginx reverse-proxy config for one service
    ProxyConf {
        /// A short, file-safe name for the service (e.g. peanutbase)
        #[arg(long)]
        name: String,
        /// The full target URL to proxy (e.g. https://www.peanutbase.org)
        #[arg(long)]
        url: String,
        /// The local port for nginx to listen on (e.g. 2027)
        #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
        port: u16,
        /// Directory to save the config file in
        #[arg(long, default_value = "./confs")]
        output_dir: PathBuf,
    },
}

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, config_error) = match Config::load(cli.config.as_deref()).await {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    let _log_guard =
        Logger::init_tracing(&config.logging).context("Failed to initialize logging")?;
    if let Some(e) = config_error {
        warn!("Failed to load config, using defaults: {}", e);
    }

    match cli.command {
        Some(Command::ProxyConf {
            name,
            url,
            port,
            output_dir,
        }) => run_proxy_conf(&name, &url, port, &output_dir),

        None => {
            if let Some(source) = cli.source {
                config.source = source;
            }
            setup_panic_handler();

            let app = App::new(Arc::new(config))
                .await
                .context("Failed to initialize application")?;
            app.run().await.context("Application runtime error")?;

            info!("Application exited cleanly");
            Ok(())
        }
    }
}

fn run_proxy_conf(name: &str, url: &str, port: u16, output_dir: &Path) -> Result<()> {
    let rule = "-".repeat(60);

    let spec = match ProxySpec::new(name, url, port) {
        Ok(spec) => spec,
        Err(e) => {
            println!("Error: {e}");
            return Err(anyhow!(e));
        }
    };

    if !output_dir.exists() {
        println!("{rule}");
        println!("Output directory does not exist. Creating: '{}'", output_dir.display());
        println!("{rule}");
    }

    println!("{rule}");
    println!("Generated nginx config for '{}':", spec.name());
    println!("{rule}");
    println!("{}", spec.render());
    println!("{rule}");

    match spec.write_to(output_dir) {
        Ok(path) => {
            println!("\nSuccessfully wrote configuration to: {}", path.display());
            println!("\nTo use this configuration:");
            println!("1. Move it to your nginx configuration directory:");
            println!(
                "   sudo mv {} /etc/nginx/conf.d/{}",
                path.display(),
                spec.file_name()
            );
            println!("\n2. Test and reload nginx:");
            println!("   sudo nginx -t && sudo systemctl reload nginx");
            Ok(())
        }
        Err(e) if e.is_permission_denied() => {
            println!("\nError: {e}");
            println!("Try running with sudo or choose a different --output-dir.");
            Err(anyhow!(e))
        }
        Err(e) => {
            println!("\nAn unexpected error occurred: {e}");
            Err(anyhow!(e))
        }
    }
}

struct App {
    terminal: AppTerminal,
    state: AppState,
    event_loop: EventLoop,
    action_dispatcher: ActionDispatcher<BrowserNavigator>,
    action_tx: mpsc::UnboundedSender<Action>,
    ui_renderer: UIRenderer,
    shutdown: Arc<Notify>,
}

impl App {
    async fn new(config: Arc<Config>) -> Result<Self> {
        info!("Starting linkdeck");

        let source = LinkSource::parse(&config.source).context("Invalid link list location")?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("linkdeck/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        // Create communication channels
        let (task_tx, task_rx) = mpsc::unbounded_channel::<TaskResult>();
        let (action_tx, action_rx) = mpsc::unbounded_channel::<Action>();

        let mut state = AppState::new(config);
        let mut action_dispatcher =
            ActionDispatcher::new(BrowserNavigator, source, client, task_tx);
        let event_loop = EventLoop::new(task_rx, action_rx);

        let terminal = setup_terminal().context("Failed to initialize terminal")?;

        action_dispatcher.start_load(&mut state);
        info!("Application initialized successfully");

        Ok(Self {
            terminal,
            state,
            event_loop,
            action_dispatcher,
            action_tx,
            ui_renderer: UIRenderer::new(),
            shutdown: Arc::new(Notify::new()),
        })
    }

    async fn run(mut self) -> Result<()> {
        self.setup_shutdown_handler();
        self.spawn_ticker();
        info!("Starting event loop");

        let mut event_stream: EventStream = EventStream::new();

        loop {
            self.render()?;

            tokio::select! {
                _ = self.shutdown.notified() => {
                    info!("Shutdown signal received");
                    break;
                }

                maybe_event = event_stream.next() => match maybe_event {
                    Some(Ok(terminal_event)) => {
                        if let Some(action) = self.process_terminal_event(terminal_event)
                            && !self.dispatch_action(action)
                        {
                            info!("Quit requested");
                            break;
                        }
                    }
                    Some(Err(e)) => warn!("Terminal event error: {}", e),
                    None => {
                        info!("Terminal event stream closed");
                        break;
                    }
                },

                action = self.event_loop.next_action() => match action {
                    Some(action) => {
                        if !self.dispatch_action(action) {
                            break;
                        }
                    }
                    None => break,
                },
            }
        }

        self.log_final_metrics();
        info!("Event loop terminated cleanly");
        Ok(())
    }

    fn process_terminal_event(&self, event: TerminalEvent) -> Option<Action> {
        match event {
            TerminalEvent::Key(key_event) => map_key(key_event, &self.state.ui),
            TerminalEvent::Resize(width, height) => Some(Action::Resize(width, height)),
            _ => None,
        }
    }

    fn dispatch_action(&mut self, action: Action) -> bool {
        if !matches!(action, Action::Tick) {
            debug!("Dispatching action: {:?}", action);
        }
        self.action_dispatcher.handle(&mut self.state, action)
    }

    fn render(&mut self) -> Result<()> {
        if !self.state.ui.needs_redraw() {
            return Ok(());
        }

        let start = Instant::now();
        let state = &self.state;
        let renderer = &mut self.ui_renderer;
        let mut metrics = GridMetrics::default();

        self.terminal
            .draw(|frame: &mut Frame<'_>| {
                metrics = renderer.render(frame, state);
            })
            .context("Failed to draw terminal")?;

        self.state.ui.grid = metrics;
        self.state.ui.clear_redraw();

        let duration = start.elapsed();
        if duration.as_millis() > 16 {
            warn!("Slow frame: {}ms (target: <16ms)", duration.as_millis());
        }
        Ok(())
    }

    /// Periodic `Tick` so timed notifications expire without input.
    fn spawn_ticker(&self) {
        let action_tx = self.action_tx.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK_INTERVAL);
            loop {
                interval.tick().await;
                if action_tx.send(Action::Tick).is_err() {
                    break;
                }
            }
        });
    }

    fn log_final_metrics(&self) {
        let event_loop_metrics: MetricsSnap = self.event_loop.snapshot_metrics();
        let dispatcher_stats: DispatcherStats = self.action_dispatcher.get_stats();
        let render_stats = self.ui_renderer.get_stats();

        info!("Final metrics:");
        info!("  Tasks processed: {}", event_loop_metrics.tasks);
        info!("  Actions dispatched: {}", dispatcher_stats.total_actions);
        info!("  User actions: {}", dispatcher_stats.user_actions);
        info!("  Loads started: {}", dispatcher_stats.loads_started);
        info!("  Stale results dropped: {}", dispatcher_stats.stale_results);
        info!(
            "  Frames: {} ({} slow, {:.1} fps)",
            render_stats.frames,
            render_stats.slow,
            render_stats.fps()
        );
    }

    fn setup_shutdown_handler(&self) {
        let shutdown: Arc<Notify> = self.shutdown.clone();

        tokio::spawn(async move {
            #[cfg(unix)]
            {
                use tokio::signal::unix::{SignalKind, signal};

                match (
                    signal(SignalKind::terminate()),
                    signal(SignalKind::hangup()),
                ) {
                    (Ok(mut sigterm), Ok(mut sighup)) => {
                        tokio::select! {
                            _ = sigterm.recv() => info!("Received SIGTERM"),
                            _ = sighup.recv() => info!("Received SIGHUP"),
                            _ = signal::ctrl_c() => info!("Received Ctrl+C"),
                        }
                    }
                    _ => {
                        warn!("Failed to install signal handlers");
                        return;
                    }
                }
            }

            #[cfg(not(unix))]
            {
                if let Err(e) = signal::ctrl_c().await {
                    warn!("Failed to listen for Ctrl+C: {}", e);
                    return;
                }
                info!("Received Ctrl+C");
            }

            shutdown.notify_one();
        });
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Err(e) = cleanup_terminal(&mut self.terminal) {
            warn!("Failed to cleanup terminal: {}", e);
        }
    }
}

fn setup_terminal() -> Result<AppTerminal> {
    enable_raw_mode().context("Failed to enable raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    info!("Terminal setup complete");
    Ok(terminal)
}

fn cleanup_terminal(terminal: &mut AppTerminal) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    info!("Terminal cleanup complete");
    Ok(())
}

fn setup_panic_handler() {
    let original_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info: &PanicHookInfo<'_>| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);

        error!("Application panicked: {}", panic_info);
        original_hook(panic_info);
    }));
}
