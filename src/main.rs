// ============================================================================
// StockDash - Dashboard financier mono-page dans le terminal
// ============================================================================
// Sélectionner un ticker charge 3 mois d'historique journalier (Yahoo
// Finance, avec repli sur un snapshot CSV local) et remplace d'un bloc les
// six régions du dashboard : titre, figure prix, figure bande, box-plot
// volume, recommandation BUY/SELL et tableau. Une horloge UTC se rafraîchit
// sur une cadence fixe
//
// ARCHITECTURE :
// 1. Event loop synchrone (TUI) + worker thread avec runtime tokio (API)
// 2. Communication par channels mpsc, jeton de séquence par requête
// 3. RAII : restauration du terminal même en cas d'erreur
// ============================================================================

use std::io;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Utc;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info};

use stockdash::api;
use stockdash::app::{App, CLOCK_PERIOD_SECS};
use stockdash::models::RenderPayload;
use stockdash::ui::{render, Event, EventHandler};

/// Répertoire des snapshots CSV de repli (un fichier par ticker)
const SNAPSHOT_DIR: &str = "data";

// ============================================================================
// Commandes et résultats du worker thread
// ============================================================================
// L'event loop envoie des commandes, le worker exécute les fetch async et
// renvoie les résultats. Chaque commande porte le jeton de séquence de son
// cycle : l'App jette tout résultat périmé (last-request-wins)
// ============================================================================

/// Commandes envoyées au worker thread
#[derive(Debug, Clone)]
enum AppCommand {
    /// Charger l'historique d'un ticker et construire son payload
    LoadTicker { symbol: String, seq: u64 },
}

/// Résultats renvoyés par le worker thread
#[derive(Debug)]
enum AppResult {
    /// Cycle réussi : payload complet prêt à appliquer
    PayloadReady { seq: u64, payload: Box<RenderPayload> },

    /// Cycle en échec : fetch live ET snapshot indisponibles
    LoadFailed { seq: u64, symbol: String, error: String },
}

// ============================================================================
// Initialisation du logging
// ============================================================================

/// Initialise le logging vers fichier (rotation quotidienne)
///
/// Les println! sont perdus une fois le TUI lancé : tout passe par tracing.
/// Niveau contrôlé par RUST_LOG (défaut : debug pour stockdash, info ailleurs).
fn init_logging() -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // ~/.local/share/stockdash/logs sous Linux, équivalents macOS/Windows
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stockdash")
        .join("logs");
    std::fs::create_dir_all(&log_dir).context("failed to create log directory")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir.clone(), "stockdash.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stockdash=debug,info".into()),
        )
        .init();

    info!(?log_dir, "Logging initialized");
    Ok(())
}

// ============================================================================
// Point d'entrée
// ============================================================================

fn main() -> Result<()> {
    init_logging().unwrap_or_else(|e| {
        eprintln!("Warning: failed to initialize logging: {}", e);
    });

    info!("StockDash starting up");

    let mut terminal = setup_terminal()?;
    let mut app = App::new();

    let (command_tx, command_rx) = mpsc::channel::<AppCommand>();
    let (result_tx, result_rx) = mpsc::channel::<AppResult>();

    info!("Spawning background worker thread");
    spawn_background_worker(command_rx, result_tx);

    // Premier cycle : charge le ticker par défaut (AMZN)
    request_selected_ticker(&mut app, &command_tx);

    let events = EventHandler::new();
    info!("Starting event loop");
    let result = run(&mut terminal, &mut app, &events, command_tx, result_rx);

    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Worker thread : fetch async hors de l'event loop
// ============================================================================

/// Worker thread : reçoit les commandes, exécute les fetch, renvoie les payloads
fn spawn_background_worker(command_rx: mpsc::Receiver<AppCommand>, result_tx: mpsc::Sender<AppResult>) {
    std::thread::spawn(move || {
        // Runtime tokio local au thread : block_on bloque le worker, pas l'UI
        let runtime = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                error!(error = ?e, "Failed to create tokio runtime, worker exiting");
                return;
            }
        };

        let snapshot_dir = PathBuf::from(SNAPSHOT_DIR);

        loop {
            match command_rx.recv() {
                Ok(AppCommand::LoadTicker { symbol, seq }) => {
                    info!(ticker = %symbol, seq, "Worker loading ticker");

                    let loaded = runtime
                        .block_on(api::load_price_series(&symbol, &snapshot_dir))
                        .and_then(|series| RenderPayload::build(&series));

                    let message = match loaded {
                        Ok(payload) => {
                            info!(ticker = %symbol, seq, "Payload ready");
                            AppResult::PayloadReady { seq, payload: Box::new(payload) }
                        }
                        Err(e) => {
                            error!(ticker = %symbol, seq, error = ?e, "Load cycle failed");
                            AppResult::LoadFailed {
                                seq,
                                symbol: symbol.clone(),
                                error: format!("{:#}", e),
                            }
                        }
                    };

                    if result_tx.send(message).is_err() {
                        break; // UI partie, plus personne n'écoute
                    }
                }
                Err(_) => {
                    info!("Worker thread exiting (channel closed)");
                    break;
                }
            }
        }
    });
}

/// Déclenche un cycle de chargement pour le ticker sélectionné
///
/// Sélection vide : no-op, le rendu précédent persiste (pas de commande).
fn request_selected_ticker(app: &mut App, command_tx: &mpsc::Sender<AppCommand>) {
    let Some(symbol) = app.selected_symbol() else {
        debug!("No ticker selected, skipping update");
        return;
    };

    let seq = app.begin_request();
    info!(ticker = %symbol, seq, "Ticker selection changed");
    let _ = command_tx.send(AppCommand::LoadTicker {
        symbol: symbol.to_string(),
        seq,
    });
}

// ============================================================================
// Event loop principal : résultats → rendu → input → horloge
// ============================================================================

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
    command_tx: mpsc::Sender<AppCommand>,
    result_rx: mpsc::Receiver<AppResult>,
) -> Result<()> {
    let clock_period = Duration::from_secs(CLOCK_PERIOD_SECS);
    let mut last_clock_tick = Instant::now();

    while app.is_running() {
        // 1. RÉSULTATS : applique les payloads du worker (péremption gérée
        //    par App via le jeton de séquence)
        match result_rx.try_recv() {
            Ok(AppResult::PayloadReady { seq, payload }) => {
                app.apply_payload(seq, *payload);
            }
            Ok(AppResult::LoadFailed { seq, symbol, error }) => {
                error!(ticker = %symbol, error = %error, "Applying failed cycle");
                app.apply_load_error(seq, error);
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => {
                error!("Worker thread disconnected");
            }
        }

        // 2. HORLOGE : cadence fixe, ne touche que la région horloge
        if last_clock_tick.elapsed() >= clock_period {
            app.update_clock(Utc::now());
            last_clock_tick = Instant::now();
        }

        // 3. RENDER
        terminal.draw(|frame| render(frame, app))?;

        // 4. INPUT
        if let Ok(event) = events.next() {
            handle_event(app, event, &command_tx);
        }
    }

    Ok(())
}

/// Traite un événement et met à jour l'état
fn handle_event(app: &mut App, event: Event, command_tx: &mpsc::Sender<AppCommand>) {
    use stockdash::ui::events::{
        is_next_ticker_event, is_previous_ticker_event, is_quit_event, is_refresh_event,
    };

    match event {
        Event::Key(_) if is_quit_event(&event) => {
            // Two-step quit : première pression demande confirmation
            if app.is_awaiting_quit_confirmation() {
                info!("User confirmed quit");
                app.quit();
            } else {
                info!("User requested quit (awaiting confirmation)");
                app.request_quit();
            }
        }

        Event::Key(_) if is_next_ticker_event(&event) => {
            app.cancel_quit();
            app.select_next();
            request_selected_ticker(app, command_tx);
        }

        Event::Key(_) if is_previous_ticker_event(&event) => {
            app.cancel_quit();
            app.select_previous();
            request_selected_ticker(app, command_tx);
        }

        Event::Key(_) if is_refresh_event(&event) => {
            app.cancel_quit();
            request_selected_ticker(app, command_tx);
        }

        Event::Key(_) => {
            // Toute autre touche annule la confirmation de quit
            app.cancel_quit();
        }

        Event::Tick => {}
    }
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================

/// Configure le terminal en mode TUI (raw mode + alternate screen)
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

/// Restaure le terminal à son état normal (même en cas d'erreur)
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}
