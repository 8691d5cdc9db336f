// ============================================================================
// StockView - Graphique de prix et journal de transactions
// ============================================================================
// Deux modes :
// - TUI (par défaut) : graphique prix / high / low / SMA / transactions,
//   bascule de devise, journal et formulaire de saisie
// - `render` : affiche la série rendue en JSON sur stdout
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop : boucle qui gère événements et rendering
// 3. clap derive : arguments de ligne de commande typés
// 4. Restauration du terminal même en cas d'erreur
// ============================================================================

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info};

use stockview::app::{log_action, App};
use stockview::config::AppConfig;
use stockview::data::{seed_transactions, series_for};
use stockview::models::{Currency, Timeframe};
use stockview::series::{transform, DisplayOptions};
use stockview::ui::{events::EventHandler, render};

// ============================================================================
// Ligne de commande
// ============================================================================

#[derive(Parser)]
#[command(
    name = "stockview",
    version,
    about = "Graphique de prix d'exemple et journal de transactions dans le terminal"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Lance l'interface TUI (par défaut)
    Tui,
    /// Affiche la série rendue en JSON
    Render(RenderArgs),
}

#[derive(Args)]
struct RenderArgs {
    /// Ticker (repli sur NVDA / 1 Month si inconnu)
    #[arg(long, default_value = "NVDA")]
    symbol: String,

    /// Période : "1 Hour", "1 Day", "1 Month", "1 Year", "5 Years"
    #[arg(long)]
    timeframe: Option<Timeframe>,

    /// Devise d'affichage : USD ou AUD
    #[arg(long, default_value = "USD")]
    currency: Currency,

    /// Fenêtre de la moyenne mobile
    #[arg(long)]
    window: Option<usize>,

    /// JSON indenté
    #[arg(long)]
    pretty: bool,
}

// ============================================================================
// Initialisation du logging
// ============================================================================
// CONCEPT : Logging dans une app TUI
// - Les println! ne fonctionnent pas une fois le TUI lancé
// - On log vers un fichier à la place, avec rotation quotidienne
// ============================================================================

/// Initialise le système de logging vers fichier
///
/// # Utilisation
/// ```bash
/// # Voir les logs en temps réel
/// tail -f ./logs/stockview.log.*
///
/// # Contrôler le niveau de log
/// RUST_LOG=stockview=trace cargo run
/// ```
fn init_logging(log_dir: &Path) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    std::fs::create_dir_all(log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "stockview.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false) // Pas de codes couleur dans le fichier
                .with_target(true)
                .with_line_number(true),
        )
        .with(
            // Par défaut : debug pour stockview, info pour les dépendances
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stockview=debug,info".into()),
        )
        .init();

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_env();

    // Si init échoue, on affiche l'erreur et on continue quand même
    init_logging(&config.log_dir).unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    debug!(?config, "Configuration loaded");

    match cli.command {
        Some(Command::Render(args)) => {
            let json = render_json(&config, &args)?;
            println!("{}", json);
            Ok(())
        }
        Some(Command::Tui) | None => run_tui(&config),
    }
}

// ============================================================================
// Commande `render` : série rendue en JSON
// ============================================================================

/// Construit la série rendue et la sérialise en JSON
fn render_json(config: &AppConfig, args: &RenderArgs) -> Result<String> {
    let timeframe = args.timeframe.unwrap_or(config.timeframe);
    let window = args.window.unwrap_or(config.moving_average_window);

    // Même symbole pour la recherche de la série et le filtre des transactions
    let symbol = args.symbol.trim().to_uppercase();

    let series = series_for(&symbol, timeframe);
    let options = DisplayOptions::new(args.currency.multiplier(config.aud_rate), window);
    let transactions = seed_transactions();

    let rendered = transform(&series.points, &options, &transactions, &symbol)
        .with_context(|| format!("Échec du rendu de {} / {}", symbol, timeframe))?;

    info!(
        ticker = %symbol,
        timeframe = %timeframe.label(),
        points = rendered.len(),
        "Rendered series to JSON"
    );

    let json = if args.pretty {
        serde_json::to_string_pretty(&rendered)
    } else {
        serde_json::to_string(&rendered)
    };
    json.context("Échec de la sérialisation JSON")
}

// ============================================================================
// Mode TUI
// ============================================================================

fn run_tui(config: &AppConfig) -> Result<()> {
    info!("StockView starting up");

    let mut app = App::new(config);

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    let events = EventHandler::new();

    info!("Starting event loop");
    let result = run(&mut terminal, &mut app, &events);

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Event Loop Principal
// ============================================================================
// À chaque itération :
//   1. Dessiner l'interface (render)
//   2. Traiter les événements (input)
//   3. Mettre à jour l'état (update)
// ============================================================================

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    while app.is_running() {
        terminal.draw(|frame| render(frame, app))?;

        match events.next() {
            Ok(event) => handle_event(app, event),
            Err(e) => error!(error = ?e, "Failed to read terminal event"),
        }

        app.tick();
    }

    Ok(())
}

// ============================================================================
// Gestion des événements
// ============================================================================

/// Traite un événement et met à jour l'état de l'application
///
/// CONCEPT RUST : Pattern matching avec guards
/// - Le mode saisie capture toutes les touches (q compris)
/// - Hors saisie, navigation contextuelle selon l'écran actuel
fn handle_event(app: &mut App, event: stockview::ui::events::Event) {
    use stockview::ui::events::{
        get_char_from_event, is_add_event, is_backspace_event, is_backtab_event,
        is_currency_event, is_down_event, is_enter_event, is_entry_char_event, is_escape_event,
        is_next_timeframe_event, is_previous_timeframe_event, is_quit_event, is_tab_event,
        is_up_event, Event,
    };

    if matches!(event, Event::Tick) {
        return;
    }

    // ========================================
    // Mode saisie : formulaire de transaction
    // ========================================
    if app.is_in_entry_mode() {
        match event {
            _ if is_escape_event(&event) => {
                info!("User cancelled transaction entry");
                app.cancel_entry();
            }
            _ if is_enter_event(&event) => {
                // L'erreur est déjà ajoutée au journal et affichée par App
                if let Err(e) = app.submit_entry() {
                    debug!(error = %e, "Transaction entry kept open");
                }
            }
            _ if is_tab_event(&event) => app.next_field(),
            _ if is_backtab_event(&event) => app.previous_field(),
            _ if is_backspace_event(&event) => app.backspace(),
            _ if is_entry_char_event(&event) => {
                if let Some(c) = get_char_from_event(&event) {
                    app.append_char(c);
                }
            }
            _ => {}
        }
        return;
    }

    // ========================================
    // Two-step quit
    // ========================================
    if is_quit_event(&event) {
        if app.is_awaiting_quit_confirmation() {
            info!("User confirmed quit");
            app.quit();
        } else {
            info!("User requested quit (awaiting confirmation)");
            app.request_quit();
        }
        return;
    }

    // Toute autre touche annule la confirmation de quit
    app.cancel_quit();

    match event {
        _ if is_up_event(&event) => {
            app.navigate_up();
            log_action("previous ticker", app);
        }
        _ if is_down_event(&event) => {
            app.navigate_down();
            log_action("next ticker", app);
        }
        _ if is_next_timeframe_event(&event) => {
            app.next_timeframe();
            log_action("next timeframe", app);
        }
        _ if is_previous_timeframe_event(&event) => {
            app.previous_timeframe();
            log_action("previous timeframe", app);
        }
        _ if is_currency_event(&event) => {
            app.toggle_currency();
            log_action("toggle currency", app);
        }
        _ if is_tab_event(&event) => {
            app.toggle_view();
            log_action("toggle view", app);
        }
        _ if is_escape_event(&event) && app.is_on_ledger() => {
            app.show_chart();
            log_action("back to chart", app);
        }
        _ if is_add_event(&event) => {
            app.start_entry();
            log_action("open transaction entry", app);
        }
        _ => {}
    }
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================
// IMPORTANT : Toujours restaurer le terminal avant de quitter !
// ============================================================================

/// Configure le terminal en mode TUI
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Échec de l'activation du raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

/// Restaure le terminal à son état normal
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn render_args(symbol: &str, currency: Currency, window: Option<usize>) -> RenderArgs {
        RenderArgs {
            symbol: symbol.to_string(),
            timeframe: None,
            currency,
            window,
            pretty: false,
        }
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parses_render() {
        let cli = Cli::try_parse_from([
            "stockview", "render", "--symbol", "NVDA", "--timeframe", "1 Day", "--currency", "aud",
        ])
        .unwrap();

        match cli.command {
            Some(Command::Render(args)) => {
                assert_eq!(args.timeframe, Some(Timeframe::OneDay));
                assert_eq!(args.currency, Currency::Aud);
            }
            _ => panic!("expected render subcommand"),
        }
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&AppConfig::default(), &render_args("nvda", Currency::Usd, None)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["scaled_prices"].as_array().unwrap().len(), 5);
        assert_eq!(value["signal"], "Buy");
        assert_eq!(value["transaction_overlay"][0]["sign"], "positive");
    }

    #[test]
    fn test_render_json_padded_symbol_keeps_markers() {
        let json = render_json(&AppConfig::default(), &render_args(" nvda ", Currency::Usd, None)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["scaled_prices"].as_array().unwrap().len(), 5);
        let overlay = value["transaction_overlay"].as_array().unwrap();
        assert_eq!(overlay.len(), 1);
        assert_eq!(overlay[0]["x"], "2025-03-14 17:45:00");
    }

    #[test]
    fn test_render_json_rejects_zero_window() {
        let result = render_json(&AppConfig::default(), &render_args("NVDA", Currency::Usd, Some(0)));
        assert!(result.is_err());
    }
}
