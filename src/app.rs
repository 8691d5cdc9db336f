// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état global de l'application TUI
//
// CONCEPTS RUST :
// 1. State Management : centraliser l'état dans une seule structure
// 2. Mutabilité contrôlée : &mut self pour modifier l'état
// 3. Cache : la série courante et son rendu sont recalculés uniquement
//    quand la sélection change (pas à chaque frame)
//
// PATTERN : Cette structure suit le pattern "Application State"
// - Tous les composants de l'UI lisent depuis App
// - Toutes les modifications passent par les méthodes de App
// - Le journal des transactions appartient à App, transform() ne fait que le lire
// ============================================================================

use tracing::{debug, error, info, warn};

use crate::config::AppConfig;
use crate::data::{
    entry_log_lines, error_log_line, parse_entry, seed_transactions, series_for, TransactionEntry,
};
use crate::error::{EntryError, TransformError};
use crate::models::{Currency, PriceSeries, Timeframe, Transaction};
use crate::series::{transform, DisplayOptions, RenderSeries};

// ============================================================================
// Enum : Screen
// ============================================================================

/// Écrans de l'application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Graphique du ticker sélectionné
    Chart,

    /// Journal des transactions
    Ledger,

    /// Formulaire de saisie d'une transaction (par-dessus le journal)
    Entry,
}

/// Champ actif du formulaire de saisie
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    Ticker,
    Date,
    Time,
    Amount,
}

impl EntryField {
    /// Champ suivant (cycle)
    pub fn next(&self) -> EntryField {
        match self {
            EntryField::Ticker => EntryField::Date,
            EntryField::Date => EntryField::Time,
            EntryField::Time => EntryField::Amount,
            EntryField::Amount => EntryField::Ticker,
        }
    }

    /// Champ précédent (cycle)
    pub fn previous(&self) -> EntryField {
        match self {
            EntryField::Ticker => EntryField::Amount,
            EntryField::Date => EntryField::Ticker,
            EntryField::Time => EntryField::Date,
            EntryField::Amount => EntryField::Time,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntryField::Ticker => "Ticker",
            EntryField::Date => "Date (DD/MM/YYYY)",
            EntryField::Time => "Time (HH:MM)",
            EntryField::Amount => "Amount",
        }
    }

    pub fn all() -> [EntryField; 4] {
        [
            EntryField::Ticker,
            EntryField::Date,
            EntryField::Time,
            EntryField::Amount,
        ]
    }
}

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Tickers proposés
    pub symbols: Vec<String>,

    /// Index du ticker sélectionné
    pub selected_index: usize,

    /// Période affichée (touches h / l)
    pub timeframe: Timeframe,

    /// Devise d'affichage (touche c)
    pub currency: Currency,

    /// Taux USD → AUD
    pub aud_rate: f64,

    /// Fenêtre de la moyenne mobile
    pub moving_average_window: usize,

    /// Écran actuellement affiché
    pub current_screen: Screen,

    /// Journal des transactions (append-only)
    pub transactions: Vec<Transaction>,

    /// Lignes du journal affiché (transactions, confirmations, erreurs)
    pub log: Vec<String>,

    /// Formulaire de saisie en cours
    pub entry: TransactionEntry,

    /// Champ actif du formulaire
    pub entry_field: EntryField,

    /// Message de statut (dernière confirmation ou erreur)
    pub status_message: Option<String>,

    /// Two-step quit : première pression de 'q' → true
    pub confirm_quit: bool,

    /// Série source de la sélection courante
    pub series: PriceSeries,

    /// Rendu de la série courante (ou erreur de transformation)
    pub render: Result<RenderSeries, TransformError>,
}

impl App {
    /// Crée l'application à partir de la configuration
    ///
    /// Le journal est initialisé avec les transactions codées en dur.
    pub fn new(config: &AppConfig) -> Self {
        let transactions = seed_transactions();
        let log = transactions.iter().map(Transaction::log_line).collect();

        let symbols = if config.symbols.is_empty() {
            AppConfig::default().symbols
        } else {
            config.symbols.clone()
        };

        let mut app = Self {
            running: true,
            symbols,
            selected_index: 0,
            timeframe: config.timeframe,
            currency: Currency::default(),
            aud_rate: config.aud_rate,
            moving_average_window: config.moving_average_window,
            current_screen: Screen::Chart,
            transactions,
            log,
            entry: TransactionEntry::default(),
            entry_field: EntryField::Ticker,
            status_message: None,
            confirm_quit: false,
            series: PriceSeries::new(String::new(), config.timeframe, Vec::new()),
            render: Err(TransformError::EmptyInput),
        };
        app.refresh();
        app
    }

    // ========================================================================
    // Sélection et rendu
    // ========================================================================

    /// Symbole sélectionné
    pub fn selected_symbol(&self) -> &str {
        self.symbols
            .get(self.selected_index)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Options d'affichage de la sélection courante
    pub fn display_options(&self) -> DisplayOptions {
        DisplayOptions::new(
            self.currency.multiplier(self.aud_rate),
            self.moving_average_window,
        )
    }

    /// Vrai si la série affichée n'est pas celle demandée (série de repli)
    pub fn is_fallback(&self) -> bool {
        !self.series.symbol.eq_ignore_ascii_case(self.selected_symbol())
            || self.series.timeframe != self.timeframe
    }

    /// Rendu courant de la série sélectionnée
    pub fn render_series(&self) -> Result<&RenderSeries, &TransformError> {
        self.render.as_ref()
    }

    /// Recharge la série et recalcule le rendu
    ///
    /// Appelé après chaque changement de sélection, de devise ou de journal.
    pub fn refresh(&mut self) {
        let symbol = self.selected_symbol().to_string();
        self.series = series_for(&symbol, self.timeframe);
        self.render = transform(
            &self.series.points,
            &self.display_options(),
            &self.transactions,
            &symbol,
        );

        match &self.render {
            Ok(render) => info!(
                ticker = %symbol,
                timeframe = %self.timeframe.label(),
                currency = %self.currency.code(),
                current_price = render.current_price,
                "Chart updated"
            ),
            Err(e) => error!(ticker = %symbol, error = %e, "Failed to transform series"),
        }
    }

    /// Ticker précédent
    pub fn navigate_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
        self.refresh();
    }

    /// Ticker suivant
    pub fn navigate_down(&mut self) {
        let max_index = self.symbols.len().saturating_sub(1);
        self.selected_index = (self.selected_index + 1).min(max_index);
        self.refresh();
    }

    /// Période suivante (cycle)
    pub fn next_timeframe(&mut self) {
        self.timeframe = self.timeframe.next();
        self.refresh();
    }

    /// Période précédente (cycle)
    pub fn previous_timeframe(&mut self) {
        self.timeframe = self.timeframe.previous();
        self.refresh();
    }

    /// Bascule USD ↔ AUD
    pub fn toggle_currency(&mut self) {
        self.currency = self.currency.toggle();
        self.refresh();
    }

    // ========================================================================
    // Écrans
    // ========================================================================

    pub fn show_chart(&mut self) {
        self.current_screen = Screen::Chart;
    }

    pub fn show_ledger(&mut self) {
        self.current_screen = Screen::Ledger;
    }

    /// Bascule Chart ↔ Ledger
    pub fn toggle_view(&mut self) {
        self.current_screen = match self.current_screen {
            Screen::Chart => Screen::Ledger,
            Screen::Ledger | Screen::Entry => Screen::Chart,
        };
    }

    pub fn is_on_chart(&self) -> bool {
        self.current_screen == Screen::Chart
    }

    pub fn is_on_ledger(&self) -> bool {
        self.current_screen == Screen::Ledger
    }

    pub fn is_in_entry_mode(&self) -> bool {
        self.current_screen == Screen::Entry
    }

    // ========================================================================
    // Formulaire de saisie
    // ========================================================================

    /// Ouvre le formulaire, ticker prérempli avec la sélection
    pub fn start_entry(&mut self) {
        self.entry = TransactionEntry {
            ticker: self.selected_symbol().to_string(),
            ..TransactionEntry::default()
        };
        self.entry_field = EntryField::Date;
        self.current_screen = Screen::Entry;
    }

    /// Ferme le formulaire sans rien ajouter
    pub fn cancel_entry(&mut self) {
        self.entry = TransactionEntry::default();
        self.entry_field = EntryField::Ticker;
        self.show_ledger();
    }

    pub fn next_field(&mut self) {
        self.entry_field = self.entry_field.next();
    }

    pub fn previous_field(&mut self) {
        self.entry_field = self.entry_field.previous();
    }

    /// Valeur d'un champ du formulaire
    pub fn field_value(&self, field: EntryField) -> &str {
        match field {
            EntryField::Ticker => &self.entry.ticker,
            EntryField::Date => &self.entry.date,
            EntryField::Time => &self.entry.time,
            EntryField::Amount => &self.entry.amount,
        }
    }

    fn field_mut(&mut self) -> &mut String {
        match self.entry_field {
            EntryField::Ticker => &mut self.entry.ticker,
            EntryField::Date => &mut self.entry.date,
            EntryField::Time => &mut self.entry.time,
            EntryField::Amount => &mut self.entry.amount,
        }
    }

    /// Ajoute un caractère au champ actif
    pub fn append_char(&mut self, c: char) {
        self.field_mut().push(c);
    }

    /// Supprime le dernier caractère du champ actif
    pub fn backspace(&mut self) {
        self.field_mut().pop();
    }

    /// Valide le formulaire
    ///
    /// - Succès : la transaction est ajoutée au journal, le formulaire est
    ///   vidé et on revient au journal
    /// - Erreur : une ligne d'erreur est ajoutée, le formulaire reste ouvert
    pub fn submit_entry(&mut self) -> Result<Transaction, EntryError> {
        match parse_entry(&self.entry) {
            Ok(transaction) => {
                let (line, added) = entry_log_lines(&self.entry, &transaction);
                info!(
                    ticker = %transaction.symbol,
                    quantity = transaction.quantity,
                    price = transaction.price_at_transaction,
                    "Transaction added"
                );

                self.transactions.push(transaction.clone());
                self.log.push(line);
                self.log.push(added.clone());
                self.status_message = Some(added);

                self.entry = TransactionEntry::default();
                self.entry_field = EntryField::Ticker;
                self.show_ledger();

                // Le nouveau marqueur apparaît sur le graphique
                self.refresh();
                Ok(transaction)
            }
            Err(e) => {
                warn!(error = %e, entry = ?self.entry, "Rejected transaction entry");
                let line = error_log_line(&e);
                self.log.push(line.clone());
                self.status_message = Some(line);
                Err(e)
            }
        }
    }

    // ========================================================================
    // Quit
    // ========================================================================

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Two-step quit : première pression
    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    /// Tick : appelé à chaque itération de la boucle
    ///
    /// Les données sont statiques : rien à rafraîchir périodiquement.
    /// On efface seulement le message de statut quand on quitte le journal.
    pub fn tick(&mut self) {
        if self.is_on_chart() {
            self.status_message = None;
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}

/// Trace une action utilisateur (niveau debug)
pub fn log_action(action: &str, app: &App) {
    debug!(
        action,
        ticker = %app.selected_symbol(),
        timeframe = %app.timeframe.label(),
        screen = ?app.current_screen,
        "User action"
    );
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Signal;

    #[test]
    fn test_app_creation() {
        let app = App::default();
        assert!(app.is_running());
        assert!(app.is_on_chart());
        assert_eq!(app.selected_symbol(), "NVDA");
        assert_eq!(app.timeframe, Timeframe::OneMonth);
        assert_eq!(app.transactions.len(), 1);
        assert_eq!(app.log, vec!["14/03/2025 17:45: NVDA - 10 @ USD $121.67"]);

        let render = app.render_series().unwrap();
        assert_eq!(render.len(), 5);
        assert_eq!(render.current_price, 121.67);
        assert_eq!(render.signal, Signal::Buy);
        assert_eq!(render.transaction_overlay.len(), 1);
    }

    #[test]
    fn test_currency_toggle_rescales() {
        let mut app = App::default();
        app.toggle_currency();
        assert_eq!(app.currency, Currency::Aud);

        let render = app.render_series().unwrap();
        assert!((render.current_price - 121.67 * 1.59).abs() < 1e-9);
        assert!((render.transaction_overlay[0].y - 121.67 * 1.59).abs() < 1e-9);

        app.toggle_currency();
        assert_eq!(app.render_series().unwrap().current_price, 121.67);
    }

    #[test]
    fn test_timeframe_navigation() {
        let mut app = App::default();
        app.next_timeframe();
        assert_eq!(app.timeframe, Timeframe::OneYear);
        assert_eq!(app.series.timeframe, Timeframe::OneYear);

        app.previous_timeframe();
        app.previous_timeframe();
        assert_eq!(app.timeframe, Timeframe::OneDay);
        assert_eq!(app.render_series().unwrap().len(), 3);
    }

    #[test]
    fn test_symbol_navigation_and_fallback() {
        let mut app = App::default();
        assert!(!app.is_fallback());

        app.navigate_down();
        assert_eq!(app.selected_symbol(), "AAPL");
        assert!(app.is_fallback());
        // Série de repli NVDA, mais l'overlay filtre sur AAPL
        assert!(app.render_series().unwrap().transaction_overlay.is_empty());

        app.navigate_down();
        app.navigate_down();
        assert_eq!(app.selected_symbol(), "TSLA"); // Reste sur le dernier

        app.navigate_up();
        app.navigate_up();
        app.navigate_up();
        assert_eq!(app.selected_symbol(), "NVDA");
    }

    #[test]
    fn test_submit_entry_success() {
        let mut app = App::default();
        app.show_ledger();
        app.start_entry();
        assert!(app.is_in_entry_mode());
        assert_eq!(app.entry.ticker, "NVDA");
        assert_eq!(app.entry_field, EntryField::Date);

        for c in "14/03/2025".chars() {
            app.append_char(c);
        }
        app.next_field();
        for c in "17:45".chars() {
            app.append_char(c);
        }
        app.next_field();
        for c in "55".chars() {
            app.append_char(c);
        }
        app.backspace();

        let tx = app.submit_entry().unwrap();
        assert_eq!(tx.quantity, 5.0);
        assert_eq!(tx.price_at_transaction, 121.67);
        assert_eq!(app.transactions.len(), 2);
        assert!(app.is_on_ledger());
        assert_eq!(
            app.log.last().map(String::as_str),
            Some("Added: 14/03/2025 17:45 NVDA - 5 @ USD $121.67")
        );
        assert_eq!(app.log[app.log.len() - 2], "14/03/2025 17:45: NVDA - 5 @ USD $121.67");
        assert_eq!(app.render_series().unwrap().transaction_overlay.len(), 2);
    }

    #[test]
    fn test_submit_entry_error_keeps_form() {
        let mut app = App::default();
        app.start_entry();
        app.append_char('x');

        let result = app.submit_entry();
        assert_eq!(result, Err(EntryError::InvalidDateTime));
        assert!(app.is_in_entry_mode());
        assert_eq!(app.transactions.len(), 1);
        assert!(app.log.last().unwrap().starts_with("Error: Invalid date/time!"));
        assert_eq!(app.entry.date, "x");
    }

    #[test]
    fn test_cancel_entry() {
        let mut app = App::default();
        app.start_entry();
        app.append_char('1');
        app.cancel_entry();
        assert!(app.is_on_ledger());
        assert!(app.entry.date.is_empty());
    }

    #[test]
    fn test_entry_field_cycle() {
        assert_eq!(EntryField::Amount.next(), EntryField::Ticker);
        assert_eq!(EntryField::Ticker.previous(), EntryField::Amount);
    }

    #[test]
    fn test_two_step_quit() {
        let mut app = App::default();
        app.request_quit();
        assert!(app.is_awaiting_quit_confirmation());
        app.cancel_quit();
        assert!(app.is_running());
        app.quit();
        assert!(!app.is_running());
    }

    #[test]
    fn test_toggle_view() {
        let mut app = App::default();
        app.toggle_view();
        assert!(app.is_on_ledger());
        app.toggle_view();
        assert!(app.is_on_chart());
    }
}
