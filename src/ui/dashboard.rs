// ============================================================================
// Dashboard - Rendu de l'interface principale
// ============================================================================
// Découpe l'écran (header, contenu, footer) et route le contenu selon l'écran
// actif : graphique ou journal des transactions
//
// CONCEPTS RATATUI :
// 1. Frame : surface de dessin
// 2. Layout : découpage de l'espace en zones
// 3. Span / Line : texte multi-couleurs sur une même ligne
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Screen};
use crate::ui::{chart, ledger};

/// Dessine l'interface complète
///
/// CONCEPT RUST : Routing avec match sur enum
/// - Le compilateur garantit l'exhaustivité (tous les écrans gérés)
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = create_layout(frame.size());

    render_header(frame, app, chunks[0]);

    match app.current_screen {
        Screen::Chart => chart::render_chart(frame, app, chunks[1]),
        Screen::Ledger | Screen::Entry => ledger::render_ledger(frame, app, chunks[1]),
    }

    render_footer(frame, app, chunks[2]);
}

/// Crée le layout principal (header, content, footer)
fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header : 3 lignes
            Constraint::Min(0),    // Content : tout le reste
            Constraint::Length(3), // Footer : 3 lignes
        ])
        .split(area)
        .to_vec()
}

// ============================================================================
// Header : tickers, période, devise
// ============================================================================

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" StockView ")
        .title_alignment(Alignment::Center);

    let mut spans: Vec<Span> = Vec::new();
    for (index, symbol) in app.symbols.iter().enumerate() {
        let style = if index == app.selected_index {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
                .add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", symbol), style));
        spans.push(Span::raw(" "));
    }

    spans.push(Span::raw("│ "));
    spans.push(Span::styled(
        app.timeframe.label(),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::raw(" │ "));
    spans.push(Span::styled(
        app.currency.code(),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ));

    let paragraph = Paragraph::new(Line::from(spans))
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Footer : raccourcis, confirmation de quit, statut
// ============================================================================

fn key_style(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let line = if app.is_awaiting_quit_confirmation() {
        Line::from(vec![
            Span::styled("⚠  Appuyez sur ", key_style(Color::Yellow)),
            Span::styled(
                "[q]",
                key_style(Color::Red).add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                " à nouveau pour quitter, ou n'importe quelle autre touche pour annuler ⚠",
                key_style(Color::Yellow),
            ),
        ])
    } else if app.is_in_entry_mode() {
        Line::from(vec![
            Span::styled("[Tab / Shift+Tab]", key_style(Color::Yellow)),
            Span::raw(" Field  "),
            Span::styled("[Enter]", key_style(Color::Green)),
            Span::raw(" Add  "),
            Span::styled("[ESC]", key_style(Color::Red)),
            Span::raw(" Cancel"),
        ])
    } else if let (true, Some(status)) = (app.is_on_ledger(), &app.status_message) {
        let color = if status.starts_with("Error:") {
            Color::Red
        } else {
            Color::Green
        };
        Line::from(Span::styled(status.as_str(), key_style(color)))
    } else {
        Line::from(vec![
            Span::styled("[q]", key_style(Color::Yellow)),
            Span::raw(" Quit  "),
            Span::styled("[↑↓ / j k]", key_style(Color::Yellow)),
            Span::raw(" Ticker  "),
            Span::styled("[← → / h l]", key_style(Color::Yellow)),
            Span::raw(" Time frame  "),
            Span::styled("[c]", key_style(Color::Yellow)),
            Span::raw(" Currency  "),
            Span::styled("[Tab]", key_style(Color::Yellow)),
            Span::raw(" Chart/Log  "),
            Span::styled("[a]", key_style(Color::Green)),
            Span::raw(" Add"),
        ])
    };

    let paragraph = Paragraph::new(vec![line])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
