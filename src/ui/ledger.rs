// ============================================================================
// Ledger - Journal des transactions et formulaire de saisie
// ============================================================================
// Écran "Add Data" : journal des transactions (lignes formatées) et, en mode
// saisie, le formulaire ticker / date / heure / montant
//
// CONCEPTS RATATUI :
// 1. List widget : les lignes du journal, les plus récentes en bas
// 2. Paragraph : un champ par ligne, le champ actif en surbrillance
// ============================================================================

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, EntryField};

/// Dessine le journal, plus le formulaire en mode saisie
pub fn render_ledger(frame: &mut Frame, app: &App, area: Rect) {
    if app.is_in_entry_mode() {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Journal
                Constraint::Length(6), // Formulaire : 4 champs + bordures
            ])
            .split(area)
            .to_vec();

        render_log(frame, app, chunks[0]);
        render_entry_form(frame, app, chunks[1]);
    } else {
        render_log(frame, app, area);
    }
}

/// Dessine les lignes du journal (les dernières qui tiennent dans la zone)
fn render_log(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" 🧾 Transactions ({}) ", app.transactions.len()));

    // Auto-scroll : on garde la fin du journal
    let visible = area.height.saturating_sub(2) as usize;
    let skip = app.log.len().saturating_sub(visible);

    let items: Vec<ListItem> = app
        .log
        .iter()
        .skip(skip)
        .map(|line| {
            let style = if line.starts_with("Error:") {
                Style::default().fg(Color::Red)
            } else if line.starts_with("Added:") {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(line.as_str()).style(style)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

/// Dessine le formulaire de saisie
fn render_entry_form(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green)) // Vert pour indiquer mode input
        .title(" Add transaction ");

    let lines: Vec<Line> = EntryField::all()
        .iter()
        .map(|&field| {
            let active = field == app.entry_field;
            let label_style = if active {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };

            let mut spans = vec![
                Span::styled(format!("{:<18} ", field.label()), label_style),
                Span::styled(app.field_value(field).to_string(), Style::default().fg(Color::White)),
            ];
            if active {
                spans.push(Span::styled(
                    "█", // Curseur
                    Style::default().fg(Color::White).add_modifier(Modifier::SLOW_BLINK),
                ));
            }
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
