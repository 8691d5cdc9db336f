// ============================================================================
// Chart - Rendu du graphique pour le ticker sélectionné
// ============================================================================
// Affiche la série rendue par transform() :
// - prix (ligne verte)
// - high / low (quand la série source les fournit)
// - moyenne mobile (SMA)
// - marqueurs de transactions (achat / vente)
//
// CONCEPTS RATATUI :
// 1. Chart widget : plusieurs Dataset superposés
// 2. GraphType::Line pour les séries, GraphType::Scatter pour les marqueurs
// 3. Axis : bornes et labels calculés depuis les données
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::known_symbols;
use crate::models::parse_label;
use crate::series::{OverlaySign, RenderSeries, Signal};

/// Couleur de la série de prix (#00FF00 sur la page d'origine)
const PRICE_COLOR: Color = Color::Rgb(0, 255, 0);
const HIGH_COLOR: Color = Color::Cyan;
const LOW_COLOR: Color = Color::Magenta;
const SMA_COLOR: Color = Color::Yellow;
const BUY_MARKER_COLOR: Color = Color::LightGreen;
const SELL_MARKER_COLOR: Color = Color::LightRed;

// ============================================================================
// Fonction principale de rendu du graphique
// ============================================================================

/// Dessine l'écran graphique pour la sélection courante
pub fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let render = match app.render_series() {
        Ok(render) => render,
        Err(e) => {
            let msg = format!("Impossible d'afficher {} : {}", app.selected_symbol(), e);
            render_no_data(frame, area, &msg);
            return;
        }
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // En-tête
            Constraint::Min(0),    // Graphique
        ])
        .split(area)
        .to_vec();

    render_chart_header(frame, app, render, chunks[0]);
    render_chart_graph(frame, app, render, chunks[1]);
}

// ============================================================================
// En-tête : prix courant, prédiction, signal
// ============================================================================

fn render_chart_header(frame: &mut Frame, app: &App, render: &RenderSeries, area: Rect) {
    let currency = app.currency.code();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(
            " 📈 {} Price - {} ({}) ",
            app.selected_symbol(),
            app.timeframe.label(),
            currency
        ));

    // Couleurs inversées, comme la page d'origine : Buy en rouge, Sell en vert
    let signal_color = match render.signal {
        Signal::Buy => Color::Red,
        Signal::Sell => Color::Green,
    };

    let mut lines = vec![Line::from(vec![
        Span::raw("Current: "),
        Span::styled(
            format!("{} ${:.2}", currency, render.current_price),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   Predicted: "),
        Span::styled(
            format!("{} ${:.2}", currency, render.predicted_price),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   Signal: "),
        Span::styled(
            render.signal.label(),
            Style::default().fg(signal_color).add_modifier(Modifier::BOLD),
        ),
    ])];

    if app.is_fallback() {
        lines.push(Line::from(Span::styled(
            format!(
                "Pas de données {} / {} : affichage {} / {} (disponibles : {})",
                app.selected_symbol(),
                app.timeframe.label(),
                app.series.symbol,
                app.series.timeframe.label(),
                known_symbols().join(", ")
            ),
            Style::default().fg(Color::Yellow),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Graphique principal
// ============================================================================

fn render_chart_graph(frame: &mut Frame, app: &App, render: &RenderSeries, area: Rect) {
    let prices = indexed(&render.scaled_prices);
    let highs = indexed_optional(&render.scaled_highs);
    let lows = indexed_optional(&render.scaled_lows);
    let sma = indexed(&render.moving_average);
    let (buys, sells) = overlay_points(render);

    // Bornes Y sur tout ce qui est dessiné (marqueurs compris)
    let (min_y, max_y) = prices
        .iter()
        .chain(&highs)
        .chain(&lows)
        .chain(&sma)
        .chain(&buys)
        .chain(&sells)
        .fold((f64::MAX, f64::MIN), |(min, max), &(_x, y)| (min.min(y), max.max(y)));

    // Marge de 5% (1 unité si la série est plate)
    let margin = ((max_y - min_y) * 0.05).max(1.0);
    let y_min = (min_y - margin).max(0.0);
    let y_max = max_y + margin;
    let x_max = (render.len().saturating_sub(1)).max(1) as f64;

    let mut datasets = vec![Dataset::default()
        .name(format!("{} Price", app.selected_symbol()))
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(PRICE_COLOR))
        .data(&prices)];

    // Variante high/low : seulement si la série porte une bande
    if render.has_range() {
        datasets.push(
            Dataset::default()
                .name("High")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(HIGH_COLOR))
                .data(&highs),
        );
        datasets.push(
            Dataset::default()
                .name("Low")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(LOW_COLOR))
                .data(&lows),
        );
    }

    datasets.push(
        Dataset::default()
            .name(format!("SMA({})", app.moving_average_window))
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(SMA_COLOR))
            .data(&sma),
    );

    if !buys.is_empty() {
        datasets.push(
            Dataset::default()
                .name("Buy")
                .marker(symbols::Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(BUY_MARKER_COLOR))
                .data(&buys),
        );
    }

    if !sells.is_empty() {
        datasets.push(
            Dataset::default()
                .name("Sell")
                .marker(symbols::Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(SELL_MARKER_COLOR))
                .data(&sells),
        );
    }

    let x_axis = Axis::default()
        .title("Date")
        .style(Style::default().fg(Color::Gray))
        .bounds([0.0, x_max])
        .labels(x_labels(&render.labels));

    let y_axis = Axis::default()
        .title(format!("Price ({})", app.currency.code()))
        .style(Style::default().fg(Color::Gray))
        .bounds([y_min, y_max])
        .labels(vec![
            Span::raw(format!("{:.2}", y_min)),
            Span::raw(format!("{:.2}", (y_min + y_max) / 2.0)),
            Span::raw(format!("{:.2}", y_max)),
        ]);

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White)),
        )
        .x_axis(x_axis)
        .y_axis(y_axis);

    frame.render_widget(chart, area);
}

// ============================================================================
// Conversion des séries en points (x, y)
// ============================================================================

fn indexed(values: &[f64]) -> Vec<(f64, f64)> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64, v))
        .collect()
}

fn indexed_optional(values: &[Option<f64>]) -> Vec<(f64, f64)> {
    values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i as f64, v)))
        .collect()
}

/// Sépare les marqueurs en (achats, ventes) positionnés sur l'axe X
fn overlay_points(render: &RenderSeries) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    let mut buys = Vec::new();
    let mut sells = Vec::new();

    for point in &render.transaction_overlay {
        let Some(x) = overlay_index(&render.labels, &point.x) else {
            continue;
        };
        match point.sign {
            OverlaySign::Positive => buys.push((x, point.y)),
            OverlaySign::Negative => sells.push((x, point.y)),
        }
    }

    (buys, sells)
}

/// Position X d'un timestamp : index du dernier label <= timestamp
///
/// None si le timestamp (ou tous les labels) n'est pas parsable, ou s'il est
/// antérieur au premier label. Un timestamp postérieur au dernier label est
/// placé sur le dernier point.
pub fn overlay_index(labels: &[String], timestamp: &str) -> Option<f64> {
    let at = parse_label(timestamp)?;

    labels
        .iter()
        .enumerate()
        .filter_map(|(i, label)| parse_label(label).map(|t| (i, t)))
        .filter(|(_, t)| *t <= at)
        .map(|(i, _)| i as f64)
        .last()
}

/// Labels de l'axe X : premier, milieu, dernier
fn x_labels(labels: &[String]) -> Vec<Span<'static>> {
    match labels.len() {
        0 => Vec::new(),
        1 => vec![Span::raw(labels[0].clone())],
        n => vec![
            Span::raw(labels[0].clone()),
            Span::raw(labels[n / 2].clone()),
            Span::raw(labels[n - 1].clone()),
        ],
    }
}

// ============================================================================
// Helper : Message quand pas de données
// ============================================================================

/// Affiche un message quand il n'y a pas de données à afficher
fn render_no_data(frame: &mut Frame, area: Rect, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" ⚠ Erreur ");

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::Red))),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_overlay_index_inside_and_after() {
        let hour = labels(&["2025-03-14 16:45", "2025-03-14 16:46", "2025-03-14 16:47"]);
        assert_eq!(overlay_index(&hour, "2025-03-14 16:46:30"), Some(1.0));
        assert_eq!(overlay_index(&hour, "2025-03-14 17:45:00"), Some(2.0));

        let month = labels(&["2025-02-14", "2025-02-21", "2025-02-28", "2025-03-07", "2025-03-14"]);
        assert_eq!(overlay_index(&month, "2025-03-14T17:45:00.000Z"), Some(4.0));
        assert_eq!(overlay_index(&month, "2025-02-25T10:00:00.000Z"), Some(1.0));
    }

    #[test]
    fn test_overlay_index_before_or_unparsable() {
        let month = labels(&["2025-02-14", "2025-03-14"]);
        assert_eq!(overlay_index(&month, "2024-01-01 00:00"), None);
        assert_eq!(overlay_index(&month, "yesterday"), None);
        assert_eq!(overlay_index(&labels(&["t0", "t1"]), "2025-03-14"), None);
    }

    #[test]
    fn test_x_labels() {
        assert!(x_labels(&[]).is_empty());
        assert_eq!(x_labels(&labels(&["a"])).len(), 1);
        assert_eq!(x_labels(&labels(&["a", "b", "c", "d", "e"])).len(), 3);
    }

    #[test]
    fn test_indexed_optional_skips_missing() {
        let points = indexed_optional(&[Some(1.0), None, Some(3.0)]);
        assert_eq!(points, vec![(0.0, 1.0), (2.0, 3.0)]);
    }
}
