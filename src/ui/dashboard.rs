// ============================================================================
// Dashboard - Rendu de l'interface complète
// ============================================================================
// Une seule page : header (titre + sélecteur), carte recommandation/horloge,
// figure prix, figure bande + box-plot volume côte à côte, tableau, footer.
// Tout est dessiné depuis App : les six régions viennent du même payload
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::models::Recommendation;
use crate::ui::{boxplot_text, chart, table};

/// Couleur d'affichage du signal : BUY en bleu, SELL en rouge
fn recommendation_color(recommendation: Recommendation) -> Color {
    match recommendation {
        Recommendation::Buy => Color::Blue,
        Recommendation::Sell => Color::Red,
    }
}

/// Dessine l'interface complète
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header : titre + sélecteur
            Constraint::Length(3),  // Carte : recommandation + horloge
            Constraint::Min(8),     // Figure prix
            Constraint::Min(8),     // Figure bande + box-plot volume
            Constraint::Length(13), // Tableau (10 lignes + en-tête + bordures)
            Constraint::Length(3),  // Footer : raccourcis
        ])
        .split(frame.size());

    render_header(frame, app, chunks[0]);
    render_card(frame, app, chunks[1]);

    // Cycle en échec : le corps affiche l'erreur, pas de rendu partiel
    if let Some(error) = &app.load_error {
        let body = chunks[2].union(chunks[3]).union(chunks[4]);
        render_error(frame, error, body);
    } else if let Some(payload) = &app.payload {
        chart::render_figure(frame, &payload.price_figure, chunks[2]);

        let row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[3]);

        chart::render_figure(frame, &payload.band_figure, row[0]);
        boxplot_text::render_volume_boxplot(frame, &payload.volume_figure, row[1]);

        table::render_table(frame, &payload.table, chunks[4]);
    } else {
        let message = if app.is_loading { "Loading..." } else { "No data yet" };
        let body = chunks[2].union(chunks[3]).union(chunks[4]);
        render_empty(frame, body, message);
    }

    render_footer(frame, app, chunks[5]);
}

// ============================================================================
// Header : titre de page et sélecteur de ticker
// ============================================================================

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = app
        .payload
        .as_ref()
        .map(|p| p.title.clone())
        .unwrap_or_else(|| "Stock Prices".to_string());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", title))
        .title_alignment(Alignment::Center);

    // Le sélecteur : l'allow-list entière, sélection inversée
    let mut spans: Vec<Span> = Vec::new();
    for (i, ticker) in app.tickers.iter().enumerate() {
        let mut style = Style::default().fg(Color::Gray);
        if Some(i) == app.selected_index {
            style = Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD);
        }
        spans.push(Span::styled(format!(" {} ", ticker.symbol), style));
    }
    if app.is_loading {
        spans.push(Span::styled(
            "  ⟳",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    }

    let paragraph = Paragraph::new(vec![Line::from(spans)])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Carte : recommandation et horloge
// ============================================================================

fn render_card(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let recommendation_spans = match app.payload.as_ref().map(|p| p.recommendation) {
        Some(recommendation) => vec![
            Span::raw("Recommendation: "),
            Span::styled(
                recommendation.label(),
                Style::default()
                    .fg(recommendation_color(recommendation))
                    .add_modifier(Modifier::BOLD),
            ),
        ],
        None => vec![Span::styled("Recommendation: —", Style::default().fg(Color::Gray))],
    };

    let mut spans = recommendation_spans;
    spans.push(Span::raw("        "));
    spans.push(Span::styled(
        app.clock_text.clone(),
        Style::default().fg(Color::White),
    ));

    let paragraph = Paragraph::new(vec![Line::from(spans)])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Footer et états dégradés
// ============================================================================

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let shortcuts = if app.is_awaiting_quit_confirmation() {
        Line::from(vec![
            Span::styled(
                "Press ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "[q]",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                " again to quit, any other key to cancel",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        Line::from(vec![
            Span::styled("[← → / h l]", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(" Ticker  "),
            Span::styled("[r]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" Refresh  "),
            Span::styled("[q]", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(" Quit"),
        ])
    };

    let paragraph = Paragraph::new(vec![shortcuts])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Corps du dashboard quand le cycle a échoué (fetch ET snapshot)
fn render_error(frame: &mut Frame, error: &str, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Update failed ");

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(error.to_string(), Style::default().fg(Color::Red))),
        Line::from(""),
        Line::from(Span::styled(
            "[r] Retry   [← →] Switch ticker",
            Style::default().fg(Color::Gray),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Zone vide avec un message centré (chargement initial, figure sans points)
pub fn render_empty(frame: &mut Frame, area: Rect, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Style::default().fg(Color::Gray))),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Tests unitaires
// ============================================================================
