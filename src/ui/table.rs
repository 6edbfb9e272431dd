// ============================================================================
// Table - Tableau d'historique récent
// ============================================================================
// Traduit un TableSpec (cellules pré-formatées) en widget Table ratatui :
// une ligne d'en-tête sombre, une ligne par barre
// ============================================================================

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use crate::models::TableSpec;

/// Dessine le tableau d'historique dans la zone donnée
pub fn render_table(frame: &mut Frame, spec: &TableSpec, area: Rect) {
    let header = Row::new(
        spec.headers
            .iter()
            .map(|h| Cell::from(h.as_str()))
            .collect::<Vec<Cell>>(),
    )
    .style(
        Style::default()
            .bg(Color::DarkGray)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )
    .height(1);

    let rows: Vec<Row> = spec
        .rows
        .iter()
        .map(|cells| {
            Row::new(
                cells
                    .iter()
                    .map(|c| Cell::from(c.as_str()))
                    .collect::<Vec<Cell>>(),
            )
        })
        .collect();

    // Colonnes à parts égales ; la date obtient un peu plus de place
    let column_count = spec.headers.len().max(1) as u16;
    let mut widths = vec![Constraint::Ratio(1, column_count as u32); column_count as usize];
    if let Some(first) = widths.first_mut() {
        *first = Constraint::Min(12);
    }

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Recent History "),
    );

    frame.render_widget(table, area);
}
