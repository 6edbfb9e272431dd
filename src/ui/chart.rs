// ============================================================================
// Chart - Rendu des figures lignes
// ============================================================================
// Traduit une Figure (titre + séries de points datés) en widget Chart ratatui
//
// CONCEPTS RATATUI :
// 1. Dataset : une série de points (x, y), x = index de la barre
// 2. Axis : bornes et labels (dates aux extrémités, prix min/mid/max)
// 3. Marker : Braille pour les lignes, Dot pour la série "bande"
// ============================================================================

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use crate::models::Figure;

/// Couleurs des séries, dans l'ordre de déclaration de la figure
const SERIES_COLORS: [Color; 2] = [Color::Cyan, Color::Magenta];

/// Dessine une figure ligne dans la zone donnée
pub fn render_figure(frame: &mut Frame, figure: &Figure, area: Rect) {
    let point_count = figure.point_count();
    if point_count == 0 {
        super::render_empty(frame, area, &figure.title);
        return;
    }

    // Chaque série devient un Vec<(f64, f64)> indexé par position de barre.
    // Les Vec doivent survivre aux Dataset qui les empruntent, d'où la
    // collecte préalable.
    let series_points: Vec<Vec<(f64, f64)>> = figure
        .series
        .iter()
        .map(|s| {
            s.points
                .iter()
                .enumerate()
                .map(|(i, &(_, y))| (i as f64, y))
                .collect()
        })
        .collect();

    let datasets: Vec<Dataset> = figure
        .series
        .iter()
        .zip(series_points.iter())
        .enumerate()
        .map(|(i, (series, points))| {
            // La série "remplie" de la figure bande est tracée en pointillé
            // dense pour suggérer la zone entre les deux lignes
            let marker = if figure.fill_between && i > 0 {
                symbols::Marker::Dot
            } else {
                symbols::Marker::Braille
            };

            Dataset::default()
                .name(series.name.as_str())
                .marker(marker)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(SERIES_COLORS[i % SERIES_COLORS.len()]))
                .data(points)
        })
        .collect();

    // Bornes Y avec une marge de 5% pour que le tracé respire
    let (min_value, max_value) = figure.value_bounds().unwrap_or((0.0, 1.0));
    let margin = (max_value - min_value) * 0.05;
    let y_min = (min_value - margin).max(0.0);
    let y_max = max_value + margin;

    // Labels X : dates de la première et de la dernière barre
    let first_date = figure.series[0].points.first().map(|&(d, _)| d);
    let last_date = figure.series[0].points.last().map(|&(d, _)| d);
    let date_label = |d: Option<chrono::NaiveDate>| {
        d.map(|d| d.format("%d %b").to_string()).unwrap_or_default()
    };

    let x_axis = Axis::default()
        .style(Style::default().fg(Color::Gray))
        .bounds([0.0, (point_count - 1).max(1) as f64])
        .labels(vec![
            Span::raw(date_label(first_date)),
            Span::raw(date_label(last_date)),
        ]);

    let y_axis = Axis::default()
        .style(Style::default().fg(Color::Gray))
        .bounds([y_min, y_max])
        .labels(vec![
            Span::raw(format!("{:.0}", y_min)),
            Span::raw(format!("{:.0}", (y_min + y_max) / 2.0)),
            Span::raw(format!("{:.0}", y_max)),
        ]);

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(format!(" {} ", figure.title)),
        )
        .x_axis(x_axis)
        .y_axis(y_axis);

    frame.render_widget(chart, area);
}
