//! Detail chart: price history of the selected row.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};

use tickergrid_core::{format_currency, ChartInput, PricePoint};

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let input = &app.chart.input;

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(theme::muted())
        .title(format!(" {} ", input.title))
        .title_style(if input.has_series() {
            theme::accent_bold()
        } else {
            theme::muted()
        });
    let inner = block.inner(area);
    f.render_widget(block, area);

    if input.has_series() {
        render_chart(f, inner, input);
    } else {
        render_empty(f, inner, app.selection.selected().is_some());
    }
}

fn render_empty(f: &mut Frame, area: Rect, has_selection: bool) {
    let hint = if has_selection {
        "The selected ticker has no detailed price history."
    } else {
        "Move to a row with j/k and press Enter to chart it."
    };
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(hint, theme::muted())),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn date_label(point: &PricePoint) -> String {
    point
        .datetime()
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| point.timestamp.to_string())
}

/// Axis bounds that never collapse to a single value.
fn spread(lo: f64, hi: f64, pad_fraction: f64) -> [f64; 2] {
    let padding = (hi - lo).abs() * pad_fraction;
    if padding > 0.0 {
        [lo - padding, hi + padding]
    } else {
        [lo - 1.0, hi + 1.0]
    }
}

fn render_chart(f: &mut Frame, area: Rect, input: &ChartInput) {
    // Convert to (x, y) data points in time order
    let mut data: Vec<(f64, f64)> = input
        .series
        .iter()
        .filter(|p| p.price.is_finite())
        .map(|p| (p.timestamp as f64, p.price))
        .collect();
    data.sort_by(|a, b| a.0.total_cmp(&b.0));

    let (Some((first, last)), Some((min_y, max_y))) = (input.time_bounds(), input.price_bounds())
    else {
        render_empty(f, area, true);
        return;
    };

    let x_bounds = if last.timestamp > first.timestamp {
        [first.timestamp as f64, last.timestamp as f64]
    } else {
        spread(first.timestamp as f64, last.timestamp as f64, 0.0)
    };
    let y_bounds = spread(min_y, max_y, 0.05);

    let dataset = Dataset::default()
        .name(input.title.as_str())
        .marker(symbols::Marker::Braille)
        .style(theme::accent())
        .graph_type(GraphType::Line)
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .x_axis(
            Axis::default()
                .style(theme::muted())
                .bounds(x_bounds)
                .labels(vec![
                    Span::styled(date_label(first), theme::muted()),
                    Span::styled(date_label(last), theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("Price", theme::muted()))
                .style(theme::muted())
                .bounds(y_bounds)
                .labels(vec![
                    Span::styled(format_currency(y_bounds[0]), theme::muted()),
                    Span::styled(format_currency(y_bounds[1]), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}
