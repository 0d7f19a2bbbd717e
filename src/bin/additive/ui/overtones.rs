//! Overtone gain bars

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders},
    Frame,
};

/// Bar height resolution
const BAR_SCALE: f32 = 100.0;

/// Render one bar per overtone, highlighting the selected one
pub fn render_overtones(frame: &mut Frame, area: Rect, gains: &[f32], selected: usize) {
    let block = Block::default()
        .title(" Overtones [←/→ select, ↑/↓ gain] ")
        .borders(Borders::ALL);

    let bars: Vec<Bar> = gains
        .iter()
        .enumerate()
        .map(|(i, &gain)| {
            let color = if i == selected {
                Color::Yellow
            } else {
                Color::Cyan
            };
            Bar::default()
                .value((gain * BAR_SCALE).round() as u64)
                .label(Line::from(format!("{}", i + 1)))
                .text_value(format!("{:.0}", gain * BAR_SCALE))
                .style(Style::default().fg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(3)
        .bar_gap(1)
        .max(BAR_SCALE as u64);

    frame.render_widget(chart, area);
}
