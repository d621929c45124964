use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::centered_rect;
use crate::app::App;

const BINDINGS: &[(&str, &str)] = &[
    ("j / k", "Move between fields"),
    ("Tab", "Edit the focused text field"),
    ("Enter", "Next step / create store on Review"),
    ("Esc", "Previous step / stop editing"),
    ("Space", "Toggle an option"),
    ("← / →", "Cycle a choice"),
    ("1-4", "Jump to a step"),
    ("n", "Start over"),
    ("p", "Provision the created store"),
    ("?", "This help"),
    ("q / Ctrl+C", "Quit"),
];

/// Render the key binding overlay
pub fn render(_app: &App, frame: &mut Frame) {
    let area = frame.area();
    let height = (BINDINGS.len() as u16 + 4).min(area.height.saturating_sub(2));
    let dialog_area = centered_rect(56.min(area.width.saturating_sub(4)), height, area);
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    let mut lines: Vec<Line> = BINDINGS
        .iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!("  {:14}", keys), Style::default().fg(Color::Yellow)),
                Span::raw(*action),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::styled("  Press any key to close", Style::default().fg(Color::DarkGray)));

    frame.render_widget(Paragraph::new(lines).block(block), dialog_area);
}

pub fn handle_key(app: &mut App, _key: KeyEvent) -> Result<()> {
    app.pop_screen();
    Ok(())
}
