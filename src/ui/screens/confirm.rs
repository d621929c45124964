use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::centered_rect;
use crate::app::{App, ConfirmAction};

/// Render a yes/no dialog over the current screen
pub fn render(action: &ConfirmAction, frame: &mut Frame) {
    let area = frame.area();
    let dialog_area = centered_rect(50.min(area.width.saturating_sub(4)), 7.min(area.height), area);
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .title(" Confirm ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let text = vec![
        Line::from(action.prompt()),
        Line::from(""),
        Line::styled("[y] Yes  [n] No", Style::default().fg(Color::DarkGray)),
    ];
    let dialog = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(dialog, dialog_area);
}

pub fn handle_key(app: &mut App, action: ConfirmAction, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm(action),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.pop_screen(),
        _ => {}
    }
    Ok(())
}
