//! Live provisioning progress

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap},
};

use super::centered_rect;
use crate::app::App;
use crate::provision::PIPELINE_STEPS;

/// Render provisioning progress
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();
    let dialog_width = 80.min(area.width.saturating_sub(4));
    let dialog_height = 14.min(area.height.saturating_sub(4));

    let dialog_area = centered_rect(dialog_width, dialog_height, area);
    frame.render_widget(Clear, dialog_area);

    let Some(monitor) = app.monitor.as_ref() else {
        return;
    };
    let state = monitor.state();

    let border = if monitor.error().is_some() {
        Color::Red
    } else if monitor.is_complete() {
        Color::Green
    } else {
        Color::Yellow
    };

    let block = Block::default()
        .title(" Provisioning Storefront ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1),   // Step
            Constraint::Length(1),   // Gauge
            Constraint::Length(1),   // Spacer
            Constraint::Min(3),      // Message / result
            Constraint::Length(1),   // Help
        ])
        .split(inner);

    let step = Paragraph::new(format!("Step {} of {}", state.step, PIPELINE_STEPS))
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(step, chunks[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(border).bg(Color::DarkGray))
        .percent(u16::from(state.progress.min(100)))
        .label(format!("{}%", state.progress));
    frame.render_widget(gauge, chunks[1]);

    let mut lines = vec![Line::styled(state.message.clone(), Style::default().fg(Color::White))];
    if let Some(error) = monitor.error() {
        lines.push(Line::from(""));
        lines.push(Line::styled(error.to_string(), Style::default().fg(Color::Red)));
    } else if state.store_url.is_some() || state.preview_url.is_some() {
        lines.push(Line::from(""));
        if let Some(ref url) = state.store_url {
            lines.push(url_line("Storefront: ", url));
        }
        if let Some(ref url) = state.preview_url {
            lines.push(url_line("Preview:    ", url));
        }
    }
    let body = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(body, chunks[3]);

    let help_text = if monitor.is_closed() {
        "[Esc] Back"
    } else {
        "[Esc] Hide (keeps running)"
    };
    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);
}

/// Handle key input for the progress screen
pub fn handle_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
            app.pop_screen();
        }
        _ => {}
    }
    Ok(())
}

fn url_line<'a>(label: &'a str, url: &str) -> Line<'a> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::Yellow)),
        Span::styled(url.to_string(), Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Screen;
    use crate::config::Config;
    use crate::provision::monitor::CONNECTION_LOST;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_shows_lost_connection() {
        let mut app = App::new(Config::default()).unwrap();
        let mut monitor = crate::provision::ProgressMonitor::new();
        monitor.on_stream_end();
        app.monitor = Some(monitor);

        let text = screen_text(&app);
        assert!(text.contains("Preparing to create store..."));
        assert!(text.contains(CONNECTION_LOST));
    }

    #[test]
    fn test_shows_storefront_and_preview_when_live() {
        let mut app = App::new(Config::default()).unwrap();
        let mut event = crate::provision::ProgressEvent::new(PIPELINE_STEPS, 100, "Your Hydrogen storefront is live!");
        event.store_url = Some("https://paws.myshopify.io".to_string());
        event.preview_url = Some("https://preview.hydrogen.shopify.dev/animals-template/paws".to_string());
        let mut monitor = crate::provision::ProgressMonitor::new();
        monitor.apply_chunk(&crate::provision::encode_event(&event).unwrap());
        assert!(monitor.is_complete());
        app.monitor = Some(monitor);

        let text = screen_text(&app);
        assert!(text.contains("Step 7 of 7"));
        assert!(text.contains("https://paws.myshopify.io"));
        assert!(text.contains("https://preview.hydrogen.shopify.dev/animals-template/paws"));
    }

    #[test]
    fn test_escape_returns() {
        let mut app = App::new(Config::default()).unwrap();
        app.push_screen(Screen::Provisioning);
        handle_key(&mut app, KeyEvent::from(KeyCode::Esc)).unwrap();
        assert_eq!(app.screen, Screen::Wizard);
    }
}
