use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::wizard::StepDefinition;

/// Horizontal progress strip showing every wizard step
pub struct StepIndicator<'a> {
    pub steps: &'a [StepDefinition],
    pub current: usize,
    pub completed: &'a [bool],
    pub valid: &'a [bool],
}

impl<'a> StepIndicator<'a> {
    pub fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(area);
        block.render(area, buf);

        let mut spans = Vec::new();
        for (index, step) in self.steps.iter().enumerate() {
            if index > 0 {
                spans.push(Span::raw("  "));
            }
            let (marker, style) = self.marker(index);
            spans.push(Span::styled(format!("{} {}. {}", marker, step.number(), step.name), style));
        }

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .render(inner, buf);
    }

    /// Visited steps show whether they pass; untouched ones stay neutral
    fn marker(&self, index: usize) -> (&'static str, Style) {
        let completed = self.completed.get(index).copied().unwrap_or(false);
        let valid = self.valid.get(index).copied().unwrap_or(false);
        let current = index == self.current;

        let marker = match (completed, valid) {
            (true, true) => "✓",
            (true, false) => "!",
            _ if current => "●",
            _ => "○",
        };

        let mut style = match (completed, valid) {
            (true, true) => Style::default().fg(Color::Green),
            (true, false) => Style::default().fg(Color::Red),
            _ => Style::default().fg(Color::Gray),
        };
        if current {
            style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }

        (marker, style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::STEPS;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol().to_string()).collect()
    }

    #[test]
    fn test_renders_every_step() {
        let area = Rect::new(0, 0, 140, 2);
        let mut buf = Buffer::empty(area);
        StepIndicator {
            steps: &STEPS,
            current: 1,
            completed: &[true, false, false, false],
            valid: &[true, false, false, false],
        }
        .render(area, &mut buf);

        let text = row_text(&buf, 0);
        assert!(text.contains("✓ 1. Store Basics"));
        assert!(text.contains("● 2. Store Configuration"));
        assert!(text.contains("○ 4. Review & Submit"));
    }

    #[test]
    fn test_visited_invalid_step_is_flagged() {
        let indicator = StepIndicator {
            steps: &STEPS,
            current: 0,
            completed: &[true, false, false, false],
            valid: &[false; 4],
        };
        assert_eq!(indicator.marker(0).0, "!");
        assert_eq!(indicator.marker(0).1.fg, Some(Color::Red));
        assert_eq!(indicator.marker(2).0, "○");
    }
}
