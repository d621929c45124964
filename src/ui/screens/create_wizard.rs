//! Store creation wizard screens
//!
//! A 4-step wizard collecting everything needed to create a Shopify store
//! with a Hydrogen storefront.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, ConfirmAction, Screen};
use crate::shopify::template_for;
use crate::ui::widgets::StepIndicator;
use crate::wizard::{Field, FieldKind, FieldSpec, FormState, StepId, STEPS};

const LABEL_WIDTH: usize = 22;

/// Render the wizard for the current step
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    let dialog_width = 96.min(area.width.saturating_sub(4));
    let dialog_height = 32.min(area.height.saturating_sub(2));

    let dialog_area = centered_rect(dialog_width, dialog_height, area);
    frame.render_widget(Clear, dialog_area);

    let wizard = &app.wizard;
    let Some(step) = STEPS.get(wizard.current_step()) else {
        return;
    };

    let border = if wizard.is_finished() {
        Color::Green
    } else {
        Color::Cyan
    };
    let block = Block::default()
        .title(format!(
            " Create Hydrogen Store ({}/{}) - {} ",
            step.number(),
            wizard.step_count(),
            step.name
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),   // Step indicator
            Constraint::Min(10),     // Step body
            Constraint::Length(1),   // Status
            Constraint::Length(1),   // Help
        ])
        .split(inner);

    StepIndicator {
        steps: &STEPS,
        current: wizard.current_step(),
        completed: wizard.completed(),
        valid: wizard.valid(),
    }
    .render(chunks[0], frame.buffer_mut());

    if wizard.is_finished() {
        render_success(app, frame, chunks[1]);
    } else {
        match step.id {
            StepId::Review => render_review(app, frame, chunks[1]),
            _ => render_form_step(app, frame, chunks[1]),
        }
    }

    if let Some(ref msg) = app.status_message {
        let status = Paragraph::new(msg.as_str())
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);
        frame.render_widget(status, chunks[2]);
    }

    let help = Paragraph::new(help_text(app))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);
}

fn help_text(app: &App) -> &'static str {
    let wizard = &app.wizard;
    if wizard.is_finished() {
        "[p] Provision storefront  [n] New store  [q] Quit"
    } else if wizard.editing {
        "[Enter] Done editing  [Backspace] Delete"
    } else if wizard.is_last_step() {
        "[Enter] Create store  [1-3] Edit step  [Esc] Back  [?] Help"
    } else {
        "[j/k] Field  [Tab] Edit  [Space] Toggle  [←/→] Cycle  [Enter] Next  [Esc] Back"
    }
}

/// Handle key input for the wizard
pub fn handle_key(app: &mut App, key: KeyEvent) -> Result<()> {
    if app.wizard.is_finished() {
        return handle_finished_key(app, key);
    }
    if app.wizard.editing {
        return handle_editing_key(app, key);
    }

    match key.code {
        KeyCode::Esc => {
            if app.wizard.current_step() == 0 {
                app.push_screen(Screen::Confirm(ConfirmAction::Quit));
            } else {
                app.clear_status();
                app.wizard.retreat();
            }
        }
        KeyCode::Char('q') => {
            app.push_screen(Screen::Confirm(ConfirmAction::Quit));
        }
        KeyCode::Char('n') => {
            app.push_screen(Screen::Confirm(ConfirmAction::ResetWizard));
        }
        KeyCode::Char(c @ '1'..='4') => {
            let index = (c as usize) - ('1' as usize);
            app.clear_status();
            app.wizard.jump_to_step(index);
        }
        KeyCode::Enter => {
            if app.wizard.is_last_step() {
                app.submit();
            } else if app.wizard.advance() {
                app.clear_status();
            } else {
                app.set_status("Fix the highlighted fields to continue");
            }
        }
        KeyCode::Char('j') | KeyCode::Down => {
            let count = app.wizard.current_fields().len();
            if app.wizard.field_focus + 1 < count {
                app.wizard.field_focus += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.wizard.field_focus = app.wizard.field_focus.saturating_sub(1);
        }
        KeyCode::Tab => {
            if let Some(spec) = app.wizard.focused_field() {
                if spec.kind.is_text() {
                    app.wizard.editing = true;
                }
            }
        }
        KeyCode::Char(' ') => {
            if let Some(spec) = app.wizard.focused_field() {
                if spec.kind == FieldKind::Toggle {
                    app.wizard.toggle(spec.field);
                }
            }
        }
        KeyCode::Left | KeyCode::Right => {
            let delta = if key.code == KeyCode::Right { 1 } else { -1 };
            if let Some(spec) = app.wizard.focused_field() {
                if spec.kind == FieldKind::Choice {
                    app.wizard.cycle_choice(spec.field, delta);
                }
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_editing_key(app: &mut App, key: KeyEvent) -> Result<()> {
    let Some(spec) = app.wizard.focused_field() else {
        app.wizard.editing = false;
        return Ok(());
    };

    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Tab => {
            app.wizard.editing = false;
        }
        KeyCode::Char(c) => {
            app.wizard.push_char(spec.field, c);
        }
        KeyCode::Backspace => {
            app.wizard.pop_char(spec.field);
        }
        _ => {}
    }
    Ok(())
}

fn handle_finished_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('p') | KeyCode::Enter => app.start_provisioning(),
        KeyCode::Char('n') => app.reset_wizard(),
        KeyCode::Char('q') | KeyCode::Esc => {
            app.push_screen(Screen::Confirm(ConfirmAction::Quit));
        }
        _ => {}
    }
    Ok(())
}

// =============================================================================
// Steps 1-3: field forms
// =============================================================================

fn render_form_step(app: &App, frame: &mut Frame, area: Rect) {
    let wizard = &app.wizard;

    // Fields on the left, notes on the right
    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let fields_area = h_chunks[0].inner(Margin::new(1, 1));

    let mut lines = Vec::new();
    let mut cursor = None;

    for (index, spec) in wizard.current_fields().iter().enumerate() {
        let selected = index == wizard.field_focus;
        let editing = selected && wizard.editing;
        let label = field_label(spec);

        if editing {
            let text = masked_value(spec, wizard.form());
            let x = fields_area.x + 2 + LABEL_WIDTH as u16 + text.width() as u16;
            cursor = Some((x, fields_area.y + lines.len() as u16));
        }

        match spec.kind {
            FieldKind::Toggle => {
                let enabled = wizard.form().flag(spec.field).unwrap_or(false);
                lines.push(render_toggle_line(&label, enabled, selected));
            }
            FieldKind::Choice => {
                let value = format!("< {} >", wizard.form().display_value(spec.field));
                lines.push(render_field_line(&label, &value, selected, false, false, "[←/→] cycle"));
            }
            _ => {
                let value = masked_value(spec, wizard.form());
                let (value, placeholder) = if value.is_empty() && !editing {
                    (spec.field.placeholder().to_string(), true)
                } else {
                    (value, false)
                };
                lines.push(render_field_line(&label, &value, selected, editing, placeholder, "[Tab] edit"));
            }
        }

        match wizard.error(spec.field) {
            Some(error) => lines.push(Line::styled(
                format!("{:width$}{}", "", error, width = LABEL_WIDTH + 2),
                Style::default().fg(Color::Red),
            )),
            None => lines.push(Line::from("")),
        }
    }

    frame.render_widget(Paragraph::new(lines), fields_area);

    if let Some(position) = cursor {
        frame.set_cursor_position(position);
    }

    render_notes(app, frame, h_chunks[1]);
}

/// Contextual help for the focused field
fn render_notes(app: &App, frame: &mut Frame, area: Rect) {
    let key = app
        .wizard
        .focused_field()
        .map(|spec| spec.field.key())
        .unwrap_or("default");
    let (title, description) = app.field_help.get_or_default(key);

    let notes_block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let mut lines = vec![Line::styled(description.to_string(), Style::default().fg(Color::Gray))];

    // The theme picks the template, so preview it
    if key == Field::ThemeCategory.key() {
        let template = template_for(app.wizard.form().theme_category);
        lines.push(Line::from(""));
        lines.push(Line::styled(
            template.name.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
        lines.push(Line::styled(template.description.clone(), Style::default().fg(Color::Gray)));
        for feature in &template.features {
            lines.push(Line::styled(format!("  • {}", feature), Style::default().fg(Color::White)));
        }
    }

    // Checkout fields build the redirect URL
    if key == Field::AffiliateId.key() || key == Field::CheckoutLanguage.key() {
        lines.push(Line::from(""));
        lines.push(Line::styled("Checkout redirect:", Style::default().fg(Color::Yellow)));
        lines.push(Line::styled(app.wizard.form().checkout_url(), Style::default().fg(Color::White)));
    }

    let notes = Paragraph::new(lines)
        .block(notes_block)
        .wrap(Wrap { trim: false });
    frame.render_widget(notes, area);
}

fn field_label(spec: &FieldSpec) -> String {
    if spec.required && spec.kind != FieldKind::Toggle {
        format!("{}*", spec.field.label())
    } else {
        spec.field.label().to_string()
    }
}

/// Field value as shown on screen; secrets are masked
fn masked_value(spec: &FieldSpec, form: &FormState) -> String {
    let value = form.display_value(spec.field);
    if spec.kind == FieldKind::Secret {
        "•".repeat(value.chars().count())
    } else {
        value
    }
}

fn render_field_line(
    label: &str,
    value: &str,
    selected: bool,
    editing: bool,
    placeholder: bool,
    hint: &str,
) -> Line<'static> {
    let prefix = if selected { "> " } else { "  " };
    let label_style = Style::default().fg(Color::Yellow);
    let value_style = if placeholder {
        Style::default().fg(Color::DarkGray)
    } else if editing {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else if selected {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let hint_style = Style::default().fg(Color::DarkGray);

    Line::from(vec![
        Span::styled(prefix.to_string(), if selected { Style::default().fg(Color::Yellow) } else { Style::default() }),
        Span::styled(format!("{:width$}", label, width = LABEL_WIDTH), label_style),
        Span::styled(format!("{:24}", value), value_style),
        Span::styled(if selected && !editing { format!(" {}", hint) } else { String::new() }, hint_style),
    ])
}

fn render_toggle_line(label: &str, enabled: bool, selected: bool) -> Line<'static> {
    let prefix = if selected { "> " } else { "  " };
    let checkbox = if enabled { "[x]" } else { "[ ]" };
    let label_style = Style::default().fg(Color::Yellow);
    let value_style = if selected {
        Style::default().fg(if enabled { Color::Green } else { Color::Red }).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(if enabled { Color::Green } else { Color::DarkGray })
    };

    Line::from(vec![
        Span::styled(prefix.to_string(), if selected { Style::default().fg(Color::Yellow) } else { Style::default() }),
        Span::styled(format!("{:width$}", label, width = LABEL_WIDTH), label_style),
        Span::styled(checkbox.to_string(), value_style),
    ])
}

// =============================================================================
// Step 4: Review & Submit
// =============================================================================

fn render_review(app: &App, frame: &mut Frame, area: Rect) {
    let wizard = &app.wizard;
    let form = wizard.form();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Min(12),     // Summary
            Constraint::Length(2),   // Submission state
        ])
        .split(area);

    let mut lines = Vec::new();
    for (index, step) in STEPS.iter().enumerate().filter(|(_, s)| !s.fields.is_empty()) {
        let (mark, color) = if wizard.valid().get(index).copied().unwrap_or(false) {
            ("✓", Color::Green)
        } else {
            ("!", Color::Red)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", mark), Style::default().fg(color)),
            Span::styled(
                format!("{}. {}", step.number(), step.name),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
        ]));

        for spec in step.fields {
            let value = masked_value(spec, form);
            let value = if value.is_empty() { "-".to_string() } else { value };
            lines.push(Line::from(vec![
                Span::styled(
                    format!("    {:width$}", spec.field.label(), width = LABEL_WIDTH),
                    Style::default().fg(Color::Yellow),
                ),
                Span::raw(value),
            ]));
        }
        lines.push(Line::from(""));
    }

    let template = template_for(form.theme_category);
    lines.push(Line::from(vec![
        Span::styled(format!("    {:width$}", "Template", width = LABEL_WIDTH), Style::default().fg(Color::Yellow)),
        Span::raw(template.name),
    ]));
    lines.push(Line::from(vec![
        Span::styled(format!("    {:width$}", "Checkout URL", width = LABEL_WIDTH), Style::default().fg(Color::Yellow)),
        Span::raw(form.checkout_url()),
    ]));

    let summary = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(summary, chunks[0]);

    let state = if wizard.is_submitting() {
        Paragraph::new("Creating Store...")
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    } else if let Some(ref error) = wizard.submission().error_message {
        Paragraph::new(format!("Store creation failed: {}", error)).style(Style::default().fg(Color::Red))
    } else {
        Paragraph::new("")
    };
    frame.render_widget(state.alignment(Alignment::Center), chunks[1]);
}

// =============================================================================
// Success
// =============================================================================

fn render_success(app: &App, frame: &mut Frame, area: Rect) {
    let submission = app.wizard.submission();
    let store = app.wizard.created_store();

    let mut lines = vec![
        Line::from(""),
        Line::styled(
            "Store Creation Successful!",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
    ];

    if let Some(ref url) = submission.store_url {
        lines.push(Line::from(vec![
            Span::styled("Store URL:      ", Style::default().fg(Color::Yellow)),
            Span::styled(url.clone(), Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED)),
        ]));
    }
    if let Some(store) = store {
        lines.push(Line::from(vec![
            Span::styled("Store ID:       ", Style::default().fg(Color::Yellow)),
            Span::raw(store.id.clone()),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Domain:         ", Style::default().fg(Color::Yellow)),
            Span::raw(store.myshopify_domain.clone()),
        ]));
    }
    if let Some(finished_at) = submission.finished_at {
        lines.push(Line::from(vec![
            Span::styled("Created:        ", Style::default().fg(Color::Yellow)),
            Span::raw(finished_at.format("%Y-%m-%d %H:%M:%S").to_string()),
        ]));
    }

    if let Some(monitor) = app.monitor.as_ref() {
        lines.push(Line::from(""));
        let summary = if monitor.is_complete() {
            format!("Storefront live at {}", monitor.state().store_url.as_deref().unwrap_or("-"))
        } else if let Some(error) = monitor.error() {
            format!("Provisioning failed: {}", error)
        } else {
            format!("Provisioning... {}%", monitor.state().progress)
        };
        lines.push(Line::styled(summary, Style::default().fg(Color::Gray)));
    }

    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    frame.render_widget(body, area);
}

// =============================================================================
// Utility
// =============================================================================

pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
