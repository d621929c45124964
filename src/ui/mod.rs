pub mod screens;
pub mod widgets;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;

use crate::app::{App, Screen};

/// Draw the current screen. Dialogs render over the wizard.
pub fn render(app: &App, frame: &mut Frame) {
    screens::create_wizard::render(app, frame);

    match &app.screen {
        Screen::Wizard => {}
        Screen::Provisioning => screens::provisioning::render(app, frame),
        Screen::Help => screens::help::render(app, frame),
        Screen::Confirm(action) => screens::confirm::render(action, frame),
    }
}

/// Route a key press to the active screen
pub fn handle_key(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return Ok(());
    }

    // '?' is plain text while a field is being edited
    let typing = app.screen == Screen::Wizard && app.wizard.editing;
    if key.code == KeyCode::Char('?') && !typing && app.screen != Screen::Help {
        app.push_screen(Screen::Help);
        return Ok(());
    }

    match app.screen.clone() {
        Screen::Wizard => screens::create_wizard::handle_key(app, key),
        Screen::Provisioning => screens::provisioning::handle_key(app, key),
        Screen::Help => screens::help::handle_key(app, key),
        Screen::Confirm(action) => screens::confirm::handle_key(app, action, key),
    }
}
