use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, View};
use crate::input::InputLine;
use crate::tui::AppEvent;

const PAGE_LINES: u16 = 10;
const WHEEL_LINES: u16 = 3;

pub async fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::ScrollUp => {
            if let Some(chat) = app.active_chat_mut() {
                chat.scroll_up(WHEEL_LINES);
            }
        }
        AppEvent::ScrollDown => {
            if let Some(chat) = app.active_chat_mut() {
                chat.scroll_down(WHEEL_LINES);
            }
        }
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => app.tick_animation(),
    }

    app.poll_tasks().await;
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Global keys that work in any view
    if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
        app.should_quit = true;
        return;
    }

    match app.view {
        View::Landing => handle_landing(app, key, ctrl),
        View::Chat(_) => handle_chat(app, key, ctrl),
    }
}

fn handle_landing(app: &mut App, key: KeyEvent, ctrl: bool) {
    // The alert is modal
    if app.landing.alert().is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            app.landing.dismiss_alert();
        }
        return;
    }

    match key.code {
        KeyCode::Tab => app.next_view(),
        KeyCode::BackTab => app.prev_view(),
        KeyCode::Enter => app.submit_landing(),
        _ => {
            if let Some(input) = app.landing.input_mut() {
                edit_input(input, key, ctrl);
            }
        }
    }
}

fn handle_chat(app: &mut App, key: KeyEvent, ctrl: bool) {
    match key.code {
        KeyCode::Tab => app.next_view(),
        KeyCode::BackTab => app.prev_view(),
        KeyCode::Esc => app.view = View::Landing,
        KeyCode::Char('w') if ctrl => app.close_active_chat(),
        KeyCode::Enter => app.send_chat(),
        _ => {
            let Some(chat) = app.active_chat_mut() else {
                return;
            };
            match key.code {
                KeyCode::Char('t') if ctrl => chat.session.toggle_presentation_mode(),
                KeyCode::PageUp => chat.scroll_up(PAGE_LINES),
                KeyCode::PageDown => chat.scroll_down(PAGE_LINES),
                KeyCode::Up => chat.scroll_up(1),
                KeyCode::Down => chat.scroll_down(1),
                _ => {
                    if let Some(input) = chat.session.input_mut() {
                        edit_input(input, key, ctrl);
                    }
                }
            }
        }
    }
}

fn edit_input(input: &mut InputLine, key: KeyEvent, ctrl: bool) {
    match key.code {
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.left(),
        KeyCode::Right => input.right(),
        KeyCode::Home => input.home(),
        KeyCode::End => input.end(),
        KeyCode::Char(c) if !ctrl => input.insert(c),
        _ => {}
    }
}
