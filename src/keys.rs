use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use crate::state::signup::FocusField;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;

    // Text entry swallows everything except Enter and Esc.
    if in_editing_mode(&guard) {
        let request = handle_editing_key(key_event, &mut guard);
        if let Some(request) = request {
            drop(guard);
            let _ = network_requests.send(request).await;
        }
        return;
    }

    let mut outgoing: Option<NetworkRequest> = None;
    let level_choice = guard
        .state
        .league
        .league
        .as_ref()
        .map(|l| l.requires_level_choice())
        .unwrap_or(true);

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::League),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Signup),
        (_, Char('3'), _) => guard.update_tab(MenuItem::Standings),
        (_, Char('4'), _) => guard.update_tab(MenuItem::Schedule),
        (_, Char('5'), _) => guard.update_tab(MenuItem::Guide),
        (_, Char('6'), _) => {
            guard.update_tab(MenuItem::Cities);
            if guard.state.cities.cities.is_empty() {
                outgoing = Some(NetworkRequest::LoadCities);
            }
        }
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // League lookup
        (MenuItem::League, Char('/') | Char('e'), _) => {
            guard.state.league.editing = true;
        }
        (MenuItem::League, KeyCode::Enter, _) => {
            if let Some(slug) = guard.state.league.submit_slug() {
                outgoing = Some(NetworkRequest::LoadLeague { slug });
            }
        }

        // Signup form
        (MenuItem::Signup, Char('j') | KeyCode::Down | KeyCode::Tab, _) => {
            guard.state.signup.focus_next(level_choice);
        }
        (MenuItem::Signup, Char('k') | KeyCode::Up, _) => {
            guard.state.signup.focus_prev(level_choice);
        }
        (MenuItem::Signup, Char('e') | KeyCode::Enter, _) => {
            if guard.state.signup.focus == FocusField::Level {
                guard.state.signup.form.cycle_level();
            } else {
                guard.state.signup.editing = true;
            }
        }
        (MenuItem::Signup, Char('a'), _) => guard.state.signup.toggle_path(),
        (MenuItem::Signup, Char('l'), _) => {
            if level_choice {
                guard.state.signup.form.cycle_level();
            }
        }
        (MenuItem::Signup, Char('s'), _) => outgoing = guard.submit_signup(),
        (MenuItem::Signup, Char('d'), _) => outgoing = guard.apply_discount(),

        // Standings navigation
        (MenuItem::Standings, Char('j') | KeyCode::Down, _) => {
            guard.state.standings.navigate_down();
        }
        (MenuItem::Standings, Char('k') | KeyCode::Up, _) => {
            guard.state.standings.navigate_up();
        }

        // Schedule navigation
        (MenuItem::Schedule, Char('j') | KeyCode::Down, _) => {
            guard.state.schedule.scroll_offset = guard.state.schedule.scroll_offset.saturating_add(1);
        }
        (MenuItem::Schedule, Char('k') | KeyCode::Up, _) => {
            guard.state.schedule.scroll_offset = guard.state.schedule.scroll_offset.saturating_sub(1);
        }
        (MenuItem::Schedule, Char('r'), _) => guard.state.schedule.cycle_round(),

        // City admin
        (MenuItem::Cities, Char('/'), _) => guard.state.cities.editing = true,
        (MenuItem::Cities, Char('j') | KeyCode::Down, _) => guard.state.cities.navigate_down(),
        (MenuItem::Cities, Char('k') | KeyCode::Up, _) => guard.state.cities.navigate_up(),

        // Global
        (_, Char('L'), _) => guard.toggle_locale(),
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }

    if let Some(request) = outgoing {
        drop(guard);
        let _ = network_requests.send(request).await;
    }
}

fn in_editing_mode(app: &App) -> bool {
    match app.state.active_tab {
        MenuItem::League => app.state.league.editing,
        MenuItem::Signup => app.state.signup.editing,
        MenuItem::Cities => app.state.cities.editing,
        _ => false,
    }
}

/// Route keystrokes into the text field the current tab is editing.
/// Enter commits, Esc cancels; both leave editing mode.
fn handle_editing_key(key_event: KeyEvent, app: &mut App) -> Option<NetworkRequest> {
    match app.state.active_tab {
        MenuItem::League => match key_event.code {
            KeyCode::Enter => {
                let slug = app.state.league.submit_slug()?;
                Some(NetworkRequest::LoadLeague { slug })
            }
            KeyCode::Esc => {
                app.state.league.editing = false;
                None
            }
            KeyCode::Backspace => {
                app.state.league.slug_input.pop();
                None
            }
            Char(c) => {
                app.state.league.slug_input.push(c);
                None
            }
            _ => None,
        },
        MenuItem::Signup => match key_event.code {
            KeyCode::Enter | KeyCode::Esc => {
                app.state.signup.editing = false;
                None
            }
            KeyCode::Backspace => {
                if app.state.signup.focus == FocusField::Discount {
                    app.state.discount.backspace();
                } else {
                    app.state.signup.backspace();
                }
                None
            }
            Char(c) => {
                if app.state.signup.focus == FocusField::Discount {
                    app.state.discount.edit_char(c);
                } else {
                    app.state.signup.edit_char(c);
                }
                None
            }
            _ => None,
        },
        MenuItem::Cities => match key_event.code {
            KeyCode::Enter | KeyCode::Esc => {
                app.state.cities.editing = false;
                None
            }
            KeyCode::Backspace => {
                app.state.cities.backspace(Instant::now());
                None
            }
            Char(c) => {
                app.state.cities.edit_char(c, Instant::now());
                None
            }
            _ => None,
        },
        _ => None,
    }
}
