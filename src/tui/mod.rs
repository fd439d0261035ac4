pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::ThemeColors;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

use crate::scoring::Preset;

pub async fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Buffer stderr while TUI is active to prevent output corrupting the display
    crate::stderr_buffer::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();

    let mut events = EventHandler::new(250); // 250ms tick

    loop {
        terminal.draw(|frame| ui::draw(frame, &mut app))?;

        match events.next().await {
            Event::Key(key) => handle_key_event(&mut app, key),
            Event::Tick => app.update_flash(),
        }

        if app.should_quit {
            break;
        }
    }

    ratatui::restore();

    // Flush buffered stderr messages now that the terminal is restored
    for msg in crate::stderr_buffer::drain() {
        eprintln!("{}", msg);
    }

    Ok(())
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    match app.input_mode {
        app::InputMode::Normal => match key.code {
            // Quit
            KeyCode::Char('q') => app.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.should_quit = true
            }

            // Ranking navigation
            KeyCode::Char('j') => app.next_row(),
            KeyCode::Char('k') => app.previous_row(),

            // Weight panel: arrows select and adjust
            KeyCode::Down => app.select_next_factor(),
            KeyCode::Up => app.select_previous_factor(),
            KeyCode::Right => app.adjust_selected_weight(1.0),
            KeyCode::Left => app.adjust_selected_weight(-1.0),

            // Presets on digit keys; 0 resets to equal
            KeyCode::Char(c @ '1'..='7') => {
                let idx = c as usize - '1' as usize;
                app.apply_preset(Preset::ALL[idx]);
            }
            KeyCode::Char('0') => app.apply_preset(Preset::Equal),

            // Year navigation
            KeyCode::Char('[') | KeyCode::Char('h') => app.year_back(),
            KeyCode::Char(']') | KeyCode::Char('l') => app.year_forward(),

            // Score field toggle
            KeyCode::Char('p') => app.toggle_field(),

            // Trend selection
            KeyCode::Char('t') => app.toggle_trend_country(),

            // Tab switching
            KeyCode::Tab => app.next_tab(),

            // Help
            KeyCode::Char('?') => app.show_help(),

            _ => {}
        },
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::types::test_record;
    use crate::dataset::RecordStore;
    use crate::scoring::{Factor, ScoreField, WeightProfile};
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn sample_app() -> App {
        let (store, _) = RecordStore::from_records(vec![
            test_record("A", 2020, 6.0),
            test_record("B", 2021, 5.0),
        ]);
        App::new(store, WeightProfile::default(), ScoreField::Personalized)
    }

    #[test]
    fn test_quit_key() {
        let mut app = sample_app();
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_preset_keys() {
        let mut app = sample_app();
        handle_key_event(&mut app, key(KeyCode::Char('3')));
        assert_eq!(app.weights.get(Factor::GdpPerCapita), 40.0); // wealth

        handle_key_event(&mut app, key(KeyCode::Char('0')));
        assert_eq!(app.weights.get(Factor::GdpPerCapita), 16.67); // equal
    }

    #[test]
    fn test_help_mode_swallows_keys() {
        let mut app = sample_app();
        handle_key_event(&mut app, key(KeyCode::Char('?')));
        assert_eq!(app.input_mode, app::InputMode::Help);

        // In help mode, 'q' dismisses instead of quitting
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert_eq!(app.input_mode, app::InputMode::Normal);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_year_keys() {
        let mut app = sample_app();
        assert_eq!(app.year(), 2021);
        handle_key_event(&mut app, key(KeyCode::Char('[')));
        assert_eq!(app.year(), 2020);
        handle_key_event(&mut app, key(KeyCode::Char(']')));
        assert_eq!(app.year(), 2021);
    }

    #[test]
    fn test_weight_adjust_keys() {
        let mut app = sample_app();
        let factor = app.current_factor();
        let before = app.weights.get(factor);
        handle_key_event(&mut app, key(KeyCode::Right));
        assert_eq!(app.weights.get(factor), before + 5.0);
        handle_key_event(&mut app, key(KeyCode::Left));
        assert_eq!(app.weights.get(factor), before);
    }
}
