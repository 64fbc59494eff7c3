use crate::application::{App, AppMode};
use crate::domain::PageId;
use crate::infrastructure::ImageRepository;
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use super::ui::drop_zone_contains;

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::PickFile => Self::handle_pick_file_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        // Browser-style history shortcuts
        if modifiers.contains(KeyModifiers::ALT) {
            match key {
                KeyCode::Left => {
                    app.go_back();
                    return;
                }
                KeyCode::Right => {
                    app.go_forward();
                    return;
                }
                _ => {}
            }
        }

        match key {
            // Navigation triggers, each with its declared target page
            KeyCode::Char('1') => app.navigate(PageId::Welcome, true),
            KeyCode::Char('2') => app.navigate(PageId::Upload, true),
            KeyCode::Char('3') => app.navigate(PageId::About, true),
            KeyCode::Char('g') => app.get_started(),
            KeyCode::Char('[') => app.go_back(),
            KeyCode::Char(']') => app.go_forward(),
            KeyCode::F(1) | KeyCode::Char('?') => app.open_help(),
            KeyCode::Enter if app.navigator.visible() == Some(PageId::Welcome) => {
                app.get_started()
            }
            // The workflow shortcuts exist only on the upload page
            KeyCode::Char('o') if app.upload_page_active() => app.start_pick_file(),
            KeyCode::Enter if app.upload_page_active() => app.submit(),
            KeyCode::Char('r') if app.upload_page_active() => app.reset(),
            KeyCode::Char('d') if app.upload_page_active() => app.download(),
            KeyCode::Char('c') if app.upload_page_active() => app.copy_result(),
            KeyCode::Char('q') => {
                // Will be handled by main loop
            }
            _ => {}
        }
    }

    fn handle_pick_file_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                let path = app.path_input.trim().to_string();
                app.cancel_pick_file();
                match ImageRepository::read_image(&path) {
                    Ok((name, bytes)) => app.choose_file(&name, bytes),
                    Err(error) => app.report_pick_failure(&path, &error),
                }
            }
            KeyCode::Esc => {
                app.cancel_pick_file();
            }
            KeyCode::Backspace => {
                if app.cursor_position > 0 {
                    app.path_input.remove(app.cursor_position - 1);
                    app.cursor_position -= 1;
                }
            }
            KeyCode::Delete => {
                if app.cursor_position < app.path_input.len() {
                    app.path_input.remove(app.cursor_position);
                }
            }
            KeyCode::Left => {
                if app.cursor_position > 0 {
                    app.cursor_position -= 1;
                }
            }
            KeyCode::Right => {
                if app.cursor_position < app.path_input.len() {
                    app.cursor_position += 1;
                }
            }
            KeyCode::Home => {
                app.cursor_position = 0;
            }
            KeyCode::End => {
                app.cursor_position = app.path_input.len();
            }
            KeyCode::Char(c) => {
                app.path_input.insert(app.cursor_position, c);
                app.cursor_position += 1;
            }
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.close_help();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if app.help_scroll > 0 {
                    app.help_scroll -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }

    /// Terminal emulators deliver a dropped file as a pasted path; this
    /// is the drop half of the drag-and-drop contract.
    pub fn handle_paste(app: &mut App, text: &str) {
        match app.mode {
            AppMode::PickFile => {
                app.path_input.insert_str(app.cursor_position, text);
                app.cursor_position += text.len();
            }
            AppMode::Normal if app.upload_page_active() => {
                // Only the first dropped item counts
                let path = match text.lines().next() {
                    Some(line) => line.trim(),
                    None => return,
                };
                if path.is_empty() {
                    return;
                }
                match ImageRepository::read_image(path) {
                    Ok((name, bytes)) => app.on_drop(&name, bytes),
                    Err(error) => app.report_pick_failure(path, &error),
                }
            }
            _ => {}
        }
    }

    /// Mouse handling over the drop zone: hovering toggles the
    /// drag-active highlight, a click opens the browse prompt.
    pub fn handle_mouse(app: &mut App, mouse: MouseEvent, drop_zone: Option<Rect>) {
        if !matches!(app.mode, AppMode::Normal) {
            return;
        }
        let inside = drop_zone_contains(drop_zone, mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                if inside && !app.ui.drag_active {
                    app.on_drag_enter();
                } else if !inside && app.ui.drag_active {
                    app.on_drag_leave();
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if inside {
                    app.start_pick_file();
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LifecycleState;
    use std::io::Write;

    #[test]
    fn test_number_keys_navigate() {
        let mut app = App::default();

        InputHandler::handle_key_event(&mut app, KeyCode::Char('2'), KeyModifiers::NONE);
        assert_eq!(app.navigator.visible(), Some(PageId::Upload));

        InputHandler::handle_key_event(&mut app, KeyCode::Char('3'), KeyModifiers::NONE);
        assert_eq!(app.navigator.visible(), Some(PageId::About));

        InputHandler::handle_key_event(&mut app, KeyCode::Char('1'), KeyModifiers::NONE);
        assert_eq!(app.navigator.visible(), Some(PageId::Welcome));
    }

    #[test]
    fn test_get_started_key() {
        let mut app = App::default();
        InputHandler::handle_key_event(&mut app, KeyCode::Char('g'), KeyModifiers::NONE);
        assert_eq!(app.navigator.visible(), Some(PageId::Upload));
    }

    #[test]
    fn test_enter_on_welcome_is_get_started() {
        let mut app = App::default();
        InputHandler::handle_key_event(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.navigator.visible(), Some(PageId::Upload));
    }

    #[test]
    fn test_bracket_keys_walk_history() {
        let mut app = App::default();
        InputHandler::handle_key_event(&mut app, KeyCode::Char('2'), KeyModifiers::NONE);
        InputHandler::handle_key_event(&mut app, KeyCode::Char('['), KeyModifiers::NONE);
        assert_eq!(app.navigator.visible(), Some(PageId::Welcome));
        InputHandler::handle_key_event(&mut app, KeyCode::Char(']'), KeyModifiers::NONE);
        assert_eq!(app.navigator.visible(), Some(PageId::Upload));
    }

    #[test]
    fn test_alt_arrows_walk_history() {
        let mut app = App::default();
        InputHandler::handle_key_event(&mut app, KeyCode::Char('2'), KeyModifiers::NONE);
        InputHandler::handle_key_event(&mut app, KeyCode::Left, KeyModifiers::ALT);
        assert_eq!(app.navigator.visible(), Some(PageId::Welcome));
        InputHandler::handle_key_event(&mut app, KeyCode::Right, KeyModifiers::ALT);
        assert_eq!(app.navigator.visible(), Some(PageId::Upload));
    }

    #[test]
    fn test_workflow_keys_only_on_upload_page() {
        let mut app = App::default();

        // On welcome nothing happens
        InputHandler::handle_key_event(&mut app, KeyCode::Char('o'), KeyModifiers::NONE);
        assert_eq!(app.mode, AppMode::Normal);
        InputHandler::handle_key_event(&mut app, KeyCode::Char('r'), KeyModifiers::NONE);
        assert_eq!(*app.lifecycle.state(), LifecycleState::Idle);

        app.get_started();
        InputHandler::handle_key_event(&mut app, KeyCode::Char('o'), KeyModifiers::NONE);
        assert_eq!(app.mode, AppMode::PickFile);
    }

    #[test]
    fn test_submit_key_without_file_shows_banner() {
        let mut app = App::default();
        app.get_started();
        InputHandler::handle_key_event(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(
            app.ui.error_message.as_deref(),
            Some("Please upload an image first.")
        );
    }

    #[test]
    fn test_pick_file_typing_and_cancel() {
        let mut app = App::default();
        app.get_started();
        app.start_pick_file();

        for c in "cat.png".chars() {
            InputHandler::handle_key_event(&mut app, KeyCode::Char(c), KeyModifiers::NONE);
        }
        assert_eq!(app.path_input, "cat.png");

        InputHandler::handle_key_event(&mut app, KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(app.path_input, "cat.pn");

        InputHandler::handle_key_event(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.path_input.is_empty());
    }

    #[test]
    fn test_pick_file_loads_image_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&[5, 6, 7]).unwrap();

        let mut app = App::default();
        app.get_started();
        app.start_pick_file();
        app.path_input = path.to_str().unwrap().to_string();
        app.cursor_position = app.path_input.len();

        InputHandler::handle_key_event(&mut app, KeyCode::Enter, KeyModifiers::NONE);

        assert_eq!(app.mode, AppMode::Normal);
        assert!(matches!(
            app.lifecycle.state(),
            LifecycleState::Previewing { file } if file.name == "photo.png"
        ));
        assert!(app.ui.preview_visible);
    }

    #[test]
    fn test_pick_file_missing_path_reports_on_banner() {
        let mut app = App::default();
        app.get_started();
        app.start_pick_file();
        app.path_input = "/definitely/not/here.png".to_string();
        app.cursor_position = app.path_input.len();

        InputHandler::handle_key_event(&mut app, KeyCode::Enter, KeyModifiers::NONE);

        assert_eq!(app.mode, AppMode::Normal);
        assert!(app
            .ui
            .error_message
            .as_deref()
            .unwrap()
            .contains("/definitely/not/here.png"));
        assert_eq!(*app.lifecycle.state(), LifecycleState::Idle);
    }

    #[test]
    fn test_paste_on_upload_page_acts_as_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dropped.png");
        std::fs::write(&path, [1u8]).unwrap();

        let mut app = App::default();
        app.get_started();

        // Multi-line paste: only the first item counts
        let pasted = format!("{}\n/some/other/file.png", path.display());
        InputHandler::handle_paste(&mut app, &pasted);

        assert!(matches!(
            app.lifecycle.state(),
            LifecycleState::Previewing { file } if file.name == "dropped.png"
        ));
    }

    #[test]
    fn test_paste_off_upload_page_is_ignored() {
        let mut app = App::default();
        InputHandler::handle_paste(&mut app, "/tmp/whatever.png");
        assert_eq!(*app.lifecycle.state(), LifecycleState::Idle);
        assert!(app.ui.error_message.is_none());
    }

    #[test]
    fn test_mouse_hover_toggles_drag_highlight() {
        let mut app = App::default();
        app.get_started();
        let zone = Some(Rect::new(0, 2, 20, 6));

        let hover = MouseEvent {
            kind: MouseEventKind::Moved,
            column: 5,
            row: 4,
            modifiers: KeyModifiers::NONE,
        };
        InputHandler::handle_mouse(&mut app, hover, zone);
        assert!(app.ui.drag_active);

        let away = MouseEvent {
            kind: MouseEventKind::Moved,
            column: 50,
            row: 20,
            modifiers: KeyModifiers::NONE,
        };
        InputHandler::handle_mouse(&mut app, away, zone);
        assert!(!app.ui.drag_active);
    }

    #[test]
    fn test_mouse_click_on_zone_opens_browse_prompt() {
        let mut app = App::default();
        app.get_started();
        let zone = Some(Rect::new(0, 2, 20, 6));

        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 3,
            modifiers: KeyModifiers::NONE,
        };
        InputHandler::handle_mouse(&mut app, click, zone);
        assert_eq!(app.mode, AppMode::PickFile);
    }

    #[test]
    fn test_help_mode_keys() {
        let mut app = App::default();
        InputHandler::handle_key_event(&mut app, KeyCode::Char('?'), KeyModifiers::NONE);
        assert_eq!(app.mode, AppMode::Help);

        InputHandler::handle_key_event(&mut app, KeyCode::Down, KeyModifiers::NONE);
        InputHandler::handle_key_event(&mut app, KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(app.help_scroll, 2);

        InputHandler::handle_key_event(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(app.mode, AppMode::Normal);
    }
}
