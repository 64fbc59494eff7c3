use crate::application::{App, AppMode};
use crate::domain::PageId;
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = outer_chunks(f.area());

    render_header(f, app, chunks[0]);
    render_nav_bar(f, app, chunks[1]);
    render_page(f, app, chunks[2]);
    render_status_bar(f, app, chunks[3]);

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

fn outer_chunks(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area)
}

fn upload_chunks(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area)
}

/// Screen region of the drop zone, used for mouse hit testing. Present
/// only while the upload page is showing.
pub fn drop_zone_rect(area: Rect, app: &App) -> Option<Rect> {
    if app.navigator.visible() == Some(PageId::Upload) {
        let outer = outer_chunks(area);
        let chunks = upload_chunks(outer[2]);
        Some(chunks[0])
    } else {
        None
    }
}

/// Whether a point (column, row) falls inside the drop zone.
pub fn drop_zone_contains(zone: Option<Rect>, column: u16, row: u16) -> bool {
    zone.is_some_and(|z| z.contains(Position::new(column, row)))
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let header = Paragraph::new(format!(
        "deblur-tui - Image Deblurring Client | {} | {}",
        app.server,
        app.navigator.fragment()
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_nav_bar(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();
    for (index, page) in PageId::ALL.into_iter().enumerate() {
        let label = format!(" [{}] {} ", index + 1, page.title());
        let style = if app.navigator.is_active(page) {
            Style::default().bg(Color::Blue).fg(Color::White)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_page(f: &mut Frame, app: &App, area: Rect) {
    match app.navigator.visible() {
        Some(PageId::Welcome) => render_welcome(f, area),
        Some(PageId::Upload) => render_upload(f, app, area),
        Some(PageId::About) => render_about(f, area),
        None => {
            let empty = Paragraph::new("Nothing here. Press 1 to return to the welcome page.")
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(empty, area);
        }
    }
}

fn render_welcome(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Sharpen your blurry photos",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("  Pick an image, send it to the deblurring server and"),
        Line::from("  download the enhanced result."),
        Line::from(""),
        Line::from(Span::styled(
            "  Press g (or Enter) to get started.",
            Style::default().fg(Color::Green),
        )),
    ];
    let welcome = Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("Welcome"));
    f.render_widget(welcome, area);
}

fn render_about(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from("  Images are processed by a NAFNet deblurring model running"),
        Line::from("  behind the configured server. Nothing is processed locally;"),
        Line::from("  the file is uploaded once and the server answers with the"),
        Line::from("  location of the enhanced image."),
        Line::from(""),
        Line::from("  Pass the server base URL as the first argument or via the"),
        Line::from("  DEBLUR_SERVER environment variable."),
    ];
    let about = Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("About"));
    f.render_widget(about, area);
}

fn render_upload(f: &mut Frame, app: &App, area: Rect) {
    let chunks = upload_chunks(area);
    render_drop_zone(f, app, chunks[0]);
    render_controls(f, app, chunks[1]);
    render_error_banner(f, app, chunks[2]);
    render_preview(f, app, chunks[3]);
}

fn render_drop_zone(f: &mut Frame, app: &App, area: Rect) {
    let border_style = if app.ui.drag_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let mut lines = vec![
        Line::from(""),
        Line::from("  Drop an image here (paste its path), click, or press o to browse."),
    ];
    if let Some(file) = app.lifecycle.selected_file() {
        lines.push(Line::from(Span::styled(
            format!("  Selected: {} ({} bytes)", file.name, file.bytes.len()),
            Style::default().fg(Color::Green),
        )));
    }
    let zone = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title("Upload"),
    );
    f.render_widget(zone, area);
}

fn render_controls(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();

    if app.ui.busy {
        spans.push(Span::styled(
            " Deblurring... ",
            Style::default().fg(Color::Yellow),
        ));
    } else {
        let submit_style = if app.ui.submit_enabled {
            Style::default().fg(Color::Green)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        spans.push(Span::styled(" [Enter] Deblur ", submit_style));
    }

    spans.push(Span::raw(" [o] Browse  [r] Reset "));
    if app.ui.download_visible {
        spans.push(Span::styled(
            " [d] Download  [c] Copy URL ",
            Style::default().fg(Color::Cyan),
        ));
    }

    let controls =
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(controls, area);
}

fn render_error_banner(f: &mut Frame, app: &App, area: Rect) {
    if let Some(ref message) = app.ui.error_message {
        let banner = Paragraph::new(message.as_str())
            .style(Style::default().fg(Color::Red))
            .block(Block::default().borders(Borders::ALL).title("Error"));
        f.render_widget(banner, area);
    }
}

fn render_preview(f: &mut Frame, app: &App, area: Rect) {
    if !app.ui.preview_visible {
        return;
    }
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let original = Paragraph::new(app.ui.original_source.as_deref().unwrap_or("-"))
        .block(Block::default().borders(Borders::ALL).title("Original"));
    f.render_widget(original, halves[0]);

    let result = Paragraph::new(app.ui.result_source.as_deref().unwrap_or("-"))
        .block(Block::default().borders(Borders::ALL).title("Deblurred"));
    f.render_widget(result, halves[1]);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let text = match app.mode {
        AppMode::Normal => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                "1/2/3: pages | g: get started | [ / ]: back/forward | F1/?: help | q: quit"
                    .to_string()
            }
        }
        AppMode::PickFile => format!(
            "Open image: {} (Enter to load, Esc to cancel)",
            app.path_input
        ),
        AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help"
            .to_string(),
    };

    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::PickFile => Style::default().fg(Color::Yellow),
            AppMode::Help => Style::default().fg(Color::Cyan),
        });
    f.render_widget(status, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("deblur-tui Help")
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

fn get_help_text() -> String {
    r#"DEBLUR-TUI KEY REFERENCE

=== PAGES ===
1               Welcome page
2               Upload page
3               About page
g or Enter      Get started (jump to the upload page)
[ / ]           History back / forward
                (Alt+Left / Alt+Right also work)

=== UPLOAD PAGE ===
o               Browse for an image (type its path)
Paste a path    Same as dropping the file onto the zone
Click the zone  Open the browse prompt
Enter           Send the image to the deblurring server
r               Reset the workflow (clears selection and result)

=== WHEN A RESULT IS READY ===
d               Download the enhanced image
                (saved as "enhanced_image.png")
c               Copy the result URL to the clipboard

=== GENERAL ===
F1 or ?         Show this help
q               Quit
Esc             Close prompts and popups

The server base URL comes from the first command line argument,
then the DEBLUR_SERVER environment variable, and defaults to
http://127.0.0.1:5000. The page you quit on is restored on the
next start."#
        .to_string()
}
