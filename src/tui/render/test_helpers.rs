use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::document::Document;
use crate::model::task::Task;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Full-screen render of `app` at the default test size
pub fn render_app(app: &App) -> String {
    render_to_string(TERM_W, TERM_H, |frame, _| super::render(frame, app))
}

/// In-memory app on the seed document
pub fn seed_app() -> App {
    App::in_memory(Document::seed())
}

/// In-memory app whose tasks are given as `(text, context)` pairs
pub fn app_with_tasks(tasks: &[(&str, &str)]) -> App {
    let tasks: Vec<Task> = tasks
        .iter()
        .zip(1..)
        .map(|((text, context), id)| Task::new(id, *text, *context))
        .collect();
    let next_id = tasks.len() as u64 + 1;
    App::in_memory(Document {
        tasks,
        next_id,
        contexts: Vec::new(),
    })
}
