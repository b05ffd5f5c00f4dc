use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{error, info};

use crate::io::store_io::Storage;
use crate::model::config::Config;
use crate::model::context::ContextRegistry;
use crate::model::document::Document;
use crate::model::task::{Task, TaskId};
use crate::ops::TaskError;
use crate::ops::context_ops;
use crate::ops::task_ops;

use super::input;
use super::keymap::{KeyContext, Keymap};
use super::render;
use super::theme::Theme;
use super::undo::UndoStack;

/// Maximum characters in a dialog's text buffer
pub const TEXT_LIMIT: usize = 200;
/// Maximum characters in one date sub-field (room for the literal "clear")
pub const DATE_FIELD_LIMIT: usize = 5;
/// Width of one kanban column
pub const KANBAN_COLUMN_WIDTH: u16 = 35;
/// Gap between kanban columns
pub const KANBAN_SEPARATOR: u16 = 3;
/// Header lines at the top of every kanban column (name + rule)
pub const KANBAN_HEADER_ROWS: usize = 2;
/// Rows the kanban screen spends outside the board (title + status)
pub const KANBAN_CHROME_ROWS: u16 = 2;

/// What a text dialog's commit does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPurpose {
    AddTask,
    EditTask,
    AddContext,
    RenameContext,
    AddTag,
    ConfirmDeleteContext,
}

impl InputPurpose {
    pub fn title(self) -> &'static str {
        match self {
            InputPurpose::AddTask => "New Task",
            InputPurpose::EditTask => "Edit Task",
            InputPurpose::AddContext => "New Context",
            InputPurpose::RenameContext => "Rename Context",
            InputPurpose::AddTag => "Add Tag",
            InputPurpose::ConfirmDeleteContext => "Delete Context",
        }
    }
}

/// Single-line editable text with a byte-offset cursor on a grapheme boundary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    pub buffer: String,
    pub cursor: usize,
}

impl TextField {
    /// Field pre-filled with `text`, cursor at the end
    pub fn with_text(text: impl Into<String>) -> Self {
        let buffer = text.into();
        let cursor = buffer.len();
        TextField { buffer, cursor }
    }
}

/// Labels of the date dialog's sub-fields, in focus order
pub const DATE_FIELD_LABELS: [&str; 3] = ["Day", "Month", "Year"];

/// Current interaction mode, with the transient data each one owns
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    TextInput {
        purpose: InputPurpose,
        field: TextField,
    },
    /// Day, month and year sub-fields
    DateInput {
        fields: [TextField; 3],
        focus: usize,
    },
    /// One check flag per tag of the selected task
    TagRemoval {
        index: usize,
        checks: Vec<bool>,
    },
    Kanban,
    Statistics,
}

impl Mode {
    pub fn key_context(&self) -> KeyContext {
        match self {
            Mode::Normal => KeyContext::Normal,
            Mode::TextInput { .. } => KeyContext::Input,
            Mode::DateInput { .. } => KeyContext::Date,
            Mode::TagRemoval { .. } => KeyContext::Tags,
            Mode::Kanban => KeyContext::Kanban,
            Mode::Statistics => KeyContext::Stats,
        }
    }
}

/// An in-progress reposition: the task being moved and the backing order
/// from before the first move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveState {
    pub id: TaskId,
    pub original: Vec<Task>,
}

/// Main application state
pub struct App {
    /// The backing collection, every context
    pub tasks: Vec<Task>,
    pub next_id: TaskId,
    pub contexts: ContextRegistry,
    /// Index into the current context's filtered view
    pub selected: usize,
    pub mode: Mode,
    /// Help overlay visible
    pub show_help: bool,
    pub moving: Option<MoveState>,
    pub kanban_scroll_x: usize,
    pub kanban_scroll_y: usize,
    /// Terminal size as last reported
    pub viewport: (u16, u16),
    /// Transient message shown until the next input event
    pub error: Option<TaskError>,
    pub should_quit: bool,
    pub theme: Theme,
    pub keymap: Keymap,
    pub show_key_hints: bool,
    pub undo: UndoStack,
    /// Where mutations are written; None keeps the session in memory
    storage: Option<Storage>,
}

impl App {
    pub fn new(doc: Document, config: &Config, storage: Option<Storage>) -> Self {
        let mut contexts = ContextRegistry {
            names: doc.contexts,
            current: String::new(),
        };
        context_ops::reconcile(&mut contexts, &doc.tasks);

        App {
            tasks: doc.tasks,
            next_id: doc.next_id,
            contexts,
            selected: 0,
            mode: Mode::Normal,
            show_help: false,
            moving: None,
            kanban_scroll_x: 0,
            kanban_scroll_y: 0,
            viewport: (80, 24),
            error: None,
            should_quit: false,
            theme: Theme::from_config(&config.ui),
            keymap: Keymap::from_config(&config.keys),
            show_key_hints: config.ui.show_key_hints,
            undo: UndoStack::new(),
            storage,
        }
    }

    /// In-memory session with default configuration
    pub fn in_memory(doc: Document) -> Self {
        App::new(doc, &Config::default(), None)
    }

    pub fn current_context(&self) -> &str {
        &self.contexts.current
    }

    /// Tasks of the current context, in backing order
    pub fn filtered(&self) -> Vec<&Task> {
        task_ops::filtered_view(&self.tasks, &self.contexts.current)
    }

    pub fn filtered_count(&self) -> usize {
        task_ops::filtered_count(&self.tasks, &self.contexts.current)
    }

    /// Identity of the highlighted task
    pub fn selected_id(&self) -> Option<TaskId> {
        task_ops::id_at(&self.tasks, &self.contexts.current, self.selected)
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.selected_id()
            .and_then(|id| task_ops::find_task(&self.tasks, id))
    }

    /// Keep `selected` inside the filtered view
    pub fn clamp_selection(&mut self) {
        let count = self.filtered_count();
        if self.selected >= count {
            self.selected = count.saturating_sub(1);
        }
    }

    /// Highlight the task with identity `id` if it is in the current context
    pub fn select_id(&mut self, id: TaskId) {
        if let Some(pos) = task_ops::filtered_position(&self.tasks, &self.contexts.current, id) {
            self.selected = pos;
        }
    }

    /// Which key table is active
    pub fn key_context(&self) -> KeyContext {
        if self.show_help {
            KeyContext::Help
        } else {
            self.mode.key_context()
        }
    }

    /// Snapshot of the live tasks onto the undo stack
    pub fn capture_undo(&mut self) {
        self.undo.capture(&self.tasks);
    }

    /// The persisted form of the current state
    pub fn document(&self) -> Document {
        Document {
            tasks: self.tasks.clone(),
            next_id: self.next_id,
            contexts: self.contexts.names.clone(),
        }
    }

    /// Write the whole document. A failure is reported through `error`; the
    /// in-memory change is kept.
    pub fn persist(&mut self) {
        let Some(storage) = &self.storage else {
            return;
        };
        if let Err(e) = storage.save(&self.document()) {
            error!("save failed: {}", e);
            self.error = Some(TaskError::Save(e));
        }
    }

    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
        self.kanban_scroll_x = self.kanban_scroll_x.min(self.kanban_max_scroll_x());
        self.kanban_scroll_y = self.kanban_scroll_y.min(self.kanban_max_scroll_y());
    }

    /// Number of whole kanban columns that fit the viewport (at least one)
    pub fn kanban_visible_columns(&self) -> usize {
        let per_column = KANBAN_COLUMN_WIDTH + KANBAN_SEPARATOR;
        ((self.viewport.0 / per_column) as usize).max(1)
    }

    /// Rows available to the kanban board
    pub fn kanban_rows(&self) -> usize {
        self.viewport.1.saturating_sub(KANBAN_CHROME_ROWS) as usize
    }

    pub fn kanban_max_scroll_x(&self) -> usize {
        self.contexts
            .names
            .len()
            .saturating_sub(self.kanban_visible_columns())
    }

    pub fn kanban_max_scroll_y(&self) -> usize {
        let tallest = self
            .contexts
            .names
            .iter()
            .map(|name| task_ops::filtered_count(&self.tasks, name))
            .max()
            .unwrap_or(0);
        (KANBAN_HEADER_ROWS + tallest).saturating_sub(self.kanban_rows())
    }
}

/// Run the TUI application on the document at `storage`
pub fn run(storage: Storage, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let doc = storage.load();
    info!(path = %storage.path().display(), "starting session");
    let mut app = App::new(doc, config, Some(storage));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let size = terminal.size()?;
    app.set_viewport(size.width, size.height);

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("session ended");
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                }
                Event::Resize(width, height) => app.set_viewport(width, height),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
