//! Key bindings: which physical key produces which [`Action`] in each mode.
//!
//! Every action has built-in defaults; `[keys.<mode>]` tables in config.toml
//! replace the defaults of individual actions.

use std::collections::HashMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::warn;

use crate::model::config::KeysConfig;

use super::action::{Action, Axis, TextEdit};

/// Binding table selector. Each interactive mode has its own table.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum KeyContext {
    Normal,
    Input,
    Date,
    Tags,
    Kanban,
    Stats,
    Help,
}

impl KeyContext {
    pub const ALL: [KeyContext; 7] = [
        KeyContext::Normal,
        KeyContext::Input,
        KeyContext::Date,
        KeyContext::Tags,
        KeyContext::Kanban,
        KeyContext::Stats,
        KeyContext::Help,
    ];

    /// Whether unbound printable keys are typed into a buffer
    fn accepts_text(self) -> bool {
        matches!(self, KeyContext::Input | KeyContext::Date)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    fn matches(&self, key: KeyEvent) -> bool {
        match (&self.code, key.code) {
            (KeyCode::Char(left), KeyCode::Char(right)) => {
                let left = normalize_char(*left, self.modifiers);
                let right = normalize_char(right, key.modifiers);
                if left != right {
                    return false;
                }
                normalize_modifiers(self.modifiers) == normalize_modifiers(key.modifiers)
            }
            // Terminals report BackTab with or without SHIFT
            (KeyCode::BackTab, KeyCode::BackTab) => {
                normalize_modifiers(self.modifiers) == normalize_modifiers(key.modifiers)
            }
            _ => self.code == key.code && self.modifiers == key.modifiers,
        }
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }

        parts.push(match self.code {
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "BackTab".to_string(),
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::Left => "\u{2190}".to_string(),
            KeyCode::Right => "\u{2192}".to_string(),
            KeyCode::Up => "\u{2191}".to_string(),
            KeyCode::Down => "\u{2193}".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::Delete => "Delete".to_string(),
            KeyCode::F(n) => format!("F{n}"),
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(ch) => ch.to_string(),
            _ => "?".to_string(),
        });

        write!(f, "{}", parts.join("+"))
    }
}

#[derive(Debug, Clone)]
pub struct ActionBinding {
    pub id: &'static str,
    pub action: Action,
    pub description: &'static str,
    pub bindings: Vec<KeyBinding>,
}

struct ActionDef {
    id: &'static str,
    action: Action,
    description: &'static str,
    defaults: &'static [&'static str],
}

const fn def(
    id: &'static str,
    action: Action,
    description: &'static str,
    defaults: &'static [&'static str],
) -> ActionDef {
    ActionDef {
        id,
        action,
        description,
        defaults,
    }
}

const NORMAL_DEFS: &[ActionDef] = &[
    def("move_up", Action::MoveSelection(-1), "move up", &["k", "Up"]),
    def("move_down", Action::MoveSelection(1), "move down", &["j", "Down"]),
    def("prev_context", Action::SwitchContext(-1), "previous context", &["h", "Left"]),
    def("next_context", Action::SwitchContext(1), "next context", &["l", "Right"]),
    def("toggle_complete", Action::ToggleComplete, "toggle complete", &["Space"]),
    def("add_task", Action::StartAddTask, "add task", &["a"]),
    def("edit_task", Action::StartEditTask, "edit task", &["e"]),
    def("delete_task", Action::DeleteTask, "delete task", &["d"]),
    def("add_context", Action::StartAddContext, "new context", &["n"]),
    def("rename_context", Action::StartRenameContext, "rename context", &["r"]),
    def("delete_context", Action::StartDeleteContext, "delete context", &["x"]),
    def("toggle_priority", Action::TogglePriority, "cycle priority", &["p"]),
    def("add_tag", Action::StartAddTag, "add tag", &["t"]),
    def("remove_tag", Action::StartRemoveTag, "remove tags", &["T"]),
    def("set_due_date", Action::StartSetDueDate, "set due date", &["D"]),
    def("clear_due_date", Action::ClearDueDate, "clear due date", &["C"]),
    def("undo", Action::Undo, "undo", &["u"]),
    def("move_mode", Action::ToggleMoveMode, "reposition task", &["m"]),
    def("kanban", Action::OpenKanban, "kanban board", &["K"]),
    def("stats", Action::OpenStats, "statistics", &["S"]),
    def("help", Action::OpenHelp, "help", &["?"]),
    def("cancel", Action::Cancel, "cancel reposition", &["Esc"]),
    def("quit", Action::Quit, "quit", &["q", "Ctrl+c"]),
];

const INPUT_DEFS: &[ActionDef] = &[
    def("commit", Action::Commit, "confirm", &["Enter"]),
    def("cancel", Action::Cancel, "cancel", &["Esc"]),
    def("backspace", Action::Edit(TextEdit::Backspace), "delete back", &["Backspace"]),
    def("delete", Action::Edit(TextEdit::Delete), "delete forward", &["Delete"]),
    def("cursor_left", Action::Edit(TextEdit::Left), "cursor left", &["Left"]),
    def("cursor_right", Action::Edit(TextEdit::Right), "cursor right", &["Right"]),
    def("cursor_home", Action::Edit(TextEdit::Home), "line start", &["Home", "Ctrl+a"]),
    def("cursor_end", Action::Edit(TextEdit::End), "line end", &["End", "Ctrl+e"]),
];

const DATE_DEFS: &[ActionDef] = &[
    def("commit", Action::Commit, "confirm", &["Enter"]),
    def("cancel", Action::Cancel, "cancel", &["Esc"]),
    def("prev_field", Action::FieldNav(-1), "previous field", &["Up", "BackTab"]),
    def("next_field", Action::FieldNav(1), "next field", &["Down", "Tab"]),
    def("backspace", Action::Edit(TextEdit::Backspace), "delete back", &["Backspace"]),
    def("delete", Action::Edit(TextEdit::Delete), "delete forward", &["Delete"]),
    def("cursor_left", Action::Edit(TextEdit::Left), "cursor left", &["Left"]),
    def("cursor_right", Action::Edit(TextEdit::Right), "cursor right", &["Right"]),
];

const TAGS_DEFS: &[ActionDef] = &[
    def("commit", Action::Commit, "remove checked", &["Enter"]),
    def("cancel", Action::Cancel, "cancel", &["Esc"]),
    def("up", Action::NavigateChecklist(-1), "previous tag", &["k", "Up"]),
    def("down", Action::NavigateChecklist(1), "next tag", &["j", "Down"]),
    def("toggle", Action::ToggleCheck, "check / uncheck", &["Space"]),
];

const KANBAN_DEFS: &[ActionDef] = &[
    def("scroll_left", Action::Scroll(Axis::Horizontal, -1), "scroll left", &["h", "Left"]),
    def("scroll_right", Action::Scroll(Axis::Horizontal, 1), "scroll right", &["l", "Right"]),
    def("scroll_up", Action::Scroll(Axis::Vertical, -1), "scroll up", &["k", "Up"]),
    def("scroll_down", Action::Scroll(Axis::Vertical, 1), "scroll down", &["j", "Down"]),
    def("exit", Action::Exit, "back to list", &["Esc", "q", "K"]),
];

const STATS_DEFS: &[ActionDef] = &[def(
    "exit",
    Action::Exit,
    "back to list",
    &["Esc", "q", "S"],
)];

const HELP_DEFS: &[ActionDef] = &[def("dismiss", Action::Dismiss, "close help", &["?", "Esc"])];

#[derive(Debug, Clone)]
pub struct Keymap {
    sections: HashMap<KeyContext, Vec<ActionBinding>>,
}

impl Default for Keymap {
    fn default() -> Self {
        Keymap::from_config(&KeysConfig::default())
    }
}

impl Keymap {
    /// Build the keymap from defaults plus config overrides.
    pub fn from_config(keys: &KeysConfig) -> Self {
        let mut sections = HashMap::new();
        for context in KeyContext::ALL {
            let (defs, overrides) = match context {
                KeyContext::Normal => (NORMAL_DEFS, &keys.normal),
                KeyContext::Input => (INPUT_DEFS, &keys.input),
                KeyContext::Date => (DATE_DEFS, &keys.date),
                KeyContext::Tags => (TAGS_DEFS, &keys.tags),
                KeyContext::Kanban => (KANBAN_DEFS, &keys.kanban),
                KeyContext::Stats => (STATS_DEFS, &keys.stats),
                KeyContext::Help => (HELP_DEFS, &keys.help),
            };
            for id in overrides.keys() {
                if !defs.iter().any(|d| d.id == id) {
                    warn!("unknown action '{}' in {:?} key bindings; ignoring", id, context);
                }
            }
            sections.insert(context, build_section(context, defs, overrides));
        }

        let keymap = Keymap { sections };
        keymap.validate_conflicts();
        keymap
    }

    /// Translate a key event into an action for the given mode. In text
    /// contexts an unbound printable key becomes a character insert.
    pub fn action_for_key(&self, context: KeyContext, key: KeyEvent) -> Option<Action> {
        let bound = self
            .bindings_for(context)
            .iter()
            .find(|binding| binding.bindings.iter().any(|b| b.matches(key)))
            .map(|binding| binding.action);
        if bound.is_some() || !context.accepts_text() {
            return bound;
        }
        match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                Some(Action::Edit(TextEdit::Insert(c)))
            }
            _ => None,
        }
    }

    /// Display text for an action's bindings, e.g. `k / ↑`
    pub fn display_for(&self, context: KeyContext, action: Action) -> Option<String> {
        self.bindings_for(context)
            .iter()
            .find(|binding| binding.action == action)
            .map(|binding| {
                binding
                    .bindings
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" / ")
            })
    }

    /// First key bound to an action, for compact hints
    pub fn primary_key(&self, context: KeyContext, action: Action) -> Option<String> {
        self.bindings_for(context)
            .iter()
            .find(|binding| binding.action == action)
            .and_then(|binding| binding.bindings.first())
            .map(ToString::to_string)
    }

    pub fn bindings_for(&self, context: KeyContext) -> &[ActionBinding] {
        self.sections
            .get(&context)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn validate_conflicts(&self) {
        for context in KeyContext::ALL {
            let mut seen: HashMap<String, &'static str> = HashMap::new();
            for binding in self.bindings_for(context) {
                for key in &binding.bindings {
                    let key_name = key.to_string();
                    if let Some(first_action) = seen.get(&key_name) {
                        warn!(
                            "keybinding conflict in {:?}: '{}' used by '{}' and '{}' (first wins)",
                            context, key_name, first_action, binding.id
                        );
                    } else {
                        seen.insert(key_name, binding.id);
                    }
                }
            }
        }
    }
}

fn build_section(
    context: KeyContext,
    defs: &[ActionDef],
    overrides: &HashMap<String, Vec<String>>,
) -> Vec<ActionBinding> {
    let mut output = Vec::new();
    for def in defs {
        let source = overrides.get(def.id).cloned().unwrap_or_else(|| {
            def.defaults
                .iter()
                .map(|binding| binding.to_string())
                .collect()
        });

        let mut parsed = Vec::new();
        for raw in source {
            match parse_binding(&raw) {
                Some(binding) => parsed.push(binding),
                None => warn!(
                    "invalid keybinding '{}' for action '{}' in {:?}; ignoring",
                    raw, def.id, context
                ),
            }
        }

        if parsed.is_empty() {
            warn!(
                "no valid keybindings for action '{}' in {:?}; falling back to defaults",
                def.id, context
            );
            parsed = def
                .defaults
                .iter()
                .filter_map(|raw| parse_binding(raw))
                .collect();
        }

        output.push(ActionBinding {
            id: def.id,
            action: def.action,
            description: def.description,
            bindings: parsed,
        });
    }
    output
}

fn normalize_modifiers(mut modifiers: KeyModifiers) -> KeyModifiers {
    modifiers.remove(KeyModifiers::SHIFT);
    modifiers
}

fn normalize_char(ch: char, modifiers: KeyModifiers) -> char {
    if modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        ch.to_ascii_lowercase()
    } else {
        ch
    }
}

fn parse_binding(raw: &str) -> Option<KeyBinding> {
    let mut modifiers = KeyModifiers::empty();
    let mut key: Option<&str> = None;

    // "+" on its own is a key, not a separator
    if raw.trim() == "+" {
        return Some(KeyBinding {
            code: KeyCode::Char('+'),
            modifiers,
        });
    }

    for part in raw.split('+').map(str::trim).filter(|s| !s.is_empty()) {
        match part.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => modifiers.insert(KeyModifiers::CONTROL),
            "alt" => modifiers.insert(KeyModifiers::ALT),
            "shift" => modifiers.insert(KeyModifiers::SHIFT),
            _ => {
                if key.is_some() {
                    return None;
                }
                key = Some(part);
            }
        }
    }

    let key = key?;
    let lower = key.to_ascii_lowercase();
    let code = match lower.as_str() {
        "enter" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "backspace" => KeyCode::Backspace,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "delete" => KeyCode::Delete,
        "space" => KeyCode::Char(' '),
        _ if lower.starts_with('f') && lower.len() > 1 && lower.len() <= 3 => {
            let n = lower[1..].parse::<u8>().ok()?;
            KeyCode::F(n)
        }
        _ if key.chars().count() == 1 => {
            let ch = normalize_char(key.chars().next()?, modifiers);
            KeyCode::Char(ch)
        }
        _ => return None,
    };

    Some(KeyBinding { code, modifiers })
}
