use chrono::Local;

pub mod add;
pub mod delete;
pub mod rate;

/// How many resulting records a dry run shows.
pub const PREVIEW_LIMIT: usize = 20;

/// Toggles shared by every write-capable operation. The two are independent:
/// a dry run stops before the snapshot question even comes up.
#[derive(Debug, Clone, Copy)]
pub struct WriteOptions {
    pub dry_run: bool,
    pub backup: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            backup: true,
        }
    }
}

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// What a command did (or, in a dry run, would do). Commands never print;
/// the CLI layer renders messages and preview lines.
#[derive(Debug, Default)]
pub struct CmdResult {
    pub messages: Vec<CmdMessage>,
    pub removed: usize,
    pub updated: usize,
    /// Pre-rendered CSV lines shown by dry runs.
    pub preview: Vec<String>,
    pub written: bool,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }
}

/// Today's date the way the catalog stores dates.
pub(crate) fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}
