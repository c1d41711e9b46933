use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{command} command does not exist")]
    ToolNotFound { command: String },

    /// Non-zero exit from an external command. `output` holds stdout and
    /// stderr combined.
    #[error("`{command}` failed ({status}):\n{output}")]
    Subprocess {
        command: String,
        status: String,
        output: String,
    },

    #[error("Unexpected output from `{command}`: {reason}")]
    Parse { command: String, reason: String },

    #[error("Prompt aborted: {0}")]
    PromptAborted(#[from] dialoguer::Error),

    #[error("Selection {index} is out of range for prompt {title:?}")]
    Selection { title: String, index: usize },

    #[error("Found duplicate {kind} name: {name}")]
    DuplicateName { kind: NameKind, name: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Group,
    Alias,
}

impl std::fmt::Display for NameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NameKind::Group => write!(f, "group"),
            NameKind::Alias => write!(f, "alias"),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
