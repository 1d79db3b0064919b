pub const SUCCESS_MESSAGE: &str = "Agent started — watch your terminal for live logs.";
pub const ERROR_MESSAGE: &str = "Could not reach backend. Is server.py running?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusKind {
    #[default]
    None,
    Success,
    Error,
}

/// Outcome of the most recent submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

impl Status {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn success() -> Self {
        Self {
            kind: StatusKind::Success,
            message: SUCCESS_MESSAGE.to_string(),
        }
    }

    pub fn error() -> Self {
        Self {
            kind: StatusKind::Error,
            message: ERROR_MESSAGE.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.message.is_empty()
    }
}
