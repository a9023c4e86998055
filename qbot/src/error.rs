use std::fmt;

/// The own result type where the error part is a async friendly error.
pub type Result<T> = std::result::Result<T, Error>;

/// Shorthand of a boxed Send, Sync error.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Which part of the bot failed. Every scope is fatal to the dispatch pipeline except
/// persistence, which is retried on the next change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorScope {
    #[default]
    Transport,
    Persistence,
    Dispatch,
}

#[derive(Debug, Default)]
pub struct RuntimeError {
    pub scope: ErrorScope,
    pub text: String,
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for RuntimeError {}

impl<T> From<RuntimeError> for Result<T> {
    fn from(value: RuntimeError) -> Self {
        Err(Box::new(value))
    }
}

/// Returns the scope of the error if it is a [`RuntimeError`].
pub fn scope_of(err: &Error) -> Option<ErrorScope> {
    err.downcast_ref::<RuntimeError>().map(|e| e.scope)
}

pub fn transport_error<T>(text: &str) -> Result<T> {
    RuntimeError {
        scope: ErrorScope::Transport,
        text: text.to_string(),
    }
    .into()
}

pub fn persistence_error<T>(text: &str) -> Result<T> {
    RuntimeError {
        scope: ErrorScope::Persistence,
        text: text.to_string(),
    }
    .into()
}

pub fn dispatch_error<T>(text: &str) -> Result<T> {
    RuntimeError {
        scope: ErrorScope::Dispatch,
        text: text.to_string(),
    }
    .into()
}
