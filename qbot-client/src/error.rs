use std::fmt;

/// Error codes which mean retrying the connection makes no sense.
const FATAL_CODES: [&str; 5] = [
    "invalid_auth",
    "not_authed",
    "account_inactive",
    "token_revoked",
    "missing_scope",
];

/// A Web API call was answered with `ok: false` or with a non-success HTTP status.
#[derive(Clone, Debug)]
pub struct ClientError {
    pub method: String,
    pub code: String,
}

impl ClientError {
    /// Returns true if the error is about the credentials, so reconnecting won't help.
    pub fn is_fatal(&self) -> bool {
        FATAL_CODES.contains(&self.code.as_str())
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.method, self.code)
    }
}

impl std::error::Error for ClientError {}

/// Shorthand for creating errors in async functions.
#[macro_export]
macro_rules! client_error {
    ($method:expr, $code:expr) => {
        ::std::result::Result::Err(anyhow::Error::new($crate::ClientError {
            method: ::std::string::String::from($method),
            code: ::std::string::String::from($code),
        }))
    };
}
