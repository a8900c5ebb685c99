use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("request timed out")]
    Timeout,
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("remote returned status {0}")]
    Status(u16),
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("transport error: {0}")]
    Transport(String),
}

impl ClientError {
    /// Failures worth another attempt: the request may succeed unchanged.
    pub fn is_transient(&self) -> bool {
        match self {
            ClientError::Timeout | ClientError::Connect(_) => true,
            ClientError::Status(code) => matches!(code, 502..=504),
            _ => false,
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, ClientError::Status(code) if (400..500).contains(code))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout
        } else if e.is_connect() {
            ClientError::Connect(e.to_string())
        } else if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Transport(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ClientError;

    #[test]
    fn transient_classification() {
        assert!(ClientError::Timeout.is_transient());
        assert!(ClientError::Connect("refused".into()).is_transient());
        assert!(ClientError::Status(503).is_transient());
        assert!(!ClientError::Status(500).is_transient());
        assert!(!ClientError::Status(401).is_transient());
        assert!(ClientError::Status(401).is_rejection());
        assert!(!ClientError::Decode("eof".into()).is_transient());
    }
}
