use thiserror::Error;

/// Everything that can go wrong between reading user input and holding a
/// parsed forecast.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// User-supplied input was rejected before any request was made.
    #[error("{0}")]
    Validation(String),

    /// The geocoding service had no usable match for the requested place.
    #[error("{0}")]
    NotFound(String),

    /// The HTTP exchange itself failed: connect error, timeout, non-2xx status.
    #[error("{message}")]
    Transport { message: String },

    /// The service answered, but not with the data we asked for.
    #[error("{0}")]
    MalformedData(String),
}

impl WeatherError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport { message: message.into() }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedData(message.into())
    }

    /// Short label used when reporting the error to the user.
    pub fn kind(&self) -> &'static str {
        match self {
            WeatherError::Validation(_) => "invalid input",
            WeatherError::NotFound(_) => "not found",
            WeatherError::Transport { .. } => "network error",
            WeatherError::MalformedData(_) => "unexpected response",
        }
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            WeatherError::transport("Request timed out. Try again or raise --timeout.")
        } else if err.is_connect() {
            WeatherError::transport("Network error: please check your internet connection.")
        } else if let Some(status) = err.status() {
            WeatherError::transport(format!("HTTP error from API: {status}"))
        } else {
            WeatherError::transport(format!("HTTP request failed: {err}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_passed_through_verbatim() {
        let err = WeatherError::not_found("City 'Atlantis' not found.");
        assert_eq!(err.to_string(), "City 'Atlantis' not found.");
        assert_eq!(err.kind(), "not found");
    }

    #[test]
    fn transport_kind() {
        let err = WeatherError::transport("boom");
        assert_eq!(err.kind(), "network error");
        assert!(matches!(err, WeatherError::Transport { .. }));
    }
}
