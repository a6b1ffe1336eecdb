use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptionError {
    #[error("script contains no words")]
    EmptyScript,
    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error while {context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("transcription failed ({context}): {message}")]
    Transcription {
        context: &'static str,
        message: String,
    },
    #[error("render failed: {message}")]
    Render { message: String },
}

impl CaptionError {
    pub(crate) fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    pub(crate) fn json(context: &'static str, source: serde_json::Error) -> Self {
        Self::Json { context, source }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn transcription(context: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Transcription {
            context,
            message: err.to_string(),
        }
    }

    pub fn render(err: impl std::fmt::Display) -> Self {
        Self::Render {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcription_error_keeps_context_in_message() {
        let err = CaptionError::transcription("load sidecar", "model missing");
        assert_eq!(
            err.to_string(),
            "transcription failed (load sidecar): model missing"
        );
    }

    #[test]
    fn io_error_exposes_source() {
        let err = CaptionError::io(
            "read timing config",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("I/O error while read timing config"));
    }
}
