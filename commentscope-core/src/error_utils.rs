use crate::error::*;
use tracing::{error, info};

pub trait ErrorExt {
    fn log_error(&self) -> &Self;
    fn user_friendly_message(&self) -> String;
    fn error_code(&self) -> String;
}

impl ErrorExt for CoreError {
    fn log_error(&self) -> &Self {
        error!("CoreError: {}", self);
        match self {
            CoreError::YouTubeApi(e) => {
                error!("YouTube API error details: {:?}", e);
            }
            CoreError::Config(e) => {
                error!("Configuration error details: {:?}", e);
            }
            CoreError::Pipeline(e) => {
                error!("Pipeline error details: {:?}", e);
            }
            _ => {}
        }
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            CoreError::YouTubeApi(e) => e.user_friendly_message(),
            CoreError::Config(e) => e.user_friendly_message(),
            CoreError::Pipeline(e) => e.user_friendly_message(),
            other => format!("An error occurred: {}", other),
        }
    }

    fn error_code(&self) -> String {
        match self {
            CoreError::YouTubeApi(_) => "YOUTUBE_API".to_string(),
            CoreError::Config(_) => "CONFIG".to_string(),
            CoreError::Pipeline(_) => "PIPELINE".to_string(),
            CoreError::Io(_) => "IO".to_string(),
            CoreError::Serialization(_) => "SERIALIZATION".to_string(),
            CoreError::Csv(_) => "CSV".to_string(),
            CoreError::Network(_) => "NETWORK".to_string(),
            CoreError::Internal { .. } => "INTERNAL".to_string(),
        }
    }
}

impl ErrorExt for YouTubeApiError {
    fn log_error(&self) -> &Self {
        error!("YouTubeApiError: {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            YouTubeApiError::HttpStatus { status_code, .. } => {
                format!("HTTP Error: {}", status_code)
            }
            other => format!("An error occurred: {}", other),
        }
    }

    fn error_code(&self) -> String {
        match self {
            YouTubeApiError::HttpStatus { .. } => "YOUTUBE_HTTP_STATUS".to_string(),
            YouTubeApiError::RequestTimeout => "YOUTUBE_TIMEOUT".to_string(),
            YouTubeApiError::Schema { .. } => "YOUTUBE_SCHEMA".to_string(),
            YouTubeApiError::ClientBuild { .. } => "YOUTUBE_CLIENT_BUILD".to_string(),
        }
    }
}

impl ErrorExt for PipelineError {
    fn log_error(&self) -> &Self {
        error!("PipelineError: {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            PipelineError::MissingCredential => "Please enter a valid YouTube API key.".to_string(),
            PipelineError::EmptyUrl => "Please enter a valid YouTube video URL.".to_string(),
            PipelineError::InvalidUrl { .. } => "Invalid YouTube URL".to_string(),
        }
    }

    fn error_code(&self) -> String {
        match self {
            PipelineError::MissingCredential => "PIPELINE_MISSING_CREDENTIAL".to_string(),
            PipelineError::EmptyUrl => "PIPELINE_EMPTY_URL".to_string(),
            PipelineError::InvalidUrl { .. } => "PIPELINE_INVALID_URL".to_string(),
        }
    }
}

impl ErrorExt for ConfigError {
    fn log_error(&self) -> &Self {
        error!("ConfigError: {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ConfigError::FileNotFound { path } => {
                format!("Configuration file '{}' not found.", path)
            }
            ConfigError::InvalidFormat { .. } | ConfigError::Parse(_) => {
                "Configuration file format is invalid. Please check the settings.".to_string()
            }
            ConfigError::InvalidValue { field, .. } => {
                format!("Invalid value for configuration field '{}'.", field)
            }
            ConfigError::PermissionDenied { .. } => {
                "Permission denied accessing configuration. Please check file permissions."
                    .to_string()
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            ConfigError::FileNotFound { .. } => "CONFIG_FILE_NOT_FOUND".to_string(),
            ConfigError::InvalidFormat { .. } => "CONFIG_INVALID_FORMAT".to_string(),
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE".to_string(),
            ConfigError::PermissionDenied { .. } => "CONFIG_PERMISSION_DENIED".to_string(),
            ConfigError::Parse(_) => "CONFIG_PARSE_ERROR".to_string(),
        }
    }
}

/// Logs failures through `tracing` and hands back the message shown to the user.
#[derive(Debug, Default, Clone, Copy)]
pub struct ErrorReporter;

impl ErrorReporter {
    pub fn new() -> Self {
        Self
    }

    /// Logs the error with its code and user message, returning the user message.
    pub fn report_error(&self, error: &CoreError) -> String {
        let message = error.user_friendly_message();
        error.log_error();
        info!("Error code: {}", error.error_code());
        info!("User message: {}", message);
        message
    }
}
