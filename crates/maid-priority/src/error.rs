use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::distribution::{DistributionError, SheetWriteError};
use crate::workflows::intake::IntakeError;
use crate::workflows::ledger::LedgerError;
use crate::workflows::operations::OperationsError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Intake(IntakeError),
    Distribution(DistributionError),
    Ledger(LedgerError),
    Sheet(SheetWriteError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Intake(err) => write!(f, "input error: {}", err),
            AppError::Distribution(err) => write!(f, "distribution error: {}", err),
            AppError::Ledger(err) => write!(f, "ledger error: {}", err),
            AppError::Sheet(err) => write!(f, "sheet error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Intake(err) => Some(err),
            AppError::Distribution(err) => Some(err),
            AppError::Ledger(err) => Some(err),
            AppError::Sheet(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Config(_)
            | AppError::Intake(_)
            | AppError::Distribution(_)
            | AppError::Ledger(_) => StatusCode::BAD_REQUEST,
            AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Sheet(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<IntakeError> for AppError {
    fn from(value: IntakeError) -> Self {
        Self::Intake(value)
    }
}

impl From<DistributionError> for AppError {
    fn from(value: DistributionError) -> Self {
        Self::Distribution(value)
    }
}

impl From<LedgerError> for AppError {
    fn from(value: LedgerError) -> Self {
        Self::Ledger(value)
    }
}

impl From<SheetWriteError> for AppError {
    fn from(value: SheetWriteError) -> Self {
        Self::Sheet(value)
    }
}

impl From<OperationsError> for AppError {
    fn from(value: OperationsError) -> Self {
        match value {
            OperationsError::Intake(err) => Self::Intake(err),
            OperationsError::Distribution(err) => Self::Distribution(err),
            OperationsError::Ledger(err) => Self::Ledger(err),
            OperationsError::Sheet(err) => Self::Sheet(err),
        }
    }
}
