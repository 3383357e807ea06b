use thiserror::Error;

/// Failure reported by an [`ApiPort`](super::ApiPort) call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response
    #[error("Error de red: {0}")]
    Network(String),

    /// Non-2xx response; `message` comes from the JSON or plain-text body
    #[error("Error {status}: {message}")]
    Status { status: u16, message: String },

    /// 2xx response whose body could not be decoded
    #[error("Respuesta inválida del servidor: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Outcome of a failed controller operation. Every variant is terminal for
/// the operation that produced it; the list keeps its last good state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error(transparent)]
    Transport(#[from] ApiError),

    /// Rejected client-side, no request was sent
    #[error("{0}")]
    Validation(String),

    /// Delete blocked by records that still reference the entity
    #[error("{0}")]
    Conflict(String),

    #[error("El registro no tiene identificador")]
    MissingId,

    #[error("{0} es de solo lectura")]
    ReadOnly(&'static str),

    /// Another mutation is still running
    #[error("Hay una operación en curso")]
    Busy,

    /// Superseded by a newer load, or the controller was disposed
    #[error("Operación cancelada")]
    Cancelled,

    #[error("{0}")]
    Export(String),
}
