use thiserror::Error;

/// Errors from the remote data service boundary.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The service answered with a non-success status. The message text is
    /// what the handlers surface to the user.
    #[error("{message}")]
    Service { status: u16, message: String },

    /// Admin user creation rejected because the address is taken.
    #[error("email already registered")]
    AlreadyRegistered,

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// A counted query came back without a usable Content-Range total.
    #[error("remote response carried no exact count")]
    MissingCount,
}

impl RemoteError {
    /// True for 4xx service rejections, the shape the auth subsystem uses
    /// for bad credentials.
    pub fn is_client_rejection(&self) -> bool {
        matches!(self, RemoteError::Service { status, .. } if (400..500).contains(status))
    }
}
