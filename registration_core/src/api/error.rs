use reqwest::StatusCode;
use thiserror::Error;

/// Easy alias for error handling
pub type Result<T> = std::result::Result<T, Error>;

/// What we show when a rejection doesn't come with a usable message.
pub const FALLBACK_REJECTION: &str = "Erro no registro";

/// Errors that can happen while submitting a registration. `Display` gives
/// the message we show the user.
#[derive(Debug, Error)]
pub enum Error {
    /// The server answered, but with something other than a 2xx. The message
    /// comes from the body's `detail` field when there is one.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    /// We never got a response, for example because the server is down or
    /// the address is wrong.
    #[error("Erro desconhecido")]
    Network(#[source] reqwest::Error),

    /// The server said the registration worked, but we couldn't read what it
    /// sent back.
    #[error("Resposta inesperada do servidor")]
    Decode(#[source] reqwest::Error),
}
