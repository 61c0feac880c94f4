pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Number does not fit a finite value: {token}")]
    NonFiniteNumber { token: String },

    #[error("Invalid rounding precision: {precision} (expected 1..=15)")]
    InvalidPrecision { precision: u32 },

    #[error("Invalid options JSON: {message}")]
    Config { message: String },
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::Config {
            message: value.to_string(),
        }
    }
}
