use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Another suspension is already outstanding on the bridge.
    Busy,
    /// SSID or password does not fit the driver's fixed-size fields.
    InvalidCredentials,
    NetworkError,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Busy => write!(f, "Another radio operation is already pending"),
            Error::InvalidCredentials => write!(f, "Invalid credentials"),
            Error::NetworkError => write!(f, "Network error"),
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;

impl core::error::Error for Error {}
