//! Common error types for network operations

/// A common error type for network operations.
///
/// This enum covers every way a single request/response cycle can fail,
/// from URL parsing down to the byte link. It is designed to be simple and
/// portable for `no_std` environments.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// The URL is not an absolute `http://` or `https://` URL.
    InvalidUrl,
    /// The link to the remote host could not be opened.
    ConnectionRefused,
    /// An expected acknowledgment was not observed before the deadline.
    AckTimeout,
    /// The response has no status line terminator or a status line that is not UTF-8.
    MalformedResponse,
    /// The response body holds no JSON document of the requested shape.
    MalformedBody,
    /// The serialized request does not fit the request buffer.
    RequestTooLarge,
    /// The received bytes do not fit the response buffer.
    ResponseTooLarge,
    /// An error occurred during a write operation.
    WriteError,
    /// An error occurred during a read operation.
    ReadError,
    /// No data was available before the link's own read timeout.
    ///
    /// Transports treat this as "nothing yet" and keep polling until their
    /// deadline.
    Timeout,
}

impl Error {
    /// The `connected` flag a failed request reports alongside this error.
    ///
    /// URL, request building and connect failures happen before the link is
    /// up. Everything else happens after it.
    pub fn is_connected(&self) -> bool {
        !matches!(
            self,
            Error::InvalidUrl | Error::ConnectionRefused | Error::RequestTooLarge
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::InvalidUrl => defmt::write!(f, "InvalidUrl"),
            Error::ConnectionRefused => defmt::write!(f, "ConnectionRefused"),
            Error::AckTimeout => defmt::write!(f, "AckTimeout"),
            Error::MalformedResponse => defmt::write!(f, "MalformedResponse"),
            Error::MalformedBody => defmt::write!(f, "MalformedBody"),
            Error::RequestTooLarge => defmt::write!(f, "RequestTooLarge"),
            Error::ResponseTooLarge => defmt::write!(f, "ResponseTooLarge"),
            Error::WriteError => defmt::write!(f, "WriteError"),
            Error::ReadError => defmt::write!(f, "ReadError"),
            Error::Timeout => defmt::write!(f, "Timeout"),
        }
    }
}
