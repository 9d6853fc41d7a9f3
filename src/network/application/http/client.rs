use super::request::{self, Request};
use super::response::{self, BodyCleanup, Response};
use super::url::Url;
use super::RawResponse;
use crate::network::error::Error;
use crate::network::transport::Transport;
use serde::Deserialize;

/// Timeout shared by every deadline-bounded wait of one request.
pub const DEFAULT_TIMEOUT_MS: u32 = 10_000;

/// User agent sent with every request unless configured otherwise.
pub const DEFAULT_USER_AGENT: &str = "esp8266/0.1";

/// Options for configuring the HTTP client.
///
/// Missing fields take their defaults when loaded from JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config<'a> {
    /// Budget in milliseconds for each ack wait, the frame decode, and the
    /// socket read.
    pub timeout_ms: u32,
    /// `User-Agent` header value.
    pub user_agent: &'a str,
    /// Post-processing applied to response bodies.
    pub body_cleanup: BodyCleanup,
}

impl Default for Config<'_> {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: DEFAULT_USER_AGENT,
            body_cleanup: BodyCleanup::default(),
        }
    }
}

impl<'a> Config<'a> {
    /// Loads a configuration from JSON, e.g. a blob kept in flash.
    ///
    /// ```rust
    /// use iotfetch::network::application::http::{BodyCleanup, Config};
    ///
    /// let config = Config::from_json(r#"{"timeout_ms": 2500, "body_cleanup": "keep"}"#).unwrap();
    /// assert_eq!(config.timeout_ms, 2500);
    /// assert_eq!(config.body_cleanup, BodyCleanup::Keep);
    /// assert_eq!(config.user_agent, "esp8266/0.1");
    /// ```
    pub fn from_json(json: &'a str) -> Result<Self, serde_json_core::de::Error> {
        serde_json_core::from_str(json).map(|(config, _)| config)
    }
}

/// An HTTP client performing one blocking request at a time over a
/// [`Transport`].
#[derive(Debug)]
pub struct Client<'a, T: Transport> {
    transport: T,
    config: Config<'a>,
}

impl<'a, T: Transport> Client<'a, T> {
    /// A client with the default configuration.
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, Config::default())
    }

    pub fn with_config(transport: T, config: Config<'a>) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &Config<'a> {
        &self.config
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Gives the transport back, e.g. to reclaim a serial port.
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Performs one request/response cycle.
    ///
    /// An invalid URL fails before the transport is touched. On success the
    /// response has `connected` set and its body cleaned per
    /// [`Config::body_cleanup`].
    pub fn request(&mut self, request: &Request<'_>) -> Result<Response, Error> {
        let mut raw = RawResponse::new();
        self.exchange(request, &mut raw)?;
        self.finish(&raw)
    }

    /// Performs one request/response cycle, reporting failure in-band.
    ///
    /// Never fails: on error the default `Response` comes back, with
    /// `connected` telling whether the link was reached. Once the transport
    /// has delivered a reply, `connected` stays set whatever goes wrong
    /// afterwards. Callers check `connected` and the emptiness of
    /// `status_code`.
    pub fn http_request(&mut self, request: &Request<'_>) -> Response {
        let mut raw = RawResponse::new();
        let result = self
            .exchange(request, &mut raw)
            .and_then(|()| self.finish(&raw));
        match result {
            Ok(response) => response,
            Err(e) => {
                warn!("request failed: {}", e);
                Response {
                    connected: e.is_connected(),
                    ..Response::default()
                }
            }
        }
    }

    fn exchange(&mut self, request: &Request<'_>, raw: &mut RawResponse) -> Result<(), Error> {
        let url = Url::parse(request.url).ok_or_else(|| {
            warn!("not an absolute http(s) url: {}", request.url);
            Error::InvalidUrl
        })?;

        let wire = request::build(request, &url, self.config.user_agent)?;
        debug!(
            "{} {}:{} ({} bytes)",
            request.method.as_str(),
            url.host,
            url.port(),
            wire.len()
        );

        self.transport
            .send(&url, &wire, self.config.timeout_ms, raw)?;
        debug!("received {} bytes", raw.len());
        Ok(())
    }

    fn finish(&self, raw: &[u8]) -> Result<Response, Error> {
        let mut response = response::parse(raw)?;
        response.connected = true;
        self.config.body_cleanup.apply(&mut response);
        Ok(response)
    }
}
