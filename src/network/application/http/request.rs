//! Request description and HTTP/1.1 message serialization.

use super::MAX_REQUEST_LEN;
use super::url::Url;
use crate::network::error::Error;
use core::fmt::Write as _;
use heapless::{String, Vec};

/// A serialized request, ready for a transport.
pub type WireRequest = Vec<u8, MAX_REQUEST_LEN>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    /// The method token for the request line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// One request to a JSON API.
///
/// The request borrows everything it sends; it is never modified by the
/// client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request<'a> {
    /// Absolute `http://` or `https://` URL
    pub url: &'a str,
    /// Request method
    pub method: Method,
    /// Raw body, sent verbatim. May be empty.
    pub body: &'a str,
    /// Value of the `content-type` header, omitted when `None` or empty
    pub content_type: Option<&'a str>,
    /// Token for `Authorization: Bearer`, omitted when `None` or empty
    pub bearer_token: Option<&'a str>,
}

impl<'a> Request<'a> {
    /// A `GET` request with no body or optional headers.
    pub fn get(url: &'a str) -> Self {
        Self {
            url,
            method: Method::Get,
            body: "",
            content_type: None,
            bearer_token: None,
        }
    }

    /// A `POST` request carrying `body`.
    pub fn post(url: &'a str, body: &'a str) -> Self {
        Self {
            url,
            method: Method::Post,
            body,
            content_type: None,
            bearer_token: None,
        }
    }

    /// Sets the `content-type` header.
    pub fn with_content_type(mut self, content_type: &'a str) -> Self {
        self.content_type = Some(content_type);
        self
    }

    /// Sets the bearer token.
    pub fn with_bearer_token(mut self, token: &'a str) -> Self {
        self.bearer_token = Some(token);
        self
    }
}

/// Serializes `request` as an HTTP/1.1 message for `url`'s host.
///
/// Headers go out in a fixed order: `Host`, `User-Agent`,
/// `Connection: close`, then `Content-length` for `POST`, `content-type`
/// and `Authorization` when set. Header values are written as given,
/// without validation.
pub fn build(request: &Request<'_>, url: &Url<'_>, user_agent: &str) -> Result<WireRequest, Error> {
    let mut buf = WireRequest::new();

    // Request line
    push(&mut buf, request.method.as_str())?;
    push(&mut buf, " ")?;
    push(&mut buf, url.request_target())?;
    push(&mut buf, " HTTP/1.1\r\n")?;

    // Headers
    match url.explicit_port {
        Some(port) => {
            let mut port_str: String<6> = String::new();
            write!(port_str, ":{}", port).map_err(|_| Error::RequestTooLarge)?;
            header(&mut buf, "Host", &[url.host, port_str.as_str()])?;
        }
        None => header(&mut buf, "Host", &[url.host])?,
    }
    header(&mut buf, "User-Agent", &[user_agent])?;
    header(&mut buf, "Connection", &["close"])?;

    if request.method == Method::Post {
        let mut len_str: String<20> = String::new();
        write!(len_str, "{}", request.body.len()).map_err(|_| Error::RequestTooLarge)?;
        header(&mut buf, "Content-length", &[len_str.as_str()])?;
    }
    if let Some(content_type) = request.content_type.filter(|v| !v.is_empty()) {
        header(&mut buf, "content-type", &[content_type])?;
    }
    if let Some(token) = request.bearer_token.filter(|v| !v.is_empty()) {
        header(&mut buf, "Authorization", &["Bearer ", token])?;
    }

    // Body
    push(&mut buf, "\r\n")?;
    push(&mut buf, request.body)?;

    Ok(buf)
}

fn header(buf: &mut WireRequest, name: &str, value: &[&str]) -> Result<(), Error> {
    push(buf, name)?;
    push(buf, ": ")?;
    for part in value {
        push(buf, part)?;
    }
    push(buf, "\r\n")
}

fn push(buf: &mut WireRequest, text: &str) -> Result<(), Error> {
    buf.extend_from_slice(text.as_bytes())
        .map_err(|_| Error::RequestTooLarge)
}
