//! Absolute URL splitting.

/// URL scheme, which also fixes the default port and link security.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// Plain `http`
    Http,
    /// TLS wrapped `https`
    Https,
}

impl Scheme {
    /// The scheme as written in a URL.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }

    /// Port used when the URL does not name one.
    pub fn default_port(&self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }

    /// Whether connections must be TLS wrapped.
    pub fn is_secure(&self) -> bool {
        matches!(self, Scheme::Https)
    }

    /// Link type keyword for a radio module's connection-open command.
    pub fn link_protocol(&self) -> &'static str {
        match self {
            Scheme::Http => "TCP",
            Scheme::Https => "SSL",
        }
    }
}

/// An absolute URL split as `scheme://host[:port]path`.
///
/// All string fields borrow from the parsed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Url<'a> {
    /// `http` or `https`
    pub scheme: Scheme,
    /// Host, without port
    pub host: &'a str,
    /// Port given explicitly in the URL, if any
    pub explicit_port: Option<u16>,
    /// Path and query, starting at the first `/` after the host. Empty when
    /// the URL has no path.
    pub path: &'a str,
}

impl<'a> Url<'a> {
    /// Splits an absolute URL.
    ///
    /// Returns `None` when the URL does not start with `http://` or
    /// `https://`, has an empty host, or carries a port that is not a
    /// valid number. Nothing is attempted for such URLs.
    pub fn parse(url: &'a str) -> Option<Self> {
        let (scheme, rest) = if let Some(rest) = url.strip_prefix("https://") {
            (Scheme::Https, rest)
        } else if let Some(rest) = url.strip_prefix("http://") {
            (Scheme::Http, rest)
        } else {
            return None;
        };

        let (authority, path) = match rest.find('/') {
            Some(slash) => rest.split_at(slash),
            None => (rest, ""),
        };

        let (host, explicit_port) = match authority.rsplit_once(':') {
            Some((host, port)) => (host, Some(port.parse::<u16>().ok()?)),
            None => (authority, None),
        };

        if host.is_empty() {
            return None;
        }

        Some(Self {
            scheme,
            host,
            explicit_port,
            path,
        })
    }

    /// The port to connect to.
    pub fn port(&self) -> u16 {
        self.explicit_port
            .unwrap_or_else(|| self.scheme.default_port())
    }

    /// The request target for the request line; `/` when the path is empty.
    pub fn request_target(&self) -> &'a str {
        if self.path.is_empty() { "/" } else { self.path }
    }
}
