use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire value meaning "use no proxy"
pub const DIRECT: &str = "direct";

/// Outcome of a proxy selection
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selection {
    /// A candidate from the pool
    Proxy(String),
    /// Every candidate is excluded; connect without a proxy
    Direct,
}

impl Selection {
    /// Interpret a wire value, mapping the sentinel to [`Selection::Direct`]
    pub fn from_url(url: impl Into<String>) -> Self {
        let url = url.into();
        if url == DIRECT {
            Self::Direct
        } else {
            Self::Proxy(url)
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Proxy(url) => url,
            Self::Direct => DIRECT,
        }
    }

    pub fn is_direct(&self) -> bool {
        matches!(self, Self::Direct)
    }

    /// The proxy URL, or `None` when the selection is direct
    pub fn proxy_url(&self) -> Option<&str> {
        match self {
            Self::Proxy(url) => Some(url),
            Self::Direct => None,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `GET /proxy`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyResponse {
    pub url: String,
}

impl From<Selection> for ProxyResponse {
    fn from(selection: Selection) -> Self {
        let url = match selection {
            Selection::Proxy(url) => url,
            Selection::Direct => DIRECT.to_string(),
        };
        Self { url }
    }
}

impl From<ProxyResponse> for Selection {
    fn from(response: ProxyResponse) -> Self {
        Selection::from_url(response.url)
    }
}

/// Body of `POST /proxy/failed`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureReport {
    pub proxy_url: String,
}
