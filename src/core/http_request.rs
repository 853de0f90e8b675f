//! Caller-supplied HTTP request details
//!
//! The web framework integration extracts these values from the live request;
//! writers only serialize them.

use serde::{Serialize, Serializer};

/// Request fields in the shape of the cloud `HttpRequest` payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HttpRequestSnapshot {
    #[serde(rename = "requestMethod")]
    pub method: String,

    #[serde(rename = "requestUrl")]
    pub url: String,

    /// Body size in bytes; serialized as a decimal string (int64 wire encoding)
    #[serde(rename = "requestSize", serialize_with = "as_decimal_string")]
    pub content_size: u64,

    #[serde(rename = "userAgent")]
    pub user_agent: String,

    #[serde(rename = "remoteIp")]
    pub remote_ip: String,

    #[serde(rename = "serverIp")]
    pub server_ip: String,

    pub referer: String,

    pub protocol: String,
}

impl HttpRequestSnapshot {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_content_size(mut self, content_size: u64) -> Self {
        self.content_size = content_size;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn with_remote_ip(mut self, remote_ip: impl Into<String>) -> Self {
        self.remote_ip = remote_ip.into();
        self
    }

    #[must_use]
    pub fn with_server_ip(mut self, server_ip: impl Into<String>) -> Self {
        self.server_ip = server_ip.into();
        self
    }

    #[must_use]
    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = referer.into();
        self
    }

    #[must_use]
    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }
}

fn as_decimal_string<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}
