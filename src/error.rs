use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlightError {
    #[error("failed to encode search request ({0})")]
    Encode(String),

    #[error(
        "request timed out, QPX Express may be slow or unreachable. \
         Try increasing --timeout or check your connection"
    )]
    Timeout,

    #[error("connection failed, check your internet connection ({0})")]
    ConnectionFailed(String),

    #[error("DNS resolution failed ({0}), check your internet connection")]
    DnsResolution(String),

    #[error("proxy error, check your --proxy URL is correct ({0})")]
    ProxyError(String),

    #[error("TLS/SSL error, connection to the API failed ({0})")]
    TlsError(String),

    #[error("invalid endpoint URL \"{0}\", check --endpoint or QPX_ENDPOINT")]
    InvalidEndpoint(String),

    #[error("failed to decode search response ({0})")]
    Decode(String),

    #[error("no API key given, pass --api-key or set QPX_API_KEY")]
    MissingApiKey,

    #[error("{0}")]
    Validation(String),
}

impl FlightError {
    /// True for failures reaching the remote endpoint.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Self::Timeout
                | Self::ConnectionFailed(_)
                | Self::DnsResolution(_)
                | Self::ProxyError(_)
                | Self::TlsError(_)
        )
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Encode(_) => "encode_error",
            Self::Timeout => "timeout",
            Self::ConnectionFailed(_) => "connection_failed",
            Self::DnsResolution(_) => "dns_error",
            Self::ProxyError(_) => "proxy_error",
            Self::TlsError(_) => "tls_error",
            Self::InvalidEndpoint(_) => "invalid_endpoint",
            Self::Decode(_) => "decode_error",
            Self::MissingApiKey => "missing_api_key",
            Self::Validation(_) => "validation_error",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Encode(_) => 1,
            Self::MissingApiKey | Self::InvalidEndpoint(_) | Self::Validation(_) => 2,
            Self::Decode(_) => 6,
            _ => 3,
        }
    }
}

/// Classifies a failure building or sending the search POST. Builder errors
/// at this point come from the endpoint, not the proxy.
pub fn from_send_error(err: wreq::Error, endpoint: &str) -> FlightError {
    if err.to_string().to_lowercase().contains("builder error") {
        return FlightError::InvalidEndpoint(endpoint.to_string());
    }
    from_http_error(err)
}

/// Classifies a failure while configuring the client or reading a response.
pub fn from_http_error(err: wreq::Error) -> FlightError {
    let msg = err.to_string();
    let lower = msg.to_lowercase();

    if err.is_timeout() {
        return FlightError::Timeout;
    }

    if err.is_connect() {
        if lower.contains("dns") || lower.contains("resolve") || lower.contains("getaddrinfo") {
            return FlightError::DnsResolution(msg);
        }
        return FlightError::ConnectionFailed(msg);
    }

    if lower.contains("proxy") || lower.contains("socks") {
        return FlightError::ProxyError(msg);
    }

    if lower.contains("tls") || lower.contains("ssl") || lower.contains("certificate") {
        return FlightError::TlsError(msg);
    }

    if lower.contains("builder error") && lower.contains("uri") {
        return FlightError::ProxyError(msg);
    }

    FlightError::ConnectionFailed(msg)
}
