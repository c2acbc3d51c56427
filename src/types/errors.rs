use std::fmt;

// === StorageError ===

/// Errors raised by a storage backend. The `Storage` facade swallows these
/// (logging them) so domain stores never see persistence faults.
#[derive(Debug)]
pub enum StorageError {
    /// The underlying medium rejected the operation.
    Backend(String),
    /// A value could not be serialized for storage.
    Serialize(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Backend(msg) => write!(f, "Storage backend error: {}", msg),
            StorageError::Serialize(msg) => write!(f, "Storage serialization error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

// === FeedError ===

/// Errors raised by the feed-fetch boundary. The aggregator maps these to
/// an empty item list for the failing source.
#[derive(Debug)]
pub enum FeedError {
    /// The feed could not be fetched.
    Network(String),
    /// The response was not a parseable feed.
    Parse(String),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Network(msg) => write!(f, "Feed network error: {}", msg),
            FeedError::Parse(msg) => write!(f, "Feed parse error: {}", msg),
        }
    }
}

impl std::error::Error for FeedError {}

// === WeatherError ===

/// Errors raised by the weather and geocoding providers.
#[derive(Debug)]
pub enum WeatherError {
    /// The provider could not be reached.
    Network(String),
    /// The provider's response could not be decoded.
    Decode(String),
}

impl fmt::Display for WeatherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherError::Network(msg) => write!(f, "Weather network error: {}", msg),
            WeatherError::Decode(msg) => write!(f, "Weather decode error: {}", msg),
        }
    }
}

impl std::error::Error for WeatherError {}

// === GeolocationError ===

/// Failure taxonomy for device geolocation. Each variant surfaces a
/// distinct user-facing message in the weather store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeolocationError {
    /// The execution environment offers no geolocation capability.
    Unsupported,
    /// The user denied the location request.
    PermissionDenied,
    /// The position could not be determined.
    Unavailable,
    /// The position request timed out.
    Timeout,
    /// Any other failure.
    Unknown(String),
}

impl fmt::Display for GeolocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeolocationError::Unsupported => {
                write!(f, "Geolocation is not supported in this environment")
            }
            GeolocationError::PermissionDenied => write!(f, "Location access denied"),
            GeolocationError::Unavailable => write!(f, "Location unavailable"),
            GeolocationError::Timeout => write!(f, "Location request timed out"),
            GeolocationError::Unknown(msg) => write!(f, "Geolocation error: {}", msg),
        }
    }
}

impl std::error::Error for GeolocationError {}
