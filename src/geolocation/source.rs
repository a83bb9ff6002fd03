use crate::core::geo::LatLng;
use crate::prelude::Duration;
use async_trait::async_trait;

/// A device position fix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub coords: LatLng,
    /// Accuracy radius in meters, when the device reports one
    pub accuracy: Option<f64>,
}

impl Position {
    pub fn new(coords: LatLng) -> Self {
        Self {
            coords,
            accuracy: None,
        }
    }

    pub fn with_accuracy(mut self, meters: f64) -> Self {
        self.accuracy = Some(meters);
        self
    }
}

/// Options passed with every position request
#[derive(Debug, Clone, PartialEq)]
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
    pub timeout: Duration,
    /// Oldest cached fix the device may return; zero forces a fresh fix
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        crate::core::config::GeolocationConfig::default().initial_options()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    #[error("permission to read the position was denied")]
    PermissionDenied,

    #[error("position unavailable")]
    PositionUnavailable,

    #[error("position request timed out")]
    Timeout,
}

impl PositionError {
    /// Whether asking again can help. A denied permission stays denied.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PositionError::PositionUnavailable | PositionError::Timeout)
    }
}

/// Device geolocation capability
#[async_trait]
pub trait PositionSource: Send + Sync {
    /// `false` when the platform has no geolocation at all
    fn is_available(&self) -> bool {
        true
    }

    /// Requests one fix. Implementations should honour `options.timeout`;
    /// the controller enforces it as well.
    async fn current_position(&self, options: &PositionOptions) -> Result<Position, PositionError>;
}

/// Source that always reports the same fix, used by the CLI
#[derive(Debug, Clone, Copy)]
pub struct FixedPositionSource {
    position: Position,
}

impl FixedPositionSource {
    pub fn new(position: Position) -> Self {
        Self { position }
    }
}

#[async_trait]
impl PositionSource for FixedPositionSource {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Position, PositionError> {
        Ok(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(!PositionError::PermissionDenied.is_retryable());
        assert!(PositionError::PositionUnavailable.is_retryable());
        assert!(PositionError::Timeout.is_retryable());
    }

    #[test]
    fn test_default_options() {
        let options = PositionOptions::default();
        assert!(options.enable_high_accuracy);
        assert_eq!(options.timeout, Duration::from_secs(20));
        assert_eq!(options.maximum_age, Duration::ZERO);
    }

    #[tokio::test]
    async fn test_fixed_source() {
        let position = Position::new(LatLng::new(33.56, 133.53)).with_accuracy(12.0);
        let source = FixedPositionSource::new(position);

        assert!(source.is_available());
        let fix = source.current_position(&PositionOptions::default()).await.unwrap();
        assert_eq!(fix, position);
    }
}
