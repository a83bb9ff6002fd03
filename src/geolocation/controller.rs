//! Locate-me state machine.
//!
//! ```text
//! Idle -> Requesting -> Idle          (fix)
//!                    -> Failed        (permission denied)
//!                    -> Retrying -> Idle | Failed
//! ```
//!
//! The trigger control is disabled for the whole Requesting/Retrying span, so
//! a trigger sequence has at most one request in flight.

use crate::core::config::GeolocationConfig;
use crate::core::constants::messages;
use crate::geolocation::source::{Position, PositionError, PositionOptions, PositionSource};
use crate::ui::surface::PageSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeolocationState {
    #[default]
    Idle,
    Requesting,
    Retrying,
    Failed,
}

impl GeolocationState {
    pub fn is_in_flight(self) -> bool {
        matches!(self, GeolocationState::Requesting | GeolocationState::Retrying)
    }
}

/// Result of one trigger sequence
#[derive(Debug, Clone, PartialEq)]
pub enum LocateOutcome {
    Located { position: Position, attempts: u32 },
    Failed { error: PositionError, attempts: u32 },
    /// The platform has no geolocation; nothing was requested
    Unavailable,
    /// A sequence is already in flight; nothing was requested
    Busy,
}

impl LocateOutcome {
    /// Number of position requests issued
    pub fn attempts(&self) -> u32 {
        match self {
            LocateOutcome::Located { attempts, .. } | LocateOutcome::Failed { attempts, .. } => {
                *attempts
            }
            LocateOutcome::Unavailable | LocateOutcome::Busy => 0,
        }
    }

    pub fn position(&self) -> Option<Position> {
        match self {
            LocateOutcome::Located { position, .. } => Some(*position),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeolocationController {
    config: GeolocationConfig,
    state: GeolocationState,
}

impl GeolocationController {
    pub fn new(config: GeolocationConfig) -> Self {
        Self {
            config,
            state: GeolocationState::Idle,
        }
    }

    pub fn state(&self) -> GeolocationState {
        self.state
    }

    pub fn config(&self) -> &GeolocationConfig {
        &self.config
    }

    /// Runs one trigger sequence against `source`.
    ///
    /// Failures are reported on the surface. Placing the fix on the map is
    /// left to the caller. Dropping the future mid-request returns the
    /// controller to `Idle` and re-enables the control.
    pub async fn locate(
        &mut self,
        source: &dyn PositionSource,
        surface: &mut dyn PageSurface,
    ) -> LocateOutcome {
        if self.state.is_in_flight() {
            log::debug!("locate ignored, a request is already in flight");
            return LocateOutcome::Busy;
        }
        if !source.is_available() {
            surface.alert(messages::GEOLOCATION_UNSUPPORTED);
            return LocateOutcome::Unavailable;
        }

        let initial = self.config.initial_options();
        let retry = self.config.retry_options();
        let mut flight = InFlight::begin(&mut self.state, surface);

        let mut attempts = 1;
        let mut result = request(source, &initial).await;

        if let Err(error) = result {
            if error.is_retryable() {
                log::warn!("geolocation failed ({}), retrying once", error);
                *flight.state = GeolocationState::Retrying;
                attempts += 1;
                result = request(source, &retry).await;
            }
        }

        match result {
            Ok(position) => {
                log::info!("located at {}", position.coords);
                flight.finish(GeolocationState::Idle, None);
                LocateOutcome::Located { position, attempts }
            }
            Err(error) => {
                log::warn!("geolocation gave up after {} request(s): {}", attempts, error);
                let message = match error {
                    PositionError::PermissionDenied => messages::GEOLOCATION_DENIED,
                    _ => messages::GEOLOCATION_FAILED,
                };
                flight.finish(GeolocationState::Failed, Some(message));
                LocateOutcome::Failed { error, attempts }
            }
        }
    }
}

/// Holds the controller in flight with the control disabled.
/// Dropped before `finish`, it puts both back.
struct InFlight<'a> {
    state: &'a mut GeolocationState,
    surface: &'a mut dyn PageSurface,
    finished: bool,
}

impl<'a> InFlight<'a> {
    fn begin(state: &'a mut GeolocationState, surface: &'a mut dyn PageSurface) -> Self {
        *state = GeolocationState::Requesting;
        surface.set_locate_enabled(false);
        Self {
            state,
            surface,
            finished: false,
        }
    }

    fn finish(mut self, state: GeolocationState, alert: Option<&str>) {
        *self.state = state;
        if let Some(message) = alert {
            self.surface.alert(message);
        }
        self.surface.set_locate_enabled(true);
        self.finished = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.finished {
            log::debug!("locate abandoned while {:?}", self.state);
            *self.state = GeolocationState::Idle;
            self.surface.set_locate_enabled(true);
        }
    }
}

impl Default for GeolocationController {
    fn default() -> Self {
        Self::new(GeolocationConfig::default())
    }
}

/// One request, bounded by its own deadline even if the source ignores it
async fn request(
    source: &dyn PositionSource,
    options: &PositionOptions,
) -> Result<Position, PositionError> {
    log::debug!("requesting position, timeout {:?}", options.timeout);
    match tokio::time::timeout(options.timeout, source.current_position(options)).await {
        Ok(result) => result,
        Err(_) => Err(PositionError::Timeout),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;
    use crate::ui::surface::NullSurface;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Scripted {
        replies: Mutex<Vec<Result<Position, PositionError>>>,
        seen: Mutex<Vec<PositionOptions>>,
    }

    impl Scripted {
        fn new(mut replies: Vec<Result<Position, PositionError>>) -> Self {
            replies.reverse();
            Self {
                replies: Mutex::new(replies),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PositionSource for Scripted {
        async fn current_position(
            &self,
            options: &PositionOptions,
        ) -> Result<Position, PositionError> {
            self.seen.lock().unwrap().push(options.clone());
            self.replies
                .lock()
                .unwrap()
                .pop()
                .unwrap_or(Err(PositionError::PositionUnavailable))
        }
    }

    fn fix() -> Position {
        Position::new(LatLng::new(33.84, 132.77))
    }

    #[tokio::test]
    async fn test_success_first_try() {
        let source = Scripted::new(vec![Ok(fix())]);
        let mut controller = GeolocationController::default();

        let outcome = controller.locate(&source, &mut NullSurface).await;
        assert_eq!(outcome, LocateOutcome::Located { position: fix(), attempts: 1 });
        assert_eq!(controller.state(), GeolocationState::Idle);
    }

    #[tokio::test]
    async fn test_unavailable_retry_then_success() {
        let source = Scripted::new(vec![Err(PositionError::PositionUnavailable), Ok(fix())]);
        let mut controller = GeolocationController::default();

        let outcome = controller.locate(&source, &mut NullSurface).await;
        assert_eq!(outcome.attempts(), 2);
        assert_eq!(outcome.position(), Some(fix()));

        let seen = source.seen.lock().unwrap();
        assert_eq!(seen[0].timeout.as_secs(), 20);
        assert_eq!(seen[1].timeout.as_secs(), 30);
    }

    #[tokio::test]
    async fn test_retry_failure_of_any_kind_is_terminal() {
        let source = Scripted::new(vec![
            Err(PositionError::Timeout),
            Err(PositionError::PermissionDenied),
        ]);
        let mut controller = GeolocationController::default();

        let outcome = controller.locate(&source, &mut NullSurface).await;
        assert_eq!(
            outcome,
            LocateOutcome::Failed { error: PositionError::PermissionDenied, attempts: 2 }
        );
        assert_eq!(controller.state(), GeolocationState::Failed);

        // a new trigger starts a fresh sequence
        let source = Scripted::new(vec![Ok(fix())]);
        assert_eq!(controller.locate(&source, &mut NullSurface).await.attempts(), 1);
        assert_eq!(controller.state(), GeolocationState::Idle);
    }

    #[tokio::test]
    async fn test_busy_while_in_flight() {
        let source = Scripted::new(vec![Ok(fix())]);
        let mut controller = GeolocationController::default();
        controller.state = GeolocationState::Retrying;

        assert_eq!(controller.locate(&source, &mut NullSurface).await, LocateOutcome::Busy);
        assert!(source.seen.lock().unwrap().is_empty());

        controller.state = GeolocationState::Failed;
        assert_eq!(controller.locate(&source, &mut NullSurface).await.attempts(), 1);
    }
}
