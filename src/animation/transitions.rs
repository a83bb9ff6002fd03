use crate::core::geo::LatLng;
use crate::prelude::Duration;
use crate::traits::Lerp;

/// Easing curves available to view transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EasingType {
    Linear,
    EaseOut,
    EaseInOut,
}

impl EasingType {
    /// Apply easing function to a normalized time value (0.0 to 1.0)
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::Linear => t,
            EasingType::EaseOut => {
                let t = t - 1.0;
                t * t * t + 1.0
            }
            EasingType::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// A view change handed to the surface: either an instant jump or an eased flight.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewTransition {
    pub from_center: LatLng,
    pub from_zoom: f64,
    pub to_center: LatLng,
    pub to_zoom: f64,
    pub duration: Duration,
    pub easing: EasingType,
}

impl ViewTransition {
    /// Instant change with no animation
    pub fn jump(from_center: LatLng, from_zoom: f64, to_center: LatLng, to_zoom: f64) -> Self {
        Self {
            from_center,
            from_zoom,
            to_center,
            to_zoom,
            duration: Duration::ZERO,
            easing: EasingType::Linear,
        }
    }

    /// Eased flight, the equivalent of Leaflet's `flyTo`
    pub fn fly(
        from_center: LatLng,
        from_zoom: f64,
        to_center: LatLng,
        to_zoom: f64,
        duration: Duration,
    ) -> Self {
        Self {
            from_center,
            from_zoom,
            to_center,
            to_zoom,
            duration,
            easing: EasingType::EaseInOut,
        }
    }

    pub fn is_animated(&self) -> bool {
        !self.duration.is_zero()
    }

    /// Center and zoom at the normalized progress `t`
    pub fn sample(&self, t: f64) -> (LatLng, f64) {
        let eased = self.easing.apply(t);
        (
            self.from_center.lerp(&self.to_center, eased),
            self.from_zoom.lerp(&self.to_zoom, eased),
        )
    }

    /// Center and zoom after `elapsed` time since the start of the transition
    pub fn sample_at(&self, elapsed: Duration) -> (LatLng, f64) {
        if !self.is_animated() {
            return (self.to_center, self.to_zoom);
        }
        self.sample(elapsed.as_secs_f64() / self.duration.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints() {
        for easing in [EasingType::Linear, EasingType::EaseOut, EasingType::EaseInOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(2.0), 1.0);
        }
    }

    #[test]
    fn test_fly_samples_between_views() {
        let fly = ViewTransition::fly(
            LatLng::new(33.0, 133.0),
            8.0,
            LatLng::new(34.0, 134.0),
            14.0,
            Duration::from_millis(1000),
        );

        assert!(fly.is_animated());
        let (center, zoom) = fly.sample_at(Duration::from_millis(500));
        assert!((center.lat - 33.5).abs() < 1e-9);
        assert!((zoom - 11.0).abs() < 1e-9);
        assert_eq!(fly.sample_at(Duration::from_secs(5)), (LatLng::new(34.0, 134.0), 14.0));
    }

    #[test]
    fn test_jump_lands_immediately() {
        let jump = ViewTransition::jump(LatLng::new(0.0, 0.0), 1.0, LatLng::new(1.0, 1.0), 5.0);
        assert!(!jump.is_animated());
        assert_eq!(jump.sample_at(Duration::ZERO), (LatLng::new(1.0, 1.0), 5.0));
    }
}
