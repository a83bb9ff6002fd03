use crate::animation::ViewTransition;
use crate::core::geo::{LatLng, LatLngBounds, Point};
use crate::prelude::Duration;
use serde::{Deserialize, Serialize};

/// Manages the current view of the map: center, zoom, and screen dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: f64,
    /// The size of the viewport in pixels
    pub size: Point,
    /// The minimum allowed zoom level
    pub min_zoom: f64,
    /// The maximum allowed zoom level
    pub max_zoom: f64,
}

impl Viewport {
    /// Creates a new viewport
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        Self {
            center,
            zoom: zoom.clamp(0.0, 18.0),
            size,
            min_zoom: 0.0,
            max_zoom: 18.0,
        }
    }

    /// Sets the center of the viewport, clamped to the projectable world
    pub fn set_center(&mut self, center: LatLng) {
        self.center = LatLng::new(
            LatLng::clamp_lat(center.lat),
            center.lng.clamp(-180.0, 180.0),
        );
    }

    /// Sets the zoom level, clamping to valid range
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Sets the viewport size
    pub fn set_size(&mut self, size: Point) {
        self.size = size;
    }

    /// Sets the zoom limits
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom = self.zoom.clamp(min_zoom, max_zoom);
    }

    /// Gets the scale factor for the current zoom level
    pub fn scale(&self) -> f64 {
        2_f64.powf(self.zoom)
    }

    /// Projects a LatLng to world pixel coordinates at the given zoom level
    pub fn project(&self, lat_lng: &LatLng, zoom: Option<f64>) -> Point {
        lat_lng.to_world_pixel(zoom.unwrap_or(self.zoom))
    }

    /// Unprojects world pixel coordinates back to LatLng at the given zoom level
    pub fn unproject(&self, pixel: &Point, zoom: Option<f64>) -> LatLng {
        LatLng::from_world_pixel(*pixel, zoom.unwrap_or(self.zoom))
    }

    /// Converts a geographical coordinate to container pixel coordinates
    pub fn lat_lng_to_pixel(&self, lat_lng: &LatLng) -> Point {
        let origin = self.project(&self.center, None);
        let projected = self.project(lat_lng, None);
        Point::new(
            projected.x - origin.x + self.size.x / 2.0,
            projected.y - origin.y + self.size.y / 2.0,
        )
    }

    /// Converts container pixel coordinates back to geographical coordinates
    pub fn pixel_to_lat_lng(&self, pixel: &Point) -> LatLng {
        let origin = self.project(&self.center, None);
        let projected = Point::new(
            pixel.x + origin.x - self.size.x / 2.0,
            pixel.y + origin.y - self.size.y / 2.0,
        );
        self.unproject(&projected, None)
    }

    /// Gets the current viewport bounds in geographical coordinates
    pub fn bounds(&self) -> LatLngBounds {
        let nw = self.pixel_to_lat_lng(&Point::new(0.0, 0.0));
        let se = self.pixel_to_lat_lng(&Point::new(self.size.x, self.size.y));

        LatLngBounds::new(LatLng::new(se.lat, nw.lng), LatLng::new(nw.lat, se.lng))
    }

    /// Jumps to a center and zoom without animation
    pub fn set_view(&mut self, center: LatLng, zoom: f64) -> ViewTransition {
        let (from_center, from_zoom) = (self.center, self.zoom);
        self.set_center(center);
        self.set_zoom(zoom);
        ViewTransition::jump(from_center, from_zoom, self.center, self.zoom)
    }

    /// Moves to a center and zoom, returning the eased flight a renderer should play
    pub fn fly_to(&mut self, center: LatLng, zoom: f64, duration: Duration) -> ViewTransition {
        let (from_center, from_zoom) = (self.center, self.zoom);
        self.set_center(center);
        self.set_zoom(zoom);
        ViewTransition::fly(from_center, from_zoom, self.center, self.zoom, duration)
    }

    /// Fits the viewport to contain the given bounds
    pub fn fit_bounds(&mut self, bounds: &LatLngBounds, padding: Option<f64>) -> ViewTransition {
        let (from_center, from_zoom) = (self.center, self.zoom);
        let padding = padding.unwrap_or(20.0);

        self.set_center(bounds.center());

        let available = Point::new(self.size.x - 2.0 * padding, self.size.y - 2.0 * padding);

        // Highest integer zoom at which the projected bounds still fit
        let mut best_zoom = self.min_zoom;
        for test_zoom in (self.min_zoom as i32)..=(self.max_zoom as i32) {
            let zoom = test_zoom as f64;

            let nw = self.project(
                &LatLng::new(bounds.north_east.lat, bounds.south_west.lng),
                Some(zoom),
            );
            let se = self.project(
                &LatLng::new(bounds.south_west.lat, bounds.north_east.lng),
                Some(zoom),
            );

            let bounds_width = (se.x - nw.x).abs();
            let bounds_height = (se.y - nw.y).abs();

            if bounds_width <= available.x && bounds_height <= available.y {
                best_zoom = zoom;
            } else {
                break;
            }
        }

        self.set_zoom(best_zoom);
        ViewTransition::jump(from_center, from_zoom, self.center, self.zoom)
    }

    /// Gets the resolution in meters per pixel at the current zoom level
    pub fn resolution(&self) -> f64 {
        let earth_circumference = 40_075_016.0;
        earth_circumference / (256.0 * self.scale())
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(LatLng::new(0.0, 0.0), 0.0, Point::new(800.0, 600.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_creation() {
        let viewport = Viewport::new(LatLng::new(33.5, 133.5), 10.0, Point::new(800.0, 600.0));

        assert_eq!(viewport.zoom, 10.0);
        assert_eq!(viewport.center.lat, 33.5);
        assert_eq!(viewport.size.x, 800.0);
    }

    #[test]
    fn test_coordinate_conversion() {
        let viewport = Viewport::new(LatLng::new(0.0, 0.0), 1.0, Point::new(512.0, 512.0));

        let center_lat_lng = viewport.pixel_to_lat_lng(&Point::new(256.0, 256.0));
        assert!(center_lat_lng.lat.abs() < 0.01);
        assert!(center_lat_lng.lng.abs() < 0.01);

        let pixel = viewport.lat_lng_to_pixel(&LatLng::new(0.0, 0.0));
        assert!((pixel.x - 256.0).abs() < 1e-6);
        assert!((pixel.y - 256.0).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_limits() {
        let mut viewport = Viewport::default();
        viewport.set_zoom_limits(2.0, 15.0);

        viewport.set_zoom(1.0);
        assert_eq!(viewport.zoom, 2.0);

        viewport.set_zoom(20.0);
        assert_eq!(viewport.zoom, 15.0);
    }

    #[test]
    fn test_fit_bounds_contains_target() {
        let mut viewport = Viewport::default();
        let shikoku = LatLngBounds::from_coords(33.0, 132.8, 34.6, 134.0);
        viewport.fit_bounds(&shikoku, Some(1.0));

        assert_eq!(viewport.center, shikoku.center());
        assert_eq!(viewport.zoom, 8.0);
        let visible = viewport.bounds();
        assert!(visible.contains(&shikoku.south_west));
        assert!(visible.contains(&shikoku.north_east));
    }

    #[test]
    fn test_fly_to_reports_origin() {
        let mut viewport = Viewport::new(LatLng::new(33.8, 133.4), 8.0, Point::new(800.0, 600.0));
        let transition =
            viewport.fly_to(LatLng::new(33.5, 133.5), 15.0, Duration::from_millis(500));

        assert_eq!(viewport.center, LatLng::new(33.5, 133.5));
        assert_eq!(viewport.zoom, 15.0);
        assert_eq!(transition.from_center, LatLng::new(33.8, 133.4));
        assert_eq!(transition.from_zoom, 8.0);
        assert!(transition.is_animated());
    }
}
