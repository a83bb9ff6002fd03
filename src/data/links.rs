//! Outbound and internal links derived from a spot

use crate::data::spot::Spot;

const GOOGLE_DIRECTIONS: &str = "https://www.google.com/maps/dir/?api=1&destination=";

/// Google Maps routing link: the explicit `google_url`, else a directions URL
/// to the spot's coordinates, else nothing.
pub fn google_directions_url(spot: &Spot) -> Option<String> {
    if let Some(url) = spot.google_url() {
        return Some(url.to_string());
    }
    spot.position()
        .map(|p| format!("{GOOGLE_DIRECTIONS}{},{}", p.lat, p.lng))
}

/// Relative path of a spot's detail page, `spot/<encoded id>.html`
pub fn detail_page_path(spot_id: &str) -> String {
    format!("spot/{}.html", encode_uri_component(spot_id))
}

/// Percent-encodes everything except the characters `encodeURIComponent` leaves alone
pub fn encode_uri_component(input: &str) -> String {
    let mut encoded = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => encoded.push(byte as char),
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}
