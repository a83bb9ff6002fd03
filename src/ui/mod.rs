//! View models and the optional UI surface

pub mod detail;
pub mod panel;
pub mod popup;
pub mod surface;

pub use detail::{spot_id_from_query, DetailError, DetailPage};
pub use panel::PanelContent;
pub use popup::PopupContent;
pub use surface::{NullSurface, PageSurface};
