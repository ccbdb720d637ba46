pub mod scene;
pub mod svg;

pub use scene::{Label, NodeRect, Ribbon, Scene, TextAnchor, format_value};
pub use svg::{SvgRenderer, escape_xml};
