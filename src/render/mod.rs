pub mod format;
pub mod html;
pub mod style;

pub use format::LabelFormat;
pub use html::HtmlRenderer;
pub use style::{StyleRegion, StyleSheet};
