pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod render;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use adapters::{parse_ics_bytes, parse_ics_str, CalendarFetcher};
pub use core::{
    bucket::{bucket_events, days_between},
    engine::RenderEngine,
    grid::{build_grid_for_range, GridBuilder},
    pipeline::CalendarPipeline,
    quantize::SlotQuantizer,
};
pub use domain::model::{CalendarSource, Cell, DayColumn, Event, Grid, GridRow, RawEvent, SlotBounds};
pub use render::{HtmlRenderer, LabelFormat, StyleRegion, StyleSheet};
pub use utils::error::{RenderError, Result};
