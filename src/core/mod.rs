pub mod bucket;
pub mod engine;
pub mod grid;
pub mod pipeline;
pub mod quantize;

pub use crate::domain::model::{RawEvent, RenderResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
