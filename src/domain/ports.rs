use crate::domain::model::{CalendarSource, RawEvent, RenderResult};
use crate::render::{LabelFormat, StyleSheet};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::time::Duration;

/// Destination for rendered output, addressed by file name.
pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn source(&self) -> CalendarSource;
    /// Requested days in display order. May be empty; the grid builder rejects that.
    fn days(&self) -> Vec<NaiveDate>;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn output_stem(&self) -> &str;
    fn quantum_minutes(&self) -> u32;
    fn request_timeout(&self) -> Duration;
    fn label_format(&self) -> Result<LabelFormat>;
    fn style_sheet(&self) -> Result<StyleSheet>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<RawEvent>>;
    async fn transform(&self, events: Vec<RawEvent>) -> Result<RenderResult>;
    async fn load(&self, result: RenderResult) -> Result<String>;
}
