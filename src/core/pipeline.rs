use crate::adapters::{parse_ics_bytes, CalendarFetcher};
use crate::core::grid::GridBuilder;
use crate::core::quantize::SlotQuantizer;
use crate::core::{ConfigProvider, Pipeline, RawEvent, RenderResult, Storage};
use crate::render::HtmlRenderer;
use crate::utils::error::{RenderError, Result};
use reqwest::Client;

pub struct CalendarPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    fetcher: CalendarFetcher,
}

impl<S: Storage, C: ConfigProvider> CalendarPipeline<S, C> {
    /// Uses a client private to this pipeline.
    pub fn new(storage: S, config: C) -> Self {
        let client = Client::new();
        Self::with_client(storage, config, client)
    }

    /// Shares `client` (and its connection pool) with the caller.
    pub fn with_client(storage: S, config: C, client: Client) -> Self {
        let fetcher = CalendarFetcher::new(client, config.request_timeout());
        Self {
            storage,
            config,
            fetcher,
        }
    }

    fn wants(&self, format: &str) -> bool {
        self.config.output_formats().iter().any(|f| f == format)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CalendarPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<RawEvent>> {
        // Nothing to lay out, so the source is never touched
        if self.config.days().is_empty() {
            return Err(RenderError::EmptyDayList);
        }

        let source = self.config.source();
        tracing::debug!("Loading calendar from: {}", source.location());

        let data = self.fetcher.fetch(&source).await?;
        tracing::debug!("Read {} bytes of calendar data", data.len());

        parse_ics_bytes(&data)
    }

    async fn transform(&self, events: Vec<RawEvent>) -> Result<RenderResult> {
        let quantizer = SlotQuantizer::new(self.config.quantum_minutes())?;
        let builder = GridBuilder::new(quantizer);
        let grid = builder.build(&self.config.days(), &events)?;

        if grid.is_empty() {
            tracing::info!("No events in the requested days, rendering an empty grid");
        }

        let renderer = HtmlRenderer::new(self.config.style_sheet()?, self.config.label_format()?);
        let html_output = renderer.render(&grid);

        let json_output = if self.wants("json") {
            Some(serde_json::to_string_pretty(&grid)?)
        } else {
            None
        };

        Ok(RenderResult {
            grid,
            html_output,
            json_output,
        })
    }

    async fn load(&self, result: RenderResult) -> Result<String> {
        let stem = self.config.output_stem();
        let mut written = Vec::new();

        if self.wants("html") {
            let name = format!("{}.html", stem);
            tracing::debug!("Writing {} ({} bytes)", name, result.html_output.len());
            self.storage
                .write_file(&name, result.html_output.as_bytes())
                .await?;
            written.push(name);
        }

        if let Some(json) = &result.json_output {
            let name = format!("{}.json", stem);
            tracing::debug!("Writing {} ({} bytes)", name, json.len());
            self.storage.write_file(&name, json.as_bytes()).await?;
            written.push(name);
        }

        let Some(primary) = written.first() else {
            return Err(RenderError::ConfigError {
                message: format!(
                    "No known output format in {:?}, nothing was written",
                    self.config.output_formats()
                ),
            });
        };
        Ok(format!("{}/{}", self.config.output_path(), primary))
    }
}
