use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct RenderEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> RenderEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("Starting calendar render");

        let events = self.pipeline.extract().await?;
        tracing::info!("Extracted {} events", events.len());

        let result = self.pipeline.transform(events).await?;
        tracing::info!(
            "Laid out {} days over {} rows",
            result.grid.days.len(),
            result.grid.rows.len()
        );

        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {} in {:?}", output_path, started.elapsed());

        Ok(output_path)
    }
}
