use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct PcfEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> PcfEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("🚀 Starting PCF calculation");

        // Extract
        tracing::info!("📥 Reading input tables...");
        let tables = self.pipeline.extract().await?;
        tracing::info!(
            "📥 Read {} product rows and {} emission factor rows",
            tables.product.records.len(),
            tables.emissions.records.len()
        );

        // Transform
        tracing::info!("🔄 Modeling product and calculating PCF...");
        let result = self.pipeline.transform(tables).await?;
        tracing::info!(
            "🔄 {} processes, total PCF: {} KgCO2",
            result.product.processes().len(),
            result.product.pcf()
        );

        // Load
        tracing::info!("💾 Writing report...");
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("💾 Report saved to: {} ({:?})", output_path, started.elapsed());

        Ok(output_path)
    }
}
