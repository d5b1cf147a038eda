use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct ScanEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> ScanEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(false),
        }
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting scan...");

        // Extract
        tracing::info!("Collecting source files...");
        let sources = self.pipeline.extract().await?;
        tracing::info!("Collected {} source files", sources.len());
        self.monitor.log_stats("extract");

        // Transform
        tracing::info!("Tagging lines...");
        let result = self.pipeline.transform(sources).await?;
        tracing::info!(
            "Tagged {} lines across {} files ({} lines scanned)",
            result.tags.len(),
            result.files_scanned,
            result.lines_scanned
        );
        self.monitor.log_stats("transform");

        // Load
        tracing::info!("Writing report bundle...");
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Report saved to: {}", output_path);
        self.monitor.log_stats("load");

        self.monitor.log_final_stats();

        Ok(output_path)
    }
}
