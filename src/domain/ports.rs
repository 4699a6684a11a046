use crate::domain::model::{ExtractedTables, PcfResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn product_file(&self) -> &str;
    fn emissions_file(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn max_lines(&self) -> usize;
    /// ZIP archive name when the report should be bundled.
    fn archive_name(&self) -> Option<&str>;
    fn report_filename(&self, format: &str) -> String {
        format!("pcf_report.{}", format)
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<ExtractedTables>;
    async fn transform(&self, data: ExtractedTables) -> Result<PcfResult>;
    async fn load(&self, result: PcfResult) -> Result<String>;
}
