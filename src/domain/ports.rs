use crate::domain::model::{SourceFile, TagResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn list_files(
        &self,
        path: &str,
    ) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn scan_paths(&self) -> &[String];
    fn remote_sources(&self) -> &[String];
    fn output_path(&self) -> &str;
    /// 空列表表示不過濾副檔名
    fn extensions(&self) -> &[String];
    fn hotspot_threshold(&self) -> usize;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<SourceFile>>;
    async fn transform(&self, sources: Vec<SourceFile>) -> Result<TagResult>;
    async fn load(&self, result: TagResult) -> Result<String>;
}
