use crate::core::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::Path;

/// 本地檔案存儲：讀取走原始路徑，寫入落在 base_path 底下
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = fs::read(path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }

    async fn list_files(&self, path: &str) -> Result<Vec<String>> {
        let mut files = Vec::new();
        collect_files(Path::new(path), &mut files)?;
        files.sort();
        Ok(files)
    }
}

fn collect_files(path: &Path, out: &mut Vec<String>) -> Result<()> {
    let metadata = fs::metadata(path)?;

    if metadata.is_file() {
        out.push(path.to_string_lossy().into_owned());
        return Ok(());
    }

    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let entry_path = entry.path();
        let hidden = entry_path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.starts_with('.'))
            .unwrap_or(false);

        // .git 之類的隱藏目錄跳過
        if hidden {
            continue;
        }

        if entry.file_type()?.is_dir() {
            collect_files(&entry_path, out)?;
        } else {
            out.push(entry_path.to_string_lossy().into_owned());
        }
    }

    Ok(())
}
