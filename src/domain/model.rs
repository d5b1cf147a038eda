use serde::{Deserialize, Serialize};
use std::fmt;

/// 掃描器支援的標籤分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Network Call")]
    NetworkCall,
    #[serde(rename = "Debug Statement")]
    DebugStatement,
    #[serde(rename = "Unfinished Block")]
    UnfinishedBlock,
    #[serde(rename = "Database Operation")]
    DatabaseOperation,
    #[serde(rename = "Error Handling")]
    ErrorHandling,
    #[serde(rename = "Authentication")]
    Authentication,
    #[serde(rename = "Configuration")]
    Configuration,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::NetworkCall,
        Category::DebugStatement,
        Category::UnfinishedBlock,
        Category::DatabaseOperation,
        Category::ErrorHandling,
        Category::Authentication,
        Category::Configuration,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::NetworkCall => "Network Call",
            Category::DebugStatement => "Debug Statement",
            Category::UnfinishedBlock => "Unfinished Block",
            Category::DatabaseOperation => "Database Operation",
            Category::ErrorHandling => "Error Handling",
            Category::Authentication => "Authentication",
            Category::Configuration => "Configuration",
        }
    }

    pub fn from_label(label: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.label() == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 一個待掃描的原始檔案（本地檔案或遠端來源）
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: String,
    pub content: String,
}

/// 單行命中結果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaggedLine {
    pub file: String,
    pub line_number: usize,
    pub line: String,
    pub category: Category,
    pub rule: String,
}

/// 標籤數量達到門檻的檔案
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hotspot {
    pub file: String,
    pub tag_count: usize,
}

/// transform 階段的完整輸出，交給 load 打包
#[derive(Debug, Clone)]
pub struct TagResult {
    pub tags: Vec<TaggedLine>,
    pub files_scanned: usize,
    pub lines_scanned: usize,
    pub csv_output: String,
    pub tsv_output: String,
    pub hotspots: Vec<Hotspot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub count: usize,
}

/// report.json 的內容
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub generated_at: String,
    pub files_scanned: usize,
    pub lines_scanned: usize,
    pub total_tags: usize,
    pub category_totals: Vec<CategoryTotal>,
    pub hotspots: Vec<Hotspot>,
}
