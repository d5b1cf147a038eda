use crate::core::rules::RuleSet;
use crate::core::{
    Category, CategoryTotal, ConfigProvider, Hotspot, Pipeline, ScanReport, SourceFile, Storage,
    TagResult, TaggedLine,
};
use crate::utils::error::{Result, TagError};
use reqwest::Client;
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use zip::write::{FileOptions, ZipWriter};

/// 沒有任何輸入時改掃內建示範檔，每個分類都有命中行
const SAMPLE_SOURCE: &str = r#"import requests

response = requests.get('https://api.example.com/users')

print("Debug: fetched users")

# TODO: paginate the user list

user = User.objects.get(id=1)
query = "SELECT * FROM users WHERE active = 1"

try:
    risky_operation()
except Exception as e:
    raise ValueError("Custom error")

token = generate_jwt_token(user_id)
password_hash = hash_password(password)

api_key = os.environ.get('API_KEY')
config = load_config_file()
"#;

const SAMPLE_PATH: &str = "builtin/sample.py";

pub struct ScanPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    rules: RuleSet,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> ScanPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        Ok(Self::with_rules(
            storage,
            config,
            RuleSet::with_default_rules()?,
        ))
    }

    pub fn with_rules(storage: S, config: C, rules: RuleSet) -> Self {
        Self {
            storage,
            config,
            rules,
            client: Client::new(),
        }
    }

    fn wants_extension(&self, path: &str) -> bool {
        let allowed = self.config.extensions();
        if allowed.is_empty() {
            return true;
        }

        Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| allowed.iter().any(|a| a == ext))
            .unwrap_or(false)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ScanPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<SourceFile>> {
        let mut sources = Vec::new();

        for scan_path in self.config.scan_paths() {
            tracing::debug!("Listing files under: {}", scan_path);
            let listed = self.storage.list_files(scan_path).await?;

            for file_path in listed {
                if !self.wants_extension(&file_path) {
                    continue;
                }

                let data = self.storage.read_file(&file_path).await?;
                match String::from_utf8(data) {
                    Ok(content) => sources.push(SourceFile {
                        path: file_path,
                        content,
                    }),
                    // 二進位檔不掃
                    Err(_) => tracing::debug!("Skipping non-UTF8 file: {}", file_path),
                }
            }
        }

        for source_url in self.config.remote_sources() {
            tracing::debug!("Fetching remote source: {}", source_url);
            let response = self.client.get(source_url).send().await?;

            tracing::debug!("Remote response status: {}", response.status());

            if response.status().is_success() {
                let content = response.text().await?;
                sources.push(SourceFile {
                    path: source_url.clone(),
                    content,
                });
            } else {
                tracing::warn!(
                    "Remote source {} returned {}, skipping",
                    source_url,
                    response.status()
                );
            }
        }

        // 沒有輸入時退回內建示範檔
        if sources.is_empty() {
            tracing::warn!("No input files found, scanning built-in sample");
            sources.push(SourceFile {
                path: SAMPLE_PATH.to_string(),
                content: SAMPLE_SOURCE.to_string(),
            });
        }

        Ok(sources)
    }

    async fn transform(&self, sources: Vec<SourceFile>) -> Result<TagResult> {
        let mut tags = Vec::new();
        let mut lines_scanned = 0usize;
        let files_scanned = sources.len();
        let mut tags_per_file: HashMap<String, usize> = HashMap::new();

        for source in &sources {
            for (index, line) in source.content.lines().enumerate() {
                lines_scanned += 1;

                for rule in self.rules.match_line(line) {
                    tags.push(TaggedLine {
                        file: source.path.clone(),
                        line_number: index + 1,
                        line: line.trim().to_string(),
                        category: rule.category,
                        rule: rule.name.to_string(),
                    });
                    *tags_per_file.entry(source.path.clone()).or_insert(0) += 1;
                }
            }
        }

        let csv_output = render_tags(&tags, b',')?;
        let tsv_output = render_tags(&tags, b'\t')?;

        let threshold = self.config.hotspot_threshold();
        let mut hotspots: Vec<Hotspot> = tags_per_file
            .into_iter()
            .filter(|(_, count)| *count >= threshold)
            .map(|(file, tag_count)| Hotspot { file, tag_count })
            .collect();
        hotspots.sort_by(|a, b| b.tag_count.cmp(&a.tag_count).then(a.file.cmp(&b.file)));

        Ok(TagResult {
            tags,
            files_scanned,
            lines_scanned,
            csv_output,
            tsv_output,
            hotspots,
        })
    }

    async fn load(&self, result: TagResult) -> Result<String> {
        let output_path = format!("{}/tag_report.zip", self.config.output_path());

        let report = build_report(&result);

        tracing::debug!(
            "Creating report bundle with {} tags across {} files",
            result.tags.len(),
            result.files_scanned
        );

        // 打包 CSV / TSV / JSON 報告
        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

            zip.start_file::<_, ()>("tags.csv", FileOptions::default())?;
            zip.write_all(result.csv_output.as_bytes())?;

            zip.start_file::<_, ()>("tags.tsv", FileOptions::default())?;
            zip.write_all(result.tsv_output.as_bytes())?;

            zip.start_file::<_, ()>("report.json", FileOptions::default())?;
            let json_data = serde_json::to_string_pretty(&report)?;
            zip.write_all(json_data.as_bytes())?;

            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        tracing::debug!("Writing report bundle ({} bytes) to storage", zip_data.len());
        self.storage.write_file("tag_report.zip", &zip_data).await?;

        tracing::debug!("Report bundle saved successfully");
        Ok(output_path)
    }
}

fn build_report(result: &TagResult) -> ScanReport {
    let category_totals = Category::ALL
        .iter()
        .map(|&category| CategoryTotal {
            category,
            count: result.tags.iter().filter(|t| t.category == category).count(),
        })
        .collect();

    ScanReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        files_scanned: result.files_scanned,
        lines_scanned: result.lines_scanned,
        total_tags: result.tags.len(),
        category_totals,
        hotspots: result.hotspots.clone(),
    }
}

fn render_tags(tags: &[TaggedLine], delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(["file", "line", "category", "rule", "snippet"])?;

    for tag in tags {
        let line_number = tag.line_number.to_string();
        writer.write_record([
            tag.file.as_str(),
            line_number.as_str(),
            tag.category.label(),
            tag.rule.as_str(),
            tag.line.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| TagError::ProcessingError {
            message: format!("report buffer error: {}", e),
        })?;

    String::from_utf8(bytes).map_err(|e| TagError::ProcessingError {
        message: format!("report is not valid UTF-8: {}", e),
    })
}
