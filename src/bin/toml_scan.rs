use anyhow::Context;
use clap::Parser;
use code_tagger::config::toml_config::TomlConfig;
use code_tagger::core::ConfigProvider;
use code_tagger::utils::{logger, validation::Validate};
use code_tagger::{LocalStorage, RuleSet, ScanEngine, ScanPipeline};

#[derive(Parser)]
#[command(name = "toml-scan")]
#[command(about = "Pattern tagging tool with TOML profile support")]
struct Args {
    /// Path to TOML profile file
    #[arg(short, long, default_value = "tagger.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from profile
    #[arg(long)]
    monitor: Option<bool>,

    /// Override hotspot threshold from profile
    #[arg(long)]
    threshold: Option<usize>,

    /// Dry run - show what would be scanned without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 設定檔
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load profile '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if config.json_logs() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based scan");
    tracing::info!("📁 Loaded profile from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(threshold) = args.threshold {
        let rules = config.rules.get_or_insert_with(Default::default);
        rules.hotspot_threshold = Some(threshold);
        tracing::info!("🔧 Hotspot threshold overridden to: {}", threshold);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Profile validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Profile loaded and validated successfully");

    // 顯示配置摘要
    display_profile_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual scanning will occur");
        perform_dry_run(&config);
        return Ok(());
    }

    // 決定監控設定
    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());

    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    // 依設定檔組規則集
    let rules = match config
        .enabled_categories()
        .context("failed to resolve enabled categories")?
    {
        Some(categories) => RuleSet::for_categories(&categories),
        None => RuleSet::with_default_rules(),
    }
    .context("failed to build rule set")?;

    // 創建存儲和掃描管道
    let storage = LocalStorage::new(config.load.output_path.clone());
    let pipeline = ScanPipeline::with_rules(storage, config, rules);

    // 創建掃描引擎並運行
    let engine = ScanEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Scan completed successfully!");
            tracing::info!("📁 Report saved to: {}", output_path);
            println!("✅ Scan completed successfully!");
            println!("📁 Report saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Scan failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                code_tagger::utils::error::ErrorSeverity::Low => 0,
                code_tagger::utils::error::ErrorSeverity::Medium => 2,
                code_tagger::utils::error::ErrorSeverity::High => 1,
                code_tagger::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_profile_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Profile Summary:");
    println!(
        "  Profile: {} v{}",
        config.profile.name, config.profile.version
    );

    if let Some(paths) = &config.source.paths {
        println!("  Paths: {}", paths.join(", "));
    }
    if let Some(urls) = &config.source.urls {
        println!("  Remote sources: {}", urls.len());
    }

    println!("  Output: {}", config.load.output_path);
    println!("  Formats: {}", config.load.output_formats.join(", "));
    println!("  Hotspot threshold: {}", config.hotspot_threshold());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig) {
    println!("🔍 Dry Run Analysis:");
    println!();

    println!("📡 Source Analysis:");
    if config.scan_paths().is_empty() && config.remote_sources().is_empty() {
        println!("  No paths or URLs configured - the built-in sample would be scanned");
    }
    for path in config.scan_paths() {
        println!("  Local path: {}", path);
    }
    for source_url in config.remote_sources() {
        println!("  Remote source: {}", source_url);
    }

    if config.extensions().is_empty() {
        println!("  Extensions: all files");
    } else {
        println!("  Extensions: {}", config.extensions().join(", "));
    }

    println!();
    println!("🏷️ Rule Configuration:");
    match config.rules.as_ref().and_then(|r| r.categories.as_ref()) {
        Some(categories) => {
            for label in categories {
                println!("  ✅ {}", label);
            }
        }
        None => println!("  ✅ All built-in categories enabled"),
    }
    println!("  Hotspot threshold: {}", config.hotspot_threshold());

    println!();
    println!("💾 Output Configuration:");
    println!("  Path: {}", config.load.output_path);
    println!("  Formats: {}", config.load.output_formats.join(", "));

    if let Some(compression) = &config.load.compression {
        if compression.enabled {
            println!("  Compression: {} (ZIP)", compression.filename);
        }
    }

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");
}
