use clap::Parser;
use pcf_calc::core::{ConfigProvider, Pipeline};
use pcf_calc::utils::{logger, validation::Validate};
use pcf_calc::{LocalStorage, PcfEngine, PcfPipeline, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-pcf")]
#[command(about = "PCF calculation driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "pcf-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the ZIP bundling setting from config
    #[arg(long)]
    zip: Option<bool>,

    /// Calculate and print the footprint without writing a report
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    logger::init_logger(config.log_format(), args.verbose || config.verbose());

    tracing::info!("🚀 Starting TOML-based PCF calculation");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(zip) = args.zip {
        let compression = config
            .load
            .compression
            .get_or_insert(pcf_calc::config::toml_config::CompressionConfig {
                enabled: zip,
                filename: None,
            });
        compression.enabled = zip;
        tracing::info!("🔧 ZIP bundling overridden to: {}", zip);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config, &args);

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = PcfPipeline::new(storage, config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no report will be written");
        if let Err(e) = perform_dry_run(&pipeline).await {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
        return Ok(());
    }

    let engine = PcfEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ PCF calculation completed successfully!");
            println!("✅ PCF calculation completed successfully!");
            println!("📁 Report saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ PCF calculation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            std::process::exit(e.severity().exit_code());
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    match &config.pipeline.version {
        Some(version) => println!("  Pipeline: {} v{}", config.pipeline.name, version),
        None => println!("  Pipeline: {}", config.pipeline.name),
    }
    if let Some(description) = &config.pipeline.description {
        println!("  Description: {}", description);
    }
    println!("  Product file: {}", config.product_file());
    println!("  Emissions file: {}", config.emissions_file());
    println!("  Max lines: {}", config.max_lines());
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.output_formats().join(", "));

    if let Some(archive) = config.archive_name() {
        println!("  Compression: {} (ZIP)", archive);
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

async fn perform_dry_run<P: Pipeline>(pipeline: &P) -> anyhow::Result<()> {
    let tables = pipeline.extract().await?;
    println!("🔍 Dry Run Analysis:");
    println!("  Product rows: {}", tables.product.records.len());
    println!("  Emission factor rows: {}", tables.emissions.records.len());

    let result = pipeline.transform(tables).await?;
    let product = &result.product;

    println!();
    println!("🏭 {} ({}, {} {})", product.name, product.country, product.weight, product.unit);
    for process in product.processes() {
        println!("  {}: {} KgCO2", process.process_type, process.pcf());
        for product_flow in &process.product_flows {
            println!("    {}: {} KgCO2", product_flow.name, product_flow.pcf());
        }
    }
    println!();
    println!("  Total PCF: {} KgCO2", product.pcf());
    println!();
    println!("✅ Dry run complete. Run without --dry-run to write the report.");

    Ok(())
}
