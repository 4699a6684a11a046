pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_ARCHIVE_NAME: &str = "pcf_report.zip";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "pcf-calc")]
#[command(about = "Calculate the product carbon footprint from production and emission factor CSV files")]
pub struct CliConfig {
    #[arg(long, help = "Product production flows CSV")]
    pub product_file: String,

    #[arg(long, help = "Emission factors CSV")]
    pub emissions_file: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_delimiter = ',', default_value = "csv")]
    pub formats: Vec<String>,

    #[arg(long, default_value = "50", help = "Maximum number of lines per input file")]
    pub max_lines: usize,

    #[arg(long, help = "Bundle the report files into a ZIP archive")]
    pub zip: bool,

    #[arg(long, default_value = "compact", help = "Log format: compact or json")]
    pub log_format: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn product_file(&self) -> &str {
        &self.product_file
    }

    fn emissions_file(&self) -> &str {
        &self.emissions_file
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }

    fn max_lines(&self) -> usize {
        self.max_lines
    }

    fn archive_name(&self) -> Option<&str> {
        self.zip.then_some(DEFAULT_ARCHIVE_NAME)
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("product_file", &self.product_file)?;
        validation::validate_path("emissions_file", &self.emissions_file)?;
        validation::validate_file_extensions(
            "input files",
            &[self.product_file.clone(), self.emissions_file.clone()],
            &["csv"],
        )?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_output_formats("formats", &self.formats)?;
        // 標題列 + 至少一筆資料
        validation::validate_positive_number("max_lines", self.max_lines, 2)?;
        validation::validate_one_of("log_format", &self.log_format, &["compact", "json"])?;
        Ok(())
    }
}
