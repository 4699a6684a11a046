use crate::core::calculator::calculate_pcf;
use crate::core::exporter::{self, ReportFormat};
use crate::core::modeler::{build_emissions, build_product};
use crate::core::parser::{parse_emissions_table, parse_product_table};
use crate::core::{ConfigProvider, ExtractedTables, PcfResult, Pipeline, Storage};
use crate::utils::error::{PcfError, Result, Table};
use crate::utils::validation::validate_file_extensions;

/// Reads both CSV tables, models and calculates the product, and writes the report.
pub struct PcfPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> PcfPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    async fn read_table_text(&self, table: Table, path: &str) -> Result<String> {
        let field = match table {
            Table::Product => "product_file",
            Table::Emissions => "emissions_file",
        };
        validate_file_extensions(field, &[path.to_string()], &["csv"])?;

        tracing::debug!("Reading {} table from: {}", table, path);
        let bytes = self.storage.read_file(path).await?;
        String::from_utf8(bytes).map_err(|e| {
            PcfError::invalid_data(table, format!("file is not valid UTF-8: {}", e))
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for PcfPipeline<S, C> {
    async fn extract(&self) -> Result<ExtractedTables> {
        let max_lines = self.config.max_lines();

        let product_text = self
            .read_table_text(Table::Product, self.config.product_file())
            .await?;
        let product = parse_product_table(&product_text, max_lines)?;

        let emissions_text = self
            .read_table_text(Table::Emissions, self.config.emissions_file())
            .await?;
        let emissions = parse_emissions_table(&emissions_text, max_lines)?;

        Ok(ExtractedTables { product, emissions })
    }

    async fn transform(&self, data: ExtractedTables) -> Result<PcfResult> {
        let mut product = build_product(&data.product.records)?;
        let emissions = build_emissions(&data.emissions.records)?;

        tracing::debug!(
            "Calculating PCF for '{}' against {} emission factors",
            product.name,
            emissions.len()
        );
        calculate_pcf(&mut product, &emissions)?;

        Ok(PcfResult { product, emissions })
    }

    async fn load(&self, result: PcfResult) -> Result<String> {
        let mut files = Vec::new();
        for raw in self.config.output_formats() {
            let format = ReportFormat::parse(raw).ok_or_else(|| {
                PcfError::InvalidConfigValueError {
                    field: "output_formats".to_string(),
                    value: raw.clone(),
                    reason: format!(
                        "Unsupported format. Valid formats: {}",
                        exporter::SUPPORTED_FORMATS.join(", ")
                    ),
                }
            })?;
            let name = self.config.report_filename(format.extension());
            files.push((name, exporter::render(&result.product, format)?));
        }

        if files.is_empty() {
            return Err(PcfError::MissingConfigError {
                field: "output_formats".to_string(),
            });
        }

        let written = match self.config.archive_name() {
            Some(archive) => {
                let zip_data = exporter::bundle(&files)?;
                tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
                self.storage.write_file(archive, &zip_data).await?;
                archive.to_string()
            }
            None => {
                for (name, data) in &files {
                    tracing::debug!("Writing {} ({} bytes) to storage", name, data.len());
                    self.storage.write_file(name, data).await?;
                }
                files[0].0.clone()
            }
        };

        Ok(format!("{}/{}", self.config.output_path(), written))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{CalcError, ModelError};
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn with_files(files: &[(&str, &str)]) -> Self {
            let files = files
                .iter()
                .map(|(path, content)| (path.to_string(), content.as_bytes().to_vec()))
                .collect();
            Self {
                files: Arc::new(Mutex::new(files)),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                PcfError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        product_file: String,
        emissions_file: String,
        output_formats: Vec<String>,
        archive: Option<String>,
    }

    impl MockConfig {
        fn new() -> Self {
            Self {
                product_file: "product.csv".to_string(),
                emissions_file: "emissions.csv".to_string(),
                output_formats: vec!["csv".to_string()],
                archive: None,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn product_file(&self) -> &str {
            &self.product_file
        }

        fn emissions_file(&self) -> &str {
            &self.emissions_file
        }

        fn output_path(&self) -> &str {
            "test_output"
        }

        fn output_formats(&self) -> &[String] {
            &self.output_formats
        }

        fn max_lines(&self) -> usize {
            50
        }

        fn archive_name(&self) -> Option<&str> {
            self.archive.as_deref()
        }
    }

    const PRODUCT_CSV: &str = "Name,Country,Weight,Unit,Process Type,ProductFlow Name,Flow Name,Unit,Category,Quantity,Tag,Type,Origin Country\nRunning Shoes,Portugal,0.8,KG,RawMaterialProduction,Polyester Production,Petroleum,Liters,RawMaterial,0.3,Virgin,Input,Turkey\n";
    const EMISSIONS_CSV: &str = "Name,Category,Unit,Quantity,EmissionFactor\nPetroleum,RawMaterial,Liters,0.3,1.5\n";

    #[tokio::test]
    async fn test_extract_transform_load() {
        let storage = MockStorage::with_files(&[
            ("product.csv", PRODUCT_CSV),
            ("emissions.csv", EMISSIONS_CSV),
        ]);
        let pipeline = PcfPipeline::new(storage.clone(), MockConfig::new());

        let tables = pipeline.extract().await.unwrap();
        assert_eq!(tables.product.records.len(), 1);
        assert_eq!(tables.emissions.records.len(), 1);

        let result = pipeline.transform(tables).await.unwrap();
        assert_eq!(result.product.pcf(), 0.3 * 1.5);
        assert_eq!(result.emissions.len(), 1);

        let output = pipeline.load(result).await.unwrap();
        assert_eq!(output, "test_output/pcf_report.csv");

        let report = storage.get_file("pcf_report.csv").await.unwrap();
        let report = String::from_utf8(report).unwrap();
        assert!(report.contains("Petroleum Emission"));
    }

    #[tokio::test]
    async fn test_load_zip_bundle_with_all_formats() {
        let storage = MockStorage::with_files(&[
            ("product.csv", PRODUCT_CSV),
            ("emissions.csv", EMISSIONS_CSV),
        ]);
        let mut config = MockConfig::new();
        config.output_formats = vec!["csv".to_string(), "json".to_string()];
        config.archive = Some("pcf_report.zip".to_string());
        let pipeline = PcfPipeline::new(storage.clone(), config);

        let tables = pipeline.extract().await.unwrap();
        let result = pipeline.transform(tables).await.unwrap();
        let output = pipeline.load(result).await.unwrap();

        assert_eq!(output, "test_output/pcf_report.zip");
        let zip_data = storage.get_file("pcf_report.zip").await.unwrap();
        let archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        assert!(names.contains(&"pcf_report.csv"));
        assert!(names.contains(&"pcf_report.json"));
    }

    #[tokio::test]
    async fn test_extract_rejects_non_csv_path() {
        let storage = MockStorage::with_files(&[]);
        let mut config = MockConfig::new();
        config.product_file = "product.txt".to_string();
        let pipeline = PcfPipeline::new(storage, config);

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, PcfError::InvalidConfigValueError { .. }));
    }

    #[tokio::test]
    async fn test_extract_missing_file() {
        let storage = MockStorage::with_files(&[("product.csv", PRODUCT_CSV)]);
        let pipeline = PcfPipeline::new(storage, MockConfig::new());

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, PcfError::IoError(_)));
    }

    #[tokio::test]
    async fn test_transform_surfaces_model_and_calc_errors() {
        let joules_product = PRODUCT_CSV.replace("Liters,RawMaterial", "Joules,RawMaterial");
        let storage = MockStorage::with_files(&[
            ("product.csv", joules_product.as_str()),
            ("emissions.csv", EMISSIONS_CSV),
        ]);
        let pipeline = PcfPipeline::new(storage, MockConfig::new());
        let tables = pipeline.extract().await.unwrap();
        assert!(matches!(
            pipeline.transform(tables).await,
            Err(PcfError::ModelError(ModelError::IllegalUnit { .. }))
        ));

        let cotton_emissions = EMISSIONS_CSV.replace("Petroleum", "Cotton");
        let storage = MockStorage::with_files(&[
            ("product.csv", PRODUCT_CSV),
            ("emissions.csv", cotton_emissions.as_str()),
        ]);
        let pipeline = PcfPipeline::new(storage, MockConfig::new());
        let tables = pipeline.extract().await.unwrap();
        assert!(matches!(
            pipeline.transform(tables).await,
            Err(PcfError::CalcError(CalcError::NoMatchingEmission { .. }))
        ));
    }

    #[tokio::test]
    async fn test_load_rejects_unknown_format() {
        let storage = MockStorage::with_files(&[
            ("product.csv", PRODUCT_CSV),
            ("emissions.csv", EMISSIONS_CSV),
        ]);
        let mut config = MockConfig::new();
        config.output_formats = vec!["tsv".to_string()];
        let pipeline = PcfPipeline::new(storage, config);

        let tables = pipeline.extract().await.unwrap();
        let result = pipeline.transform(tables).await.unwrap();
        assert!(matches!(
            pipeline.load(result).await,
            Err(PcfError::InvalidConfigValueError { .. })
        ));
    }
}
