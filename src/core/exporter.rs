use crate::domain::model::Product;
use crate::utils::error::{PcfError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const SUPPORTED_FORMATS: [&str; 2] = ["csv", "json"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Csv,
    Json,
}

impl ReportFormat {
    pub fn parse(format: &str) -> Option<Self> {
        match format {
            "csv" => Some(ReportFormat::Csv),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
        }
    }
}

/// One line of the flat CSV report: a flow with its ancestors' totals.
#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    product_name: &'a str,
    product_country: &'a str,
    product_weight: f64,
    product_unit: &'static str,
    product_pcf: f64,
    process_type: &'static str,
    process_pcf: f64,
    product_flow_name: &'a str,
    product_flow_pcf: f64,
    flow_name: &'a str,
    flow_unit: &'static str,
    flow_category: &'static str,
    flow_quantity: f64,
    flow_tag: &'static str,
    flow_type: &'static str,
    flow_origin_country: &'a str,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    product: &'a Product,
}

pub fn render(product: &Product, format: ReportFormat) -> Result<Vec<u8>> {
    match format {
        ReportFormat::Csv => render_csv(product),
        ReportFormat::Json => render_json(product, Utc::now()),
    }
}

pub fn render_csv(product: &Product) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for (process, product_flow, flow) in product.flows() {
        writer.serialize(ReportRow {
            product_name: &product.name,
            product_country: &product.country,
            product_weight: product.weight,
            product_unit: product.unit.as_str(),
            product_pcf: product.pcf(),
            process_type: process.process_type.as_str(),
            process_pcf: process.pcf(),
            product_flow_name: &product_flow.name,
            product_flow_pcf: product_flow.pcf(),
            flow_name: &flow.name,
            flow_unit: flow.unit.as_str(),
            flow_category: flow.category.as_str(),
            flow_quantity: flow.quantity,
            flow_tag: flow.tag.map(|tag| tag.as_str()).unwrap_or(""),
            flow_type: flow.flow_type.as_str(),
            flow_origin_country: &flow.origin_country,
        })?;
    }

    writer
        .into_inner()
        .map_err(|e| PcfError::IoError(e.into_error()))
}

pub fn render_json(product: &Product, generated_at: DateTime<Utc>) -> Result<Vec<u8>> {
    let report = JsonReport {
        generated_at,
        product,
    };
    Ok(serde_json::to_vec_pretty(&report)?)
}

/// Packs already rendered report files into one ZIP archive.
pub fn bundle(files: &[(String, Vec<u8>)]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

    for (name, data) in files {
        zip.start_file::<_, ()>(name.as_str(), FileOptions::default())?;
        zip.write_all(data)?;
    }

    // 完成並取回底層 Vec<u8>
    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}
