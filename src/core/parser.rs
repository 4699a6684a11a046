use crate::domain::model::{ParsedTable, Record};
use crate::utils::error::{PcfError, Result, Table};
use regex::Regex;
use std::sync::LazyLock;

pub const DEFAULT_MAX_LINES: usize = 50;

pub const PRODUCT_HEADERS: [&str; 13] = [
    "Name",
    "Country",
    "Weight",
    "Unit",
    "Process Type",
    "ProductFlow Name",
    "Flow Name",
    "Unit",
    "Category",
    "Quantity",
    "Tag",
    "Type",
    "Origin Country",
];

pub const EMISSIONS_HEADERS: [&str; 5] = ["Name", "Category", "Unit", "Quantity", "EmissionFactor"];

static LINE_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_ \t,.-]+$").expect("line charset pattern"));

/// Layout of one of the two input tables.
struct TableLayout {
    table: Table,
    headers: &'static [&'static str],
    numeric_columns: &'static [usize],
}

const PRODUCT_LAYOUT: TableLayout = TableLayout {
    table: Table::Product,
    headers: &PRODUCT_HEADERS,
    // Weight, Quantity
    numeric_columns: &[2, 9],
};

const EMISSIONS_LAYOUT: TableLayout = TableLayout {
    table: Table::Emissions,
    headers: &EMISSIONS_HEADERS,
    // Quantity, EmissionFactor
    numeric_columns: &[3, 4],
};

/// Sanitizes the product table text and splits it into records.
pub fn parse_product_table(text: &str, max_lines: usize) -> Result<ParsedTable> {
    parse_table(text, &PRODUCT_LAYOUT, max_lines)
}

/// Sanitizes the emission factor table text and splits it into records.
pub fn parse_emissions_table(text: &str, max_lines: usize) -> Result<ParsedTable> {
    parse_table(text, &EMISSIONS_LAYOUT, max_lines)
}

fn parse_table(text: &str, layout: &TableLayout, max_lines: usize) -> Result<ParsedTable> {
    let table = layout.table;

    if text.trim().is_empty() {
        return Err(PcfError::invalid_data(table, "CSV file is empty"));
    }

    let mut lines: Vec<&str> = text.lines().collect();
    // 結尾空行不計入行數
    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }
    if lines.len() > max_lines {
        return Err(PcfError::invalid_data(
            table,
            format!(
                "CSV file is too large: {} lines (limit {})",
                lines.len(),
                max_lines
            ),
        ));
    }

    for (index, line) in lines.iter().enumerate() {
        let line_no = index + 1;
        check_line(table, line_no, line)?;

        let fields: Vec<&str> = line.split(',').collect();
        if index == 0 {
            check_headers(table, layout.headers, &fields)?;
            continue;
        }
        check_numeric_fields(table, line_no, layout, &fields)?;
    }

    // 行檢查通過後才交給 csv reader 切欄位
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect::<Vec<_>>();

    let mut records = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(index + 2);

        if record.len() != headers.len() {
            return Err(PcfError::invalid_data(
                table,
                format!(
                    "line {} has {} fields, expected {}",
                    line,
                    record.len(),
                    headers.len()
                ),
            ));
        }

        records.push(Record::new(line, record.iter()));
    }

    tracing::debug!(
        "Sanitized {} table: {} data rows",
        table,
        records.len()
    );

    Ok(ParsedTable { headers, records })
}

fn check_line(table: Table, line_no: usize, line: &str) -> Result<()> {
    let reason = if line.contains("  ") {
        "inconsistent spacing"
    } else if line.contains(';') {
        "inconsistent delimiters"
    } else if line.contains("null") {
        "null values"
    } else if line.split(',').any(|field| field.trim().is_empty()) {
        "empty fields"
    } else if !LINE_CHARSET.is_match(line) {
        "invalid characters"
    } else {
        return Ok(());
    };

    Err(PcfError::invalid_data(
        table,
        format!("line {} contains {}", line_no, reason),
    ))
}

fn check_headers(table: Table, expected: &[&str], fields: &[&str]) -> Result<()> {
    let matches = fields.len() == expected.len()
        && fields
            .iter()
            .zip(expected)
            .all(|(field, expected)| field.trim() == *expected);

    if matches {
        Ok(())
    } else {
        Err(PcfError::invalid_data(
            table,
            format!("invalid headers, expected: {}", expected.join(",")),
        ))
    }
}

fn check_numeric_fields(
    table: Table,
    line_no: usize,
    layout: &TableLayout,
    fields: &[&str],
) -> Result<()> {
    for &column in layout.numeric_columns {
        let Some(field) = fields.get(column) else {
            continue;
        };
        let header = layout.headers[column];

        if field.chars().any(|c| c.is_ascii_alphabetic()) {
            return Err(PcfError::invalid_data(
                table,
                format!("line {} has letters in numeric field {}: {}", line_no, header, field),
            ));
        }

        if let Ok(value) = field.trim().parse::<f64>() {
            if value <= 0.0 {
                return Err(PcfError::invalid_data(
                    table,
                    format!(
                        "line {} has a zero or negative {}: {}",
                        line_no, header, field
                    ),
                ));
            }
        }
    }
    Ok(())
}
