use crate::core::units::validate_unit_for_category;
use crate::domain::model::{Emission, Flow, Process, Product, ProductFlow, ProductSystem, Record};
use crate::domain::vocabulary::{Category, FlowType, ProcessType, Tag, Unit, UnknownToken};
use crate::utils::error::{ModelError, Table};
use std::collections::HashMap;
use std::str::FromStr;

type ModelResult<T> = std::result::Result<T, ModelError>;

/// Positional accessor over one record, producing errors that name the table,
/// line and column.
struct RowReader<'a> {
    table: Table,
    record: &'a Record,
}

impl<'a> RowReader<'a> {
    fn new(table: Table, record: &'a Record) -> Self {
        Self { table, record }
    }

    fn text(&self, index: usize, column: &'static str) -> ModelResult<&'a str> {
        self.record
            .field(index)
            .ok_or(ModelError::MissingField {
                table: self.table,
                line: self.record.line,
                column,
            })
    }

    fn token<T>(&self, index: usize, column: &'static str) -> ModelResult<T>
    where
        T: FromStr<Err = UnknownToken>,
    {
        let raw = self.text(index, column)?;
        raw.parse::<T>().map_err(|e| ModelError::UnknownToken {
            table: self.table,
            line: self.record.line,
            column,
            value: e.value,
        })
    }

    fn number(&self, index: usize, column: &'static str) -> ModelResult<f64> {
        let raw = self.text(index, column)?;
        raw.trim().parse::<f64>().map_err(|_| ModelError::InvalidNumber {
            table: self.table,
            line: self.record.line,
            column,
            value: raw.to_string(),
        })
    }

    fn check_unit(&self, unit: Unit, category: Category) -> ModelResult<()> {
        validate_unit_for_category(unit, category).map_err(|rejection| ModelError::IllegalUnit {
            table: self.table,
            line: self.record.line,
            rejection,
        })
    }
}

/// Builds the product tree from the product table's data rows.
///
/// Product level fields come from the first row only. Each row becomes one
/// flow wrapped in its own product flow, attached to the process of the row's
/// process type; processes keep the order in which their type first appears.
pub fn build_product(records: &[Record]) -> ModelResult<Product> {
    let first = records.first().ok_or(ModelError::EmptyInput {
        table: Table::Product,
    })?;

    let head = RowReader::new(Table::Product, first);
    let product_name = head.text(0, "product name")?;
    let product_country = head.text(1, "product country")?;
    let product_weight = head.number(2, "product weight")?;
    let product_unit: Unit = head.token(3, "product unit")?;

    let mut product_system = ProductSystem::default();
    let mut process_index: HashMap<ProcessType, usize> = HashMap::new();

    for record in records {
        let row = RowReader::new(Table::Product, record);

        let process_type: ProcessType = row.token(4, "process type")?;
        let product_flow_name = row.text(5, "product flow name")?;
        let flow_name = row.text(6, "flow name")?;
        let flow_unit: Unit = row.token(7, "flow unit")?;
        let flow_category: Category = row.token(8, "flow category")?;
        let flow_quantity = row.number(9, "flow quantity")?;
        let flow_tag: Tag = row.token(10, "flow tag")?;
        let flow_type: FlowType = row.token(11, "flow type")?;
        let origin_country = row.text(12, "origin country")?;

        row.check_unit(flow_unit, flow_category)?;

        let flow = Flow::new(
            flow_name,
            flow_unit,
            flow_category,
            flow_quantity,
            Some(flow_tag),
            flow_type,
            origin_country,
        );
        let product_flow = ProductFlow::new(product_flow_name, vec![flow]);

        let index = *process_index.entry(process_type).or_insert_with(|| {
            product_system.add_process(Process::new(process_type, Vec::new()));
            product_system.processes.len() - 1
        });
        product_system.processes[index].add_product_flow(product_flow);
    }

    tracing::debug!(
        "Modeled product '{}' with {} processes from {} rows",
        product_name,
        product_system.processes.len(),
        records.len()
    );

    Ok(Product::new(
        product_name,
        product_country,
        product_weight,
        product_unit,
        product_system,
    ))
}

/// Builds the flat emission factor list from the emissions table's data rows.
pub fn build_emissions(records: &[Record]) -> ModelResult<Vec<Emission>> {
    if records.is_empty() {
        return Err(ModelError::EmptyInput {
            table: Table::Emissions,
        });
    }

    records
        .iter()
        .map(|record| {
            let row = RowReader::new(Table::Emissions, record);
            let name = row.text(0, "name")?;
            let category: Category = row.token(1, "category")?;
            let unit: Unit = row.token(2, "unit")?;
            let quantity = row.number(3, "quantity")?;
            let emission_factor = row.number(4, "emission factor")?;

            row.check_unit(unit, category)?;

            Ok(Emission::new(name, category, unit, quantity, emission_factor))
        })
        .collect()
}
