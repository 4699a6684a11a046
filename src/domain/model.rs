use crate::domain::vocabulary::{Category, FlowType, ProcessType, Tag, Unit};
use serde::Serialize;

/// One sanitized CSV data row together with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub line: usize,
    pub fields: Vec<String>,
}

impl Record {
    pub fn new<S: Into<String>>(line: usize, fields: impl IntoIterator<Item = S>) -> Self {
        Self {
            line,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedTable {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

/// Output of the extract phase: both sanitized tables.
#[derive(Debug, Clone)]
pub struct ExtractedTables {
    pub product: ParsedTable,
    pub emissions: ParsedTable,
}

/// Output of the transform phase: a fully calculated product.
#[derive(Debug, Clone)]
pub struct PcfResult {
    pub product: Product,
    pub emissions: Vec<Emission>,
}

/// A material, energy, transport or emission quantity moving into or out of a step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Flow {
    pub name: String,
    pub unit: Unit,
    pub category: Category,
    pub quantity: f64,
    pub tag: Option<Tag>,
    #[serde(rename = "type")]
    pub flow_type: FlowType,
    pub origin_country: String,
}

impl Flow {
    pub fn new(
        name: impl Into<String>,
        unit: Unit,
        category: Category,
        quantity: f64,
        tag: Option<Tag>,
        flow_type: FlowType,
        origin_country: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            unit,
            category,
            quantity,
            tag,
            flow_type,
            origin_country: origin_country.into(),
        }
    }

    pub fn is_input(&self) -> bool {
        self.flow_type == FlowType::Input
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductFlow {
    pub name: String,
    pub flows: Vec<Flow>,
    pcf: f64,
}

impl ProductFlow {
    pub fn new(name: impl Into<String>, flows: Vec<Flow>) -> Self {
        Self {
            name: name.into(),
            flows,
            pcf: 0.0,
        }
    }

    pub fn add_flow(&mut self, flow: Flow) {
        self.flows.push(flow);
    }

    pub fn pcf(&self) -> f64 {
        self.pcf
    }

    pub(crate) fn set_pcf(&mut self, pcf: f64) {
        self.pcf = pcf;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Process {
    pub process_type: ProcessType,
    pub product_flows: Vec<ProductFlow>,
    pcf: f64,
}

impl Process {
    pub fn new(process_type: ProcessType, product_flows: Vec<ProductFlow>) -> Self {
        Self {
            process_type,
            product_flows,
            pcf: 0.0,
        }
    }

    pub fn add_product_flow(&mut self, product_flow: ProductFlow) {
        self.product_flows.push(product_flow);
    }

    pub fn pcf(&self) -> f64 {
        self.pcf
    }

    pub(crate) fn set_pcf(&mut self, pcf: f64) {
        self.pcf = pcf;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductSystem {
    pub processes: Vec<Process>,
}

impl ProductSystem {
    pub fn new(processes: Vec<Process>) -> Self {
        Self { processes }
    }

    pub fn add_process(&mut self, process: Process) {
        self.processes.push(process);
    }
}

/// Root of the report tree. `pcf` stays 0 until the calculator has run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub name: String,
    pub country: String,
    pub weight: f64,
    pub unit: Unit,
    pub product_system: ProductSystem,
    pcf: f64,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        country: impl Into<String>,
        weight: f64,
        unit: Unit,
        product_system: ProductSystem,
    ) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            weight,
            unit,
            product_system,
            pcf: 0.0,
        }
    }

    pub fn pcf(&self) -> f64 {
        self.pcf
    }

    pub(crate) fn set_pcf(&mut self, pcf: f64) {
        self.pcf = pcf;
    }

    pub fn processes(&self) -> &[Process] {
        &self.product_system.processes
    }

    /// Every flow in tree order, paired with its process and product flow.
    pub fn flows(&self) -> impl Iterator<Item = (&Process, &ProductFlow, &Flow)> {
        self.product_system.processes.iter().flat_map(|process| {
            process.product_flows.iter().flat_map(move |product_flow| {
                product_flow
                    .flows
                    .iter()
                    .map(move |flow| (process, product_flow, flow))
            })
        })
    }
}

/// Emission factor lookup record. Not part of the product tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Emission {
    pub name: String,
    pub category: Category,
    pub unit: Unit,
    pub quantity: f64,
    pub emission_factor: f64,
}

impl Emission {
    pub fn new(
        name: impl Into<String>,
        category: Category,
        unit: Unit,
        quantity: f64,
        emission_factor: f64,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            unit,
            quantity,
            emission_factor,
        }
    }
}
