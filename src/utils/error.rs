use crate::domain::vocabulary::{Category, ProcessType, Unit};
use std::fmt;
use thiserror::Error;

/// 輸入表格種類，用於錯誤訊息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Product,
    Emissions,
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Table::Product => write!(f, "product"),
            Table::Emissions => write!(f, "emissions"),
        }
    }
}

/// A unit that is not legal for a category.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid unit {unit} for category {category} ({reason})")]
pub struct UnitRejection {
    pub unit: Unit,
    pub category: Category,
    pub reason: &'static str,
}

/// Raised while turning sanitized rows into the product model or the emissions list.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("No {table} rows to model")]
    EmptyInput { table: Table },

    #[error("Missing {column} on {table} line {line}")]
    MissingField {
        table: Table,
        line: usize,
        column: &'static str,
    },

    #[error("Invalid {column} value on {table} line {line}: {value}")]
    UnknownToken {
        table: Table,
        line: usize,
        column: &'static str,
        value: String,
    },

    #[error("Invalid numeric {column} on {table} line {line}: {value}")]
    InvalidNumber {
        table: Table,
        line: usize,
        column: &'static str,
        value: String,
    },

    #[error("{rejection} on {table} line {line}")]
    IllegalUnit {
        table: Table,
        line: usize,
        rejection: UnitRejection,
    },
}

/// Raised while aggregating the footprint over a product tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("Product system must contain processes")]
    EmptyProductSystem,

    #[error("Process {process_type} must contain product flows")]
    EmptyProcess { process_type: ProcessType },

    #[error("Product flow '{product_flow}' must contain flows")]
    EmptyProductFlow { product_flow: String },

    #[error("No matching emission found for input flow: {flow} ({category}, {unit})")]
    NoMatchingEmission {
        flow: String,
        category: Category,
        unit: Unit,
    },
}

#[derive(Error, Debug)]
pub enum PcfError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid input data in {table} file: {message}")]
    InvalidData { table: Table, message: String },

    #[error("Modeling error: {0}")]
    ModelError(#[from] ModelError),

    #[error("Calculation error: {0}")]
    CalcError(#[from] CalcError),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

pub type Result<T> = std::result::Result<T, PcfError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Model,
    Calculation,
    Output,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code used by the binaries.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl PcfError {
    pub fn invalid_data(table: Table, message: impl Into<String>) -> Self {
        PcfError::InvalidData {
            table,
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            PcfError::InvalidData { .. } | PcfError::CsvError(_) => ErrorCategory::Input,
            PcfError::ModelError(_) => ErrorCategory::Model,
            PcfError::CalcError(_) => ErrorCategory::Calculation,
            PcfError::ZipError(_) | PcfError::SerializationError(_) => ErrorCategory::Output,
            PcfError::ConfigValidationError { .. }
            | PcfError::InvalidConfigValueError { .. }
            | PcfError::MissingConfigError { .. } => ErrorCategory::Configuration,
            PcfError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Model | ErrorCategory::Calculation => {
                ErrorSeverity::High
            }
            ErrorCategory::Output | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PcfError::InvalidData { .. } | PcfError::CsvError(_) => {
                "Check the CSV file: comma delimiters, expected header row, no empty fields, positive numbers"
            }
            PcfError::ModelError(ModelError::IllegalUnit { .. }) => {
                "Use a unit allowed for the flow category (e.g. Liters for Water, Kilometers for transport)"
            }
            PcfError::ModelError(_) => {
                "Check that units, categories, tags, flow types and process types use the exact spelling"
            }
            PcfError::CalcError(CalcError::NoMatchingEmission { .. }) => {
                "Add an emission factor row matching the flow name (materials, land) or category and unit (energy, transport)"
            }
            PcfError::CalcError(_) => "Every process needs product flows and every product flow needs flows",
            PcfError::ConfigValidationError { .. }
            | PcfError::InvalidConfigValueError { .. }
            | PcfError::MissingConfigError { .. } => "Review the command line flags or TOML configuration",
            PcfError::ZipError(_) | PcfError::SerializationError(_) => {
                "Check the output formats and that the output path is writable"
            }
            PcfError::IoError(_) => "Check that the files exist and the paths are readable/writable",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("The input files could not be read: {}", self),
            ErrorCategory::Model => format!("The product could not be modeled: {}", self),
            ErrorCategory::Calculation => format!("The carbon footprint could not be calculated: {}", self),
            ErrorCategory::Output => format!("The report could not be written: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}
