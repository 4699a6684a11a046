pub mod calculator;
pub mod etl;
pub mod exporter;
pub mod modeler;
pub mod parser;
pub mod pipeline;
pub mod units;

pub use crate::domain::model::{ExtractedTables, PcfResult, Record};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
