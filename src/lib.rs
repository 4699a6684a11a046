pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use core::{etl::PcfEngine, pipeline::PcfPipeline};
pub use domain::model::{Emission, Flow, Process, Product, ProductFlow, ProductSystem};
pub use utils::error::{CalcError, ModelError, PcfError, Result};
