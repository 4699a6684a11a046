// Domain layer: report entities, closed vocabularies and ports (interfaces).

pub mod model;
pub mod ports;
pub mod vocabulary;
