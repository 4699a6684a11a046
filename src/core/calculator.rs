use crate::domain::model::{Emission, Flow, Product};
use crate::domain::vocabulary::{Category, FlowType, Unit};
use crate::utils::error::CalcError;

type CalcResult<T> = std::result::Result<T, CalcError>;

/// How an input flow is matched against the emission factor table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// Exact name equality.
    ByName,
    /// Same category and same unit; the name is ignored.
    ByCategoryAndUnit,
    /// The category never matches anything.
    Unmatchable,
}

impl MatchRule {
    pub fn for_category(category: Category) -> Self {
        match category {
            Category::RawMaterial | Category::LandOccupation => MatchRule::ByName,
            c if c.is_energy() || c.is_transport() => MatchRule::ByCategoryAndUnit,
            _ => MatchRule::Unmatchable,
        }
    }
}

/// First emission record, in table order, that matches `flow`.
pub fn find_matching_emission<'a>(flow: &Flow, emissions: &'a [Emission]) -> Option<&'a Emission> {
    match MatchRule::for_category(flow.category) {
        MatchRule::ByName => emissions.iter().find(|e| e.name == flow.name),
        MatchRule::ByCategoryAndUnit => emissions
            .iter()
            .find(|e| e.category == flow.category && e.unit == flow.unit),
        MatchRule::Unmatchable => None,
    }
}

/// Synthetic output flow carrying the CO2 emitted by `source`.
pub fn emission_flow(source: &Flow, emitted: f64) -> Flow {
    Flow::new(
        format!("{} Emission", source.name),
        Unit::KgCO2,
        Category::AirEmission,
        emitted,
        None,
        FlowType::Output,
        source.origin_country.clone(),
    )
}

/// Resolved outcome for one product flow, applied only once every flow matched.
struct ProductFlowOutcome {
    pcf: f64,
    emission_flows: Vec<Flow>,
}

/// Computes the product carbon footprint and writes it into `product`.
///
/// Every input flow present before the call is matched and turned into an
/// appended `"<name> Emission"` output flow; product flow, process and product
/// totals are summed bottom-up. Non-input flows contribute nothing.
///
/// All matching happens before the tree is touched, so on error `product` is
/// left exactly as it was passed in.
pub fn calculate_pcf(product: &mut Product, emissions: &[Emission]) -> CalcResult<()> {
    validate_structure(product)?;

    let outcomes = product
        .processes()
        .iter()
        .map(|process| {
            process
                .product_flows
                .iter()
                .map(|product_flow| resolve_flows(&product_flow.flows, emissions))
                .collect::<CalcResult<Vec<_>>>()
        })
        .collect::<CalcResult<Vec<_>>>()?;

    let mut total = 0.0;
    for (process, process_outcomes) in product
        .product_system
        .processes
        .iter_mut()
        .zip(outcomes)
    {
        let mut process_total = 0.0;
        for (product_flow, outcome) in process.product_flows.iter_mut().zip(process_outcomes) {
            for flow in outcome.emission_flows {
                product_flow.add_flow(flow);
            }
            product_flow.set_pcf(outcome.pcf);
            process_total += outcome.pcf;
        }
        process.set_pcf(process_total);
        tracing::debug!(
            "Process {} PCF: {} KgCO2",
            process.process_type,
            process_total
        );
        total += process_total;
    }

    product.set_pcf(total);
    tracing::info!("Product '{}' PCF: {} KgCO2", product.name, total);
    Ok(())
}

fn resolve_flows(flows: &[Flow], emissions: &[Emission]) -> CalcResult<ProductFlowOutcome> {
    let mut pcf = 0.0;
    let mut emission_flows = Vec::new();

    for flow in flows.iter().filter(|flow| flow.is_input()) {
        let emission =
            find_matching_emission(flow, emissions).ok_or_else(|| CalcError::NoMatchingEmission {
                flow: flow.name.clone(),
                category: flow.category,
                unit: flow.unit,
            })?;

        let emitted = flow.quantity * emission.emission_factor;
        tracing::trace!(
            "{} x {} ({}) = {} KgCO2",
            flow.name,
            emission.emission_factor,
            emission.name,
            emitted
        );
        pcf += emitted;
        emission_flows.push(emission_flow(flow, emitted));
    }

    Ok(ProductFlowOutcome {
        pcf,
        emission_flows,
    })
}

/// Every level of the tree must be non-empty before anything is computed.
pub fn validate_structure(product: &Product) -> CalcResult<()> {
    let processes = product.processes();
    if processes.is_empty() {
        return Err(CalcError::EmptyProductSystem);
    }

    for process in processes {
        if process.product_flows.is_empty() {
            return Err(CalcError::EmptyProcess {
                process_type: process.process_type,
            });
        }
        for product_flow in &process.product_flows {
            if product_flow.flows.is_empty() {
                return Err(CalcError::EmptyProductFlow {
                    product_flow: product_flow.name.clone(),
                });
            }
        }
    }
    Ok(())
}
