use pcf_calc::core::calculator::{calculate_pcf, find_matching_emission};
use pcf_calc::core::modeler::{build_emissions, build_product};
use pcf_calc::core::parser::{parse_emissions_table, parse_product_table, DEFAULT_MAX_LINES};
use pcf_calc::domain::vocabulary::ProcessType;
use pcf_calc::{CalcError, Emission, ModelError, Product};

const PRODUCT_HEADER: &str = "Name,Country,Weight,Unit,Process Type,ProductFlow Name,Flow Name,Unit,Category,Quantity,Tag,Type,Origin Country";
const EMISSIONS_HEADER: &str = "Name,Category,Unit,Quantity,EmissionFactor";

fn model(product_rows: &[&str], emission_rows: &[&str]) -> (Product, Vec<Emission>) {
    let product_text = format!("{}\n{}\n", PRODUCT_HEADER, product_rows.join("\n"));
    let emissions_text = format!("{}\n{}\n", EMISSIONS_HEADER, emission_rows.join("\n"));

    let product_table = parse_product_table(&product_text, DEFAULT_MAX_LINES).unwrap();
    let emissions_table = parse_emissions_table(&emissions_text, DEFAULT_MAX_LINES).unwrap();

    (
        build_product(&product_table.records).unwrap(),
        build_emissions(&emissions_table.records).unwrap(),
    )
}

/// Quantity x factor over every matched input flow, summed product flow by
/// product flow and process by process.
fn matched_sum(product: &Product, emissions: &[Emission]) -> f64 {
    product
        .processes()
        .iter()
        .map(|process| {
            process
                .product_flows
                .iter()
                .map(|product_flow| {
                    product_flow
                        .flows
                        .iter()
                        .filter(|flow| flow.is_input())
                        .map(|flow| {
                            let emission = find_matching_emission(flow, emissions).unwrap();
                            flow.quantity * emission.emission_factor
                        })
                        .sum::<f64>()
                })
                .sum::<f64>()
        })
        .sum()
}

#[test]
fn test_running_shoe_single_row() {
    let (mut product, emissions) = model(
        &["Running Shoes,Portugal,0.8,KG,RawMaterialProduction,Polyester Production,Petroleum,Liters,RawMaterial,0.3,Virgin,Input,Turkey"],
        &["Petroleum,RawMaterial,Liters,0.3,1.5"],
    );

    calculate_pcf(&mut product, &emissions).unwrap();

    assert_eq!(product.pcf(), 0.3 * 1.5);
}

#[test]
fn test_totals_are_consistent_across_levels() {
    let (mut product, emissions) = model(
        &[
            "Shoe,Portugal,0.8,KG,RawMaterialProduction,Polyester Production,Petroleum,Liters,RawMaterial,0.3,Virgin,Input,Turkey",
            "Shoe,Portugal,0.8,KG,Manufacturing,Sole Molding,Factory Power,Watts,WindEnergy,1200,Virgin,Input,Portugal",
            "Shoe,Portugal,0.8,KG,RawMaterialProduction,Rubber Plantation,Plantation Land,SquareKilometers,LandOccupation,0.001,BioBased,Input,Vietnam",
            "Shoe,Portugal,0.8,KG,Distribution,Air Freight,Cargo Plane,Kilometers,AirTransport,800,Virgin,Input,Portugal",
        ],
        &[
            "Petroleum,RawMaterial,Liters,0.3,1.5",
            "Wind Farm,WindEnergy,Watts,1,0.0002",
            "Plantation Land,LandOccupation,SquareKilometers,1,300",
            "Cargo Plane,AirTransport,Kilometers,1,0.5",
        ],
    );

    calculate_pcf(&mut product, &emissions).unwrap();

    let process_sum: f64 = product.processes().iter().map(|p| p.pcf()).sum();
    assert_eq!(product.pcf(), process_sum);
    for process in product.processes() {
        let flows_sum: f64 = process.product_flows.iter().map(|pf| pf.pcf()).sum();
        assert_eq!(process.pcf(), flows_sum);
    }
    assert_eq!(product.pcf(), matched_sum(&product, &emissions));
}

#[test]
fn test_same_process_type_produces_two_product_flows() {
    let (mut product, emissions) = model(
        &[
            "Shoe,Portugal,0.8,KG,RawMaterialProduction,Polyester Production,Petroleum,Liters,RawMaterial,0.3,Virgin,Input,Turkey",
            "Shoe,Portugal,0.8,KG,RawMaterialProduction,Cotton Farming,Cotton,KG,RawMaterial,0.2,Recycled,Input,India",
        ],
        &[
            "Petroleum,RawMaterial,Liters,0.3,1.5",
            "Cotton,RawMaterial,KG,1,5",
        ],
    );

    calculate_pcf(&mut product, &emissions).unwrap();

    let processes = product.processes();
    assert_eq!(processes.len(), 1);
    assert_eq!(processes[0].process_type, ProcessType::RawMaterialProduction);
    assert_eq!(processes[0].product_flows.len(), 2);
    assert_eq!(processes[0].product_flows[0].pcf(), 0.3 * 1.5);
    assert_eq!(processes[0].product_flows[1].pcf(), 0.2 * 5.0);
    assert_eq!(processes[0].pcf(), 0.3 * 1.5 + 0.2 * 5.0);
}

#[test]
fn test_output_flows_never_contribute() {
    let (mut product, emissions) = model(
        &[
            "Shoe,Portugal,0.8,KG,RawMaterialProduction,Polyester Production,Petroleum,Liters,RawMaterial,0.3,Virgin,Output,Turkey",
            "Shoe,Portugal,0.8,KG,Manufacturing,Cooling,Process Water,Liters,Water,4,Virgin,Output,Portugal",
        ],
        &["Petroleum,RawMaterial,Liters,0.3,1.5"],
    );

    calculate_pcf(&mut product, &emissions).unwrap();

    assert_eq!(product.pcf(), 0.0);
    assert_eq!(product.flows().count(), 2);
}

#[test]
fn test_name_match_for_materials_and_category_unit_match_for_energy() {
    // 能源只比對類別與單位，名稱不同也會匹配
    let (mut product, emissions) = model(
        &["Shoe,Portugal,0.8,KG,Manufacturing,Sole Molding,Factory Power,Kilowatts,HydroPowerEnergy,10,Virgin,Input,Portugal"],
        &[
            "Dam A,HydroPowerEnergy,Joules,1,9",
            "Dam B,HydroPowerEnergy,Kilowatts,1,0.02",
            "Dam C,HydroPowerEnergy,Kilowatts,1,0.07",
        ],
    );
    calculate_pcf(&mut product, &emissions).unwrap();
    assert_eq!(product.pcf(), 10.0 * 0.02);

    // 原料只比對名稱
    let (mut product, emissions) = model(
        &["Shoe,Portugal,0.8,KG,RawMaterialProduction,Polyester Production,Petroleum,Liters,RawMaterial,0.3,Virgin,Input,Turkey"],
        &["Crude Oil,RawMaterial,Liters,0.3,1.5"],
    );
    assert!(matches!(
        calculate_pcf(&mut product, &emissions),
        Err(CalcError::NoMatchingEmission { .. })
    ));
}

#[test]
fn test_water_input_always_fails() {
    let (mut product, emissions) = model(
        &["Shoe,Portugal,0.8,KG,Manufacturing,Cooling,Process Water,Liters,Water,4,Virgin,Input,Portugal"],
        &["Petroleum,RawMaterial,Liters,0.3,1.5"],
    );
    let before = product.clone();

    assert!(calculate_pcf(&mut product, &emissions).is_err());
    assert_eq!(product, before);
}

#[test]
fn test_zero_emission_records_fail_every_input() {
    let (mut product, _) = model(
        &["Shoe,Portugal,0.8,KG,RawMaterialProduction,Polyester Production,Petroleum,Liters,RawMaterial,0.3,Virgin,Input,Turkey"],
        &["Petroleum,RawMaterial,Liters,0.3,1.5"],
    );
    assert!(matches!(
        calculate_pcf(&mut product, &[]),
        Err(CalcError::NoMatchingEmission { .. })
    ));
}

#[test]
fn test_raw_material_in_joules_rejected_at_build_time() {
    let text = format!(
        "{}\nShoe,Portugal,0.8,KG,RawMaterialProduction,Polyester Production,Petroleum,Joules,RawMaterial,0.3,Virgin,Input,Turkey\n",
        PRODUCT_HEADER
    );
    let table = parse_product_table(&text, DEFAULT_MAX_LINES).unwrap();
    assert!(matches!(
        build_product(&table.records),
        Err(ModelError::IllegalUnit { .. })
    ));
}
