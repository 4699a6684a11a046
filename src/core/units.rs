use crate::domain::vocabulary::{Category, Unit};
use crate::utils::error::UnitRejection;

/// Checks that `unit` is legal for `category`.
///
/// Shared by the product and emissions builders; each maps the rejection to
/// its own error.
pub fn validate_unit_for_category(
    unit: Unit,
    category: Category,
) -> std::result::Result<(), UnitRejection> {
    let reject = |reason: &'static str| -> std::result::Result<(), UnitRejection> {
        Err(UnitRejection {
            unit,
            category,
            reason,
        })
    };

    match category {
        Category::Water => match unit {
            Unit::Liters => Ok(()),
            _ => reject("water is measured in Liters"),
        },
        Category::RawMaterial => match unit {
            Unit::Joules | Unit::Watts | Unit::Kilowatts | Unit::KgCO2 => {
                reject("energy and emission units are not material quantities")
            }
            _ => Ok(()),
        },
        c if c.is_energy() => match unit {
            Unit::Joules | Unit::Watts | Unit::Kilowatts => Ok(()),
            _ => reject("energy is measured in Joules, Watts or Kilowatts"),
        },
        c if c.is_emission() => match unit {
            Unit::KgCO2 => Ok(()),
            _ => reject("emissions are measured in KgCO2"),
        },
        Category::LandOccupation => match unit {
            Unit::SquareMeters | Unit::SquareKilometers => Ok(()),
            _ => reject("land occupation is measured in SquareMeters or SquareKilometers"),
        },
        c if c.is_transport() => match unit {
            Unit::Kilometers => Ok(()),
            _ => reject("transport is measured in Kilometers"),
        },
        _ => reject("no unit is accepted for this category"),
    }
}
