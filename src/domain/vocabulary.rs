use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Token that is not part of a closed vocabulary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{value}' is not a known {vocabulary}")]
pub struct UnknownToken {
    pub vocabulary: &'static str,
    pub value: String,
}

// 每個封閉詞彙產生 enum、ALL、as_str、Display、FromStr
macro_rules! closed_vocabulary {
    ($(#[$meta:meta])* $name:ident : $label:literal { $($variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownToken;

            /// Case-sensitive, exact match on the variant name.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $(stringify!($variant) => Ok($name::$variant),)+
                    _ => Err(UnknownToken {
                        vocabulary: $label,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

closed_vocabulary! {
    /// Measurement unit of a flow, product or emission record.
    Unit: "unit" {
        KG,
        Grams,
        Liters,
        Joules,
        Watts,
        SquareMeters,
        SquareKilometers,
        Kilometers,
        Kilowatts,
        KgCO2,
    }
}

closed_vocabulary! {
    /// Nature of a flow.
    Category: "category" {
        RawMaterial,
        Water,
        WindEnergy,
        HydroPowerEnergy,
        SolarEnergy,
        NaturalGasEnergy,
        BiomassEnergy,
        RadioactiveEnergy,
        AirEmission,
        WaterEmission,
        GroundEmission,
        Waste,
        LandOccupation,
        LandTransport,
        AirTransport,
        SeaTransport,
    }
}

closed_vocabulary! {
    /// Material provenance.
    Tag: "tag" {
        Virgin,
        Recycled,
        Reused,
        BioBased,
    }
}

closed_vocabulary! {
    FlowType: "flow type" {
        Input,
        Output,
    }
}

closed_vocabulary! {
    /// Production stage a row belongs to.
    ProcessType: "process type" {
        RawMaterialProduction,
        Manufacturing,
        Assembly,
        Packaging,
        Distribution,
        Use,
        EndOfLife,
    }
}

impl Category {
    pub fn is_energy(&self) -> bool {
        matches!(
            self,
            Category::WindEnergy
                | Category::HydroPowerEnergy
                | Category::SolarEnergy
                | Category::NaturalGasEnergy
                | Category::BiomassEnergy
                | Category::RadioactiveEnergy
        )
    }

    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Category::LandTransport | Category::AirTransport | Category::SeaTransport
        )
    }

    pub fn is_emission(&self) -> bool {
        matches!(
            self,
            Category::AirEmission | Category::WaterEmission | Category::GroundEmission
        )
    }
}
