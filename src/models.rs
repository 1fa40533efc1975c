// Data structures for the listing catalog
// Listing is the unit record; the enums are the closed filter dimensions

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

// Generates a closed enumeration with its wire names, an ALL table,
// Display and FromStr. Wire names are matched exactly (after trimming).
macro_rules! closed_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            #[cfg(test)]
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($wire => Ok($name::$variant),)+
                    other => Err(UnknownVariant(other.to_string())),
                }
            }
        }
    };
}

// Returned when a string is not one of the known wire names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

closed_enum! {
    /// Vehicle manufacturer.
    Brand {
        Acura => "ACURA",
        AlfaRomeo => "ALFA_ROMEO",
        Audi => "AUDI",
        Bmw => "BMW",
        Chevrolet => "CHEVROLET",
        Chrysler => "CHRYSLER",
        Citroen => "CITROEN",
        Dacia => "DACIA",
        Fiat => "FIAT",
        Ford => "FORD",
        Gmc => "GMC",
        Honda => "HONDA",
        Hyundai => "HYUNDAI",
        Infiniti => "INFINITI",
        Jaguar => "JAGUAR",
        Jeep => "JEEP",
        Kia => "KIA",
        LandRover => "LAND_ROVER",
        Lexus => "LEXUS",
        Mazda => "MAZDA",
        MercedesBenz => "MERCEDES_BENZ",
        Mitsubishi => "MITSUBISHI",
        Nissan => "NISSAN",
        Peugeot => "PEUGEOT",
        Porsche => "PORSCHE",
        Renault => "RENAULT",
        Seat => "SEAT",
        Smart => "SMART",
        Subaru => "SUBARU",
        Suzuki => "SUZUKI",
        Tesla => "TESLA",
        Volkswagen => "VOLKSWAGEN",
        Volvo => "VOLVO",
        Toyota => "TOYOTA",
    }
}

closed_enum! {
    /// Body style. ELECTRIC is a body category in this catalog, separate from `Fuel::Electric`.
    BodyType {
        Electric => "ELECTRIC",
        Coupe => "COUPE",
        Hatchback => "HATCHBACK",
        Minivan => "MINIVAN",
        OffRoad => "OFF_ROAD",
        Sedan => "SEDAN",
        Suv => "SUV",
        Truck => "TRUCK",
        Van => "VAN",
        Wagon => "WAGON",
    }
}

closed_enum! {
    Fuel {
        Diesel => "DIESEL",
        Electric => "ELECTRIC",
        Gasoline => "GASOLINE",
        Hybrid => "HYBRID",
        PluginHybrid => "PLUGIN_HYBRID",
    }
}

closed_enum! {
    Transmission {
        Manual => "MANUAL",
        Automatic => "AUTOMATIC",
        SemiAutomatic => "SEMI_AUTOMATIC",
    }
}

// One vehicle record in the catalog
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: u64, // Stable identifier, last-resort sort key
    pub name: String,
    pub brand: Brand,
    #[serde(rename = "type")] // `type` is a keyword in Rust
    pub body_type: BodyType,
    pub fuel: Fuel,
    pub transmission: Transmission,
    pub year: u16,
    pub price_max: u32,
}
