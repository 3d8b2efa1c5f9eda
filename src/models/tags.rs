//! Closed tag types for practice sessions and exercises.
//!
//! Each tag is stored and serialized by its wire value (`"rapid_fire"`,
//! `"9mm"`, ...) and carries a human-readable label for display.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::Postgres;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef};

/// A tag value that doesn't name any known variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTag {
    pub kind: &'static str,
    pub value: String,
}

impl std::fmt::Display for UnknownTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unrecognized {}: '{}'", self.kind, self.value)
    }
}

impl std::error::Error for UnknownTag {}

#[derive(Debug, Clone, Serialize)]
pub struct TagInfo {
    pub value: &'static str,
    pub label: &'static str,
}

macro_rules! tag_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => ($value:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            pub fn catalog() -> Vec<TagInfo> {
                Self::ALL
                    .iter()
                    .map(|t| TagInfo { value: t.as_str(), label: t.label() })
                    .collect()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownTag;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($value => Ok($name::$variant),)+
                    other => Err(UnknownTag {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }

        impl sqlx::Type<Postgres> for $name {
            fn type_info() -> PgTypeInfo {
                <String as sqlx::Type<Postgres>>::type_info()
            }

            fn compatible(ty: &PgTypeInfo) -> bool {
                <String as sqlx::Type<Postgres>>::compatible(ty)
            }
        }

        impl<'q> sqlx::Encode<'q, Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut PgArgumentBuffer,
            ) -> Result<sqlx::encode::IsNull, BoxDynError> {
                <&str as sqlx::Encode<'q, Postgres>>::encode_by_ref(&self.as_str(), buf)
            }
        }

        impl<'r> sqlx::Decode<'r, Postgres> for $name {
            fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
                let raw = <&str as sqlx::Decode<'r, Postgres>>::decode(value)?;
                Ok(raw.parse()?)
            }
        }
    };
}

tag_enum! {
    /// Discipline a practice session trains.
    PracticeType, "practice type" {
        Precision => ("precision", "Precision"),
        RapidFire => ("rapid_fire", "Rapid Fire"),
        Defensive => ("defensive", "Defensive"),
        LongRange => ("long_range", "Long Range"),
        Competition => ("competition", "Competition"),
        Training => ("training", "Training"),
    }
}

tag_enum! {
    TargetType, "target type" {
        Bullseye => ("bullseye", "Bullseye"),
        Silhouette => ("silhouette", "Silhouette"),
        SteelPlate => ("steel_plate", "Steel Plate"),
        Ipsc => ("ipsc", "IPSC"),
        Clay => ("clay", "Clay"),
    }
}

tag_enum! {
    Caliber, "caliber" {
        Rimfire22 => ("22lr", ".22 LR"),
        Nine => ("9mm", "9mm"),
        Acp45 => ("45acp", ".45 ACP"),
        Win308 => ("308win", ".308 Win"),
        Nato556 => ("556nato", "5.56 NATO"),
        Gauge12 => ("12ga", "12 Gauge"),
    }
}
