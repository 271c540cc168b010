use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid enum value for {field}: {value}")]
pub struct InvalidEnum {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnum;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(DoseStatus {
    Upcoming => "upcoming",
    Current => "current",
    Overdue => "overdue",
});

str_enum!(MessageSender {
    User => "user",
    Ai => "ai",
});

str_enum!(MealKind {
    Breakfast => "breakfast",
    Lunch => "lunch",
    Dinner => "dinner",
    Snack => "snack",
});

impl DoseStatus {
    /// Badge text shown next to a medication.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Upcoming => "예정",
            Self::Current => "복용 시간",
            Self::Overdue => "시간 지남",
        }
    }
}

impl MealKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Breakfast => "아침",
            Self::Lunch => "점심",
            Self::Dinner => "저녁",
            Self::Snack => "간식",
        }
    }

    /// Clock time recorded for a meal of this kind.
    pub fn default_time(&self) -> &'static str {
        match self {
            Self::Breakfast => "08:00",
            Self::Lunch => "12:00",
            Self::Dinner => "18:00",
            Self::Snack => "15:00",
        }
    }
}
