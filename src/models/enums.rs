use serde::{Deserialize, Serialize};

use super::ParseEnumError;

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$meta])*
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
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ParseEnumError {
                        field: stringify!($name),
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

str_enum!(
    /// What a reminder is about. Only changes how the card is drawn.
    ReminderKind {
        Checkup => "checkup",
        Medicine => "medicine",
        Appointment => "appointment",
    }
);

str_enum!(
    /// Recurrence tag. Stored and displayed; no occurrences are generated from it.
    ReminderFrequency {
        Once => "once",
        Daily => "daily",
        Weekly => "weekly",
        Monthly => "monthly",
    }
);

str_enum!(
    /// Clinician-assigned triage status of a patient.
    PatientStatus {
        Healthy => "healthy",
        Monitor => "monitor",
        Critical => "critical",
    }
);

impl Default for ReminderKind {
    fn default() -> Self {
        Self::Checkup
    }
}

impl Default for ReminderFrequency {
    fn default() -> Self {
        Self::Once
    }
}

impl ReminderKind {
    /// Accent colour of the reminder card icon.
    pub fn accent_color(&self) -> &'static str {
        match self {
            Self::Checkup => "#5B7FDB",
            Self::Medicine => "#FF69B4",
            Self::Appointment => "#87CEEB",
        }
    }
}
