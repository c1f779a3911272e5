//! Status helper enums mapping to SMALLINT lookup tables.
//!
//! Each enum variant's discriminant matches the seed data in the
//! corresponding `*_statuses` table, and `name()` matches its `name` column.

/// Status ID type matching SMALLINT in the database.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:literal => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }

            /// Return the lowercase name stored in the lookup table.
            pub fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }

            /// Resolve a database status ID, or `None` if it is unknown.
            pub fn from_id(id: StatusId) -> Option<Self> {
                match id {
                    $( $val => Some($name::$variant), )+
                    _ => None,
                }
            }

            /// Resolve a lowercase status name, or `None` if it is unknown.
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $( $label => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }
    };
}

define_status_enum! {
    /// App conversion status.
    ///
    /// `Analyzing` exists in the lookup table for clients but the generation
    /// runner never persists it; see [`App::stage`](super::app::App::stage).
    AppStatus {
        Pending = 1 => "pending",
        Analyzing = 2 => "analyzing",
        Generating = 3 => "generating",
        Completed = 4 => "completed",
        Failed = 5 => "failed",
    }
}

impl AppStatus {
    /// Completed and failed apps are never written to again by the runner.
    pub fn is_terminal(self) -> bool {
        matches!(self, AppStatus::Completed | AppStatus::Failed)
    }
}

define_status_enum! {
    /// Payment receipt review status.
    ReceiptStatus {
        Pending = 1 => "pending",
        Verified = 2 => "verified",
        Rejected = 3 => "rejected",
    }
}
