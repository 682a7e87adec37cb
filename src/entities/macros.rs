//! Macros for reducing boilerplate when defining entities and models
//!
//! These macros generate the repetitive trait implementations needed by the
//! persisted string-literal enums and the raw entity records.

/// Define an enum persisted as a closed set of string literals
///
/// Generates serde renames, `as_str`, `FromStr` (with an error listing the
/// accepted values), `Display` and a `VALUES` slice for schema descriptions.
///
/// # Example
///
/// ```rust,ignore
/// literal_enum! {
///     /// Billing state of an organisation
///     #[derive(Default)]
///     pub enum BillingPlanStatus {
///         #[default]
///         Inactive => "INACTIVE",
///         Active => "ACTIVE",
///     }
/// }
///
/// assert_eq!("ACTIVE".parse::<BillingPlanStatus>(), Ok(BillingPlanStatus::Active));
/// ```
#[macro_export]
macro_rules! literal_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $lit:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $lit)]
                $variant,
            )+
        }

        impl $name {
            /// Every accepted literal, in declaration order
            pub const VALUES: &'static [&'static str] = &[ $( $lit ),+ ];

            /// The persisted literal for this value
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $lit, )+
                }
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $lit => Ok($name::$variant), )+
                    other => Err(format!(
                        "invalid value '{}', expected one of: {}",
                        other,
                        Self::VALUES.join(", ")
                    )),
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// Implement the `Entity` trait for a raw record whose primary key lives in
/// an `id: Bson` field
///
/// # Example
///
/// ```rust,ignore
/// impl_entity!(QueryEntity, "query");
/// ```
#[macro_export]
macro_rules! impl_entity {
    ($type:ident, $entity_name:expr) => {
        impl $crate::core::entity::Entity for $type {
            fn entity_name() -> &'static str {
                $entity_name
            }

            fn raw_id(&self) -> &::bson::Bson {
                &self.id
            }
        }
    };
}
