/// Declares a string-keyed identifier enum with a `Custom` escape hatch.
///
/// Each variant carries the key it serializes to and a human label. Unknown
/// keys deserialize into `Custom`, so consumers reading an inventory written
/// by a newer heuristic set keep working.
#[macro_export]
macro_rules! define_key_enum {
    (
        $(#[$enum_meta:meta])*
        $enum_name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $key:literal : $label:literal
            ),* $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $enum_name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
            Custom(String),
        }

        impl serde::Serialize for $enum_name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.key())
            }
        }

        impl<'de> serde::Deserialize<'de> for $enum_name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Ok(Self::from_key(&s))
            }
        }

        impl $enum_name {
            pub fn key(&self) -> &str {
                match self {
                    $(
                        Self::$variant => $key,
                    )*
                    Self::Custom(key) => key,
                }
            }

            pub fn label(&self) -> String {
                match self {
                    $(
                        Self::$variant => $label.to_string(),
                    )*
                    Self::Custom(key) => key.clone(),
                }
            }

            pub fn from_key(key: &str) -> Self {
                match key {
                    $(
                        $key => Self::$variant,
                    )*
                    _ => Self::Custom(key.to_string()),
                }
            }

            pub fn all_variants() -> &'static [Self] {
                &[
                    $(
                        Self::$variant,
                    )*
                ]
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.key())
            }
        }
    };
}
