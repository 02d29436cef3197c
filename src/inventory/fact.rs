use super::ServiceCategory;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Marker serialized for boolean categories.
pub const ENABLED: &str = "enabled";

/// Shape of detail a category accumulates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactShape {
    Enabled,
    Technology,
    Tags,
    Backends,
    Components,
}

/// Category-specific payload of a discovered fact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FactDetail {
    /// Presence only.
    Enabled,
    /// One detected technology, e.g. `NodeJs`.
    Technology(String),
    /// Detected technology names, e.g. `["mysql", "redis"]`.
    Tags(Vec<String>),
    /// Load balancer backends in the order they were declared.
    Backends {
        servers_count: usize,
        servers: Vec<String>,
    },
    /// Sub-category to technology, e.g. `app_server -> Flask`.
    Components(BTreeMap<String, String>),
}

impl FactDetail {
    pub fn shape(&self) -> FactShape {
        match self {
            Self::Enabled => FactShape::Enabled,
            Self::Technology(_) => FactShape::Technology,
            Self::Tags(_) => FactShape::Tags,
            Self::Backends { .. } => FactShape::Backends,
            Self::Components(_) => FactShape::Components,
        }
    }

    pub fn backends(servers: Vec<String>) -> Self {
        Self::Backends {
            servers_count: servers.len(),
            servers,
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled)
    }

    pub fn tags(&self) -> &[String] {
        match self {
            Self::Tags(tags) => tags,
            _ => &[],
        }
    }

    pub fn component(&self, sub_category: &str) -> Option<&str> {
        match self {
            Self::Components(map) => map.get(sub_category).map(String::as_str),
            _ => None,
        }
    }

    pub fn technology(&self) -> Option<&str> {
        match self {
            Self::Technology(name) => Some(name),
            _ => None,
        }
    }
}

impl Serialize for FactDetail {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Enabled => serializer.serialize_str(ENABLED),
            Self::Technology(name) => serializer.serialize_str(name),
            Self::Tags(tags) => tags.serialize(serializer),
            Self::Backends {
                servers_count,
                servers,
            } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("servers_count", servers_count)?;
                map.serialize_entry("servers", servers)?;
                map.end()
            }
            Self::Components(components) => components.serialize(serializer),
        }
    }
}

/// One `(category, detail)` observation extracted from a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceFact {
    pub category: ServiceCategory,
    pub detail: FactDetail,
}

impl ServiceFact {
    pub fn new(category: ServiceCategory, detail: FactDetail) -> Self {
        Self { category, detail }
    }

    pub fn enabled(category: ServiceCategory) -> Self {
        Self::new(category, FactDetail::Enabled)
    }

    pub fn tag(category: ServiceCategory, tag: impl Into<String>) -> Self {
        Self::new(category, FactDetail::Tags(vec![tag.into()]))
    }

    pub fn technology(category: ServiceCategory, name: impl Into<String>) -> Self {
        Self::new(category, FactDetail::Technology(name.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_enabled_serializes_as_marker() {
        assert_eq!(
            serde_json::to_value(FactDetail::Enabled).unwrap(),
            json!("enabled")
        );
    }

    #[test]
    fn test_backends_serialization() {
        let detail = FactDetail::backends(vec!["10.0.0.1:8080".to_string()]);
        assert_eq!(
            serde_json::to_value(detail).unwrap(),
            json!({"servers_count": 1, "servers": ["10.0.0.1:8080"]})
        );
    }

    #[test]
    fn test_components_serialization() {
        let mut map = BTreeMap::new();
        map.insert("app_server".to_string(), "Flask".to_string());
        assert_eq!(
            serde_json::to_value(FactDetail::Components(map)).unwrap(),
            json!({"app_server": "Flask"})
        );
    }

    #[test]
    fn test_accessors() {
        let tags = FactDetail::Tags(vec!["mysql".to_string()]);
        assert_eq!(tags.tags(), ["mysql".to_string()]);
        assert_eq!(tags.technology(), None);
        assert!(!tags.is_enabled());
        assert_eq!(FactDetail::Technology("NodeJs".into()).technology(), Some("NodeJs"));
    }
}
