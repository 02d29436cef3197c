//! Service inventory and its merge policy
//!
//! An [`Inventory`] maps each [`ServiceCategory`] to the detail accumulated
//! for it over one discovery run. Parsers never touch it directly: they
//! return facts, and the walker folds them in with [`Inventory::merge`].
//!
//! Merge rules by shape:
//!
//! - `Enabled`: set once; setting again changes nothing.
//! - `Technology`: last write wins.
//! - `Tags`: appended in visit order, skipping tags already present.
//! - `Backends`: servers appended, count summed.
//! - `Components`: key-wise union, later keys overwrite earlier ones.
//!
//! A built-in category only ever holds its own shape (see
//! [`ServiceCategory::shape`]); a fact of any other shape is dropped with a
//! warning. Custom categories take whatever arrives, replacing a detail of a
//! different shape.

mod category;
mod fact;
mod id_enum_macro;

pub use category::ServiceCategory;
pub use fact::{FactDetail, FactShape, ServiceFact, ENABLED};

use serde::Serialize;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use tracing::warn;

/// Accumulated services for one repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Inventory {
    services: BTreeMap<ServiceCategory, FactDetail>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: &ServiceCategory) -> Option<&FactDetail> {
        self.services.get(category)
    }

    pub fn contains(&self, category: &ServiceCategory) -> bool {
        self.services.contains_key(category)
    }

    pub fn is_enabled(&self, category: &ServiceCategory) -> bool {
        self.get(category).is_some_and(FactDetail::is_enabled)
    }

    pub fn tags(&self, category: &ServiceCategory) -> &[String] {
        self.get(category).map(FactDetail::tags).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ServiceCategory, &FactDetail)> {
        self.services.iter()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn set_enabled(&mut self, category: ServiceCategory) {
        self.merge(ServiceFact::enabled(category));
    }

    pub fn set_technology(&mut self, category: ServiceCategory, name: impl Into<String>) {
        self.merge(ServiceFact::technology(category, name));
    }

    pub fn append_tags<I, S>(&mut self, category: ServiceCategory, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags = tags.into_iter().map(Into::into).collect();
        self.merge(ServiceFact::new(category, FactDetail::Tags(tags)));
    }

    pub fn extend_backends(&mut self, category: ServiceCategory, servers: Vec<String>) {
        self.merge(ServiceFact::new(category, FactDetail::backends(servers)));
    }

    pub fn merge_components(
        &mut self,
        category: ServiceCategory,
        components: BTreeMap<String, String>,
    ) {
        self.merge(ServiceFact::new(category, FactDetail::Components(components)));
    }

    /// Folds one fact into the inventory.
    pub fn merge(&mut self, fact: ServiceFact) {
        let ServiceFact { category, detail } = fact;

        if !category.accepts(detail.shape()) {
            warn!(
                category = %category,
                expected = ?category.shape(),
                incoming = ?detail.shape(),
                "Ignoring service detail of the wrong shape"
            );
            return;
        }

        let existing = match self.services.entry(category) {
            Entry::Vacant(slot) => {
                slot.insert(normalize(detail));
                return;
            }
            Entry::Occupied(slot) => slot.into_mut(),
        };

        match (existing, detail) {
            (FactDetail::Enabled, FactDetail::Enabled) => {}
            (FactDetail::Technology(current), FactDetail::Technology(name)) => *current = name,
            (FactDetail::Tags(current), FactDetail::Tags(tags)) => {
                for tag in tags {
                    if !current.contains(&tag) {
                        current.push(tag);
                    }
                }
            }
            (
                FactDetail::Backends {
                    servers_count,
                    servers,
                },
                FactDetail::Backends {
                    servers_count: added_count,
                    servers: added,
                },
            ) => {
                *servers_count += added_count;
                servers.extend(added);
            }
            (FactDetail::Components(current), FactDetail::Components(added)) => {
                current.extend(added);
            }
            (existing, detail) => {
                warn!(
                    existing = ?existing.shape(),
                    incoming = ?detail.shape(),
                    "Replacing service detail of a different shape"
                );
                *existing = normalize(detail);
            }
        }
    }

    /// Folds every fact of a parser delta into the inventory, in order.
    pub fn merge_all(&mut self, facts: impl IntoIterator<Item = ServiceFact>) {
        for fact in facts {
            self.merge(fact);
        }
    }
}

fn normalize(detail: FactDetail) -> FactDetail {
    match detail {
        FactDetail::Tags(tags) => {
            let mut unique: Vec<String> = Vec::with_capacity(tags.len());
            for tag in tags {
                if !unique.contains(&tag) {
                    unique.push(tag);
                }
            }
            FactDetail::Tags(unique)
        }
        other => other,
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = (&'a ServiceCategory, &'a FactDetail);
    type IntoIter = std::collections::btree_map::Iter<'a, ServiceCategory, FactDetail>;

    fn into_iter(self) -> Self::IntoIter {
        self.services.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_inventory_is_empty() {
        let inventory = Inventory::new();
        assert!(inventory.is_empty());
        assert_eq!(serde_json::to_value(&inventory).unwrap(), json!({}));
    }

    #[test]
    fn test_enabled_is_idempotent() {
        let mut inventory = Inventory::new();
        inventory.set_enabled(ServiceCategory::AwsS3);
        let once = inventory.clone();
        inventory.set_enabled(ServiceCategory::AwsS3);
        assert_eq!(inventory, once);
        assert!(inventory.is_enabled(&ServiceCategory::AwsS3));
    }

    #[test]
    fn test_tags_accumulate_without_duplicates() {
        let mut inventory = Inventory::new();
        inventory.append_tags(ServiceCategory::Database, ["mysql"]);
        inventory.append_tags(ServiceCategory::Database, ["mongodb", "mysql"]);
        assert_eq!(
            inventory.tags(&ServiceCategory::Database),
            ["mysql".to_string(), "mongodb".to_string()]
        );
    }

    #[test]
    fn test_first_tags_are_deduplicated() {
        let mut inventory = Inventory::new();
        inventory.append_tags(ServiceCategory::Cache, ["redis", "redis"]);
        assert_eq!(inventory.tags(&ServiceCategory::Cache), ["redis".to_string()]);
    }

    #[test]
    fn test_backends_accumulate() {
        let mut inventory = Inventory::new();
        inventory.extend_backends(ServiceCategory::LoadBalancer, vec!["a:1".into()]);
        inventory.extend_backends(ServiceCategory::LoadBalancer, vec!["b:2".into(), "c:3".into()]);
        assert_eq!(
            inventory.get(&ServiceCategory::LoadBalancer),
            Some(&FactDetail::Backends {
                servers_count: 3,
                servers: vec!["a:1".into(), "b:2".into(), "c:3".into()],
            })
        );
    }

    #[test]
    fn test_components_union_later_wins() {
        let mut inventory = Inventory::new();
        let mut first = BTreeMap::new();
        first.insert("app_server".to_string(), "Nodejs".to_string());
        first.insert("message_queue".to_string(), "kafka".to_string());
        inventory.merge_components(ServiceCategory::Docker, first);

        let mut second = BTreeMap::new();
        second.insert("app_server".to_string(), "Flask".to_string());
        inventory.merge_components(ServiceCategory::Docker, second);

        let docker = inventory.get(&ServiceCategory::Docker).unwrap();
        assert_eq!(docker.component("app_server"), Some("Flask"));
        assert_eq!(docker.component("message_queue"), Some("kafka"));
    }

    #[test]
    fn test_empty_components_mark_presence() {
        let mut inventory = Inventory::new();
        inventory.merge_components(ServiceCategory::Docker, BTreeMap::new());
        assert!(inventory.contains(&ServiceCategory::Docker));
        assert_eq!(serde_json::to_value(&inventory).unwrap(), json!({"docker": {}}));
    }

    #[test]
    fn test_technology_last_write_wins() {
        let mut inventory = Inventory::new();
        inventory.set_technology(ServiceCategory::AppServer, "Flask");
        inventory.set_technology(ServiceCategory::AppServer, "NodeJs");
        assert_eq!(
            inventory
                .get(&ServiceCategory::AppServer)
                .and_then(FactDetail::technology),
            Some("NodeJs")
        );
    }

    #[test]
    fn test_wrong_shape_for_builtin_category_is_ignored() {
        let mut inventory = Inventory::new();
        inventory.append_tags(ServiceCategory::Database, ["postgres"]);
        inventory.set_enabled(ServiceCategory::Database);
        inventory.append_tags(ServiceCategory::AwsS3, ["bucket"]);

        assert_eq!(inventory.tags(&ServiceCategory::Database), ["postgres"]);
        assert!(!inventory.contains(&ServiceCategory::AwsS3));
        assert_eq!(
            serde_json::to_value(&inventory).unwrap(),
            json!({"database": ["postgres"]})
        );
    }

    #[test]
    fn test_custom_category_shape_mismatch_replaces() {
        let mut inventory = Inventory::new();
        inventory.set_enabled(ServiceCategory::Custom("search".into()));
        inventory.append_tags(ServiceCategory::Custom("search".into()), ["elastic"]);
        assert_eq!(
            inventory.tags(&ServiceCategory::Custom("search".into())),
            ["elastic".to_string()]
        );
    }

    #[test]
    fn test_merge_all_preserves_order() {
        let mut inventory = Inventory::new();
        inventory.merge_all(vec![
            ServiceFact::tag(ServiceCategory::Database, "postgres"),
            ServiceFact::tag(ServiceCategory::Database, "mysql"),
            ServiceFact::enabled(ServiceCategory::WebServer),
        ]);
        assert_eq!(
            serde_json::to_value(&inventory).unwrap(),
            json!({"database": ["postgres", "mysql"], "web_server": "enabled"})
        );
    }
}
