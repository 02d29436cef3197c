//! Package manifest parser

use super::{FileKind, ParseError, ServiceParser};
use crate::inventory::{FactDetail, ServiceCategory, ServiceFact};
use crate::matchers;
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
struct PackageManifest {
    #[serde(default)]
    dependencies: Option<Map<String, Value>>,
}

/// Reads the `dependencies` of a `package.json`.
///
/// Any manifest implies a Node.js application server. Dependency names are
/// matched against the keyword tables and contribute the keyword, not the
/// dependency name. Tags keep the order dependencies are declared in.
pub struct PackageJsonParser;

impl ServiceParser for PackageJsonParser {
    fn kind(&self) -> FileKind {
        FileKind::PackageJson
    }

    fn parse(&self, content: &str) -> Result<Vec<ServiceFact>, ParseError> {
        let manifest: PackageManifest =
            serde_json::from_str(content).map_err(|source| ParseError::InvalidManifest {
                kind: FileKind::PackageJson,
                source,
            })?;

        let mut facts = vec![ServiceFact::technology(
            ServiceCategory::AppServer,
            matchers::NODE_APP_SERVER,
        )];

        let Some(dependencies) = manifest.dependencies else {
            return Ok(facts);
        };

        for (category, _) in matchers::MANIFEST_KEYWORDS {
            let tags: Vec<String> = dependencies
                .keys()
                .flat_map(|name| matchers::match_manifest_dependency(name))
                .filter(|(hit, _)| hit == category)
                .map(|(_, keyword)| keyword.to_string())
                .collect();

            if !tags.is_empty() {
                facts.push(ServiceFact::new(category.clone(), FactDetail::Tags(tags)));
            }
        }

        Ok(facts)
    }
}
