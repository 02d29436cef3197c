//! Container build file parser

use super::{FileKind, ParseError, ServiceParser};
use crate::inventory::{FactDetail, ServiceCategory, ServiceFact};
use crate::matchers;
use std::collections::BTreeMap;

/// Reads `CMD` lines of a `Dockerfile` for runtime markers.
///
/// The file's presence alone marks the repository as containerized.
pub struct DockerfileParser;

impl ServiceParser for DockerfileParser {
    fn kind(&self) -> FileKind {
        FileKind::Dockerfile
    }

    fn parse(&self, content: &str) -> Result<Vec<ServiceFact>, ParseError> {
        let mut components = BTreeMap::new();

        for line in content.lines().filter(|line| line.contains("CMD")) {
            if let Some(rule) = matchers::match_container_command(line) {
                components.insert(rule.sub_category.to_string(), rule.technology.to_string());
            }
        }

        Ok(vec![ServiceFact::new(
            ServiceCategory::Docker,
            FactDetail::Components(components),
        )])
    }
}
