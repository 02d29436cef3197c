//! Container orchestration file parser

use super::{FileKind, ParseError, ServiceParser};
use crate::inventory::{FactDetail, ServiceCategory, ServiceFact};
use std::collections::BTreeMap;

/// A compose file only marks the repository as containerized; its services
/// are not inspected.
pub struct ComposeParser;

impl ServiceParser for ComposeParser {
    fn kind(&self) -> FileKind {
        FileKind::Compose
    }

    fn parse(&self, _content: &str) -> Result<Vec<ServiceFact>, ParseError> {
        Ok(vec![ServiceFact::new(
            ServiceCategory::Docker,
            FactDetail::Components(BTreeMap::new()),
        )])
    }
}
