//! Python source parser

use super::{FileKind, ParseError, ServiceParser};
use crate::inventory::ServiceFact;
use crate::matchers;

/// Looks for literal boto3 client construction in Python sources.
pub struct PythonSourceParser;

impl ServiceParser for PythonSourceParser {
    fn kind(&self) -> FileKind {
        FileKind::PythonSource
    }

    fn parse(&self, content: &str) -> Result<Vec<ServiceFact>, ParseError> {
        Ok(matchers::match_boto3_clients(content)
            .into_iter()
            .map(ServiceFact::enabled)
            .collect())
    }
}
