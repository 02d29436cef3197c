//! Front-end script parser

use super::{FileKind, ParseError, ServiceParser};
use crate::inventory::ServiceFact;

/// Scripts currently contribute only through their extension (see
/// [`FileKind::implied_facts`]); content is not inspected yet.
// TODO: match cloud SDK client construction in JavaScript (`new S3Client(`, `new SQSClient(`).
pub struct GenericSourceParser;

impl ServiceParser for GenericSourceParser {
    fn kind(&self) -> FileKind {
        FileKind::ScriptSource
    }

    fn parse(&self, _content: &str) -> Result<Vec<ServiceFact>, ParseError> {
        Ok(Vec::new())
    }
}
