//! Pinned dependency list parser

use super::{FileKind, ParseError, ServiceParser};
use crate::inventory::ServiceFact;
use crate::matchers;

/// Matches each `requirements.txt` line's package name against the known
/// client libraries.
pub struct RequirementsParser;

impl ServiceParser for RequirementsParser {
    fn kind(&self) -> FileKind {
        FileKind::Requirements
    }

    fn parse(&self, content: &str) -> Result<Vec<ServiceFact>, ParseError> {
        Ok(content
            .lines()
            .flat_map(matchers::match_requirement)
            .map(|(category, tag)| ServiceFact::tag(category, tag))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::ServiceCategory;

    #[test]
    fn test_pinned_requirements() {
        let content = "flask==3.0.0\nmysqlclient==2.1.0\nredis==5.0.1\n";
        assert_eq!(
            RequirementsParser.parse(content).unwrap(),
            vec![
                ServiceFact::tag(ServiceCategory::Database, "mysql"),
                ServiceFact::tag(ServiceCategory::Cache, "redis"),
            ]
        );
    }

    #[test]
    fn test_repeated_library_is_reported_per_line() {
        let content = "pymongo==4.6.1\npymongo\n";
        assert_eq!(RequirementsParser.parse(content).unwrap().len(), 2);
    }

    #[test]
    fn test_no_known_libraries() {
        let content = "# web\nfastapi==0.110.0\nuvicorn\n";
        assert!(RequirementsParser.parse(content).unwrap().is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(RequirementsParser.parse("").unwrap().is_empty());
    }
}
