//! Reverse-proxy configuration parser

use super::{FileKind, ParseError, ServiceParser};
use crate::inventory::{FactDetail, ServiceCategory, ServiceFact};

const UPSTREAM_START: &str = "upstream backend {";
const UPSTREAM_END: &str = "}";

/// Extracts backend servers from the `upstream backend { ... }` block of a
/// `load-balancer.conf`.
pub struct LoadBalancerParser;

impl ServiceParser for LoadBalancerParser {
    fn kind(&self) -> FileKind {
        FileKind::LoadBalancerConf
    }

    fn parse(&self, content: &str) -> Result<Vec<ServiceFact>, ParseError> {
        let block = find_between(content, UPSTREAM_START, UPSTREAM_END).unwrap_or_default();

        let servers = block
            .split(['\n', ';'])
            .map(str::trim)
            .filter(|statement| statement.starts_with("server"))
            .map(|statement| {
                statement
                    .split_whitespace()
                    .nth(1)
                    .unwrap_or_default()
                    .to_string()
            })
            .collect();

        Ok(vec![ServiceFact::new(
            ServiceCategory::LoadBalancer,
            FactDetail::backends(servers),
        )])
    }
}

/// Text between the first `start` and the next `end` after it.
fn find_between<'a>(content: &'a str, start: &str, end: &str) -> Option<&'a str> {
    let from = content.find(start)? + start.len();
    let len = content[from..].find(end)?;
    Some(&content[from..from + len])
}
