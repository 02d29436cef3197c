//! Keyword tables shared by the file parsers
//!
//! These are deliberately fuzzy substring matchers, not grammars. Each table
//! is ordered: where a parser takes the first hit, the earlier row wins.

use crate::inventory::ServiceCategory;

/// Sub-category key for a container's application server.
pub const APP_SERVER: &str = "app_server";
/// Sub-category key for a container's message broker.
pub const MESSAGE_QUEUE: &str = "message_queue";

/// Technology reported for any repository carrying a `package.json`.
pub const NODE_APP_SERVER: &str = "NodeJs";

/// Container command marker mapped to the sub-category it reveals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandMarker {
    pub marker: &'static str,
    pub sub_category: &'static str,
    pub technology: &'static str,
}

pub const CONTAINER_COMMAND_MARKERS: &[CommandMarker] = &[
    CommandMarker {
        marker: "npm",
        sub_category: APP_SERVER,
        technology: "Nodejs",
    },
    CommandMarker {
        marker: "flask",
        sub_category: APP_SERVER,
        technology: "Flask",
    },
    CommandMarker {
        marker: "django",
        sub_category: APP_SERVER,
        technology: "Django",
    },
    CommandMarker {
        marker: "start-kafka",
        sub_category: MESSAGE_QUEUE,
        technology: "kafka",
    },
    CommandMarker {
        marker: "rabbitmq",
        sub_category: MESSAGE_QUEUE,
        technology: "rabbitmq",
    },
];

/// Keywords looked for inside `package.json` dependency names.
pub const MANIFEST_KEYWORDS: &[(ServiceCategory, &[&str])] = &[
    (ServiceCategory::Database, &["mysql", "mongodb", "postgres"]),
    (ServiceCategory::Cache, &["redis"]),
];

/// Python distribution name mapped to the tag it contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibraryRule {
    pub tag: &'static str,
    pub library: &'static str,
}

pub const REQUIREMENT_LIBRARIES: &[(ServiceCategory, &[LibraryRule])] = &[
    (
        ServiceCategory::Database,
        &[
            LibraryRule {
                tag: "mysql",
                library: "mysqlclient",
            },
            LibraryRule {
                tag: "mongodb",
                library: "pymongo",
            },
            LibraryRule {
                tag: "postgres",
                library: "postgres",
            },
        ],
    ),
    (
        ServiceCategory::Cache,
        &[LibraryRule {
            tag: "redis",
            library: "redis",
        }],
    ),
];

/// boto3 service identifiers and the category their client reveals.
pub const BOTO3_SERVICES: &[(ServiceCategory, &str)] = &[
    (ServiceCategory::AwsS3, "s3"),
    (ServiceCategory::AwsSqs, "sqs"),
    (ServiceCategory::AwsSns, "sns"),
    (ServiceCategory::AwsRds, "rds"),
    (ServiceCategory::AwsLambda, "lambda"),
    (ServiceCategory::AwsCloudTrail, "cloudtrail"),
];

pub const STATIC_ASSET_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "mpg", "mp4", "swf", "avi"];

pub const WEB_ASSET_EXTENSIONS: &[&str] = &["js"];

/// First command marker contained in `line`.
pub fn match_container_command(line: &str) -> Option<&'static CommandMarker> {
    CONTAINER_COMMAND_MARKERS
        .iter()
        .find(|rule| line.contains(rule.marker))
}

/// Every `(category, keyword)` whose keyword occurs in a dependency name.
pub fn match_manifest_dependency(name: &str) -> Vec<(ServiceCategory, &'static str)> {
    MANIFEST_KEYWORDS
        .iter()
        .flat_map(|(category, keywords)| {
            keywords
                .iter()
                .filter(move |keyword| name.contains(**keyword))
                .map(move |keyword| (category.clone(), *keyword))
        })
        .collect()
}

/// Every `(category, tag)` whose library name occurs in a requirement's
/// package portion (the text before `==`).
pub fn match_requirement(line: &str) -> Vec<(ServiceCategory, &'static str)> {
    let package = line.split("==").next().unwrap_or_default();

    REQUIREMENT_LIBRARIES
        .iter()
        .flat_map(|(category, rules)| {
            rules
                .iter()
                .filter(move |rule| package.contains(rule.library))
                .map(move |rule| (category.clone(), rule.tag))
        })
        .collect()
}

/// Categories whose literal `boto3.client('<id>')` call appears in `source`,
/// with either quote style.
pub fn match_boto3_clients(source: &str) -> Vec<ServiceCategory> {
    BOTO3_SERVICES
        .iter()
        .filter(|(_, id)| {
            source.contains(&format!("boto3.client('{}')", id))
                || source.contains(&format!("boto3.client(\"{}\")", id))
        })
        .map(|(category, _)| category.clone())
        .collect()
}

pub fn is_static_asset(extension: &str) -> bool {
    let extension = extension.to_ascii_lowercase();
    STATIC_ASSET_EXTENSIONS.contains(&extension.as_str())
}

pub fn is_web_asset(extension: &str) -> bool {
    let extension = extension.to_ascii_lowercase();
    WEB_ASSET_EXTENSIONS.contains(&extension.as_str())
}
