use super::compose::ComposeParser;
use super::dockerfile::DockerfileParser;
use super::generic::GenericSourceParser;
use super::load_balancer::LoadBalancerParser;
use super::package_json::PackageJsonParser;
use super::python::PythonSourceParser;
use super::requirements::RequirementsParser;
use super::{FileKind, ServiceParser};
use crate::matchers;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

const COMPOSE_FILES: &[&str] = &[
    "docker-compose.yml",
    "docker-compose.yaml",
    "compose.yml",
    "compose.yaml",
];

/// Classifies files by name and maps each kind to its parser.
pub struct ParserRegistry {
    parsers: HashMap<FileKind, Arc<dyn ServiceParser>>,
}

impl ParserRegistry {
    pub fn new() -> Self {
        Self {
            parsers: HashMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(Arc::new(DockerfileParser));
        registry.register(Arc::new(ComposeParser));
        registry.register(Arc::new(LoadBalancerParser));
        registry.register(Arc::new(PackageJsonParser));
        registry.register(Arc::new(RequirementsParser));
        registry.register(Arc::new(PythonSourceParser));
        registry.register(Arc::new(GenericSourceParser));

        registry
    }

    /// Registers a parser, replacing any previous one for the same kind.
    pub fn register(&mut self, parser: Arc<dyn ServiceParser>) {
        self.parsers.insert(parser.kind(), parser);
    }

    pub fn get(&self, kind: FileKind) -> Option<&dyn ServiceParser> {
        self.parsers.get(&kind).map(|p| p.as_ref())
    }

    /// Classifies a file by its name. Exact names are checked before
    /// extensions; the first rule that matches wins.
    pub fn classify(&self, path: &Path) -> Option<FileKind> {
        let filename = path.file_name()?.to_str()?;
        let lower = filename.to_ascii_lowercase();
        // Text after the last dot, so a bare dotfile like `.png` still has one
        let extension = filename.rsplit_once('.').map_or("", |(_, ext)| ext);

        if filename == "Dockerfile" {
            Some(FileKind::Dockerfile)
        } else if lower == "package.json" {
            Some(FileKind::PackageJson)
        } else if lower == "requirements.txt" {
            Some(FileKind::Requirements)
        } else if filename.ends_with(".py") {
            Some(FileKind::PythonSource)
        } else if filename == "load-balancer.conf" {
            Some(FileKind::LoadBalancerConf)
        } else if COMPOSE_FILES.contains(&lower.as_str()) {
            Some(FileKind::Compose)
        } else if matchers::is_static_asset(extension) {
            Some(FileKind::StaticAsset)
        } else if matchers::is_web_asset(extension) {
            Some(FileKind::ScriptSource)
        } else {
            None
        }
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
