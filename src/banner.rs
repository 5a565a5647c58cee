//! Provenance banner placed at the top of every generated document.
use crate::generate::Options;
use crate::ir::Service;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    pub name: String,
    pub version: String,
}

impl Default for PackageInfo {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// HTML comments so the banner stays invisible in rendered Markdown.
/// No timestamps: identical inputs must produce identical files.
pub fn banner(service: &Service, package: &PackageInfo, options: &Options) -> Vec<String> {
    let mut lines = vec![format!(
        "<!-- This document was generated by {}@{} -->",
        package.name, package.version
    )];
    if let Some(source) = &service.source_path {
        lines.push(format!("<!-- Source: {source} -->"));
    }
    if let Some(command) = &options.command {
        lines.push(format!("<!-- Command: {command} -->"));
    }
    lines.push(
        "<!-- Changes to this file will be lost when the documentation is regenerated. -->".into(),
    );
    lines.push(String::new());
    lines
}
