//! One document per interface: resolve, render, place.
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use thiserror::Error;

use crate::banner::{PackageInfo, banner};
use crate::casing::kebab_case;
use crate::closure::Closure;
use crate::ir::{Interface, Service};
use crate::render::Document;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone)]
pub struct Options {
    /// Root directory for generated documents.
    pub output_dir: PathBuf,
    /// Command line recorded in the banner, if any.
    pub command: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub path: PathBuf,
    pub contents: String,
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Default for Options {
    fn default() -> Self {
        Self { output_dir: PathBuf::from("docs"), command: None }
    }
}

/// `<output_dir>/v<major>/<kebab-interface>.md`
pub fn output_path(service: &Service, interface: &Interface, options: &Options) -> PathBuf {
    options
        .output_dir
        .join(format!("v{}", service.major_version))
        .join(format!("{}.md", kebab_case(&interface.name)))
}

pub fn render_interface(
    service: &Service,
    interface: &Interface,
    package: &PackageInfo,
    options: &Options,
) -> OutputFile {
    let closure = Closure::resolve(service, interface);
    let document =
        Document::new(service, interface, closure).with_banner(banner(service, package, options));
    let contents = document.to_markdown();
    tracing::debug!(interface = %interface.name, bytes = contents.len(), "rendered document");
    OutputFile { path: output_path(service, interface, options), contents }
}

/// Render every interface. Interfaces share nothing but the read-only
/// service, so they are rendered in parallel; output keeps declaration order.
pub fn generate(service: &Service, options: &Options) -> Vec<OutputFile> {
    let package = PackageInfo::default();
    service
        .interfaces
        .par_iter()
        .map(|interface| render_interface(service, interface, &package, options))
        .collect()
}

pub fn write_files(files: &[OutputFile]) -> Result<(), GenerateError> {
    for file in files {
        if let Some(parent) = file.path.parent() {
            create_dir(parent)?;
        }
        std::fs::write(&file.path, &file.contents).map_err(|source| GenerateError::Write {
            path: file.path.clone(),
            source,
        })?;
        tracing::info!(path = %file.path.display(), "wrote document");
    }
    Ok(())
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn create_dir(path: &Path) -> Result<(), GenerateError> {
    if path.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(path).map_err(|source| GenerateError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> Service {
        Service::from_json_str(
            r#"{
                "title": "Shop",
                "majorVersion": 3,
                "interfaces": [
                    { "name": "orderItem", "methods": [
                        { "name": "get", "returnType": { "typeName": "Order" } }
                    ]},
                    { "name": "Customer" }
                ],
                "types": [{ "name": "Order" }]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn paths_use_major_version_and_kebab_case() {
        let svc = service();
        let options = Options { output_dir: PathBuf::from("out"), command: None };
        assert_eq!(
            output_path(&svc, &svc.interfaces[0], &options),
            PathBuf::from("out/v3/order-item.md")
        );
        assert_eq!(
            output_path(&svc, &svc.interfaces[1], &options),
            PathBuf::from("out/v3/customer.md")
        );
    }

    #[test]
    fn generate_keeps_interface_order_and_is_deterministic() {
        let svc = service();
        let options = Options::default();
        let first = generate(&svc, &options);
        let second = generate(&svc, &options);
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert!(first[0].contents.contains("# Order Item\n"));
        assert!(first[0].contents.contains("### Order\n"));
        assert!(first[1].contents.contains("# Customer\n"));
        assert!(first[0].contents.starts_with("<!-- This document was generated by"));
    }

    #[test]
    fn write_files_creates_parent_directories() {
        let dir = std::env::temp_dir().join(format!("service-docs-test-{}", std::process::id()));
        let svc = service();
        let options = Options { output_dir: dir.clone(), command: None };
        let files = generate(&svc, &options);
        write_files(&files).unwrap();
        let written = std::fs::read_to_string(dir.join("v3/order-item.md")).unwrap();
        assert_eq!(written, files[0].contents);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
