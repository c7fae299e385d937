//! Annotation extraction from XML documents

use roxmltree::{Document, ParsingOptions};
use std::fs;
use std::path::Path;

use crate::domain::{AnnotationRecord, ExtractionResult};
use crate::error::{Error, Result};
use crate::profile::{QualifiedName, SchemaProfile};

/// Read and extract every annotation `profile` describes in the file at `path`.
pub fn extract_annotations(path: &Path, profile: &SchemaProfile) -> Result<ExtractionResult> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    extract_from_str(&content, path, profile)
}

/// Extract annotations from XML text. `source` only names the document in errors.
pub fn extract_from_str(
    content: &str,
    source: &Path,
    profile: &SchemaProfile,
) -> Result<ExtractionResult> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let document =
        Document::parse_with_options(content, options).map_err(|e| Error::SchemaParse {
            path: source.to_path_buf(),
            message: e.to_string(),
        })?;

    let root = document.root_element();
    let mut result = ExtractionResult::new();

    for pattern in profile.patterns() {
        let elements = pattern.selector.select(root);
        log::trace!(
            "{}: {} element(s) match '{}'",
            source.display(),
            elements.len(),
            pattern.selector
        );

        for element in elements {
            let read = |attr: &Option<QualifiedName>| {
                attr.as_ref()
                    .and_then(|name| name.attribute(&element))
                    .map(str::to_string)
            };

            let text = match &pattern.text_attr {
                Some(name) => name.attribute(&element).map(str::to_string),
                None => element.text().map(str::to_string),
            };

            result.insert(AnnotationRecord {
                start: read(&pattern.begin_attr),
                end: read(&pattern.end_attr),
                text,
                category: pattern.category.clone(),
                default_score: profile.default_score(),
            });
        }
    }

    log::debug!(
        "{}: extracted {} annotation(s) at {} start position(s) with profile '{}'",
        source.display(),
        result.record_count(),
        result.len(),
        profile.name()
    );

    Ok(result)
}
