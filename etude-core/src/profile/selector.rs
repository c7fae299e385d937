//! XPath-like element selectors
//!
//! Supports the subset of ElementPath syntax that annotation profiles need:
//!
//! - `./A/B` children of the root element, then their children
//! - `.//A` descendants of the root element at any depth
//! - `*` any element
//! - `prefix:A` an element in the namespace bound to `prefix`
//!
//! A bare name only matches elements without a namespace.

use roxmltree::Node;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Child,
    Descendant,
}

/// Element or attribute name, optionally bound to a namespace URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QualifiedName {
    Local(String),
    Namespaced { uri: String, local: String },
}

impl QualifiedName {
    /// Resolve `prefix:local` against the profile's namespace table.
    pub fn resolve(raw: &str, namespaces: &BTreeMap<String, String>) -> Result<Self> {
        match raw.split_once(':') {
            Some((prefix, local)) => {
                let uri = namespaces.get(prefix).ok_or_else(|| {
                    Error::configuration(format!("undeclared namespace prefix '{prefix}' in '{raw}'"))
                })?;
                if local.is_empty() {
                    return Err(Error::configuration(format!("missing local name in '{raw}'")));
                }
                Ok(QualifiedName::Namespaced {
                    uri: uri.clone(),
                    local: local.to_string(),
                })
            }
            None => Ok(QualifiedName::Local(raw.to_string())),
        }
    }

    fn matches_element(&self, node: &Node<'_, '_>) -> bool {
        let tag = node.tag_name();
        match self {
            QualifiedName::Local(name) => tag.namespace().is_none() && tag.name() == name,
            QualifiedName::Namespaced { uri, local } => {
                tag.namespace() == Some(uri.as_str()) && tag.name() == local
            }
        }
    }

    /// Attribute value on `node`, if present
    pub fn attribute<'a>(&self, node: &Node<'a, '_>) -> Option<&'a str> {
        match self {
            QualifiedName::Local(name) => node.attribute(name.as_str()),
            QualifiedName::Namespaced { uri, local } => {
                node.attribute((uri.as_str(), local.as_str()))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NameTest {
    Any,
    Name(QualifiedName),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    axis: Axis,
    test: NameTest,
}

/// Compiled selector, evaluated relative to the document's root element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    steps: Vec<Step>,
}

impl Selector {
    pub fn parse(source: &str, namespaces: &BTreeMap<String, String>) -> Result<Self> {
        let invalid = |why: &str| Error::configuration(format!("invalid selector '{source}': {why}"));

        let trimmed = source.trim();
        let mut rest = trimmed.strip_prefix('.').unwrap_or(trimmed);
        if rest.is_empty() {
            return Err(invalid("selects no elements"));
        }
        if rest.starts_with('.') {
            return Err(invalid("parent steps are not supported"));
        }

        let relative = !trimmed.starts_with('.');
        let mut steps = Vec::new();
        while !rest.is_empty() {
            let axis = if let Some(after) = rest.strip_prefix("//") {
                rest = after;
                Axis::Descendant
            } else if let Some(after) = rest.strip_prefix('/') {
                rest = after;
                Axis::Child
            } else if relative && steps.is_empty() {
                Axis::Child
            } else {
                return Err(invalid("expected '/' between steps"));
            };

            let end = rest.find('/').unwrap_or(rest.len());
            let name = &rest[..end];
            rest = &rest[end..];

            let test = match name {
                "" => return Err(invalid("empty step")),
                "*" => NameTest::Any,
                _ if name.contains(['[', ']', '@', '(']) => {
                    return Err(invalid("predicates are not supported"))
                }
                _ => NameTest::Name(QualifiedName::resolve(name, namespaces)?),
            };
            steps.push(Step { axis, test });
        }

        Ok(Self {
            source: trimmed.to_string(),
            steps,
        })
    }

    /// Matching elements under `root`, in document order without duplicates
    pub fn select<'a, 'input>(&self, root: Node<'a, 'input>) -> Vec<Node<'a, 'input>> {
        let mut context = vec![root];
        for step in &self.steps {
            let mut next: Vec<Node<'a, 'input>> = Vec::new();
            for node in &context {
                let matches = |candidate: &Node<'a, 'input>| {
                    candidate.is_element()
                        && match &step.test {
                            NameTest::Any => true,
                            NameTest::Name(name) => name.matches_element(candidate),
                        }
                };
                match step.axis {
                    Axis::Child => next.extend(node.children().filter(matches)),
                    Axis::Descendant => next.extend(node.descendants().skip(1).filter(matches)),
                }
            }
            next.sort_by_key(|node| node.id().get());
            next.dedup_by_key(|node| node.id().get());
            context = next;
        }
        context
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    fn no_namespaces() -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    fn names(selector: &str, xml: &str) -> Vec<String> {
        let doc = Document::parse(xml).unwrap();
        Selector::parse(selector, &no_namespaces())
            .unwrap()
            .select(doc.root_element())
            .iter()
            .map(|node| node.attribute("id").unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn test_child_path_stays_under_root() {
        let xml = r#"<doc>
            <TAGS><DATE id="a"/><NAME id="x"/><DATE id="b"/></TAGS>
            <OTHER><TAGS><DATE id="nested"/></TAGS></OTHER>
        </doc>"#;
        assert_eq!(names("./TAGS/DATE", xml), vec!["a", "b"]);
        assert_eq!(names("TAGS/DATE", xml), vec!["a", "b"]);
    }

    #[test]
    fn test_descendant_finds_any_depth() {
        let xml = r#"<CAS>
            <org.apache.uima.tutorial.DateAnnot id="1"/>
            <wrap><org.apache.uima.tutorial.DateAnnot id="2"/></wrap>
        </CAS>"#;
        assert_eq!(
            names(".//org.apache.uima.tutorial.DateAnnot", xml),
            vec!["1", "2"]
        );
    }

    #[test]
    fn test_wildcard_and_nested_descendants_do_not_duplicate() {
        let xml = r#"<r><a><a><b id="1"/></a></a></r>"#;
        assert_eq!(names(".//a//b", xml), vec!["1"]);
        assert_eq!(names("./*/*/b", xml), vec!["1"]);
    }

    #[test]
    fn test_prefixed_name_uses_namespace_table() {
        let xml = r#"<xmi:XMI xmlns:xmi="http://www.omg.org/XMI"
                             xmlns:custom="http:///webanno/custom.ecore">
            <custom:PHI id="p1" begin="3" end="9"/>
            <PHI id="plain"/>
        </xmi:XMI>"#;
        let mut namespaces = BTreeMap::new();
        namespaces.insert(
            "custom".to_string(),
            "http:///webanno/custom.ecore".to_string(),
        );

        let doc = Document::parse(xml).unwrap();
        let selected = Selector::parse(".//custom:PHI", &namespaces)
            .unwrap()
            .select(doc.root_element());
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].attribute("id"), Some("p1"));

        assert_eq!(names(".//PHI", xml), vec!["plain"]);
    }

    #[test]
    fn test_rejects_malformed_selectors() {
        for bad in [".", "", "./", ".//", "./A//", "../A", "./A[@x]", ".A"] {
            assert!(
                Selector::parse(bad, &no_namespaces()).is_err(),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_undeclared_prefix() {
        match Selector::parse(".//nope:Thing", &no_namespaces()) {
            Err(Error::Configuration(msg)) => assert!(msg.contains("nope")),
            other => panic!("Expected configuration error, got {other:?}"),
        }
    }
}
