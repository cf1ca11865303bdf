//! Product category taxonomy.
//!
//! Flattens the category tree into an immutable `id -> parent` map plus the set
//! of valid (non-root) category ids. The roll-up engine borrows it read-only.

mod xml;

use std::collections::HashMap;
use std::path::Path;

use crate::error::TaxonomyError;

/// Immutable category tree keyed by category id.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    root_id: String,
    /// Parent of every valid category. The root itself has no entry.
    parents: HashMap<String, String>,
    names: HashMap<String, String>,
    /// Valid category ids in document order.
    order: Vec<String>,
}

impl Taxonomy {
    /// Load the taxonomy from a category tree XML file.
    pub fn load(path: &Path, root_id: &str) -> Result<Self, TaxonomyError> {
        let content = std::fs::read_to_string(path).map_err(|source| TaxonomyError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let taxonomy = Self::from_xml_str(&content, root_id)?;

        tracing::info!(
            "Loaded taxonomy: {} categories under root {} from {:?}",
            taxonomy.len(),
            root_id,
            path
        );
        Ok(taxonomy)
    }

    /// Parse the taxonomy from an in-memory XML document.
    pub fn from_xml_str(xml: &str, root_id: &str) -> Result<Self, TaxonomyError> {
        let nodes = xml::parse_nodes(xml, root_id)?;

        let mut names = HashMap::new();
        let mut edges = Vec::with_capacity(nodes.len());
        for node in nodes {
            if let Some(name) = node.name {
                names.insert(node.id.clone(), name);
            }
            // A single-entry path is the root node itself.
            if node.path.len() >= 2 {
                let parent = node.path[node.path.len() - 2].clone();
                edges.push((node.id, parent));
            }
        }

        let mut taxonomy = Self::from_parents(root_id, edges)?;
        taxonomy.names = names;
        Ok(taxonomy)
    }

    /// Build a taxonomy from explicit `(category, parent)` pairs.
    ///
    /// Repeated pairs are accepted; the same category under two different
    /// parents, or a chain of parents that loops, is rejected.
    pub fn from_parents<I, S, P>(root_id: &str, edges: I) -> Result<Self, TaxonomyError>
    where
        I: IntoIterator<Item = (S, P)>,
        S: Into<String>,
        P: Into<String>,
    {
        let mut parents: HashMap<String, String> = HashMap::new();
        let mut order = Vec::new();

        for (id, parent) in edges {
            let id = id.into();
            let parent = parent.into();
            if id == root_id {
                continue;
            }
            match parents.get(&id) {
                Some(existing) if *existing != parent => {
                    return Err(TaxonomyError::ConflictingParent {
                        first: existing.clone(),
                        second: parent,
                        id,
                    });
                }
                Some(_) => {}
                None => {
                    order.push(id.clone());
                    parents.insert(id, parent);
                }
            }
        }

        let taxonomy = Self {
            root_id: root_id.to_string(),
            parents,
            names: HashMap::new(),
            order,
        };
        taxonomy.check_acyclic()?;
        Ok(taxonomy)
    }

    /// Every ascent must leave the map or hit the root within `len()` steps.
    fn check_acyclic(&self) -> Result<(), TaxonomyError> {
        for id in &self.order {
            let mut current = id.as_str();
            let mut steps = 0;
            while let Some(parent) = self.parent_of(current) {
                if parent == self.root_id {
                    break;
                }
                steps += 1;
                if steps > self.order.len() {
                    return Err(TaxonomyError::Cycle { id: id.clone() });
                }
                current = parent;
            }
        }
        Ok(())
    }

    /// The root sentinel id.
    pub fn root_id(&self) -> &str {
        &self.root_id
    }

    /// Whether `id` names the root sentinel.
    pub fn is_root(&self, id: &str) -> bool {
        id == self.root_id
    }

    /// Immediate parent of a valid category.
    pub fn parent_of(&self, id: &str) -> Option<&str> {
        self.parents.get(id).map(String::as_str)
    }

    /// Immediate parent, or the root when `id` is unknown.
    pub fn parent_or_root(&self, id: &str) -> &str {
        self.parent_of(id).unwrap_or(&self.root_id)
    }

    /// Whether `id` is a valid (non-root) category.
    pub fn contains(&self, id: &str) -> bool {
        self.parents.contains_key(id)
    }

    /// Display name from the source document, if it had one.
    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Proper ancestors of `id`, nearest first, stopping before the root.
    pub fn ancestors(&self, id: &str) -> Vec<&str> {
        let mut chain = Vec::new();
        let mut current = id;
        while let Some(parent) = self.parent_of(current) {
            if self.is_root(parent) {
                break;
            }
            chain.push(parent);
            current = parent;
        }
        chain
    }

    /// Valid category ids in the order they were declared.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Number of valid (non-root) categories.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the taxonomy holds no categories besides the root.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<categories>
  <category>
    <id>cat00000</id><name>Best Buy</name>
    <path><category><id>cat00000</id><name>Best Buy</name></category></path>
  </category>
  <category>
    <id>abcat0100000</id><name>TV &amp; Home Theater</name>
    <path>
      <category><id>cat00000</id><name>Best Buy</name></category>
      <category><id>abcat0100000</id><name>TV &amp; Home Theater</name></category>
    </path>
  </category>
  <category>
    <id>abcat0101000</id><name>TVs</name>
    <path>
      <category><id>cat00000</id><name>Best Buy</name></category>
      <category><id>abcat0100000</id><name>TV &amp; Home Theater</name></category>
      <category><id>abcat0101000</id><name>TVs</name></category>
    </path>
  </category>
</categories>"#;

    #[test]
    fn test_from_xml_builds_parent_map() {
        let taxonomy = Taxonomy::from_xml_str(SAMPLE, "cat00000").unwrap();
        assert_eq!(taxonomy.len(), 2);
        assert!(!taxonomy.contains("cat00000"));
        assert_eq!(taxonomy.parent_of("abcat0100000"), Some("cat00000"));
        assert_eq!(taxonomy.parent_of("abcat0101000"), Some("abcat0100000"));
        assert_eq!(taxonomy.name_of("abcat0100000"), Some("TV & Home Theater"));
        let ids: Vec<&str> = taxonomy.categories().collect();
        assert_eq!(ids, vec!["abcat0100000", "abcat0101000"]);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let taxonomy = Taxonomy::load(file.path(), "cat00000").unwrap();
        assert_eq!(taxonomy.root_id(), "cat00000");
        assert_eq!(taxonomy.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Taxonomy::load(Path::new("/nonexistent/categories.xml"), "cat00000").unwrap_err();
        assert!(matches!(err, TaxonomyError::Read { .. }));
    }

    #[test]
    fn test_load_wrong_root_fails() {
        let err = Taxonomy::from_xml_str(SAMPLE, "cat99999").unwrap_err();
        assert!(matches!(err, TaxonomyError::BadRoot { .. }));
    }

    #[test]
    fn test_parent_or_root_falls_back() {
        let taxonomy = Taxonomy::from_parents("ROOT", [("A", "B"), ("B", "ROOT")]).unwrap();
        assert_eq!(taxonomy.parent_or_root("A"), "B");
        assert_eq!(taxonomy.parent_or_root("missing"), "ROOT");
    }

    #[test]
    fn test_ancestors_stop_before_root() {
        let taxonomy =
            Taxonomy::from_parents("ROOT", [("A", "B"), ("B", "C"), ("C", "ROOT")]).unwrap();
        assert_eq!(taxonomy.ancestors("A"), vec!["B", "C"]);
        assert!(taxonomy.ancestors("C").is_empty());
        assert!(taxonomy.ancestors("unknown").is_empty());
    }

    #[test]
    fn test_duplicate_edges_accepted() {
        let taxonomy = Taxonomy::from_parents("ROOT", [("A", "ROOT"), ("A", "ROOT")]).unwrap();
        assert_eq!(taxonomy.len(), 1);
    }

    #[test]
    fn test_conflicting_parents_rejected() {
        let err = Taxonomy::from_parents("ROOT", [("A", "B"), ("A", "C")]).unwrap_err();
        assert!(matches!(err, TaxonomyError::ConflictingParent { .. }));
    }

    #[test]
    fn test_cycle_rejected() {
        let err =
            Taxonomy::from_parents("ROOT", [("A", "B"), ("B", "C"), ("C", "A")]).unwrap_err();
        assert!(matches!(err, TaxonomyError::Cycle { .. }));
    }

    #[test]
    fn test_dangling_parent_is_not_a_cycle() {
        // "X" is never declared; ascent just stops there.
        let taxonomy = Taxonomy::from_parents("ROOT", [("A", "X")]).unwrap();
        assert_eq!(taxonomy.ancestors("A"), vec!["X"]);
        assert!(!taxonomy.contains("X"));
    }
}
