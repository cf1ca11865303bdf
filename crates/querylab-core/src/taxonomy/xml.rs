//! Category tree XML parsing.
//!
//! The product catalog exports one `<category>` element per node, each carrying
//! its own id and the full root-to-node `<path>`:
//!
//! ```xml
//! <categories>
//!   <category>
//!     <id>abcat0010000</id>
//!     <name>Gift Center</name>
//!     <path>
//!       <category><id>cat00000</id><name>Best Buy</name></category>
//!       <category><id>abcat0010000</id><name>Gift Center</name></category>
//!     </path>
//!     <subCategories>...</subCategories>
//!   </category>
//! </categories>
//! ```
//!
//! Only `id`, `name` and `path` are read; everything else is ignored.

use serde::Deserialize;

use crate::error::TaxonomyError;

#[derive(Debug, Deserialize)]
struct CategoriesDoc {
    #[serde(rename = "category", default)]
    categories: Vec<CategoryNode>,
}

#[derive(Debug, Deserialize)]
struct CategoryNode {
    id: Option<String>,
    name: Option<String>,
    path: Option<PathNode>,
}

#[derive(Debug, Deserialize)]
struct PathNode {
    #[serde(rename = "category", default)]
    entries: Vec<PathEntry>,
}

#[derive(Debug, Deserialize)]
struct PathEntry {
    id: Option<String>,
}

/// One validated node: its id, display name and ancestor path (root first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct ParsedNode {
    pub id: String,
    pub name: Option<String>,
    pub path: Vec<String>,
}

/// Parse the XML document and check every node's shape against `root_id`.
pub(super) fn parse_nodes(xml: &str, root_id: &str) -> Result<Vec<ParsedNode>, TaxonomyError> {
    let doc: CategoriesDoc = quick_xml::de::from_str(xml)?;

    doc.categories
        .into_iter()
        .enumerate()
        .map(|(index, node)| validate_node(index, node, root_id))
        .collect()
}

fn validate_node(
    index: usize,
    node: CategoryNode,
    root_id: &str,
) -> Result<ParsedNode, TaxonomyError> {
    let id = non_blank(node.id).ok_or(TaxonomyError::MissingField { index, field: "id" })?;

    let entries = node.path.map(|p| p.entries).unwrap_or_default();
    if entries.is_empty() {
        return Err(TaxonomyError::MissingField {
            index,
            field: "path",
        });
    }
    let path = entries
        .into_iter()
        .map(|entry| {
            non_blank(entry.id).ok_or(TaxonomyError::MissingField {
                index,
                field: "path entry id",
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if path[0] != root_id {
        return Err(TaxonomyError::BadRoot {
            id,
            found: path[0].clone(),
            root: root_id.to_string(),
        });
    }
    let leaf = &path[path.len() - 1];
    if *leaf != id {
        return Err(TaxonomyError::PathMismatch {
            leaf: leaf.clone(),
            id,
        });
    }

    Ok(ParsedNode {
        id,
        name: non_blank(node.name),
        path,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
