//! Diagram descriptors attached to sections.
//!
//! A diagram is a tagged union keyed by its `kind` field. Corpus files may
//! name kinds this build does not know; those deserialize to
//! [`Diagram::Unknown`] and render as an explicit error state.

use serde::{Deserialize, Serialize};

/// Visualisation attached to a section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Diagram {
    /// Mermaid source text, rendered client-side.
    Mermaid { source: String },
    LinkedList {
        nodes: Vec<String>,
        #[serde(default)]
        doubly: bool,
    },
    Tree { root: TreeNode },
    Array {
        values: Vec<String>,
        /// Indices to emphasise.
        #[serde(default)]
        highlight: Vec<usize>,
    },
    HashMap { entries: Vec<KeyValue> },
    StackQueue {
        mode: ContainerMode,
        items: Vec<String>,
    },
    MemoryLayout { cells: Vec<MemoryCell> },
    Graph {
        nodes: Vec<String>,
        edges: Vec<Edge>,
        #[serde(default)]
        directed: bool,
    },
    Heap {
        order: HeapOrder,
        values: Vec<i64>,
    },
    AlgorithmSteps { steps: Vec<StepFrame> },
    /// A `kind` tag this build does not recognise.
    #[serde(other)]
    Unknown,
}

impl Diagram {
    /// The `kind` tag as written in corpus files.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Mermaid { .. } => "mermaid",
            Self::LinkedList { .. } => "linked-list",
            Self::Tree { .. } => "tree",
            Self::Array { .. } => "array",
            Self::HashMap { .. } => "hash-map",
            Self::StackQueue { .. } => "stack-queue",
            Self::MemoryLayout { .. } => "memory-layout",
            Self::Graph { .. } => "graph",
            Self::Heap { .. } => "heap",
            Self::AlgorithmSteps { .. } => "algorithm-steps",
            Self::Unknown => "unknown",
        }
    }
}

/// Error returned when a diagram cannot be rendered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiagramError {
    /// The diagram's `kind` tag is not supported.
    #[error("unsupported diagram kind")]
    UnknownKind,
    /// The descriptor is structurally invalid (e.g. an edge to a missing node).
    #[error("invalid {kind} diagram: {message}")]
    Invalid { kind: &'static str, message: String },
}

/// Node of a tree diagram.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub value: String,
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

/// Key/value pair of a hash map diagram.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

/// Whether a stack/queue diagram is LIFO or FIFO.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerMode {
    Stack,
    Queue,
}

/// One cell of a memory layout diagram.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryCell {
    pub label: String,
    #[serde(default)]
    pub address: Option<String>,
    pub value: String,
}

/// Edge of a graph diagram, referencing node names.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub weight: Option<f64>,
}

/// Heap ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeapOrder {
    Min,
    Max,
}

/// One frame of an algorithm walkthrough.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepFrame {
    pub description: String,
    #[serde(default)]
    pub state: Vec<String>,
    #[serde(default)]
    pub highlight: Vec<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_deserialize_tagged_variant() {
        let yaml = "kind: linked-list\nnodes: [a, b, c]\n";
        let diagram: Diagram = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            diagram,
            Diagram::LinkedList {
                nodes: vec!["a".to_owned(), "b".to_owned(), "c".to_owned()],
                doubly: false,
            }
        );
        assert_eq!(diagram.kind(), "linked-list");
    }

    #[test]
    fn test_deserialize_nested_tree() {
        let json = r#"{"kind":"tree","root":{"value":"1","children":[{"value":"2"}]}}"#;
        let diagram: Diagram = serde_json::from_str(json).unwrap();
        let Diagram::Tree { root } = diagram else {
            panic!("expected tree");
        };
        assert_eq!(root.children.len(), 1);
        assert!(root.children[0].children.is_empty());
    }

    #[test]
    fn test_unknown_kind_is_explicit_variant() {
        let yaml = "kind: hologram\n";
        let diagram: Diagram = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(diagram, Diagram::Unknown);
        assert_eq!(diagram.kind(), "unknown");
    }

    #[test]
    fn test_heap_order_lowercase() {
        let yaml = "kind: heap\norder: max\nvalues: [9, 4, 7]\n";
        let diagram: Diagram = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            diagram,
            Diagram::Heap {
                order: HeapOrder::Max,
                values: vec![9, 4, 7],
            }
        );
    }
}
