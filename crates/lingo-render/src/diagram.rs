//! Diagram rendering.
//!
//! Every [`Diagram`] kind maps to a static HTML structure styled by the host.
//! Mermaid sources are emitted for client-side rendering. Unknown kinds and
//! malformed descriptors produce a [`DiagramError`], which the entry
//! renderer turns into a visible error box.

use std::fmt::Write;

use lingo_content::{
    ContainerMode, Diagram, DiagramError, Edge, HeapOrder, KeyValue, MemoryCell, StepFrame,
    TreeNode,
};
use lingo_highlight::escape_html;

/// Render a diagram to HTML.
pub fn render_diagram(diagram: &Diagram) -> Result<String, DiagramError> {
    let mut out = String::new();
    match diagram {
        Diagram::Mermaid { source } => {
            write!(out, r#"<pre class="mermaid">{}</pre>"#, escape_html(source)).unwrap();
        }
        Diagram::LinkedList { nodes, doubly } => linked_list(nodes, *doubly, &mut out),
        Diagram::Tree { root } => {
            out.push_str(r#"<div class="diagram diagram-tree">"#);
            tree(root, &mut out);
            out.push_str("</div>");
        }
        Diagram::Array { values, highlight } => {
            out.push_str(r#"<div class="diagram diagram-array">"#);
            cells(values, highlight, &mut out);
            out.push_str("</div>");
        }
        Diagram::HashMap { entries } => hash_map(entries, &mut out),
        Diagram::StackQueue { mode, items } => stack_queue(*mode, items, &mut out),
        Diagram::MemoryLayout { cells } => memory_layout(cells, &mut out),
        Diagram::Graph {
            nodes,
            edges,
            directed,
        } => graph(nodes, edges, *directed, &mut out)?,
        Diagram::Heap { order, values } => heap(*order, values, &mut out)?,
        Diagram::AlgorithmSteps { steps } => algorithm_steps(steps, &mut out)?,
        Diagram::Unknown => return Err(DiagramError::UnknownKind),
    }
    Ok(out)
}

/// Render a diagram, replacing failures with an error box.
pub(crate) fn render_diagram_or_error(diagram: &Diagram) -> String {
    render_diagram(diagram).unwrap_or_else(|e| {
        tracing::warn!(kind = diagram.kind(), "diagram not rendered: {e}");
        format!(
            r#"<div class="diagram diagram-error" role="alert">{}</div>"#,
            escape_html(&e.to_string())
        )
    })
}

fn linked_list(nodes: &[String], doubly: bool, out: &mut String) {
    let link = if doubly { "&#8646;" } else { "&#8594;" };
    out.push_str(r#"<div class="diagram diagram-linked-list">"#);
    for node in nodes {
        write!(
            out,
            r#"<span class="node">{}</span><span class="link">{link}</span>"#,
            escape_html(node)
        )
        .unwrap();
    }
    out.push_str(r#"<span class="node null">null</span></div>"#);
}

fn tree(node: &TreeNode, out: &mut String) {
    write!(
        out,
        r#"<ul><li><span class="node">{}</span>"#,
        escape_html(&node.value)
    )
    .unwrap();
    for child in &node.children {
        tree(child, out);
    }
    out.push_str("</li></ul>");
}

fn cells(values: &[String], highlight: &[usize], out: &mut String) {
    for (i, value) in values.iter().enumerate() {
        let class = if highlight.contains(&i) {
            "cell highlighted"
        } else {
            "cell"
        };
        write!(
            out,
            r#"<div class="{class}"><span class="index">{i}</span><span class="value">{}</span></div>"#,
            escape_html(value)
        )
        .unwrap();
    }
}

fn hash_map(entries: &[KeyValue], out: &mut String) {
    out.push_str(r#"<table class="diagram diagram-hash-map"><tbody>"#);
    for entry in entries {
        write!(
            out,
            r#"<tr><td class="key">{}</td><td class="value">{}</td></tr>"#,
            escape_html(&entry.key),
            escape_html(&entry.value)
        )
        .unwrap();
    }
    out.push_str("</tbody></table>");
}

fn stack_queue(mode: ContainerMode, items: &[String], out: &mut String) {
    let (class, end_label) = match mode {
        ContainerMode::Stack => ("stack", "top"),
        ContainerMode::Queue => ("queue", "front"),
    };
    write!(
        out,
        r#"<div class="diagram diagram-{class}" data-end="{end_label}">"#
    )
    .unwrap();
    for item in items {
        write!(out, r#"<div class="item">{}</div>"#, escape_html(item)).unwrap();
    }
    out.push_str("</div>");
}

fn memory_layout(memory: &[MemoryCell], out: &mut String) {
    out.push_str(r#"<table class="diagram diagram-memory-layout"><tbody>"#);
    for cell in memory {
        write!(
            out,
            r#"<tr><td class="label">{}</td><td class="address">{}</td><td class="value">{}</td></tr>"#,
            escape_html(&cell.label),
            escape_html(cell.address.as_deref().unwrap_or("")),
            escape_html(&cell.value)
        )
        .unwrap();
    }
    out.push_str("</tbody></table>");
}

fn graph(
    nodes: &[String],
    edges: &[Edge],
    directed: bool,
    out: &mut String,
) -> Result<(), DiagramError> {
    for edge in edges {
        for end in [&edge.from, &edge.to] {
            if !nodes.contains(end) {
                return Err(DiagramError::Invalid {
                    kind: "graph",
                    message: format!("edge references unknown node {end}"),
                });
            }
        }
    }

    let arrow = if directed { "&#8594;" } else { "&#8212;" };
    out.push_str(r#"<div class="diagram diagram-graph"><ul class="nodes">"#);
    for node in nodes {
        write!(out, r#"<li class="node">{}</li>"#, escape_html(node)).unwrap();
    }
    out.push_str(r#"</ul><ul class="edges">"#);
    for edge in edges {
        write!(
            out,
            r#"<li class="edge">{} {arrow} {}"#,
            escape_html(&edge.from),
            escape_html(&edge.to)
        )
        .unwrap();
        if let Some(weight) = edge.weight {
            write!(out, r#" <span class="weight">{weight}</span>"#).unwrap();
        }
        out.push_str("</li>");
    }
    out.push_str("</ul></div>");
    Ok(())
}

fn heap(order: HeapOrder, values: &[i64], out: &mut String) -> Result<(), DiagramError> {
    for child in 1..values.len() {
        let parent = (child - 1) / 2;
        let holds = match order {
            HeapOrder::Min => values[parent] <= values[child],
            HeapOrder::Max => values[parent] >= values[child],
        };
        if !holds {
            return Err(DiagramError::Invalid {
                kind: "heap",
                message: format!(
                    "value {} at index {child} breaks the heap order under {}",
                    values[child], values[parent]
                ),
            });
        }
    }

    let class = match order {
        HeapOrder::Min => "min",
        HeapOrder::Max => "max",
    };
    write!(out, r#"<div class="diagram diagram-heap heap-{class}">"#).unwrap();
    if let Some(root) = heap_node(values, 0) {
        tree(&root, out);
    }
    out.push_str(r#"<div class="heap-array">"#);
    let labels: Vec<String> = values.iter().map(ToString::to_string).collect();
    cells(&labels, &[], out);
    out.push_str("</div></div>");
    Ok(())
}

/// Build the implicit binary tree of a heap array.
fn heap_node(values: &[i64], index: usize) -> Option<TreeNode> {
    let value = values.get(index)?;
    let children = [2 * index + 1, 2 * index + 2]
        .into_iter()
        .filter_map(|child| heap_node(values, child))
        .collect();
    Some(TreeNode {
        value: value.to_string(),
        children,
    })
}

fn algorithm_steps(steps: &[StepFrame], out: &mut String) -> Result<(), DiagramError> {
    if steps.is_empty() {
        return Err(DiagramError::Invalid {
            kind: "algorithm-steps",
            message: "no steps".to_owned(),
        });
    }

    out.push_str(r#"<ol class="diagram diagram-algorithm-steps">"#);
    for step in steps {
        write!(
            out,
            r#"<li class="step"><p class="description">{}</p>"#,
            escape_html(&step.description)
        )
        .unwrap();
        if !step.state.is_empty() {
            out.push_str(r#"<div class="state">"#);
            cells(&step.state, &step.highlight, out);
            out.push_str("</div>");
        }
        out.push_str("</li>");
    }
    out.push_str("</ol>");
    Ok(())
}
