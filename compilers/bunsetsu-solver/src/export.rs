use std::fmt::Write;

use petgraph::dot::Dot;
use petgraph::graph::DiGraph;
use bunsetsu_protocol::Analysis;

/// Escapes the XML reserved characters.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// GraphML document: one node per bunsetsu (labelled with its surface),
/// one directed edge per dependency (labelled with the particle).
pub fn to_graphml(analysis: &Analysis) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<graphml xmlns=\"http://graphml.graphdrawing.org/xmlns\">\n");
    out.push_str("  <key id=\"label\" for=\"node\" attr.name=\"label\" attr.type=\"string\"/>\n");
    out.push_str("  <key id=\"relation\" for=\"edge\" attr.name=\"label\" attr.type=\"string\"/>\n");
    out.push_str("  <graph id=\"dependencies\" edgedefault=\"directed\">\n");

    // Writing into a String cannot fail.
    for b in &analysis.bunsetsu {
        let _ = writeln!(
            out,
            "    <node id=\"b{}\"><data key=\"label\">{}</data></node>",
            b.id,
            escape_xml(&b.surface)
        );
    }
    for (i, dep) in analysis.dependencies.iter().enumerate() {
        let _ = writeln!(
            out,
            "    <edge id=\"e{}\" source=\"b{}\" target=\"b{}\"><data key=\"relation\">{}</data></edge>",
            i,
            dep.from,
            dep.to,
            escape_xml(&dep.label)
        );
    }

    out.push_str("  </graph>\n");
    out.push_str("</graphml>\n");
    out
}

/// Graphviz DOT rendering, nodes labelled by surface and edges by particle.
pub fn to_dot(analysis: &Analysis) -> String {
    let mut graph: DiGraph<&str, &str> = DiGraph::new();
    let nodes: Vec<_> = analysis
        .bunsetsu
        .iter()
        .map(|b| graph.add_node(b.surface.as_str()))
        .collect();

    for dep in &analysis.dependencies {
        if let (Some(&from), Some(&to)) = (nodes.get(dep.from.index()), nodes.get(dep.to.index())) {
            graph.add_edge(from, to, dep.label.as_str());
        }
    }

    format!("{}", Dot::new(&graph))
}
