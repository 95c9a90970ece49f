use crate::builder::{CommandBuilder, NodeKind};
use itertools::Itertools;

/// Renders `/a b <c> ...` for a matched path, followed by what may come next.
pub fn generate_usage<S>(path: &[&CommandBuilder<S>], source: &S) -> String {
    let mut parts = path.iter().map(|node| get_display_name(*node)).collect_vec();

    if let Some(current_node) = path.last() {
        let suffix = build_usage_suffix(*current_node, source);
        if !suffix.is_empty() {
            parts.push(suffix);
        }
    }

    format!("/{}", parts.join(" "))
}

fn build_usage_suffix<S>(node: &CommandBuilder<S>, source: &S) -> String {
    let children = node
        .children()
        .iter()
        .filter(|child| child.can_use(source))
        .collect_vec();

    if children.is_empty() {
        return String::new();
    }

    let make_optional = node.has_executor();

    let alternatives = if children.len() == 1 {
        let child = children[0];
        let child_suffix = build_usage_suffix(child, source);
        let child_name = get_display_name(child);
        if child_suffix.is_empty() {
            child_name
        } else {
            format!("{} {}", child_name, child_suffix)
        }
    } else {
        children
            .iter()
            .map(|child| get_display_name(*child))
            .join(" | ")
    };

    if make_optional {
        format!("[{}]", alternatives)
    } else if children.len() > 1 {
        format!("({})", alternatives)
    } else {
        alternatives
    }
}

fn get_display_name<S>(node: &CommandBuilder<S>) -> String {
    match &node.kind {
        NodeKind::Literal { name } => name.clone(),
        NodeKind::Argument { name, .. } => format!("<{}>", name),
    }
}

/// The literal prefix of a path, e.g. `/plot add` for `/plot add <name>`.
pub fn generate_base_name<S>(path: &[&CommandBuilder<S>]) -> String {
    let mut parts = Vec::new();

    for node in path {
        match &node.kind {
            NodeKind::Literal { name } => parts.push(name),
            NodeKind::Argument { .. } => break,
        }
    }

    format!("/{}", parts.into_iter().join(" "))
}
