use crate::{
    argument_parser,
    builder::{CommandBuilder, NodeKind},
    value::Value,
};

pub enum ParseResult<'a, S> {
    Success {
        node: &'a CommandBuilder<S>,
        arguments: Vec<(String, Value)>,
        path: Vec<&'a CommandBuilder<S>>,
    },
    Partial {
        node: &'a CommandBuilder<S>,
        arguments: Vec<(String, Value)>,
        path: Vec<&'a CommandBuilder<S>>,
    },
    TooManyArguments {
        node: &'a CommandBuilder<S>,
        arguments: Vec<(String, Value)>,
        path: Vec<&'a CommandBuilder<S>>,
        remaining: String,
    },
    InvalidArgument {
        node: &'a CommandBuilder<S>,
        arguments: Vec<(String, Value)>,
        path: Vec<&'a CommandBuilder<S>>,
        remaining: String,
    },
    NothingMatched,
}

impl<'a, S> ParseResult<'a, S> {
    pub fn path(&self) -> &[&'a CommandBuilder<S>] {
        match self {
            ParseResult::Success { path, .. }
            | ParseResult::Partial { path, .. }
            | ParseResult::TooManyArguments { path, .. }
            | ParseResult::InvalidArgument { path, .. } => path,
            ParseResult::NothingMatched => &[],
        }
    }
}

/// Walks `input` down from `roots`, entering only children `source` may use.
pub(crate) fn parse<'a, S>(
    roots: &'a [CommandBuilder<S>],
    source: &S,
    input: &str,
) -> ParseResult<'a, S> {
    let mut remaining_input = input;
    let mut path: Vec<&'a CommandBuilder<S>> = Vec::new();
    let mut arguments: Vec<(String, Value)> = Vec::new();

    while parse_next(roots, source, &mut path, &mut arguments, &mut remaining_input) {}

    let Some(&final_node) = path.last() else {
        return ParseResult::NothingMatched;
    };

    let remainder = remaining_input.trim_start();

    if !remainder.is_empty() {
        if final_node.has_executor() && final_node.children.is_empty() {
            ParseResult::TooManyArguments {
                node: final_node,
                arguments,
                path,
                remaining: remainder.to_string(),
            }
        } else {
            ParseResult::InvalidArgument {
                node: final_node,
                arguments,
                path,
                remaining: remainder.to_string(),
            }
        }
    } else if final_node.has_executor() {
        ParseResult::Success {
            node: final_node,
            arguments,
            path,
        }
    } else {
        ParseResult::Partial {
            node: final_node,
            arguments,
            path,
        }
    }
}

fn parse_next<'a, S>(
    roots: &'a [CommandBuilder<S>],
    source: &S,
    path: &mut Vec<&'a CommandBuilder<S>>,
    arguments: &mut Vec<(String, Value)>,
    remaining_input: &mut &str,
) -> bool {
    let candidates: &'a [CommandBuilder<S>] = match path.last().copied() {
        Some(node) => &node.children,
        None => roots,
    };

    // Literals win over arguments that would also accept the same token
    let literals = candidates.iter().filter(|child| child.is_literal());
    let arguments_nodes = candidates.iter().filter(|child| !child.is_literal());

    for child in literals.chain(arguments_nodes) {
        if !child.can_use(source) {
            continue;
        }

        match &child.kind {
            NodeKind::Literal { name } => {
                let Some((token, rest)) = argument_parser::consume_token(remaining_input) else {
                    continue;
                };

                if token == name {
                    path.push(child);
                    *remaining_input = rest;
                    return true;
                }
            }

            NodeKind::Argument { name, arg_type, .. } => {
                if let Ok((value, rest)) = arg_type.parse(remaining_input) {
                    path.push(child);
                    arguments.push((name.clone(), value));
                    *remaining_input = rest;
                    return true;
                }
            }
        }
    }

    false
}

/// Drops trailing greedy arguments that matched nothing, so completion works
/// from the node the user is actually typing after.
pub(crate) fn backtrack_overgreedy_matches<'a, S>(
    mut path: Vec<&'a CommandBuilder<S>>,
    arguments: &[(String, Value)],
) -> Vec<&'a CommandBuilder<S>> {
    while let Some(last_node) = path.last() {
        if let NodeKind::Argument { name, arg_type, .. } = &last_node.kind {
            if arg_type.is_greedy() {
                let is_empty = arguments
                    .iter()
                    .find(|(arg_name, _)| arg_name == name)
                    .is_some_and(|(_, value)| value.is_empty_greedy());

                if is_empty {
                    path.pop();
                    continue;
                }
            }
        }

        break;
    }

    path
}
