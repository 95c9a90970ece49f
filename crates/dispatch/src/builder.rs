use crate::argument::ArgumentType;
use crate::context::{CommandContext, SuggestionContext};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub type Predicate<S> = Arc<dyn Fn(&S) -> bool + Send + Sync>;
pub type Command<S> = Arc<dyn Fn(&CommandContext<'_, S>) -> i32 + Send + Sync>;
pub type SuggestionFuture = Pin<Box<dyn Future<Output = Vec<String>> + Send>>;
pub type SuggestionProvider<S> =
    Arc<dyn Fn(&SuggestionContext<'_, S>) -> SuggestionFuture + Send + Sync>;

pub enum NodeKind<S> {
    Literal {
        name: String,
    },
    Argument {
        name: String,
        arg_type: ArgumentType,
        suggestions: Option<SuggestionProvider<S>>,
    },
}

/// A node of the dispatch tree, built up before registration.
pub struct CommandBuilder<S> {
    pub(crate) kind: NodeKind<S>,
    pub(crate) requirement: Option<Predicate<S>>,
    pub(crate) command: Option<Command<S>>,
    pub(crate) children: Vec<CommandBuilder<S>>,
}

impl<S> CommandBuilder<S> {
    pub fn literal(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Literal { name: name.into() })
    }

    pub fn argument(name: impl Into<String>, arg_type: impl Into<ArgumentType>) -> Self {
        Self::new(NodeKind::Argument {
            name: name.into(),
            arg_type: arg_type.into(),
            suggestions: None,
        })
    }

    fn new(kind: NodeKind<S>) -> Self {
        Self {
            kind,
            requirement: None,
            command: None,
            children: Vec::new(),
        }
    }

    pub fn then(mut self, child: CommandBuilder<S>) -> Self {
        self.children.push(child);
        self
    }

    pub fn executes(
        mut self,
        command: impl Fn(&CommandContext<'_, S>) -> i32 + Send + Sync + 'static,
    ) -> Self {
        self.command = Some(Arc::new(command));
        self
    }

    pub fn requires(mut self, requirement: impl Fn(&S) -> bool + Send + Sync + 'static) -> Self {
        self.requirement = Some(Arc::new(requirement));
        self
    }

    pub fn suggests(
        mut self,
        provider: impl Fn(&SuggestionContext<'_, S>) -> SuggestionFuture + Send + Sync + 'static,
    ) -> Self {
        let NodeKind::Argument { suggestions, .. } = &mut self.kind else {
            panic!("Can not attach suggestions to literal command nodes")
        };
        *suggestions = Some(Arc::new(provider));
        self
    }

    pub fn kind(&self) -> &NodeKind<S> {
        &self.kind
    }

    pub fn name(&self) -> &str {
        match &self.kind {
            NodeKind::Literal { name } | NodeKind::Argument { name, .. } => name,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self.kind, NodeKind::Literal { .. })
    }

    pub fn arg_type(&self) -> Option<&ArgumentType> {
        match &self.kind {
            NodeKind::Literal { .. } => None,
            NodeKind::Argument { arg_type, .. } => Some(arg_type),
        }
    }

    pub fn suggestion_provider(&self) -> Option<&SuggestionProvider<S>> {
        match &self.kind {
            NodeKind::Literal { .. } => None,
            NodeKind::Argument { suggestions, .. } => suggestions.as_ref(),
        }
    }

    pub fn requirement(&self) -> Option<&Predicate<S>> {
        self.requirement.as_ref()
    }

    pub fn command(&self) -> Option<&Command<S>> {
        self.command.as_ref()
    }

    pub fn children(&self) -> &[CommandBuilder<S>] {
        &self.children
    }

    pub fn child(&self, name: &str) -> Option<&CommandBuilder<S>> {
        self.children.iter().find(|child| child.name() == name)
    }

    pub fn has_executor(&self) -> bool {
        self.command.is_some()
    }

    /// Whether `source` passes this node's reachability gate.
    pub fn can_use(&self, source: &S) -> bool {
        self.requirement
            .as_ref()
            .is_none_or(|requirement| requirement(source))
    }

    /// Folds a node with the same name into this one. The existing gate is
    /// kept, a new command replaces the old one, and children merge by name.
    pub(crate) fn merge(&mut self, other: CommandBuilder<S>) {
        if other.command.is_some() {
            self.command = other.command;
        }
        for child in other.children {
            match self
                .children
                .iter_mut()
                .find(|existing| existing.name() == child.name())
            {
                Some(existing) => existing.merge(child),
                None => self.children.push(child),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_combines_children() {
        let mut first: CommandBuilder<()> =
            CommandBuilder::literal("a").then(CommandBuilder::literal("b"));
        let second = CommandBuilder::literal("a")
            .then(CommandBuilder::literal("b").then(CommandBuilder::literal("c")))
            .then(CommandBuilder::literal("d").executes(|_| 1));
        first.merge(second);

        assert_eq!(first.children().len(), 2);
        assert!(first.child("b").unwrap().child("c").is_some());
        assert!(first.child("d").unwrap().has_executor());
    }

    #[test]
    fn gate_defaults_open() {
        let open: CommandBuilder<i32> = CommandBuilder::literal("open");
        assert!(open.can_use(&0));

        let gated = CommandBuilder::literal("gated").requires(|n: &i32| *n > 0);
        assert!(!gated.can_use(&0));
        assert!(gated.can_use(&1));
    }

    #[test]
    #[should_panic]
    fn literal_rejects_suggestions() {
        let _: CommandBuilder<()> = CommandBuilder::literal("lit")
            .suggests(|_| Box::pin(std::future::ready(Vec::new())));
    }
}
