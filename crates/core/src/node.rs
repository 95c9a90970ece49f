use crate::error::CommandResult;
use crate::permission::CommandSource;
use crate::requirement::Requirement;
use crate::suggestion;
use cmdtree_dispatch::{
    ArgumentType, CommandContext, SuggestionContext, SuggestionFuture, SuggestionProvider,
};
use indexmap::IndexMap;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::Arc;
use tracing::warn;

pub type Executor<S> = Arc<dyn Fn(&CommandContext<'_, S>) -> CommandResult<i32> + Send + Sync>;

pub(crate) struct NodeData<S> {
    pub(crate) name: String,
    parent: Weak<RefCell<NodeData<S>>>,
    pub(crate) children: IndexMap<String, CommandNode<S>>,
    pub(crate) executor: Option<Executor<S>>,
    pub(crate) argument_type: Option<ArgumentType>,
    pub(crate) requirements: Vec<Requirement<S>>,
    pub(crate) suggestions: Option<SuggestionProvider<S>>,
    /// Permissions every direct child must also hold.
    pub(crate) child_permissions: Vec<String>,
    sealed: Rc<Cell<bool>>,
}

/// A handle to a node of the declarative command tree.
///
/// Handles are cheap to clone and all clones refer to the same node, so
/// unrelated registration code that asks for the same path ends up editing
/// one shared subtree. Once the owning registry has been compiled, the tree
/// is sealed and further edits are ignored.
pub struct CommandNode<S>(Rc<RefCell<NodeData<S>>>);

impl<S> Clone for CommandNode<S> {
    fn clone(&self) -> Self {
        CommandNode(self.0.clone())
    }
}

impl<S> PartialEq for CommandNode<S> {
    fn eq(&self, other: &Self) -> bool {
        CommandNode::ptr_eq(self, other)
    }
}

impl<S> Eq for CommandNode<S> {}

impl<S> fmt::Debug for CommandNode<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CommandNode").field(&self.path()).finish()
    }
}

impl<S> CommandNode<S> {
    pub(crate) fn root(name: impl Into<String>, sealed: Rc<Cell<bool>>) -> Self {
        Self::new(name.into(), Weak::new(), sealed)
    }

    fn new(name: String, parent: Weak<RefCell<NodeData<S>>>, sealed: Rc<Cell<bool>>) -> Self {
        CommandNode(Rc::new(RefCell::new(NodeData {
            name,
            parent,
            children: IndexMap::new(),
            executor: None,
            argument_type: None,
            requirements: Vec::new(),
            suggestions: None,
            child_permissions: Vec::new(),
            sealed,
        })))
    }

    /// Whether both handles refer to the same node.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    pub fn name(&self) -> String {
        self.0.borrow().name.clone()
    }

    pub fn parent(&self) -> Option<CommandNode<S>> {
        self.0.borrow().parent.upgrade().map(CommandNode)
    }

    /// Space separated names from the root down to this node.
    pub fn path(&self) -> String {
        let mut names = vec![self.name()];
        let mut current = self.parent();
        while let Some(node) = current {
            names.push(node.name());
            current = node.parent();
        }
        names.reverse();
        names.join(" ")
    }

    pub fn children(&self) -> Vec<CommandNode<S>> {
        self.0.borrow().children.values().cloned().collect()
    }

    pub fn is_executable(&self) -> bool {
        self.0.borrow().executor.is_some()
    }

    /// Whether this node compiles to a literal, i.e. it has neither an
    /// argument type nor a suggestion provider.
    pub fn is_literal(&self) -> bool {
        let data = self.0.borrow();
        data.argument_type.is_none() && data.suggestions.is_none()
    }

    pub fn is_sealed(&self) -> bool {
        self.0.borrow().sealed.get()
    }

    /// Returns the child called `name`, creating it first if needed.
    pub fn child(&self, name: impl Into<String>) -> CommandNode<S> {
        let name = name.into();
        if let Some(child) = self.0.borrow().children.get(&name) {
            return child.clone();
        }

        if self.is_sealed() {
            warn!(
                "Command node '{} {}' was created after registration and will not be dispatched",
                self.path(),
                name
            );
        }

        let sealed = self.0.borrow().sealed.clone();
        let child = CommandNode::new(name.clone(), Rc::downgrade(&self.0), sealed);
        self.0.borrow_mut().children.insert(name, child.clone());
        child
    }

    pub(crate) fn data(&self) -> std::cell::Ref<'_, NodeData<S>> {
        self.0.borrow()
    }

    fn update(&self, change: &str, apply: impl FnOnce(&mut NodeData<S>)) -> Self {
        if self.is_sealed() {
            warn!(
                "Ignoring {} on command '{}' after registration",
                change,
                self.path()
            );
        } else {
            apply(&mut self.0.borrow_mut());
        }
        self.clone()
    }
}

impl<S: CommandSource> CommandNode<S> {
    /// Adds a reachability predicate. Predicates accumulate and all of them
    /// must hold.
    pub fn requires(&self, predicate: impl Fn(&S) -> bool + Send + Sync + 'static) -> Self {
        self.update("requirement", |data| {
            data.requirements
                .push(Requirement::Predicate(Arc::new(predicate)))
        })
    }

    /// Requires the invoking principal to hold `permission`.
    pub fn requires_permission(&self, permission: impl Into<String>) -> Self {
        let permission = permission.into();
        self.update("permission requirement", |data| {
            data.requirements.push(Requirement::Permission(permission))
        })
    }

    pub fn executes(
        &self,
        executor: impl Fn(&CommandContext<'_, S>) -> CommandResult<i32> + Send + Sync + 'static,
    ) -> Self {
        self.update("executor", |data| data.executor = Some(Arc::new(executor)))
    }

    /// Turns this node into a typed argument instead of a literal.
    pub fn with_type(&self, argument_type: ArgumentType) -> Self {
        self.update("argument type", |data| {
            data.argument_type = Some(argument_type)
        })
    }

    /// Sets the suggestion provider. A node with suggestions but no explicit
    /// type becomes a string argument.
    pub fn suggests(
        &self,
        provider: impl Fn(&SuggestionContext<'_, S>) -> SuggestionFuture + Send + Sync + 'static,
    ) -> Self {
        self.update("suggestions", |data| {
            data.suggestions = Some(Arc::new(provider))
        })
    }

    /// Offers exactly `suggestions`, whatever has been typed so far.
    pub fn suggests_fixed(&self, suggestions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let provider = suggestion::fixed(suggestions);
        self.update("suggestions", |data| data.suggestions = Some(provider))
    }

    pub(crate) fn inherit_permission(&self, permission: String) -> Self {
        self.update("inherited permission", |data| {
            data.child_permissions.push(permission)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Source;

    impl CommandSource for Source {
        type Principal = ();

        fn principal(&self) -> Option<()> {
            None
        }
    }

    fn root(name: &str) -> CommandNode<Source> {
        CommandNode::root(name, Rc::new(Cell::new(false)))
    }

    #[test]
    fn child_is_idempotent() {
        let root = root("plot");
        let first = root.child("add");
        let second = root.child("add");
        assert!(CommandNode::ptr_eq(&first, &second));
        assert_eq!(root.children().len(), 1);
    }

    #[test]
    fn child_knows_its_parent() {
        let root = root("plot");
        let leaf = root.child("add").child("name");
        assert_eq!(leaf.parent().unwrap().name(), "add");
        assert_eq!(leaf.path(), "plot add name");
        assert!(root.parent().is_none());
    }

    #[test]
    fn suggestions_make_a_node_an_argument() {
        let root = root("say");
        let message = root.child("message");
        assert!(message.is_literal());
        message.suggests_fixed(["hi"]);
        assert!(!message.is_literal());
    }

    #[test]
    fn sealed_nodes_ignore_changes() {
        let sealed = Rc::new(Cell::new(false));
        let root: CommandNode<Source> = CommandNode::root("plot", sealed.clone());
        sealed.set(true);
        root.executes(|_| Ok(1));
        assert!(!root.is_executable());
    }

    #[test]
    fn any_name_can_be_declared() {
        let root = root("tell");
        let target = root.child("target player").with_type(ArgumentType::string());
        assert_eq!(target.name(), "target player");
        assert_eq!(root.child("").path(), "tell ");
    }
}
