use crate::compile::CompileContext;
use crate::error::RegistrationError;
use crate::node::CommandNode;
use crate::permission::CommandSource;
use cmdtree_dispatch::{CommandDispatcher, RegistrationEnvironment};
use indexmap::IndexMap;
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, error, info};

#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Name of the administrative root command.
    pub admin_root: String,
    /// Permission guarding the administrative root and its direct children.
    pub admin_permission: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            admin_root: "cmdtree".to_string(),
            admin_permission: "cmdtree.admin".to_string(),
        }
    }
}

/// The outcome of [`CommandRegistry::register_all`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RegistrationReport {
    pub registered: Vec<String>,
    pub skipped: Vec<String>,
}

/// Collects top-level commands from any number of registrants until they are
/// compiled and handed to a dispatcher in one go.
pub struct CommandRegistry<S> {
    config: RegistryConfig,
    roots: IndexMap<String, CommandNode<S>>,
    admin_root: Option<CommandNode<S>>,
    sealed: Rc<Cell<bool>>,
}

impl<S: CommandSource> CommandRegistry<S> {
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            config,
            roots: IndexMap::new(),
            admin_root: None,
            sealed: Rc::new(Cell::new(false)),
        }
    }

    /// Returns the root called `name`, creating it first if needed.
    pub fn root(&mut self, name: impl Into<String>) -> CommandNode<S> {
        let name = name.into();
        let sealed = &self.sealed;
        self.roots
            .entry(name)
            .or_insert_with_key(|name| CommandNode::root(name.clone(), sealed.clone()))
            .clone()
    }

    /// The root every administrative command hangs off. It and its direct
    /// children require the configured admin permission.
    pub fn admin_root(&mut self) -> CommandNode<S> {
        if let Some(root) = &self.admin_root {
            return root.clone();
        }

        let root = self.permission_root(
            self.config.admin_root.clone(),
            self.config.admin_permission.clone(),
        );
        self.admin_root = Some(root.clone());
        root
    }

    /// Returns the root called `name` gated by `permission`. Direct children
    /// of the root require the same permission, whenever they were created.
    pub fn permission_root(
        &mut self,
        name: impl Into<String>,
        permission: impl Into<String>,
    ) -> CommandNode<S> {
        let permission = permission.into();
        let root = self.root(name);
        root.requires_permission(permission.clone());
        root.inherit_permission(permission);
        root
    }

    pub fn roots(&self) -> impl Iterator<Item = &CommandNode<S>> {
        self.roots.values()
    }

    pub fn get(&self, name: &str) -> Option<&CommandNode<S>> {
        self.roots.get(name)
    }

    /// Compiles every root and registers it with `dispatcher`. A root with an
    /// untypeable literal, or one the dispatcher refuses, is logged and
    /// skipped. The tree is sealed afterwards.
    pub fn register_all(
        self,
        dispatcher: &mut CommandDispatcher<S>,
        environment: RegistrationEnvironment,
        context: &CompileContext<S>,
    ) -> RegistrationReport {
        let mut report = RegistrationReport::default();

        for (name, root) in &self.roots {
            match Self::register_root(root, dispatcher, environment, context) {
                Ok(()) => {
                    debug!("Registered /{}", name);
                    report.registered.push(name.clone());
                }
                Err(err) => {
                    error!("Skipping registration of /{}: {}", name, err);
                    report.skipped.push(name.clone());
                }
            }
        }

        self.sealed.set(true);
        info!(
            "Registered {} commands ({} skipped)",
            report.registered.len(),
            report.skipped.len()
        );
        report
    }

    fn register_root(
        root: &CommandNode<S>,
        dispatcher: &mut CommandDispatcher<S>,
        environment: RegistrationEnvironment,
        context: &CompileContext<S>,
    ) -> Result<(), RegistrationError> {
        root.validate()?;
        dispatcher.register(root.compile(context), environment)?;
        Ok(())
    }
}
