use crate::error::{CommandError, InternalError, RegistrationError};
use crate::node::{CommandNode, Executor};
use crate::permission::{CommandSource, PermissionProvider};
use crate::requirement::{self, permission_predicate};
use cmdtree_dispatch::{ArgumentType, CommandBuilder, CommandContext};
use itertools::Itertools;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{error, trace, warn};

/// What an executor yields to the dispatcher when it fails.
pub const FAILURE_RESULT: i32 = 0;

/// Everything the compiler needs from the host environment.
pub struct CompileContext<S: CommandSource> {
    permissions: Arc<dyn PermissionProvider<S::Principal>>,
}

impl<S: CommandSource> CompileContext<S> {
    pub fn new(permissions: impl PermissionProvider<S::Principal> + 'static) -> Self {
        Self {
            permissions: Arc::new(permissions),
        }
    }

    pub fn with_shared(permissions: Arc<dyn PermissionProvider<S::Principal>>) -> Self {
        Self { permissions }
    }
}

impl<S: CommandSource> CommandNode<S> {
    /// Builds the dispatcher-side tree for this node and everything below it.
    pub fn compile(&self, context: &CompileContext<S>) -> CommandBuilder<S> {
        self.compile_with(context, &[])
    }

    /// Checks that every name below this node can be dispatched. Literals
    /// are matched against single whitespace delimited tokens, arguments only
    /// need a name to be looked up by.
    pub fn validate(&self) -> Result<(), RegistrationError> {
        let data = self.data();
        if data.name.is_empty() {
            return Err(RegistrationError::EmptyName { path: self.path() });
        }
        if self.is_literal() && data.name.contains(char::is_whitespace) {
            return Err(RegistrationError::InvalidLiteral {
                path: self.path(),
                name: data.name.clone(),
            });
        }
        data.children.values().try_for_each(CommandNode::validate)
    }

    fn compile_with(&self, context: &CompileContext<S>, inherited: &[String]) -> CommandBuilder<S> {
        let path = self.path();
        let data = self.data();

        let mut builder = match (&data.argument_type, &data.suggestions) {
            (None, None) => CommandBuilder::literal(data.name.clone()),
            (argument_type, suggestions) => {
                let argument_type = argument_type.clone().unwrap_or_else(ArgumentType::string);
                let builder = CommandBuilder::argument(data.name.clone(), argument_type);
                match suggestions.clone() {
                    Some(provider) => builder.suggests(move |ctx| provider(ctx)),
                    None => builder,
                }
            }
        };

        let predicates = data
            .requirements
            .iter()
            .map(|requirement| requirement.resolve(&context.permissions))
            .chain(inherited.iter().map(|permission| {
                permission_predicate(permission.clone(), context.permissions.clone())
            }))
            .collect_vec();
        if let Some(gate) = requirement::all_of(predicates) {
            builder = builder.requires(move |source: &S| gate(source));
        }

        if let Some(executor) = data.executor.clone() {
            let path = path.clone();
            builder = builder.executes(move |ctx| run_guarded(&path, &executor, ctx));
        }

        for child in data.children.values() {
            builder = builder.then(child.compile_with(context, &data.child_permissions));
        }

        trace!("Compiled command node '{}'", path);
        builder
    }
}

/// Runs `executor`, turning an error or a panic into a log entry and
/// [`FAILURE_RESULT`] so the dispatcher never sees it.
fn run_guarded<S>(path: &str, executor: &Executor<S>, ctx: &CommandContext<'_, S>) -> i32 {
    let err = match panic::catch_unwind(AssertUnwindSafe(|| executor(ctx))) {
        Ok(Ok(result)) => return result,
        Ok(Err(err)) => err,
        Err(payload) => CommandError::Internal(InternalError::Panic {
            message: panic_message(payload.as_ref()),
        }),
    };

    match &err {
        CommandError::Runtime(_) => warn!("Command '/{}' failed: {}", path, err),
        CommandError::Internal(_) => error!("Command '/{}' failed: {}", path, err),
    }
    FAILURE_RESULT
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
