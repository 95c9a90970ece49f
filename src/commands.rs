//! The commands this console ships with. Each registrant only touches the
//! part of the tree it owns.

use crate::console::ConsoleSource;
use crate::permissions::PermissionsStore;
use cmdtree_core::{ArgumentType, CommandError, CommandRegistry, CommandSource, RuntimeError};
use std::sync::Arc;

pub fn register_commands(
    registry: &mut CommandRegistry<ConsoleSource>,
    permissions: &Arc<PermissionsStore>,
) {
    register_say(registry);
    register_whoami(registry);
    register_math_add(registry);
    register_math_mul(registry);
    register_admin(registry, permissions);
}

fn register_say(registry: &mut CommandRegistry<ConsoleSource>) {
    let say = registry.root("say");
    say.child("message")
        .with_type(ArgumentType::greedy_string())
        .suggests_fixed(["hello", "bye"])
        .executes(|ctx| {
            let message = ctx.args().get_greedy("message")?;
            if message.is_empty() {
                return Err(CommandError::runtime("Nothing to say"));
            }
            ctx.source().reply(format!("[{}] {}", ctx.source().name(), message));
            Ok(1)
        });
}

fn register_whoami(registry: &mut CommandRegistry<ConsoleSource>) {
    registry.root("whoami").executes(|ctx| {
        let principal = ctx
            .source()
            .principal()
            .ok_or(RuntimeError::PrincipalRequired)?;
        ctx.source().reply(format!("You are acting as {}", principal));
        Ok(1)
    });
}

fn register_math_add(registry: &mut CommandRegistry<ConsoleSource>) {
    registry
        .root("math")
        .child("add")
        .child("a")
        .with_type(ArgumentType::integer(i32::MIN, i32::MAX))
        .child("b")
        .with_type(ArgumentType::integer(i32::MIN, i32::MAX))
        .executes(|ctx| {
            let a = ctx.args().get_integer("a")?;
            let b = ctx.args().get_integer("b")?;
            let sum = a
                .checked_add(b)
                .ok_or_else(|| CommandError::runtime("The sum does not fit in 32 bits"))?;
            ctx.source().reply(sum.to_string());
            Ok(sum)
        });
}

fn register_math_mul(registry: &mut CommandRegistry<ConsoleSource>) {
    registry
        .root("math")
        .child("mul")
        .child("a")
        .with_type(ArgumentType::integer(i32::MIN, i32::MAX))
        .child("b")
        .with_type(ArgumentType::integer(i32::MIN, i32::MAX))
        .executes(|ctx| {
            let a = ctx.args().get_integer("a")?;
            let b = ctx.args().get_integer("b")?;
            let product = a
                .checked_mul(b)
                .ok_or_else(|| CommandError::runtime("The product does not fit in 32 bits"))?;
            ctx.source().reply(product.to_string());
            Ok(product)
        });
}

fn register_admin(registry: &mut CommandRegistry<ConsoleSource>, permissions: &Arc<PermissionsStore>) {
    let admin = registry.admin_root();

    let permissions = permissions.clone();
    admin.child("reload").executes(move |ctx| {
        permissions
            .reload()
            .map_err(|err| CommandError::runtime(format!("Could not reload permissions: {:#}", err)))?;
        ctx.source().reply("Permissions reloaded");
        Ok(1)
    });

    admin.child("version").executes(|ctx| {
        ctx.source()
            .reply(format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")));
        Ok(1)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdtree_core::{CommandDispatcher, CompileContext, RegistrationEnvironment};
    use cmdtree_dispatch::DispatchError;

    const PERMISSIONS: &str = r#"
        [principals.op]
        "cmdtree.admin" = true
    "#;

    fn dispatcher() -> CommandDispatcher<ConsoleSource> {
        let permissions = Arc::new(PermissionsStore::from_toml(PERMISSIONS).unwrap());
        let mut registry = CommandRegistry::new(Default::default());
        register_commands(&mut registry, &permissions);

        let mut dispatcher = CommandDispatcher::new(RegistrationEnvironment::Dedicated);
        let context = CompileContext::with_shared(permissions);
        let report = registry.register_all(&mut dispatcher, RegistrationEnvironment::All, &context);
        assert!(report.skipped.is_empty());
        dispatcher
    }

    fn console(principal: Option<&str>) -> ConsoleSource {
        ConsoleSource::new("Console", principal.map(str::to_string))
    }

    #[test]
    fn math_registrants_share_a_root() {
        let dispatcher = dispatcher();
        assert_eq!(dispatcher.roots().iter().filter(|r| r.name() == "math").count(), 1);
        assert_eq!(dispatcher.execute("math add 2 3", &console(None)), Ok(5));
        assert_eq!(dispatcher.execute("/math mul 4 5", &console(None)), Ok(20));
    }

    #[test]
    fn overflow_fails_without_escaping() {
        let dispatcher = dispatcher();
        let max = i32::MAX.to_string();
        assert_eq!(
            dispatcher.execute(&format!("math add {} 1", max), &console(None)),
            Ok(cmdtree_core::FAILURE_RESULT)
        );
    }

    #[test]
    fn whoami_needs_a_principal() {
        let dispatcher = dispatcher();
        assert_eq!(dispatcher.execute("whoami", &console(None)), Ok(0));
        assert_eq!(dispatcher.execute("whoami", &console(Some("bob"))), Ok(1));
    }

    #[test]
    fn admin_commands_follow_the_admin_permission() {
        let dispatcher = dispatcher();
        assert_eq!(dispatcher.execute("cmdtree version", &console(Some("op"))), Ok(1));
        assert_eq!(dispatcher.execute("cmdtree reload", &console(Some("op"))), Ok(1));
        assert_eq!(
            dispatcher.execute("cmdtree version", &console(Some("bob"))),
            Err(DispatchError::UnknownCommand)
        );
        assert_eq!(
            dispatcher.execute("cmdtree version", &console(None)),
            Err(DispatchError::UnknownCommand)
        );
    }

    #[test]
    fn say_needs_a_message() {
        let dispatcher = dispatcher();
        assert_eq!(dispatcher.execute("say", &console(None)), Ok(0));
        assert_eq!(dispatcher.execute("say hello there", &console(None)), Ok(1));
    }
}
