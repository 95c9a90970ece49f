mod common;

use cmdtree_core::{ArgumentType, CommandRegistry, RegistryConfig};
use cmdtree_dispatch::DispatchError;
use common::{TestSource, capture_logs, dispatch, grants, registry};

#[test]
fn admin_reload_requires_the_admin_permission() {
    let mut registry = CommandRegistry::new(RegistryConfig {
        admin_root: "admin".to_string(),
        admin_permission: "ops.admin".to_string(),
    });
    registry.admin_root().child("reload").executes(|_| Ok(1));

    let (dispatcher, report) = dispatch(registry, grants(&[("alice", "ops.admin")]));
    assert_eq!(report.registered, vec!["admin".to_string()]);

    let outsider = TestSource::named("bob");
    assert!(!dispatcher.root("admin").unwrap().can_use(&outsider));
    assert_eq!(
        dispatcher.execute("admin reload", &outsider),
        Err(DispatchError::UnknownCommand)
    );
    assert_eq!(
        dispatcher.execute("admin reload", &TestSource::anonymous()),
        Err(DispatchError::UnknownCommand)
    );

    assert_eq!(
        dispatcher.execute("admin reload", &TestSource::named("alice")),
        Ok(1)
    );
}

#[test]
fn admin_children_are_gated_even_when_the_root_is_open() {
    let mut registry = registry();
    let admin = registry.admin_root();
    admin.child("reload").executes(|_| Ok(1));

    let (dispatcher, _) = dispatch(registry, grants(&[("alice", "cmdtree.admin")]));
    let root = dispatcher.root("cmdtree").unwrap();
    let reload = root.child("reload").unwrap();
    assert!(reload.can_use(&TestSource::named("alice")));
    assert!(!reload.can_use(&TestSource::named("bob")));
}

fn say_registry() -> CommandRegistry<TestSource> {
    let mut registry = registry();
    registry
        .root("say")
        .child("message")
        .with_type(ArgumentType::string())
        .suggests_fixed(["hello", "bye"]);
    registry
}

#[tokio::test]
async fn say_offers_its_fixed_suggestions() {
    let (dispatcher, _) = dispatch(say_registry(), grants(&[]));
    let source = TestSource::anonymous();

    assert_eq!(dispatcher.suggestions("say ", &source).await, vec!["hello", "bye"]);
    assert_eq!(dispatcher.suggestions("/say b", &source).await, vec!["bye"]);
    assert_eq!(dispatcher.suggestions("s", &source).await, vec!["say"]);
}

#[test]
fn say_without_executor_produces_no_result() {
    let (dispatcher, _) = dispatch(say_registry(), grants(&[]));
    assert_eq!(
        dispatcher.execute("say hello", &TestSource::anonymous()),
        Err(DispatchError::Incomplete {
            path: "/say".to_string()
        })
    );
}

#[test]
fn argument_roots_are_skipped_without_blocking_others() {
    let mut registry = registry();
    registry.root("ping").executes(|_| Ok(1));
    registry.root("target").with_type(ArgumentType::string());
    registry.root("pong").executes(|_| Ok(2));

    let ((dispatcher, report), lines) = capture_logs(|| dispatch(registry, grants(&[])));

    assert_eq!(report.registered, vec!["ping".to_string(), "pong".to_string()]);
    assert_eq!(report.skipped, vec!["target".to_string()]);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("ERROR"));
    assert!(lines[0].contains("/target"));

    let source = TestSource::anonymous();
    assert_eq!(dispatcher.execute("ping", &source), Ok(1));
    assert_eq!(dispatcher.execute("pong", &source), Ok(2));
    assert!(dispatcher.root("target").is_none());
}

#[test]
fn untypeable_literal_skips_only_its_root() {
    let mut registry = registry();
    registry.root("ping").executes(|_| Ok(1));
    registry.root("warp").child("spawn point").executes(|_| Ok(2));
    registry
        .root("tell")
        .child("target player")
        .with_type(ArgumentType::string())
        .child("message")
        .with_type(ArgumentType::greedy_string())
        .executes(|ctx| {
            let target = ctx.args().get_string("target player")?;
            let message = ctx.args().get_greedy("message")?;
            Ok((target.len() + message.len()) as i32)
        });

    let ((dispatcher, report), lines) = capture_logs(|| dispatch(registry, grants(&[])));

    assert_eq!(report.registered, vec!["ping".to_string(), "tell".to_string()]);
    assert_eq!(report.skipped, vec!["warp".to_string()]);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("ERROR"));
    assert!(lines[0].contains("/warp"));
    assert!(lines[0].contains("spawn point"));

    let source = TestSource::anonymous();
    assert_eq!(dispatcher.execute("ping", &source), Ok(1));
    assert_eq!(dispatcher.execute("tell bob hi there", &source), Ok(11));
    assert!(dispatcher.root("warp").is_none());
}

#[test]
fn usage_lists_what_the_source_may_run() {
    let mut registry = registry();
    let plot = registry.root("plot");
    plot.child("info").executes(|_| Ok(1));
    plot.child("clear").requires_permission("plot.clear").executes(|_| Ok(1));

    let (dispatcher, _) = dispatch(registry, grants(&[("alice", "plot.clear")]));
    assert_eq!(
        dispatcher.usage("plot", &TestSource::named("alice")).as_deref(),
        Some("/plot (info | clear)")
    );
    assert_eq!(
        dispatcher.usage("plot", &TestSource::named("bob")).as_deref(),
        Some("/plot info")
    );
}
