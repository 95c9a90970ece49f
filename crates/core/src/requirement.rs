use crate::permission::{CommandSource, PermissionProvider};
use cmdtree_dispatch::Predicate;
use std::sync::Arc;

pub(crate) enum Requirement<S> {
    Predicate(Predicate<S>),
    /// Resolved against the provider handed to the compiler.
    Permission(String),
}

impl<S: CommandSource> Requirement<S> {
    pub(crate) fn resolve(
        &self,
        permissions: &Arc<dyn PermissionProvider<S::Principal>>,
    ) -> Predicate<S> {
        match self {
            Requirement::Predicate(predicate) => predicate.clone(),
            Requirement::Permission(permission) => {
                permission_predicate(permission.clone(), permissions.clone())
            }
        }
    }
}

/// Fails closed: a source without a principal never holds a permission.
pub(crate) fn permission_predicate<S: CommandSource>(
    permission: String,
    permissions: Arc<dyn PermissionProvider<S::Principal>>,
) -> Predicate<S> {
    Arc::new(move |source: &S| match source.principal() {
        Some(principal) => permissions.has_permission(&principal, &permission),
        None => false,
    })
}

/// Combines predicates into one that holds only if every one of them holds.
pub(crate) fn all_of<S: 'static>(mut predicates: Vec<Predicate<S>>) -> Option<Predicate<S>> {
    match predicates.len() {
        0 => None,
        1 => predicates.pop(),
        _ => Some(Arc::new(move |source: &S| {
            predicates.iter().all(|predicate| predicate(source))
        })),
    }
}
