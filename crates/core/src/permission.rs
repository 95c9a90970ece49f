/// Something a command can be invoked by.
pub trait CommandSource: 'static {
    type Principal: 'static;

    /// Resolves the principal behind this source. `None` means the source
    /// can not be tied to anyone, and permission checks fail for it.
    fn principal(&self) -> Option<Self::Principal>;
}

/// Decides whether a principal holds a permission string.
pub trait PermissionProvider<P>: Send + Sync {
    fn has_permission(&self, principal: &P, permission: &str) -> bool;
}

impl<P, F> PermissionProvider<P> for F
where
    F: Fn(&P, &str) -> bool + Send + Sync,
{
    fn has_permission(&self, principal: &P, permission: &str) -> bool {
        self(principal, permission)
    }
}
