//! Ambient log scopes for the current task.
//!
//! Scopes nest: entering a scope pushes a label onto a copy of the enclosing
//! stack for the duration of the wrapped future or closure. The console
//! pipeline reads the stack with [`current`] and hands it to the formatter.

use std::future::Future;

tokio::task_local! {
    static SCOPES: Vec<String>;
}

/// Run `future` with `label` pushed onto the scope stack.
pub async fn in_scope<S, F>(label: S, future: F) -> F::Output
where
    S: Into<String>,
    F: Future,
{
    SCOPES.scope(pushed(label.into()), future).await
}

/// Synchronous counterpart of [`in_scope`].
pub fn sync_scope<S, F, R>(label: S, f: F) -> R
where
    S: Into<String>,
    F: FnOnce() -> R,
{
    SCOPES.sync_scope(pushed(label.into()), f)
}

/// Scopes of the current task, outermost first. Empty outside any scope.
pub fn current() -> Vec<String> {
    SCOPES.try_with(Clone::clone).unwrap_or_default()
}

fn pushed(label: String) -> Vec<String> {
    let mut stack = current();
    stack.push(label);
    stack
}
