use cmdtree_dispatch::{SuggestionContext, SuggestionFuture, SuggestionProvider};
use std::sync::Arc;

/// A provider that always offers the same strings. Narrowing them down to
/// what the user typed is left to the dispatcher.
pub fn fixed<S>(suggestions: impl IntoIterator<Item = impl Into<String>>) -> SuggestionProvider<S> {
    let suggestions: Vec<String> = suggestions.into_iter().map(Into::into).collect();
    provider(move |_| -> SuggestionFuture { Box::pin(std::future::ready(suggestions.clone())) })
}

fn provider<S, F>(f: F) -> SuggestionProvider<S>
where
    F: Fn(&SuggestionContext<'_, S>) -> SuggestionFuture + Send + Sync + 'static,
{
    Arc::new(f)
}
