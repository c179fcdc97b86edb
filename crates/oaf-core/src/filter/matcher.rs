use crate::parse::operation::{Method, Operation};

use super::FilterOptions;

/// Byte-level prefix match; no case folding, no trailing-slash
/// normalization. `/users` matches `/users/{id}` but `/users/` does not
/// match `/users`.
pub(crate) fn path_matches(path: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|prefix| path.starts_with(prefix))
}

/// Per-operation predicate for paths that did not hit the prefix
/// short-circuit. Non-empty axes must all hold; with every axis empty the
/// operation is retained unconditionally.
pub(crate) fn operation_matches(
    operation: &Operation,
    method: Method,
    options: &FilterOptions,
) -> bool {
    let mut matches = true;

    if !options.operations.is_empty() {
        matches = options
            .operations
            .iter()
            .any(|token| Some(token.as_str()) == operation.operation_id.as_deref())
            || options
                .operations
                .iter()
                .any(|token| token.eq_ignore_ascii_case(method.as_str()));
    }

    if !options.tags.is_empty() && matches {
        matches = operation
            .tags
            .iter()
            .any(|tag| options.tags.iter().any(|wanted| wanted == tag));
    }

    matches
        && (!options.operations.is_empty()
            || !options.tags.is_empty()
            || (options.operations.is_empty()
                && options.tags.is_empty()
                && options.paths.is_empty()))
}
