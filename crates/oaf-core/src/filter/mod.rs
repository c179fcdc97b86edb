pub mod refs;

mod closure;
mod matcher;
mod mime;
mod prune;
pub(crate) mod walker;

use indexmap::{IndexMap, IndexSet};

use crate::error::FilterError;
use crate::parse::components::Components;
use crate::parse::operation::PathItem;
use crate::parse::spec::OpenApiSpec;

use closure::{ClosureBuilder, RefClosure};

/// Filtering criteria. Axes are combined with AND; an empty axis does not
/// constrain. With all three axes empty every operation is retained.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    /// Path prefixes to keep. Matching is a byte-level string prefix:
    /// case-sensitive, no trailing-slash normalization (`/users/` does not
    /// match `/users`); normalize before calling if you need otherwise.
    /// A matching prefix retains the whole path item, every operation
    /// included, and skips the operation/tag predicates for that path.
    pub paths: Vec<String>,

    /// HTTP method names (case-insensitive) and/or `operationId` values
    /// (exact) to keep.
    pub operations: Vec<String>,

    /// Tag names to keep; an operation qualifies when at least one of its
    /// tags is listed.
    pub tags: Vec<String>,

    /// Delete components that end up unreachable from the retained paths.
    pub prune_components: bool,
}

/// Filter a document down to the selected operations plus the transitive
/// closure of components they reference.
///
/// The input is not modified; the output is a fresh document whose paths
/// and tags preserve input order. Fails on the first malformed or dangling
/// reference encountered.
pub fn apply(spec: &OpenApiSpec, options: &FilterOptions) -> Result<OpenApiSpec, FilterError> {
    let mime_types = mime::collect_mime_types(spec);
    let mut builder = ClosureBuilder::new(spec.components.as_ref(), &mime_types);
    let mut used_tags: IndexSet<&str> = IndexSet::new();
    let mut paths: IndexMap<String, PathItem> = IndexMap::new();

    let seed_stage = |e| FilterError::new("collecting operation references", e);

    for (path, item) in &spec.paths {
        // Whole-path retention: the path item is carried verbatim,
        // summary, path-level parameters and all.
        if !options.paths.is_empty() && matcher::path_matches(path, &options.paths) {
            builder
                .seed_parameters(&format!("paths.{path}.parameters"), &item.parameters)
                .map_err(seed_stage)?;
            for (method, operation) in item.operations() {
                builder
                    .seed_operation(&format!("paths.{path}.{method}"), operation)
                    .map_err(seed_stage)?;
                used_tags.extend(operation.tags.iter().map(String::as_str));
            }
            paths.insert(path.clone(), item.clone());
            continue;
        }

        // Per-operation retention: a fresh path item with only the matched
        // method slots; top-level path-item fields are not carried.
        let mut filtered_item = PathItem::default();
        let mut any_matched = false;
        for (method, operation) in item.operations() {
            if !matcher::operation_matches(operation, method, options) {
                continue;
            }
            builder
                .seed_operation(&format!("paths.{path}.{method}"), operation)
                .map_err(seed_stage)?;
            used_tags.extend(operation.tags.iter().map(String::as_str));
            filtered_item.set_operation(method, operation.clone());
            any_matched = true;
        }
        if any_matched {
            paths.insert(path.clone(), filtered_item);
        }
    }

    let closure = builder
        .finish()
        .map_err(|e| FilterError::new("resolving schema references", e))?;

    let tags = spec
        .tags
        .iter()
        .filter(|tag| used_tags.contains(tag.name.as_str()))
        .cloned()
        .collect();

    let mut filtered = OpenApiSpec {
        openapi: spec.openapi.clone(),
        info: spec.info.clone(),
        servers: spec.servers.clone(),
        paths,
        components: spec
            .components
            .as_ref()
            .map(|components| select_components(components, &closure)),
        tags,
        security: spec.security.clone(),
        external_docs: spec.external_docs.clone(),
        extensions: spec.extensions.clone(),
    };

    if options.prune_components {
        prune::prune(&mut filtered)
            .map_err(|e| FilterError::new("pruning unreachable components", e))?;
    }

    Ok(filtered)
}

/// Copy closure members out of the source store; passenger kinds are
/// carried across verbatim.
fn select_components(source: &Components, closure: &RefClosure) -> Components {
    let mut selected = Components {
        headers: source.headers.clone(),
        security_schemes: source.security_schemes.clone(),
        examples: source.examples.clone(),
        links: source.links.clone(),
        callbacks: source.callbacks.clone(),
        ..Components::default()
    };

    for name in &closure.schemas {
        if let Some(schema) = source.schemas.get(name) {
            selected.schemas.insert(name.clone(), schema.clone());
        }
    }
    for name in &closure.parameters {
        if let Some(parameter) = source.parameters.get(name) {
            selected.parameters.insert(name.clone(), parameter.clone());
        }
    }
    for name in &closure.request_bodies {
        if let Some(body) = source.request_bodies.get(name) {
            selected
                .request_bodies
                .insert(name.clone(), body.clone());
        }
    }
    for name in &closure.responses {
        if let Some(response) = source.responses.get(name) {
            selected.responses.insert(name.clone(), response.clone());
        }
    }

    selected
}
