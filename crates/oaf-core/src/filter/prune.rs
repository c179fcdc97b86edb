use crate::error::RefError;
use crate::parse::spec::OpenApiSpec;

use super::closure::ClosureBuilder;
use super::mime::collect_mime_types;

/// Delete components unreachable from the retained paths.
///
/// Reruns the closure over the filtered document itself, seeded only from
/// what selection actually kept, then retains exactly the closure within
/// the four reachable kinds. Passenger kinds are untouched.
pub(crate) fn prune(spec: &mut OpenApiSpec) -> Result<(), RefError> {
    let mime_types = collect_mime_types(spec);
    let mut builder = ClosureBuilder::new(spec.components.as_ref(), &mime_types);
    for (path, item) in &spec.paths {
        builder.seed_parameters(&format!("paths.{path}.parameters"), &item.parameters)?;
        for (method, operation) in item.operations() {
            builder.seed_operation(&format!("paths.{path}.{method}"), operation)?;
        }
    }
    let closure = builder.finish()?;

    if let Some(components) = spec.components.as_mut() {
        components
            .schemas
            .retain(|name, _| closure.schemas.contains(name));
        components
            .parameters
            .retain(|name, _| closure.parameters.contains(name));
        components
            .request_bodies
            .retain(|name, _| closure.request_bodies.contains(name));
        components
            .responses
            .retain(|name, _| closure.responses.contains(name));
    }

    Ok(())
}
