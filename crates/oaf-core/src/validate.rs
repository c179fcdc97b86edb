//! Structural validation of a parsed document.
//!
//! The serde model already enforces shape; this pass checks what it cannot:
//! required info fields, path key form, `operationId` uniqueness, and that
//! every reference in paths or components parses and resolves against the
//! component store.

use std::collections::HashSet;

use crate::error::{RefError, ValidateError};
use crate::filter::refs::{parse_ref_of, ComponentKind};
use crate::filter::walker::collect_schema_refs;
use crate::parse::components::Components;
use crate::parse::parameter::ParameterOrRef;
use crate::parse::request_body::RequestBodyOrRef;
use crate::parse::response::ResponseOrRef;
use crate::parse::schema::SchemaOrRef;
use crate::parse::spec::OpenApiSpec;

pub fn validate(spec: &OpenApiSpec) -> Result<(), ValidateError> {
    if spec.info.title.is_empty() {
        return Err(ValidateError::MissingField("info.title".to_string()));
    }
    if spec.info.version.is_empty() {
        return Err(ValidateError::MissingField("info.version".to_string()));
    }

    let mut seen_ids = HashSet::new();
    for (path, item) in &spec.paths {
        if !path.starts_with('/') {
            return Err(ValidateError::InvalidPath(path.clone()));
        }
        for (_, operation) in item.operations() {
            if let Some(id) = &operation.operation_id {
                if !seen_ids.insert(id.as_str()) {
                    return Err(ValidateError::DuplicateOperationId(id.clone()));
                }
            }
        }
    }

    check_references(spec)?;
    Ok(())
}

/// Every reference in retained paths and in the component store must parse
/// and name an existing component of its kind.
fn check_references(spec: &OpenApiSpec) -> Result<(), RefError> {
    let components = spec.components.as_ref();

    for (path, item) in &spec.paths {
        check_parameters(&item.parameters, &format!("paths.{path}.parameters"), components)?;
        for (method, operation) in item.operations() {
            let context = format!("paths.{path}.{method}");
            check_parameters(
                &operation.parameters,
                &format!("{context}.parameters"),
                components,
            )?;
            if let Some(body) = &operation.request_body {
                check_request_body(body, &format!("{context}.requestBody"), components)?;
            }
            for (status, response) in &operation.responses {
                check_response(response, &format!("{context}.responses.{status}"), components)?;
            }
        }
    }

    if let Some(components) = components {
        for (name, schema) in &components.schemas {
            check_schema(schema, &format!("schemas.{name}"), Some(components))?;
        }
        for (name, parameter) in &components.parameters {
            if let ParameterOrRef::Parameter(parameter) = parameter {
                if let Some(schema) = &parameter.schema {
                    check_schema(schema, &format!("parameters.{name}.schema"), Some(components))?;
                }
            }
        }
        for (name, body) in &components.request_bodies {
            check_request_body(body, &format!("requestBodies.{name}"), Some(components))?;
        }
        for (name, response) in &components.responses {
            check_response(response, &format!("responses.{name}"), Some(components))?;
        }
    }

    Ok(())
}

fn check_parameters(
    parameters: &[ParameterOrRef],
    context: &str,
    components: Option<&Components>,
) -> Result<(), RefError> {
    for (i, parameter) in parameters.iter().enumerate() {
        let location = format!("{context}[{i}]");
        match parameter {
            ParameterOrRef::Ref { ref_path } => {
                let name = parse_ref_of(ref_path, ComponentKind::Parameters, &location)?;
                require_component(components, ComponentKind::Parameters, name, &location, |c| {
                    c.parameters.contains_key(name)
                })?;
            }
            ParameterOrRef::Parameter(parameter) => {
                if let Some(schema) = &parameter.schema {
                    check_schema(schema, &format!("{location}.schema"), components)?;
                }
            }
        }
    }
    Ok(())
}

fn check_request_body(
    body: &RequestBodyOrRef,
    context: &str,
    components: Option<&Components>,
) -> Result<(), RefError> {
    match body {
        RequestBodyOrRef::Ref { ref_path } => {
            let name = parse_ref_of(ref_path, ComponentKind::RequestBodies, context)?;
            require_component(components, ComponentKind::RequestBodies, name, context, |c| {
                c.request_bodies.contains_key(name)
            })
        }
        RequestBodyOrRef::RequestBody(body) => {
            for (mime_type, media_type) in &body.content {
                if let Some(schema) = &media_type.schema {
                    check_schema(schema, &format!("{context}.content.{mime_type}"), components)?;
                }
            }
            Ok(())
        }
    }
}

fn check_response(
    response: &ResponseOrRef,
    context: &str,
    components: Option<&Components>,
) -> Result<(), RefError> {
    match response {
        ResponseOrRef::Ref { ref_path } => {
            let name = parse_ref_of(ref_path, ComponentKind::Responses, context)?;
            require_component(components, ComponentKind::Responses, name, context, |c| {
                c.responses.contains_key(name)
            })
        }
        ResponseOrRef::Response(response) => {
            for (mime_type, media_type) in &response.content {
                if let Some(schema) = &media_type.schema {
                    check_schema(schema, &format!("{context}.content.{mime_type}"), components)?;
                }
            }
            Ok(())
        }
    }
}

/// Validate every reference in an inline schema subtree, including that the
/// named schemas exist. Unlike closure expansion this does not chase into
/// the referenced schemas; each component entry is checked on its own.
fn check_schema(
    root: &SchemaOrRef,
    context: &str,
    components: Option<&Components>,
) -> Result<(), RefError> {
    let mut sites = Vec::new();
    collect_schema_refs(root, context, &mut sites)?;
    for site in sites {
        require_component(components, ComponentKind::Schemas, &site.name, &site.context, |c| {
            c.schemas.contains_key(&site.name)
        })?;
    }
    Ok(())
}

fn require_component(
    components: Option<&Components>,
    kind: ComponentKind,
    name: &str,
    context: &str,
    exists: impl Fn(&Components) -> bool,
) -> Result<(), RefError> {
    let found = components.map(exists).unwrap_or(false);
    if found {
        Ok(())
    } else {
        Err(RefError::ComponentNotFound {
            kind,
            name: name.to_string(),
            context: context.to_string(),
        })
    }
}
