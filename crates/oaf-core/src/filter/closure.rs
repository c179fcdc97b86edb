use std::collections::VecDeque;

use indexmap::{IndexMap, IndexSet};

use crate::error::RefError;
use crate::parse::components::Components;
use crate::parse::media_type::MediaType;
use crate::parse::operation::Operation;
use crate::parse::parameter::ParameterOrRef;
use crate::parse::request_body::RequestBodyOrRef;
use crate::parse::response::ResponseOrRef;
use crate::parse::schema::SchemaOrRef;

use super::refs::{parse_ref_of, ComponentKind};
use super::walker::{collect_schema_refs, SchemaRefSite};

/// The transitive reference closure over the four reachable component
/// kinds.
#[derive(Debug, Default)]
pub(crate) struct RefClosure {
    pub schemas: IndexSet<String>,
    pub parameters: IndexSet<String>,
    pub request_bodies: IndexSet<String>,
    pub responses: IndexSet<String>,
}

/// Work-list fixpoint expansion from operation seeds to the full closure.
///
/// Component names are inserted into the closure the moment they are seen;
/// schema names additionally enter a pending queue and are expanded exactly
/// once, so cyclic schema graphs terminate. Traversal is by name lookup,
/// never by pointer, which is what lets cycles exist in the first place.
pub(crate) struct ClosureBuilder<'a> {
    components: Option<&'a Components>,
    mime_types: &'a IndexSet<String>,
    closure: RefClosure,
    pending_schemas: VecDeque<SchemaRefSite>,
}

impl<'a> ClosureBuilder<'a> {
    pub fn new(components: Option<&'a Components>, mime_types: &'a IndexSet<String>) -> Self {
        Self {
            components,
            mime_types,
            closure: RefClosure::default(),
            pending_schemas: VecDeque::new(),
        }
    }

    /// Seed the closure with every reference reachable from one operation.
    pub fn seed_operation(&mut self, context: &str, operation: &Operation) -> Result<(), RefError> {
        match &operation.request_body {
            Some(RequestBodyOrRef::Ref { ref_path }) => {
                let location = format!("{context}.requestBody");
                let name = parse_ref_of(ref_path, ComponentKind::RequestBodies, &location)?;
                self.add_request_body(name, &location)?;
            }
            Some(RequestBodyOrRef::RequestBody(body)) => {
                self.walk_content(&body.content, &format!("{context}.requestBody.content"))?;
            }
            None => {}
        }

        self.seed_parameters(&format!("{context}.parameters"), &operation.parameters)?;

        for (status, response) in &operation.responses {
            let location = format!("{context}.responses.{status}");
            match response {
                ResponseOrRef::Ref { ref_path } => {
                    let name = parse_ref_of(ref_path, ComponentKind::Responses, &location)?;
                    self.add_response(name, &location)?;
                }
                ResponseOrRef::Response(response) => {
                    self.walk_content(&response.content, &format!("{location}.content"))?;
                }
            }
        }

        Ok(())
    }

    /// Seed a parameter list (operation-level or path-level).
    pub fn seed_parameters(
        &mut self,
        context: &str,
        parameters: &[ParameterOrRef],
    ) -> Result<(), RefError> {
        for (i, parameter) in parameters.iter().enumerate() {
            let location = format!("{context}[{i}]");
            match parameter {
                ParameterOrRef::Ref { ref_path } => {
                    let name = parse_ref_of(ref_path, ComponentKind::Parameters, &location)?;
                    self.add_parameter(name, &location)?;
                }
                ParameterOrRef::Parameter(parameter) => {
                    if let Some(schema) = &parameter.schema {
                        self.enqueue_schema_refs(schema, &format!("{location}.schema"))?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Drain the work list until no unexpanded name remains.
    pub fn finish(mut self) -> Result<RefClosure, RefError> {
        while let Some(site) = self.pending_schemas.pop_front() {
            let schema = self
                .lookup(ComponentKind::Schemas, &site.name, &site.context, |c| {
                    c.schemas.get(&site.name)
                })?;
            // Breadcrumbs inside a component are rooted at its name, e.g.
            // `Pet.properties.tags.items`.
            self.enqueue_schema_refs(schema, &site.name)?;
        }
        Ok(self.closure)
    }

    fn add_request_body(&mut self, name: &str, context: &str) -> Result<(), RefError> {
        if !self.closure.request_bodies.insert(name.to_string()) {
            return Ok(());
        }
        let body = self.lookup(ComponentKind::RequestBodies, name, context, |c| {
            c.request_bodies.get(name)
        })?;
        match body {
            // A store entry that is itself a reference is carried as-is,
            // not chased.
            RequestBodyOrRef::Ref { .. } => Ok(()),
            RequestBodyOrRef::RequestBody(body) => {
                self.walk_content(&body.content, &format!("requestBodies.{name}.content"))
            }
        }
    }

    fn add_parameter(&mut self, name: &str, context: &str) -> Result<(), RefError> {
        if !self.closure.parameters.insert(name.to_string()) {
            return Ok(());
        }
        let parameter = self.lookup(ComponentKind::Parameters, name, context, |c| {
            c.parameters.get(name)
        })?;
        match parameter {
            ParameterOrRef::Ref { .. } => Ok(()),
            ParameterOrRef::Parameter(parameter) => {
                if let Some(schema) = &parameter.schema {
                    self.enqueue_schema_refs(schema, &format!("parameters.{name}.schema"))?;
                }
                Ok(())
            }
        }
    }

    fn add_response(&mut self, name: &str, context: &str) -> Result<(), RefError> {
        if !self.closure.responses.insert(name.to_string()) {
            return Ok(());
        }
        let response = self.lookup(ComponentKind::Responses, name, context, |c| {
            c.responses.get(name)
        })?;
        match response {
            ResponseOrRef::Ref { .. } => Ok(()),
            ResponseOrRef::Response(response) => {
                self.walk_content(&response.content, &format!("responses.{name}.content"))
            }
        }
    }

    /// Walk the media types under consideration and queue their schemas.
    fn walk_content(
        &mut self,
        content: &IndexMap<String, MediaType>,
        context: &str,
    ) -> Result<(), RefError> {
        for mime_type in self.mime_types {
            if let Some(media_type) = content.get(mime_type.as_str()) {
                if let Some(schema) = &media_type.schema {
                    self.enqueue_schema_refs(schema, &format!("{context}.{mime_type}"))?;
                }
            }
        }
        Ok(())
    }

    fn enqueue_schema_refs(&mut self, root: &SchemaOrRef, context: &str) -> Result<(), RefError> {
        let mut sites = Vec::new();
        collect_schema_refs(root, context, &mut sites)?;
        for site in sites {
            if self.closure.schemas.insert(site.name.clone()) {
                self.pending_schemas.push_back(site);
            }
        }
        Ok(())
    }

    fn lookup<T>(
        &self,
        kind: ComponentKind,
        name: &str,
        context: &str,
        get: impl Fn(&'a Components) -> Option<&'a T>,
    ) -> Result<&'a T, RefError> {
        self.components
            .and_then(&get)
            .ok_or_else(|| RefError::ComponentNotFound {
                kind,
                name: name.to_string(),
                context: context.to_string(),
            })
    }
}
