use crate::error::RefError;
use crate::parse::schema::SchemaOrRef;

use super::refs::{parse_ref_of, ComponentKind};

/// A schema name collected by the walker, with the dotted breadcrumb of the
/// site that referenced it.
#[derive(Debug, Clone)]
pub(crate) struct SchemaRefSite {
    pub name: String,
    pub context: String,
}

/// Collect every schema name referenced from an inline schema subtree.
///
/// Walks `items`, `properties`, the composition lists and `not`. A `$ref`
/// node contributes its name and is not followed; chasing names into the
/// component store is the closure engine's job. The walk uses an explicit
/// stack so adversarially deep schemas cannot exhaust the call stack.
pub(crate) fn collect_schema_refs(
    root: &SchemaOrRef,
    context: &str,
    out: &mut Vec<SchemaRefSite>,
) -> Result<(), RefError> {
    let mut stack: Vec<(&SchemaOrRef, String)> = vec![(root, context.to_string())];

    while let Some((node, ctx)) = stack.pop() {
        match node {
            SchemaOrRef::Ref { ref_path } => {
                let name = parse_ref_of(ref_path, ComponentKind::Schemas, &ctx)?;
                out.push(SchemaRefSite {
                    name: name.to_string(),
                    context: ctx,
                });
            }
            SchemaOrRef::Schema(schema) => {
                if let Some(items) = schema.items.as_deref() {
                    stack.push((items, format!("{ctx}.items")));
                }
                for (prop, sub) in &schema.properties {
                    stack.push((sub, format!("{ctx}.properties.{prop}")));
                }
                for (i, sub) in schema.all_of.iter().enumerate() {
                    stack.push((sub, format!("{ctx}.allOf[{i}]")));
                }
                for (i, sub) in schema.one_of.iter().enumerate() {
                    stack.push((sub, format!("{ctx}.oneOf[{i}]")));
                }
                for (i, sub) in schema.any_of.iter().enumerate() {
                    stack.push((sub, format!("{ctx}.anyOf[{i}]")));
                }
                if let Some(not) = schema.not.as_deref() {
                    stack.push((not, format!("{ctx}.not")));
                }
            }
        }
    }

    Ok(())
}
