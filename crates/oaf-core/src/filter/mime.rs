use indexmap::IndexSet;

use crate::parse::request_body::RequestBodyOrRef;
use crate::parse::response::ResponseOrRef;
use crate::parse::spec::OpenApiSpec;

/// Media types examined even when the document never mentions them.
/// Kept as data so the list stays trivially updatable.
pub(crate) const DEFAULT_MIME_TYPES: [&str; 5] = [
    "application/json",
    "application/x-www-form-urlencoded",
    "multipart/form-data",
    "application/xml",
    "text/plain",
];

/// The set of media-type keys to consider when walking content: the default
/// list unioned with every key observed in the document, both on inline
/// operation content and in the component store's request bodies and
/// responses.
pub(crate) fn collect_mime_types(spec: &OpenApiSpec) -> IndexSet<String> {
    let mut mime_types: IndexSet<String> =
        DEFAULT_MIME_TYPES.iter().map(|mt| mt.to_string()).collect();

    for item in spec.paths.values() {
        for (_, operation) in item.operations() {
            if let Some(RequestBodyOrRef::RequestBody(body)) = &operation.request_body {
                mime_types.extend(body.content.keys().cloned());
            }
            for response in operation.responses.values() {
                if let ResponseOrRef::Response(response) = response {
                    mime_types.extend(response.content.keys().cloned());
                }
            }
        }
    }

    if let Some(components) = &spec.components {
        for body in components.request_bodies.values() {
            if let RequestBodyOrRef::RequestBody(body) = body {
                mime_types.extend(body.content.keys().cloned());
            }
        }
        for response in components.responses.values() {
            if let ResponseOrRef::Response(response) = response {
                mime_types.extend(response.content.keys().cloned());
            }
        }
    }

    mime_types
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn defaults_present_for_empty_document() {
        let spec = parse::from_yaml(
            "openapi: 3.0.3\ninfo:\n  title: Empty\n  version: '1.0'\npaths: {}\n",
        )
        .unwrap();
        let mime_types = collect_mime_types(&spec);
        for expected in DEFAULT_MIME_TYPES {
            assert!(mime_types.contains(expected), "missing {expected}");
        }
        assert_eq!(mime_types.len(), DEFAULT_MIME_TYPES.len());
    }

    #[test]
    fn discovers_document_mime_types() {
        let spec = parse::from_yaml(
            r#"
openapi: 3.0.3
info:
  title: Custom
  version: "1.0"
paths:
  /things:
    get:
      responses:
        "200":
          description: OK
          content:
            application/vnd.custom+json:
              schema:
                type: string
components:
  requestBodies:
    Upload:
      content:
        image/png:
          schema:
            type: string
"#,
        )
        .unwrap();
        let mime_types = collect_mime_types(&spec);
        assert!(mime_types.contains("application/vnd.custom+json"));
        assert!(mime_types.contains("image/png"));
        assert!(mime_types.contains("application/json"));
    }
}
