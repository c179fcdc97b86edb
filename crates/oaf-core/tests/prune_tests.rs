use oaf_core::{filter, parse, ComponentKind, FilterOptions, RefError};

const PETSTORE: &str = include_str!("fixtures/petstore.yaml");

const TRANSITIVE: &str = r##"
openapi: 3.0.3
info:
  title: Transitive
  version: "1.0"
paths:
  /main:
    get:
      operationId: getMain
      responses:
        "200":
          description: OK
          content:
            application/json:
              schema:
                $ref: "#/components/schemas/MainSchema"
  /other:
    get:
      operationId: getOther
      responses:
        "204":
          description: No Content
components:
  schemas:
    MainSchema:
      type: object
      properties:
        nested:
          $ref: "#/components/schemas/NestedSchema"
    NestedSchema:
      type: object
      properties:
        deep:
          $ref: "#/components/schemas/DeepSchema"
    DeepSchema:
      type: string
    UnrelatedSchema:
      type: boolean
"##;

fn options(paths: &[&str], operations: &[&str], prune: bool) -> FilterOptions {
    FilterOptions {
        paths: paths.iter().map(|s| s.to_string()).collect(),
        operations: operations.iter().map(|s| s.to_string()).collect(),
        tags: Vec::new(),
        prune_components: prune,
    }
}

#[test]
fn transitive_chain_survives_pruning() {
    let spec = parse::from_yaml(TRANSITIVE).unwrap();
    let filtered = filter(&spec, &options(&["/main"], &[], true)).unwrap();

    let schemas = &filtered.components.as_ref().unwrap().schemas;
    assert!(schemas.contains_key("MainSchema"));
    assert!(schemas.contains_key("NestedSchema"));
    assert!(schemas.contains_key("DeepSchema"));
    assert!(!schemas.contains_key("UnrelatedSchema"));
}

#[test]
fn pruned_components_are_exactly_the_closure() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let filtered = filter(&spec, &options(&[], &["placeOrder"], true)).unwrap();

    let components = filtered.components.as_ref().unwrap();
    let schema_names: Vec<&String> = components.schemas.keys().collect();
    assert_eq!(schema_names, ["Order"]);
    assert!(components.parameters.is_empty());
    assert!(components.request_bodies.is_empty());
    assert!(components.responses.is_empty());

    // Passenger kinds are untouched by pruning.
    assert!(components.security_schemes.contains_key("api_key"));
}

#[test]
fn unpruned_output_contains_at_least_the_closure() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let pruned = filter(&spec, &options(&[], &["getPetById"], true)).unwrap();
    let unpruned = filter(&spec, &options(&[], &["getPetById"], false)).unwrap();

    let pruned = pruned.components.as_ref().unwrap();
    let unpruned = unpruned.components.as_ref().unwrap();
    for name in pruned.schemas.keys() {
        assert!(unpruned.schemas.contains_key(name), "missing schema {name}");
    }
    for name in pruned.responses.keys() {
        assert!(unpruned.responses.contains_key(name), "missing response {name}");
    }
}

#[test]
fn cyclic_schema_graph_terminates_and_keeps_both_sides() {
    let spec = parse::from_yaml(
        r##"
openapi: 3.0.3
info:
  title: Cyclic
  version: "1.0"
paths:
  /tree:
    get:
      operationId: getTree
      responses:
        "200":
          description: OK
          content:
            application/json:
              schema:
                $ref: "#/components/schemas/TreeNode"
components:
  schemas:
    TreeNode:
      type: object
      properties:
        children:
          type: array
          items:
            $ref: "#/components/schemas/TreeBranch"
    TreeBranch:
      type: object
      properties:
        root:
          $ref: "#/components/schemas/TreeNode"
    Detached:
      type: string
"##,
    )
    .unwrap();

    let filtered = filter(&spec, &options(&[], &[], true)).unwrap();
    let schemas = &filtered.components.as_ref().unwrap().schemas;
    assert!(schemas.contains_key("TreeNode"));
    assert!(schemas.contains_key("TreeBranch"));
    assert!(!schemas.contains_key("Detached"));
}

#[test]
fn missing_component_fails_with_breadcrumb() {
    let spec = parse::from_yaml(
        r##"
openapi: 3.0.3
info:
  title: Broken
  version: "1.0"
paths:
  /ghosts:
    get:
      operationId: listGhosts
      responses:
        "200":
          description: OK
          content:
            application/json:
              schema:
                $ref: "#/components/schemas/Ghost"
components:
  schemas:
    Unrelated:
      type: string
"##,
    )
    .unwrap();

    let err = filter(&spec, &FilterOptions::default()).unwrap_err();
    match err.cause() {
        RefError::ComponentNotFound {
            kind,
            name,
            context,
        } => {
            assert_eq!(*kind, ComponentKind::Schemas);
            assert_eq!(name, "Ghost");
            assert!(
                context.starts_with("paths./ghosts.get"),
                "breadcrumb should point at the operation site, got {context}"
            );
        }
        other => panic!("expected ComponentNotFound, got {other:?}"),
    }
}
