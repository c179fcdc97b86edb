use oaf_core::{filter, parse, validate, FilterOptions, OpenApiSpec};

const PETSTORE: &str = include_str!("fixtures/petstore.yaml");

fn petstore() -> OpenApiSpec {
    parse::from_yaml(PETSTORE).expect("should parse petstore")
}

fn options(paths: &[&str], operations: &[&str], tags: &[&str]) -> FilterOptions {
    FilterOptions {
        paths: paths.iter().map(|s| s.to_string()).collect(),
        operations: operations.iter().map(|s| s.to_string()).collect(),
        tags: tags.iter().map(|s| s.to_string()).collect(),
        prune_components: false,
    }
}

#[test]
fn filter_by_tag() {
    let spec = petstore();
    let filtered = filter(&spec, &options(&[], &[], &["pet"])).unwrap();

    let paths: Vec<&String> = filtered.paths.keys().collect();
    assert_eq!(
        paths,
        [
            "/pet",
            "/pet/findByStatus",
            "/pet/{petId}",
            "/pet/{petId}/uploadImage"
        ]
    );

    let components = filtered.components.as_ref().unwrap();
    assert!(components.schemas.contains_key("Pet"));
    assert!(components.schemas.contains_key("Category"));
    assert!(components.schemas.contains_key("Tag"));
    // Order is only referenced by store operations.
    assert!(!components.schemas.contains_key("Order"));

    // The filtered document must still validate.
    validate::validate(&filtered).expect("filtered spec should be valid");
}

#[test]
fn filter_by_path_prefix() {
    let spec = petstore();
    let filtered = filter(&spec, &options(&["/store"], &[], &[])).unwrap();

    assert!(filtered.paths.contains_key("/store/inventory"));
    assert!(filtered.paths.contains_key("/store/order"));
    assert!(filtered.paths.contains_key("/store/order/{orderId}"));
    assert!(filtered.paths.keys().all(|p| !p.starts_with("/pet")));

    let components = filtered.components.as_ref().unwrap();
    assert!(components.schemas.contains_key("Order"));
    assert!(components.schemas.contains_key("Error"));
    assert!(!components.schemas.contains_key("Pet"));

    validate::validate(&filtered).expect("filtered spec should be valid");
}

#[test]
fn filter_by_operation_id() {
    let spec = petstore();
    let filtered = filter(&spec, &options(&[], &["getPetById"], &[])).unwrap();

    assert_eq!(filtered.paths.len(), 1);
    let item = filtered.paths.get("/pet/{petId}").unwrap();
    assert!(item.get.is_some());
    // Sibling operations on the same path are not carried along.
    assert!(item.delete.is_none());

    let components = filtered.components.as_ref().unwrap();
    assert!(components.schemas.contains_key("Pet"));
    assert!(components.schemas.contains_key("Category"));
    assert!(components.schemas.contains_key("Tag"));
    assert!(components.schemas.contains_key("Error"));
    assert!(components.parameters.contains_key("PetId"));
    assert!(components.responses.contains_key("NotFound"));
    assert!(!components.schemas.contains_key("Order"));

    validate::validate(&filtered).expect("filtered spec should be valid");
}

#[test]
fn combined_tag_and_method_filter() {
    let spec = petstore();
    let filtered = filter(&spec, &options(&[], &["get"], &["pet"])).unwrap();

    let paths: Vec<&String> = filtered.paths.keys().collect();
    assert_eq!(paths, ["/pet/findByStatus", "/pet/{petId}"]);

    // Only GET slots survive; POST /pet matches the tag but not the method.
    for item in filtered.paths.values() {
        assert!(item.get.is_some());
        assert!(item.post.is_none());
        assert!(item.put.is_none());
        assert!(item.delete.is_none());
    }
}

#[test]
fn empty_filter_retains_every_path() {
    let spec = petstore();
    let filtered = filter(&spec, &options(&[], &[], &[])).unwrap();

    let original: Vec<&String> = spec.paths.keys().collect();
    let kept: Vec<&String> = filtered.paths.keys().collect();
    assert_eq!(kept, original);

    // All three tags are in use, in input order.
    let tag_names: Vec<&str> = filtered.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(tag_names, ["pet", "store", "user"]);
}

#[test]
fn tag_list_is_used_subset_in_input_order() {
    let spec = petstore();

    let filtered = filter(&spec, &options(&[], &[], &["store"])).unwrap();
    let tag_names: Vec<&str> = filtered.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(tag_names, ["store"]);

    // Path-prefix selection covering pet and user operations keeps both
    // tags, still in input order.
    let filtered = filter(&spec, &options(&["/user", "/pet"], &[], &[])).unwrap();
    let tag_names: Vec<&str> = filtered.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(tag_names, ["pet", "user"]);
}

#[test]
fn path_prefix_retains_whole_path_item() {
    let spec = petstore();
    let filtered = filter(&spec, &options(&["/pet/{petId}"], &[], &[])).unwrap();

    // Both method slots of /pet/{petId} survive under the prefix branch.
    let item = filtered.paths.get("/pet/{petId}").unwrap();
    assert!(item.get.is_some());
    assert!(item.delete.is_some());
    assert!(filtered.paths.contains_key("/pet/{petId}/uploadImage"));
    assert!(!filtered.paths.contains_key("/pet"));
}

#[test]
fn widening_path_prefix_is_monotonic() {
    let spec = petstore();
    let narrow = filter(&spec, &options(&["/store/order"], &[], &[])).unwrap();
    let wide = filter(&spec, &options(&["/store"], &[], &[])).unwrap();

    for path in narrow.paths.keys() {
        assert!(wide.paths.contains_key(path), "lost path {path}");
    }
    let narrow_components = narrow.components.as_ref().unwrap();
    let wide_components = wide.components.as_ref().unwrap();
    for name in narrow_components.schemas.keys() {
        assert!(wide_components.schemas.contains_key(name), "lost schema {name}");
    }
}

#[test]
fn filtering_is_idempotent_under_empty_followup() {
    let spec = petstore();
    let opts = FilterOptions {
        tags: vec!["pet".to_string()],
        prune_components: true,
        ..FilterOptions::default()
    };
    let once = filter(&spec, &opts).unwrap();
    let twice = filter(
        &once,
        &FilterOptions {
            prune_components: true,
            ..FilterOptions::default()
        },
    )
    .unwrap();
    assert_eq!(once, twice);
}

#[test]
fn passenger_component_kinds_are_carried_verbatim() {
    let spec = petstore();
    let filtered = filter(&spec, &options(&[], &[], &["user"])).unwrap();
    let components = filtered.components.as_ref().unwrap();
    assert!(components.security_schemes.contains_key("api_key"));
}

#[test]
fn document_passengers_survive() {
    let spec = petstore();
    let filtered = filter(&spec, &options(&[], &[], &["pet"])).unwrap();
    assert_eq!(filtered.openapi, spec.openapi);
    assert_eq!(filtered.info, spec.info);
    assert_eq!(filtered.servers, spec.servers);
}
