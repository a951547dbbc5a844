use modelfaker_core::{FieldMap, FieldSpec, Model, ModelRegistry, RefTarget};
use serde_json::json;

fn embedded_model(fields: &FieldMap, key: &str) -> Model {
    match fields.get(key) {
        Some(FieldSpec::Reference(reference)) => match &reference.target {
            RefTarget::Model(model) => model.clone(),
            RefTarget::Name(name) => panic!("expected embedded model, found name {name}"),
        },
        other => panic!("expected reference for {key}, found {other:?}"),
    }
}

#[test]
fn clone_is_registered_and_independent() {
    let registry = ModelRegistry::new();
    let user = registry
        .define(
            "user",
            FieldMap::new()
                .field("name", "person.firstName")
                .field("age", FieldSpec::parameterized("number.int", [json!({"min": 18, "max": 65})])),
        )
        .expect("define");

    let copy = registry.clone_model("customer", &user).expect("clone");
    assert!(registry.get("customer").is_some_and(|m| m.ptr_eq(&copy)));
    assert_eq!(
        copy.fields().keys().collect::<Vec<_>>(),
        user.fields().keys().collect::<Vec<_>>()
    );

    copy.with_field("email", "internet.email").exclude_field("name");

    assert_eq!(user.fields().keys().collect::<Vec<_>>(), vec!["name", "age"]);
    assert_eq!(copy.fields().keys().collect::<Vec<_>>(), vec!["age", "email"]);
}

#[test]
fn clone_rejects_taken_name() {
    let registry = ModelRegistry::new();
    let user = registry.define("user", FieldMap::new()).expect("define");
    assert!(registry.clone_model("USER", &user).is_err());
}

#[test]
fn shared_embedded_models_stay_shared_in_copy() {
    let registry = ModelRegistry::new();
    let address = registry
        .define("address", FieldMap::new().field("city", "location.city"))
        .expect("define address");
    let user = registry
        .define(
            "user",
            FieldMap::new()
                .field("home", &address)
                .field("work", FieldSpec::reference(&address).count(2)),
        )
        .expect("define user");

    let copy = registry.clone_model("customer", &user).expect("clone");
    let fields = copy.fields();
    let home = embedded_model(&fields, "home");
    let work = embedded_model(&fields, "work");

    assert!(home.ptr_eq(&work));
    assert!(!home.ptr_eq(&address));

    home.with_field("street", "location.street");
    assert_eq!(address.field_count(), 1);
}

#[test]
fn self_embedding_model_clones_without_recursing_forever() {
    let registry = ModelRegistry::new();
    let node = registry
        .define("node", FieldMap::new().field("label", "lorem.word"))
        .expect("define");
    node.with_field("next", &node);

    let copy = registry.clone_model("node_copy", &node).expect("clone");
    let next = embedded_model(&copy.fields(), "next");

    assert!(next.ptr_eq(&copy));
    assert!(!next.ptr_eq(&node));
}
