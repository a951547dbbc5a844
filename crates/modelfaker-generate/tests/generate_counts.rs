use modelfaker_core::{FieldMap, FieldSpec, ModelError};
use modelfaker_generate::{DataFaker, GenerateOptions};
use serde_json::{Value, json};
use sha2::{Digest, Sha256};

fn faker_with_user() -> DataFaker {
    let faker = DataFaker::new();
    faker
        .define_model(
            "address",
            FieldMap::new()
                .field("country", "location.country")
                .field("city", "location.city"),
        )
        .expect("define address");
    faker
        .define_model(
            "user",
            FieldMap::new()
                .field("name", "person.fullName")
                .field("home", FieldSpec::reference("address").count(2)),
        )
        .expect("define user");
    faker
}

fn digest(value: &Value) -> String {
    let bytes = serde_json::to_vec(value).expect("serialize output");
    hex::encode(Sha256::digest(bytes))
}

#[test]
fn counts_shape_the_result() {
    let faker = DataFaker::new();
    faker
        .define_model(
            "person",
            FieldMap::new()
                .field("first", "person.firstName")
                .field("age", FieldSpec::parameterized("number.int", [json!({"min": 18, "max": 65})])),
        )
        .expect("define");

    let many = faker.generate("person", 4_i64).expect("many");
    assert_eq!(many.as_array().map(Vec::len), Some(4));

    let one = faker.generate("person", 1_i64).expect("one");
    assert!(one.is_object());

    for count in [0_i64, -3] {
        assert_eq!(faker.generate("person", count).expect("none"), Value::Null);
    }
}

#[test]
fn user_with_two_addresses() {
    let faker = faker_with_user();
    let user = faker
        .generate("user", GenerateOptions::new(1).seed(42))
        .expect("generate");

    let record = user.as_object().expect("record");
    assert_eq!(record.keys().collect::<Vec<_>>(), vec!["name", "home"]);
    assert!(record["name"].is_string());

    let homes = record["home"].as_array().expect("home array");
    assert_eq!(homes.len(), 2);
    for home in homes {
        let home = home.as_object().expect("address record");
        assert_eq!(home.keys().collect::<Vec<_>>(), vec!["country", "city"]);
        assert!(home.values().all(Value::is_string));
    }
}

#[test]
fn same_seed_gives_identical_output() {
    let faker = faker_with_user();
    let first = faker
        .generate("user", GenerateOptions::new(5).seed(2024))
        .expect("first");
    let second = faker
        .generate("user", GenerateOptions::new(5).seed(2024))
        .expect("second");
    let other = faker
        .generate("user", GenerateOptions::new(5).seed(2025))
        .expect("other");

    assert_eq!(digest(&first), digest(&second));
    assert_ne!(digest(&first), digest(&other));
}

#[test]
fn names_collide_case_insensitively() {
    let faker = DataFaker::new();
    faker.define_model("User", FieldMap::new()).expect("first");
    let result = faker.define_model("user", FieldMap::new());
    assert!(matches!(result, Err(ModelError::Duplicate(_))));
}

#[test]
fn missing_and_empty_models_produce_null() {
    let faker = DataFaker::new();
    faker.define_model("empty", FieldMap::new()).expect("define");

    assert_eq!(faker.generate("missing", 1_i64).expect("missing"), Value::Null);
    assert_eq!(faker.generate("empty", 1_i64).expect("empty"), Value::Null);
}

#[test]
fn unresolved_generator_paths_yield_explicit_null() {
    let faker = DataFaker::new();
    faker
        .define_model(
            "thing",
            FieldMap::new()
                .field("known", "lorem.word")
                .field("unknown", "nope.nothing")
                .field("malformed", "nodot"),
        )
        .expect("define");

    let thing = faker.generate("thing", 1_i64).expect("generate");
    assert!(thing["known"].is_string());
    assert_eq!(thing.get("unknown"), Some(&Value::Null));
    assert_eq!(thing.get("malformed"), Some(&Value::Null));
}

#[test]
fn parameters_are_forwarded() {
    let faker = DataFaker::new();
    faker
        .define_model(
            "pick",
            FieldMap::new()
                .field("fixed", FieldSpec::parameterized("number.int", [json!({"min": 5, "max": 5})]))
                .field(
                    "color",
                    FieldSpec::parameterized("helpers.arrayElement", [json!(["red", "green", "blue"])]),
                ),
        )
        .expect("define");

    let picks = faker
        .generate("pick", GenerateOptions::new(30).seed(9))
        .expect("generate");
    for pick in picks.as_array().expect("array") {
        assert_eq!(pick["fixed"], json!(5));
        let color = pick["color"].as_str().expect("color");
        assert!(["red", "green", "blue"].contains(&color), "{color}");
    }
}

#[test]
fn extreme_float_parameters_still_generate() {
    let faker = DataFaker::new();
    faker
        .define_models_json(&json!({
            "models": {
                "m": {"f": ["number.float", {"min": -1.0e308, "max": 1.0e308}]}
            }
        }))
        .expect("define");

    let record = faker
        .generate("m", GenerateOptions::new(1).seed(1))
        .expect("generate");
    let value = record["f"].as_f64().expect("float value");
    assert!((0.0..=1.0).contains(&value), "{value}");
}

#[test]
fn models_load_from_json_documents() {
    let faker = DataFaker::new();
    faker
        .define_models_json(&json!({
            "models": {
                "user": {
                    "name": "person.firstName",
                    "home": {"refModel": "address", "count": 2}
                },
                "address": {"city": "location.city"}
            }
        }))
        .expect("define");

    let user = faker.generate("user", 1_i64).expect("generate");
    assert_eq!(user["home"].as_array().map(Vec::len), Some(2));
}

#[test]
fn run_reports_the_call() {
    let faker = faker_with_user();
    let result = faker
        .run("user", GenerateOptions::new(3).seed(11).locale("pt_BR"))
        .expect("run");

    assert_eq!(result.report.model, "user");
    assert_eq!(result.report.count_requested, 3);
    assert_eq!(result.report.records_generated, 3);
    assert_eq!(result.report.seed, 11);
    assert_eq!(result.report.locale.as_deref(), Some("pt_BR"));
}
