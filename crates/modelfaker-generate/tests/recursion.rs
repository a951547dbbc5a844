use modelfaker_core::{FieldMap, FieldSpec};
use modelfaker_generate::{DataFaker, FakerConfig, GenerateOptions};
use modelfaker_rules::RuleTree;
use serde_json::Value;

fn node_faker(config: FakerConfig) -> DataFaker {
    let faker = DataFaker::with_config(config);
    faker
        .define_model(
            "node",
            FieldMap::new()
                .field("label", "lorem.word")
                .field("child", FieldSpec::reference("node")),
        )
        .expect("define node");
    faker
}

/// Number of nested `child` objects below the root record.
fn chain_length(value: &Value) -> usize {
    let mut length = 0;
    let mut current = value;
    while let Some(next) = current.get("child") {
        assert!(next.is_object(), "child must be an object, got {next}");
        length += 1;
        current = next;
    }
    length
}

#[test]
fn self_reference_stops_at_cycle_guard() {
    let faker = node_faker(FakerConfig::default());
    let node = faker.generate("node", 1_i64).expect("generate");

    assert!(node["child"]["child"].is_object());
    assert!(node["child"]["child"].get("child").is_none());
    assert_eq!(chain_length(&node), 2);
}

#[test]
fn cycle_guard_is_configurable() {
    let faker = node_faker(FakerConfig {
        cycle_guard: 3,
        ..FakerConfig::default()
    });
    let node = faker.generate("node", 1_i64).expect("generate");
    assert_eq!(chain_length(&node), 4);
}

#[test]
fn deep_override_caps_reentries() {
    let faker = node_faker(FakerConfig::default());

    let one = faker
        .generate(
            "node",
            GenerateOptions::new(1).rules(RuleTree::new().field("child", RuleTree::new().deep(1))),
        )
        .expect("deep 1");
    assert!(one["child"]["child"].is_object());
    assert!(one["child"]["child"].get("child").is_none());

    let three = faker
        .generate(
            "node",
            GenerateOptions::new(1).rules(RuleTree::new().field("child", [1_i64, 3])),
        )
        .expect("deep 3");
    assert_eq!(chain_length(&three), 4);
}

#[test]
fn mutual_references_terminate() {
    let faker = DataFaker::new();
    faker
        .define_model(
            "member",
            FieldMap::new()
                .field("name", "person.firstName")
                .field("team", FieldSpec::reference("team")),
        )
        .expect("define member");
    faker
        .define_model(
            "team",
            FieldMap::new()
                .field("title", "company.name")
                .field("lead", FieldSpec::reference("member")),
        )
        .expect("define team");

    let member = faker.generate("member", 1_i64).expect("generate");
    let inner_team = &member["team"]["lead"]["team"];
    assert!(inner_team.is_object());
    assert!(inner_team.get("lead").is_none());
}

#[test]
fn zero_count_leaves_field_out() {
    let faker = DataFaker::new();
    faker
        .define_model("pet", FieldMap::new().field("name", "person.firstName"))
        .expect("define pet");
    let owner = faker
        .define_model(
            "owner",
            FieldMap::new()
                .field("name", "person.firstName")
                .field("pets", FieldSpec::reference("pet").count(3))
                .field("none", FieldSpec::reference("pet").count(0)),
        )
        .expect("define owner");

    let record = faker.generate(&owner, 1_i64).expect("generate");
    assert_eq!(record["pets"].as_array().map(Vec::len), Some(3));
    assert!(record.get("none").is_none());

    let overridden = faker
        .generate(&owner, GenerateOptions::new(1).rules(RuleTree::new().field("pets", 0_i64)))
        .expect("override");
    assert!(overridden.get("pets").is_none());

    let single = faker
        .generate(&owner, GenerateOptions::new(1).rules(RuleTree::new().field("pets", 1_i64)))
        .expect("single");
    assert!(single["pets"].is_object());
}

#[test]
fn all_null_arrays_are_omitted() {
    let faker = DataFaker::new();
    faker
        .define_model("pet", FieldMap::new().field("name", "person.firstName"))
        .expect("define pet");
    faker
        .define_model(
            "owner",
            FieldMap::new()
                .field("pets", FieldSpec::reference("pet").count(2))
                .field("empty", FieldSpec::reference("nothing_here")),
        )
        .expect("define owner");

    let record = faker
        .generate("owner", GenerateOptions::new(1).rules(RuleTree::new().field("pets", [2_i64, -1])))
        .expect("generate");
    assert!(record.get("pets").is_none());
    assert!(record.get("empty").is_none());
}

#[test]
fn nested_rules_follow_the_output_tree() {
    let faker = DataFaker::new();
    faker
        .define_model("tag", FieldMap::new().field("label", "lorem.word"))
        .expect("define tag");
    faker
        .define_model(
            "post",
            FieldMap::new()
                .field("title", "lorem.sentence")
                .field("tags", FieldSpec::reference("tag")),
        )
        .expect("define post");
    faker
        .define_model(
            "author",
            FieldMap::new()
                .field("name", "person.fullName")
                .field("posts", FieldSpec::reference("post")),
        )
        .expect("define author");

    let rules = RuleTree::new().field("posts", RuleTree::new().count(2).field("tags", 3_i64));
    let author = faker
        .generate("author", GenerateOptions::new(1).rules(rules))
        .expect("generate");

    let posts = author["posts"].as_array().expect("posts");
    assert_eq!(posts.len(), 2);
    for post in posts {
        assert_eq!(post["tags"].as_array().map(Vec::len), Some(3));
    }
}

#[test]
fn malformed_rules_fail_the_call() {
    let faker = node_faker(FakerConfig::default());
    let result = faker.generate(
        "node",
        GenerateOptions::new(1).rules(RuleTree::new().field("child", vec![1_i64, 2, 3])),
    );
    assert!(result.is_err());
}
