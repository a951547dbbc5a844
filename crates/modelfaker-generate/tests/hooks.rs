use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use modelfaker_core::{FieldKind, FieldMap, FieldSpec};
use modelfaker_generate::{DataFaker, GenerateOptions, GenerationError, HookSet, HookStage};
use serde_json::{Value, json};

fn faker() -> DataFaker {
    let faker = DataFaker::new();
    faker
        .define_model("address", FieldMap::new().field("city", "location.city"))
        .expect("define address");
    faker
        .define_model(
            "user",
            FieldMap::new()
                .field("name", "person.firstName")
                .field("home", FieldSpec::reference("address")),
        )
        .expect("define user");
    faker
}

#[test]
fn before_all_rewrites_a_snapshot_only() {
    let faker = faker();
    let hooks = HookSet::new().before_all(|schema| {
        let mut schema = schema.clone();
        schema.insert("nickname", "internet.userName");
        Ok(Some(schema))
    });

    let user = faker
        .generate("user", GenerateOptions::new(1).hooks(hooks))
        .expect("generate");
    assert!(user["nickname"].is_string());

    let registered = faker.lookup_model("user").expect("registered");
    assert!(!registered.fields().contains_key("nickname"));
}

#[test]
fn whole_call_hooks_run_once() {
    let faker = faker();
    let before = Arc::new(AtomicUsize::new(0));
    let after = Arc::new(AtomicUsize::new(0));
    let (before_seen, after_seen) = (Arc::clone(&before), Arc::clone(&after));
    let hooks = HookSet::new()
        .before_all(move |_| {
            before_seen.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        })
        .after_all(move |_| {
            after_seen.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        });

    let users = faker
        .generate("user", GenerateOptions::new(3).hooks(hooks))
        .expect("generate");
    assert_eq!(users.as_array().map(Vec::len), Some(3));
    assert_eq!(before.load(Ordering::SeqCst), 1);
    assert_eq!(after.load(Ordering::SeqCst), 1);
}

#[test]
fn before_each_can_rename_and_replace_fields() {
    let faker = faker();
    let hooks = HookSet::new().before_each(|ctx| {
        if ctx.key != "name" {
            return Ok(None);
        }
        let mut ctx = ctx.clone();
        ctx.key = "first_name".to_string();
        ctx.schema = FieldSpec::parameterized("helpers.arrayElement", [json!(["Ada"])]);
        Ok(Some(ctx))
    });

    let user = faker
        .generate("user", GenerateOptions::new(1).hooks(hooks))
        .expect("generate");
    let keys: Vec<&String> = user.as_object().expect("record").keys().collect();
    assert_eq!(keys, vec!["first_name", "home"]);
    assert_eq!(user["first_name"], json!("Ada"));
}

#[test]
fn after_each_sees_kind_owner_and_siblings() {
    let faker = faker();
    let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    let hooks = HookSet::new().after_each(move |ctx| {
        let siblings: Vec<String> = ctx.result.keys().cloned().collect();
        log.lock()
            .expect("lock")
            .push((ctx.belong_to.to_string(), ctx.key.clone(), ctx.kind, siblings));
        if ctx.kind == FieldKind::String {
            let mut ctx = ctx.clone();
            ctx.value = json!("masked");
            return Ok(Some(ctx));
        }
        Ok(None)
    });

    let user = faker
        .generate("user", GenerateOptions::new(1).hooks(hooks))
        .expect("generate");
    assert_eq!(user, json!({"name": "masked", "home": {"city": "masked"}}));

    let seen = seen.lock().expect("lock");
    assert_eq!(
        *seen,
        vec![
            ("user".to_string(), "name".to_string(), FieldKind::String, vec![]),
            ("address".to_string(), "city".to_string(), FieldKind::String, vec![]),
            (
                "user".to_string(),
                "home".to_string(),
                FieldKind::Object,
                vec!["name".to_string()]
            ),
        ]
    );
}

#[test]
fn global_hooks_run_before_runtime_hooks() {
    let faker = faker();
    faker.set_hooks(HookSet::new().after_all(|_| Ok(Some(json!(["global"])))));

    let runtime = HookSet::new().after_all(|value| {
        let mut items = value.as_array().cloned().unwrap_or_default();
        items.push(json!("runtime"));
        Ok(Some(Value::Array(items)))
    });

    let result = faker
        .generate("user", GenerateOptions::new(1).hooks(runtime))
        .expect("generate");
    assert_eq!(result, json!(["global", "runtime"]));
}

#[test]
fn hook_errors_abort_generation() {
    let faker = faker();
    let hooks = HookSet::new().before_each(|ctx| {
        if ctx.key == "home" {
            Err("refused".into())
        } else {
            Ok(None)
        }
    });

    let err = faker
        .generate("user", GenerateOptions::new(1).hooks(hooks))
        .expect_err("should fail");
    assert!(matches!(
        err,
        GenerationError::Hook {
            stage: HookStage::BeforeEach,
            ..
        }
    ));
}

#[test]
fn huge_counts_fail_on_the_first_record_without_preallocating() {
    let faker = faker();
    let seen = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&seen);
    let hooks = HookSet::new().before_each(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Err("stop".into())
    });

    let err = faker
        .generate("user", GenerateOptions::new(i64::MAX).hooks(hooks))
        .expect_err("should fail");
    assert!(matches!(err, GenerationError::Hook { .. }));
    assert_eq!(seen.load(Ordering::SeqCst), 1);
}
