use modelfaker_generate::{FakerCapability, GenRng, GeneratorCapability, LocaleKey};
use rand::SeedableRng;
use serde_json::{Value, json};

fn call(capability: &FakerCapability, path: &str, args: &[Value], seed: u64) -> Value {
    let generator = capability
        .resolve_path(path)
        .unwrap_or_else(|| panic!("{path} should resolve"));
    let mut rng = GenRng::seed_from_u64(seed);
    generator(args, &mut rng)
}

#[test]
fn catalog_paths_are_unique_and_resolvable() {
    let paths = FakerCapability::list_paths();
    let mut unique = paths.to_vec();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), paths.len());

    let capability = FakerCapability::default();
    assert_eq!(capability.paths().len(), paths.len());
    assert!(capability.resolve_path("person.unknownMethod").is_none());
}

#[test]
fn every_path_generates_without_arguments() {
    let capability = FakerCapability::new(LocaleKey::EnUs);
    for path in FakerCapability::list_paths() {
        let value = call(&capability, path, &[], 3);
        if path.starts_with("helpers.") {
            assert!(value.is_null(), "{path} without input should be null");
        } else {
            assert!(!value.is_null(), "{path} produced null");
        }
    }
}

#[test]
fn localized_paths_generate_for_every_locale() {
    let paths = [
        "person.firstName",
        "person.lastName",
        "person.fullName",
        "location.city",
        "location.country",
        "company.name",
        "phone.number",
        "lorem.word",
        "internet.email",
    ];
    for locale in LocaleKey::ALL {
        let capability = FakerCapability::new(*locale);
        for path in paths {
            let value = call(&capability, path, &[], 5);
            let text = value.as_str().unwrap_or_else(|| panic!("{locale} {path}"));
            assert!(!text.is_empty(), "{locale} {path} is empty");
        }
    }
}

#[test]
fn array_element_picks_from_input() {
    let capability = FakerCapability::default();
    let input = json!(["a", "b", "c"]);
    for seed in 0..50 {
        let value = call(&capability, "helpers.arrayElement", &[input.clone()], seed);
        assert!(input.as_array().expect("array").contains(&value), "{value}");
    }

    let picked = call(&capability, "helpers.arrayElements", &[input.clone(), json!(2)], 1);
    let picked = picked.as_array().expect("array");
    assert_eq!(picked.len(), 2);
    assert!(picked.iter().all(|value| input.as_array().expect("array").contains(value)));
}

#[test]
fn numeric_ranges_are_respected() {
    let capability = FakerCapability::default();
    for seed in 0..50 {
        let value = call(&capability, "number.int", &[json!({"min": 10, "max": 12})], seed);
        let value = value.as_i64().expect("int");
        assert!((10..=12).contains(&value), "{value}");

        let value = call(&capability, "number.float", &[json!({"min": 1.5, "max": 2.5})], seed);
        let value = value.as_f64().expect("float");
        assert!((1.5..=2.5).contains(&value), "{value}");
    }

    let inverted = call(&capability, "number.int", &[json!({"min": 9, "max": 1})], 1);
    assert!(inverted.as_i64().is_some());
}

#[test]
fn extreme_float_bounds_fall_back_to_defaults() {
    let capability = FakerCapability::default();
    let bounds = [json!({"min": -1.0e308, "max": 1.0e308})];
    for seed in 0..10 {
        let value = call(&capability, "number.float", &bounds, seed);
        let value = value.as_f64().expect("float");
        assert!((0.0..=1.0).contains(&value), "{value}");

        let latitude = call(&capability, "location.latitude", &bounds, seed);
        let latitude = latitude.as_f64().expect("latitude");
        assert!((-90.0..=90.0).contains(&latitude), "{latitude}");
    }

    let huge = call(&capability, "number.float", &[json!({"min": 1.0e307, "max": 1.0e308})], 3);
    let huge = huge.as_f64().expect("huge float");
    assert!((1.0e307..=1.0e308).contains(&huge), "{huge}");
}

#[test]
fn string_generators_honour_length() {
    let capability = FakerCapability::default();
    let alpha = call(&capability, "string.alpha", &[json!({"length": 12})], 1);
    let alpha = alpha.as_str().expect("alpha");
    assert_eq!(alpha.len(), 12);
    assert!(alpha.chars().all(|c| c.is_ascii_alphabetic()));

    let numeric = call(&capability, "string.numeric", &[json!(6)], 1);
    assert!(numeric.as_str().expect("numeric").chars().all(|c| c.is_ascii_digit()));

    let uuid = call(&capability, "string.uuid", &[], 1);
    assert_eq!(uuid.as_str().map(str::len), Some(36));
}

#[test]
fn regex_generator_matches_pattern() {
    let capability = FakerCapability::default();
    for pattern in ["[a-c]{4}", "/[a-c]{4}/"] {
        let value = call(&capability, "helpers.fromRegExp", &[json!(pattern)], 2);
        let text = value.as_str().expect("text");
        assert_eq!(text.len(), 4);
        assert!(text.chars().all(|c| ('a'..='c').contains(&c)), "{text}");
    }
    let invalid = call(&capability, "helpers.fromRegExp", &[json!("(")], 2);
    assert!(invalid.is_null());
}

#[test]
fn dates_are_iso_strings_relative_to_a_fixed_reference() {
    let capability = FakerCapability::default();
    let past = call(&capability, "date.past", &[], 1);
    let past = past.as_str().expect("past");
    assert!(past.ends_with('Z'));
    assert!(&past[..4] <= "2023", "{past}");

    let between = call(
        &capability,
        "date.between",
        &[json!({"from": "2020-01-01", "to": "2020-01-02"})],
        4,
    );
    assert!(between.as_str().expect("between").starts_with("2020-01-0"));
}

#[test]
fn same_seed_same_value() {
    let capability = FakerCapability::new(LocaleKey::PtBr);
    assert_eq!(
        call(&capability, "person.fullName", &[], 77),
        call(&capability, "person.fullName", &[], 77)
    );
}
