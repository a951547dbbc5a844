use std::env;
use std::path::PathBuf;

use modelfaker_generate::{DataFaker, GenerateOptions};
use modelfaker_rules::rules_from_str;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = env::args().skip(1);
    let mut models_path: Option<PathBuf> = None;
    let mut rules_path: Option<PathBuf> = None;
    let mut model: Option<String> = None;
    let mut count = 1_i64;
    let mut seed: Option<u64> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--models" => models_path = args.next().map(PathBuf::from),
            "--rules" => rules_path = args.next().map(PathBuf::from),
            "--model" => model = args.next(),
            "--count" => count = args.next().ok_or("missing --count value")?.parse()?,
            "--seed" => seed = Some(args.next().ok_or("missing --seed value")?.parse()?),
            _ => return Err(format!("unexpected argument: {arg}").into()),
        }
    }

    let models_path = models_path.ok_or("missing --models path")?;
    let model = model.ok_or("missing --model name")?;

    let faker = DataFaker::new();
    let document: Value = serde_json::from_str(&std::fs::read_to_string(models_path)?)?;
    faker.define_models_json(&document)?;

    let mut options = GenerateOptions::new(count);
    if let Some(path) = rules_path {
        options = options.rules(rules_from_str(&std::fs::read_to_string(path)?)?);
    }
    if let Some(seed) = seed {
        options = options.seed(seed);
    }

    let value = faker.generate(model.as_str(), options)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
