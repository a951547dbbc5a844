use modelfaker_generate::{FakerCapability, LocaleKey};

fn main() {
    let locales: Vec<&str> = LocaleKey::ALL.iter().map(|locale| locale.as_str()).collect();
    eprintln!("locales: {}", locales.join(", "));
    for path in FakerCapability::list_paths() {
        println!("{path}");
    }
}
