use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use fake::Fake;
use fake::faker::address::raw::{
    BuildingNumber, CityName, CountryCode, CountryName, SecondaryAddress, StateAbbr, StateName,
    StreetName, TimeZone, ZipCode,
};
use fake::faker::company::raw::{
    Bs, BsAdj, BsNoun, BsVerb, CatchPhrase, CompanyName, CompanySuffix, Industry, Profession,
};
use fake::faker::internet::raw::{
    DomainSuffix, FreeEmail, IPv4, IPv6, MACAddress, Password, SafeEmail, UserAgent, Username,
};
use fake::faker::job::raw::{
    Field as JobField, Position as JobPosition, Seniority as JobSeniority, Title as JobTitle,
};
use fake::faker::lorem::raw::{Paragraph, Paragraphs, Sentence, Sentences, Word, Words};
use fake::faker::name::raw::{FirstName, LastName, Name, Suffix, Title};
use fake::faker::phone_number::raw::{CellNumber, PhoneNumber};
use fake::locales::{EN, FR_FR, JA_JP, PT_BR, ZH_CN};
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand_regex::Regex as RandRegex;
use serde_json::Value;
use tracing::warn;

use crate::capability::GenRng;
use crate::faker_rs::locales::LocaleKey;
use crate::params::Params;

/// Every generator path the faker catalog answers.
pub const PATHS: &[&str] = &[
    "person.firstName",
    "person.lastName",
    "person.fullName",
    "person.prefix",
    "person.suffix",
    "person.sex",
    "person.jobTitle",
    "person.jobArea",
    "person.jobType",
    "person.jobDescriptor",
    "internet.email",
    "internet.exampleEmail",
    "internet.userName",
    "internet.username",
    "internet.password",
    "internet.domainSuffix",
    "internet.domainName",
    "internet.url",
    "internet.ip",
    "internet.ipv4",
    "internet.ipv6",
    "internet.mac",
    "internet.userAgent",
    "location.city",
    "location.country",
    "location.countryCode",
    "location.state",
    "location.stateAbbr",
    "location.street",
    "location.streetAddress",
    "location.buildingNumber",
    "location.zipCode",
    "location.secondaryAddress",
    "location.timeZone",
    "location.latitude",
    "location.longitude",
    "company.name",
    "company.suffix",
    "company.catchPhrase",
    "company.buzzPhrase",
    "company.buzzNoun",
    "company.buzzVerb",
    "company.buzzAdjective",
    "company.industry",
    "company.profession",
    "phone.number",
    "phone.cell",
    "lorem.word",
    "lorem.words",
    "lorem.slug",
    "lorem.sentence",
    "lorem.sentences",
    "lorem.paragraph",
    "lorem.paragraphs",
    "number.int",
    "number.float",
    "datatype.number",
    "datatype.boolean",
    "string.uuid",
    "string.alpha",
    "string.alphanumeric",
    "string.numeric",
    "date.past",
    "date.future",
    "date.recent",
    "date.soon",
    "date.between",
    "date.birthdate",
    "helpers.arrayElement",
    "helpers.arrayElements",
    "helpers.shuffle",
    "helpers.fromRegExp",
];

const DEFAULT_INT_MAX: i64 = 99_999;
const DEFAULT_PASSWORD_LEN: usize = 15;
const DEFAULT_WORD_COUNT: usize = 3;
const DEFAULT_SENTENCE_COUNT: usize = 3;
const MAX_TEXT_LEN: usize = 4096;
const MAX_REPEAT: u32 = 32;
const ALPHA: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const NUMERIC: &[u8] = b"0123456789";
const SECONDS_PER_DAY: i64 = 86_400;

macro_rules! localized {
    ($locale:expr, $rng:expr, $out:ty, $faker:ident $(, $arg:expr)*) => {
        match $locale {
            LocaleKey::EnUs => $faker(EN $(, $arg)*).fake_with_rng::<$out, _>(&mut *$rng),
            LocaleKey::PtBr => $faker(PT_BR $(, $arg)*).fake_with_rng::<$out, _>(&mut *$rng),
            LocaleKey::FrFr => $faker(FR_FR $(, $arg)*).fake_with_rng::<$out, _>(&mut *$rng),
            LocaleKey::ZhCn => $faker(ZH_CN $(, $arg)*).fake_with_rng::<$out, _>(&mut *$rng),
            LocaleKey::JaJp => $faker(JA_JP $(, $arg)*).fake_with_rng::<$out, _>(&mut *$rng),
        }
    };
}

pub fn contains(path: &str) -> bool {
    PATHS.contains(&path)
}

/// Generate one value for `path`; `None` when the path is not in the catalog.
pub fn generate_value(
    path: &str,
    locale: LocaleKey,
    args: &[Value],
    rng: &mut GenRng,
) -> Option<Value> {
    let params = Params::new(args);
    let value = match path {
        "person.firstName" => text(localized!(locale, rng, String, FirstName)),
        "person.lastName" => text(localized!(locale, rng, String, LastName)),
        "person.fullName" => text(localized!(locale, rng, String, Name)),
        "person.prefix" => text(localized!(locale, rng, String, Title)),
        "person.suffix" => text(localized!(locale, rng, String, Suffix)),
        "person.sex" => pick_str(&["female", "male"], rng),
        "person.jobTitle" => text(localized!(locale, rng, String, JobTitle)),
        "person.jobArea" => text(localized!(locale, rng, String, JobField)),
        "person.jobType" => text(localized!(locale, rng, String, JobPosition)),
        "person.jobDescriptor" => text(localized!(locale, rng, String, JobSeniority)),

        "internet.email" => text(localized!(locale, rng, String, FreeEmail)),
        "internet.exampleEmail" => text(localized!(locale, rng, String, SafeEmail)),
        "internet.userName" | "internet.username" => {
            text(localized!(locale, rng, String, Username))
        }
        "internet.password" => {
            let len = params
                .size("length")
                .unwrap_or(DEFAULT_PASSWORD_LEN)
                .clamp(1, MAX_TEXT_LEN);
            text(localized!(locale, rng, String, Password, len..len + 1))
        }
        "internet.domainSuffix" => text(localized!(locale, rng, String, DomainSuffix)),
        "internet.domainName" => text(domain_name(locale, rng)),
        "internet.url" => text(format!("https://{}", domain_name(locale, rng))),
        "internet.ip" | "internet.ipv4" => text(localized!(locale, rng, String, IPv4)),
        "internet.ipv6" => text(localized!(locale, rng, String, IPv6)),
        "internet.mac" => text(localized!(locale, rng, String, MACAddress)),
        "internet.userAgent" => text(localized!(locale, rng, String, UserAgent)),

        "location.city" => text(localized!(locale, rng, String, CityName)),
        "location.country" => text(localized!(locale, rng, String, CountryName)),
        "location.countryCode" => text(localized!(locale, rng, String, CountryCode)),
        "location.state" => text(localized!(locale, rng, String, StateName)),
        "location.stateAbbr" => text(localized!(locale, rng, String, StateAbbr)),
        "location.street" => text(localized!(locale, rng, String, StreetName)),
        "location.streetAddress" => {
            let number = localized!(locale, rng, String, BuildingNumber);
            let street = localized!(locale, rng, String, StreetName);
            text(format!("{number} {street}"))
        }
        "location.buildingNumber" => text(localized!(locale, rng, String, BuildingNumber)),
        "location.zipCode" => text(localized!(locale, rng, String, ZipCode)),
        "location.secondaryAddress" => text(localized!(locale, rng, String, SecondaryAddress)),
        "location.timeZone" => text(localized!(locale, rng, String, TimeZone)),
        "location.latitude" => coordinate(&params, -90.0, 90.0, rng),
        "location.longitude" => coordinate(&params, -180.0, 180.0, rng),

        "company.name" => text(localized!(locale, rng, String, CompanyName)),
        "company.suffix" => text(localized!(locale, rng, String, CompanySuffix)),
        "company.catchPhrase" => text(localized!(locale, rng, String, CatchPhrase)),
        "company.buzzPhrase" => text(localized!(locale, rng, String, Bs)),
        "company.buzzNoun" => text(localized!(locale, rng, String, BsNoun)),
        "company.buzzVerb" => text(localized!(locale, rng, String, BsVerb)),
        "company.buzzAdjective" => text(localized!(locale, rng, String, BsAdj)),
        "company.industry" => text(localized!(locale, rng, String, Industry)),
        "company.profession" => text(localized!(locale, rng, String, Profession)),

        "phone.number" => text(localized!(locale, rng, String, PhoneNumber)),
        "phone.cell" => text(localized!(locale, rng, String, CellNumber)),

        "lorem.word" => text(localized!(locale, rng, String, Word)),
        "lorem.words" => {
            let count = word_count(&params, "wordCount");
            text(localized!(locale, rng, Vec<String>, Words, count..count + 1).join(" "))
        }
        "lorem.slug" => {
            let count = word_count(&params, "wordCount");
            text(localized!(locale, rng, Vec<String>, Words, count..count + 1).join("-"))
        }
        "lorem.sentence" => {
            let count = word_count(&params, "wordCount");
            text(localized!(locale, rng, String, Sentence, count..count + 1))
        }
        "lorem.sentences" => {
            let count = sentence_count(&params, "sentenceCount");
            text(localized!(locale, rng, Vec<String>, Sentences, count..count + 1).join(" "))
        }
        "lorem.paragraph" => {
            let count = sentence_count(&params, "sentenceCount");
            text(localized!(locale, rng, String, Paragraph, count..count + 1))
        }
        "lorem.paragraphs" => {
            let count = sentence_count(&params, "paragraphCount");
            text(localized!(locale, rng, Vec<String>, Paragraphs, count..count + 1).join("\n"))
        }

        "number.int" | "datatype.number" => {
            let (min, max) = params.int_range(0, DEFAULT_INT_MAX);
            Value::from(rng.random_range(min..=max))
        }
        "number.float" => {
            let (min, max) = params.float_range(0.0, 1.0);
            let digits = params
                .get_i64("fractionDigits")
                .and_then(|digits| i32::try_from(digits.clamp(0, 10)).ok())
                .unwrap_or(2);
            float(round_to(rng.random_range(min..=max), digits))
        }
        "datatype.boolean" => {
            let probability = params.get_f64("probability").unwrap_or(0.5);
            let probability = if (0.0..=1.0).contains(&probability) {
                probability
            } else {
                0.5
            };
            Value::Bool(rng.random_bool(probability))
        }

        "string.uuid" => text(random_uuid(rng)),
        "string.alpha" => text(sample_chars(ALPHA, &params, rng)),
        "string.alphanumeric" => text(sample_chars(ALPHANUMERIC, &params, rng)),
        "string.numeric" => text(sample_chars(NUMERIC, &params, rng)),

        "date.past" => {
            let span = params.get_i64("years").unwrap_or(1).clamp(1, 1000) * 365 * SECONDS_PER_DAY;
            timestamp(reference_time() - Duration::seconds(rng.random_range(1..=span)))
        }
        "date.future" => {
            let span = params.get_i64("years").unwrap_or(1).clamp(1, 1000) * 365 * SECONDS_PER_DAY;
            timestamp(reference_time() + Duration::seconds(rng.random_range(1..=span)))
        }
        "date.recent" => {
            let span = params.get_i64("days").unwrap_or(1).clamp(1, 365_000) * SECONDS_PER_DAY;
            timestamp(reference_time() - Duration::seconds(rng.random_range(1..=span)))
        }
        "date.soon" => {
            let span = params.get_i64("days").unwrap_or(1).clamp(1, 365_000) * SECONDS_PER_DAY;
            timestamp(reference_time() + Duration::seconds(rng.random_range(1..=span)))
        }
        "date.between" => {
            let reference = reference_time();
            let (from, to) = match (
                params.get_str("from").and_then(parse_time),
                params.get_str("to").and_then(parse_time),
            ) {
                (Some(from), Some(to)) if from <= to => (from, to),
                _ => (reference - Duration::days(365), reference),
            };
            let span = (to - from).num_seconds();
            timestamp(from + Duration::seconds(rng.random_range(0..=span)))
        }
        "date.birthdate" => {
            let (min_age, max_age) = {
                let min = params.get_i64("min").unwrap_or(18).clamp(0, 200);
                let max = params.get_i64("max").unwrap_or(80).clamp(0, 200);
                if min <= max { (min, max) } else { (18, 80) }
            };
            let age = rng.random_range(min_age..=max_age);
            let extra_days = rng.random_range(0..365);
            timestamp(reference_time() - Duration::days(age * 365 + extra_days))
        }

        "helpers.arrayElement" => params
            .array(0)
            .and_then(|values| values.choose(rng).cloned())
            .unwrap_or(Value::Null),
        "helpers.arrayElements" => match params.array(0) {
            Some(values) if !values.is_empty() => {
                let count = params
                    .arg(1)
                    .and_then(Value::as_u64)
                    .and_then(|count| usize::try_from(count).ok())
                    .unwrap_or_else(|| rng.random_range(1..=values.len()))
                    .min(values.len());
                Value::Array(values.choose_multiple(rng, count).cloned().collect())
            }
            Some(_) => Value::Array(Vec::new()),
            None => Value::Null,
        },
        "helpers.shuffle" => match params.array(0) {
            Some(values) => {
                let mut values = values.clone();
                values.shuffle(rng);
                Value::Array(values)
            }
            None => Value::Null,
        },
        "helpers.fromRegExp" => params
            .arg(0)
            .and_then(Value::as_str)
            .map_or(Value::Null, |pattern| from_regex(pattern, rng)),

        _ => return None,
    };
    Some(value)
}

fn text(value: String) -> Value {
    Value::String(value)
}

fn float(value: f64) -> Value {
    serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number)
}

fn pick_str(values: &[&str], rng: &mut GenRng) -> Value {
    values
        .choose(rng)
        .map_or(Value::Null, |value| Value::from(*value))
}

fn word_count(params: &Params<'_>, key: &str) -> usize {
    params
        .size(key)
        .unwrap_or(DEFAULT_WORD_COUNT)
        .clamp(1, MAX_TEXT_LEN)
}

fn sentence_count(params: &Params<'_>, key: &str) -> usize {
    params
        .size(key)
        .unwrap_or(DEFAULT_SENTENCE_COUNT)
        .clamp(1, MAX_TEXT_LEN)
}

fn domain_name(locale: LocaleKey, rng: &mut GenRng) -> String {
    // CJK words make poor hostnames.
    let word: String = Word(EN).fake_with_rng(&mut *rng);
    let suffix = localized!(locale, rng, String, DomainSuffix);
    format!("{}.{suffix}", word.to_lowercase())
}

fn coordinate(params: &Params<'_>, default_min: f64, default_max: f64, rng: &mut GenRng) -> Value {
    let (min, max) = params.float_range(default_min, default_max);
    float(round_to(rng.random_range(min..=max), 4))
}

fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10_f64.powi(digits);
    let scaled = value * factor;
    if scaled.is_finite() {
        scaled.round() / factor
    } else {
        value
    }
}

fn random_uuid(rng: &mut GenRng) -> String {
    let mut bytes = [0_u8; 16];
    rng.fill(&mut bytes);
    uuid::Builder::from_random_bytes(bytes)
        .into_uuid()
        .to_string()
}

fn sample_chars(charset: &[u8], params: &Params<'_>, rng: &mut GenRng) -> String {
    let len = params.size("length").unwrap_or(1).min(MAX_TEXT_LEN);
    (0..len)
        .map(|_| charset[rng.random_range(0..charset.len())] as char)
        .collect()
}

fn from_regex(pattern: &str, rng: &mut GenRng) -> Value {
    let pattern = pattern
        .strip_prefix('/')
        .and_then(|inner| inner.strip_suffix('/'))
        .unwrap_or(pattern);
    match RandRegex::compile(pattern, MAX_REPEAT) {
        Ok(regex) => Value::String(rng.sample::<String, _>(&regex)),
        Err(err) => {
            warn!(pattern, error = %err, "invalid regex pattern");
            Value::Null
        }
    }
}

/// Fixed reference instant so relative dates are reproducible for a seed.
fn reference_time() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
        .and_utc()
}

fn timestamp(value: DateTime<Utc>) -> Value {
    Value::String(value.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn parse_time(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(parsed.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date| date.and_utc())
}
