use serde_json::{Map, Value};

/// Lenient view over generator call arguments.
///
/// Generators follow faker conventions: the first argument is either an
/// options object (`{min, max}`, `{length}`) or a bare value. Anything that
/// does not parse falls back to the generator's default.
#[derive(Debug, Clone, Copy)]
pub struct Params<'a> {
    args: &'a [Value],
}

impl<'a> Params<'a> {
    pub fn new(args: &'a [Value]) -> Self {
        Self { args }
    }

    pub fn arg(&self, index: usize) -> Option<&'a Value> {
        self.args.get(index)
    }

    pub fn options(&self) -> Option<&'a Map<String, Value>> {
        self.args.first().and_then(Value::as_object)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.options()
            .and_then(|map| map.get(key))
            .and_then(Value::as_i64)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.options()
            .and_then(|map| map.get(key))
            .and_then(Value::as_f64)
    }

    pub fn get_str(&self, key: &str) -> Option<&'a str> {
        self.options()
            .and_then(|map| map.get(key))
            .and_then(Value::as_str)
    }

    /// `{key: n}` or a bare non-negative integer as the first argument.
    pub fn size(&self, key: &str) -> Option<usize> {
        let value = self.get_i64(key).or_else(|| self.arg(0).and_then(Value::as_i64))?;
        usize::try_from(value).ok()
    }

    /// Inclusive integer range from `{min, max}` or a bare `max`.
    pub fn int_range(&self, default_min: i64, default_max: i64) -> (i64, i64) {
        let bare_max = self.arg(0).and_then(Value::as_i64);
        let min = self.get_i64("min").unwrap_or(default_min);
        let max = self.get_i64("max").or(bare_max).unwrap_or(default_max);
        if min > max {
            (default_min, default_max)
        } else {
            (min, max)
        }
    }

    /// Inclusive float range; the width `max - min` must itself be finite.
    pub fn float_range(&self, default_min: f64, default_max: f64) -> (f64, f64) {
        let min = self.get_f64("min").unwrap_or(default_min);
        let max = self.get_f64("max").unwrap_or(default_max);
        if min.is_finite() && max.is_finite() && min <= max && (max - min).is_finite() {
            (min, max)
        } else {
            (default_min, default_max)
        }
    }

    /// Array argument at `index`.
    pub fn array(&self, index: usize) -> Option<&'a Vec<Value>> {
        self.arg(index).and_then(Value::as_array)
    }
}
