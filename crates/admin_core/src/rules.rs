//! Building blocks for per-field rules. Each check returns the message to show
//! or `None` when the value passes.

pub(crate) const REQUIRED: &str = "Required";

pub(crate) fn required(raw: &str) -> Option<String> {
    raw.is_empty().then(|| REQUIRED.to_string())
}

pub(crate) fn max_chars(raw: &str, max: usize, message: &str) -> Option<String> {
    (raw.chars().count() > max).then(|| message.to_string())
}

pub(crate) fn min_chars(raw: &str, min: usize, message: &str) -> Option<String> {
    (raw.chars().count() < min).then(|| message.to_string())
}

/// Parses numeric input the way a number field reports it. Blank, NaN and
/// infinite input are not numbers.
pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Accepts any number without a fractional part, so `"3.0"` is `3`. The
/// magnitude is left for range checks.
pub(crate) fn parse_integer(raw: &str) -> Option<f64> {
    parse_number(raw).filter(|value| value.fract() == 0.0)
}

pub(crate) struct Range<'a> {
    pub min: f64,
    pub max: f64,
    pub below_min: &'a str,
    pub above_max: &'a str,
}

impl Range<'_> {
    pub(crate) fn check(&self, value: f64) -> Option<String> {
        if value < self.min {
            Some(self.below_min.to_string())
        } else if value > self.max {
            Some(self.above_max.to_string())
        } else {
            None
        }
    }
}
