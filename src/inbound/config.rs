//! Adapter configuration and per-adapter price policies.

use serde_json::{Number, Value};

use crate::codec::{Projection, Slot};

/// Settings for the legacy XML document built by the classic adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassicConfig {
    /// Prefix of the lead link; the lead id is appended verbatim.
    pub lead_url_base: String,
    /// System identifier written into the DOCTYPE.
    pub dtd_url: String,
}

impl Default for ClassicConfig {
    fn default() -> Self {
        Self {
            lead_url_base: "https://app.leadconduit.com/leads?id=".to_string(),
            dtd_url: "https://app.leadconduit.com/dtd/response-v2-basic.dtd".to_string(),
        }
    }
}

/// How an adapter recognises a failed outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMatch {
    /// `outcome` must be exactly `"failure"`.
    Exact,
    /// `outcome` matches `"failure"` ignoring ASCII case, e.g. `"Failure"`.
    IgnoreCase,
}

/// What an adapter reports when no price is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingPrice {
    /// Leave the price absent.
    Absent,
    /// Report a price of `0`.
    Zero,
    /// On a failed outcome, always write the refund, even when the field
    /// list did not ask for a price. With no price to refund it is `null`.
    NegateUnconditionally,
}

/// Price handling for one adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricePolicy {
    pub failure_match: FailureMatch,
    pub missing: MissingPrice,
}

impl PricePolicy {
    pub const FEEDBACK: PricePolicy = PricePolicy {
        failure_match: FailureMatch::Exact,
        missing: MissingPrice::NegateUnconditionally,
    };

    pub const VERBOSE: PricePolicy = PricePolicy {
        failure_match: FailureMatch::Exact,
        missing: MissingPrice::Zero,
    };

    pub const CLASSIC: PricePolicy = PricePolicy {
        failure_match: FailureMatch::IgnoreCase,
        missing: MissingPrice::Absent,
    };

    pub fn is_failure(&self, outcome: Option<&Value>) -> bool {
        let Some(Value::String(outcome)) = outcome else {
            return false;
        };
        match self.failure_match {
            FailureMatch::Exact => outcome == "failure",
            FailureMatch::IgnoreCase => outcome.eq_ignore_ascii_case("failure"),
        }
    }

    /// The price to report. A failed outcome turns the price into a refund.
    pub fn resolve(&self, outcome: Option<&Value>, price: Option<&Value>) -> Option<Value> {
        let failed = self.is_failure(outcome);
        let price = match (price, self.missing) {
            (Some(price), _) => Some(price.clone()),
            (None, MissingPrice::Zero) => Some(Value::from(0)),
            (None, MissingPrice::NegateUnconditionally) if failed => Some(Value::Null),
            (None, _) => None,
        };
        if failed {
            price.map(|price| refund(&price))
        } else {
            price
        }
    }

    /// Rewrite the projected `price` field.
    ///
    /// Only touches a price the field list asked for, except under
    /// [`MissingPrice::NegateUnconditionally`], where a failed outcome
    /// appends the refund regardless.
    pub fn apply(&self, projection: &mut Projection) {
        let forced = self.missing == MissingPrice::NegateUnconditionally
            && self.is_failure(projection.value("outcome"));
        if !projection.contains("price") && !forced {
            return;
        }
        let resolved = self.resolve(projection.value("outcome"), projection.value("price"));
        projection.set("price", resolved.map_or(Slot::Missing, Slot::Value));
    }
}

/// Negative absolute value of a price. Numeric strings are parsed first;
/// anything that is not a number becomes `null`.
pub fn refund(price: &Value) -> Value {
    match price {
        Value::Number(n) => refund_number(n),
        Value::String(s) => s.trim().parse::<f64>().map_or(Value::Null, refund_f64),
        Value::Bool(b) => refund_f64(if *b { 1.0 } else { 0.0 }),
        _ => Value::Null,
    }
}

fn refund_number(n: &Number) -> Value {
    if let Some(i) = n.as_i64() {
        return i.checked_abs().map_or_else(|| refund_f64(i as f64), |abs| Value::from(-abs));
    }
    if let Some(u) = n.as_u64() {
        return i64::try_from(u).map_or_else(|_| refund_f64(u as f64), |v| Value::from(-v));
    }
    n.as_f64().map_or(Value::Null, refund_f64)
}

fn refund_f64(f: f64) -> Value {
    let negated = -f.abs();
    if negated.fract() == 0.0 && negated.abs() < 9.0e15 {
        return Value::from(negated as i64);
    }
    Number::from_f64(negated).map_or(Value::Null, Value::Number)
}
