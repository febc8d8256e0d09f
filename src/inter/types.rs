use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

/// Reads a monetary JSON value the way it was sent.
///
/// - integers stay integral (`150` renders as `150`)
/// - floats keep at least one fractional digit (`150.00` renders as `150.0`)
/// - numeric strings keep their own scale (`"150.00"` renders as `150.00`)
///
/// Anything else, including values that do not fit a `Decimal`, reads as zero.
pub fn lenient_amount(value: Option<&Value>) -> Decimal {
    let amount = match value {
        Some(Value::Number(n)) if n.is_f64() => n.as_f64().and_then(float_amount),
        Some(Value::Number(n)) => Decimal::from_str(&n.to_string()).ok(),
        Some(Value::String(s)) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    };

    amount.unwrap_or_default()
}

fn float_amount(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }

    let mut amount = Decimal::from_str(&value.to_string()).ok()?;
    if amount.scale() == 0 {
        amount.rescale(1);
    }
    Some(amount)
}

/// Text fields: strings as-is, null or missing as empty, other scalars as their JSON text.
pub fn lenient_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(150.00), "150.0")]
    #[case(json!(150.5), "150.5")]
    #[case(json!(12.34), "12.34")]
    #[case(json!(0.1), "0.1")]
    #[case(json!(0.0), "0.0")]
    #[case(json!(150), "150")]
    #[case(json!(-20), "-20")]
    #[case(json!("150.00"), "150.00")]
    #[case(json!(" 99.9 "), "99.9")]
    #[case(json!("-7.25"), "-7.25")]
    fn test_lenient_amount(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(lenient_amount(Some(&value)).to_string(), expected);
    }

    #[rstest]
    #[case(json!("abc"))]
    #[case(json!("1.000,00"))]
    #[case(json!(""))]
    #[case(json!(true))]
    #[case(json!(null))]
    #[case(json!([1, 2]))]
    #[case(json!({"valor": 1}))]
    #[case(json!(1e40))]
    fn test_lenient_amount_degrades_to_zero(#[case] value: Value) {
        assert_eq!(lenient_amount(Some(&value)), Decimal::ZERO);
    }

    #[test]
    fn test_lenient_amount_missing() {
        assert_eq!(lenient_amount(None).to_string(), "0");
    }

    #[rstest]
    #[case(None, "")]
    #[case(Some(json!(null)), "")]
    #[case(Some(json!("Pix enviado")), "Pix enviado")]
    #[case(Some(json!("")), "")]
    #[case(Some(json!(42)), "42")]
    #[case(Some(json!(true)), "true")]
    fn test_lenient_text(#[case] value: Option<Value>, #[case] expected: &str) {
        assert_eq!(lenient_text(value.as_ref()), expected);
    }
}
