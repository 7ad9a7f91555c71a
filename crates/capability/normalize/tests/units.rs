use dish_normalize::{megabits, to_megabits};
use serde_json::json;

#[test]
fn converts_and_rounds_to_three_decimals() {
    assert_eq!(megabits(123_456_789.0), 123.457);
    assert_eq!(megabits(1_000_000.0), 1.0);
    assert_eq!(megabits(0.0), 0.0);
    assert_eq!(megabits(999.0), 0.001);
    assert_eq!(megabits(499.0), 0.0);
    assert_eq!(megabits(45_678_912_345.0), 45_678.912);
}

#[test]
fn half_rounds_away_from_zero() {
    assert_eq!(megabits(1_500.0), 0.002);
    assert_eq!(megabits(2_500.0), 0.003);
    assert_eq!(megabits(-1_500.0), -0.002);
}

#[test]
fn missing_or_non_numeric_is_zero() {
    assert_eq!(to_megabits(None), 0.0);
    assert_eq!(to_megabits(Some(&json!(null))), 0.0);
    assert_eq!(to_megabits(Some(&json!("fast"))), 0.0);
    assert_eq!(to_megabits(Some(&json!({ "bps": 1 }))), 0.0);
    assert_eq!(megabits(f64::NAN), 0.0);
    assert_eq!(megabits(f64::INFINITY), 0.0);
}

#[test]
fn numeric_strings_are_coerced() {
    assert_eq!(to_megabits(Some(&json!("123456789"))), 123.457);
    assert_eq!(to_megabits(Some(&json!(" 2000000 "))), 2.0);
}
