//! Integration test: Cross-module interactions
//!
//! Values from different modules meeting in the comparator, in hash sets and
//! in arithmetic

use std::collections::HashSet;

use pretty_assertions::assert_eq;
use strata_value::prelude::*;
use strata_value::{HashableValue, ObjectValue, ValueCategory};

use crate::common::init_tracing;

#[test]
fn test_hash_set_deduplicates_across_widths() {
    let mut set = HashSet::new();
    for value in [
        values::byte_value(3),
        values::int_value(3),
        values::long_value(3),
        values::double_value(3.0),
        values::char_value('x'),
        values::string_value("x"),
        values::int_array(&[1, 2]),
        values::double_array(&[1.0, 2.0]),
    ] {
        set.insert(HashableValue::new(value));
    }
    assert_eq!(set.len(), 3);
}

#[test]
fn test_mixed_sort_follows_category_table() {
    init_tracing();
    let mut mixed = vec![
        values::no_value(),
        values::long_value(1),
        values::boolean_value(true),
        values::string_value("b"),
        values::duration(0, 0, 60, 0).unwrap(),
        values::date(2000, 1, 1).unwrap(),
        values::point_value(Crs::Wgs84, &[0.0, 0.0]).unwrap(),
        values::int_array(&[1]),
        values::double_value(0.5),
        values::char_value('a'),
    ];
    mixed.sort_by(ValueComparator::compare);

    let categories: Vec<ValueCategory> = mixed.iter().map(Value::category).collect();
    let mut sorted = categories.clone();
    sorted.sort();
    assert_eq!(categories, sorted);

    let numbers: Vec<&Value> = mixed.iter().filter(|v| v.is_number()).collect();
    assert_eq!(numbers, vec![&values::double_value(0.5), &values::long_value(1)]);
    assert_eq!(mixed.last(), Some(&values::no_value()));
}

#[test]
fn test_ternary_distinguishes_false_from_incomparable() {
    let one = values::int_value(1);
    let two = values::double_value(2.0);
    assert_eq!(one.ternary_compare(&two), Comparison::Less);
    assert_eq!(one.ternary_compare(&values::string_value("1")), Comparison::Undefined);
    assert_eq!(one.ternary_equals(&values::string_value("1")), Some(false));
    assert_eq!(one.ternary_equals(&values::no_value()), None);

    let minute = values::duration(0, 0, 60, 0).unwrap();
    let hour = values::duration(0, 0, 3600, 0).unwrap();
    assert_eq!(minute.ternary_compare(&hour), Comparison::Undefined);
    assert_eq!(minute.ternary_compare(&minute.clone()), Comparison::Equal);
}

#[test]
fn test_arithmetic_chain() -> ValueResult<()> {
    let total = values::int_value(20)
        .plus(&values::byte_value(22))?
        .times(&values::short_value(2))?
        .minus_long(4)?;
    assert_eq!(total, Value::Long(80));
    assert_eq!(total.divide_double(0.5)?, Value::Double(160.0));

    let err = total.divide(&values::int_value(0)).unwrap_err();
    assert!(err.is_invalid_argument());
    assert_eq!(total.divide_double(0.0)?, Value::Double(f64::INFINITY));

    let greeting = values::string_value("graph").plus(&values::string_value("db"))?;
    assert_eq!(greeting.as_text(), Some("graphdb"));
    Ok(())
}

#[test]
fn test_object_view_and_conversions() {
    let value = Value::from(vec![1.5_f64, 2.5]);
    match value.as_object() {
        ObjectValue::Doubles(slice) => assert_eq!(&slice[..], &[1.5, 2.5]),
        other => panic!("unexpected {other:?}"),
    }

    assert_eq!(Value::from(Some("x")), values::char_value('x'));
    assert_eq!(i64::try_from(&Value::from(7_u32)).unwrap(), 7);
    assert!(Value::try_from(u64::MAX).is_err());
}

#[test]
fn test_array_element_access() {
    let array = values::string_array(&["a", "bc"]);
    let elements = array.as_array().unwrap();
    assert_eq!(elements.len(), 2);
    assert_eq!(elements.value(1).unwrap(), values::string_value("bc"));
    assert!(elements.value(2).unwrap_err().is_invalid_argument());
    assert_eq!(array.to_string(), "['a', 'bc']");
}
