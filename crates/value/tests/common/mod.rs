//! Shared helpers for integration tests
#![allow(dead_code)]

use std::sync::Once;

use proptest::prelude::*;
use strata_value::temporal::{DateTimeValue, DateValue, LocalDateTimeValue, LocalTimeValue, TimeValue};
use strata_value::{
    values, CircleValue, CollectionValue, Crs, DurationValue, GeoValue, LineValue, PointValue, PolygonValue, RectValue,
    Value, ZoneId,
};
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install a test subscriber once; filter with `RUST_LOG`
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub const ZONES: [&str; 5] = ["UTC", "Europe/Stockholm", "America/New_York", "Asia/Kolkata", "Australia/Sydney"];

/// Every numeric width, NaN excluded
pub fn finite_number() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i8>().prop_map(Value::Byte),
        any::<i16>().prop_map(Value::Short),
        any::<i32>().prop_map(Value::Int),
        any::<i64>().prop_map(Value::Long),
        (-1.0e6_f32..1.0e6).prop_map(Value::Float),
        prop::num::f64::NORMAL.prop_map(Value::Double),
        Just(Value::Double(f64::INFINITY)),
    ]
}

/// Small numbers in every width, so that equal pairs across widths are common
pub fn small_number() -> impl Strategy<Value = Value> {
    (-3_i8..=3, 0_u8..6).prop_map(|(n, width)| match width {
        0 => Value::Byte(n),
        1 => Value::Short(i16::from(n)),
        2 => Value::Int(i32::from(n)),
        3 => Value::Long(i64::from(n)),
        4 => Value::Float(f32::from(n)),
        _ => Value::Double(f64::from(n)),
    })
}

pub fn text_or_char() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-c]{0,2}".prop_map(|s| values::string_value(&s)),
        prop::char::range('a', 'c').prop_map(Value::Char),
    ]
}

pub fn zone() -> impl Strategy<Value = ZoneId> {
    prop_oneof![
        prop::sample::select(ZONES.to_vec()).prop_map(|name| ZoneId::region(name).unwrap()),
        (-18 * 4_i32..=18 * 4).prop_map(|quarters| ZoneId::offset_seconds(quarters * 900).unwrap()),
    ]
}

pub fn temporal() -> impl Strategy<Value = Value> {
    const NANOS_PER_DAY: i64 = 86_400_000_000_000;
    let epoch_second = -5_000_000_000_i64..5_000_000_000;
    prop_oneof![
        (-200_000_i64..200_000).prop_map(|d| Value::Date(DateValue::from_epoch_day(d).unwrap())),
        (0..NANOS_PER_DAY).prop_map(|n| Value::LocalTime(LocalTimeValue::from_nano_of_day(n).unwrap())),
        (0..NANOS_PER_DAY, -18 * 3600_i32..=18 * 3600)
            .prop_map(|(n, off)| Value::Time(TimeValue::from_raw(n, off).unwrap())),
        (epoch_second.clone(), 0_u32..1_000_000_000)
            .prop_map(|(s, n)| Value::LocalDateTime(LocalDateTimeValue::from_epoch(s, n).unwrap())),
        (epoch_second, 0_u32..1_000_000_000, zone())
            .prop_map(|(s, n, z)| Value::DateTime(DateTimeValue::from_epoch(s, n, z).unwrap())),
        (-2_000_i64..2_000, -50_000_i64..50_000, -1_000_000_i64..1_000_000, 0_i64..1_000_000_000)
            .prop_map(|(m, d, s, n)| Value::Duration(DurationValue::new(m, d, s, n).unwrap())),
    ]
}

pub fn point() -> impl Strategy<Value = PointValue> {
    prop_oneof![
        (-1.0e3..1.0e3, -1.0e3..1.0e3_f64).prop_map(|(x, y)| PointValue::cartesian(x, y).unwrap()),
        (-180.0..180.0, -90.0..90.0_f64).prop_map(|(x, y)| PointValue::wgs84(x, y).unwrap()),
        (-1.0e3..1.0e3, -1.0e3..1.0e3, -1.0e3..1.0e3_f64)
            .prop_map(|(x, y, z)| PointValue::new(Crs::Cartesian3D, &[x, y, z]).unwrap()),
    ]
}

pub fn array() -> impl Strategy<Value = Value> {
    prop_oneof![
        prop::collection::vec(-3_i32..3, 0..4).prop_map(|v| values::int_array(&v)),
        prop::collection::vec(-3_i64..3, 0..4).prop_map(values::long_array_owned),
        prop::collection::vec(-3.0_f64..3.0, 0..4).prop_map(|v| values::double_array(&v)),
        prop::collection::vec(any::<bool>(), 0..4).prop_map(|v| values::boolean_array(&v)),
        prop::collection::vec("[a-b]{1}", 0..3).prop_map(values::string_array_owned),
        prop::collection::vec(prop::char::range('a', 'b'), 0..3).prop_map(|v| values::char_array(&v)),
        prop::collection::vec(-10_i64..10, 0..3).prop_map(|days| {
            let dates: Vec<_> = days.into_iter().map(|d| DateValue::from_epoch_day(d).unwrap()).collect();
            values::date_array_owned(dates)
        }),
        prop::collection::vec(point(), 0..3).prop_map(values::point_array_owned),
    ]
}

pub const SHAPE_CRS: [Crs; 3] = [Crs::Cartesian, Crs::Wgs84, Crs::Cartesian3D];

pub fn point_in(crs: Crs) -> BoxedStrategy<PointValue> {
    match crs {
        Crs::Wgs84 => (-180.0..180.0, -90.0..90.0_f64)
            .prop_map(|(x, y)| PointValue::wgs84(x, y).unwrap())
            .boxed(),
        Crs::Cartesian3D => (-1.0e3..1.0e3, -1.0e3..1.0e3, -1.0e3..1.0e3_f64)
            .prop_map(|(x, y, z)| PointValue::cartesian_3d(x, y, z).unwrap())
            .boxed(),
        _ => (-1.0e3..1.0e3, -1.0e3..1.0e3_f64)
            .prop_map(|(x, y)| PointValue::cartesian(x, y).unwrap())
            .boxed(),
    }
}

fn corners(crs: Crs, a: &PointValue, b: &PointValue) -> (PointValue, PointValue) {
    let pairs = a.coordinate().iter().zip(b.coordinate());
    let lower: Vec<f64> = pairs.clone().map(|(x, y)| x.min(*y)).collect();
    let upper: Vec<f64> = pairs.map(|(x, y)| x.max(*y)).collect();
    (PointValue::new(crs, &lower).unwrap(), PointValue::new(crs, &upper).unwrap())
}

/// Line, box, polygon or circle, all points in `crs`
pub fn simple_shape_in(crs: Crs) -> BoxedStrategy<GeoValue> {
    prop_oneof![
        (point_in(crs), point_in(crs)).prop_map(|(a, b)| GeoValue::Line(LineValue::new(a, b).unwrap())),
        (point_in(crs), point_in(crs)).prop_map(move |(a, b)| {
            let (lower, upper) = corners(crs, &a, &b);
            GeoValue::Rect(RectValue::new(lower, upper).unwrap())
        }),
        prop::collection::vec(point_in(crs), 3..6)
            .prop_map(|vertices| GeoValue::Polygon(PolygonValue::new(vertices).unwrap())),
        (point_in(crs), 0.0..100.0_f64)
            .prop_map(|(center, radius)| GeoValue::Circle(CircleValue::new(center, radius).unwrap())),
    ]
    .boxed()
}

pub fn shape() -> impl Strategy<Value = Value> {
    prop::sample::select(SHAPE_CRS.to_vec())
        .prop_flat_map(|crs| {
            let member = prop_oneof![point_in(crs).prop_map(GeoValue::Point), simple_shape_in(crs)];
            prop_oneof![
                simple_shape_in(crs),
                prop::collection::vec(member, 0..4)
                    .prop_map(move |shapes| GeoValue::Collection(CollectionValue::new(crs, shapes).unwrap())),
            ]
        })
        .prop_map(Value::Geo)
}

/// NaN as a scalar of either float width or inside a double array
pub fn nan() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Double(f64::NAN)),
        Just(Value::Float(f32::NAN)),
        prop::collection::vec(prop_oneof![Just(f64::NAN), -3.0_f64..3.0], 1..4)
            .prop_map(|v| values::double_array(&v)),
    ]
}

/// Any value without NaN, so that `equals` is reflexive
pub fn comparable_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::NoValue),
        any::<bool>().prop_map(Value::Boolean),
        finite_number(),
        small_number(),
        text_or_char(),
        temporal(),
        point().prop_map(Value::from),
        shape(),
        array(),
    ]
}

/// Every variant, NaN included
pub fn any_value() -> impl Strategy<Value = Value> {
    prop_oneof![9 => comparable_value(), 1 => nan()]
}
