//! Property-based tests for the writer sinks

mod common;

use common::{any_value, comparable_value, init_tracing};
use std::cmp::Ordering;

use proptest::prelude::*;
use strata_value::writer::{rebuild, BinaryReader, BinaryWriter, DiscardingWriter, RecordingWriter};
use strata_value::{Value, ValueComparator, ValueJsonExt, ValueLimits};

/// Identity that also holds for NaN, which `equals` rejects
fn assert_same(actual: &Value, expected: &Value) -> Result<(), TestCaseError> {
    prop_assert_eq!(ValueComparator::compare(actual, expected), Ordering::Equal, "{} vs {}", actual, expected);
    prop_assert_eq!(actual.type_name(), expected.type_name());
    prop_assert_eq!(actual.hash_code(), expected.hash_code());
    prop_assert_eq!(actual.hash64(), expected.hash64());
    Ok(())
}

proptest! {
    #[test]
    fn recording_rebuilds_identical_value(v in any_value()) {
        let mut recorder = RecordingWriter::new();
        v.write_to(&mut recorder).unwrap();
        let rebuilt = rebuild(recorder.events()).unwrap();
        assert_same(&rebuilt, &v)?;
    }

    #[test]
    fn binary_round_trip(v in any_value()) {
        init_tracing();
        let bytes = BinaryWriter::encode(&v).unwrap();
        let decoded = BinaryReader::new(ValueLimits::strict()).read(&bytes).unwrap();
        assert_same(&decoded, &v)?;
    }

    #[test]
    fn binary_truncation_never_panics(v in any_value(), cut in any::<prop::sample::Index>()) {
        let bytes = BinaryWriter::encode(&v).unwrap();
        let end = cut.index(bytes.len());
        prop_assert!(BinaryReader::default().read(&bytes[..end]).is_err());
    }

    #[test]
    fn every_value_writes_balanced(v in any_value()) {
        let mut writer = DiscardingWriter::new();
        v.write_to(&mut writer).unwrap();
        prop_assert!(writer.is_balanced());
    }

    #[test]
    fn every_value_renders_json(v in any_value()) {
        prop_assert!(v.to_json().is_ok());
    }

    #[test]
    fn equal_values_survive_round_trips(v in comparable_value()) {
        let bytes = BinaryWriter::encode(&v).unwrap();
        prop_assert_eq!(&BinaryReader::default().read(&bytes).unwrap(), &v);
        let mut recorder = RecordingWriter::new();
        v.write_to(&mut recorder).unwrap();
        prop_assert_eq!(&recorder.rebuild().unwrap(), &v);
    }
}
