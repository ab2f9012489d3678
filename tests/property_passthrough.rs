mod common;

use common::recording_adapter;
use logbridge::adapters::EmissionKind;
use logbridge::domain::models::{LogMessage, MessageSeverity};
use logbridge::domain::ports::Logger;
use proptest::prelude::*;
use serde_json::Value;

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        ".{0,16}".prop_map(Value::from),
    ]
}

fn mapped_severity() -> impl Strategy<Value = (MessageSeverity, EmissionKind)> {
    prop_oneof![
        Just((MessageSeverity::Debug, EmissionKind::Debug)),
        Just((MessageSeverity::Informational, EmissionKind::Info)),
        Just((MessageSeverity::Warning, EmissionKind::Warn)),
        Just((MessageSeverity::Error, EmissionKind::Error)),
    ]
}

proptest! {
    /// Property: mapped severities produce exactly one call with the
    /// format and values untouched
    #[test]
    fn prop_mapped_severity_passes_through(
        (severity, kind) in mapped_severity(),
        format in ".{0,64}",
        values in prop::collection::vec(value_strategy(), 0..6),
    ) {
        let (engine, adapter) = recording_adapter("prop");
        let message = LogMessage::new(severity, format.clone()).with_values(values.clone());

        prop_assert!(adapter.log(&message).is_ok());

        let emissions = engine.emissions();
        prop_assert_eq!(emissions.len(), 1);
        prop_assert_eq!(emissions[0].kind, kind);
        prop_assert_eq!(&emissions[0].format, &format);
        prop_assert_eq!(&emissions[0].values, &values);
    }

    /// Property: any code outside the four known severities is dropped
    #[test]
    fn prop_unmapped_code_never_emits(
        code in any::<i32>().prop_filter("known severity code", |c| !(0..=3).contains(c)),
        format in ".{0,32}",
    ) {
        let (engine, adapter) = recording_adapter("prop");
        let severity = MessageSeverity::from(code);

        prop_assert!(!severity.is_mapped());
        prop_assert!(adapter.log(&LogMessage::new(severity, format)).is_ok());
        prop_assert_eq!(engine.count(), 0);
    }

    /// Property: severity codes survive conversion
    #[test]
    fn prop_severity_code_round_trips(code in any::<i32>()) {
        prop_assert_eq!(MessageSeverity::from(code).code(), code);
    }
}
