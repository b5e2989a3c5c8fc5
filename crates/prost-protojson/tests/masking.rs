mod common;

use std::sync::Arc;

use common::encode_generated_with;
use pretty_assertions::assert_eq;
use prost_protojson::MarshalOptions;
use prost_protojson_test_types::{BasicTypes, MapFields, OptionalFields, RepeatedFields};
use prost_reflect::Kind;

fn mask_by_name(name: &'static str) -> MarshalOptions {
    MarshalOptions {
        field_mask_func: Some(Arc::new(move |fd| fd.name() == name)),
        ..MarshalOptions::default()
    }
}

#[test]
fn masks_string_fields_by_name() {
    let msg = BasicTypes {
        string_field: "sensitive-data".to_string(),
        int32_field: 42,
        ..BasicTypes::default()
    };
    assert_eq!(
        encode_generated_with(&msg, "protojson.test.BasicTypes", mask_by_name("string_field")),
        r#"{"stringField":"***","int32Field":42}"#
    );
}

#[test]
fn masks_bytes_fields_by_name() {
    let msg = BasicTypes {
        string_field: "normal-data".to_string(),
        bytes_field: b"secret-bytes".to_vec(),
        ..BasicTypes::default()
    };
    assert_eq!(
        encode_generated_with(&msg, "protojson.test.BasicTypes", mask_by_name("bytes_field")),
        r#"{"stringField":"normal-data","bytesField":"***"}"#
    );
}

#[test]
fn masks_by_name_pattern() {
    let msg = BasicTypes {
        string_field: "password123".to_string(),
        int32_field: 42,
        ..BasicTypes::default()
    };
    let options = MarshalOptions {
        field_mask_func: Some(Arc::new(|fd| fd.name().contains("string"))),
        ..MarshalOptions::default()
    };
    assert_eq!(
        encode_generated_with(&msg, "protojson.test.BasicTypes", options),
        r#"{"stringField":"***","int32Field":42}"#
    );
}

#[test]
fn no_masking_without_a_predicate_or_when_it_declines() {
    let msg = BasicTypes {
        string_field: "normal-data".to_string(),
        int32_field: 42,
        ..BasicTypes::default()
    };
    let expected = r#"{"stringField":"normal-data","int32Field":42}"#;

    assert_eq!(
        encode_generated_with(&msg, "protojson.test.BasicTypes", MarshalOptions::default()),
        expected
    );

    let declining = MarshalOptions {
        field_mask_func: Some(Arc::new(|_| false)),
        ..MarshalOptions::default()
    };
    assert_eq!(
        encode_generated_with(&msg, "protojson.test.BasicTypes", declining),
        expected
    );
}

#[test]
fn masks_multiple_fields_at_once() {
    let msg = BasicTypes {
        string_field: "secret1".to_string(),
        int32_field: 42,
        bytes_field: b"secret2".to_vec(),
        ..BasicTypes::default()
    };
    let options = MarshalOptions {
        field_mask_func: Some(Arc::new(|fd| {
            fd.name() == "string_field" || fd.name() == "bytes_field"
        })),
        ..MarshalOptions::default()
    };
    assert_eq!(
        encode_generated_with(&msg, "protojson.test.BasicTypes", options),
        r#"{"stringField":"***","int32Field":42,"bytesField":"***"}"#
    );
}

#[test]
fn masking_ignores_non_string_non_bytes_kinds() {
    let msg = BasicTypes {
        string_field: "normal".to_string(),
        int32_field: 42,
        bool_field: true,
        ..BasicTypes::default()
    };
    assert_eq!(
        encode_generated_with(&msg, "protojson.test.BasicTypes", mask_by_name("int32_field")),
        r#"{"stringField":"normal","int32Field":42,"boolField":true}"#
    );
}

#[test]
fn masks_by_kind() {
    let msg = BasicTypes {
        string_field: "secret".to_string(),
        int32_field: 42,
        bytes_field: b"data".to_vec(),
        ..BasicTypes::default()
    };

    let string_kind = MarshalOptions {
        field_mask_func: Some(Arc::new(|fd| matches!(fd.kind(), Kind::String))),
        ..MarshalOptions::default()
    };
    assert_eq!(
        encode_generated_with(&msg, "protojson.test.BasicTypes", string_kind),
        r#"{"stringField":"***","int32Field":42,"bytesField":"ZGF0YQ=="}"#
    );

    let bytes_kind = MarshalOptions {
        field_mask_func: Some(Arc::new(|fd| matches!(fd.kind(), Kind::Bytes))),
        ..MarshalOptions::default()
    };
    assert_eq!(
        encode_generated_with(&msg, "protojson.test.BasicTypes", bytes_kind),
        r#"{"stringField":"secret","int32Field":42,"bytesField":"***"}"#
    );

    let both = MarshalOptions {
        field_mask_func: Some(Arc::new(|fd| {
            matches!(fd.kind(), Kind::String | Kind::Bytes)
        })),
        ..MarshalOptions::default()
    };
    assert_eq!(
        encode_generated_with(&msg, "protojson.test.BasicTypes", both),
        r#"{"stringField":"***","int32Field":42,"bytesField":"***"}"#
    );
}

#[test]
fn masks_optional_fields_only_when_present() {
    let set = OptionalFields {
        optional_string: Some("secret".to_string()),
        optional_int32: Some(42),
        optional_bool: None,
    };
    assert_eq!(
        encode_generated_with(
            &set,
            "protojson.test.OptionalFields",
            mask_by_name("optional_string")
        ),
        r#"{"optionalString":"***","optionalInt32":42}"#
    );

    let unset = OptionalFields {
        optional_string: None,
        optional_int32: Some(42),
        optional_bool: None,
    };
    assert_eq!(
        encode_generated_with(
            &unset,
            "protojson.test.OptionalFields",
            mask_by_name("optional_string")
        ),
        r#"{"optionalInt32":42}"#
    );
}

#[test]
fn masking_applies_to_emitted_defaults_under_emit_unpopulated() {
    let options = MarshalOptions {
        emit_unpopulated: true,
        field_mask_func: Some(Arc::new(|fd| fd.name() == "string_field")),
        ..MarshalOptions::default()
    };
    assert_eq!(
        encode_generated_with(&BasicTypes::default(), "protojson.test.BasicTypes", options),
        concat!(
            r#"{"stringField":"***","int32Field":0,"int64Field":"0","uint32Field":0,"uint64Field":"0","#,
            r#""sint32Field":0,"sint64Field":"0","fixed32Field":0,"fixed64Field":"0","#,
            r#""sfixed32Field":0,"sfixed64Field":"0","boolField":false,"floatField":0,"#,
            r#""doubleField":0,"bytesField":""}"#
        )
    );
}

#[test]
fn masking_covers_list_elements_and_map_values_but_not_keys() {
    let repeated = RepeatedFields {
        strings: vec!["s1".to_string(), "s2".to_string(), "s3".to_string()],
        numbers: vec![7],
        ..RepeatedFields::default()
    };
    assert_eq!(
        encode_generated_with(
            &repeated,
            "protojson.test.RepeatedFields",
            mask_by_name("strings")
        ),
        r#"{"strings":["***","***","***"],"numbers":[7]}"#
    );

    // Map values route through the entry's synthetic `value` descriptor, so
    // a kind-based mask reaches them while keys stay untouched.
    let map = MapFields {
        string_map: [("plain-key".to_string(), "hidden".to_string())]
            .into_iter()
            .collect(),
        ..MapFields::default()
    };
    let string_kind = MarshalOptions {
        field_mask_func: Some(Arc::new(|fd| matches!(fd.kind(), Kind::String))),
        ..MarshalOptions::default()
    };
    assert_eq!(
        encode_generated_with(&map, "protojson.test.MapFields", string_kind),
        r#"{"stringMap":{"plain-key":"***"}}"#
    );
}
