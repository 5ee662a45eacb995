//! Decoder behavior: leniency, declared counts, error taxonomy, and
//! partial-update merging.

use serde::Deserialize;
use toon_codec::{decode, from_str, Error, RecordMap, Value};

#[derive(Deserialize, Debug, PartialEq)]
struct Point {
    x: i32,
    y: i32,
}

#[test]
fn unknown_keys_are_skipped() {
    let point: Point = from_str("x : 1\nextra : ignored\ny : 2\n").unwrap();
    assert_eq!(point, Point { x: 1, y: 2 });
}

#[test]
fn lines_without_a_colon_are_skipped() {
    let point: Point = from_str("a stray line\nx : 1\ny : 2\n").unwrap();
    assert_eq!(point, Point { x: 1, y: 2 });
}

#[test]
fn blank_lines_are_skipped() {
    let point: Point = from_str("\nx : 1\n\n\ny : 2\n").unwrap();
    assert_eq!(point, Point { x: 1, y: 2 });
}

#[test]
fn block_list_skips_junk_without_counting_it() {
    #[derive(Deserialize, Debug, PartialEq)]
    struct Doc {
        items: Vec<i32>,
    }
    let doc: Doc = from_str("items[3]:\n  - 1\nnot an element\n  - 2\n  - 3\n").unwrap();
    assert_eq!(doc.items, vec![1, 2, 3]);
}

#[test]
fn malformed_count_is_header_format() {
    let result: Result<Value, _> = from_str("key[abc]: 1\n");
    assert!(matches!(result, Err(Error::HeaderFormat { line: 1, .. })));
}

#[test]
fn inline_count_mismatch_is_header_format() {
    let result: Result<Value, _> = from_str("nums[2]: 1,2,3\n");
    assert!(matches!(result, Err(Error::HeaderFormat { .. })));
}

#[test]
fn truncated_block_list_is_unexpected_eof() {
    let result: Result<Value, _> = from_str("items[3]:\n  - 1\n");
    assert!(matches!(result, Err(Error::UnexpectedEof { .. })));
}

#[test]
fn truncated_tabular_is_unexpected_eof() {
    let result: Result<Value, _> = from_str("team[2]{name}:\n  Alice\n");
    assert!(matches!(result, Err(Error::UnexpectedEof { .. })));
}

#[test]
fn digit_bearing_garbage_is_number_format() {
    let result: Result<Value, _> = from_str("v : 12abc\n");
    assert!(matches!(result, Err(Error::NumberFormat { line: 1, .. })));
}

#[test]
fn wrong_kind_in_a_typed_slot_is_type_mismatch() {
    let result: Result<Point, _> = from_str("x : hello\ny : 2\n");
    assert!(matches!(result, Err(Error::TypeMismatch { .. })));
}

#[test]
fn non_record_destination_is_invalid_destination() {
    assert!(matches!(
        from_str::<i32>("x : 1\n"),
        Err(Error::InvalidDestination(_))
    ));
    assert!(matches!(
        from_str::<String>("x : 1\n"),
        Err(Error::InvalidDestination(_))
    ));
    assert!(matches!(
        from_str::<Vec<i32>>("x : 1\n"),
        Err(Error::InvalidDestination(_))
    ));
}

#[test]
fn missing_required_field_fails() {
    let result: Result<Point, _> = from_str("x : 1\n");
    assert!(result.is_err());
}

#[test]
fn runaway_nesting_is_depth_limit() {
    let mut text = String::new();
    for i in 0..80 {
        for _ in 0..i {
            text.push_str("  ");
        }
        text.push_str("k :\n");
    }
    let result: Result<Value, _> = from_str(&text);
    assert!(matches!(result, Err(Error::DepthLimit(_))));
}

#[test]
fn tabular_missing_cells_fill_with_null() {
    #[derive(Deserialize, Debug, PartialEq)]
    struct Member {
        name: String,
        age: Option<i32>,
    }
    #[derive(Deserialize, Debug, PartialEq)]
    struct Doc {
        team: Vec<Member>,
    }

    let doc: Doc = from_str("team[2]{name,age}:\n  Alice,30\n  Bob\n").unwrap();
    assert_eq!(doc.team[0].age, Some(30));
    assert_eq!(doc.team[1].age, None);
}

#[test]
fn tabular_extra_cells_are_dropped() {
    let value: Value = from_str("team[1]{name}:\n  Alice,30,extra\n").unwrap();
    let team = value.as_record().unwrap().get("team").unwrap();
    let row = team.as_list().unwrap()[0].as_record().unwrap();
    assert_eq!(row.len(), 1);
    assert_eq!(row.get("name"), Some(&Value::String("Alice".to_string())));
}

#[test]
fn tabular_pipe_separator() {
    let value: Value = from_str("rows[2|]{left|right}:\n  a|b\n  c|d\n").unwrap();
    let rows = value.as_record().unwrap().get("rows").unwrap();
    let first = rows.as_list().unwrap()[0].as_record().unwrap();
    assert_eq!(first.get("left"), Some(&Value::String("a".to_string())));
    assert_eq!(first.get("right"), Some(&Value::String("b".to_string())));
}

#[test]
fn tabular_tab_separator() {
    let value: Value = from_str("rows[2\t]{left\tright}:\n  a\tb\n  c\td\n").unwrap();
    let rows = value.as_record().unwrap().get("rows").unwrap();
    let first = rows.as_list().unwrap()[0].as_record().unwrap();
    assert_eq!(first.get("left"), Some(&Value::String("a".to_string())));
    assert_eq!(first.get("right"), Some(&Value::String("b".to_string())));
    let second = rows.as_list().unwrap()[1].as_record().unwrap();
    assert_eq!(second.get("left"), Some(&Value::String("c".to_string())));
}

#[test]
fn record_elements_under_dashes_fail_to_decode() {
    // The encoder writes record elements as `- key : value` lines, but the
    // block-list reader takes each dash tail as one scalar token, so a
    // digit-bearing tail fails number classification.
    let result: Result<Value, _> = from_str("points[1]:\n  - x : 1\n    y : 2\n");
    assert!(matches!(result, Err(Error::NumberFormat { .. })));
}

#[test]
fn quoted_numeral_stays_a_string() {
    #[derive(Deserialize, Debug, PartialEq)]
    struct Doc {
        s: String,
    }
    let doc: Doc = from_str("s : \"123\"\n").unwrap();
    assert_eq!(doc.s, "123");
}

#[test]
fn quoted_comma_is_one_scalar() {
    let value: Value = from_str("v : \"a,b\"\n").unwrap();
    assert_eq!(
        value.as_record().unwrap().get("v"),
        Some(&Value::String("a,b".to_string()))
    );
}

#[test]
fn empty_array_header_accepted() {
    let value: Value = from_str("tags[0]: \n").unwrap();
    assert_eq!(
        value.as_record().unwrap().get("tags"),
        Some(&Value::List(vec![]))
    );
}

#[test]
fn partial_update_merges_records() {
    let mut config = RecordMap::new();
    decode("server :\n  host : localhost\n  port : 80\n", &mut config).unwrap();
    decode("server :\n  port : 8080\nlog : debug\n", &mut config).unwrap();

    let server = config.get("server").unwrap().as_record().unwrap();
    assert_eq!(
        server.get("host"),
        Some(&Value::String("localhost".to_string()))
    );
    assert_eq!(server.get("port"), Some(&Value::Int(8080)));
    assert_eq!(config.get("log"), Some(&Value::String("debug".to_string())));
}

#[test]
fn partial_update_replaces_scalars_in_place() {
    let mut config = RecordMap::new();
    decode("a : 1\nb : 2\n", &mut config).unwrap();
    decode("a : 10\n", &mut config).unwrap();

    let keys: Vec<_> = config.keys().cloned().collect();
    assert_eq!(keys, vec!["a", "b"]);
    assert_eq!(config.get("a"), Some(&Value::Int(10)));
}

#[test]
fn failed_decode_keeps_earlier_merges() {
    let mut dest = RecordMap::new();
    let result = decode("good : 1\nbad : 12xy\n", &mut dest);
    assert!(result.is_err());
    assert_eq!(dest.get("good"), Some(&Value::Int(1)));
}

#[test]
fn key_suffix_is_stripped_on_arrays() {
    let value: Value = from_str("nums[2]: 1,2\n").unwrap();
    let map = value.as_record().unwrap();
    assert!(map.contains_key("nums"));
    assert!(!map.contains_key("nums[2]"));
}

#[test]
fn value_in_an_open_slot_accepts_any_kind() {
    #[derive(Deserialize, Debug, PartialEq)]
    struct Doc {
        payload: Value,
    }

    let as_int: Doc = from_str("payload : 5\n").unwrap();
    assert_eq!(as_int.payload, Value::Int(5));

    let as_record: Doc = from_str("payload :\n  a : 1\n").unwrap();
    assert!(as_record.payload.is_record());

    let as_list: Doc = from_str("payload[2]: 1,2\n").unwrap();
    assert_eq!(
        as_list.payload,
        Value::List(vec![Value::Int(1), Value::Int(2)])
    );
}
