use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use toon_codec::{from_str, to_string, to_value, toon, Value};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct User {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Product {
    sku: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Order {
    order_id: u32,
    customer: User,
    items: Vec<Product>,
    total: f64,
}

#[test]
fn simple_struct() {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        active: true,
        tags: vec!["admin".to_string(), "developer".to_string()],
    };
    let text = to_string(&user).unwrap();
    let back: User = from_str(&text).unwrap();
    assert_eq!(user, back);
}

#[test]
fn nested_struct_with_tabular_items() {
    let order = Order {
        order_id: 12345,
        customer: User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["vip".to_string()],
        },
        items: vec![
            Product {
                sku: "WIDGET-001".to_string(),
                price: 29.99,
                quantity: 2,
            },
            Product {
                sku: "GADGET-042".to_string(),
                price: 14.5,
                quantity: 1,
            },
        ],
        total: 74.48,
    };
    let text = to_string(&order).unwrap();
    assert!(text.contains("items[2]{sku,price,quantity}:"), "got: {text}");
    let back: Order = from_str(&text).unwrap();
    assert_eq!(order, back);
}

#[test]
fn optional_fields() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Settings {
        retries: Option<u32>,
        label: Option<String>,
    }

    let all = Settings {
        retries: Some(3),
        label: Some("primary".to_string()),
    };
    let none = Settings {
        retries: None,
        label: None,
    };

    for settings in [all, none] {
        let text = to_string(&settings).unwrap();
        let back: Settings = from_str(&text).unwrap();
        assert_eq!(settings, back);
    }
}

#[test]
fn omitted_option_defaults_to_none() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Settings {
        id: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    }

    let settings = Settings {
        id: 7,
        label: None,
    };
    let text = to_string(&settings).unwrap();
    assert_eq!(text, "id : 7\n");
    let back: Settings = from_str(&text).unwrap();
    assert_eq!(settings, back);
}

#[test]
fn unit_enum_variants() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    enum Status {
        Active,
        Suspended,
    }
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Account {
        status: Status,
    }

    for status in [Status::Active, Status::Suspended] {
        let account = Account { status };
        let text = to_string(&account).unwrap();
        let back: Account = from_str(&text).unwrap();
        assert_eq!(account, back);
    }
}

#[test]
fn string_map_destination() {
    let mut source = HashMap::new();
    source.insert("alpha".to_string(), 1i64);
    source.insert("beta".to_string(), 2i64);

    let text = to_string(&source).unwrap();
    let back: HashMap<String, i64> = from_str(&text).unwrap();
    assert_eq!(source, back);
}

#[test]
fn nested_integer_grids() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Board {
        grid: Vec<Vec<i32>>,
    }

    let board = Board {
        grid: vec![vec![1, 2, 3], vec![], vec![-7]],
    };
    let text = to_string(&board).unwrap();
    let back: Board = from_str(&text).unwrap();
    assert_eq!(board, back);
}

#[test]
fn heterogeneous_tuples_travel_as_block_lists() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Pairs {
        pair: (i32, bool),
    }

    let pairs = Pairs { pair: (9, true) };
    let text = to_string(&pairs).unwrap();
    assert_eq!(text, "pair[2]:\n  - 9\n  - true\n");
    let back: Pairs = from_str(&text).unwrap();
    assert_eq!(pairs, back);
}

#[test]
fn optional_elements_stay_inline() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Readings {
        values: Vec<Option<i32>>,
    }

    let readings = Readings {
        values: vec![Some(1), None, Some(3)],
    };
    let text = to_string(&readings).unwrap();
    assert_eq!(text, "values[3]: 1,null,3\n");
    let back: Readings = from_str(&text).unwrap();
    assert_eq!(readings, back);
}

#[test]
fn integral_floats_survive_the_int_detour() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Reading {
        value: f64,
    }

    // 42.0 encodes as `42`, reads back as an integer, and the float slot
    // accepts it.
    let reading = Reading { value: 42.0 };
    let text = to_string(&reading).unwrap();
    assert_eq!(text, "value : 42\n");
    let back: Reading = from_str(&text).unwrap();
    assert_eq!(reading, back);
}

#[test]
fn quoted_strings_with_hostile_content() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Notes {
        a: String,
        b: String,
        c: String,
        d: String,
    }

    let notes = Notes {
        a: "a,b:c".to_string(),
        b: "42".to_string(),
        c: " padded ".to_string(),
        d: "false".to_string(),
    };
    let text = to_string(&notes).unwrap();
    let back: Notes = from_str(&text).unwrap();
    assert_eq!(notes, back);
}

#[test]
fn inner_quote_survives_one_layer_strip() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Note {
        text: String,
    }

    let note = Note {
        text: "she said \"hi\"".to_string(),
    };
    let encoded = to_string(&note).unwrap();
    let back: Note = from_str(&encoded).unwrap();
    assert_eq!(note, back);
}

#[test]
fn dynamic_value_document() {
    let doc = toon!({
        "title": "report",
        "count": 4,
        "ratio": 0.25,
        "flags": [true, false],
        "meta": {
            "rows": [{ "a": 1, "b": 2 }, { "a": 3, "b": 4 }]
        }
    });
    let text = to_string(&doc).unwrap();
    let back: Value = from_str(&text).unwrap();
    assert_eq!(doc, back);
}

#[test]
fn deep_nesting() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct L3 {
        leaf: String,
    }
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct L2 {
        three: L3,
    }
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct L1 {
        two: L2,
    }
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Root {
        one: L1,
    }

    let root = Root {
        one: L1 {
            two: L2 {
                three: L3 {
                    leaf: "bottom".to_string(),
                },
            },
        },
    };
    let text = to_string(&root).unwrap();
    assert_eq!(
        text,
        "one :\n  two :\n    three :\n      leaf : bottom\n"
    );
    let back: Root = from_str(&text).unwrap();
    assert_eq!(root, back);
}

#[test]
fn to_value_matches_from_str_of_encoded_text() {
    let user = User {
        id: 9,
        name: "Grace".to_string(),
        active: false,
        tags: vec![],
    };
    let direct = to_value(&user).unwrap();
    let via_text: Value = from_str(&to_string(&user).unwrap()).unwrap();
    assert_eq!(direct, via_text);
}
