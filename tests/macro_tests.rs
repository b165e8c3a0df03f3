use mapparser::{mapvalue, parse_str, to_string, Document, Table, Value};

#[test]
fn test_mapvalue_booleans() {
    assert_eq!(mapvalue!(true), Value::Bool(true));
    assert_eq!(mapvalue!(false), Value::Bool(false));
}

#[test]
fn test_mapvalue_numbers() {
    assert_eq!(mapvalue!(42), Value::Int(42));
    assert_eq!(mapvalue!(-123), Value::Int(-123));
    assert_eq!(mapvalue!(3.5), Value::Float(3.5));
    assert_eq!(mapvalue!(30u32), Value::Int(30));
}

#[test]
fn test_mapvalue_strings() {
    assert_eq!(mapvalue!("wall.png"), Value::String("wall.png".to_string()));
    assert_eq!(mapvalue!(""), Value::String(String::new()));

    let owned = String::from("glass");
    assert_eq!(mapvalue!(owned), Value::from("glass"));
}

#[test]
fn test_mapvalue_lists() {
    assert_eq!(mapvalue!([]), Value::List(vec![]));
    assert_eq!(
        mapvalue!([1, "hello", true, [2.5]]),
        Value::List(vec![
            Value::Int(1),
            Value::from("hello"),
            Value::Bool(true),
            Value::List(vec![Value::Float(2.5)]),
        ])
    );
    assert_eq!(
        mapvalue!([(-1), 0, 1,]),
        Value::List(vec![Value::Int(-1), Value::Int(0), Value::Int(1)])
    );
}

#[test]
fn test_mapvalue_tables() {
    let tile = mapvalue!({
        "id": 3,
        "color": [255, 0, 0, 255],
        "transparent": false,
    });

    let table = tile.as_table().unwrap();
    assert_eq!(table.keys().collect::<Vec<_>>(), vec!["id", "color", "transparent"]);
    assert_eq!(table.get_int("id").unwrap(), 3);
    assert_eq!(table.get_list("color").unwrap().len(), 4);
}

#[test]
fn test_mapvalue_nested_tables_are_named_by_key() {
    let value = mapvalue!({ "outer": { "inner": { "depth": 2 } } });
    let outer = value.as_table().unwrap().get_table("outer").unwrap();
    let inner = outer.get_table("inner").unwrap();

    assert_eq!(outer.name(), "outer");
    assert_eq!(inner.name(), "inner");
    assert_eq!(inner.get_int("depth").unwrap(), 2);
}

#[test]
fn test_mapvalue_builds_a_writable_document() {
    let Value::Table(entries) = mapvalue!({ "rows": 2, "grid": [[0, 1], [1, 0]] }) else {
        panic!("Expected table");
    };
    let mut map = Table::new("Map");
    for (key, value) in entries.iter() {
        map.insert(key.as_str(), value.clone());
    }

    let mut doc = Document::new();
    doc.push_table(map).unwrap();

    let text = to_string(&doc);
    assert_eq!(text, "[Map]\nrows : 2\ngrid : [[0, 1], [1, 0]]\n");
    assert_eq!(parse_str(&text).unwrap(), doc);
}
