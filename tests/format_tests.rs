use mapparser::{parse_str, to_string, Error, Value};

fn value_of(source: &str) -> Result<Value, Error> {
    let doc = parse_str(&format!("[T]\nv : {}", source))?;
    Ok(doc.get("T", "v").cloned().unwrap_or_else(|| panic!("no value for {:?}", source)))
}

#[test]
fn test_integers() {
    assert_eq!(value_of("0").unwrap(), Value::Int(0));
    assert_eq!(value_of("+7").unwrap(), Value::Int(7));
    assert_eq!(value_of("-42").unwrap(), Value::Int(-42));
    assert_eq!(value_of("9223372036854775807").unwrap(), Value::Int(i64::MAX));
    assert!(matches!(
        value_of("9223372036854775808"),
        Err(Error::InvalidNumber { line: 2, .. })
    ));
}

#[test]
fn test_floats() {
    assert_eq!(value_of("0.5").unwrap(), Value::Float(0.5));
    assert_eq!(value_of("-3.").unwrap(), Value::Float(-3.0));
    assert_eq!(value_of(".25").unwrap(), Value::Float(0.25));
    assert_eq!(value_of("1e3").unwrap(), Value::Float(1000.0));
    assert_eq!(value_of("2.5E-1").unwrap(), Value::Float(0.25));

    for word in ["inf", "-inf", "NaN", "infinity"] {
        assert!(value_of(word).is_err(), "{} should not be a float", word);
    }
    for bad in ["1.2.3", "1e", "--1", "3x", "1e400", "-1e400"] {
        assert!(
            matches!(value_of(bad), Err(Error::InvalidNumber { .. })),
            "{} should be an invalid number",
            bad
        );
    }
}

#[test]
fn test_written_floats_parse_back() {
    for source in ["1.7976931348623157e308", "-2.2250738585072014e-308", "5e-324"] {
        let doc = parse_str(&format!("[T]\nv : {}", source)).unwrap();
        assert_eq!(parse_str(&to_string(&doc)).unwrap(), doc, "{}", source);
    }
}

#[test]
fn test_bools_are_lowercase() {
    assert_eq!(value_of("true").unwrap(), Value::Bool(true));
    assert_eq!(value_of("false").unwrap(), Value::Bool(false));
    assert!(matches!(
        value_of("True"),
        Err(Error::UnrecognizedValue { .. })
    ));
}

#[test]
fn test_strings() {
    assert_eq!(value_of("\"\"").unwrap(), Value::from(""));
    assert_eq!(value_of("\"a: [b], {c}\"").unwrap(), Value::from("a: [b], {c}"));
    assert_eq!(value_of(r#""say \"hi\"""#).unwrap(), Value::from("say \"hi\""));
    assert_eq!(value_of(r#""back\\slash""#).unwrap(), Value::from("back\\slash"));
    // unknown escapes are kept as written
    assert_eq!(value_of(r#""tab\t""#).unwrap(), Value::from("tab\\t"));

    assert!(matches!(
        value_of("\"one\" \"two\""),
        Err(Error::TrailingCharacters { .. })
    ));
    assert!(matches!(
        value_of("'single'"),
        Err(Error::UnrecognizedValue { .. })
    ));
}

#[test]
fn test_lists() {
    assert_eq!(value_of("[]").unwrap(), Value::List(vec![]));
    assert_eq!(value_of("[ ]").unwrap(), Value::List(vec![]));
    assert_eq!(
        value_of("[\"a,b\", [1, [2]], {}]").unwrap(),
        Value::List(vec![
            Value::from("a,b"),
            Value::List(vec![Value::Int(1), Value::List(vec![Value::Int(2)])]),
            Value::Table(mapparser::Table::new("")),
        ])
    );
    assert!(matches!(value_of("[1,,2]"), Err(Error::EmptyValue { .. })));
    assert!(matches!(
        value_of("[1] 2"),
        Err(Error::TrailingCharacters { .. })
    ));
}

#[test]
fn test_tables_in_lists_are_indexed() {
    let value = value_of("[{ a: 1 }, { b: 2 }]").unwrap();
    let items = value.as_list().unwrap();
    assert_eq!(items[0].as_table().unwrap().name(), "v[0]");
    assert_eq!(items[1].as_table().unwrap().name(), "v[1]");
}

#[test]
fn test_inline_tables() {
    let value = value_of("{ pos: [1, 2], label: \"x:y\", inner: { deep: true } }").unwrap();
    let table = value.as_table().unwrap();
    assert_eq!(table.get_list("pos").unwrap().len(), 2);
    assert_eq!(table.get_str("label").unwrap(), "x:y");
    assert!(table.get_table("inner").unwrap().get_bool("deep").unwrap());

    assert!(matches!(
        value_of("{ novalue }"),
        Err(Error::MissingSeparator { .. })
    ));
    assert!(matches!(
        value_of("{ : 1 }"),
        Err(Error::MissingSeparator { .. })
    ));
}

#[test]
fn test_headers() {
    assert!(parse_str("[Map]   # with a comment").unwrap().contains_table("Map"));
    assert!(parse_str("  [Indented]  ").unwrap().contains_table("Indented"));

    for bad in ["[]", "[Two Words]", "[A]x", "[A[B]]"] {
        assert!(
            matches!(parse_str(bad), Err(Error::MalformedHeader { line: 1, .. })),
            "{} should be a malformed header",
            bad
        );
    }
}

#[test]
fn test_empty_tables_are_kept() {
    let doc = parse_str("[A]\n[B]\n# nothing here\n[C]\nx : 1").unwrap();
    assert_eq!(doc.len(), 3);
    assert!(doc.table("A").unwrap().is_empty());
    assert!(doc.table("B").unwrap().is_empty());
}

#[test]
fn test_keys() {
    let doc = parse_str("[T]\n  spaced key  :  1  \nk:2").unwrap();
    assert_eq!(doc.get("T", "spaced key"), Some(&Value::Int(1)));
    assert_eq!(doc.get("T", "k"), Some(&Value::Int(2)));

    assert!(matches!(
        parse_str("[T]\n : 1"),
        Err(Error::MissingSeparator { line: 2 })
    ));
}

#[test]
fn test_value_on_following_line() {
    let doc = parse_str("[T]\ngrid :\n\n  # comment\n  [[0, 1],\n   [1, 0]]\nnext : 1").unwrap();
    let grid = doc.table("T").unwrap().get_list("grid").unwrap();
    assert_eq!(grid.len(), 2);
    assert_eq!(doc.get("T", "next"), Some(&Value::Int(1)));
}

#[test]
fn test_errors_report_element_start_line() {
    let err = parse_str("[T]\nv : [1,\n 2,\n oops]").unwrap_err();
    assert_eq!(
        err,
        Error::UnrecognizedValue {
            line: 2,
            value: "oops".to_string()
        }
    );

    let err = parse_str("[T]\nok : 1\nv : { a: 1,\n b: [1, 2").unwrap_err();
    assert_eq!(
        err,
        Error::UnterminatedValue {
            line: 3,
            expected: ']'
        }
    );
}
