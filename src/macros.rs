/// Builds a [`Value`](crate::Value) from map-like literal syntax.
///
/// Tables take string-literal keys. Nested tables are named after the key
/// holding them; a table at the top or inside a list gets an empty name.
/// Negative numbers and other multi-token expressions need parentheses.
///
/// ```rust
/// use mapparser::{mapvalue, Value};
///
/// let tile = mapvalue!({ "id": 1, "offset": [(-2), 0.5], "hidden": false });
/// let table = tile.as_table().unwrap();
/// assert_eq!(table.get("offset"), Some(&Value::List(vec![Value::Int(-2), Value::Float(0.5)])));
/// ```
#[macro_export]
macro_rules! mapvalue {
    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::List(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::List(vec![$($crate::mapvalue!($elem)),*])
    };

    ({}) => {
        $crate::Value::Table($crate::Table::new(""))
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {
        $crate::mapvalue!(@table "", { $($key : $value),* })
    };

    (@table $name:expr, { $($key:literal : $value:tt),* }) => {{
        let mut table = $crate::Table::new($name);
        $(
            table.insert($key, $crate::mapvalue!(@entry $key, $value));
        )*
        $crate::Value::Table(table)
    }};

    (@entry $name:expr, { $($key:literal : $value:tt),* $(,)? }) => {
        $crate::mapvalue!(@table $name, { $($key : $value),* })
    };

    (@entry $name:expr, $value:tt) => {
        $crate::mapvalue!($value)
    };

    ($other:expr) => {
        $crate::Value::from($other)
    };
}
