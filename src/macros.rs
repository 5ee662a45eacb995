/// Builds a [`Value`](crate::Value) from an inline literal.
///
/// ```rust
/// use toon_codec::toon;
///
/// let doc = toon!({
///     "name": "Alice",
///     "tags": [1, 2, 3],
///     "meta": { "active": true }
/// });
/// assert!(doc.is_record());
/// ```
#[macro_export]
macro_rules! toon {
    (null) => {
        $crate::Value::Null
    };

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
        $crate::Value::List(vec![$($crate::toon!($elem)),*])
    };

    ({}) => {
        $crate::Value::Record($crate::RecordMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut record = $crate::RecordMap::new();
        $(
            record.insert($key.to_string(), $crate::toon!($value));
        )*
        $crate::Value::Record(record)
    }};

    // Fallback for any other expression.
    ($other:expr) => {
        $crate::to_value(&$other).unwrap_or($crate::Value::Null)
    };
}
