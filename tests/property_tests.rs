//! Property-based tests for the flatten/unflatten round trip.
//!
//! Generated trees stay inside the format's limits: no empty lists or maps,
//! map keys are lowercase words (never digits, never touching the separator), and
//! strings never contain a backslash.

use proptest::prelude::*;
use serde_flatenv::codec::{decode, encode};
use serde_flatenv::{flatten, unflatten, FlatMap, Map, Number, Value};

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|i| Value::Number(Number::Integer(i))),
        (-1.0e9f64..1.0e9).prop_map(|f| Value::Number(Number::Float(f))),
        "[a-zA-Z0-9 ,.:=\"\n\t-]{0,16}".prop_map(Value::String),
    ]
}

fn map_key() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

fn nested() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(4, 48, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 1..5).prop_map(Value::Array),
            prop::collection::btree_map(map_key(), inner, 1..5)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map>())),
        ]
    })
}

fn root() -> impl Strategy<Value = Value> {
    prop::collection::btree_map(map_key(), nested(), 1..6)
        .prop_map(|m| Value::Object(m.into_iter().collect::<Map>()))
}

proptest! {
    #[test]
    fn prop_roundtrip(v in root()) {
        prop_assert_eq!(unflatten(&flatten(&v)), v);
    }

    #[test]
    fn prop_leaf_count(v in root()) {
        prop_assert_eq!(flatten(&v).len(), v.leaf_count());
    }

    #[test]
    fn prop_entry_order_is_irrelevant(
        (v, order) in root().prop_flat_map(|v| {
            let n = flatten(&v).len();
            (Just(v), Just((0..n).collect::<Vec<_>>()).prop_shuffle())
        })
    ) {
        let flat = flatten(&v);
        let entries: Vec<_> = flat.iter().collect();
        let shuffled: FlatMap = order
            .iter()
            .map(|&i| (entries[i].0.clone(), entries[i].1.clone()))
            .collect();
        prop_assert_eq!(unflatten(&shuffled), v);
    }

    #[test]
    fn prop_codec_roundtrip(s in "[^\\\\]{0,32}") {
        let original = Value::String(s);
        let encoded = encode(original.clone());
        prop_assert!(!encoded.as_str().unwrap_or_default().contains('\n'));
        prop_assert_eq!(decode(encoded), original);
    }

    #[test]
    fn prop_list_growth(indices in prop::collection::btree_set(0usize..40, 1..10)
        .prop_flat_map(|set| Just(set.into_iter().collect::<Vec<_>>()).prop_shuffle()))
    {
        let max = *indices.iter().max().unwrap();
        let flat: FlatMap = indices
            .iter()
            .map(|i| (format!("list__{}", i), Value::Number(Number::Integer(*i as i64))))
            .collect();

        let value = unflatten(&flat);
        let list = value.as_object().unwrap().get("list").unwrap().as_array().unwrap();
        prop_assert_eq!(list.len(), max + 1);
        for (i, slot) in list.iter().enumerate() {
            if indices.contains(&i) {
                prop_assert_eq!(slot, &Value::Number(Number::Integer(i as i64)));
            } else {
                prop_assert!(slot.is_null());
            }
        }
    }

    // Map keys must never be bare digits: the flat form reads them back as
    // list indices.
    #[test]
    fn prop_numeric_map_key_reads_back_as_index(n in 0usize..30) {
        let mut inner = Map::new();
        inner.insert(n.to_string(), Value::from("x"));
        let mut outer = Map::new();
        outer.insert("a".to_string(), Value::Object(inner));
        let original = Value::Object(outer);

        let back = unflatten(&flatten(&original));
        prop_assert_ne!(&back, &original);

        let list = back.as_object().unwrap().get("a").unwrap().as_array().unwrap();
        prop_assert_eq!(list.len(), n + 1);
        prop_assert_eq!(&list[n], &Value::from("x"));
    }
}
