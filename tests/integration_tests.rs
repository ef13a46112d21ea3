use serde::{Deserialize, Serialize};
use serde_flatenv::dotenv::{emit_document, load_document, Document, Entry};
use serde_flatenv::{
    flatten, from_flat_map, from_str, from_value, to_flat_map, to_string, to_value, unflatten,
    value, FlatMap, FlatOptions, Number, Value,
};

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

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct KmsKey {
    arn: String,
    created_at: String,
    enc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct PgpKey {
    fp: String,
    enc: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct EnvelopeMetadata {
    #[serde(default)]
    kms: Vec<KmsKey>,
    #[serde(default)]
    pgp: Vec<PgpKey>,
    lastmodified: String,
    mac: String,
    version: String,
    #[serde(default)]
    shamir_threshold: Option<u32>,
}

fn sample_order() -> Order {
    Order {
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
                sku: "GADGET-002".to_string(),
                price: 49.99,
                quantity: 1,
            },
        ],
        total: 109.97,
    }
}

fn sample_metadata() -> EnvelopeMetadata {
    EnvelopeMetadata {
        kms: vec![KmsKey {
            arn: "arn:aws:kms:us-east-1:656532927350:key/920aff2e".to_string(),
            created_at: "2019-11-06T12:00:00Z".to_string(),
            enc: "CiC6yCOtzsnFhkfdIslYZ0bAf//gYLYCmIu87B3sy/5yYxKnAQEBAgB4usgjrc7JxYZH3SLJ".to_string(),
            role: None,
        }],
        pgp: vec![PgpKey {
            fp: "1022470DE3F0BC54BC6AB62DE05550BC07FB1A0A".to_string(),
            enc: "-----BEGIN PGP MESSAGE-----\n\nwcBMA0uK6BA9N3xnAQgA\n=hbg7\n-----END PGP MESSAGE-----\n"
                .to_string(),
        }],
        lastmodified: "2019-11-06T12:34:56Z".to_string(),
        mac: "ENC[AES256_GCM,data:7MwzlAVP,type:str]".to_string(),
        version: "3.5.0".to_string(),
        shamir_threshold: None,
    }
}

#[test]
fn test_simple_struct() {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        active: true,
        tags: vec!["admin".to_string(), "developer".to_string()],
    };

    let text = to_string(&user).unwrap();
    assert_eq!(
        text,
        "id=123\nname=\"Alice\"\nactive=true\ntags__0=\"admin\"\ntags__1=\"developer\"\n"
    );

    let user_back: User = from_str(&text).unwrap();
    assert_eq!(user, user_back);
}

#[test]
fn test_nested_struct() {
    let order = sample_order();
    let text = to_string(&order).unwrap();
    assert!(text.contains("customer__tags__0=\"vip\"\n"));
    assert!(text.contains("items__1__price=49.99\n"));

    let order_back: Order = from_str(&text).unwrap();
    assert_eq!(order, order_back);
}

#[test]
fn test_flat_map_roundtrip_any_order() {
    let order = sample_order();
    let flat = to_flat_map(&order).unwrap();

    let reversed: FlatMap = flat
        .iter()
        .rev()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    let order_back: Order = from_flat_map(&reversed).unwrap();
    assert_eq!(order, order_back);
}

#[test]
fn test_user_with_tags() {
    let nested = value!({"user": {"name": "ann", "tags": ["x", "y"]}});

    let mut expected = FlatMap::new();
    expected.insert("user__name".to_string(), Value::from("\"ann\""));
    expected.insert("user__tags__0".to_string(), Value::from("\"x\""));
    expected.insert("user__tags__1".to_string(), Value::from("\"y\""));

    let flat = flatten(&nested);
    assert_eq!(flat, expected);
    assert_eq!(unflatten(&expected), nested);
}

#[test]
fn test_empty_container_elision() {
    let flat = flatten(&value!({"a": {}, "b": [1]}));
    assert_eq!(flat.len(), 1);
    assert_eq!(flat.get("b__0"), Some(&Value::Number(Number::Integer(1))));
    assert!(!flat.contains_key("a"));
}

#[test]
fn test_special_strings() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Holder {
        s: String,
    }

    let special_strings = [
        "",
        "hello, world",
        "line1\nline2",
        "\n\n",
        "tab\there",
        "key=value",
        " leading space",
        "trailing space ",
        "true",
        "null",
        "123",
        "3.5",
        "\"quoted\"",
        "\"",
        "ünïcödé",
    ];

    for s in special_strings {
        let holder = Holder { s: s.to_string() };
        let text = to_string(&holder).unwrap();
        assert_eq!(text.lines().count(), 1, "one line for {:?}", s);
        let back: Holder = from_str(&text).unwrap();
        assert_eq!(holder, back, "roundtrip of {:?}", s);
    }
}

#[test]
fn test_numbers_keep_their_type() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Numbers {
        small: i8,
        big: i64,
        min: i64,
        unsigned: u32,
        whole_float: f64,
        negative_float: f32,
        as_text: String,
    }

    let numbers = Numbers {
        small: -128,
        big: i64::MAX,
        min: i64::MIN,
        unsigned: u32::MAX,
        whole_float: 4.0,
        negative_float: -5.75,
        as_text: "42".to_string(),
    };

    let text = to_string(&numbers).unwrap();
    assert!(text.contains("whole_float=4.0\n"));
    assert!(text.contains("as_text=\"42\"\n"));

    let back: Numbers = from_str(&text).unwrap();
    assert_eq!(numbers, back);

    let value = unflatten(&flatten(&to_value(&numbers).unwrap()));
    let obj = value.as_object().unwrap();
    assert_eq!(obj.get("whole_float"), Some(&Value::from(4.0)));
    assert_eq!(obj.get("as_text"), Some(&Value::from("42")));
}

#[test]
fn test_empty_collections_need_defaults() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Strict {
        name: String,
        items: Vec<u32>,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Lenient {
        name: String,
        #[serde(default)]
        items: Vec<u32>,
    }

    let text = to_string(&Strict {
        name: "n".into(),
        items: vec![],
    })
    .unwrap();
    assert_eq!(text, "name=\"n\"\n");
    assert!(from_str::<Strict>(&text).is_err());

    let lenient: Lenient = from_str(&text).unwrap();
    assert!(lenient.items.is_empty());
}

#[test]
fn test_optional_fields_are_omitted() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct WithOption {
        a: Option<u32>,
        b: Option<String>,
    }

    let value = WithOption {
        a: None,
        b: Some("x".into()),
    };
    let text = to_string(&value).unwrap();
    assert_eq!(text, "b=\"x\"\n");
    assert_eq!(from_str::<WithOption>(&text).unwrap(), value);
}

#[test]
fn test_none_list_elements_keep_list_length() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Slots {
        a: Vec<Option<i32>>,
        b: Vec<Option<String>>,
    }

    let slots = Slots {
        a: vec![Some(1), None],
        b: vec![None, Some(String::new()), None],
    };
    let text = to_string(&slots).unwrap();
    assert_eq!(text, "a__0=1\na__1=\nb__0=\nb__1=\"\"\nb__2=\n");
    assert_eq!(from_str::<Slots>(&text).unwrap(), slots);
}

#[test]
fn test_large_whole_float_stays_float() {
    let original = value!({"f": 1e17, "g": 2.5e16, "i": 100000000000000000i64});
    let text = to_string(&original).unwrap();
    assert!(text.contains("f=1e17\n"));
    assert!(text.contains("i=100000000000000000\n"));

    let back: Value = from_str(&text).unwrap();
    assert_eq!(back, original);
    let obj = back.as_object().unwrap();
    assert_eq!(obj.get("f"), Some(&Value::Number(Number::Float(1e17))));
    assert_eq!(
        obj.get("i"),
        Some(&Value::Number(Number::Integer(100_000_000_000_000_000)))
    );
}

#[test]
fn test_envelope_metadata_document() {
    let metadata = sample_metadata();
    let document = Document {
        entries: vec![
            Entry::new("DATABASE_URL", "ENC[AES256_GCM,data:abc,type:str]"),
            Entry::new("PORT", "ENC[AES256_GCM,data:def,type:str]"),
        ],
        metadata: to_value(&metadata).unwrap(),
    };

    let options = FlatOptions::default();
    let text = emit_document(&document, &options).unwrap();

    assert!(text.starts_with("DATABASE_URL=ENC[AES256_GCM,data:abc,type:str]\n"));
    assert!(text.contains("sops_kms__0__arn=\"arn:aws:kms:us-east-1:656532927350:key/920aff2e\"\n"));
    assert!(text.contains("sops_pgp__0__enc=\"-----BEGIN PGP MESSAGE-----\\n\\nwcBMA0uK6BA9N3xnAQgA\\n=hbg7\\n-----END PGP MESSAGE-----\\n\"\n"));
    assert!(!text.contains("shamir_threshold"));
    for line in text.lines() {
        assert!(line.contains('='), "line without separator: {}", line);
    }

    let loaded = load_document(&text, &options).unwrap();
    assert_eq!(loaded.entries, document.entries);
    let metadata_back: EnvelopeMetadata = from_value(loaded.metadata).unwrap();
    assert_eq!(metadata_back, metadata);
}

#[test]
fn test_json_interop() {
    let json: serde_json::Value = serde_json::json!({
        "sops": {
            "age": [
                {"recipient": "age1ql3z7hjy54pw3hyww5ayyfg7zqgvc7w3j2elw8zmrj2kg5sfn9aqmcac8p", "enc": "-----BEGIN AGE-----\nYWdl\n-----END AGE-----"}
            ],
            "encrypted_regex": "^(data|stringData)$",
            "mac_only_encrypted": true,
            "version": "3.8.1"
        }
    });

    let flat = to_flat_map(&json).unwrap();
    assert_eq!(flat.len(), 5);
    assert_eq!(
        flat.get("sops__mac_only_encrypted"),
        Some(&Value::Bool(true))
    );

    let json_back: serde_json::Value = from_flat_map(&flat).unwrap();
    assert_eq!(json, json_back);
}
