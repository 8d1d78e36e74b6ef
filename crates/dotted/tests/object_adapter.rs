use dotted::{
    get_attr, set_attr, wrap, Dot, DotsError, Fields, Kind, Record, Registry, Value,
};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("dotted=warn".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

#[derive(Debug)]
struct Server {
    host: String,
    port: i64,
    options: Value,
}

impl Fields for Server {
    fn type_name(&self) -> &str {
        "Server"
    }

    fn fields(&self) -> Vec<String> {
        vec!["Host".to_string(), "port".to_string(), "options".to_string()]
    }

    fn get_field(&self, name: &str) -> Option<Value> {
        match name {
            "Host" => Some(Value::from(self.host.as_str())),
            "port" => Some(Value::Int(self.port)),
            "options" => Some(self.options.clone()),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) -> Result<(), DotsError> {
        match name {
            "Host" => self.host = value.as_str().unwrap_or_default().to_string(),
            "port" => self.port = value.as_i64().unwrap_or_default(),
            "options" => self.options = value,
            _ => {
                return Err(DotsError::NoField {
                    type_name: "Server".to_string(),
                    field: name.to_string(),
                })
            }
        }
        Ok(())
    }
}

/// Two fields that differ only by case.
struct Clash;

impl Fields for Clash {
    fn type_name(&self) -> &str {
        "Clash"
    }

    fn fields(&self) -> Vec<String> {
        vec!["Name".to_string(), "NAME".to_string()]
    }

    fn get_field(&self, _name: &str) -> Option<Value> {
        Some(Value::from(1))
    }

    fn set_field(&mut self, _name: &str, _value: Value) -> Result<(), DotsError> {
        Ok(())
    }
}

fn server() -> (Rc<RefCell<Server>>, Value) {
    let shared = Rc::new(RefCell::new(Server {
        host: "localhost".to_string(),
        port: 80,
        options: Value::from(json!({"tls": false})),
    }));
    let value = Value::Record(Record::from_shared(shared.clone()));
    (shared, value)
}

#[test]
fn records_wrap_as_objects() {
    let (_, value) = server();
    let Dot::Object(obj) = wrap(value) else {
        panic!("expected an object view");
    };
    assert_eq!(obj.keys(), vec!["Host", "port", "options"]);
    assert_eq!(obj.get("host"), json!("localhost"));
    assert_eq!(obj.get("options.tls"), json!(false));
}

#[test]
fn writes_reach_the_record() {
    init_tracing();
    let (shared, value) = server();
    let obj = wrap(value);
    obj.as_object().unwrap().set("HOST", "example.org").unwrap();
    obj.as_object().unwrap().set("options.tls", true).unwrap();
    assert_eq!(shared.borrow().host, "example.org");
    assert_eq!(shared.borrow().options, json!({"tls": true}));
}

#[test]
fn lenient_set_of_unknown_field_is_logged_and_skipped() {
    init_tracing();
    let (shared, value) = server();
    wrap(value).as_object().unwrap().set("missing", 1).unwrap();
    assert_eq!(shared.borrow().port, 80);
}

#[test]
fn strict_set_attr() {
    let (shared, value) = server();
    let old = set_attr(&value, "PORT", 8080).unwrap();
    assert_eq!(old, json!(80));
    assert_eq!(shared.borrow().port, 8080);
    assert!(matches!(
        set_attr(&value, "nope.deeper", 1),
        Err(DotsError::PathNotFound { .. })
    ));
    assert!(matches!(
        set_attr(&value, "nope", 1),
        Err(DotsError::NoField { .. })
    ));
}

#[test]
fn strict_get_attr() {
    let (_, value) = server();
    assert_eq!(get_attr(&value, "options.tls").unwrap(), json!(false));
    assert!(get_attr(&value, "options.x").unwrap().is_null());
}

#[test]
fn ambiguous_field_names() {
    init_tracing();
    let value = Value::Record(Record::new(Clash));
    assert!(get_attr(&value, "name").unwrap().is_null());
    assert!(matches!(
        set_attr(&value, "name", 2),
        Err(DotsError::AmbiguousPath { .. })
    ));
    assert_eq!(get_attr(&value, "Name").unwrap(), json!(1));
}

#[test]
fn registry_overrides_the_view() {
    let (_, value) = server();
    let mut registry = Registry::new();
    assert!(matches!(registry.wrap(value.clone()), Dot::Object(_)));

    registry.register("Server", Kind::Data);
    let as_data = registry.wrap(value.clone());
    assert_eq!(as_data.get("port"), json!(80));
    assert!(as_data.as_data().is_some());

    registry.register("Server", Kind::Primitive);
    assert!(matches!(registry.wrap(value.clone()), Dot::Value(Value::Record(_))));

    registry.register("Server", Kind::Null);
    assert!(registry.wrap(value).is_null());
}

#[test]
fn record_equals_matching_mapping() {
    let (_, value) = server();
    assert_eq!(
        value,
        json!({"Host": "localhost", "port": 80, "options": {"tls": false}})
    );
}
