use arbor::read::{
    ReaderExt, StructReader, StructReaderBuilder, literal, number, optional, read_array, required,
    string,
};
use arbor::validate::{
    ValidatorExt, additional_properties, apply_if_not_null, is_not_blank, max_length, min,
    min_items, min_length, unique_items,
};
use arbor::{
    DefaultErrorBuilders, Failure, Location, Options, Path, Paths, ReadError, Reader, ReaderEnv,
    ReaderResult, Value, ValueKind,
};
use arbor_value::Struct;

type Env = ReaderEnv<DefaultErrorBuilders>;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn object<'a>(fields: impl IntoIterator<Item = (&'a str, Value)>) -> Value {
    Value::from(Struct::from_iter(fields))
}

fn document() -> Value {
    let user = object([
        ("name", Value::from("Ann")),
        ("phones", Value::from(vec!["+1", "+2"])),
    ]);
    object([("user", user)])
}

fn phones(rest: impl Into<Path>) -> Path {
    Path::key("user").append("phones").join(&rest.into())
}

fn locations(failure: &Failure<ReadError>) -> Vec<String> {
    failure.iter().map(|c| c.location.to_string()).collect()
}

#[test]
fn user_phones_lookup_through_required() {
    let env = Env::default();
    let root = Location::root();
    let doc = document();

    let first = required(phones(0usize), string()).read(&env, &root, &doc);
    let ReaderResult::Success(success) = first else {
        panic!("expected a phone");
    };
    assert_eq!(success.value, "+1");
    assert_eq!(success.location.to_string(), "user/phones/0");

    let sixth = required(phones(5usize), string()).read(&env, &root, &doc);
    assert_eq!(
        sixth.into_result().unwrap_err(),
        Failure::new(
            root.append("user").append("phones").append(5usize),
            ReadError::PathMissing
        )
    );

    let city = required(Path::key("user").append("address").append("city"), string())
        .read(&env, &root, &doc);
    assert_eq!(
        city.into_result().unwrap_err(),
        Failure::new(root.append("user").append("address"), ReadError::PathMissing)
    );

    let wrong = required(phones("city"), string()).read(&env, &root, &doc);
    assert_eq!(
        wrong.into_result().unwrap_err(),
        Failure::new(
            root.append("user").append("phones"),
            ReadError::InvalidType {
                expected: ValueKind::Struct,
                actual: ValueKind::Array
            }
        )
    );
}

#[test]
fn or_tries_alternative_and_reports_both() {
    init_tracing();
    let env = Env::default();
    let id = number::<u64>().map(|n| n.to_string()).or(string());

    assert_eq!(
        id.read(&env, &Location::root(), &Value::from(7)).into_result(),
        Ok("7".to_string())
    );
    assert_eq!(
        id.read(&env, &Location::root(), &Value::from("x7")).into_result(),
        Ok("x7".to_string())
    );
    let both = id
        .read(&env, &Location::root(), &Value::Bool(true))
        .into_result()
        .unwrap_err();
    assert_eq!(both.len(), 2);
    assert!(matches!(
        both.first().error,
        ReadError::InvalidType {
            expected: ValueKind::Number,
            ..
        }
    ));
}

#[derive(Debug, Clone, PartialEq)]
struct Account {
    name: String,
    tags: Vec<String>,
    age: Option<u32>,
    role: String,
}

fn account_reader() -> StructReader<DefaultErrorBuilders, Account> {
    let mut builder = StructReaderBuilder::<DefaultErrorBuilders>::new();
    let name = builder.required(
        Paths::new("name").or("login"),
        string().validation(is_not_blank().and(max_length(16))),
    );
    let tags = builder.required(
        "tags",
        read_array(string().validation(min_length(1)))
            .validation(min_items(1).and(unique_items())),
    );
    let age = builder.nullable("age", number::<u32>().validation(min(18u32)));
    let role = builder.with_default("role", literal(["admin", "member"]), || {
        "member".to_string()
    });
    builder.before(additional_properties());
    builder.build(move |_, location, mut values| {
        ReaderResult::success(
            location.clone(),
            Account {
                name: values.take(&name),
                tags: values.take(&tags),
                age: values.take(&age),
                role: values.take(&role),
            },
        )
    })
}

fn valid_account() -> Value {
    object([
        ("login", Value::from("ann")),
        ("tags", Value::from(vec!["a", "b"])),
        ("age", Value::Null),
    ])
}

fn broken_account() -> Value {
    object([
        ("name", Value::from("   ")),
        ("tags", Value::from(vec!["a", "", "a"])),
        ("age", Value::from(12)),
        ("role", Value::from("owner")),
    ])
}

#[test]
fn fail_fast_and_accumulate_agree_on_success() {
    let reader = account_reader();
    let fast = reader.read(&Env::default(), &Location::root(), &valid_account());
    let all = reader.read(&Env::accumulate(), &Location::root(), &valid_account());
    assert_eq!(fast, all);
    assert_eq!(
        fast.into_result(),
        Ok(Account {
            name: "ann".into(),
            tags: vec!["a".into(), "b".into()],
            age: None,
            role: "member".into(),
        })
    );
}

#[test]
fn accumulate_reports_every_failure_in_order() {
    init_tracing();
    let reader = account_reader();
    let all = reader
        .read(&Env::accumulate(), &Location::root(), &broken_account())
        .into_result()
        .unwrap_err();
    assert_eq!(locations(&all), vec!["name", "tags/1", "age", "role"]);
    assert_eq!(all.causes()[0].error, ReadError::Blank);
    assert_eq!(all.causes()[2].error, ReadError::Minimum {
        expected: Value::from(18u32),
        actual: Value::from(12u32),
    });

    let first = reader
        .read(&Env::default(), &Location::root(), &broken_account())
        .into_result()
        .unwrap_err();
    assert_eq!(first.len(), 1);
    assert_eq!(first.first(), &all.causes()[0]);
}

#[test]
fn unknown_fields_fail_before_properties() {
    let mut doc = Struct::from_iter([
        ("name", Value::from("ann")),
        ("tags", Value::from(vec!["a"])),
        ("age", Value::from(30)),
    ]);
    doc.insert("shoe_size", Value::from(44));
    let doc = Value::from(doc);

    let reader = account_reader();
    let fast = reader
        .read(&Env::default(), &Location::root(), &doc)
        .into_result()
        .unwrap_err();
    assert_eq!(
        fast,
        Failure::new(Location::root().append("shoe_size"), ReadError::AdditionalProperty)
    );
}

#[test]
fn nested_struct_errors_carry_full_location() {
    let mut builder = StructReaderBuilder::<DefaultErrorBuilders>::new();
    let account = builder.required("account", account_reader());
    let wrapper = builder.build(move |_, location, mut values| {
        ReaderResult::success(location.clone(), values.take(&account))
    });
    let doc = object([("account", broken_account())]);
    let all = wrapper
        .read(&Env::accumulate(), &Location::root(), &doc)
        .into_result()
        .unwrap_err();
    assert_eq!(
        locations(&all),
        vec!["account/name", "account/tags/1", "account/age", "account/role"]
    );
}

#[test]
fn apply_if_not_null_skips_absent_values() {
    let adult = optional("age", number::<u32>()).validation(apply_if_not_null(min(18u32)));
    let env = Env::new(DefaultErrorBuilders, Options::fail_fast());

    assert_eq!(
        adult.read(&env, &Location::root(), &object([])).into_result(),
        Ok(None)
    );
    assert_eq!(
        adult
            .read(&env, &Location::root(), &object([("age", Value::from(20))]))
            .into_result(),
        Ok(Some(20))
    );
    assert!(
        adult
            .read(&env, &Location::root(), &object([("age", Value::from(3))]))
            .is_failure()
    );
}
