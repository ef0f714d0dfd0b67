use arbor::write::{
    StructWriter, StructWriterBuilder, WriterExt, array_writer, boolean, map_writer, number, string,
};
use arbor::{EmptyResultAction, Location, Value, Writer, WriterEnv, WriterOptions};
use arbor_value::Struct;
use indexmap::IndexMap;

#[derive(Debug, Clone, Default)]
struct Profile {
    display_name: Option<String>,
    bio: Option<String>,
    links: Vec<String>,
    flags: IndexMap<String, bool>,
}

fn profile_writer() -> StructWriter<Profile> {
    StructWriterBuilder::new()
        .property("display_name", |p: &Profile| &p.display_name, string().nullable())
        .property("bio", |p: &Profile| &p.bio, string().optional())
        .property("links", |p: &Profile| &p.links, array_writer(string()))
        .property("flags", |p: &Profile| &p.flags, map_writer(boolean()))
        .build()
}

fn env(action: EmptyResultAction) -> WriterEnv {
    WriterEnv::new(WriterOptions::default().with_empty_result_action(action))
}

#[test]
fn nullable_writes_null_and_optional_omits() {
    let written = profile_writer()
        .write(&WriterEnv::default(), &Location::root(), &Profile::default())
        .unwrap();
    let expected = Struct::from_iter([
        ("display_name", Value::Null),
        ("links", Value::from(Vec::<Value>::new())),
        ("flags", Value::from(Struct::new())),
    ]);
    assert_eq!(written, Value::from(expected));
}

#[test]
fn empty_result_action_applies_to_nested_containers() {
    let profile = Profile {
        display_name: Some("ann".into()),
        ..Profile::default()
    };

    let nothing = profile_writer()
        .write(&env(EmptyResultAction::ReturnNothing), &Location::root(), &profile)
        .unwrap();
    assert_eq!(
        nothing,
        Value::from(Struct::from_iter([("display_name", Value::from("ann"))]))
    );

    let null = profile_writer()
        .write(&env(EmptyResultAction::ReturnNullValue), &Location::root(), &profile)
        .unwrap();
    assert_eq!(
        null,
        Value::from(Struct::from_iter([
            ("display_name", Value::from("ann")),
            ("links", Value::Null),
            ("flags", Value::Null),
        ]))
    );
}

#[test]
fn outer_struct_collapses_when_everything_is_omitted() {
    let bio_only = StructWriterBuilder::new()
        .property("bio", |p: &Profile| &p.bio, string().optional())
        .build();
    let root = Location::root();
    let empty = Profile::default();

    assert_eq!(
        bio_only.write(&env(EmptyResultAction::ReturnEmptyValue), &root, &empty),
        Some(Value::from(Struct::new()))
    );
    assert_eq!(bio_only.write(&env(EmptyResultAction::ReturnNothing), &root, &empty), None);
    assert_eq!(
        bio_only.write(&env(EmptyResultAction::ReturnNullValue), &root, &empty),
        Some(Value::Null)
    );
}

#[test]
fn filter_and_contramap_compose() {
    let short_links = array_writer(
        string().filter(|_: &WriterEnv, _: &Location, link: &String, _: &Value| link.len() < 10),
    );
    let link_count = number().contramap(|links: &Vec<String>| links.len());
    let writer = StructWriterBuilder::new()
        .property("links", |p: &Profile| &p.links, short_links)
        .property("link_count", |p: &Profile| &p.links, link_count)
        .build();
    let profile = Profile {
        links: vec!["a.io".into(), "a-very-long-link.io".into()],
        ..Profile::default()
    };
    assert_eq!(
        writer.write(&WriterEnv::default(), &Location::root(), &profile),
        Some(Value::from(Struct::from_iter([
            ("links", Value::from(vec!["a.io"])),
            ("link_count", Value::from(2)),
        ])))
    );
}
