use logview_store::{
    Error, create_view_from, default_view, list_views, load_view, rename_view, save_view,
    views_dir,
};
use logview_testing::ProjectFixture;
use logview_types::{ComputedColumn, SortDirection};

#[test]
fn save_then_load_round_trips() {
    let project = ProjectFixture::new().unwrap();

    let mut view = default_view("experiments", r"metrics\.json$").unwrap();
    view.columns.order = vec!["path".into(), "loss".into()];
    view.columns.hidden = vec!["step".into()];
    view.columns.alias.insert("loss".into(), "Loss".into());
    view.columns.format.insert("loss".into(), "{:.3f}".into());
    view.columns.computed.push(ComputedColumn {
        name: "double".into(),
        expr: "loss * 2".into(),
    });
    view.rows.pinned_ids = vec!["runs/a.json".into()];
    view.rows.sort.by = Some("loss".into());
    view.rows.sort.direction = SortDirection::Desc;

    let saved_path = save_view(project.root(), &view).unwrap();
    assert!(saved_path.starts_with(views_dir(project.root())));

    let loaded = load_view(project.root(), "experiments").unwrap();
    assert_eq!(loaded, view);
}

#[test]
fn missing_view_is_not_found_with_a_hint() {
    let project = ProjectFixture::new().unwrap();
    match load_view(project.root(), "nope") {
        Err(Error::NotFound(message)) => {
            assert!(message.contains("logview create"), "{}", message);
            assert!(message.contains("nope"));
        }
        other => panic!("expected NotFound, got {:?}", other.map(|v| v.name)),
    }
}

#[test]
fn listing_is_sorted_and_tolerates_a_missing_dir() {
    let project = ProjectFixture::new().unwrap();
    assert!(list_views(project.root()).unwrap().is_empty());

    for name in ["zeta", "alpha", "mid"] {
        save_view(project.root(), &default_view(name, ".*").unwrap()).unwrap();
    }
    assert_eq!(
        list_views(project.root()).unwrap(),
        vec!["alpha", "mid", "zeta"]
    );
}

#[test]
fn copy_creates_an_identical_view_under_a_new_name() {
    let project = ProjectFixture::new().unwrap();
    let mut original = default_view("default", ".*").unwrap();
    original.columns.hidden = vec!["step".into()];
    save_view(project.root(), &original).unwrap();

    let copy = create_view_from(project.root(), "fork", "default").unwrap();
    assert_eq!(copy.name, "fork");
    assert_eq!(copy.columns.hidden, original.columns.hidden);

    // Refuses to overwrite an existing view
    assert!(matches!(
        create_view_from(project.root(), "fork", "default"),
        Err(Error::AlreadyExists(_))
    ));
}

#[test]
fn rename_moves_the_file() {
    let project = ProjectFixture::new().unwrap();
    save_view(project.root(), &default_view("old", ".*").unwrap()).unwrap();

    let renamed = rename_view(project.root(), "old", "new").unwrap();
    assert_eq!(renamed.name, "new");
    assert_eq!(list_views(project.root()).unwrap(), vec!["new"]);

    assert!(matches!(
        rename_view(project.root(), "old", "other"),
        Err(Error::NotFound(_))
    ));
}

#[test]
fn rename_to_same_name_is_a_noop() {
    let project = ProjectFixture::new().unwrap();
    save_view(project.root(), &default_view("only", ".*").unwrap()).unwrap();
    let view = rename_view(project.root(), "only", "only").unwrap();
    assert_eq!(view.name, "only");
    assert_eq!(list_views(project.root()).unwrap(), vec!["only"]);
}

#[test]
fn invalid_names_are_rejected_before_touching_disk() {
    let project = ProjectFixture::new().unwrap();
    assert!(load_view(project.root(), "a/b").is_err());
    assert!(load_view(project.root(), "").is_err());
}

#[test]
fn corrupt_view_file_is_a_parse_error() {
    let project = ProjectFixture::new().unwrap();
    save_view(project.root(), &default_view("v", ".*").unwrap()).unwrap();
    let path = views_dir(project.root()).join("v.json");
    std::fs::write(&path, "{ broken").unwrap();

    assert!(matches!(
        load_view(project.root(), "v"),
        Err(Error::Parse(_))
    ));
}
