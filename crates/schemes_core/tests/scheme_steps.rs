use schemes_core::db::open_db_in_memory;
use schemes_core::{
    NewScheme, NewStep, RepoError, SchemeRepository, SchemeService, SqliteSchemeRepository,
};
use std::collections::HashSet;

#[test]
fn add_step_links_step_to_scheme_with_fresh_generated_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSchemeRepository::try_new(&conn).unwrap();

    let scheme = repo.add(&NewScheme::new("Find the Holy Grail")).unwrap();

    let first = repo.add_step(&NewStep::new(1, "quest"), scheme.id).unwrap();
    assert_eq!(first.scheme_id, scheme.id);
    assert_eq!(first.step_number, 1);
    assert_eq!(first.instructions, "quest");

    let second = repo
        .add_step(&NewStep::new(2, "...and quest"), scheme.id)
        .unwrap();
    assert_eq!(second.scheme_id, scheme.id);

    let ids: HashSet<_> = [first.id, second.id].into_iter().collect();
    assert_eq!(ids.len(), 2, "step ids must be freshly generated");
}

#[test]
fn find_steps_orders_by_step_number_regardless_of_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSchemeRepository::try_new(&conn).unwrap();

    let scheme = repo.add(&NewScheme::new("Take Over the World")).unwrap();
    repo.add_step(&NewStep::new(3, "profit"), scheme.id).unwrap();
    repo.add_step(&NewStep::new(1, "build the machine"), scheme.id)
        .unwrap();
    repo.add_step(&NewStep::new(2, "switch it on"), scheme.id)
        .unwrap();

    let steps = repo.find_steps(scheme.id).unwrap();
    let numbers: Vec<i64> = steps.iter().map(|step| step.step_number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);

    for step in &steps {
        assert_eq!(step.scheme_name, "Take Over the World");
    }
}

#[test]
fn find_steps_on_scheme_without_steps_returns_empty_list() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSchemeRepository::try_new(&conn).unwrap();

    let scheme = repo.add(&NewScheme::new("Empty Plan")).unwrap();
    assert!(repo.find_steps(scheme.id).unwrap().is_empty());
    assert!(repo.find_steps(999_999).unwrap().is_empty());
}

#[test]
fn find_steps_filters_to_requested_scheme_only() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSchemeRepository::try_new(&conn).unwrap();

    let wanted = repo.add(&NewScheme::new("Wanted")).unwrap();
    let other = repo.add(&NewScheme::new("Other")).unwrap();
    repo.add_step(&NewStep::new(1, "keep me"), wanted.id).unwrap();
    repo.add_step(&NewStep::new(1, "not me"), other.id).unwrap();

    let steps = repo.find_steps(wanted.id).unwrap();
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].instructions, "keep me");
    assert_eq!(steps[0].scheme_name, "Wanted");
}

#[test]
fn step_view_serialization_carries_scheme_name_not_scheme_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSchemeRepository::try_new(&conn).unwrap();

    let scheme = repo.add(&NewScheme::new("Serialized")).unwrap();
    repo.add_step(&NewStep::new(1, "go"), scheme.id).unwrap();

    let steps = repo.find_steps(scheme.id).unwrap();
    let value = serde_json::to_value(&steps[0]).unwrap();
    let object = value.as_object().unwrap();
    assert!(object.contains_key("scheme_name"));
    assert!(!object.contains_key("scheme_id"));
}

#[test]
fn add_step_for_missing_scheme_fails_with_storage_error() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSchemeRepository::try_new(&conn).unwrap();

    let result = repo.add_step(&NewStep::new(1, "orphan"), 999_999);
    assert!(matches!(result, Err(RepoError::Db(_))));
}

#[test]
fn removing_scheme_cascades_to_its_steps() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSchemeRepository::try_new(&conn).unwrap();

    let scheme = repo.add(&NewScheme::new("Doomed")).unwrap();
    repo.add_step(&NewStep::new(1, "first"), scheme.id).unwrap();
    repo.add_step(&NewStep::new(2, "second"), scheme.id).unwrap();

    repo.remove(scheme.id).unwrap().unwrap();

    assert!(repo.find_steps(scheme.id).unwrap().is_empty());
    let remaining: i64 = conn
        .query_row("SELECT COUNT(*) FROM steps;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(remaining, 0);
}

#[test]
fn service_appends_and_lists_steps() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSchemeRepository::try_new(&conn).unwrap();
    let service = SchemeService::new(repo);

    let scheme = service.create_scheme("Service Plan").unwrap();
    service.append_step(scheme.id, 2, "then this").unwrap();
    service.append_step(scheme.id, 1, "this first").unwrap();

    let steps = service.list_steps(scheme.id).unwrap();
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0].instructions, "this first");
    assert_eq!(steps[1].instructions, "then this");
}
