use chrono::{DateTime, TimeZone, Utc};
use todo_list::{LoadOutcome, MemoryStore, STORAGE_KEY, TodoListController};

fn fixed_clock() -> DateTime<Utc> {
    Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
}

#[test]
fn saved_list_round_trips_through_store() {
    let mut store = MemoryStore::new();

    let saved = {
        let mut todos = TodoListController::new(&mut store);
        let milk = todos.add("Buy milk").unwrap().unwrap();
        todos.add("Walk the dog").unwrap();
        let rent = todos.add("Pay rent").unwrap().unwrap();
        todos.toggle(milk).unwrap();
        todos.edit(rent, "Pay rent today").unwrap();
        todos.items().to_vec()
    };

    let mut reloaded = TodoListController::new(&mut store);
    assert_eq!(reloaded.load(), LoadOutcome::Restored(3));
    assert_eq!(reloaded.items(), saved.as_slice());
}

#[test]
fn reloaded_list_keeps_issuing_fresh_ids() {
    let mut store = MemoryStore::new();
    let first = {
        let mut todos = TodoListController::new(&mut store).with_clock(fixed_clock);
        todos.add("First").unwrap().unwrap()
    };

    let mut todos = TodoListController::new(&mut store).with_clock(fixed_clock);
    todos.load();
    let second = todos.add("Second").unwrap().unwrap();

    assert!(second > first);
}

#[test]
fn serialized_format_matches_local_storage_layout() {
    let mut todos = TodoListController::new(MemoryStore::new()).with_clock(fixed_clock);
    todos.add("Buy milk").unwrap();
    let id = todos.add("Walk the dog").unwrap().unwrap();
    todos.toggle(id).unwrap();

    let stored = todos.store().value(STORAGE_KEY).unwrap();

    insta::assert_snapshot!(stored, @r#"[{"id":1700000000000,"text":"Buy milk","completed":false,"createdAt":"2023-11-14T22:13:20Z"},{"id":1700000000001,"text":"Walk the dog","completed":true,"createdAt":"2023-11-14T22:13:20Z"}]"#);
}

#[test]
fn list_written_by_browser_iteration_loads() {
    let json = r#"[{"id":1712345678901,"text":"From the browser","completed":false}]"#;
    let mut todos = TodoListController::new(MemoryStore::with_value(STORAGE_KEY, json));

    assert_eq!(todos.load(), LoadOutcome::Restored(1));
    assert_eq!(todos.items()[0].id, 1_712_345_678_901);
    assert_eq!(todos.items()[0].created_at, None);
}
