//! The store behind `Arc`, shared across threads.
//!
//! These are smoke tests for the locking discipline, not a stress
//! harness: they check that concurrent readers and writers make
//! progress and leave the store consistent.

use std::sync::Arc;
use std::thread;

use vellum::prelude::*;

fn shared_store() -> (Arc<Store>, TypeIdent) {
    let store = Store::new(ArenaConfig::new(64 * 1024)).unwrap();
    let ident = TypeIdent::new("Game::Counter");
    let descriptor = compile_schema(
        ident.clone(),
        SchemaVersion::INITIAL,
        &[FieldDecl::new("hits", FieldKind::U32)],
    )
    .unwrap();
    store.register_type(&ident, descriptor).unwrap();
    (Arc::new(store), ident)
}

#[test]
fn concurrent_creators_get_distinct_records() {
    let (store, ident) = shared_store();
    let mut handles = Vec::new();
    for _ in 0..8 {
        let store = Arc::clone(&store);
        let ident = ident.clone();
        handles.push(thread::spawn(move || {
            (0..32)
                .map(|_| store.create(&ident).unwrap())
                .collect::<Vec<_>>()
        }));
    }

    let mut all: Vec<RecordRef> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    let total = all.len();
    all.sort_by_key(|r| (r.offset(), r.generation()));
    all.dedup();
    assert_eq!(all.len(), total, "two threads got the same record");
}

#[test]
fn readers_see_consistent_fields_during_writes() {
    let (store, ident) = shared_store();
    let rec = store.create(&ident).unwrap();
    store.set_field(rec, "hits", FieldValue::U32(0)).unwrap();

    let writer = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for i in 1..=100u32 {
                store.set_field(rec, "hits", FieldValue::U32(i)).unwrap();
            }
        })
    };
    let reader = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for _ in 0..100 {
                // Every observed value is one the writer actually wrote.
                match store.get_field(rec, "hits").unwrap() {
                    Some(FieldValue::U32(v)) => assert!(v <= 100),
                    other => panic!("unexpected read: {other:?}"),
                }
            }
        })
    };
    writer.join().unwrap();
    reader.join().unwrap();

    assert_eq!(
        store.get_field(rec, "hits").unwrap(),
        Some(FieldValue::U32(100))
    );
}

#[test]
fn binders_and_resolvers_do_not_deadlock() {
    let (store, ident) = shared_store();
    let rec = store.create(&ident).unwrap();

    let mut handles = Vec::new();
    for t in 0..4 {
        let store = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            let path = format!("workers/{t}");
            for _ in 0..50 {
                store.bind(&path, rec).unwrap();
                assert_eq!(store.resolve(&path).unwrap(), Some(rec));
                assert!(store.unbind(&path).unwrap());
            }
        }));
    }
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(store.resolve("workers/0").unwrap(), None);
}

#[test]
fn create_destroy_churn_balances_the_free_list() {
    let (store, ident) = shared_store();
    let before = store.free_bytes();

    let mut handles = Vec::new();
    for _ in 0..4 {
        let store = Arc::clone(&store);
        let ident = ident.clone();
        handles.push(thread::spawn(move || {
            for _ in 0..64 {
                let rec = store.create(&ident).unwrap();
                store.destroy(rec).unwrap();
            }
        }));
    }
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(store.free_bytes(), before);
}
