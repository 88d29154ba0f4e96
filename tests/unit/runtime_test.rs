//! Tests for tokio spawner utilities

use fanout_runner::{Spawn, TokioSpawner};

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_spawner_from_current_handle() {
    let spawner = TokioSpawner::current();
    assert!(!spawner.owns_runtime());

    let (tx, rx) = tokio::sync::oneshot::channel();
    spawner.spawn(async move {
        tx.send(123).unwrap();
    });

    let result = rx.await.expect("oneshot result");
    assert_eq!(result, 123);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_spawner_from_explicit_handle() {
    let spawner = TokioSpawner::new(tokio::runtime::Handle::current());
    assert!(!spawner.owns_runtime());

    let (tx, rx) = tokio::sync::oneshot::channel();
    spawner.spawn(async move {
        tx.send("done").unwrap();
    });

    assert_eq!(rx.await.expect("oneshot result"), "done");
}

#[test]
fn test_spawner_with_own_runtime() {
    let spawner = TokioSpawner::with_worker_threads(2).expect("runtime builds");
    assert!(spawner.owns_runtime());

    let (tx, rx) = std::sync::mpsc::channel();
    spawner.spawn(async move {
        tx.send(7u32).unwrap();
    });

    let value = rx
        .recv_timeout(std::time::Duration::from_secs(5))
        .expect("spawned task ran");
    assert_eq!(value, 7);
}

#[test]
fn test_spawner_zero_workers_sizes_to_cpus() {
    let spawner = TokioSpawner::with_worker_threads(0).expect("runtime builds");
    assert!(spawner.owns_runtime());

    let (tx, rx) = std::sync::mpsc::channel();
    spawner.spawn(async move {
        tx.send(1u32).unwrap();
    });

    assert_eq!(
        rx.recv_timeout(std::time::Duration::from_secs(5))
            .expect("spawned task ran"),
        1
    );
}

#[test]
fn test_clone_keeps_runtime_alive() {
    let spawner = TokioSpawner::with_worker_threads(1).expect("runtime builds");
    let clone = spawner.clone();
    assert!(clone.owns_runtime());

    // The original goes away first; the clone must still dispatch.
    drop(spawner);

    let (tx, rx) = std::sync::mpsc::channel();
    clone.spawn(async move {
        tx.send(42u32).unwrap();
    });

    assert_eq!(
        rx.recv_timeout(std::time::Duration::from_secs(5))
            .expect("spawned task ran"),
        42
    );
}
