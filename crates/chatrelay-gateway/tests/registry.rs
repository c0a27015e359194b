#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use chatrelay_gateway::realtime::{ConnectionRegistry, Registration};

mod support;
use support::Peer;

#[tokio::test]
async fn distinct_names_resolve_to_their_connections() {
    let reg = ConnectionRegistry::new();
    let peers: Vec<Peer> = (0..4).map(|i| Peer::new(&reg, &format!("10.0.0.{i}:5000"))).collect();
    for (i, p) in peers.iter().enumerate() {
        reg.add(p.conn.clone()).await;
        let r = reg.register(&format!("user{i}"), p.conn.id()).await;
        assert_eq!(r, Registration::Registered { replaced: None });
    }

    for (i, p) in peers.iter().enumerate() {
        let name = format!("user{i}");
        assert_eq!(reg.lookup_by_username(&name).await.as_ref(), Some(&p.conn));
        assert_eq!(reg.lookup_username(p.conn.id()).await, Some(name));
    }
    assert_eq!(reg.len().await, 4);
}

#[tokio::test]
async fn last_registration_wins() {
    let reg = ConnectionRegistry::new();
    let a = Peer::new(&reg, "a");
    let b = Peer::new(&reg, "b");
    reg.add(a.conn.clone()).await;
    reg.add(b.conn.clone()).await;

    reg.register("sam", a.conn.id()).await;
    let r = reg.register("sam", b.conn.id()).await;
    assert_eq!(r, Registration::Registered { replaced: Some(a.conn.id()) });

    assert_eq!(reg.lookup_by_username("sam").await.unwrap().id(), b.conn.id());
    assert_eq!(reg.lookup_username(a.conn.id()).await, None);
    assert_eq!(reg.snapshot().await.users.len(), 1);
}

#[tokio::test]
async fn same_connection_reregistering_replaces_nobody() {
    let reg = ConnectionRegistry::new();
    let a = Peer::new(&reg, "a");
    reg.add(a.conn.clone()).await;

    reg.register("sam", a.conn.id()).await;
    let r = reg.register("sam", a.conn.id()).await;
    assert_eq!(r, Registration::Registered { replaced: None });
}

#[tokio::test]
async fn one_connection_may_hold_several_names() {
    let reg = ConnectionRegistry::new();
    let a = Peer::new(&reg, "a");
    reg.add(a.conn.clone()).await;

    reg.register("one", a.conn.id()).await;
    reg.register("two", a.conn.id()).await;

    assert_eq!(reg.lookup_by_username("one").await.unwrap(), a.conn);
    assert_eq!(reg.lookup_by_username("two").await.unwrap(), a.conn);
    let name = reg.lookup_username(a.conn.id()).await.unwrap();
    assert!(name == "one" || name == "two");

    let mut dropped = reg.remove(a.conn.id()).await;
    dropped.sort();
    assert_eq!(dropped, vec!["one".to_string(), "two".to_string()]);
}

#[tokio::test]
async fn remove_clears_names_and_membership() {
    let reg = ConnectionRegistry::new();
    let a = Peer::new(&reg, "a");
    let b = Peer::new(&reg, "b");
    reg.add(a.conn.clone()).await;
    reg.add(b.conn.clone()).await;
    reg.register("alice", a.conn.id()).await;
    reg.register("bob", b.conn.id()).await;

    assert_eq!(reg.remove(a.conn.id()).await, vec!["alice".to_string()]);

    assert_eq!(reg.lookup_username(a.conn.id()).await, None);
    assert!(reg.lookup_by_username("alice").await.is_none());
    assert!(!reg.contains(a.conn.id()).await);
    assert!(!reg.all_connections().await.contains(&a.conn));
    assert_eq!(reg.lookup_by_username("bob").await.unwrap(), b.conn);
}

#[tokio::test]
async fn remove_is_idempotent() {
    let reg = ConnectionRegistry::new();
    let a = Peer::new(&reg, "a");
    reg.add(a.conn.clone()).await;

    reg.remove(a.conn.id()).await;
    assert!(reg.remove(a.conn.id()).await.is_empty());
    assert!(reg.is_empty().await);
}

#[tokio::test]
async fn register_after_close_is_refused() {
    let reg = ConnectionRegistry::new();
    let a = Peer::new(&reg, "a");
    reg.add(a.conn.clone()).await;
    reg.remove(a.conn.id()).await;

    assert_eq!(reg.register("ghost", a.conn.id()).await, Registration::NotConnected);
    assert!(reg.lookup_by_username("ghost").await.is_none());
}

#[tokio::test]
async fn unregistered_connection_has_no_name() {
    let reg = ConnectionRegistry::new();
    let a = Peer::new(&reg, "a");
    reg.add(a.conn.clone()).await;
    assert_eq!(reg.lookup_username(a.conn.id()).await, None);
    assert!(reg.lookup_by_username("nobody").await.is_none());
}

#[tokio::test]
async fn ids_are_unique() {
    let reg = ConnectionRegistry::new();
    let a = reg.next_id();
    let b = reg.next_id();
    assert_ne!(a, b);
    assert_eq!(a.to_string(), format!("c{}", a.get()));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_churn_keeps_registry_consistent() {
    use std::sync::Arc;

    let reg = Arc::new(ConnectionRegistry::new());
    let mut tasks = Vec::new();
    for i in 0..64 {
        let reg = Arc::clone(&reg);
        tasks.push(tokio::spawn(async move {
            let p = Peer::new(&reg, "peer");
            let id = p.conn.id();
            reg.add(p.conn.clone()).await;
            let name = format!("u{}", i % 8);
            reg.register(&name, id).await;
            if i % 2 == 0 {
                reg.remove(id).await;
            }
            p
        }));
    }
    let mut peers = Vec::new();
    for t in tasks {
        peers.push(t.await.unwrap());
    }

    let open = reg.all_connections().await;
    let snap = reg.snapshot().await;
    for (name, conn) in &snap.users {
        assert!(open.contains(conn), "{name} points at a closed connection");
    }
    assert_eq!(open.len(), 32);
    assert_eq!(snap.total, 32);
    let users = snap.users;

    // even names were only ever held by closed connections
    let mut names: Vec<String> = users.into_iter().map(|(n, _)| n).collect();
    names.sort();
    assert_eq!(names, vec!["u1", "u3", "u5", "u7"]);
    for n in ["u0", "u2", "u4", "u6"] {
        assert!(reg.lookup_by_username(n).await.is_none());
    }
    drop(peers);
}

#[tokio::test]
async fn default_registry_matches_new() {
    let reg = ConnectionRegistry::default();
    assert_eq!(reg.next_id().get(), ConnectionRegistry::new().next_id().get());
    assert!(reg.is_empty().await);
}

#[tokio::test]
async fn snapshot_counts_anonymous_connections() {
    let reg = ConnectionRegistry::new();
    let a = Peer::new(&reg, "a");
    let anon = Peer::new(&reg, "anon");
    reg.add(a.conn.clone()).await;
    reg.add(anon.conn.clone()).await;
    reg.register("amy", a.conn.id()).await;

    let snap = reg.snapshot().await;
    assert_eq!(snap.total, 2);
    assert_eq!(snap.users, vec![("amy".to_string(), a.conn.clone())]);
}
