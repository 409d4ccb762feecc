//! Routing Module Tests
//!
//! Validates the placement hash, the ownership rule and the router's local/forward decisions.
//!
//! ## Test Scopes
//! - **Hash**: FNV-1a reference vectors and determinism.
//! - **Ownership**: Exactly one owner per key, tie handling, empty peer sets.
//! - **Router**: Local execution never forwards; non-owners forward to exactly one peer.
//!
//! *Note: The HTTP forwarder is exercised end-to-end in the server tests.*

#[cfg(test)]
mod tests {
    use crate::cluster::types::ClusterConfig;
    use crate::error::ExecutionError;
    use crate::query::executor::QueryExecutor;
    use crate::query::store::DataStore;
    use crate::query::types::{StoreRows, Value};
    use crate::routing::forwarder::Forwarder;
    use crate::routing::hash::{Fnv1a, digest, placement_digest};
    use crate::routing::ownership::{is_owner, resolve_owner, wins};
    use crate::routing::router::{ForwardPolicy, Hop, Outcome, QueryRouter, Route, route};
    use crate::server::protocol::QueryRequest;
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    struct RecordingStore {
        statements: Mutex<Vec<String>>,
    }

    impl DataStore for RecordingStore {
        fn query(&self, statement: &str) -> Result<StoreRows, ExecutionError> {
            self.statements.lock().unwrap().push(statement.to_string());
            Ok(StoreRows {
                columns: vec!["one".to_string()],
                rows: vec![vec![Value::Integer(1)]],
            })
        }
    }

    #[derive(Default)]
    struct RecordingForwarder {
        sent: Mutex<Vec<(String, QueryRequest)>>,
    }

    impl Forwarder for RecordingForwarder {
        fn forward(&self, peer: &str, request: &QueryRequest) {
            self.sent
                .lock()
                .unwrap()
                .push((peer.to_string(), request.clone()));
        }
    }

    struct Harness {
        router: QueryRouter,
        store: Arc<RecordingStore>,
        forwarder: Arc<RecordingForwarder>,
    }

    fn harness(cluster: ClusterConfig, policy: ForwardPolicy) -> Harness {
        let store = Arc::new(RecordingStore {
            statements: Mutex::new(Vec::new()),
        });
        let forwarder = Arc::new(RecordingForwarder::default());
        let router = QueryRouter::new(
            Arc::new(cluster),
            policy,
            QueryExecutor::new(store.clone()),
            forwarder.clone(),
        );
        Harness {
            router,
            store,
            forwarder,
        }
    }

    fn peers(list: &[&str]) -> Vec<String> {
        list.iter().map(|p| p.to_string()).collect()
    }

    /// First `select N` statement satisfying `pred`.
    fn find_statement(pred: impl Fn(&str) -> bool) -> String {
        (0..10_000)
            .map(|i| format!("select {}", i))
            .find(|sql| pred(sql))
            .expect("no statement matched within 10000 candidates")
    }

    // ============================================================
    // HASH
    // ============================================================

    #[test]
    fn test_fnv1a_reference_vectors() {
        assert_eq!(digest(""), 0x811c_9dc5);
        assert_eq!(digest("a"), 0xe40c_292c);
        assert_eq!(digest("foobar"), 0xbf9c_f968);
    }

    #[test]
    fn test_digest_is_deterministic() {
        for i in 0..100 {
            let s = format!("select * from t where id = {}", i);
            assert_eq!(digest(&s), digest(&s));
        }
    }

    #[test]
    fn test_streaming_matches_concatenation() {
        let mut hasher = Fnv1a::new();
        hasher.write(b"127.0.0.1:7001");
        hasher.write(b"select 1");

        assert_eq!(hasher.finish(), digest("127.0.0.1:7001select 1"));
        assert_eq!(
            placement_digest("127.0.0.1:7001", "select 1"),
            digest("127.0.0.1:7001select 1")
        );
    }

    // ============================================================
    // OWNERSHIP
    // ============================================================

    #[test]
    fn test_empty_peer_set_always_owns() {
        for i in 0..50 {
            assert!(is_owner(":7001", &[], &format!("key-{}", i)));
        }
    }

    #[test]
    fn test_ties_keep_evaluating_node_eligible() {
        assert!(wins(10, [10, 11, 12]));
        assert!(wins(10, Vec::<u32>::new()));
        assert!(!wins(10, [10, 9]));
    }

    #[test]
    fn test_exactly_one_owner_per_key() {
        let nodes = peers(&[":7001", ":7002", ":7003", ":7004"]);

        for i in 0..500 {
            let key = format!("select * from t where id = {}", i);

            let digests: HashSet<u32> = nodes.iter().map(|n| placement_digest(n, &key)).collect();
            if digests.len() != nodes.len() {
                // collision: more than one node may legitimately claim the key
                continue;
            }

            let owners: Vec<&String> = nodes
                .iter()
                .filter(|me| {
                    let others: Vec<String> =
                        nodes.iter().filter(|n| n != me).cloned().collect();
                    is_owner(me, &others, &key)
                })
                .collect();

            assert_eq!(owners.len(), 1, "key {:?} has owners {:?}", key, owners);

            let minimal = nodes
                .iter()
                .min_by_key(|n| placement_digest(n, &key))
                .unwrap();
            assert_eq!(owners[0], minimal);
        }
    }

    #[test]
    fn test_resolve_owner_agrees_with_is_owner() {
        let me = ":7001";
        let others = peers(&[":7002", ":7003"]);

        for i in 0..200 {
            let key = format!("k{}", i);
            let owner = resolve_owner(me, &others, &key);
            assert_eq!(owner == me, is_owner(me, &others, &key), "key {}", key);
        }
    }

    // ============================================================
    // ROUTE DECISION
    // ============================================================

    #[test]
    fn test_route_local_without_peers() {
        let cluster = ClusterConfig::standalone(":7001").unwrap();
        assert_eq!(route(&cluster, ForwardPolicy::FirstPeer, "anything"), Route::Local);
    }

    #[test]
    fn test_route_forwards_to_first_peer_even_if_another_peer_wins() {
        let cluster = ClusterConfig::new(":7001", [":p1", ":p2", ":p3"]).unwrap();
        let sql = find_statement(|sql| {
            !is_owner(cluster.self_addr(), cluster.peers(), sql)
                && resolve_owner(cluster.self_addr(), cluster.peers(), sql) != ":p1"
        });

        assert_eq!(
            route(&cluster, ForwardPolicy::FirstPeer, &sql),
            Route::Forward {
                peer: ":p1".to_string()
            }
        );
    }

    #[test]
    fn test_owner_policy_forwards_to_resolved_owner() {
        let cluster = ClusterConfig::new(":7001", [":p1", ":p2", ":p3"]).unwrap();
        let sql = find_statement(|sql| {
            !is_owner(cluster.self_addr(), cluster.peers(), sql)
                && resolve_owner(cluster.self_addr(), cluster.peers(), sql) != ":p1"
        });
        let owner = resolve_owner(cluster.self_addr(), cluster.peers(), &sql).to_string();

        assert_eq!(
            route(&cluster, ForwardPolicy::Owner, &sql),
            Route::Forward { peer: owner }
        );
    }

    #[test]
    fn test_shard_key_overrides_statement() {
        let request = QueryRequest::new("select * from kv").with_shard_key("user-42");
        assert_eq!(request.routing_key(), "user-42");

        let request = QueryRequest::new("select * from kv");
        assert_eq!(request.routing_key(), "select * from kv");
    }

    // ============================================================
    // DISPATCH
    // ============================================================

    #[tokio::test]
    async fn test_standalone_executes_verbatim() {
        let h = harness(
            ClusterConfig::standalone(":7001").unwrap(),
            ForwardPolicy::FirstPeer,
        );

        let outcome = h
            .router
            .dispatch(QueryRequest::new("select  1 as one"), Hop::Client)
            .await
            .unwrap();

        assert!(matches!(outcome, Outcome::Local(ref t) if t.len() == 1));
        assert_eq!(
            *h.store.statements.lock().unwrap(),
            vec!["select  1 as one".to_string()]
        );
        assert!(h.forwarder.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_owner_never_forwards() {
        let cluster = ClusterConfig::new(":7001", [":p1", ":p2"]).unwrap();
        let sql = find_statement(|sql| is_owner(cluster.self_addr(), cluster.peers(), sql));
        let h = harness(cluster, ForwardPolicy::FirstPeer);

        let outcome = h
            .router
            .dispatch(QueryRequest::new(sql.clone()), Hop::Client)
            .await
            .unwrap();

        assert!(matches!(outcome, Outcome::Local(_)));
        assert_eq!(*h.store.statements.lock().unwrap(), vec![sql]);
        assert!(h.forwarder.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_owner_forwards_request_to_first_peer() {
        let cluster = ClusterConfig::new(":7001", [":p1", ":p2"]).unwrap();
        let sql = find_statement(|sql| !is_owner(cluster.self_addr(), cluster.peers(), sql));
        let h = harness(cluster, ForwardPolicy::FirstPeer);
        let request = QueryRequest::new(sql);

        let outcome = h
            .router
            .dispatch(request.clone(), Hop::Client)
            .await
            .unwrap();

        match outcome {
            Outcome::Forwarded { peer } => assert_eq!(peer, ":p1"),
            other => panic!("expected forward, got {:?}", other),
        }
        assert_eq!(
            *h.forwarder.sent.lock().unwrap(),
            vec![(":p1".to_string(), request)]
        );
        assert!(h.store.statements.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_forwarded_request_is_never_forwarded_again() {
        let cluster = ClusterConfig::new(":7001", [":p1"]).unwrap();
        let sql = find_statement(|sql| !is_owner(cluster.self_addr(), cluster.peers(), sql));
        let h = harness(cluster, ForwardPolicy::FirstPeer);

        let outcome = h
            .router
            .dispatch(QueryRequest::new(sql.clone()), Hop::Forwarded)
            .await
            .unwrap();

        assert!(matches!(outcome, Outcome::Local(_)));
        assert_eq!(*h.store.statements.lock().unwrap(), vec![sql]);
        assert!(h.forwarder.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_forwarded_header_only_trusted_from_peers() {
        let cluster = ClusterConfig::new(":7001", [":p1", ":p2"]).unwrap();
        let h = harness(cluster, ForwardPolicy::FirstPeer);

        assert_eq!(h.router.classify_hop(None), Hop::Client);
        assert_eq!(h.router.classify_hop(Some(":p2")), Hop::Forwarded);
        assert_eq!(h.router.classify_hop(Some(":p9")), Hop::Client);
        assert_eq!(h.router.classify_hop(Some(":7001")), Hop::Client);
        assert_eq!(h.router.classify_hop(Some("")), Hop::Client);
    }

    #[tokio::test]
    async fn test_spoofed_origin_is_still_forwarded() {
        let cluster = ClusterConfig::new(":7001", [":p1"]).unwrap();
        let sql = find_statement(|sql| !is_owner(cluster.self_addr(), cluster.peers(), sql));
        let h = harness(cluster, ForwardPolicy::FirstPeer);

        let hop = h.router.classify_hop(Some("client:1234"));
        let outcome = h.router.dispatch(QueryRequest::new(sql), hop).await.unwrap();

        assert!(matches!(outcome, Outcome::Forwarded { ref peer } if peer == ":p1"));
        assert!(h.store.statements.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_routing_uses_declared_shard_key() {
        let cluster = ClusterConfig::new(":7001", [":p1"]).unwrap();
        let key = find_statement(|k| is_owner(cluster.self_addr(), cluster.peers(), k));
        let sql = find_statement(|s| !is_owner(cluster.self_addr(), cluster.peers(), s));
        let h = harness(cluster, ForwardPolicy::FirstPeer);

        // statement alone would be forwarded; the shard key keeps it here
        let outcome = h
            .router
            .dispatch(QueryRequest::new(sql).with_shard_key(key), Hop::Client)
            .await
            .unwrap();

        assert!(matches!(outcome, Outcome::Local(_)));
        assert!(h.forwarder.sent.lock().unwrap().is_empty());
    }
}
