//! # Concurrency Flows
//!
//! Lookups racing each other and racing event dispatch must still issue
//! one fetch per scope.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use futures::future::join_all;
    use logic_caching::UidResolverApi;
    use shared_bus::ProtocolEvent;
    use shared_types::{Uid, Uin};

    use crate::integration::support::{
        standard_provider, started_session, wait_until, ScriptedProvider,
    };

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_lookups_share_one_fetch_per_scope() {
        let provider = Arc::new(
            ScriptedProvider::new(standard_provider()).with_latency(Duration::from_millis(20)),
        );
        let session = started_session(provider.clone()).await;
        let caching = session.caching().clone();

        let lookups = (0..32).map(|i| {
            let caching = caching.clone();
            let (group, uin) = if i % 2 == 0 { (1, 200) } else { (2, 300) };
            tokio::spawn(async move { caching.resolve_uid(Some(Uin(group)), Uin(uin)).await })
        });

        for result in join_all(lookups).await {
            assert!(result.unwrap().unwrap().is_some());
        }
        assert_eq!(provider.friend_calls(), 1);
        assert_eq!(provider.member_calls(Uin(1)), 1);
        assert_eq!(provider.member_calls(Uin(2)), 1);

        session.shutdown().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_event_and_direct_lookup_race() {
        let provider = Arc::new(
            ScriptedProvider::new(standard_provider()).with_latency(Duration::from_millis(20)),
        );
        let session = started_session(provider.clone()).await;
        let caching = session.caching().clone();
        let mut notices = session.notices().subscribe();

        let event = ProtocolEvent::GroupMemberIncreased {
            group_uin: Uin(1),
            member_uid: Uid::new("u200"),
            operator_uid: None,
        };
        let known = Uid::new("u100");
        let sink = session.event_sink();
        let (pushed, direct) = tokio::join!(
            sink.push(event),
            caching.resolve_uin(Some(Uin(1)), &known),
        );
        pushed.unwrap();
        assert_eq!(direct, Ok(Some(Uin(100))));

        let notice = tokio::time::timeout(Duration::from_secs(1), notices.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(notice.member_uin, Some(Uin(200)));
        wait_until(|| caching.is_group_resolved(Uin(1))).await;
        assert_eq!(provider.member_calls(Uin(1)), 1);

        session.shutdown().await;
    }
}
