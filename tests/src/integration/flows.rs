//! # Integration Test Flows
//!
//! Full-session flows: events enter through the `EventSink`, the dispatcher
//! routes them to the caching and notice units, and notices come out of
//! the `NoticeBus`.
//!
//! ## Flows Tested:
//!
//! 1. **Roster push → cache**: each push replaces the cached roster
//! 2. **Member join → notice**: the member uid is resolved within its group
//! 3. **Fetch failure → unit failure**: the group stays unresolved and a
//!    later event retries the fetch

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;

    use client_runtime::ClientSession;
    use logic_caching::UidResolverApi;
    use logic_notice::{GroupNotice, NoticeKind, NoticeSubscription};
    use shared_bus::ProtocolEvent;
    use shared_types::{BotGroup, Uid, Uin};

    use crate::integration::support::{
        standard_provider, started_session, wait_until, ScriptedProvider,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn roster(uins: &[u32]) -> ProtocolEvent {
        ProtocolEvent::GroupListPushed {
            groups: uins
                .iter()
                .map(|&uin| BotGroup::new(uin, format!("group {uin}")))
                .collect(),
        }
    }

    fn member_joined(group_uin: u32, member: &str) -> ProtocolEvent {
        ProtocolEvent::GroupMemberIncreased {
            group_uin: Uin(group_uin),
            member_uid: Uid::new(member),
            operator_uid: None,
        }
    }

    async fn next_notice(sub: &mut NoticeSubscription) -> GroupNotice {
        timeout(Duration::from_secs(1), sub.recv())
            .await
            .expect("notice not published in time")
            .expect("notice bus closed")
    }

    async fn push(session: &ClientSession, event: ProtocolEvent) {
        session.event_sink().push(event).await.unwrap();
    }

    // =============================================================================
    // ROSTER PUSH → CACHE
    // =============================================================================

    #[tokio::test]
    async fn test_roster_pushes_replace_snapshot() {
        let provider = Arc::new(ScriptedProvider::new(standard_provider()));
        let session = started_session(provider.clone()).await;

        push(&session, roster(&[1, 2, 3])).await;
        push(&session, roster(&[2])).await;

        let caching = session.caching().clone();
        wait_until(|| caching.stats().roster_pushes == 2).await;

        let groups = caching.cached_groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].group_uin, Uin(2));
        // Roster pushes never fetch
        assert_eq!(provider.friend_calls(), 0);

        session.shutdown().await;
    }

    // =============================================================================
    // MEMBER JOIN → NOTICE
    // =============================================================================

    #[tokio::test]
    async fn test_member_join_produces_resolved_notice() {
        let provider = Arc::new(ScriptedProvider::new(standard_provider()));
        let session = started_session(provider.clone()).await;
        let mut notices = session.notices().subscribe();

        push(&session, member_joined(1, "u200")).await;

        let notice = next_notice(&mut notices).await;
        assert_eq!(notice.group_uin, Uin(1));
        assert_eq!(notice.kind, NoticeKind::Joined);
        assert_eq!(notice.member_uin, Some(Uin(200)));

        assert!(session.caching().is_group_resolved(Uin(1)));
        assert_eq!(provider.friend_calls(), 1);
        assert_eq!(provider.member_calls(Uin(1)), 1);

        session.shutdown().await;
    }

    #[tokio::test]
    async fn test_resolved_group_is_not_fetched_again() {
        let provider = Arc::new(ScriptedProvider::new(standard_provider()));
        let session = started_session(provider.clone()).await;
        let mut notices = session.notices().subscribe();

        push(&session, member_joined(1, "u200")).await;
        push(&session, member_joined(1, "u100")).await;
        push(&session, member_joined(1, "u_stranger")).await;

        assert_eq!(next_notice(&mut notices).await.member_uin, Some(Uin(200)));
        assert_eq!(next_notice(&mut notices).await.member_uin, Some(Uin(100)));
        assert_eq!(next_notice(&mut notices).await.member_uin, None);
        assert_eq!(provider.member_calls(Uin(1)), 1);

        // Direct lookups share the same cache
        let uid = session.caching().resolve_uid(Some(Uin(1)), Uin(100)).await;
        assert_eq!(uid, Ok(Some(Uid::new("u100"))));
        assert_eq!(provider.member_calls(Uin(1)), 1);

        session.shutdown().await;
    }

    // =============================================================================
    // FETCH FAILURE → UNIT FAILURE → RETRY
    // =============================================================================

    #[tokio::test]
    async fn test_failed_group_fetch_is_retried_by_next_event() {
        let provider = Arc::new(ScriptedProvider::new(standard_provider()));
        provider.fail_group(Uin(2), 1);
        let session = started_session(provider.clone()).await;
        let mut notices = session.notices().subscribe();

        push(&session, member_joined(2, "u300")).await;
        wait_until(|| provider.member_calls(Uin(2)) == 1).await;
        let caching = session.caching().clone();
        wait_until(|| caching.stats().fetch_failures == 1).await;
        assert!(!caching.is_group_resolved(Uin(2)));
        assert!(notices.try_recv().is_none());

        push(&session, member_joined(2, "u300")).await;
        let notice = next_notice(&mut notices).await;
        assert_eq!(notice.member_uin, Some(Uin(300)));
        assert!(caching.is_group_resolved(Uin(2)));
        assert_eq!(provider.member_calls(Uin(2)), 2);

        let stats = session.shutdown().await.unwrap();
        assert_eq!(stats.events, 2);
        assert_eq!(stats.failed_events, 1);
    }

    #[tokio::test]
    async fn test_group_failure_leaves_other_scopes_working() {
        let provider = Arc::new(ScriptedProvider::new(standard_provider()));
        provider.fail_group(Uin(2), 1);
        let session = started_session(provider.clone()).await;
        let caching = session.caching().clone();

        assert!(caching.resolve_uid(Some(Uin(2)), Uin(300)).await.is_err());
        assert_eq!(
            caching.resolve_uid(Some(Uin(1)), Uin(200)).await,
            Ok(Some(Uid::new("u200")))
        );
        assert_eq!(
            caching.resolve_uid(None, Uin(100)).await,
            Ok(Some(Uid::new("u100")))
        );
        assert!(caching.is_group_resolved(Uin(1)));
        assert!(!caching.is_group_resolved(Uin(2)));

        session.shutdown().await;
    }
}
