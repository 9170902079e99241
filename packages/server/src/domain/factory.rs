//! Identifier factories.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use super::value_object::{ConnectionId, MessageId, Timestamp};

/// Generates connection ids (UUID v4), unique for the lifetime of the process.
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    pub fn generate() -> ConnectionId {
        ConnectionId::from(Uuid::new_v4())
    }
}

/// Generates message ids from the emission time.
///
/// Ids follow the millisecond clock but are strictly increasing: two messages
/// emitted within the same millisecond get consecutive ids instead of
/// colliding.
#[derive(Debug, Default)]
pub struct MessageIdFactory {
    last: AtomicU64,
}

impl MessageIdFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self, now: Timestamp) -> MessageId {
        let now = u64::try_from(now.value()).unwrap_or(0);
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last.saturating_add(1)))
            })
            .unwrap_or_else(|last| last);
        MessageId::new(now.max(previous.saturating_add(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_connection_ids_are_unique() {
        // given/when:
        let ids: HashSet<String> = (0..100)
            .map(|_| ConnectionIdFactory::generate().into_string())
            .collect();

        // then:
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_message_ids_follow_the_clock() {
        let factory = MessageIdFactory::new();

        assert_eq!(factory.next(Timestamp::new(1_000)).value(), 1_000);
        assert_eq!(factory.next(Timestamp::new(2_500)).value(), 2_500);
    }

    #[test]
    fn test_message_ids_within_same_millisecond_do_not_collide() {
        // given:
        let factory = MessageIdFactory::new();
        let now = Timestamp::new(1_000);

        // when:
        let first = factory.next(now);
        let second = factory.next(now);
        let third = factory.next(now);

        // then:
        assert_eq!(first.value(), 1_000);
        assert_eq!(second.value(), 1_001);
        assert_eq!(third.value(), 1_002);
    }

    #[test]
    fn test_message_ids_never_go_backwards_when_clock_does() {
        let factory = MessageIdFactory::new();

        let first = factory.next(Timestamp::new(5_000));
        let second = factory.next(Timestamp::new(4_000));

        assert!(second > first);
    }
}
