//! Canned auto-replies and their delay window.

use std::{ops::Range, time::Duration};

use rand::Rng;

/// Replies the support desk answers with, one picked uniformly per message.
pub const AUTO_REPLIES: [&str; 5] = [
    "Thanks for your message! Our support team will get back to you shortly.",
    "We've received your message and will respond soon.",
    "Thank you for contacting our support team! How can we assist you?",
    "Your message has been received. Our team typically responds within 1-2 hours.",
    "Hello! Thanks for reaching out. We're here to help with your technology needs.",
];

/// Reply set plus the half-open delay window `[min, max)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoReplyPolicy {
    replies: Vec<String>,
    delay: Range<Duration>,
}

impl Default for AutoReplyPolicy {
    fn default() -> Self {
        Self::new(
            AUTO_REPLIES.iter().map(|s| (*s).to_string()).collect(),
            Duration::from_millis(1000)..Duration::from_millis(3000),
        )
    }
}

impl AutoReplyPolicy {
    pub fn new(replies: Vec<String>, delay: Range<Duration>) -> Self {
        Self { replies, delay }
    }

    pub fn replies(&self) -> &[String] {
        &self.replies
    }

    pub fn delay(&self) -> &Range<Duration> {
        &self.delay
    }

    /// Pick a reply and a delay. `None` when the reply set is empty.
    ///
    /// An empty delay window collapses to its lower bound.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(String, Duration)> {
        if self.replies.is_empty() {
            return None;
        }
        let reply = self.replies[rng.random_range(0..self.replies.len())].clone();

        let min = self.delay.start.as_millis();
        let max = self.delay.end.as_millis();
        let delay_ms = if max > min {
            rng.random_range(min..max)
        } else {
            min
        };
        let delay = Duration::from_millis(u64::try_from(delay_ms).unwrap_or(u64::MAX));

        Some((reply, delay))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::HashSet;

    #[test]
    fn test_default_policy_draws_within_window() {
        // given:
        let policy = AutoReplyPolicy::default();
        let mut rng = StdRng::seed_from_u64(7);

        // when/then:
        for _ in 0..1_000 {
            let (reply, delay) = policy.draw(&mut rng).unwrap();
            assert!(delay >= Duration::from_millis(1000));
            assert!(delay < Duration::from_millis(3000));
            assert!(AUTO_REPLIES.contains(&reply.as_str()));
        }
    }

    #[test]
    fn test_default_policy_uses_every_reply() {
        let policy = AutoReplyPolicy::default();
        let mut rng = StdRng::seed_from_u64(42);

        let seen: HashSet<String> = (0..500)
            .filter_map(|_| policy.draw(&mut rng))
            .map(|(reply, _)| reply)
            .collect();

        assert_eq!(seen.len(), AUTO_REPLIES.len());
    }

    #[test]
    fn test_empty_reply_set_draws_nothing() {
        let policy = AutoReplyPolicy::new(vec![], Duration::ZERO..Duration::from_millis(10));
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(policy.draw(&mut rng), None);
    }

    #[test]
    fn test_empty_window_collapses_to_lower_bound() {
        let policy = AutoReplyPolicy::new(
            vec!["ok".to_string()],
            Duration::from_millis(500)..Duration::from_millis(500),
        );
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(
            policy.draw(&mut rng),
            Some(("ok".to_string(), Duration::from_millis(500)))
        );
    }
}
