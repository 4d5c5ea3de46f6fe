/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::collections::HashMap;
use std::time::{Duration, Instant};

use backon::{BackoffBuilder, ExponentialBuilder};
use log::warn;

use crate::graph::node::NodeId;

const VIEW_CREATION_MAX_RETRIES: u8 = 3;
const VIEW_CREATION_COOLDOWN_MIN: Duration = Duration::from_secs(1);
const VIEW_CREATION_COOLDOWN_MAX: Duration = Duration::from_secs(30);
const VIEW_CREATION_COOLDOWN_MAX_STEP: usize = 8;

#[derive(Default, Debug, Clone)]
struct CreationBackpressureState {
    retry_count: u8,
    cooldown_until: Option<Instant>,
    cooldown_step: usize,
}

fn creation_cooldown_delay(step: usize) -> Duration {
    let capped_step = step.min(VIEW_CREATION_COOLDOWN_MAX_STEP);
    ExponentialBuilder::default()
        .with_min_delay(VIEW_CREATION_COOLDOWN_MIN)
        .with_max_delay(VIEW_CREATION_COOLDOWN_MAX)
        .with_factor(2.0)
        .with_max_times(capped_step.saturating_add(1))
        .build()
        .nth(capped_step)
        .unwrap_or(VIEW_CREATION_COOLDOWN_MAX)
}

/// Per-node creation throttle. A failed create arms an exponential cooldown;
/// after `VIEW_CREATION_MAX_RETRIES` failures the node is left alone until
/// [`ViewCreationBackpressure::reset`] is called for it.
#[derive(Default, Debug, Clone)]
pub struct ViewCreationBackpressure {
    nodes: HashMap<NodeId, CreationBackpressureState>,
}

impl ViewCreationBackpressure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_create(&self, node_id: &NodeId, now: Instant) -> bool {
        let Some(state) = self.nodes.get(node_id) else {
            return true;
        };
        if state.retry_count >= VIEW_CREATION_MAX_RETRIES {
            return false;
        }
        state.cooldown_until.is_none_or(|until| now >= until)
    }

    pub fn is_exhausted(&self, node_id: &NodeId) -> bool {
        self.nodes
            .get(node_id)
            .is_some_and(|s| s.retry_count >= VIEW_CREATION_MAX_RETRIES)
    }

    /// Record a failed create and return the cooldown that was armed.
    pub fn note_failure(&mut self, node_id: &NodeId, now: Instant) -> Duration {
        let state = self.nodes.entry(node_id.clone()).or_default();
        let delay = creation_cooldown_delay(state.cooldown_step);
        state.retry_count = state.retry_count.saturating_add(1);
        state.cooldown_step = state.cooldown_step.saturating_add(1);
        state.cooldown_until = Some(now + delay);
        if state.retry_count >= VIEW_CREATION_MAX_RETRIES {
            warn!(
                "view creation for {node_id} failed {} times; giving up until reload",
                state.retry_count
            );
        }
        delay
    }

    pub fn note_success(&mut self, node_id: &NodeId) {
        self.nodes.remove(node_id);
    }

    /// Forget failures, e.g. after the URL changed or the user reloaded.
    pub fn reset(&mut self, node_id: &NodeId) {
        self.nodes.remove(node_id);
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(5)]
    #[case(usize::MAX)]
    fn test_creation_cooldown_delay_is_bounded(#[case] step: usize) {
        let delay = creation_cooldown_delay(step);
        assert!(delay >= VIEW_CREATION_COOLDOWN_MIN);
        assert!(delay <= VIEW_CREATION_COOLDOWN_MAX);
    }

    #[test]
    fn test_first_cooldown_is_minimum() {
        assert_eq!(creation_cooldown_delay(0), VIEW_CREATION_COOLDOWN_MIN);
    }

    #[test]
    fn test_failure_arms_cooldown_until_elapsed() {
        let mut backpressure = ViewCreationBackpressure::new();
        let node = NodeId::from("node_1");
        let now = Instant::now();

        let delay = backpressure.note_failure(&node, now);

        assert_eq!(delay, Duration::from_secs(1));
        assert!(!backpressure.can_create(&node, now));
        assert!(backpressure.can_create(&node, now + delay));
    }

    #[test]
    fn test_exhausted_retries_block_until_reset() {
        let mut backpressure = ViewCreationBackpressure::new();
        let node = NodeId::from("node_1");
        let now = Instant::now();
        for _ in 0..VIEW_CREATION_MAX_RETRIES {
            backpressure.note_failure(&node, now);
        }

        assert!(backpressure.is_exhausted(&node));
        assert!(!backpressure.can_create(&node, now + Duration::from_secs(3600)));

        backpressure.reset(&node);
        assert!(backpressure.can_create(&node, now));
    }
}
