// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::*;
use parking_lot::Mutex as PlMutex;

type Deliveries<H> = Arc<PlMutex<Vec<(H, usize)>>>;

fn recording_listener<H: Clone + Send + Sync + 'static>(
    handle: H,
) -> (Listener<H>, Deliveries<H>) {
    let log: Deliveries<H> = Arc::new(PlMutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let listener = Listener::new(
        move |h: &H, count: usize| sink.lock().push((h.clone(), count)),
        handle,
    );
    (listener, log)
}

#[test]
fn new_latch_is_unattended_and_empty() {
    let latch: EventLatch = EventLatch::new(ReplayMode::Coalesced);
    assert!(!latch.is_attended());
    assert_eq!(latch.pending_count(), 0);
    assert_eq!(latch.replay_mode(), ReplayMode::Coalesced);
}

#[test]
fn unattended_triggers_buffer() {
    let latch: EventLatch = EventLatch::new(ReplayMode::Coalesced);
    latch.trigger();
    latch.trigger();
    latch.trigger();
    assert_eq!(latch.pending_count(), 3);
}

#[test]
fn poll_after_triggers_returns_true_then_false() {
    let latch: EventLatch = EventLatch::new(ReplayMode::Coalesced);
    for _ in 0..3 {
        latch.trigger();
    }
    assert!(latch.poll_and_reset());
    assert_eq!(latch.pending_count(), 0);
    assert!(!latch.poll_and_reset());
}

#[test]
fn poll_toggles_without_new_triggers() {
    let latch: EventLatch = EventLatch::new(ReplayMode::Coalesced);
    latch.trigger();
    assert!(latch.poll_and_reset());
    assert!(!latch.poll_and_reset());
    assert!(latch.poll_and_reset());
    assert!(!latch.poll_and_reset());
}

#[test]
fn poll_on_fresh_latch_starts_false() {
    let latch: EventLatch = EventLatch::new(ReplayMode::Coalesced);
    assert!(!latch.poll_and_reset());
    assert!(latch.poll_and_reset());
}

#[test]
fn coalesced_replay_delivers_backlog_in_one_call() {
    let latch: EventLatch = EventLatch::new(ReplayMode::Coalesced);
    latch.trigger();
    latch.trigger();

    let (listener, log) = recording_listener(());
    latch.register(Some(listener), true);
    assert_eq!(*log.lock(), vec![((), 2)]);
    assert_eq!(latch.pending_count(), 0);

    latch.trigger();
    assert_eq!(*log.lock(), vec![((), 2), ((), 1)]);
    assert_eq!(latch.pending_count(), 0);
}

#[test]
fn per_event_replay_delivers_each_trigger_with_handle() {
    let latch = EventLatch::new(ReplayMode::PerEvent);
    for _ in 0..3 {
        latch.trigger();
    }

    let token = SourceToken::new(0xfeed);
    let (listener, log) = recording_listener(token);
    latch.register(Some(listener), true);

    assert_eq!(*log.lock(), vec![(token, 1), (token, 1), (token, 1)]);
    assert_eq!(latch.pending_count(), 0);
}

#[test]
fn replay_skipped_when_nothing_buffered() {
    let latch: EventLatch = EventLatch::new(ReplayMode::Coalesced);
    let (listener, log) = recording_listener(());
    latch.register(Some(listener), true);
    assert!(log.lock().is_empty());
}

#[test]
fn registration_without_replay_drops_backlog() {
    let latch: EventLatch = EventLatch::new(ReplayMode::Coalesced);
    latch.trigger();
    latch.trigger();

    let (listener, log) = recording_listener(());
    latch.register(Some(listener), false);
    assert!(log.lock().is_empty());
    assert_eq!(latch.pending_count(), 0);

    latch.trigger();
    assert_eq!(*log.lock(), vec![((), 1)]);
}

#[test]
fn registration_clears_unread_flag() {
    let latch: EventLatch = EventLatch::new(ReplayMode::Coalesced);
    latch.trigger();

    let (listener, _log) = recording_listener(());
    latch.register(Some(listener), true);
    latch.register(None, false);

    // Replayed trigger must not surface again through a poll.
    assert!(!latch.poll_and_reset());
}

#[test]
fn attended_triggers_invoke_handler_synchronously() {
    let latch: EventLatch = EventLatch::new(ReplayMode::Coalesced);
    let (listener, log) = recording_listener(());
    latch.register(Some(listener), true);

    for expected in 1..=5 {
        latch.trigger();
        assert_eq!(log.lock().len(), expected);
    }
    assert_eq!(latch.pending_count(), 0);
    assert!(!latch.poll_and_reset());
}

#[test]
fn unregister_returns_to_buffering() {
    let latch: EventLatch = EventLatch::new(ReplayMode::Coalesced);
    let (listener, log) = recording_listener(());
    latch.register(Some(listener), true);
    latch.trigger();

    latch.register(None, true);
    assert!(!latch.is_attended());

    latch.trigger();
    latch.trigger();
    assert_eq!(log.lock().len(), 1);
    assert_eq!(latch.pending_count(), 2);
    assert!(latch.poll_and_reset());
}

#[test]
fn unregister_on_unattended_latch_is_noop() {
    let latch: EventLatch = EventLatch::new(ReplayMode::PerEvent);
    latch.trigger();
    latch.register(None, true);
    assert_eq!(latch.pending_count(), 1);
}

#[test]
fn replacing_listener_routes_to_newest() {
    let latch = EventLatch::new(ReplayMode::PerEvent);
    let (first, first_log) = recording_listener(SourceToken::new(1));
    let (second, second_log) = recording_listener(SourceToken::new(2));

    latch.register(Some(first), true);
    latch.trigger();
    latch.register(Some(second), true);
    latch.trigger();

    assert_eq!(*first_log.lock(), vec![(SourceToken::new(1), 1)]);
    assert_eq!(*second_log.lock(), vec![(SourceToken::new(2), 1)]);
}

#[test]
fn shared_handler_serves_multiple_latches() {
    let log: Deliveries<SourceToken> = Arc::new(PlMutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let handler: Arc<dyn EventHandler<SourceToken>> =
        Arc::new(move |h: &SourceToken, count: usize| sink.lock().push((*h, count)));

    let a = EventLatch::new(ReplayMode::PerEvent);
    let b = EventLatch::new(ReplayMode::PerEvent);
    a.register(
        Some(Listener::from_shared(Arc::clone(&handler), SourceToken::new(10))),
        true,
    );
    b.register(
        Some(Listener::from_shared(handler, SourceToken::new(20))),
        true,
    );

    b.trigger();
    a.trigger();
    assert_eq!(
        *log.lock(),
        vec![(SourceToken::new(20), 1), (SourceToken::new(10), 1)]
    );
}

#[test]
fn debug_output_reports_state() {
    let latch: EventLatch = EventLatch::new(ReplayMode::Coalesced);
    latch.trigger();
    let rendered = format!("{:?}", latch);
    assert!(rendered.contains("pending: 1"), "{}", rendered);
    assert!(rendered.contains("attended: false"), "{}", rendered);
}
