// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::missing_panics_doc)] // Tests panic on failure

//! Concurrent acquire/release against one shared lifecycle.

use rmw_stub::{Error, ResourceFactory, Result, SharedLifecycle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

const THREADS: usize = 16;

#[derive(Default)]
struct Counts {
    created: AtomicUsize,
    destroyed: AtomicUsize,
}

struct SlowFactory(Arc<Counts>);

impl ResourceFactory for SlowFactory {
    type Resource = ();

    fn create(&self) -> Result<()> {
        // widen the window in which a second acquirer could slip through
        thread::sleep(Duration::from_millis(fastrand::u64(1..5)));
        self.0.created.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn destroy(&self, _resource: ()) {
        self.0.destroyed.fetch_add(1, Ordering::SeqCst);
    }
}

type Lifecycle = SharedLifecycle<SlowFactory>;

fn lifecycle() -> (Arc<Lifecycle>, Arc<Counts>) {
    let counts = Arc::new(Counts::default());
    (
        Arc::new(SharedLifecycle::new(SlowFactory(Arc::clone(&counts)))),
        counts,
    )
}

fn run_all(lifecycle: &Arc<Lifecycle>, op: fn(&Lifecycle) -> Result<()>) {
    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let lifecycle = Arc::clone(lifecycle);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                op(&lifecycle)
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker thread").expect("lifecycle op");
    }
}

#[test]
fn concurrent_acquires_construct_once_and_releases_destroy_once() {
    let (lifecycle, factory) = lifecycle();

    run_all(&lifecycle, SharedLifecycle::acquire);
    assert_eq!(lifecycle.ref_count(), THREADS);
    assert_eq!(factory.created.load(Ordering::SeqCst), 1);
    assert_eq!(factory.destroyed.load(Ordering::SeqCst), 0);

    run_all(&lifecycle, SharedLifecycle::release);
    assert_eq!(lifecycle.ref_count(), 0);
    assert_eq!(factory.created.load(Ordering::SeqCst), 1);
    assert_eq!(factory.destroyed.load(Ordering::SeqCst), 1);

    assert_eq!(lifecycle.release(), Err(Error::UnbalancedRelease));
    assert_eq!(factory.destroyed.load(Ordering::SeqCst), 1);
}

#[test]
fn guards_dropped_across_threads_tear_down_once() {
    let (lifecycle, factory) = lifecycle();

    let guards: Vec<_> = (0..THREADS)
        .map(|_| lifecycle.acquire_guard().expect("guard"))
        .collect();
    assert_eq!(lifecycle.ref_count(), THREADS);

    let handles: Vec<_> = guards
        .into_iter()
        .map(|guard| thread::spawn(move || drop(guard)))
        .collect();
    for handle in handles {
        handle.join().expect("dropper thread");
    }

    assert_eq!(lifecycle.ref_count(), 0);
    assert_eq!(factory.destroyed.load(Ordering::SeqCst), 1);
}

#[test]
fn shutdown_racing_acquires_never_overcounts() {
    let (lifecycle, factory) = lifecycle();
    let accepted = Arc::new(AtomicUsize::new(0));
    let barrier = Arc::new(Barrier::new(THREADS + 1));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let lifecycle = Arc::clone(&lifecycle);
            let accepted = Arc::clone(&accepted);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                match lifecycle.acquire() {
                    Ok(()) => {
                        accepted.fetch_add(1, Ordering::SeqCst);
                    }
                    Err(err) => assert!(matches!(err, Error::InvalidState(_))),
                }
            })
        })
        .collect();

    barrier.wait();
    lifecycle.shutdown();
    for handle in handles {
        handle.join().expect("worker thread");
    }

    let accepted = accepted.load(Ordering::SeqCst);
    assert_eq!(lifecycle.ref_count(), accepted);
    for _ in 0..accepted {
        lifecycle.release().expect("release");
    }
    assert_eq!(lifecycle.ref_count(), 0);
    assert_eq!(
        factory.created.load(Ordering::SeqCst),
        factory.destroyed.load(Ordering::SeqCst)
    );
}
