// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::*;
use crate::error::Error;
use crate::event_latch::{Listener, SourceToken};
use crate::gid::compare_gids_equal;
use crate::rmw::context::{Context, InitOptions};
use crate::rmw::event::EventType;
use std::sync::atomic::{AtomicUsize, Ordering};

fn context() -> Context {
    Context::init_with_sequences(
        InitOptions::default().enclave("/"),
        Arc::new(EntitySequences::new()),
    )
    .expect("context")
}

#[test]
fn node_exposes_names_and_domain() {
    let ctx = context();
    let node = ctx.create_node("talker", "/demo").expect("node");
    assert_eq!(node.name(), "talker");
    assert_eq!(node.namespace(), "/demo");
    assert_eq!(node.fully_qualified_name(), "/demo/talker");
    assert_eq!(node.domain_id(), Some(0));

    let root = ctx.create_node("listener", "/").expect("node");
    assert_eq!(root.fully_qualified_name(), "/listener");
}

#[test]
fn publishers_get_distinct_gids() {
    let ctx = context();
    let node = ctx.create_node("talker", "/").expect("node");
    let qos = QosProfile::default();

    let a = node
        .create_publisher("/chatter", &qos, PublisherOptions::default())
        .expect("publisher a");
    let b = node
        .create_publisher("/chatter", &qos, PublisherOptions::default())
        .expect("publisher b");

    assert_eq!(a.id(), 0);
    assert_eq!(b.id(), 1);
    assert_eq!(compare_gids_equal(a.gid(), b.gid()), Ok(false));
    assert_eq!(compare_gids_equal(a.gid(), a.gid()), Ok(true));
}

#[test]
fn publisher_and_subscription_with_same_id_have_distinct_gids() {
    let ctx = context();
    let node = ctx.create_node("both", "/").expect("node");
    let qos = QosProfile::default();

    let publisher = node
        .create_publisher("/a", &qos, PublisherOptions::default())
        .expect("publisher");
    let subscription = node
        .create_subscription("/b", &qos, SubscriptionOptions::default())
        .expect("subscription");

    assert_eq!(publisher.id(), subscription.id());
    assert_eq!(
        compare_gids_equal(publisher.gid(), subscription.gid()),
        Ok(false)
    );
}

#[test]
fn invalid_names_are_rejected() {
    let ctx = context();
    let node = ctx.create_node("n", "/").expect("node");
    let qos = QosProfile::default();

    assert!(matches!(
        node.create_publisher("chatter", &qos, PublisherOptions::default()),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        node.create_subscription("", &qos, SubscriptionOptions::default()),
        Err(Error::InvalidArgument(_))
    ));
    assert!(node.create_service("", &qos).is_err());
    assert!(node.create_client("", &qos).is_err());
}

#[test]
fn subscription_callback_and_events() {
    let ctx = context();
    let node = ctx.create_node("listener", "/").expect("node");
    let sub = node
        .create_subscription("/chatter", &QosProfile::default(), SubscriptionOptions::default())
        .expect("subscription");

    let hits = Arc::new(AtomicUsize::new(0));
    let h = Arc::clone(&hits);
    sub.set_on_new_message_callback(Some(Listener::new(
        move |_: &SourceToken, count: usize| {
            h.fetch_add(count, Ordering::SeqCst);
        },
        SourceToken::new(sub.id() as usize),
    )));
    sub.notify_new_message();
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    let event = sub
        .create_event(EventType::SubscriptionMatched)
        .expect("event");
    assert_eq!(event.kind(), EventType::SubscriptionMatched);
}

#[test]
fn service_server_is_never_available() {
    let ctx = context();
    let node = ctx.create_node("client", "/").expect("node");
    let client = node
        .create_client("/add_two_ints", &QosProfile::services_default())
        .expect("client");
    assert!(!node.service_server_is_available(&client));
}

#[test]
fn graph_guard_is_a_plain_guard_condition() {
    let ctx = context();
    let node = ctx.create_node("n", "/").expect("node");
    let guard = node.graph_guard_condition();
    guard.trigger();
    assert!(guard.has_triggered());
    assert!(!guard.has_triggered());
}
