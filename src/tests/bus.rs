use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;

use crate::bus::Observable;
use crate::core::{EventPoint, UpdateType};
use crate::testing::sample_point;

#[test]
fn listeners_fire_in_subscription_order() {
    let observable: Observable<EventPoint> = Observable::new();
    let order = Arc::new(Mutex::new(Vec::new()));

    for tag in 0..3 {
        let order = order.clone();
        observable.subscribe(move |_, _| order.lock().unwrap().push(tag));
    }
    observable.notify(UpdateType::Minor, None);

    assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
}

#[test]
fn listeners_receive_update_kind_and_payload() {
    let observable: Observable<EventPoint> = Observable::new();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let sink = seen.clone();
    observable.subscribe(move |update_type, payload| {
        sink.lock()
            .unwrap()
            .push((update_type, payload.map(|point| point.id.clone())));
    });

    let point = sample_point("p1", "2024-01-01T10:00:00Z", "2024-01-01T12:00:00Z", 100);
    observable.notify(UpdateType::Patch, Some(&point));
    observable.notify(UpdateType::Minor, None);

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            (UpdateType::Patch, Some("p1".to_string())),
            (UpdateType::Minor, None),
        ]
    );
}

#[test]
fn unsubscribe_stops_future_notifications() {
    let observable: Observable<EventPoint> = Observable::new();
    let count = Arc::new(Mutex::new(0));

    let sink = count.clone();
    let id = observable.subscribe(move |_, _| *sink.lock().unwrap() += 1);

    observable.notify(UpdateType::Minor, None);
    assert!(observable.unsubscribe(id));
    observable.notify(UpdateType::Minor, None);

    assert_eq!(*count.lock().unwrap(), 1);
    assert_eq!(observable.listener_count(), 0);
}

#[test]
fn unsubscribe_unknown_id_is_a_no_op() {
    let observable: Observable<EventPoint> = Observable::new();
    assert!(!observable.unsubscribe(42));
}

#[test]
fn unsubscribing_during_notification_keeps_the_current_delivery_intact() {
    let observable = Arc::new(Observable::<EventPoint>::new());
    let hits = Arc::new(Mutex::new(Vec::new()));

    // First listener removes the second mid-delivery; the second still
    // receives the in-flight notification, then nothing afterwards.
    let second_id = Arc::new(Mutex::new(None));
    {
        let observable = observable.clone();
        let second_id = second_id.clone();
        let hits = hits.clone();
        observable.clone().subscribe(move |_, _| {
            hits.lock().unwrap().push("first");
            if let Some(id) = second_id.lock().unwrap().take() {
                observable.unsubscribe(id);
            }
        });
    }
    {
        let hits = hits.clone();
        let id = observable.subscribe(move |_, _| hits.lock().unwrap().push("second"));
        *second_id.lock().unwrap() = Some(id);
    }

    observable.notify(UpdateType::Minor, None);
    observable.notify(UpdateType::Minor, None);

    assert_eq!(*hits.lock().unwrap(), vec!["first", "second", "first"]);
}
