//! Invariants of Select/Dropdown under arbitrary event sequences, and
//! listener bookkeeping across open/close/drop.

use std::sync::Arc;
use std::time::{Duration, Instant};

use horizon_anchor::geometry::{Point, Rect, Size};
use horizon_anchor::widget::events::{HoverRegion, InputEvent, Key};
use horizon_anchor::widget::interaction::Trigger;
use horizon_anchor::widget::item::Item;
use horizon_anchor::widget::selection::{Selection, SelectionMode, ValueOwnership};
use horizon_anchor::widget::widgets::{Dropdown, Select};
use horizon_anchor::{ListenerKind, ListenerRegistry, SurfaceOptions};
use parking_lot::Mutex;
use proptest::prelude::*;

fn items() -> Vec<Item<u8>> {
    vec![
        Item::new("alpha", "Alpha", 0),
        Item::new("beta", "Beta", 1).disabled(true),
        Item::new("gamma", "Gamma", 2),
        Item::new("delta", "Delta", 3).disabled(true),
        Item::new("epsilon", "Epsilon", 4),
    ]
}

fn key_strategy() -> impl Strategy<Value = InputEvent> {
    prop_oneof![
        Just(Key::ArrowDown),
        Just(Key::ArrowUp),
        Just(Key::Home),
        Just(Key::End),
        Just(Key::PageDown),
        Just(Key::Enter),
        Just(Key::Space),
        Just(Key::Escape),
        Just(Key::Backspace),
    ]
    .prop_map(InputEvent::key)
}

fn pointer_strategy() -> impl Strategy<Value = InputEvent> {
    prop_oneof![
        (0.0f32..400.0, 0.0f32..400.0).prop_map(|(x, y)| InputEvent::click(x, y)),
        (0.0f32..400.0, 0.0f32..400.0).prop_map(|(x, y)| InputEvent::PointerMove {
            position: Point::new(x, y),
        }),
        Just(InputEvent::HoverEnter(HoverRegion::Anchor)),
        Just(InputEvent::HoverLeave(HoverRegion::Anchor)),
        Just(InputEvent::HoverEnter(HoverRegion::Surface)),
        Just(InputEvent::HoverLeave(HoverRegion::Surface)),
        Just(InputEvent::FocusOut),
    ]
}

fn event_strategy() -> impl Strategy<Value = InputEvent> {
    prop_oneof![
        3 => key_strategy(),
        2 => pointer_strategy(),
        1 => "[a-z]{1,2}".prop_map(|text: String| InputEvent::type_text(text)),
    ]
}

fn mounted(options: &SurfaceOptions) -> Select<u8> {
    let now = Instant::now();
    let mut select = Select::from_options(options).with_items(items());
    select.handle_event(&InputEvent::ViewportResize(Size::new(800.0, 600.0)), now);
    select.handle_event(&InputEvent::AnchorGeometry(Some(Rect::new(20.0, 20.0, 160.0, 30.0))), now);
    select
}

fn record(select: &Select<u8>) -> Arc<Mutex<Vec<Selection<u8>>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    select.changed().connect(move |s| sink.lock().push(s.clone()));
    log
}

proptest! {
    #[test]
    fn closed_means_empty_query_and_no_highlight(
        events in prop::collection::vec(event_strategy(), 0..40),
        multiple in any::<bool>(),
        hover in any::<bool>(),
    ) {
        let options = SurfaceOptions {
            mode: if multiple { SelectionMode::Multiple } else { SelectionMode::Single },
            trigger: if hover { Trigger::Hover } else { Trigger::Click },
            allow_search: true,
            ..SurfaceOptions::default()
        };
        let mut select = mounted(&options);
        let mut now = Instant::now();

        for event in &events {
            now += Duration::from_millis(50);
            select.handle_event(event, now);
            select.advance(now);
            if let Some(row) = select.highlighted() {
                prop_assert!(row < select.visible_items().len());
            }
            if !select.is_open() {
                prop_assert_eq!(select.query(), "");
                prop_assert_eq!(select.highlighted(), None);
                prop_assert!(select.placement().is_none());
                prop_assert_eq!(select.visible_items().len(), items().len());
            }
        }
        select.close();

        prop_assert!(!select.is_open());
        prop_assert_eq!(select.query(), "");
        prop_assert_eq!(select.highlighted(), None);
        prop_assert!(select.placement().is_none());
    }

    #[test]
    fn set_query_never_leaves_a_closed_surface_filtered(
        queries in prop::collection::vec("[a-z]{0,3}", 1..8),
        closes in prop::collection::vec(any::<bool>(), 1..8),
    ) {
        let mut select = mounted(&SurfaceOptions {
            allow_search: true,
            ..SurfaceOptions::default()
        });

        for (query, close) in queries.iter().zip(closes.iter().cycle()) {
            select.set_query(query.as_str());
            if *close {
                select.close();
            }
            if !select.is_open() {
                prop_assert_eq!(select.query(), "");
                prop_assert_eq!(select.visible_items().len(), items().len());
            }
        }
    }

    #[test]
    fn hover_surface_closes_after_grace_once_the_pointer_leaves(
        close_with_escape in any::<bool>(),
        reopen_after_ms in 0u64..5_000,
    ) {
        let mut select = mounted(&SurfaceOptions {
            trigger: Trigger::Hover,
            ..SurfaceOptions::default()
        });
        let t0 = Instant::now();

        select.handle_event(&InputEvent::HoverEnter(HoverRegion::Anchor), t0);
        select.handle_event(&InputEvent::HoverLeave(HoverRegion::Anchor), t0);
        select.handle_event(&InputEvent::HoverEnter(HoverRegion::Surface), t0);
        // Closes with the pointer still over the surface.
        if close_with_escape {
            select.handle_event(&InputEvent::key(Key::Escape), t0);
        } else {
            let rect = select.surface().surface_rect().unwrap();
            let row_height = SurfaceOptions::default().row_height;
            select.handle_event(
                &InputEvent::click(rect.center().x, rect.top() + row_height / 2.0),
                t0,
            );
        }
        prop_assert!(!select.is_open());

        let t1 = t0 + Duration::from_millis(reopen_after_ms);
        select.handle_event(&InputEvent::HoverEnter(HoverRegion::Anchor), t1);
        prop_assert!(select.is_open());
        select.handle_event(&InputEvent::HoverLeave(HoverRegion::Anchor), t1);
        prop_assert_eq!(select.next_deadline(t1), Some(Duration::from_millis(200)));

        select.advance(t1 + Duration::from_secs(10));
        prop_assert!(!select.is_open());
        prop_assert_eq!(select.query(), "");
        prop_assert_eq!(select.highlighted(), None);
        prop_assert!(select.placement().is_none());
    }

    #[test]
    fn disabled_items_never_selected(
        events in prop::collection::vec(event_strategy(), 0..40),
        multiple in any::<bool>(),
    ) {
        let options = SurfaceOptions {
            mode: if multiple { SelectionMode::Multiple } else { SelectionMode::Single },
            ..SurfaceOptions::default()
        };
        let mut select = mounted(&options);
        let changes = record(&select);
        let mut now = Instant::now();

        for event in &events {
            now += Duration::from_millis(10);
            select.handle_event(event, now);
        }

        for change in changes.lock().iter() {
            prop_assert!(!change.contains(&1));
            prop_assert!(!change.contains(&3));
        }
        prop_assert!(!select.selected().contains(&1));
        prop_assert!(!select.selected().contains(&3));
    }

    #[test]
    fn controlled_value_is_never_overwritten(
        events in prop::collection::vec(event_strategy(), 0..40),
    ) {
        let mut select = mounted(&SurfaceOptions::default())
            .with_value(Selection::Single(Some(4)));
        let mut now = Instant::now();

        for event in &events {
            now += Duration::from_millis(10);
            select.handle_event(event, now);
            prop_assert_eq!(select.selected(), &Selection::Single(Some(4)));
        }
    }
}

#[test]
fn test_listeners_released_on_close_and_drop() {
    let registry = ListenerRegistry::new();
    let now = Instant::now();

    let mut first = Select::new(SelectionMode::Single)
        .with_items(items())
        .with_listener_registry(registry.clone());
    let mut second = Dropdown::new(Trigger::Click)
        .with_items(items())
        .with_listener_registry(registry.clone());

    first.open();
    second.open();
    assert_eq!(registry.len(), 4);
    assert_eq!(registry.count_for(first.surface().owner()), 2);
    assert_eq!(registry.owners(ListenerKind::OutsidePointer).len(), 2);

    first.handle_event(&InputEvent::key(Key::Escape), now);
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.count_for(first.surface().owner()), 0);

    drop(second);
    assert!(registry.is_empty());

    first.open();
    first.set_disabled(true);
    assert!(registry.is_empty());
}

#[test]
fn test_uncontrolled_resumes_from_last_commit() {
    let now = Instant::now();
    let mut select = Select::new(SelectionMode::Single)
        .with_items(items())
        .with_value(Selection::Single(Some(0)));

    select.handle_event(&InputEvent::key(Key::ArrowDown), now);
    select.handle_event(&InputEvent::key(Key::End), now);
    select.handle_event(&InputEvent::key(Key::Enter), now);
    assert_eq!(select.selected(), &Selection::Single(Some(0)));

    select.set_ownership(ValueOwnership::Uncontrolled);
    assert_eq!(select.selected(), &Selection::Single(Some(4)));
}

#[test]
fn test_open_changed_fires_once_per_transition() {
    let now = Instant::now();
    let mut select = Select::new(SelectionMode::Single).with_items(items());
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    select.open_changed().connect(move |open| sink.lock().push(*open));

    select.handle_event(&InputEvent::key(Key::ArrowDown), now);
    select.open();
    select.handle_event(&InputEvent::FocusOut, now);
    select.handle_event(&InputEvent::FocusOut, now);

    assert_eq!(*log.lock(), vec![true, false]);
}

#[test]
fn test_skip_disabled_option() {
    let now = Instant::now();
    let mut select = Select::from_options(&SurfaceOptions {
        skip_disabled: true,
        ..SurfaceOptions::default()
    })
    .with_items(items());

    select.open();
    let mut keys = Vec::new();
    for _ in 0..4 {
        select.handle_event(&InputEvent::key(Key::ArrowDown), now);
        keys.push(select.highlighted_item().map(|i| i.key.clone()).unwrap());
    }
    assert_eq!(keys, vec!["alpha", "gamma", "epsilon", "alpha"]);
}
