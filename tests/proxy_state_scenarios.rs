//! Integration tests for the reactive proxy-state container.
//!
//! These tests verify the end-to-end behavior through the public API:
//! 1. Writes are applied before the notification fires (read-after-write)
//! 2. Every write schedules exactly one re-render request (no batching)
//! 3. Construction is memoized per component instance
//! 4. The initial state is copied, never aliased

use proxy_state::{
	ProxyState, RenderTrigger, flush_renders, mount, pending_render_requests, use_proxy_state,
	with_runtime,
};
use serde_json::{Map, Value, json};
use serial_test::serial;
use std::cell::RefCell;
use std::rc::Rc;

fn object(value: Value) -> Map<String, Value> {
	match value {
		Value::Object(map) => map,
		other => panic!("expected object, got {other:?}"),
	}
}

/// Mounts a component exposing its state handle and the values it observed
/// on each render.
fn mount_counter() -> (
	proxy_state::MountHandle,
	Rc<RefCell<Option<ProxyState>>>,
	Rc<RefCell<Vec<Option<i64>>>>,
) {
	let state_out: Rc<RefCell<Option<ProxyState>>> = Rc::new(RefCell::new(None));
	let observed: Rc<RefCell<Vec<Option<i64>>>> = Rc::new(RefCell::new(Vec::new()));

	let state_clone = state_out.clone();
	let observed_clone = observed.clone();
	let handle = mount(move || {
		let state = use_proxy_state(&object(json!({"count": 0})));
		observed_clone.borrow_mut().push(state.get_as::<i64>("count"));
		*state_clone.borrow_mut() = Some(state);
	});

	(handle, state_out, observed)
}

/// Scenario from the design notes: construct {count: 0}, write 1, the
/// trigger fires once, and a read observes 1.
#[test]
#[serial]
fn test_counter_scenario() {
	let (handle, state, observed) = mount_counter();
	let state = state.borrow().clone().unwrap();

	state.set("count", 1);

	// Exactly one render request queued, and the write is already visible
	// before any re-render happens.
	assert_eq!(pending_render_requests(), 1);
	assert_eq!(state.get_as::<i64>("count"), Some(1));

	flush_renders();
	assert_eq!(*observed.borrow(), vec![Some(0), Some(1)]);
	assert_eq!(handle.render_count(), 2);
}

/// Two writes to two keys fire the trigger twice; both reads observe the
/// written values.
#[test]
#[serial]
fn test_two_field_scenario() {
	let state_out: Rc<RefCell<Option<ProxyState>>> = Rc::new(RefCell::new(None));

	let state_clone = state_out.clone();
	let _handle = mount(move || {
		let state = use_proxy_state(&object(json!({"x": 1, "y": 2})));
		*state_clone.borrow_mut() = Some(state);
	});

	let state = state_out.borrow().clone().unwrap();
	state.set("x", 10);
	state.set("y", 20);

	assert_eq!(pending_render_requests(), 2);
	assert_eq!(state.get_as::<i64>("x"), Some(10));
	assert_eq!(state.get_as::<i64>("y"), Some(20));

	flush_renders();
	assert_eq!(pending_render_requests(), 0);
}

/// N sequential writes produce N notifications - nothing deduplicates
/// across writes within the same turn.
#[test]
#[serial]
fn test_n_writes_produce_n_requests() {
	let (_handle, state, _observed) = mount_counter();
	let state = state.borrow().clone().unwrap();

	for i in 0..7 {
		state.set("count", i);
	}

	assert_eq!(pending_render_requests(), 7);
	flush_renders();
}

/// Writing a key absent from the initial state succeeds and is readable.
#[test]
#[serial]
fn test_shape_extension_through_hooks() {
	let (_handle, state, _observed) = mount_counter();
	let state = state.borrow().clone().unwrap();

	state.set("new_key", 5);

	assert_eq!(state.get("new_key"), Some(json!(5)));
	flush_renders();
}

/// The construction path yields the same handle on every render of the
/// same instance - memoized, not rebuilt.
#[test]
#[serial]
fn test_construction_is_memoized_per_instance() {
	let (handle, state, _observed) = mount_counter();
	let first = state.borrow().clone().unwrap();

	first.set("count", 41);
	flush_renders();
	first.set("count", 42);
	flush_renders();

	let latest = state.borrow().clone().unwrap();
	assert!(ProxyState::ptr_eq(&first, &latest));
	assert_eq!(handle.render_count(), 3);
}

/// Separate component instances get separate backing stores.
#[test]
#[serial]
fn test_instances_do_not_share_state() {
	let (_handle_a, state_a, _) = mount_counter();
	let (_handle_b, state_b, observed_b) = mount_counter();

	let a = state_a.borrow().clone().unwrap();
	let b = state_b.borrow().clone().unwrap();

	assert!(!ProxyState::ptr_eq(&a, &b));

	a.set("count", 100);
	flush_renders();

	assert_eq!(b.get_as::<i64>("count"), Some(0));
	// Only component A re-rendered.
	assert_eq!(*observed_b.borrow(), vec![Some(0)]);
}

/// Mutating the caller's initial map after mount is never observed.
#[test]
#[serial]
fn test_initial_state_is_copied_not_aliased() {
	let initial = Rc::new(RefCell::new(object(json!({"a": 1}))));
	let state_out: Rc<RefCell<Option<ProxyState>>> = Rc::new(RefCell::new(None));

	let initial_clone = initial.clone();
	let state_clone = state_out.clone();
	let _handle = mount(move || {
		let state = use_proxy_state(&initial_clone.borrow());
		*state_clone.borrow_mut() = Some(state);
	});

	initial
		.borrow_mut()
		.insert("a".to_string(), json!(999));

	let state = state_out.borrow().clone().unwrap();
	assert_eq!(state.get("a"), Some(json!(1)));
}

/// Unmounting tears the state down; a surviving trigger becomes inert.
#[test]
#[serial]
fn test_unmount_discards_state_and_pending_renders() {
	let (handle, state, observed) = mount_counter();
	let state = state.borrow().clone().unwrap();

	state.set("count", 5);
	assert_eq!(pending_render_requests(), 1);

	drop(handle);
	assert_eq!(pending_render_requests(), 0);

	// Writes through a surviving handle still apply to the (now detached)
	// store but schedule nothing renderable.
	state.set("count", 6);
	flush_renders();
	assert_eq!(*observed.borrow(), vec![Some(0)]);
}

/// A detached store with an explicit trigger works without any component.
#[test]
#[serial]
fn test_detached_store_with_custom_trigger() {
	let notifications = Rc::new(RefCell::new(0));
	let notifications_clone = notifications.clone();
	let trigger = RenderTrigger::new(move || {
		*notifications_clone.borrow_mut() += 1;
	});

	let state = ProxyState::try_from_value(&json!({"ready": false}), trigger).unwrap();
	state.set("ready", true);

	assert_eq!(*notifications.borrow(), 1);
	assert_eq!(state.get_as::<bool>("ready"), Some(true));
}

/// Writes performed during a re-render are picked up by the next flush
/// pass rather than lost.
#[test]
#[serial]
fn test_write_during_render_cascades_one_pass() {
	let state_out: Rc<RefCell<Option<ProxyState>>> = Rc::new(RefCell::new(None));

	let state_clone = state_out.clone();
	let handle = mount(move || {
		let state = use_proxy_state(&object(json!({"step": 0})));
		// One-shot follow-up write, as an initialization effect would do.
		if state.get_as::<i64>("step") == Some(1) {
			state.set("step", 2);
		}
		*state_clone.borrow_mut() = Some(state);
	});

	let state = state_out.borrow().clone().unwrap();
	state.set("step", 1);
	flush_renders();

	assert_eq!(state.get_as::<i64>("step"), Some(2));
	// Initial render, the step-1 render, and the cascaded step-2 render.
	assert_eq!(handle.render_count(), 3);
	assert_eq!(with_runtime(|rt| rt.pending_render_requests()), 0);
}
