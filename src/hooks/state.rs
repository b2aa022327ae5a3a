//! State hook: use_proxy_state
//!
//! The crate's main entry point: a per-component reactive state container
//! whose writes schedule a re-render of the owning component.

use serde::Serialize;
use serde_json::{Map, Value};

use super::slot::use_hook;
use super::trigger::use_render_trigger;
use crate::store::ProxyState;

/// Returns a per-component [`ProxyState`] seeded from `initial`.
///
/// On the component's first render the initial map is copied into a fresh
/// backing store and bound to the component's stable render trigger. Every
/// later render returns the *same* container - the construction is
/// memoized for the component's whole lifetime, so mutations survive
/// re-renders. When the component unmounts, the container is dropped with
/// it.
///
/// Writes through the returned handle (`set`, `update`) apply the mutation
/// and then schedule a re-render, one notification per write.
///
/// # Arguments
///
/// * `initial` - The initial state; copied, never aliased, and only read on
///   the first render
///
/// # Panics
///
/// Panics when called outside a component render scope.
///
/// # Example
///
/// ```ignore
/// use proxy_state::{mount, use_proxy_state};
/// use serde_json::json;
///
/// let handle = mount(|| {
///     let initial = json!({"count": 0});
///     let state = use_proxy_state(initial.as_object().unwrap());
///
///     let count = state.get_as::<i64>("count").unwrap_or(0);
///     // render `count`; an event handler calls state.set("count", count + 1)
/// });
/// ```
pub fn use_proxy_state(initial: &Map<String, Value>) -> ProxyState {
	let trigger = use_render_trigger();
	let state = use_hook(move || ProxyState::new(initial, trigger));
	(*state).clone()
}

/// Typed variant of [`use_proxy_state`]: seeds the container from any
/// serializable value with an object shape.
///
/// # Panics
///
/// Panics when called outside a component render scope, and when `initial`
/// does not serialize to an object (a scalar or array initial state is a
/// programming error, not a runtime condition).
///
/// # Example
///
/// ```ignore
/// #[derive(Serialize)]
/// struct Counter { count: i64 }
///
/// let state = use_proxy_state_from(&Counter { count: 0 });
/// ```
pub fn use_proxy_state_from<T: Serialize>(initial: &T) -> ProxyState {
	let trigger = use_render_trigger();
	let state = use_hook(move || match ProxyState::from_serialize(initial, trigger) {
		Ok(state) => state,
		Err(err) => panic!("use_proxy_state_from: invalid initial state: {err}"),
	});
	(*state).clone()
}
