//! Proxy State - Reactive State Container with React-like Hooks
//!
//! A state object whose mutations are intercepted so that every write
//! automatically schedules a re-render of the component that owns it.
//! Calling code performs ordinary `get`/`set` calls on a handle instead of
//! explicit update calls, and still integrates with a declarative
//! re-render model.
//!
//! ## Features
//!
//! - **Intercepted writes**: every mutation flows through one notification
//!   point; N writes fire N notifications, no batching
//! - **Stable trigger identity**: a component's re-render trigger is built
//!   once at mount and reused for every mutation
//! - **Memoized construction**: the container is built exactly once per
//!   component instance; re-renders return the same handle
//! - **Any-shape state**: a dynamic key/value store - writes may introduce
//!   new keys or change a value's type, and never fail
//!
//! ## Architecture
//!
//! This crate consists of several key modules:
//!
//! - [`store`]: the intercepting state container ([`ProxyState`])
//! - [`trigger`]: the stable notification callback ([`RenderTrigger`])
//! - [`runtime`]: thread-local host runtime (component registry, hook
//!   slots, render queue)
//! - [`component`]: mount/unmount and render scheduling
//! - [`hooks`]: `use_proxy_state`, `use_render_trigger`, `use_hook`
//! - [`error`]: construction-time error types
//!
//! ## Example
//!
//! ```ignore
//! use proxy_state::{flush_renders, mount, use_proxy_state};
//! use serde_json::json;
//!
//! let handle = mount(|| {
//!     let initial = json!({"count": 0});
//!     let state = use_proxy_state(initial.as_object().unwrap());
//!
//!     let count = state.get_as::<i64>("count").unwrap_or(0);
//!     render_counter(count, {
//!         let state = state.clone();
//!         move || state.set("count", count + 1) // mutate, trigger fires
//!     });
//! });
//!
//! // After event handlers ran:
//! flush_renders();
//! ```
//!
//! ## Usage hazard: construct once
//!
//! The container must be obtained through [`use_proxy_state`] (or another
//! memoized path) so it is built exactly once per component instance.
//! Rebuilding it on every render silently discards all mutations on the
//! next pass - state appears to vanish rather than raising an error. See
//! the `construct_once_hazard` integration test.
//!
//! ## Scope
//!
//! Only the store's direct keys are reactive - no deep/nested reactivity,
//! no write batching, no deletion interception, no array-specific
//! semantics. Single-threaded by construction.

pub mod component;
pub mod error;
pub mod hooks;
pub mod runtime;
pub mod store;
pub mod trigger;

pub use component::{MountHandle, flush_renders, mount, pending_render_requests};
pub use error::StateError;
pub use hooks::{use_hook, use_proxy_state, use_proxy_state_from, use_render_trigger};
pub use runtime::{ComponentId, Runtime, try_with_runtime, with_runtime};
pub use store::ProxyState;
pub use trigger::RenderTrigger;

// Re-export the value types callers build initial state from.
pub use serde_json::{Map, Value, json};
