//! React-like hooks for per-component state.
//!
//! Hooks may only be called while a component is rendering (inside the
//! closure passed to [`mount`](crate::component::mount)), and must run in
//! the same order on every render - slot storage is positional.
//!
//! - [`use_hook`] - run an initializer exactly once per component instance
//! - [`use_render_trigger`] - the component's stable re-render trigger
//! - [`use_proxy_state`] - per-component reactive state container

mod slot;
mod state;
mod trigger;

pub use slot::use_hook;
pub use state::{use_proxy_state, use_proxy_state_from};
pub use trigger::use_render_trigger;
