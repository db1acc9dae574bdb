//! Phase handlers.
//!
//! One handler per lifecycle phase. Each emits its start/end log pair via
//! [`RequestLog`](crate::request_log::RequestLog) and applies its phase's
//! side effects on the shared [`Lifecycle`](crate::lifecycle::Lifecycle)
//! state; only Initialize ever writes to it.

mod freeze;
mod initialize;
mod invoke;
mod stop;

pub(crate) use freeze::pre_freeze;
pub(crate) use initialize::initialize;
pub(crate) use invoke::invoke;
pub(crate) use stop::pre_stop;
