//! Multi-account message dispatch.
//!
//! A [`SessionProvider`] turns account credentials into open
//! [`AccountSession`]s. The [`SessionPool`] holds every account that
//! authenticated successfully, and [`dispatch::run`] walks the message list
//! once per pooled account, rotating the sender after each full pass.

pub mod dispatch;
pub mod params;
pub mod pool;
pub mod provider;

#[cfg(test)]
pub(crate) mod testing;

pub use {
    dispatch::{DispatchError, DispatchEvent, DispatchOutcome, DispatchReport, OnDispatchEvent},
    params::{DispatchParams, ParamError},
    pool::{PoolError, PooledSession, SessionPool},
    provider::{AccountSession, SessionError, SessionProvider},
};
