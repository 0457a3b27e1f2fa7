//! lightwared - Lightware device metrics poller library.
//!
//! This library provides the core functionality behind the `lightwared`
//! daemon: it polls Lightware AV-matrix devices over HTTP(S), resolves a
//! set of identity tags per device, fetches a configurable list of value
//! paths, type-converts the responses and hands the assembled records to
//! a [`sink::MetricSink`].

pub mod collector;
pub mod config;
pub mod sink;
pub mod util;
