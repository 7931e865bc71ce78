//! Core of a browser-rendered economic dashboard: several independently
//! sourced time series (egg prices, gas prices, device and vehicle prices,
//! interest rates, a market index) aligned on a shared date axis, plus a feed
//! of dated policy events for annotation.
//!
//! The pipeline is deliberately stateless: fetchers populate a [`store::SeriesStore`]
//! and an event list once, and every render cycle is a single call to
//! [`pipeline::build_dashboard`] with an immutable [`config::ChartConfig`]
//! describing the user's current selection, transforms, and filters.

pub mod analysis;
pub mod config;
pub mod events;
pub mod fetcher;
pub mod frame;
pub mod loader;
pub mod models;
pub mod pipeline;
pub mod rate_limiter;
pub mod registry;
pub mod store;
pub mod transform;
