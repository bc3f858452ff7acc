//! lanedrag
//!
//! Headless drag-and-drop engine for reordering cards within and across
//! scrollable lanes: drag threshold and long press, live local reordering,
//! cross-lane transfer, edge-triggered auto-scroll, and a single commit
//! event per completed drag.
//!
//! Pure core, impure shell: [`state`] holds the engine as functions over
//! immutable snapshots, [`layout`] is the measurement seam, and the
//! [`fixture`], [`script`] and [`replay`] modules drive the engine from
//! files for the `lanedrag` binary.

pub mod config;
pub mod fixture;
pub mod layout;
pub mod logging;
pub mod model;
pub mod replay;
pub mod script;
pub mod state;
