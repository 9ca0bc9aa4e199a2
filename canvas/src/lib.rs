//! Decorative canvas backdrop for the portfolio site.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns an
//! ambient particle field (points drifting across the viewport, linked by
//! faint lines when close, pushed away by the pointer) and the click-ripple
//! effect. The host page only supplies a `<canvas>` and calls
//! `mountBackdrop`.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`field`] | Particle simulation and drawing ([`field::FieldCore`]) |
//! | [`particle`] | A single point-mass |
//! | [`ripple`] | Click ripples and their id [`ripple::Sequence`] |
//! | [`mount`] | Mount/unmount lifecycle over the [`mount::Host`] seam |
//! | [`render`] | The [`render::Surface`] drawing seam and its canvas impl |
//! | [`input`] | Pointer state and subscribed host events |
//! | [`geom`] | Points, viewport and toroidal wrap |
//! | [`config`] | Field parameters and validation |
//! | [`consts`] | Default numeric constants |
//! | `web` | Browser host and JS entry point (`wasm32` only) |

pub mod config;
pub mod consts;
pub mod field;
pub mod geom;
pub mod input;
pub mod mount;
pub mod particle;
pub mod render;
pub mod ripple;

#[cfg(target_arch = "wasm32")]
pub mod web;
