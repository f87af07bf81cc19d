//! Terminal front end — ratatui presentation of the game controller.
//!
//! ## Architecture (TEA)
//!
//! Model (`TuiApp`) + Update (message handler) + View (render).
//! Immediate mode, no retained widget state. The view only reads the
//! controller; the controller is only mutated from `TuiApp::update`.

pub mod app;
pub mod dashboard;
pub mod event;
pub mod input;
pub mod layout;
pub mod runner;
