//! Concrete mini-game definitions built on the engine.
//!
//! Each game module declares its symbols, its data tables (tone pools,
//! levels, recipes, item sets, sorting rules), and an `engine` constructor
//! wiring a `SessionConfig` and a round source together. Rendering stays
//! behind the `Presenter` contract; the modules only expose the data a
//! presenter needs (tones, shapes, emoji, plank traits).

pub mod audio_memory;
pub mod color_chemist;
pub mod pattern_bridge;
pub mod shadow_detective;
pub mod sorting_hero;
