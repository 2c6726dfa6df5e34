// ABOUTME: Library module for the slide-deck program.
// ABOUTME: Contains the deck store, presentation navigator, input handling and persistence.

pub mod backend;
pub mod color;
pub mod config;
pub mod debounce;
pub mod errors;
pub mod input;
pub mod markdown;
pub mod navigator;
pub mod sample;
pub mod session;
pub mod slide;
pub mod store;
pub mod utils;

// Reexport common types and functions
pub use backend::{DeckBackend, JsonFileBackend, MemoryBackend};
pub use color::{hex_to_hsl, hsl_to_hex};
pub use config::Config;
pub use debounce::{SaveDebouncer, SlideEditSession};
pub use errors::{DeckError, Result};
pub use input::{
    Command, FullscreenHost, FullscreenToggle, InputConfig, InputEvent, Key, Presenter,
    PresenterAction, TouchTracker, map_key,
};
pub use markdown::{Outline, export_outline, import_markdown, parse_outline};
pub use navigator::{Direction, Intent, NavigationState, Navigator, Transition, route_for};
pub use session::DeckSession;
pub use slide::{
    Presentation, PresentationTheme, Slide, SlideId, SlidePatch, SlideType, ThemePatch,
};
pub use store::DeckStore;
