//! Sign property window: shows one banner's sign and turns player input on
//! it into game actions.
//!
//! Windows hold no world references. Each handler receives the park and the
//! dispatcher for the duration of one event, and the front end is reached
//! only through the service traits in [`services`].

pub mod manager;
pub mod plugin;
pub mod services;
pub mod systems;
pub mod window;

pub use manager::{OpenOutcome, SignWindowManager};
pub use plugin::SignWindowPlugin;
pub use services::{
    ColourMenuService, HeadlessSignUi, ScreenRect, SignUi, SignUiServices, TextPromptRequest,
    TextPromptService, UiCall, ViewportFlags, ViewportHandle, ViewportService,
};
pub use systems::{SignWindowEvent, SignWindowResponse};
pub use window::{SignWidget, SignWidgetState, SignWindow, WindowResponse};
