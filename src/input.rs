// ABOUTME: Presenter input handling for the slide-deck library
// ABOUTME: Maps keys and swipes to navigation intents and tracks the fullscreen toggle

use log::{debug, error, info};

use crate::errors::{DeckError, Result};
use crate::navigator::{Direction, Intent, Navigator, Transition, route_for};

/// Keys the presenter reacts to. Everything else arrives as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowRight,
    ArrowLeft,
    Space,
    Enter,
    Backspace,
    Home,
    End,
    Escape,
    Char(char),
    Other,
}

impl Key {
    /// Parse a DOM-style key name such as `"ArrowRight"`, `" "` or `"f"`.
    pub fn from_name(name: &str) -> Key {
        match name {
            "ArrowRight" => Key::ArrowRight,
            "ArrowLeft" => Key::ArrowLeft,
            " " | "Space" | "Spacebar" => Key::Space,
            "Enter" => Key::Enter,
            "Backspace" => Key::Backspace,
            "Home" => Key::Home,
            "End" => Key::End,
            "Escape" | "Esc" => Key::Escape,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Other,
                }
            }
        }
    }
}

/// What the presenter should do in response to an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Navigate(Intent),
    ToggleFullscreen,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputConfig {
    /// Minimum horizontal travel, in pixels, for a touch to count as a swipe.
    pub swipe_threshold: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: 50.0,
        }
    }
}

/// Map a key press to a command. Returns `None` when the key has no
/// binding or when focus is in a text-input control.
pub fn map_key(key: Key, text_input_focused: bool) -> Option<Command> {
    if text_input_focused {
        return None;
    }
    match key {
        Key::ArrowRight | Key::Space | Key::Enter => Some(Command::Navigate(Intent::Next)),
        Key::ArrowLeft | Key::Backspace => Some(Command::Navigate(Intent::Prev)),
        Key::Home => Some(Command::Navigate(Intent::First)),
        Key::End => Some(Command::Navigate(Intent::Last)),
        Key::Char('f') | Key::Char('F') => Some(Command::ToggleFullscreen),
        Key::Char(c @ '1'..='9') => c
            .to_digit(10)
            .map(|d| Command::Navigate(Intent::Digit(d as u8))),
        _ => None,
    }
}

/// Tracks the start of a horizontal touch gesture.
#[derive(Debug, Clone, Copy, Default)]
pub struct TouchTracker {
    start_x: Option<f32>,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn touch_start(&mut self, x: f32) {
        self.start_x = Some(x);
    }

    /// Finish the gesture. A swipe to the left goes forward, a swipe to the
    /// right goes back; short movements and ends without a start do nothing.
    pub fn touch_end(&mut self, x: f32, config: &InputConfig) -> Option<Intent> {
        let start = self.start_x.take()?;
        let diff = start - x;
        if diff.abs() <= config.swipe_threshold {
            return None;
        }
        Some(if diff > 0.0 { Intent::Next } else { Intent::Prev })
    }
}

/// The host environment's fullscreen facility.
pub trait FullscreenHost {
    fn is_fullscreen(&self) -> bool;
    fn request_fullscreen(&mut self) -> Result<()>;
    fn exit_fullscreen(&mut self) -> Result<()>;
}

/// Display flag mirroring the host's fullscreen status. The host stays
/// authoritative; this only issues requests and re-reads the host flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FullscreenToggle {
    displayed: bool,
}

impl FullscreenToggle {
    pub fn new<H: FullscreenHost + ?Sized>(host: &H) -> Self {
        Self {
            displayed: host.is_fullscreen(),
        }
    }

    pub fn is_fullscreen(&self) -> bool {
        self.displayed
    }

    pub fn toggle<H: FullscreenHost + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        let outcome = if host.is_fullscreen() {
            host.exit_fullscreen()
        } else {
            host.request_fullscreen()
        };
        if let Err(e) = &outcome {
            error!("Error attempting to toggle fullscreen: {}", e);
        }
        self.on_fullscreen_change(host);
        outcome
    }

    /// Call from the host's fullscreen-change notification.
    pub fn on_fullscreen_change<H: FullscreenHost + ?Sized>(&mut self, host: &H) {
        self.displayed = host.is_fullscreen();
    }
}

/// An input event delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key { key: Key, text_input_focused: bool },
    TouchStart { x: f32 },
    TouchEnd { x: f32 },
}

/// Outcome of a presenter input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterAction {
    /// Move to `slide` (1-based) by pushing `route`.
    Goto {
        slide: usize,
        direction: Direction,
        route: String,
    },
    ToggledFullscreen { fullscreen: bool },
    /// A navigation intent that was out of bounds.
    Rejected,
    /// The input had no meaning for the presenter.
    Ignored,
}

/// Presenter-side input state: swipe tracking, fullscreen display flag and
/// the direction of the last move for entry/exit animations.
#[derive(Debug, Clone, Default)]
pub struct Presenter {
    config: InputConfig,
    touch: TouchTracker,
    fullscreen: FullscreenToggle,
    last_direction: Direction,
}

impl Presenter {
    pub fn new<H: FullscreenHost + ?Sized>(config: InputConfig, host: &H) -> Self {
        Self {
            config,
            touch: TouchTracker::new(),
            fullscreen: FullscreenToggle::new(host),
            last_direction: Direction::None,
        }
    }

    pub fn last_direction(&self) -> Direction {
        self.last_direction
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen.is_fullscreen()
    }

    pub fn on_fullscreen_change<H: FullscreenHost + ?Sized>(&mut self, host: &H) {
        self.fullscreen.on_fullscreen_change(host);
    }

    /// Handle one event against the navigator built for the current render.
    pub fn handle<H: FullscreenHost + ?Sized>(
        &mut self,
        event: InputEvent,
        navigator: &Navigator,
        host: &mut H,
    ) -> Result<PresenterAction> {
        let command = match event {
            InputEvent::Key {
                key,
                text_input_focused,
            } => map_key(key, text_input_focused),
            InputEvent::TouchStart { x } => {
                self.touch.touch_start(x);
                None
            }
            InputEvent::TouchEnd { x } => self
                .touch
                .touch_end(x, &self.config)
                .map(Command::Navigate),
        };

        match command {
            None => Ok(PresenterAction::Ignored),
            Some(Command::ToggleFullscreen) => {
                self.fullscreen.toggle(host).map_err(|e| match e {
                    DeckError::Fullscreen(_) => e,
                    other => DeckError::Fullscreen(other.to_string()),
                })?;
                info!("Fullscreen is now {}", self.fullscreen.is_fullscreen());
                Ok(PresenterAction::ToggledFullscreen {
                    fullscreen: self.fullscreen.is_fullscreen(),
                })
            }
            Some(Command::Navigate(intent)) => Ok(self.navigate(intent, navigator)),
        }
    }

    fn navigate(&mut self, intent: Intent, navigator: &Navigator) -> PresenterAction {
        match navigator.navigate(intent) {
            Transition::Moved { to, direction } => {
                self.last_direction = direction;
                debug!("Presenter moving to slide {} ({:?})", to, direction);
                PresenterAction::Goto {
                    slide: to,
                    direction,
                    route: route_for(to),
                }
            }
            Transition::Rejected => PresenterAction::Rejected,
        }
    }
}
