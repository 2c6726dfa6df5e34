use deck::{
    Command, DeckError, Direction, FullscreenHost, FullscreenToggle, InputConfig, InputEvent,
    Intent, Key, Navigator, Presenter, PresenterAction, TouchTracker, map_key,
};

/// Fullscreen host double. `fail` makes every request error out without
/// changing state, like a browser that denies the request.
#[derive(Debug, Default)]
struct FakeHost {
    fullscreen: bool,
    fail: bool,
    requests: usize,
}

impl FullscreenHost for FakeHost {
    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn request_fullscreen(&mut self) -> deck::Result<()> {
        self.requests += 1;
        if self.fail {
            return Err(DeckError::Fullscreen("request denied".to_string()));
        }
        self.fullscreen = true;
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> deck::Result<()> {
        self.requests += 1;
        if self.fail {
            return Err(DeckError::Fullscreen("exit denied".to_string()));
        }
        self.fullscreen = false;
        Ok(())
    }
}

fn key(name: &str) -> InputEvent {
    InputEvent::Key {
        key: Key::from_name(name),
        text_input_focused: false,
    }
}

#[test]
fn test_key_names() {
    assert_eq!(Key::from_name("ArrowRight"), Key::ArrowRight);
    assert_eq!(Key::from_name(" "), Key::Space);
    assert_eq!(Key::from_name("Home"), Key::Home);
    assert_eq!(Key::from_name("7"), Key::Char('7'));
    assert_eq!(Key::from_name("Shift"), Key::Other);
}

#[test]
fn test_key_bindings() {
    let nav = |intent| Some(Command::Navigate(intent));
    assert_eq!(map_key(Key::ArrowRight, false), nav(Intent::Next));
    assert_eq!(map_key(Key::Space, false), nav(Intent::Next));
    assert_eq!(map_key(Key::Enter, false), nav(Intent::Next));
    assert_eq!(map_key(Key::ArrowLeft, false), nav(Intent::Prev));
    assert_eq!(map_key(Key::Backspace, false), nav(Intent::Prev));
    assert_eq!(map_key(Key::Home, false), nav(Intent::First));
    assert_eq!(map_key(Key::End, false), nav(Intent::Last));
    assert_eq!(map_key(Key::Char('1'), false), nav(Intent::Digit(1)));
    assert_eq!(map_key(Key::Char('9'), false), nav(Intent::Digit(9)));
    assert_eq!(map_key(Key::Char('f'), false), Some(Command::ToggleFullscreen));
    assert_eq!(map_key(Key::Char('F'), false), Some(Command::ToggleFullscreen));

    assert_eq!(map_key(Key::Char('0'), false), None);
    assert_eq!(map_key(Key::Char('x'), false), None);
    assert_eq!(map_key(Key::Escape, false), None);
    assert_eq!(map_key(Key::Other, false), None);
}

#[test]
fn test_keys_ignored_while_typing() {
    for k in [Key::ArrowRight, Key::Space, Key::Char('f'), Key::Char('3')] {
        assert_eq!(map_key(k, true), None);
    }
}

#[test]
fn test_swipe_threshold() {
    let config = InputConfig::default();
    let mut tracker = TouchTracker::new();

    tracker.touch_start(300.0);
    assert_eq!(tracker.touch_end(200.0, &config), Some(Intent::Next));

    tracker.touch_start(200.0);
    assert_eq!(tracker.touch_end(300.0, &config), Some(Intent::Prev));

    tracker.touch_start(200.0);
    assert_eq!(tracker.touch_end(150.0, &config), None, "exactly the threshold");

    tracker.touch_start(200.0);
    assert_eq!(tracker.touch_end(170.0, &config), None);

    assert_eq!(tracker.touch_end(0.0, &config), None, "no gesture in progress");
}

#[test]
fn test_custom_swipe_threshold() {
    let config = InputConfig {
        swipe_threshold: 10.0,
    };
    let mut tracker = TouchTracker::new();
    tracker.touch_start(100.0);
    assert_eq!(tracker.touch_end(80.0, &config), Some(Intent::Next));
}

#[test]
fn test_presenter_navigates_with_routes() {
    let mut host = FakeHost::default();
    let mut presenter = Presenter::new(InputConfig::default(), &host);
    let nav = Navigator::new(3, 8).unwrap();

    let action = presenter.handle(key("ArrowRight"), &nav, &mut host).unwrap();
    assert_eq!(
        action,
        PresenterAction::Goto {
            slide: 4,
            direction: Direction::Forward,
            route: "/slides/4".to_string(),
        }
    );
    assert_eq!(presenter.last_direction(), Direction::Forward);

    let action = presenter.handle(key("Home"), &nav, &mut host).unwrap();
    assert_eq!(
        action,
        PresenterAction::Goto {
            slide: 1,
            direction: Direction::Backward,
            route: "/slides/1".to_string(),
        }
    );
    assert_eq!(presenter.last_direction(), Direction::Backward);
}

#[test]
fn test_presenter_rejects_and_ignores() {
    let mut host = FakeHost::default();
    let mut presenter = Presenter::new(InputConfig::default(), &host);
    let nav = Navigator::new(8, 8).unwrap();

    assert_eq!(
        presenter.handle(key("ArrowRight"), &nav, &mut host).unwrap(),
        PresenterAction::Rejected
    );
    assert_eq!(
        presenter.handle(key("9"), &nav, &mut host).unwrap(),
        PresenterAction::Rejected
    );
    assert_eq!(
        presenter.handle(key("q"), &nav, &mut host).unwrap(),
        PresenterAction::Ignored
    );

    let typing = InputEvent::Key {
        key: Key::ArrowLeft,
        text_input_focused: true,
    };
    assert_eq!(
        presenter.handle(typing, &nav, &mut host).unwrap(),
        PresenterAction::Ignored
    );
}

#[test]
fn test_presenter_swipe() {
    let mut host = FakeHost::default();
    let mut presenter = Presenter::new(InputConfig::default(), &host);
    let nav = Navigator::new(2, 8).unwrap();

    let start = presenter
        .handle(InputEvent::TouchStart { x: 400.0 }, &nav, &mut host)
        .unwrap();
    assert_eq!(start, PresenterAction::Ignored);

    let end = presenter
        .handle(InputEvent::TouchEnd { x: 500.0 }, &nav, &mut host)
        .unwrap();
    assert_eq!(
        end,
        PresenterAction::Goto {
            slide: 1,
            direction: Direction::Backward,
            route: "/slides/1".to_string(),
        }
    );
}

#[test]
fn test_fullscreen_toggle_round_trip() {
    let mut host = FakeHost::default();
    let mut presenter = Presenter::new(InputConfig::default(), &host);
    let nav = Navigator::new(1, 3).unwrap();
    assert!(!presenter.is_fullscreen());

    let action = presenter.handle(key("f"), &nav, &mut host).unwrap();
    assert_eq!(action, PresenterAction::ToggledFullscreen { fullscreen: true });
    assert!(host.fullscreen);
    assert!(presenter.is_fullscreen());

    let action = presenter.handle(key("F"), &nav, &mut host).unwrap();
    assert_eq!(action, PresenterAction::ToggledFullscreen { fullscreen: false });
    assert!(!presenter.is_fullscreen());
    assert_eq!(host.requests, 2);
}

#[test]
fn test_fullscreen_failure_leaves_flag_in_sync() {
    let mut host = FakeHost {
        fail: true,
        ..FakeHost::default()
    };
    let mut presenter = Presenter::new(InputConfig::default(), &host);
    let nav = Navigator::new(1, 3).unwrap();

    let result = presenter.handle(key("f"), &nav, &mut host);
    assert!(matches!(result, Err(DeckError::Fullscreen(_))));
    assert!(!presenter.is_fullscreen());
    assert_eq!(host.requests, 1);
}

#[test]
fn test_fullscreen_follows_host_changes() {
    let mut host = FakeHost::default();
    let mut toggle = FullscreenToggle::new(&host);
    assert!(!toggle.is_fullscreen());

    // Host state changes made outside the toggle
    host.fullscreen = true;
    toggle.on_fullscreen_change(&host);
    assert!(toggle.is_fullscreen());
    host.fullscreen = false;
    toggle.on_fullscreen_change(&host);
    assert!(!toggle.is_fullscreen());

    toggle.toggle(&mut host).unwrap();
    assert!(toggle.is_fullscreen());
}
