use deck::{DeckError, Direction, Intent, Navigator, Transition, route_for};

fn at(current: usize, total: usize) -> Navigator {
    Navigator::new(current, total).expect("valid position")
}

fn moved(to: usize, direction: Direction) -> Transition {
    Transition::Moved { to, direction }
}

#[test]
fn test_relative_moves_in_the_middle() {
    let nav = at(3, 8);
    assert_eq!(nav.navigate(Intent::Next), moved(4, Direction::Forward));
    assert_eq!(nav.navigate(Intent::Prev), moved(2, Direction::Backward));
    assert_eq!(nav.navigate(Intent::First), moved(1, Direction::Backward));
    assert_eq!(nav.navigate(Intent::Last), moved(8, Direction::Forward));
}

#[test]
fn test_jumps_pick_direction_by_comparison() {
    let nav = at(3, 8);
    assert_eq!(nav.navigate(Intent::JumpTo(6)), moved(6, Direction::Forward));
    assert_eq!(nav.navigate(Intent::JumpTo(2)), moved(2, Direction::Backward));
    assert_eq!(nav.navigate(Intent::JumpTo(3)), moved(3, Direction::None));
    assert_eq!(nav.navigate(Intent::Digit(8)), moved(8, Direction::Forward));
}

#[test]
fn test_out_of_range_jumps_are_rejected() {
    let nav = at(3, 8);
    assert_eq!(nav.navigate(Intent::JumpTo(9)), Transition::Rejected);
    assert_eq!(nav.navigate(Intent::JumpTo(0)), Transition::Rejected);
    assert_eq!(nav.navigate(Intent::Digit(9)), Transition::Rejected);
    assert_eq!(nav.navigate(Intent::Digit(0)), Transition::Rejected);
}

#[test]
fn test_digit_is_limited_to_single_digits() {
    let nav = at(1, 20);
    assert_eq!(nav.navigate(Intent::Digit(9)), moved(9, Direction::Forward));
    assert_eq!(nav.navigate(Intent::Digit(12)), Transition::Rejected);
    assert_eq!(nav.navigate(Intent::JumpTo(12)), moved(12, Direction::Forward));
}

#[test]
fn test_boundaries_reject_relative_moves() {
    let first = at(1, 8);
    assert_eq!(first.navigate(Intent::Prev), Transition::Rejected);
    assert_eq!(first.navigate(Intent::First), Transition::Rejected);
    assert_eq!(first.navigate(Intent::JumpTo(1)), moved(1, Direction::None));

    let last = at(8, 8);
    assert_eq!(last.navigate(Intent::Next), Transition::Rejected);
    assert_eq!(last.navigate(Intent::Last), Transition::Rejected);
}

#[test]
fn test_single_slide_deck() {
    let nav = at(1, 1);
    assert!(!nav.has_next());
    assert!(!nav.has_prev());
    for intent in [Intent::Next, Intent::Prev, Intent::First, Intent::Last] {
        assert_eq!(nav.navigate(intent), Transition::Rejected);
    }
    assert_eq!(nav.navigate(Intent::Digit(1)), moved(1, Direction::None));
}

#[test]
fn test_advance_returns_new_position() {
    let nav = at(3, 8);
    let (next, transition) = nav.advance(Intent::Next);
    assert_eq!(next.current(), 4);
    assert_eq!(next.total(), 8);
    assert_eq!(transition.direction(), Direction::Forward);
    assert_eq!(nav.current(), 3, "navigate must not mutate");

    let (same, transition) = at(8, 8).advance(Intent::Next);
    assert_eq!(same.current(), 8);
    assert_eq!(transition.target(), None);
    assert_eq!(transition.direction(), Direction::None);
}

#[test]
fn test_walk_forward_visits_every_slide() {
    let mut nav = at(1, 5);
    let mut visited = vec![nav.current()];
    loop {
        let (next, transition) = nav.advance(Intent::Next);
        if transition == Transition::Rejected {
            break;
        }
        nav = next;
        visited.push(nav.current());
    }
    assert_eq!(visited, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_navigation_state() {
    let state = at(3, 8).state();
    assert_eq!(state.current, 3);
    assert_eq!(state.total, 8);
    assert!(state.has_next);
    assert!(state.has_prev);

    let json = serde_json::to_value(at(1, 2).state()).unwrap();
    assert_eq!(json["hasNext"], true);
    assert_eq!(json["hasPrev"], false);
}

#[test]
fn test_new_rejects_positions_outside_the_deck() {
    assert!(matches!(Navigator::new(0, 8), Err(DeckError::SlideNotFound(_))));
    assert!(matches!(Navigator::new(9, 8), Err(DeckError::SlideNotFound(_))));
    assert!(matches!(Navigator::new(1, 0), Err(DeckError::SlideNotFound(_))));
}

#[test]
fn test_route_resolution() {
    assert_eq!(Navigator::from_route("3", 8).unwrap().current(), 3);
    assert_eq!(Navigator::from_route("8", 8).unwrap().current(), 8);
    assert_eq!(Navigator::from_route("003", 8).unwrap().current(), 3);

    for segment in ["x", "0", "9", "+3", "-1", "", " 3", "3.0", "99999999999999999999999"] {
        let result = Navigator::from_route(segment, 8);
        assert!(
            matches!(result, Err(DeckError::SlideNotFound(_))),
            "segment {:?} should not resolve",
            segment
        );
    }
}

#[test]
fn test_path_resolution() {
    assert_eq!(Navigator::from_path("/slides/2", 8).unwrap().current(), 2);
    assert_eq!(Navigator::from_path("/slides/2/", 8).unwrap().current(), 2);
    assert!(Navigator::from_path("/slides/x", 8).is_err());
    assert!(Navigator::from_path("/other/2", 8).is_err());
}

#[test]
fn test_route_for() {
    assert_eq!(route_for(4), "/slides/4");
    let nav = Navigator::from_path(&route_for(4), 8).unwrap();
    assert_eq!(nav.current(), 4);
}
