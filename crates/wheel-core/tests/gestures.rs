//! Tap, swipe, and affordance scenarios from the stock swipe demo.
//!
//! Geometry: 320x250 viewport, 50px rows, so the selection band is the
//! centered 60px strip (y 95..155) and its center sits at y=125.

use std::cell::RefCell;
use std::rc::Rc;

use wheel_core::{Affordance, Wheel, WheelClickListener};
use wheel_testing::{Event, RecordingListener, StringsAdapter, WheelRobot};

fn robot_at(current: i64) -> (WheelRobot<StringsAdapter>, Rc<RecordingListener>) {
    let mut robot = WheelRobot::new(StringsAdapter::countries());
    robot.wheel_mut().set_current_item(current, false);
    let listener = Rc::new(RecordingListener::new());
    robot.wheel_mut().add_scroll_listener(listener.clone());
    robot.wheel_mut().add_click_listener(listener.clone());
    listener.clear();
    (robot, listener)
}

#[test]
fn rightward_swipe_over_the_band_reveals_delete() {
    let (mut robot, listener) = robot_at(1);
    // delta_x = -60, delta_y = 5: horizontal enough, inside the band.
    robot.swipe((160.0, 125.0), (220.0, 130.0));
    assert!(listener.contains(Event::SwipeRight(1)));
    assert_eq!(robot.wheel().revealed_affordance(), Some(Affordance::Delete));
}

#[test]
fn swipe_right_listeners_can_veto_the_delete_affordance() {
    let (mut robot, listener) = robot_at(2);
    listener.set_swipe_right_response(false);
    robot.swipe((160.0, 125.0), (220.0, 125.0));
    assert!(listener.contains(Event::SwipeRight(2)));
    assert_eq!(robot.wheel().revealed_affordance(), None);
}

#[test]
fn vetoed_swipe_right_still_collapses_a_revealed_affordance() {
    let (mut robot, listener) = robot_at(1);
    robot.swipe((220.0, 125.0), (160.0, 125.0));
    assert_eq!(robot.wheel().revealed_affordance(), Some(Affordance::Action));

    listener.set_swipe_right_response(false);
    robot.swipe((160.0, 125.0), (220.0, 125.0));
    assert!(listener.contains(Event::SwipeRight(1)));
    assert_eq!(robot.wheel().revealed_affordance(), None);
}

#[test]
fn leftward_swipe_reveals_action_regardless_of_the_vote() {
    let (mut robot, listener) = robot_at(1);
    robot.swipe((220.0, 125.0), (160.0, 125.0));
    assert!(listener.contains(Event::SwipeLeft(1)));
    assert_eq!(robot.wheel().revealed_affordance(), Some(Affordance::Action));
}

#[test]
fn alternating_swipes_keep_the_affordances_exclusive() {
    let (mut robot, _listener) = robot_at(1);
    for _ in 0..3 {
        robot.swipe((160.0, 125.0), (220.0, 125.0));
        assert_eq!(robot.wheel().revealed_affordance(), Some(Affordance::Delete));
        robot.swipe((220.0, 125.0), (160.0, 125.0));
        assert_eq!(robot.wheel().revealed_affordance(), Some(Affordance::Action));
    }
}

#[test]
fn starting_a_scroll_collapses_the_affordance() {
    let (mut robot, _listener) = robot_at(1);
    robot.swipe((220.0, 125.0), (160.0, 125.0));
    assert_eq!(robot.wheel().revealed_affordance(), Some(Affordance::Action));

    let (x, y) = robot.band_center();
    robot.drag((x, y), (x, y - 50.0));
    robot.settle();
    assert_eq!(robot.wheel().revealed_affordance(), None);
}

#[test]
fn tapping_the_revealed_delete_affordance_activates_it() {
    let (mut robot, listener) = robot_at(1);
    robot.swipe((160.0, 125.0), (220.0, 125.0));
    assert_eq!(robot.wheel().revealed_affordance(), Some(Affordance::Delete));

    let rect = robot.wheel().affordance_rect(Affordance::Delete);
    let x = (rect.left + rect.right) / 2.0;
    let y = rect.center_y();
    robot.tap(x, y);
    assert!(listener.contains(Event::DeleteActivated(1)));
    assert_eq!(robot.wheel().revealed_affordance(), None);
}

#[test]
fn tapping_the_revealed_action_affordance_activates_it() {
    let (mut robot, listener) = robot_at(1);
    robot.swipe((220.0, 125.0), (160.0, 125.0));
    let rect = robot.wheel().affordance_rect(Affordance::Action);
    robot.tap((rect.left + rect.right) / 2.0, rect.center_y());
    assert!(listener.contains(Event::ActionActivated(1)));
    assert_eq!(robot.wheel().revealed_affordance(), None);
}

#[test]
fn tap_inside_the_band_reports_the_selected_item() {
    let (mut robot, listener) = robot_at(1);
    let (x, y) = robot.band_center();
    robot.tap(x, y);
    assert!(listener.contains(Event::Tapped(1)));
}

#[test]
fn tap_below_the_band_reports_and_the_demo_observer_recenters() {
    struct Recenter;
    impl WheelClickListener<StringsAdapter> for Recenter {
        fn tapped_below_band(&self, wheel: &mut Wheel<StringsAdapter>, index: usize) {
            wheel.set_current_item(index as i64 - 1, true);
        }
    }

    let (mut robot, listener) = robot_at(1);
    robot.wheel_mut().add_click_listener(Rc::new(Recenter));
    let (x, y) = robot.point_at_items(1);
    robot.tap(x, y);
    assert!(listener.contains(Event::TappedBelow(1)));
    robot.settle();
    assert_eq!(robot.wheel().current_item(), 0);
}

#[test]
fn tap_above_the_band_reports_the_current_item() {
    let (mut robot, listener) = robot_at(4);
    let (x, y) = robot.point_at_items(-2);
    robot.tap(x, y);
    assert!(listener.contains(Event::TappedAbove(4)));
}

#[test]
fn vertical_drag_never_classifies_as_a_swipe() {
    let (mut robot, listener) = robot_at(1);
    // Diagonal with enough horizontal travel, but the vertical motion
    // passes the drag slop first: the scroll engine wins.
    let (x, y) = robot.band_center();
    robot.drag((x, y), (x + 60.0, y - 50.0));
    robot.settle();
    let events = listener.events();
    assert!(!events.iter().any(|e| matches!(e, Event::SwipeRight(_) | Event::SwipeLeft(_))));
    assert!(events.contains(&Event::ScrollStarted));
}

#[test]
fn gestures_on_an_empty_wheel_are_ignored() {
    let mut robot = WheelRobot::new(StringsAdapter::new(Vec::<String>::new()));
    let listener = Rc::new(RecordingListener::new());
    robot.wheel_mut().add_click_listener(listener.clone());
    robot.swipe((160.0, 125.0), (220.0, 125.0));
    robot.tap(160.0, 125.0);
    assert!(listener.events().is_empty());
    assert_eq!(robot.wheel().revealed_affordance(), None);
}

#[test]
fn listeners_can_unregister_from_inside_a_callback() {
    let (mut robot, _listener) = robot_at(1);
    let removed = Rc::new(RefCell::new(Vec::new()));

    struct OneShot {
        id: RefCell<Option<wheel_core::ListenerId>>,
        log: Rc<RefCell<Vec<usize>>>,
    }
    impl WheelClickListener<StringsAdapter> for OneShot {
        fn item_tapped(&self, wheel: &mut Wheel<StringsAdapter>, index: usize) {
            self.log.borrow_mut().push(index);
            if let Some(id) = self.id.borrow_mut().take() {
                wheel.remove_listener(id);
            }
        }
    }

    let one_shot = Rc::new(OneShot {
        id: RefCell::new(None),
        log: removed.clone(),
    });
    let id = robot.wheel_mut().add_click_listener(one_shot.clone());
    *one_shot.id.borrow_mut() = Some(id);

    let (x, y) = robot.band_center();
    robot.tap(x, y);
    robot.tap(x, y);
    // Fired once, removed itself, never fired again.
    assert_eq!(*removed.borrow(), vec![1]);
}
