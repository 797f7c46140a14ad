use std::time::{Duration, Instant};

use super::*;
use crate::config::TitleSettings;

fn scroller() -> TitleScroller {
    TitleScroller::new(&TitleSettings::default())
}

#[test]
fn fitting_title_never_moves() {
    let mut s = scroller();
    let t0 = Instant::now();
    s.show(10, 40, t0);
    assert!(s.is_static());
    for i in 0..500 {
        assert!(!s.tick(t0 + Duration::from_millis(16 * i)));
        assert_eq!(s.offset(), 0);
    }
}

#[test]
fn exact_fit_is_static() {
    let mut s = scroller();
    s.show(40, 40, Instant::now());
    assert_eq!(s.phase(), ScrollPhase::Static);
}

#[test]
fn overflowing_title_waits_then_scrolls_and_wraps() {
    let mut s = scroller();
    let t0 = Instant::now();
    s.show(30, 20, t0);

    assert!(!s.tick(t0 + Duration::from_millis(999)));
    assert_eq!(s.offset(), 0);

    let mut now = t0 + Duration::from_millis(1000);
    assert!(s.tick(now));
    assert_eq!(s.phase(), ScrollPhase::Scrolling);
    assert_eq!(s.offset(), 19);

    let mut previous = s.offset();
    loop {
        now += Duration::from_millis(16);
        s.tick(now);
        if s.offset() > previous {
            break;
        }
        assert_eq!(s.offset(), previous - 1);
        previous = s.offset();
    }
    // wrapped just after the text fully left on the left side
    assert_eq!(previous, -30);
    assert_eq!(s.offset(), 20);
}

#[test]
fn show_restarts_the_animation() {
    let mut s = scroller();
    let t0 = Instant::now();
    s.show(30, 20, t0);
    s.tick(t0 + Duration::from_secs(2));
    s.tick(t0 + Duration::from_secs(3));
    assert_eq!(s.phase(), ScrollPhase::Scrolling);

    let t1 = t0 + Duration::from_secs(4);
    s.show(50, 20, t1);
    assert_eq!(s.offset(), 0);
    assert_eq!(
        s.phase(),
        ScrollPhase::Waiting {
            until: t1 + Duration::from_millis(1000)
        }
    );

    s.show(5, 20, t1);
    assert!(s.is_static());
}

#[test]
fn resize_remeasures_only_on_width_change() {
    let mut s = scroller();
    let t0 = Instant::now();
    s.show(30, 20, t0);
    s.tick(t0 + Duration::from_secs(2));
    let moving = s.offset();

    s.resize(20, t0 + Duration::from_secs(3));
    assert_eq!(s.offset(), moving);
    assert_eq!(s.phase(), ScrollPhase::Scrolling);

    s.resize(60, t0 + Duration::from_secs(3));
    assert!(s.is_static());
    assert_eq!(s.offset(), 0);
    assert_eq!(s.container_width(), 60);
}

#[test]
fn larger_steps_still_wrap_to_container_width() {
    let settings = TitleSettings {
        scroll_delay_ms: 0,
        scroll_step: 7,
    };
    let mut s = TitleScroller::new(&settings);
    let t0 = Instant::now();
    s.show(12, 10, t0);
    s.tick(t0);
    assert_eq!(s.offset(), 3);
    s.tick(t0);
    assert_eq!(s.offset(), -4);
    s.tick(t0);
    assert_eq!(s.offset(), -11);
    s.tick(t0);
    assert_eq!(s.offset(), 10);
}
