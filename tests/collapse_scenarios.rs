use std::cell::RefCell;
use std::rc::Rc;

use collapsebar::prelude::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

const TITLE: ChildId = ChildId(1);
const ICON: ChildId = ChildId(2);

/// 300px bar collapsing to 100px with a pinned title at top=50, height=40
fn header() -> CollapseBar {
    init_logging();
    let mut bar = CollapseBar::from_toml_str(
        r##"
        collapsed_height = 100

        [[children]]
        id = 1
        mode = "pin"
        alpha = 0.4
        text_color = "#FFFFFF"

        [[children]]
        id = 2
        mode = "none"
        margin_left = 8
        scale = 0.5
        scale_x_interpolator = "accelerate"
        "##,
    )
    .unwrap();
    bar.set_frame(400, Padding::default());
    bar.add_child(Box::new(
        ChildNode::new(TITLE, Bounds::from_origin_size(72, 50, 200, 40)).with_text(Argb::BLACK, 22.0),
    ));
    bar.add_child(Box::new(ChildNode::new(ICON, Bounds::from_origin_size(16, 200, 48, 48))));
    bar.on_measure(300).unwrap();
    assert_eq!(bar.on_layout(|_, _| {}), LayoutOutcome::Refreshed);
    bar
}

fn run_frames(bar: &mut CollapseBar, mut now: u64) -> u64 {
    while bar.on_frame(now) == DriverState::Running {
        now += 16;
        assert!(now < 10_000, "snap never settled");
    }
    now
}

#[test]
fn test_pinned_title_centers_in_collapsed_bar() {
    let mut bar = header();
    assert_eq!(bar.child(TITLE).unwrap().translation(), (0.0, 0.0));

    bar.on_pre_scroll(200);
    assert!(bar.is_collapsed());
    // Target top is 100/2 - 40/2 = 30
    assert_eq!(bar.child(TITLE).unwrap().translation().1, -20.0);
}

#[test]
fn test_targets_reached_exactly_at_both_ends() {
    let mut bar = header();
    bar.on_pre_scroll(200);
    let title = bar.child(TITLE).unwrap();
    assert_eq!(title.alpha(), 0.4);
    assert_eq!(title.text_style().unwrap().color, Argb::WHITE);
    let icon = bar.child(ICON).unwrap();
    assert_eq!(icon.scale(), (0.5, 0.5));
    // (16 - 8 - (48 * 0.5 - 48) / 2) = 20 px to the left
    assert_eq!(icon.translation(), (-20.0, 0.0));

    bar.on_scroll(-500);
    assert!(bar.is_expanded());
    let title = bar.child(TITLE).unwrap();
    assert_eq!(title.alpha(), 1.0);
    assert_eq!(title.text_style().unwrap().color, Argb::BLACK);
    assert_eq!(title.translation().1, 0.0);
    let icon = bar.child(ICON).unwrap();
    assert_eq!(icon.scale(), (1.0, 1.0));
    assert_eq!(icon.translation().0, 0.0);
}

#[test]
fn test_scale_axes_progress_independently() {
    let mut bar = header();
    bar.on_pre_scroll(100);
    let (sx, sy) = bar.child(ICON).unwrap().scale();
    // accelerate(0.5) = 0.25 on X, linear on Y
    assert_eq!(sx, 0.875);
    assert_eq!(sy, 0.75);
}

#[test]
fn test_height_law_holds_through_a_gesture() {
    let mut bar = header();
    for dy in [3, 17, 29, 41, 5, 60, 45, 12] {
        bar.on_pre_scroll(dy);
        let percent = bar.percent();
        assert!((0.0..=1.0).contains(&percent));
        assert_eq!(bar.current_height(), (300.0 - percent * 200.0).round() as i32);
        assert_eq!(bar.is_collapsed(), percent == 1.0);
        assert_eq!(bar.is_expanded(), percent == 0.0);
    }
}

#[test]
fn test_refreshing_origins_is_idempotent() {
    let mut bar = header();
    let first = *bar.controller().engine().origins().peek(TITLE).unwrap();
    bar.on_layout(|_, _| {});
    bar.on_layout(|_, _| {});
    let second = *bar.controller().engine().origins().peek(TITLE).unwrap();
    assert_eq!(first, second);
    assert_eq!(second.text_size, Some(22.0));
}

#[test]
fn test_anti_shake() {
    let mut bar = header();
    bar.on_pre_scroll(10);
    assert_eq!(bar.current_height(), 290);

    bar.on_pre_scroll(-5);
    assert_eq!(bar.current_height(), 290);

    let mut bar = header();
    bar.on_pre_scroll(10);
    bar.on_pre_scroll(-250);
    assert_eq!(bar.current_height(), 300);
}

#[test]
fn test_release_schedules_proportional_snap() {
    let mut bar = header();
    bar.on_pre_scroll(100);
    let snap = bar.on_scroll_stopped(0).unwrap().unwrap();
    assert_eq!(snap.action, SnapAction::Collapse);
    assert_eq!(snap.requested_duration_ms, 125);

    run_frames(&mut bar, 0);
    assert!(bar.is_collapsed());
    assert_eq!(bar.child(TITLE).unwrap().translation().1, -20.0);
}

#[test]
fn test_one_driver_at_a_time() {
    let mut bar = header();
    bar.run_auto_collapse(250, 0).unwrap();
    for now in [16, 32, 48, 64] {
        bar.on_frame(now);
    }
    assert!(!bar.is_collapsed() && !bar.is_expanded());

    bar.run_auto_expand(250, 64).unwrap();
    assert!(bar.is_animating());

    let mut now = 64;
    let mut previous = bar.percent();
    while bar.on_frame(now) == DriverState::Running {
        assert!(bar.percent() <= previous);
        previous = bar.percent();
        now += 16;
        assert!(now < 10_000);
    }
    assert!(bar.is_expanded());
    assert!(!bar.is_animating());
}

#[test]
fn test_collapsed_layout_falls_back_without_writable_records() {
    let mut bar = header();
    bar.on_pre_scroll(150);
    let mut modes = Vec::new();
    assert_eq!(
        bar.on_layout(|_, mode| modes.push(mode)),
        LayoutOutcome::FullFallback
    );
    assert_eq!(modes, vec![LayoutMode::Full]);
}

#[derive(Default)]
struct TitleOwner {
    claimed: usize,
    after: usize,
}

impl CollapseHandler for TitleOwner {
    fn on_collapse_transition(
        &mut self,
        _bar: &BarMetrics,
        child: &mut dyn ChildView,
        percent: f32,
    ) -> bool {
        if child.id() != TITLE {
            return false;
        }
        self.claimed += 1;
        child.set_translation_y(-100.0 * percent);
        true
    }

    fn after_collapse_transition(&mut self, _bar: &BarMetrics, _child: &dyn ChildView, _percent: f32) {
        self.after += 1;
    }
}

#[test]
fn test_handler_takes_over_a_child() {
    let mut bar = header();
    let owner = Rc::new(RefCell::new(TitleOwner::default()));
    let id = bar.add_collapse_handler(owner.clone());

    bar.on_pre_scroll(200);
    assert_eq!(bar.child(TITLE).unwrap().translation().1, -100.0);
    assert_eq!(bar.child(TITLE).unwrap().alpha(), 1.0);
    assert_eq!(bar.child(ICON).unwrap().scale(), (0.5, 0.5));
    assert_eq!(owner.borrow().claimed, 1);
    assert_eq!(owner.borrow().after, 2);

    assert!(bar.remove_collapse_handler(id));
    bar.on_scroll(-500);
    assert_eq!(owner.borrow().claimed, 1);
    assert_eq!(bar.child(TITLE).unwrap().translation().1, 0.0);
}

#[test]
fn test_bad_configuration_is_rejected() {
    init_logging();
    let mut bar = CollapseBar::from_toml_str("collapsed_height = 120").unwrap();
    assert!(matches!(
        bar.on_measure(100),
        Err(Error::CollapsedExceedsExpanded { .. })
    ));
    assert!(CollapseBar::from_toml_str("[[children]]\nid = 1\nalpha = 2.0").is_err());
}
