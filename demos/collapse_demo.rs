//! Headless collapse run: a short drag, a release that snaps shut, then a
//! programmatic expand. Run with `RUST_LOG=debug` to see the bar's decisions.

use collapsebar::prelude::*;

const CONFIG: &str = r##"
collapsed_height = 56
anim_duration_ms = 250
status_bar_scrim = "#40000000"

[[children]]
id = 1
mode = "pin"
margin_left = 72
scale = 0.75
text_color = "#FFFFFFFF"
interpolator = "fast_out_slow_in"

[[children]]
id = 2
mode = "slide_out"
alpha = 0.0
scrim = "#80000000"
"##;

const TITLE: ChildId = ChildId(1);
const BACKDROP: ChildId = ChildId(2);

fn print_state(label: &str, bar: &CollapseBar) {
    let title = bar.child(TITLE).map(|c| c.translation()).unwrap_or_default();
    let backdrop = bar.child(BACKDROP).map(|c| c.alpha()).unwrap_or_default();
    println!(
        "{label:>10}: height {:3}  percent {:.2}  title ({:6.1}, {:6.1})  backdrop alpha {:.2}",
        bar.current_height(),
        bar.percent(),
        title.0,
        title.1,
        backdrop,
    );
}

fn run_snap(bar: &mut CollapseBar, mut now: u64) -> u64 {
    while bar.on_frame(now) == DriverState::Running {
        print_state("frame", bar);
        now += 16;
    }
    now
}

fn main() -> Result<()> {
    env_logger::init();

    let mut bar = CollapseBar::from_toml_str(CONFIG)?;
    bar.set_frame(360, Padding::symmetric(0, 8));
    bar.add_child(Box::new(
        ChildNode::new(TITLE, Bounds::from_origin_size(16, 120, 240, 40)).with_text(Argb::BLACK, 28.0),
    ));
    bar.add_child(Box::new(ChildNode::new(BACKDROP, Bounds::from_origin_size(0, 0, 360, 200))));

    let measured = bar.on_measure(200)?;
    let outcome = bar.on_layout(|children, mode| {
        println!("host layout pass over {} children ({mode:?})", children.len());
    });
    println!("measured {measured}px, layout {outcome:?}");
    print_state("start", &bar);

    let mut now = 0;
    for dy in [12, 18, 25, 20] {
        let consumed = bar.on_pre_scroll(dy);
        bar.on_scroll(dy - consumed);
        now += 16;
        print_state("drag", &bar);
    }

    if let Some(snap) = bar.on_scroll_stopped(now)? {
        println!(
            "release: {:?} over {}px in {}ms (asked {}ms)",
            snap.action, snap.distance, snap.duration_ms, snap.requested_duration_ms
        );
        now = run_snap(&mut bar, now);
    }
    print_state("collapsed", &bar);
    println!("sibling: {:?}", bar.sibling_placement(0, 200));
    if let Some((color, alpha)) = bar.status_bar_scrim() {
        println!("status bar scrim {color} at alpha {alpha}");
    }
    for paint in bar.scrim_paints() {
        println!("scrim over {:?}: {:?} at alpha {}", paint.child, paint.bounds, paint.alpha);
    }

    let snap = bar.run_auto_animation("expand", bar.anim_duration_ms(), now)?;
    println!("expand: {}ms", snap.duration_ms);
    run_snap(&mut bar, now);
    print_state("expanded", &bar);
    println!("pending work: {:?}", bar.take_change_flags());
    Ok(())
}
