//! Integration test: drive a dock session through a realistic event
//! sequence (hover, click, superseding click, leave) on a logical clock and
//! check the snapshot and render output at each step.

use std::time::Duration;

use magdock_core::config::DockConfig;
use magdock_core::engine::ActivationState;
use magdock_core::session::DockSession;
use magdock_core::svg::render_svg;
use magdock_core::views::render_dock;
use magdock_protocol::{RenderCommand, Viewport};

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn stock_session() -> DockSession {
    DockSession::new(DockConfig::default()).expect("default config is valid")
}

#[test]
fn worked_example_on_third_icon() {
    let mut session = stock_session();
    session.pointer_move(Some(2.0 * 54.0 + 32.0));
    session.frame(ms(16));

    let scales = session.scales().as_slice().to_vec();
    assert_eq!(scales[2], 2.0);
    for neighbour in [1, 3] {
        assert!(
            (scales[neighbour] - 1.325).abs() < 1e-9,
            "neighbour {neighbour} scale {}",
            scales[neighbour]
        );
    }
    for distant in [0, 4, 5] {
        assert_eq!(scales[distant], 1.0);
    }
}

#[test]
fn click_settles_after_2400ms_and_active_sticks() {
    let mut session = stock_session();
    session.click(3, ms(0)).expect("index in range");

    let state = session.activation();
    assert_eq!(state.active, Some(3));
    assert_eq!(state.jumping, Some(3));
    assert!(!state.tooltips_visible);

    // Frames arrive every 16ms, as they would from a host.
    let mut t = 0;
    while t < 2400 {
        session.frame(ms(t));
        let state = session.activation();
        assert_eq!(state.jumping, Some(3), "cleared early at {t}ms");
        assert!(!state.tooltips_visible, "tooltips back early at {t}ms");
        t += 16;
    }

    session.frame(ms(2400));
    assert_eq!(
        session.activation(),
        ActivationState {
            active: Some(3),
            jumping: None,
            tooltips_visible: true,
        }
    );
    assert!(!session.needs_frame());
}

#[test]
fn superseding_click_never_flickers_back() {
    let mut session = stock_session();
    session.click(1, ms(0)).expect("index in range");
    session.frame(ms(250));
    session.click(4, ms(500)).expect("index in range");

    let mut t = 500;
    while t < 2900 {
        session.frame(ms(t));
        let state = session.activation();
        assert_eq!(state.active, Some(4));
        assert_eq!(state.jumping, Some(4), "jumping changed at {t}ms");
        t += 10;
    }

    session.frame(ms(2900));
    let state = session.activation();
    assert_eq!(state.active, Some(4));
    assert_eq!(state.jumping, None);
    assert!(state.tooltips_visible);
    assert_eq!(session.next_deadline(), None);
}

#[test]
fn out_of_range_click_keeps_state() {
    let mut session = stock_session();
    session.click(2, ms(0)).expect("index in range");
    let before = session.activation();
    assert!(session.click(99, ms(100)).is_err());
    assert_eq!(session.activation(), before);
    assert_eq!(session.next_deadline(), Some(ms(2400)));
}

#[test]
fn render_and_export_a_hovered_dock() {
    let mut session = stock_session();
    session.pointer_move(Some(86.0));
    session.frame(ms(16));

    let viewport = Viewport::new(800.0, 400.0);
    let commands = render_dock(&session.snapshot(ms(16)), &viewport);
    let icons = commands
        .iter()
        .filter(|c| matches!(c, RenderCommand::DrawIcon { .. }))
        .count();
    assert_eq!(icons, 6);
    assert!(commands.iter().any(|c| matches!(
        c,
        RenderCommand::DrawText { text, .. } if *text == "Messages"
    )));

    let svg = render_svg(&commands, viewport.width, viewport.height, true);
    assert!(svg.contains("<title>Messages</title>"));
    assert!(svg.contains("Messages</text>"));
}

#[test]
fn config_file_round_trip_through_session() {
    let config = DockConfig::from_toml_str(
        r#"
        base_width = 48
        gap = 0
        max_scale = 1.5

        [[items]]
        label = "One"

        [[items]]
        label = "Two"
        "#,
    )
    .expect("valid config");
    let mut session = DockSession::new(config).expect("valid session");
    assert_eq!(session.positions().container_width(), 96.0);

    session.pointer_move(Some(24.0));
    session.frame(ms(16));
    let scales = session.scales().as_slice();
    assert_eq!(scales[0], 1.5);
    assert!((scales[1] - 1.2).abs() < 1e-9);
}
