//! Property-based invariants for the magnification and layout engines.
//!
//! 1. Every scale lies in [1, max_scale].
//! 2. A pointer exactly on a rest center gives that item max_scale, and a
//!    pointer off every rest center gives no item max_scale.
//! 3. A pointer farther than max_distance from every center leaves the dock
//!    at rest.
//! 4. Same pointer, same items: same scales.
//! 5. Pointer-leave resets every scale to exactly 1.0.
//! 6. Positions strictly increase whenever every scaled stride is positive.
//! 7. Container width matches the fold.

use std::time::Duration;

use magdock_core::config::DockConfig;
use magdock_core::engine::{compute_positions, compute_scales, rest_center};
use magdock_core::model::ItemSpec;
use magdock_core::session::DockSession;
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn config_strategy() -> impl Strategy<Value = DockConfig> {
    (16.0f64..128.0, -0.9f64..0.5, 1.0f64..4.0, 10.0f64..200.0, 0.0f64..20.0).prop_map(
        |(base_width, gap_ratio, max_scale, max_distance, container_padding)| DockConfig {
            base_width,
            gap: base_width * gap_ratio,
            max_scale,
            max_distance,
            container_padding,
            ..DockConfig::default()
        },
    )
}

fn items(n: usize) -> Vec<ItemSpec> {
    (0..n)
        .map(|i| ItemSpec::new(format!("item {i}"), format!("{i}.png")))
        .collect()
}

// ═════════════════════════════════════════════════════════════════════════
// 1–4. Magnification
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn scales_stay_in_range(config in config_strategy(), n in 0usize..20, x in -500.0f64..2000.0) {
        let scales = compute_scales(Some(x), n, &config);
        prop_assert_eq!(scales.len(), n);
        for s in scales.iter() {
            prop_assert!(s >= 1.0 && s <= config.max_scale, "scale {} out of range", s);
        }
    }

    #[test]
    fn center_gets_max_scale(config in config_strategy(), n in 1usize..20, pick in 0usize..20) {
        let index = pick % n;
        let scales = compute_scales(Some(rest_center(index, &config)), n, &config);
        prop_assert_eq!(scales.get(index), Some(config.max_scale));
    }

    #[test]
    fn off_center_never_reaches_max(config in config_strategy(), n in 1usize..20, x in -500.0f64..2000.0) {
        prop_assume!(config.max_scale > 1.01);
        prop_assume!((0..n).all(|i| (x - rest_center(i, &config)).abs() >= 0.5));
        for s in compute_scales(Some(x), n, &config).iter() {
            prop_assert!(s < config.max_scale, "scale {} reached max {}", s, config.max_scale);
        }
    }

    #[test]
    fn far_pointer_is_rest(config in config_strategy(), n in 0usize..20, beyond in 0.001f64..500.0, left in any::<bool>()) {
        let x = if left {
            rest_center(0, &config) - config.max_distance - beyond
        } else {
            rest_center(n.saturating_sub(1), &config) + config.max_distance + beyond
        };
        prop_assert!(compute_scales(Some(x), n, &config).is_rest());
    }

    #[test]
    fn magnification_is_deterministic(config in config_strategy(), n in 0usize..20, x in -500.0f64..2000.0) {
        prop_assert_eq!(
            compute_scales(Some(x), n, &config),
            compute_scales(Some(x), n, &config)
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Pointer-leave
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn leave_always_resets(moves in proptest::collection::vec(-100.0f64..500.0, 0..10), n in 0usize..10) {
        let config = DockConfig { items: items(n), ..DockConfig::default() };
        let mut session = DockSession::new(config).map_err(|e| TestCaseError::fail(e.to_string()))?;
        for (frame, x) in moves.iter().enumerate() {
            session.pointer_move(Some(*x));
            if frame % 2 == 0 {
                session.frame(Duration::from_millis(frame as u64 * 16));
            }
        }
        session.pointer_leave();
        prop_assert!(session.scales().iter().all(|s| s == 1.0));
        session.frame(Duration::from_secs(1));
        prop_assert!(session.scales().iter().all(|s| s == 1.0));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6–7. Layout
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn layout_is_strictly_increasing(config in config_strategy(), n in 0usize..20, x in -500.0f64..2000.0) {
        let scales = compute_scales(Some(x), n, &config);
        let positions = compute_positions(&scales, &config);
        prop_assert_eq!(positions.get(0).unwrap_or(config.container_padding), config.container_padding);
        for pair in positions.as_slice().windows(2) {
            prop_assert!(pair[1] > pair[0], "{} !> {}", pair[1], pair[0]);
        }
    }

    #[test]
    fn container_width_matches_fold(config in config_strategy(), n in 1usize..20, x in -500.0f64..2000.0) {
        let scales = compute_scales(Some(x), n, &config);
        let positions = compute_positions(&scales, &config);
        let last = n - 1;
        let right_edge = positions.as_slice()[last] + config.base_width * scales.as_slice()[last];
        let expected = right_edge + config.container_padding;
        prop_assert!((positions.container_width() - expected).abs() < 1e-6);
    }
}
