use std::time::Duration;

use magdock_protocol::SharedStr;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, DockConfig};
use crate::engine::{
    Activation, ActivationError, ActivationState, FrameSlot, compute_positions, compute_scales,
    item_at,
};
use crate::model::{DockItem, PositionVector, ScaleVector};
use crate::views::bounce;

/// Everything a renderer needs for one item in one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemView {
    pub index: usize,
    pub label: SharedStr,
    pub asset: SharedStr,
    pub scale: f64,
    /// Left edge, from the container's left edge.
    pub offset: f64,
    /// Scaled width (and height).
    pub size: f64,
    pub is_active: bool,
    pub is_jumping: bool,
    pub is_hovered: bool,
    pub tooltip_visible: bool,
    /// Upward bounce displacement.
    pub lift: f64,
}

/// A frame of dock state, detached from the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockSnapshot {
    pub items: Vec<ItemView>,
    pub container_width: f64,
    /// Rest height: one unscaled item plus padding. Magnified items extend
    /// above it.
    pub container_height: f64,
    pub container_padding: f64,
    pub base_width: f64,
    pub tooltip_offset: f64,
    pub corner_radius: f64,
    pub hovered: Option<usize>,
    pub tooltips_visible: bool,
}

/// One dock: its items, the current scales and layout, click state, and
/// the pending pointer sample.
///
/// Hosts feed it pointer moves, pointer leaves, and clicks as they arrive,
/// and call [`DockSession::frame`] once per paint with the time since the
/// session started. Pointer moves are only applied in `frame`, so several
/// moves between paints cost one recompute.
#[derive(Debug, Clone)]
pub struct DockSession {
    config: DockConfig,
    items: Vec<DockItem>,
    scales: ScaleVector,
    positions: PositionVector,
    activation: Activation,
    pointer: FrameSlot<Option<f64>>,
    pointer_x: Option<f64>,
    hovered: Option<usize>,
    torn_down: bool,
}

impl DockSession {
    pub fn new(config: DockConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let items = DockItem::from_specs(&config.items);
        let scales = ScaleVector::ones(items.len());
        let positions = compute_positions(&scales, &config);
        let activation = Activation::new(items.len(), &config);
        Ok(Self {
            config,
            items,
            scales,
            positions,
            activation,
            pointer: FrameSlot::new(),
            pointer_x: None,
            hovered: None,
            torn_down: false,
        })
    }

    pub fn config(&self) -> &DockConfig {
        &self.config
    }

    pub fn items(&self) -> &[DockItem] {
        &self.items
    }

    pub fn scales(&self) -> &ScaleVector {
        &self.scales
    }

    pub fn positions(&self) -> &PositionVector {
        &self.positions
    }

    pub fn activation(&self) -> ActivationState {
        self.activation.state()
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Last pointer position applied by a frame.
    pub fn pointer_x(&self) -> Option<f64> {
        self.pointer_x
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Queue a pointer position, measured from the container's left edge,
    /// for the next frame. `None` means the container could not be
    /// measured.
    pub fn pointer_move(&mut self, x: Option<f64>) {
        if self.torn_down {
            return;
        }
        if self.pointer.post(x) {
            tracing::trace!(
                overwritten = self.pointer.overwritten(),
                "coalesced pointer move"
            );
        }
    }

    /// Pointer left the container: every item back to rest, right now.
    ///
    /// A move still waiting for its frame is dropped too, otherwise it
    /// would re-magnify the dock after the pointer is gone.
    pub fn pointer_leave(&mut self) {
        if self.torn_down {
            return;
        }
        self.pointer.clear();
        self.pointer_x = None;
        self.hovered = None;
        self.scales = ScaleVector::ones(self.items.len());
        self.positions = compute_positions(&self.scales, &self.config);
    }

    pub fn click(&mut self, index: usize, now: Duration) -> Result<(), ActivationError> {
        if self.torn_down {
            return Ok(());
        }
        self.activation.click(index, now)
    }

    /// Click whatever item is drawn under container-relative `x` in the
    /// current layout. Returns the clicked index, or `None` once torn down.
    pub fn click_at(&mut self, x: f64, now: Duration) -> Option<usize> {
        if self.torn_down {
            return None;
        }
        let index = item_at(x, &self.scales, &self.positions, &self.config)?;
        self.click(index, now).ok().map(|()| index)
    }

    /// Run one frame: apply the latest pending pointer move and fire any
    /// timers due at `now`. Returns `true` if the dock should be repainted,
    /// which includes every frame of a bounce.
    pub fn frame(&mut self, now: Duration) -> bool {
        if self.torn_down {
            return false;
        }
        let mut changed = false;
        if let Some(x) = self.pointer.take() {
            self.apply_pointer(x);
            changed = true;
        }
        if self.activation.advance(now) {
            changed = true;
        }
        changed || self.activation.state().jumping.is_some()
    }

    /// Whether the host should keep scheduling frames: a pointer move is
    /// waiting or an item is mid-jump.
    pub fn needs_frame(&self) -> bool {
        !self.torn_down && (self.pointer.is_pending() || self.activation.state().jumping.is_some())
    }

    /// When the next timer fires, for hosts that sleep between frames.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.activation.next_deadline()
    }

    /// Stop the session. Pending timers and pointer moves are dropped and
    /// later events are ignored.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        let canceled = self.activation.cancel_pending();
        self.pointer.clear();
        self.torn_down = true;
        tracing::debug!(canceled, "dock session torn down");
    }

    pub fn snapshot(&self, now: Duration) -> DockSnapshot {
        let state = self.activation.state();
        let lift = bounce::displacement(self.activation.jump_phase(now), self.config.bounce_height);
        let items = self
            .items
            .iter()
            .zip(self.scales.iter())
            .zip(self.positions.as_slice())
            .map(|((item, scale), &offset)| {
                let is_jumping = state.jumping == Some(item.index);
                ItemView {
                    index: item.index,
                    label: item.label.clone(),
                    asset: item.asset.clone(),
                    scale,
                    offset,
                    size: self.config.base_width * scale,
                    is_active: state.active == Some(item.index),
                    is_jumping,
                    is_hovered: self.hovered == Some(item.index),
                    tooltip_visible: state.tooltips_visible,
                    lift: if is_jumping { lift } else { 0.0 },
                }
            })
            .collect();

        DockSnapshot {
            items,
            container_width: self.positions.container_width(),
            container_height: self.config.base_width + 2.0 * self.config.container_padding,
            container_padding: self.config.container_padding,
            base_width: self.config.base_width,
            tooltip_offset: self.config.tooltip_offset,
            corner_radius: self.config.corner_radius,
            hovered: self.hovered,
            tooltips_visible: state.tooltips_visible,
        }
    }

    fn apply_pointer(&mut self, x: Option<f64>) {
        let x = x.filter(|x| x.is_finite());
        let content_x = x.map(|x| x - self.config.container_padding);
        self.scales = compute_scales(content_x, self.items.len(), &self.config);
        self.positions = compute_positions(&self.scales, &self.config);
        self.pointer_x = x;
        self.hovered = x.and_then(|x| item_at(x, &self.scales, &self.positions, &self.config));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn session() -> DockSession {
        DockSession::new(DockConfig::default()).unwrap_or_else(|e| panic!("{e}"))
    }

    #[test]
    fn pointer_moves_wait_for_frame() {
        let mut s = session();
        s.pointer_move(Some(140.0));
        assert!(s.scales().is_rest());
        assert!(s.needs_frame());
        assert!(s.frame(ms(16)));
        assert_eq!(s.scales().get(2), Some(2.0));
        assert_eq!(s.hovered(), Some(2));
    }

    #[test]
    fn only_latest_move_applies() {
        let mut s = session();
        s.pointer_move(Some(32.0));
        s.pointer_move(Some(86.0));
        s.pointer_move(Some(302.0));
        s.frame(ms(16));
        assert_eq!(s.scales().get(5), Some(2.0));
        assert_eq!(s.scales().get(0), Some(1.0));
        assert_eq!(s.pointer_x(), Some(302.0));
    }

    #[test]
    fn leave_resets_and_drops_pending_move() {
        let mut s = session();
        s.pointer_move(Some(140.0));
        s.frame(ms(16));
        s.pointer_move(Some(86.0));
        s.pointer_leave();
        assert!(s.scales().is_rest());
        assert_eq!(s.hovered(), None);
        s.frame(ms(32));
        assert!(s.scales().is_rest());
    }

    #[test]
    fn padding_is_subtracted_before_magnifying() {
        let config = DockConfig {
            container_padding: 10.0,
            ..DockConfig::default()
        };
        let mut s = DockSession::new(config).unwrap_or_else(|e| panic!("{e}"));
        s.pointer_move(Some(42.0));
        s.frame(ms(16));
        assert_eq!(s.scales().get(0), Some(2.0));
    }

    #[test]
    fn unmeasurable_pointer_is_rest() {
        let mut s = session();
        s.pointer_move(Some(140.0));
        s.frame(ms(16));
        s.pointer_move(None);
        s.frame(ms(32));
        assert!(s.scales().is_rest());
        assert_eq!(s.hovered(), None);
    }

    #[test]
    fn click_at_uses_current_layout() {
        let mut s = session();
        assert_eq!(s.click_at(60.0, ms(0)), Some(1));
        assert_eq!(s.activation().active, Some(1));
        assert_eq!(s.click_at(-5.0, ms(10)), None);
        assert_eq!(s.activation().active, Some(1));
    }

    #[test]
    fn snapshot_carries_activation_flags() {
        let mut s = session();
        assert!(s.click(4, ms(0)).is_ok());
        let snap = s.snapshot(ms(300));
        let item = &snap.items[4];
        assert!(item.is_active && item.is_jumping && !item.tooltip_visible);
        assert!(item.lift > 0.0);
        assert_eq!(snap.items[3].lift, 0.0);
        assert!(!snap.items[3].is_active);

        s.frame(ms(2400));
        let snap = s.snapshot(ms(2400));
        let item = &snap.items[4];
        assert!(item.is_active && !item.is_jumping && item.tooltip_visible);
        assert_eq!(item.lift, 0.0);
    }

    #[test]
    fn teardown_cancels_settle_and_ignores_events() {
        let mut s = session();
        assert!(s.click(0, ms(0)).is_ok());
        s.teardown();
        assert!(!s.frame(ms(5000)));
        assert_eq!(s.activation().jumping, Some(0));
        assert_eq!(s.next_deadline(), None);
        s.pointer_move(Some(32.0));
        assert!(!s.needs_frame());
        assert!(s.is_torn_down());
    }

    #[test]
    fn click_at_after_teardown_reports_nothing() {
        let mut s = session();
        s.teardown();
        assert_eq!(s.click_at(60.0, ms(0)), None);
        assert_eq!(s.activation().active, None);
    }

    #[test]
    fn rejects_invalid_config() {
        let config = DockConfig {
            max_distance: 0.0,
            ..DockConfig::default()
        };
        assert!(DockSession::new(config).is_err());
    }
}
