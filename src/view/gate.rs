//! The gate widget.
//!
//! Owns the configuration, the visibility tracker, and the two waypoints;
//! dispatches change callbacks; and swaps between placeholder and actual
//! content at render time. This is the impure shell around the reducer:
//! everything observable (drawing, callbacks) happens here.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Widget};
use tracing::debug;

use crate::config::GateConfig;
use crate::model::{Boundary, GateError, PositionChange};
use crate::state::VisibilityTracker;
use crate::view::placeholder::default_placeholder;
use crate::watcher::{ViewportGeometry, Waypoint};

/// Boxed draw closure for content and placeholder providers.
type DrawFn = Box<dyn FnMut(Rect, &mut Buffer)>;

/// The content provider resolved at render time.
///
/// Embedders may hand the gate its content either as "children" (the
/// closure-as-child shape) or as an explicit render closure; children win
/// when both are present.
enum ContentProvider<'g> {
    Children(&'g mut DrawFn),
    Render(&'g mut DrawFn),
}

/// A gate deferring one region's rendering until it nears the viewport.
///
/// Construct with [`new`](Self::new), attach providers with the builder
/// methods, then drive it with [`observe`](Self::observe) on every
/// scroll/layout tick and [`render`](Self::render) on every frame.
pub struct LazyGate {
    tracker: VisibilityTracker,
    waypoints: Option<(Waypoint, Waypoint)>,
    children: Option<DrawFn>,
    render_fn: Option<DrawFn>,
    placeholder_fn: Option<DrawFn>,
    on_change: Option<Box<dyn FnMut(bool)>>,
    block: Option<Block<'static>>,
    style: Style,
}

impl LazyGate {
    /// Create a gate from its configuration.
    pub fn new(config: GateConfig) -> Self {
        config.validate();
        Self {
            tracker: VisibilityTracker::new(config.optimistic, config.only_in),
            waypoints: Some((
                Waypoint::new(Boundary::Top, config.offset_top),
                Waypoint::new(Boundary::Bottom, config.offset_bottom),
            )),
            children: None,
            render_fn: None,
            placeholder_fn: None,
            on_change: None,
            block: None,
            style: Style::default(),
        }
    }

    /// Supply the actual content as a children closure.
    ///
    /// Takes precedence over [`render_with`](Self::render_with) when both
    /// are present.
    pub fn children(mut self, draw: impl FnMut(Rect, &mut Buffer) + 'static) -> Self {
        self.children = Some(Box::new(draw));
        self
    }

    /// Supply the actual content as a render closure.
    pub fn render_with(mut self, draw: impl FnMut(Rect, &mut Buffer) + 'static) -> Self {
        self.render_fn = Some(Box::new(draw));
        self
    }

    /// Supply a custom placeholder; the built-in dim fill is used otherwise.
    pub fn placeholder(mut self, draw: impl FnMut(Rect, &mut Buffer) + 'static) -> Self {
        self.placeholder_fn = Some(Box::new(draw));
        self
    }

    /// Callback invoked with the new flag exactly once per transition.
    pub fn on_change(mut self, callback: impl FnMut(bool) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Wrap the gated area in a block (borders, titles, padding).
    pub fn block(mut self, block: Block<'static>) -> Self {
        self.block = Some(block);
        self
    }

    /// Base style applied to the gated area before either branch draws.
    pub fn style(mut self, style: impl Into<Style>) -> Self {
        self.style = style.into();
        self
    }

    /// Current flag: `true` means the placeholder is showing.
    pub fn is_virtualized(&self) -> bool {
        self.tracker.is_virtualized()
    }

    /// Whether both boundaries have reported at least once.
    pub fn is_initialized(&self) -> bool {
        self.tracker.is_initialized()
    }

    /// Whether the `only_in` latch has engaged and tracking has stopped.
    pub fn is_settled(&self) -> bool {
        self.tracker.is_settled()
    }

    /// Feed one geometry snapshot through both waypoints into the reducer.
    ///
    /// A no-op once torn down or settled. Waypoints are dropped the moment
    /// the latch engages.
    pub fn observe(&mut self, geometry: ViewportGeometry) {
        if self.tracker.is_torn_down() {
            return;
        }
        let Some((top, bottom)) = self.waypoints.as_mut() else {
            return;
        };
        let top_change = top.update(&geometry);
        let bottom_change = bottom.update(&geometry);

        for (boundary, change) in [
            (Boundary::Top, top_change),
            (Boundary::Bottom, bottom_change),
        ] {
            if let Some(change) = change {
                self.dispatch(boundary, change);
            }
        }

        if self.tracker.is_settled() {
            debug!("region seen; dropping waypoints");
            self.waypoints = None;
        }
    }

    /// Deliver a single boundary event directly.
    ///
    /// `observe` is the usual entry point; this one exists for embedders
    /// that already have their own position tracking.
    pub fn handle_position_change(&mut self, boundary: Boundary, change: PositionChange) {
        if self.tracker.is_torn_down() {
            return;
        }
        self.dispatch(boundary, change);
        if self.tracker.is_settled() {
            self.waypoints = None;
        }
    }

    /// Stop tracking and suppress all further events and callbacks.
    pub fn tear_down(&mut self) {
        self.tracker.tear_down();
        self.waypoints = None;
    }

    /// Draw the gate into `area`.
    ///
    /// Fails fast with [`GateError::MissingContent`] when no content
    /// provider was supplied, even on frames that would only draw the
    /// placeholder.
    pub fn render(&mut self, area: Rect, buf: &mut Buffer) -> Result<(), GateError> {
        self.content()?;

        buf.set_style(area, self.style);
        let inner = match self.block.clone() {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };
        if inner.is_empty() {
            return Ok(());
        }

        if !self.tracker.is_virtualized() || self.tracker.is_settled() {
            match self.content()? {
                ContentProvider::Children(draw) | ContentProvider::Render(draw) => {
                    draw(inner, buf);
                }
            }
        } else if let Some(draw) = self.placeholder_fn.as_mut() {
            draw(inner, buf);
        } else {
            default_placeholder(inner, buf);
        }
        Ok(())
    }

    fn dispatch(&mut self, boundary: Boundary, change: PositionChange) {
        if let Some(virtualized) = self.tracker.observe(boundary, change) {
            if let Some(on_change) = self.on_change.as_mut() {
                on_change(virtualized);
            }
        }
    }

    fn content(&mut self) -> Result<ContentProvider<'_>, GateError> {
        match (self.children.as_mut(), self.render_fn.as_mut()) {
            (Some(draw), _) => Ok(ContentProvider::Children(draw)),
            (None, Some(draw)) => Ok(ContentProvider::Render(draw)),
            (None, None) => Err(GateError::MissingContent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Offset;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn zero_offset_config() -> GateConfig {
        GateConfig::new().offsets(Offset::Rows(0))
    }

    fn marked_gate(config: GateConfig) -> LazyGate {
        LazyGate::new(config)
            .render_with(|area, buf| {
                buf.set_string(area.x, area.y, "CONTENT", Style::default());
            })
            .placeholder(|area, buf| {
                buf.set_string(area.x, area.y, "WAITING", Style::default());
            })
    }

    fn first_line(buf: &Buffer) -> String {
        let area = buf.area();
        (area.left()..area.right())
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    /// Region rows 30..=34 in a 10-row window.
    fn geom(scroll_offset: usize) -> ViewportGeometry {
        ViewportGeometry::new(scroll_offset, 10, 30, 5)
    }

    #[test]
    fn render_without_provider_fails_fast() {
        let mut gate = LazyGate::new(GateConfig::new());
        let area = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::empty(area);
        assert_eq!(gate.render(area, &mut buf), Err(GateError::MissingContent));
    }

    #[test]
    fn missing_content_fails_even_while_virtualized() {
        let mut gate = LazyGate::new(GateConfig::new()).placeholder(|_, _| {});
        let area = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::empty(area);
        assert_eq!(gate.render(area, &mut buf), Err(GateError::MissingContent));
    }

    #[test]
    fn starts_with_placeholder_until_region_approaches() {
        let mut gate = marked_gate(zero_offset_config());
        gate.observe(geom(0));

        let area = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::empty(area);
        gate.render(area, &mut buf).expect("render");
        assert_eq!(first_line(&buf), "WAITING");
    }

    #[test]
    fn optimistic_gate_shows_content_before_any_report() {
        let mut gate = marked_gate(zero_offset_config().optimistic(true));
        let area = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::empty(area);
        gate.render(area, &mut buf).expect("render");
        assert_eq!(first_line(&buf), "CONTENT");
    }

    #[test]
    fn scrolling_to_the_region_materializes_content() {
        let mut gate = marked_gate(zero_offset_config());
        gate.observe(geom(0));
        assert!(gate.is_virtualized());

        gate.observe(geom(27));
        assert!(!gate.is_virtualized());

        let area = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::empty(area);
        gate.render(area, &mut buf).expect("render");
        assert_eq!(first_line(&buf), "CONTENT");
    }

    #[test]
    fn children_take_precedence_over_render() {
        let mut gate = LazyGate::new(zero_offset_config().optimistic(true))
            .render_with(|area, buf| {
                buf.set_string(area.x, area.y, "RENDER", Style::default());
            })
            .children(|area, buf| {
                buf.set_string(area.x, area.y, "CHILD", Style::default());
            });
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        gate.render(area, &mut buf).expect("render");
        assert_eq!(first_line(&buf), "CHILD");
    }

    #[test]
    fn default_placeholder_used_when_none_supplied() {
        let mut gate = LazyGate::new(zero_offset_config()).render_with(|_, _| {});
        gate.observe(geom(0));
        let area = Rect::new(0, 0, 4, 1);
        let mut buf = Buffer::empty(area);
        gate.render(area, &mut buf).expect("render");
        assert_eq!(buf[(0, 0)].symbol(), "░");
    }

    #[test]
    fn on_change_fires_once_per_transition() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut gate = marked_gate(zero_offset_config()).on_change(move |virtualized| {
            sink.borrow_mut().push(virtualized);
        });

        gate.observe(geom(0));
        assert!(seen.borrow().is_empty());

        gate.observe(geom(27));
        gate.observe(geom(28));
        assert_eq!(*seen.borrow(), vec![false]);

        gate.observe(geom(40));
        assert_eq!(*seen.borrow(), vec![false, true]);
    }

    #[test]
    fn observe_after_teardown_is_a_no_op() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut gate = marked_gate(zero_offset_config()).on_change(move |virtualized| {
            sink.borrow_mut().push(virtualized);
        });

        gate.observe(geom(0));
        gate.tear_down();
        gate.observe(geom(27));
        assert!(seen.borrow().is_empty());
        assert!(gate.is_virtualized());
    }

    #[test]
    fn only_in_gate_drops_waypoints_once_seen() {
        let mut gate = marked_gate(zero_offset_config().only_in(true));
        gate.observe(geom(27));
        assert!(gate.is_settled());
        assert!(gate.waypoints.is_none());

        // Scrolling away no longer changes anything.
        gate.observe(geom(0));
        assert!(!gate.is_virtualized());

        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        gate.render(area, &mut buf).expect("render");
        assert_eq!(first_line(&buf), "CONTENT");
    }

    #[test]
    fn direct_events_reach_the_reducer() {
        use crate::model::Position;

        let mut gate = marked_gate(zero_offset_config());
        gate.handle_position_change(
            Boundary::Top,
            PositionChange::initial(Position::Above),
        );
        gate.handle_position_change(
            Boundary::Bottom,
            PositionChange::initial(Position::Below),
        );
        assert!(gate.is_initialized());
        assert!(!gate.is_virtualized());
    }

    #[test]
    fn block_insets_the_drawn_content() {
        let mut gate = marked_gate(zero_offset_config().optimistic(true))
            .block(Block::bordered());
        let area = Rect::new(0, 0, 12, 3);
        let mut buf = Buffer::empty(area);
        gate.render(area, &mut buf).expect("render");
        // Content lands inside the border, not on it.
        assert_eq!(buf[(1, 1)].symbol(), "C");
        assert_ne!(buf[(0, 0)].symbol(), "C");
    }
}
