// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The three layout passes.
//!
//! Run in this order from [`Ui::end`](crate::Ui::end):
//!
//! 1. **Standalone** (preorder): resolve each box's style state, animate its
//!    displayed style, and add its own border and padding to its size.
//! 2. **Dependent descendant** (postorder): grow containers by their children
//!    according to each axis's [`SizeKind`].
//! 3. **Positions** (preorder): place children inside their parent, animate
//!    the displayed rectangle, and append visible boxes to the render list.
//!
//! The passes read each other's results; merging them changes output.

use kurbo::Point;

use crate::animate::{approach_rect, smoothing_factor};
use crate::error::{UiError, fatal};
use crate::types::{Axis, AxisExt, BoxFlags, BoxId, SizeKind, StyleKind};
use crate::ui::Ui;

impl<M> Ui<M> {
    pub(crate) fn layout_standalone(&mut self, id: BoxId) {
        let dt = self.input.dt;
        let scale = self.input.scale;
        let node = self.node_mut(id);

        let previous = node.style_kind;
        let target_kind = if node.flags.contains(BoxFlags::CLICKABLE) && node.clicked {
            StyleKind::Clicked
        } else if node.flags.contains(BoxFlags::HOVERABLE) && node.hovered {
            StyleKind::Hovered
        } else {
            StyleKind::Inactive
        };
        node.style_kind = target_kind;

        // Escalation snaps; de-escalation and holding steady are smoothed.
        let target = *node.style_set.get(target_kind);
        let smooth = target_kind <= previous
            && node.flags.contains(BoxFlags::ANIMATE)
            && !node.flags.contains(BoxFlags::FIRST_FRAME);
        if smooth {
            node.display_style.approach(&target, dt);
        } else {
            node.display_style = target;
        }

        let style = node.display_style;
        let border = if node.flags.contains(BoxFlags::DRAW_BORDER) {
            style.border_width
        } else {
            0.0
        };
        for axis in Axis::ALL {
            *node.target_size.along_mut(axis) +=
                scale * 2.0 * border + scale * 2.0 * style.inner_padding.along(axis);
        }

        let mut child = node.links.first_child;
        while let Some(c) = child {
            self.layout_standalone(c);
            child = self.get(c).links.next_sibling;
        }
    }

    pub(crate) fn layout_dependent_descendant(&mut self, id: BoxId) {
        let mut child = self.get(id).links.first_child;
        while let Some(c) = child {
            self.layout_dependent_descendant(c);
            child = self.get(c).links.next_sibling;
        }

        let scale = self.input.scale;
        for axis in Axis::ALL {
            let node = self.get(id);
            let grow = match node.size_kind(axis) {
                SizeKind::Text => continue,
                SizeKind::SumOfChildren => {
                    let gap = scale * node.display_style.child_gap.along(axis);
                    let mut total = 0.0;
                    let mut count = 0_usize;
                    let mut child = node.links.first_child;
                    while let Some(c) = child {
                        let c = self.get(c);
                        total += c.target_size.along(axis) + gap;
                        count += 1;
                        child = c.links.next_sibling;
                    }
                    // Gaps go between children only.
                    if count > 0 { total - gap } else { total }
                }
                SizeKind::LargestChild => {
                    let mut largest = 0.0_f64;
                    let mut child = node.links.first_child;
                    while let Some(c) = child {
                        let c = self.get(c);
                        largest = largest.max(c.target_size.along(axis));
                        child = c.links.next_sibling;
                    }
                    largest
                }
            };
            *self.node_mut(id).target_size.along_mut(axis) += grow;
        }

        let node = self.get(id);
        if node.flags.is_visible() {
            for axis in Axis::ALL {
                let size = node.target_size.along(axis);
                if size <= 0.0 || size.is_nan() {
                    fatal(UiError::ZeroSize {
                        key: self.key_of(id).unwrap_or("<unkeyed>").to_owned(),
                        axis,
                        size,
                    });
                }
            }
        }
    }

    pub(crate) fn layout_positions(&mut self, id: BoxId) {
        let scale = self.input.scale;
        let dt = self.input.dt;

        let node = self.get(id);
        if let Some(parent_id) = node.links.parent {
            let parent = self.get(parent_id);
            let axis = parent.flags.child_axis();
            let cross = axis.cross();
            let style = &parent.display_style;
            let border = if parent.flags.contains(BoxFlags::DRAW_BORDER) {
                style.border_width
            } else {
                0.0
            };
            let inset = |axis: Axis| {
                parent.target_origin.along(axis)
                    + scale * style.inner_padding.along(axis)
                    + scale * border
            };

            let main = match node.links.previous_sibling {
                Some(previous) => {
                    let previous = self.get(previous);
                    previous.target_origin.along(axis)
                        + previous.target_size.along(axis)
                        + scale * style.child_gap.along(axis)
                }
                None => inset(axis),
            };
            let mut origin = Point::ZERO;
            *origin.along_mut(axis) = main;
            *origin.along_mut(cross) = inset(cross);
            self.node_mut(id).target_origin = origin;
        }

        let node = self.node_mut(id);
        let target = node.target_rect();
        let animate = node.flags.contains(BoxFlags::ANIMATE)
            && !node.flags.contains(BoxFlags::FIRST_FRAME);
        node.display_rect = if animate {
            let factor = smoothing_factor(node.display_style.animation_speed, dt);
            approach_rect(node.display_rect, target, factor)
        } else {
            target
        };

        if node.flags.is_visible() {
            self.render_list.push(id);
        }

        let mut child = self.get(id).links.first_child;
        while let Some(c) = child {
            self.layout_positions(c);
            child = self.get(c).links.next_sibling;
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size, Vec2};
    use trellis_identity::Key;

    use crate::config::UiConfig;
    use crate::input::FrameInput;
    use crate::style::{Style, StyleSet};
    use crate::types::{Axis, BoxFlags, SizeKind, StyleKind};
    use crate::ui::Ui;

    type Measure = fn(&str, f64) -> Size;

    // Ten units per byte, ten units tall.
    fn fixed(text: &str, _font_size: f64) -> Size {
        Size::new(10.0 * text.len() as f64, 10.0)
    }

    fn flat() -> Ui<Measure> {
        let style = Style {
            inner_padding: Vec2::ZERO,
            child_gap: Vec2::new(5.0, 5.0),
            border_width: 0.0,
            ..Style::default()
        };
        let config = UiConfig::default()
            .with_base_style(StyleSet::uniform(style))
            .with_duplicate_key_detection(true);
        Ui::with_config(config, fixed as Measure)
    }

    fn styled() -> Ui<Measure> {
        let config = UiConfig::default().with_duplicate_key_detection(true);
        Ui::with_config(config, fixed as Measure)
    }

    #[test]
    fn sum_of_children_adds_gaps_between_children() {
        let mut ui = flat();
        ui.begin(FrameInput::default());
        let root = ui.container(Axis::X, BoxFlags::empty(), None);
        let a = ui.text("a");
        let b = ui.text("bb");
        let c = ui.text("ccc");
        ui.pop();
        ui.end();

        // 10 + 20 + 30 plus two gaps of 5.
        assert_eq!(ui.get(root).target_rect().width(), 70.0);
        assert_eq!(ui.get(root).target_rect().height(), 10.0);
        assert_eq!(ui.get(a).target_rect().x0, 0.0);
        assert_eq!(ui.get(b).target_rect().x0, 15.0);
        assert_eq!(ui.get(c).target_rect().x0, 40.0);
    }

    #[test]
    fn largest_child_takes_the_maximum() {
        let mut ui = flat();
        ui.begin(FrameInput::default());
        let root = ui.container(Axis::Y, BoxFlags::empty(), None);
        ui.text("a");
        ui.text("ccc");
        ui.text("bb");
        ui.pop();
        ui.end();

        let rect = ui.get(root).target_rect();
        assert_eq!(rect.width(), 30.0);
        assert_eq!(rect.height(), 40.0);
    }

    #[test]
    fn padding_and_border_inset_children() {
        let mut ui = styled();
        ui.begin(FrameInput::default());
        let root = ui.container(
            Axis::X,
            BoxFlags::DRAW_BORDER | BoxFlags::DRAW_BACKGROUND,
            Key::from("panel"),
        );
        let child = ui.text("ab");
        ui.pop();
        ui.end();

        // Border 1, padding (5, 3).
        assert_eq!(ui.get(child).target_rect(), Rect::new(6.0, 4.0, 36.0, 20.0));
        // Own padding and border on both sides around the child.
        let rect = ui.get(root).target_rect();
        assert_eq!(rect.size(), Size::new(30.0 + 12.0, 16.0 + 8.0));
    }

    #[test]
    fn scale_applies_to_every_metric() {
        let mut ui = styled();
        ui.begin(FrameInput::default().with_scale(2.0));
        let root = ui.container(Axis::X, BoxFlags::empty(), None);
        ui.set_origin(root, (100.0, 100.0));
        let first = ui.text("a##1");
        let second = ui.text("a##2");
        ui.pop();
        ui.end();

        let first = ui.get(first).target_rect();
        let second = ui.get(second).target_rect();
        // Text 10 wide plus 2 * 2 * 5 padding.
        assert_eq!(first, Rect::new(110.0, 106.0, 140.0, 128.0));
        assert_eq!(second.x0, first.x1 + 6.0);
    }

    #[test]
    fn first_frame_snaps_regardless_of_dt() {
        let mut ui = styled();
        ui.begin(FrameInput::at((-1.0, -1.0), 1.0));
        ui.container(Axis::X, BoxFlags::empty(), None);
        let id = ui.button("Go");
        ui.pop();
        ui.end();

        let b = ui.get(id);
        assert!(b.is_first_frame());
        assert_eq!(b.display_rect(), b.target_rect());
        assert_eq!(b.display_style(), b.style_set().get(StyleKind::Inactive));
    }

    #[test]
    fn moved_box_is_smoothed_after_first_frame() {
        let mut ui = styled();
        for (frame, origin) in [(0, 0.0), (1, 100.0)] {
            ui.begin(FrameInput::at((-1.0, -1.0), 0.016));
            let root = ui.container(Axis::X, BoxFlags::empty(), None);
            ui.set_origin(root, (origin, 0.0));
            let id = ui.button("Go");
            ui.pop();
            ui.end();

            let b = ui.get(id);
            if frame == 0 {
                assert_eq!(b.display_rect().x0, 5.0);
            } else {
                let x = b.display_rect().x0;
                assert!(x > 5.0 && x < 105.0, "x = {x}");
                assert_eq!(b.target_rect().x0, 105.0);
            }
        }
    }

    fn frame_with_button(ui: &mut Ui<Measure>, input: FrameInput) -> crate::BoxId {
        ui.begin(input);
        ui.container(Axis::X, BoxFlags::empty(), None);
        let id = ui.button("Go");
        ui.pop();
        ui.end();
        id
    }

    #[test]
    fn escalation_snaps_and_de_escalation_smooths() {
        let mut ui = styled();
        let away = Point::new(-10.0, -10.0);
        let inside = Point::new(20.0, 12.0);
        let set = StyleSet::default();
        let inactive = set.get(StyleKind::Inactive).background;
        let hovered = set.get(StyleKind::Hovered).background;

        frame_with_button(&mut ui, FrameInput::at(away, 0.016));

        let id = frame_with_button(&mut ui, FrameInput::at(inside, 0.016));
        let b = ui.get(id);
        assert!(b.hovered());
        assert_eq!(b.style_kind(), StyleKind::Hovered);
        assert_eq!(b.display_style().background, hovered);

        let id = frame_with_button(&mut ui, FrameInput::at(away, 0.016));
        let b = ui.get(id);
        assert!(!b.hovered());
        assert_eq!(b.style_kind(), StyleKind::Inactive);
        let r = b.display_style().background.r;
        assert!(r > hovered.r && r < inactive.r, "r = {r}");
    }

    #[test]
    fn click_snaps_to_clicked_style() {
        let mut ui = styled();
        frame_with_button(&mut ui, FrameInput::at((-10.0, -10.0), 0.016));
        let id = frame_with_button(
            &mut ui,
            FrameInput::at((20.0, 12.0), 0.016).with_primary_click(),
        );
        let b = ui.get(id);
        assert!(b.clicked());
        assert_eq!(b.display_style(), StyleSet::default().get(StyleKind::Clicked));
    }

    #[test]
    fn hit_test_excludes_edges() {
        let mut ui = styled();
        let id = frame_with_button(&mut ui, FrameInput::at((-10.0, -10.0), 0.0));
        let rect = ui.get(id).display_rect();
        let edges = [
            Point::new(rect.x0, rect.center().y),
            Point::new(rect.x1, rect.center().y),
            Point::new(rect.center().x, rect.y0),
            Point::new(rect.center().x, rect.y1),
        ];
        for pointer in edges {
            let id = frame_with_button(&mut ui, FrameInput::at(pointer, 0.0));
            assert!(!ui.get(id).hovered(), "{pointer:?}");
        }
        let id = frame_with_button(&mut ui, FrameInput::at(rect.center(), 0.0));
        assert!(ui.get(id).hovered());
    }

    #[test]
    fn render_list_is_preorder() {
        let mut ui = styled();
        ui.begin(FrameInput::default());
        let parent = ui.container(Axis::Y, BoxFlags::DRAW_BACKGROUND, Key::from("parent"));
        let first = ui.text("first");
        let inner = ui.container(Axis::X, BoxFlags::empty(), None);
        let nested = ui.text("nested");
        ui.pop();
        let second = ui.text("second");
        ui.pop();
        ui.end();

        // Invisible containers are laid out but not rendered.
        assert_eq!(ui.render_list, [parent, first, nested, second]);
        assert!(!ui.render_list.contains(&inner));
    }

    #[test]
    #[should_panic(expected = "non-positive size")]
    fn visible_empty_largest_child_box_fails() {
        let mut ui = flat();
        ui.begin(FrameInput::default());
        ui.container(Axis::X, BoxFlags::empty(), None);
        // Keyed, but with no display text to measure.
        let id = ui.push(false, BoxFlags::DRAW_BACKGROUND, Key::parse("###empty"));
        ui.set_size_kind(id, Axis::X, SizeKind::LargestChild);
        ui.set_size_kind(id, Axis::Y, SizeKind::LargestChild);
        ui.pop();
        ui.end();
    }

    #[test]
    fn invisible_empty_largest_child_box_passes() {
        let mut ui = flat();
        ui.begin(FrameInput::default());
        ui.container(Axis::X, BoxFlags::empty(), None);
        let id = ui.push(false, BoxFlags::empty(), None);
        ui.set_size_kind(id, Axis::X, SizeKind::LargestChild);
        ui.pop();
        ui.end();
        assert_eq!(ui.get(id).target_rect().size(), Size::ZERO);
    }

    #[test]
    fn keyed_boxes_persist_across_frames() {
        let mut ui = styled();
        let mut ids = Vec::new();
        for count in 0..4 {
            ui.begin(FrameInput::default());
            ui.container(Axis::Y, BoxFlags::empty(), None);
            let label = format!("Count: {count}###counter");
            let counter = ui.text(Key::parse(&label));
            let save1 = ui.button("Save##1");
            let save2 = ui.button("Save##2");
            ui.pop();
            ui.end();

            assert_ne!(save1, save2);
            assert_eq!(ui.get(save1).display_text(), "Save");
            assert_eq!(ui.get(counter).display_text(), format!("Count: {count}"));
            assert_eq!(ui.get(counter).is_first_frame(), count == 0);
            ids.push((counter, save1, save2));
        }
        assert!(ids.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(ui.persistent_count(), 3);
    }

    #[test]
    fn unkeyed_boxes_are_rebuilt() {
        let mut ui = styled();
        for _ in 0..3 {
            ui.begin(FrameInput::default());
            ui.parent(Axis::X, |ui| {
                let id = ui.push(false, BoxFlags::empty(), None);
                assert!(ui.get(id).is_first_frame());
                assert!(!id.is_persistent());
            });
            ui.end();
        }
        assert_eq!(ui.persistent_count(), 0);
    }
}
