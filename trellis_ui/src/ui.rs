// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame lifecycle and the tree builder.

use kurbo::{Point, Rect};
use trellis_identity::{IdentityStore, Key};

use crate::config::UiConfig;
use crate::error::{UiError, fatal};
use crate::input::{FrameInput, strictly_contains};
use crate::measure::TextMeasure;
use crate::node::UiBox;
use crate::style::{StyleSet, StyleStack};
use crate::types::{Axis, BoxFlags, BoxId, Handle, SizeKind, StyleKind};

/// Immediate-mode UI engine.
///
/// Drive it once per frame: [`Ui::begin`], any number of [`Ui::push`] /
/// [`Ui::pop`] calls, then [`Ui::end`], then read [`Ui::render_list`].
pub struct Ui<M> {
    pub(crate) config: UiConfig,
    pub(crate) measure: M,
    pub(crate) store: IdentityStore<UiBox>,
    pub(crate) frame_boxes: Vec<UiBox>,
    pub(crate) input: FrameInput,
    pub(crate) frame: u64,
    pub(crate) root: Option<BoxId>,
    pub(crate) parents: Vec<BoxId>,
    pub(crate) styles: StyleStack,
    pub(crate) render_list: Vec<BoxId>,
}

/// How a keyed declaration relates to the identity table this frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Declaration {
    /// First declaration ever.
    New,
    /// First declaration this frame of a known key.
    Existing,
    /// Same hash segment already declared this frame.
    Repeat,
}

impl<M> core::fmt::Debug for Ui<M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Ui")
            .field("frame", &self.frame)
            .field("store", &self.store)
            .field("frame_boxes", &self.frame_boxes.len())
            .field("open_parents", &self.parents.len())
            .field("style_depth", &self.styles.depth())
            .field("render_list", &self.render_list.len())
            .finish_non_exhaustive()
    }
}

impl<M: TextMeasure> Ui<M> {
    /// Create an engine with the default configuration.
    pub fn new(measure: M) -> Self {
        Self::with_config(UiConfig::default(), measure)
    }

    /// Create an engine with `config`.
    pub fn with_config(config: UiConfig, measure: M) -> Self {
        let styles = StyleStack::new(config.base_style);
        Self {
            store: IdentityStore::with_max_entries(config.max_boxes),
            render_list: Vec::with_capacity(config.max_boxes),
            frame_boxes: Vec::new(),
            input: FrameInput::default(),
            frame: 0,
            root: None,
            parents: Vec::new(),
            styles,
            measure,
            config,
        }
    }

    /// Start a frame.
    ///
    /// Drops last frame's tree, unkeyed boxes, and render list, and resets the
    /// style stack to the base set.
    pub fn begin(&mut self, input: FrameInput) {
        self.frame += 1;
        self.input = input;
        self.root = None;
        self.parents.clear();
        self.styles.reset(self.config.base_style);
        self.render_list.clear();
        self.frame_boxes.clear();
        log::trace!(
            "begin frame {} (dt {:.4}s, {} keyed boxes)",
            self.frame,
            input.dt,
            self.store.len()
        );
    }

    /// Declare a box.
    ///
    /// With a key the box is resolved against the identity table and keeps its
    /// displayed rectangle, style, and interaction state across frames. Without
    /// one it is a throwaway structural box for this frame only.
    ///
    /// The first box of a frame must be a container and becomes the root. A
    /// container becomes the parent of every box pushed until the matching
    /// [`Ui::pop`]. Size kinds default to sum-of-children along the stacking
    /// axis and largest-child across it; override with [`Ui::set_size_kind`].
    pub fn push<'k>(
        &mut self,
        container: bool,
        flags: BoxFlags,
        key: impl Into<Option<Key<'k>>>,
    ) -> BoxId {
        let parent = match (self.root, self.parents.last()) {
            (None, _) if !container => fatal(UiError::RootNotContainer),
            (None, _) => None,
            (Some(_), Some(&parent)) => Some(parent),
            (Some(_), None) => fatal(UiError::DetachedBox),
        };

        let key = key.into();
        let (id, declaration) = match &key {
            Some(key) => self.resolve(key),
            None => {
                self.frame_boxes.push(UiBox::default());
                (
                    BoxId::transient(self.frame_boxes.len() - 1, self.frame),
                    Declaration::New,
                )
            }
        };
        if declaration == Declaration::Repeat {
            // Aliases the earlier declaration; it is already linked into the tree.
            if container {
                self.parents.push(id);
            }
            return id;
        }
        let is_new = declaration == Declaration::New;
        let display = key.as_ref().map_or("", |key| key.display());

        let style_set = *self.styles.top();
        let scale = self.input.scale;
        let node = self.node_mut(id);
        node.reset_frame();
        node.flags = flags - BoxFlags::FIRST_FRAME;
        if is_new {
            node.flags |= BoxFlags::FIRST_FRAME;
            node.display_style = *style_set.get(StyleKind::Inactive);
            node.style_kind = StyleKind::Inactive;
        }
        node.along_child_axis(flags);
        node.style_set = style_set;
        node.text.push_str(display);
        let font_size = node.display_style.font_size * scale;

        if !display.is_empty() {
            let size = self.measure.measure(display, font_size);
            let valid = |v: f64| v.is_finite() && v > 0.0;
            if !valid(size.width) || !valid(size.height) {
                fatal(UiError::MeasureFailed {
                    text: display.to_owned(),
                    font_size,
                    width: size.width,
                    height: size.height,
                });
            }
            self.node_mut(id).target_size = size;
        }

        self.hit_test(id);

        match parent {
            Some(parent) => self.link_child(parent, id),
            None => self.root = Some(id),
        }
        if container {
            self.parents.push(id);
        }
        id
    }

    /// Close the current container.
    pub fn pop(&mut self) {
        if self.parents.pop().is_none() {
            fatal(UiError::PopWithoutParent);
        }
    }

    /// Push a copy of the current style set and return it for editing.
    ///
    /// Boxes pushed until the matching [`Ui::pop_style`] use it.
    pub fn push_style(&mut self) -> &mut StyleSet {
        self.styles.push()
    }

    /// Discard the style set pushed by the matching [`Ui::push_style`].
    pub fn pop_style(&mut self) {
        if !self.styles.pop() {
            fatal(UiError::StyleStackUnderflow);
        }
    }

    /// Finish the frame: run layout and build the render list.
    pub fn end(&mut self) {
        if self.parents.len() > 1 {
            log::warn!(
                "frame {} ended with {} containers still open",
                self.frame,
                self.parents.len() - 1
            );
        }
        self.parents.clear();

        let Some(root) = self.root else {
            log::trace!("end frame {}: empty", self.frame);
            return;
        };
        self.layout_standalone(root);
        self.layout_dependent_descendant(root);
        self.layout_positions(root);
        log::trace!(
            "end frame {}: {} keyed, {} unkeyed, {} to render",
            self.frame,
            self.store.len(),
            self.frame_boxes.len(),
            self.render_list.len()
        );
    }

    /// A clickable, hoverable, animated text button sized by its text.
    pub fn button<'k>(&mut self, key: impl Into<Key<'k>>) -> BoxId {
        let flags = BoxFlags::DRAW_TEXT
            | BoxFlags::DRAW_BACKGROUND
            | BoxFlags::DRAW_BORDER
            | BoxFlags::HOVERABLE
            | BoxFlags::CLICKABLE
            | BoxFlags::ANIMATE;
        let key: Key<'k> = key.into();
        let id = self.push(false, flags, key);
        self.set_size_kind_both(id, SizeKind::Text);
        id
    }

    /// An animated text label sized by its text.
    pub fn text<'k>(&mut self, key: impl Into<Key<'k>>) -> BoxId {
        let key: Key<'k> = key.into();
        let id = self.push(false, BoxFlags::DRAW_TEXT | BoxFlags::ANIMATE, key);
        self.set_size_kind_both(id, SizeKind::Text);
        id
    }

    /// Open a container stacking its children along `axis`.
    pub fn container<'k>(
        &mut self,
        axis: Axis,
        flags: BoxFlags,
        key: impl Into<Option<Key<'k>>>,
    ) -> BoxId {
        let flags = (flags - BoxFlags::CHILD_AXIS_Y) | axis.as_child_axis_flags();
        self.push(true, flags, key)
    }

    /// Run `build` inside an unkeyed, invisible container stacking along `axis`.
    pub fn parent<R>(&mut self, axis: Axis, build: impl FnOnce(&mut Self) -> R) -> R {
        self.container(axis, BoxFlags::empty(), None);
        let out = build(self);
        self.pop();
        out
    }

    /// Run `build` with a customized copy of the current style set on the stack.
    pub fn with_style<R>(
        &mut self,
        edit: impl FnOnce(&mut StyleSet),
        build: impl FnOnce(&mut Self) -> R,
    ) -> R {
        edit(self.push_style());
        let out = build(self);
        self.pop_style();
        out
    }
}

impl<M> Ui<M> {
    /// The box behind `id`.
    ///
    /// Unkeyed handles are only valid during the frame that created them.
    pub fn get(&self, id: BoxId) -> &UiBox {
        match id.0 {
            Handle::Persistent(slot) => self.store.get(slot),
            Handle::Frame { index, frame } => {
                self.check_frame(frame);
                self.frame_boxes
                    .get(index as usize)
                    .unwrap_or_else(|| fatal(UiError::UnknownBox))
            }
        }
    }

    pub(crate) fn node_mut(&mut self, id: BoxId) -> &mut UiBox {
        match id.0 {
            Handle::Persistent(slot) => self.store.get_mut(slot),
            Handle::Frame { index, frame } => {
                self.check_frame(frame);
                self.frame_boxes
                    .get_mut(index as usize)
                    .unwrap_or_else(|| fatal(UiError::UnknownBox))
            }
        }
    }

    /// Override the sizing policy of a box on one axis.
    pub fn set_size_kind(&mut self, id: BoxId, axis: Axis, kind: SizeKind) {
        self.node_mut(id).size_kind[axis.index()] = kind;
    }

    /// Place a box. Only meaningful for the root; layout positions the rest.
    pub fn set_origin(&mut self, id: BoxId, origin: impl Into<Point>) {
        self.node_mut(id).target_origin = origin.into();
    }

    /// Root of the current frame, if anything was pushed.
    pub fn root(&self) -> Option<BoxId> {
        self.root
    }

    /// Number of frames begun so far.
    pub fn frame_index(&self) -> u64 {
        self.frame
    }

    /// Number of keyed boxes ever declared.
    pub fn persistent_count(&self) -> usize {
        self.store.len()
    }

    /// Input of the current frame.
    pub fn input(&self) -> &FrameInput {
        &self.input
    }

    /// Configuration this engine was created with.
    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Hash segment a box was declared with; `None` for unkeyed boxes.
    pub fn key_of(&self, id: BoxId) -> Option<&str> {
        match id.0 {
            Handle::Persistent(slot) => self.store.key_of(slot),
            Handle::Frame { .. } => None,
        }
    }

    fn set_size_kind_both(&mut self, id: BoxId, kind: SizeKind) {
        self.node_mut(id).size_kind = [kind; 2];
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "frame stamps are truncated to 32 bits on both sides."
    )]
    fn check_frame(&self, frame: u32) {
        if frame != self.frame as u32 {
            fatal(UiError::UnknownBox);
        }
    }

    fn resolve(&mut self, key: &Key<'_>) -> (BoxId, Declaration) {
        let segment = key.hash_segment();
        let resolved = self
            .store
            .resolve(&segment)
            .unwrap_or_else(|err| fatal(err.into()));
        let id = BoxId::persistent(resolved.slot);
        if resolved.is_new {
            log::debug!("claimed identity {:?} for `{segment}`", resolved.slot);
        }

        let frame = self.frame;
        let node = self.store.get_mut(resolved.slot);
        let declaration = if resolved.is_new {
            Declaration::New
        } else if node.declared_frame == frame {
            if self.config.detect_duplicate_keys {
                fatal(UiError::DuplicateKey {
                    key: segment.into_owned(),
                    frame,
                });
            }
            log::warn!("key `{segment}` declared again in frame {frame}; aliasing the first box");
            Declaration::Repeat
        } else {
            Declaration::Existing
        };
        node.declared_frame = frame;
        (id, declaration)
    }

    /// Hover and click against last frame's displayed rectangle.
    fn hit_test(&mut self, id: BoxId) {
        let pointer = self.input.pointer;
        let primary = self.input.primary_pressed();
        let node = self.node_mut(id);
        let rect: Rect = node.display_rect;
        node.hovered = node.flags.contains(BoxFlags::HOVERABLE) && strictly_contains(rect, pointer);
        node.clicked = node.hovered && node.flags.contains(BoxFlags::CLICKABLE) && primary;
    }

    fn link_child(&mut self, parent: BoxId, child: BoxId) {
        let last = self.get(parent).links.last_child;
        match last {
            None => {
                let p = self.node_mut(parent);
                p.links.first_child = Some(child);
                p.links.last_child = Some(child);
            }
            Some(last) => {
                self.node_mut(last).links.next_sibling = Some(child);
                self.node_mut(child).links.previous_sibling = Some(last);
                self.node_mut(parent).links.last_child = Some(child);
            }
        }
        self.node_mut(child).links.parent = Some(parent);
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;
    use trellis_identity::Key;

    use super::Ui;
    use crate::config::UiConfig;
    use crate::input::FrameInput;
    use crate::measure::MonospaceMeasure;
    use crate::types::{Axis, BoxFlags};

    fn ui() -> Ui<MonospaceMeasure> {
        let config = UiConfig::default().with_duplicate_key_detection(true);
        Ui::with_config(config, MonospaceMeasure::default())
    }

    #[test]
    fn empty_frame_is_a_no_op() {
        let mut ui = ui();
        ui.begin(FrameInput::default());
        ui.end();
        assert_eq!(ui.root(), None);
        assert_eq!(ui.frame_index(), 1);
    }

    #[test]
    fn tree_links_follow_declaration_order() {
        let mut ui = ui();
        ui.begin(FrameInput::default());
        let root = ui.container(Axis::Y, BoxFlags::empty(), None);
        let a = ui.text("a");
        let b = ui.text("b");
        ui.pop();
        ui.end();

        let links = ui.get(root).links;
        assert_eq!(links.first_child, Some(a));
        assert_eq!(links.last_child, Some(b));
        assert_eq!(ui.get(a).links.next_sibling, Some(b));
        assert_eq!(ui.get(b).links.previous_sibling, Some(a));
        assert_eq!(ui.get(b).links.parent, Some(root));
    }

    #[test]
    fn with_style_scopes_the_edit() {
        let mut ui = ui();
        ui.begin(FrameInput::default());
        let (big, normal) = ui.parent(Axis::X, |ui| {
            let big = ui.with_style(
                |set| {
                    set.edit_all(|style| style.font_size = 28.0);
                },
                |ui| ui.text("big"),
            );
            (big, ui.text("normal"))
        });
        ui.end();

        assert_eq!(ui.get(big).display_style().font_size, 28.0);
        assert_eq!(ui.get(normal).display_style().font_size, 14.0);
        // Three glyphs at half the font size each, plus padding.
        assert_eq!(ui.get(big).target_rect().size(), Size::new(42.0 + 10.0, 28.0 + 6.0));
    }

    #[test]
    fn key_of_reports_the_hash_segment() {
        let mut ui = ui();
        ui.begin(FrameInput::default());
        let root = ui.container(Axis::X, BoxFlags::empty(), None);
        let id = ui.button("Save##file");
        ui.pop();
        ui.end();
        assert_eq!(ui.key_of(id), Some("Savefile"));
        assert_eq!(ui.key_of(root), None);
    }

    #[test]
    #[should_panic(expected = "pop called with no active parent")]
    fn pop_without_parent_is_fatal() {
        let mut ui = ui();
        ui.begin(FrameInput::default());
        ui.pop();
    }

    #[test]
    #[should_panic(expected = "must be a container")]
    fn leaf_root_is_fatal() {
        let mut ui = ui();
        ui.begin(FrameInput::default());
        ui.text("alone");
    }

    #[test]
    #[should_panic(expected = "after the root was closed")]
    fn second_root_is_fatal() {
        let mut ui = ui();
        ui.begin(FrameInput::default());
        ui.container(Axis::X, BoxFlags::empty(), None);
        ui.pop();
        ui.container(Axis::X, BoxFlags::empty(), None);
    }

    #[test]
    #[should_panic(expected = "only the base style set")]
    fn style_underflow_is_fatal() {
        let mut ui = ui();
        ui.begin(FrameInput::default());
        ui.pop_style();
    }

    #[test]
    #[should_panic(expected = "declared more than once")]
    fn duplicate_key_is_fatal_when_detected() {
        let mut ui = ui();
        ui.begin(FrameInput::default());
        ui.container(Axis::X, BoxFlags::empty(), None);
        ui.text("Count: 1###n");
        ui.text("Count: 2###n");
    }

    #[test]
    fn duplicate_key_aliases_when_not_detected() {
        let config = UiConfig::default().with_duplicate_key_detection(false);
        let mut ui = Ui::with_config(config, MonospaceMeasure::default());
        ui.begin(FrameInput::default());
        let root = ui.container(Axis::X, BoxFlags::empty(), None);
        let first = ui.text(Key::stable("one", "n"));
        let other = ui.text("other");
        let second = ui.text(Key::stable("two", "n"));
        ui.pop();
        ui.end();

        assert_eq!(first, second);
        // The repeat is folded into the first declaration, not relinked.
        assert_eq!(ui.get(first).display_text(), "one");
        assert_eq!(ui.get(first).links.next_sibling, Some(other));
        assert_eq!(ui.get(other).links.next_sibling, None);
        assert_eq!(ui.get(root).links.last_child, Some(other));
        assert_eq!(ui.render_list().count(), 2);
    }

    #[test]
    fn adjacent_repeated_keys_do_not_link_a_box_to_itself() {
        let config = UiConfig::default().with_duplicate_key_detection(false);
        let mut ui = Ui::with_config(config, MonospaceMeasure::default());
        ui.begin(FrameInput::default());
        ui.container(Axis::X, BoxFlags::empty(), None);
        let counter = ui.text("Count: 1###n");
        ui.text("Count: 2###n");
        ui.pop();
        ui.end();

        assert_eq!(ui.get(counter).links.next_sibling, None);
        assert_eq!(ui.render_list().count(), 1);
    }

    #[test]
    fn keys_probing_across_the_sentinel_resolve() {
        // A four-slot table; both segments probe slot 1 first.
        let config = UiConfig::default().with_max_boxes(1);
        let mut ui = Ui::with_config(config, MonospaceMeasure::default());
        ui.begin(FrameInput::default());
        ui.container(Axis::X, BoxFlags::empty(), None);
        let first = ui.text("toolbar/button-0");
        let second = ui.text("toolbar/button-101");
        ui.pop();
        ui.end();

        assert_ne!(first, second);
        assert_eq!(ui.persistent_count(), 2);
    }

    #[test]
    fn repeated_container_key_still_pairs_with_pop() {
        let config = UiConfig::default().with_duplicate_key_detection(false);
        let mut ui = Ui::with_config(config, MonospaceMeasure::default());
        ui.begin(FrameInput::default());
        ui.container(Axis::Y, BoxFlags::empty(), None);
        let panel = ui.container(Axis::X, BoxFlags::DRAW_BACKGROUND, Key::parse("###panel"));
        ui.text("a");
        ui.pop();
        let again = ui.container(Axis::X, BoxFlags::DRAW_BACKGROUND, Key::parse("###panel"));
        let b = ui.text("b");
        ui.pop();
        ui.pop();
        ui.end();

        assert_eq!(panel, again);
        assert_eq!(ui.get(panel).links.last_child, Some(b));
        assert_eq!(ui.get(panel).links.next_sibling, None);
    }

    #[test]
    #[should_panic(expected = "does not belong to the current frame")]
    fn stale_unkeyed_handle_is_fatal() {
        let mut ui = ui();
        ui.begin(FrameInput::default());
        let stale = ui.container(Axis::X, BoxFlags::empty(), None);
        ui.pop();
        ui.end();

        ui.begin(FrameInput::default());
        ui.container(Axis::X, BoxFlags::empty(), None);
        let _ = ui.get(stale);
    }

    #[test]
    #[should_panic(expected = "text measurement failed")]
    fn failed_measurement_is_fatal() {
        let measure = |_: &str, _: f64| Size::new(f64::NAN, 10.0);
        let mut ui = Ui::new(measure);
        ui.begin(FrameInput::default());
        ui.container(Axis::X, BoxFlags::empty(), None);
        ui.text("x");
    }

    #[test]
    #[should_panic(expected = "saturated")]
    fn identity_table_saturation_is_fatal() {
        let config = UiConfig::default().with_max_boxes(2);
        let mut ui = Ui::with_config(config, MonospaceMeasure::default());
        ui.begin(FrameInput::default());
        ui.container(Axis::X, BoxFlags::empty(), None);
        for i in 0..8 {
            ui.text(Key::parse_owned(format!("item {i}")));
        }
    }
}
