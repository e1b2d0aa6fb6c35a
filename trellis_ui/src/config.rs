// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine configuration.

use crate::style::StyleSet;

/// Configuration fixed when a [`Ui`](crate::Ui) is created.
///
/// ```
/// use trellis_ui::{StyleSet, UiConfig};
///
/// let config = UiConfig::default()
///     .with_max_boxes(1024)
///     .with_duplicate_key_detection(true);
/// assert_eq!(config.max_boxes, 1024);
/// assert_eq!(config.base_style, StyleSet::default());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UiConfig {
    /// Most keyed boxes the process will ever declare. Sizes the identity table.
    pub max_boxes: usize,
    /// Style set at the bottom of the style stack every frame.
    pub base_style: StyleSet,
    /// Treat a hash segment declared twice in one frame as fatal.
    pub detect_duplicate_keys: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            max_boxes: 512,
            base_style: StyleSet::default(),
            detect_duplicate_keys: cfg!(debug_assertions),
        }
    }
}

impl UiConfig {
    /// Set [`UiConfig::max_boxes`].
    pub fn with_max_boxes(mut self, max_boxes: usize) -> Self {
        self.max_boxes = max_boxes;
        self
    }

    /// Set [`UiConfig::base_style`].
    pub fn with_base_style(mut self, base_style: StyleSet) -> Self {
        self.base_style = base_style;
        self
    }

    /// Set [`UiConfig::detect_duplicate_keys`].
    pub fn with_duplicate_key_detection(mut self, enabled: bool) -> Self {
        self.detect_duplicate_keys = enabled;
        self
    }
}
