//! Configuration types for the Lodestar engine.
//!
//! This module provides configuration structures controlling snapping and
//! auto-pan behavior. All types implement [`serde::Deserialize`] so hosts
//! can load them from external sources; missing sections and fields fall
//! back to the documented defaults.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining snap and pan settings.
//! - [`SnapSettings`] - Snap distance, tie epsilon, grid geometry, and
//!   per-strategy enablement.
//! - [`PanSettings`] - Edge-proximity auto-pan margins and speeds.

use serde::Deserialize;

/// Top-level engine configuration combining snap and pan settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Snapping configuration section.
    snap: SnapSettings,

    /// Auto-pan configuration section.
    pan: PanSettings,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified sections.
    pub fn new(snap: SnapSettings, pan: PanSettings) -> Self {
        Self { snap, pan }
    }

    /// Returns the snapping configuration.
    pub fn snap(&self) -> &SnapSettings {
        &self.snap
    }

    /// Returns the auto-pan configuration.
    pub fn pan(&self) -> &PanSettings {
        &self.pan
    }
}

/// Snapping configuration.
///
/// The distance threshold applies to every strategy: an offset is only
/// reported when its magnitude does not exceed `distance`. Candidates
/// whose distances fall within `tie_epsilon` of the winning candidate are
/// kept for guide rendering but do not affect the applied position.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SnapSettings {
    distance: f32,
    tie_epsilon: f32,
    grid_spacing: f32,
    grid_border_inset: f32,
    border_capture_margin: f32,
    enable_grid: bool,
    enable_borders: bool,
    enable_ports: bool,
    enable_spacing: bool,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            distance: 8.0,
            tie_epsilon: 0.01,
            grid_spacing: 20.0,
            grid_border_inset: 0.0,
            border_capture_margin: 100.0,
            enable_grid: true,
            enable_borders: true,
            enable_ports: true,
            enable_spacing: true,
        }
    }
}

impl SnapSettings {
    /// Returns the snap distance threshold
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Returns the near-tie epsilon used for guide collection
    pub fn tie_epsilon(&self) -> f32 {
        self.tie_epsilon
    }

    /// Returns the grid line spacing
    pub fn grid_spacing(&self) -> f32 {
        self.grid_spacing
    }

    /// Returns the border inset applied to grid edge references
    pub fn grid_border_inset(&self) -> f32 {
        self.grid_border_inset
    }

    /// Returns the neighborhood margin for border-snap candidate capture
    pub fn border_capture_margin(&self) -> f32 {
        self.border_capture_margin
    }

    /// Whether grid snapping is enabled
    pub fn grid_enabled(&self) -> bool {
        self.enable_grid
    }

    /// Whether border snapping is enabled
    pub fn borders_enabled(&self) -> bool {
        self.enable_borders
    }

    /// Whether port snapping is enabled
    pub fn ports_enabled(&self) -> bool {
        self.enable_ports
    }

    /// Whether equal-spacing snapping is enabled
    pub fn spacing_enabled(&self) -> bool {
        self.enable_spacing
    }

    /// Sets the snap distance threshold, returning the settings
    pub fn with_distance(mut self, distance: f32) -> Self {
        self.distance = distance;
        self
    }

    /// Sets the grid spacing, returning the settings
    pub fn with_grid_spacing(mut self, spacing: f32) -> Self {
        self.grid_spacing = spacing;
        self
    }

    /// Enables or disables individual strategies, returning the settings
    pub fn with_enabled(mut self, grid: bool, borders: bool, ports: bool, spacing: bool) -> Self {
        self.enable_grid = grid;
        self.enable_borders = borders;
        self.enable_ports = ports;
        self.enable_spacing = spacing;
        self
    }
}

/// Auto-pan configuration.
///
/// While a drag is active and the pointer sits within `edge_margin` of a
/// viewport edge, each host tick pans the view by a vector scaled between
/// `speed` and `max_speed` according to how deep into the margin the
/// pointer is.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PanSettings {
    edge_margin: f32,
    speed: f32,
    max_speed: f32,
}

impl Default for PanSettings {
    fn default() -> Self {
        Self {
            edge_margin: 50.0,
            speed: 4.0,
            max_speed: 10.0,
        }
    }
}

impl PanSettings {
    /// Returns the edge proximity margin in screen units
    pub fn edge_margin(&self) -> f32 {
        self.edge_margin
    }

    /// Returns the base pan speed per tick
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Returns the pan speed cap per tick
    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }
}
