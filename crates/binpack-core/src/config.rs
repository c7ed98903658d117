use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{PackError, Result};

/// Guillotine free-rect choice heuristics. Smaller score wins; the `Worst*` variants
/// negate their `Best*` counterpart to keep large contiguous space around.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GuillotineChoice {
    BestAreaFit,
    BestShortSideFit,
    BestLongSideFit,
    WorstAreaFit,
    WorstShortSideFit,
    WorstLongSideFit,
}

impl GuillotineChoice {
    pub const ALL: [GuillotineChoice; 6] = [
        Self::BestAreaFit,
        Self::BestShortSideFit,
        Self::BestLongSideFit,
        Self::WorstAreaFit,
        Self::WorstShortSideFit,
        Self::WorstLongSideFit,
    ];
}

impl FromStr for GuillotineChoice {
    type Err = PackError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "baf" | "bestareafit" => Ok(Self::BestAreaFit),
            "bssf" | "bestshortsidefit" => Ok(Self::BestShortSideFit),
            "blsf" | "bestlongsidefit" => Ok(Self::BestLongSideFit),
            "waf" | "worstareafit" => Ok(Self::WorstAreaFit),
            "wssf" | "worstshortsidefit" => Ok(Self::WorstShortSideFit),
            "wlsf" | "worstlongsidefit" => Ok(Self::WorstLongSideFit),
            _ => Err(PackError::UnknownHeuristic(s.to_string())),
        }
    }
}

/// Guillotine split axis heuristics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GuillotineSplit {
    SplitShorterLeftoverAxis,
    SplitLongerLeftoverAxis,
    /// One big remainder at the expense of a small one.
    SplitMinimizeArea,
    /// Two remainders as even-sized as possible.
    SplitMaximizeArea,
    SplitShorterAxis,
    SplitLongerAxis,
}

impl GuillotineSplit {
    pub const ALL: [GuillotineSplit; 6] = [
        Self::SplitShorterLeftoverAxis,
        Self::SplitLongerLeftoverAxis,
        Self::SplitMinimizeArea,
        Self::SplitMaximizeArea,
        Self::SplitShorterAxis,
        Self::SplitLongerAxis,
    ];
}

impl FromStr for GuillotineSplit {
    type Err = PackError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "slas" | "splitshorterleftoveraxis" => Ok(Self::SplitShorterLeftoverAxis),
            "llas" | "splitlongerleftoveraxis" => Ok(Self::SplitLongerLeftoverAxis),
            "minas" | "splitminimizearea" => Ok(Self::SplitMinimizeArea),
            "maxas" | "splitmaximizearea" => Ok(Self::SplitMaximizeArea),
            "sas" | "splitshorteraxis" => Ok(Self::SplitShorterAxis),
            "las" | "splitlongeraxis" => Ok(Self::SplitLongerAxis),
            _ => Err(PackError::UnknownHeuristic(s.to_string())),
        }
    }
}

/// MaxRects placement heuristics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MaxRectsHeuristic {
    BestShortSideFit,
    BestLongSideFit,
    BestAreaFit,
    /// Tetris-style gravity placement.
    BottomLeft,
    /// Maximize edge contact with the bin border and placed rectangles.
    ContactPoint,
}

impl MaxRectsHeuristic {
    pub const ALL: [MaxRectsHeuristic; 5] = [
        Self::BestShortSideFit,
        Self::BestLongSideFit,
        Self::BestAreaFit,
        Self::BottomLeft,
        Self::ContactPoint,
    ];
}

impl FromStr for MaxRectsHeuristic {
    type Err = PackError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "baf" | "bestareafit" => Ok(Self::BestAreaFit),
            "bssf" | "bestshortsidefit" => Ok(Self::BestShortSideFit),
            "blsf" | "bestlongsidefit" => Ok(Self::BestLongSideFit),
            "bl" | "bottomleft" => Ok(Self::BottomLeft),
            "cp" | "contactpoint" => Ok(Self::ContactPoint),
            _ => Err(PackError::UnknownHeuristic(s.to_string())),
        }
    }
}

/// Per-bin packing configuration.
///
/// Guillotine reads `merge`, `g_choice` and `g_split`; MaxRects reads `mr_heuristic`.
/// Both honor `allow_rotation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinConfig {
    /// Bin width.
    pub width: u32,
    /// Bin height.
    pub height: u32,
    /// Allow 90° rotations for placements where beneficial.
    #[serde(default = "default_allow_rotation")]
    pub allow_rotation: bool,
    /// Run the Guillotine free-rect merge pass after every insertion.
    #[serde(default = "default_merge")]
    pub merge: bool,

    #[serde(default = "default_g_choice")]
    pub g_choice: GuillotineChoice,
    #[serde(default = "default_g_split")]
    pub g_split: GuillotineSplit,
    #[serde(default = "default_mr_heuristic")]
    pub mr_heuristic: MaxRectsHeuristic,
}

impl Default for BinConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
            allow_rotation: default_allow_rotation(),
            merge: default_merge(),
            g_choice: default_g_choice(),
            g_split: default_g_split(),
            mr_heuristic: default_mr_heuristic(),
        }
    }
}

impl BinConfig {
    /// Validates the configuration parameters.
    ///
    /// Returns an error if either bin dimension is zero.
    pub fn validate(&self) -> Result<()> {
        validate_dimensions(self.width, self.height)
    }

    /// Create a fluent builder for `BinConfig`.
    pub fn builder() -> BinConfigBuilder {
        BinConfigBuilder::new()
    }
}

pub(crate) fn validate_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(PackError::InvalidDimensions { width, height });
    }
    Ok(())
}

fn default_allow_rotation() -> bool {
    true
}
fn default_merge() -> bool {
    true
}
fn default_g_choice() -> GuillotineChoice {
    GuillotineChoice::BestAreaFit
}
fn default_g_split() -> GuillotineSplit {
    GuillotineSplit::SplitShorterLeftoverAxis
}
fn default_mr_heuristic() -> MaxRectsHeuristic {
    MaxRectsHeuristic::BestShortSideFit
}

/// Builder for `BinConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct BinConfigBuilder {
    cfg: BinConfig,
}

impl BinConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: BinConfig::default(),
        }
    }
    pub fn with_dimensions(mut self, w: u32, h: u32) -> Self {
        self.cfg.width = w;
        self.cfg.height = h;
        self
    }
    pub fn allow_rotation(mut self, v: bool) -> Self {
        self.cfg.allow_rotation = v;
        self
    }
    pub fn merge(mut self, v: bool) -> Self {
        self.cfg.merge = v;
        self
    }
    pub fn g_choice(mut self, v: GuillotineChoice) -> Self {
        self.cfg.g_choice = v;
        self
    }
    pub fn g_split(mut self, v: GuillotineSplit) -> Self {
        self.cfg.g_split = v;
        self
    }
    pub fn mr_heuristic(mut self, v: MaxRectsHeuristic) -> Self {
        self.cfg.mr_heuristic = v;
        self
    }
    pub fn build(self) -> BinConfig {
        self.cfg
    }
}
