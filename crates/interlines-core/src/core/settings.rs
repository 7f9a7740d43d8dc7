use crate::core::interactions::kind::{InteractionKind, ParseInteractionKindError};
use crate::core::interactions::line::Color;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error(transparent)]
    UnknownKind(#[from] ParseInteractionKindError),

    #[error("No settings configured for interaction kind '{0}'")]
    MissingKind(InteractionKind),
}

/// How lines of one interaction kind are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LineSettings {
    pub visible: bool,
    pub color: [u8; 3],
}

impl LineSettings {
    pub const fn new(visible: bool, color: [u8; 3]) -> Self {
        Self { visible, color }
    }

    /// Configured color, opaque.
    pub fn color(&self) -> Color {
        let [r, g, b] = self.color;
        Color::rgb(r, g, b)
    }
}

/// Per-kind display settings, the only configuration the engine consumes.
///
/// Serialized as a table keyed by kind name:
///
/// ```toml
/// [HydrogenBond]
/// visible = true
/// color = [0, 170, 255]
/// ```
///
/// Keys accept anything [`InteractionKind`] parses, including aliases such as
/// `hbond`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, LineSettings>",
    into = "BTreeMap<String, LineSettings>"
)]
pub struct InteractionSettings {
    kinds: BTreeMap<InteractionKind, LineSettings>,
}

impl InteractionSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in palette covering every kind.
    pub fn defaults() -> Self {
        use InteractionKind::*;
        let table = [
            (Covalent, LineSettings::new(false, [255, 255, 255])),
            (HydrogenBond, LineSettings::new(true, [0, 170, 255])),
            (WeakHydrogenBond, LineSettings::new(false, [128, 200, 255])),
            (Ionic, LineSettings::new(true, [255, 0, 255])),
            (XBond, LineSettings::new(true, [0, 255, 128])),
            (MetalComplex, LineSettings::new(true, [160, 80, 200])),
            (Hydrophobic, LineSettings::new(true, [160, 160, 160])),
            (VanDerWaals, LineSettings::new(false, [200, 200, 120])),
            (VanDerWaalsClash, LineSettings::new(true, [255, 120, 0])),
            (Clash, LineSettings::new(true, [255, 0, 0])),
            (Polar, LineSettings::new(true, [255, 80, 80])),
            (WeakPolar, LineSettings::new(false, [255, 160, 160])),
            (Aromatic, LineSettings::new(true, [0, 200, 0])),
            (Carbonyl, LineSettings::new(false, [255, 200, 0])),
            (Amide, LineSettings::new(false, [200, 100, 0])),
            (CationPi, LineSettings::new(true, [0, 120, 255])),
            (DonorPi, LineSettings::new(true, [255, 100, 180])),
            (HalogenPi, LineSettings::new(true, [60, 220, 220])),
            (CarbonPi, LineSettings::new(true, [100, 100, 255])),
        ];
        Self {
            kinds: table.into_iter().collect(),
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(s)?)
    }

    pub fn to_toml_string(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string(self)?)
    }

    pub fn get(&self, kind: InteractionKind) -> Option<&LineSettings> {
        self.kinds.get(&kind)
    }

    /// Like [`get`](Self::get), but a missing kind is an error.
    pub fn require(&self, kind: InteractionKind) -> Result<&LineSettings, SettingsError> {
        self.get(kind).ok_or(SettingsError::MissingKind(kind))
    }

    pub fn insert(&mut self, kind: InteractionKind, settings: LineSettings) -> Option<LineSettings> {
        self.kinds.insert(kind, settings)
    }

    /// Toggles visibility of one kind, inserting it with a white color if absent.
    pub fn set_visible(&mut self, kind: InteractionKind, visible: bool) {
        self.kinds
            .entry(kind)
            .or_insert(LineSettings::new(visible, [255, 255, 255]))
            .visible = visible;
    }

    /// Returns `self` with every kind configured in `other` replaced by `other`'s value.
    pub fn overlay(mut self, other: InteractionSettings) -> Self {
        self.kinds.extend(other.kinds);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (InteractionKind, &LineSettings)> {
        self.kinds.iter().map(|(kind, settings)| (*kind, settings))
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl FromIterator<(InteractionKind, LineSettings)> for InteractionSettings {
    fn from_iter<T: IntoIterator<Item = (InteractionKind, LineSettings)>>(iter: T) -> Self {
        Self {
            kinds: iter.into_iter().collect(),
        }
    }
}

impl TryFrom<BTreeMap<String, LineSettings>> for InteractionSettings {
    type Error = SettingsError;

    fn try_from(raw: BTreeMap<String, LineSettings>) -> Result<Self, Self::Error> {
        raw.into_iter()
            .map(|(name, settings)| Ok((name.parse::<InteractionKind>()?, settings)))
            .collect()
    }
}

impl From<InteractionSettings> for BTreeMap<String, LineSettings> {
    fn from(settings: InteractionSettings) -> Self {
        settings
            .kinds
            .into_iter()
            .map(|(kind, line)| (kind.to_string(), line))
            .collect()
    }
}
