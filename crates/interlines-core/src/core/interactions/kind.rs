use phf::{Map, phf_map};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The kind of non-covalent (or covalent) contact an interaction line depicts.
///
/// Kinds display as, serialize as and parse from their variant name, which is
/// also how settings files key per-kind configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InteractionKind {
    Covalent,
    HydrogenBond,
    WeakHydrogenBond,
    Ionic,
    XBond,
    MetalComplex,
    Hydrophobic,
    VanDerWaals,
    VanDerWaalsClash,
    Clash,
    Polar,
    WeakPolar,
    Aromatic,
    Carbonyl,
    Amide,
    CationPi,
    DonorPi,
    HalogenPi,
    CarbonPi,
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("Unknown interaction kind '{0}'")]
pub struct ParseInteractionKindError(pub String);

static KIND_ALIASES: Map<&'static str, InteractionKind> = phf_map! {
    "hbond" => InteractionKind::HydrogenBond,
    "h-bond" => InteractionKind::HydrogenBond,
    "weak-hbond" => InteractionKind::WeakHydrogenBond,
    "halogen" => InteractionKind::XBond,
    "xbond" => InteractionKind::XBond,
    "metal" => InteractionKind::MetalComplex,
    "vdw" => InteractionKind::VanDerWaals,
    "vdw-clash" => InteractionKind::VanDerWaalsClash,
    "pi-stacking" => InteractionKind::Aromatic,
    "cation-pi" => InteractionKind::CationPi,
    "donor-pi" => InteractionKind::DonorPi,
    "halogen-pi" => InteractionKind::HalogenPi,
    "carbon-pi" => InteractionKind::CarbonPi,
};

impl InteractionKind {
    pub const ALL: [InteractionKind; 19] = [
        InteractionKind::Covalent,
        InteractionKind::HydrogenBond,
        InteractionKind::WeakHydrogenBond,
        InteractionKind::Ionic,
        InteractionKind::XBond,
        InteractionKind::MetalComplex,
        InteractionKind::Hydrophobic,
        InteractionKind::VanDerWaals,
        InteractionKind::VanDerWaalsClash,
        InteractionKind::Clash,
        InteractionKind::Polar,
        InteractionKind::WeakPolar,
        InteractionKind::Aromatic,
        InteractionKind::Carbonyl,
        InteractionKind::Amide,
        InteractionKind::CationPi,
        InteractionKind::DonorPi,
        InteractionKind::HalogenPi,
        InteractionKind::CarbonPi,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            InteractionKind::Covalent => "Covalent",
            InteractionKind::HydrogenBond => "HydrogenBond",
            InteractionKind::WeakHydrogenBond => "WeakHydrogenBond",
            InteractionKind::Ionic => "Ionic",
            InteractionKind::XBond => "XBond",
            InteractionKind::MetalComplex => "MetalComplex",
            InteractionKind::Hydrophobic => "Hydrophobic",
            InteractionKind::VanDerWaals => "VanDerWaals",
            InteractionKind::VanDerWaalsClash => "VanDerWaalsClash",
            InteractionKind::Clash => "Clash",
            InteractionKind::Polar => "Polar",
            InteractionKind::WeakPolar => "WeakPolar",
            InteractionKind::Aromatic => "Aromatic",
            InteractionKind::Carbonyl => "Carbonyl",
            InteractionKind::Amide => "Amide",
            InteractionKind::CationPi => "CationPi",
            InteractionKind::DonorPi => "DonorPi",
            InteractionKind::HalogenPi => "HalogenPi",
            InteractionKind::CarbonPi => "CarbonPi",
        }
    }
}

impl FromStr for InteractionKind {
    type Err = ParseInteractionKindError;

    /// Parses a variant name (case-insensitive) or one of the short aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(kind) = KIND_ALIASES.get(trimmed.to_ascii_lowercase().as_str()) {
            return Ok(*kind);
        }
        InteractionKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseInteractionKindError(s.to_string()))
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
