//! Eight-way facing for belts, scanners and the active tool.

use serde::{Deserialize, Serialize};

/// Facing in 45 degree steps. `Deg0` faces `+x` and angles increase
/// counter-clockwise, so `Deg90` faces `+y`.
///
/// Serialized as the plain integer angle (`0`, `45`, ..., `315`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u16", into = "u16")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg45,
    Deg90,
    Deg135,
    Deg180,
    Deg225,
    Deg270,
    Deg315,
}

/// Returned when an angle is not one of the eight supported values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unsupported rotation {0}, expected a multiple of 45 in 0..=315")]
pub struct InvalidRotation(pub u16);

impl Rotation {
    /// All eight rotations in increasing angle order.
    pub fn all() -> [Rotation; 8] {
        [
            Rotation::Deg0,
            Rotation::Deg45,
            Rotation::Deg90,
            Rotation::Deg135,
            Rotation::Deg180,
            Rotation::Deg225,
            Rotation::Deg270,
            Rotation::Deg315,
        ]
    }

    /// Index into [`Rotation::all`] (angle / 45).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn degrees(self) -> u16 {
        self as u16 * 45
    }

    pub fn from_degrees(degrees: u16) -> Option<Self> {
        if degrees % 45 != 0 || degrees >= 360 {
            return None;
        }
        Some(Self::all()[(degrees / 45) as usize])
    }

    fn turned(self, steps: usize) -> Self {
        Self::all()[(self.index() + steps) % 8]
    }

    /// Rotate by 45 degrees (one right-click on a placed cell).
    pub fn rotate_45(self) -> Self {
        self.turned(1)
    }

    /// Rotate by 90 degrees (the tool rotate button).
    pub fn rotate_90(self) -> Self {
        self.turned(2)
    }
}

impl TryFrom<u16> for Rotation {
    type Error = InvalidRotation;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        Self::from_degrees(degrees).ok_or(InvalidRotation(degrees))
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}
