//! # Corners
//!
//! Tire corners and a fixed-size per-corner container. Everything that is
//! measured or calculated "per tire" goes through [`PerCorner`], which keeps
//! the FL, FR, RL, RR order that reports and exports rely on.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A tire position on the car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    /// Front left
    FL,
    /// Front right
    FR,
    /// Rear left
    RL,
    /// Rear right
    RR,
}

impl Corner {
    /// All corners in report order
    pub const ALL: [Corner; 4] = [Corner::FL, Corner::FR, Corner::RL, Corner::RR];

    /// Column suffix used in reports (`cold_FL`, `new_cold_RR`, ...)
    pub fn suffix(&self) -> &'static str {
        match self {
            Corner::FL => "FL",
            Corner::FR => "FR",
            Corner::RL => "RL",
            Corner::RR => "RR",
        }
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// One value per corner.
///
/// Serializes as `{"FL": .., "FR": .., "RL": .., "RR": ..}`; missing keys
/// deserialize to `T::default()`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PerCorner<T> {
    #[serde(rename = "FL", default)]
    pub fl: T,
    #[serde(rename = "FR", default)]
    pub fr: T,
    #[serde(rename = "RL", default)]
    pub rl: T,
    #[serde(rename = "RR", default)]
    pub rr: T,
}

impl<T> PerCorner<T> {
    pub fn new(fl: T, fr: T, rl: T, rr: T) -> Self {
        PerCorner { fl, fr, rl, rr }
    }

    /// Build by evaluating `f` for each corner in report order.
    pub fn from_fn(mut f: impl FnMut(Corner) -> T) -> Self {
        PerCorner {
            fl: f(Corner::FL),
            fr: f(Corner::FR),
            rl: f(Corner::RL),
            rr: f(Corner::RR),
        }
    }

    pub fn get(&self, corner: Corner) -> &T {
        match corner {
            Corner::FL => &self.fl,
            Corner::FR => &self.fr,
            Corner::RL => &self.rl,
            Corner::RR => &self.rr,
        }
    }

    pub fn get_mut(&mut self, corner: Corner) -> &mut T {
        match corner {
            Corner::FL => &mut self.fl,
            Corner::FR => &mut self.fr,
            Corner::RL => &mut self.rl,
            Corner::RR => &mut self.rr,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> PerCorner<U> {
        PerCorner::from_fn(|corner| f(self.get(corner)))
    }

    /// Iterate `(corner, value)` pairs in report order.
    pub fn iter(&self) -> impl Iterator<Item = (Corner, &T)> + '_ {
        Corner::ALL.into_iter().map(move |corner| (corner, self.get(corner)))
    }
}

impl<T: Clone> PerCorner<T> {
    /// Same value on all four corners.
    pub fn splat(value: T) -> Self {
        PerCorner::from_fn(|_| value.clone())
    }
}
