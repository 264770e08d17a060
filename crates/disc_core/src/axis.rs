//! Axis enumeration and a fixed-shape per-axis container.
//!
//! `Axis` derives `Ord` so it can key ordered maps; that order (D, I, S, C) is a
//! storage order only. Tie-breaking uses `determinism::AxisPriority`.

use core::fmt;
use core::ops::{Index, IndexMut};
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// One of the four trait dimensions scored by the instrument.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Axis {
    #[serde(rename = "D")]
    D,
    #[serde(rename = "I")]
    I,
    #[serde(rename = "S")]
    S,
    #[serde(rename = "C")]
    C,
}

impl Axis {
    /// Enumeration order. Not a tie-break order.
    pub const ALL: [Axis; 4] = [Axis::D, Axis::I, Axis::S, Axis::C];

    pub fn letter(self) -> char {
        match self {
            Axis::D => 'D',
            Axis::I => 'I',
            Axis::S => 'S',
            Axis::C => 'C',
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::D => 0,
            Axis::I => 1,
            Axis::S => 2,
            Axis::C => 3,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Axis {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "D" => Ok(Axis::D),
            "I" => Ok(Axis::I),
            "S" => Ok(Axis::S),
            "C" => Ok(Axis::C),
            _ => Err(CoreError::InvalidAxis),
        }
    }
}

/// Exactly one value per axis. Serializes as `{"D":..,"I":..,"S":..,"C":..}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxisMap<T> {
    #[serde(rename = "D")]
    pub d: T,
    #[serde(rename = "I")]
    pub i: T,
    #[serde(rename = "S")]
    pub s: T,
    #[serde(rename = "C")]
    pub c: T,
}

impl<T> AxisMap<T> {
    /// Build a map by evaluating `f` once per axis, in enumeration order.
    pub fn from_fn<F: FnMut(Axis) -> T>(mut f: F) -> Self {
        AxisMap { d: f(Axis::D), i: f(Axis::I), s: f(Axis::S), c: f(Axis::C) }
    }

    pub fn get(&self, axis: Axis) -> &T {
        match axis {
            Axis::D => &self.d,
            Axis::I => &self.i,
            Axis::S => &self.s,
            Axis::C => &self.c,
        }
    }

    pub fn get_mut(&mut self, axis: Axis) -> &mut T {
        match axis {
            Axis::D => &mut self.d,
            Axis::I => &mut self.i,
            Axis::S => &mut self.s,
            Axis::C => &mut self.c,
        }
    }

    /// `(axis, &value)` pairs in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (Axis, &T)> + '_ {
        Axis::ALL.into_iter().map(move |a| (a, self.get(a)))
    }

    pub fn map<U, F: FnMut(Axis, &T) -> U>(&self, mut f: F) -> AxisMap<U> {
        AxisMap::from_fn(|a| f(a, self.get(a)))
    }

    /// Fallible per-axis transform; stops at the first error (in enumeration order).
    pub fn try_map<U, E, F: FnMut(Axis, &T) -> Result<U, E>>(&self, mut f: F) -> Result<AxisMap<U>, E> {
        Ok(AxisMap {
            d: f(Axis::D, &self.d)?,
            i: f(Axis::I, &self.i)?,
            s: f(Axis::S, &self.s)?,
            c: f(Axis::C, &self.c)?,
        })
    }
}

impl<T: Clone> AxisMap<T> {
    pub fn splat(v: T) -> Self {
        AxisMap { d: v.clone(), i: v.clone(), s: v.clone(), c: v }
    }
}

impl<T> Index<Axis> for AxisMap<T> {
    type Output = T;
    fn index(&self, axis: Axis) -> &T {
        self.get(axis)
    }
}

impl<T> IndexMut<Axis> for AxisMap<T> {
    fn index_mut(&mut self, axis: Axis) -> &mut T {
        self.get_mut(axis)
    }
}
