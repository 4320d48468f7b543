//! # Unit Types
//!
//! Type-safe wrappers for the units that cross module boundaries. These
//! provide compile-time safety against unit confusion while remaining
//! lightweight (just f64 wrappers).
//!
//! ## Design Philosophy
//!
//! We use simple newtype wrappers rather than a full units library because:
//! - Furniture estimation uses a small, fixed set of units
//! - We want JSON serialization to be clean (just numbers)
//! - Minimal runtime overhead
//!
//! ## Units
//!
//! - Length: millimeters (mm) - the shop-floor unit for cut lists
//! - Area: square meters (m²) - the unit sheet goods are reasoned about in
//! - Money: Vietnamese đồng (VND) - whole-unit currency, no cents
//!
//! ## Example
//!
//! ```rust
//! use quote_core::units::{Mm, SquareMm, SquareMeters};
//!
//! let length = Mm(1200.0);
//! let width = Mm(600.0);
//! let area: SquareMeters = SquareMm(length.0 * width.0).into();
//! assert_eq!(area.0, 0.72);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mm(pub f64);

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Mm> for Meters {
    fn from(mm: Mm) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

impl From<Meters> for Mm {
    fn from(m: Meters) -> Self {
        Mm(m.0 * 1000.0)
    }
}

/// Area in square millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMm(pub f64);

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMeters(pub f64);

impl From<SquareMm> for SquareMeters {
    fn from(mm2: SquareMm) -> Self {
        SquareMeters(mm2.0 / 1_000_000.0)
    }
}

impl From<SquareMeters> for SquareMm {
    fn from(m2: SquareMeters) -> Self {
        SquareMm(m2.0 * 1_000_000.0)
    }
}

/// Money in Vietnamese đồng
///
/// Intermediate sums stay fractional; only headline figures get rounded,
/// via [`Currency::rounded`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(pub f64);

impl Currency {
    /// Round to the nearest whole currency unit for display
    pub fn rounded(self) -> f64 {
        self.0.round()
    }
}

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Mm);
impl_arithmetic!(Meters);
impl_arithmetic!(SquareMm);
impl_arithmetic!(SquareMeters);
impl_arithmetic!(Currency);
