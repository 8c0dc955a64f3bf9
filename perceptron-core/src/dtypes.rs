//! Module for data type related traits. Contains [Unit] and [Dtype].
//!
//! Layers and losses in this crate are generic over the element type, which must be
//! a [Dtype]. Only `f32` and `f64` are supported.

use rand_distr::uniform::SampleUniform;

/// Represents a unit type, but no arithmetic.
pub trait Unit:
    'static + Copy + Clone + Default + std::fmt::Debug + std::fmt::Display + PartialEq + PartialOrd
{
    const ZERO: Self;
    const ONE: Self;
}

macro_rules! unit {
    ($type:ty, $zero:expr, $one:expr) => {
        impl Unit for $type {
            const ZERO: Self = $zero;
            const ONE: Self = $one;
        }
    };
}

unit!(f32, 0.0, 1.0);
unit!(f64, 0.0, 1.0);

/// Represents a data type or element of an array that can have
/// arithmatic operations applied to it, and that can be sampled
/// from a uniform distribution.
pub trait Dtype:
    Unit
    + std::ops::Add<Self, Output = Self>
    + std::ops::Sub<Self, Output = Self>
    + std::ops::Mul<Self, Output = Self>
    + std::ops::Div<Self, Output = Self>
    + std::ops::AddAssign
    + std::ops::SubAssign
    + std::ops::MulAssign
    + std::ops::DivAssign
    + std::iter::Sum
    + num_traits::Float
    + num_traits::FromPrimitive
    + num_traits::ToPrimitive
    + SampleUniform
{
}
impl Dtype for f32 {}
impl Dtype for f64 {}

/// Represents something that has a [Dtype].
pub trait HasDtype {
    type Dtype: Dtype;
}
