use std::fmt::Debug;

/// A function combining the values of the two operands of a
/// [`BinOp`][super::BinOp]
pub trait BinaryOperation {
    fn apply(&self, lhs: f64, rhs: f64) -> f64;
}

/// A function applied to the value of the operand of an
/// [`UnOp`][super::UnOp]
pub trait UnaryOperation {
    fn apply(&self, x: f64) -> f64;
}

macro_rules! binary_operations {
    ($($doc:literal $name:ident ($lhs:ident, $rhs:ident) => $body:expr),*) => {
        $(
            #[doc=$doc]
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
            pub struct $name;

            impl BinaryOperation for $name {
                #[inline]
                fn apply(&self, $lhs: f64, $rhs: f64) -> f64 {
                    $body
                }
            }
        )*
    };
}

binary_operations! {
    "Addition" Plus (a, b) => a + b,
    "Subtraction" Minus (a, b) => a - b,
    "Multiplication" Multiplies (a, b) => a * b,
    "Division. Dividing by zero follows IEEE-754 (yields infinities or NaN)"
        Divides (a, b) => a / b
}

macro_rules! unary_operations {
    ($($doc:literal $name:ident $fn:ident),*) => {
        $(
            #[doc=$doc]
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
            pub struct $name;

            impl UnaryOperation for $name {
                #[inline]
                fn apply(&self, x: f64) -> f64 {
                    x.$fn()
                }
            }
        )*
    };
}

unary_operations! {
    "Sine" Sin sin,
    "Cosine" Cos cos,
    "Tangent" Tan tan,
    "Exponential" Exp exp,
    "Natural logarithm" Log ln
}

/// Wraps a user-supplied closure so it can be used as a
/// [`BinaryOperation`] (if it takes two `f64`) or an [`UnaryOperation`] (if
/// it takes one)
#[derive(Clone, Copy)]
pub struct Func<F>(pub F);

impl<F> Debug for Func<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("<Func>")
    }
}

impl<F: Fn(f64, f64) -> f64> BinaryOperation for Func<F> {
    #[inline]
    fn apply(&self, lhs: f64, rhs: f64) -> f64 {
        (self.0)(lhs, rhs)
    }
}

impl<F: Fn(f64) -> f64> UnaryOperation for Func<F> {
    #[inline]
    fn apply(&self, x: f64) -> f64 {
        (self.0)(x)
    }
}
