//! Arithmetic operators and elementary functions over scalar expressions.
//!
//! `+ - * /` work between two expressions over the same base space, and
//! between an expression and an `f64` (which gets promoted to a [`Constant`]
//! over the base space of the expression). Unary `-` yields a [`NegationOp`].
//! Combining two dynamic expressions whose dimensions differ panics: use
//! [`BinOp::try_new`] to get an error instead.

use super::{base_types::*, composite::*, leaves::*, vector_field::DotProduct, ScalarExpr};
use nalgebra::{allocator::Allocator, DefaultAllocator, Dim};

macro_rules! scalar_expr_ops {
    ($([$($gen:tt)*] $ty:ty),* $(,)?) => {
        $(
            scalar_expr_ops!(@binary [$($gen)*] $ty, Add add Plus);
            scalar_expr_ops!(@binary [$($gen)*] $ty, Sub sub Minus);
            scalar_expr_ops!(@binary [$($gen)*] $ty, Mul mul Multiplies);
            scalar_expr_ops!(@binary [$($gen)*] $ty, Div div Divides);

            impl<$($gen)*> std::ops::Neg for $ty
            where
                D: Dim,
                DefaultAllocator: Allocator<D>,
                $ty: ScalarExpr<Dim = D>,
            {
                type Output = NegationOp<D, $ty>;
                #[inline]
                fn neg(self) -> Self::Output {
                    NegationOp::new(self)
                }
            }
        )*
    };
    (@binary [$($gen:tt)*] $ty:ty, $trait:ident $method:ident $op:ident) => {
        impl<$($gen)*, Rhs> std::ops::$trait<Rhs> for $ty
        where
            D: Dim,
            DefaultAllocator: Allocator<D>,
            $ty: ScalarExpr<Dim = D>,
            Rhs: ScalarExpr<Dim = D>,
        {
            type Output = BinOp<D, $ty, Rhs, $op>;
            #[inline]
            fn $method(self, rhs: Rhs) -> Self::Output {
                BinOp::new(self, rhs, $op)
            }
        }

        impl<$($gen)*> std::ops::$trait<f64> for $ty
        where
            D: Dim,
            DefaultAllocator: Allocator<D>,
            $ty: ScalarExpr<Dim = D>,
        {
            type Output = BinOp<D, $ty, Constant<D>, $op>;
            #[inline]
            fn $method(self, rhs: f64) -> Self::Output {
                let rhs = Constant::new(rhs, self.base_space().dim());
                BinOp::new(self, rhs, $op)
            }
        }

        impl<$($gen)*> std::ops::$trait<$ty> for f64
        where
            D: Dim,
            DefaultAllocator: Allocator<D>,
            $ty: ScalarExpr<Dim = D>,
        {
            type Output = BinOp<D, Constant<D>, $ty, $op>;
            #[inline]
            fn $method(self, rhs: $ty) -> Self::Output {
                let lhs = Constant::new(self, rhs.base_space().dim());
                BinOp::new(lhs, rhs, $op)
            }
        }
    };
}

scalar_expr_ops! {
    [D] Constant<D>,
    ['a, D] DiscretizedField<'a, D>,
    [D, F] ScalarField<D, F>,
    [D, L, R, F] BinOp<D, L, R, F>,
    [D, E, F] UnOp<D, E, F>,
    [D, E] NegationOp<D, E>,
    [D, E] DotProduct<D, E>,
}

macro_rules! scalar_expr_functions {
    ($($fn_name:ident $op:ident $doc:literal),*) => {
        $(
            #[doc=$doc]
            pub fn $fn_name<E: ScalarExpr>(e: E) -> UnOp<E::Dim, E, $op>
            where
                DefaultAllocator: Allocator<E::Dim>,
            {
                UnOp::new(e, $op)
            }
        )*
    };
}

scalar_expr_functions! {
    sin Sin "Pointwise sine of an expression",
    cos Cos "Pointwise cosine of an expression",
    tan Tan "Pointwise tangent of an expression",
    exp Exp "Pointwise exponential of an expression",
    log Log "Pointwise natural logarithm of an expression"
}
