/*!
# Composable scalar fields over Euclidean spaces

Build functions `R^N -> R` by combining simpler ones with the usual
arithmetic operators and elementary functions, then evaluate them many times
(typically once per quadrature node of a mesh) at the cost of a hand-written
function. The main trait is [`ScalarExpr`], which every node of such an
expression implements.

An expression is a tree whose type encodes its whole structure: `x * y + 1.0`
is a [`BinOp`] holding another [`BinOp`] and a [`Constant`]. Nodes own their
children and nothing is boxed, so the compiler sees (and inlines) the whole
tree, and evaluating it never allocates. The leaves are:

- [`Constant`]: the same value everywhere.
- [`ScalarField`]: any closure taking a point.
- [`DiscretizedField`]: values computed beforehand, one per sample, read
  from the first column of a borrowed table. Which sample is current is set
  by calling [`ScalarExpr::forward`] on the root of the expression: it
  reaches every such leaf in the tree.

The dimension `N` of the base space is a type parameter implementing
[`nalgebra::Dim`]: either `nalgebra::Const<N>`, and then combining
expressions over spaces of different dimensions doesn't compile, or
`nalgebra::Dyn`, and then it is checked at runtime. Points are
`nalgebra::OVector<f64, D>`, so `SVector<f64, N>` or `DVector<f64>`.

```
use fdafields::{sin, ScalarExpr, ScalarField};
use nalgebra::{Vector2, U2};

let x = ScalarField::with_dim(U2, |p: &Vector2<f64>| p.x);
let y = ScalarField::with_dim(U2, |p: &Vector2<f64>| p.y);
let f = sin(x) * y + 1.0;
assert_eq!(f.evaluate(&Vector2::new(0.0, 3.0)), 1.0);
```

Derivatives are approximated with centered finite differences, using a step
each expression carries (see [`ScalarExpr::gradient`] and
[`ScalarExpr::hessian`]). The [`optimization`] module (behind the default
`optimization` feature) uses them to minimize expressions.

Independently of expressions, [`HyperPlane`] represents an affine subspace of
`R^M` and computes projections and distances to it.
*/

pub mod base_space;
pub mod error;
pub mod expr;
pub mod geometry;

#[cfg(feature = "optimization")]
pub mod optimization;

mod proptests;

pub use base_space::{BaseSpace, DEFAULT_STEP};
pub use error::{FieldError, GeometryError, OptimizationError};
pub use expr::{
    cos, exp, log, sin, tan, BinOp, Constant, DiscretizedField, DotProduct, Gradient, Hessian,
    NegationOp, Resize, ScalarExpr, ScalarField, UnOp, VectorField,
};
pub use geometry::HyperPlane;

#[cfg(test)]
pub(crate) mod test_macros {
    macro_rules! simple_eqs {
        {$($test_name:ident : $a:expr => $b:expr),+} => {
          mod simple_eqs {
            use super::*;
            $(
                #[test]
                fn $test_name() {
                    assert_eq!($a, $b);
                }
            )+
          }
        }
    }
    pub(crate) use simple_eqs;
}
