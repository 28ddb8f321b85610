//! Scalar field expressions: leaves, composite nodes, and the operators that
//! build them

mod base_types;
mod composite;
mod derivatives;
mod leaves;
mod node;
mod ops;
mod vector_field;

pub use base_types::{
    BinaryOperation, Cos, Divides, Exp, Func, Log, Minus, Multiplies, Plus, Sin, Tan,
    UnaryOperation,
};
pub use composite::{BinOp, NegationOp, UnOp};
pub use derivatives::{Gradient, Hessian};
pub use leaves::{Constant, DiscretizedField, ScalarField};
pub use node::{Resize, ScalarExpr};
pub use ops::{cos, exp, log, sin, tan};
pub use vector_field::{DotProduct, VectorField};
