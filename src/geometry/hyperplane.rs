use crate::{error::GeometryError, expr::ScalarField};
use nalgebra::{Const, SMatrix, SVector};
use tracing::debug;

/// A direction is considered dependent on the previous ones when what remains
/// of it after orthogonalization is smaller than this fraction of its norm
pub const DEGENERACY_TOLERANCE: f64 = 1e-10;

/// A `K`-dimensional affine subspace of `R^M`, stored as an offset point and
/// an orthonormal basis of its linear part (the columns of `basis`).
///
/// Two sets of generating points spanning the same subspace from the same
/// offset give the same basis up to the orientation of its vectors, and every
/// query only depends on the subspace itself.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HyperPlane<const K: usize, const M: usize> {
    offset: SVector<f64, M>,
    basis: SMatrix<f64, M, K>,
}

impl<const K: usize, const M: usize> HyperPlane<K, M> {
    /// The subspace going through `offset` and every point in `points`.
    /// Fails if these `K + 1` points are affinely dependent
    pub fn new(offset: SVector<f64, M>, points: [SVector<f64, M>; K]) -> Result<Self, GeometryError> {
        let directions = array_init::array_init(|i| points[i] - offset);
        Self::from_directions(offset, directions)
    }

    /// The subspace going through `offset` and spanned by `directions`. Fails
    /// if these are linearly dependent
    pub fn from_directions(
        offset: SVector<f64, M>,
        directions: [SVector<f64, M>; K],
    ) -> Result<Self, GeometryError> {
        let basis = orthonormalize(&directions)?;
        Ok(Self { offset, basis })
    }

    pub fn offset(&self) -> &SVector<f64, M> {
        &self.offset
    }

    /// Orthonormal basis, one vector per column
    pub fn basis(&self) -> &SMatrix<f64, M, K> {
        &self.basis
    }

    /// Maps intrinsic coordinates to the corresponding point of `R^M`
    pub fn evaluate(&self, local: &SVector<f64, K>) -> SVector<f64, M> {
        self.offset + self.basis * local
    }

    /// Intrinsic coordinates of the orthogonal projection of `p`
    pub fn project_onto(&self, p: &SVector<f64, M>) -> SVector<f64, K> {
        self.basis.tr_mul(&(p - self.offset))
    }

    /// Orthogonal projection of `p` on the subspace
    pub fn project(&self, p: &SVector<f64, M>) -> SVector<f64, M> {
        self.evaluate(&self.project_onto(p))
    }

    /// Euclidean distance between `p` and the subspace
    pub fn distance(&self, p: &SVector<f64, M>) -> f64 {
        (p - self.project(p)).norm()
    }

    /// Unit vector orthogonal to the subspace. Only defined when the subspace
    /// has codimension one, and unique then up to its sign
    pub fn normal(&self) -> Result<SVector<f64, M>, GeometryError> {
        if K + 1 != M {
            return Err(GeometryError::NotAHyperplane {
                intrinsic: K,
                ambient: M,
            });
        }
        // At least one canonical axis sticks out of the subspace: take the
        // one with the largest orthogonal component
        let (_, residual) = (0..M)
            .map(|i| {
                let mut axis = SVector::<f64, M>::zeros();
                axis[i] = 1.0;
                let r = axis - self.basis * self.basis.tr_mul(&axis);
                (r.norm(), r)
            })
            .fold((0.0, SVector::zeros()), |best, cur| if cur.0 > best.0 { cur } else { best });
        Ok(residual.normalize())
    }

    /// The distance to the subspace, as a scalar field that can be combined
    /// with other expressions
    pub fn distance_field(&self) -> ScalarField<Const<M>, impl Fn(&SVector<f64, M>) -> f64 + Clone> {
        let plane = *self;
        ScalarField::new(move |p: &SVector<f64, M>| plane.distance(p))
    }
}

/// Modified Gram-Schmidt: each direction has its components along the
/// previous basis vectors removed one at a time, then is normalized
fn orthonormalize<const K: usize, const M: usize>(
    directions: &[SVector<f64, M>; K],
) -> Result<SMatrix<f64, M, K>, GeometryError> {
    let mut basis = SMatrix::<f64, M, K>::zeros();
    for (j, d) in directions.iter().enumerate() {
        let mut v = *d;
        for i in 0..j {
            let e = basis.column(i);
            let c = e.dot(&v);
            v.axpy(-c, &e, 1.0);
        }
        let norm = v.norm();
        if norm <= DEGENERACY_TOLERANCE * d.norm() || norm == 0.0 {
            debug!(direction = j, norm, "degenerate subspace");
            return Err(GeometryError::DegenerateSubspace { direction: j });
        }
        basis.set_column(j, &(v / norm));
    }
    Ok(basis)
}
