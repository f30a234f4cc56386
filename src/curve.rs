use num_bigint::BigUint;
use num_traits::Zero;

use crate::{
    arith::{mod_inverse, sub_mod},
    errors::EdsError,
    types::{Curve, Point},
};

impl Curve {
    /// Whether `point` satisfies the curve equation with coordinates in `[0, p)`.
    /// The point at infinity is a member of every curve.
    #[must_use]
    pub fn contains(&self, point: &Point) -> bool {
        match point {
            Point::Infinity => true,
            Point::Affine { x, y } => {
                if x >= &self.p || y >= &self.p {
                    return false;
                }
                let lhs = (y * y) % &self.p;
                let rhs = (x * x * x + &self.a * x + &self.b) % &self.p;
                lhs == rhs
            }
        }
    }
}

/// Group law: `p1 + p2`.
///
/// # Errors
///
/// Returns `EdsError::ArithmeticPrecondition` if a slope denominator is not
/// invertible modulo `p`, which cannot happen for a prime `p`.
pub fn add(curve: &Curve, p1: &Point, p2: &Point) -> Result<Point, EdsError> {
    let (x1, y1, x2, y2) = match (p1, p2) {
        (Point::Infinity, _) => return Ok(p2.clone()),
        (_, Point::Infinity) => return Ok(p1.clone()),
        (Point::Affine { x: x1, y: y1 }, Point::Affine { x: x2, y: y2 }) => (x1, y1, x2, y2),
    };
    let p = &curve.p;

    // Inverse operands, including the vertical tangent at y = 0.
    if x1 == x2 && ((y1 + y2) % p).is_zero() {
        return Ok(Point::Infinity);
    }

    let (numerator, denominator) = if x1 == x2 {
        ((BigUint::from(3u32) * x1 * x1 + &curve.a) % p, (y1 << 1usize) % p)
    } else {
        (sub_mod(y2, y1, p), sub_mod(x2, x1, p))
    };
    let lambda = (numerator * mod_inverse(&denominator, p)?) % p;

    let x3 = (&lambda * &lambda + (p << 1usize) - x1 - x2) % p;
    let y3 = (lambda * sub_mod(x1, &x3, p) + p - y1) % p;
    Ok(Point::Affine { x: x3, y: y3 })
}

/// Point doubling, `2 * point`.
///
/// # Errors
///
/// See [`add`].
#[inline]
pub fn double(curve: &Curve, point: &Point) -> Result<Point, EdsError> {
    add(curve, point, point)
}

/// Scalar multiplication `k * point`.
///
/// Montgomery ladder over the bits of `k`: every bit costs exactly one
/// addition and one doubling, so the work depends only on the bit length.
/// `k = 0` yields the point at infinity.
///
/// # Errors
///
/// See [`add`].
pub fn scalar_multiply(curve: &Curve, point: &Point, k: &BigUint) -> Result<Point, EdsError> {
    // Invariant: r1 = r0 + point
    let mut r0 = Point::Infinity;
    let mut r1 = point.clone();
    for i in (0..k.bits()).rev() {
        if k.bit(i) {
            r0 = add(curve, &r0, &r1)?;
            r1 = double(curve, &r1)?;
        } else {
            r1 = add(curve, &r0, &r1)?;
            r0 = double(curve, &r0)?;
        }
    }
    Ok(r0)
}

#[cfg(test)]
mod tests {
    use super::*;

    // y^2 = x^3 + 2x + 2 over F_17, generator (5, 1) of order 19.
    fn toy_curve() -> Curve {
        Curve {
            a: BigUint::from(2u32),
            b: BigUint::from(2u32),
            p: BigUint::from(17u32),
            q: BigUint::from(19u32),
        }
    }

    fn pt(x: u32, y: u32) -> Point {
        Point::affine(BigUint::from(x), BigUint::from(y))
    }

    #[test]
    fn toy_curve_doubling_and_addition() {
        let c = toy_curve();
        let g = pt(5, 1);
        assert!(c.contains(&g));
        assert_eq!(double(&c, &g).unwrap(), pt(6, 3));
        assert_eq!(add(&c, &g, &pt(6, 3)).unwrap(), pt(10, 6));
    }

    #[test]
    fn inverse_points_sum_to_infinity() {
        let c = toy_curve();
        assert_eq!(add(&c, &pt(5, 1), &pt(5, 16)).unwrap(), Point::Infinity);
    }

    #[test]
    fn generator_order_is_q() {
        let c = toy_curve();
        let g = pt(5, 1);
        assert_eq!(scalar_multiply(&c, &g, &c.q).unwrap(), Point::Infinity);
        let mut acc = Point::Infinity;
        for k in 1u32..19 {
            acc = add(&c, &acc, &g).unwrap();
            assert!(!acc.is_infinity());
            assert_eq!(scalar_multiply(&c, &g, &BigUint::from(k)).unwrap(), acc, "k = {k}");
        }
    }

    #[test]
    fn zero_scalar_is_identity() {
        let c = toy_curve();
        assert_eq!(scalar_multiply(&c, &pt(5, 1), &BigUint::zero()).unwrap(), Point::Infinity);
    }

    #[test]
    fn contains_rejects_off_curve_and_unreduced() {
        let c = toy_curve();
        assert!(!c.contains(&pt(5, 2)));
        assert!(!c.contains(&pt(22, 1)));
        assert!(c.contains(&Point::Infinity));
    }
}
