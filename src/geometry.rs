// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

//! Plane normal of a structure, used to draw the lines of double and
//! triple bonds side by side within the plane of the molecule.

use nalgebra::{Matrix3, Point3, SymmetricEigen, Vector3};

/// Triangles whose doubled area squared is below this are degenerate.
const DEGENERATE_CROSS: f64 = 1e-6;

/// Returned when no plane can be fitted.
pub fn up() -> Vector3<f64> {
    Vector3::z()
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum NormalStrategy {
    /// Normal of the first non-degenerate triangle, in atom order.
    #[default]
    Triangle,
    /// Direction of least variance of the whole point cloud.
    Pca,
}

/// Unit normal of the best plane through `positions`, or [`up`] with
/// fewer than three usable points or when they are all aligned.
/// Non-finite positions are skipped.
pub fn plane_normal(positions: &[[f64; 3]], strategy: NormalStrategy) -> Vector3<f64> {
    let points: Vec<Point3<f64>> = positions
        .iter()
        .filter(|p| p.iter().all(|c| c.is_finite()))
        .map(|&p| Point3::from(p))
        .collect();

    let normal = match strategy {
        NormalStrategy::Triangle => triangle_normal(&points),
        NormalStrategy::Pca => pca_normal(&points),
    };
    normal.unwrap_or_else(up)
}

/// First triple `i < j < k` spanning a real triangle.
pub fn triangle_normal(points: &[Point3<f64>]) -> Option<Vector3<f64>> {
    let n = points.len();
    for i in 0..n {
        for j in i + 1..n {
            let u = points[j] - points[i];
            for k in j + 1..n {
                let normal = u.cross(&(points[k] - points[i]));
                if normal.norm_squared() > DEGENERATE_CROSS {
                    return Some(normal.normalize());
                }
            }
        }
    }
    None
}

/// Eigenvector of the smallest eigenvalue of the covariance matrix, with
/// its largest component made positive so that the result does not depend
/// on the solver.
pub fn pca_normal(points: &[Point3<f64>]) -> Option<Vector3<f64>> {
    if points.len() < 3 {
        return None;
    }

    let count = points.len() as f64;
    let centroid = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords)
        / count;
    let covariance = points.iter().fold(Matrix3::zeros(), |acc, p| {
        let d = p.coords - centroid;
        acc + d * d.transpose()
    }) / count;

    let eigen = SymmetricEigen::new(covariance);
    let mut order = [0, 1, 2];
    order.sort_by(|&a, &b| eigen.eigenvalues[a].total_cmp(&eigen.eigenvalues[b]));
    let largest = eigen.eigenvalues[order[2]];
    let middle = eigen.eigenvalues[order[1]];
    // aligned or coincident points span no plane
    if largest <= f64::EPSILON || middle <= largest * 1e-10 {
        return None;
    }

    let normal: Vector3<f64> = eigen.eigenvectors.column(order[0]).into_owned();
    let dominant = normal.iter().copied().fold(0.0_f64, |acc, c| {
        if c.abs() > acc.abs() {
            c
        } else {
            acc
        }
    });
    let normal = if dominant < 0.0 { -normal } else { normal };
    Some(normal.normalize())
}

/// Unit vector perpendicular to the bond `a`-`b` and lying in the plane of
/// `normal`, along which the extra lines of a multiple bond are shifted.
pub fn offset_direction(a: [f64; 3], b: [f64; 3], normal: &Vector3<f64>) -> Vector3<f64> {
    let axis = Point3::from(b) - Point3::from(a);
    if axis.norm_squared() <= f64::EPSILON {
        return perpendicular(normal);
    }
    let offset = normal.cross(&axis);
    if offset.norm_squared() > DEGENERATE_CROSS * axis.norm_squared() {
        offset.normalize()
    } else {
        // bond along the normal
        perpendicular(&axis)
    }
}

/// Some unit vector perpendicular to `v`.
fn perpendicular(v: &Vector3<f64>) -> Vector3<f64> {
    let helper = if v.x.abs() < 0.9 * v.norm() {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let p = v.cross(&helper);
    if p.norm_squared() > 0.0 {
        p.normalize()
    } else {
        Vector3::x()
    }
}
