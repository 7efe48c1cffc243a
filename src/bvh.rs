// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

//! Bounding volume hierarchy over bond segments, to find the bond closest
//! to a picking ray when bonds are drawn as plain lines.

use nalgebra::{Point3, Vector3};

use crate::molecule::Molecule;

/// Leaves hold at most this many segments, unless the split degenerates.
pub const MAX_LEAF_SIZE: usize = 8;
const MAX_DEPTH: usize = 32;

/// Below this squared length a segment is handled as a point.
const DEGENERATE_LENGTH: f64 = 1e-12;

/// A line segment with the identifier reported when it is picked, usually
/// the index of a bond.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
    pub id: usize,
}

impl Segment {
    pub fn new(start: [f64; 3], end: [f64; 3], id: usize) -> Self {
        Segment {
            start: Point3::from(start),
            end: Point3::from(end),
            id,
        }
    }

    fn midpoint(&self) -> Point3<f64> {
        nalgebra::center(&self.start, &self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Aabb {
    min: Point3<f64>,
    max: Point3<f64>,
}

impl Aabb {
    fn empty() -> Self {
        Aabb {
            min: Point3::from([f64::INFINITY; 3]),
            max: Point3::from([f64::NEG_INFINITY; 3]),
        }
    }

    fn grow(&mut self, p: &Point3<f64>) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }

    fn of(segments: &[Segment]) -> Self {
        let mut aabb = Aabb::empty();
        for segment in segments {
            aabb.grow(&segment.start);
            aabb.grow(&segment.end);
        }
        aabb
    }

    fn longest_axis(&self) -> usize {
        let extent = self.max - self.min;
        extent.imax()
    }

    /// Slab test against the box inflated by `margin`. Returns whether the
    /// ray enters it at a non-negative parameter.
    fn hit_by(&self, ray: &Ray, margin: f64) -> bool {
        let mut t_min = 0.0_f64;
        let mut t_max = f64::INFINITY;
        for axis in 0..3 {
            let lo = self.min[axis] - margin;
            let hi = self.max[axis] + margin;
            let origin = ray.origin[axis];
            let direction = ray.direction[axis];
            if direction.abs() < f64::EPSILON {
                if origin < lo || origin > hi {
                    return false;
                }
                continue;
            }
            let inv = 1.0 / direction;
            let (t0, t1) = {
                let a = (lo - origin) * inv;
                let b = (hi - origin) * inv;
                if a <= b { (a, b) } else { (b, a) }
            };
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Copy)]
enum NodeKind {
    Leaf { start: usize, count: usize },
    Branch { left: usize, right: usize },
}

#[derive(Debug, Clone, Copy)]
struct Node {
    bounds: Aabb,
    kind: NodeKind,
}

/// Half line with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3<f64>,
    pub direction: Vector3<f64>,
}

impl Ray {
    /// `direction` is normalized, and must not be zero.
    pub fn new(origin: [f64; 3], direction: [f64; 3]) -> Self {
        Ray {
            origin: Point3::from(origin),
            direction: Vector3::from(direction).normalize(),
        }
    }
}

/// Result of [`SegmentBvh::pick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    /// Identifier of the picked segment
    pub id: usize,
    /// Distance between the ray and the segment
    pub distance: f64,
    /// Ray parameter of the closest point, the distance from the origin
    pub ray_t: f64,
}

#[derive(Debug, Clone)]
pub struct SegmentBvh {
    segments: Vec<Segment>,
    nodes: Vec<Node>,
}

impl SegmentBvh {
    pub fn new(mut segments: Vec<Segment>) -> Self {
        segments.retain(|s| {
            s.start.coords.iter().chain(s.end.coords.iter()).all(|c| c.is_finite())
        });
        let mut nodes = Vec::new();
        if !segments.is_empty() {
            let len = segments.len();
            build(&mut segments, &mut nodes, 0, len, 0);
        }
        SegmentBvh { segments, nodes }
    }

    /// One segment per valid bond of `molecule`, with the bond index as id.
    pub fn from_molecule(molecule: &Molecule) -> Self {
        let natoms = molecule.size();
        let segments = molecule
            .bonds
            .iter()
            .enumerate()
            .filter(|(_, bond)| bond.is_valid(natoms))
            .map(|(id, bond)| {
                Segment::new(
                    molecule.atoms[bond.begin].position(),
                    molecule.atoms[bond.end].position(),
                    id,
                )
            })
            .collect();
        SegmentBvh::new(segments)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The segment closest to `ray` among those within `threshold` of it.
    /// Ties keep the segment found first.
    pub fn pick(&self, ray: &Ray, threshold: f64) -> Option<PickHit> {
        if self.nodes.is_empty() || threshold.is_nan() || threshold < 0.0 {
            return None;
        }

        let mut best: Option<PickHit> = None;
        let mut stack = vec![0];
        while let Some(index) = stack.pop() {
            let node = &self.nodes[index];
            if !node.bounds.hit_by(ray, threshold) {
                continue;
            }
            match node.kind {
                NodeKind::Leaf { start, count } => {
                    for segment in &self.segments[start..start + count] {
                        let (distance, ray_t) = ray_segment_distance(ray, segment);
                        if distance.is_nan() || distance > threshold {
                            continue;
                        }
                        if best.map_or(true, |b| distance < b.distance) {
                            best = Some(PickHit {
                                id: segment.id,
                                distance,
                                ray_t,
                            });
                        }
                    }
                }
                NodeKind::Branch { left, right } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        best
    }
}

/// Build the node covering `segments[start..end]` and return its index.
fn build(
    segments: &mut [Segment],
    nodes: &mut Vec<Node>,
    start: usize,
    end: usize,
    depth: usize,
) -> usize {
    let bounds = Aabb::of(&segments[start..end]);
    let index = nodes.len();
    nodes.push(Node {
        bounds,
        kind: NodeKind::Leaf {
            start,
            count: end - start,
        },
    });

    if end - start <= MAX_LEAF_SIZE || depth >= MAX_DEPTH {
        return index;
    }

    let axis = bounds.longest_axis();
    let split = 0.5 * (bounds.min[axis] + bounds.max[axis]);

    // two pointer partition on the midpoints
    let mut i = start;
    let mut j = end;
    while i < j {
        if segments[i].midpoint()[axis] < split {
            i += 1;
        } else {
            j -= 1;
            segments.swap(i, j);
        }
    }

    if i == start || i == end {
        return index;
    }

    let left = build(segments, nodes, start, i, depth + 1);
    let right = build(segments, nodes, i, end, depth + 1);
    nodes[index].kind = NodeKind::Branch { left, right };
    index
}

/// Distance between the ray and the segment, and the ray parameter of the
/// closest point. The ray parameter is kept non-negative.
fn ray_segment_distance(ray: &Ray, segment: &Segment) -> (f64, f64) {
    let d1 = ray.direction;
    let d2 = segment.end - segment.start;
    let r = ray.origin - segment.start;
    let a = d1.dot(&d1);
    let e = d2.dot(&d2);
    let f = d2.dot(&r);

    let (s, t) = if e <= DEGENERATE_LENGTH {
        ((-d1.dot(&r) / a).max(0.0), 0.0)
    } else {
        let b = d1.dot(&d2);
        let c = d1.dot(&r);
        let denom = a * e - b * b;
        let mut s = if denom > DEGENERATE_LENGTH {
            ((b * f - c * e) / denom).max(0.0)
        } else {
            // parallel
            0.0
        };
        let mut t = (b * s + f) / e;
        if t < 0.0 {
            t = 0.0;
            s = (-c / a).max(0.0);
        } else if t > 1.0 {
            t = 1.0;
            s = ((b - c) / a).max(0.0);
        }
        (s, t)
    };

    let on_ray = ray.origin + d1 * s;
    let on_segment = segment.start + d2 * t;
    ((on_ray - on_segment).norm(), s)
}
