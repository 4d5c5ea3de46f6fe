/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Overlap-removing layout sweep.
//!
//! Each pass sorts the working set along the arrange axis and pushes every
//! node just past the nodes that precede it and share its perpendicular
//! span. Passes repeat until nothing moves or the iteration cap is hit.

use euclid::default::Rect;
use log::debug;

use super::NodeStore;
use super::node::NodeId;

pub const DEFAULT_ARRANGE_GAP: f64 = 20.0;
const MAX_ARRANGE_ITERATIONS: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrangeDirection {
    Left,
    Right,
    Top,
    Bottom,
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

impl ArrangeDirection {
    fn axis(self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis::Horizontal,
            Self::Top | Self::Bottom => Axis::Vertical,
        }
    }

    /// Left and Top pack towards zero, Right and Bottom towards the far edge.
    fn packs_towards_origin(self) -> bool {
        matches!(self, Self::Left | Self::Top)
    }
}

struct Working {
    id: NodeId,
    rect: Rect<f64>,
}

impl Axis {
    fn start(self, rect: &Rect<f64>) -> f64 {
        match self {
            Axis::Horizontal => rect.origin.x,
            Axis::Vertical => rect.origin.y,
        }
    }

    fn end(self, rect: &Rect<f64>) -> f64 {
        match self {
            Axis::Horizontal => rect.max_x(),
            Axis::Vertical => rect.max_y(),
        }
    }

    fn extent(self, rect: &Rect<f64>) -> f64 {
        match self {
            Axis::Horizontal => rect.size.width,
            Axis::Vertical => rect.size.height,
        }
    }

    fn set_start(self, rect: &mut Rect<f64>, value: f64) {
        match self {
            Axis::Horizontal => rect.origin.x = value,
            Axis::Vertical => rect.origin.y = value,
        }
    }

    /// Strict overlap on the axis perpendicular to this one.
    fn shares_cross_span(self, a: &Rect<f64>, b: &Rect<f64>) -> bool {
        match self {
            Axis::Horizontal => !(a.max_y() <= b.min_y() || a.min_y() >= b.max_y()),
            Axis::Vertical => !(a.max_x() <= b.min_x() || a.min_x() >= b.max_x()),
        }
    }
}

/// Rearrange `subset` (or every node when `None`) so that no two of them
/// overlap along `direction`. Ids that are not in the store are skipped.
/// Returns whether any node moved.
pub fn arrange(
    store: &mut NodeStore,
    direction: ArrangeDirection,
    gap: f64,
    subset: Option<&[NodeId]>,
) -> bool {
    let mut working: Vec<Working> = match subset {
        Some(ids) => ids
            .iter()
            .filter_map(|id| store.get(id))
            .map(|node| Working {
                id: node.id.clone(),
                rect: node.content_rect(),
            })
            .collect(),
        None => store
            .iter()
            .map(|node| Working {
                id: node.id.clone(),
                rect: node.content_rect(),
            })
            .collect(),
    };
    if working.is_empty() {
        return false;
    }

    let axis = direction.axis();
    let mut moved = false;
    for iteration in 0..MAX_ARRANGE_ITERATIONS {
        let stable = if direction.packs_towards_origin() {
            sweep_towards_origin(&mut working, axis, gap)
        } else {
            sweep_towards_far_edge(&mut working, axis, gap)
        };
        if stable {
            debug!("arrange {direction:?} settled after {} passes", iteration + 1);
            break;
        }
        moved = true;
    }

    for item in &working {
        if let Some(node) = store.get_mut(&item.id) {
            node.position = item.rect.origin;
        }
    }
    moved
}

fn sweep_towards_origin(working: &mut [Working], axis: Axis, gap: f64) -> bool {
    working.sort_by(|a, b| axis.start(&a.rect).total_cmp(&axis.start(&b.rect)));
    let mut stable = true;
    for i in 0..working.len() {
        let current = working[i].rect;
        let mut next = 0.0_f64;
        for (j, other) in working.iter().enumerate() {
            if j == i || !axis.shares_cross_span(&current, &other.rect) {
                continue;
            }
            let before = axis.start(&other.rect) < axis.start(&current)
                || (axis.start(&other.rect) == axis.start(&current) && j < i);
            if before {
                next = next.max(axis.end(&other.rect) + gap);
            }
        }
        if axis.start(&current) != next {
            axis.set_start(&mut working[i].rect, next);
            stable = false;
        }
    }
    stable
}

fn sweep_towards_far_edge(working: &mut [Working], axis: Axis, gap: f64) -> bool {
    let far_edge = working
        .iter()
        .map(|w| axis.end(&w.rect))
        .fold(f64::NEG_INFINITY, f64::max);
    working.sort_by(|a, b| axis.end(&b.rect).total_cmp(&axis.end(&a.rect)));
    let mut stable = true;
    for i in 0..working.len() {
        let current = working[i].rect;
        let mut next = far_edge - axis.extent(&current);
        for (j, other) in working.iter().enumerate() {
            if j == i || !axis.shares_cross_span(&current, &other.rect) {
                continue;
            }
            let after = axis.end(&other.rect) > axis.end(&current)
                || (axis.end(&other.rect) == axis.end(&current) && j < i);
            if after {
                next = next.min(axis.start(&other.rect) - gap - axis.extent(&current));
            }
        }
        if axis.start(&current) != next {
            axis.set_start(&mut working[i].rect, next);
            stable = false;
        }
    }
    stable
}
