//! Pattern restriction
//!
//! `restrict_by(from, by)` binds a permission pattern (`by`) to a requested
//! pattern (`from`), producing a pattern covered by both.
//!
//! The two cell lists are consumed from both ends at once:
//!
//! ```text
//! from:  a  b  *  x  y
//! by:    a  b  c  d  *  y
//!        └prefix┘       └suffix┘     (pairwise unification)
//!              c  d                  (inner front: `*` in from absorbs by's literals)
//!                    x               (inner back: `*` in by absorbs from's literals)
//!                 *                  (both stars coalesce)
//! result: a/b/c/d/*/x/y
//! ```
//!
//! Where one side has `*` and the other a literal, the literal wins and the
//! star consumes zero cells there.
//!
//! The joined result must itself be a valid URI. Two `!` cells or a result
//! longer than [`MAX_URI_LENGTH`] cannot cover any valid topic, so both are
//! reported as no intersection.

use crate::domain::uri::{analyze, Uri, MAX_URI_LENGTH, PLUS, STAR};
use crate::error::UriError;

/// A window over the unconsumed cells of one pattern.
struct Cursor<'a> {
    cells: &'a [&'a str],
    front: usize,
    back: usize,
}

impl<'a> Cursor<'a> {
    fn new(cells: &'a [&'a str]) -> Self {
        Self {
            cells,
            front: 0,
            back: cells.len(),
        }
    }

    fn first(&self) -> Option<&'a str> {
        (self.front < self.back).then(|| self.cells[self.front])
    }

    fn last(&self) -> Option<&'a str> {
        (self.front < self.back).then(|| self.cells[self.back - 1])
    }

    fn is_exhausted(&self) -> bool {
        self.front >= self.back
    }
}

/// Unify two non-star cells.
fn unify<'a>(from: &'a str, by: &'a str) -> Option<&'a str> {
    if from == by || by == PLUS {
        Some(from)
    } else if from == PLUS {
        Some(by)
    } else {
        None
    }
}

/// If `star_side` is parked on `*` at its front, move the other side's
/// leading non-star cells into `out`.
fn absorb_front<'a>(star_side: &Cursor<'a>, other: &mut Cursor<'a>, out: &mut Vec<&'a str>) {
    if star_side.first() != Some(STAR) {
        return;
    }
    while let Some(cell) = other.first() {
        if cell == STAR {
            break;
        }
        out.push(cell);
        other.front += 1;
    }
}

/// Mirror of [`absorb_front`] for the rear of the window.
fn absorb_back<'a>(star_side: &Cursor<'a>, other: &mut Cursor<'a>, out: &mut Vec<&'a str>) {
    if star_side.last() != Some(STAR) {
        return;
    }
    while let Some(cell) = other.last() {
        if cell == STAR {
            break;
        }
        out.push(cell);
        other.back -= 1;
    }
}

/// Restrict over already-validated cell lists. `None` means no intersection.
pub(crate) fn restrict_cells(from: &[&str], by: &[&str]) -> Option<String> {
    let mut f = Cursor::new(from);
    let mut b = Cursor::new(by);
    let mut prefix: Vec<&str> = Vec::with_capacity(from.len() + by.len());
    let mut suffix: Vec<&str> = Vec::new();

    while let (Some(fc), Some(bc)) = (f.first(), b.first()) {
        if fc == STAR || bc == STAR {
            break;
        }
        let Some(cell) = unify(fc, bc) else { break };
        prefix.push(cell);
        f.front += 1;
        b.front += 1;
    }

    while let (Some(fc), Some(bc)) = (f.last(), b.last()) {
        if fc == STAR || bc == STAR {
            break;
        }
        let Some(cell) = unify(fc, bc) else { break };
        suffix.push(cell);
        f.back -= 1;
        b.back -= 1;
    }

    absorb_front(&f, &mut b, &mut prefix);
    absorb_front(&b, &mut f, &mut prefix);
    absorb_back(&f, &mut b, &mut suffix);
    absorb_back(&b, &mut f, &mut suffix);

    if f.first() == Some(STAR) && b.first() == Some(STAR) {
        prefix.push(STAR);
        f.front += 1;
        b.front += 1;
    }

    // A star left on one side matches zero cells.
    for side in [&mut f, &mut b] {
        if side.first() == Some(STAR) {
            side.front += 1;
        }
    }

    if !(f.is_exhausted() && b.is_exhausted()) {
        return None;
    }

    prefix.extend(suffix.iter().rev());
    let joined = prefix.join("/");
    analyze(&joined).valid.then_some(joined)
}

/// Compute the pattern covered by both `from` and `by`.
///
/// Both inputs are validated first. An empty intersection is reported as
/// [`UriError::NoIntersection`].
pub fn restrict_by(from: &str, by: &str) -> Result<String, UriError> {
    let from_uri = Uri::parse(from)?;
    let by_uri = Uri::parse(by)?;

    restrict_cells(&from_uri.cells(), &by_uri.cells()).ok_or_else(|| {
        tracing::trace!(from, by, "restriction has no intersection");
        UriError::NoIntersection {
            from: from.to_string(),
            by: by.to_string(),
        }
    })
}
