use serde::{Deserialize, Serialize};

/// How the gradient operator extends an image past its edges.
///
/// The same condition is used for the fixed and the moved image.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum BoundaryCondition {
    /// Repeat the edge sample (zero flux across the boundary).
    #[default]
    ZeroFluxNeumann,
    /// Wrap around to the opposite edge.
    Periodic,
    /// Every sample outside the image has this value.
    Constant { value: f64 },
}

impl std::fmt::Display for BoundaryCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroFluxNeumann => write!(f, "Zero-Flux Neumann"),
            Self::Periodic => write!(f, "Periodic"),
            Self::Constant { value } => write!(f, "Constant ({value})"),
        }
    }
}

impl BoundaryCondition {
    /// Map a possibly out-of-range position onto the lane `[0, len)`.
    ///
    /// `None` means the position takes the constant fill value.
    pub fn map_index(&self, i: isize, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        if i >= 0 && (i as usize) < len {
            return Some(i as usize);
        }
        match self {
            Self::ZeroFluxNeumann => Some(i.clamp(0, len as isize - 1) as usize),
            Self::Periodic => Some(i.rem_euclid(len as isize) as usize),
            Self::Constant { .. } => None,
        }
    }

    /// Fill value for positions that [`Self::map_index`] leaves unmapped.
    pub fn fill_value(&self) -> f64 {
        match self {
            Self::Constant { value } => *value,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BoundaryCondition;

    #[test]
    fn neumann_clamps_negative_and_overflow() {
        let bc = BoundaryCondition::ZeroFluxNeumann;
        assert_eq!(bc.map_index(-3, 5), Some(0));
        assert_eq!(bc.map_index(-1, 5), Some(0));
        assert_eq!(bc.map_index(4, 5), Some(4));
        assert_eq!(bc.map_index(5, 5), Some(4));
        assert_eq!(bc.map_index(99, 5), Some(4));
    }

    #[test]
    fn periodic_wraps() {
        let bc = BoundaryCondition::Periodic;
        let cases = [(-6, 4), (-1, 4), (0, 0), (4, 4), (5, 0), (7, 2), (11, 1)];
        for (i, expected) in cases {
            assert_eq!(bc.map_index(i, 5), Some(expected), "i = {i}");
        }
        for i in -4..=4 {
            assert_eq!(bc.map_index(i, 1), Some(0));
        }
    }

    #[test]
    fn constant_leaves_outside_unmapped() {
        let bc = BoundaryCondition::Constant { value: 7.5 };
        assert_eq!(bc.map_index(-1, 3), None);
        assert_eq!(bc.map_index(3, 3), None);
        assert_eq!(bc.map_index(2, 3), Some(2));
        assert_eq!(bc.fill_value(), 7.5);
    }
}
