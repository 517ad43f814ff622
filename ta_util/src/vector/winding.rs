/*
This file is part of the TA Boundary Download Tool
Copyright (C) 2022 Novel-T

The TA Boundary Download Tool is free software: you can redistribute it and/or modify
it under the terms of the GNU General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU General Public License for more details.

You should have received a copy of the GNU General Public License
along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/
use geo::LineString;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

/// Classifies ring orientation with the shoelace summation.
///
/// A sum >= 0 is clockwise.  The map service lists outer boundaries clockwise
/// and holes counter-clockwise, and `rebuild_rings` groups on exactly this
/// convention, so the sign handling here must not change.
pub fn ring_winding(ring: &LineString<f64>) -> Winding {
    let points = &ring.0;

    let mut sum = 0f64;

    for pair in points.windows(2) {
        sum += (pair[1].x - pair[0].x) * (pair[1].y + pair[0].y);
    }

    //rings may arrive without the first point repeated at the end
    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        if first != last {
            sum += (first.x - last.x) * (first.y + last.y);
        }
    }

    if sum >= 0. {
        Winding::Clockwise
    } else {
        Winding::CounterClockwise
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coordinate;

    fn ring(coords: &[(f64, f64)]) -> LineString<f64> {
        LineString(coords.iter().map(|&(x, y)| Coordinate { x, y }).collect())
    }

    #[test]
    fn test_winding_sign_convention() {
        let cw = ring(&[(0., 0.), (0., 5.), (5., 5.), (5., 0.), (0., 0.)]);
        assert_eq!(ring_winding(&cw), Winding::Clockwise);

        let ccw = ring(&[(0., 0.), (5., 0.), (5., 5.), (0., 5.), (0., 0.)]);
        assert_eq!(ring_winding(&ccw), Winding::CounterClockwise);
    }

    #[test]
    fn test_reversed_ring_flips_winding() {
        let coords = [(0., 0.), (1., 3.), (4., 4.), (6., 1.), (0., 0.)];
        let forward = ring(&coords);

        let mut reversed = coords;
        reversed.reverse();
        let backward = ring(&reversed);

        assert_eq!(ring_winding(&forward), Winding::Clockwise);
        assert_eq!(ring_winding(&backward), Winding::CounterClockwise);
    }

    #[test]
    fn test_implicitly_closed_ring() {
        //same square as the closed clockwise one, without the repeated point
        let cw = ring(&[(0., 0.), (0., 5.), (5., 5.), (5., 0.)]);
        assert_eq!(ring_winding(&cw), Winding::Clockwise);

        let ccw = ring(&[(0., 0.), (5., 0.), (5., 5.), (0., 5.)]);
        assert_eq!(ring_winding(&ccw), Winding::CounterClockwise);
    }
}
