// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Square footage aggregation.
//!
//! Areas are summed at full precision and rounded to cents of a square foot
//! once, when a total is displayed or saved.

use crate::models::dimension::Dimension;

/// Sum of the areas of all dimensions, unrounded.
pub fn total_area(dimensions: &[Dimension]) -> f64 {
    // Folding from +0.0 keeps an empty sum from printing as "-0.00".
    dimensions.iter().map(Dimension::area).fold(0.0, |sum, area| sum + area)
}

/// Round square feet to two decimal places, halves away from zero.
pub fn round_sq_feet(sq_feet: f64) -> f64 {
    (sq_feet * 100.0).round() / 100.0
}

/// Format square feet with exactly two decimals.
pub fn format_sq_feet(sq_feet: f64) -> String {
    format!("{:.2}", round_sq_feet(sq_feet))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_segment() {
        let dims = vec![Dimension::feet_inches(10.0, 6.0, 5.0, 0.0)];
        assert_eq!(format_sq_feet(total_area(&dims)), "52.50");
    }

    #[test]
    fn test_two_segments() {
        let dims = vec![
            Dimension::feet_inches(12.0, 0.0, 8.0, 0.0),
            Dimension::feet_inches(4.0, 0.0, 3.0, 0.0),
        ];
        assert_eq!(round_sq_feet(total_area(&dims)), 108.0);
        assert_eq!(format_sq_feet(total_area(&dims)), "108.00");
    }

    #[test]
    fn test_empty_list_is_zero() {
        let total = total_area(&[]);
        assert!(total.is_sign_positive());
        assert_eq!(format_sq_feet(total), "0.00");
        assert_eq!(format_sq_feet(total_area(&[Dimension::blank()])), "0.00");
    }

    #[test]
    fn test_rounds_once_at_the_end() {
        // Each segment is 1' 1" x 1' 0" = 1.0833... sq ft. Rounding every
        // segment first would give 3.24 instead of 3.25.
        let dims = vec![Dimension::feet_inches(1.0, 1.0, 1.0, 0.0); 3];
        assert_eq!(format_sq_feet(total_area(&dims)), "3.25");
    }

    #[test]
    fn test_total_matches_sum_of_segments() {
        // Deterministic spread of feet/inches values in [0, 1000).
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = || {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            (seed % 100_000) as f64 / 100.0
        };

        for count in 1..20 {
            let dims: Vec<Dimension> = (0..count)
                .map(|_| Dimension::feet_inches(next(), next(), next(), next()))
                .collect();

            let expected: f64 = dims.iter().map(|d| d.area()).sum();
            assert_eq!(round_sq_feet(total_area(&dims)), round_sq_feet(expected));
        }
    }
}
