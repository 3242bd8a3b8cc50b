//! This file provides the constant matrices used by the appearance model and by the linear sRGB
//! conversions, alongside a function for computing inverses. Only the forward matrices are written
//! out: every inverse is computed once from them, because printed inverses are rounded and let errors
//! creep into things that should be exact, like converting to appearance correlates and straight back.

use rulinalg::matrix::Matrix;
use rulinalg::vector::Vector;

/// The tolerance tests use when a stimulus goes through the model and back.
#[cfg(test)]
pub(crate) const TEST_PRECISION: f64 = 1e-6;

/// Not safe for general use. The only reason this is here is to calculate the inverse of constant
/// matrices, so this panics on singular matrices!
fn inv(m: &Matrix<f64>) -> Matrix<f64> {
    m.clone().inverse().expect("Constant matrix not invertible!")
}

/// Multiplies a 3x3 matrix by a column vector given as an array.
pub(crate) fn apply(m: &Matrix<f64>, v: [f64; 3]) -> [f64; 3] {
    let out = m * Vector::new(vec![v[0], v[1], v[2]]);
    [out[0], out[1], out[2]]
}

lazy_static! {
    /// The CAT02 sharpened cone response matrix, from XYZ.
    pub(crate) static ref CAT02: Matrix<f64> = Matrix::new(3, 3, vec![
        0.7328, 0.4296, -0.1624,
        -0.7036, 1.6975, 0.0061,
        0.0030, 0.0136, 0.9834,
    ]);
    pub(crate) static ref CAT02_INV: Matrix<f64> = inv(&CAT02);
    /// Hunt-Pointer-Estevez cone fundamentals, from XYZ.
    static ref HPE: Matrix<f64> = Matrix::new(3, 3, vec![
        0.38971, 0.68898, -0.07868,
        -0.22981, 1.18340, 0.04641,
        0.00000, 0.00000, 1.00000,
    ]);
    /// Takes adapted CAT02 responses straight into HPE space.
    pub(crate) static ref CAT02_TO_HPE: Matrix<f64> = &*HPE * &*CAT02_INV;
    pub(crate) static ref HPE_TO_CAT02: Matrix<f64> = inv(&CAT02_TO_HPE);
    /// XYZ (D65, Y of white = 1) to linear sRGB.
    pub(crate) static ref STANDARD_RGB_TRANSFORM: Matrix<f64> = Matrix::new(3, 3, vec![
        3.2404542, -1.5371385, -0.4985314,
        -0.9692660, 1.8760108, 0.0415560,
        0.0556434, -0.2040259, 1.0572252,
    ]);
    pub(crate) static ref STANDARD_RGB_TRANSFORM_INV: Matrix<f64> = inv(&STANDARD_RGB_TRANSFORM);
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    #[test]
    fn test_cat02_to_hpe_matches_published() {
        // CIE 159:2004 prints this product to seven places
        let expected = [
            [0.7409792, 0.2180250, 0.0410058],
            [0.2853532, 0.6242014, 0.0904454],
            [-0.0096280, -0.0056980, 1.0153260],
        ];
        for (i, row) in expected.iter().enumerate() {
            for (j, val) in row.iter().enumerate() {
                assert!((CAT02_TO_HPE[[i, j]] - val).abs() <= 1e-6);
            }
        }
    }

    #[test]
    fn test_inverse_round_trip() {
        let v = [0.3, 0.6, 0.1];
        let back = apply(&CAT02_INV, apply(&CAT02, v));
        let back_hpe = apply(&HPE_TO_CAT02, apply(&CAT02_TO_HPE, v));
        for i in 0..3 {
            assert!((v[i] - back[i]).abs() <= TEST_PRECISION);
            assert!((v[i] - back_hpe[i]).abs() <= TEST_PRECISION);
        }
    }
}
