//! Round trips and 2-D passes of the wavelet engine.

use approx::assert_abs_diff_eq;
use ndfilter::wavelet::{
    self, daubechies_2d, haar_2d, idaubechies_2d, ihaar_2d, wavelet_center, wavelet_decenter,
};
use ndfilter::{Daubechies, ErrorKind, FilterBank, FilterError, WaveletProcessor};
use ndview::Array;

use shared::{float_rows, init_logger};

#[test]
fn test_haar_concrete_case() {
    init_logger();
    let mut a = Array::from_vec(&[1, 4], vec![4.0f64, 2.0, 0.0, 0.0]).unwrap();
    wavelet::haar(&mut a.view_mut()).unwrap();
    assert_eq!(a.as_slice(), &[6.0, 0.0, -2.0, 0.0]);
    wavelet::ihaar(&mut a.view_mut()).unwrap();
    assert_eq!(a.as_slice(), &[4.0, 2.0, 0.0, 0.0]);
}

#[test]
fn test_haar_round_trip_is_exact() {
    init_logger();
    let original = float_rows(&[5, 12], 1);
    let mut a = original.clone();
    wavelet::haar(&mut a.view_mut()).unwrap();
    wavelet::ihaar(&mut a.view_mut()).unwrap();
    for (x, y) in a.as_slice().iter().zip(original.as_slice()) {
        assert_abs_diff_eq!(*x, *y, epsilon = 1e-12);
    }
}

#[test]
fn test_daubechies_round_trip_on_centered_rows() {
    init_logger();
    for d in Daubechies::ALL {
        let border = d.taps() - 2;
        let original = float_rows(&[3, 20], d.taps() as u64);
        let mut centered = wavelet_center(&original.view(), border).unwrap();
        wavelet::daubechies(&mut centered.view_mut(), d).unwrap();
        wavelet::idaubechies(&mut centered.view_mut(), d).unwrap();
        let back = wavelet_decenter(&centered.view(), original.shape(), border).unwrap();
        for (x, y) in back.as_slice().iter().zip(original.as_slice()) {
            assert_abs_diff_eq!(*x, *y, epsilon = 1e-3);
        }
    }
}

#[test]
fn test_raw_round_trip_restores_tail() {
    init_logger();
    for d in Daubechies::ALL {
        let n = d.taps();
        let original = float_rows(&[2, 32], 40 + n as u64);
        let mut a = original.clone();
        let processor = WaveletProcessor::new(FilterBank::Daubechies(d)).unwrap();
        processor.horizontal_decompose(&mut a.view_mut()).unwrap();
        processor.horizontal_reconstruct(&mut a.view_mut()).unwrap();
        for row in 0..2 {
            for x in n - 2..32 {
                assert_abs_diff_eq!(
                    *a.get(&[row, x]).unwrap(),
                    *original.get(&[row, x]).unwrap(),
                    epsilon = 1e-3
                );
            }
        }
    }
}

#[test]
fn test_daubechies_2d_round_trip() {
    init_logger();
    for d in Daubechies::ALL {
        let border = d.taps() - 2;
        let original = float_rows(&[6, 10], 100 + d.taps() as u64);
        let mut centered = wavelet_center(&original.view(), border).unwrap();
        daubechies_2d(&mut centered.view_mut(), d).unwrap();
        idaubechies_2d(&mut centered.view_mut(), d).unwrap();
        let back = wavelet_decenter(&centered.view(), &[6, 10], border).unwrap();
        for (x, y) in back.as_slice().iter().zip(original.as_slice()) {
            assert_abs_diff_eq!(*x, *y, epsilon = 1e-3);
        }
    }
}

#[test]
fn test_haar_2d_round_trip_f32() {
    init_logger();
    let original: Vec<f32> = float_rows(&[8, 6], 7)
        .into_vec()
        .into_iter()
        .map(|v| v as f32)
        .collect();
    let mut a = Array::from_vec(&[8, 6], original.clone()).unwrap();
    haar_2d(&mut a.view_mut(), true).unwrap();
    ihaar_2d(&mut a.view_mut(), true).unwrap();
    for (x, y) in a.as_slice().iter().zip(&original) {
        assert_abs_diff_eq!(*x, *y, epsilon = 1e-3);
    }
}

#[test]
fn test_vertical_pass_matches_rows_of_transpose() {
    init_logger();
    let original = float_rows(&[8, 4], 21);
    let processor = WaveletProcessor::new(FilterBank::Daubechies(Daubechies::D4)).unwrap();

    let mut columns = original.clone();
    processor.vertical_decompose(&mut columns.view_mut()).unwrap();

    let mut transposed = original.view().swap_axes(0, 1).unwrap().to_owned().unwrap();
    processor.horizontal_decompose(&mut transposed.view_mut()).unwrap();
    let back = transposed.view().swap_axes(0, 1).unwrap().to_owned().unwrap();
    assert_eq!(columns, back);
}

#[test]
fn test_row_helpers_agree_with_array_passes() {
    init_logger();
    let original = float_rows(&[1, 16], 33);
    let processor = WaveletProcessor::new(FilterBank::Custom(vec![0.5, 1.5, 1.5, 0.5])).unwrap();

    let mut row = vec![0.0f64; 16];
    processor.decompose_row(original.as_slice(), &mut row).unwrap();
    let mut a = original.clone();
    processor.horizontal_decompose(&mut a.view_mut()).unwrap();
    assert_eq!(a.as_slice(), row.as_slice());

    let mut restored = vec![0.0f64; 16];
    processor.reconstruct_row(&row, &mut restored).unwrap();
    processor.horizontal_reconstruct(&mut a.view_mut()).unwrap();
    assert_eq!(a.as_slice(), restored.as_slice());
}

#[test]
fn test_validation_happens_before_mutation() {
    init_logger();
    let original = float_rows(&[2, 6], 55);

    let mut a = original.clone();
    let err = WaveletProcessor::new(FilterBank::Custom(vec![1.0; 5])).unwrap_err();
    assert!(matches!(err, FilterError::InvalidCoefficients(5)));
    assert_eq!(err.kind(), ErrorKind::InvalidParameter);

    let mut odd = float_rows(&[2, 5], 56);
    let err = wavelet::daubechies(&mut odd.view_mut(), Daubechies::D6).unwrap_err();
    assert!(matches!(err, FilterError::OddRowLength(5)));

    // even rows, but an odd number of them
    let mut three_rows = float_rows(&[3, 6], 57);
    let before = three_rows.clone();
    assert!(haar_2d(&mut three_rows.view_mut(), false).is_err());
    assert_eq!(three_rows, before);

    let mut cube = Array::from_vec(&[2, 2, 2], vec![0.0f64; 8]).unwrap();
    let err = wavelet::haar(&mut cube.view_mut()).unwrap_err();
    assert!(matches!(err, FilterError::NotTwoDimensional(3)));

    wavelet::haar(&mut a.view_mut()).unwrap();
    assert_ne!(a, original);
}
