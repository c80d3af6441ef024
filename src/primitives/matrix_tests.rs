pub(crate) use super::*;

#[test]
fn test_from_vec() {
    let m = Matrix::from_vec(2, 3, vec![1.0_f32, 2.0, 3.0, 4.0, 5.0, 6.0])
        .expect("test data has correct dimensions: 2*3=6 elements");
    assert_eq!(m.shape(), (2, 3));
    assert!((m.get(0, 0) - 1.0).abs() < 1e-6);
    assert!((m.get(1, 2) - 6.0).abs() < 1e-6);
}

#[test]
fn test_from_vec_error() {
    let result = Matrix::from_vec(2, 3, vec![1.0_f32, 2.0, 3.0]);
    assert!(result.is_err());
}

#[test]
fn test_zeros() {
    let m = Matrix::<f32>::zeros(2, 3);
    assert_eq!(m.shape(), (2, 3));
    assert!(m.as_slice().iter().all(|&x| x == 0.0));
}

#[test]
fn test_get_set() {
    let mut m = Matrix::<f32>::zeros(2, 2);
    m.set(0, 1, 7.5);
    m.set(1, 0, -2.0);
    assert!((m.get(0, 1) - 7.5).abs() < 1e-6);
    assert!((m.get(1, 0) + 2.0).abs() < 1e-6);
}

#[test]
fn test_row() {
    let m = Matrix::from_vec(2, 3, vec![1.0_f32, 2.0, 3.0, 4.0, 5.0, 6.0])
        .expect("test data has correct dimensions: 2*3=6 elements");
    let row = m.row(1);
    assert_eq!(row.len(), 3);
    assert!((row[0] - 4.0).abs() < 1e-6);
    assert!((row[1] - 5.0).abs() < 1e-6);
    assert!((row[2] - 6.0).abs() < 1e-6);
}

#[test]
fn test_row_slice() {
    let m = Matrix::from_vec(2, 3, vec![1.0_f32, 2.0, 3.0, 4.0, 5.0, 6.0])
        .expect("test data has correct dimensions: 2*3=6 elements");
    assert_eq!(m.row_slice(0), &[1.0, 2.0, 3.0]);
    assert_eq!(m.row_slice(1), &[4.0, 5.0, 6.0]);
}

#[test]
fn test_column() {
    let m = Matrix::from_vec(2, 3, vec![1.0_f32, 2.0, 3.0, 4.0, 5.0, 6.0])
        .expect("test data has correct dimensions: 2*3=6 elements");
    let col = m.column(1);
    assert_eq!(col.len(), 2);
    assert!((col[0] - 2.0).abs() < 1e-6);
    assert!((col[1] - 5.0).abs() < 1e-6);
}

#[test]
fn test_usize_matrix() {
    let m = Matrix::from_vec(2, 2, vec![1_usize, 2, 3, 4])
        .expect("test data has correct dimensions: 2*2=4 elements");
    assert_eq!(m.get(0, 0), 1);
    assert_eq!(m.get(1, 1), 4);
}

#[test]
fn test_vstack() {
    let a = Matrix::from_vec(2, 2, vec![1.0_f32, 2.0, 3.0, 4.0])
        .expect("test data has correct dimensions: 2*2=4 elements");
    let b = Matrix::from_vec(1, 2, vec![5.0_f32, 6.0])
        .expect("test data has correct dimensions: 1*2=2 elements");
    let stacked = Matrix::vstack(&[&a, &b]).expect("column counts match");
    assert_eq!(stacked.shape(), (3, 2));
    assert!((stacked.get(2, 0) - 5.0).abs() < 1e-6);
    assert!((stacked.get(2, 1) - 6.0).abs() < 1e-6);
}

#[test]
fn test_vstack_mismatched_cols() {
    let a = Matrix::from_vec(1, 2, vec![1.0_f32, 2.0]).expect("1*2=2 elements");
    let b = Matrix::from_vec(1, 3, vec![3.0_f32, 4.0, 5.0]).expect("1*3=3 elements");
    assert!(Matrix::vstack(&[&a, &b]).is_err());
}

#[test]
fn test_vstack_empty() {
    let parts: [&Matrix<f32>; 0] = [];
    assert!(Matrix::vstack(&parts).is_err());
}

#[test]
fn test_serde_roundtrip() {
    let m = Matrix::from_vec(2, 2, vec![1.5_f32, -2.0, 0.0, 4.25])
        .expect("test data has correct dimensions: 2*2=4 elements");
    let encoded = bincode::serialize(&m).expect("matrix serializes");
    let decoded: Matrix<f32> = bincode::deserialize(&encoded).expect("matrix deserializes");
    assert_eq!(decoded, m);
}
