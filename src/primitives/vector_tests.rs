pub(crate) use super::*;

#[test]
fn test_from_vec() {
    let v = Vector::from_vec(vec![1.0_f32, 2.0, 3.0]);
    assert_eq!(v.len(), 3);
    assert!((v[0] - 1.0).abs() < 1e-6);
    assert!((v[2] - 3.0).abs() < 1e-6);
}

#[test]
fn test_from_slice() {
    let v = Vector::from_slice(&[4.0_f32, 5.0]);
    assert_eq!(v.len(), 2);
    assert_eq!(v.as_slice(), &[4.0, 5.0]);
}

#[test]
fn test_is_empty() {
    let v: Vector<f32> = Vector::from_vec(vec![]);
    assert!(v.is_empty());
    assert_eq!(v.len(), 0);
}

#[test]
fn test_sum() {
    let v = Vector::from_slice(&[1.0_f32, 2.0, 3.0, 4.0]);
    assert!((v.sum() - 10.0).abs() < 1e-6);
}

#[test]
fn test_mean() {
    let v = Vector::from_slice(&[2.0_f32, 4.0, 6.0, 8.0, 10.0]);
    assert!((v.mean() - 6.0).abs() < 1e-6);
}

#[test]
fn test_mean_empty() {
    let v: Vector<f32> = Vector::from_vec(vec![]);
    assert!((v.mean() - 0.0).abs() < 1e-6);
}

#[test]
fn test_dot_commutative() {
    let u = Vector::from_slice(&[1.0_f32, 2.0, 3.0]);
    let v = Vector::from_slice(&[4.0_f32, 5.0, 6.0]);
    let uv = u.dot(&v);
    let vu = v.dot(&u);
    assert!((uv - vu).abs() < 1e-6);
    assert!((uv - 32.0).abs() < 1e-6);
}

#[test]
#[should_panic(expected = "equal length")]
fn test_dot_length_mismatch() {
    let u = Vector::from_slice(&[1.0_f32, 2.0]);
    let v = Vector::from_slice(&[1.0_f32, 2.0, 3.0]);
    let _ = u.dot(&v);
}

#[test]
fn test_norm() {
    let v = Vector::from_slice(&[-3.0_f32, 4.0]);
    assert!((v.norm() - 5.0).abs() < 1e-5);
}

#[test]
fn test_iter() {
    let v = Vector::from_slice(&[1.0_f32, 2.0, 3.0]);
    let collected: Vec<f32> = v.iter().copied().collect();
    assert_eq!(collected, vec![1.0, 2.0, 3.0]);
}

#[test]
fn test_serde_roundtrip() {
    let v = Vector::from_slice(&[1.0_f32, -2.5, 0.25]);
    let encoded = bincode::serialize(&v).expect("vector serializes");
    let decoded: Vector<f32> = bincode::deserialize(&encoded).expect("vector deserializes");
    assert_eq!(decoded, v);
}
