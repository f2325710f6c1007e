use super::*;
use crate::ops::arithmetic::mul_op;
use crate::utils::testing::create_test_tensor;

#[test]
fn test_parameter_requires_grad() {
    let p = Parameter::new(create_test_tensor(vec![1.0, 2.0], vec![2]), Some("w".to_string()));
    assert!(p.requires_grad());
    assert!(p.is_leaf());
    assert_eq!(p.name(), Some("w"));
}

#[test]
fn test_parameter_from_non_leaf_is_detached() {
    let a = create_test_tensor(vec![1.0, 2.0], vec![2]);
    a.requires_grad_(true).unwrap();
    let b = mul_op(&a, &a).unwrap();
    let p = Parameter::new_unnamed(b);
    assert!(p.is_leaf());
    assert!(p.requires_grad());
    assert_eq!(p.get_f32_data(), vec![1.0, 4.0]);
}

#[test]
fn test_parameter_clone_shares_storage() {
    let p = Parameter::new_unnamed(create_test_tensor(vec![0.0; 3], vec![3]));
    let q = p.clone();
    assert!(p.ptr_eq(&q));
    q.write_data().data_mut()[1] = 7.0;
    assert_eq!(p.get_f32_data(), vec![0.0, 7.0, 0.0]);
}

#[test]
fn test_set_name() {
    let mut p = Parameter::new_unnamed(create_test_tensor(vec![1.0], vec![1]));
    assert_eq!(p.name(), None);
    p.set_name("bias".to_string());
    assert_eq!(p.name(), Some("bias"));
}
