// digitgan-core/src/ops/arithmetic/add_test.rs

use super::*;
use crate::autograd::grad_check::check_grad;
use crate::utils::testing::{check_tensor_near, create_test_tensor, create_test_tensor_with_grad};

#[test]
fn test_add_same_shape() -> Result<(), DigitGanError> {
    let a = create_test_tensor(vec![1.0, 2.0, 3.0], vec![3]);
    let b = create_test_tensor(vec![0.5, 0.5, -3.0], vec![3]);
    let c = add_op(&a, &b)?;
    check_tensor_near(&c, &[3], &[1.5, 2.5, 0.0], 1e-6);
    assert!(c.grad_fn().is_none());
    Ok(())
}

#[test]
fn test_add_bias_broadcast() -> Result<(), DigitGanError> {
    let x = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
    let bias = create_test_tensor(vec![10.0, 20.0, 30.0], vec![3]);
    let y = add_op(&x, &bias)?;
    check_tensor_near(&y, &[2, 3], &[11.0, 22.0, 33.0, 14.0, 25.0, 36.0], 1e-6);
    Ok(())
}

#[test]
fn test_add_incompatible_shapes() {
    let a = create_test_tensor(vec![1.0; 6], vec![2, 3]);
    let b = create_test_tensor(vec![1.0; 2], vec![2]);
    assert!(matches!(
        add_op(&a, &b),
        Err(DigitGanError::BroadcastError { .. })
    ));
}

#[test]
fn test_add_backward_reduces_bias_grad() -> Result<(), DigitGanError> {
    let x = create_test_tensor_with_grad(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
    let bias = create_test_tensor_with_grad(vec![0.0, 0.0, 0.0], vec![3]);
    let y = add_op(&x, &bias)?;
    let loss = crate::ops::reduction::sum_op(&y)?;
    loss.backward()?;

    let bias_grad = bias.grad().expect("bias grad");
    check_tensor_near(&bias_grad, &[3], &[2.0, 2.0, 2.0], 1e-6);
    let x_grad = x.grad().expect("x grad");
    check_tensor_near(&x_grad, &[2, 3], &[1.0; 6], 1e-6);
    Ok(())
}

#[test]
fn test_add_grad_check() {
    let a = create_test_tensor_with_grad(vec![0.3, -0.7, 1.1, 0.2], vec![2, 2]);
    let b = create_test_tensor_with_grad(vec![0.5, -0.5], vec![2]);
    let output_grad = create_test_tensor(vec![1.0, 2.0, -1.0, 0.5], vec![2, 2]);
    let result = check_grad(|t| add_op(&t[0], &t[1]), &[a, b], &output_grad, 1e-2, 1e-2);
    assert!(result.is_ok(), "{:?}", result.err());
}
