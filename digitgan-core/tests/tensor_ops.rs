use digitgan_core::ops::arithmetic::{add_op, mul_op_scalar, sub_op};
use digitgan_core::ops::linalg::{matmul_op, transpose_op};
use digitgan_core::ops::reduction::{mean_op, sum_op};
use digitgan_core::ops::view::reshape_op;
use digitgan_core::{DigitGanError, Tensor};

mod common;
use common::{create_leaf, create_test_tensor};

#[test]
fn test_bias_broadcast_over_batch() -> Result<(), DigitGanError> {
    let x = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
    let b = create_test_tensor(vec![10.0, 20.0, 30.0], vec![3]);
    let y = add_op(&x, &b)?;
    assert_eq!(y.shape(), vec![2, 3]);
    assert_eq!(y.get_f32_data(), vec![11.0, 22.0, 33.0, 14.0, 25.0, 36.0]);
    Ok(())
}

#[test]
fn test_incompatible_broadcast_is_an_error() {
    let a = create_test_tensor(vec![0.0; 6], vec![2, 3]);
    let b = create_test_tensor(vec![0.0; 2], vec![2]);
    assert!(matches!(
        sub_op(&a, &b),
        Err(DigitGanError::BroadcastError { .. })
    ));
}

#[test]
fn test_linear_layer_by_hand_gradients() -> Result<(), DigitGanError> {
    // y = x W^T + b, loss = mean(y)
    let x = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    let w = create_leaf(vec![0.5, -0.5, 1.0, 1.0], vec![2, 2]);
    let b = create_leaf(vec![0.0, 1.0], vec![2]);

    let y = add_op(&matmul_op(&x, &transpose_op(&w)?)?, &b)?;
    let loss = mean_op(&y)?;
    loss.backward()?;

    // dL/dW[o][i] = mean over the 4 outputs => sum_b x[b][i] / 4
    let w_grad = w.grad().expect("w grad").get_f32_data();
    assert_eq!(w_grad, vec![1.0, 1.5, 1.0, 1.5]);
    let b_grad = b.grad().expect("b grad").get_f32_data();
    assert_eq!(b_grad, vec![0.5, 0.5]);
    Ok(())
}

#[test]
fn test_reshape_then_reduce() -> Result<(), DigitGanError> {
    let a = create_leaf(vec![1.0, 2.0, 3.0, 4.0], vec![4, 1]);
    let flat = reshape_op(&a, vec![4])?;
    assert_eq!(flat.shape(), vec![4]);
    let loss = sum_op(&mul_op_scalar(&flat, 3.0)?)?;
    assert_eq!(loss.item()?, 30.0);
    loss.backward()?;
    let grad = a.grad().expect("grad");
    assert_eq!(grad.shape(), vec![4, 1]);
    assert_eq!(grad.get_f32_data(), vec![3.0; 4]);
    Ok(())
}

#[test]
fn test_reshape_wrong_numel() {
    let a = Tensor::new(vec![1.0, 2.0, 3.0], vec![3]).expect("tensor");
    assert!(reshape_op(&a, vec![2, 2]).is_err());
}
