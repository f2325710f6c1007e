// src/tensor/broadcast_utils.rs

use crate::error::DigitGanError;

/// Computes the resulting shape when broadcasting two shapes together.
///
/// Follows NumPy rules: shapes are aligned from the trailing dimension and
/// each pair of dimensions must be equal or one of them must be 1.
pub fn broadcast_shapes(shape1: &[usize], shape2: &[usize]) -> Result<Vec<usize>, DigitGanError> {
    let rank = shape1.len().max(shape2.len());
    let mut result = vec![0; rank];
    for i in 0..rank {
        let d1 = dim_from_end(shape1, rank - 1 - i);
        let d2 = dim_from_end(shape2, rank - 1 - i);
        result[i] = match (d1, d2) {
            (a, b) if a == b => a,
            (1, b) => b,
            (a, 1) => a,
            _ => {
                return Err(DigitGanError::BroadcastError {
                    shape1: shape1.to_vec(),
                    shape2: shape2.to_vec(),
                })
            }
        };
    }
    Ok(result)
}

// Size of the dimension `offset` positions from the end, 1 when missing
fn dim_from_end(shape: &[usize], offset: usize) -> usize {
    if offset < shape.len() {
        shape[shape.len() - 1 - offset]
    } else {
        1
    }
}

/// Contiguous strides of `src_shape` aligned to `out_shape`, with 0 for
/// dimensions that are broadcast (size 1 or missing in the source).
pub(crate) fn broadcast_strides(src_shape: &[usize], out_shape: &[usize]) -> Vec<usize> {
    let rank = out_shape.len();
    let offset = rank - src_shape.len();
    let mut strides = vec![0; rank];
    let mut running = 1;
    for i in (0..src_shape.len()).rev() {
        if src_shape[i] != 1 {
            strides[offset + i] = running;
        }
        running *= src_shape[i];
    }
    strides
}

/// Maps a linear index of `out_shape` to the linear index of the broadcast source.
#[inline]
pub(crate) fn source_index(mut linear: usize, out_shape: &[usize], src_strides: &[usize]) -> usize {
    let mut src = 0;
    for d in (0..out_shape.len()).rev() {
        let coord = linear % out_shape[d];
        linear /= out_shape[d];
        src += coord * src_strides[d];
    }
    src
}

/// Expands `data` (of shape `src_shape`) to `out_shape`.
pub(crate) fn expand_to(data: &[f32], src_shape: &[usize], out_shape: &[usize]) -> Vec<f32> {
    if src_shape == out_shape {
        return data.to_vec();
    }
    let strides = broadcast_strides(src_shape, out_shape);
    let numel: usize = out_shape.iter().product();
    (0..numel)
        .map(|i| data[source_index(i, out_shape, &strides)])
        .collect()
}

/// Sums a gradient of shape `grad_shape` back down to `target_shape`.
///
/// This is the adjoint of [`expand_to`]: every element of the broadcast
/// gradient is accumulated into the source element it was read from.
pub(crate) fn reduce_to_shape(
    grad: &[f32],
    grad_shape: &[usize],
    target_shape: &[usize],
) -> Vec<f32> {
    if grad_shape == target_shape {
        return grad.to_vec();
    }
    let strides = broadcast_strides(target_shape, grad_shape);
    let target_numel: usize = target_shape.iter().product();
    let mut out = vec![0.0f32; target_numel];
    for (i, &g) in grad.iter().enumerate() {
        out[source_index(i, grad_shape, &strides)] += g;
    }
    out
}
