use crate::error::DigitGanError;
use crate::ops::arithmetic::add::add_values;
use crate::tensor::Tensor;
use crate::tensor_data::TensorData;
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

/// Identity of a graph node: the address of its shared `TensorData`.
///
/// Only used as a map key. The node itself is always reached through a
/// `Tensor` handle, which keeps it alive.
pub type NodeId = *const RwLock<TensorData>;

/// Returns every node reachable from `root` through `grad_fn` links, ordered
/// so that each node comes before all of its inputs (root first).
///
/// # Errors
/// Returns `DigitGanError::GraphReleased` if a node on the way had its graph
/// freed by an earlier backward pass.
pub fn topological_sort(root: &Tensor) -> Result<Vec<Tensor>, DigitGanError> {
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut post_order: Vec<Tensor> = Vec::new();
    // (node, inputs already pushed)
    let mut stack: Vec<(Tensor, bool)> = vec![(root.clone(), false)];

    while let Some((node, expanded)) = stack.pop() {
        if expanded {
            post_order.push(node);
            continue;
        }
        if !visited.insert(node.node_id()) {
            continue;
        }
        let grad_fn = {
            let guard = node.read_data();
            if guard.graph_released {
                return Err(DigitGanError::GraphReleased);
            }
            guard.grad_fn.clone()
        };
        stack.push((node, true));
        if let Some(op) = grad_fn {
            for input in op.inputs() {
                if !visited.contains(&input.node_id()) {
                    stack.push((input, false));
                }
            }
        }
    }

    post_order.reverse();
    Ok(post_order)
}

/// Propagates `initial_grad` from `root` to every leaf that requires grad.
///
/// Intermediate gradients are kept in a local map and dropped afterwards.
/// Unless `retain_graph` is set, each visited non-leaf node has its `grad_fn`
/// freed and is marked released.
pub(crate) fn backward_pass(
    root: &Tensor,
    initial_grad: Tensor,
    retain_graph: bool,
) -> Result<(), DigitGanError> {
    let sorted_nodes = topological_sort(root)?;
    log::debug!("backward: {} nodes in graph", sorted_nodes.len());

    let mut grad_map: HashMap<NodeId, Tensor> = HashMap::new();
    grad_map.insert(root.node_id(), initial_grad);

    for node in &sorted_nodes {
        let Some(accumulated_grad) = grad_map.remove(&node.node_id()) else {
            continue;
        };
        let (grad_fn, requires_grad) = {
            let guard = node.read_data();
            (guard.grad_fn.clone(), guard.requires_grad)
        };

        match grad_fn {
            None => {
                if requires_grad {
                    node.acc_grad(accumulated_grad)?;
                }
            }
            Some(op) => {
                let input_grads = op.backward(&accumulated_grad)?;
                let inputs = op.inputs();
                if input_grads.len() != inputs.len() {
                    return Err(DigitGanError::BackwardError(format!(
                        "BackwardOp returned {} gradients, but expected {} (for op: {:?})",
                        input_grads.len(),
                        inputs.len(),
                        op
                    )));
                }
                for (input, grad) in inputs.iter().zip(input_grads) {
                    if !input.requires_grad() {
                        continue;
                    }
                    let expected = input.shape();
                    if grad.shape() != expected {
                        return Err(DigitGanError::ShapeMismatch {
                            expected,
                            actual: grad.shape(),
                            operation: format!("backward of {:?}", op),
                        });
                    }
                    let merged = match grad_map.remove(&input.node_id()) {
                        Some(existing) => add_values(&existing, &grad)?,
                        None => grad,
                    };
                    grad_map.insert(input.node_id(), merged);
                }
                if !retain_graph {
                    let mut guard = node.write_data();
                    guard.grad_fn = None;
                    guard.graph_released = true;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::arithmetic::{add_op, mul_op};
    use crate::utils::testing::create_test_tensor_with_grad;

    #[test]
    fn test_topological_sort_puts_root_first_and_leaves_last() -> Result<(), DigitGanError> {
        let a = create_test_tensor_with_grad(vec![1.0], vec![1]);
        let b = create_test_tensor_with_grad(vec![2.0], vec![1]);
        let c = mul_op(&a, &b)?;
        let d = add_op(&c, &a)?;

        let order = topological_sort(&d)?;
        assert_eq!(order.len(), 4);
        assert!(order[0].ptr_eq(&d));
        let pos = |t: &Tensor| order.iter().position(|n| n.ptr_eq(t)).unwrap();
        assert!(pos(&c) < pos(&a));
        assert!(pos(&c) < pos(&b));
        Ok(())
    }

    #[test]
    fn test_shared_input_is_visited_once() -> Result<(), DigitGanError> {
        let a = create_test_tensor_with_grad(vec![3.0], vec![1]);
        let sq = mul_op(&a, &a)?;
        let order = topological_sort(&sq)?;
        assert_eq!(order.len(), 2);
        Ok(())
    }
}
