pub mod add;
pub mod mul;
pub mod sub;

pub use add::add_op;
pub use mul::{mul_op, mul_op_scalar};
pub use sub::sub_op;
