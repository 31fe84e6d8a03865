pub mod model_id;
pub mod object;

pub use model_id::ModelId;
pub use object::{NetworkObject, ObjectKind};
