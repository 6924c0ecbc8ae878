mod gray;
pub use gray::*;

mod transform;
pub use transform::*;
