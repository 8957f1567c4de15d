//! Domain entities - the core business objects.

mod post;
mod post_id;
mod validator;

pub use post::Post;
pub use post_id::{BYTE_LEN, EPOCH, PAYLOAD_LEN, PostId, STRING_LEN};
pub use validator::PostValidator;
