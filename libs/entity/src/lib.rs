pub mod comment;
pub mod post;

pub mod prelude {
    pub use crate::comment::Comment as CommentEntity;
    pub use crate::post::Post as PostEntity;
    pub use crate::post::PostWithComments as PostWithCommentsEntity;
}
