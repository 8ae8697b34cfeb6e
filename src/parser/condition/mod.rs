pub mod condition_error;
pub use condition_error::*;

pub mod condition_token;
pub use condition_token::*;

pub mod lexer;
pub use lexer::*;

pub mod validator;
pub use validator::*;

pub mod condition;
pub use condition::*;
