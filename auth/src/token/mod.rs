pub mod claims;
pub mod codec;
pub mod errors;

pub use claims::Claims;
pub use claims::Identity;
pub use claims::TokenType;
pub use codec::TokenCodec;
pub use codec::TokenPair;
pub use errors::TokenError;
