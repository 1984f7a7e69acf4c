pub mod email;
pub mod profile;

pub use email::{RequestCodeRequest, RequestCodeResponse, VerifyCodeRequest, VerifyCodeResponse};
pub use profile::RegisterProfileRequest;
