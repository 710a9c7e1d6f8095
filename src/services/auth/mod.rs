pub mod authenticator;
pub mod context;
pub mod done;
pub mod factory;
pub mod request;
pub mod request_state;

pub use authenticator::{Authenticator, Verified};
pub use context::{AuthContext, build_context};
pub use done::{Done, Pending, deferred};
pub use factory::ContextBuilder;
pub use request::PassportRequest;
pub use request_state::{RequestState, ResponseState};
