mod security_headers;

pub use security_headers::*;
