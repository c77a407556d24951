//! HTTP function that translates uploaded PowerPoint packages.
//!
//! `POST` a .pptx body with optional `source` and `target` query parameters
//! and receive the translated package back.

pub mod config;
pub mod function;
pub mod http;

pub use config::ServerConfig;
pub use function::{
    respond, translate_function, AppState, FunctionRequest, FunctionResponse, ResponseBody,
};
pub use http::create_router;
