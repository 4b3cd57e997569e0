mod backend_factory;
mod openai_compatible_backend;
mod scripted_backend;

pub use backend_factory::{BackendFactory, BackendFactoryError};
pub use openai_compatible_backend::OpenAiCompatibleBackend;
pub use scripted_backend::ScriptedBackend;
