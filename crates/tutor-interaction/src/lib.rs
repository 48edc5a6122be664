//! Adapters between the Tutor core and the outside world: the backend HTTP
//! API and speech programs.

pub mod http_backend;
pub mod speech;

pub use http_backend::HttpTutorBackend;
pub use speech::{
    CommandSpeechInput, CommandSpeechOutput, SpeechCommand, speech_input_from_config,
    speech_output_from_config,
};
