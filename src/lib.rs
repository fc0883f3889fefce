//! # gptl - Structured text translation through chat completions
//!
//! `gptl` translates plain strings and [EditorJS](https://editorjs.io)
//! documents by asking an OpenAI-compatible chat-completion API to
//! translate a JSON wrapper of each item, then unwrapping the reply back
//! into the shape the caller passed in.
//!
//! ## Features
//!
//! - **Shape preserving**: a string in gives a string out, a batch of N
//!   gives N results in the same order
//! - **EditorJS aware**: only the text fields of each block type are
//!   handed to the model for translation
//! - **Single flight**: one completion request in flight per provider
//! - **Environment driven**: `OPENAI_*` variables, with an optional
//!   config file underneath
//!
//! ## Library use
//!
//! ```no_run
//! use gptl_cli::config::ProviderOptions;
//! use gptl_cli::translation::{ChatGptProvider, TranslationRequest};
//!
//! # async fn run() -> gptl_cli::error::Result<()> {
//! let provider = ChatGptProvider::new(ProviderOptions::new("sk-...", "gpt-4")?)?;
//! let output = provider
//!     .translate(TranslationRequest::new("Good morning", "en", "ja"))
//!     .await?;
//! println!("{output}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Command line
//!
//! ```bash
//! echo "Good morning" | gptl --from en --to ja
//! gptl --from en --to de --batch ./strings.json
//! gptl usage
//! ```

/// Command-line interface definitions and handlers.
pub mod cli;

/// Provider options, environment resolution and the config file.
pub mod config;

/// Error type of the translation provider.
pub mod error;

/// Input reading from files and stdin.
pub mod input;

/// XDG-style path utilities for configuration.
pub mod paths;

/// Classification, prompting, rate-limited dispatch and the OpenAI client.
pub mod translation;

/// Terminal UI components (spinner, colors).
pub mod ui;
