//! Compile settings, read from flags with environment fallbacks.
//!
//! `.env` is loaded by `main` before parsing, so values there count as
//! environment too.

use clap::Args;
use line_kit::line::CompileOptions;

pub const DEFAULT_SURFACE: &str = "main";
pub const DEFAULT_ALT_TEXT: &str = "A2UI";

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct Config {
    /// Surface to compile.
    #[arg(short, long, env = "LINE_A2UI_SURFACE", default_value = DEFAULT_SURFACE)]
    pub surface: String,

    /// altText for flex, template and imagemap messages.
    #[arg(long, env = "LINE_A2UI_ALT_TEXT", default_value = DEFAULT_ALT_TEXT)]
    pub alt_text: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            surface: DEFAULT_SURFACE.to_string(),
            alt_text: DEFAULT_ALT_TEXT.to_string(),
        }
    }
}

impl Config {
    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions::with_alt_text(self.alt_text.clone())
    }
}
