//! Declarative output configuration
//!
//! A whole logger can be described by a JSON document:
//!
//! ```json
//! {
//!   "config": { "level": "debug", "queue_limit": { "bounded": 500 } },
//!   "outputs": [
//!     { "kind": "console", "colors": false },
//!     { "kind": "file", "name": "audit", "level": "warning", "path": "audit.log" }
//!   ]
//! }
//! ```

use super::{FileWriter, JsonWriter};
use crate::core::{
    ConfigOverrides, LogLevel, LogWriter, LoggerBuilder, LoggerError, Output, OutputOptions,
    Result, TimestampFormat,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_true() -> bool {
    true
}

/// Which writer an output uses, with that writer's own settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WriterKind {
    Console {
        #[serde(default = "default_true")]
        colors: bool,
        #[serde(default = "default_true")]
        date_banner: bool,
    },
    File {
        path: PathBuf,
    },
    Json {
        path: PathBuf,
        #[serde(default)]
        pretty: bool,
    },
}

impl WriterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WriterKind::Console { .. } => "console",
            WriterKind::File { .. } => "file",
            WriterKind::Json { .. } => "json",
        }
    }
}

/// One output entry of a logger document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Defaults to the writer kind
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub level: Option<LogLevel>,
    #[serde(default)]
    pub timestamp_format: Option<TimestampFormat>,
    #[serde(flatten)]
    pub writer: WriterKind,
}

impl OutputConfig {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.writer.as_str())
    }

    /// Open the writer and wrap it in an [`Output`]
    pub fn build(&self) -> Result<Output> {
        let writer = self.open_writer()?;

        let options = OutputOptions {
            level: self.level,
            timestamp_format: self.timestamp_format.clone(),
        };

        Ok(Output::from_boxed(self.name(), writer).with_options(options))
    }

    fn open_writer(&self) -> Result<Box<dyn LogWriter>> {
        match &self.writer {
            #[cfg(feature = "console")]
            WriterKind::Console {
                colors,
                date_banner,
            } => {
                let writer = super::ConsoleWriter::new()
                    .with_colors(*colors)
                    .with_date_banner(*date_banner);
                Ok(Box::new(writer))
            }
            #[cfg(not(feature = "console"))]
            WriterKind::Console { .. } => Err(LoggerError::config(
                self.name(),
                "console output requires the `console` feature",
            )),
            WriterKind::File { path } => Ok(Box::new(FileWriter::new(path)?)),
            WriterKind::Json { path, pretty } => {
                Ok(Box::new(JsonWriter::new(path)?.pretty(*pretty)))
            }
        }
    }
}

/// A complete logger description: configuration overrides plus outputs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerDocument {
    pub config: ConfigOverrides,
    pub outputs: Vec<OutputConfig>,
}

impl LoggerDocument {
    pub fn from_json(json: &str) -> Result<Self> {
        let document: Self = serde_json::from_str(json)?;
        document.validate()?;
        Ok(document)
    }

    fn validate(&self) -> Result<()> {
        for (i, output) in self.outputs.iter().enumerate() {
            let duplicate = self.outputs[..i].iter().any(|o| o.name() == output.name());
            if duplicate {
                return Err(LoggerError::config(
                    "outputs",
                    format!("duplicate output name '{}'", output.name()),
                ));
            }
        }
        Ok(())
    }

    /// Builder with the overrides applied and every output opened
    pub fn into_builder(self) -> Result<LoggerBuilder> {
        let mut builder = LoggerBuilder::new().overrides(&self.config);
        for output in &self.outputs {
            builder = builder.output(output.build()?);
        }
        Ok(builder)
    }
}

impl LoggerBuilder {
    /// Start a builder from a JSON logger document.
    ///
    /// Hooks can still be attached to the returned builder.
    ///
    /// # Example
    ///
    /// ```
    /// use logora::LoggerBuilder;
    ///
    /// let logger = LoggerBuilder::from_json(r#"{ "config": { "level": "warning" } }"#)
    ///     .unwrap()
    ///     .on_drop(|entry| eprintln!("dropped {}", entry.message))
    ///     .build();
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        LoggerDocument::from_json(json)?.into_builder()
    }
}
