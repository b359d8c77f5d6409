//! Raw base-36 encode/decode.

use anyhow::{Context, Result};
use clap::Args;
use kindid::base36;
use serde::Serialize;

use crate::output::{print_single, OutputFormat};

use super::CommandContext;

/// Encode a 128-bit integer as base 36.
#[derive(Debug, Args)]
pub struct EncodeCommand {
    /// Unsigned decimal integer.
    value: String,
}

/// Decode a base-36 payload to its integer value.
#[derive(Debug, Args)]
pub struct DecodeCommand {
    /// Base-36 payload (`[0-9a-z]`).
    payload: String,
}

#[derive(Debug, Serialize)]
struct CodecView {
    value: String,
    encoded: String,
}

impl EncodeCommand {
    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        print_codec(self.view()?, ctx.format);
        Ok(())
    }

    fn view(&self) -> Result<CodecView> {
        let value: u128 = self
            .value
            .parse()
            .with_context(|| format!("'{}' is not an unsigned 128-bit integer", self.value))?;
        Ok(CodecView {
            value: value.to_string(),
            encoded: base36::encode(value),
        })
    }
}

impl DecodeCommand {
    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        print_codec(self.view()?, ctx.format);
        Ok(())
    }

    fn view(&self) -> Result<CodecView> {
        let value = base36::decode(&self.payload)
            .with_context(|| format!("'{}' is not a base-36 payload", self.payload))?;
        Ok(CodecView {
            value: value.to_string(),
            encoded: self.payload.clone(),
        })
    }
}

fn print_codec(view: CodecView, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_single(&view),
        OutputFormat::Text => println!("{} {}", view.value, view.encoded),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourceKind;

    fn encode(value: &str) -> Result<CodecView> {
        EncodeCommand {
            value: value.to_string(),
        }
        .view()
    }

    fn decode(payload: &str) -> Result<CodecView> {
        DecodeCommand {
            payload: payload.to_string(),
        }
        .view()
    }

    #[test]
    fn test_encode() {
        let view = encode("36").unwrap();
        assert_eq!(view.encoded, "10");
        assert_eq!(view.value, "36");
        assert_eq!(encode("0").unwrap().encoded, "0");
    }

    #[test]
    fn test_encode_rejects_non_integers() {
        assert!(encode("-1").is_err());
        assert!(encode("abc").is_err());
        let err = encode("340282366920938463463374607431768211456").unwrap_err();
        assert!(err.to_string().contains("unsigned 128-bit integer"));
    }

    #[test]
    fn test_decode() {
        let view = decode("10").unwrap();
        assert_eq!(view.value, "36");
        assert_eq!(view.encoded, "10");
        assert!(decode("ABC").is_err());
        assert!(decode("").is_err());
    }

    #[test]
    fn test_run_prints_json() {
        let ctx = CommandContext {
            format: OutputFormat::Json,
            source: SourceKind::Uuid,
        };
        assert!(EncodeCommand {
            value: "35".to_string()
        }
        .run(&ctx)
        .is_ok());
    }
}
