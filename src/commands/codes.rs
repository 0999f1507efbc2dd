//! Codes command - print the Huffman code table for a message.

use anyhow::{Context, Result};
use clap::Args;

use pixelhide::{Codec, Config, HuffmanCodec, DELIMITER};

use super::{message_or_stdin, CommandExecutor};

/// Print the Huffman code of every symbol in a message.
#[derive(Args, Debug)]
pub struct CodesCommand {
    /// Message to build the tree from (reads from stdin if not provided)
    #[arg(short, long)]
    pub message: Option<String>,
}

impl CommandExecutor for CodesCommand {
    fn execute(&self, _config: &Config) -> Result<()> {
        let message = message_or_stdin(self.message.as_deref())?;

        let mut codec = HuffmanCodec::new();
        let bits = codec
            .encode(&format!("{message}{DELIMITER}"))
            .context("Failed to build Huffman tree")?;

        if let Some(tree) = codec.tree() {
            println!(
                "Tree: {} leaves, {} nodes, {} symbols",
                tree.leaf_count(),
                tree.node_count(),
                tree.total_frequency()
            );
        }
        for (symbol, code) in codec.code_table() {
            println!("{:?} -> {}", symbol, code);
        }
        println!();
        println!(
            "Encoded: {} bits ({} bits raw)",
            bits.len(),
            (message.chars().count() + 1) * 8
        );

        Ok(())
    }
}
