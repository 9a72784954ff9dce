//! `threes` CLI: build trees, lists, stacks and queues of tagged values from
//! JSON and print their representation.
//!
//! ## Usage
//!
//! ```sh
//! # In-order tree of a JSON array (stdin → stdout)
//! echo '[5, 3, 8, "five"]' | threes tree
//!
//! # Keep duplicates, balance, print pre-order as JSON
//! threes tree -i values.json --policy append-right --balance --order pre --format json
//!
//! # Depth of a value (-1 when absent)
//! threes search 8 -i values.json
//!
//! # Containers
//! echo '[1, 2, 3]' | threes stack --pop 1
//! echo '[1, 2, 3]' | threes queue
//!
//! # Compare two JSON scalars
//! threes compare 3 3.0
//! threes compare '{"character": "a"}' '"abc"'
//! ```
//!
//! Set `RUST_LOG=debug` to see side-chain creation, removals and balancing.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::debug;
use serde::Serialize;
use std::io::{self, Read};
use threes_core::{
    depth_or_sentinel, values_from_json, DuplicatePolicy, Kind, List, NodeView, OrderedTree,
    Position, Queue, Stack, TaggedValue, TraversalOrder,
};

#[derive(Parser)]
#[command(
    name = "threes",
    version,
    about = "Ordered trees, lists, stacks and queues of tagged values",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an ordered tree from a JSON array and print every tree of its chain
    Tree {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// What to do with equal values: append-left, append-right or ignore
        #[arg(long, default_value = "ignore")]
        policy: DuplicatePolicy,
        /// Traversal order: in, pre or post
        #[arg(long, default_value = "in")]
        order: TraversalOrder,
        /// Rebalance every tree of the chain before printing
        #[arg(long)]
        balance: bool,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print the depth at which VALUE is found, or -1
    Search {
        /// JSON scalar to look for
        value: String,
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        #[arg(long, default_value = "ignore")]
        policy: DuplicatePolicy,
        #[arg(long)]
        balance: bool,
    },
    /// Build a list and print it as `[a, b, c]`
    List {
        #[arg(short, long)]
        input: Option<String>,
        #[arg(short, long)]
        output: Option<String>,
        /// Remove every value equal to this JSON scalar before printing
        #[arg(long)]
        remove: Option<String>,
    },
    /// Push values onto a stack and print it as `$[bottom|...|top]>`
    Stack {
        #[arg(short, long)]
        input: Option<String>,
        #[arg(short, long)]
        output: Option<String>,
        /// Pop this many values first, printing each one
        #[arg(long, default_value_t = 0)]
        pop: usize,
    },
    /// Enqueue values and print the queue as `<[front | ... | back]`
    Queue {
        #[arg(short, long)]
        input: Option<String>,
        #[arg(short, long)]
        output: Option<String>,
        /// Dequeue this many values first, printing each one
        #[arg(long, default_value_t = 0)]
        dequeue: usize,
    },
    /// Compare two JSON scalars: LESS, EQUAL, GREATER or DIFFERENT
    Compare {
        #[arg(allow_negative_numbers = true)]
        left: String,
        #[arg(allow_negative_numbers = true)]
        right: String,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// JSON rendering of a tree chain.
#[derive(Serialize)]
struct ChainReport {
    policy: DuplicatePolicy,
    order: TraversalOrder,
    trees: Vec<TreeReport>,
}

#[derive(Serialize)]
struct TreeReport {
    kind: Option<Kind>,
    len: usize,
    height: usize,
    balanced: bool,
    values: Vec<String>,
    nodes: Vec<NodeReport>,
}

#[derive(Serialize)]
struct NodeReport {
    value: String,
    depth: usize,
    position: Position,
}

impl From<NodeView<'_>> for NodeReport {
    fn from(node: NodeView<'_>) -> Self {
        Self {
            value: node.value.repr(),
            depth: node.depth,
            position: node.position,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Tree {
            input,
            output,
            policy,
            order,
            balance,
            format,
        } => {
            let values = read_values(input.as_deref())?;
            let tree = build_tree(values, policy, balance);
            let rendered = match format {
                Format::Text => render_chain(&tree, order),
                Format::Json => {
                    let report = chain_report(&tree, policy, order);
                    let mut json = serde_json::to_string_pretty(&report)
                        .context("Failed to serialize tree report")?;
                    json.push('\n');
                    json
                }
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Search {
            value,
            input,
            policy,
            balance,
        } => {
            let needle = parse_scalar(&value)?;
            let values = read_values(input.as_deref())?;
            let tree = build_tree(values, policy, balance);
            println!("{}", depth_or_sentinel(tree.search(&needle)));
        }
        Commands::List {
            input,
            output,
            remove,
        } => {
            let mut list: List = read_values(input.as_deref())?.into_iter().collect();
            if let Some(raw) = remove {
                let target = parse_scalar(&raw)?;
                let removed = list.remove_all(&target);
                debug!("removed {removed} value(s) equal to {target}");
            }
            write_output(output.as_deref(), &format!("{}\n", list.repr()))?;
        }
        Commands::Stack { input, output, pop } => {
            let mut stack: Stack = read_values(input.as_deref())?.into_iter().collect();
            let mut out = String::new();
            for _ in 0..pop {
                match stack.pop() {
                    Some(value) => out.push_str(&format!("popped {value}\n")),
                    None => break,
                }
            }
            out.push_str(&stack.repr());
            out.push('\n');
            write_output(output.as_deref(), &out)?;
        }
        Commands::Queue {
            input,
            output,
            dequeue,
        } => {
            let mut queue: Queue = read_values(input.as_deref())?.into_iter().collect();
            let mut out = String::new();
            for _ in 0..dequeue {
                match queue.dequeue() {
                    Some(value) => out.push_str(&format!("dequeued {value}\n")),
                    None => break,
                }
            }
            out.push_str(&queue.repr());
            out.push('\n');
            write_output(output.as_deref(), &out)?;
        }
        Commands::Compare { left, right } => {
            let left = parse_scalar(&left)?;
            let right = parse_scalar(&right)?;
            println!("{}", left.compare(&right));
        }
    }

    Ok(())
}

fn build_tree(values: Vec<TaggedValue>, policy: DuplicatePolicy, balance: bool) -> OrderedTree {
    let mut tree = OrderedTree::new(policy);
    for value in values {
        tree.add(value);
    }
    if balance {
        tree.balance();
    }
    tree
}

/// One `Kind: [..]` line per tree of the chain.
fn render_chain(tree: &OrderedTree, order: TraversalOrder) -> String {
    tree.chain()
        .map(|t| {
            let kind = t.established_kind().map_or("Empty", Kind::name);
            format!("{kind}: {}\n", t.repr(order))
        })
        .collect()
}

fn chain_report(tree: &OrderedTree, policy: DuplicatePolicy, order: TraversalOrder) -> ChainReport {
    ChainReport {
        policy,
        order,
        trees: tree
            .chain()
            .map(|t| TreeReport {
                kind: t.established_kind(),
                len: t.len(),
                height: t.height(),
                balanced: t.is_balanced(),
                values: t.values(order).into_iter().map(TaggedValue::repr).collect(),
                nodes: t.nodes(order).into_iter().map(NodeReport::from).collect(),
            })
            .collect(),
    }
}

/// Parse a command-line argument as a single tagged value.
fn parse_scalar(raw: &str) -> Result<TaggedValue> {
    let json: serde_json::Value =
        serde_json::from_str(raw).with_context(|| format!("Not a JSON value: {}", raw))?;
    TaggedValue::from_json(&json).with_context(|| format!("Cannot use {} as a value", raw))
}

fn read_values(path: Option<&str>) -> Result<Vec<TaggedValue>> {
    let json = read_input(path)?;
    let values = values_from_json(&json).context("Failed to read values from JSON")?;
    debug!("read {} value(s)", values.len());
    Ok(values)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
