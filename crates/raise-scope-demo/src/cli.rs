use std::io::Write as _;

use clap::{Parser, Subcommand};

use crate::scenarios;

/// Divides X by Y, raising on division by zero or overflow.
#[derive(Parser)]
struct Divide {
    #[clap(index = 1, allow_negative_numbers = true)]
    x: i64,
    #[clap(index = 2, allow_negative_numbers = true)]
    y: i64,
}

/// Requires that A equals B, raising "not a B" otherwise.
#[derive(Parser)]
struct Require {
    #[clap(index = 1, allow_negative_numbers = true)]
    a: i64,
    #[clap(index = 2, allow_negative_numbers = true)]
    b: i64,
}

#[derive(Subcommand)]
enum Scenario {
    /// Raises an error and catches it in the enclosing scope.
    Raise,
    Divide(Divide),
    /// Returns an allowed error and raises a disallowed one.
    AllowList,
    /// Returns a wrapped error whose chain contains an allowed one.
    Chain,
    /// Converts a raise into a function's error return.
    ReturnSlot,
    Require(Require),
    /// Runs every scenario with its default inputs.
    All,
}

impl Scenario {
    fn lines(&self) -> Vec<String> {
        match self {
            Scenario::Raise => scenarios::raise_and_catch(),
            Scenario::Divide(Divide { x, y }) => scenarios::divisions(&[(*x, *y)]),
            Scenario::AllowList => scenarios::allow_list(),
            Scenario::Chain => scenarios::chain_aware_allow_list(),
            Scenario::ReturnSlot => scenarios::return_slot(),
            Scenario::Require(Require { a, b }) => scenarios::requirements(&[(*a, *b)]),
            Scenario::All => [
                ("raise", scenarios::raise_and_catch()),
                ("divide", scenarios::divisions(&[(4, 2), (4, 0)])),
                ("allow-list", scenarios::allow_list()),
                ("chain", scenarios::chain_aware_allow_list()),
                ("return-slot", scenarios::return_slot()),
                ("require", scenarios::requirements(&[(42, 42), (42, 43)])),
            ]
            .into_iter()
            .flat_map(|(name, lines)| std::iter::once(format!("== {name}")).chain(lines))
            .collect(),
        }
    }
}

#[derive(Parser)]
#[clap(about = "Runs the raise-scope usage scenarios")]
pub(crate) struct Cli {
    /// The scenario to run.
    #[clap(subcommand)]
    scenario: Scenario,
}

impl Cli {
    pub(crate) fn run(&self) -> anyhow::Result<()> {
        report_raises(|| {
            let mut stdout = std::io::stdout().lock();
            for line in self.scenario.lines() {
                writeln!(stdout, "{line}")?;
            }
            Ok(())
        })
    }
}

/// Turns a raise that escapes `body` into an error return, so `main` reports
/// its cause instead of exiting silently.
fn report_raises<T>(body: impl FnOnce() -> anyhow::Result<T>) -> anyhow::Result<T> {
    raise_scope::catch(body, |cause| Err(anyhow::anyhow!(cause).context("uncaught raise")))
}
