// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

use clap::{Parser, Subcommand, ValueEnum};
use csv::{ReaderBuilder, Trim};
use overdraft_demo_rs::{
    Account, AccountNumber, AmountPolicy, Branch, ConsoleReporter, Operation, Person, Reporter,
    Teller, TransactionError,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::error::Error;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Overdraft Demo - Bank accounts with overdraft limits
///
/// Opens two sample accounts and runs deposits, withdrawals, transfers and
/// daily overdraft interest against them, printing every step.
#[derive(Parser, Debug)]
#[command(name = "overdraft-demo")]
#[command(about = "Runs scripted operations against sample bank accounts", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    // Used when no subcommand is given.
    #[command(flatten)]
    scenario: ScenarioArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a balance, an owner name and a balance summary line
    Basics,
    /// Run statements, transfers and daily overdraft interest (default)
    Scenario(ScenarioArgs),
}

#[derive(clap::Args, Debug)]
struct ScenarioArgs {
    /// Days of overdraft interest to charge on account 1234-5
    #[arg(long, default_value_t = 30)]
    days: u32,

    /// Daily overdraft interest rate, in percent
    #[arg(long, default_value = "0.5")]
    rate: Decimal,

    /// How non-positive amounts are treated
    #[arg(long, value_enum, default_value_t = PolicyArg::Permissive)]
    policy: PolicyArg,

    /// Print the final statements as JSON
    #[arg(long)]
    json: bool,

    /// CSV script replacing the built-in operations
    ///
    /// Expected format: op,account,amount,destination
    #[arg(long, value_name = "FILE")]
    file: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum PolicyArg {
    Permissive,
    Strict,
}

impl From<PolicyArg> for AmountPolicy {
    fn from(policy: PolicyArg) -> Self {
        match policy {
            PolicyArg::Permissive => AmountPolicy::Permissive,
            PolicyArg::Strict => AmountPolicy::Strict,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let command = args
        .command
        .unwrap_or(Command::Scenario(args.scenario));

    let result = match command {
        Command::Basics => basics(),
        Command::Scenario(scenario) => run_scenario(&scenario),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

const FIRST_ACCOUNT: &str = "1234-5";
const SECOND_ACCOUNT: &str = "2345-6";

fn sample_owners() -> (Arc<Person>, Arc<Person>) {
    (
        Arc::new(Person::new("Maria", 18, 'F', "123.456.789-00")),
        Arc::new(Person::new("Joao", 22, 'M', "234.567.890-00")),
    )
}

/// Two accounts with a balance and a 200 overdraft limit each.
fn sample_accounts(
    first_balance: Decimal,
    policy: AmountPolicy,
) -> Result<(Account, Account), TransactionError> {
    let (maria, joao) = sample_owners();
    let first = Account::new(FIRST_ACCOUNT, maria)
        .with_balance(first_balance)
        .with_overdraft_limit(dec!(200))?
        .with_policy(policy);
    let second = Account::new(SECOND_ACCOUNT, joao)
        .with_balance(dec!(150.0))
        .with_overdraft_limit(dec!(200))?
        .with_policy(policy);
    Ok((first, second))
}

fn basics() -> Result<(), Box<dyn Error>> {
    let (first, second) = sample_accounts(dec!(100.0), AmountPolicy::Permissive)?;

    println!("{}", first.balance());
    println!("{}", first.owner().name());
    println!("balance of account {}: {}", second.number(), second.balance());
    Ok(())
}

fn sample_branch(policy: AmountPolicy) -> Result<Branch, TransactionError> {
    let (first, second) = sample_accounts(dec!(300.0), policy)?;
    let mut branch = Branch::new();
    branch.open(first)?;
    branch.open(second)?;
    Ok(branch)
}

fn sample_operations() -> Vec<Operation> {
    let first = AccountNumber::from(FIRST_ACCOUNT);
    let second = AccountNumber::from(SECOND_ACCOUNT);
    vec![
        Operation::Statement {
            account: first.clone(),
        },
        Operation::Statement {
            account: second.clone(),
        },
        Operation::Withdraw {
            account: first.clone(),
            amount: dec!(150),
        },
        Operation::Transfer {
            account: first.clone(),
            destination: second.clone(),
            amount: dec!(100),
        },
        Operation::Withdraw {
            account: first.clone(),
            amount: dec!(100),
        },
        Operation::Deposit {
            account: first.clone(),
            amount: dec!(100),
        },
        Operation::Transfer {
            account: first,
            destination: second,
            amount: dec!(200),
        },
    ]
}

fn run_scenario(args: &ScenarioArgs) -> Result<(), Box<dyn Error>> {
    let mut branch = sample_branch(args.policy.into())?;
    let operations = match &args.file {
        Some(path) => {
            let file = File::open(path)
                .map_err(|e| format!("opening file '{}': {}", path.display(), e))?;
            load_operations(BufReader::new(file))?
        }
        None => sample_operations(),
    };
    info!(operations = operations.len(), "running scenario");

    let mut teller = Teller::new(ConsoleReporter::stdout());
    run_operations(&mut branch, &mut teller, &operations);

    println!("--- Overdraft interest ---");
    let number = AccountNumber::from(FIRST_ACCOUNT);
    for (day, balance) in charge_daily_interest(&mut branch, &number, args.rate, args.days)? {
        println!("Balance after day {}: {}", day, balance.round_dp(Account::DECIMAL_PRECISION));
    }

    if args.json {
        let statements: Vec<_> = branch.accounts().map(Account::statement).collect();
        println!("{}", serde_json::to_string_pretty(&statements)?);
    }
    Ok(())
}

/// Executes every operation, logging and skipping the ones naming unknown accounts.
fn run_operations<R: Reporter>(branch: &mut Branch, teller: &mut Teller<R>, operations: &[Operation]) {
    for operation in operations {
        if let Err(e) = branch.execute(operation, teller) {
            warn!(account = %operation.account(), error = %e, "skipping operation");
        }
    }
}

/// Charges `rate` interest on `number` once per day and returns the balance
/// after each day.
fn charge_daily_interest(
    branch: &mut Branch,
    number: &AccountNumber,
    rate: Decimal,
    days: u32,
) -> Result<Vec<(u32, Decimal)>, TransactionError> {
    let account = branch
        .account_mut(number)
        .ok_or_else(|| TransactionError::UnknownAccount(number.clone()))?;

    let mut balances = Vec::with_capacity(days as usize);
    for day in 1..=days {
        account.apply_overdraft_interest(rate)?;
        balances.push((day, account.balance()));
    }
    Ok(balances)
}

/// Raw CSV record matching the script format.
///
/// Fields: `op, account, amount, destination`
#[derive(Debug, Deserialize)]
struct CsvRecord {
    op: String,
    account: String,
    #[serde(deserialize_with = "csv::invalid_option")]
    amount: Option<Decimal>,
    #[serde(default)]
    destination: Option<String>,
}

impl CsvRecord {
    /// Converts a CSV record to an [`Operation`].
    ///
    /// Returns `None` for unknown ops or missing required fields.
    fn into_operation(self) -> Option<Operation> {
        let account = AccountNumber(self.account);

        match self.op.to_lowercase().as_str() {
            "deposit" => Some(Operation::Deposit {
                account,
                amount: self.amount?,
            }),
            "withdraw" | "withdrawal" => Some(Operation::Withdraw {
                account,
                amount: self.amount?,
            }),
            "transfer" => Some(Operation::Transfer {
                account,
                destination: AccountNumber(self.destination.filter(|d| !d.is_empty())?),
                amount: self.amount?,
            }),
            "interest" => Some(Operation::OverdraftInterest {
                account,
                rate: self.amount?,
            }),
            "statement" => Some(Operation::Statement { account }),
            _ => None,
        }
    }
}

/// Reads an operation script from a CSV reader.
///
/// Malformed rows and unknown operations are logged and skipped.
///
/// # CSV Format
///
/// ```csv
/// op,account,amount,destination
/// withdraw,1234-5,150,
/// transfer,1234-5,100,2345-6
/// interest,1234-5,0.5,
/// statement,2345-6,,
/// ```
///
/// # Errors
///
/// Returns a CSV error if the reader fails or the header is unreadable.
fn load_operations<R: Read>(reader: R) -> Result<Vec<Operation>, csv::Error> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let mut operations = Vec::new();
    for result in rdr.deserialize::<CsvRecord>() {
        match result {
            Ok(record) => match record.into_operation() {
                Some(operation) => operations.push(operation),
                None => warn!("skipping invalid operation record"),
            },
            Err(e) => {
                warn!(error = %e, "skipping malformed row");
                continue;
            }
        }
    }

    Ok(operations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use overdraft_demo_rs::Event;
    use std::io::Cursor;

    fn balance(branch: &Branch, number: &str) -> Decimal {
        branch
            .account(&AccountNumber::from(number))
            .unwrap()
            .balance()
    }

    #[test]
    fn scenario_flags_parse_without_subcommand() {
        let args = Args::try_parse_from(["overdraft-demo", "--days", "5", "--policy", "strict"])
            .unwrap();
        assert!(args.command.is_none());
        assert_eq!(args.scenario.days, 5);
        assert_eq!(args.scenario.policy, PolicyArg::Strict);
        assert_eq!(args.scenario.rate, dec!(0.5));
    }

    #[test]
    fn scenario_flags_parse_after_subcommand() {
        let args = Args::try_parse_from(["overdraft-demo", "scenario", "--rate", "1"]).unwrap();
        match args.command {
            Some(Command::Scenario(scenario)) => {
                assert_eq!(scenario.rate, dec!(1));
                assert_eq!(scenario.days, 30);
            }
            other => panic!("expected scenario, got {other:?}"),
        }
    }

    #[test]
    fn scenario_flags_conflict_with_basics() {
        assert!(Args::try_parse_from(["overdraft-demo", "--days", "5", "basics"]).is_err());
    }

    #[test]
    fn sample_scenario_ends_overdrawn() {
        let mut branch = sample_branch(AmountPolicy::Permissive).unwrap();
        let mut teller = Teller::new(Vec::<Event>::new());

        run_operations(&mut branch, &mut teller, &sample_operations());

        assert_eq!(balance(&branch, FIRST_ACCOUNT), dec!(-150));
        assert_eq!(balance(&branch, SECOND_ACCOUNT), dec!(450));
        assert!(teller.reporter().iter().all(|e| !e.is_rejection()));
    }

    #[test]
    fn daily_interest_compounds_on_sample_scenario() {
        let mut branch = sample_branch(AmountPolicy::Permissive).unwrap();
        let mut teller = Teller::new(Vec::<Event>::new());
        run_operations(&mut branch, &mut teller, &sample_operations());

        let number = AccountNumber::from(FIRST_ACCOUNT);
        let balances = charge_daily_interest(&mut branch, &number, dec!(0.5), 30).unwrap();

        assert_eq!(balances.len(), 30);
        assert_eq!(balances[0], (1, dec!(-150.75)));
        assert!(balances.windows(2).all(|pair| pair[1].1 < pair[0].1));
    }

    #[test]
    fn basics_accounts_match_introduction() {
        let (first, second) = sample_accounts(dec!(100.0), AmountPolicy::Permissive).unwrap();
        assert_eq!(first.balance().to_string(), "100.0");
        assert_eq!(first.owner().name(), "Maria");
        assert_eq!(second.balance().to_string(), "150.0");
    }

    #[test]
    fn parse_operations() {
        let csv = "op,account,amount,destination\n\
                   withdraw,1234-5,150,\n\
                   transfer,1234-5,100,2345-6\n\
                   interest,1234-5,0.5,\n\
                   statement,2345-6,,\n";

        let operations = load_operations(Cursor::new(csv)).unwrap();

        assert_eq!(operations.len(), 4);
        assert_eq!(
            operations[1],
            Operation::Transfer {
                account: AccountNumber::from("1234-5"),
                destination: AccountNumber::from("2345-6"),
                amount: dec!(100),
            }
        );
        assert_eq!(
            operations[2],
            Operation::OverdraftInterest {
                account: AccountNumber::from("1234-5"),
                rate: dec!(0.5),
            }
        );
    }

    #[test]
    fn parse_with_whitespace() {
        let csv = "op,account,amount,destination\n deposit , 1234-5 , 100.0 , \n";
        let operations = load_operations(Cursor::new(csv)).unwrap();
        assert_eq!(
            operations,
            vec![Operation::Deposit {
                account: AccountNumber::from("1234-5"),
                amount: dec!(100.0),
            }]
        );
    }

    #[test]
    fn skip_invalid_rows() {
        let csv = "op,account,amount,destination\n\
                   deposit,1234-5,100,\n\
                   explode,1234-5,1,\n\
                   transfer,1234-5,10,\n\
                   withdraw,1234-5,not-a-number,\n\
                   deposit,2345-6,50,\n";

        let operations = load_operations(Cursor::new(csv)).unwrap();

        assert_eq!(operations.len(), 2);
    }

    #[test]
    fn unknown_accounts_are_skipped() {
        let mut branch = sample_branch(AmountPolicy::Permissive).unwrap();
        let mut teller = Teller::new(Vec::<Event>::new());
        let operations = vec![
            Operation::Deposit {
                account: AccountNumber::from("0000-0"),
                amount: dec!(10),
            },
            Operation::Deposit {
                account: AccountNumber::from(FIRST_ACCOUNT),
                amount: dec!(10),
            },
        ];

        run_operations(&mut branch, &mut teller, &operations);

        assert_eq!(teller.reporter().len(), 1);
        assert_eq!(balance(&branch, FIRST_ACCOUNT), dec!(310));
    }

    #[test]
    fn strict_policy_rejects_negative_script_amounts() {
        let mut branch = sample_branch(AmountPolicy::Strict).unwrap();
        let mut teller = Teller::new(Vec::<Event>::new());
        let operations = vec![Operation::Deposit {
            account: AccountNumber::from(FIRST_ACCOUNT),
            amount: dec!(-10),
        }];

        run_operations(&mut branch, &mut teller, &operations);

        assert!(teller.reporter()[0].is_rejection());
        assert_eq!(balance(&branch, FIRST_ACCOUNT), dec!(300));
    }
}
