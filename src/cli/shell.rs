//! Numbered-menu interaction shell driving the ledger, summaries, and store.

use std::collections::HashMap;
use std::io::{self, BufRead, Write};

use crate::{
    cli::output,
    core::services::SummaryService,
    domain::{Expense, ExpenseDate},
    errors::LedgerError,
    ledger::Ledger,
    storage::JsonStore,
};

enum LoopControl {
    Continue,
    Exit,
}

/// Menu loop over a line-oriented input source. The ledger and store are
/// injected so tests can drive the shell against a scripted reader and a
/// temporary data directory.
pub struct Shell<R: BufRead> {
    ledger: Ledger,
    store: JsonStore,
    input: R,
}

/// Loads the persisted ledger and runs the menu shell on stdin.
pub fn run_cli() -> Result<(), LedgerError> {
    let store = JsonStore::new(None)?;
    let ledger = load_or_empty(&store);
    let stdin = io::stdin();
    let mut shell = Shell::new(ledger, store, stdin.lock());
    shell.run()
}

/// Startup load: missing file means an empty ledger, a corrupt file is
/// reported and degraded to empty, and every skipped record gets a notice.
fn load_or_empty(store: &JsonStore) -> Ledger {
    output::info("Loading existing expenses...");
    match store.load_expenses() {
        Ok(outcome) => {
            for issue in &outcome.issues {
                output::warning(format!(
                    "Skipped malformed expense record #{}: {}",
                    issue.index, issue.reason
                ));
            }
            if !outcome.ledger.is_empty() {
                output::info(format!("Loaded {} expense(s).", outcome.ledger.len()));
            }
            outcome.ledger
        }
        Err(err) => {
            output::warning(format!(
                "Could not load expenses ({err}); starting with an empty ledger."
            ));
            Ledger::new()
        }
    }
}

impl<R: BufRead> Shell<R> {
    pub fn new(ledger: Ledger, store: JsonStore, input: R) -> Self {
        Self {
            ledger,
            store,
            input,
        }
    }

    pub fn run(&mut self) -> Result<(), LedgerError> {
        loop {
            display_menu();
            let line = match self.read_line()? {
                // EOF behaves like the exit option: persist, then leave.
                None => {
                    self.exit_with_save();
                    break;
                }
                Some(line) => line,
            };
            if line.is_empty() {
                continue;
            }

            let choice: u32 = match line.parse() {
                Ok(choice) => choice,
                Err(_) => {
                    output::error("Invalid input. Please enter a numeric value.");
                    continue;
                }
            };

            match self.dispatch(choice)? {
                LoopControl::Continue => {}
                LoopControl::Exit => break,
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, choice: u32) -> Result<LoopControl, LedgerError> {
        match choice {
            1 => self.add_expense()?,
            2 => self.view_expenses(),
            3 => self.total_expense(),
            4 => self.filter_by_category()?,
            5 => self.monthly_summary(),
            6 => self.clear_entries(),
            7 => {
                self.exit_with_save();
                return Ok(LoopControl::Exit);
            }
            8 => self.save_category_summary(),
            9 => self.load_category_summary(),
            10 => self.display_category_summary(),
            _ => output::error("Invalid option. Please try again."),
        }
        Ok(LoopControl::Continue)
    }

    fn read_line(&mut self) -> Result<Option<String>, LedgerError> {
        let mut buffer = String::new();
        let read = self.input.read_line(&mut buffer)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(buffer.trim().to_string()))
    }

    fn prompt(&mut self, label: &str) -> Result<Option<String>, LedgerError> {
        print!("{label}");
        io::stdout().flush()?;
        self.read_line()
    }

    /// Menu option 1. Invalid date or amount aborts the operation without
    /// touching the ledger.
    fn add_expense(&mut self) -> Result<(), LedgerError> {
        let Some(date_input) = self.prompt("Enter date (dd/mm/yyyy): ")? else {
            return Ok(());
        };
        let date = match ExpenseDate::parse(&date_input) {
            Ok(date) => date,
            Err(err) => {
                output::error(format!("{err}. Expense not added."));
                return Ok(());
            }
        };
        let Some(description) = self.prompt("Enter description: ")? else {
            return Ok(());
        };
        let Some(category) = self.prompt("Enter category: ")? else {
            return Ok(());
        };
        let Some(amount_input) = self.prompt("Enter amount: ")? else {
            return Ok(());
        };
        let amount: f64 = match amount_input.parse() {
            Ok(amount) => amount,
            Err(_) => {
                output::error("Invalid input. Please enter a valid numeric amount.");
                return Ok(());
            }
        };

        self.ledger
            .add(Expense::new(date, description, category, amount));
        output::success("Expense added successfully.");
        Ok(())
    }

    fn view_expenses(&self) {
        if self.ledger.is_empty() {
            output::info("No expenses to show.");
            return;
        }
        println!("Expenses:");
        for expense in self.ledger.all() {
            println!("{expense}");
        }
    }

    fn total_expense(&self) {
        if self.ledger.is_empty() {
            output::info("No expenses to calculate.");
            return;
        }
        println!("Total expense: ${}", self.ledger.total());
    }

    fn filter_by_category(&mut self) -> Result<(), LedgerError> {
        let Some(category) = self.prompt("Enter category: ")? else {
            return Ok(());
        };
        let matches = self.ledger.filter_by_category(&category);
        println!("Expenses in {category}:");
        for expense in &matches {
            println!("{expense}");
        }
        if matches.is_empty() {
            output::info("No expenses found for the given category.");
        }
        Ok(())
    }

    fn monthly_summary(&self) {
        if self.ledger.is_empty() {
            output::info("No expenses available for summary.");
            return;
        }
        let totals = SummaryService::monthly_totals(&self.ledger);
        display_totals("Monthly Summary", &totals);
    }

    fn clear_entries(&mut self) {
        self.ledger.clear();
        output::success("All entries have been cleared.");
    }

    fn exit_with_save(&mut self) {
        output::info("Saving expenses...");
        match self.store.save_expenses(&self.ledger) {
            Ok(path) => output::success(format!("Expenses saved to {}", path.display())),
            Err(err) => output::error(format!("Error saving expenses: {err}")),
        }
        output::info("Goodbye!");
    }

    /// Menu option 8: recompute from the live ledger, then persist.
    fn save_category_summary(&mut self) {
        let totals = SummaryService::category_totals(&self.ledger);
        match self.store.save_category_summary(&totals) {
            Ok(path) => output::success(format!("Category summary saved to {}", path.display())),
            Err(err) => output::error(format!("Error saving category summary: {err}")),
        }
    }

    /// Menu option 9: show the persisted snapshot as-is. It is a cache and
    /// may be stale relative to the live ledger.
    fn load_category_summary(&self) {
        let summary = match self.store.load_category_summary() {
            Ok(summary) => summary,
            Err(err) => {
                output::warning(format!("Could not load category summary: {err}"));
                HashMap::new()
            }
        };
        if summary.is_empty() {
            output::info("No category summary to display.");
            return;
        }
        display_totals("Category Summary", &summary);
    }

    /// Menu option 10: prefer the snapshot, fall back to recomputing when no
    /// snapshot exists.
    fn display_category_summary(&self) {
        let mut summary = self.store.load_category_summary().unwrap_or_else(|err| {
            output::warning(format!("Could not load category summary: {err}"));
            HashMap::new()
        });
        if summary.is_empty() {
            output::info("No saved category summary found. Generating a new one.");
            summary = SummaryService::category_totals(&self.ledger);
        }
        if summary.is_empty() {
            output::info("No category summary to display.");
            return;
        }
        display_totals("Category Summary", &summary);
    }

    #[cfg(test)]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }
}

fn display_menu() {
    output::section("Expense Tracker Menu");
    println!("1. Add Expense");
    println!("2. View Expenses");
    println!("3. Total Expenses");
    println!("4. Filter by Category");
    println!("5. Monthly Summary");
    println!("6. Clear All Entries");
    println!("7. Exit");
    println!("8. Save Category Summary");
    println!("9. Load Category Summary");
    println!("10. Display Category Summary");
    print!("Choose an option: ");
    let _ = io::stdout().flush();
}

/// Keys are sorted before printing so output is deterministic; the underlying
/// maps carry no ordering guarantee.
fn display_totals(title: &str, totals: &HashMap<String, f64>) {
    let mut keys: Vec<&String> = totals.keys().collect();
    keys.sort();
    println!("{title}:");
    for key in keys {
        println!("{key}: ${}", totals[key]);
    }
}
